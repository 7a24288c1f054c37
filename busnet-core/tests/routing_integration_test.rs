use busnet_core::prelude::*;
use geo::Point;
use serde_json::json;

fn settings() -> RoutingSettings {
    RoutingSettings {
        bus_wait_time: 6,
        bus_velocity: 40,
    }
}

fn catalogue(
    stops: &[&str],
    distances: &[(&str, &str, u32)],
    buses: &[(&str, &[&str], bool)],
) -> TransitCatalogue {
    let mut catalogue = TransitCatalogue::new();
    for (i, name) in stops.iter().enumerate() {
        catalogue.add_stop(name, Point::new(30.3 + i as f64 * 0.01, 59.9 + i as f64 * 0.01));
    }
    for &(from, to, meters) in distances {
        catalogue.set_distance(from, to, meters).unwrap();
    }
    for (name, stops, is_roundtrip) in buses {
        let stops: Vec<String> = stops.iter().map(ToString::to_string).collect();
        catalogue.add_bus(name, &stops, *is_roundtrip).unwrap();
    }
    catalogue
}

fn wait(stop_name: &str, minutes: f64) -> RouteItem {
    RouteItem::Wait {
        stop_name: stop_name.to_string(),
        minutes,
    }
}

fn ride(bus_name: &str, span_count: usize, minutes: f64) -> RouteItem {
    RouteItem::Ride {
        bus_name: bus_name.to_string(),
        span_count,
        minutes,
    }
}

#[test]
fn single_bus_two_stops() {
    let catalogue = catalogue(
        &["A", "B"],
        &[("A", "B", 6000), ("B", "A", 6000)],
        &[("1", &["A", "B"], false)],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let route = router.route("A", "B").unwrap();
    assert!(approx::abs_diff_eq!(route.total_time, 15.0, epsilon = 1e-6));
    assert_eq!(route.items, vec![wait("A", 6.0), ride("1", 1, 9.0)]);
}

#[test]
fn same_stop_query() {
    let catalogue = catalogue(
        &["A", "B"],
        &[("A", "B", 6000)],
        &[("1", &["A", "B"], false)],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let route = router.route("A", "A").unwrap();
    assert!(approx::abs_diff_eq!(route.total_time, 0.0));
    assert!(route.items.is_empty());
}

#[test]
fn transfer_between_two_buses() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[
            ("A", "B", 6000),
            ("B", "A", 6000),
            ("B", "C", 6000),
            ("C", "B", 6000),
        ],
        &[("1", &["A", "B"], false), ("2", &["B", "C"], false)],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let route = router.route("A", "C").unwrap();
    assert!(approx::abs_diff_eq!(route.total_time, 30.0, epsilon = 1e-6));
    assert_eq!(
        route.items,
        vec![
            wait("A", 6.0),
            ride("1", 1, 9.0),
            wait("B", 6.0),
            ride("2", 1, 9.0),
        ]
    );
}

#[test]
fn staying_aboard_beats_transferring() {
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 6000), ("B", "C", 6000)],
        &[("1", &["A", "B", "C"], false)],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let route = router.route("A", "C").unwrap();
    assert!(approx::abs_diff_eq!(route.total_time, 24.0, epsilon = 1e-6));
    assert_eq!(route.items, vec![wait("A", 6.0), ride("1", 2, 18.0)]);

    // strictly better than boarding twice
    assert!(route.total_time < 30.0);
}

#[test]
fn unreachable_target() {
    let catalogue = catalogue(&["A", "B"], &[], &[]);
    let router = TransitRouter::new(settings(), &catalogue).unwrap();
    assert!(router.route("A", "B").is_none());
}

#[test]
fn unknown_stop() {
    let catalogue = catalogue(&["A"], &[], &[]);
    let router = TransitRouter::new(settings(), &catalogue).unwrap();
    assert!(router.route("A", "ZZZ").is_none());
}

#[test]
fn waits_occupy_even_positions() {
    let catalogue = catalogue(
        &["A", "B", "C", "D"],
        &[("A", "B", 2000), ("B", "C", 2000), ("C", "D", 2000)],
        &[
            ("1", &["A", "B"], false),
            ("2", &["B", "C"], false),
            ("3", &["C", "D"], false),
        ],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let route = router.route("A", "D").unwrap();
    let wait_count = route
        .items
        .iter()
        .filter(|item| matches!(item, RouteItem::Wait { .. }))
        .count();
    assert_eq!(wait_count, route.items.len().div_ceil(2));

    for (position, item) in route.items.iter().enumerate() {
        if position % 2 == 0 {
            assert!(matches!(item, RouteItem::Wait { .. }));
        } else {
            assert!(matches!(item, RouteItem::Ride { .. }));
        }
    }

    let item_sum: f64 = route.items.iter().map(RouteItem::minutes).sum();
    assert!(approx::abs_diff_eq!(route.total_time, item_sum, epsilon = 1e-6));
}

#[test]
fn symmetric_distances_give_symmetric_weights() {
    // only forward distances declared; the reverse direction falls back
    // to them, so both directions cost the same
    let catalogue = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 6000), ("B", "C", 6000)],
        &[("1", &["A", "B", "C"], false)],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let forward = router.route("A", "C").unwrap();
    let backward = router.route("C", "A").unwrap();
    assert!(approx::abs_diff_eq!(
        forward.total_time,
        backward.total_time,
        epsilon = 1e-6
    ));
}

#[test]
fn asymmetric_distances_differ_by_direction() {
    let catalogue = catalogue(
        &["A", "B"],
        &[("A", "B", 6000), ("B", "A", 12000)],
        &[("1", &["A", "B"], false)],
    );
    let router = TransitRouter::new(settings(), &catalogue).unwrap();

    let there = router.route("A", "B").unwrap();
    let back = router.route("B", "A").unwrap();
    assert!(approx::abs_diff_eq!(there.total_time, 15.0, epsilon = 1e-6));
    assert!(approx::abs_diff_eq!(back.total_time, 24.0, epsilon = 1e-6));
}

#[test]
fn unused_bus_changes_nothing() {
    let base = catalogue(
        &["A", "B", "C"],
        &[("A", "B", 6000), ("B", "C", 6000)],
        &[("1", &["A", "B", "C"], false)],
    );
    let extended = catalogue(
        &["A", "B", "C", "X", "Y"],
        &[("A", "B", 6000), ("B", "C", 6000), ("X", "Y", 3000)],
        &[("1", &["A", "B", "C"], false), ("9", &["X", "Y"], false)],
    );

    let before = TransitRouter::new(settings(), &base).unwrap();
    let after = TransitRouter::new(settings(), &extended).unwrap();

    assert_eq!(before.route("A", "C"), after.route("A", "C"));
    assert_eq!(before.route("B", "A"), after.route("B", "A"));
}

#[test]
fn json_pipeline_end_to_end() {
    let document = InputDocument::from_reader(
        r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 59.93, "longitude": 30.31,
                 "road_distances": {"B": 6000}},
                {"type": "Stop", "name": "B", "latitude": 59.94, "longitude": 30.32,
                 "road_distances": {"C": 6000}},
                {"type": "Stop", "name": "C", "latitude": 59.95, "longitude": 30.33},
                {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": false},
                {"type": "Bus", "name": "2", "stops": ["B", "C"], "is_roundtrip": false}
            ],
            "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
            "render_settings": {
                "width": 600, "height": 400, "padding": 50, "line_width": 14,
                "stop_radius": 5, "bus_label_font_size": 20, "bus_label_offset": [7, 15],
                "stop_label_font_size": 18, "stop_label_offset": [7, -3],
                "underlayer_color": [255, 255, 255, 0.85], "underlayer_width": 3,
                "color_palette": ["green", [255, 160, 0]]
            },
            "stat_requests": [
                {"id": 1, "type": "Route", "from": "A", "to": "C"},
                {"id": 2, "type": "Route", "from": "A", "to": "Nowhere"},
                {"id": 3, "type": "Stop", "name": "B"},
                {"id": 4, "type": "Map"}
            ]
        }"#
        .as_bytes(),
    )
    .unwrap();

    let responses = process_requests(&document).unwrap();
    assert_eq!(responses.len(), 4);

    let route = serde_json::to_value(&responses[0]).unwrap();
    assert_eq!(
        route,
        json!({
            "request_id": 1,
            "total_time": 30.0,
            "items": [
                {"type": "Wait", "stop_name": "A", "time": 6.0},
                {"type": "Bus", "bus": "1", "span_count": 1, "time": 9.0},
                {"type": "Wait", "stop_name": "B", "time": 6.0},
                {"type": "Bus", "bus": "2", "span_count": 1, "time": 9.0}
            ]
        })
    );

    let miss = serde_json::to_value(&responses[1]).unwrap();
    assert_eq!(miss, json!({"request_id": 2, "error_message": "not found"}));

    let stop = serde_json::to_value(&responses[2]).unwrap();
    assert_eq!(stop, json!({"request_id": 3, "buses": ["1", "2"]}));

    match &responses[3] {
        StatResponse::Map { request_id, map } => {
            assert_eq!(*request_id, 4);
            assert!(map.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
            assert!(map.contains("<polyline"));
            assert!(map.ends_with("</svg>"));
        }
        other => panic!("expected a map response, got {other:?}"),
    }
}
