/*!
The output side of the JSON boundary: answering `stat_requests` and
serializing the response array.

Every response carries the `request_id` it answers. Lookups that miss
(unknown bus or stop names, unreachable journey targets) produce the
same `{"request_id": .., "error_message": "not found"}` object, so a
caller cannot distinguish an unknown stop from an unreachable one.
*/

use std::io::Write;

use serde::Serialize;

use crate::algo::itinerary::RouteItem;
use crate::catalogue::TransitCatalogue;
use crate::render::MapRenderer;
use crate::request::{InputDocument, StatKind, StatRequest};
use crate::router::TransitRouter;
use crate::Error;

const NOT_FOUND: &str = "not found";

/// One response object per stat request, serialized untagged: the field
/// set alone identifies the kind.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StatResponse {
    NotFound {
        request_id: i64,
        error_message: String,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Bus {
        request_id: i64,
        stop_count: usize,
        unique_stop_count: usize,
        route_length: f64,
        curvature: f64,
    },
    Map {
        request_id: i64,
        map: String,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<ItemResponse>,
    },
}

impl StatResponse {
    fn not_found(request_id: i64) -> Self {
        StatResponse::NotFound {
            request_id,
            error_message: NOT_FOUND.to_string(),
        }
    }
}

/// One itinerary leg in wire format. Ride legs are tagged `"Bus"`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum ItemResponse {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl From<RouteItem> for ItemResponse {
    fn from(item: RouteItem) -> Self {
        match item {
            RouteItem::Wait { stop_name, minutes } => ItemResponse::Wait {
                stop_name,
                time: minutes,
            },
            RouteItem::Ride {
                bus_name,
                span_count,
                minutes,
            } => ItemResponse::Bus {
                bus: bus_name,
                span_count,
                time: minutes,
            },
        }
    }
}

/// Build the catalogue, router and renderer for a document and answer
/// its stat requests in order.
///
/// # Errors
/// Catalogue-fill errors (`Error::UnknownStop`) and construction errors
/// (`Error::InvalidData`); individual query misses are `not found`
/// responses, not errors.
pub fn process_requests(document: &InputDocument) -> Result<Vec<StatResponse>, Error> {
    let catalogue = document.build_catalogue()?;
    let router = TransitRouter::new(document.routing_settings, &catalogue)?;
    let renderer = MapRenderer::new(document.render_settings.clone());

    Ok(document
        .stat_requests
        .iter()
        .map(|request| process_request(request, &catalogue, &router, &renderer))
        .collect())
}

fn process_request(
    request: &StatRequest,
    catalogue: &TransitCatalogue,
    router: &TransitRouter,
    renderer: &MapRenderer,
) -> StatResponse {
    match &request.kind {
        StatKind::Stop { name } => match catalogue.buses_at_stop(name) {
            None => StatResponse::not_found(request.id),
            Some(buses) => StatResponse::Stop {
                request_id: request.id,
                buses: buses.iter().cloned().collect(),
            },
        },
        StatKind::Bus { name } => match catalogue.bus_stats(name) {
            None => StatResponse::not_found(request.id),
            Some(stats) => StatResponse::Bus {
                request_id: request.id,
                stop_count: stats.stop_count,
                unique_stop_count: stats.unique_stop_count,
                route_length: stats.route_length,
                curvature: stats.curvature,
            },
        },
        StatKind::Map => StatResponse::Map {
            request_id: request.id,
            map: renderer.render(catalogue).render(),
        },
        StatKind::Route { from, to } => match router.route(from, to) {
            None => StatResponse::not_found(request.id),
            Some(route) => StatResponse::Route {
                request_id: request.id,
                total_time: route.total_time,
                items: route.items.into_iter().map(ItemResponse::from).collect(),
            },
        },
    }
}

/// Serialize the response array as pretty-printed JSON.
///
/// # Errors
/// `Error::JsonError` when the writer fails.
pub fn write_responses(writer: impl Write, responses: &[StatResponse]) -> Result<(), Error> {
    Ok(serde_json::to_writer_pretty(writer, responses)?)
}
