/*!
Rendering of the whole network to an SVG document.

The map is drawn in four layers: route polylines, bus-name labels at
the terminals, stop circles, stop-name labels. Buses and stops are
drawn in name order and colors cycle through the configured palette, so
the output is deterministic for a given catalogue.
*/

use geo::Point;
use itertools::{Itertools, MinMaxResult};
use serde::Deserialize;

use crate::catalogue::{Bus, Stop, TransitCatalogue};
use crate::svg;
use crate::svg::{Color, StrokeLineCap, StrokeLineJoin};

const EPSILON: f64 = 1e-6;

// Label typography is part of the map's fixed look, not a setting.
const FONT_FAMILY: &str = "Verdana";
const BUS_LABEL_FONT_WEIGHT: &str = "bold";

/// Visual settings for the network map, deserialized from the
/// `render_settings` JSON object. Lengths are viewport units.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: (f64, f64),
    pub stop_label_font_size: u32,
    pub stop_label_offset: (f64, f64),
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

/// Projects geographic coordinates into the viewport: longitude grows
/// rightwards, latitude upwards, uniformly scaled to fit inside the
/// padded width and height.
pub(crate) struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub(crate) fn new<'a>(
        points: impl Iterator<Item = &'a Point> + Clone,
        max_width: f64,
        max_height: f64,
        padding: f64,
    ) -> Self {
        let (min_lng, max_lng) = match points.clone().map(|point| point.x()).minmax() {
            MinMaxResult::NoElements => (0.0, 0.0),
            MinMaxResult::OneElement(lng) => (lng, lng),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let (min_lat, max_lat) = match points.map(|point| point.y()).minmax() {
            MinMaxResult::NoElements => (0.0, 0.0),
            MinMaxResult::OneElement(lat) => (lat, lat),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let width_zoom = if (max_lng - min_lng).abs() < EPSILON {
            None
        } else {
            Some((max_width - 2.0 * padding) / (max_lng - min_lng))
        };
        let height_zoom = if (max_lat - min_lat).abs() < EPSILON {
            None
        } else {
            Some((max_height - 2.0 * padding) / (max_lat - min_lat))
        };

        let zoom = match (width_zoom, height_zoom) {
            (Some(width_zoom), Some(height_zoom)) => width_zoom.min(height_zoom),
            (Some(zoom), None) | (None, Some(zoom)) => zoom,
            (None, None) => 0.0,
        };

        SphereProjector {
            padding,
            min_lng,
            max_lat,
            zoom,
        }
    }

    pub(crate) fn project(&self, point: Point) -> svg::Point {
        svg::Point::new(
            (point.x() - self.min_lng) * self.zoom + self.padding,
            (self.max_lat - point.y()) * self.zoom + self.padding,
        )
    }
}

/// Renders a catalogue into an `svg::Document`.
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        MapRenderer { settings }
    }

    /// Draw every bus line of the catalogue.
    #[must_use]
    pub fn render(&self, catalogue: &TransitCatalogue) -> svg::Document {
        // Only stops on at least one route participate, both as drawn
        // circles and as projection anchors.
        let mut stops: Vec<&Stop> = catalogue
            .stops()
            .iter()
            .filter(|stop| {
                catalogue
                    .buses_at_stop(&stop.name)
                    .is_some_and(|buses| !buses.is_empty())
            })
            .collect();
        stops.sort_by(|left, right| left.name.cmp(&right.name));
        stops.dedup_by(|left, right| left.name == right.name);

        let projector = SphereProjector::new(
            stops.iter().map(|stop| &stop.geometry),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut buses: Vec<&Bus> = catalogue
            .buses()
            .iter()
            .filter(|bus| !bus.route.is_empty())
            .collect();
        buses.sort_by(|left, right| left.name.cmp(&right.name));

        let mut document = svg::Document::new();
        for (order, bus) in buses.iter().enumerate() {
            self.add_route_line(&mut document, catalogue, &projector, bus, order);
        }
        for (order, bus) in buses.iter().enumerate() {
            self.add_bus_labels(&mut document, catalogue, &projector, bus, order);
        }
        for stop in &stops {
            self.add_stop_circle(&mut document, &projector, stop);
        }
        for stop in &stops {
            self.add_stop_label(&mut document, &projector, stop);
        }
        document
    }

    fn palette_color(&self, order: usize) -> Color {
        if self.settings.color_palette.is_empty() {
            Color::default()
        } else {
            self.settings.color_palette[order % self.settings.color_palette.len()].clone()
        }
    }

    fn add_route_line(
        &self,
        document: &mut svg::Document,
        catalogue: &TransitCatalogue,
        projector: &SphereProjector,
        bus: &Bus,
        order: usize,
    ) {
        let mut line = svg::Polyline::new()
            .fill(Color::Name("none".to_string()))
            .stroke(self.palette_color(order))
            .stroke_width(self.settings.line_width)
            .stroke_linecap(StrokeLineCap::Round)
            .stroke_linejoin(StrokeLineJoin::Round);

        for &stop_index in &bus.route {
            line = line.add_point(projector.project(catalogue.stops()[stop_index].geometry));
        }
        document.add(line);
    }

    fn add_bus_labels(
        &self,
        document: &mut svg::Document,
        catalogue: &TransitCatalogue,
        projector: &SphereProjector,
        bus: &Bus,
        order: usize,
    ) {
        let first = bus.route[0];
        let mut terminals = vec![first];
        if !bus.is_roundtrip {
            // The far terminal of the expanded forward-and-back route.
            let last = bus.route[bus.route.len() / 2];
            if last != first {
                terminals.push(last);
            }
        }

        for terminal in terminals {
            let position = projector.project(catalogue.stops()[terminal].geometry);
            let label = svg::Text::new()
                .position(position)
                .offset(svg::Point::new(
                    self.settings.bus_label_offset.0,
                    self.settings.bus_label_offset.1,
                ))
                .font_size(self.settings.bus_label_font_size)
                .font_family(FONT_FAMILY)
                .font_weight(BUS_LABEL_FONT_WEIGHT)
                .data(&bus.name);

            document.add(self.underlay(label.clone()));
            document.add(label.fill(self.palette_color(order)));
        }
    }

    fn add_stop_circle(
        &self,
        document: &mut svg::Document,
        projector: &SphereProjector,
        stop: &Stop,
    ) {
        document.add(
            svg::Circle::new()
                .center(projector.project(stop.geometry))
                .radius(self.settings.stop_radius)
                .fill(Color::Name("white".to_string())),
        );
    }

    fn add_stop_label(
        &self,
        document: &mut svg::Document,
        projector: &SphereProjector,
        stop: &Stop,
    ) {
        let label = svg::Text::new()
            .position(projector.project(stop.geometry))
            .offset(svg::Point::new(
                self.settings.stop_label_offset.0,
                self.settings.stop_label_offset.1,
            ))
            .font_size(self.settings.stop_label_font_size)
            .font_family(FONT_FAMILY)
            .data(&stop.name);

        document.add(self.underlay(label.clone()));
        document.add(label.fill(Color::Name("black".to_string())));
    }

    /// The halo drawn beneath a label to keep it readable over lines.
    fn underlay(&self, label: svg::Text) -> svg::Text {
        label
            .fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .stroke_linecap(StrokeLineCap::Round)
            .stroke_linejoin(StrokeLineJoin::Round)
    }
}
