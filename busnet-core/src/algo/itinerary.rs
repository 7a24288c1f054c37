//! Conversion of a reconstructed edge sequence into a rider-facing
//! itinerary of alternating wait and ride items.

use crate::algo::dijkstra::GraphRoute;
use crate::graph::{GraphEdge, TransitGraph};

/// One leg of a journey.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteItem {
    /// Waiting to board at a stop.
    Wait { stop_name: String, minutes: f64 },
    /// Riding one bus over `span_count` consecutive hops.
    Ride {
        bus_name: String,
        span_count: usize,
        minutes: f64,
    },
}

impl RouteItem {
    #[must_use]
    pub fn minutes(&self) -> f64 {
        match self {
            Self::Wait { minutes, .. } | Self::Ride { minutes, .. } => *minutes,
        }
    }
}

/// A complete journey: total travel time in minutes and the legs in
/// traversal order. Items own their strings, so the result outlives
/// the router that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

/// Materialize a reconstructed route against the graph it came from.
///
/// # Panics
/// Panics when an edge of the route is not present in the graph, which
/// would mean the route was built against a different graph.
#[must_use]
pub(crate) fn assemble(graph: &TransitGraph, route: &GraphRoute) -> RouteInfo {
    let items = route
        .edges
        .iter()
        .map(|&edge| {
            let payload = graph
                .edge_weight(edge)
                .expect("route edge is missing from the graph");

            match payload {
                GraphEdge::Wait(wait_edge) => {
                    let (platform, _) = graph
                        .edge_endpoints(edge)
                        .expect("route edge is missing from the graph");
                    let stop_name = graph
                        .node_weight(platform)
                        .expect("wait edge source vertex is missing")
                        .stop_name()
                        .to_string();
                    RouteItem::Wait {
                        stop_name,
                        minutes: wait_edge.minutes,
                    }
                }
                GraphEdge::Ride(ride_edge) => RouteItem::Ride {
                    bus_name: ride_edge.bus_name.clone(),
                    span_count: ride_edge.span_count,
                    minutes: ride_edge.minutes,
                },
            }
        })
        .collect();

    RouteInfo {
        total_time: route.weight,
        items,
    }
}
