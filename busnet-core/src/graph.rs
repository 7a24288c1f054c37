/*!
This module defines the `TransitGraph`, the weighted directed graph the
journey planner searches, and its construction from a `TransitCatalogue`.

# Structs
- `TransitGraph`: the graph and associated lookups. Backed by
  `petgraph::graph::DiGraph`.
- `RoutingSettings`: boarding wait and bus velocity, shared by every
  edge the builder emits.
- `WaitEdge`, `RideEdge`: per-kind edge payloads.

# Enums
- `GraphNode`: the two vertices each stop contributes, `Platform`
  ("arrived, waiting to board") and `Boarded` ("on a bus at this stop").
- `GraphEdge`: `Wait` (platform to boarded, costs the boarding wait) or
  `Ride` (boarded at one stop to the platform of a later stop on the
  same bus).

The stop with enumeration index `k` always owns node `2k` (platform) and
node `2k + 1` (boarded). Ride edges are emitted for *every* ordered pair
of positions on a bus route, so staying aboard across several hops is a
single edge and never pays the boarding wait at intermediate stops.
*/

use std::ops::Deref;

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;

use crate::catalogue::{Bus, TransitCatalogue};
use crate::Error;

const METERS_IN_KM: f64 = 1000.0;
const MINUTES_IN_HOUR: f64 = 60.0;

/// Boarding and travel parameters applied to every edge.
/// `bus_wait_time` is in minutes, `bus_velocity` in km/h.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    pub bus_wait_time: u32,
    pub bus_velocity: u32,
}

/// Node representing the platform of a stop: a rider who has arrived
/// but not yet boarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformNode {
    pub stop_name: String,
}

/// Node representing a rider aboard some bus at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardedNode {
    pub stop_name: String,
}

/// Enum representing the type of node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode {
    Platform(PlatformNode),
    Boarded(BoardedNode),
}

impl GraphNode {
    #[must_use]
    pub fn stop_name(&self) -> &str {
        match self {
            Self::Platform(node) => &node.stop_name,
            Self::Boarded(node) => &node.stop_name,
        }
    }
}

/// Edge payload for boarding a bus at a stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaitEdge {
    pub minutes: f64,
}

/// Edge payload for riding a bus over one or more consecutive hops.
/// `span_count` is the number of hops covered, `minutes` the in-vehicle
/// travel time over the accumulated road distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RideEdge {
    pub bus_name: String,
    pub span_count: usize,
    pub minutes: f64,
}

/// Enum representing the type of edge in the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEdge {
    Wait(WaitEdge),
    Ride(RideEdge),
}

impl GraphEdge {
    /// Traversal cost in minutes.
    #[must_use]
    pub fn minutes(&self) -> f64 {
        match self {
            Self::Wait(wait_edge) => wait_edge.minutes,
            Self::Ride(ride_edge) => ride_edge.minutes,
        }
    }
}

/// The journey graph plus the name lookup used to enter it.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    stop_to_platform: HashMap<String, NodeIndex>,
}

// petgraph assigns node indices sequentially, so adding the platform
// node then the boarded node for the k-th stop pins them to 2k and
// 2k + 1. The ride-edge builder relies on this to address vertices
// arithmetically instead of carrying index tables around.
pub(crate) fn platform_vertex(stop: usize) -> NodeIndex {
    NodeIndex::new(2 * stop)
}

pub(crate) fn boarded_vertex(stop: usize) -> NodeIndex {
    NodeIndex::new(2 * stop + 1)
}

impl TransitGraph {
    /// Build the journey graph for a catalogue.
    ///
    /// Emits one wait edge per stop and `L * (L - 1) / 2` ride edges per
    /// bus with an expanded route of length `L >= 2`. Revisited stops
    /// produce parallel edges with different accumulated distances; the
    /// search later minimizes over them, so nothing is deduplicated
    /// here.
    ///
    /// # Errors
    /// `Error::InvalidData` when a bus needs ride edges but
    /// `bus_velocity` is zero.
    pub fn from_catalogue(
        settings: RoutingSettings,
        catalogue: &TransitCatalogue,
    ) -> Result<Self, Error> {
        let stop_count = catalogue.stops().len();
        let mut graph = DiGraph::with_capacity(2 * stop_count, stop_count);
        let mut stop_to_platform = HashMap::with_capacity(stop_count);

        for stop in catalogue.stops() {
            let platform = graph.add_node(GraphNode::Platform(PlatformNode {
                stop_name: stop.name.clone(),
            }));
            let boarded = graph.add_node(GraphNode::Boarded(BoardedNode {
                stop_name: stop.name.clone(),
            }));

            graph.add_edge(
                platform,
                boarded,
                GraphEdge::Wait(WaitEdge {
                    minutes: f64::from(settings.bus_wait_time),
                }),
            );

            // Last declaration wins for re-declared names, matching the
            // catalogue's own name index.
            stop_to_platform.insert(stop.name.clone(), platform);
        }

        for bus in catalogue.buses() {
            add_ride_edges(&mut graph, settings, catalogue, bus)?;
        }

        Ok(TransitGraph {
            graph,
            stop_to_platform,
        })
    }

    /// Platform vertex for a stop name, the entry point of every query.
    #[must_use]
    pub fn platform(&self, stop_name: &str) -> Option<NodeIndex> {
        self.stop_to_platform.get(stop_name).copied()
    }

    /// Access the internal `DiGraph` by immutable reference.
    #[must_use]
    pub const fn into_inner_graph(&self) -> &DiGraph<GraphNode, GraphEdge> {
        &self.graph
    }
}

/// Implementing `Deref` for `TransitGraph` to allow read access to the
/// internal `DiGraph`. The graph is never mutated after construction,
/// so no `DerefMut` is provided.
impl Deref for TransitGraph {
    type Target = DiGraph<GraphNode, GraphEdge>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

fn add_ride_edges(
    graph: &mut DiGraph<GraphNode, GraphEdge>,
    settings: RoutingSettings,
    catalogue: &TransitCatalogue,
    bus: &Bus,
) -> Result<(), Error> {
    let route = &bus.route;
    if route.len() < 2 {
        return Ok(());
    }
    if settings.bus_velocity == 0 {
        return Err(Error::InvalidData(format!(
            "bus {} needs ride edges but bus_velocity is zero",
            bus.name
        )));
    }

    let meters_per_minute = f64::from(settings.bus_velocity) * METERS_IN_KM / MINUTES_IN_HOUR;

    for from_position in 0..route.len() {
        let mut total_distance = 0.0;

        for to_position in from_position + 1..route.len() {
            total_distance += catalogue.distance(route[to_position - 1], route[to_position]);

            graph.add_edge(
                boarded_vertex(route[from_position]),
                platform_vertex(route[to_position]),
                GraphEdge::Ride(RideEdge {
                    bus_name: bus.name.clone(),
                    span_count: to_position - from_position,
                    minutes: total_distance / meters_per_minute,
                }),
            );
        }
    }

    Ok(())
}
