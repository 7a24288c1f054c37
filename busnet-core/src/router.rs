//! The journey planner facade: builds the graph and the all-sources
//! shortest-path state from a catalogue, then answers stop-to-stop
//! queries.

use log::info;

use crate::algo::itinerary::{assemble, RouteInfo};
use crate::algo::ShortestPaths;
use crate::catalogue::TransitCatalogue;
use crate::graph::{RoutingSettings, TransitGraph};
use crate::Error;

/// Planner over a fixed catalogue. Construction does all the work;
/// afterwards the router is immutable and queries are pure reads, safe
/// to share across threads by reference.
pub struct TransitRouter {
    graph: TransitGraph,
    paths: ShortestPaths,
}

impl TransitRouter {
    /// Build the journey graph and sweep shortest paths from every
    /// vertex. The catalogue is only borrowed for the duration of the
    /// call.
    ///
    /// # Errors
    /// `Error::InvalidData` when ride edges are needed but
    /// `bus_velocity` is zero.
    pub fn new(settings: RoutingSettings, catalogue: &TransitCatalogue) -> Result<Self, Error> {
        let graph = TransitGraph::from_catalogue(settings, catalogue)?;
        info!(
            "journey graph built: {} vertices, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let paths = ShortestPaths::new(&graph);

        Ok(TransitRouter { graph, paths })
    }

    /// Fastest journey between two stops by name.
    ///
    /// Returns `None` when either name is unknown or no sequence of
    /// rides reaches the target. Querying a stop against itself yields
    /// an empty itinerary with zero total time.
    #[must_use]
    pub fn route(&self, from: &str, to: &str) -> Option<RouteInfo> {
        let source = self.graph.platform(from)?;
        let target = self.graph.platform(to)?;

        let route = self.paths.build_route(source, target)?;
        Some(assemble(&self.graph, &route))
    }
}
