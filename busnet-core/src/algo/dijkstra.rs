//! Dijkstra's algorithm over the journey graph, precomputed from every
//! source vertex.
//!
//! Edge weights are minutes and never negative, so the classic
//! priority-queue relaxation applies unchanged. The per-source pass is
//! based on the implementation in the [`petgraph`] crate, extended with
//! predecessor links so a route can be reconstructed edge by edge
//! instead of yielding weights only.

use std::collections::BinaryHeap;

use hashbrown::hash_map::Entry::{Occupied, Vacant};
use hashbrown::{HashMap, HashSet};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::algo::MinScored;
use crate::graph::TransitGraph;

/// Best scores and predecessor links found from a single source vertex.
/// `predecessors[v]` is the vertex and edge on which the best known
/// path enters `v`; the source itself has no entry.
struct PathTree {
    scores: HashMap<NodeIndex, f64>,
    predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
}

/// A reconstructed walk through the graph: the summed weight and the
/// edges in traversal order. Empty `edges` means source and target
/// coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRoute {
    pub weight: f64,
    pub edges: Vec<EdgeIndex>,
}

/// Shortest-path state for every source vertex of a `TransitGraph`.
///
/// The graph is built once and queried many times, so all sources are
/// swept up front; afterwards `build_route` only walks predecessor
/// links and never touches the graph again.
pub struct ShortestPaths {
    trees: Vec<PathTree>,
}

impl ShortestPaths {
    #[must_use]
    pub fn new(graph: &TransitGraph) -> Self {
        let trees = graph
            .node_indices()
            .map(|source| shortest_path_tree(graph, source))
            .collect();
        ShortestPaths { trees }
    }

    /// Minimum-weight route between two vertices, or `None` when the
    /// target is unreachable. A vertex trivially reaches itself with
    /// weight zero.
    ///
    /// # Panics
    /// Panics if `source` is out of range for the graph this was built
    /// from, or if the predecessor links are inconsistent. Both
    /// indicate a construction defect.
    #[must_use]
    pub fn build_route(&self, source: NodeIndex, target: NodeIndex) -> Option<GraphRoute> {
        let tree = &self.trees[source.index()];
        let weight = *tree.scores.get(&target)?;

        let mut edges = Vec::new();
        let mut current = target;
        while current != source {
            let (previous, edge) = *tree
                .predecessors
                .get(&current)
                .expect("reached vertex is missing its predecessor link");
            edges.push(edge);
            current = previous;
        }
        edges.reverse();

        Some(GraphRoute { weight, edges })
    }
}

/// Single-source pass. Strict `<` on relaxation keeps the search
/// deterministic and terminating on equal-weight alternatives.
fn shortest_path_tree(graph: &TransitGraph, start: NodeIndex) -> PathTree {
    let mut visited = HashSet::new();
    let mut scores: HashMap<NodeIndex, f64> = HashMap::with_capacity(graph.node_count());
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();

    let mut visit_next = BinaryHeap::new();
    scores.insert(start, 0.0);
    visit_next.push(MinScored(0.0, start));

    while let Some(MinScored(node_score, node)) = visit_next.pop() {
        if visited.contains(&node) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            if visited.contains(&next) {
                continue;
            }

            let next_score = node_score + edge.weight().minutes();

            match scores.entry(next) {
                Occupied(mut ent) => {
                    if next_score < *ent.get() {
                        ent.insert(next_score);
                        visit_next.push(MinScored(next_score, next));
                        predecessors.insert(next, (node, edge.id()));
                    }
                }
                Vacant(ent) => {
                    ent.insert(next_score);
                    visit_next.push(MinScored(next_score, next));
                    predecessors.insert(next, (node, edge.id()));
                }
            }
        }
        visited.insert(node);
    }

    PathTree {
        scores,
        predecessors,
    }
}
