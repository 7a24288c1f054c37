/*!
# Busnet

**Busnet** is a transit catalogue and journey planner for urban bus
networks. It ingests a JSON description of a network (stops with
coordinates and road distances, bus lines over ordered stop sequences)
and answers four kinds of queries: per-bus route statistics, per-stop
bus membership, an SVG map of all lines, and shortest-time journeys
between two stops.

Journeys are planned on a weighted directed graph backed by
[`petgraph`]: every stop contributes a platform vertex and a boarded
vertex joined by a boarding-wait edge, and every bus contributes ride
edges over all ordered pairs of stops along its route, so a single ride
over several hops never pays the boarding wait twice.

# Example
```ignore
use std::io;

use busnet_core::prelude::*;

let document = InputDocument::from_reader(io::stdin().lock())?;
let catalogue = document.build_catalogue()?;
let router = TransitRouter::new(document.routing_settings, &catalogue)?;

if let Some(route) = router.route("Airport", "Harbour Square") {
    println!("{} min over {} legs", route.total_time, route.items.len());
}
```
*/

use thiserror::Error;

pub mod algo;
pub mod catalogue;
pub mod graph;
pub mod prelude;
pub mod render;
pub mod request;
pub mod response;
pub mod router;
pub mod svg;

/// Error type for the transit catalogue and its JSON boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Malformed JSON input: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    #[error("Unknown bus: {0}")]
    UnknownBus(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
