//! Convenient re-exports of the public surface.

pub use crate::algo::{RouteInfo, RouteItem};
pub use crate::catalogue::{Bus, BusStats, Stop, TransitCatalogue};
pub use crate::graph::{RoutingSettings, TransitGraph};
pub use crate::render::{MapRenderer, RenderSettings};
pub use crate::request::InputDocument;
pub use crate::response::{process_requests, write_responses, StatResponse};
pub use crate::router::TransitRouter;
pub use crate::Error;
