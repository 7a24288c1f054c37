/*!
This module defines the `TransitCatalogue`, the indexed store of stops,
bus lines and road distances that every query runs against.

Stops and buses are kept in insertion order and addressed by enumeration
index; bus routes reference stops by index, so the catalogue owns every
string exactly once. Road distances are directed and sparse: a missing
`(from, to)` entry falls back to `(to, from)`, and to zero when neither
direction was declared.
*/

use std::collections::BTreeSet;

use geo::{Distance, Haversine, Point};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;

use crate::Error;

/// A named transit stop and its location.
/// `geometry` is a `geo::Point` with longitude as x and latitude as y.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub geometry: Point,
}

/// A named bus line.
///
/// `route` is the *expanded* stop sequence actually traversed in one
/// round: for non-round trips it contains the forward pass followed by
/// the reverse pass, so every consecutive pair is a real hop.
/// `is_roundtrip` is kept for the map renderer, which labels the far
/// terminal of non-round trips separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,
    pub route: Vec<usize>,
    pub is_roundtrip: bool,
}

/// Aggregate statistics for a single bus line.
///
/// `route_length` is the road length of the expanded route in meters;
/// `curvature` is that length divided by the great-circle length of the
/// same route.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: f64,
    pub curvature: f64,
}

/// Indexed store of the transit network.
#[derive(Debug, Clone, Default)]
pub struct TransitCatalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    stop_index: HashMap<String, usize>,
    bus_index: HashMap<String, usize>,
    distances: HashMap<(usize, usize), u32>,
    // One entry per stop, parallel to `stops`; sorted so membership
    // queries come out in name order.
    stop_buses: Vec<BTreeSet<String>>,
}

impl TransitCatalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop. A re-declared name keeps its earlier slot in
    /// enumeration order but the name index points at the new entry.
    pub fn add_stop(&mut self, name: &str, geometry: Point) {
        self.stops.push(Stop {
            name: name.to_string(),
            geometry,
        });
        self.stop_buses.push(BTreeSet::new());
        self.stop_index.insert(name.to_string(), self.stops.len() - 1);
    }

    /// Record the directed road distance between two declared stops.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), Error> {
        let from = self.resolve_stop(from)?;
        let to = self.resolve_stop(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Register a bus line over the given stop names.
    ///
    /// Non-round trips are expanded in place: `[s0 .. sn]` becomes
    /// `[s0 .. sn, s(n-1) .. s0]`. Every named stop must already be
    /// declared.
    pub fn add_bus(&mut self, name: &str, stops: &[String], is_roundtrip: bool) -> Result<(), Error> {
        let forward: Vec<usize> = stops
            .iter()
            .map(|stop| self.resolve_stop(stop))
            .collect::<Result<_, _>>()?;

        let mut route = forward.clone();
        if !is_roundtrip {
            route.extend(forward.iter().rev().skip(1));
        }

        for stop in route.iter().copied().collect::<HashSet<usize>>() {
            self.stop_buses[stop].insert(name.to_string());
        }

        self.buses.push(Bus {
            name: name.to_string(),
            route,
            is_roundtrip,
        });
        self.bus_index.insert(name.to_string(), self.buses.len() - 1);
        Ok(())
    }

    #[must_use]
    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stop_index.get(name).map(|&index| &self.stops[index])
    }

    #[must_use]
    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.bus_index.get(name).map(|&index| &self.buses[index])
    }

    /// All stops in enumeration order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses in insertion order.
    #[must_use]
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Directed road distance in meters between two stops by index,
    /// falling back to the reverse direction, then to zero.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .map_or(0.0, f64::from)
    }

    /// Names of the buses serving a stop, sorted. `None` for an unknown
    /// stop, an empty set for a known stop no bus serves.
    #[must_use]
    pub fn buses_at_stop(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.stop_index.get(name).map(|&index| &self.stop_buses[index])
    }

    /// Route statistics for a bus, or `None` for an unknown name.
    #[must_use]
    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        let bus = self.bus(name)?;

        let unique_stop_count = bus.route.iter().collect::<HashSet<_>>().len();

        let mut route_length = 0.0;
        let mut geo_length = 0.0;
        for (&from, &to) in bus.route.iter().tuple_windows() {
            route_length += self.distance(from, to);
            geo_length += Haversine::distance(self.stops[from].geometry, self.stops[to].geometry);
        }

        let curvature = if geo_length > f64::EPSILON {
            route_length / geo_length
        } else {
            1.0
        };

        Some(BusStats {
            stop_count: bus.route.len(),
            unique_stop_count,
            route_length,
            curvature,
        })
    }

    fn resolve_stop(&self, name: &str) -> Result<usize, Error> {
        self.stop_index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownStop(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue_with_stops(names: &[&str]) -> TransitCatalogue {
        let mut catalogue = TransitCatalogue::new();
        for (i, name) in names.iter().enumerate() {
            catalogue.add_stop(name, Point::new(30.0 + i as f64 * 0.01, 59.0));
        }
        catalogue
    }

    fn stop_names(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_route_expansion() {
        let mut catalogue = catalogue_with_stops(&["A", "B", "C"]);
        catalogue
            .add_bus("7", &stop_names(&["A", "B", "C"]), false)
            .unwrap();
        catalogue
            .add_bus("9", &stop_names(&["A", "B", "C", "A"]), true)
            .unwrap();

        assert_eq!(catalogue.bus("7").unwrap().route, vec![0, 1, 2, 1, 0]);
        assert_eq!(catalogue.bus("9").unwrap().route, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_add_bus_unknown_stop() {
        let mut catalogue = catalogue_with_stops(&["A"]);
        let result = catalogue.add_bus("7", &stop_names(&["A", "ZZZ"]), true);
        assert!(matches!(result, Err(Error::UnknownStop(name)) if name == "ZZZ"));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_distance_fallback() {
        let mut catalogue = catalogue_with_stops(&["A", "B", "C"]);
        catalogue.set_distance("A", "B", 100).unwrap();
        catalogue.set_distance("B", "A", 250).unwrap();
        catalogue.set_distance("B", "C", 300).unwrap();

        assert_eq!(catalogue.distance(0, 1), 100.0);
        assert_eq!(catalogue.distance(1, 0), 250.0);
        // (C, B) missing, falls back to (B, C)
        assert_eq!(catalogue.distance(2, 1), 300.0);
        // neither direction declared
        assert_eq!(catalogue.distance(0, 2), 0.0);
    }

    #[test]
    fn test_bus_stats() {
        let mut catalogue = catalogue_with_stops(&["A", "B"]);
        catalogue.set_distance("A", "B", 1200).unwrap();
        catalogue.set_distance("B", "A", 1400).unwrap();
        catalogue.add_bus("7", &stop_names(&["A", "B"]), false).unwrap();

        let stats = catalogue.bus_stats("7").unwrap();
        assert_eq!(stats.stop_count, 3);
        assert_eq!(stats.unique_stop_count, 2);
        assert!(approx::abs_diff_eq!(stats.route_length, 2600.0));

        let geo_hop = Haversine::distance(
            catalogue.stop("A").unwrap().geometry,
            catalogue.stop("B").unwrap().geometry,
        );
        assert!(approx::relative_eq!(
            stats.curvature,
            2600.0 / (2.0 * geo_hop),
            max_relative = 1e-9
        ));

        assert!(catalogue.bus_stats("777").is_none());
    }

    #[test]
    fn test_buses_at_stop_sorted() {
        let mut catalogue = catalogue_with_stops(&["A", "B"]);
        catalogue.add_bus("9", &stop_names(&["A", "B"]), false).unwrap();
        catalogue.add_bus("14", &stop_names(&["A"]), true).unwrap();

        let buses: Vec<&String> = catalogue.buses_at_stop("A").unwrap().iter().collect();
        assert_eq!(buses, ["14", "9"]);
        assert!(catalogue.buses_at_stop("ZZZ").is_none());

        catalogue.add_stop("C", Point::new(31.0, 59.0));
        assert!(catalogue.buses_at_stop("C").unwrap().is_empty());
    }
}
