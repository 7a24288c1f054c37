/*!
The input side of the JSON boundary.

A single document drives the whole program:

```json
{
  "base_requests": [
    {"type": "Stop", "name": "A", "latitude": 59.9, "longitude": 30.3,
     "road_distances": {"B": 6000}},
    {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": false}
  ],
  "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
  "render_settings": {"width": 600, "height": 400, "...": "..."},
  "stat_requests": [
    {"id": 1, "type": "Route", "from": "A", "to": "B"}
  ]
}
```

`base_requests` fill the catalogue; `stat_requests` are answered in
order by the response module.
*/

use std::collections::HashMap;
use std::io::Read;

use geo::Point;
use serde::Deserialize;

use crate::catalogue::TransitCatalogue;
use crate::graph::RoutingSettings;
use crate::render::RenderSettings;
use crate::Error;

/// The whole input document. Every section may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputDocument {
    pub base_requests: Vec<BaseRequest>,
    pub stat_requests: Vec<StatRequest>,
    pub render_settings: RenderSettings,
    pub routing_settings: RoutingSettings,
}

/// A declaration filling the catalogue.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

/// A stop declaration with its outgoing road distances in meters.
#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub road_distances: HashMap<String, u32>,
}

/// A bus-line declaration over stop names, in travel order.
#[derive(Debug, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    #[serde(default)]
    pub is_roundtrip: bool,
}

/// A query against the filled catalogue.
#[derive(Debug, Deserialize)]
pub struct StatRequest {
    pub id: i64,
    #[serde(flatten)]
    pub kind: StatKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatKind {
    Stop { name: String },
    Bus { name: String },
    Map,
    Route { from: String, to: String },
}

impl InputDocument {
    /// Parse a document from a JSON stream.
    ///
    /// # Errors
    /// `Error::JsonError` on malformed input.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Fill a catalogue from the base requests: stops first, then road
    /// distances, then buses, so declarations may reference each other
    /// in any order.
    ///
    /// # Errors
    /// `Error::UnknownStop` when a distance or a bus route names a stop
    /// that was never declared.
    pub fn build_catalogue(&self) -> Result<TransitCatalogue, Error> {
        let mut catalogue = TransitCatalogue::new();

        for request in self.stop_requests() {
            catalogue.add_stop(
                &request.name,
                Point::new(request.longitude, request.latitude),
            );
        }
        for request in self.stop_requests() {
            for (to, &meters) in &request.road_distances {
                catalogue.set_distance(&request.name, to, meters)?;
            }
        }
        for request in self.bus_requests() {
            catalogue.add_bus(&request.name, &request.stops, request.is_roundtrip)?;
        }

        Ok(catalogue)
    }

    fn stop_requests(&self) -> impl Iterator<Item = &StopRequest> {
        self.base_requests.iter().filter_map(|request| match request {
            BaseRequest::Stop(stop) => Some(stop),
            BaseRequest::Bus(_) => None,
        })
    }

    fn bus_requests(&self) -> impl Iterator<Item = &BusRequest> {
        self.base_requests.iter().filter_map(|request| match request {
            BaseRequest::Bus(bus) => Some(bus),
            BaseRequest::Stop(_) => None,
        })
    }
}
