//! Value types handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coords::azel::AzElVector;
use crate::coords::LatitudeLongitude;

/// Sub-satellite point. Degrees, altitude in km.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Degrees in `[-90, 90]`
    pub latitude: f64,
    /// Degrees in `(-180, 180]`
    pub longitude: f64,
    pub altitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// Satellite as seen from an observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopocentricPosition {
    /// Degrees in `[0, 360)`, clockwise from north
    pub azimuth: f64,
    /// Degrees in `[-90, 90]`
    pub elevation: f64,
    /// km
    pub range: f64,
    /// km/s; velocity is not derived from the propagator, so this is always zero
    pub range_rate: f64,
    pub timestamp: DateTime<Utc>,
}

impl TopocentricPosition {
    pub fn from_look(look: &AzElVector, timestamp: DateTime<Utc>) -> TopocentricPosition {
        let mut azimuth = look.az.to_degrees();
        if azimuth >= 360.0 {
            azimuth -= 360.0;
        }
        TopocentricPosition {
            azimuth,
            elevation: look.el.to_degrees(),
            range: look.range,
            range_rate: 0.0,
            timestamp,
        }
    }

    /// Above the observer's horizon plane.
    pub fn is_visible(&self) -> bool {
        self.elevation > 0.0
    }
}

/// A named ground observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_meters: f64,
}

impl ObserverLocation {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, altitude_meters: f64) -> Self {
        ObserverLocation {
            name: name.into(),
            latitude,
            longitude,
            altitude_meters,
        }
    }

    pub fn coordinates(&self) -> LatitudeLongitude {
        LatitudeLongitude {
            lat: self.latitude,
            long: self.longitude,
            alt: self.altitude_meters / 1000.0,
        }
    }
}

/// Everything computed for one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub geodetic: GeodeticPosition,
    pub topocentric: TopocentricPosition,
}

impl PositionFix {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.geodetic.timestamp
    }
}
