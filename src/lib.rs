//! Satellite tracking: where a satellite is over the Earth and where it
//! appears to a ground observer, from an SGP4 element set.
//!
//! ```no_run
//! use sattrack::{ObserverLocation, SatelliteDescriptor, TrackingSession};
//!
//! let tle: SatelliteDescriptor = "ISS (ZARYA)
//! 1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
//! 2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537"
//!     .parse()?;
//! let mut session = TrackingSession::with_sgp4(ObserverLocation::new("Home", 37.77, -122.42, 16.0))?;
//! session.load(&tle)?;
//! let fix = session.compute_now(chrono::Utc::now())?;
//! println!("{:.3} {:.3} el {:.1}", fix.geodetic.latitude, fix.geodetic.longitude, fix.topocentric.elevation);
//! # Ok::<(), sattrack::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod config;
pub mod coords;
pub mod error;
pub mod ground_track;
pub mod position;
pub mod propagator;
pub mod sat;
pub mod session;
pub mod time;
pub mod tle;

pub use config::TrackingConfig;
pub use coords::{eci_to_geodetic, eci_to_topocentric, EarthCenteredInertial};
pub use error::{Error, Result};
pub use ground_track::GroundTrackSegment;
pub use position::{GeodeticPosition, ObserverLocation, PositionFix, TopocentricPosition};
pub use propagator::{Propagator, Sgp4Propagator};
pub use sat::Satellite;
pub use session::{SessionState, TrackingSession, TrackingUpdate};
pub use tle::{OrbitalElements, SatelliteDescriptor};
