//! Boundary to the orbit propagator.

use crate::coords::EarthCenteredInertial;
use crate::error::{Error, Result};
use crate::tle::OrbitalElements;

/// Yields an inertial position for a time offset from the element epoch.
pub trait Propagator: Send + Sync {
    fn propagate(&self, elements: &OrbitalElements, minutes_after_epoch: f64) -> Result<EarthCenteredInertial>;
}

/// SGP4/SDP4 from the `sgp4` crate; positions are TEME, km.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(&self, elements: &OrbitalElements, minutes_after_epoch: f64) -> Result<EarthCenteredInertial> {
        let prediction = elements
            .constants()
            .propagate(sgp4::MinutesSinceEpoch(minutes_after_epoch))
            .map_err(|e| Error::Propagation {
                minutes: minutes_after_epoch,
                reason: format!("{:?}", e),
            })?;
        let pos = EarthCenteredInertial::from(prediction.position);
        if !pos.is_finite() {
            return Err(Error::Propagation {
                minutes: minutes_after_epoch,
                reason: "non-finite position".to_owned(),
            });
        }
        Ok(pos)
    }
}

impl<F> Propagator for F
where
    F: Fn(&OrbitalElements, f64) -> Result<EarthCenteredInertial> + Send + Sync,
{
    fn propagate(&self, elements: &OrbitalElements, minutes_after_epoch: f64) -> Result<EarthCenteredInertial> {
        self(elements, minutes_after_epoch)
    }
}
