use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::coords::EarthCenteredInertial;
use crate::error::Result;
use crate::propagator::Propagator;
use crate::tle::{OrbitalElements, SatelliteDescriptor};

/// One satellite: its elements and the propagator that flies them.
#[derive(Clone)]
pub struct Satellite {
    elements: OrbitalElements,
    propagator: Arc<dyn Propagator>,
}

impl Satellite {
    pub fn new(elements: OrbitalElements, propagator: Arc<dyn Propagator>) -> Satellite {
        Satellite {
            elements,
            propagator,
        }
    }

    pub fn from_descriptor(desc: &SatelliteDescriptor, propagator: Arc<dyn Propagator>) -> Result<Satellite> {
        Ok(Satellite::new(OrbitalElements::from_descriptor(desc)?, propagator))
    }

    /// Inertial position at `date`.
    pub fn predict(&self, date: DateTime<Utc>) -> Result<EarthCenteredInertial> {
        let dt = crate::time::minutes_between(self.elements.epoch(), date); // time since epoch in minutes
        self.propagator.propagate(&self.elements, dt)
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id()
    }

    pub fn name(&self) -> Option<&str> {
        self.elements.name()
    }

    /// Minutes.
    pub fn period(&self) -> f64 {
        self.elements.period_minutes()
    }

    /// Degrees.
    pub fn inclination(&self) -> f64 {
        self.elements.inclination()
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity()
    }
}

impl fmt::Debug for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satellite").field("elements", &self.elements).finish()
    }
}
