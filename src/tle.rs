use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MINUTES_PER_DAY: f64 = 1440.0;

/// The three text lines that describe one satellite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteDescriptor {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl SatelliteDescriptor {
    pub fn new(
        name: impl Into<String>,
        line1: impl Into<String>,
        line2: impl Into<String>,
    ) -> SatelliteDescriptor {
        SatelliteDescriptor {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}

impl FromStr for SatelliteDescriptor {
    type Err = Error;

    /// Accepts a three-line element set, or a bare two-line set with no name.
    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()).collect();
        match lines.as_slice() {
            [name, line1, line2] => Ok(SatelliteDescriptor::new(*name, *line1, *line2)),
            [line1, line2] => Ok(SatelliteDescriptor::new("", *line1, *line2)),
            _ => Err(Error::Parse(format!(
                "expected 2 or 3 element lines, found {}",
                lines.len()
            ))),
        }
    }
}

/// Parsed mean elements together with the propagator constants derived from them.
#[derive(Clone)]
pub struct OrbitalElements {
    elements: sgp4::Elements,
    constants: sgp4::Constants,
    epoch: DateTime<Utc>,
}

impl OrbitalElements {
    pub fn parse(line0: &str, line1: &str, line2: &str) -> Result<OrbitalElements> {
        let name = line0.trim();
        let name = name.strip_prefix("0 ").unwrap_or(name).trim();
        let name = (!name.is_empty()).then(|| name.to_owned());

        let elements = sgp4::Elements::from_tle(name, line1.trim_end().as_bytes(), line2.trim_end().as_bytes())
            .map_err(|e| Error::Parse(format!("{:?}", e)))?;
        OrbitalElements::from_elements(elements)
    }

    pub fn from_descriptor(desc: &SatelliteDescriptor) -> Result<OrbitalElements> {
        OrbitalElements::parse(&desc.name, &desc.line1, &desc.line2)
    }

    pub fn from_elements(elements: sgp4::Elements) -> Result<OrbitalElements> {
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| Error::Parse(format!("{:?}", e)))?;
        let epoch = DateTime::<Utc>::from_naive_utc_and_offset(elements.datetime, Utc);
        Ok(OrbitalElements {
            elements,
            constants,
            epoch,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    /// NORAD catalog number.
    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn epoch_jd(&self) -> f64 {
        crate::time::julian_date(self.epoch)
    }

    /// Revolutions per day.
    pub fn mean_motion(&self) -> f64 {
        self.elements.mean_motion
    }

    /// Orbital period in minutes.
    pub fn period_minutes(&self) -> f64 {
        let rad_per_minute = self.mean_motion() * 2.0 * std::f64::consts::PI / MINUTES_PER_DAY;
        2.0 * std::f64::consts::PI / rad_per_minute
    }

    /// Degrees.
    pub fn inclination(&self) -> f64 {
        self.elements.inclination
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    pub fn elements(&self) -> &sgp4::Elements {
        &self.elements
    }

    pub(crate) fn constants(&self) -> &sgp4::Constants {
        &self.constants
    }
}

impl fmt::Debug for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrbitalElements")
            .field("name", &self.name())
            .field("norad_id", &self.norad_id())
            .field("epoch", &self.epoch)
            .finish()
    }
}
