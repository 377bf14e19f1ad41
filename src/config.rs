//! Tracking session settings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest span, lead or step accepted for ground tracks, in seconds (about 1900 years).
pub const MAX_SPAN_SECS: f64 = 6.0e10;
/// Largest accepted tick interval, in seconds.
pub const MAX_TICK_SECS: f64 = 1.0e7;

/// Settings for a [`TrackingSession`](crate::session::TrackingSession).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Seconds between periodic position updates
    pub tick_interval_secs: f64,
    /// Span of the default ground track, minutes
    pub ground_track_minutes: f64,
    /// Seconds between ground track samples
    pub ground_track_step_secs: f64,
    /// How far before the reference instant the default ground track starts, minutes
    pub ground_track_lead_minutes: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            tick_interval_secs: 1.0,
            ground_track_minutes: 90.0,
            ground_track_step_secs: 60.0,
            ground_track_lead_minutes: 0.0,
        }
    }
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<()> {
        positive("tick_interval_secs", self.tick_interval_secs)?;
        at_most("tick_interval_secs", self.tick_interval_secs, MAX_TICK_SECS)?;
        positive("ground_track_step_secs", self.ground_track_step_secs)?;
        at_most("ground_track_step_secs", self.ground_track_step_secs, MAX_SPAN_SECS)?;
        if !(self.ground_track_minutes.is_finite() && self.ground_track_minutes >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "ground_track_minutes must be >= 0, got {}",
                self.ground_track_minutes
            )));
        }
        at_most("ground_track_minutes", self.ground_track_minutes * 60.0, MAX_SPAN_SECS)?;
        if !self.ground_track_lead_minutes.is_finite() {
            return Err(Error::InvalidConfig("ground_track_lead_minutes must be finite".into()));
        }
        at_most(
            "ground_track_lead_minutes",
            self.ground_track_lead_minutes.abs() * 60.0,
            MAX_SPAN_SECS,
        )?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Result<std::time::Duration> {
        std::time::Duration::try_from_secs_f64(self.tick_interval_secs)
            .map_err(|e| Error::InvalidConfig(format!("tick_interval_secs: {e}")))
    }
}

fn at_most(name: &str, value: f64, limit: f64) -> Result<()> {
    if value <= limit {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} out of range: {value} s exceeds {limit} s")))
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} must be > 0, got {value}")))
    }
}

/// Converts fractional seconds to a chrono duration at millisecond resolution.
pub(crate) fn chrono_seconds(secs: f64) -> Result<chrono::Duration> {
    if !(secs.is_finite() && secs.abs() <= MAX_SPAN_SECS) {
        return Err(Error::InvalidConfig(format!("{secs} s cannot be represented as a span")));
    }
    Ok(chrono::Duration::milliseconds((secs * 1000.0).round() as i64))
}
