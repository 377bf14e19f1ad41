//! One satellite, one observer, and the periodic tracking loop around them.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::config::{chrono_seconds, TrackingConfig, MAX_TICK_SECS};
use crate::coords;
use crate::error::{Error, Result};
use crate::ground_track::{self, GroundTrackSegment};
use crate::position::{ObserverLocation, PositionFix};
use crate::propagator::{Propagator, Sgp4Propagator};
use crate::sat::Satellite;
use crate::tle::SatelliteDescriptor;

/// Delivered once per tick while tracking.
pub type TrackingUpdate = Result<PositionFix>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loaded,
    Tracking,
    Idle,
}

struct Shared {
    satellite: Option<Arc<Satellite>>,
    observer: ObserverLocation,
    last_fix: Option<PositionFix>,
    /// Bumped on every load, start and stop; ticks from an older run are discarded.
    generation: u64,
    /// Sequence handed to each computation when it snapshots its inputs.
    next_request: u64,
    /// Sequence of the computation that produced `last_fix`.
    applied_request: u64,
    subscriber: Option<Sender<TrackingUpdate>>,
}

impl Shared {
    fn snapshot(&mut self) -> Result<(Arc<Satellite>, ObserverLocation, u64)> {
        let sat = self.satellite.clone().ok_or(Error::NotLoaded)?;
        self.next_request += 1;
        Ok((sat, self.observer.clone(), self.next_request))
    }

    fn apply(&mut self, request: u64, fix: &PositionFix) {
        if request > self.applied_request {
            self.applied_request = request;
            self.last_fix = Some(fix.clone());
        }
    }
}

struct Ticker {
    control: Sender<()>,
    handle: JoinHandle<()>,
}

/// Tracks a single satellite for a single observer.
pub struct TrackingSession {
    config: TrackingConfig,
    propagator: Arc<dyn Propagator>,
    state: SessionState,
    shared: Arc<Mutex<Shared>>,
    ticker: Option<Ticker>,
}

impl TrackingSession {
    pub fn new(config: TrackingConfig, propagator: Arc<dyn Propagator>, observer: ObserverLocation) -> Result<Self> {
        config.validate()?;
        Ok(TrackingSession {
            config,
            propagator,
            state: SessionState::Uninitialized,
            shared: Arc::new(Mutex::new(Shared {
                satellite: None,
                observer,
                last_fix: None,
                generation: 0,
                next_request: 0,
                applied_request: 0,
                subscriber: None,
            })),
            ticker: None,
        })
    }

    /// Session with default settings flying the SGP4 propagator.
    pub fn with_sgp4(observer: ObserverLocation) -> Result<Self> {
        TrackingSession::new(TrackingConfig::default(), Arc::new(Sgp4Propagator), observer)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Replaces the tracked satellite. A parse failure leaves the session untouched.
    pub fn load(&mut self, desc: &SatelliteDescriptor) -> Result<()> {
        let satellite = match Satellite::from_descriptor(desc, self.propagator.clone()) {
            Ok(sat) => sat,
            Err(e) => {
                log::warn!("Rejected element set {:?}: {}", desc.name, e);
                return Err(e);
            }
        };
        self.stop_tracking();

        log::info!(
            "Loaded satellite {} ({}), period {:.2} min, inclination {:.4} deg",
            satellite.norad_id(),
            satellite.name().unwrap_or("unnamed"),
            satellite.period(),
            satellite.inclination()
        );
        let mut shared = self.shared.lock();
        shared.satellite = Some(Arc::new(satellite));
        shared.last_fix = None;
        shared.generation += 1;
        drop(shared);

        self.state = SessionState::Loaded;
        Ok(())
    }

    /// NORAD catalog number of the loaded satellite.
    pub fn satellite_id(&self) -> Option<u64> {
        self.with_satellite(|sat| sat.norad_id())
    }

    pub fn satellite_name(&self) -> Option<String> {
        self.with_satellite(|sat| sat.name().map(str::to_owned)).flatten()
    }

    /// Orbital period in minutes.
    pub fn period(&self) -> Option<f64> {
        self.with_satellite(|sat| sat.period())
    }

    /// Inclination in degrees.
    pub fn inclination(&self) -> Option<f64> {
        self.with_satellite(|sat| sat.inclination())
    }

    pub fn eccentricity(&self) -> Option<f64> {
        self.with_satellite(|sat| sat.eccentricity())
    }

    fn with_satellite<T>(&self, f: impl FnOnce(&Satellite) -> T) -> Option<T> {
        self.shared.lock().satellite.as_deref().map(f)
    }

    pub fn observer(&self) -> ObserverLocation {
        self.shared.lock().observer.clone()
    }

    /// Takes effect from the next computation, including the next tick.
    pub fn set_observer(&self, observer: ObserverLocation) {
        log::debug!("Observer set to {} ({}, {})", observer.name, observer.latitude, observer.longitude);
        self.shared.lock().observer = observer;
    }

    /// Most recent successful fix, if any since the satellite was loaded.
    pub fn current_position(&self) -> Option<PositionFix> {
        self.shared.lock().last_fix.clone()
    }

    /// Computes and records the position at `at`. On failure the previous fix is kept.
    pub fn compute_now(&self, at: DateTime<Utc>) -> Result<PositionFix> {
        let (sat, observer, request) = self.shared.lock().snapshot()?;
        let fix = compute_fix(&sat, &observer, at)?;
        self.shared.lock().apply(request, &fix);
        Ok(fix)
    }

    /// Ground track over `[start, start + duration]`, split at the antimeridian.
    pub fn ground_track(
        &self,
        start: DateTime<Utc>,
        duration: chrono::Duration,
        interval: chrono::Duration,
    ) -> Result<Vec<GroundTrackSegment>> {
        let sat = self.with_satellite(|sat| sat.clone()).ok_or(Error::NotLoaded)?;
        if start.checked_add_signed(duration).is_none() {
            return Err(Error::InvalidConfig(format!(
                "ground track of {duration} from {start} ends outside the date range"
            )));
        }
        let track = ground_track::sample(|t| sat.predict(t), start, duration, interval);
        log::debug!("Sampled {} ground track points for {}", track.len(), sat.norad_id());
        Ok(ground_track::segment(track))
    }

    /// Ground track around `now` using the configured span and step.
    pub fn default_ground_track(&self, now: DateTime<Utc>) -> Result<Vec<GroundTrackSegment>> {
        let lead = chrono_seconds(self.config.ground_track_lead_minutes * 60.0)?;
        let start = now.checked_sub_signed(lead).ok_or_else(|| {
            Error::InvalidConfig(format!("ground track lead {lead} before {now} is out of range"))
        })?;
        self.ground_track(
            start,
            chrono_seconds(self.config.ground_track_minutes * 60.0)?,
            chrono_seconds(self.config.ground_track_step_secs)?,
        )
    }

    /// Starts periodic updates at the configured rate.
    pub fn start_tracking_default(&mut self) -> Result<Receiver<TrackingUpdate>> {
        let secs = self.config.tick_interval_secs;
        self.start_tracking(secs)
    }

    /// Computes the position every `interval_secs` on a background thread.
    ///
    /// The first update arrives one interval after the call. A failed tick is
    /// delivered as an error and the schedule carries on.
    pub fn start_tracking(&mut self, interval_secs: f64) -> Result<Receiver<TrackingUpdate>> {
        match self.state {
            SessionState::Uninitialized => return Err(Error::NotLoaded),
            SessionState::Tracking => return Err(Error::AlreadyTracking),
            SessionState::Loaded | SessionState::Idle => {}
        }
        let interval = match Duration::try_from_secs_f64(interval_secs) {
            Ok(interval) if !interval.is_zero() && interval_secs <= MAX_TICK_SECS => interval,
            _ => {
                return Err(Error::InvalidConfig(format!(
                    "tracking interval must be in (0, {MAX_TICK_SECS}] s, got {interval_secs}"
                )))
            }
        };

        let (tx, rx) = mpsc::channel();
        let generation = {
            let mut shared = self.shared.lock();
            shared.generation += 1;
            shared.subscriber = Some(tx);
            shared.generation
        };

        let (control, control_rx) = mpsc::channel();
        let shared = self.shared.clone();
        let handle = std::thread::spawn(move || run_ticker(shared, generation, interval, control_rx));
        self.ticker = Some(Ticker { control, handle });
        self.state = SessionState::Tracking;
        log::info!("Tracking started, interval {:?}", interval);
        Ok(rx)
    }

    /// Stops periodic updates. No update is delivered after this returns.
    pub fn stop_tracking(&mut self) {
        if self.state != SessionState::Tracking {
            return;
        }
        {
            let mut shared = self.shared.lock();
            shared.generation += 1;
            shared.subscriber = None;
        }
        if let Some(ticker) = self.ticker.take() {
            drop(ticker.control);
            if ticker.handle.join().is_err() {
                log::error!("Tracking thread panicked");
            }
        }
        self.state = SessionState::Idle;
        log::info!("Tracking stopped");
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop_tracking();
    }
}

fn compute_fix(sat: &Satellite, observer: &ObserverLocation, at: DateTime<Utc>) -> Result<PositionFix> {
    let pos = sat.predict(at)?;
    let gmst = crate::time::gmst(at);
    let fix = PositionFix {
        geodetic: coords::geodetic_at(pos, at, gmst)?,
        topocentric: coords::topocentric_at(pos, observer, at, gmst)?,
    };
    log::debug!(
        "{} at {}: lat {:.4} lon {:.4} alt {:.1} km, az {:.2} el {:.2}",
        sat.norad_id(),
        at,
        fix.geodetic.latitude,
        fix.geodetic.longitude,
        fix.geodetic.altitude,
        fix.topocentric.azimuth,
        fix.topocentric.elevation
    );
    Ok(fix)
}

fn run_ticker(shared: Arc<Mutex<Shared>>, generation: u64, interval: Duration, control: Receiver<()>) {
    let mut deadline = Instant::now() + interval;
    loop {
        match control.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        if !tick(&shared, generation, Utc::now()) {
            break;
        }

        deadline = next_deadline(deadline, interval, Instant::now());
    }
}

/// The slot after `deadline`; after an overrun, the first slot later than `now` instead of a burst.
fn next_deadline(deadline: Instant, interval: Duration, now: Instant) -> Instant {
    let next = deadline + interval;
    if next >= now {
        return next;
    }
    let missed = (now - next).as_nanos() / interval.as_nanos();
    u32::try_from(missed + 1)
        .ok()
        .and_then(|n| interval.checked_mul(n))
        .and_then(|skip| next.checked_add(skip))
        .filter(|d| *d > now)
        .unwrap_or(now + interval)
}

/// Runs one tick; returns false once the run it belongs to has been cancelled.
fn tick(shared: &Mutex<Shared>, generation: u64, at: DateTime<Utc>) -> bool {
    let snapshot = {
        let mut shared = shared.lock();
        if shared.generation != generation {
            return false;
        }
        shared.snapshot()
    };
    let outcome = snapshot.and_then(|(sat, observer, request)| {
        compute_fix(&sat, &observer, at).map(|fix| (request, fix))
    });

    let mut shared = shared.lock();
    if shared.generation != generation {
        return false;
    }
    let update = match outcome {
        Ok((request, fix)) => {
            shared.apply(request, &fix);
            Ok(fix)
        }
        Err(e) => {
            log::warn!("Tracking tick at {} failed: {}", at, e);
            Err(e)
        }
    };
    if let Some(tx) = &shared.subscriber {
        if tx.send(update).is_err() {
            shared.subscriber = None;
        }
    }
    true
}
