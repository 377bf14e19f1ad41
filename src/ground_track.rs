//! Sub-satellite point sampling and antimeridian-safe segmentation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::coords::{self, EarthCenteredInertial};
use crate::error::Result;
use crate::position::GeodeticPosition;

/// Longitude jump (degrees) beyond which consecutive points are on opposite sides of the antimeridian.
const WRAP_THRESHOLD: f64 = 180.0;

/// One polyline of a ground track that never crosses the antimeridian internally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundTrackSegment {
    points: Vec<GeodeticPosition>,
}

impl GroundTrackSegment {
    pub fn points(&self) -> &[GeodeticPosition] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeodeticPosition> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Lazily samples sub-satellite points at `start, start + interval, ...` up to and including `end`.
///
/// Samples whose prediction or projection fails are skipped. Sampling also
/// ends where the next instant falls outside the representable date range.
pub struct TrackSamples<F> {
    predict: F,
    next: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    interval: Duration,
}

impl<F> TrackSamples<F>
where
    F: FnMut(DateTime<Utc>) -> Result<EarthCenteredInertial>,
{
    pub fn new(predict: F, start: DateTime<Utc>, duration: Duration, interval: Duration) -> Self {
        let end = start.checked_add_signed(duration);
        if end.is_none() {
            log::warn!("Ground track span {} from {} is out of range, no samples taken", duration, start);
        }
        if interval <= Duration::zero() {
            log::warn!("Ground track interval {} is not positive, no samples taken", interval);
        }
        TrackSamples {
            predict,
            next: Some(start),
            end,
            interval,
        }
    }
}

impl<F> Iterator for TrackSamples<F>
where
    F: FnMut(DateTime<Utc>) -> Result<EarthCenteredInertial>,
{
    type Item = GeodeticPosition;

    fn next(&mut self) -> Option<GeodeticPosition> {
        if self.interval <= Duration::zero() {
            return None;
        }
        let end = self.end?;
        while let Some(t) = self.next.filter(|t| *t <= end) {
            self.next = t.checked_add_signed(self.interval);
            match (self.predict)(t).and_then(|pos| coords::eci_to_geodetic(pos, t)) {
                Ok(geo) => return Some(geo),
                Err(e) => log::trace!("Dropping ground track sample at {}: {}", t, e),
            }
        }
        None
    }
}

/// Collects the sub-satellite points between `start` and `start + duration` inclusive.
pub fn sample<F>(predict: F, start: DateTime<Utc>, duration: Duration, interval: Duration) -> Vec<GeodeticPosition>
where
    F: FnMut(DateTime<Utc>) -> Result<EarthCenteredInertial>,
{
    TrackSamples::new(predict, start, duration, interval).collect()
}

/// Splits `track` wherever consecutive longitudes differ by more than half a turn.
pub fn segment<I>(track: I) -> Vec<GroundTrackSegment>
where
    I: IntoIterator<Item = GeodeticPosition>,
{
    let mut segments: Vec<GroundTrackSegment> = Vec::new();
    let mut current: Vec<GeodeticPosition> = Vec::new();

    for point in track {
        if let Some(prev) = current.last() {
            if (point.longitude - prev.longitude).abs() > WRAP_THRESHOLD {
                segments.push(GroundTrackSegment {
                    points: std::mem::take(&mut current),
                });
            }
        }
        current.push(point);
    }
    if !current.is_empty() {
        segments.push(GroundTrackSegment { points: current });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn point(longitude: f64, minute: i64) -> GeodeticPosition {
        GeodeticPosition {
            latitude: 10.0,
            longitude,
            altitude: 500.0,
            timestamp: start() + Duration::minutes(minute),
        }
    }

    fn fixed(_: DateTime<Utc>) -> Result<EarthCenteredInertial> {
        Ok(EarthCenteredInertial::new((6878.0, 0.0, 0.0)))
    }

    #[test]
    fn samples_include_upper_bound() {
        let track = sample(fixed, start(), Duration::minutes(10), Duration::minutes(1));
        assert_eq!(track.len(), 11);
        assert_eq!(track[0].timestamp, start());
        assert_eq!(track[10].timestamp, start() + Duration::minutes(10));
    }

    #[test]
    fn uneven_duration_stops_before_end() {
        let track = sample(fixed, start(), Duration::seconds(150), Duration::minutes(1));
        assert_eq!(track.len(), 3);
    }

    #[test]
    fn failed_samples_are_dropped() {
        let flaky = |t: DateTime<Utc>| {
            if (t - start()).num_minutes() % 2 == 1 {
                Err(Error::Propagation {
                    minutes: 0.0,
                    reason: "test".into(),
                })
            } else {
                fixed(t)
            }
        };
        let track = sample(flaky, start(), Duration::minutes(10), Duration::minutes(1));
        assert_eq!(track.len(), 6);
        assert!(track.iter().all(|p| (p.timestamp - start()).num_minutes() % 2 == 0));
    }

    #[test]
    fn total_failure_is_empty() {
        let broken = |_: DateTime<Utc>| -> Result<EarthCenteredInertial> {
            Err(Error::Propagation {
                minutes: 0.0,
                reason: "decayed".into(),
            })
        };
        assert!(sample(broken, start(), Duration::minutes(10), Duration::minutes(1)).is_empty());
    }

    #[test]
    fn non_positive_interval_is_empty() {
        assert!(sample(fixed, start(), Duration::minutes(10), Duration::zero()).is_empty());
        assert!(sample(fixed, start(), Duration::minutes(10), Duration::minutes(-1)).is_empty());
    }

    #[test]
    fn stops_at_end_of_date_range() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::seconds(30);
        let track = sample(fixed, start, Duration::seconds(10), Duration::minutes(1));
        assert_eq!(track.len(), 1);
        assert_eq!(track[0].timestamp, start);

        let past_end = sample(fixed, start, Duration::days(2), Duration::minutes(1));
        assert!(past_end.is_empty());
    }

    #[test]
    fn sampling_is_restartable() {
        let a = sample(fixed, start(), Duration::minutes(5), Duration::minutes(1));
        let b = sample(fixed, start(), Duration::minutes(5), Duration::minutes(1));
        assert_eq!(a, b);
    }

    #[test]
    fn splits_at_antimeridian() {
        let track = vec![point(177.0, 0), point(179.0, 1), point(-179.0, 2), point(-177.0, 3)];
        let segs = segment(track);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].len(), 2);
        assert_eq!(segs[0].points()[1].longitude, 179.0);
        assert_eq!(segs[1].points()[0].longitude, -179.0);
    }

    #[test]
    fn exact_half_turn_does_not_split() {
        let segs = segment(vec![point(90.0, 0), point(-90.0, 1)]);
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn empty_track_has_no_segments() {
        assert!(segment(Vec::new()).is_empty());
    }

    #[test]
    fn segments_partition_the_track() {
        let longitudes = [
            170.0, 178.0, -176.0, -170.0, 179.5, -179.5, 0.0, 120.0, -100.0, -100.0, 175.0,
        ];
        let track: Vec<_> = longitudes
            .iter()
            .enumerate()
            .map(|(i, &lon)| point(lon, i as i64))
            .collect();

        let segs = segment(track.clone());
        assert!(segs.iter().all(|s| !s.is_empty()));
        for s in &segs {
            for pair in s.points().windows(2) {
                assert!((pair[1].longitude - pair[0].longitude).abs() <= 180.0);
            }
        }
        let joined: Vec<_> = segs.into_iter().flat_map(GroundTrackSegment::into_points).collect();
        assert_eq!(joined, track);
    }
}
