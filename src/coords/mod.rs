pub mod azel;
pub mod ecef;
pub mod eci;
pub mod latlong;
pub mod th;

pub use ecef::EarthCenteredFixed;
pub use eci::EarthCenteredInertial;
pub use latlong::LatitudeLongitude;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::position::{GeodeticPosition, ObserverLocation, TopocentricPosition};

/// WGS-84 equatorial radius, km.
pub const EQUATORIAL_RADIUS_KM: f64 = 6378.137;
/// WGS-84 first eccentricity squared.
pub const ECCENTRICITY_SQ: f64 = 6.69437999014e-3;

/// Prime vertical radius of curvature at geodetic latitude `lat` (radians).
pub(crate) fn normal_radius(lat: f64) -> f64 {
    let sin_lat = lat.sin();
    EQUATORIAL_RADIUS_KM / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt()
}

/// Rotates `(x, y)` by `angle` radians about the polar axis.
pub(crate) fn rotate_z(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin_a, cos_a) = angle.sin_cos();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

/// Look angles (radians) from `obs` to the inertial position `obj` at sidereal angle `gmst`.
pub fn calculate_look(
    obj: EarthCenteredInertial,
    obs: &LatitudeLongitude,
    gmst: f64,
) -> Result<azel::AzElVector> {
    let obs_eci = obs.to_eci(gmst);
    let vec = obj - obs_eci;
    let th = vec.to_topo_horiz(obs, gmst);
    th.to_azel()
}

/// Sub-satellite point of `pos` at `at`.
pub fn eci_to_geodetic(pos: EarthCenteredInertial, at: DateTime<Utc>) -> Result<GeodeticPosition> {
    geodetic_at(pos, at, crate::time::gmst(at))
}

/// Azimuth, elevation and range of `pos` as seen by `observer` at `at`.
pub fn eci_to_topocentric(
    pos: EarthCenteredInertial,
    observer: &ObserverLocation,
    at: DateTime<Utc>,
) -> Result<TopocentricPosition> {
    topocentric_at(pos, observer, at, crate::time::gmst(at))
}

pub(crate) fn geodetic_at(
    pos: EarthCenteredInertial,
    at: DateTime<Utc>,
    gmst: f64,
) -> Result<GeodeticPosition> {
    if !pos.is_finite() || pos.magnitude() == 0.0 {
        return Err(Error::DegenerateGeometry(format!(
            "cannot project position ({}, {}, {})",
            pos.x, pos.y, pos.z
        )));
    }
    let LatitudeLongitude { lat, long, alt } = pos.to_ecef(gmst).to_lat_long();
    Ok(GeodeticPosition {
        latitude: lat,
        longitude: long,
        altitude: alt,
        timestamp: at,
    })
}

pub(crate) fn topocentric_at(
    pos: EarthCenteredInertial,
    observer: &ObserverLocation,
    at: DateTime<Utc>,
    gmst: f64,
) -> Result<TopocentricPosition> {
    if !pos.is_finite() {
        return Err(Error::DegenerateGeometry(format!(
            "non-finite satellite position ({}, {}, {})",
            pos.x, pos.y, pos.z
        )));
    }
    let look = calculate_look(pos, &observer.coordinates(), gmst)?;
    Ok(TopocentricPosition::from_look(&look, at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1995, 10, 1, 9, 0, 0).unwrap()
    }

    fn san_francisco() -> ObserverLocation {
        ObserverLocation::new("San Francisco", 37.7749, -122.4194, 16.0)
    }

    #[test]
    fn point_on_x_axis_is_equatorial() {
        let geo = eci_to_geodetic(EarthCenteredInertial::new((6878.0, 0.0, 0.0)), date()).unwrap();
        assert!(geo.latitude.abs() <= 1.0);
        assert_approx_eq!(geo.altitude, 500.0, 5.0);
        // x axis points at the sidereal angle, so the track sits at -GMST
        assert_approx_eq!(geo.longitude, -144.627053, 1e-5);
    }

    #[test]
    fn geodetic_stays_in_bounds() {
        let at = date();
        let mut k = 0.0_f64;
        for i in 0..400 {
            k += 0.7;
            let pos = EarthCenteredInertial::new((
                7000.0 * (k * 1.3).cos() * (i as f64 * 0.11).cos(),
                7000.0 * (k * 0.9).sin() * (i as f64 * 0.11).cos(),
                42000.0 * (i as f64 * 0.11).sin(),
            ));
            let geo = eci_to_geodetic(pos, at + chrono::Duration::minutes(i)).unwrap();
            assert!((-90.0..=90.0).contains(&geo.latitude), "{}", geo.latitude);
            assert!(geo.longitude > -180.0 && geo.longitude <= 180.0, "{}", geo.longitude);
        }
    }

    #[test]
    fn zero_position_is_degenerate() {
        let res = eci_to_geodetic(EarthCenteredInertial::new((0.0, 0.0, 0.0)), date());
        assert!(matches!(res, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn overhead_pass_is_at_zenith() {
        let at = date();
        let sf = san_francisco();
        let sub_point = LatitudeLongitude {
            lat: sf.latitude,
            long: sf.longitude,
            alt: 500.0,
        };
        let sat = sub_point.to_eci(crate::time::gmst(at));

        let topo = eci_to_topocentric(sat, &sf, at).unwrap();
        assert_approx_eq!(topo.elevation, 90.0, 1e-3);
        assert_approx_eq!(topo.range, 500.0 - 0.016, 1e-6);
        assert_eq!(topo.range_rate, 0.0);
        assert!(topo.is_visible());
    }

    #[test]
    fn overhead_satellite_projects_back_onto_observer() {
        let at = date();
        let sf = san_francisco();
        let sat = LatitudeLongitude {
            lat: sf.latitude,
            long: sf.longitude,
            alt: 500.0,
        }
        .to_eci(crate::time::gmst(at));

        let geo = eci_to_geodetic(sat, at).unwrap();
        assert_approx_eq!(geo.latitude, sf.latitude, 1e-6);
        assert_approx_eq!(geo.longitude, sf.longitude, 1e-6);
        assert_approx_eq!(geo.altitude, 500.0, 1e-6);
    }

    #[test]
    fn satellite_due_north_below_horizon_plane() {
        let at = date();
        let obs = ObserverLocation::new("Equator", 0.0, 0.0, 0.0);
        // far north along the observer's meridian
        let sat = LatitudeLongitude {
            lat: 30.0,
            long: 0.0,
            alt: 400.0,
        }
        .to_eci(crate::time::gmst(at));

        let topo = eci_to_topocentric(sat, &obs, at).unwrap();
        assert!(topo.azimuth < 1e-6 || topo.azimuth > 360.0 - 1e-6);
        assert!(topo.elevation < 0.0);
        assert!(!topo.is_visible());
    }

    #[test]
    fn satellite_due_east_has_azimuth_ninety() {
        let at = date();
        let obs = ObserverLocation::new("Equator", 0.0, 0.0, 0.0);
        let sat = LatitudeLongitude {
            lat: 0.0,
            long: 10.0,
            alt: 2000.0,
        }
        .to_eci(crate::time::gmst(at));

        let topo = eci_to_topocentric(sat, &obs, at).unwrap();
        assert_approx_eq!(topo.azimuth, 90.0, 1e-6);
        assert!(topo.elevation > 0.0);
    }

    #[test]
    fn topocentric_stays_in_bounds() {
        let at = date();
        let sf = san_francisco();
        for i in 0..360 {
            let a = (i as f64).to_radians();
            let pos = EarthCenteredInertial::new((
                26000.0 * a.cos(),
                26000.0 * a.sin() * 0.5,
                26000.0 * (a * 3.0).sin() * 0.8,
            ));
            let topo = eci_to_topocentric(pos, &sf, at).unwrap();
            assert!((0.0..360.0).contains(&topo.azimuth), "{}", topo.azimuth);
            assert!((-90.0..=90.0).contains(&topo.elevation));
            assert!(topo.range > 0.0);
            assert_eq!(topo.is_visible(), topo.elevation > 0.0);
        }
    }

    #[test]
    fn coincident_observer_is_degenerate() {
        let at = date();
        let obs = ObserverLocation::new("Pad", 28.5, -80.6, 0.0);
        let sat = obs.coordinates().to_eci(crate::time::gmst(at));
        let res = eci_to_topocentric(sat, &obs, at);
        assert!(matches!(res, Err(Error::DegenerateGeometry(_))));
    }
}
