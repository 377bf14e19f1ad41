use super::ecef::EarthCenteredFixed;
use super::{normal_radius, ECCENTRICITY_SQ};

/// Geodetic coordinates: degrees, with altitude in km above the WGS-84 ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatitudeLongitude {
    pub lat: f64,
    pub long: f64,
    pub alt: f64,
}

impl LatitudeLongitude {
    pub fn to_ecef(self) -> EarthCenteredFixed {
        let lat = self.lat.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = self.long.to_radians().sin_cos();
        let n = normal_radius(lat);
        EarthCenteredFixed {
            x: (n + self.alt) * cos_lat * cos_lon,
            y: (n + self.alt) * cos_lat * sin_lon,
            z: (n * (1.0 - ECCENTRICITY_SQ) + self.alt) * sin_lat,
        }
    }

    /// Inertial position of this point at sidereal angle `gmst` (radians).
    pub fn to_eci(self, gmst: f64) -> super::eci::EarthCenteredInertial {
        self.to_ecef().to_eci(gmst)
    }
}

/// Brings a longitude in degrees into `(-180, 180]` one turn at a time.
pub fn wrap_longitude(mut long: f64) -> f64 {
    if !long.is_finite() {
        return long;
    }
    while long > 180.0 {
        long -= 360.0;
    }
    while long <= -180.0 {
        long += 360.0;
    }
    long
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coords::EarthCenteredInertial;
    use chrono::{TimeZone, Utc};

    #[test]
    fn latlong_to_eci() {
        let date = Utc.with_ymd_and_hms(1995, 10, 1, 9, 0, 0).unwrap();
        let lla = LatitudeLongitude {
            lat: 40.0,
            long: -75.0,
            alt: 0.0,
        };

        let EarthCenteredInertial { x, y, z } = lla.to_eci(crate::time::gmst(date));
        assert_approx_eq!(x, 1703.296, 0.001);
        assert_approx_eq!(y, 4586.651, 0.001);
        assert_approx_eq!(z, 4077.986, 0.001);
    }

    #[test]
    fn poles_sit_on_the_minor_axis() {
        let north = LatitudeLongitude {
            lat: 90.0,
            long: 0.0,
            alt: 0.0,
        }
        .to_ecef();
        assert_approx_eq!(north.x, 0.0, 1e-9);
        assert_approx_eq!(north.z, 6356.752, 0.001);
    }

    #[test]
    fn wraps_longitude_into_half_open_range() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), 180.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(1090.0), 10.0);
        assert_eq!(wrap_longitude(-725.0), -5.0);
        assert_eq!(wrap_longitude(45.5), 45.5);
    }
}
