use super::eci::EarthCenteredInertial;
use super::latlong::{wrap_longitude, LatitudeLongitude};
use super::{normal_radius, ECCENTRICITY_SQ};

/// Fixed number of latitude refinements; not convergence-checked.
const LATITUDE_ITERATIONS: usize = 10;

/// Position in the Earth-centered Earth-fixed frame, km.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EarthCenteredFixed {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EarthCenteredFixed {
    /// Rotates into the inertial frame by `+gmst`.
    pub fn to_eci(self, gmst: f64) -> EarthCenteredInertial {
        let (x, y) = super::rotate_z(self.x, self.y, gmst);
        EarthCenteredInertial { x, y, z: self.z }
    }

    /// Geodetic coordinates on the WGS-84 ellipsoid.
    pub fn to_lat_long(self) -> LatitudeLongitude {
        let p = (self.x * self.x + self.y * self.y).sqrt();
        let mut lat = self.z.atan2(p * (1.0 - ECCENTRICITY_SQ));
        for _ in 0..LATITUDE_ITERATIONS {
            let n = normal_radius(lat);
            lat = (self.z + ECCENTRICITY_SQ * n * lat.sin()).atan2(p);
        }
        let alt = p / lat.cos() - normal_radius(lat);

        LatitudeLongitude {
            lat: lat.to_degrees(),
            long: wrap_longitude(self.y.atan2(self.x).to_degrees()),
            alt,
        }
    }
}
