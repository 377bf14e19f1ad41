use super::ecef::EarthCenteredFixed;
use super::latlong::LatitudeLongitude;
use super::th::TopographicHorizonVector;

/// Position in an Earth-centered inertial frame, km.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EarthCenteredInertial {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Difference of two inertial positions, km.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ECIVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ECIVector {
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Earth-fixed components of this vector at sidereal angle `gmst`.
    pub fn to_ecef(self, gmst: f64) -> EarthCenteredFixed {
        EarthCenteredInertial::new((self.x, self.y, self.z)).to_ecef(gmst)
    }

    /// Components in the observer's South-East-Zenith frame.
    pub fn to_topo_horiz(self, ob: &LatitudeLongitude, gmst: f64) -> TopographicHorizonVector {
        let fixed = self.to_ecef(gmst);
        let (sin_lambda, cos_lambda) = ob.long.to_radians().sin_cos();
        let (sin_phi, cos_phi) = ob.lat.to_radians().sin_cos();
        let s = sin_phi * cos_lambda * fixed.x + sin_phi * sin_lambda * fixed.y - cos_phi * fixed.z;
        let e = -sin_lambda * fixed.x + cos_lambda * fixed.y;
        let z = cos_phi * cos_lambda * fixed.x + cos_phi * sin_lambda * fixed.y + sin_phi * fixed.z;
        TopographicHorizonVector { s, e, z }
    }
}

impl EarthCenteredInertial {
    pub fn new(pos: (f64, f64, f64)) -> EarthCenteredInertial {
        EarthCenteredInertial {
            x: pos.0,
            y: pos.1,
            z: pos.2,
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotates into the Earth-fixed frame by `-gmst`; inverse of [`EarthCenteredFixed::to_eci`].
    pub fn to_ecef(self, gmst: f64) -> EarthCenteredFixed {
        let (x, y) = super::rotate_z(self.x, self.y, -gmst);
        EarthCenteredFixed { x, y, z: self.z }
    }
}

impl From<[f64; 3]> for EarthCenteredInertial {
    fn from(pos: [f64; 3]) -> Self {
        EarthCenteredInertial::new((pos[0], pos[1], pos[2]))
    }
}

impl std::ops::Sub for EarthCenteredInertial {
    type Output = ECIVector;
    fn sub(self, other: EarthCenteredInertial) -> ECIVector {
        ECIVector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}
