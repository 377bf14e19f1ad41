use crate::error::{Error, Result};

/// Vector in the observer's South-East-Zenith frame, km.
pub struct TopographicHorizonVector {
    pub s: f64,
    pub e: f64,
    pub z: f64,
}

impl TopographicHorizonVector {
    pub fn to_azel(self) -> Result<super::azel::AzElVector> {
        let range = (self.s * self.s + self.e * self.e + self.z * self.z).sqrt();
        if !(range > 0.0 && range.is_finite()) {
            return Err(Error::DegenerateGeometry(format!(
                "range {range} km between observer and satellite"
            )));
        }
        let el = (self.z / range).clamp(-1.0, 1.0).asin();
        let mut az = self.e.atan2(-self.s);
        if az < 0.0 {
            az += std::f64::consts::PI * 2.0;
        }
        Ok(super::azel::AzElVector { az, el, range })
    }
}
