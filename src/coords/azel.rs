/// Look angles in radians, range in km.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AzElVector {
    pub az: f64,
    pub el: f64,
    pub range: f64,
}

impl AzElVector {
    pub fn is_visible(&self) -> bool {
        self.el > 0.0
    }
}
