use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};

/// Unit used for elevation. Every height sample, corner and tile elevation is
/// measured in meters relative to sea level.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{} m", "self.0")]
#[serde(transparent)]
pub struct Meter(pub f64);

impl Meter {
    /// Larger of two elevations. Elevations are never NaN, so unlike
    /// [f64::max] there's no special handling here.
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Smaller of two elevations.
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Meter(3.5).to_string(), "3.5 m");
    }

    #[test]
    fn test_min_max() {
        assert_eq!(Meter(1.0).max(Meter(-2.0)), Meter(1.0));
        assert_eq!(Meter(1.0).min(Meter(-2.0)), Meter(-2.0));
    }
}
