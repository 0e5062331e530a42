use crate::Meter;
use anyhow::bail;
use derive_more::Display;
use rand::Rng;
use std::fmt::{Debug, Display};

/// A scalar that can bound a [NumRange]. All range math happens in `f64`, so
/// implementors only need to convert to and from it.
pub trait Rangeable: Copy + Debug + Display + PartialOrd {
    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;
}

impl Rangeable for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Rangeable for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Rangeable for Meter {
    fn to_f64(self) -> f64 {
        self.0
    }

    fn from_f64(value: f64) -> Self {
        Meter(value)
    }
}

/// A closed interval `[min, max]`. Used for elevation bounds, noise output
/// and color components.
///
/// ```
/// use calm::{Meter, NumRange};
///
/// let range = NumRange::new(Meter(-10.0), Meter(10.0));
/// assert_eq!(range.normalize(Meter(5.0)), 0.75);
/// assert_eq!(range.lerp(0.25), Meter(-5.0));
/// assert_eq!(range.clamp(Meter(12.0)), Meter(10.0));
/// ```
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Rangeable> NumRange<T> {
    /// Distance from min to max
    pub fn span(&self) -> f64 {
        self.max.to_f64() - self.min.to_f64()
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Like [NumRange::contains], but an error names the offending value
    pub fn ensure_contains(&self, value: T) -> anyhow::Result<()> {
        if !self.contains(value) {
            bail!("value {} is not in range {}", value, self);
        }
        Ok(())
    }

    /// Pull a value inside the range, onto the nearest bound if needed
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Fractional position of a value within the range: `0.0` at min, `1.0`
    /// at max. Values outside the range land outside `[0, 1]`. A range with
    /// zero span puts everything at `0.0`.
    pub fn normalize(&self, value: T) -> f64 {
        let span = self.span();
        if span > 0.0 {
            (value.to_f64() - self.min.to_f64()) / span
        } else {
            0.0
        }
    }

    /// The value at a fractional position along the range. Inverse of
    /// [NumRange::normalize].
    pub fn lerp(&self, t: f64) -> T {
        T::from_f64(self.min.to_f64() + t * self.span())
    }

    /// Carry a value over to the same relative position in another range
    pub fn map_to<U: Rangeable>(&self, dest: &NumRange<U>, value: T) -> U {
        dest.lerp(self.normalize(value))
    }

    /// Uniform sample, inclusive on both ends
    pub fn sample(&self, rng: &mut impl Rng) -> T {
        T::from_f64(rng.gen_range(self.min.to_f64()..=self.max.to_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    const ELEVATION: NumRange<Meter> = NumRange::new(Meter(-10.0), Meter(10.0));

    #[test]
    fn test_contains() {
        assert!(ELEVATION.contains(Meter(-10.0)));
        assert!(ELEVATION.contains(Meter(10.0)));
        assert!(!ELEVATION.contains(Meter(10.1)));
        assert!(ELEVATION.ensure_contains(Meter(0.0)).is_ok());
        let err = ELEVATION.ensure_contains(Meter(-11.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value -11 m is not in range [-10 m, 10 m]"
        );
    }

    #[test]
    fn test_normalize_and_lerp() {
        assert_approx_eq!(ELEVATION.normalize(Meter(-10.0)), 0.0);
        assert_approx_eq!(ELEVATION.normalize(Meter(0.0)), 0.5);
        assert_approx_eq!(ELEVATION.normalize(Meter(15.0)), 1.25);
        assert_approx_eq!(ELEVATION.lerp(0.75).0, 5.0);

        // Flat ranges can't place anything, so it all goes to the bottom
        let flat = NumRange::new(Meter(2.0), Meter(2.0));
        assert_approx_eq!(flat.normalize(Meter(3.0)), 0.0);
    }

    #[test]
    fn test_map_to() {
        let unit: NumRange<f32> = NumRange::new(0.0, 1.0);
        assert_approx_eq!(ELEVATION.map_to(&unit, Meter(5.0)), 0.75f32);
        assert_approx_eq!(unit.map_to(&ELEVATION, 0.25).0, -5.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(ELEVATION.clamp(Meter(-40.0)), Meter(-10.0));
        assert_eq!(ELEVATION.clamp(Meter(3.5)), Meter(3.5));
        assert_eq!(ELEVATION.clamp(Meter(40.0)), Meter(10.0));
    }

    #[test]
    fn test_sample() {
        let mut rng = Pcg64::seed_from_u64(0);
        for _ in 0..100 {
            assert!(ELEVATION.contains(ELEVATION.sample(&mut rng)));
        }
        let flat = NumRange::new(Meter(2.0), Meter(2.0));
        assert_eq!(flat.sample(&mut rng), Meter(2.0));
    }
}
