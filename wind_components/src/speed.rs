use std::{fmt, ops::Mul};

use serde::{Deserialize, Serialize};

/// Wind or component speed in whole knots. Never negative by construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Speed(u32);

impl Speed {
    pub const fn new(knots: u32) -> Self {
        Self(knots)
    }

    pub const fn knots(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kt", self.0)
    }
}

/// A ratio clamped to `[0, 1]` on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Percent(f64);

impl Percent {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

impl Mul<Percent> for Speed {
    type Output = Speed;

    /// Scales a speed by a ratio, rounding half-up to whole knots.
    fn mul(self, rhs: Percent) -> Speed {
        Speed((self.as_f64() * rhs.0 + 0.5).floor() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(Percent::new(-0.2).value(), 0.0);
        assert_eq!(Percent::new(1.7).value(), 1.0);
        assert_eq!(Percent::new(0.42).value(), 0.42);
        assert_eq!(Percent::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn test_speed_scaling_rounds_half_up() {
        assert_eq!(Speed::new(10) * Percent::new(0.5), Speed::new(5));
        assert_eq!(Speed::new(15) * Percent::new(0.5), Speed::new(8));
        assert_eq!(Speed::new(15) * Percent::new(0.1), Speed::new(2));
        assert_eq!(Speed::new(14) * Percent::new(0.1), Speed::new(1));
        assert_eq!(Speed::new(20) * Percent::new(0.0), Speed::new(0));
        assert_eq!(Speed::new(20) * Percent::new(1.0), Speed::new(20));
    }

    #[test]
    fn test_display() {
        assert_eq!(Speed::new(12).to_string(), "12kt");
        assert_eq!(Percent::new(0.25).to_string(), "25%");
    }
}
