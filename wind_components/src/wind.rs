use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Heading, Percent, Speed};

/// A single wind report: the direction the wind is coming from, the
/// sustained speed, and an optional gust. Built per calculation and
/// discarded; a new observation means a new value, never mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindObservation {
    pub direction: Heading,
    pub speed: Speed,
    pub gust: Option<Speed>,
}

impl WindObservation {
    pub fn new(direction: Heading, speed: Speed, gust: Option<Speed>) -> Self {
        Self {
            direction,
            speed,
            gust,
        }
    }
}

/// Which side of the runway centreline the crosswind blows in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosswindSide {
    Left,
    Right,
}

/// One wind vector resolved against one runway heading.
///
/// `headwind` is signed: negative means tailwind. `crosswind` is signed for
/// display (positive from the right, negative from the left); use
/// [`WindComponents::crosswind_abs`] for magnitude comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindComponents {
    speed: f64,
    headwind: f64,
    crosswind: f64,
}

impl WindComponents {
    fn resolve(speed: Speed, delta_deg: f64) -> Self {
        let speed = speed.as_f64();
        let delta = delta_deg.to_radians();
        Self {
            speed,
            headwind: speed * delta.cos(),
            crosswind: speed * delta.sin(),
        }
    }

    pub fn headwind(&self) -> f64 {
        self.headwind
    }

    pub fn crosswind(&self) -> f64 {
        self.crosswind
    }

    pub fn crosswind_abs(&self) -> f64 {
        self.crosswind.abs()
    }

    pub fn crosswind_side(&self) -> Option<CrosswindSide> {
        if self.crosswind > 0.0 {
            Some(CrosswindSide::Right)
        } else if self.crosswind < 0.0 {
            Some(CrosswindSide::Left)
        } else {
            None
        }
    }

    /// Headwind magnitude as a share of total wind speed (`|cos delta|`).
    pub fn headwind_percent(&self) -> Percent {
        if self.speed == 0.0 {
            return Percent::new(0.0);
        }
        Percent::new(self.headwind.abs() / self.speed)
    }

    /// Crosswind magnitude as a share of total wind speed (`|sin delta|`).
    pub fn crosswind_percent(&self) -> Percent {
        if self.speed == 0.0 {
            return Percent::new(0.0);
        }
        Percent::new(self.crosswind.abs() / self.speed)
    }
}

/// Sustained components plus, when the observation reported a gust, the same
/// decomposition recomputed at gust speed. Both pairs stay retrievable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindDecomposition {
    pub sustained: WindComponents,
    pub gust: Option<WindComponents>,
}

/// Resolves a wind observation against a runway heading.
///
/// Both inputs must be in the same reference frame (true headings
/// throughout this crate) before calling.
pub fn decompose(wind: &WindObservation, runway_heading: Heading) -> WindDecomposition {
    let delta = runway_heading.delta_to(wind.direction);
    trace!(?wind, %runway_heading, delta, "decomposing wind");
    WindDecomposition {
        sustained: WindComponents::resolve(wind.speed, delta),
        gust: wind.gust.map(|gust| WindComponents::resolve(gust, delta)),
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn wind(direction: f64, speed: u32) -> WindObservation {
        WindObservation::new(Heading::new(direction), Speed::new(speed), None)
    }

    #[test]
    fn test_direct_headwind() {
        let components = decompose(&wind(270.0, 15), Heading::new(270.0)).sustained;
        assert_relative_eq!(components.headwind(), 15.0);
        assert_abs_diff_eq!(components.crosswind(), 0.0, epsilon = 1e-9);
        assert_eq!(components.crosswind_side(), None);
    }

    #[test]
    fn test_direct_tailwind() {
        let components = decompose(&wind(90.0, 15), Heading::new(270.0)).sustained;
        assert_relative_eq!(components.headwind(), -15.0);
    }

    #[test]
    fn test_crosswind_sides() {
        // Runway 36, wind from the east blows in from the right.
        let from_east = decompose(&wind(90.0, 10), Heading::new(360.0)).sustained;
        assert_eq!(from_east.crosswind_side(), Some(CrosswindSide::Right));
        assert_relative_eq!(from_east.crosswind_abs(), 10.0);

        let from_west = decompose(&wind(270.0, 10), Heading::new(360.0)).sustained;
        assert_eq!(from_west.crosswind_side(), Some(CrosswindSide::Left));
        assert_relative_eq!(from_west.crosswind_abs(), 10.0);
    }

    #[test]
    fn test_components_recombine_to_wind_speed() {
        for wind_dir in (0..360).step_by(5) {
            for runway_dir in (0..360).step_by(15) {
                let observation = wind(f64::from(wind_dir), 23);
                let c = decompose(&observation, Heading::new(f64::from(runway_dir))).sustained;
                let recombined = (c.headwind().powi(2) + c.crosswind().powi(2)).sqrt();
                assert_relative_eq!(recombined, 23.0, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_gust_pair_is_independent() {
        let observation =
            WindObservation::new(Heading::new(300.0), Speed::new(12), Some(Speed::new(22)));
        let decomposition = decompose(&observation, Heading::new(270.0));
        let gust = decomposition.gust.expect("gust components");

        let delta = 30.0_f64.to_radians();
        assert_relative_eq!(decomposition.sustained.headwind(), 12.0 * delta.cos());
        assert_relative_eq!(gust.headwind(), 22.0 * delta.cos());
        assert_relative_eq!(gust.crosswind_abs(), 22.0 * delta.sin());
        // Same angle, so the shares agree between the pairs.
        assert_relative_eq!(
            decomposition.sustained.crosswind_percent().value(),
            gust.crosswind_percent().value()
        );
    }

    #[test]
    fn test_percent_shares() {
        let components = decompose(&wind(45.0, 20), Heading::new(0.0)).sustained;
        let expected = 45.0_f64.to_radians().cos();
        assert_relative_eq!(components.headwind_percent().value(), expected);
        assert_relative_eq!(components.crosswind_percent().value(), expected);
    }

    #[test]
    fn test_calm_wind_has_zero_shares() {
        let components = decompose(&wind(0.0, 0), Heading::new(90.0)).sustained;
        assert_eq!(components.headwind_percent().value(), 0.0);
        assert_eq!(components.crosswind_percent().value(), 0.0);
    }
}
