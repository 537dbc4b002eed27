use std::fmt;

use nom::{
    Finish, IResult, Parser,
    bytes::complete::take,
    character::complete::{one_of, u16},
    combinator::{all_consuming, eof, map_parser, opt},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A circular quantity in degrees, always normalized to `[0, 360)`.
///
/// Equality is modulo normalization: every constructor (including serde)
/// wraps its input, so the derived comparison is on canonical values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Heading(f64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdentError {
    #[error("runway identifier {0:?} is not two digits with an optional L/R/C suffix")]
    Malformed(String),
    #[error("runway number {0} is outside 01..=36")]
    OutOfRange(u16),
}

/// Where another heading points relative to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDirection {
    Ahead,
    Right,
    Behind,
    Left,
}

impl Heading {
    pub fn new(degrees: f64) -> Self {
        Self(degrees.rem_euclid(360.0))
    }

    /// Parses a runway identifier such as `"09"`, `"27L"` or `"36C"` into its
    /// nominal heading (`number * 10`). The side suffix carries no heading
    /// information and is ignored.
    pub fn from_runway_ident(ident: &str) -> Result<Self, ParseIdentError> {
        let (_, number) = nom_runway_number(ident)
            .finish()
            .map_err(|_| ParseIdentError::Malformed(ident.to_string()))?;
        if !(1..=36).contains(&number) {
            return Err(ParseIdentError::OutOfRange(number));
        }
        Ok(Self::new(f64::from(number) * 10.0))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn opposing(self) -> Self {
        Self::new(self.0 + 180.0)
    }

    /// Signed angular delta from `self` to `other`, normalized to `[-180, 180)`.
    pub fn delta_to(self, other: Heading) -> f64 {
        (other.0 - self.0 + 540.0).rem_euclid(360.0) - 180.0
    }

    /// Classifies `other` relative to `self`. Ahead and Behind win the
    /// boundary ties: `|delta| <= 45` is Ahead, `|delta| >= 135` is Behind.
    pub fn direction_to(self, other: Heading) -> RelativeDirection {
        let delta = self.delta_to(other);
        if delta.abs() <= 45.0 {
            RelativeDirection::Ahead
        } else if delta.abs() >= 135.0 {
            RelativeDirection::Behind
        } else if delta > 0.0 {
            RelativeDirection::Right
        } else {
            RelativeDirection::Left
        }
    }
}

impl From<f64> for Heading {
    fn from(degrees: f64) -> Self {
        Self::new(degrees)
    }
}

impl From<Heading> for f64 {
    fn from(heading: Heading) -> Self {
        heading.0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rounding alone can push 359.5+ up to 360, which must wrap to 000.
        write!(f, "{:03.0}°", self.0.round() % 360.0)
    }
}

fn nom_runway_number(input: &str) -> IResult<&str, u16> {
    (
        map_parser(take(2usize), all_consuming(u16)),
        opt(one_of("LRC")),
        eof,
    )
        .map(|(number, _, _)| number)
        .parse(input)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(Heading::new(360.0), Heading::new(0.0));
        assert_eq!(Heading::new(-90.0), Heading::new(270.0));
        assert_eq!(Heading::new(725.0), Heading::new(5.0));
        assert_relative_eq!(Heading::new(-0.5).degrees(), 359.5);
    }

    #[test]
    fn test_opposing_is_an_involution() {
        for deg in 0..360 {
            let h = Heading::new(f64::from(deg));
            assert_eq!(h.opposing().opposing(), h);
            assert_ne!(h.opposing(), h);
        }
    }

    #[test]
    fn test_opposing_examples() {
        assert_eq!(Heading::new(240.0).opposing(), Heading::new(60.0));
        assert_eq!(Heading::new(270.0).opposing(), Heading::new(90.0));
        assert_eq!(Heading::new(180.0).opposing(), Heading::new(0.0));
        assert_eq!(Heading::new(20.0).opposing(), Heading::new(200.0));
    }

    #[test]
    fn test_runway_ident_parse() {
        assert_eq!(Heading::from_runway_ident("09"), Ok(Heading::new(90.0)));
        assert_eq!(Heading::from_runway_ident("27"), Ok(Heading::new(270.0)));
        assert_eq!(Heading::from_runway_ident("27L"), Ok(Heading::new(270.0)));
        assert_eq!(Heading::from_runway_ident("01C"), Ok(Heading::new(10.0)));
        assert_eq!(Heading::from_runway_ident("36"), Ok(Heading::new(0.0)));
    }

    #[test]
    fn test_runway_ident_rejects_malformed() {
        for bad in ["9", "272", "27X", "ab", "", "27LL"] {
            assert_eq!(
                Heading::from_runway_ident(bad),
                Err(ParseIdentError::Malformed(bad.to_string()))
            );
        }
        assert_eq!(
            Heading::from_runway_ident("00"),
            Err(ParseIdentError::OutOfRange(0))
        );
        assert_eq!(
            Heading::from_runway_ident("37"),
            Err(ParseIdentError::OutOfRange(37))
        );
    }

    #[test]
    fn test_display_stays_in_range() {
        assert_eq!(Heading::new(90.0).to_string(), "090°");
        assert_eq!(Heading::new(7.0).to_string(), "007°");
        assert_eq!(Heading::new(359.4).to_string(), "359°");
        assert_eq!(Heading::new(359.7).to_string(), "000°");
    }

    #[test]
    fn test_delta_wraps() {
        assert_relative_eq!(Heading::new(350.0).delta_to(Heading::new(10.0)), 20.0);
        assert_relative_eq!(Heading::new(10.0).delta_to(Heading::new(350.0)), -20.0);
        assert_relative_eq!(Heading::new(0.0).delta_to(Heading::new(180.0)), -180.0);
    }

    #[test]
    fn test_direction_buckets() {
        let north = Heading::new(0.0);
        assert_eq!(north.direction_to(Heading::new(0.0)), RelativeDirection::Ahead);
        assert_eq!(north.direction_to(Heading::new(45.0)), RelativeDirection::Ahead);
        assert_eq!(north.direction_to(Heading::new(315.0)), RelativeDirection::Ahead);
        assert_eq!(north.direction_to(Heading::new(46.0)), RelativeDirection::Right);
        assert_eq!(north.direction_to(Heading::new(134.0)), RelativeDirection::Right);
        assert_eq!(north.direction_to(Heading::new(135.0)), RelativeDirection::Behind);
        assert_eq!(north.direction_to(Heading::new(180.0)), RelativeDirection::Behind);
        assert_eq!(north.direction_to(Heading::new(225.0)), RelativeDirection::Behind);
        assert_eq!(north.direction_to(Heading::new(226.0)), RelativeDirection::Left);
        assert_eq!(north.direction_to(Heading::new(314.0)), RelativeDirection::Left);
    }
}
