use nom::{
    IResult, Parser,
    character::complete::{char, one_of, u32},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::preceded,
};
use wind_components::{Heading, Speed, WindObservation};

use crate::error::{ApplicationError, ApplicationResult};

/// Parses a command-line wind argument such as `270@15` or `270@15G25`.
/// The direction is degrees true and wraps like any heading.
pub(crate) fn parse_wind(input: &str) -> ApplicationResult<WindObservation> {
    nom_wind(input.trim())
        .map(|(_, observation)| observation)
        .map_err(|_| ApplicationError::WindFormat(input.to_string()))
}

fn nom_wind(input: &str) -> IResult<&str, WindObservation> {
    all_consuming((
        double,
        preceded(char('@'), u32),
        opt(preceded(one_of("Gg"), u32)),
    ))
    .map(|(direction, speed, gust)| {
        WindObservation::new(
            Heading::new(direction),
            Speed::new(speed),
            gust.map(Speed::new),
        )
    })
    .parse(input)
}
