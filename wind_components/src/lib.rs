pub mod heading;
pub mod speed;
pub mod wind;

pub use heading::{Heading, ParseIdentError, RelativeDirection};
pub use speed::{Percent, Speed};
pub use wind::{CrosswindSide, WindComponents, WindDecomposition, WindObservation, decompose};
