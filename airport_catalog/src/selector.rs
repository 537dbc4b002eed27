use std::cmp::Ordering;

use wind_components::{WindDecomposition, WindObservation, decompose};

use crate::airport::{Airport, RunwayEnd};

/// The chosen active runway end together with the components it was
/// selected on, for reporting.
#[derive(Debug, Clone)]
pub struct RunwaySelection {
    pub end: RunwayEnd,
    pub runway_length_ft: u32,
    pub components: WindDecomposition,
}

impl RunwaySelection {
    fn sustained_headwind(&self) -> f64 {
        self.components.sustained.headwind()
    }

    fn sustained_crosswind(&self) -> f64 {
        self.components.sustained.crosswind_abs()
    }
}

// Two ends whose components differ by less than this are treated as tied,
// so symmetric layouts resolve through the documented tie-break chain
// instead of floating-point noise.
const COMPONENT_EPSILON_KT: f64 = 1e-9;

fn cmp_kt(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= COMPONENT_EPSILON_KT {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Greatest sustained headwind first; ties by longer runway, then lower
/// crosswind, then identifier.
fn preference_order(a: &RunwaySelection, b: &RunwaySelection) -> Ordering {
    cmp_kt(b.sustained_headwind(), a.sustained_headwind())
        .then_with(|| b.runway_length_ft.cmp(&a.runway_length_ft))
        .then_with(|| cmp_kt(a.sustained_crosswind(), b.sustained_crosswind()))
        .then_with(|| a.end.ident.cmp(&b.end.ident))
}

/// Smallest crosswind first, for the degraded path when no end satisfies a
/// supplied crosswind limit; remaining ties use the primary chain.
fn fallback_order(a: &RunwaySelection, b: &RunwaySelection) -> Ordering {
    cmp_kt(a.sustained_crosswind(), b.sustained_crosswind())
        .then_with(|| cmp_kt(b.sustained_headwind(), a.sustained_headwind()))
        .then_with(|| b.runway_length_ft.cmp(&a.runway_length_ft))
        .then_with(|| a.end.ident.cmp(&b.end.ident))
}

/// Picks the operationally best end over every open runway of the airport,
/// both directions of each strip. Wind and runway headings are compared in
/// the true reference frame; convert magnetic observations before calling.
///
/// With a crosswind limit, the best-headwind end among those within the
/// limit wins; when no end is within the limit the smallest-crosswind end
/// is returned instead, so any airport with an open runway always gets an
/// answer. `None` only when there is no open runway at all.
pub fn best_runway(
    airport: &Airport,
    wind: &WindObservation,
    crosswind_limit_kt: Option<f64>,
) -> Option<RunwaySelection> {
    let mut candidates: Vec<RunwaySelection> = airport
        .open_runways()
        .flat_map(|runway| {
            runway.ends().map(|end| RunwaySelection {
                end: end.clone(),
                runway_length_ft: runway.length_ft,
                components: decompose(wind, end.heading),
            })
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }

    candidates.sort_by(preference_order);

    if let Some(limit) = crosswind_limit_kt {
        if let Some(selection) = candidates
            .iter()
            .find(|candidate| candidate.sustained_crosswind() <= limit)
        {
            return Some(selection.clone());
        }
        candidates.sort_by(fallback_order);
    }
    candidates.into_iter().next()
}
