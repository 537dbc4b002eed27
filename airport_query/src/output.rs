use airport_catalog::{Airport, BorderCrossingPoint, Coordinate, RunwaySelection};
use wind_components::{CrosswindSide, WindComponents, WindObservation};

const CALM_THRESHOLD: f64 = 1.0;
const CALM: &str = "○";
const HEADWIND: &str = "↑";
const TAILWIND: &str = "↓";
const INWARD_FROM_LEFT: &str = "→";
const INWARD_FROM_RIGHT: &str = "←";

fn format_position(position: Coordinate) -> String {
    format!("{:.4} {:.4}", position.latitude(), position.longitude())
}

/// One line per airport for list-style output, with an optional distance
/// column for proximity queries.
pub(crate) fn airport_line(airport: &Airport, distance_nm: Option<f64>) -> String {
    let base = format!(
        "{:<4}  {} ({}, {})",
        airport.icao, airport.name, airport.country, airport.kind
    );
    match distance_nm {
        Some(distance) => format!("{base}  {distance:.1}nm"),
        None => base,
    }
}

pub(crate) fn crossing_line(crossing: &BorderCrossingPoint) -> String {
    format!(
        "{:<4}  {} at {}",
        crossing.airport.icao,
        crossing.airport.name,
        format_position(crossing.position)
    )
}

pub(crate) fn airport_summary(airport: &Airport) -> String {
    let mut lines = vec![format!(
        "{} {} ({}, {}/{})",
        airport.icao, airport.name, airport.kind, airport.country, airport.continent
    )];
    lines.push(match airport.position {
        Some(position) => format!(
            "  position {}, elevation {}ft",
            format_position(position),
            airport.elevation_ft
        ),
        None => "  position unknown".to_string(),
    });
    if airport.border_crossing {
        lines.push("  designated border crossing".to_string());
    }
    for runway in &airport.runways {
        lines.push(format!(
            "  runway {} {}x{}ft {}{}{}",
            runway.ident_pair(),
            runway.length_ft,
            runway.width_ft,
            runway.surface,
            if runway.lighted { " lighted" } else { "" },
            if runway.closed { " CLOSED" } else { "" },
        ));
    }
    for procedure in &airport.procedures {
        let runway = procedure
            .runway
            .as_deref()
            .map(|r| format!(" rwy {r}"))
            .unwrap_or_default();
        lines.push(format!("  {} {}{}", procedure.kind, procedure.name, runway));
    }
    for entry in &airport.aip_entries {
        let url = entry
            .url
            .as_deref()
            .map(|u| format!(" <{u}>"))
            .unwrap_or_default();
        lines.push(format!("  AIP {}{}", entry.name, url));
    }
    lines.join("\n")
}

/// Compact arrow rendering of one component pair: headwind up, tailwind
/// down, crosswind pointing in from its side, calm ring under a knot.
pub(crate) fn wind_component_glyphs(components: &WindComponents) -> String {
    let headwind = components.headwind();
    let longitudinal = if headwind > CALM_THRESHOLD {
        format!("{HEADWIND}{headwind:>2.0}")
    } else if headwind < -CALM_THRESHOLD {
        format!("{TAILWIND}{:>2.0}", headwind.abs())
    } else {
        format!("{CALM}  ")
    };

    let crosswind = components.crosswind_abs();
    let cross = match components.crosswind_side() {
        Some(CrosswindSide::Left) if crosswind > CALM_THRESHOLD => {
            format!("{INWARD_FROM_LEFT}{crosswind:>2.0} ")
        }
        Some(CrosswindSide::Right) if crosswind > CALM_THRESHOLD => {
            format!(" {crosswind:>2.0}{INWARD_FROM_RIGHT}")
        }
        _ => format!(" {CALM}  "),
    };

    format!("{longitudinal} {cross}")
}

pub(crate) fn selection_report(
    airport: &Airport,
    observation: &WindObservation,
    selection: &RunwaySelection,
) -> String {
    let gust_note = observation
        .gust
        .map(|gust| format!(" gusting {gust}"))
        .unwrap_or_default();
    let mut lines = vec![
        format!(
            "{}: runway {} (heading {}), {}ft",
            airport.icao, selection.end.ident, selection.end.heading, selection.runway_length_ft
        ),
        format!(
            "  wind {} {}{gust_note}",
            observation.direction, observation.speed
        ),
        format!(
            "  sustained {}",
            wind_component_glyphs(&selection.components.sustained)
        ),
    ];
    if let Some(gust) = &selection.components.gust {
        lines.push(format!("  gust      {}", wind_component_glyphs(gust)));
    }
    lines.join("\n")
}
