use wind_components::Heading;

use crate::geo::Coordinate;

/// An airport and everything owned by it. Materialized once by the store
/// and immutable afterwards; runways and procedures have no identity of
/// their own outside the airport.
#[derive(Debug, Clone)]
pub struct Airport {
    pub icao: String,
    pub name: String,
    pub position: Option<Coordinate>,
    pub elevation_ft: i32,
    pub country: String,
    pub continent: String,
    pub kind: String,
    pub border_crossing: bool,
    pub runways: Vec<Runway>,
    pub procedures: Vec<Procedure>,
    pub aip_entries: Vec<AipEntry>,
}

impl Airport {
    pub fn open_runways(&self) -> impl Iterator<Item = &Runway> {
        self.runways.iter().filter(|runway| !runway.closed)
    }

    pub fn has_approach(&self, category: ApproachCategory) -> bool {
        self.procedures
            .iter()
            .any(|procedure| procedure.approach_category() == Some(category))
    }
}

/// One physical strip with its two directional ends.
#[derive(Debug, Clone)]
pub struct Runway {
    pub low: RunwayEnd,
    pub high: RunwayEnd,
    pub length_ft: u32,
    pub width_ft: u32,
    pub surface: String,
    pub lighted: bool,
    pub closed: bool,
}

impl Runway {
    pub fn ends(&self) -> [&RunwayEnd; 2] {
        [&self.low, &self.high]
    }

    pub fn ident_pair(&self) -> String {
        format!("{}/{}", self.low.ident, self.high.ident)
    }
}

/// One directional end of a runway. Headings are true.
#[derive(Debug, Clone)]
pub struct RunwayEnd {
    pub ident: String,
    pub position: Option<Coordinate>,
    pub elevation_ft: i32,
    pub heading: Heading,
    pub displaced_threshold_ft: u32,
}

/// Guidance class of an instrument approach. ILS is the only precision
/// type in this model; RNAV/RNP sit in their own middle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachCategory {
    Precision,
    RnavRnp,
    NonPrecision,
}

impl ApproachCategory {
    pub fn from_approach_type(approach_type: &str) -> Option<Self> {
        let normalized = approach_type.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return None;
        }
        Some(if normalized == "ILS" {
            Self::Precision
        } else if normalized.starts_with("RNAV") || normalized.starts_with("RNP") {
            Self::RnavRnp
        } else {
            Self::NonPrecision
        })
    }
}

#[derive(Debug, Clone)]
pub struct Procedure {
    pub name: String,
    pub kind: String,
    pub approach_type: Option<String>,
    pub runway: Option<String>,
}

impl Procedure {
    pub fn approach_category(&self) -> Option<ApproachCategory> {
        self.approach_type
            .as_deref()
            .and_then(ApproachCategory::from_approach_type)
    }
}

/// A published AIP document reference for an airport.
#[derive(Debug, Clone)]
pub struct AipEntry {
    pub name: String,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_category_mapping() {
        assert_eq!(
            ApproachCategory::from_approach_type("ILS"),
            Some(ApproachCategory::Precision)
        );
        assert_eq!(
            ApproachCategory::from_approach_type("RNAV"),
            Some(ApproachCategory::RnavRnp)
        );
        assert_eq!(
            ApproachCategory::from_approach_type("RNP AR"),
            Some(ApproachCategory::RnavRnp)
        );
        assert_eq!(
            ApproachCategory::from_approach_type("VOR"),
            Some(ApproachCategory::NonPrecision)
        );
        assert_eq!(
            ApproachCategory::from_approach_type("LOC"),
            Some(ApproachCategory::NonPrecision)
        );
        assert_eq!(ApproachCategory::from_approach_type(""), None);
        assert_eq!(ApproachCategory::from_approach_type("  "), None);
    }

    #[test]
    fn test_open_runways_skips_closed() {
        let end = |ident: &str, heading: f64| RunwayEnd {
            ident: ident.to_string(),
            position: None,
            elevation_ft: 0,
            heading: Heading::new(heading),
            displaced_threshold_ft: 0,
        };
        let runway = |low: &str, closed: bool| Runway {
            low: end(low, 90.0),
            high: end("27", 270.0),
            length_ft: 8000,
            width_ft: 150,
            surface: "ASP".to_string(),
            lighted: true,
            closed,
        };
        let airport = Airport {
            icao: "ENHV".to_string(),
            name: "Honningsvåg Valan".to_string(),
            position: None,
            elevation_ft: 44,
            country: "NO".to_string(),
            continent: "EU".to_string(),
            kind: "small_airport".to_string(),
            border_crossing: false,
            runways: vec![runway("09", false), runway("08", true)],
            procedures: Vec::new(),
            aip_entries: Vec::new(),
        };
        let open: Vec<_> = airport.open_runways().collect();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].low.ident, "09");
        assert_eq!(open[0].ident_pair(), "09/27");
    }
}
