//! Topic and location extraction.
//!
//! Two ordered tables of case-insensitive patterns are matched against the
//! combined title+body text; the first match in each table wins and no match
//! falls back to the `general` topic and the region-wide location. Table
//! order is part of the contract (an "alerta por lluvias" headline is a
//! flood, not a generic alert, because the flood row comes first).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::event::Location;

pub const FALLBACK_TOPIC: &str = "general";
pub const REGION_WIDE_AREA: &str = "Sonora";

// Hermosillo city center; used whenever no finer area is recognized.
const REGION_WIDE_COORDS: (f64, f64) = (29.0729, -110.9559);

static TOPIC_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"inundaci|lluvia|tormenta|precipitaci", "floods"),
        (r"incendio|fuego|quema", "fires"),
        (r"sismo|temblor|terremoto", "seismic"),
        (r"accidente|choque|volcadura|colisi", "accidents"),
        (r"evacuaci|refugio|albergue|desalojo", "evacuations"),
        (r"alerta|emergencia|aviso", "alerts"),
        (r"salud|sanitari|dengue|hospital", "health"),
        (r"carretera|puente|energ[ií]a|apag[oó]n|drenaje", "infrastructure"),
    ]
    .into_iter()
    .map(|(p, tag)| (compile(p), tag))
    .collect()
});

static LOCATION_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"la caridad", "La Caridad"),
        (r"mirasoles", "Mirasoles"),
        (r"norte de sonora", "Norte de Sonora"),
        (r"sur de sonora|sur del estado", "Sur de Sonora"),
        (r"hermosillo norte|(zona )?norte de hermosillo", "Hermosillo Norte"),
        (r"hermosillo sur|(zona )?sur de hermosillo", "Hermosillo Sur"),
        (r"centro de hermosillo|colonia centro", "Centro"),
    ]
    .into_iter()
    .map(|(p, area)| (compile(p), area))
    .collect()
});

/// Approximate coordinates per recognized area.
const COORDS: &[(&str, f64, f64)] = &[
    ("La Caridad", 29.1201, -110.9542),
    ("Mirasoles", 29.1056, -110.9428),
    ("Norte de Sonora", 29.1056, -110.9428),
    ("Sur de Sonora", 28.389, -109.5),
    ("Hermosillo Norte", 29.0892, -110.9613),
    ("Hermosillo Sur", 29.0669, -110.9669),
    ("Centro", 29.0726, -110.9556),
];

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("valid classifier pattern")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub topic: &'static str,
    pub location: Location,
}

/// Map free text to a topic tag and a named location. Deterministic; empty
/// or unmatched input yields the fallback topic and region-wide location.
pub fn extract(text: &str) -> Extraction {
    let topic = TOPIC_RULES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, tag)| *tag)
        .unwrap_or(FALLBACK_TOPIC);

    let area = LOCATION_RULES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, area)| *area)
        .unwrap_or(REGION_WIDE_AREA);

    Extraction {
        topic,
        location: location_for(area),
    }
}

/// Static coordinate lookup. Unrecognized area names map to the region-wide
/// default coordinate under the given name.
pub fn location_for(area: &str) -> Location {
    let (lat, lng) = COORDS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(area))
        .map(|(_, lat, lng)| (*lat, *lng))
        .unwrap_or(REGION_WIDE_COORDS);
    Location {
        area: area.to_string(),
        lat,
        lng,
    }
}
