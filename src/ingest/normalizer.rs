//! Event normalizer: one raw record in, at most one canonical event out.
//!
//! Pre-supplied canonical fields are copied through unchanged; everything
//! else is derived from the best available text (title plus body). The
//! mapping is pure, so normalizing the same raw record twice yields
//! identical events.

use crate::classify::{risk, topic};
use crate::event::{Event, RiskLevel};
use crate::ingest::types::RawRecord;

/// Keywords that mark a record as an update or escalation when the source
/// does not flag it explicitly.
const UPDATE_MARKERS: &[&str] = &["actualización", "nuevo"];

/// Returns `None` when the record carries no parseable timestamp; those
/// records are dropped before sorting so ordering stays deterministic.
pub fn normalize(raw: &RawRecord, headline_max_chars: usize) -> Option<Event> {
    let timestamp = raw.timestamp?;

    let combined = match raw.title.as_deref() {
        Some(t) if !t.is_empty() => format!("{}. {}", t, raw.body),
        _ => raw.body.clone(),
    };

    let public_health_risk = match raw.risk.as_deref() {
        Some(s) => RiskLevel::parse_lenient(s),
        None => risk::classify(&combined),
    };

    // Run the extractor only when the source left something to derive.
    let (topic, location) = match (raw.topic.clone(), raw.location.clone()) {
        (Some(t), Some(l)) => (t, Some(l)),
        (t, l) => {
            let derived = topic::extract(&combined);
            (
                t.unwrap_or_else(|| derived.topic.to_string()),
                l.or(Some(derived.location)),
            )
        }
    };

    let change_flag = raw
        .change_flag
        .unwrap_or_else(|| is_update_marked(&combined));

    let headline_source = raw.title.as_deref().unwrap_or(&raw.body);

    Some(Event {
        id: format!("{}_{}", raw.kind.id_prefix(), raw.external_id),
        timestamp,
        source_type: raw.kind.source_type(),
        source_name: raw.source_name.clone(),
        source_url: raw.source_url.clone(),
        topic,
        headline: truncate_headline(headline_source, headline_max_chars),
        summary: raw.body.clone(),
        public_health_risk,
        change_flag,
        location,
    })
}

fn is_update_marked(text: &str) -> bool {
    let t = text.to_lowercase();
    UPDATE_MARKERS.iter().any(|m| t.contains(m))
}

/// Cap at `max_chars`, replacing the tail with `...` so the capped result
/// is exactly `max_chars` long. Counts chars, not bytes, so multi-byte
/// text never splits a boundary.
fn truncate_headline(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(cut).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Location, SourceType};
    use crate::ingest::types::SourceKind;
    use chrono::{TimeZone, Utc};

    fn raw_social(body: &str) -> RawRecord {
        let mut r = RawRecord::text(SourceKind::Twitter, "12345", "Twitter/@PC_Sonora", body);
        r.timestamp = Some(Utc.with_ymd_and_hms(2025, 9, 3, 12, 0, 0).unwrap());
        r
    }

    #[test]
    fn normalizing_twice_yields_identical_events() {
        let raw = raw_social("Alerta por lluvia en Mirasoles");
        let a = normalize(&raw, 80).unwrap();
        let b = normalize(&raw, 80).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn derives_risk_topic_and_location_from_text() {
        let ev = normalize(&raw_social("Alerta por lluvia en Mirasoles"), 80).unwrap();
        assert_eq!(ev.id, "tw_12345");
        assert_eq!(ev.source_type, SourceType::Social);
        assert_eq!(ev.public_health_risk, RiskLevel::Medium);
        assert_eq!(ev.topic, "floods");
        assert_eq!(ev.location.as_ref().unwrap().area, "Mirasoles");
        assert!(!ev.change_flag);
    }

    #[test]
    fn copies_pre_supplied_canonical_fields_unchanged() {
        let mut raw = raw_social("texto sin palabras clave");
        raw.kind = SourceKind::Official;
        raw.topic = Some("floods".into());
        raw.risk = Some("high".into());
        raw.change_flag = Some(true);
        raw.location = Some(Location {
            area: "Norte de Sonora".into(),
            lat: 29.1056,
            lng: -110.9428,
        });

        let ev = normalize(&raw, 80).unwrap();
        assert_eq!(ev.id, "of_12345");
        assert_eq!(ev.public_health_risk, RiskLevel::High);
        assert_eq!(ev.topic, "floods");
        assert!(ev.change_flag);
        assert_eq!(ev.location.unwrap().area, "Norte de Sonora");
    }

    #[test]
    fn unrecognized_explicit_risk_parses_to_medium() {
        let mut raw = raw_social("sin palabras clave");
        raw.risk = Some("catastrophic".into());
        let ev = normalize(&raw, 80).unwrap();
        assert_eq!(ev.public_health_risk, RiskLevel::Medium);
    }

    #[test]
    fn missing_timestamp_drops_the_record() {
        let mut raw = raw_social("Alerta");
        raw.timestamp = None;
        assert!(normalize(&raw, 80).is_none());
    }

    #[test]
    fn update_keywords_set_the_change_flag() {
        let ev = normalize(&raw_social("Actualización: se abren refugios"), 80).unwrap();
        assert!(ev.change_flag);
        let ev = normalize(&raw_social("nuevo corte de energía"), 80).unwrap();
        assert!(ev.change_flag);
    }

    #[test]
    fn headline_truncation_is_boundary_exact() {
        let mut raw = raw_social("x");
        raw.title = Some("a".repeat(80));
        let ev = normalize(&raw, 80).unwrap();
        assert_eq!(ev.headline.chars().count(), 80);
        assert!(!ev.headline.ends_with("..."), "at the limit nothing is cut");

        let mut raw = raw_social("x");
        raw.title = Some("a".repeat(81));
        let ev = normalize(&raw, 80).unwrap();
        assert_eq!(ev.headline.chars().count(), 80);
        assert!(ev.headline.ends_with("..."));
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let mut raw = raw_social("x");
        raw.title = Some("ñ".repeat(50));
        let ev = normalize(&raw, 10).unwrap();
        assert_eq!(ev.headline.chars().count(), 10);
        assert!(ev.headline.starts_with("ñññññññ"));
    }

    #[test]
    fn headline_falls_back_to_body_without_title() {
        let ev = normalize(&raw_social("Reporte breve"), 80).unwrap();
        assert_eq!(ev.headline, "Reporte breve");
        assert_eq!(ev.summary, "Reporte breve");
    }
}
