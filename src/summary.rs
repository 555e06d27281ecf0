//! # Derived Views
//! Pure, testable logic that maps an event collection to the summary and
//! statistics payloads. No I/O, suitable for unit tests and reuse.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{Event, RiskLevel, SourceType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub risk_level: RiskLevel,
    pub summary: String,
    pub total_events: usize,
    pub critical_alerts: usize,
}

/// Canned narrative per tier; mirrors the dashboard copy.
fn narrative(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "Situación crítica con impacto severo. Evacuaciones y riesgos significativos."
        }
        RiskLevel::Medium => {
            "Impacto moderado, riesgos sanitarios localizados. Mantente informado."
        }
        RiskLevel::Low => "Situación controlada, impacto menor.",
    }
}

/// Executive summary: the maximum risk across all events dominates. An
/// empty collection reads as `low`.
pub fn summarize(events: &[Event]) -> Summary {
    let risk_level = events
        .iter()
        .map(|e| e.public_health_risk)
        .max()
        .unwrap_or(RiskLevel::Low);

    Summary {
        risk_level,
        summary: narrative(risk_level).to_string(),
        total_events: events.len(),
        critical_alerts: events
            .iter()
            .filter(|e| e.public_health_risk == RiskLevel::High)
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub by_type: BTreeMap<&'static str, usize>,
    pub by_risk: BTreeMap<&'static str, usize>,
    pub by_topic: BTreeMap<String, usize>,
}

/// Counts grouped by source type, risk tier, and topic. Type and risk maps
/// always carry every key so the dashboard renders stable rows; topics only
/// appear when observed.
pub fn stats(events: &[Event]) -> Stats {
    let mut by_type: BTreeMap<&'static str, usize> = [
        (SourceType::Official.as_str(), 0),
        (SourceType::Social.as_str(), 0),
        (SourceType::Media.as_str(), 0),
        (SourceType::Syndication.as_str(), 0),
    ]
    .into_iter()
    .collect();
    let mut by_risk: BTreeMap<&'static str, usize> = [
        (RiskLevel::High.as_str(), 0),
        (RiskLevel::Medium.as_str(), 0),
        (RiskLevel::Low.as_str(), 0),
    ]
    .into_iter()
    .collect();
    let mut by_topic: BTreeMap<String, usize> = BTreeMap::new();

    for e in events {
        *by_type.entry(e.source_type.as_str()).or_insert(0) += 1;
        *by_risk.entry(e.public_health_risk.as_str()).or_insert(0) += 1;
        *by_topic.entry(e.topic.clone()).or_insert(0) += 1;
    }

    Stats {
        total: events.len(),
        by_type,
        by_risk,
        by_topic,
    }
}
