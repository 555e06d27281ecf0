//! event.rs — Canonical event model shared by the aggregation pipeline and the API.
//!
//! An `Event` describes one reported incident or update after normalization.
//! It exists only within one aggregation pass and the subsequent cache
//! lifetime; it is never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered public-health risk tier. The derived `Ord` follows declaration
/// order: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lenient parse for risk strings supplied by upstream sources.
    /// Unrecognized input maps to `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Origin kind of an event, as exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Official,
    Social,
    Media,
    Syndication,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Official => "official",
            SourceType::Social => "social",
            SourceType::Media => "media",
            SourceType::Syndication => "syndication",
        }
    }
}

/// Named area with approximate coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub area: String,
    pub lat: f64,
    pub lng: f64,
}

/// Canonical normalized record describing one reported incident or update.
///
/// `id` is unique within a single aggregation pass only; re-fetching may
/// mint a new id for the same real-world item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Source of truth for all ordering.
    pub timestamp: DateTime<Utc>,
    pub source_type: SourceType,
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Short tag from the fixed topic vocabulary (see `classify::topic`).
    pub topic: String,
    /// Length-capped title; see the normalizer for the truncation rule.
    pub headline: String,
    pub summary: String,
    pub public_health_risk: RiskLevel,
    /// True when the record is marked as an update or escalation.
    pub change_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
