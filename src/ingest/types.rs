// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::event::{Location, SourceType};

/// Which adapter produced a raw record. Decides the id prefix and the
/// wire-level source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Official,
    Twitter,
    NewsApi,
    Rss,
}

impl SourceKind {
    /// Prefix applied to source-specific identifiers so ids never collide
    /// across sources within one pass.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SourceKind::Official => "of",
            SourceKind::Twitter => "tw",
            SourceKind::NewsApi => "nw",
            SourceKind::Rss => "rss",
        }
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            SourceKind::Official => SourceType::Official,
            SourceKind::Twitter => SourceType::Social,
            SourceKind::NewsApi => SourceType::Media,
            SourceKind::Rss => SourceType::Syndication,
        }
    }
}

/// Uniform raw-record envelope consumed by the normalizer.
///
/// Adapters fill in whatever their source supplies; the optional canonical
/// fields (`topic`, `risk`, `change_flag`, `location`) are copied through
/// when present and derived from the text otherwise. `timestamp` is `None`
/// when the source value did not parse; such records are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub kind: SourceKind,
    pub external_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub source_name: String,
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub body: String,
    pub topic: Option<String>,
    pub risk: Option<String>,
    pub change_flag: Option<bool>,
    pub location: Option<Location>,
}

impl RawRecord {
    /// Bare text record; adapters overwrite the fields their source supplies.
    pub fn text(
        kind: SourceKind,
        external_id: impl Into<String>,
        source_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            external_id: external_id.into(),
            timestamp: None,
            source_name: source_name.into(),
            source_url: None,
            title: None,
            body: body.into(),
            topic: None,
            risk: None,
            change_flag: None,
            location: None,
        }
    }
}

/// One external origin of raw records.
///
/// Implementations fail soft: a missing credential is an empty `Ok`, and
/// transport or parse errors surface as `Err` for the pipeline to log and
/// treat as "no data this pass". Nothing here may panic.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>>;
    fn name(&self) -> &'static str;
}
