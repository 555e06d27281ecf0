// src/ingest/adapters/official.rs
//
// Hardcoded official-source records, standing in for the real Protección
// Civil / CONAGUA integrations until those expose a machine-readable API.
// Deterministic apart from the now-relative timestamps; no failure mode.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::event::Location;
use crate::ingest::types::{RawRecord, SourceAdapter, SourceKind};

pub struct OfficialMockAdapter;

#[async_trait]
impl SourceAdapter for OfficialMockAdapter {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        let now = Utc::now();

        let mut rain_alert = RawRecord::text(
            SourceKind::Official,
            "pc_001",
            "Protección Civil Sonora",
            "Se emite alerta por lluvias intensas en los municipios del norte de Sonora. \
             Se recomienda precaución.",
        );
        rain_alert.timestamp = Some(now);
        rain_alert.source_url = Some("https://sonora.gob.mx".to_string());
        rain_alert.title = Some("Alerta por lluvias intensas en el norte de Sonora".to_string());
        rain_alert.topic = Some("floods".to_string());
        rain_alert.risk = Some("high".to_string());
        rain_alert.change_flag = Some(true);
        rain_alert.location = Some(Location {
            area: "Norte de Sonora".to_string(),
            lat: 29.1056,
            lng: -110.9428,
        });

        let mut heat_advisory = RawRecord::text(
            SourceKind::Official,
            "clima_001",
            "Servicio Meteorológico Sonora",
            "Se esperan temperaturas superiores a los 40°C en el sur del estado durante \
             el fin de semana.",
        );
        heat_advisory.timestamp = Some(now - Duration::hours(2));
        heat_advisory.source_url = Some("https://sonora.gob.mx".to_string());
        heat_advisory.title =
            Some("Pronóstico de temperaturas elevadas para el fin de semana".to_string());
        heat_advisory.topic = Some("health".to_string());
        heat_advisory.risk = Some("medium".to_string());
        heat_advisory.change_flag = Some(false);
        heat_advisory.location = Some(Location {
            area: "Sur de Sonora".to_string(),
            lat: 28.389,
            lng: -109.5,
        });

        Ok(vec![rain_alert, heat_advisory])
    }

    fn name(&self) -> &'static str {
        "official-mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_both_mock_records_with_canonical_fields() {
        let records = OfficialMockAdapter.fetch_latest().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].external_id, "pc_001");
        assert_eq!(records[0].risk.as_deref(), Some("high"));
        assert_eq!(records[0].change_flag, Some(true));
        assert_eq!(records[1].external_id, "clima_001");
        assert_eq!(records[1].risk.as_deref(), Some("medium"));
        // The advisory is backdated so ordering between the two is fixed.
        assert!(records[0].timestamp.unwrap() > records[1].timestamp.unwrap());
    }
}
