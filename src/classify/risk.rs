//! Keyword risk classifier.
//!
//! An ordered tier table is applied to the lower-cased input and the first
//! tier with a match wins. High is evaluated before Medium, so "alerta roja"
//! lands in High even though plain "alerta" belongs to the Medium tier.
//! Anything without a match is Low. The evaluation order is a contract;
//! reordering the table changes how ambiguous text classifies.

use crate::event::RiskLevel;

const TIERS: &[(RiskLevel, &[&str])] = &[
    (
        RiskLevel::High,
        &[
            "emergencia",
            "evacuación",
            "alerta roja",
            "peligro",
            "desastre",
        ],
    ),
    (
        RiskLevel::Medium,
        &[
            "precaución",
            "lluvia",
            "viento",
            "alerta",
            "daños",
            "afectados",
        ],
    ),
];

/// Map free text to a risk tier. Deterministic and total.
pub fn classify(text: &str) -> RiskLevel {
    let t = text.to_lowercase();
    for (level, phrases) in TIERS {
        if phrases.iter().any(|p| t.contains(p)) {
            return *level;
        }
    }
    RiskLevel::Low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergencia_anywhere_is_high() {
        assert_eq!(classify("Emergencia en la zona norte"), RiskLevel::High);
        assert_eq!(
            classify("tras el reporte se declaró emergencia sanitaria"),
            RiskLevel::High
        );
        // High wins even when Medium keywords are also present.
        assert_eq!(
            classify("lluvia intensa, emergencia declarada"),
            RiskLevel::High
        );
    }

    #[test]
    fn alerta_alone_is_medium_but_alerta_roja_is_high() {
        assert_eq!(classify("alerta por viento en Hermosillo"), RiskLevel::Medium);
        assert_eq!(classify("se emite ALERTA ROJA"), RiskLevel::High);
    }

    #[test]
    fn unmatched_text_is_low() {
        assert_eq!(classify("evento cultural en el centro"), RiskLevel::Low);
        assert_eq!(classify(""), RiskLevel::Low);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("PRECAUCIÓN en carreteras"), RiskLevel::Medium);
        assert_eq!(classify("Peligro de derrumbe"), RiskLevel::High);
    }
}
