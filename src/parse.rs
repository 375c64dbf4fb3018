//! Recuperación mecánica de estructura a partir de la respuesta libre del
//! modelo: puntuación de riesgo y metadatos (term / price / location).
//!
//! El modelo no está obligado a obedecer la plantilla, así que aquí ningún
//! fallo de coincidencia es un error: cada campo cae a su valor por defecto
//! y, como mucho, se deja un warning en el log.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::{ExtractedMetadata, RiskAssessment, NOT_SPECIFIED};

static RISK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)risk[ _]*score[:=\-]?\s*(\d{1,2})").unwrap());

static TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:term|duration)[^\n:]*[:\-]\s*(.+)").unwrap());
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:price|amount|rent)[^\n:]*[:\-]\s*(.+)").unwrap());
static LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:location|address)[^\n:]*[:\-]\s*(.+)").unwrap());

/// Busca la primera aparición de la línea `RiskScore: <n>` (en cualquiera de
/// sus variantes toleradas) y devuelve la puntuación junto con la narrativa
/// sin esa coincidencia, para no mostrarla dos veces.
///
/// No se valida que la cifra sea ≤10: un `RiskScore: 42` se acepta tal cual
/// y cae en la banda High.
pub fn extract_risk(reply: &str) -> (RiskAssessment, String) {
    match RISK_RE.captures(reply) {
        Some(caps) => {
            let score = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok());
            let matched = caps.get(0).map_or(0..0, |m| m.range());

            let mut narrative = String::with_capacity(reply.len());
            narrative.push_str(&reply[..matched.start]);
            narrative.push_str(&reply[matched.end..]);

            (RiskAssessment::new(score), narrative.trim_end().to_string())
        }
        None => {
            warn!("La respuesta no contiene línea RiskScore; banda Unknown");
            (RiskAssessment::new(None), reply.trim_end().to_string())
        }
    }
}

/// Deriva los tres campos de metadatos, cada uno de forma independiente,
/// a partir de la primera línea que encaje con sus alternativas de nombre.
pub fn extract_metadata(reply: &str) -> ExtractedMetadata {
    ExtractedMetadata {
        term: first_match(&TERM_RE, reply),
        price: first_match(&PRICE_RE, reply),
        location: first_match(&LOCATION_RE, reply),
    }
}

fn first_match(re: &Regex, reply: &str) -> String {
    re.captures(reply)
        .and_then(|caps| caps.get(1))
        // Los asteriscos son restos del énfasis markdown del modelo.
        .map(|m| m.as_str().trim().trim_matches('*').trim().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskBand;

    #[test]
    fn risk_score_is_recovered_and_stripped() {
        let reply = "The deposit clause is vague.\n\nRiskScore: 7";
        let (risk, narrative) = extract_risk(reply);
        assert_eq!(risk.score, Some(7));
        assert_eq!(risk.band, RiskBand::High);
        assert_eq!(narrative, "The deposit clause is vague.");
    }

    #[test]
    fn risk_pattern_variants_are_tolerated() {
        for reply in [
            "Risk Score-9",
            "Risk_Score= 9",
            "RISKSCORE 9",
            "Overall Risk Score: 9 out of 10",
        ] {
            let (risk, _) = extract_risk(reply);
            assert_eq!(risk.score, Some(9), "en {reply:?}");
        }
    }

    #[test]
    fn missing_score_is_unknown_not_an_error() {
        let (risk, narrative) = extract_risk("no score mentioned");
        assert_eq!(risk.score, None);
        assert_eq!(risk.band, RiskBand::Unknown);
        assert_eq!(narrative, "no score mentioned");
    }

    #[test]
    fn out_of_range_scores_pass_through_as_high() {
        let (risk, _) = extract_risk("RiskScore: 42");
        assert_eq!(risk.score, Some(42));
        assert_eq!(risk.band, RiskBand::High);
    }

    #[test]
    fn only_the_first_match_is_stripped() {
        let reply = "RiskScore: 3\nLater the text repeats RiskScore: 8.";
        let (risk, narrative) = extract_risk(reply);
        assert_eq!(risk.score, Some(3));
        assert!(narrative.contains("RiskScore: 8"));
        assert!(!narrative.starts_with("RiskScore"));
    }

    #[test]
    fn metadata_fields_match_their_keyword_sets() {
        let reply = "Term: 12 months\nRent: $1500 per month\nAddress: 1 Main St, Bangkok";
        let m = extract_metadata(reply);
        assert_eq!(m.term, "12 months");
        assert_eq!(m.price, "$1500 per month");
        assert_eq!(m.location, "1 Main St, Bangkok");
    }

    #[test]
    fn markdown_asterisks_are_trimmed() {
        let reply = "**Duration**: 24 months\nAmount: **€900**";
        let m = extract_metadata(reply);
        assert_eq!(m.term, "24 months");
        assert_eq!(m.price, "€900");
    }

    #[test]
    fn missing_fields_fall_back_to_the_sentinel() {
        let m = extract_metadata("nothing of interest here");
        assert_eq!(m.term, NOT_SPECIFIED);
        assert_eq!(m.price, NOT_SPECIFIED);
        assert_eq!(m.location, NOT_SPECIFIED);
    }

    #[test]
    fn fields_are_independent() {
        let m = extract_metadata("Price: $800");
        assert_eq!(m.price, "$800");
        assert_eq!(m.term, NOT_SPECIFIED);
        assert_eq!(m.location, NOT_SPECIFIED);
    }
}
