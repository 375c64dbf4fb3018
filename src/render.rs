//! Ensamblado del informe que ve el usuario.

use crate::models::{ExtractedMetadata, RiskAssessment};

/// Compone el informe en orden fijo: banda de riesgo, contrato traducido
/// (si existe), tabla de metadatos y la narrativa completa del modelo.
/// Determinista: entradas idénticas producen salida idéntica byte a byte.
pub fn render(
    narrative: &str,
    metadata: &ExtractedMetadata,
    risk: &RiskAssessment,
    translated_text: Option<&str>,
) -> String {
    let mut report = String::new();

    match risk.score {
        Some(score) => report.push_str(&format!(
            "## ⚠️ Risk Level: {} {} ({}/10)\n",
            risk.band.label(),
            risk.band.emoji(),
            score
        )),
        None => report.push_str(&format!(
            "## ⚠️ Risk Level: {} {}\n",
            risk.band.label(),
            risk.band.emoji()
        )),
    }

    if let Some(translated) = translated_text {
        report.push_str("\n### 🌐 Translated Contract\n\n");
        report.push_str(translated);
        report.push('\n');
    }

    report.push_str("\n### 📊 Extracted Metadata\n\n");
    report.push_str("| Term | Price | Location |\n");
    report.push_str("|------|-------|----------|\n");
    report.push_str(&format!(
        "| {} | {} | {} |\n",
        metadata.term, metadata.price, metadata.location
    ));

    report.push_str("\n### 📝 Analysis\n\n");
    report.push_str(narrative);
    report.push('\n');

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskAssessment;

    fn sample_metadata() -> ExtractedMetadata {
        ExtractedMetadata {
            term: "12 months".to_string(),
            price: "$1500".to_string(),
            location: "Bangkok".to_string(),
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let report = render(
            "The narrative.",
            &sample_metadata(),
            &RiskAssessment::new(Some(8)),
            Some("El contrato traducido."),
        );

        let banner = report.find("Risk Level: High 🔴 (8/10)").unwrap();
        let translated = report.find("Translated Contract").unwrap();
        let metadata = report.find("Extracted Metadata").unwrap();
        let narrative = report.find("The narrative.").unwrap();
        assert!(banner < translated && translated < metadata && metadata < narrative);
        assert!(report.contains("| 12 months | $1500 | Bangkok |"));
    }

    #[test]
    fn translated_section_is_omitted_without_translation() {
        let report = render(
            "Texto.",
            &sample_metadata(),
            &RiskAssessment::new(Some(2)),
            None,
        );
        assert!(!report.contains("Translated Contract"));
        assert!(report.contains("Risk Level: Very Low 🟢 (2/10)"));
    }

    #[test]
    fn absent_score_renders_unknown_without_fraction() {
        let report = render("Texto.", &sample_metadata(), &RiskAssessment::new(None), None);
        assert!(report.contains("Risk Level: Unknown ⚪\n"));
        assert!(!report.contains("/10"));
    }

    #[test]
    fn render_is_idempotent() {
        let metadata = sample_metadata();
        let risk = RiskAssessment::new(Some(5));
        let a = render("Same narrative.", &metadata, &risk, Some("same"));
        let b = render("Same narrative.", &metadata, &risk, Some("same"));
        assert_eq!(a, b);
    }
}
