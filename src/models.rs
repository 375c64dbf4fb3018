//! Modelos de dominio: idiomas, formatos, documento subido y resultado
//! del análisis. Todos son valores efímeros ligados a la sesión; nada se
//! persiste entre sesiones.

use chrono::{DateTime, Utc};
use mime_guess::MimeGuess;
use serde::Serialize;
use uuid::Uuid;

/// Valor literal que toma un campo de metadatos sin coincidencia.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Idiomas soportados por las plantillas de análisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    Thai,
    English,
    Italian,
}

impl Language {
    /// Reconoce el nombre del idioma tal y como lo envía el frontend.
    /// Devuelve `None` para valores fuera de la enumeración; el que llama
    /// decide el fallback (English).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "thai" | "th" => Some(Self::Thai),
            "english" | "en" => Some(Self::English),
            "italian" | "it" => Some(Self::Italian),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Thai => "Thai",
            Self::English => "English",
            Self::Italian => "Italian",
        }
    }
}

/// Formato declarado del fichero subido, derivado de su extensión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Docx,
    Txt,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }
}

/// Documento subido con su texto ya extraído. Inmutable tras la extracción;
/// se descarta al subir un fichero nuevo.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: Uuid,
    pub filename: String,
    pub format: SourceFormat,
    pub mime_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub text: String,
}

impl Document {
    pub fn new(filename: String, format: SourceFormat, text: String) -> Self {
        let mime_type = MimeGuess::from_path(&filename)
            .first()
            .map(|m| m.to_string());
        Self {
            id: Uuid::new_v4(),
            filename,
            format,
            mime_type,
            uploaded_at: Utc::now(),
            text,
        }
    }
}

/// Par de idiomas con el que el usuario dispara un análisis: el idioma
/// declarado del contrato y el idioma en el que quiere la respuesta.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest {
    pub contract_language: Language,
    pub output_language: Language,
}

/// Metadatos recuperados de la respuesta del modelo. Cada campo se deriva
/// de forma independiente; sin coincidencia, cae a `NOT_SPECIFIED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedMetadata {
    pub term: String,
    pub price: String,
    pub location: String,
}

impl Default for ExtractedMetadata {
    fn default() -> Self {
        Self {
            term: NOT_SPECIFIED.to_string(),
            price: NOT_SPECIFIED.to_string(),
            location: NOT_SPECIFIED.to_string(),
        }
    }
}

/// Banda cualitativa derivada de la puntuación numérica de riesgo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Unknown,
    VeryLow,
    Moderate,
    High,
}

impl RiskBand {
    /// Umbrales fijos: ausente → Unknown; ≤3 → VeryLow; 4–6 → Moderate;
    /// ≥7 → High. Los valores fuera de rango (>10) también caen en High.
    pub fn from_score(score: Option<u32>) -> Self {
        match score {
            None => Self::Unknown,
            Some(s) if s <= 3 => Self::VeryLow,
            Some(s) if s <= 6 => Self::Moderate,
            Some(_) => Self::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::VeryLow => "Very Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Unknown => "⚪",
            Self::VeryLow => "🟢",
            Self::Moderate => "🟡",
            Self::High => "🔴",
        }
    }
}

/// Puntuación de riesgo (si el modelo la emitió) con su banda derivada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: Option<u32>,
    pub band: RiskBand,
}

impl RiskAssessment {
    pub fn new(score: Option<u32>) -> Self {
        Self {
            score,
            band: RiskBand::from_score(score),
        }
    }
}

/// Resultado completo de un análisis. Sustituye íntegro al anterior.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub narrative: String,
    pub metadata: ExtractedMetadata,
    pub risk: RiskAssessment,
    pub translated_text: Option<String>,
    pub report: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds_are_exact() {
        assert_eq!(RiskBand::from_score(None), RiskBand::Unknown);
        for s in 0..=3 {
            assert_eq!(RiskBand::from_score(Some(s)), RiskBand::VeryLow, "score {s}");
        }
        for s in 4..=6 {
            assert_eq!(RiskBand::from_score(Some(s)), RiskBand::Moderate, "score {s}");
        }
        for s in [7, 8, 9, 10, 11, 42, 99] {
            assert_eq!(RiskBand::from_score(Some(s)), RiskBand::High, "score {s}");
        }
    }

    #[test]
    fn language_parse_is_lenient_but_closed() {
        assert_eq!(Language::parse("Thai"), Some(Language::Thai));
        assert_eq!(Language::parse(" italian "), Some(Language::Italian));
        assert_eq!(Language::parse("en"), Some(Language::English));
        assert_eq!(Language::parse("klingon"), None);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_extension("PDF"), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::from_extension("docx"), Some(SourceFormat::Docx));
        assert_eq!(SourceFormat::from_extension("odt"), None);
    }

    #[test]
    fn metadata_defaults_to_sentinel() {
        let m = ExtractedMetadata::default();
        assert_eq!(m.term, NOT_SPECIFIED);
        assert_eq!(m.price, NOT_SPECIFIED);
        assert_eq!(m.location, NOT_SPECIFIED);
    }
}
