//! Taxonomía de errores de la aplicación y su mapeo a respuestas HTTP.
//!
//! Todos son errores de frontera local: ninguno tumba el proceso y cada uno
//! llega al usuario como un mensaje JSON, dejando la sesión utilizable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Extensión fuera del conjunto soportado (pdf / docx / txt).
    #[error("Unsupported file format: .{0} (expected .pdf, .docx or .txt)")]
    UnsupportedFormat(String),

    /// Fichero .txt que no es UTF-8 válido.
    #[error("The text file is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// La librería de extracción no pudo leer el documento.
    #[error("Could not extract text from the document: {0}")]
    Extraction(String),

    /// Guardia previa al envío: el documento supera el presupuesto de tokens.
    #[error("The document is too long: {count} tokens (limit: {ceiling}). Shorten it and try again.")]
    TokenBudgetExceeded { count: usize, ceiling: usize },

    /// Fallo de la llamada remota (red, cuota, credenciales, respuesta rota).
    #[error("The analysis service failed: {0}")]
    Service(String),

    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error("No document has been uploaded yet.")]
    NoDocument,

    #[error("No analysis is available yet.")]
    NoAnalysis,

    /// Segundo análisis mientras otro sigue en vuelo.
    #[error("An analysis is already running.")]
    Busy,

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedFormat(_)
            | Self::Decode(_)
            | Self::Extraction(_)
            | Self::Upload(_)
            | Self::NoDocument => StatusCode::BAD_REQUEST,
            Self::NoAnalysis => StatusCode::NOT_FOUND,
            Self::Busy => StatusCode::CONFLICT,
            Self::TokenBudgetExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Service(_) => StatusCode::BAD_GATEWAY,
            Self::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
