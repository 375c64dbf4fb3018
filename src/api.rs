use axum::{
    extract::{Json, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    app_state::{AppState, Status},
    error::AnalysisError,
    extract,
    models::{AnalysisOutcome, AnalysisRequest, Document, Language, SourceFormat},
    parse, pdf, prompt, render, tokens,
};

// --- Payloads de la API ---

#[derive(Deserialize)]
pub struct AnalyzePayload {
    contract_language: String,
    output_language: String,
}

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/upload", post(upload_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analysis", get(analysis_handler))
        .route("/api/download/text", get(download_text_handler))
        .route("/api/download/pdf", get(download_pdf_handler))
        .route("/api/status", get(status_handler))
        .route("/api/shutdown", post(shutdown_handler))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AnalysisError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalysisError::Upload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("contract").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AnalysisError::Upload(e.to_string()))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }
    let (filename, bytes) =
        upload.ok_or_else(|| AnalysisError::Upload("missing \"file\" field".to_string()))?;

    let extension = std::path::Path::new(&filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("")
        .to_lowercase();
    let format = SourceFormat::from_extension(&extension)
        .ok_or(AnalysisError::UnsupportedFormat(extension))?;

    let text = extract::extract(&bytes, format)?;
    let token_count = tokens::count_tokens(&text);
    let document = Document::new(filename, format, text);

    info!(
        "Documento subido: {} ({:?}, {} tokens)",
        document.filename, document.format, token_count
    );

    let response = json!({
        "id": document.id,
        "filename": document.filename,
        "format": document.format,
        "preview": document.text,
        "tokens": token_count,
        "token_ceiling": state.config.token_ceiling,
    });

    // Un documento nuevo invalida cualquier análisis anterior.
    state.session.lock().unwrap().replace_document(document);

    Ok(Json(response))
}

#[axum::debug_handler]
async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePayload>,
) -> Result<Json<AnalysisOutcome>, AnalysisError> {
    let request = AnalysisRequest {
        contract_language: parse_language(&payload.contract_language),
        output_language: parse_language(&payload.output_language),
    };

    // Sólo un análisis en vuelo por sesión: el segundo recibe 409.
    {
        let mut status = state.status.lock().unwrap();
        if status.is_busy {
            return Err(AnalysisError::Busy);
        }
        status.is_busy = true;
        status.message = "Analysing contract...".to_string();
    }

    let result = run_analysis(&state, request).await;

    {
        let mut status = state.status.lock().unwrap();
        status.is_busy = false;
        status.message = match &result {
            Ok(_) => "Analysis complete.".to_string(),
            Err(e) => format!("Analysis failed: {e}"),
        };
    }

    result.map(Json)
}

async fn run_analysis(
    state: &AppState,
    request: AnalysisRequest,
) -> Result<AnalysisOutcome, AnalysisError> {
    let document_text = {
        let session = state.session.lock().unwrap();
        session
            .document
            .as_ref()
            .map(|d| d.text.clone())
            .ok_or(AnalysisError::NoDocument)?
    };

    // Guardia de presupuesto: si se supera el techo, no sale ninguna
    // petición por la red y el resultado anterior queda intacto.
    tokens::check_budget(&document_text, state.config.token_ceiling)?;

    let system_prompt = prompt::build_system_prompt(request.output_language);
    let reply = state.llm_manager.analyze(system_prompt, &document_text).await?;

    // Segunda llamada, independiente y también secuencial, sólo cuando el
    // idioma del contrato difiere del idioma de salida.
    let translated_text = if request.contract_language != request.output_language {
        {
            let mut status = state.status.lock().unwrap();
            status.message = "Translating contract...".to_string();
        }
        Some(
            state
                .llm_manager
                .translate(
                    &document_text,
                    request.contract_language,
                    request.output_language,
                )
                .await?,
        )
    } else {
        None
    };

    let (risk, narrative) = parse::extract_risk(&reply);
    let metadata = parse::extract_metadata(&reply);
    let report = render::render(&narrative, &metadata, &risk, translated_text.as_deref());

    let outcome = AnalysisOutcome {
        narrative,
        metadata,
        risk,
        translated_text,
        report,
    };
    state.session.lock().unwrap().replace_outcome(outcome.clone());

    Ok(outcome)
}

fn parse_language(raw: &str) -> Language {
    Language::parse(raw).unwrap_or_else(|| {
        warn!("Idioma no reconocido: {raw:?}; se usa English");
        Language::English
    })
}

#[axum::debug_handler]
async fn analysis_handler(
    State(state): State<AppState>,
) -> Result<Json<AnalysisOutcome>, AnalysisError> {
    let session = state.session.lock().unwrap();
    session
        .outcome
        .clone()
        .map(Json)
        .ok_or(AnalysisError::NoAnalysis)
}

#[axum::debug_handler]
async fn download_text_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AnalysisError> {
    // El .txt lleva exactamente la narrativa, sin ninguna transformación.
    let narrative = {
        let session = state.session.lock().unwrap();
        session
            .outcome
            .as_ref()
            .map(|o| o.narrative.clone())
            .ok_or(AnalysisError::NoAnalysis)?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contract_analysis.txt\"",
            ),
        ],
        narrative,
    ))
}

#[axum::debug_handler]
async fn download_pdf_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AnalysisError> {
    let narrative = {
        let session = state.session.lock().unwrap();
        session
            .outcome
            .as_ref()
            .map(|o| o.narrative.clone())
            .ok_or(AnalysisError::NoAnalysis)?
    };

    let bytes = pdf::narrative_pdf(&narrative)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contract_analysis.pdf\"",
            ),
        ],
        bytes,
    ))
}

#[axum::debug_handler]
async fn status_handler(State(state): State<AppState>) -> Json<Status> {
    Json(state.status.lock().unwrap().clone())
}

#[axum::debug_handler]
async fn shutdown_handler(State(state): State<AppState>) -> impl IntoResponse {
    info!("Petición de apagado recibida.");
    if let Some(sender) = state.shutdown_sender.lock().unwrap().take() {
        let _ = sender.send(());
    }
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_languages_degrade_to_english() {
        assert_eq!(parse_language("Italian"), Language::Italian);
        assert_eq!(parse_language("klingon"), Language::English);
        assert_eq!(parse_language(""), Language::English);
    }

    // El tramo local del flujo de análisis, con una respuesta del modelo
    // simulada: parseo de riesgo y metadatos, e informe final.
    #[test]
    fn reply_to_report_pipeline() {
        let reply = "Rent: $1500\nTerm: 12 months\nRiskScore: 8";

        let (risk, narrative) = parse::extract_risk(reply);
        let metadata = parse::extract_metadata(reply);
        let report = render::render(&narrative, &metadata, &risk, None);

        assert!(report.contains("High 🔴 (8/10)"));
        assert!(report.contains("| 12 months | $1500 |"));
        assert!(!narrative.contains("RiskScore"));
    }
}
