use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::{
    config::AppConfig,
    llm::LlmManager,
    models::{AnalysisOutcome, Document},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub llm_manager: LlmManager,
    pub status: Arc<Mutex<Status>>,
    pub session: Arc<Mutex<Session>>,
    pub shutdown_sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Status {
    pub is_busy: bool,
    pub message: String,
}

/// Estado de la sesión interactiva. Se sobrescribe, nunca se fusiona:
/// un documento nuevo descarta el análisis anterior, y cada análisis
/// sustituye íntegro al que hubiera.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub document: Option<Document>,
    pub outcome: Option<AnalysisOutcome>,
}

impl Session {
    pub fn replace_document(&mut self, document: Document) {
        self.document = Some(document);
        self.outcome = None;
    }

    pub fn replace_outcome(&mut self, outcome: AnalysisOutcome) {
        self.outcome = Some(outcome);
    }
}
