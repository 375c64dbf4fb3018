//! Abstracción sobre Rig para trabajar con distintos proveedores de LLM.
//! De momento se implementa OpenAI; Gemini/Ollama quedan preparados para el futuro.

use anyhow::Result;
use rig::completion::Prompt;

use crate::config::{AppConfig, LlmProvider};
use crate::error::AnalysisError;
use crate::models::Language;
use crate::prompt;

/// Gestor del cliente de completions.
#[derive(Debug, Clone)]
pub struct LlmManager {
    pub provider: LlmProvider,
    pub chat_model: String,
}

impl LlmManager {
    /// Construye el manager a partir de la configuración.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Ok(Self {
            provider: cfg.llm_provider.clone(),
            chat_model: cfg.llm_chat_model.clone(),
        })
    }

    /// Una única llamada síncrona de análisis: system prompt + texto del
    /// contrato. Sin reintentos, sin backoff, sin streaming.
    pub async fn analyze(
        &self,
        system_prompt: &str,
        document_text: &str,
    ) -> Result<String, AnalysisError> {
        self.complete(system_prompt, document_text).await
    }

    /// Llamada de traducción independiente, con su propia plantilla fija.
    pub async fn translate(
        &self,
        document_text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, AnalysisError> {
        let system_prompt = prompt::build_translation_prompt(source, target);
        self.complete(&system_prompt, document_text).await
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, AnalysisError> {
        match self.provider {
            LlmProvider::OpenAI => self.complete_with_openai(system_prompt, user_text).await,
            ref other => Err(AnalysisError::Service(format!(
                "LLM provider {other:?} is not implemented yet"
            ))),
        }
    }

    async fn complete_with_openai(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, AnalysisError> {
        use rig::providers::openai;
        // Trait para client.agent(...)
        use rig::client::CompletionClient as _;

        // La clave sale de OPENAI_API_KEY; nunca se guarda ni se registra.
        let client = openai::Client::from_env();

        let model_name = if self.chat_model.is_empty() {
            "gpt-3.5-turbo"
        } else {
            self.chat_model.as_str()
        };

        let agent = client.agent(model_name).preamble(system_prompt).build();

        // Cualquier fallo (red, cuota, credenciales, respuesta rota) llega
        // como un único ServiceError, nunca aplicado a medias.
        agent
            .prompt(user_text)
            .await
            .map_err(|e| AnalysisError::Service(e.to_string()))
    }
}
