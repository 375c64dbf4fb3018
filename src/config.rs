//! Carga y gestión de configuración de la aplicación (servidor + LLM).

use std::env;
use anyhow::{anyhow, Result};

#[derive(Clone, Debug)]
pub enum LlmProvider {
    OpenAI,
    Gemini,
    Ollama,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            other => Err(anyhow!("Proveedor LLM no soportado: {other}")),
        }
    }
}

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,

    pub llm_provider: LlmProvider,
    pub llm_chat_model: String,
    /// Máximo de tokens del documento extraído antes de rechazar el análisis.
    pub token_ceiling: usize,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3322".to_string());

        let llm_provider_str =
            env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let llm_provider = LlmProvider::from_str(&llm_provider_str)?;

        let llm_chat_model =
            env::var("LLM_CHAT_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let token_ceiling = match env::var("LLM_TOKEN_CEILING") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow!("LLM_TOKEN_CEILING debe ser un número entero"))?,
            Err(_) => 16_385,
        };

        // La clave vive sólo en el entorno; aquí únicamente se comprueba que exista.
        if matches!(llm_provider, LlmProvider::OpenAI) && env::var("OPENAI_API_KEY").is_err() {
            return Err(anyhow!("Falta OPENAI_API_KEY en el entorno"));
        }

        Ok(Self {
            server_addr,
            llm_provider,
            llm_chat_model,
            token_ceiling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_str() {
        assert!(matches!(
            LlmProvider::from_str("OpenAI").unwrap(),
            LlmProvider::OpenAI
        ));
        assert!(matches!(
            LlmProvider::from_str("ollama").unwrap(),
            LlmProvider::Ollama
        ));
        assert!(LlmProvider::from_str("mistral").is_err());
    }
}
