pub mod gemini_client;
pub mod openai_client;

use std::sync::Arc;

use crate::config::{Backend, ReflectionSettings};
use crate::error::ReflectionError;
use crate::service::reflection_service::LanguageModelClient;

pub use gemini_client::GeminiClient;
pub use openai_client::OpenAIClient;

/// Builds the configured client, or `None` when no API key is set.
pub fn build_client(
    settings: &ReflectionSettings,
) -> Result<Option<Arc<dyn LanguageModelClient>>, ReflectionError> {
    let Some(api_key) = settings.api_key.clone() else {
        return Ok(None);
    };
    let client: Arc<dyn LanguageModelClient> = match settings.backend {
        Backend::Gemini => Arc::new(GeminiClient::new(
            api_key,
            settings.model.clone(),
            settings.base_url.clone(),
            settings.timeout,
        )?),
        Backend::OpenAI => Arc::new(OpenAIClient::new(
            api_key,
            settings.model.clone(),
            settings.base_url.clone(),
            settings.timeout,
        )?),
    };
    Ok(Some(client))
}
