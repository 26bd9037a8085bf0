use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ReflectionError;
use crate::models::life_stats::ReflectionRequest;

/// Returned whenever the language model cannot be reached or fails.
pub const FALLBACK_REFLECTION: &str = "生命不在於呼吸的次數，而在於那些讓你屏息的瞬間。";
/// Returned when the model answers with nothing.
pub const EMPTY_REFLECTION: &str = "每一天都是一份禮物，這就是為什麼我們稱之為『現在』。";
/// Shown before any reflection has arrived.
pub const PLACEHOLDER_REFLECTION: &str = "真正重要的不是你活了多少年，而是這些年你怎麼活。";

#[async_trait]
pub trait LanguageModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ReflectionError>;
}

/// Supplies a short reflection for the given age and remaining weeks.
/// Implementations never fail; failures become a fixed string.
#[async_trait]
pub trait ReflectionProvider: Send + Sync {
    async fn request(&self, age: u32, weeks_remaining: u32, expected_lifespan: u32) -> String;

    async fn request_for(&self, request: ReflectionRequest) -> String {
        self.request(request.age, request.weeks_remaining, request.expected_lifespan)
            .await
    }
}

pub fn build_reflection_prompt(age: u32, weeks_remaining: u32, expected_lifespan: u32) -> String {
    format!(
        "I am {age} years old and, out of an expected {expected_lifespan} years, I have about \
         {weeks_remaining} weeks left.\n\
         Write a short, warm and thought-provoking reflection or gentle reminder (at most 3 sentences).\n\
         The tone should be approachable, like a kind elder reminding me how precious life and the \
         present moment are, not a stiff philosophical lecture.\n\
         Answer in Traditional Chinese. Output only the text itself, with no labels, quotes or explanations."
    )
}

/// Asks a language model for a reflection, one call per request.
pub struct ReflectionService {
    client: Option<Arc<dyn LanguageModelClient>>,
}

impl ReflectionService {
    pub fn new(client: Arc<dyn LanguageModelClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A service without a model: every request yields the fallback.
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn from_client(client: Option<Arc<dyn LanguageModelClient>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReflectionProvider for ReflectionService {
    async fn request(&self, age: u32, weeks_remaining: u32, expected_lifespan: u32) -> String {
        let Some(client) = &self.client else {
            debug!("no language model configured, using fallback reflection");
            return FALLBACK_REFLECTION.to_string();
        };

        let prompt = build_reflection_prompt(age, weeks_remaining, expected_lifespan);
        match client.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => EMPTY_REFLECTION.to_string(),
            Err(e) => {
                warn!(error = %e, "reflection request failed");
                FALLBACK_REFLECTION.to_string()
            }
        }
    }
}

/// Hands out tickets for overlapping reflection requests so that only the
/// newest response is kept.
#[derive(Debug, Default)]
pub struct ReflectionSequence {
    latest: AtomicU64,
}

impl ReflectionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn accept(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
