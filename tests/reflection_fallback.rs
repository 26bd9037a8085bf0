use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use lifeCalendar::error::ReflectionError;
use lifeCalendar::models::life_stats::ReflectionRequest;
use lifeCalendar::service::reflection_service::{
    EMPTY_REFLECTION, FALLBACK_REFLECTION, LanguageModelClient, ReflectionProvider,
    ReflectionService,
};

struct FakeModel {
    response: Result<String, u16>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            response: Err(status),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModelClient for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, ReflectionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ReflectionError::Status {
                status: *status,
                body: "quota exceeded".to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn model_text_is_returned_trimmed() {
    let model = FakeModel::answering("  Every week counts.\n");
    let service = ReflectionService::new(model.clone());
    let text = service.request(35, 2314, 80).await;
    assert_eq!(text, "Every week counts.");
    assert_eq!(model.calls(), 1);
    let prompt = model.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("35"));
    assert!(prompt.contains("2314"));
    assert!(prompt.contains("80"));
}

#[tokio::test]
async fn collaborator_failure_becomes_fallback() {
    let service = ReflectionService::new(FakeModel::failing(429));
    assert_eq!(service.request(35, 2314, 80).await, FALLBACK_REFLECTION);
}

#[tokio::test]
async fn blank_answer_becomes_empty_default() {
    let service = ReflectionService::new(FakeModel::answering("   "));
    assert_eq!(service.request(35, 2314, 80).await, EMPTY_REFLECTION);
}

#[tokio::test]
async fn each_request_makes_exactly_one_call() {
    let model = FakeModel::failing(500);
    let service = ReflectionService::new(model.clone());
    service.request(1, 2, 3).await;
    service
        .request_for(ReflectionRequest {
            age: 1,
            weeks_remaining: 2,
            expected_lifespan: 3,
        })
        .await;
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn unreachable_server_becomes_fallback() {
    use lifeCalendar::clients::GeminiClient;
    use std::time::Duration;

    // Nothing listens on port 9 (discard); the connection is refused.
    let client = GeminiClient::new(
        "key".to_string(),
        None,
        Some("http://127.0.0.1:9".to_string()),
        Duration::from_millis(500),
    )
    .unwrap();
    let service = ReflectionService::new(Arc::new(client));
    assert_eq!(service.request(20, 3000, 80).await, FALLBACK_REFLECTION);
}
