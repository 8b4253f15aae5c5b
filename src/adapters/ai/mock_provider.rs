//! Scripted AI provider for quality-check tests.
//!
//! Replies are queued in order: a model assessment, raw text the model might
//! send instead, empty content, or a provider error. Once the queue runs dry
//! every call receives a clean assessment with no findings.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_assessment(json!({"issues": [], "complianceScore": 90}))
//!     .with_empty_reply();
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};

/// One scripted reply.
#[derive(Debug)]
pub enum MockReply {
    /// An assessment object, sent as its JSON text.
    Assessment(Value),
    /// Text sent verbatim, for replies that are not valid assessments.
    Raw(String),
    /// A completion with no content.
    Empty,
    /// The call fails.
    Fail(AIError),
}

/// What the reviewer asked the model, as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub json_output: bool,
}

impl From<&CompletionRequest> for ReviewCall {
    fn from(request: &CompletionRequest) -> Self {
        let user_prompt = request
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            system_prompt: request.system_prompt.clone().unwrap_or_default(),
            user_prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            json_output: request.response_format == ResponseFormat::JsonObject,
        }
    }
}

/// Queue-driven stand-in for the review model. Clones share the queue and
/// the call history.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<ReviewCall>>>,
    model: String,
    delay: Duration,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The reply used once the script is exhausted.
pub fn clean_assessment() -> Value {
    json!({
        "issues": [],
        "strengths": ["Decision is consistent with the SOP"],
        "overallAssessment": "No findings.",
        "complianceScore": 100
    })
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            model: "mock-reviewer".to_string(),
            delay: Duration::ZERO,
        }
    }

    fn push(self, reply: MockReply) -> Self {
        locked(&self.replies).push_back(reply);
        self
    }

    /// Queues an assessment object.
    pub fn with_assessment(self, assessment: Value) -> Self {
        self.push(MockReply::Assessment(assessment))
    }

    /// Queues text sent as-is.
    pub fn with_raw_reply(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Raw(text.into()))
    }

    /// Queues a completion without content.
    pub fn with_empty_reply(self) -> Self {
        self.push(MockReply::Empty)
    }

    /// Queues a failed call.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockReply::Fail(error))
    }

    /// Waits this long before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<ReviewCall> {
        locked(&self.calls).clone()
    }

    fn next_reply(&self) -> MockReply {
        locked(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Assessment(clean_assessment()))
    }

    fn completion(&self, content: String) -> CompletionResponse {
        CompletionResponse {
            content,
            usage: TokenUsage::default(),
            model: self.model.clone(),
            finish_reason: FinishReason::Stop,
        }
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        locked(&self.calls).push(ReviewCall::from(&request));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Assessment(value) => Ok(self.completion(value.to_string())),
            MockReply::Raw(text) => Ok(self.completion(text)),
            MockReply::Empty => Ok(self.completion(String::new())),
            MockReply::Fail(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", self.model.clone())
    }
}
