use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::GeneratorError;

/// One call to a content generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Instructions framing the task.
    pub system_prompt: String,
    /// The task payload, usually JSON.
    pub user_payload: String,
    /// Upper bound on the generated output size, in tokens.
    pub max_output: u32,
}

/// The external text generator. Each call is exactly one attempt; retries
/// are the caller's business.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce raw text for a request.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError>;
}

/// Run one generator call, converting an overrun into [`GeneratorError::Timeout`].
///
/// The in-flight call is dropped (cancelled) when the timeout elapses.
pub async fn generate_with_timeout(
    generator: &dyn ContentGenerator,
    request: GenerationRequest,
    timeout: Duration,
) -> Result<String, GeneratorError> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(?timeout, "content generator timed out");
            Err(GeneratorError::Timeout(timeout))
        }
    }
}

/// A generator that always fails. Used when playing fully offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGenerator;

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }
}

/// Plays back canned responses in order, optionally after a delay.
///
/// Once the script runs out every call fails with
/// [`GeneratorError::Unavailable`]. Requests are recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GeneratorError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    /// Create a generator with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, error: GeneratorError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sleep this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push(&self, item: Result<String, GeneratorError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(item);
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Responses not yet played back.
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GeneratorError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or(Err(GeneratorError::Unavailable))
    }
}
