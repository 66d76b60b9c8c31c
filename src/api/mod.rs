//! Completion service boundary.
//!
//! The API layer is split into cohesive modules:
//! - `client`: reqwest transport for `/completions` and `/models`
//! - `completion`: marker-aware wrapper that shapes one request/answer
//! - `retry`: bounded attempts with multiplicative backoff

use crate::error::ApiError;
use crate::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;

mod client;
mod completion;
mod retry;

pub use client::ApiClient;
pub use completion::{strip_leading_blank_pair, CompletionClient};
pub use retry::{RetryController, RetryPolicy};

/// Minimal completion-service interface used by the query pipeline.
///
/// This trait lets tests provide scripted responses without network calls
/// while the production path uses [`ApiClient`].
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError>;
}
