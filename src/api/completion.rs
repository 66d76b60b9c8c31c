//! Marker-aware wrapper around one completion-service call.

use super::CompletionService;
use crate::error::ApiError;
use crate::prompt::TurnMarkers;
use crate::types::{CompletionRequest, SamplingParams};

/// Issues a single completion request with the turn markers as stop
/// sequences, so the service halts before inventing the next user turn.
pub struct CompletionClient<'a> {
    service: &'a dyn CompletionService,
    params: SamplingParams,
    stop: Vec<String>,
}

impl<'a> CompletionClient<'a> {
    pub fn new(
        service: &'a dyn CompletionService,
        params: SamplingParams,
        markers: &TurnMarkers,
    ) -> Self {
        Self {
            service,
            params,
            stop: markers.stop_sequences(),
        }
    }

    /// Request a completion for `prompt` and return the first choice's text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let request = CompletionRequest {
            params: self.params.clone(),
            prompt: prompt.to_string(),
            stop: self.stop.clone(),
        };
        let response = self.service.complete(&request).await?;
        let first = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidResponse("response contained no choices".into()))?;
        tracing::debug!(
            finish_reason = first.finish_reason.as_deref().unwrap_or("unknown"),
            chars = first.text.len(),
            "received completion"
        );
        Ok(strip_leading_blank_pair(&first.text).to_string())
    }
}

/// Remove exactly one leading `"\n\n"`, an artifact of the completions API.
///
/// A single leading newline, or any other whitespace, is left untouched.
pub fn strip_leading_blank_pair(text: &str) -> &str {
    text.strip_prefix("\n\n").unwrap_or(text)
}
