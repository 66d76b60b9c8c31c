//! Data model for the OpenAI-compatible text completions API and the
//! per-query option bundle.
//!
//! The wire types serialize/deserialize directly to/from the JSON payloads of
//! `POST /completions` and `GET /models`.

use serde::{Deserialize, Serialize};

use crate::config::QueryConfig;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Sampling parameters for one completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl SamplingParams {
    /// Sampling defaults taken from the `[query]` config section.
    pub fn from_config(query: &QueryConfig) -> Self {
        Self {
            model: query.model.clone(),
            temperature: query.temperature,
            max_tokens: query.max_tokens,
            top_p: query.top_p,
            frequency_penalty: query.frequency_penalty,
            presence_penalty: query.presence_penalty,
        }
    }
}

/// Body of `POST /completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    #[serde(flatten)]
    pub params: SamplingParams,
    pub prompt: String,
    /// Generation halts before emitting any of these.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body returned by `POST /completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Body returned by `GET /models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Query options
// ---------------------------------------------------------------------------

/// Per-invocation switches for `query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Print the whole prompt followed by the answer.
    pub verbose: bool,
    /// Append the enquiry and answer to the transcript.
    pub save: bool,
    /// Use the configured `max_retries` budget instead of a single attempt.
    pub retry: bool,
    /// Offer to run the answer as a shell command.
    pub execute: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            save: true,
            retry: false,
            execute: false,
        }
    }
}
