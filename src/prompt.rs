//! Turn markers and prompt assembly.
//!
//! A prompt is the scenario bootstrap, a newline, the raw transcript, the new
//! enquiry, a newline, and the AI marker that invites the next answer:
//!
//! ```text
//! <bootstrap>\n<transcript><user marker><question>\n<ai marker>
//! ```
//!
//! Nothing is truncated here; `max_tokens` bounds only the response.

use crate::config::QueryConfig;

/// Delimiters that prefix user and AI turns in transcripts and prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnMarkers {
    user: String,
    ai: String,
}

impl TurnMarkers {
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
        }
    }

    pub fn from_config(query: &QueryConfig) -> Self {
        Self::new(query.user_prompt.clone(), query.ai_prompt.clone())
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn ai(&self) -> &str {
        &self.ai
    }

    /// A user turn: the user marker followed by `text`.
    pub fn user_turn(&self, text: &str) -> String {
        format!("{}{text}", self.user)
    }

    /// An AI turn: the AI marker followed by `text`.
    pub fn ai_turn(&self, text: &str) -> String {
        format!("{}{text}", self.ai)
    }

    /// Stop sequences for the completion service, user marker first.
    pub fn stop_sequences(&self) -> Vec<String> {
        vec![self.user.clone(), self.ai.clone()]
    }

    /// True when `text` contains either marker verbatim.
    ///
    /// Such text is stored unescaped and will read as an extra turn when the
    /// transcript is replayed.
    pub fn appears_in(&self, text: &str) -> bool {
        text.contains(&self.user) || text.contains(&self.ai)
    }
}

/// Assembles prompts for one scenario.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    bootstrap: &'a str,
    markers: &'a TurnMarkers,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(bootstrap: &'a str, markers: &'a TurnMarkers) -> Self {
        Self { bootstrap, markers }
    }

    /// Build the prompt for `enquiry` (already prefixed with the user marker)
    /// on top of the stored `transcript`, which may be empty.
    pub fn build(&self, transcript: &str, enquiry: &str) -> String {
        let mut prompt = String::with_capacity(
            self.bootstrap.len() + transcript.len() + enquiry.len() + self.markers.ai.len() + 2,
        );
        prompt.push_str(self.bootstrap);
        prompt.push('\n');
        prompt.push_str(transcript);
        prompt.push_str(enquiry);
        prompt.push('\n');
        prompt.push_str(&self.markers.ai);
        prompt
    }
}
