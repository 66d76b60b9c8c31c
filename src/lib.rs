//! askgpt: persistent, scenario-driven conversations with an
//! OpenAI-compatible text completions API.
//!
//! Each conversation ("subject") is a plain-text transcript replayed into
//! every prompt after a scenario bootstrap. Answers can optionally be run as
//! shell commands, with their output fed back into the conversation.
//!
//! # Quick start
//!
//! ```no_run
//! use askgpt::api::ApiClient;
//! use askgpt::config::{load_config, DEFAULT_SCENARIO};
//! use askgpt::exec::ShellRunner;
//! use askgpt::query::{QueryPipeline, QueryRequest};
//! use askgpt::transcript::TranscriptStore;
//! use askgpt::types::{QueryOptions, SamplingParams};
//! use askgpt::ui::{Renderer, TerminalInteraction};
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let client = ApiClient::new(&config.api);
//! let store = TranscriptStore::from_config(&config);
//! let renderer = Renderer::new(true);
//! let runner = ShellRunner::from_config(&config.exec);
//! let pipeline = QueryPipeline::new(
//!     &config, &client, &store, &renderer, &TerminalInteraction, &runner,
//! );
//! let outcome = pipeline
//!     .run(QueryRequest {
//!         subject: "quest1",
//!         scenario: DEFAULT_SCENARIO,
//!         question: "look around",
//!         params: SamplingParams::from_config(&config.query),
//!         options: QueryOptions::default(),
//!     })
//!     .await
//!     .unwrap();
//! println!("{}", outcome.answer);
//! # }
//! ```

pub mod api;
pub mod build_info;
pub mod config;
pub mod error;
pub mod exec;
pub mod prompt;
pub mod query;
#[cfg(test)]
pub mod testsupport;
pub mod transcript;
pub mod types;
pub mod ui;
