//! CLI argument parsing via clap.

use askgpt::build_info;
use askgpt::config::DEFAULT_SCENARIO;
use clap::{Parser, Subcommand};

/// Persistent conversations with an OpenAI-compatible completions API.
#[derive(Debug, Parser)]
#[command(name = "askgpt", version, long_version = build_info::LONG_VERSION)]
pub struct Args {
    /// Path to config file (default: ./askgpt.toml or ~/.config/askgpt/askgpt.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a question within a subject's conversation.
    Query(QueryArgs),
    /// Show config, subjects, scenarios, models, or one subject's transcript.
    Show {
        /// One of `config`, `subjects`, `scenarios`, `models`, or a subject name.
        what: String,
    },
    /// Delete one transcript or all of them.
    Delete {
        /// Subject to delete.
        #[arg(short = 's', long = "subject", conflicts_with = "all", required_unless_present = "all")]
        subject: Option<String>,
        /// Delete every transcript.
        #[arg(long = "all")]
        all: bool,
    },
    /// Edit a subject's transcript in $EDITOR.
    Edit {
        /// Subject to edit.
        #[arg(short = 's', long = "subject")]
        subject: String,
    },
    /// Store an API key and organization in the config directory.
    Credentials,
    /// Print the usage disclaimer.
    Disclaimer,
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
    /// Conversation name; the transcript file is derived from it.
    #[arg(short = 's', long = "subject")]
    pub subject: String,

    /// The question to ask.
    pub enquiry: String,

    /// Scenario whose bootstrap text prefixes every prompt.
    #[arg(long = "scenario", default_value = DEFAULT_SCENARIO)]
    pub scenario: String,

    /// Override model name.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Override sampling temperature.
    #[arg(long = "temperature")]
    pub temperature: Option<f64>,

    /// Override nucleus sampling probability.
    #[arg(long = "top-p")]
    pub top_p: Option<f64>,

    /// Override frequency penalty.
    #[arg(long = "frequency-penalty")]
    pub frequency_penalty: Option<f64>,

    /// Override presence penalty.
    #[arg(long = "presence-penalty")]
    pub presence_penalty: Option<f64>,

    /// Override the response token limit.
    #[arg(long = "max-tokens")]
    pub max_tokens: Option<u32>,

    /// Print the full prompt before the answer.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Do not append the exchange to the transcript.
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Retry failed requests with backoff, up to `retry.max_retries` attempts.
    #[arg(long = "retry")]
    pub retry: bool,

    /// Offer to run the answer as a shell command.
    #[arg(short = 'x', long = "execute")]
    pub execute: bool,
}
