//! Application entry orchestration for the askgpt CLI.

use crate::app::commands::credentials::handle_credentials;
use crate::app::commands::show::handle_show;
use crate::app::commands::transcript::{handle_delete, handle_edit};
use crate::app::startup::{render_disclaimer, DISCLAIMER};
use crate::cli::{Args, Command, QueryArgs};
use askgpt::api::ApiClient;
use askgpt::config::{ensure_default_global_config, load_config, Config};
use askgpt::error::QueryError;
use askgpt::exec::ShellRunner;
use askgpt::query::{QueryPipeline, QueryRequest};
use askgpt::transcript::TranscriptStore;
use askgpt::types::{QueryOptions, SamplingParams};
use askgpt::ui::{RenderSink, Renderer, TerminalInteraction};

/// Load config, print the disclaimer, and dispatch the subcommand.
///
/// Returns the process exit code.
pub(crate) async fn run(args: Args) -> i32 {
    if let Err(e) = ensure_default_global_config() {
        eprintln!("warning: failed to initialize the global askgpt.toml: {e}");
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    let renderer = Renderer::new(config.display.color && !args.no_color);
    render_disclaimer(
        &renderer,
        config.display.show_disclaimer,
        matches!(args.command, Command::Disclaimer),
    );

    match args.command {
        Command::Query(query) => run_query(&renderer, &config, &query).await,
        Command::Show { what } => handle_show(&renderer, &config, &what).await,
        Command::Delete { subject, all } => {
            let store = TranscriptStore::from_config(&config);
            handle_delete(&renderer, &store, subject.as_deref(), all)
        }
        Command::Edit { subject } => {
            let store = TranscriptStore::from_config(&config);
            handle_edit(&renderer, &store, &TerminalInteraction, &subject)
        }
        Command::Credentials => handle_credentials(&renderer, &config.config_dir),
        Command::Disclaimer => {
            renderer.info(DISCLAIMER);
            0
        }
    }
}

async fn run_query(renderer: &dyn RenderSink, config: &Config, args: &QueryArgs) -> i32 {
    let client = ApiClient::new(&config.api);
    let store = TranscriptStore::from_config(config);
    let runner = ShellRunner::from_config(&config.exec);
    let pipeline = QueryPipeline::new(
        config,
        &client,
        &store,
        renderer,
        &TerminalInteraction,
        &runner,
    );

    let request = QueryRequest {
        subject: &args.subject,
        scenario: &args.scenario,
        question: &args.enquiry,
        params: sampling_params(config, args),
        options: query_options(args),
    };
    match pipeline.run(request).await {
        Ok(_) => 0,
        Err(e) => {
            report_query_error(renderer, &e);
            query_exit_code(&e)
        }
    }
}

/// Config sampling defaults with command-line overrides applied.
fn sampling_params(config: &Config, args: &QueryArgs) -> SamplingParams {
    let mut params = SamplingParams::from_config(&config.query);
    if let Some(model) = &args.model {
        params.model = model.clone();
    }
    if let Some(temperature) = args.temperature {
        params.temperature = temperature;
    }
    if let Some(top_p) = args.top_p {
        params.top_p = top_p;
    }
    if let Some(penalty) = args.frequency_penalty {
        params.frequency_penalty = penalty;
    }
    if let Some(penalty) = args.presence_penalty {
        params.presence_penalty = penalty;
    }
    if let Some(max_tokens) = args.max_tokens {
        params.max_tokens = max_tokens;
    }
    params
}

fn query_options(args: &QueryArgs) -> QueryOptions {
    QueryOptions {
        verbose: args.verbose,
        save: !args.no_save,
        retry: args.retry,
        execute: args.execute,
    }
}

fn report_query_error(renderer: &dyn RenderSink, err: &QueryError) {
    match err {
        QueryError::RetryExhausted { attempts, last } => {
            renderer.error(&format!("Error: {last}"));
            renderer.error(&format!(
                "Error: {} ({attempts} attempt(s))",
                askgpt::error::RETRY_EXHAUSTED_ADVICE
            ));
        }
        other => renderer.error(&format!("Error: {other}")),
    }
}

/// Usage errors exit 2, everything else 1.
fn query_exit_code(err: &QueryError) -> i32 {
    match err {
        QueryError::NoSubjectProvided | QueryError::UnknownScenario(_) => 2,
        _ => 1,
    }
}
