//! One `query` invocation: prompt assembly, completion with retry, and
//! transcript updates.
//!
//! Nothing is written to the transcript until a completion succeeds, so
//! exhausted retries, unknown scenarios, and missing subjects leave the
//! store untouched.

use crate::api::{CompletionClient, CompletionService, RetryController, RetryPolicy};
use crate::config::Config;
use crate::error::QueryError;
use crate::exec::{ExecutionConfirmer, ExecutionOutcome, ProcessRunner};
use crate::prompt::{PromptBuilder, TurnMarkers};
use crate::transcript::{Subject, TranscriptStore};
use crate::types::{QueryOptions, SamplingParams};
use crate::ui::{Interaction, RenderSink};

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct QueryRequest<'a> {
    pub subject: &'a str,
    pub scenario: &'a str,
    pub question: &'a str,
    pub params: SamplingParams,
    pub options: QueryOptions,
}

/// Result of a successful query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub subject: Subject,
    pub prompt: String,
    pub answer: String,
    /// Set only in execute mode.
    pub execution: Option<ExecutionOutcome>,
}

/// Collaborators for the query flow. All of them are borrowed so the binary
/// and tests can supply their own.
pub struct QueryPipeline<'a> {
    config: &'a Config,
    service: &'a dyn CompletionService,
    store: &'a TranscriptStore,
    sink: &'a dyn RenderSink,
    interaction: &'a dyn Interaction,
    runner: &'a dyn ProcessRunner,
}

impl<'a> QueryPipeline<'a> {
    pub fn new(
        config: &'a Config,
        service: &'a dyn CompletionService,
        store: &'a TranscriptStore,
        sink: &'a dyn RenderSink,
        interaction: &'a dyn Interaction,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            config,
            service,
            store,
            sink,
            interaction,
            runner,
        }
    }

    pub async fn run(&self, request: QueryRequest<'_>) -> Result<QueryOutcome, QueryError> {
        let subject = Subject::parse(request.subject)?;
        let bootstrap = self
            .config
            .scenario(request.scenario)
            .ok_or_else(|| QueryError::UnknownScenario(request.scenario.to_string()))?;

        let markers = TurnMarkers::from_config(&self.config.query);
        let transcript = self.store.read(&subject)?;
        let enquiry = markers.user_turn(request.question);
        let prompt = PromptBuilder::new(bootstrap, &markers).build(&transcript, &enquiry);
        tracing::info!(
            subject = %subject,
            scenario = request.scenario,
            model = %request.params.model,
            prompt_chars = prompt.len(),
            "sending query"
        );

        let client = CompletionClient::new(self.service, request.params, &markers);
        let policy = RetryPolicy::from_config(&self.config.retry, request.options.retry);
        let client = &client;
        let prompt_text = prompt.as_str();
        let answer = RetryController::new(policy, self.sink)
            .run(move |_| client.complete(prompt_text))
            .await?;

        if markers.appears_in(&answer) {
            self.sink
                .warn("answer contains a turn marker; the transcript may replay oddly");
        }
        // The exchange is recorded as soon as the service answers, before any
        // interactive step can fail or be interrupted.
        if request.options.save {
            self.save_exchange(&subject, &markers, &enquiry, &answer)?;
        }

        if !request.options.execute {
            if request.options.verbose {
                self.sink.answer(&format!("{prompt}{answer}"));
            } else {
                self.sink.answer(&answer);
            }
            return Ok(QueryOutcome {
                subject,
                prompt,
                answer,
                execution: None,
            });
        }

        if request.options.verbose {
            self.sink.info(&prompt);
        }
        let confirmer =
            ExecutionConfirmer::new(self.interaction, self.runner, self.sink, &markers);
        let command = confirmer.review(&answer)?;
        let outcome = confirmer.execute(&command).await?;
        confirmer.persist(self.store, &subject, &outcome)?;
        Ok(QueryOutcome {
            subject,
            prompt,
            answer: command,
            execution: Some(outcome),
        })
    }

    fn save_exchange(
        &self,
        subject: &Subject,
        markers: &TurnMarkers,
        enquiry: &str,
        answer: &str,
    ) -> Result<(), QueryError> {
        self.store.append(subject, enquiry)?;
        self.store.append(subject, &markers.ai_turn(answer))?;
        Ok(())
    }
}
