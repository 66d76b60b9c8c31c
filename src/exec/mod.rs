//! Confirm/edit/execute loop for answers used as shell commands.
//!
//! Flow after a successful completion:
//! 1. show the answer and offer an edit,
//! 2. ask to execute (default yes),
//! 3. run it through the [`ProcessRunner`],
//! 4. show the output and ask to save, edit-then-save, or discard,
//! 5. append kept output to the transcript as a user turn.
//!
//! A non-zero exit status is reported but does not change the flow: the
//! output is still offered for saving.

mod process;

pub use process::{ExecOutput, ProcessRunner, ShellRunner};

use crate::error::{ExecError, StoreError};
use crate::prompt::TurnMarkers;
use crate::transcript::{Subject, TranscriptStore};
use crate::ui::{Interaction, RenderSink};

/// What happened to a command after the user saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The user chose not to run it.
    Declined,
    /// It ran; the user discarded the output.
    Discarded(ExecOutput),
    /// It ran; `text` (possibly edited) should be saved.
    Save { text: String, run: ExecOutput },
}

pub struct ExecutionConfirmer<'a> {
    interaction: &'a dyn Interaction,
    runner: &'a dyn ProcessRunner,
    sink: &'a dyn RenderSink,
    markers: &'a TurnMarkers,
}

impl<'a> ExecutionConfirmer<'a> {
    pub fn new(
        interaction: &'a dyn Interaction,
        runner: &'a dyn ProcessRunner,
        sink: &'a dyn RenderSink,
        markers: &'a TurnMarkers,
    ) -> Self {
        Self {
            interaction,
            runner,
            sink,
            markers,
        }
    }

    /// Show `answer` and let the user edit it. Without an edit the answer
    /// stands unchanged.
    pub fn review(&self, answer: &str) -> Result<String, ExecError> {
        self.sink.answer(answer);
        if !self.interaction.confirm("edit command?", false)? {
            return Ok(answer.to_string());
        }
        match non_blank(self.interaction.edit(answer)?) {
            Some(edited) => {
                tracing::debug!("command edited before execution");
                Ok(edited)
            }
            None => Ok(answer.to_string()),
        }
    }

    /// Confirm, run, and triage the output of `command`.
    pub async fn execute(&self, command: &str) -> Result<ExecutionOutcome, ExecError> {
        self.sink.detail(command);
        if !self.interaction.confirm("Execute command?", true)? {
            return Ok(ExecutionOutcome::Declined);
        }

        let run = self.runner.run(command).await?;
        self.sink.command_output(&run.output);
        match run.exit_code {
            Some(0) => {}
            Some(code) => self.sink.warn(&format!("command exited with status {code}")),
            None => self.sink.warn("command was terminated by a signal"),
        }

        match self.interaction.choose("save output?", &['y', 'e', 'n'], 'y')? {
            'n' => Ok(ExecutionOutcome::Discarded(run)),
            'e' => {
                let text = non_blank(self.interaction.edit(&run.output)?)
                    .unwrap_or_else(|| run.output.clone());
                Ok(ExecutionOutcome::Save { text, run })
            }
            _ => Ok(ExecutionOutcome::Save {
                text: run.output.clone(),
                run,
            }),
        }
    }

    /// Append saved output as a user turn. Returns whether anything was written.
    pub fn persist(
        &self,
        store: &TranscriptStore,
        subject: &Subject,
        outcome: &ExecutionOutcome,
    ) -> Result<bool, StoreError> {
        let ExecutionOutcome::Save { text, .. } = outcome else {
            return Ok(false);
        };
        if self.markers.appears_in(text) {
            self.sink
                .warn("command output contains a turn marker; the transcript may replay oddly");
        }
        store.append(subject, &self.markers.user_turn(text))?;
        Ok(true)
    }
}

/// An emptied edit means "keep the original" for commands and output.
fn non_blank(edited: Option<String>) -> Option<String> {
    edited.filter(|text| !text.trim().is_empty())
}
