//! `delete` and `edit` handlers for stored transcripts.

use askgpt::transcript::{Subject, TranscriptStore};
use askgpt::ui::{Interaction, RenderSink};

/// Handle `delete --subject S` or `delete --all`. Returns the exit code.
pub(crate) fn handle_delete(
    renderer: &dyn RenderSink,
    store: &TranscriptStore,
    subject: Option<&str>,
    all: bool,
) -> i32 {
    if all {
        return match store.delete_all() {
            Ok(count) => {
                renderer.detail(&format!("deleted {count} conversation(s)"));
                0
            }
            Err(e) => {
                renderer.error(&format!("Error: {e}"));
                1
            }
        };
    }

    let Some(subject) = subject.and_then(|raw| Subject::parse(raw).ok()) else {
        renderer.error("No subject provided");
        return 2;
    };
    match store.delete(&subject) {
        Ok(true) => {
            renderer.detail(&format!("deleted conversation \"{subject}\""));
            0
        }
        Ok(false) => {
            renderer.error("No chat history with that subject");
            1
        }
        Err(e) => {
            renderer.error(&format!("Error: {e}"));
            1
        }
    }
}

/// Handle `edit --subject S`: open the transcript in the editor and replace
/// it with the saved result. Returns the exit code.
pub(crate) fn handle_edit(
    renderer: &dyn RenderSink,
    store: &TranscriptStore,
    interaction: &dyn Interaction,
    subject: &str,
) -> i32 {
    let subject = match Subject::parse(subject) {
        Ok(subject) => subject,
        Err(_) => {
            renderer.error("No subject provided");
            return 2;
        }
    };
    let current = match store.read(&subject) {
        Ok(text) => text,
        Err(e) => {
            renderer.error(&format!("Error: {e}"));
            return 1;
        }
    };
    match interaction.edit(&current) {
        Ok(Some(edited)) => match store.replace(&subject, &edited) {
            Ok(()) => {
                renderer.detail(&format!("saved conversation \"{subject}\""));
                0
            }
            Err(e) => {
                renderer.error(&format!("Error: {e}"));
                1
            }
        },
        Ok(None) => {
            renderer.detail("no changes");
            0
        }
        Err(e) => {
            renderer.error(&format!("Error: {e}"));
            1
        }
    }
}
