//! `show config|subjects|scenarios|models|<subject>`.

use askgpt::api::ApiClient;
use askgpt::config::{render_config_toml, Config};
use askgpt::transcript::{Subject, TranscriptStore};
use askgpt::ui::RenderSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShowTarget {
    Config,
    Subjects,
    Scenarios,
    Models,
    Transcript(String),
}

impl ShowTarget {
    pub(crate) fn parse(what: &str) -> Self {
        match what.trim() {
            "config" => Self::Config,
            "subjects" => Self::Subjects,
            "scenarios" => Self::Scenarios,
            "models" => Self::Models,
            other => Self::Transcript(other.to_string()),
        }
    }
}

/// Handle `show`. Returns the process exit code.
pub(crate) async fn handle_show(renderer: &dyn RenderSink, config: &Config, what: &str) -> i32 {
    let store = TranscriptStore::from_config(config);
    match ShowTarget::parse(what) {
        ShowTarget::Config => match render_config_toml(config) {
            Ok(text) => {
                renderer.detail("Current configuration:");
                renderer.info(text.trim_end());
                0
            }
            Err(e) => {
                renderer.error(&format!("Error: {e}"));
                1
            }
        },
        ShowTarget::Subjects => match store.list() {
            Ok(subjects) => {
                renderer.detail("Current subjects:");
                for subject in subjects {
                    renderer.info(&subject);
                }
                0
            }
            Err(e) => {
                renderer.error(&format!("Error: {e}"));
                1
            }
        },
        ShowTarget::Scenarios => {
            renderer.detail("Current scenarios:");
            for name in config.scenarios.keys() {
                renderer.info(name);
            }
            0
        }
        ShowTarget::Models => match ApiClient::new(&config.api).list_models().await {
            Ok(models) => {
                renderer.detail("Current models:");
                for model in models {
                    renderer.info(&model);
                }
                0
            }
            Err(e) => {
                renderer.error(&format!("Error: failed to list models: {e}"));
                1
            }
        },
        ShowTarget::Transcript(name) => show_transcript(renderer, &store, &name),
    }
}

fn show_transcript(renderer: &dyn RenderSink, store: &TranscriptStore, name: &str) -> i32 {
    let subject = match Subject::parse(name) {
        Ok(subject) => subject,
        Err(_) => {
            renderer.error("Please specify what to show: config, subjects, scenarios, models, or a subject name");
            return 2;
        }
    };
    if !store.exists(&subject) {
        renderer.error("Subject not found");
        return 1;
    }
    match store.read(&subject) {
        Ok(text) => {
            renderer.info(text.trim_end_matches('\n'));
            0
        }
        Err(e) => {
            renderer.error(&format!("Error: {e}"));
            1
        }
    }
}
