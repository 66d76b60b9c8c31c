//! `credentials`: prompt for an API key and organization and store them.

use askgpt::config::{save_credentials, Credentials};
use askgpt::ui::RenderSink;
use std::io::BufRead;
use std::path::Path;

/// Handle `credentials`. Returns the exit code.
pub(crate) fn handle_credentials(renderer: &dyn RenderSink, config_dir: &Path) -> i32 {
    renderer.info("Please provide your API key and organization.");
    let api_key = match rpassword::prompt_password("API key: ") {
        Ok(key) => key,
        Err(e) => {
            renderer.error(&format!("Error: failed to read API key: {e}"));
            return 1;
        }
    };
    eprint!("Organization (optional): ");
    let mut organization = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut organization) {
        renderer.error(&format!("Error: failed to read organization: {e}"));
        return 1;
    }

    let Some(credentials) = credentials_from_input(&api_key, &organization) else {
        renderer.error("Error: API key must not be empty");
        return 2;
    };
    match save_credentials(config_dir, &credentials) {
        Ok(path) => {
            renderer.detail(&format!("saved credentials to {}", path.display()));
            renderer.info("askgpt is now ready to use");
            0
        }
        Err(e) => {
            renderer.error(&format!("Error: {e}"));
            1
        }
    }
}

fn credentials_from_input(api_key: &str, organization: &str) -> Option<Credentials> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return None;
    }
    let organization = organization.trim();
    Some(Credentials {
        api_key: api_key.to_string(),
        organization: (!organization.is_empty()).then(|| organization.to_string()),
    })
}
