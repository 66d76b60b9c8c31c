//! Terminal questions and `$EDITOR` round-trips.
//!
//! The execution flow talks to the user only through [`Interaction`], so
//! tests can script answers instead of reading stdin.

use crate::error::ExecError;
use rand::Rng;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::Command;

/// User-facing prompts needed by the execution flow.
pub trait Interaction: Send + Sync {
    /// Ask `question` and return one of `choices` (lowercase).
    ///
    /// An empty answer selects `default`.
    fn choose(&self, question: &str, choices: &[char], default: char) -> Result<char, ExecError>;

    /// Let the user edit `text`. `None` means "keep the original".
    fn edit(&self, text: &str) -> Result<Option<String>, ExecError>;

    /// Yes/no question built on [`Interaction::choose`].
    fn confirm(&self, question: &str, default: bool) -> Result<bool, ExecError> {
        let default = if default { 'y' } else { 'n' };
        Ok(self.choose(question, &['y', 'n'], default)? == 'y')
    }
}

/// Reads answers from stdin and edits through the user's editor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalInteraction;

impl Interaction for TerminalInteraction {
    fn choose(&self, question: &str, choices: &[char], default: char) -> Result<char, ExecError> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        ask_choice(&mut input, &mut std::io::stderr(), question, choices, default)
    }

    fn edit(&self, text: &str) -> Result<Option<String>, ExecError> {
        edit_in_editor(text)
    }
}

/// Prompt until the answer is one of `choices`; EOF yields `default`.
pub(crate) fn ask_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    choices: &[char],
    default: char,
) -> Result<char, ExecError> {
    let legend = choice_legend(choices, default);
    loop {
        write!(output, "{question} {legend}: ").map_err(ExecError::Input)?;
        output.flush().map_err(ExecError::Input)?;
        let mut line = String::new();
        if input.read_line(&mut line).map_err(ExecError::Input)? == 0 {
            writeln!(output).map_err(ExecError::Input)?;
            return Ok(default);
        }
        let answer = line.trim().to_ascii_lowercase();
        if answer.is_empty() {
            return Ok(default);
        }
        let mut chars = answer.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if choices.contains(&c) {
                return Ok(c);
            }
        }
        if let Some(word) = ["yes", "no"].iter().find(|w| **w == answer) {
            let c = word.chars().next().unwrap_or(default);
            if choices.contains(&c) {
                return Ok(c);
            }
        }
        writeln!(output, "Error: '{}' is not one of {legend}.", line.trim())
            .map_err(ExecError::Input)?;
    }
}

/// `[Y/e/n]`-style legend with the default upper-cased.
fn choice_legend(choices: &[char], default: char) -> String {
    let parts: Vec<String> = choices
        .iter()
        .map(|c| {
            if *c == default {
                c.to_ascii_uppercase().to_string()
            } else {
                c.to_string()
            }
        })
        .collect();
    format!("[{}]", parts.join("/"))
}

/// Editor command from `$VISUAL`, then `$EDITOR`, else `vi`.
fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Open `text` in the user's editor and return the saved result.
///
/// Returns `None` when the file was left unchanged. An emptied file comes
/// back as `Some("")`; callers decide what blank means for them.
pub fn edit_in_editor(text: &str) -> Result<Option<String>, ExecError> {
    let path = scratch_path();
    std::fs::write(&path, text).map_err(|e| ExecError::Editor(e.to_string()))?;
    let editor = editor_command();
    tracing::debug!(%editor, path = %path.display(), "opening editor");

    // The editor string may carry flags (`code -w`); the path travels as $1.
    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{editor} \"$1\""))
        .arg("askgpt-edit")
        .arg(&path)
        .status();
    let result = match status {
        Ok(status) if status.success() => std::fs::read_to_string(&path)
            .map_err(|e| ExecError::Editor(e.to_string())),
        Ok(status) => Err(ExecError::Editor(format!("`{editor}` exited with {status}"))),
        Err(e) => Err(ExecError::Editor(format!("failed to start `{editor}`: {e}"))),
    };
    let _ = std::fs::remove_file(&path);

    Ok(changed_text(text, result?))
}

fn changed_text(original: &str, edited: String) -> Option<String> {
    (edited != original).then_some(edited)
}

fn scratch_path() -> PathBuf {
    let suffix: u64 = rand::thread_rng().gen();
    std::env::temp_dir().join(format!("askgpt-edit-{suffix:016x}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, choices: &[char], default: char) -> (char, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let c = ask_choice(&mut reader, &mut out, "Execute command?", choices, default).unwrap();
        (c, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_answer_takes_default() {
        let (c, out) = ask("\n", &['y', 'n'], 'y');
        assert_eq!(c, 'y');
        assert!(out.starts_with("Execute command? [Y/n]: "), "got: {out}");
    }

    #[test]
    fn eof_takes_default() {
        let (c, _) = ask("", &['y', 'e', 'n'], 'y');
        assert_eq!(c, 'y');
    }

    #[test]
    fn invalid_answer_reprompts() {
        let (c, out) = ask("maybe\nE\n", &['y', 'e', 'n'], 'y');
        assert_eq!(c, 'e');
        assert!(out.contains("'maybe' is not one of [Y/e/n]"), "got: {out}");
        assert_eq!(out.matches("Execute command?").count(), 2);
    }

    #[test]
    fn full_words_are_accepted() {
        assert_eq!(ask("No\n", &['y', 'n'], 'y').0, 'n');
        assert_eq!(ask("yes\n", &['y', 'n'], 'n').0, 'y');
    }

    #[test]
    fn only_unchanged_text_counts_as_no_edit() {
        assert_eq!(changed_text("ls\n", "ls\n".into()), None);
        assert_eq!(changed_text("ls\n", "ls -la\n".into()), Some("ls -la\n".into()));
        assert_eq!(changed_text("Human: hi\n", String::new()), Some(String::new()));
    }

    #[test]
    fn legend_marks_default() {
        assert_eq!(choice_legend(&['y', 'n'], 'n'), "[y/N]");
        assert_eq!(choice_legend(&['y', 'e', 'n'], 'y'), "[Y/e/n]");
    }
}
