//! Rendering contract and the default terminal renderer.
//!
//! Answers and command output go to stdout; everything diagnostic goes to
//! stderr so piping `askgpt query` captures only the answer.

use crossterm::style::{Color, Stylize};

/// Injectable rendering interface used by orchestration code.
///
/// `Renderer` is the default terminal implementation; tests substitute a
/// recording sink without coupling to stderr output.
pub trait RenderSink: Send + Sync {
    /// Render the AI answer (stdout).
    fn answer(&self, content: &str);
    /// Render captured command output (stdout).
    fn command_output(&self, content: &str);
    /// Render plain informational text (stdout).
    fn info(&self, text: &str);
    /// Render secondary detail text (stderr).
    fn detail(&self, text: &str);
    /// Render a warning line (stderr).
    fn warn(&self, msg: &str);
    /// Render an error line (stderr).
    fn error(&self, msg: &str);
}

/// Terminal renderer with optional color.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }
}

impl RenderSink for Renderer {
    fn answer(&self, content: &str) {
        println!("{content}");
    }

    fn command_output(&self, content: &str) {
        if self.color {
            println!("{}", content.trim_end_matches('\n').with(Color::Cyan));
        } else {
            println!("{}", content.trim_end_matches('\n'));
        }
    }

    fn info(&self, text: &str) {
        println!("{text}");
    }

    fn detail(&self, text: &str) {
        if self.color {
            eprintln!("{}", text.with(Color::DarkGrey));
        } else {
            eprintln!("{text}");
        }
    }

    fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", "warning:".with(Color::Yellow).bold());
        } else {
            eprintln!("warning: {msg}");
        }
    }

    fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{}", msg.with(Color::Red));
        } else {
            eprintln!("{msg}");
        }
    }
}
