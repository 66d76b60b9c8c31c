//! Startup disclaimer banner.

use askgpt::ui::RenderSink;

pub(crate) const DISCLAIMER: &str = "\
askgpt sends your questions and saved conversations to a third-party
completion service. Answers are machine-generated and may be wrong; review
any suggested command before running it. Hide this notice with
`show_disclaimer = false` in the [display] section of askgpt.toml.";

/// Print the disclaimer unless the config disabled it.
///
/// The `disclaimer` subcommand prints it itself, so it is skipped here.
pub(crate) fn render_disclaimer(renderer: &dyn RenderSink, show: bool, is_disclaimer_command: bool) {
    if show && !is_disclaimer_command {
        renderer.detail(DISCLAIMER);
    }
}
