//! Binary-local application orchestration helpers.
//!
//! `main.rs` keeps process setup (logging, config, runtime) while this module
//! hosts subcommand dispatch and the per-command handlers.

pub(crate) mod commands;
pub(crate) mod entry;
pub(crate) mod startup;
