//! Subcommand handlers other than `query`.

/// `credentials` command.
pub(crate) mod credentials;
/// `show` command.
pub(crate) mod show;
/// `delete` and `edit` commands.
pub(crate) mod transcript;
