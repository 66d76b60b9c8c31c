//! Terminal-facing surfaces: output rendering and user prompts.

pub mod interact;
pub mod render;

pub use interact::{edit_in_editor, Interaction, TerminalInteraction};
pub use render::{RenderSink, Renderer};
