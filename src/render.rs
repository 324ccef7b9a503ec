//! Rendering subsystem.
//!
//! - [`renderer`] - pure functions from list/prompt state to styled lines
//! - [`theme`] - the styles those functions use
//! - [`screen`] - the terminal the lines are drawn to

pub mod renderer;
pub mod screen;
pub mod theme;

pub use renderer::{help_lines, item_line, not_found, plain_text, search_bar};
pub use screen::{Screen, TerminalScreen};
pub use theme::Theme;
