//! Interactive mode and the snapshot carried across list replacements.

/// What keystrokes currently do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and key bindings
    #[default]
    Normal,
    /// Printable keys edit the query; navigation keys still move the cursor
    Search,
    /// Full-screen help; any key returns to normal mode
    Help,
}

/// Interactive position captured before a reload and reapplied to the new list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub search_mode: bool,
    pub query: String,
    pub label: String,
    pub cursor: usize,
    pub start: usize,
    pub list_size: usize,
}
