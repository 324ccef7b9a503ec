//! Color theme and styling definitions using ratatui colors

use ratatui::style::{Color, Modifier, Style};

/// Styles used by the prompt renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Marker in front of the selected row
    pub marker: Style,

    /// Plain item text
    pub text: Style,

    /// Characters matched by the active query
    pub matched: Style,

    /// List label and search prompt text
    pub label: Style,

    /// Query text in the search bar
    pub query: Style,

    /// Caret shown while typing a query
    pub caret: Style,

    /// Key column of the help overlay
    pub help_key: Style,

    /// Description column of the help overlay
    pub help_description: Style,

    /// Dismissal hint under the help overlay
    pub hint: Style,

    /// Message shown when no item matches
    pub not_found: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            marker: Style::default().fg(Color::Cyan),
            text: Style::default(),
            matched: Style::default().add_modifier(Modifier::UNDERLINED),
            label: Style::default().add_modifier(Modifier::DIM),
            query: Style::default().fg(Color::White),
            caret: Style::default().add_modifier(Modifier::DIM | Modifier::RAPID_BLINK),
            help_key: Style::default().add_modifier(Modifier::DIM),
            help_description: Style::default().fg(Color::Yellow),
            hint: Style::default().add_modifier(Modifier::DIM),
            not_found: Style::default().fg(Color::Red),
        }
    }
}

impl Theme {
    /// Theme for terminals without color support; keeps only text attributes
    pub fn monochrome() -> Self {
        Self {
            marker: Style::default().add_modifier(Modifier::BOLD),
            query: Style::default(),
            help_description: Style::default(),
            not_found: Style::default().add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}
