//! Pure functions turning list and prompt state into styled lines.

use crate::render::theme::Theme;
use ratatui::text::{Line, Span};
use std::collections::BTreeMap;

const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";
const CARET: &str = "█";
const HELP_HINT: &str = "press any key to return.";
const NOT_FOUND: &str = "Not found.";

/// Render one item row.
///
/// Characters at `matches` offsets are emphasised whether or not the row is selected;
/// offsets past the end of `text` are ignored.
pub fn item_line(text: &str, matches: &[usize], selected: bool, theme: &Theme) -> Line<'static> {
    let marker = if selected {
        Span::styled(SELECTED_MARKER, theme.marker)
    } else {
        Span::styled(UNSELECTED_MARKER, theme.text)
    };

    let mut spans = vec![marker];
    if matches.is_empty() {
        spans.push(Span::styled(text.to_string(), theme.text));
        return Line::from(spans);
    }

    let mut run = String::new();
    let mut run_matched = false;
    for (offset, ch) in text.chars().enumerate() {
        let matched = matches.contains(&offset);
        if matched != run_matched && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_matched, theme));
        }
        run_matched = matched;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_matched, theme));
    }

    Line::from(spans)
}

fn styled_run(content: String, matched: bool, theme: &Theme) -> Span<'static> {
    let style = if matched { theme.matched } else { theme.text };
    Span::styled(content, style)
}

/// Render the search bar above the list.
///
/// While typing it shows the label, the editable query and a caret; otherwise the label
/// and, if a filter is still applied, the active query.
pub fn search_bar(label: &str, searching: bool, query: &str, theme: &Theme) -> Line<'static> {
    if searching {
        return Line::from(vec![
            Span::styled("Search ", theme.label),
            Span::styled(format!("{label} "), theme.label),
            Span::styled(query.to_string(), theme.query),
            Span::styled(CARET, theme.caret),
        ]);
    }

    let mut spans = vec![Span::styled(label.to_string(), theme.label)];
    if !query.is_empty() {
        spans.push(Span::styled(format!(" /{query}"), theme.query));
    }
    Line::from(spans)
}

/// Render the help overlay: one line per control in key order, a blank line and the
/// dismissal hint.
pub fn help_lines(controls: &BTreeMap<String, String>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = controls
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{key}: "), theme.help_key),
                Span::styled(description.clone(), theme.help_description),
            ])
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(HELP_HINT, theme.hint)));
    lines
}

/// Shown in place of the info panel when the scope is empty.
pub fn not_found(theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(NOT_FOUND, theme.not_found))
}

/// Plain text of a rendered line.
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
