//! The interactive prompt.
//!
//! [`Prompt`] owns a list, the current [`Mode`] and the pluggable handlers. Running it
//! starts the input reader thread and the render/dispatch loop (see [`runtime`]).

pub mod messages;
pub mod runtime;
pub mod state;

pub use messages::{
    selected, BindingHandler, Control, InfoRenderer, ItemRenderer, KeyBinding, KeyHandler,
    KeyOutcome, ReloadHandler, SelectionHandler, StopHandle,
};
pub use state::{Mode, PromptState};

use crate::config::Options;
use crate::error::{PromptError, Result};
use crate::input::KeySource;
use crate::list::{Item, List, Listing};
use crate::render::{self, Screen, Theme};
use parking_lot::Mutex;
use ratatui::text::Line;
use std::collections::BTreeMap;
use std::sync::Arc;

const NAVIGATION_KEYS: &str = "← ↓ ↑ →";
const NAVIGATION_VIM_KEYS: &str = "← ↓ ↑ → (h,j,k,l)";

/// An interactive, searchable list prompt.
pub struct Prompt<T: Item> {
    list: Box<dyn Listing<T>>,
    options: Options,
    theme: Theme,
    label: String,
    mode: Mode,
    query: String,

    bindings: Vec<KeyBinding<T>>,
    controls: BTreeMap<String, String>,

    key_handler: Option<KeyHandler<T>>,
    selection_handler: Option<SelectionHandler<T>>,
    item_renderer: ItemRenderer<T>,
    info_renderer: Option<InfoRenderer<T>>,
    reload: Option<ReloadHandler<T>>,

    empty_message: Vec<Line<'static>>,
    exit_message: Vec<Line<'static>>,

    stop: StopHandle,
    screen: Option<Arc<Mutex<Box<dyn Screen>>>>,
    keys: Option<Box<dyn KeySource>>,
}

impl<T: Item> Prompt<T> {
    /// Create a prompt titled `label` over `list`.
    pub fn new(label: impl Into<String>, options: Options, list: impl Listing<T> + 'static) -> Result<Self> {
        options.validate()?;

        let theme = if options.disable_color {
            Theme::monochrome()
        } else {
            Theme::default()
        };
        let mode = if options.start_in_search {
            Mode::Search
        } else {
            Mode::Normal
        };
        let row_theme = theme.clone();

        Ok(Self {
            list: Box::new(list),
            options,
            theme,
            label: label.into(),
            mode,
            query: String::new(),
            bindings: Vec::new(),
            controls: BTreeMap::new(),
            key_handler: None,
            selection_handler: None,
            item_renderer: Box::new(move |item: &T, matches: &[usize], selected: bool| {
                render::item_line(&item.text(), matches, selected, &row_theme)
            }),
            info_renderer: None,
            reload: None,
            empty_message: vec![Line::from("Nothing left to show.")],
            exit_message: Vec::new(),
            stop: StopHandle::new(),
            screen: None,
            keys: None,
        })
    }

    /// Override how keys are handled in normal mode before built-in letter bindings.
    pub fn with_key_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(crate::input::Key, Option<&T>, &mut Control) -> anyhow::Result<KeyOutcome>
            + Send
            + 'static,
    {
        self.key_handler = Some(Box::new(handler));
        self
    }

    /// Replace the default selection handler, which prints the item and stops.
    pub fn with_selection_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&T, &mut Control) -> anyhow::Result<()> + Send + 'static,
    {
        self.selection_handler = Some(Box::new(handler));
        self
    }

    pub fn with_item_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&T, &[usize], bool) -> Line<'static> + Send + 'static,
    {
        self.item_renderer = Box::new(renderer);
        self
    }

    /// Show extra lines about the active item below the list.
    pub fn with_info_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&T) -> Vec<Line<'static>> + Send + 'static,
    {
        self.info_renderer = Some(Box::new(renderer));
        self
    }

    /// Source of fresh items when a handler calls [`Control::reload`].
    pub fn with_reload<F>(mut self, reload: F) -> Self
    where
        F: FnMut() -> anyhow::Result<Vec<T>> + Send + 'static,
    {
        self.reload = Some(Box::new(reload));
        self
    }

    /// Message left on screen when a reload comes back empty.
    pub fn with_empty_message(mut self, lines: Vec<Line<'static>>) -> Self {
        self.empty_message = lines;
        self
    }

    /// Draw through `screen` instead of the terminal.
    pub fn with_screen(mut self, screen: impl Screen + 'static) -> Self {
        self.screen = Some(Arc::new(Mutex::new(Box::new(screen))));
        self
    }

    /// Read keys from `source` instead of the terminal.
    pub fn with_key_source(mut self, source: impl KeySource) -> Self {
        self.keys = Some(Box::new(source));
        self
    }

    /// Bind `key` to `handler`. The first binding registered for a key wins.
    pub fn add_key_binding<F>(
        &mut self,
        key: char,
        display: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) where
        F: FnMut(&T, &mut Control) -> anyhow::Result<()> + Send + 'static,
    {
        self.bindings.push(KeyBinding {
            key,
            display: display.into(),
            description: description.into(),
            handler: Box::new(handler),
        });
    }

    /// Add a help entry for a key handled by the key handler override.
    pub fn add_control(&mut self, display: impl Into<String>, description: impl Into<String>) {
        self.controls.insert(display.into(), description.into());
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn list(&self) -> &dyn Listing<T> {
        self.list.as_ref()
    }

    /// The active item.
    pub fn selection(&self) -> Result<Arc<T>> {
        self.list.selection().ok_or(PromptError::SelectionUnavailable)
    }

    pub fn set_exit_message(&mut self, lines: Vec<Line<'static>>) {
        self.exit_message = lines;
    }

    pub fn exit_message(&self) -> &[Line<'static>] {
        &self.exit_message
    }

    /// Capture the interactive position.
    pub fn state(&self) -> PromptState {
        PromptState {
            search_mode: self.mode == Mode::Search,
            query: self.query.clone(),
            label: self.label.clone(),
            cursor: self.list.cursor(),
            start: self.list.start(),
            list_size: self.list.size(),
        }
    }

    /// Swap in `list` and reapply `state`: the query is searched again before the cursor
    /// and scroll offset are restored.
    pub fn restore(&mut self, list: impl Listing<T> + 'static, state: PromptState) {
        let mut list: Box<dyn Listing<T>> = Box::new(list);
        if !state.query.trim().is_empty() {
            list.search(&state.query);
        }
        list.set_cursor(state.cursor);
        list.set_start(state.start);

        self.list = list;
        self.mode = if state.search_mode {
            Mode::Search
        } else {
            Mode::Normal
        };
        self.query = state.query;
        self.label = state.label;
    }

    /// Every control shown in the help overlay.
    pub fn controls(&self) -> BTreeMap<String, String> {
        let mut controls = self.controls.clone();
        let navigation = if self.options.vim_keys {
            NAVIGATION_VIM_KEYS
        } else {
            NAVIGATION_KEYS
        };
        controls.insert(navigation.to_string(), "navigation".to_string());
        controls.insert("/".to_string(), "toggle search".to_string());
        for binding in &self.bindings {
            controls
                .entry(binding.display.clone())
                .or_insert_with(|| binding.description.clone());
        }
        controls
    }

    /// Lines of the current frame.
    pub fn frame(&self) -> Vec<Line<'static>> {
        if self.mode == Mode::Help {
            return render::help_lines(&self.controls(), &self.theme);
        }

        let window = self.list.items();
        let mut lines = Vec::with_capacity(window.len() + 3);
        lines.push(render::search_bar(
            &self.label,
            self.mode == Mode::Search,
            &self.query,
            &self.theme,
        ));
        for (row, entry) in window.entries.iter().enumerate() {
            let selected = window.active == Some(row);
            lines.push((self.item_renderer)(&entry.item, &entry.matches, selected));
        }
        lines.push(Line::default());

        match window.active_item() {
            Some(item) => {
                if let Some(info) = &self.info_renderer {
                    lines.extend(info(item));
                }
            }
            None => lines.push(render::not_found(&self.theme)),
        }
        lines
    }

    /// Rebuild the list from the reload hook. Returns `false` when the reload came back
    /// empty and the prompt should stop.
    fn reload_list(&mut self) -> Result<bool> {
        let Some(reload) = self.reload.as_mut() else {
            log::warn!("reload requested but no reload hook is configured");
            return Ok(true);
        };

        let items = runtime::call_handler(reload).map_err(PromptError::from_handler)?;
        if items.is_empty() {
            log::debug!("reload returned no items, stopping");
            self.exit_message = self.empty_message.clone();
            return Ok(false);
        }

        let state = self.state();
        log::debug!("reloaded {} items", items.len());
        let list = List::new(items, state.list_size)?;
        self.restore(list, state);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plain_text;

    fn prompt() -> Prompt<&'static str> {
        let list = List::new(["a.txt", "b.txt", "ab.go"], 2).unwrap();
        Prompt::new("Files", Options::default(), list).unwrap()
    }

    fn text(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(plain_text).collect()
    }

    #[test]
    fn invalid_options_are_rejected() {
        let list = List::new(["a"], 1).unwrap();
        let options = Options {
            line_size: 0,
            ..Options::default()
        };
        assert!(matches!(
            Prompt::new("x", options, list),
            Err(PromptError::Configuration { .. })
        ));
    }

    #[test]
    fn frame_shows_bar_rows_and_gap() {
        let prompt = prompt();
        assert_eq!(text(&prompt.frame()), vec!["Files", "> a.txt", "  b.txt", ""]);
    }

    #[test]
    fn frame_includes_info_for_active_item() {
        let prompt = prompt().with_info_renderer(|item: &&str| vec![Line::from(format!("info {item}"))]);
        assert_eq!(
            text(&prompt.frame()),
            vec!["Files", "> a.txt", "  b.txt", "", "info a.txt"]
        );
    }

    #[test]
    fn empty_scope_shows_not_found() {
        let list = List::new(Vec::<String>::new(), 3).unwrap();
        let prompt = Prompt::new("Files", Options::default(), list).unwrap();
        assert_eq!(text(&prompt.frame()), vec!["Files", "", "Not found."]);
        assert!(matches!(
            prompt.selection(),
            Err(PromptError::SelectionUnavailable)
        ));
    }

    #[test]
    fn controls_list_builtins_and_bindings() {
        let mut prompt = prompt();
        prompt.add_key_binding('a', "a", "add all", |_: &&str, _: &mut Control| Ok(()));
        prompt.add_control("q", "quit");

        let controls = prompt.controls();
        assert_eq!(controls.get("/").map(String::as_str), Some("toggle search"));
        assert_eq!(controls.get("a").map(String::as_str), Some("add all"));
        assert_eq!(controls.get("q").map(String::as_str), Some("quit"));
        assert!(controls.contains_key(NAVIGATION_VIM_KEYS));
    }

    #[test]
    fn restore_reapplies_query_then_position() {
        let mut prompt = prompt();
        let state = PromptState {
            search_mode: true,
            query: "txt".to_string(),
            label: "Files".to_string(),
            cursor: 1,
            start: 0,
            list_size: 2,
        };
        let list = List::new(["a.txt", "b.txt", "c.txt", "ab.go"], 2).unwrap();
        prompt.restore(list, state.clone());

        assert_eq!(prompt.mode(), Mode::Search);
        assert_eq!(prompt.query(), "txt");
        assert_eq!(prompt.list().len(), 3);
        assert_eq!(prompt.list().cursor(), 1);
        assert_eq!(prompt.state(), state);
    }

    #[test]
    fn reload_without_hook_keeps_running() {
        let mut prompt = prompt();
        assert!(prompt.reload_list().unwrap());
        assert_eq!(prompt.list().len(), 3);
    }

    #[test]
    fn empty_reload_stops_with_message() {
        let mut prompt = prompt()
            .with_reload(|| Ok(Vec::new()))
            .with_empty_message(vec![Line::from("working tree clean")]);

        assert!(!prompt.reload_list().unwrap());
        assert_eq!(text(prompt.exit_message()), vec!["working tree clean"]);
    }
}
