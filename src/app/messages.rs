//! Handler hooks and the requests they can send back to the prompt loop.
//!
//! Selection, binding, key and reload hooks are called synchronously from the loop. No
//! key is read and nothing is redrawn until the hook returns, so a hook may run an
//! external command that takes over the terminal. On a multi-threaded tokio runtime the
//! call is wrapped in `block_in_place` and other tasks keep running; on a current-thread
//! runtime they wait for the hook.

use crate::error::{PromptError, Result};
use crate::input::Key;
use ratatui::text::Line;
use std::sync::Arc;
use tokio::sync::Notify;

/// Called with the active item when Enter is pressed.
pub type SelectionHandler<T> = Box<dyn FnMut(&T, &mut Control) -> anyhow::Result<()> + Send>;

/// Called with the active item when its bound key is pressed.
pub type BindingHandler<T> = Box<dyn FnMut(&T, &mut Control) -> anyhow::Result<()> + Send>;

/// Consulted for keys in normal mode before letter bindings.
pub type KeyHandler<T> =
    Box<dyn FnMut(Key, Option<&T>, &mut Control) -> anyhow::Result<KeyOutcome> + Send>;

/// Renders one row: item, matched character offsets, whether it is selected.
pub type ItemRenderer<T> = Box<dyn Fn(&T, &[usize], bool) -> Line<'static> + Send>;

/// Renders the detail panel under the list for the active item.
pub type InfoRenderer<T> = Box<dyn Fn(&T) -> Vec<Line<'static>> + Send>;

/// Fetches a fresh set of items after a handler changed the outside world.
pub type ReloadHandler<T> = Box<dyn FnMut() -> anyhow::Result<Vec<T>> + Send>;

/// Whether a key handler override consumed the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// Requests a handler makes of the prompt; applied once the handler returns.
#[derive(Debug, Default)]
pub struct Control {
    stop: bool,
    reload: bool,
    exit_message: Option<Vec<Line<'static>>>,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the prompt loop after this key.
    pub fn stop(&mut self) {
        self.stop = true;
    }

    /// Rebuild the list from the reload hook, keeping cursor, scroll and query.
    pub fn reload(&mut self) {
        self.reload = true;
    }

    /// Lines printed once the terminal has been restored.
    pub fn set_exit_message(&mut self, lines: Vec<Line<'static>>) {
        self.exit_message = Some(lines);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop
    }

    pub fn reload_requested(&self) -> bool {
        self.reload
    }

    pub(crate) fn take_exit_message(&mut self) -> Option<Vec<Line<'static>>> {
        self.exit_message.take()
    }
}

/// Unwrap a handler's selection, failing with [`PromptError::SelectionUnavailable`].
pub fn selected<T>(selection: Option<&T>) -> Result<&T> {
    selection.ok_or(PromptError::SelectionUnavailable)
}

/// A key bound to a handler, listed in the help overlay.
pub struct KeyBinding<T> {
    pub key: char,
    pub display: String,
    pub description: String,
    pub handler: BindingHandler<T>,
}

/// Stops a running prompt from outside its handlers.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    notify: Arc<Notify>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop; a stop issued before the loop starts is kept until it runs.
    pub fn stop(&self) {
        self.notify.notify_one();
    }

    pub(crate) fn notifier(&self) -> Arc<Notify> {
        Arc::clone(&self.notify)
    }
}
