//! Scrollable, fuzzy-searchable item lists.
//!
//! Two flavours share one contract, [`Listing`]:
//!
//! - [`List`] - a fixed collection known up front
//! - [`StreamList`] - populated incrementally from a live stream while the prompt is
//!   already on screen
//!
//! Both keep their items in population order and expose a *scope*: the items currently
//! shown, either every item or the ranked result of the last search.

pub mod catalog;
pub mod fuzzy;
pub mod memory;
pub mod stream;
pub mod viewport;

pub use fuzzy::FuzzyMatch;
pub use memory::List;
pub use stream::{Progress, StreamList, PROGRESS_INTERVAL};
pub use viewport::Viewport;

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Anything a prompt can list: it must render as text and be shareable with the
/// population task.
pub trait Item: Send + Sync + 'static {
    /// Text that is displayed and searched.
    fn text(&self) -> String;
}

impl<T> Item for T
where
    T: fmt::Display + Send + Sync + 'static,
{
    fn text(&self) -> String {
        self.to_string()
    }
}

/// One visible row together with the character offsets matched by the active query.
#[derive(Debug)]
pub struct Entry<T> {
    pub item: Arc<T>,
    pub matches: Vec<usize>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            item: Arc::clone(&self.item),
            matches: self.matches.clone(),
        }
    }
}

/// The rows currently on screen and the position of the cursor among them.
#[derive(Debug)]
pub struct Window<T> {
    pub entries: Vec<Entry<T>>,
    /// `None` when the scope is empty
    pub active: Option<usize>,
}

impl<T> Window<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The item under the cursor.
    pub fn active_item(&self) -> Option<&Arc<T>> {
        self.active.and_then(|idx| self.entries.get(idx)).map(|e| &e.item)
    }
}

/// Common contract of [`List`] and [`StreamList`].
///
/// Cursor and start are positions in the scope. Searching and cancelling always return
/// focus to the top of the scope.
pub trait Listing<T: Item>: Send {
    fn prev(&mut self);
    fn next(&mut self);
    fn page_up(&mut self);
    fn page_down(&mut self);
    fn can_page_up(&self) -> bool;
    fn can_page_down(&self) -> bool;

    /// Restore a cursor position; out-of-range values are clamped.
    fn set_cursor(&mut self, index: usize);
    /// Restore a scroll offset; out-of-range values are clamped.
    fn set_start(&mut self, index: usize);

    /// Filter and rank the items by `query`. Blank queries show every item.
    fn search(&mut self, query: &str);
    fn cancel_search(&mut self);

    /// Up to `size()` rows starting at `start()`.
    fn items(&self) -> Window<T>;

    /// Position of the active item among all items, ignoring any filter.
    fn index(&self) -> Option<usize>;

    /// Every item in the scope, in display order.
    fn scope(&self) -> Vec<Arc<T>>;

    fn cursor(&self) -> usize;
    fn start(&self) -> usize;
    fn size(&self) -> usize;

    /// Length of the scope.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn selection(&self) -> Option<Arc<T>> {
        self.items().active_item().cloned()
    }

    /// Population progress for lists that fill up in the background. Can be taken once.
    fn take_progress(&mut self) -> Option<UnboundedReceiver<Progress>> {
        None
    }
}
