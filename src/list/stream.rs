//! Stream-backed list populated in the background.
//!
//! A spawned task drains the producer stream into a shared, append-only catalog. Until
//! the first search the scope is the first `size` items so that a screen can be drawn
//! right away; searches always run over every item received so far.

use super::catalog::{Catalog, Scope};
use super::viewport::Viewport;
use super::{Item, Listing, Window};
use crate::error::{PromptError, Result};
use futures::{Stream, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Number of drained items between two [`Progress::Loaded`] notifications.
pub const PROGRESS_INTERVAL: usize = 200;

/// Population progress of a [`StreamList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Another batch of [`PROGRESS_INTERVAL`] items arrived; carries the running total
    Loaded(usize),
    /// The stream closed after delivering this many items
    Done(usize),
}

/// A list whose items arrive from a live stream.
pub struct StreamList<T> {
    shared: Arc<RwLock<Catalog<T>>>,
    viewport: Viewport,
    progress: Option<UnboundedReceiver<Progress>>,
    task: JoinHandle<()>,
}

impl<T: Item> StreamList<T> {
    /// Start draining `source` into a new list showing `size` rows at once.
    ///
    /// Must be called from within a tokio runtime, which drives the population task.
    pub fn new<S>(source: S, size: usize) -> Result<Self>
    where
        S: Stream<Item = T> + Send + 'static,
    {
        if size < 1 {
            return Err(PromptError::configuration(format!(
                "list size {size} must be greater than 0"
            )));
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|err| {
            PromptError::configuration(format!("item stream cannot be driven: {err}"))
        })?;

        let shared = Arc::new(RwLock::new(Catalog::new(Scope::Prefix(size))));
        let (tx, rx) = mpsc::unbounded_channel();
        let task = runtime.spawn(populate(source, Arc::clone(&shared), tx));

        Ok(Self {
            shared,
            viewport: Viewport::new(size),
            progress: Some(rx),
            task,
        })
    }

    /// Number of items received so far.
    pub fn item_count(&self) -> usize {
        self.shared.read().item_count()
    }

    pub fn query(&self) -> String {
        self.shared.read().query().to_string()
    }
}

async fn populate<T, S>(source: S, shared: Arc<RwLock<Catalog<T>>>, tx: UnboundedSender<Progress>)
where
    T: Item,
    S: Stream<Item = T> + Send + 'static,
{
    let mut source = Box::pin(source);
    let mut drained = 0usize;

    while let Some(item) = source.next().await {
        shared.write().push(item);
        drained += 1;
        if drained % PROGRESS_INTERVAL == 0 {
            log::debug!("stream list loaded {drained} items");
            let _ = tx.send(Progress::Loaded(drained));
        }
    }

    log::debug!("stream list complete with {drained} items");
    let _ = tx.send(Progress::Done(drained));
}

impl<T> Drop for StreamList<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T: Item> Listing<T> for StreamList<T> {
    fn prev(&mut self) {
        self.viewport.prev();
    }

    fn next(&mut self) {
        let len = self.shared.read().scope_len();
        self.viewport.next(len);
    }

    fn page_up(&mut self) {
        self.viewport.page_up();
    }

    fn page_down(&mut self) {
        let len = self.shared.read().scope_len();
        self.viewport.page_down(len);
    }

    fn can_page_up(&self) -> bool {
        self.viewport.can_page_up()
    }

    fn can_page_down(&self) -> bool {
        self.viewport.can_page_down(self.shared.read().scope_len())
    }

    fn set_cursor(&mut self, index: usize) {
        let len = self.shared.read().scope_len();
        self.viewport.set_cursor(index, len);
    }

    fn set_start(&mut self, index: usize) {
        self.viewport.set_start(index);
    }

    fn search(&mut self, query: &str) {
        self.viewport.reset();
        self.shared.write().search(query);
    }

    fn cancel_search(&mut self) {
        self.viewport.reset();
        self.shared.write().cancel_search();
    }

    fn items(&self) -> Window<T> {
        self.shared.read().window(&self.viewport)
    }

    fn index(&self) -> Option<usize> {
        self.shared.read().resolve(self.viewport.cursor())
    }

    fn scope(&self) -> Vec<Arc<T>> {
        self.shared.read().scope_items()
    }

    fn cursor(&self) -> usize {
        self.viewport.cursor()
    }

    fn start(&self) -> usize {
        self.viewport.start()
    }

    fn size(&self) -> usize {
        self.viewport.size()
    }

    fn len(&self) -> usize {
        self.shared.read().scope_len()
    }

    fn take_progress(&mut self) -> Option<UnboundedReceiver<Progress>> {
        self.progress.take()
    }
}
