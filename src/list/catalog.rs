//! Item storage and scope bookkeeping shared by both list flavours.

use super::fuzzy;
use super::viewport::Viewport;
use super::{Entry, Item, Window};
use std::collections::HashMap;
use std::sync::Arc;

/// Which items are currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The first `n` items, frozen before the first search of a stream-backed list
    Prefix(usize),
    /// Every item in population order
    All,
    /// Ranked positions into the item vector
    Ranked(Vec<usize>),
}

/// Append-only item store with the search state derived from it.
#[derive(Debug)]
pub struct Catalog<T> {
    items: Vec<Arc<T>>,
    texts: Vec<String>,
    scope: Scope,
    matches: HashMap<usize, Vec<usize>>,
    query: String,
}

impl<T: Item> Catalog<T> {
    pub fn new(scope: Scope) -> Self {
        Self {
            items: Vec::new(),
            texts: Vec::new(),
            scope,
            matches: HashMap::new(),
            query: String::new(),
        }
    }

    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut catalog = Self::new(Scope::All);
        for item in items {
            catalog.push(item);
        }
        catalog
    }

    pub fn push(&mut self, item: T) {
        self.texts.push(item.text());
        self.items.push(Arc::new(item));
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn scope_kind(&self) -> &Scope {
        &self.scope
    }

    pub fn matches(&self) -> &HashMap<usize, Vec<usize>> {
        &self.matches
    }

    pub fn scope_len(&self) -> usize {
        match &self.scope {
            Scope::Prefix(n) => (*n).min(self.items.len()),
            Scope::All => self.items.len(),
            Scope::Ranked(ranked) => ranked.len(),
        }
    }

    /// Map a scope position to an item position.
    pub fn resolve(&self, position: usize) -> Option<usize> {
        if position >= self.scope_len() {
            return None;
        }
        match &self.scope {
            Scope::Prefix(_) | Scope::All => Some(position),
            Scope::Ranked(ranked) => ranked.get(position).copied(),
        }
    }

    pub fn search(&mut self, query: &str) {
        let query = query.trim();
        self.query = query.to_string();
        self.matches.clear();

        if query.is_empty() {
            self.scope = Scope::All;
            return;
        }

        let ranked = fuzzy::rank(query, self.texts.iter().map(String::as_str));
        let mut positions = Vec::with_capacity(ranked.len());
        for hit in ranked {
            positions.push(hit.index);
            self.matches.insert(hit.index, hit.offsets);
        }
        self.scope = Scope::Ranked(positions);
    }

    pub fn cancel_search(&mut self) {
        self.scope = Scope::All;
        self.matches.clear();
        self.query.clear();
    }

    pub fn window(&self, viewport: &Viewport) -> Window<T> {
        let len = self.scope_len();
        let entries = viewport
            .window(len)
            .filter_map(|position| self.resolve(position))
            .map(|index| Entry {
                item: Arc::clone(&self.items[index]),
                matches: self.matches.get(&index).cloned().unwrap_or_default(),
            })
            .collect();

        Window {
            entries,
            active: viewport.active(len),
        }
    }

    pub fn scope_items(&self) -> Vec<Arc<T>> {
        (0..self.scope_len())
            .filter_map(|position| self.resolve(position))
            .map(|index| Arc::clone(&self.items[index]))
            .collect()
    }
}
