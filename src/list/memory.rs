//! In-memory list over a collection known at construction time.

use super::catalog::Catalog;
use super::viewport::Viewport;
use super::{Item, Listing, Window};
use crate::error::{PromptError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// A fixed collection of items shown `size` rows at a time.
#[derive(Debug)]
pub struct List<T> {
    catalog: Catalog<T>,
    viewport: Viewport,
}

impl<T: Item> List<T> {
    /// Create a list over `items`, showing `size` rows at once.
    pub fn new(items: impl IntoIterator<Item = T>, size: usize) -> Result<Self> {
        if size < 1 {
            return Err(PromptError::configuration(format!(
                "list size {size} must be greater than 0"
            )));
        }

        Ok(Self {
            catalog: Catalog::from_items(items),
            viewport: Viewport::new(size),
        })
    }

    /// Number of items regardless of the active filter.
    pub fn item_count(&self) -> usize {
        self.catalog.item_count()
    }

    /// The trimmed query of the last search.
    pub fn query(&self) -> &str {
        self.catalog.query()
    }

    /// Matched character offsets keyed by item position.
    pub fn matches(&self) -> &HashMap<usize, Vec<usize>> {
        self.catalog.matches()
    }
}

impl<T: Item> Listing<T> for List<T> {
    fn prev(&mut self) {
        self.viewport.prev();
    }

    fn next(&mut self) {
        self.viewport.next(self.catalog.scope_len());
    }

    fn page_up(&mut self) {
        self.viewport.page_up();
    }

    fn page_down(&mut self) {
        self.viewport.page_down(self.catalog.scope_len());
    }

    fn can_page_up(&self) -> bool {
        self.viewport.can_page_up()
    }

    fn can_page_down(&self) -> bool {
        self.viewport.can_page_down(self.catalog.scope_len())
    }

    fn set_cursor(&mut self, index: usize) {
        self.viewport.set_cursor(index, self.catalog.scope_len());
    }

    fn set_start(&mut self, index: usize) {
        self.viewport.set_start(index);
    }

    fn search(&mut self, query: &str) {
        self.viewport.reset();
        self.catalog.search(query);
    }

    fn cancel_search(&mut self) {
        self.viewport.reset();
        self.catalog.cancel_search();
    }

    fn items(&self) -> Window<T> {
        self.catalog.window(&self.viewport)
    }

    fn index(&self) -> Option<usize> {
        self.catalog.resolve(self.viewport.cursor())
    }

    fn scope(&self) -> Vec<Arc<T>> {
        self.catalog.scope_items()
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
        self.catalog.scope_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn files() -> List<&'static str> {
        List::new(["a.txt", "b.txt", "ab.go"], 2).unwrap()
    }

    fn texts(list: &List<&'static str>) -> Vec<&'static str> {
        list.scope().iter().map(|item| **item).collect()
    }

    #[test]
    fn rejects_zero_size() {
        let err = List::new(["a"], 0).unwrap_err();
        assert!(matches!(err, PromptError::Configuration { .. }));
    }

    #[test]
    fn starts_at_top_with_every_item_in_scope() {
        let list = files();
        assert_eq!((list.cursor(), list.start()), (0, 0));
        assert_eq!(texts(&list), vec!["a.txt", "b.txt", "ab.go"]);
    }

    #[test]
    fn items_returns_visible_window() {
        let list = files();
        let window = list.items();
        let rows: Vec<&str> = window.entries.iter().map(|e| *e.item).collect();

        assert_eq!(rows, vec!["a.txt", "b.txt"]);
        assert_eq!(window.active, Some(0));
    }

    #[test]
    fn search_filters_and_resets_focus() {
        let mut list = files();
        list.next();
        list.next();
        list.search("ab");

        assert_eq!(texts(&list), vec!["ab.go"]);
        assert_eq!((list.cursor(), list.start()), (0, 0));
        assert_eq!(list.index(), Some(2));
        assert_eq!(list.items().entries[0].matches, vec![0, 1]);
    }

    #[test]
    fn cancel_search_restores_population_order() {
        let mut list = files();
        list.search("go");
        list.cancel_search();

        assert_eq!(texts(&list), vec!["a.txt", "b.txt", "ab.go"]);
        assert!(list.matches().is_empty());
        assert_eq!(list.query(), "");
    }

    #[test]
    fn search_without_hits_reports_not_found() {
        let mut list = files();
        list.search("zzz");

        assert!(list.is_empty());
        let window = list.items();
        assert!(window.is_empty());
        assert_eq!(window.active, None);
        assert_eq!(list.index(), None);
        assert!(list.selection().is_none());
    }

    #[test]
    fn empty_list_is_valid() {
        let list: List<String> = List::new(Vec::new(), 3).unwrap();
        assert_eq!(list.items().active, None);
        assert!(!list.can_page_down());
        assert!(!list.can_page_up());
    }

    proptest! {
        #[test]
        fn cursor_stays_in_scope(
            len in 0usize..40,
            size in 1usize..8,
            moves in proptest::collection::vec(0u8..4, 0..60),
        ) {
            let mut list = List::new((0..len).map(|n| format!("item-{n}")), size).unwrap();
            for step in moves {
                match step {
                    0 => list.prev(),
                    1 => list.next(),
                    2 => list.page_up(),
                    _ => list.page_down(),
                }
                let scope = list.len();
                prop_assert!(list.start() <= list.cursor());
                prop_assert!(list.cursor() - list.start() < size);
                if scope == 0 {
                    prop_assert_eq!(list.cursor(), 0);
                } else {
                    prop_assert!(list.cursor() < scope);
                }
                let window = list.items();
                prop_assert!(window.len() <= size);
                prop_assert_eq!(window.active.is_none(), scope == 0);
            }
        }

        #[test]
        fn paging_down_reaches_the_end(len in 0usize..60, size in 1usize..9) {
            let mut list = List::new((0..len).map(|n| n.to_string()), size).unwrap();
            let mut guard = 0;
            while list.can_page_down() && guard < 100 {
                list.page_down();
                guard += 1;
            }
            if len < size {
                prop_assert_eq!(list.start(), 0);
            } else {
                prop_assert!(list.start() + size >= len);
            }
        }

        #[test]
        fn search_scope_holds_only_ordered_matches(
            texts in proptest::collection::vec("[abcü ]{0,10}", 0..20),
            query in "[abc]{1,3}",
        ) {
            let mut list = List::new(texts.clone(), 4).unwrap();
            list.search(&query);

            let wanted: Vec<char> = query.chars().collect();
            prop_assert_eq!(list.len(), list.matches().len());
            for (&position, offsets) in list.matches() {
                let chars: Vec<char> = texts[position].chars().collect();
                prop_assert_eq!(offsets.len(), wanted.len());
                prop_assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
                for (offset, ch) in offsets.iter().zip(&wanted) {
                    prop_assert!(*offset < chars.len());
                    prop_assert_eq!(chars[*offset], *ch);
                }
            }

            list.cancel_search();
            let restored: Vec<String> = list.scope().iter().map(|item| item.to_string()).collect();
            prop_assert_eq!(restored, texts);
            prop_assert!(list.matches().is_empty());
        }
    }
}
