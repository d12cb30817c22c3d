use std::fmt::Display;

use super::render::Page;

/// Supplies pages lazily by index.
///
/// `get_page` is only called with `index < page_count()`, and `page_count()` is at least 1.
pub trait PageSource: Send + Sync {
    fn page_count(&self) -> usize;

    fn get_page(&self, index: usize) -> Page;
}

/// Splits a list of displayable entries into newline-joined text pages.
#[derive(Debug, Clone)]
pub struct ListPageSource<T> {
    entries: Vec<T>,
    per_page: usize,
}

impl<T> ListPageSource<T> {
    pub fn new(entries: Vec<T>, per_page: usize) -> Self {
        Self {
            entries,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }
}

impl<T: Display + Send + Sync> PageSource for ListPageSource<T> {
    fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.per_page).max(1)
    }

    fn get_page(&self, index: usize) -> Page {
        let start = index.saturating_mul(self.per_page);
        let text = self
            .entries
            .iter()
            .skip(start)
            .take(self.per_page)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Page::Text(text)
    }
}

impl PageSource for Vec<Page> {
    fn page_count(&self) -> usize {
        self.len().max(1)
    }

    fn get_page(&self, index: usize) -> Page {
        self.get(index).cloned().unwrap_or_default()
    }
}
