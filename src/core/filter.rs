//! Incremental substring filter over a [Catalog].
//!
//! The filtered view is a list of [FilteredEntry] records pointing into the catalog
//! by index, always in catalog order. It is rebuilt whenever the catalog is, so the
//! indices never outlive the entries they refer to.
//!
//! Matching is plain substring containment. A query containing an uppercase ASCII
//! byte matches case-sensitively, any other query matches the lowercase names.
//! Because containment is monotonic, a query that only extends the previous one
//! can re-filter the current view instead of the whole catalog.

use crate::core::fm::{Catalog, FileEntry};

/// One row of the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredEntry {
    index: u32,
    match_start: usize,
}

impl FilteredEntry {
    /// Index of the record inside the catalog.
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Byte offset of the first occurrence of the query, 0 without a query.
    #[inline]
    pub fn match_start(&self) -> usize {
        self.match_start
    }
}

/// The filtered view together with the query it was computed for.
#[derive(Debug, Default)]
pub struct FilterView {
    entries: Vec<FilteredEntry>,
    query: Vec<u8>,
    case_sensitive: bool,
}

impl FilterView {
    pub fn new() -> Self {
        Self::default()
    }

    // Accessors

    #[inline]
    pub fn entries(&self) -> &[FilteredEntry] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&FilteredEntry> {
        self.entries.get(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The query the current view was computed for.
    #[inline]
    pub fn query(&self) -> &[u8] {
        &self.query
    }

    /// Resolves a view row to its catalog record.
    pub fn entry<'c>(&self, catalog: &'c Catalog, idx: usize) -> Option<&'c FileEntry> {
        self.entries.get(idx).and_then(|f| catalog.get(f.index()))
    }

    /// Shows every catalog record with offset 0 and forgets the previous query.
    pub fn reset(&mut self, catalog: &Catalog) {
        self.query.clear();
        self.case_sensitive = false;
        self.entries.clear();
        self.entries.extend((0..catalog.len()).map(|i| FilteredEntry {
            index: i as u32,
            match_start: 0,
        }));
    }

    /// Recomputes the view for `query`.
    ///
    /// Returns `true` when only the previous view was scanned.
    pub fn apply(&mut self, catalog: &Catalog, query: &[u8]) -> bool {
        if query.is_empty() {
            self.reset(catalog);
            return false;
        }

        let incremental = !self.query.is_empty()
            && query.len() > self.query.len()
            && query.starts_with(&self.query);

        self.case_sensitive = is_case_sensitive(query);
        let needle = if self.case_sensitive {
            query.to_vec()
        } else {
            query.to_ascii_lowercase()
        };
        let case_sensitive = self.case_sensitive;
        let locate = |entry: &FileEntry| {
            let hay = if case_sensitive {
                entry.name_bytes()
            } else {
                entry.lowercase_name()
            };
            find_subslice(hay, &needle)
        };

        if incremental {
            self.entries.retain_mut(|f| {
                match catalog.get(f.index()).and_then(|e| locate(e)) {
                    Some(offset) => {
                        f.match_start = offset;
                        true
                    }
                    None => false,
                }
            });
        } else {
            self.entries.clear();
            for (i, entry) in catalog.entries().iter().enumerate() {
                if let Some(offset) = locate(entry) {
                    self.entries.push(FilteredEntry {
                        index: i as u32,
                        match_start: offset,
                    });
                }
            }
        }

        self.query.clear();
        self.query.extend_from_slice(query);
        tracing::debug!(
            incremental,
            matches = self.entries.len(),
            "filtered catalog"
        );
        incremental
    }

    /// Exact-name lookup over the view; only meaningful while it is in catalog order.
    pub fn position(&self, catalog: &Catalog, name: &[u8]) -> Option<usize> {
        self.entries
            .binary_search_by(|f| {
                catalog
                    .get(f.index())
                    .map(|e| e.name_bytes())
                    .unwrap_or_default()
                    .cmp(name)
            })
            .ok()
    }
}

/// A query is case-sensitive as soon as it contains an uppercase ASCII byte.
fn is_case_sensitive(query: &[u8]) -> bool {
    query.iter().any(u8::is_ascii_uppercase)
}

/// Byte offset of the first occurrence of `needle` in `hay`.
pub fn find_subslice(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > hay.len() {
        return None;
    }
    hay.windows(needle.len()).position(|w| w == needle)
}
