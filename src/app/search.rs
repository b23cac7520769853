//! The search box: an editable byte query with an insertion cursor.
//!
//! Every editing method returns `true` when the query bytes changed, so the caller
//! knows whether the filter has to run again. Cursor-only moves return whether the
//! cursor moved.

/// Longest query the search box accepts, in bytes.
pub const MAX_QUERY_LEN: usize = 255;

#[derive(Debug, Default, Clone)]
pub struct SearchState {
    query: Vec<u8>,
    cursor: usize,
    open: bool,
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    // Getters / accessors

    #[inline]
    pub fn query(&self) -> &[u8] {
        &self.query
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Whether the box is drawn: it has focus or still holds a query.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.open || !self.query.is_empty()
    }

    // Focus

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Empties the query and drops focus.
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.open = false;
    }

    // Editing

    /// Inserts a printable ASCII byte at the cursor.
    pub fn insert(&mut self, b: u8) -> bool {
        if !(32..127).contains(&b) || self.query.len() >= MAX_QUERY_LEN {
            return false;
        }
        self.query.insert(self.cursor, b);
        self.cursor += 1;
        true
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.query.remove(self.cursor);
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.query.len() {
            return false;
        }
        self.query.remove(self.cursor);
        true
    }

    pub fn delete_word_back(&mut self) -> bool {
        let start = self.word_start();
        if start == self.cursor {
            return false;
        }
        self.query.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn delete_word_forward(&mut self) -> bool {
        let end = self.word_end();
        if end == self.cursor {
            return false;
        }
        self.query.drain(self.cursor..end);
        true
    }

    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.query.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    // Cursor movement

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.query.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        std::mem::replace(&mut self.cursor, 0) != 0
    }

    pub fn move_end(&mut self) -> bool {
        let end = self.query.len();
        std::mem::replace(&mut self.cursor, end) != end
    }

    pub fn move_word_back(&mut self) -> bool {
        let start = self.word_start();
        std::mem::replace(&mut self.cursor, start) != start
    }

    pub fn move_word_forward(&mut self) -> bool {
        let end = self.word_end();
        std::mem::replace(&mut self.cursor, end) != end
    }

    /// Start of the run of same-class bytes ending at the cursor.
    fn word_start(&self) -> usize {
        let mut pos = self.cursor;
        if let Some(&prev) = self.query[..pos].last() {
            let word = is_word_byte(prev);
            while pos > 0 && is_word_byte(self.query[pos - 1]) == word {
                pos -= 1;
            }
        }
        pos
    }

    /// End of the run of same-class bytes starting at the cursor.
    fn word_end(&self) -> usize {
        let mut pos = self.cursor;
        if let Some(&next) = self.query.get(pos) {
            let word = is_word_byte(next);
            while pos < self.query.len() && is_word_byte(self.query[pos]) == word {
                pos += 1;
            }
        }
        pos
    }
}
