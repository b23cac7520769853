//! Cursor and page arithmetic over the filtered view.
//!
//! [NavState] keeps one logical cursor (`selected`) plus its page/row decomposition.
//! Every movement takes the current view length and returns `true` when the page
//! changed and the whole list has to be repainted, `false` when only the selection
//! marker moved.

/// Saved cursor positions of the directories above the current one.
pub const HISTORY_CAPACITY: usize = 64;

/// Bounded stack of selections, pushed on descent and popped on ascent.
#[derive(Debug, Default, Clone)]
pub struct DirHistory {
    stack: Vec<usize>,
}

impl DirHistory {
    /// Pushes are silently dropped once [HISTORY_CAPACITY] is reached.
    pub fn push(&mut self, idx: usize) {
        if self.stack.len() < HISTORY_CAPACITY {
            self.stack.push(idx);
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Holds the selection of the filtered view and the page geometry.
#[derive(Debug, Clone)]
pub struct NavState {
    selected: usize,
    cursor: usize,
    page: usize,
    page_size: usize,
    history: DirHistory,
}

impl NavState {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected: 0,
            cursor: 0,
            page: 0,
            page_size: page_size.max(1),
            history: DirHistory::default(),
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    /// Row of the selection inside the current page.
    #[inline]
    pub fn cursor_row(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn history(&self) -> &DirHistory {
        &self.history
    }

    /// First view index shown on the current page.
    #[inline]
    pub fn page_start(&self) -> usize {
        self.page * self.page_size
    }

    // Positioning

    /// Puts the cursor on `idx`, recomputing page and row.
    pub fn select(&mut self, idx: usize) {
        self.selected = idx;
        self.page = idx / self.page_size;
        self.cursor = idx % self.page_size;
    }

    /// Back to the first entry.
    pub fn reset(&mut self) {
        self.select(0);
    }

    /// Keeps the selection inside a view of `len` entries.
    pub fn clamp(&mut self, len: usize) {
        let idx = if len == 0 {
            0
        } else {
            self.selected.min(len - 1)
        };
        self.select(idx);
    }

    /// Changes the page size (terminal resize) and re-derives page and row.
    pub fn set_page_size(&mut self, page_size: usize, len: usize) {
        self.page_size = page_size.max(1);
        self.clamp(len);
    }

    /// Moves to `idx` and reports whether the page changed.
    fn go_to(&mut self, idx: usize) -> bool {
        let old_page = self.page;
        self.select(idx);
        self.page != old_page
    }

    // Movement

    /// One entry up, wrapping from the first to the last.
    pub fn move_prev(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let idx = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
        self.go_to(idx)
    }

    /// One entry down, wrapping from the last to the first.
    pub fn move_next(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let idx = if self.selected + 1 >= len {
            0
        } else {
            self.selected + 1
        };
        self.go_to(idx)
    }

    pub fn move_first(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.go_to(0)
    }

    pub fn move_last(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.go_to(len - 1)
    }

    /// Top row of the page first, then the top row of the previous page.
    pub fn page_up(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        if self.cursor == 0 {
            if self.page == 0 {
                return false;
            }
            return self.go_to((self.page - 1) * self.page_size);
        }
        self.go_to(self.page_start())
    }

    /// Bottom row of the page first, then the bottom row of the next page.
    pub fn page_down(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let last_page = (len - 1) / self.page_size;
        let page_end = |page: usize| {
            if page < last_page {
                self.page_size - 1
            } else {
                (len - 1) % self.page_size
            }
        };

        if self.cursor == page_end(self.page) {
            if self.page >= last_page {
                return false;
            }
            let next = self.page + 1;
            return self.go_to(next * self.page_size + page_end(next));
        }
        self.go_to(self.page_start() + page_end(self.page))
    }

    // Directory changes

    /// Remembers the selection and starts at the top of the child directory.
    pub fn descend(&mut self) -> bool {
        self.history.push(self.selected);
        self.reset();
        true
    }

    /// Restores the selection saved for the parent, clamped to its `len` entries.
    pub fn ascend(&mut self, len: usize) -> bool {
        self.selected = self.history.pop().unwrap_or(0);
        self.clamp(len);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(nav: &NavState, len: usize) {
        if len > 0 {
            assert!(nav.selected_idx() < len);
        }
        assert_eq!(nav.page(), nav.selected_idx() / nav.page_size());
        assert_eq!(nav.cursor_row(), nav.selected_idx() % nav.page_size());
    }

    #[test]
    fn next_crosses_pages_and_wraps() {
        let mut nav = NavState::new(2);
        nav.select(1);
        assert!(nav.move_next(5), "crossing into page 1 needs a redraw");
        assert_eq!((nav.selected_idx(), nav.page(), nav.cursor_row()), (2, 1, 0));

        nav.select(4);
        assert!(nav.move_next(5), "wrapping back to page 0 needs a redraw");
        assert_eq!((nav.selected_idx(), nav.page(), nav.cursor_row()), (0, 0, 0));

        assert!(!nav.move_next(5));
        assert_eq!(nav.selected_idx(), 1);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut nav = NavState::new(3);
        assert!(nav.move_prev(7));
        assert_eq!((nav.selected_idx(), nav.page(), nav.cursor_row()), (6, 2, 0));
        assert!(nav.move_prev(7));
        assert_eq!(nav.selected_idx(), 5);

        let mut small = NavState::new(10);
        assert!(!small.move_prev(4), "same page wrap is a marker move");
        assert_eq!(small.selected_idx(), 3);
    }

    #[test]
    fn first_and_last() {
        let mut nav = NavState::new(4);
        assert!(nav.move_last(10));
        assert_eq!((nav.page(), nav.cursor_row()), (2, 1));
        assert!(nav.move_first(10));
        assert!(!nav.move_first(10));
        assert!(!nav.move_last(3));
        assert_eq!(nav.selected_idx(), 2);
    }

    #[test]
    fn paging_is_two_phase() {
        let mut nav = NavState::new(4);
        let len = 10;
        nav.select(1);

        assert!(!nav.page_down(len), "first press stays on the page");
        assert_eq!(nav.selected_idx(), 3);
        assert!(nav.page_down(len));
        assert_eq!(nav.selected_idx(), 7);
        assert!(nav.page_down(len));
        assert_eq!(nav.selected_idx(), 9, "last page ends at the last entry");
        assert!(!nav.page_down(len));
        assert_eq!(nav.selected_idx(), 9);

        assert!(!nav.page_up(len));
        assert_eq!(nav.selected_idx(), 8);
        assert!(nav.page_up(len));
        assert_eq!(nav.selected_idx(), 4);
        assert!(nav.page_up(len));
        assert_eq!(nav.selected_idx(), 0);
        assert!(!nav.page_up(len));
        assert_eq!(nav.selected_idx(), 0);
    }

    #[test]
    fn empty_view_is_inert() {
        let mut nav = NavState::new(5);
        assert!(!nav.move_prev(0));
        assert!(!nav.move_next(0));
        assert!(!nav.move_first(0));
        assert!(!nav.move_last(0));
        assert!(!nav.page_up(0));
        assert!(!nav.page_down(0));
        assert_eq!(nav.selected_idx(), 0);
    }

    #[test]
    fn history_restores_and_clamps() {
        let mut nav = NavState::new(3);
        nav.select(8);
        assert!(nav.descend());
        assert_eq!(nav.selected_idx(), 0);
        assert_eq!(nav.history().len(), 1);

        assert!(nav.ascend(20));
        assert_eq!((nav.selected_idx(), nav.page(), nav.cursor_row()), (8, 2, 2));

        nav.descend();
        nav.ascend(4);
        assert_eq!(nav.selected_idx(), 3, "clamped to the shrunken parent");

        nav.ascend(4);
        assert_eq!(nav.selected_idx(), 0, "empty history defaults to the top");
    }

    #[test]
    fn history_is_bounded() {
        let mut history = DirHistory::default();
        for i in 0..HISTORY_CAPACITY + 10 {
            history.push(i);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.pop(), Some(HISTORY_CAPACITY - 1));
    }

    #[test]
    fn resize_rederives_page() {
        let mut nav = NavState::new(10);
        nav.select(25);
        nav.set_page_size(4, 30);
        assert_eq!((nav.page(), nav.cursor_row()), (6, 1));
        nav.set_page_size(0, 20);
        assert_eq!(nav.page_size(), 1);
        assert_eq!(nav.selected_idx(), 19);
    }

    #[test]
    fn random_walk_keeps_invariants() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..50 {
            let len = rng.random_range(0..40);
            let mut nav = NavState::new(rng.random_range(1..8));
            for _ in 0..200 {
                match rng.random_range(0..7) {
                    0 => nav.move_prev(len),
                    1 => nav.move_next(len),
                    2 => nav.move_first(len),
                    3 => nav.move_last(len),
                    4 => nav.page_up(len),
                    5 => nav.page_down(len),
                    _ => {
                        nav.set_page_size(rng.random_range(1..8), len);
                        false
                    }
                };
                assert_consistent(&nav, len);
            }
        }
    }
}
