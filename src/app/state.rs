//! Application state and main controller module for explorer.
//!
//! [AppState] bundles everything a session owns: the current directory, its
//! [Catalog], the [FilterView] over it, the search box, the navigation state and the
//! terminal geometry. Key handling mutates it and reports what has to be repainted
//! through [KeypressResult]; the terminal loop and the renderer only read it.
//!
//! The process working directory is never changed. The session tracks its own
//! directory and hands it to the editor when spawning.

use crate::app::actions::{ActionMode, Confirm};
use crate::app::keymap::{Action, Key};
use crate::app::{NavState, SearchState};
use crate::config::Config;
use crate::core::filter::FilterView;
use crate::core::fm::{Catalog, FileEntry};
use crate::error::Result;

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Fallback geometry when the terminal size is unknown.
pub const DEFAULT_COLS: u16 = 80;
pub const DEFAULT_ROWS: u16 = 24;

/// How much of the screen a state change invalidated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    /// Only the selection marker moved within the page; `from` is its old row.
    Marker { from: usize },
    Full,
    /// Show the delete confirmation prompt below the list.
    Prompt,
}

/// Result of one processed key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeypressResult {
    Continue(Redraw),
    Quit,
    Selected(PathBuf),
    Interrupted,
    Suspend,
    OpenEditor(OsString),
}

/// Terminal geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub cols: u16,
    pub rows: u16,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
        }
    }
}

impl LayoutMetrics {
    /// Zero sizes fall back to the defaults.
    pub fn new(cols: u16, rows: u16) -> Self {
        if cols == 0 || rows == 0 {
            return Self::default();
        }
        Self { cols, rows }
    }

    /// List rows: everything except the path line and the two scroll indicators.
    #[inline]
    pub fn page_size(&self) -> usize {
        if self.rows > 3 {
            self.rows as usize - 3
        } else {
            1
        }
    }

    /// Columns available to a name: marker, separator, ellipsis and the last column.
    #[inline]
    pub fn max_name_cols(&self) -> usize {
        if self.cols > 5 {
            self.cols as usize - 5
        } else {
            1
        }
    }
}

/// Main struct which holds the state of one explorer session.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) current_dir: PathBuf,

    pub(super) catalog: Catalog,
    pub(super) filter: FilterView,
    pub(super) search: SearchState,
    pub(super) nav: NavState,

    pub(super) metrics: LayoutMetrics,
    pub(super) mode: ActionMode,
}

impl<'a> AppState<'a> {
    /// Opens a session in `dir`, which should already be absolute.
    ///
    /// Fails only when the directory holds more entries than a catalog can index.
    pub fn new(config: &'a Config, dir: PathBuf, metrics: LayoutMetrics) -> Result<Self> {
        let mut app = Self {
            config,
            current_dir: dir,
            catalog: Catalog::new(),
            filter: FilterView::new(),
            search: SearchState::new(),
            nav: NavState::new(metrics.page_size()),
            metrics,
            mode: ActionMode::Normal,
        };
        app.reload()?;
        tracing::info!(
            "session started in {} with {} entries",
            app.current_dir.display(),
            app.catalog.len()
        );
        Ok(app)
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn filter(&self) -> &FilterView {
        &self.filter
    }

    #[inline]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    #[inline]
    pub fn mode(&self) -> &ActionMode {
        &self.mode
    }

    #[inline]
    pub fn is_confirming(&self) -> bool {
        matches!(self.mode, ActionMode::ConfirmDelete(_))
    }

    // Entry functions

    /// Catalog record behind row `idx` of the filtered view.
    #[inline]
    pub fn visible_entry(&self, idx: usize) -> Option<&FileEntry> {
        self.filter.entry(&self.catalog, idx)
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.visible_entry(self.nav.selected_idx())
    }

    /// Absolute path of the selection.
    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|e| self.current_dir.join(e.name()))
    }

    /// Puts the cursor on the entry named exactly `name`, if present.
    ///
    /// Meant for start-up, while the view is still the whole catalog.
    pub fn select_name(&mut self, name: &OsStr) -> bool {
        match self.filter.position(&self.catalog, name.as_bytes()) {
            Some(idx) => {
                self.nav.select(idx);
                true
            }
            None => false,
        }
    }

    /// Applies a new terminal size and re-derives the page geometry.
    pub fn resize(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
        self.nav
            .set_page_size(metrics.page_size(), self.filter.len());
    }

    /// Rebuilds the catalog of the current directory and shows all of it.
    pub(super) fn reload(&mut self) -> Result<()> {
        self.catalog.rebuild(&self.current_dir)?;
        self.filter.reset(&self.catalog);
        self.nav.clamp(self.filter.len());
        Ok(())
    }

    /// Central key handler.
    ///
    /// Search input has priority while the box has focus; otherwise the key is
    /// looked up in the normal-mode table.
    pub fn handle_key(&mut self, key: Key) -> Result<KeypressResult> {
        if self.is_confirming() {
            return Ok(KeypressResult::Continue(Redraw::Nothing));
        }

        if self.search.is_open() {
            return self.handle_search_key(key);
        }

        match Action::lookup(key) {
            Some(action) => self.handle_action(action),
            None => Ok(KeypressResult::Continue(Redraw::Nothing)),
        }
    }

    /// Feeds one raw byte to a pending delete confirmation.
    pub fn handle_confirm_byte(&mut self, b: u8) -> Result<KeypressResult> {
        let ActionMode::ConfirmDelete(pending) = &self.mode else {
            return Ok(KeypressResult::Continue(Redraw::Nothing));
        };

        match Confirm::from_byte(b) {
            Confirm::Yes => {
                let name = pending.name().to_os_string();
                self.mode = ActionMode::Normal;
                self.confirm_delete(&name)?;
                Ok(KeypressResult::Continue(Redraw::Full))
            }
            Confirm::No => {
                self.mode = ActionMode::Normal;
                Ok(KeypressResult::Continue(Redraw::Full))
            }
            Confirm::Undecided => Ok(KeypressResult::Continue(Redraw::Nothing)),
        }
    }
}
