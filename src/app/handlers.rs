//! Input action handler methods for explorer.
//!
//! This module implements the [AppState] methods behind each normal-mode action and
//! the search box editing keys, plus the directory change and delete operations.

use crate::app::NavState;
use crate::app::actions::{ActionMode, PendingDelete};
use crate::app::keymap::{Action, Key};
use crate::app::state::{AppState, KeypressResult, Redraw};
use crate::core::fm::{EntryKind, remove_recursive};
use crate::error::Result;

use std::ffi::OsStr;
use std::fs;

impl<'a> AppState<'a> {
    // Normal mode

    pub(super) fn handle_action(&mut self, action: Action) -> Result<KeypressResult> {
        let redraw = match action {
            Action::GoUp => self.move_cursor(NavState::move_prev),
            Action::GoDown => self.move_cursor(NavState::move_next),
            Action::GoToTop => self.move_cursor(NavState::move_first),
            Action::GoToBottom => self.move_cursor(NavState::move_last),
            Action::PageUp => self.move_cursor(NavState::page_up),
            Action::PageDown => self.move_cursor(NavState::page_down),
            Action::GoParent => self.go_to_parent()?,
            Action::GoIntoDir => self.enter_directory()?,
            Action::OpenSearch => {
                self.search.open();
                Redraw::Full
            }
            Action::ClearSearch => {
                if self.search.is_empty() {
                    Redraw::Nothing
                } else {
                    self.clear_search();
                    Redraw::Full
                }
            }
            Action::Delete => self.begin_delete(),
            Action::Select => {
                return Ok(match self.selected_path() {
                    Some(path) => KeypressResult::Selected(path),
                    None => KeypressResult::Quit,
                });
            }
            Action::OpenEditor => {
                return Ok(match (self.config.editor(), self.selected_entry()) {
                    (Some(_), Some(entry)) => KeypressResult::OpenEditor(entry.name().to_os_string()),
                    _ => KeypressResult::Continue(Redraw::Nothing),
                });
            }
            Action::Quit => return Ok(KeypressResult::Quit),
            Action::Interrupt => return Ok(KeypressResult::Interrupted),
            Action::Suspend => return Ok(KeypressResult::Suspend),
        };
        Ok(KeypressResult::Continue(redraw))
    }

    /// Runs a navigation step and turns its page-changed flag into a [Redraw].
    fn move_cursor(&mut self, step: fn(&mut NavState, usize) -> bool) -> Redraw {
        let len = self.filter.len();
        if len == 0 {
            return Redraw::Nothing;
        }
        let from = self.nav.cursor_row();
        if step(&mut self.nav, len) {
            Redraw::Full
        } else {
            Redraw::Marker { from }
        }
    }

    // Search box

    pub(super) fn handle_search_key(&mut self, key: Key) -> Result<KeypressResult> {
        let search = &mut self.search;
        let edited = match key {
            Key::Char(b) => search.insert(b),
            Key::Backspace => {
                if search.is_empty() {
                    search.close();
                    self.nav.reset();
                    return Ok(KeypressResult::Continue(Redraw::Full));
                }
                search.delete_back()
            }
            Key::Delete => search.delete_forward(),
            Key::DeleteWordBack => search.delete_word_back(),
            Key::CtrlDelete => search.delete_word_forward(),
            Key::DeleteToStart => search.delete_to_start(),
            Key::Left | Key::Right | Key::Home | Key::End | Key::CtrlLeft | Key::CtrlRight => {
                let moved = match key {
                    Key::Left => search.move_left(),
                    Key::Right => search.move_right(),
                    Key::Home => search.move_home(),
                    Key::End => search.move_end(),
                    Key::CtrlLeft => search.move_word_back(),
                    _ => search.move_word_forward(),
                };
                let redraw = if moved { Redraw::Full } else { Redraw::Nothing };
                return Ok(KeypressResult::Continue(redraw));
            }
            Key::Enter => {
                search.close();
                self.nav.reset();
                return Ok(KeypressResult::Continue(Redraw::Full));
            }
            Key::DoubleEscape => {
                self.clear_search();
                return Ok(KeypressResult::Continue(Redraw::Full));
            }
            Key::Interrupt => return Ok(KeypressResult::Interrupted),
            Key::Suspend => return Ok(KeypressResult::Suspend),
            _ => false,
        };

        if !edited {
            return Ok(KeypressResult::Continue(Redraw::Nothing));
        }
        self.apply_query();
        Ok(KeypressResult::Continue(Redraw::Full))
    }

    /// Re-filters for the current query and puts the cursor on the first match.
    fn apply_query(&mut self) {
        self.filter.apply(&self.catalog, self.search.query());
        self.nav.reset();
    }

    /// Drops the query and relocates the previously selected entry in the full view.
    pub(super) fn clear_search(&mut self) {
        let selected = self.selected_entry().map(|e| e.name_bytes().to_vec());

        self.search.clear();
        self.filter.reset(&self.catalog);
        self.nav.reset();

        if let Some(name) = selected
            && let Some(idx) = self.filter.position(&self.catalog, &name)
        {
            self.nav.select(idx);
        }
    }

    // Directory changes

    /// Enters the selected entry when it is, or links to, a readable directory.
    ///
    /// Failures leave the session where it was.
    pub(super) fn enter_directory(&mut self) -> Result<Redraw> {
        let Some(entry) = self.selected_entry() else {
            return Ok(Redraw::Nothing);
        };
        let target = self.current_dir.join(entry.name());

        if entry.kind() != EntryKind::Directory {
            match fs::metadata(&target) {
                Ok(md) if md.is_dir() => {}
                _ => return Ok(Redraw::Nothing),
            }
        }

        let resolved = match fs::canonicalize(&target).and_then(|p| fs::read_dir(&p).map(|_| p)) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("cannot enter {}: {e}", target.display());
                return Ok(Redraw::Nothing);
            }
        };

        self.current_dir = resolved;
        self.nav.descend();
        self.search.clear();
        self.reload()?;
        tracing::debug!("entered {}", self.current_dir.display());
        Ok(Redraw::Full)
    }

    /// Moves to the parent directory and restores the cursor saved on descent.
    pub(super) fn go_to_parent(&mut self) -> Result<Redraw> {
        let Some(parent) = self.current_dir.parent().map(|p| p.to_path_buf()) else {
            return Ok(Redraw::Nothing);
        };
        if let Err(e) = fs::read_dir(&parent) {
            tracing::warn!("cannot open {}: {e}", parent.display());
            return Ok(Redraw::Nothing);
        }

        self.current_dir = parent;
        self.search.clear();
        self.reload()?;
        self.nav.ascend(self.filter.len());
        tracing::debug!("returned to {}", self.current_dir.display());
        Ok(Redraw::Full)
    }

    // Deletion

    fn begin_delete(&mut self) -> Redraw {
        let Some(entry) = self.selected_entry() else {
            return Redraw::Nothing;
        };
        self.mode = ActionMode::ConfirmDelete(PendingDelete::new(entry.name()));
        Redraw::Prompt
    }

    /// Removes `name` and refreshes the view, keeping the cursor near where it was.
    ///
    /// A failed removal leaves catalog and view untouched.
    pub(super) fn confirm_delete(&mut self, name: &OsStr) -> Result<()> {
        if let Err(e) = remove_recursive(&self.current_dir, name) {
            tracing::warn!("cannot delete {:?}: {e}", name);
            return Ok(());
        }
        tracing::info!("deleted {:?} in {}", name, self.current_dir.display());

        let old = self.nav.selected_idx();
        self.catalog.rebuild(&self.current_dir)?;
        self.filter.reset(&self.catalog);
        if !self.search.is_empty() {
            self.filter.apply(&self.catalog, self.search.query());
        }

        let len = self.filter.len();
        self.nav.select(if len == 0 { 0 } else { old.min(len - 1) });
        Ok(())
    }
}
