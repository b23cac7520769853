//! Frame renderer for explorer.
//!
//! Everything is queued as crossterm commands on a generic writer, so the terminal
//! loop can hand in a buffered stderr and tests a `Vec<u8>`. Layout, 0-based rows:
//!
//! ```text
//! 0            path line (+ " /query" search box)
//! 1            "↑" when a previous page exists
//! 2..2+P       one row per visible entry
//! 2+shown      "↓" when more entries follow; also the delete prompt row
//! ```
//!
//! This module reads state and never mutates it.

use crate::app::{AppState, Redraw};
use crate::app::actions::ActionMode;
use crate::config::LsColor;
use crate::core::formatter::{ELLIPSIS, fit_name, fit_path};
use crate::utils::shorten_home_path;

use crossterm::{
    Command,
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};

use std::fmt;
use std::io::{self, Write};

/// Rows above the first list row.
const HEADER_ROWS: usize = 2;

/// Raw SGR parameters from `LS_COLORS`; empty parameters reset.
struct Sgr<'a>(&'a str);

impl Command for Sgr<'_> {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[{}m", self.0)
    }
}

#[inline]
fn row(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Applies `redraw` to the screen and flushes.
///
/// A full repaint keeps a pending delete prompt on screen.
pub fn redraw<W: Write>(out: &mut W, app: &AppState, redraw: Redraw) -> io::Result<()> {
    match redraw {
        Redraw::Nothing => return Ok(()),
        Redraw::Marker { from } => render_marker(out, app, from)?,
        Redraw::Full => {
            render(out, app)?;
            render_prompt(out, app)?;
        }
        Redraw::Prompt => render_prompt(out, app)?,
    }
    out.flush()
}

/// Paints the whole frame inside a synchronized update.
pub fn render<W: Write>(out: &mut W, app: &AppState) -> io::Result<()> {
    let cfg = app.config();
    let colors = cfg.colors();
    let metrics = app.metrics();
    let cols = metrics.cols as usize;
    let nav = app.nav();
    let search = app.search();
    let view = app.filter();

    queue!(out, BeginSynchronizedUpdate, MoveTo(0, 0))?;

    // Path line
    let (path, tilde) = shorten_home_path(app.current_dir(), cfg.home());
    let (path, path_cols) = fit_path(&path, tilde, cols);
    queue!(
        out,
        Sgr(colors.get(LsColor::Di)),
        Print(path),
        SetAttribute(Attribute::Reset)
    )?;
    if search.is_visible() {
        queue!(
            out,
            Print(" /"),
            Print(String::from_utf8_lossy(search.query()))
        )?;
    }
    queue!(out, Clear(ClearType::UntilNewLine))?;

    // Scroll up indicator
    queue!(out, MoveTo(0, 1))?;
    if nav.page() > 0 {
        queue!(out, Print("↑"))?;
    }
    queue!(out, Clear(ClearType::UntilNewLine))?;

    // Entries
    let start = nav.page_start();
    let max_cols = metrics.max_name_cols();
    let query_len = view.query().len();
    let mut shown = 0;

    for (j, filtered) in view
        .entries()
        .iter()
        .skip(start)
        .take(nav.page_size())
        .enumerate()
    {
        let Some(entry) = app.catalog().get(filtered.index()) else {
            continue;
        };
        let highlight = (query_len > 0).then(|| (filtered.match_start(), query_len));
        let fitted = fit_name(entry.name_bytes(), highlight, max_cols);
        let marker = if j == nav.cursor_row() { "> " } else { "  " };

        queue!(
            out,
            MoveTo(0, row(HEADER_ROWS + j)),
            Print(marker),
            Sgr(colors.get(LsColor::for_entry(entry))),
            Print(&fitted.head)
        )?;
        if highlight.is_some() {
            queue!(
                out,
                SetAttribute(Attribute::Underlined),
                Print(&fitted.matched)
            )?;
            if !fitted.ellipsis_underlined {
                queue!(out, SetAttribute(Attribute::NoUnderline))?;
            }
            queue!(out, Print(&fitted.tail))?;
        }
        if fitted.truncated {
            queue!(out, Print(ELLIPSIS))?;
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        if entry.is_dir() && !fitted.truncated {
            queue!(out, Print("/"))?;
        }
        queue!(out, Clear(ClearType::UntilNewLine))?;
        shown = j + 1;
    }

    // Scroll down indicator
    queue!(out, MoveTo(0, row(HEADER_ROWS + shown)))?;
    if start + nav.page_size() < view.len() {
        queue!(out, Print("↓"))?;
    }
    queue!(out, Clear(ClearType::FromCursorDown))?;

    if search.is_open() {
        let col = path_cols + 2 + search.cursor();
        queue!(out, Show, MoveTo(row(col), 0))?;
    } else {
        queue!(out, Hide)?;
    }

    queue!(out, EndSynchronizedUpdate)?;
    Ok(())
}

/// Moves the `>` marker from row `from` of the page to the current cursor row.
pub fn render_marker<W: Write>(out: &mut W, app: &AppState, from: usize) -> io::Result<()> {
    let to = app.nav().cursor_row();
    if from != to {
        queue!(out, MoveTo(0, row(HEADER_ROWS + from)), Print(" "))?;
    }
    queue!(out, MoveTo(0, row(HEADER_ROWS + to)), Print(">"))?;
    Ok(())
}

/// Draws the delete confirmation below the list.
pub fn render_prompt<W: Write>(out: &mut W, app: &AppState) -> io::Result<()> {
    let ActionMode::ConfirmDelete(pending) = app.mode() else {
        return Ok(());
    };
    queue!(
        out,
        MoveTo(0, row(HEADER_ROWS + app.nav().page_size())),
        Clear(ClearType::UntilNewLine),
        Print(pending.prompt())
    )?;
    Ok(())
}

/// Blanks the screen and homes the cursor.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}
