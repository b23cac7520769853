//! Helpers for explorer.
//!
//! - Running the configured editor on an entry with the terminal in cooked mode
//! - Displaying the home directory as "~" in the path line

use crate::config::Editor;
use crate::core::formatter::display_text;

use crossterm::{
    cursor::{MoveTo, Show},
    execute,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};

use std::ffi::OsStr;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::process::Command;

/// Opens `name` inside `dir` in the configured editor.
///
/// Raw mode is disabled and the screen cleared while the editor runs, and raw mode
/// is restored afterwards even when the editor could not be started. The caller
/// repaints.
pub fn open_in_editor(editor: &Editor, dir: &Path, name: &OsStr) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stderr(), Clear(ClearType::All), MoveTo(0, 0), Show)?;

    let status = Command::new(editor.cmd())
        .arg(name)
        .current_dir(dir)
        .status();

    enable_raw_mode()?;
    let status = status?;
    if !status.success() {
        tracing::debug!("editor exited with {status}");
    }
    Ok(())
}

/// Display form of `path` with `home` collapsed to `~`.
///
/// Returns the text and whether it starts with the alias.
pub fn shorten_home_path(path: &Path, home: Option<&Path>) -> (String, bool) {
    if let Some(home) = home
        && home.parent().is_some()
        && let Ok(stripped) = path.strip_prefix(home)
    {
        if stripped.as_os_str().is_empty() {
            return ("~".to_string(), true);
        }
        let rest = display_text(stripped.as_os_str().as_bytes());
        return (format!("~/{rest}"), true);
    }
    (display_text(path.as_os_str().as_bytes()), false)
}
