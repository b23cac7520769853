//! The external editor taken from `$EDITOR`.

use std::ffi::{OsStr, OsString};

/// Program used by the "open in editor" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    cmd: OsString,
}

impl Editor {
    /// Builds an editor from the raw `$EDITOR` value. Empty values disable the action.
    ///
    /// The program is resolved against `PATH` right away so a later directory change
    /// cannot change which program runs. Unresolvable names are kept as given.
    pub fn new(raw: &OsStr) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let cmd = match which::which(raw) {
            Ok(path) => path.into_os_string(),
            Err(e) => {
                tracing::debug!("cannot resolve editor {:?}: {e}", raw);
                raw.to_os_string()
            }
        };
        Some(Editor { cmd })
    }

    pub fn from_env() -> Option<Self> {
        std::env::var_os("EDITOR").and_then(|raw| Self::new(&raw))
    }

    #[inline]
    pub fn cmd(&self) -> &OsStr {
        &self.cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::ffi::OsStrExt;

    #[test]
    fn empty_editor_disables_action() {
        assert_eq!(Editor::new(OsStr::new("")), None);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let editor = Editor::new(OsStr::new("/bin/sh"));
        assert!(editor.is_some_and(|e| e.cmd().as_bytes().ends_with(b"sh")));
    }

    #[test]
    fn unknown_program_keeps_raw_name() {
        let editor = Editor::new(OsStr::new("surely-not-an-installed-editor"));
        let editor = editor.expect("non-empty value yields an editor");
        assert_eq!(editor.cmd(), OsStr::new("surely-not-an-installed-editor"));
    }
}
