//! Runtime configuration for explorer.
//!
//! There is no configuration file. Everything comes from the environment once at
//! start-up: `HOME` for the `~` alias, `EDITOR` for the open action and
//! `LS_COLORS` for entry colors.

pub mod editor;
pub mod theme;

pub use editor::Editor;
pub use theme::{ColorTable, LsColor};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct Config {
    home: Option<PathBuf>,
    editor: Option<Editor>,
    colors: ColorTable,
}

impl Config {
    pub fn new(home: Option<PathBuf>, editor: Option<Editor>, colors: ColorTable) -> Self {
        Self {
            home,
            editor,
            colors,
        }
    }

    /// Assembles the configuration from `HOME`, `EDITOR` and `LS_COLORS`.
    ///
    /// An unset or empty `HOME` disables the `~` alias.
    pub fn from_env() -> Self {
        let config = Self::new(
            home_from(std::env::var_os("HOME")),
            Editor::from_env(),
            ColorTable::from_env(),
        );
        tracing::debug!(
            home = ?config.home,
            editor = ?config.editor.as_ref().map(Editor::cmd),
            "configuration loaded"
        );
        config
    }

    #[inline]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    #[inline]
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    #[inline]
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }
}

/// The `~` alias target for a raw `HOME` value.
fn home_from(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|h| !h.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_comes_only_from_the_variable() {
        assert_eq!(home_from(None), None);
        assert_eq!(home_from(Some(OsString::new())), None);
        assert_eq!(
            home_from(Some(OsString::from("/home/ana"))),
            Some(PathBuf::from("/home/ana"))
        );
    }

    #[test]
    fn default_config_has_no_home_or_editor() {
        let config = Config::default();
        assert!(config.home().is_none());
        assert!(config.editor().is_none());
    }
}
