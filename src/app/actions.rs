//! Input modes of the session.
//!
//! Normal and search input both go through the key decoder. A pending delete
//! confirmation reads raw bytes instead, see [Confirm::from_byte].

use crate::core::formatter::display_text;

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

/// Entry waiting for a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    name: OsString,
}

impl PendingDelete {
    pub fn new(name: &OsStr) -> Self {
        Self {
            name: name.to_os_string(),
        }
    }

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn prompt(&self) -> String {
        format!("Delete '{}'? (y/n) ", display_text(self.name.as_bytes()))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ActionMode {
    #[default]
    Normal,
    ConfirmDelete(PendingDelete),
}

/// Answer to the delete prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
    /// Any other byte; the prompt stays up.
    Undecided,
}

impl Confirm {
    pub fn from_byte(b: u8) -> Self {
        match b {
            b'y' | b'Y' => Confirm::Yes,
            b'n' | b'N' | 0x1b => Confirm::No,
            _ => Confirm::Undecided,
        }
    }
}
