//! Core runtime logic for explorer.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: the directory [Catalog] and its [FileEntry] records.
//! - [filter]: the incremental substring filter over a catalog.
//! - [formatter]: sanitizing and fitting names and paths to the terminal width.
//! - [signals]: the signal pipe and the signals awaiting the event loop.
//! - [terminal]: raw mode, input waiting and the main event loop.

pub mod filter;
pub mod fm;
pub mod formatter;
pub mod signals;
pub mod terminal;

pub use filter::{FilterView, FilteredEntry};
pub use fm::{Catalog, EntryKind, FileEntry, remove_recursive};
