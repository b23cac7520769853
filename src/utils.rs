//! Miscellaneous utility functions for explorer.
//!
//! [cli] parses the command line; [helpers] runs the editor and shortens home paths.

pub mod cli;
pub mod helpers;

pub use helpers::{open_in_editor, shorten_home_path};
