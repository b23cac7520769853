//! Terminal output for explorer.
//!
//! [render] paints frames with crossterm commands; see [render::redraw] for the
//! entry point used by the event loop.

pub mod render;

pub use render::{clear_screen, redraw, render, render_marker, render_prompt};
