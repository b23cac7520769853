//! Session logic for explorer.
//!
//! - [state]: the [AppState] aggregate, [KeypressResult] and [Redraw].
//! - [handlers]: what each action and search key does to the state.
//! - [actions]: input modes, including the delete confirmation.
//! - [keymap]: byte-level key decoding and the normal-mode bindings.
//! - [nav]: cursor/page arithmetic and the directory history.
//! - [search]: the editable query of the search box.

pub mod actions;
pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod search;
pub mod state;

pub use keymap::{Action, ByteSource, Key, read_key};
pub use nav::{DirHistory, NavState};
pub use search::SearchState;
pub use state::{AppState, KeypressResult, LayoutMetrics, Redraw};
