//! Display formatting of names and paths for explorer.
//!
//! Names are raw bytes. They are decoded lossily, control characters are replaced
//! so they cannot move the terminal cursor, and the result is fitted to a column
//! budget with `unicode-width`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Appended to anything cut short.
pub const ELLIPSIS: &str = "…";

/// A name split around its match span and fitted to a column budget.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FittedName {
    pub head: String,
    pub matched: String,
    pub tail: String,
    /// The full name did not fit; an ellipsis follows the visible text.
    pub truncated: bool,
    /// The match runs past the visible text, so the ellipsis carries the underline.
    pub ellipsis_underlined: bool,
}

/// Decodes `bytes` for display, replacing control characters with `?`.
pub fn display_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}

#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` not wider than `cols` columns.
pub fn truncate_to_width(text: &str, cols: usize) -> String {
    let mut budget = cols;
    take_width(text, &mut budget)
}

fn take_width(text: &str, budget: &mut usize) -> String {
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if w > *budget {
            break;
        }
        *budget -= w;
        out.push(c);
    }
    out
}

/// Splits `name` at the byte span `highlight` (`start`, `len`) and fits it to
/// `max_cols` columns.
///
/// Query bytes are printable ASCII, so the span never cuts through a multi-byte
/// character.
pub fn fit_name(name: &[u8], highlight: Option<(usize, usize)>, max_cols: usize) -> FittedName {
    let (start, end) = match highlight {
        Some((start, len)) => {
            let start = start.min(name.len());
            (start, (start + len).min(name.len()))
        }
        None => (name.len(), name.len()),
    };

    let head = display_text(&name[..start]);
    let matched = display_text(&name[start..end]);
    let tail = display_text(&name[end..]);

    let total = display_width(&head) + display_width(&matched) + display_width(&tail);
    if total <= max_cols {
        return FittedName {
            head,
            matched,
            tail,
            truncated: false,
            ellipsis_underlined: false,
        };
    }

    let mut budget = max_cols;
    let fitted_head = take_width(&head, &mut budget);
    let fitted_match = take_width(&matched, &mut budget);
    let fitted_tail = take_width(&tail, &mut budget);
    let ellipsis_underlined = !matched.is_empty() && fitted_match.len() < matched.len();

    FittedName {
        head: fitted_head,
        matched: fitted_match,
        tail: fitted_tail,
        truncated: true,
        ellipsis_underlined,
    }
}

/// The path line text and its width in columns.
///
/// `tilde` marks a path already shortened to start with `~`; the alias survives
/// truncation.
pub fn fit_path(path: &str, tilde: bool, cols: usize) -> (String, usize) {
    let width = display_width(path);
    if width <= cols {
        return (path.to_string(), width);
    }

    let mut out = String::new();
    if tilde {
        out.push('~');
        out.push_str(&truncate_to_width(
            path.strip_prefix('~').unwrap_or(path),
            cols.saturating_sub(2),
        ));
    } else {
        out.push_str(&truncate_to_width(path, cols.saturating_sub(1)));
    }
    out.push_str(ELLIPSIS);
    let width = display_width(&out);
    (out, width)
}
