//! File-kind colors for explorer, read from `LS_COLORS`.
//!
//! `LS_COLORS` is a colon separated list of `key=params` pairs. Only the twenty
//! two-letter type keys are recognized; glob patterns (`*.rs=...`) and malformed
//! pairs are skipped. Parameters are kept verbatim and emitted as an SGR sequence.

use crate::core::fm::{EntryKind, FileEntry};

use phf::phf_map;

/// The two-letter `LS_COLORS` type keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LsColor {
    No,
    Fi,
    Rs,
    Di,
    Ln,
    Mh,
    Pi,
    So,
    Do,
    Bd,
    Cd,
    Or,
    Mi,
    Su,
    Sg,
    Ca,
    Tw,
    Ow,
    St,
    Ex,
}

impl LsColor {
    pub const COUNT: usize = 20;

    /// Color used for an entry of the given kind.
    pub fn for_kind(kind: EntryKind, executable: bool) -> Self {
        match kind {
            EntryKind::BlockDevice => LsColor::Bd,
            EntryKind::CharDevice => LsColor::Cd,
            EntryKind::Directory => LsColor::Di,
            EntryKind::Fifo => LsColor::Pi,
            EntryKind::Symlink => LsColor::Ln,
            EntryKind::Regular if executable => LsColor::Ex,
            EntryKind::Socket => LsColor::So,
            EntryKind::Regular | EntryKind::Unknown => LsColor::Fi,
        }
    }

    pub fn for_entry(entry: &FileEntry) -> Self {
        Self::for_kind(entry.kind(), entry.is_executable())
    }
}

static LS_COLOR_KEYS: phf::Map<&'static str, LsColor> = phf_map! {
    "no" => LsColor::No,
    "fi" => LsColor::Fi,
    "rs" => LsColor::Rs,
    "di" => LsColor::Di,
    "ln" => LsColor::Ln,
    "mh" => LsColor::Mh,
    "pi" => LsColor::Pi,
    "so" => LsColor::So,
    "do" => LsColor::Do,
    "bd" => LsColor::Bd,
    "cd" => LsColor::Cd,
    "or" => LsColor::Or,
    "mi" => LsColor::Mi,
    "su" => LsColor::Su,
    "sg" => LsColor::Sg,
    "ca" => LsColor::Ca,
    "tw" => LsColor::Tw,
    "ow" => LsColor::Ow,
    "st" => LsColor::St,
    "ex" => LsColor::Ex,
};

/// SGR parameters per [LsColor]; an unset slot renders as a plain reset.
#[derive(Debug, Default, Clone)]
pub struct ColorTable {
    params: [String; LsColor::COUNT],
}

impl ColorTable {
    /// Parses an `LS_COLORS` value. Later pairs override earlier ones.
    pub fn parse(ls_colors: &str) -> Self {
        let mut table = ColorTable::default();
        for pair in ls_colors.split(':') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let Some(&color) = LS_COLOR_KEYS.get(key) else {
                continue;
            };
            let end = value
                .find(|c: char| !(c.is_ascii_digit() || c == ';'))
                .unwrap_or(value.len());
            if end > 0 {
                table.params[color as usize] = value[..end].to_string();
            }
        }
        table
    }

    /// Reads `LS_COLORS` from the environment; unset means no colors.
    pub fn from_env() -> Self {
        match std::env::var("LS_COLORS") {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::default(),
        }
    }

    #[inline]
    pub fn get(&self, color: LsColor) -> &str {
        &self.params[color as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_keys_and_skips_the_rest() {
        let table = ColorTable::parse("rs=0:di=01;34:ln=01;36:*.tar=01;31:ex=01;32:xx=5:fi");
        assert_eq!(table.get(LsColor::Di), "01;34");
        assert_eq!(table.get(LsColor::Ln), "01;36");
        assert_eq!(table.get(LsColor::Ex), "01;32");
        assert_eq!(table.get(LsColor::Rs), "0");
        assert_eq!(table.get(LsColor::Fi), "");
    }

    #[test]
    fn value_stops_at_first_foreign_char() {
        let table = ColorTable::parse("di=38;5;33x:so=:pi=abc");
        assert_eq!(table.get(LsColor::Di), "38;5;33");
        assert_eq!(table.get(LsColor::So), "");
        assert_eq!(table.get(LsColor::Pi), "");
    }

    #[test]
    fn keys_must_be_exactly_two_letters() {
        let table = ColorTable::parse("dir=01;34:d=1:ex=32");
        assert_eq!(table.get(LsColor::Di), "");
        assert_eq!(table.get(LsColor::Ex), "32");
    }

    #[test]
    fn kind_mapping() {
        assert_eq!(LsColor::for_kind(EntryKind::Regular, true), LsColor::Ex);
        assert_eq!(LsColor::for_kind(EntryKind::Regular, false), LsColor::Fi);
        assert_eq!(LsColor::for_kind(EntryKind::Unknown, false), LsColor::Fi);
        assert_eq!(LsColor::for_kind(EntryKind::Symlink, false), LsColor::Ln);
        assert_eq!(LsColor::for_kind(EntryKind::BlockDevice, false), LsColor::Bd);
        assert_eq!(LsColor::for_kind(EntryKind::CharDevice, false), LsColor::Cd);
        assert_eq!(LsColor::for_kind(EntryKind::Fifo, false), LsColor::Pi);
        assert_eq!(LsColor::for_kind(EntryKind::Socket, false), LsColor::So);
    }
}
