//! Key decoding and the fixed key-to-action table for explorer.
//!
//! Raw terminal bytes are turned into [Key] values by [read_key]. Escape sequences
//! for arrows, Home/End, Delete, paging and the Ctrl-modified keys are recognized;
//! anything else after an ESC is consumed and reported as [Key::Ignored].

use std::io;

/// A decoded keypress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII (32..=126).
    Char(u8),
    Enter,
    Backspace,
    DeleteWordBack,
    DeleteToStart,
    Interrupt,
    Suspend,
    DoubleEscape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    PageUp,
    PageDown,
    CtrlLeft,
    CtrlRight,
    CtrlDelete,
    /// Unrecognized input, already consumed.
    Ignored,
}

/// Byte-at-a-time input.
///
/// `Ok(None)` means no byte is coming: input ended, or the source gave up waiting
/// because a signal needs handling. A sequence cut short this way decodes to
/// [Key::Ignored].
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let bytes: &[u8] = *self;
        let Some((&b, rest)) = bytes.split_first() else {
            return Ok(None);
        };
        *self = rest;
        Ok(Some(b))
    }
}

const ESC: u8 = 0x1b;
/// xterm modifier parameter for Ctrl.
const MOD_CTRL: u8 = b'5';

/// Reads one key. Returns `Ok(None)` when the source gives up before a key starts.
pub fn read_key<S: ByteSource + ?Sized>(src: &mut S) -> io::Result<Option<Key>> {
    let Some(b) = src.read_byte()? else {
        return Ok(None);
    };

    let key = match b {
        b'\n' | b'\r' => Key::Enter,
        127 => Key::Backspace,
        8 | 23 => Key::DeleteWordBack,
        21 => Key::DeleteToStart,
        3 => Key::Interrupt,
        26 => Key::Suspend,
        ESC => read_escape(src)?,
        32..=126 => Key::Char(b),
        _ => Key::Ignored,
    };
    Ok(Some(key))
}

/// Decodes whatever follows an ESC byte. End of input mid-sequence is [Key::Ignored].
fn read_escape<S: ByteSource + ?Sized>(src: &mut S) -> io::Result<Key> {
    match src.read_byte()? {
        Some(ESC) => Ok(Key::DoubleEscape),
        Some(b'[') | Some(b'O') => read_sequence(src),
        _ => Ok(Key::Ignored),
    }
}

fn read_sequence<S: ByteSource + ?Sized>(src: &mut S) -> io::Result<Key> {
    let Some(code) = src.read_byte()? else {
        return Ok(Key::Ignored);
    };

    let key = match code {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'1' => match src.read_byte()? {
            Some(b'~') => Key::Home,
            Some(b';') => match read_modified(src)? {
                Some((MOD_CTRL, b'C')) => Key::CtrlRight,
                Some((MOD_CTRL, b'D')) => Key::CtrlLeft,
                _ => Key::Ignored,
            },
            _ => Key::Ignored,
        },
        b'3' => match src.read_byte()? {
            Some(b'~') => Key::Delete,
            Some(b';') => match read_modified(src)? {
                Some((MOD_CTRL, b'~')) => Key::CtrlDelete,
                _ => Key::Ignored,
            },
            _ => Key::Ignored,
        },
        b'4' | b'5' | b'6' => match src.read_byte()? {
            Some(b'~') => match code {
                b'4' => Key::End,
                b'5' => Key::PageUp,
                _ => Key::PageDown,
            },
            _ => Key::Ignored,
        },
        _ => Key::Ignored,
    };
    Ok(key)
}

/// Reads the `<modifier><final>` pair after a `;`.
fn read_modified<S: ByteSource + ?Sized>(src: &mut S) -> io::Result<Option<(u8, u8)>> {
    let Some(modifier) = src.read_byte()? else {
        return Ok(None);
    };
    Ok(src.read_byte()?.map(|fin| (modifier, fin)))
}

/// Normal-mode actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    GoUp,
    GoDown,
    GoParent,
    GoIntoDir,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    OpenSearch,
    Select,
    ClearSearch,
    Delete,
    OpenEditor,
    Quit,
    Interrupt,
    Suspend,
}

impl Action {
    /// Looks up the normal-mode binding of `key`.
    #[rustfmt::skip]
    pub fn lookup(key: Key) -> Option<Self> {
        let action = match key {
            Key::Up                             => Action::GoUp,
            Key::Down                           => Action::GoDown,
            Key::Left                           => Action::GoParent,
            Key::Right                          => Action::GoIntoDir,
            Key::Home | Key::Char(b'g')         => Action::GoToTop,
            Key::End | Key::Char(b'G')          => Action::GoToBottom,
            Key::PageUp | Key::Char(b'u')       => Action::PageUp,
            Key::PageDown | Key::Char(b'd')     => Action::PageDown,
            Key::Char(b'/')                     => Action::OpenSearch,
            Key::Enter                          => Action::Select,
            Key::DoubleEscape                   => Action::ClearSearch,
            Key::Delete | Key::Char(b'D')       => Action::Delete,
            Key::Char(b'e')                     => Action::OpenEditor,
            Key::Char(b'q')                     => Action::Quit,
            Key::Interrupt                      => Action::Interrupt,
            Key::Suspend                        => Action::Suspend,
            _ => return None,
        };
        Some(action)
    }
}
