//! Directory catalog for explorer.
//!
//! Provides the [FileEntry] record, the [EntryKind] classification and the [Catalog],
//! the sorted in-memory listing of the current directory that every other part of
//! the session indexes into.

use crate::error::{ExplorerError, Result};

use std::ffi::{OsStr, OsString};
use std::fs::{self, FileType};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, PermissionsExt};
use std::path::Path;

/// Highest number of entries a catalog may hold; filtered views store `u32` indices.
pub const MAX_ENTRIES: usize = u32::MAX as usize;

/// Classification of a directory entry, used for coloring and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Unknown,
}

impl EntryKind {
    fn from_file_type(ft: FileType) -> Self {
        if ft.is_file() {
            EntryKind::Regular
        } else if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_block_device() {
            EntryKind::BlockDevice
        } else if ft.is_char_device() {
            EntryKind::CharDevice
        } else if ft.is_fifo() {
            EntryKind::Fifo
        } else if ft.is_socket() {
            EntryKind::Socket
        } else {
            EntryKind::Unknown
        }
    }
}

/// A single entry of the current directory.
///
/// Names are kept as raw bytes; the lowercase copy is an ASCII fold so byte offsets
/// found in it are valid offsets into the original name.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Box<OsStr>,
    name_lower: Box<[u8]>,
    kind: EntryKind,
    executable: bool,
}

impl FileEntry {
    /// Used to set the executable flag for regular files with any execute bit.
    pub(crate) const EXEC_FLAG: u32 = 0o111;

    pub fn new(name: OsString, kind: EntryKind, executable: bool) -> Self {
        let name_lower = name.as_bytes().to_ascii_lowercase().into_boxed_slice();
        FileEntry {
            name: name.into_boxed_os_str(),
            name_lower,
            kind,
            executable: executable && kind == EntryKind::Regular,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }

    #[inline]
    pub fn lowercase_name(&self) -> &[u8] {
        &self.name_lower
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.name.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.executable
    }
}

/// The sorted listing of one directory.
///
/// Hidden entries (leading `.`) are never part of a catalog. The only mutation is a
/// full [Catalog::rebuild].
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<FileEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from already collected entries, sorting them by name.
    pub fn from_entries(mut entries: Vec<FileEntry>) -> Result<Self> {
        check_capacity(entries.len())?;
        sort_entries(&mut entries);
        Ok(Self { entries })
    }

    #[inline]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&FileEntry> {
        self.entries.get(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-name lookup over the sorted entries.
    pub fn position(&self, name: &[u8]) -> Option<usize> {
        self.entries
            .binary_search_by(|e| e.name_bytes().cmp(name))
            .ok()
    }

    /// Replaces the catalog with the listing of `dir`.
    ///
    /// A directory that cannot be opened yields an empty catalog. Only exceeding
    /// [MAX_ENTRIES] is an error.
    pub fn rebuild(&mut self, dir: &Path) -> Result<()> {
        self.entries.clear();

        match browse_dir(dir, &mut self.entries) {
            Ok(()) => {}
            Err(ExplorerError::Io(e)) => {
                tracing::warn!("cannot read {}: {e}", dir.display());
                self.entries.clear();
                return Ok(());
            }
            Err(e) => {
                self.entries.clear();
                return Err(e);
            }
        }

        sort_entries(&mut self.entries);
        tracing::debug!("catalog of {} holds {} entries", dir.display(), self.len());
        Ok(())
    }
}

fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_unstable_by(|a, b| a.name_bytes().cmp(b.name_bytes()));
}

pub(crate) fn check_capacity(count: usize) -> Result<()> {
    if count > MAX_ENTRIES {
        return Err(ExplorerError::TooManyEntries);
    }
    Ok(())
}

/// Reads the visible entries of `path` into `out`.
///
/// Regular and unresolved entries get a follow-up `lstat` to settle their kind and
/// compute the executable bit. A failing `lstat` leaves the entry as reported.
pub(crate) fn browse_dir(path: &Path, out: &mut Vec<FileEntry>) -> Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let name = entry.file_name();
        if name.is_empty() || name.as_bytes()[0] == b'.' {
            continue;
        }

        check_capacity(out.len() + 1)?;

        let reported = entry.file_type().ok().map(EntryKind::from_file_type);
        let mut kind = reported.unwrap_or(EntryKind::Unknown);
        let mut executable = false;

        if matches!(kind, EntryKind::Regular | EntryKind::Unknown) {
            match fs::symlink_metadata(entry.path()) {
                Ok(md) => {
                    let ft = md.file_type();
                    if ft.is_dir() {
                        kind = EntryKind::Directory;
                    } else if ft.is_file() {
                        kind = EntryKind::Regular;
                        executable = md.permissions().mode() & FileEntry::EXEC_FLAG != 0;
                    } else if ft.is_symlink() {
                        kind = EntryKind::Symlink;
                    }
                }
                Err(e) => tracing::debug!("lstat {:?} failed: {e}", name),
            }
        }

        out.push(FileEntry::new(name, kind, executable));
    }
    Ok(())
}

/// Removes `name` inside `dir`; directories are removed with their contents.
///
/// Symlinks are removed themselves, never followed.
pub fn remove_recursive(dir: &Path, name: &OsStr) -> io::Result<()> {
    let target = dir.join(name);
    let md = fs::symlink_metadata(&target)?;
    if md.is_dir() {
        fs::remove_dir_all(&target)
    } else {
        fs::remove_file(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn names(catalog: &Catalog) -> Vec<String> {
        catalog
            .entries()
            .iter()
            .map(|e| e.name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn file_entry_lowercase_is_ascii_fold() {
        let entry = FileEntry::new(OsString::from("ReadMe.MD"), EntryKind::Regular, false);
        assert_eq!(entry.lowercase_name(), b"readme.md");
        assert_eq!(entry.len(), 9);
        assert!(!entry.is_dir());
    }

    #[test]
    fn executable_only_sticks_to_regular_files() {
        let dir = FileEntry::new(OsString::from("bin"), EntryKind::Directory, true);
        assert!(!dir.is_executable());
        let file = FileEntry::new(OsString::from("run.sh"), EntryKind::Regular, true);
        assert!(file.is_executable());
    }

    #[test]
    fn rebuild_sorts_bytewise_and_skips_hidden() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempdir()?;
        for name in ["b", "A", "a10", "a2"] {
            File::create(dir.path().join(name))?;
        }
        fs::create_dir(dir.path().join(".git"))?;
        File::create(dir.path().join(".hidden"))?;

        let mut catalog = Catalog::new();
        catalog.rebuild(dir.path())?;

        assert_eq!(names(&catalog), vec!["A", "a10", "a2", "b"]);
        Ok(())
    }

    #[test]
    fn rebuild_resolves_kinds_and_exec_bit() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        File::create(dir.path().join("plain.txt"))?;
        let script = dir.path().join("run.sh");
        File::create(&script)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o750))?;
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("link"))?;

        let mut catalog = Catalog::new();
        catalog.rebuild(dir.path())?;

        let kind_of = |name: &str| {
            catalog
                .position(name.as_bytes())
                .and_then(|i| catalog.get(i))
                .map(|e| (e.kind(), e.is_executable()))
        };
        assert_eq!(kind_of("sub"), Some((EntryKind::Directory, false)));
        assert_eq!(kind_of("plain.txt"), Some((EntryKind::Regular, false)));
        assert_eq!(kind_of("run.sh"), Some((EntryKind::Regular, true)));
        assert_eq!(kind_of("link"), Some((EntryKind::Symlink, false)));
        Ok(())
    }

    #[test]
    fn rebuild_of_missing_dir_is_empty() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut catalog = Catalog::from_entries(vec![FileEntry::new(
            OsString::from("stale"),
            EntryKind::Regular,
            false,
        )])?;
        catalog.rebuild(&PathBuf::from("/path/does/not/exist"))?;
        assert!(catalog.is_empty());
        Ok(())
    }

    #[test]
    fn capacity_overflow_is_fatal() {
        assert!(check_capacity(MAX_ENTRIES).is_ok());
        assert!(matches!(
            check_capacity(MAX_ENTRIES + 1),
            Err(ExplorerError::TooManyEntries)
        ));
    }

    #[test]
    fn position_finds_exact_names_only() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let entries = ["zeta", "alpha", "Mid"]
            .into_iter()
            .map(|n| FileEntry::new(OsString::from(n), EntryKind::Regular, false))
            .collect();
        let catalog = Catalog::from_entries(entries)?;
        assert_eq!(catalog.position(b"Mid"), Some(0));
        assert_eq!(catalog.position(b"zeta"), Some(2));
        assert_eq!(catalog.position(b"mid"), None);
        Ok(())
    }

    #[test]
    fn remove_recursive_handles_trees_and_symlinks() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempdir()?;
        let keep = dir.path().join("keep");
        fs::create_dir(&keep)?;
        File::create(keep.join("inner.txt"))?;

        let tree = dir.path().join("tree");
        fs::create_dir_all(tree.join("a/b"))?;
        File::create(tree.join("a/b/leaf"))?;
        std::os::unix::fs::symlink(&keep, tree.join("to_keep"))?;

        remove_recursive(dir.path(), OsStr::new("tree"))?;
        assert!(!tree.exists());
        assert!(keep.join("inner.txt").exists(), "symlink target must survive");

        assert!(remove_recursive(dir.path(), OsStr::new("nope")).is_err());
        Ok(())
    }
}
