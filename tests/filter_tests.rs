//! Catalog and filter tests for explorer
//!
//! These tests build catalogs from real temporary directories and check the filtered
//! view against a naive rescan. Temporary directories are cleaned up automatically.

use explorer_tui::core::{Catalog, EntryKind, FileEntry, FilterView};
use rand::Rng;
use std::ffi::OsString;
use std::fs;
use tempfile::tempdir;

fn names(catalog: &Catalog, view: &FilterView) -> Vec<String> {
    view.entries()
        .iter()
        .map(|f| {
            catalog.entries()[f.index()]
                .name()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

/// Rescans the whole catalog for `query` with the same case rule.
fn naive(catalog: &Catalog, query: &[u8]) -> Vec<(usize, usize)> {
    let sensitive = query.iter().any(u8::is_ascii_uppercase);
    let needle: Vec<u8> = if sensitive {
        query.to_vec()
    } else {
        query.to_ascii_lowercase()
    };
    catalog
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, e)| {
            let hay: Vec<u8> = if sensitive {
                e.name_bytes().to_vec()
            } else {
                e.name_bytes().to_ascii_lowercase()
            };
            if needle.is_empty() {
                return Some((i, 0));
            }
            hay.windows(needle.len())
                .position(|w| w == needle.as_slice())
                .map(|off| (i, off))
        })
        .collect()
}

#[test]
fn test_catalog_sorts_and_hides_dotfiles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["b", "A", "a10", "a2"] {
        fs::File::create(dir.path().join(name))?;
    }
    fs::create_dir(dir.path().join(".git"))?;

    let mut catalog = Catalog::new();
    catalog.rebuild(dir.path())?;

    let listed: Vec<_> = catalog
        .entries()
        .iter()
        .map(|e| e.name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(listed, ["A", "a10", "a2", "b"]);
    Ok(())
}

#[test]
fn test_filter_case_rule_on_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["b", "A", "a10", "a2"] {
        fs::File::create(dir.path().join(name))?;
    }
    let mut catalog = Catalog::new();
    catalog.rebuild(dir.path())?;
    let mut view = FilterView::new();
    view.reset(&catalog);

    view.apply(&catalog, b"a");
    assert_eq!(names(&catalog, &view), ["A", "a10", "a2"]);
    assert!(view.entries().iter().all(|f| f.match_start() == 0));

    view.apply(&catalog, b"A");
    assert_eq!(names(&catalog, &view), ["A"]);
    Ok(())
}

#[test]
fn test_catalog_kinds() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("sub"))?;
    fs::File::create(dir.path().join("plain"))?;
    std::os::unix::fs::symlink("sub", dir.path().join("link"))?;

    let mut catalog = Catalog::new();
    catalog.rebuild(dir.path())?;

    let kind_of = |name: &str| {
        catalog
            .position(name.as_bytes())
            .and_then(|i| catalog.get(i))
            .map(FileEntry::kind)
    };
    assert_eq!(kind_of("sub"), Some(EntryKind::Directory));
    assert_eq!(kind_of("plain"), Some(EntryKind::Regular));
    assert_eq!(kind_of("link"), Some(EntryKind::Symlink));
    Ok(())
}

#[test]
fn test_unreadable_directory_gives_empty_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut catalog = Catalog::new();
    catalog.rebuild(&dir.path().join("missing"))?;
    assert!(catalog.is_empty());
    Ok(())
}

#[test]
fn test_incremental_matches_full_rescan() -> Result<(), Box<dyn std::error::Error>> {
    const ALPHABET: &[u8] = b"abcAB_.1";
    let mut rng = rand::rng();

    for _ in 0..50 {
        let count = rng.random_range(0..40);
        let entries: Vec<FileEntry> = (0..count)
            .map(|i| {
                let len = rng.random_range(1..8);
                let mut name: Vec<u8> = (0..len)
                    .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
                    .collect();
                // keep names unique and non-hidden
                name.insert(0, b'x');
                name.extend_from_slice(i.to_string().as_bytes());
                FileEntry::new(
                    OsString::from(String::from_utf8_lossy(&name).into_owned()),
                    EntryKind::Regular,
                    false,
                )
            })
            .collect();
        let catalog = Catalog::from_entries(entries)?;

        let mut view = FilterView::new();
        view.reset(&catalog);

        let mut query = Vec::new();
        for _ in 0..4 {
            query.push(ALPHABET[rng.random_range(0..ALPHABET.len())]);
            view.apply(&catalog, &query);

            let got: Vec<(usize, usize)> = view
                .entries()
                .iter()
                .map(|f| (f.index(), f.match_start()))
                .collect();
            assert_eq!(
                got,
                naive(&catalog, &query),
                "query {:?}",
                String::from_utf8_lossy(&query)
            );
        }
    }
    Ok(())
}

#[test]
fn test_match_offsets_point_at_query() -> Result<(), Box<dyn std::error::Error>> {
    let entries = ["Cargo.toml", "README.md", "src", "target"]
        .iter()
        .map(|n| FileEntry::new(OsString::from(n), EntryKind::Regular, false))
        .collect();
    let catalog = Catalog::from_entries(entries)?;
    let mut view = FilterView::new();
    view.reset(&catalog);

    view.apply(&catalog, b"r");
    for f in view.entries() {
        let name = catalog.entries()[f.index()].lowercase_name();
        assert_eq!(name[f.match_start()], b'r');
    }

    assert!(view.apply(&catalog, b"rg"));
    assert_eq!(names(&catalog, &view), ["Cargo.toml"]);

    // a shorter query rescans the whole catalog
    assert!(!view.apply(&catalog, b"a"));
    assert_eq!(names(&catalog, &view), ["Cargo.toml", "README.md", "target"]);
    Ok(())
}
