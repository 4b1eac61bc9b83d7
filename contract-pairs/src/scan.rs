//! Recursive discovery of example sources.

use std::path::{Component, Path};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    errors::{PairingError, Result},
    model::{ArtifactRef, Language, SkippedFile},
    normalize::{logical_name, module_name},
};

/// Lists every `language` source under `root`, sorted by relative path.
///
/// Foundry test/script files (`*.t.sol`, `*.s.sol`) are not contracts and are
/// left out. Entries below `root` that cannot be walked (dangling links,
/// unreadable directories) are appended to `skipped`.
///
/// # Errors
/// [`PairingError::Io`] when `root` itself is missing or not a directory.
pub fn scan(root: &Path, language: Language, skipped: &mut Vec<SkippedFile>) -> Result<Vec<ArtifactRef>> {
    let meta = std::fs::metadata(root).map_err(|source| PairingError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(PairingError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let mut out = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || keep_entry(e, language));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                let path = e.path().unwrap_or(root);
                warn!(target: "contract_pairs::scan", path = %path.display(), error = %e, "skipping entry");
                skipped.push(SkippedFile {
                    path: relative(root, path),
                    reason: e.to_string(),
                });
                continue;
            }
            Err(e) => {
                return Err(PairingError::Io {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    source: e.into(),
                });
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(language.extension()) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if file_name.ends_with(".t.sol") || file_name.ends_with(".s.sol") {
            debug!(target: "contract_pairs::scan", path = %path.display(), "skip foundry test/script");
            continue;
        }
        let (Some(logical), Some(display)) = (logical_name(path), module_name(path)) else {
            debug!(target: "contract_pairs::scan", path = %path.display(), "skip unnamed file");
            continue;
        };

        out.push(ArtifactRef {
            path: path.to_path_buf(),
            relative_path: relative(root, path),
            language,
            logical_name: logical,
            display_name: display,
        });
    }

    out.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    info!(
        target: "contract_pairs::scan",
        root = %root.display(),
        ?language,
        files = out.len(),
        "scan done"
    );
    Ok(out)
}

/// Skips hidden and build/vendor directories.
fn keep_entry(entry: &DirEntry, language: Language) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    match name {
        "node_modules" | "target" | "out" | "cache" | "broadcast" => false,
        // forge dependencies
        "lib" => language != Language::Solidity,
        _ => true,
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "x").unwrap();
    }

    #[test]
    fn finds_sources_and_skips_vendor_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/Flipper.sol");
        touch(root, "src/Counter.sol");
        touch(root, "test/Flipper.t.sol");
        touch(root, "lib/forge-std/src/Test.sol");
        touch(root, "node_modules/x/Token.sol");
        touch(root, ".hidden/Secret.sol");
        touch(root, "README.md");

        let found = scan(root, Language::Solidity, &mut Vec::new()).unwrap();
        let rels: Vec<_> = found.iter().map(|a| a.relative_path.as_str()).collect();
        assert_eq!(rels, ["src/Counter.sol", "src/Flipper.sol"]);
        assert_eq!(found[1].logical_name, "flipper");
        assert_eq!(found[1].display_name, "Flipper");
    }

    #[test]
    fn ink_side_uses_module_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "erc20/lib.rs");
        touch(dir.path(), "erc20/target/debug/build.rs");

        let found = scan(dir.path(), Language::Ink, &mut Vec::new()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].relative_path, "erc20/lib.rs");
        assert_eq!(found[0].logical_name, "erc20");
    }

    #[test]
    fn missing_root_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan(&dir.path().join("nope"), Language::Ink, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, PairingError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_below_root_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "flipper/lib.rs");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("broken.rs")).unwrap();

        let mut skipped = Vec::new();
        let found = scan(dir.path(), Language::Ink, &mut skipped).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, "broken.rs");
    }
}
