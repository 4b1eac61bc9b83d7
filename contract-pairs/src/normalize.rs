//! File path → logical contract name.

use std::path::Path;

/// Crate-root file names that take their module name from the parent directory.
const MODULE_FILES: &[&str] = &["lib", "mod", "main"];

/// Suffixes dropped after lower-casing, when something is left.
const SUFFIXES: &[&str] = &["contract", "example"];

/// Display name for a file: the stem, or the parent directory for `lib.rs`-style files.
pub fn module_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if MODULE_FILES.contains(&stem) {
        let parent = path.parent()?.file_name()?.to_str()?;
        return Some(parent.to_string());
    }
    Some(stem.to_string())
}

/// Lower-cases, drops non-alphanumerics, then strips one known suffix.
///
/// `SimpleERC20` → `simpleerc20`, `CallerContract` → `caller`,
/// `contract-storage` → `contractstorage`.
pub fn normalize_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    for suffix in SUFFIXES {
        if name.len() > suffix.len() && name.ends_with(suffix) {
            name.truncate(name.len() - suffix.len());
            break;
        }
    }
    name
}

/// Logical name of a source file, `None` for paths without a usable name.
pub fn logical_name(path: &Path) -> Option<String> {
    let name = normalize_name(&module_name(path)?);
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_names() {
        let cases = [
            ("src/Flipper.sol", "flipper"),
            ("flipper.rs", "flipper"),
            ("flipper/lib.rs", "flipper"),
            ("erc20/lib.rs", "erc20"),
            ("SimpleERC20.sol", "simpleerc20"),
            ("CallerContract.sol", "caller"),
            ("basic-contract-caller/lib.rs", "basiccontractcaller"),
            ("basic-contract-caller/other-contract/lib.rs", "other"),
            ("contract-storage/lib.rs", "contractstorage"),
            ("Contract.sol", "contract"),
            ("multisig/mod.rs", "multisig"),
        ];
        for (path, want) in cases {
            assert_eq!(logical_name(Path::new(path)).as_deref(), Some(want), "{path}");
        }
    }

    #[test]
    fn punctuation_only_name_has_no_logical_name() {
        assert_eq!(logical_name(Path::new("___.sol")), None);
    }

    #[test]
    fn module_name_keeps_original_spelling() {
        assert_eq!(module_name(Path::new("a/SimpleNFT.sol")).as_deref(), Some("SimpleNFT"));
        assert_eq!(module_name(Path::new("erc721/lib.rs")).as_deref(), Some("erc721"));
    }
}
