//! Binds Solidity examples to their ink! counterparts.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    catalog::{self, CatalogEntry},
    errors::{PairingError, Result},
    model::{ArtifactRef, Category, ContractPair, Language, MatchReport, SkippedFile},
    scan::scan,
};

/// Walks both trees and pairs every Solidity file with its ink! counterpart.
///
/// Resolution per Solidity file:
/// 1. catalog entry → its canonical ink! path, else the first unused ink! file
///    with the catalog's expected logical name;
/// 2. no catalog entry → the first unused ink! file with the same logical name,
///    categorized as [`Category::Other`].
///
/// Files that cannot be walked or read, or are not valid UTF-8, are skipped
/// with a warning and listed in [`MatchReport::skipped`].
///
/// # Errors
/// - [`PairingError::Io`] when a root is missing or not a directory
/// - [`PairingError::DuplicateLogicalName`] when two Solidity files share a logical name
pub fn find_pairs(dir_a: &Path, dir_b: &Path) -> Result<MatchReport> {
    let mut report = MatchReport::default();
    let sol = scan(dir_a, Language::Solidity, &mut report.skipped)?;
    let ink = scan(dir_b, Language::Ink, &mut report.skipped)?;
    ensure_unique(&sol)?;

    let by_relative: HashMap<&str, usize> = ink
        .iter()
        .enumerate()
        .map(|(i, b)| (b.relative_path.as_str(), i))
        .collect();

    let mut used_b = HashSet::<usize>::new();
    let mut skipped_b = HashSet::<usize>::new();

    for a in &sol {
        let entry = catalog::lookup(&a.logical_name);
        let taken = |i: usize| used_b.contains(&i) || skipped_b.contains(&i);
        let Some(b_idx) = resolve(a, entry, &ink, &by_relative, taken) else {
            debug!(target: "contract_pairs::matcher", file = %a.relative_path, "no counterpart");
            report.unmatched_a.push(a.relative_path.clone());
            continue;
        };
        let b = &ink[b_idx];

        let Some(content_a) = read_or_skip(a, &mut report.skipped) else {
            continue;
        };
        let Some(content_b) = read_or_skip(b, &mut report.skipped) else {
            skipped_b.insert(b_idx);
            report.unmatched_a.push(a.relative_path.clone());
            continue;
        };

        used_b.insert(b_idx);
        let (category, description) = match entry {
            Some(e) => (e.category, e.description.to_string()),
            None => (Category::Other, catalog::generic_description(&a.display_name)),
        };

        debug!(
            target: "contract_pairs::matcher",
            pair = %a.logical_name,
            a = %a.relative_path,
            b = %b.relative_path,
            %category,
            "paired"
        );
        report.pairs.push(ContractPair {
            pair_id: a.logical_name.clone(),
            name_a: a.display_name.clone(),
            name_b: b.display_name.clone(),
            path_a: a.relative_path.clone(),
            path_b: b.relative_path.clone(),
            content_a,
            content_b,
            category,
            description,
        });
    }

    report.unmatched_b = ink
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_b.contains(i) && !skipped_b.contains(i))
        .map(|(_, b)| b.relative_path.clone())
        .collect();
    report.pairs.sort_by(|x, y| x.pair_id.cmp(&y.pair_id));

    info!(
        target: "contract_pairs::matcher",
        pairs = report.pairs.len(),
        unmatched_a = report.unmatched_a.len(),
        unmatched_b = report.unmatched_b.len(),
        skipped = report.skipped.len(),
        "matching done"
    );
    Ok(report)
}

fn ensure_unique(sol: &[ArtifactRef]) -> Result<()> {
    let mut seen = BTreeMap::<&str, &ArtifactRef>::new();
    for a in sol {
        if let Some(first) = seen.insert(a.logical_name.as_str(), a) {
            return Err(PairingError::DuplicateLogicalName {
                name: a.logical_name.clone(),
                first: first.path.clone(),
                second: a.path.clone(),
            });
        }
    }
    Ok(())
}

fn resolve(
    a: &ArtifactRef,
    entry: Option<&CatalogEntry>,
    ink: &[ArtifactRef],
    by_relative: &HashMap<&str, usize>,
    taken: impl Fn(usize) -> bool,
) -> Option<usize> {
    let wanted = match entry {
        Some(e) => {
            if let Some(&i) = by_relative.get(e.ink_path) {
                if !taken(i) {
                    return Some(i);
                }
            }
            e.ink_logical_name()?
        }
        None => a.logical_name.clone(),
    };
    ink.iter()
        .enumerate()
        .find(|(i, b)| b.logical_name == wanted && !taken(*i))
        .map(|(i, _)| i)
}

/// Reads a file as UTF-8. Unreadable or undecodable files are recorded and
/// yield `None`.
fn read_or_skip(artifact: &ArtifactRef, skipped: &mut Vec<SkippedFile>) -> Option<String> {
    let reason = match read_text(&artifact.path) {
        Ok(text) => return Some(text),
        Err(PairingError::Encoding(_)) => "not valid UTF-8".to_string(),
        Err(e) => e.to_string(),
    };
    warn!(
        target: "contract_pairs::matcher",
        path = %artifact.path.display(),
        %reason,
        "skipping file"
    );
    skipped.push(SkippedFile {
        path: artifact.relative_path.clone(),
        reason,
    });
    None
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| PairingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| PairingError::Encoding(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(root: &Path, rel: &str, body: &[u8]) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, body).unwrap();
    }

    const SOL_FLIPPER: &str = "contract Flipper { bool public value; function flip() public { value = !value; } }";
    const INK_FLIPPER: &str = "#[ink::contract]\nmod flipper { #[ink(storage)] pub struct Flipper { value: bool } }";

    #[test]
    fn single_flipper_on_each_side_pairs() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "flipper.sol", SOL_FLIPPER.as_bytes());
        write(b.path(), "flipper.rs", INK_FLIPPER.as_bytes());

        let report = find_pairs(a.path(), b.path()).unwrap();
        assert_eq!(report.pairs.len(), 1);
        let pair = &report.pairs[0];
        assert_eq!(pair.pair_id, "flipper");
        assert_eq!(pair.content_a, SOL_FLIPPER);
        assert_eq!(pair.content_b, INK_FLIPPER);
        assert_eq!(pair.category, Category::Storage);
        assert!(report.unmatched_a.is_empty());
        assert!(report.unmatched_b.is_empty());
    }

    #[test]
    fn catalog_maps_differently_named_counterparts() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "src/SimpleERC20.sol", b"contract SimpleERC20 {}");
        write(a.path(), "src/Counter.sol", b"contract Counter {}");
        write(a.path(), "src/CallerContract.sol", b"contract CallerContract {}");
        write(b.path(), "erc20/lib.rs", b"mod erc20 {}");
        write(b.path(), "incrementer/lib.rs", b"mod incrementer {}");
        write(b.path(), "basic-contract-caller/lib.rs", b"mod caller {}");
        write(b.path(), "basic-contract-caller/other-contract/lib.rs", b"mod other {}");

        let report = find_pairs(a.path(), b.path()).unwrap();
        let ids: Vec<_> = report.pairs.iter().map(|p| p.pair_id.as_str()).collect();
        assert_eq!(ids, ["caller", "counter", "simpleerc20"]);

        let erc20 = report.pairs.iter().find(|p| p.pair_id == "simpleerc20").unwrap();
        assert_eq!(erc20.name_a, "SimpleERC20");
        assert_eq!(erc20.name_b, "erc20");
        assert_eq!(erc20.category, Category::Token);
        assert_eq!(report.unmatched_b, ["basic-contract-caller/other-contract/lib.rs"]);
    }

    #[test]
    fn unresolvable_files_are_reported_not_paired() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "Flipper.sol", SOL_FLIPPER.as_bytes());
        write(a.path(), "UniswapPair.sol", b"contract UniswapPair {}");
        write(b.path(), "flipper/lib.rs", INK_FLIPPER.as_bytes());
        write(b.path(), "dns/lib.rs", b"mod dns {}");

        let report = find_pairs(a.path(), b.path()).unwrap();
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.unmatched_a, ["UniswapPair.sol"]);
        assert_eq!(report.unmatched_b, ["dns/lib.rs"]);
        for p in &report.pairs {
            assert!(!report.unmatched_a.contains(&p.path_a));
            assert!(!report.unmatched_b.contains(&p.path_b));
        }
    }

    #[test]
    fn uncatalogued_names_pair_by_identity() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "Vesting.sol", b"contract Vesting {}");
        write(b.path(), "vesting/lib.rs", b"mod vesting {}");

        let report = find_pairs(a.path(), b.path()).unwrap();
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].category, Category::Other);
        assert!(report.pairs[0].description.contains("Vesting"));
    }

    #[test]
    fn duplicate_solidity_logical_names_fail() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "v1/Flipper.sol", b"contract Flipper {}");
        write(a.path(), "v2/flipper.sol", b"contract Flipper {}");

        let err = find_pairs(a.path(), b.path()).unwrap_err();
        assert!(matches!(err, PairingError::DuplicateLogicalName { ref name, .. } if name == "flipper"));
    }

    #[test]
    fn non_utf8_file_is_skipped_and_matching_continues() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "Flipper.sol", SOL_FLIPPER.as_bytes());
        write(a.path(), "Counter.sol", &[0xff, 0xfe, 0x00, 0x41]);
        write(b.path(), "flipper/lib.rs", INK_FLIPPER.as_bytes());
        write(b.path(), "incrementer/lib.rs", b"mod incrementer {}");

        let report = find_pairs(a.path(), b.path()).unwrap();
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].pair_id, "flipper");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, "Counter.sol");
        assert_eq!(report.unmatched_b, ["incrementer/lib.rs"]);
    }

    #[test]
    fn ink_file_skipped_once_when_two_solidity_files_want_it() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "Counter.sol", b"contract Counter {}");
        write(a.path(), "Incrementer.sol", b"contract Incrementer {}");
        write(b.path(), "incrementer/lib.rs", &[0xff, 0xfe, 0x00]);

        let report = find_pairs(a.path(), b.path()).unwrap();
        assert!(report.pairs.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, "incrementer/lib.rs");
        assert_eq!(report.unmatched_a, ["Counter.sol", "Incrementer.sol"]);
        assert!(report.unmatched_b.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped_and_matching_continues() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "Flipper.sol", SOL_FLIPPER.as_bytes());
        write(b.path(), "flipper/lib.rs", INK_FLIPPER.as_bytes());
        std::os::unix::fs::symlink(b.path().join("gone/target.rs"), b.path().join("broken.rs"))
            .unwrap();

        let report = find_pairs(a.path(), b.path()).unwrap();
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].pair_id, "flipper");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, "broken.rs");
    }

    #[test]
    fn file_vanishing_before_read_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ArtifactRef {
            path: dir.path().join("Flipper.sol"),
            relative_path: "Flipper.sol".into(),
            language: Language::Solidity,
            logical_name: "flipper".into(),
            display_name: "Flipper".into(),
        };
        let mut skipped = Vec::new();

        assert_eq!(read_or_skip(&artifact, &mut skipped), None);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, "Flipper.sol");
        assert!(!skipped[0].reason.is_empty());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let a = tempfile::tempdir().unwrap();
        let err = find_pairs(a.path(), &a.path().join("missing")).unwrap_err();
        assert!(matches!(err, PairingError::Io { .. }));
    }

    #[test]
    fn deterministic_across_runs() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "Flipper.sol", SOL_FLIPPER.as_bytes());
        write(a.path(), "EventEmitter.sol", b"contract EventEmitter {}");
        write(b.path(), "flipper/lib.rs", INK_FLIPPER.as_bytes());
        write(b.path(), "events/lib.rs", b"mod events {}");

        let first = find_pairs(a.path(), b.path()).unwrap();
        let second = find_pairs(a.path(), b.path()).unwrap();
        assert_eq!(first.pairs, second.pairs);
    }
}
