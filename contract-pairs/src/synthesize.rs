//! Contract pair → Markdown training document.
//!
//! Output is a pure function of the pair: no I/O, no clock, no randomness.
//! Section order is fixed: title, overview, Solidity source, ink! source,
//! migration notes, usage examples, common questions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    model::{Category, ContractPair},
    notes::migration_notes,
};

/// Source tag stored on every document produced from example pairs.
pub const SOURCE_TAG: &str = "solidity_ink_training";

/// Payload keys shared by the indexer, retriever and answer composer.
pub mod keys {
    pub const PAIR_ID: &str = "pair_id";
    pub const CATEGORY: &str = "category";
    pub const DESCRIPTION: &str = "description";
    pub const SOURCE: &str = "source";
    pub const NAME_A: &str = "name_a";
    pub const NAME_B: &str = "name_b";
    pub const SOURCE_FILE: &str = "source_file";
    /// Raw document text inside the index payload.
    pub const TEXT: &str = "text";
}

/// Typed metadata; flattened to string pairs for the index payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub pair_id: String,
    pub category: Category,
    pub description: String,
    pub source: String,
    pub name_a: Option<String>,
    pub name_b: Option<String>,
    pub source_file: Option<String>,
}

impl DocumentMetadata {
    /// Flat `key → value` view; optional keys are omitted when unset.
    pub fn to_payload(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(keys::PAIR_ID.to_string(), self.pair_id.clone());
        map.insert(keys::CATEGORY.to_string(), self.category.as_str().to_string());
        map.insert(keys::DESCRIPTION.to_string(), self.description.clone());
        map.insert(keys::SOURCE.to_string(), self.source.clone());
        let optional = [
            (keys::NAME_A, &self.name_a),
            (keys::NAME_B, &self.name_b),
            (keys::SOURCE_FILE, &self.source_file),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                map.insert(key.to_string(), v.clone());
            }
        }
        map
    }
}

/// Markdown text plus metadata, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDocument {
    pub source_text: String,
    pub metadata: DocumentMetadata,
}

/// Renders a pair into its training document.
pub fn synthesize(pair: &ContractPair) -> TrainingDocument {
    let name_a = pair.name_a.as_str();
    let name_b = pair.name_b.as_str();
    let category = pair.category;

    let mut md = String::with_capacity(pair.content_a.len() + pair.content_b.len() + 4096);

    md.push_str(&format!(
        "# {name_a} → {name_b} ({category}): Solidity vs ink!\n\n"
    ));

    md.push_str("## Overview\n\n");
    md.push_str(&format!("{}\n\n", pair.description));
    md.push_str(&format!(
        "- Category: `{category}`\n- Solidity source: `{}`\n- ink! source: `{}`\n\n",
        pair.path_a, pair.path_b
    ));

    md.push_str("## Solidity Implementation\n\n");
    push_code_block(&mut md, "solidity", &pair.content_a);

    md.push_str("## ink! Implementation\n\n");
    push_code_block(&mut md, "rust", &pair.content_b);

    md.push_str("## Migration Notes\n\n");
    md.push_str(migration_notes(category));
    md.push('\n');

    md.push_str("## Usage Examples\n\n");
    md.push_str("### Solidity\n\n");
    push_code_block(
        &mut md,
        "solidity",
        &format!("// deploy, then call its public functions\n{name_a} instance = new {name_a}();"),
    );
    md.push_str("### ink!\n\n");
    push_code_block(
        &mut md,
        "rust",
        &format!(
            "#[ink::test]\nfn {id}_works() {{\n    // construct `{name_b}` and call its messages\n}}",
            id = test_ident(&pair.pair_id)
        ),
    );

    md.push_str("## Common Questions\n\n");
    md.push_str(&format!(
        "**Q: How do I migrate {name_a} from Solidity to ink!?**\n\
         A: Move its state into an `#[ink(storage)]` struct, mark public functions as \
         `#[ink(message)]` and follow the migration notes for {category} contracts.\n\n"
    ));
    md.push_str(&format!(
        "**Q: What replaces `require` and `msg.sender` in {name_b}?**\n\
         A: Return `Err(Error::...)` from the message instead of reverting, and read the \
         caller with `self.env().caller()`.\n\n"
    ));
    md.push_str(&format!(
        "**Q: Can {name_a} reuse existing Solidity libraries after the port?**\n\
         A: No. Use ink! or Rust crates that compile to `no_std` Wasm, or reimplement the \
         logic in Rust.\n"
    ));

    TrainingDocument {
        source_text: md,
        metadata: DocumentMetadata {
            pair_id: pair.pair_id.clone(),
            category,
            description: pair.description.clone(),
            source: SOURCE_TAG.to_string(),
            name_a: Some(pair.name_a.clone()),
            name_b: Some(pair.name_b.clone()),
            source_file: Some(pair.path_a.clone()),
        },
    }
}

/// Appends a fenced block whose fence is longer than any backtick run in `code`.
fn push_code_block(md: &mut String, lang: &str, code: &str) {
    let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);
    md.push_str(&fence);
    md.push_str(lang);
    md.push('\n');
    md.push_str(code);
    if !code.ends_with('\n') {
        md.push('\n');
    }
    md.push_str(&fence);
    md.push_str("\n\n");
}

fn longest_backtick_run(s: &str) -> usize {
    let mut best = 0;
    let mut cur = 0;
    for c in s.chars() {
        if c == '`' {
            cur += 1;
            best = best.max(cur);
        } else {
            cur = 0;
        }
    }
    best
}

fn test_ident(pair_id: &str) -> String {
    let ident: String = pair_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("c_{ident}"),
        Some(_) => ident,
        None => "contract".to_string(),
    }
}
