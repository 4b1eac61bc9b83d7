//! Static Solidity → ink! mapping table.
//!
//! Keyed by the normalized Solidity logical name. `ink_path` is relative to
//! the ink! examples root; when it does not exist the matcher falls back to
//! any ink! file whose logical name equals the one derived from `ink_path`.

use std::path::Path;

use crate::model::Category;
use crate::normalize::logical_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub solidity: &'static str,
    pub ink_path: &'static str,
    pub category: Category,
    pub description: &'static str,
}

impl CatalogEntry {
    /// Logical name expected on the ink! side.
    pub fn ink_logical_name(&self) -> Option<String> {
        logical_name(Path::new(self.ink_path))
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    // tokens
    CatalogEntry {
        solidity: "simpleerc20",
        ink_path: "erc20/lib.rs",
        category: Category::Token,
        description: "ERC20 fungible token with transfer, approve and allowance",
    },
    CatalogEntry {
        solidity: "simplenft",
        ink_path: "erc721/lib.rs",
        category: Category::Token,
        description: "ERC721 non-fungible token with minting, burning and transfers",
    },
    CatalogEntry {
        solidity: "simpleerc1155",
        ink_path: "erc1155/lib.rs",
        category: Category::Token,
        description: "ERC1155 multi-token supporting fungible and non-fungible balances with batch operations",
    },
    // storage
    CatalogEntry {
        solidity: "flipper",
        ink_path: "flipper/lib.rs",
        category: Category::Storage,
        description: "Boolean state that can be flipped between true and false",
    },
    CatalogEntry {
        solidity: "counter",
        ink_path: "incrementer/lib.rs",
        category: Category::Storage,
        description: "Counter with increment and decrement",
    },
    CatalogEntry {
        solidity: "simplestorage",
        ink_path: "contract-storage/lib.rs",
        category: Category::Storage,
        description: "State management and persistence of simple values and mappings",
    },
    // security
    CatalogEntry {
        solidity: "multisigwallet",
        ink_path: "multisig/lib.rs",
        category: Category::Security,
        description: "Multi-signature wallet requiring several approvals per transaction",
    },
    CatalogEntry {
        solidity: "simpleescrow",
        ink_path: "payment-channel/lib.rs",
        category: Category::Security,
        description: "Funds held until release conditions are met",
    },
    // events
    CatalogEntry {
        solidity: "eventemitter",
        ink_path: "events/lib.rs",
        category: Category::Events,
        description: "Event emission and topic indexing",
    },
    // lifecycle
    CatalogEntry {
        solidity: "mortal",
        ink_path: "terminator/lib.rs",
        category: Category::Lifecycle,
        description: "Owner-controlled contract termination",
    },
    // cross-contract
    CatalogEntry {
        solidity: "caller",
        ink_path: "basic-contract-caller/lib.rs",
        category: Category::Advanced,
        description: "Calls into another contract, showing cross-contract interaction",
    },
    CatalogEntry {
        solidity: "target",
        ink_path: "basic-contract-caller/other-contract/lib.rs",
        category: Category::Advanced,
        description: "Callee side of a cross-contract call",
    },
];

/// Entry for a normalized Solidity logical name.
pub fn lookup(solidity_logical: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.solidity == solidity_logical)
}

/// Description used for pairs matched by name only.
pub fn generic_description(display_name: &str) -> String {
    format!("Smart contract implementation: {display_name}")
}
