//! Solidity ↔ ink! example pairing and training-document synthesis.
//!
//! Offline half of the migration assistant:
//! 1) [`matcher::find_pairs`] walks both example trees and binds files that
//!    implement the same contract, using the static [`catalog`].
//! 2) [`synthesize::synthesize`] renders each pair into a deterministic
//!    Markdown document with flat string metadata, ready for embedding.

pub mod catalog;
pub mod errors;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod notes;
pub mod scan;
pub mod synthesize;

pub use errors::PairingError;
pub use matcher::find_pairs;
pub use model::{ArtifactRef, Category, ContractPair, Language, MatchReport, SkippedFile};
pub use synthesize::{DocumentMetadata, SOURCE_TAG, TrainingDocument, synthesize};
