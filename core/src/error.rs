//! Error taxonomy for the conversion core.
//!
//! Load-time failures (`EngineError`) surface from `Tree::open`/`PhraseDict::open`
//! and abort construction. Runtime key input never produces an `Err`; meaningless
//! input is signalled through `KeyBehavior` instead (see `crate::layout::KeyBehavior`).

use std::path::PathBuf;

use thiserror::Error;

/// Failures that can occur while loading the tree index or phrase dictionary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("dictionary failed integrity check: {detail}")]
    CorruptDictionary { detail: String },

    #[error("data directory is missing required file: {path}", path = path.display())]
    MissingDataFile { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// A `Phone` value violated its field-width invariant.
///
/// This indicates a bug in the caller (an out-of-range field index), not
/// malformed user input; user input is rejected via `KeyBehavior` long before
/// it would reach the codec with an invalid field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPhoneError {
    #[error("initial consonant index {0} exceeds table bounds")]
    InitialOutOfRange(u8),
    #[error("medial glide index {0} exceeds table bounds")]
    MedialOutOfRange(u8),
    #[error("final vowel index {0} exceeds table bounds")]
    FinalOutOfRange(u8),
    #[error("tone index {0} exceeds table bounds")]
    ToneOutOfRange(u8),
    #[error("UTF-8 rendering did not parse as a well-formed phone")]
    UnparseableUtf8,
}
