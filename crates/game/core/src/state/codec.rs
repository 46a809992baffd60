//! Persisted/transmitted form of a [`ContentStore`].
//!
//! The store is kept as a JSON list of `{ID, CookedAmount, Uses}` objects in
//! the host item's data. An empty list is the canonical "no entries" value.

use super::{ContentStore, Entry, StoreError};
use crate::error::{ErrorSeverity, PotError};

/// Canonical encoding of an empty store.
pub const EMPTY_STORE_JSON: &str = "[]";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed store data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid store data: {0}")]
    Invalid(#[from] StoreError),
}

impl PotError for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "CODEC_MALFORMED",
            Self::Invalid(_) => "CODEC_INVALID",
        }
    }
}

/// A store read back from persisted data.
#[derive(Debug)]
pub struct Decoded {
    pub store: ContentStore,
    /// Set when the persisted value was missing or corrupt and must be
    /// rewritten as [`EMPTY_STORE_JSON`].
    pub reset: Option<ResetReason>,
}

#[derive(Debug)]
pub enum ResetReason {
    Missing,
    Corrupt(CodecError),
}

pub fn encode(store: &ContentStore) -> Result<String, CodecError> {
    Ok(serde_json::to_string(store.snapshot())?)
}

pub fn decode(data: &str) -> Result<ContentStore, CodecError> {
    let entries: Vec<Entry> = serde_json::from_str(data)?;
    Ok(ContentStore::from_entries(entries)?)
}

/// Decodes persisted data, treating a missing or corrupt value as empty.
pub fn decode_or_empty(data: Option<&str>) -> Decoded {
    match data {
        None => Decoded {
            store: ContentStore::new(),
            reset: Some(ResetReason::Missing),
        },
        Some(raw) => match decode(raw) {
            Ok(store) => Decoded { store, reset: None },
            Err(error) => Decoded {
                store: ContentStore::new(),
                reset: Some(ResetReason::Corrupt(error)),
            },
        },
    }
}
