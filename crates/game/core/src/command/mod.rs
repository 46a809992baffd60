//! Replicated mutations of a pot.
//!
//! A [`PotCommand`] is the wire message of the replication protocol: it
//! carries only resolved, deterministic data, and every participant applies
//! it to its local [`PotState`] through the same three-phase transition.
mod request;
mod transition;

pub use request::{ItemInstance, RequestError};
pub use transition::{
    AddEntry, AddEntryError, Clear, ClearOutcome, PotTransition, RemoveOneUse, RemoveOneUseError,
    RemovalOutcome,
};

use crate::state::{Entry, ItemId};

/// The three mutations every participant applies identically.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PotCommand {
    AddEntry(AddEntry),
    Clear(Clear),
    RemoveOneUse(RemoveOneUse),
}

impl PotCommand {
    pub fn add_entry(item: ItemId, cooked_amount: i32, uses: u32) -> Self {
        Self::AddEntry(AddEntry {
            item,
            cooked_amount,
            uses,
        })
    }

    pub fn clear() -> Self {
        Self::Clear(Clear)
    }

    pub fn remove_one_use(use_index: u32) -> Self {
        Self::RemoveOneUse(RemoveOneUse { use_index })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddEntry(_) => "add_entry",
            Self::Clear(_) => "clear",
            Self::RemoveOneUse(_) => "remove_one_use",
        }
    }
}

/// What a successfully applied command did to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandResult {
    Added(Entry),
    Cleared(ClearOutcome),
    UseRemoved(RemovalOutcome),
}
