//! Initiator-side resolution of local input into replicated commands.
//!
//! Local input never touches the store. It asks the pot for a command,
//! which the caller broadcasts; nondeterministic choices are resolved here,
//! once, so the wire only carries concrete values.

use crate::env::ItemOracle;
use crate::error::{ErrorSeverity, PotError};
use crate::pot::CookingPot;
use crate::state::ItemId;

use super::PotCommand;

/// An ingredient as held by the player offering it to the pot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub item: ItemId,
    pub cooked_amount: i32,
    /// Remaining uses as stored on the item; may be unset or negative.
    pub uses: Option<i32>,
}

impl ItemInstance {
    pub fn new(item: ItemId, cooked_amount: i32, uses: Option<i32>) -> Self {
        Self {
            item,
            cooked_amount,
            uses,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("item {0} has no known definition")]
    UnknownItem(ItemId),

    #[error("pot holds no uses to remove")]
    EmptyPot,
}

impl PotError for RequestError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem(_) => "REQUEST_UNKNOWN_ITEM",
            Self::EmptyPot => "REQUEST_EMPTY_POT",
        }
    }
}

impl CookingPot {
    /// Resolves an offered ingredient into an `AddEntry` command.
    ///
    /// Items without a use count (or with fewer than one) count as one use.
    pub fn request_add<I>(&self, items: &I, offered: ItemInstance) -> Result<PotCommand, RequestError>
    where
        I: ItemOracle + ?Sized,
    {
        if items.definition(offered.item).is_none() {
            return Err(RequestError::UnknownItem(offered.item));
        }
        let uses = offered.uses.unwrap_or(1).max(1) as u32;
        Ok(PotCommand::add_entry(offered.item, offered.cooked_amount, uses))
    }

    pub fn request_clear(&self) -> PotCommand {
        PotCommand::clear()
    }

    /// Resolves which use a consumption takes.
    ///
    /// `pick` receives the current total and must return a uniform choice
    /// in `[0, total)`; out-of-range picks are clamped on apply.
    pub fn request_remove_one_use<F>(&self, pick: F) -> Result<PotCommand, RequestError>
    where
        F: FnOnce(u32) -> u32,
    {
        let total = self.total_uses();
        if total == 0 {
            return Err(RequestError::EmptyPot);
        }
        Ok(PotCommand::remove_one_use(pick(total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AddEntry;
    use crate::config::PotConfig;
    use crate::state::{ContentStore, Entry, PotId};
    use crate::test_support::{BERRY, sample_items};

    #[test]
    fn add_request_clamps_uses_to_one() {
        let pot = CookingPot::new(PotId(1), PotConfig::default());
        let items = sample_items();

        for uses in [None, Some(0), Some(-3)] {
            let command = pot
                .request_add(&items, ItemInstance::new(BERRY, 2, uses))
                .unwrap();
            assert_eq!(
                command,
                PotCommand::AddEntry(AddEntry {
                    item: BERRY,
                    cooked_amount: 2,
                    uses: 1
                })
            );
        }
    }

    #[test]
    fn add_request_rejects_unknown_items() {
        let pot = CookingPot::new(PotId(1), PotConfig::default());
        assert_eq!(
            pot.request_add(&sample_items(), ItemInstance::new(ItemId(77), 0, Some(2))),
            Err(RequestError::UnknownItem(ItemId(77)))
        );
    }

    #[test]
    fn removal_request_resolves_index_against_total() {
        let mut pot = CookingPot::new(PotId(1), PotConfig::default());
        assert_eq!(
            pot.request_remove_one_use(|_| 0),
            Err(RequestError::EmptyPot)
        );

        pot.state_mut().store =
            ContentStore::from_entries(vec![Entry::new(BERRY, 0, 2), Entry::new(BERRY, 1, 3)])
                .unwrap();
        let mut seen = None;
        let command = pot
            .request_remove_one_use(|total| {
                seen = Some(total);
                total - 1
            })
            .unwrap();

        assert_eq!(seen, Some(5));
        assert_eq!(command, PotCommand::remove_one_use(4));
    }
}
