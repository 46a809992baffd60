use crate::error::{ErrorSeverity, NeverError, PotError};
use crate::pot::PotState;
use crate::state::{Entry, ItemId, StoreError, UseRemoval};

/// Defines how a replicated command mutates pot state.
///
/// Validation hooks see the state before and after mutation and must stay
/// side-effect free. Implementations must be pure functions of the command
/// and the state so every participant converges.
pub trait PotTransition {
    type Error;
    type Outcome;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &PotState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command. Implementations may assume `pre_validate` passed.
    fn apply(&self, state: &mut PotState) -> Result<Self::Outcome, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &PotState) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Appends an ingredient and tops up the pot's use budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddEntry {
    pub item: ItemId,
    pub cooked_amount: i32,
    pub uses: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddEntryError {
    #[error("ingredient {0} was offered with zero uses")]
    ZeroUses(ItemId),

    #[error("adding {uses} uses of {item} would overflow the pot's use total")]
    TooManyUses { item: ItemId, uses: u32 },
}

impl PotError for AddEntryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroUses(_) => "ADD_ENTRY_ZERO_USES",
            Self::TooManyUses { .. } => "ADD_ENTRY_TOO_MANY_USES",
        }
    }
}

impl PotTransition for AddEntry {
    type Error = AddEntryError;
    type Outcome = Entry;

    fn pre_validate(&self, state: &PotState) -> Result<(), Self::Error> {
        if self.uses == 0 {
            return Err(AddEntryError::ZeroUses(self.item));
        }
        if state.store.total_after_adding(self.uses).is_none() {
            return Err(AddEntryError::TooManyUses {
                item: self.item,
                uses: self.uses,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut PotState) -> Result<Entry, Self::Error> {
        let entry = Entry::new(self.item, self.cooked_amount, self.uses);
        state.budget.increase(self.uses);
        state.store.add(entry);
        Ok(entry)
    }
}

/// Empties the store unconditionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clear;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearOutcome {
    pub dropped: usize,
}

impl PotTransition for Clear {
    type Error = NeverError;
    type Outcome = ClearOutcome;

    fn apply(&self, state: &mut PotState) -> Result<ClearOutcome, Self::Error> {
        Ok(ClearOutcome {
            dropped: state.store.clear(),
        })
    }
}

/// Consumes one use at a concrete, initiator-resolved flattened index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveOneUse {
    pub use_index: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub removal: UseRemoval,
    /// Entries dropped because the pot's own budget ran out.
    pub budget_cleared: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RemoveOneUseError {
    #[error("pot holds no uses to remove")]
    EmptyPot,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PotError for RemoveOneUseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyPot => ErrorSeverity::Validation,
            Self::Store(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPot => "REMOVE_ONE_USE_EMPTY_POT",
            Self::Store(error) => error.error_code(),
        }
    }
}

impl PotTransition for RemoveOneUse {
    type Error = RemoveOneUseError;
    type Outcome = RemovalOutcome;

    fn pre_validate(&self, state: &PotState) -> Result<(), Self::Error> {
        if state.store.total_uses() == 0 {
            return Err(RemoveOneUseError::EmptyPot);
        }
        Ok(())
    }

    fn apply(&self, state: &mut PotState) -> Result<RemovalOutcome, Self::Error> {
        let removal = state.store.remove_one_use(self.use_index)?;
        state.budget.consume_one();

        // the pot itself ran out of charges: dump everything
        let budget_cleared = if state.budget.is_exhausted() {
            state.store.clear()
        } else {
            0
        };

        Ok(RemovalOutcome {
            removal,
            budget_cleared,
        })
    }

    fn post_validate(&self, state: &PotState) -> Result<(), Self::Error> {
        match state.store.iter().find(|entry| entry.uses == 0) {
            Some(entry) => Err(StoreError::ZeroUses(entry.id).into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UseBudget;

    fn state_with(max_uses: u32, entries: &[(u16, u32)]) -> PotState {
        let mut state = PotState::new(UseBudget::established(max_uses));
        for &(id, uses) in entries {
            AddEntry {
                item: ItemId(id),
                cooked_amount: 0,
                uses,
            }
            .apply(&mut state)
            .unwrap();
        }
        state
    }

    #[test]
    fn add_entry_tops_up_budget_with_clamp() {
        let state = state_with(4, &[(1, 3), (2, 3)]);
        assert_eq!(state.budget.value(), Some(4));
        assert_eq!(state.store.total_uses(), 6);
    }

    #[test]
    fn zero_use_add_is_rejected() {
        let state = state_with(4, &[]);
        let add = AddEntry {
            item: ItemId(1),
            cooked_amount: 0,
            uses: 0,
        };
        assert_eq!(
            add.pre_validate(&state),
            Err(AddEntryError::ZeroUses(ItemId(1)))
        );
    }

    #[test]
    fn exhausted_budget_clears_remaining_entries() {
        // budget capped at 3 while the entries hold 5 uses
        let mut state = state_with(3, &[(1, 2), (2, 3)]);
        let remove = RemoveOneUse { use_index: 0 };

        for _ in 0..2 {
            let outcome = remove.apply(&mut state).unwrap();
            assert_eq!(outcome.budget_cleared, 0);
        }
        // the first entry is used up; the second still holds all its uses
        assert_eq!(state.store.snapshot(), &[Entry::new(ItemId(2), 0, 3)]);

        let outcome = remove.apply(&mut state).unwrap();
        assert_eq!(outcome.removal.item, ItemId(2));
        assert_eq!(outcome.removal.pruned, None);
        assert_eq!(outcome.budget_cleared, 1);
        assert!(state.store.is_empty());
    }

    #[test]
    fn add_overflowing_the_use_total_is_rejected() {
        let mut state = PotState::new(UseBudget::established(10));
        state.store = crate::state::ContentStore::from_entries(vec![
            Entry::new(ItemId(1), 0, u32::MAX - 1),
        ])
        .unwrap();

        let fits = AddEntry {
            item: ItemId(2),
            cooked_amount: 0,
            uses: 1,
        };
        assert_eq!(fits.pre_validate(&state), Ok(()));

        let overflowing = AddEntry { uses: 2, ..fits };
        assert_eq!(
            overflowing.pre_validate(&state),
            Err(AddEntryError::TooManyUses {
                item: ItemId(2),
                uses: 2
            })
        );
        assert_eq!(
            overflowing.pre_validate(&state).unwrap_err().severity(),
            ErrorSeverity::Validation
        );
    }

    #[test]
    fn removal_from_empty_pot_fails_validation() {
        let state = state_with(3, &[]);
        assert_eq!(
            RemoveOneUse { use_index: 0 }.pre_validate(&state),
            Err(RemoveOneUseError::EmptyPot)
        );
    }

    #[test]
    fn clear_reports_dropped_entries() {
        let mut state = state_with(10, &[(1, 1), (2, 1)]);
        let outcome = Clear.apply(&mut state).unwrap();
        assert_eq!(outcome.dropped, 2);
        assert!(state.store.is_empty());
        assert_eq!(state.budget.value(), Some(2));
    }
}
