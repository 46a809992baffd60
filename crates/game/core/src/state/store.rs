//! Authoritative list of ingredients held by a pot.

use sha2::{Digest, Sha256};

use super::{Entry, ItemId};
use crate::error::{ErrorSeverity, PotError};

/// Ordered sequence of entries currently in the pot.
///
/// Insertion order only matters as the tie-break for removal indexing: every
/// entry owns `uses` consecutive slots of a flattened use index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentStore {
    entries: Vec<Entry>,
}

/// Result of removing one use from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UseRemoval {
    /// Slot actually used after clamping the requested index.
    pub slot: u32,
    /// Item whose entry lost a use.
    pub item: ItemId,
    /// The entry if it reached zero uses and was pruned.
    pub pruned: Option<Entry>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("cannot remove a use from an empty store")]
    EmptyStore,

    #[error("entry for {0} has zero uses")]
    ZeroUses(ItemId),

    #[error("adding {uses} uses of {item} overflows the pot's use total")]
    UsesOverflow { item: ItemId, uses: u32 },
}

impl PotError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyStore => "STORE_EMPTY",
            Self::ZeroUses(_) => "STORE_ZERO_USES",
            Self::UsesOverflow { .. } => "STORE_USES_OVERFLOW",
        }
    }
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted entries, rejecting any entry with zero
    /// uses and any list whose use total does not fit in a `u32`.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, StoreError> {
        let mut total = 0u32;
        for entry in &entries {
            if entry.uses == 0 {
                return Err(StoreError::ZeroUses(entry.id));
            }
            total = total
                .checked_add(entry.uses)
                .ok_or(StoreError::UsesOverflow {
                    item: entry.id,
                    uses: entry.uses,
                })?;
        }
        Ok(Self { entries })
    }

    /// Use total after adding `uses` more, or `None` if it would overflow.
    pub fn total_after_adding(&self, uses: u32) -> Option<u32> {
        self.total_uses().checked_add(uses)
    }

    /// Appends an entry. Callers guarantee `entry.uses >= 1` and that the
    /// use total stays representable (see [`Self::total_after_adding`]).
    pub fn add(&mut self, entry: Entry) {
        debug_assert!(entry.uses >= 1, "entries must carry at least one use");
        debug_assert!(
            self.total_after_adding(entry.uses).is_some(),
            "use total must fit in u32"
        );
        self.entries.push(entry);
    }

    /// Removes one use from the entry owning flattened slot `index`.
    ///
    /// The index is clamped into `[0, total_uses - 1]`. An entry whose uses
    /// reach zero is pruned in the same call.
    pub fn remove_one_use(&mut self, index: u32) -> Result<UseRemoval, StoreError> {
        let total = self.total_uses();
        if total == 0 {
            return Err(StoreError::EmptyStore);
        }
        let slot = index.min(total - 1);

        let mut start = 0u32;
        let mut owner = 0usize;
        for (position, entry) in self.entries.iter().enumerate() {
            if slot < start + entry.uses {
                owner = position;
                break;
            }
            start += entry.uses;
        }

        let entry = &mut self.entries[owner];
        entry.uses -= 1;
        let item = entry.id;
        let pruned = if entry.uses == 0 {
            Some(self.entries.remove(owner))
        } else {
            None
        };

        Ok(UseRemoval { slot, item, pruned })
    }

    /// Empties the store, returning how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Read-only view of the entries in insertion order.
    pub fn snapshot(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the remaining uses of every entry. Never overflows: every
    /// path into the store keeps the total within `u32`.
    pub fn total_uses(&self) -> u32 {
        self.entries.iter().map(|entry| entry.uses).sum()
    }

    /// SHA-256 over the ordered entries.
    ///
    /// Two replicas with equal digests hold byte-identical stores.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.entries.len() as u64).to_le_bytes());
        for entry in &self.entries {
            hasher.update(entry.id.0.to_le_bytes());
            hasher.update(entry.cooked_amount.to_le_bytes());
            hasher.update(entry.uses.to_le_bytes());
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u16, uses: u32) -> Entry {
        Entry::new(ItemId(id), 0, uses)
    }

    fn two_entry_store() -> ContentStore {
        let mut store = ContentStore::new();
        store.add(entry(1, 2));
        store.add(entry(2, 3));
        store
    }

    #[test]
    fn last_slot_belongs_to_second_entry() {
        let mut store = two_entry_store();
        let removal = store.remove_one_use(4).unwrap();

        assert_eq!(removal.item, ItemId(2));
        assert_eq!(store.snapshot(), &[entry(1, 2), entry(2, 2)]);
    }

    #[test]
    fn leading_slots_belong_to_first_entry() {
        for slot in [0, 1] {
            let mut store = two_entry_store();
            let removal = store.remove_one_use(slot).unwrap();
            assert_eq!(removal.item, ItemId(1));
            assert_eq!(store.snapshot()[0].uses, 1);
        }
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let mut store = two_entry_store();
        let removal = store.remove_one_use(99).unwrap();

        assert_eq!(removal.slot, 4);
        assert_eq!(removal.item, ItemId(2));
    }

    #[test]
    fn entry_reaching_zero_is_pruned() {
        let mut store = ContentStore::new();
        store.add(entry(1, 1));
        store.add(entry(2, 1));

        let removal = store.remove_one_use(0).unwrap();

        assert_eq!(removal.pruned, Some(entry(1, 0)));
        assert_eq!(store.snapshot(), &[entry(2, 1)]);
        assert!(store.iter().all(|e| e.uses >= 1));
    }

    #[test]
    fn removing_from_empty_store_fails() {
        let mut store = ContentStore::new();
        assert_eq!(store.remove_one_use(0), Err(StoreError::EmptyStore));
    }

    #[test]
    fn zero_use_entries_are_rejected() {
        let result = ContentStore::from_entries(vec![entry(1, 1), entry(3, 0)]);
        assert_eq!(result, Err(StoreError::ZeroUses(ItemId(3))));
    }

    #[test]
    fn persisted_entries_overflowing_the_total_are_rejected() {
        let result = ContentStore::from_entries(vec![entry(1, u32::MAX), entry(2, 1)]);
        assert_eq!(
            result,
            Err(StoreError::UsesOverflow {
                item: ItemId(2),
                uses: 1
            })
        );
    }

    #[test]
    fn total_after_adding_reports_overflow() {
        let store = two_entry_store();
        assert_eq!(store.total_after_adding(2), Some(7));
        assert_eq!(store.total_after_adding(u32::MAX - 4), None);
    }

    #[test]
    fn digest_tracks_order_and_uses() {
        let a = two_entry_store();
        let mut b = ContentStore::new();
        b.add(entry(2, 3));
        b.add(entry(1, 2));

        assert_eq!(a.digest(), two_entry_store().digest());
        assert_ne!(a.digest(), b.digest());
        assert_ne!(ContentStore::new().digest(), a.digest());
    }
}
