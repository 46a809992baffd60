use super::ItemId;

/// One ingredient placed in a pot.
///
/// Serialized with the field names of the persisted item-data format
/// (`ID`, `CookedAmount`, `Uses`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    #[cfg_attr(feature = "serde", serde(rename = "ID"))]
    pub id: ItemId,
    #[cfg_attr(feature = "serde", serde(rename = "CookedAmount"))]
    pub cooked_amount: i32,
    /// Remaining uses. Always at least 1 while the entry is stored.
    #[cfg_attr(feature = "serde", serde(rename = "Uses"))]
    pub uses: u32,
}

impl Entry {
    pub fn new(id: ItemId, cooked_amount: i32, uses: u32) -> Self {
        Self {
            id,
            cooked_amount,
            uses,
        }
    }
}
