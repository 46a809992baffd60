//! Minimal [`pot_core::ItemOracle`] backed by an in-memory map.
use pot_core::{ItemDefinition, ItemId, ItemOracle};
use std::collections::HashMap;

/// ItemOracle implementation with static item definitions
pub struct ItemOracleImpl {
    definitions: HashMap<ItemId, ItemDefinition>,
}

impl ItemOracleImpl {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Builds an oracle from a loaded catalog. Later duplicates win.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let mut oracle = Self::new();
        for definition in definitions {
            oracle.add_definition(definition);
        }
        oracle
    }

    /// Add an item definition
    pub fn add_definition(&mut self, def: ItemDefinition) {
        self.definitions.insert(def.id, def);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ItemOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemOracle for ItemOracleImpl {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.definitions.get(&id)
    }

    fn all_definitions(&self) -> Vec<&ItemDefinition> {
        let mut all: Vec<_> = self.definitions.values().collect();
        all.sort_by_key(|def| def.id);
        all
    }
}
