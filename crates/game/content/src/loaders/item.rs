//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use pot_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        let items = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), count = items.len(), "loaded item catalog");
        Ok(items)
    }

    /// Parse an item catalog from RON text.
    ///
    /// Rejects catalogs that define the same item id twice, since the lookup
    /// would otherwise depend on load order.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for item in &catalog.items {
            if !seen.insert(item.id) {
                anyhow::bail!("Duplicate item id {} ({})", item.id.0, item.name);
            }
            if item.geometry.is_none() {
                tracing::warn!(item = %item.id, name = %item.name, "item has no visual geometry");
            }
        }

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pot_core::{AfflictionEffect, Capability, ItemId, StatusKind, TriggerFlags};

    const CATALOG: &str = r#"
    (
        items: [
            (
                id: 1,
                name: "Berry",
                capabilities: [
                    (effect: RestoreHunger(amount: 0.2)),
                    (
                        flags: "ENABLED",
                        effect: InflictPoison(duration: 3.0, per_second: 0.05),
                    ),
                ],
                geometry: Some((extents: (x: 0.1, y: 0.05, z: 0.1))),
            ),
            (
                id: 2,
                name: "Energy Drink",
                capabilities: [
                    (effect: ModifyStatus(status: Drowsy, amount: -0.2)),
                    (effect: ApplyAffliction(
                        primary: (
                            timing: (total_time: 12.0),
                            effect: FasterBoi((move_speed_mod: 0.2, drowsy_on_end: 0.3)),
                        ),
                    )),
                ],
            ),
        ],
    )
    "#;

    #[test]
    fn parses_capabilities_and_defaults() {
        let items = ItemLoader::parse(CATALOG).unwrap();
        assert_eq!(items.len(), 2);

        let berry = &items[0];
        assert_eq!(berry.id, ItemId(1));
        assert_eq!(berry.capabilities[0].flags, TriggerFlags::on_consumed());
        assert_eq!(berry.capabilities[1].flags, TriggerFlags::ENABLED);
        assert_eq!(
            berry.active_capabilities().collect::<Vec<_>>(),
            vec![&Capability::RestoreHunger { amount: 0.2 }]
        );
        assert!(berry.geometry.is_some());

        let drink = &items[1];
        assert!(drink.geometry.is_none());
        assert_eq!(
            drink.capabilities[0].effect,
            Capability::ModifyStatus {
                status: StatusKind::Drowsy,
                amount: -0.2
            }
        );
        let Capability::ApplyAffliction { primary, extras } = &drink.capabilities[1].effect else {
            panic!("expected an affliction grant");
        };
        assert!(extras.is_empty());
        assert_eq!(primary.timing.total_time, 12.0);
        assert!(matches!(primary.effect, AfflictionEffect::FasterBoi(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let catalog = r#"(items: [(id: 4, name: "a"), (id: 4, name: "b")])"#;
        let error = ItemLoader::parse(catalog).unwrap_err();
        assert!(error.to_string().contains("Duplicate item id 4"));
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(ItemLoader::parse("(items: [(id: \"x\")])").is_err());
    }
}
