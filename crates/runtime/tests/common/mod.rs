//! Fixtures shared by the runtime integration tests.
#![allow(dead_code)]

use pot_core::{
    Capability, ItemCapability, ItemDefinition, ItemId, PotConfig, StatusKind, Vec3,
    VisualGeometry,
};
use pot_runtime::{ItemOracleImpl, Runtime, RuntimeConfig};

pub const BERRY: ItemId = ItemId(1);
pub const SOUP_BONE: ItemId = ItemId(2);
pub const ENERGY_DRINK: ItemId = ItemId(3);
/// Has no visual geometry.
pub const GLOW_SHROOM: ItemId = ItemId(5);

pub fn catalog() -> ItemOracleImpl {
    let geometry = VisualGeometry::new(Vec3::new(0.1, 0.05, 0.1));
    ItemOracleImpl::from_definitions([
        ItemDefinition::new(BERRY, "Berry")
            .with_capability(ItemCapability::on_consumed(Capability::RestoreHunger {
                amount: 0.2,
            }))
            .with_capability(ItemCapability::on_consumed(Capability::InflictPoison {
                duration: 0.5,
                per_second: 0.1,
            }))
            .with_geometry(geometry),
        ItemDefinition::new(SOUP_BONE, "Soup Bone")
            .with_capability(ItemCapability::on_consumed(Capability::RestoreHunger {
                amount: 0.6,
            }))
            .with_capability(ItemCapability::on_consumed(Capability::ModifyStatus {
                status: StatusKind::Injury,
                amount: -0.1,
            }))
            .with_geometry(geometry),
        ItemDefinition::new(ENERGY_DRINK, "Energy Drink")
            .with_capability(ItemCapability::on_consumed(Capability::GiveExtraStamina {
                amount: 0.4,
            }))
            .with_geometry(geometry),
        ItemDefinition::new(GLOW_SHROOM, "Glow Shroom").with_capability(
            ItemCapability::on_consumed(Capability::ModifyStatus {
                status: StatusKind::Cold,
                amount: -0.05,
            }),
        ),
    ])
}

pub fn config(participants: u32, max_uses: u32) -> RuntimeConfig {
    RuntimeConfig {
        pot: PotConfig::with_max_uses(max_uses),
        participants,
        seed: 7,
        ..RuntimeConfig::default()
    }
}

pub async fn start(participants: u32, max_uses: u32) -> Runtime {
    Runtime::builder()
        .config(config(participants, max_uses))
        .items(catalog())
        .build()
        .await
        .expect("runtime should start")
}

pub fn approx(actual: Option<f32>, expected: f32) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-5)
}
