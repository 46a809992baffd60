//! Fixtures shared by the unit tests of this crate.

use std::collections::{BTreeMap, HashMap};

use crate::affliction::{Affliction, AfflictionEffect, AfflictionTiming, FasterBoi, StatusOverTime};
use crate::effects::{EffectApplier, StatusKind};
use crate::env::{
    Capability, ItemCapability, ItemDefinition, ItemOracle, TriggerFlags, VisualGeometry,
};
use crate::host::{ApplierHandle, ApplierHost, VisualAnchor, VisualHandle, VisualHost};
use crate::state::{ItemId, Vec3};
use crate::visual::Placement;

pub const BERRY: ItemId = ItemId(1);
pub const SOUP_BONE: ItemId = ItemId(2);
pub const ENERGY_DRINK: ItemId = ItemId(3);
pub const MUSHROOM: ItemId = ItemId(4);
/// Carries no visual geometry.
pub const GLOW_SHROOM: ItemId = ItemId(5);

pub struct SampleItems {
    definitions: BTreeMap<ItemId, ItemDefinition>,
}

impl ItemOracle for SampleItems {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.definitions.get(&id)
    }

    fn all_definitions(&self) -> Vec<&ItemDefinition> {
        self.definitions.values().collect()
    }
}

fn small_geometry() -> VisualGeometry {
    VisualGeometry::new(Vec3::new(0.1, 0.05, 0.1))
}

pub fn sample_items() -> SampleItems {
    let definitions = [
        ItemDefinition::new(BERRY, "Berry")
            .with_capability(ItemCapability::on_consumed(Capability::RestoreHunger {
                amount: 0.2,
            }))
            .with_capability(ItemCapability::on_consumed(Capability::InflictPoison {
                duration: 0.5,
                per_second: 0.1,
            }))
            .with_geometry(small_geometry()),
        ItemDefinition::new(SOUP_BONE, "Soup Bone")
            .with_capability(ItemCapability::on_consumed(Capability::RestoreHunger {
                amount: 0.6,
            }))
            .with_capability(ItemCapability::on_consumed(Capability::ModifyStatus {
                status: StatusKind::Injury,
                amount: -0.1,
            }))
            .with_geometry(VisualGeometry::new(Vec3::new(0.2, 0.05, 0.08))),
        ItemDefinition::new(ENERGY_DRINK, "Energy Drink")
            .with_capability(ItemCapability::on_consumed(Capability::GiveExtraStamina {
                amount: 0.4,
            }))
            .with_capability(ItemCapability::on_consumed(Capability::ApplyAffliction {
                primary: Affliction::new(
                    AfflictionTiming::lasting(12.0),
                    AfflictionEffect::FasterBoi(FasterBoi {
                        move_speed_mod: 0.2,
                        climb_speed_mod: 0.1,
                        drowsy_on_end: 0.3,
                        ..FasterBoi::default()
                    }),
                ),
                extras: Vec::new(),
            }))
            .with_geometry(small_geometry()),
        ItemDefinition::new(MUSHROOM, "Mushroom")
            .with_capability(ItemCapability::on_consumed(Capability::RestoreHunger {
                amount: 0.05,
            }))
            .with_capability(ItemCapability::new(
                TriggerFlags::ENABLED,
                Capability::InflictPoison {
                    duration: 3.0,
                    per_second: 0.05,
                },
            ))
            .with_geometry(small_geometry()),
        ItemDefinition::new(GLOW_SHROOM, "Glow Shroom").with_capability(
            ItemCapability::on_consumed(Capability::ApplyAffliction {
                primary: Affliction::new(AfflictionTiming::lasting(30.0), AfflictionEffect::Glowing),
                extras: vec![Affliction::new(
                    AfflictionTiming::lasting(8.0),
                    AfflictionEffect::AdjustColdOverTime(StatusOverTime {
                        status_per_second: -0.01,
                    }),
                )],
            }),
        ),
    ];

    SampleItems {
        definitions: definitions
            .into_iter()
            .map(|definition| (definition.id, definition))
            .collect(),
    }
}

/// Host double that records what a pot attached and spawned.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub anchor: Option<VisualAnchor>,
    pub appliers: HashMap<ApplierHandle, EffectApplier>,
    pub visuals: HashMap<VisualHandle, (ItemId, Placement)>,
    next_handle: u64,
}

impl RecordingHost {
    pub fn with_anchor() -> Self {
        Self {
            anchor: Some(VisualAnchor {
                interior_scale: Vec3::new(1.0, 0.2, 1.0),
            }),
            ..Self::default()
        }
    }

    pub fn without_anchor() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl ApplierHost for RecordingHost {
    fn attach_applier(&mut self, applier: &EffectApplier) -> ApplierHandle {
        let handle = ApplierHandle(self.next());
        self.appliers.insert(handle, applier.clone());
        handle
    }

    fn detach_applier(&mut self, handle: ApplierHandle) {
        self.appliers.remove(&handle);
    }
}

impl VisualHost for RecordingHost {
    fn visual_anchor(&self) -> Option<VisualAnchor> {
        self.anchor
    }

    fn spawn_visual(&mut self, item: ItemId, placement: &Placement) -> VisualHandle {
        let handle = VisualHandle(self.next());
        self.visuals.insert(handle, (item, *placement));
        handle
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        self.visuals.remove(&handle);
    }
}
