use crate::affliction::Affliction;
use crate::effects::StatusKind;
use crate::state::{ItemId, Vec3};

/// Resolves item identifiers to their effect-producing definitions.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<&ItemDefinition>;
}

/// Item definition: the capabilities an ingredient contributes to a pot and
/// the geometry used for its cosmetic stand-in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capabilities: Vec<ItemCapability>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry: Option<VisualGeometry>,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            capabilities: Vec::new(),
            geometry: None,
        }
    }

    pub fn with_capability(mut self, capability: ItemCapability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn with_geometry(mut self, geometry: VisualGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Capabilities whose trigger flags make them count when consumed.
    pub fn active_capabilities(&self) -> impl Iterator<Item = &Capability> + '_ {
        self.capabilities
            .iter()
            .filter(|capability| capability.flags.is_active())
            .map(|capability| &capability.effect)
    }
}

bitflags::bitflags! {
    /// Enable/trigger flags carried by every capability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TriggerFlags: u8 {
        const ENABLED = 1 << 0;
        const ON_CAST_FINISHED = 1 << 1;
        const ON_CONSUMED = 1 << 2;
    }
}

impl TriggerFlags {
    /// Flags of an enabled capability that fires on consumption.
    pub const fn on_consumed() -> Self {
        Self::ENABLED.union(Self::ON_CONSUMED)
    }

    /// A capability counts only when enabled and bound to a consumption trigger.
    pub fn is_active(self) -> bool {
        self.contains(Self::ENABLED)
            && self.intersects(Self::ON_CAST_FINISHED.union(Self::ON_CONSUMED))
    }
}

impl Default for TriggerFlags {
    fn default() -> Self {
        Self::on_consumed()
    }
}

/// One effect-producing capability of an item plus its trigger flags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCapability {
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: TriggerFlags,
    pub effect: Capability,
}

impl ItemCapability {
    pub fn new(flags: TriggerFlags, effect: Capability) -> Self {
        Self { flags, effect }
    }

    pub fn on_consumed(effect: Capability) -> Self {
        Self::new(TriggerFlags::on_consumed(), effect)
    }
}

/// Effect-producing capabilities an ingredient may carry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Restores hunger (reduces the hunger status).
    RestoreHunger { amount: f32 },

    /// Inflicts `duration * per_second` poison.
    InflictPoison { duration: f32, per_second: f32 },

    /// Grants bonus stamina.
    GiveExtraStamina { amount: f32 },

    /// Adds `amount` to a status.
    ModifyStatus { status: StatusKind, amount: f32 },

    /// Applies one or more timed afflictions.
    ApplyAffliction {
        primary: Affliction,
        #[cfg_attr(feature = "serde", serde(default))]
        extras: Vec<Affliction>,
    },
}

/// Collider bounds of an item, used to size its cosmetic stand-in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualGeometry {
    /// Half-size of the bounds along each axis.
    pub extents: Vec3,
    /// Offset from the item origin to the bounds center.
    #[cfg_attr(feature = "serde", serde(default))]
    pub center_offset: Vec3,
}

impl VisualGeometry {
    pub fn new(extents: Vec3) -> Self {
        Self {
            extents,
            center_offset: Vec3::ZERO,
        }
    }

    /// Largest horizontal half-size.
    pub fn planar_radius(&self) -> f32 {
        self.extents.x.max(self.extents.z)
    }
}
