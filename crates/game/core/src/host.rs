//! Boundary to the engine objects a pot lives in.
//!
//! The core never owns scene objects. It asks the host to attach effect
//! appliers and to spawn/despawn cosmetic stand-ins, and keeps only the
//! opaque handles it gets back.

use crate::effects::EffectApplier;
use crate::state::{ItemId, Vec3};
use crate::visual::Placement;

/// Opaque handle of an attached effect applier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplierHandle(pub u64);

/// Opaque handle of a spawned visual object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualHandle(pub u64);

/// Hosts the effect appliers that make a combined effect active.
pub trait ApplierHost {
    fn attach_applier(&mut self, applier: &EffectApplier) -> ApplierHandle;

    fn detach_applier(&mut self, handle: ApplierHandle);
}

/// Interior of the vessel that visual entries float in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualAnchor {
    /// Local scale of the interior surface (the soup cylinder).
    pub interior_scale: Vec3,
}

/// Hosts the cosmetic representation of a pot's content.
pub trait VisualHost {
    /// The interior anchor, or `None` while the cosmetic sub-object does not
    /// exist yet (e.g. while the pot is being picked up).
    fn visual_anchor(&self) -> Option<VisualAnchor>;

    fn spawn_visual(&mut self, item: ItemId, placement: &Placement) -> VisualHandle;

    fn despawn_visual(&mut self, handle: VisualHandle);
}

/// Everything a pot needs from its host.
pub trait PotHost: ApplierHost + VisualHost {}

impl<T> PotHost for T where T: ApplierHost + VisualHost + ?Sized {}
