//! In-memory scene objects a pot attaches to.
//!
//! Stands in for the game engine: it hands out handles for effect appliers
//! and visual stand-ins and remembers what is currently live.

use std::collections::BTreeMap;

use pot_core::{
    ApplierHandle, ApplierHost, EffectApplier, ItemId, Placement, Vec3, VisualAnchor,
    VisualHandle, VisualHost,
};

/// Interior scale of a default pot's soup surface.
const DEFAULT_INTERIOR_SCALE: Vec3 = Vec3::new(1.0, 0.2, 1.0);

/// A spawned visual stand-in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneVisual {
    pub item: ItemId,
    pub placement: Placement,
}

/// Scene objects belonging to one pot on one participant.
#[derive(Debug)]
pub struct SceneHost {
    anchor: Option<VisualAnchor>,
    appliers: BTreeMap<ApplierHandle, EffectApplier>,
    visuals: BTreeMap<VisualHandle, SceneVisual>,
    next_handle: u64,
}

impl SceneHost {
    /// A pot standing in the world with its interior attached.
    pub fn new() -> Self {
        Self {
            anchor: Some(VisualAnchor {
                interior_scale: DEFAULT_INTERIOR_SCALE,
            }),
            appliers: BTreeMap::new(),
            visuals: BTreeMap::new(),
            next_handle: 0,
        }
    }

    /// A pot whose interior sub-object does not exist yet.
    pub fn detached() -> Self {
        Self {
            anchor: None,
            ..Self::new()
        }
    }

    pub fn attach_interior(&mut self) {
        self.anchor = Some(VisualAnchor {
            interior_scale: DEFAULT_INTERIOR_SCALE,
        });
    }

    pub fn detach_interior(&mut self) {
        self.anchor = None;
    }

    pub fn appliers(&self) -> impl Iterator<Item = &EffectApplier> {
        self.appliers.values()
    }

    pub fn applier_count(&self) -> usize {
        self.appliers.len()
    }

    /// Live visual stand-ins per item.
    pub fn visual_counts(&self) -> BTreeMap<ItemId, usize> {
        let mut counts = BTreeMap::new();
        for visual in self.visuals.values() {
            *counts.entry(visual.item).or_insert(0) += 1;
        }
        counts
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplierHost for SceneHost {
    fn attach_applier(&mut self, applier: &EffectApplier) -> ApplierHandle {
        let handle = ApplierHandle(self.next_handle());
        self.appliers.insert(handle, applier.clone());
        handle
    }

    fn detach_applier(&mut self, handle: ApplierHandle) {
        if self.appliers.remove(&handle).is_none() {
            tracing::warn!(handle = handle.0, "detaching unknown applier");
        }
    }
}

impl VisualHost for SceneHost {
    fn visual_anchor(&self) -> Option<VisualAnchor> {
        self.anchor
    }

    fn spawn_visual(&mut self, item: ItemId, placement: &Placement) -> VisualHandle {
        let handle = VisualHandle(self.next_handle());
        self.visuals.insert(
            handle,
            SceneVisual {
                item,
                placement: *placement,
            },
        );
        handle
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_none() {
            tracing::warn!(handle = handle.0, "despawning unknown visual");
        }
    }
}
