//! Pots registered on one participant.
//!
//! Each [`PotInstance`] wraps a pot replica together with the per-pot fields
//! the participant needs: the scene objects it lives in and the marker of a
//! removal this participant still has in flight. The wrapper lives exactly
//! as long as the pot is registered.

use std::collections::BTreeMap;

use pot_core::{
    CombinedEffectSet, CookingPot, Entry, ItemId, PotId, PotPhase, UseBudget,
};

use crate::scene::SceneHost;
use crate::types::Sequence;

/// A pot replica and the participant-local fields attached to it.
#[derive(Debug)]
pub struct PotInstance {
    pub(crate) pot: CookingPot,
    pub(crate) scene: SceneHost,
    pub(crate) removal_in_flight: Option<Sequence>,
}

impl PotInstance {
    pub fn new(pot: CookingPot, scene: SceneHost) -> Self {
        Self {
            pot,
            scene,
            removal_in_flight: None,
        }
    }

    pub fn pot(&self) -> &CookingPot {
        &self.pot
    }

    pub fn scene(&self) -> &SceneHost {
        &self.scene
    }

    pub fn removal_in_flight(&self) -> Option<Sequence> {
        self.removal_in_flight
    }

    pub fn snapshot(&self) -> PotSnapshot {
        PotSnapshot {
            pot: self.pot.id(),
            phase: self.pot.phase(),
            entries: self.pot.store().snapshot().to_vec(),
            total_uses: self.pot.total_uses(),
            budget: *self.pot.budget(),
            digest: self.pot.store().digest(),
            effects: self.pot.effects().clone(),
            appliers: self.scene.applier_count(),
            visuals: self.scene.visual_counts(),
        }
    }
}

/// Read-only copy of a pot's replicated and derived state.
#[derive(Debug, Clone, PartialEq)]
pub struct PotSnapshot {
    pub pot: PotId,
    pub phase: PotPhase,
    pub entries: Vec<Entry>,
    pub total_uses: u32,
    pub budget: UseBudget,
    pub digest: [u8; 32],
    pub effects: CombinedEffectSet,
    /// Appliers live on the scene.
    pub appliers: usize,
    /// Visual stand-ins live on the scene, per item.
    pub visuals: BTreeMap<ItemId, usize>,
}

/// Every pot a participant knows about, by stable id.
#[derive(Debug, Default)]
pub struct PotRegistry {
    pots: BTreeMap<PotId, PotInstance>,
}

impl PotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pot. Returns the instance back if the id is taken.
    pub fn insert(&mut self, instance: PotInstance) -> Result<(), PotInstance> {
        let id = instance.pot.id();
        if self.pots.contains_key(&id) {
            return Err(instance);
        }
        self.pots.insert(id, instance);
        Ok(())
    }

    /// Unregisters a pot, handing back its wrapper for teardown.
    pub fn remove(&mut self, id: PotId) -> Option<PotInstance> {
        self.pots.remove(&id)
    }

    /// Whether `id` names a registered cooking pot.
    pub fn contains(&self, id: PotId) -> bool {
        self.pots.contains_key(&id)
    }

    pub fn get(&self, id: PotId) -> Option<&PotInstance> {
        self.pots.get(&id)
    }

    pub fn get_mut(&mut self, id: PotId) -> Option<&mut PotInstance> {
        self.pots.get_mut(&id)
    }

    /// Clears the in-flight removal marker waiting on `sequence`, if any.
    pub fn settle_removal(&mut self, sequence: Sequence) {
        for instance in self.pots.values_mut() {
            if instance.removal_in_flight == Some(sequence) {
                instance.removal_in_flight = None;
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = PotId> + '_ {
        self.pots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.pots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pots.is_empty()
    }
}
