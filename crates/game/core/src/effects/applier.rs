//! Materialized appliers that make a combined effect active on its host.

use crate::affliction::Affliction;
use crate::host::{ApplierHandle, ApplierHost};

use super::{CombinedEffectSet, StatusKind};

/// One host-side effect component. Appliers fire when a cast finishes.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectApplier {
    ModifyStatus {
        status: StatusKind,
        change_amount: f32,
    },
    ApplyAffliction {
        affliction: Affliction,
    },
}

impl EffectApplier {
    /// One applier per status kind followed by one per affliction kind.
    pub fn materialize(effects: &CombinedEffectSet) -> Vec<EffectApplier> {
        let statuses = effects
            .statuses
            .iter()
            .map(|(status, change_amount)| EffectApplier::ModifyStatus {
                status,
                change_amount,
            });
        let afflictions =
            effects
                .afflictions
                .values()
                .map(|affliction| EffectApplier::ApplyAffliction {
                    affliction: affliction.clone(),
                });
        statuses.chain(afflictions).collect()
    }
}

/// Handles of the appliers currently attached for a pot.
#[derive(Debug, Default)]
pub struct AppliedEffects {
    handles: Vec<ApplierHandle>,
}

impl AppliedEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detaches every previously attached applier, then attaches the
    /// appliers of `effects`. Returns how many were attached.
    pub fn replace<H>(&mut self, host: &mut H, effects: &CombinedEffectSet) -> usize
    where
        H: ApplierHost + ?Sized,
    {
        self.tear_down(host);
        for applier in EffectApplier::materialize(effects) {
            self.handles.push(host.attach_applier(&applier));
        }
        self.handles.len()
    }

    pub fn tear_down<H>(&mut self, host: &mut H)
    where
        H: ApplierHost + ?Sized,
    {
        for handle in self.handles.drain(..) {
            host.detach_applier(handle);
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::aggregate;
    use crate::state::Entry;
    use crate::test_support::{ENERGY_DRINK, RecordingHost, SOUP_BONE, sample_items};

    #[test]
    fn replacing_detaches_previous_appliers() {
        let items = sample_items();
        let mut host = RecordingHost::with_anchor();
        let mut applied = AppliedEffects::new();

        let first = aggregate(&[Entry::new(SOUP_BONE, 0, 1)], &items).unwrap();
        assert_eq!(applied.replace(&mut host, &first), 2);

        let second = aggregate(&[Entry::new(ENERGY_DRINK, 0, 1)], &items).unwrap();
        let attached = applied.replace(&mut host, &second);

        assert_eq!(attached, second.statuses.len() + second.afflictions.len());
        assert_eq!(host.appliers.len(), attached);
        assert!(
            host.appliers
                .values()
                .all(|applier| matches!(applier, EffectApplier::ApplyAffliction { .. }))
        );
    }

    #[test]
    fn tear_down_leaves_host_clean() {
        let items = sample_items();
        let mut host = RecordingHost::with_anchor();
        let mut applied = AppliedEffects::new();

        let set = aggregate(&[Entry::new(SOUP_BONE, 0, 2)], &items).unwrap();
        applied.replace(&mut host, &set);
        applied.tear_down(&mut host);

        assert!(applied.is_empty());
        assert!(host.appliers.is_empty());
    }
}
