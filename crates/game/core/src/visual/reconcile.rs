//! Converges the cosmetic stand-ins to the store's content.

use std::collections::BTreeMap;

use crate::config::VisualConfig;
use crate::env::{ItemOracle, RngOracle};
use crate::host::{VisualHandle, VisualHost};
use crate::state::{Entry, ItemId};

use super::placement::{Placement, PlacementArea, place};

/// One cosmetic object standing in for one entry. Never authoritative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualEntry {
    pub item: ItemId,
    pub handle: VisualHandle,
    pub placement: Placement,
}

/// Operations performed by one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub spawned: usize,
    pub despawned: usize,
    /// Items that should be shown but have no resolvable geometry.
    pub skipped: Vec<ItemId>,
    /// The host had no interior yet; nothing was done.
    pub deferred: bool,
}

impl ReconcileReport {
    /// True when the pass changed nothing on the host.
    pub fn is_noop(&self) -> bool {
        self.spawned == 0 && self.despawned == 0
    }
}

/// Current visual entries of one pot and the diffing that maintains them.
#[derive(Debug)]
pub struct VisualReconciler {
    entries: Vec<VisualEntry>,
    config: VisualConfig,
    seed: u64,
    spawn_nonce: u64,
}

impl VisualReconciler {
    pub fn new(config: VisualConfig, seed: u64) -> Self {
        Self {
            entries: Vec::new(),
            config,
            seed,
            spawn_nonce: 0,
        }
    }

    pub fn entries(&self) -> &[VisualEntry] {
        &self.entries
    }

    /// Visual entry count per item.
    pub fn counts(&self) -> BTreeMap<ItemId, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.item).or_insert(0) += 1;
        }
        counts
    }

    /// Spawns and despawns visual entries until there is exactly one per
    /// store entry, item for item.
    ///
    /// Items the oracle cannot resolve (or that carry no geometry) are
    /// skipped. Without an interior anchor the pass does nothing.
    pub fn reconcile<H, I, R>(
        &mut self,
        target: &[Entry],
        host: &mut H,
        items: &I,
        rng: &R,
    ) -> ReconcileReport
    where
        H: VisualHost + ?Sized,
        I: ItemOracle + ?Sized,
        R: RngOracle + ?Sized,
    {
        let mut report = ReconcileReport::default();
        let Some(anchor) = host.visual_anchor() else {
            report.deferred = true;
            return report;
        };
        let area = PlacementArea::new(&anchor, &self.config);

        let mut diff: BTreeMap<ItemId, i64> = BTreeMap::new();
        for entry in target {
            *diff.entry(entry.id).or_insert(0) += 1;
        }
        for visual in &self.entries {
            *diff.entry(visual.item).or_insert(0) -= 1;
        }

        for (item, delta) in diff {
            if delta > 0 {
                let Some(geometry) = items.definition(item).and_then(|def| def.geometry) else {
                    report.skipped.push(item);
                    continue;
                };
                for _ in 0..delta {
                    let occupied: Vec<Placement> =
                        self.entries.iter().map(|entry| entry.placement).collect();
                    self.spawn_nonce += 1;
                    let seed = self.seed ^ self.spawn_nonce.wrapping_mul(0x9e3779b97f4a7c15);
                    let placement =
                        place(&area, &geometry, &self.config, &occupied, rng, seed, item);
                    let handle = host.spawn_visual(item, &placement);
                    self.entries.push(VisualEntry {
                        item,
                        handle,
                        placement,
                    });
                    report.spawned += 1;
                }
            } else if delta < 0 {
                let mut excess = delta.unsigned_abs();
                self.entries.retain(|entry| {
                    if excess > 0 && entry.item == item {
                        host.despawn_visual(entry.handle);
                        excess -= 1;
                        report.despawned += 1;
                        false
                    } else {
                        true
                    }
                });
            }
        }

        report
    }

    /// Despawns every visual entry, e.g. when the pot is destroyed.
    pub fn clear<H>(&mut self, host: &mut H) -> usize
    where
        H: VisualHost + ?Sized,
    {
        let count = self.entries.len();
        for entry in self.entries.drain(..) {
            host.despawn_visual(entry.handle);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::test_support::{BERRY, GLOW_SHROOM, RecordingHost, SOUP_BONE, sample_items};

    fn entry(id: ItemId, uses: u32) -> Entry {
        Entry::new(id, 0, uses)
    }

    fn target_counts(target: &[Entry]) -> BTreeMap<ItemId, usize> {
        let mut counts = BTreeMap::new();
        for entry in target {
            *counts.entry(entry.id).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn one_visual_per_entry_not_per_use() {
        let items = sample_items();
        let mut host = RecordingHost::with_anchor();
        let mut reconciler = VisualReconciler::new(VisualConfig::default(), 1);

        let target = [entry(BERRY, 5), entry(BERRY, 1), entry(SOUP_BONE, 3)];
        let report = reconciler.reconcile(&target, &mut host, &items, &PcgRng);

        assert_eq!(report.spawned, 3);
        assert_eq!(reconciler.counts(), target_counts(&target));
        assert_eq!(host.visuals.len(), 3);
    }

    #[test]
    fn converges_from_arbitrary_start_and_is_idempotent() {
        let items = sample_items();
        let mut host = RecordingHost::with_anchor();
        let mut reconciler = VisualReconciler::new(VisualConfig::default(), 7);

        let start = [entry(BERRY, 1), entry(BERRY, 1), entry(BERRY, 1), entry(SOUP_BONE, 1)];
        reconciler.reconcile(&start, &mut host, &items, &PcgRng);

        let target = [entry(SOUP_BONE, 2), entry(SOUP_BONE, 1), entry(BERRY, 4)];
        let report = reconciler.reconcile(&target, &mut host, &items, &PcgRng);
        assert_eq!(report.spawned, 1);
        assert_eq!(report.despawned, 2);
        assert_eq!(reconciler.counts(), target_counts(&target));
        assert_eq!(host.visuals.len(), 3);

        let again = reconciler.reconcile(&target, &mut host, &items, &PcgRng);
        assert!(again.is_noop());
    }

    #[test]
    fn empty_target_removes_everything() {
        let items = sample_items();
        let mut host = RecordingHost::with_anchor();
        let mut reconciler = VisualReconciler::new(VisualConfig::default(), 3);

        reconciler.reconcile(&[entry(BERRY, 1), entry(SOUP_BONE, 1)], &mut host, &items, &PcgRng);
        let report = reconciler.reconcile(&[], &mut host, &items, &PcgRng);

        assert_eq!(report.despawned, 2);
        assert!(reconciler.entries().is_empty());
        assert!(host.visuals.is_empty());
    }

    #[test]
    fn unresolved_items_are_skipped() {
        let items = sample_items();
        let mut host = RecordingHost::with_anchor();
        let mut reconciler = VisualReconciler::new(VisualConfig::default(), 3);

        let target = [entry(ItemId(404), 1), entry(GLOW_SHROOM, 1), entry(BERRY, 1)];
        let report = reconciler.reconcile(&target, &mut host, &items, &PcgRng);

        assert_eq!(report.spawned, 1);
        assert_eq!(report.skipped, vec![GLOW_SHROOM, ItemId(404)]);
    }

    #[test]
    fn missing_anchor_is_a_noop() {
        let items = sample_items();
        let mut host = RecordingHost::without_anchor();
        let mut reconciler = VisualReconciler::new(VisualConfig::default(), 3);

        let report = reconciler.reconcile(&[entry(BERRY, 1)], &mut host, &items, &PcgRng);

        assert!(report.deferred);
        assert!(report.is_noop());
        assert!(host.visuals.is_empty());
    }
}
