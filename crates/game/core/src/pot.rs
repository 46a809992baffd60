//! A single cooking pot replica.

use crate::config::PotConfig;
use crate::effects::{AggregateError, AppliedEffects, CombinedEffectSet, aggregate};
use crate::env::{ItemOracle, RngOracle};
use crate::host::{PotHost, VisualHost};
use crate::state::{ContentStore, PotId, UseBudget};
use crate::visual::{ReconcileReport, VisualReconciler};

/// Replicated part of a pot: the content store and the pot's use budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PotState {
    pub store: ContentStore,
    pub budget: UseBudget,
}

impl PotState {
    pub fn new(budget: UseBudget) -> Self {
        Self {
            store: ContentStore::new(),
            budget,
        }
    }

    pub fn phase(&self) -> PotPhase {
        if self.store.is_empty() {
            PotPhase::Empty
        } else {
            PotPhase::Loaded
        }
    }
}

/// Coarse state of a pot as seen by the replication protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PotPhase {
    Empty,
    Loaded,
}

/// What rebuilding the derived caches did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub appliers_attached: usize,
    pub visuals: ReconcileReport,
}

/// One participant's replica of a pot.
///
/// Owns the replicated [`PotState`] plus the caches derived from it: the
/// combined effect set, the appliers attached on the host and the cosmetic
/// visual entries. The caches are rebuilt wholesale after every change.
#[derive(Debug)]
pub struct CookingPot {
    id: PotId,
    config: PotConfig,
    state: PotState,
    effects: CombinedEffectSet,
    applied: AppliedEffects,
    visuals: VisualReconciler,
}

impl CookingPot {
    /// Creates an empty pot. The budget is established before anything
    /// else can read it.
    pub fn new(id: PotId, config: PotConfig) -> Self {
        let mut budget = UseBudget::uninitialized(config.max_uses);
        budget.establish();
        Self::with_state(id, config, PotState::new(budget))
    }

    /// Recreates a pot from persisted state. Call [`CookingPot::refresh`]
    /// afterwards to build the derived caches.
    pub fn with_state(id: PotId, config: PotConfig, state: PotState) -> Self {
        let visuals = VisualReconciler::new(config.visual.clone(), u64::from(id.0));
        Self {
            id,
            config,
            state,
            effects: CombinedEffectSet::empty(),
            applied: AppliedEffects::new(),
            visuals,
        }
    }

    pub fn id(&self) -> PotId {
        self.id
    }

    pub fn config(&self) -> &PotConfig {
        &self.config
    }

    pub fn state(&self) -> &PotState {
        &self.state
    }

    pub fn store(&self) -> &ContentStore {
        &self.state.store
    }

    pub fn budget(&self) -> &UseBudget {
        &self.state.budget
    }

    pub fn phase(&self) -> PotPhase {
        self.state.phase()
    }

    pub fn total_uses(&self) -> u32 {
        self.state.store.total_uses()
    }

    pub fn effects(&self) -> &CombinedEffectSet {
        &self.effects
    }

    pub fn applied(&self) -> &AppliedEffects {
        &self.applied
    }

    pub fn visuals(&self) -> &VisualReconciler {
        &self.visuals
    }

    pub(crate) fn state_mut(&mut self) -> &mut PotState {
        &mut self.state
    }

    /// Rebuilds the visual entries and the combined effect from the store.
    ///
    /// Visuals go first since they never fail. If aggregation fails the
    /// previous appliers are torn down and the effect set is left empty.
    pub fn refresh<H, I, R>(
        &mut self,
        host: &mut H,
        items: &I,
        rng: &R,
    ) -> Result<RefreshReport, AggregateError>
    where
        H: PotHost + ?Sized,
        I: ItemOracle + ?Sized,
        R: RngOracle + ?Sized,
    {
        let visuals = self
            .visuals
            .reconcile(self.state.store.snapshot(), host, items, rng);

        match aggregate(self.state.store.snapshot(), items) {
            Ok(effects) => {
                self.effects = effects;
                let appliers_attached = self.applied.replace(host, &self.effects);
                Ok(RefreshReport {
                    appliers_attached,
                    visuals,
                })
            }
            Err(error) => {
                self.applied.tear_down(host);
                self.effects = CombinedEffectSet::empty();
                Err(error)
            }
        }
    }

    /// Despawns the visual entries only, e.g. when the interior they float
    /// in goes away. The next refresh respawns them.
    pub fn clear_visuals<H>(&mut self, host: &mut H) -> usize
    where
        H: VisualHost + ?Sized,
    {
        self.visuals.clear(host)
    }

    /// Tears down every derived object the pot placed on its host.
    pub fn tear_down<H>(&mut self, host: &mut H)
    where
        H: PotHost + ?Sized,
    {
        self.applied.tear_down(host);
        self.visuals.clear(host);
        self.effects = CombinedEffectSet::empty();
    }
}
