//! Folds every ingredient in a pot into one combined effect.

use std::collections::BTreeMap;
use std::fmt;

use crate::affliction::{
    AddBonusStamina, Affliction, AfflictionEffect, AfflictionKind, AfflictionTiming,
    scale_and_accumulate,
};
use crate::env::{Capability, ItemOracle};
use crate::error::{ErrorSeverity, PotError};
use crate::state::{Entry, ItemId};

use super::{StatusDelta, StatusKind};

/// The single effect state a pot applies while it holds ingredients.
///
/// Always a pure function of the store's entries; never patched in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombinedEffectSet {
    pub statuses: StatusDelta,
    pub afflictions: BTreeMap<AfflictionKind, Affliction>,
}

impl CombinedEffectSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.afflictions.is_empty()
    }

    fn fold_affliction(&mut self, weight: f32, source: &Affliction) {
        let kind = source.kind();
        let combined = scale_and_accumulate(self.afflictions.get(&kind), weight, source);
        self.afflictions.insert(kind, combined);
    }
}

impl fmt::Display for CombinedEffectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (kind, magnitude) in self.statuses.iter() {
            write!(f, "{kind}={magnitude}, ")?;
        }
        for (kind, affliction) in &self.afflictions {
            match &affliction.effect {
                AfflictionEffect::AddBonusStamina(data) => {
                    write!(f, "{kind}={}, ", data.stamina_amount)?
                }
                _ => write!(f, "{kind}={}, ", affliction.timing.total_time)?,
            }
        }
        write!(f, "}}")
    }
}

/// Aggregation failures. Any of these leaves the pot without a combined effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("ingredient {0} has no known definition")]
    UnknownItem(ItemId),
}

impl PotError for AggregateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem(_) => "AGGREGATE_UNKNOWN_ITEM",
        }
    }
}

/// Computes the per-use average effect of every entry.
///
/// Each entry's capabilities are weighted by its remaining uses, then the
/// whole set is divided by the total number of uses, so one consumption
/// delivers "one unit of whatever is mixed in".
///
/// # Errors
///
/// Fails on the first entry whose definition the oracle cannot resolve; no
/// partial set is returned.
pub fn aggregate<I>(entries: &[Entry], items: &I) -> Result<CombinedEffectSet, AggregateError>
where
    I: ItemOracle + ?Sized,
{
    let mut set = CombinedEffectSet::empty();
    let total_uses: u64 = entries.iter().map(|entry| u64::from(entry.uses)).sum();

    for entry in entries {
        let definition = items
            .definition(entry.id)
            .ok_or(AggregateError::UnknownItem(entry.id))?;
        let weight = entry.uses as f32;

        for capability in definition.active_capabilities() {
            match capability {
                Capability::RestoreHunger { amount } => {
                    set.statuses.add(StatusKind::Hunger, -amount * weight);
                }
                Capability::InflictPoison {
                    duration,
                    per_second,
                } => {
                    set.statuses
                        .add(StatusKind::Poison, duration * per_second * weight);
                }
                Capability::ModifyStatus { status, amount } => {
                    set.statuses.add(*status, amount * weight);
                }
                Capability::GiveExtraStamina { amount } => {
                    let grant = Affliction::new(
                        AfflictionTiming::default(),
                        AfflictionEffect::AddBonusStamina(AddBonusStamina {
                            stamina_amount: *amount,
                        }),
                    );
                    set.fold_affliction(weight, &grant);
                }
                Capability::ApplyAffliction { primary, extras } => {
                    for affliction in std::iter::once(primary).chain(extras) {
                        // cosmetic kinds contribute nothing
                        if affliction.copy().is_some() {
                            set.fold_affliction(weight, affliction);
                        }
                    }
                }
            }
        }
    }

    if total_uses > 0 {
        let divisor = total_uses as f32;
        set.statuses.divide_all(divisor);
        for affliction in set.afflictions.values_mut() {
            *affliction = scale_and_accumulate(None, 1.0 / divisor, affliction);
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        BERRY, ENERGY_DRINK, GLOW_SHROOM, MUSHROOM, SOUP_BONE, sample_items,
    };

    const EPSILON: f32 = 1e-5;

    fn entry(id: ItemId, uses: u32) -> Entry {
        Entry::new(id, 0, uses)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_store_yields_empty_set() {
        let set = aggregate(&[], &sample_items()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn homogeneous_uses_reproduce_per_use_magnitude() {
        let items = sample_items();
        let entries = vec![entry(BERRY, 1); 4];

        let set = aggregate(&entries, &items).unwrap();

        assert_close(set.statuses.get(StatusKind::Hunger).unwrap(), -0.2);
        assert_close(set.statuses.get(StatusKind::Poison).unwrap(), 0.05);
    }

    #[test]
    fn multi_use_entry_is_weighted_then_averaged() {
        let items = sample_items();
        let set = aggregate(&[entry(BERRY, 3)], &items).unwrap();
        assert_close(set.statuses.get(StatusKind::Hunger).unwrap(), -0.2);
    }

    #[test]
    fn blend_is_uses_weighted_average() {
        let items = sample_items();
        let set = aggregate(&[entry(BERRY, 3), entry(SOUP_BONE, 1)], &items).unwrap();

        // (3 * -0.2 + 1 * -0.6) / 4
        assert_close(set.statuses.get(StatusKind::Hunger).unwrap(), -0.3);
        // only the bone carries injury relief
        assert_close(set.statuses.get(StatusKind::Injury).unwrap(), -0.1 / 4.0);
    }

    #[test]
    fn entry_order_does_not_matter() {
        let items = sample_items();
        let forward = aggregate(&[entry(BERRY, 2), entry(ENERGY_DRINK, 3)], &items).unwrap();
        let reverse = aggregate(&[entry(ENERGY_DRINK, 3), entry(BERRY, 2)], &items).unwrap();

        assert_eq!(forward.statuses.len(), reverse.statuses.len());
        for (kind, magnitude) in forward.statuses.iter() {
            assert_close(reverse.statuses.get(kind).unwrap(), magnitude);
        }
        assert_eq!(
            forward.afflictions.keys().collect::<Vec<_>>(),
            reverse.afflictions.keys().collect::<Vec<_>>()
        );
        for (kind, affliction) in &forward.afflictions {
            let other = &reverse.afflictions[kind];
            assert_close(other.timing.total_time, affliction.timing.total_time);
        }
    }

    #[test]
    fn stamina_grant_is_averaged_per_use() {
        let items = sample_items();
        let set = aggregate(&[entry(ENERGY_DRINK, 2), entry(BERRY, 2)], &items).unwrap();

        let grant = &set.afflictions[&AfflictionKind::AddBonusStamina];
        let AfflictionEffect::AddBonusStamina(data) = &grant.effect else {
            panic!("unexpected variant");
        };
        // 2 * 0.4 / 4
        assert_close(data.stamina_amount, 0.2);

        let boost = &set.afflictions[&AfflictionKind::FasterBoi];
        // 2 * 12.0 / 4
        assert_close(boost.timing.total_time, 6.0);
    }

    #[test]
    fn cosmetic_afflictions_are_skipped() {
        let items = sample_items();
        let set = aggregate(&[entry(GLOW_SHROOM, 1)], &items).unwrap();

        assert!(!set.afflictions.contains_key(&AfflictionKind::Glowing));
        assert!(set.afflictions.contains_key(&AfflictionKind::AdjustColdOverTime));
    }

    #[test]
    fn unknown_ingredient_is_fatal() {
        let items = sample_items();
        let result = aggregate(&[entry(BERRY, 1), entry(ItemId(999), 1)], &items);

        let error = result.unwrap_err();
        assert_eq!(error, AggregateError::UnknownItem(ItemId(999)));
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn disabled_capabilities_do_not_count() {
        let items = sample_items();
        let set = aggregate(&[entry(MUSHROOM, 1)], &items).unwrap();
        assert_eq!(set.statuses.get(StatusKind::Poison), None);
        assert_close(set.statuses.get(StatusKind::Hunger).unwrap(), -0.05);
    }
}
