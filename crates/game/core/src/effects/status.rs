//! Instantaneous per-tick status magnitudes.

use std::collections::BTreeMap;

/// Character attributes a status magnitude applies to.
///
/// Every status is expressed as "distance from full": restorative effects
/// carry negative magnitudes, harmful effects positive ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    Injury,
    Hunger,
    Cold,
    Poison,
    Crab,
    Curse,
    Drowsy,
    Weight,
    Hot,
    Thorns,
    Spores,
    Web,
}

/// Accumulated magnitude per status kind.
///
/// Ordered by kind so iteration (and therefore applier materialization) is
/// identical on every participant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusDelta {
    magnitudes: BTreeMap<StatusKind, f32>,
}

impl StatusDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the magnitude of `kind`, creating it at zero first.
    pub fn add(&mut self, kind: StatusKind, amount: f32) {
        *self.magnitudes.entry(kind).or_insert(0.0) += amount;
    }

    /// Divides every magnitude by `divisor`.
    pub fn divide_all(&mut self, divisor: f32) {
        for magnitude in self.magnitudes.values_mut() {
            *magnitude /= divisor;
        }
    }

    pub fn get(&self, kind: StatusKind) -> Option<f32> {
        self.magnitudes.get(&kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusKind, f32)> + '_ {
        self.magnitudes.iter().map(|(kind, magnitude)| (*kind, *magnitude))
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}
