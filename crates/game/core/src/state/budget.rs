/// The pot's own consumable-charge counter.
///
/// Separate from the uses of any single entry. The value starts out without
/// data and must be established before the pot's effect logic reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseBudget {
    value: Option<u32>,
    max: u32,
}

impl UseBudget {
    /// Budget without data, as found on a freshly spawned host item.
    pub const fn uninitialized(max: u32) -> Self {
        Self { value: None, max }
    }

    /// Budget established at zero charges.
    pub const fn established(max: u32) -> Self {
        Self {
            value: Some(0),
            max,
        }
    }

    /// Budget carrying a persisted value, clamped to the maximum.
    pub fn restored(max: u32, value: u32) -> Self {
        Self {
            value: Some(value.min(max)),
            max,
        }
    }

    /// Establishes the budget at zero if it has no data yet.
    pub fn establish(&mut self) {
        if self.value.is_none() {
            self.value = Some(0);
        }
    }

    pub const fn has_data(&self) -> bool {
        self.value.is_some()
    }

    pub const fn value(&self) -> Option<u32> {
        self.value
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Adds charges, clamped to the declared maximum. No-op without data.
    pub fn increase(&mut self, amount: u32) {
        if let Some(value) = self.value.as_mut() {
            *value = value.saturating_add(amount).min(self.max);
        }
    }

    /// Consumes one charge. No-op without data.
    pub fn consume_one(&mut self) {
        if let Some(value) = self.value.as_mut() {
            *value = value.saturating_sub(1);
        }
    }

    /// True when the budget has data and no charges remain.
    pub fn is_exhausted(&self) -> bool {
        self.value == Some(0)
    }

    /// Remaining charges as a fraction of the maximum, for display.
    pub fn remaining_fraction(&self) -> f32 {
        match self.value {
            Some(value) if self.max > 0 => value as f32 / self.max as f32,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_clamps_to_max() {
        let mut budget = UseBudget::established(4);
        budget.increase(3);
        budget.increase(3);
        assert_eq!(budget.value(), Some(4));
        assert_eq!(budget.remaining_fraction(), 1.0);
    }

    #[test]
    fn uninitialized_budget_ignores_changes() {
        let mut budget = UseBudget::uninitialized(4);
        budget.increase(2);
        budget.consume_one();
        assert_eq!(budget.value(), None);
        assert!(!budget.is_exhausted());

        budget.establish();
        assert!(budget.has_data());
        assert!(budget.is_exhausted());
    }

    #[test]
    fn consuming_saturates_at_zero() {
        let mut budget = UseBudget::established(4);
        budget.increase(1);
        budget.consume_one();
        budget.consume_one();
        assert_eq!(budget.value(), Some(0));
        assert!(budget.is_exhausted());
    }
}
