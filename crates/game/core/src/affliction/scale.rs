//! Copy, scale, and accumulate rules for afflictions.
//!
//! Each variant's data type implements [`ScaleRule`]; [`AfflictionEffect`]
//! only dispatches. Supporting a new kind means one new rule and one new arm.

use super::{
    AddBonusStamina, AdjustStatus, Affliction, AfflictionEffect, Chaos, ClearAllStatus,
    Exhaustion, FasterBoi, InfiniteStamina, PoisonOverTime, StatusOverTime,
};

/// Kind-specific copy and scale behaviour.
///
/// `total_time` is handled uniformly by [`scale_and_accumulate`]; rules only
/// touch the fields their kind adds on top of it.
trait ScaleRule: Clone {
    fn copy_fields(&self) -> Option<Self> {
        Some(self.clone())
    }

    /// Multiplies the kind's duration-like fields by `weight`, then adds the
    /// accumulator's corresponding fields when present.
    fn scale_fields(&mut self, _weight: f32, _acc: Option<&Self>) {}
}

impl ScaleRule for PoisonOverTime {}
impl ScaleRule for Exhaustion {}
impl ScaleRule for StatusOverTime {}
impl ScaleRule for Chaos {}
impl ScaleRule for AdjustStatus {}
impl ScaleRule for ClearAllStatus {}

impl ScaleRule for InfiniteStamina {
    fn copy_fields(&self) -> Option<Self> {
        Some(Self {
            climb_delay: self.climb_delay,
            drowsy: self
                .drowsy
                .as_deref()
                .and_then(Affliction::copy)
                .map(Box::new),
        })
    }

    fn scale_fields(&mut self, weight: f32, acc: Option<&Self>) {
        let Some(drowsy) = self.drowsy.as_deref_mut() else {
            return;
        };
        drowsy.timing.total_time *= weight;
        if let Some(acc_drowsy) = acc.and_then(|acc| acc.drowsy.as_deref()) {
            drowsy.timing.total_time += acc_drowsy.timing.total_time;
        }
    }
}

impl ScaleRule for FasterBoi {
    fn scale_fields(&mut self, weight: f32, acc: Option<&Self>) {
        self.drowsy_on_end *= weight;
        if let Some(acc) = acc {
            self.drowsy_on_end += acc.drowsy_on_end;
        }
    }
}

impl ScaleRule for AddBonusStamina {
    fn scale_fields(&mut self, weight: f32, acc: Option<&Self>) {
        self.stamina_amount *= weight;
        if let Some(acc) = acc {
            self.stamina_amount += acc.stamina_amount;
        }
    }
}

/// Narrows an accumulator to the same variant as the output, or `None`.
macro_rules! same_variant {
    ($acc:expr, $variant:ident) => {
        match $acc {
            Some(AfflictionEffect::$variant(acc)) => Some(acc),
            _ => None,
        }
    };
}

impl AfflictionEffect {
    /// Deep copy of the kind-specific fields, `None` for cosmetic kinds.
    pub(super) fn copy(&self) -> Option<Self> {
        Some(match self {
            Self::PoisonOverTime(data) => Self::PoisonOverTime(data.copy_fields()?),
            Self::InfiniteStamina(data) => Self::InfiniteStamina(data.copy_fields()?),
            Self::FasterBoi(data) => Self::FasterBoi(data.copy_fields()?),
            Self::Exhaustion(data) => Self::Exhaustion(data.copy_fields()?),
            Self::Glowing => return None,
            Self::AdjustColdOverTime(data) => Self::AdjustColdOverTime(data.copy_fields()?),
            Self::Chaos(data) => Self::Chaos(data.copy_fields()?),
            Self::AdjustStatus(data) => Self::AdjustStatus(data.copy_fields()?),
            Self::ClearAllStatus(data) => Self::ClearAllStatus(data.copy_fields()?),
            Self::PreventPoisonHealing => Self::PreventPoisonHealing,
            Self::AddBonusStamina(data) => Self::AddBonusStamina(data.copy_fields()?),
            Self::AdjustDrowsyOverTime(data) => Self::AdjustDrowsyOverTime(data.copy_fields()?),
            Self::AdjustStatusOverTime(data) => Self::AdjustStatusOverTime(data.copy_fields()?),
        })
    }

    fn scale_fields(&mut self, weight: f32, acc: Option<&Self>) {
        match self {
            Self::PoisonOverTime(data) => data.scale_fields(weight, same_variant!(acc, PoisonOverTime)),
            Self::InfiniteStamina(data) => {
                data.scale_fields(weight, same_variant!(acc, InfiniteStamina))
            }
            Self::FasterBoi(data) => data.scale_fields(weight, same_variant!(acc, FasterBoi)),
            Self::Exhaustion(data) => data.scale_fields(weight, same_variant!(acc, Exhaustion)),
            Self::AdjustColdOverTime(data) => {
                data.scale_fields(weight, same_variant!(acc, AdjustColdOverTime))
            }
            Self::Chaos(data) => data.scale_fields(weight, same_variant!(acc, Chaos)),
            Self::AdjustStatus(data) => data.scale_fields(weight, same_variant!(acc, AdjustStatus)),
            Self::ClearAllStatus(data) => {
                data.scale_fields(weight, same_variant!(acc, ClearAllStatus))
            }
            Self::AddBonusStamina(data) => {
                data.scale_fields(weight, same_variant!(acc, AddBonusStamina))
            }
            Self::AdjustDrowsyOverTime(data) => {
                data.scale_fields(weight, same_variant!(acc, AdjustDrowsyOverTime))
            }
            Self::AdjustStatusOverTime(data) => {
                data.scale_fields(weight, same_variant!(acc, AdjustStatusOverTime))
            }
            Self::Glowing | Self::PreventPoisonHealing => {}
        }
    }
}

/// Returns `accumulator + source * weight` as a fresh affliction.
///
/// The accumulator is only used when it is the same variant as `source`.
/// A source that copies to nothing (cosmetic kinds) is returned unscaled.
pub fn scale_and_accumulate(
    accumulator: Option<&Affliction>,
    weight: f32,
    source: &Affliction,
) -> Affliction {
    let Some(mut out) = source.copy() else {
        return source.clone();
    };
    let acc = accumulator.filter(|acc| acc.kind() == out.kind());

    out.timing.total_time *= weight;
    if let Some(acc) = acc {
        out.timing.total_time += acc.timing.total_time;
    }
    out.effect.scale_fields(weight, acc.map(|acc| &acc.effect));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affliction::AfflictionTiming;

    fn drowsy(total_time: f32) -> Affliction {
        Affliction::new(
            AfflictionTiming::lasting(total_time),
            AfflictionEffect::AdjustDrowsyOverTime(StatusOverTime {
                status_per_second: 0.01,
            }),
        )
    }

    fn infinite_stamina(total_time: f32, tail: f32) -> Affliction {
        Affliction::new(
            AfflictionTiming::lasting(total_time),
            AfflictionEffect::InfiniteStamina(InfiniteStamina {
                climb_delay: 1.0,
                drowsy: Some(Box::new(drowsy(tail))),
            }),
        )
    }

    fn bonus_stamina(total_time: f32, amount: f32) -> Affliction {
        Affliction::new(
            AfflictionTiming::lasting(total_time),
            AfflictionEffect::AddBonusStamina(AddBonusStamina {
                stamina_amount: amount,
            }),
        )
    }

    #[test]
    fn copy_preserves_timing_and_fields() {
        let source = Affliction::new(
            AfflictionTiming {
                time_elapsed: 1.5,
                bonus_time: 2.0,
                total_time: 10.0,
            },
            AfflictionEffect::PoisonOverTime(PoisonOverTime {
                delay_before_effect: 3.0,
                status_per_second: 0.05,
            }),
        );
        assert_eq!(source.copy(), Some(source.clone()));
    }

    #[test]
    fn cosmetic_kinds_copy_to_nothing() {
        let glow = Affliction::new(AfflictionTiming::lasting(5.0), AfflictionEffect::Glowing);
        assert_eq!(glow.copy(), None);

        let scaled = scale_and_accumulate(None, 3.0, &glow);
        assert_eq!(scaled, glow);
    }

    #[test]
    fn nested_cosmetic_tail_is_dropped_on_copy() {
        let source = Affliction::new(
            AfflictionTiming::lasting(5.0),
            AfflictionEffect::InfiniteStamina(InfiniteStamina {
                climb_delay: 0.0,
                drowsy: Some(Box::new(Affliction::new(
                    AfflictionTiming::lasting(1.0),
                    AfflictionEffect::Glowing,
                ))),
            }),
        );
        let copy = source.copy().unwrap();
        assert!(matches!(
            copy.effect,
            AfflictionEffect::InfiniteStamina(InfiniteStamina { drowsy: None, .. })
        ));
    }

    #[test]
    fn default_kind_scales_total_time_only() {
        let source = drowsy(4.0);
        let out = scale_and_accumulate(None, 2.5, &source);
        assert_eq!(out.timing.total_time, 10.0);
        assert_eq!(out.effect, source.effect);
    }

    #[test]
    fn nested_tail_scales_and_accumulates_independently() {
        let first = scale_and_accumulate(None, 2.0, &infinite_stamina(10.0, 3.0));
        let combined = scale_and_accumulate(Some(&first), 1.0, &infinite_stamina(5.0, 7.0));

        assert_eq!(combined.timing.total_time, 25.0);
        let AfflictionEffect::InfiniteStamina(data) = &combined.effect else {
            panic!("variant changed");
        };
        assert_eq!(data.drowsy.as_ref().unwrap().timing.total_time, 13.0);
    }

    #[test]
    fn speed_modifier_accumulates_drowsy_on_end() {
        let source = Affliction::new(
            AfflictionTiming::lasting(8.0),
            AfflictionEffect::FasterBoi(FasterBoi {
                move_speed_mod: 1.5,
                drowsy_on_end: 0.2,
                ..FasterBoi::default()
            }),
        );
        let acc = scale_and_accumulate(None, 1.0, &source);
        let out = scale_and_accumulate(Some(&acc), 3.0, &source);

        assert_eq!(out.timing.total_time, 32.0);
        let AfflictionEffect::FasterBoi(data) = out.effect else {
            panic!("variant changed");
        };
        assert!((data.drowsy_on_end - 0.8).abs() < 1e-6);
        assert_eq!(data.move_speed_mod, 1.5);
    }

    #[test]
    fn bonus_grant_accumulates_amount_and_time() {
        let acc = scale_and_accumulate(None, 2.0, &bonus_stamina(0.0, 10.0));
        let out = scale_and_accumulate(Some(&acc), 1.0, &bonus_stamina(1.0, 5.0));

        assert_eq!(out.timing.total_time, 1.0);
        assert_eq!(
            out.effect,
            AfflictionEffect::AddBonusStamina(AddBonusStamina {
                stamina_amount: 25.0
            })
        );
    }

    #[test]
    fn mismatched_accumulator_is_ignored() {
        let acc = bonus_stamina(100.0, 100.0);
        let out = scale_and_accumulate(Some(&acc), 2.0, &drowsy(3.0));
        assert_eq!(out.timing.total_time, 6.0);
        assert_eq!(out.kind(), crate::affliction::AfflictionKind::AdjustDrowsyOverTime);
    }
}
