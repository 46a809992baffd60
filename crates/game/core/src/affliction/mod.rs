//! Timed effects and their kind-specific data.
//!
//! Every affliction is a base timing record plus one variant of the closed
//! [`AfflictionEffect`] set. Copy and scale rules live in [`scale`], one rule
//! per variant.

mod scale;

pub use scale::scale_and_accumulate;

/// Timing fields shared by every affliction kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AfflictionTiming {
    pub time_elapsed: f32,
    pub bonus_time: f32,
    pub total_time: f32,
}

impl AfflictionTiming {
    pub const fn lasting(total_time: f32) -> Self {
        Self {
            time_elapsed: 0.0,
            bonus_time: 0.0,
            total_time,
        }
    }
}

/// A timed gameplay effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affliction {
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: AfflictionTiming,
    pub effect: AfflictionEffect,
}

impl Affliction {
    pub fn new(timing: AfflictionTiming, effect: AfflictionEffect) -> Self {
        Self { timing, effect }
    }

    pub fn kind(&self) -> AfflictionKind {
        self.effect.kind()
    }

    /// Deep copy of the numeric fields, `None` for purely cosmetic kinds.
    ///
    /// Timing fields are copied verbatim after the kind-specific copy.
    pub fn copy(&self) -> Option<Affliction> {
        let effect = self.effect.copy()?;
        Some(Affliction {
            timing: self.timing,
            effect,
        })
    }
}

/// Discriminant of [`AfflictionEffect`], used as the combined-set key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum AfflictionKind {
    PoisonOverTime,
    InfiniteStamina,
    FasterBoi,
    Exhaustion,
    Glowing,
    AdjustColdOverTime,
    Chaos,
    AdjustStatus,
    ClearAllStatus,
    PreventPoisonHealing,
    AddBonusStamina,
    AdjustDrowsyOverTime,
    AdjustStatusOverTime,
}

/// Kind-specific data of an affliction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AfflictionEffect {
    PoisonOverTime(PoisonOverTime),
    /// Temporary stamina immunity followed by a drowsiness tail.
    InfiniteStamina(InfiniteStamina),
    /// Speed modifier followed by a drowsiness tail.
    FasterBoi(FasterBoi),
    Exhaustion(Exhaustion),
    /// Purely cosmetic; never contributes to a combined effect.
    Glowing,
    AdjustColdOverTime(StatusOverTime),
    Chaos(Chaos),
    AdjustStatus(AdjustStatus),
    ClearAllStatus(ClearAllStatus),
    PreventPoisonHealing,
    /// One-shot bonus stamina grant.
    AddBonusStamina(AddBonusStamina),
    AdjustDrowsyOverTime(StatusOverTime),
    AdjustStatusOverTime(StatusOverTime),
}

impl AfflictionEffect {
    pub fn kind(&self) -> AfflictionKind {
        match self {
            Self::PoisonOverTime(_) => AfflictionKind::PoisonOverTime,
            Self::InfiniteStamina(_) => AfflictionKind::InfiniteStamina,
            Self::FasterBoi(_) => AfflictionKind::FasterBoi,
            Self::Exhaustion(_) => AfflictionKind::Exhaustion,
            Self::Glowing => AfflictionKind::Glowing,
            Self::AdjustColdOverTime(_) => AfflictionKind::AdjustColdOverTime,
            Self::Chaos(_) => AfflictionKind::Chaos,
            Self::AdjustStatus(_) => AfflictionKind::AdjustStatus,
            Self::ClearAllStatus(_) => AfflictionKind::ClearAllStatus,
            Self::PreventPoisonHealing => AfflictionKind::PreventPoisonHealing,
            Self::AddBonusStamina(_) => AfflictionKind::AddBonusStamina,
            Self::AdjustDrowsyOverTime(_) => AfflictionKind::AdjustDrowsyOverTime,
            Self::AdjustStatusOverTime(_) => AfflictionKind::AdjustStatusOverTime,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoisonOverTime {
    pub delay_before_effect: f32,
    pub status_per_second: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InfiniteStamina {
    pub climb_delay: f32,
    /// Applied once the immunity wears off.
    pub drowsy: Option<Box<Affliction>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FasterBoi {
    pub move_speed_mod: f32,
    pub climb_speed_mod: f32,
    /// Drowsiness applied when the speed modifier ends.
    pub drowsy_on_end: f32,
    pub cached_drowsy: f32,
    pub climb_delay: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Exhaustion {
    pub drain_amount: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusOverTime {
    pub status_per_second: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Chaos {
    pub status_amount_average: f32,
    pub status_amount_std_dev: f32,
    pub average_bonus_stamina: f32,
    pub std_dev_bonus_stamina: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustStatus {
    pub status: crate::effects::StatusKind,
    pub status_amount: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClearAllStatus {
    pub exclude_curse: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AddBonusStamina {
    pub stamina_amount: f32,
}
