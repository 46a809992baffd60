/// Tunable parameters of a cooking pot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PotConfig {
    /// Declared maximum of the pot's own use budget.
    pub max_uses: u32,
    /// Placement parameters for the cosmetic ingredients floating in the pot.
    pub visual: VisualConfig,
}

impl PotConfig {
    pub const DEFAULT_MAX_USES: u32 = 10;

    pub fn new() -> Self {
        Self {
            max_uses: Self::DEFAULT_MAX_USES,
            visual: VisualConfig::default(),
        }
    }

    pub fn with_max_uses(max_uses: u32) -> Self {
        Self {
            max_uses,
            ..Self::new()
        }
    }
}

impl Default for PotConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement parameters for visual entries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualConfig {
    /// Fraction of the interior extent usable for placement.
    pub radius_factor: f32,
    /// Uniform scale applied to every visual entry.
    pub item_scale: f32,
    /// Height of visual entries above the interior surface.
    pub item_height: f32,
    /// Candidate positions tried before accepting an overlapping one.
    pub placement_attempts: u32,
}

impl VisualConfig {
    pub const DEFAULT_RADIUS_FACTOR: f32 = 0.85;
    pub const DEFAULT_ITEM_SCALE: f32 = 0.35;
    pub const DEFAULT_ITEM_HEIGHT: f32 = 0.03;
    pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 16;
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            radius_factor: Self::DEFAULT_RADIUS_FACTOR,
            item_scale: Self::DEFAULT_ITEM_SCALE,
            item_height: Self::DEFAULT_ITEM_HEIGHT,
            placement_attempts: Self::DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}
