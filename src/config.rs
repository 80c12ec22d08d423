use crate::palette::DEFAULT_PALETTE;
use serde::Deserialize;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEPTH_RANGE: RangeInclusive<u32> = 0..=18;
pub const SHRINK_RANGE: RangeInclusive<f64> = 0.3..=0.95;
pub const RANDOMNESS_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Longer trunks make square mode stamp without practical end
pub const MAX_TRUNK_LENGTH: f64 = 1000.0;

/// How branches are painted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Continuous strokes
    #[default]
    Line,
    /// Discrete square stamps along each branch
    Square,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            DrawMode::Line => DrawMode::Square,
            DrawMode::Square => DrawMode::Line,
        }
    }
}

/// Parameters of one tree. Built once per draw request and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    pub depth: u32,
    pub angle_deg: f64,
    pub trunk_length: f64,
    /// Length multiplier per level
    pub shrink: f64,
    pub thickness: f64,
    /// Thickness multiplier per level
    pub thickness_decay: f64,
    /// Jitter applied to angles and lengths, 0..1
    pub randomness: f64,
    pub seed: u64,
    pub palette_name: String,
    pub draw_mode: DrawMode,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            depth: 10,
            angle_deg: 25.0,
            trunk_length: 120.0,
            shrink: 0.72,
            thickness: 10.0,
            thickness_decay: 0.75,
            randomness: 0.0,
            seed: 0,
            palette_name: DEFAULT_PALETTE.to_string(),
            draw_mode: DrawMode::Line,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("depth must be within 0..=18, got {0}")]
    DepthOutOfRange(u32),
    #[error("shrink must be within 0.3..=0.95, got {0}")]
    ShrinkOutOfRange(f64),
    #[error("randomness must be within 0..=1, got {0}")]
    RandomnessOutOfRange(f64),
    #[error("angle must be a finite number of degrees, got {0}")]
    AngleNotFinite(f64),
    #[error("length must be within (0, 1000], got {0}")]
    LengthOutOfRange(f64),
    #[error("thickness must be a positive finite number, got {0}")]
    ThicknessOutOfRange(f64),
    #[error("thickness decay must be within (0, 1], got {0}")]
    DecayOutOfRange(f64),
    #[error("margin must be a non-negative finite number, got {0}")]
    MarginOutOfRange(f64),
}

/// Margins are logical units and must cover half the trunk pen width
pub fn check_margin(margin: f64) -> Result<f64, ConfigError> {
    if margin.is_finite() && margin >= 0.0 {
        Ok(margin)
    } else {
        Err(ConfigError::MarginOutOfRange(margin))
    }
}

impl TreeConfig {
    /// Boundary check run before the tree engine sees the config.
    /// The engine itself never re-validates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DEPTH_RANGE.contains(&self.depth) {
            return Err(ConfigError::DepthOutOfRange(self.depth));
        }
        if !SHRINK_RANGE.contains(&self.shrink) {
            return Err(ConfigError::ShrinkOutOfRange(self.shrink));
        }
        if !RANDOMNESS_RANGE.contains(&self.randomness) {
            return Err(ConfigError::RandomnessOutOfRange(self.randomness));
        }
        if !self.angle_deg.is_finite() {
            return Err(ConfigError::AngleNotFinite(self.angle_deg));
        }
        if !(self.trunk_length > 0.0 && self.trunk_length <= MAX_TRUNK_LENGTH) {
            return Err(ConfigError::LengthOutOfRange(self.trunk_length));
        }
        if !(self.thickness > 0.0 && self.thickness.is_finite()) {
            return Err(ConfigError::ThicknessOutOfRange(self.thickness));
        }
        if !(self.thickness_decay > 0.0 && self.thickness_decay <= 1.0) {
            return Err(ConfigError::DecayOutOfRange(self.thickness_decay));
        }
        Ok(())
    }

    /// Validated copy, for `TreeConfig { depth: 12, ..cfg }.checked()?` style edits
    pub fn checked(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}
