//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which survival/birth rule every life in a world follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// B3/S23
    #[default]
    Conway,
    /// Cells never change state
    Immortal,
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: usize,
    /// Depth (height) of the world grid
    pub depth: usize,
    /// Time units between two published frames
    pub world_interval: u32,
    /// Initial time units between two evolutions of a cell
    pub cell_interval: u32,
    /// Maximum deviation from `cell_interval` each time a cell is rescheduled (0 = steady)
    pub jitter: u32,
    /// Survival/birth rule
    pub rule: RuleKind,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            depth: 20,
            world_interval: 10,
            cell_interval: 10,
            jitter: 0,
            rule: RuleKind::Conway,
        }
    }
}

/// Initial-state sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Percent chance (0..=100) that a cell starts alive
    pub rate: u32,
    /// Random seed for reproducibility; unset draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { rate: 20, seed: None }
    }
}

/// How frames are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Glyph rows redrawn in place
    #[default]
    Terminal,
    /// One JSON object per frame
    JsonLines,
}

/// Rendering and pacing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub alive_glyph: char,
    pub dead_glyph: char,
    /// Real-time delay between two displayed frames (milliseconds)
    pub frame_delay_ms: u64,
    /// Stop after this many frames (None = run until interrupted)
    pub max_frames: Option<u64>,
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            alive_glyph: '★',
            dead_glyph: '☆',
            frame_delay_ms: 200,
            max_frames: None,
            format: OutputFormat::Terminal,
        }
    }
}

/// Which simulation drives the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Event-scheduled world with per-cell cadences
    #[default]
    World,
    /// Synchronous planet, one generation per frame
    Planet,
}

/// Full configuration for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub engine: EngineKind,
    pub world: WorldConfig,
    pub seed: SeedConfig,
    pub render: RenderConfig,
}

impl SimulationConfig {
    /// Load a JSON configuration file; missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.world.width == 0 || self.world.depth == 0 {
            return Err(Error::InvalidDimensions {
                width: self.world.width as i64,
                depth: self.world.depth as i64,
            });
        }
        if self.world.world_interval == 0 {
            return Err(Error::InvalidInterval {
                owner: "world".to_string(),
                interval: 0,
            });
        }
        if self.world.cell_interval == 0 {
            return Err(Error::InvalidInterval {
                owner: "cell".to_string(),
                interval: 0,
            });
        }
        if self.seed.rate > 100 {
            return Err(Error::Validation(format!(
                "seed rate {} is above 100 percent",
                self.seed.rate
            )));
        }
        Ok(())
    }
}
