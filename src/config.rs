use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::controller::{Labels, Tuning};
use crate::error::ConfigError;
use crate::motion::{RevealTuning, SpinTuning};
use crate::odds::{AngleMode, OddsTable, PrizeSlot};

pub const DEFAULT_CONFIG_FILE: &str = "wheel_config.json";

/// A prize as written by the designer. Weights are signed here so a bad
/// value is reported instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub id: String,
    pub weight: i64,
}

impl SlotConfig {
    pub fn new(id: &str, weight: i64) -> Self {
        SlotConfig {
            id: id.to_string(),
            weight,
        }
    }
}

impl TryFrom<&SlotConfig> for PrizeSlot {
    type Error = ConfigError;

    fn try_from(slot: &SlotConfig) -> Result<Self, Self::Error> {
        if slot.weight <= 0 {
            return Err(ConfigError::InvalidWeight {
                slot: slot.id.clone(),
                weight: slot.weight,
            });
        }
        let weight = u32::try_from(slot.weight).map_err(|_| ConfigError::WeightOverflow)?;
        Ok(PrizeSlot::new(slot.id.clone(), weight))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// In wheel order, clockwise from the 0 degree mark.
    pub prizes: Vec<SlotConfig>,
    pub spin_min: u32,
    pub spin_max: u32,
    /// Spins per press; more than one runs the wheel unattended.
    pub plays: u32,
    pub angle_mode: AngleMode,
    pub spin: SpinTuning,
    pub reveal: RevealTuning,
    pub highlight_rate: f32,
    pub prize_radius: f32,
    pub center_stage: Vec2,
    pub labels: Labels,
    /// Ticks per second for the driver. 0 runs as fast as possible.
    pub frame_rate: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        let tuning = Tuning::default();
        WheelConfig {
            prizes: vec![
                SlotConfig::new("life_30min", 20),
                SlotConfig::new("brush_3x", 10),
                SlotConfig::new("gems_35", 10),
                SlotConfig::new("hammer_3x", 10),
                SlotConfig::new("coins_750", 5),
                SlotConfig::new("brush_1x", 20),
                SlotConfig::new("gems_75", 5),
                SlotConfig::new("hammer_1x", 20),
            ],
            spin_min: tuning.min_revolutions,
            spin_max: tuning.max_revolutions,
            plays: tuning.auto_plays,
            angle_mode: AngleMode::default(),
            spin: tuning.spin,
            reveal: tuning.reveal,
            highlight_rate: tuning.highlight_rate,
            prize_radius: tuning.prize_radius,
            center_stage: tuning.center_stage,
            labels: tuning.labels,
            frame_rate: 60,
        }
    }
}

impl WheelConfig {
    /// Reads the config file, falling back to defaults when it is missing.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path).await?;
            let config = serde_json::from_str(&content)?;
            info!("loaded wheel config from {}", path.display());
            Ok(config)
        } else {
            warn!("{} not found, using the default wheel", path.display());
            Ok(WheelConfig::default())
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn build_table(&self) -> Result<OddsTable, ConfigError> {
        let slots = self
            .prizes
            .iter()
            .map(PrizeSlot::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        OddsTable::with_angle_mode(slots, self.angle_mode)
    }

    pub fn tuning(&self) -> Result<Tuning, ConfigError> {
        if self.plays == 0 {
            warn!("plays is 0, each press will spin once");
        }
        let tuning = Tuning {
            min_revolutions: self.spin_min,
            max_revolutions: self.spin_max,
            auto_plays: self.plays.max(1),
            spin: self.spin,
            reveal: self.reveal,
            highlight_rate: self.highlight_rate,
            prize_radius: self.prize_radius,
            center_stage: self.center_stage,
            labels: self.labels.clone(),
        };
        tuning.validate()?;
        Ok(tuning)
    }
}
