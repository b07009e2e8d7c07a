use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One wedge of the wheel and its relative chance of winning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeSlot {
    pub id: String,
    pub weight: u32,
}

impl PrizeSlot {
    pub fn new(id: impl Into<String>, weight: u32) -> Self {
        PrizeSlot {
            id: id.into(),
            weight,
        }
    }
}

/// How wedge midpoints are turned into rotation targets.
///
/// `Legacy` truncates the wedge size to whole degrees and rounds each
/// midpoint half-to-even, which is what older wheel art was laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Exact,
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResult {
    pub slot: usize,
    pub id: String,
    /// Center of the winning wedge, in degrees within `[0, 360)`.
    pub target_angle: f64,
}

/// Weighted lookup over an ordered set of prize slots.
///
/// Slot `i` owns the draw values `[bounds[i-1], bounds[i])`, so every value in
/// `[0, total_weight)` maps to exactly one slot and each slot's share of the
/// domain equals its weight.
#[derive(Debug, Clone)]
pub struct OddsTable {
    slots: Vec<PrizeSlot>,
    bounds: Vec<u32>,
    total_weight: u32,
    wedge_size: f64,
    angle_mode: AngleMode,
}

impl OddsTable {
    pub fn new(slots: Vec<PrizeSlot>) -> Result<Self, ConfigError> {
        Self::with_angle_mode(slots, AngleMode::Exact)
    }

    pub fn with_angle_mode(
        slots: Vec<PrizeSlot>,
        angle_mode: AngleMode,
    ) -> Result<Self, ConfigError> {
        if slots.is_empty() {
            return Err(ConfigError::NoSlots);
        }

        let mut bounds = Vec::with_capacity(slots.len());
        let mut total: u32 = 0;
        for slot in &slots {
            if slot.weight == 0 {
                return Err(ConfigError::InvalidWeight {
                    slot: slot.id.clone(),
                    weight: 0,
                });
            }
            total = total
                .checked_add(slot.weight)
                .ok_or(ConfigError::WeightOverflow)?;
            bounds.push(total);
        }

        let wedge_size = match angle_mode {
            AngleMode::Exact => 360.0 / slots.len() as f64,
            AngleMode::Legacy => (360 / slots.len()) as f64,
        };

        Ok(OddsTable {
            slots,
            bounds,
            total_weight: total,
            wedge_size,
            angle_mode,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[PrizeSlot] {
        &self.slots
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Degrees of arc per slot.
    pub fn wedge_size(&self) -> f64 {
        self.wedge_size
    }

    /// Cumulative upper bound (exclusive) of each slot's draw range.
    pub fn bounds(&self) -> &[u32] {
        &self.bounds
    }

    /// Index of the slot owning `value`. Values past the domain are clamped
    /// onto the last slot.
    pub fn slot_for(&self, value: u32) -> usize {
        let value = if value >= self.total_weight {
            warn!(
                "draw {} outside [0, {}), clamping to {}",
                value,
                self.total_weight,
                self.total_weight - 1
            );
            self.total_weight - 1
        } else {
            value
        };
        self.bounds.partition_point(|&bound| bound <= value)
    }

    pub fn draw(&self, value: u32) -> SpinResult {
        let slot = self.slot_for(value);
        SpinResult {
            slot,
            id: self.slots[slot].id.clone(),
            target_angle: self.target_angle(slot),
        }
    }

    /// Angular center of a slot's wedge. The last wedge always ends at 360.
    pub fn target_angle(&self, slot: usize) -> f64 {
        let start = slot as f64 * self.wedge_size;
        let end = if slot + 1 == self.slots.len() {
            360.0
        } else {
            (slot + 1) as f64 * self.wedge_size
        };
        let mid = (start + end) / 2.0;
        match self.angle_mode {
            AngleMode::Exact => mid,
            AngleMode::Legacy => mid.round_ties_even(),
        }
    }

    /// Configured chance of each slot, in slot order.
    pub fn probabilities(&self) -> Vec<(&str, f64)> {
        let total = self.total_weight as f64;
        self.slots
            .iter()
            .map(|slot| (slot.id.as_str(), slot.weight as f64 / total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(weights: &[u32]) -> OddsTable {
        let slots = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| PrizeSlot::new(format!("prize{}", i), w))
            .collect();
        OddsTable::new(slots).unwrap()
    }

    #[test]
    fn rejects_empty_and_zero_weight() {
        assert_eq!(OddsTable::new(vec![]).unwrap_err(), ConfigError::NoSlots);
        let err = OddsTable::new(vec![PrizeSlot::new("a", 2), PrizeSlot::new("b", 0)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidWeight {
                slot: "b".to_string(),
                weight: 0
            }
        );
    }

    #[test]
    fn rejects_overflowing_total() {
        let err = OddsTable::new(vec![PrizeSlot::new("a", u32::MAX), PrizeSlot::new("b", 1)])
            .unwrap_err();
        assert_eq!(err, ConfigError::WeightOverflow);
    }

    #[test]
    fn uniform_wheel_targets_wedge_centers() {
        let odds = table(&[1, 1, 1, 1]);
        assert_eq!(odds.wedge_size(), 90.0);
        let targets: Vec<(usize, f64)> = (0..4)
            .map(|v| {
                let r = odds.draw(v);
                (r.slot, r.target_angle)
            })
            .collect();
        assert_eq!(targets, vec![(0, 45.0), (1, 135.0), (2, 225.0), (3, 315.0)]);
    }

    #[test]
    fn weighted_skew_matches_weights() {
        let odds = table(&[3, 1]);
        assert_eq!(odds.slot_for(0), 0);
        assert_eq!(odds.slot_for(1), 0);
        assert_eq!(odds.slot_for(2), 0);
        assert_eq!(odds.slot_for(3), 1);
    }

    #[test]
    fn ranges_partition_the_draw_domain() {
        let weights = [5, 1, 7, 2, 1, 9];
        let odds = table(&weights);
        let mut counts = vec![0u32; weights.len()];
        for v in 0..odds.total_weight() {
            counts[odds.slot_for(v)] += 1;
        }
        assert_eq!(counts, weights.to_vec());
    }

    #[test]
    fn boundaries_belong_to_the_next_slot() {
        let odds = table(&[2, 3, 4]);
        assert_eq!(odds.bounds(), &[2, 5, 9]);
        for i in 0..odds.len() {
            let lower = if i == 0 { 0 } else { odds.bounds()[i - 1] };
            let upper = odds.bounds()[i];
            assert_eq!(odds.slot_for(lower), i);
            assert_eq!(odds.slot_for(upper - 1), i);
            if i + 1 < odds.len() {
                assert_eq!(odds.slot_for(upper), i + 1);
            }
        }
    }

    #[test]
    fn out_of_range_draw_is_clamped() {
        let odds = table(&[1, 1, 6]);
        assert_eq!(odds.slot_for(8), 2);
        assert_eq!(odds.slot_for(u32::MAX), 2);
    }

    #[test]
    fn last_wedge_ends_at_full_turn() {
        let odds = table(&[1; 7]);
        let last = odds.target_angle(6);
        assert!((last - (6.0 * 360.0 / 7.0 + 360.0) / 2.0).abs() < 1e-9);
        assert!(last < 360.0);
    }

    #[test]
    fn legacy_mode_rounds_like_old_layouts() {
        let slots = (0..7).map(|i| PrizeSlot::new(format!("p{}", i), 1)).collect();
        let odds = OddsTable::with_angle_mode(slots, AngleMode::Legacy).unwrap();
        assert_eq!(odds.wedge_size(), 51.0);
        assert_eq!(odds.target_angle(0), 26.0);
        assert_eq!(odds.target_angle(1), 76.0);
        assert_eq!(odds.target_angle(6), 333.0);
    }

    #[test]
    fn probabilities_follow_weights() {
        let odds = table(&[3, 1]);
        let p = odds.probabilities();
        assert_eq!(p, vec![("prize0", 0.75), ("prize1", 0.25)]);
    }
}
