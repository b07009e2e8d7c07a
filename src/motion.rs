//! Per-tick motion laws for the wheel.
//!
//! Each motion is advanced by calling `step` once per frame and reports how
//! far it moved plus whether it has arrived. Nothing here knows about frame
//! timing or the state machine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ease-in/ease-out parameters of a spin, in degrees and degrees per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTuning {
    pub base_speed: f64,
    pub acceleration: f64,
    pub lead_in: f64,
    pub trail_out: f64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        SpinTuning {
            base_speed: 1.0,
            acceleration: 0.3,
            lead_in: 720.0,
            trail_out: 720.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStep {
    pub delta: f64,
    pub complete: bool,
}

/// Rotation of the wheel by a fixed total amount.
#[derive(Debug, Clone)]
pub struct SpinMotion {
    tuning: SpinTuning,
    total: f64,
    travelled: f64,
    speed: f64,
}

impl SpinMotion {
    pub fn new(total: f64, tuning: SpinTuning) -> Self {
        SpinMotion {
            tuning,
            total: total.max(0.0),
            travelled: 0.0,
            speed: tuning.base_speed,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn remaining(&self) -> f64 {
        self.total - self.travelled
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Advances one tick. The last step is shortened so the wheel stops on
    /// the total exactly.
    pub fn step(&mut self) -> SpinStep {
        let remaining = self.remaining();
        if self.speed >= remaining {
            self.travelled = self.total;
            return SpinStep {
                delta: remaining,
                complete: true,
            };
        }

        let delta = self.speed;
        self.travelled += delta;

        if self.travelled < self.tuning.lead_in {
            self.speed += self.tuning.acceleration;
        }
        if self.remaining() < self.tuning.trail_out && self.speed > self.tuning.base_speed {
            self.speed = (self.speed - self.tuning.acceleration).max(self.tuning.base_speed);
        }

        SpinStep {
            delta,
            complete: false,
        }
    }
}

/// Travel of the won prize from the wheel to center stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTuning {
    pub base_speed: f32,
    pub acceleration: f32,
    pub max_scale: f32,
}

impl Default for RevealTuning {
    fn default() -> Self {
        RevealTuning {
            base_speed: 2.0,
            acceleration: 0.3,
            max_scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    pub position: Vec2,
    pub scale: f32,
    pub complete: bool,
}

/// Moves in a straight line. Speeds up and grows over the first third of
/// the distance, coasts through the middle third and slows in the last.
#[derive(Debug, Clone)]
pub struct RevealMotion {
    tuning: RevealTuning,
    from: Vec2,
    to: Vec2,
    distance: f32,
    travelled: f32,
    speed: f32,
    scale: f32,
}

impl RevealMotion {
    pub fn new(from: Vec2, to: Vec2, tuning: RevealTuning) -> Self {
        RevealMotion {
            tuning,
            from,
            to,
            distance: from.distance(to),
            travelled: 0.0,
            speed: tuning.base_speed,
            scale: 1.0,
        }
    }

    pub fn step(&mut self) -> RevealStep {
        let remaining = self.distance - self.travelled;
        if self.speed >= remaining {
            self.travelled = self.distance;
            self.scale = self.tuning.max_scale;
            return RevealStep {
                position: self.to,
                scale: self.scale,
                complete: true,
            };
        }

        self.travelled += self.speed;
        let third = self.distance / 3.0;

        if self.travelled < third {
            self.speed += self.tuning.acceleration;
            let t = smoothstep(self.travelled / third);
            self.scale = 1.0 + (self.tuning.max_scale - 1.0) * t;
        } else {
            self.scale = self.tuning.max_scale;
        }
        if self.distance - self.travelled < third {
            self.speed = (self.speed - self.tuning.acceleration).max(self.tuning.base_speed);
        }

        RevealStep {
            position: self.from.lerp(self.to, self.travelled / self.distance),
            scale: self.scale,
            complete: false,
        }
    }
}

/// Hermite ease between 0 and 1.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
