use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::motion::{RevealMotion, RevealTuning, SpinMotion, SpinTuning};
use crate::odds::{OddsTable, SpinResult};
use crate::random::RandomSource;
use crate::stage::{Stage, StageCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Spinning,
    Revealing,
    AwaitingClaim,
}

/// Inputs from the outside world. The controller decides what each one means
/// in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PrimaryButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub play: String,
    pub claim: String,
    pub replay: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            play: "Play".to_string(),
            claim: "Claim".to_string(),
            replay: "Play On".to_string(),
        }
    }
}

/// Validated runtime parameters of a wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub min_revolutions: u32,
    pub max_revolutions: u32,
    /// Spins per button press. Every spin but the last skips the reveal.
    pub auto_plays: u32,
    pub spin: SpinTuning,
    pub reveal: RevealTuning,
    /// Degrees per tick the highlight turns while waiting for a claim.
    pub highlight_rate: f32,
    /// Distance from the wheel center to a prize sitting under the pointer.
    pub prize_radius: f32,
    pub center_stage: Vec2,
    pub labels: Labels,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            min_revolutions: 3,
            max_revolutions: 5,
            auto_plays: 1,
            spin: SpinTuning::default(),
            reveal: RevealTuning::default(),
            highlight_rate: 0.5,
            prize_radius: 150.0,
            center_stage: Vec2::ZERO,
            labels: Labels::default(),
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_revolutions == 0 || self.min_revolutions > self.max_revolutions {
            return Err(ConfigError::InvalidRevolutions {
                min: self.min_revolutions,
                max: self.max_revolutions,
            });
        }

        let positive = [
            ("spin.base_speed", self.spin.base_speed),
            ("reveal.base_speed", self.reveal.base_speed as f64),
            ("reveal.max_scale", self.reveal.max_scale as f64),
        ];
        let non_negative = [
            ("spin.acceleration", self.spin.acceleration),
            ("spin.lead_in", self.spin.lead_in),
            ("spin.trail_out", self.spin.trail_out),
            ("reveal.acceleration", self.reveal.acceleration as f64),
            ("prize_radius", self.prize_radius as f64),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning { field });
            }
        }
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning { field });
            }
        }
        if !self.highlight_rate.is_finite() {
            return Err(ConfigError::InvalidTuning {
                field: "highlight_rate",
            });
        }
        if !self.center_stage.is_finite() {
            return Err(ConfigError::InvalidTuning {
                field: "center_stage",
            });
        }
        Ok(())
    }
}

/// Mutable state of one wheel across plays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaySession {
    pub phase: Phase,
    pub remaining_auto_plays: u32,
    pub pending_result: Option<SpinResult>,
    pub last_result: Option<SpinResult>,
    /// Total rotation applied to the wheel since startup. Only ever grows.
    pub wheel_angle: f64,
    pub plays_completed: u64,
}

impl PlaySession {
    fn new() -> Self {
        PlaySession {
            phase: Phase::Idle,
            remaining_auto_plays: 0,
            pending_result: None,
            last_result: None,
            wheel_angle: 0.0,
            plays_completed: 0,
        }
    }
}

enum Motion {
    Still,
    Spin(SpinMotion),
    Reveal(RevealMotion),
}

pub struct WheelController<R, S> {
    odds: OddsTable,
    tuning: Tuning,
    random: R,
    stage: S,
    session: PlaySession,
    motion: Motion,
    highlight_angle: f32,
}

impl<R: RandomSource, S: Stage> WheelController<R, S> {
    /// Builds a playable wheel. Invalid tuning is rejected here so a
    /// misconfigured wheel never reaches `Idle`.
    pub fn new(odds: OddsTable, tuning: Tuning, random: R, mut stage: S) -> Result<Self, ConfigError> {
        tuning.validate()?;

        stage.apply(StageCommand::SetButtonLabel(tuning.labels.play.clone()));
        stage.apply(StageCommand::SetButtonVisible(true));

        Ok(WheelController {
            odds,
            tuning,
            random,
            stage,
            session: PlaySession::new(),
            motion: Motion::Still,
            highlight_angle: 0.0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    pub fn odds(&self) -> &OddsTable {
        &self.odds
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn random(&self) -> &R {
        &self.random
    }

    pub fn highlight_angle(&self) -> f32 {
        self.highlight_angle
    }

    /// Shorthand for the primary button.
    pub fn press(&mut self) {
        self.handle(Event::PrimaryButton);
    }

    pub fn handle(&mut self, event: Event) {
        match (event, self.session.phase) {
            (Event::PrimaryButton, Phase::Idle) => self.start_play(),
            (Event::PrimaryButton, Phase::AwaitingClaim) => self.claim(),
            (Event::PrimaryButton, phase) => {
                debug!("ignoring button press while {:?}", phase);
            }
        }
    }

    /// Advances the active motion by one frame and returns the phase after it.
    pub fn tick(&mut self) -> Phase {
        match &mut self.motion {
            Motion::Spin(spin) => {
                let step = spin.step();
                self.session.wheel_angle += step.delta;
                self.stage.apply(StageCommand::RotateWheel { degrees: step.delta });
                if step.complete {
                    self.finish_spin();
                }
            }
            Motion::Reveal(reveal) => {
                let step = reveal.step();
                let slot = self.revealed_slot();
                self.stage.apply(StageCommand::SetPrizeTransform {
                    slot,
                    position: step.position,
                    scale: step.scale,
                });
                if step.complete {
                    self.await_claim();
                }
            }
            Motion::Still => {
                if self.session.phase == Phase::AwaitingClaim {
                    let rate = self.tuning.highlight_rate;
                    self.highlight_angle = (self.highlight_angle + rate).rem_euclid(360.0);
                    self.stage.apply(StageCommand::RotateHighlight { degrees: rate });
                }
            }
        }
        self.session.phase
    }

    fn start_play(&mut self) {
        self.session.remaining_auto_plays = self.tuning.auto_plays.max(1);
        self.stage.apply(StageCommand::SetButtonVisible(false));
        self.begin_spin();
    }

    fn begin_spin(&mut self) {
        let value = self.random.below(self.odds.total_weight());
        let result = self.odds.draw(value);
        let revolutions = self
            .random
            .between(self.tuning.min_revolutions, self.tuning.max_revolutions);

        let resting = self.session.wheel_angle.rem_euclid(360.0);
        let amount = result.target_angle + revolutions as f64 * 360.0 - resting;

        let play = self.session.plays_completed + 1;
        info!(
            "play {}: drew {} -> '{}' (slot {}, {:.1} deg)",
            play, value, result.id, result.slot, result.target_angle
        );
        debug!("spinning {:.1} deg over {} extra turns", amount, revolutions);
        self.stage.result_selected(play, &result);

        self.session.pending_result = Some(result);
        self.session.phase = Phase::Spinning;
        self.motion = Motion::Spin(SpinMotion::new(amount, self.tuning.spin));
    }

    fn finish_spin(&mut self) {
        self.session.plays_completed += 1;
        if self.session.remaining_auto_plays > 1 {
            self.session.remaining_auto_plays -= 1;
            debug!(
                "auto-play: {} spins left",
                self.session.remaining_auto_plays
            );
            self.begin_spin();
        } else {
            self.session.remaining_auto_plays = 0;
            self.begin_reveal();
        }
    }

    fn begin_reveal(&mut self) {
        let slot = self.revealed_slot();
        let from = self.prize_home();
        self.stage.apply(StageCommand::DetachPrize { slot });
        self.stage.apply(StageCommand::SetDecorationsVisible(false));

        self.session.phase = Phase::Revealing;
        self.motion = Motion::Reveal(RevealMotion::new(
            from,
            self.tuning.center_stage,
            self.tuning.reveal,
        ));
        debug!("revealing slot {}", slot);
    }

    fn await_claim(&mut self) {
        let slot = self.revealed_slot();
        self.motion = Motion::Still;
        self.session.phase = Phase::AwaitingClaim;
        self.highlight_angle = 0.0;

        self.stage.apply(StageCommand::SetButtonVisible(true));
        self.stage.apply(StageCommand::SetButtonLabel(self.tuning.labels.claim.clone()));
        self.stage.apply(StageCommand::SpawnHighlight { slot });
    }

    fn claim(&mut self) {
        let slot = self.revealed_slot();
        self.stage.apply(StageCommand::DestroyHighlight);
        self.stage.apply(StageCommand::SetPrizeTransform {
            slot,
            position: self.prize_home(),
            scale: 1.0,
        });
        self.stage.apply(StageCommand::SetDecorationsVisible(true));
        self.stage.apply(StageCommand::AttachPrize { slot });
        self.stage.apply(StageCommand::SetButtonLabel(self.tuning.labels.replay.clone()));

        if let Some(result) = self.session.pending_result.take() {
            info!("claimed '{}'", result.id);
            self.session.last_result = Some(result);
        }
        self.session.phase = Phase::Idle;
    }

    fn revealed_slot(&self) -> usize {
        self.session
            .pending_result
            .as_ref()
            .map(|result| result.slot)
            .unwrap_or_default()
    }

    /// Where the winning prize sits once the wheel has stopped: under the
    /// pointer, straight above the wheel center.
    fn prize_home(&self) -> Vec2 {
        Vec2::new(0.0, self.tuning.prize_radius)
    }
}
