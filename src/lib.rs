//! Weighted prize wheel: odds resolution plus the spin, reveal and claim
//! state machine that drives a wheel widget one frame at a time.

pub mod config;
pub mod controller;
pub mod error;
pub mod motion;
pub mod odds;
pub mod random;
pub mod stage;

pub use config::WheelConfig;
pub use controller::{Event, Phase, PlaySession, Tuning, WheelController};
pub use error::ConfigError;
pub use odds::{AngleMode, OddsTable, PrizeSlot, SpinResult};
pub use random::{RandomSource, RngSource};
pub use stage::{Stage, StageCommand};
