use glam::Vec2;

use crate::odds::SpinResult;

/// Side effects the controller asks the rendering layer to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum StageCommand {
    RotateWheel { degrees: f64 },
    SetButtonVisible(bool),
    SetButtonLabel(String),
    SetDecorationsVisible(bool),
    /// Take the prize out of the rotating wheel group.
    DetachPrize { slot: usize },
    AttachPrize { slot: usize },
    SetPrizeTransform { slot: usize, position: Vec2, scale: f32 },
    SpawnHighlight { slot: usize },
    RotateHighlight { degrees: f32 },
    DestroyHighlight,
}

pub trait Stage {
    fn apply(&mut self, command: StageCommand);

    /// Called once per spin when the prize is picked, before the wheel moves.
    /// `play` counts spins from 1.
    fn result_selected(&mut self, _play: u64, _result: &SpinResult) {}
}

impl Stage for Vec<StageCommand> {
    fn apply(&mut self, command: StageCommand) {
        self.push(command);
    }
}
