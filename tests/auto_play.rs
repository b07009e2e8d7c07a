use prize_wheel::{
    OddsTable, Phase, PrizeSlot, RngSource, SpinResult, Stage, StageCommand, Tuning, WheelController,
};

#[derive(Default)]
struct Tally {
    wins: [u32; 2],
    reveals: u32,
}

impl Stage for Tally {
    fn apply(&mut self, command: StageCommand) {
        if let StageCommand::DetachPrize { .. } = command {
            self.reveals += 1;
        }
    }

    fn result_selected(&mut self, _play: u64, result: &SpinResult) {
        self.wins[result.slot] += 1;
    }
}

#[test]
fn bulk_auto_play_follows_the_odds() {
    let odds = OddsTable::new(vec![PrizeSlot::new("common", 3), PrizeSlot::new("rare", 1)]).unwrap();
    let tuning = Tuning {
        auto_plays: 4_000,
        ..Tuning::default()
    };
    let mut wheel = WheelController::new(odds, tuning, RngSource::seeded(2024), Tally::default()).unwrap();

    wheel.press();
    let mut last_angle = wheel.session().wheel_angle;
    while wheel.phase() == Phase::Spinning {
        wheel.tick();
        let angle = wheel.session().wheel_angle;
        assert!(angle >= last_angle);
        last_angle = angle;
    }

    assert_eq!(wheel.phase(), Phase::Revealing);
    assert_eq!(wheel.session().plays_completed, 4_000);
    let tally = wheel.stage();
    assert_eq!(tally.reveals, 1);
    assert_eq!(tally.wins[0] + tally.wins[1], 4_000);
    assert!((2_800..=3_200).contains(&tally.wins[0]), "common won {}", tally.wins[0]);
}

#[test]
fn seeded_wheels_repeat_themselves() {
    let run = || {
        let odds = OddsTable::new(vec![
            PrizeSlot::new("a", 5),
            PrizeSlot::new("b", 2),
            PrizeSlot::new("c", 1),
        ])
        .unwrap();
        let mut wheel = WheelController::new(odds, Tuning::default(), RngSource::seeded(9), Vec::<StageCommand>::new()).unwrap();
        let mut picks = Vec::new();
        for _ in 0..5 {
            wheel.press();
            while wheel.tick() != Phase::AwaitingClaim {}
            picks.push(wheel.session().pending_result.clone().unwrap().id);
            wheel.press();
        }
        (picks, wheel.session().wheel_angle)
    };
    assert_eq!(run(), run());
}
