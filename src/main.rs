use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{info, trace};
use prize_wheel::config::DEFAULT_CONFIG_FILE;
use prize_wheel::{Phase, RngSource, SpinResult, Stage, StageCommand, WheelConfig, WheelController};
use std::env;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Stands in for a renderer: logs every command and tallies the results.
struct LogStage {
    wins: Vec<u64>,
}

impl LogStage {
    fn new(slots: usize) -> Self {
        LogStage {
            wins: vec![0; slots],
        }
    }
}

impl Stage for LogStage {
    fn apply(&mut self, command: StageCommand) {
        trace!("{:?}", command);
    }

    fn result_selected(&mut self, play: u64, result: &SpinResult) {
        self.wins[result.slot] += 1;
        info!("{} {}", play, result.id);
    }
}

struct Clock(Option<Interval>);

impl Clock {
    fn new(frame_rate: u32) -> Self {
        if frame_rate == 0 {
            return Clock(None);
        }
        let mut interval = time::interval(Duration::from_secs_f64(1.0 / frame_rate as f64));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Clock(Some(interval))
    }

    async fn tick(&mut self) {
        match &mut self.0 {
            Some(interval) => {
                interval.tick().await;
            }
            None => tokio::task::yield_now().await,
        }
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => Ok(Some(value.parse().with_context(|| format!("{} must be a number", key))?)),
        Err(_) => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let path = env::var("WHEEL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let config = WheelConfig::load(&path).await?;
    let odds = config.build_table()?;
    let tuning = config.tuning()?;
    let rounds = env_number::<u32>("WHEEL_ROUNDS")?.unwrap_or(1);
    let random = match env_number::<u64>("WHEEL_SEED")? {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let stage = LogStage::new(odds.len());
    let mut wheel = WheelController::new(odds, tuning, random, stage)?;
    let mut clock = Clock::new(config.frame_rate);
    // Let the highlight turn for a second before claiming.
    let linger = config.frame_rate.max(1);

    for round in 1..=rounds {
        info!("round {} of {}", round, rounds);
        wheel.press();
        loop {
            clock.tick().await;
            if wheel.tick() == Phase::AwaitingClaim {
                break;
            }
        }
        for _ in 0..linger {
            clock.tick().await;
            wheel.tick();
        }
        wheel.press();
    }

    let plays = wheel.session().plays_completed;
    println!("{} spins, wheel turned {:.0} degrees", plays, wheel.session().wheel_angle);
    for ((id, expected), wins) in wheel.odds().probabilities().into_iter().zip(&wheel.stage().wins) {
        let observed = if plays == 0 { 0.0 } else { *wins as f64 / plays as f64 };
        println!("{:>12}  {:>6}  {:>6.2}%  (expected {:.2}%)", id, wins, observed * 100.0, expected * 100.0);
    }
    Ok(())
}
