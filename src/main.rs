//! Skyflap headless demo
//!
//! Runs one scripted round against a fixed 480x800 viewport and prints
//! the outcome. Useful as a smoke test of the full tick path without
//! any presentation layer attached.

use std::time::{SystemTime, UNIX_EPOCH};

use skyflap::RoundDriver;
use skyflap::sim::{GameEvent, Size};

fn main() {
    env_logger::init();

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    let seed = now_ms as u64;

    log::info!("skyflap headless demo, seed {}", seed);

    let mut driver = RoundDriver::new(seed);
    driver.select_character("ROBIN");
    if let Err(err) = driver.start_round(Size::new(480.0, 800.0), now_ms) {
        log::error!("could not start round: {}", err);
        return;
    }

    // Flap every 400ms of simulated time, roughly holding altitude,
    // until the speed ramp wins
    let mut elapsed = 0.0_f64;
    while driver.state().is_started && elapsed < 120_000.0 {
        driver.advance(100.0);
        elapsed += 100.0;
        if elapsed % 400.0 == 0.0 && driver.state().is_started {
            let _ = driver.user_flap();
        }
        for event in driver.drain_events() {
            match event {
                GameEvent::RoundStarted { round } => println!("round {} started", round),
                GameEvent::ScoreChanged { score } => println!("score: {}", score),
                GameEvent::GameOver { final_score } => {
                    println!("game over, final score {}", final_score)
                }
            }
        }
    }

    let state = driver.state();
    println!(
        "lifelines left: {}, rounds played: {}",
        state.lifelines,
        state.rounds.len()
    );
    for (name, tally) in state.leaderboard.standings() {
        println!("{}: {}", name, tally);
    }
}
