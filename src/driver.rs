//! Timer-driven round driver
//!
//! Owns the [`GameState`] (single-writer, no locks needed) and the three
//! independent tick cadences: gravity fall, flap animation, obstacle
//! scroll. The host - a browser frame callback, a game loop, or a test
//! harness - reports elapsed wall time through [`RoundDriver::advance`]
//! and the driver fires however many whole periods are due. Each
//! gameplay fire re-checks that the round is still live, so the tick
//! that flips the state terminal also drops everything still queued
//! behind it.

use crate::sim::{self, GameError, GameEvent, GameState, Size};

/// Drives one game's simulation and exposes the host command surface
pub struct RoundDriver {
    state: GameState,
    fall_acc_ms: f64,
    flap_acc_ms: f64,
    scroll_acc_ms: f64,
}

impl RoundDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            fall_acc_ms: 0.0,
            flap_acc_ms: 0.0,
            scroll_acc_ms: 0.0,
        }
    }

    /// Read-only state snapshot for the presentation layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn select_character(&mut self, id: &str) {
        log::info!("character selected: {}", id);
        self.state.selected_character = Some(id.to_string());
    }

    /// Begin a round. `now_ms` stamps the round history entry; the sim
    /// itself never reads a wall clock.
    pub fn start_round(&mut self, viewport: Size, now_ms: f64) -> Result<(), GameError> {
        sim::start_game(&mut self.state, viewport, now_ms)?;
        self.halt_timers();
        Ok(())
    }

    /// User tap/click: flap upward
    pub fn user_flap(&mut self) -> Result<(), GameError> {
        sim::fly(&mut self.state)
    }

    /// Back to the character-select screen; leaderboard survives
    pub fn request_restart(&mut self) {
        self.halt_timers();
        sim::restart_game(&mut self.state);
    }

    /// Full reset, leaderboard included
    pub fn request_reset(&mut self) {
        self.halt_timers();
        sim::reset_game(&mut self.state);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Report elapsed time and run every tick that came due. No-op
    /// while no round is active.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if !self.state.is_started {
            return;
        }

        self.fall_acc_ms += elapsed_ms;
        self.flap_acc_ms += elapsed_ms;
        self.scroll_acc_ms += elapsed_ms;

        let fall_period = self.state.bird.fall_delay_ms;
        let flap_period = self.state.bird.flap_delay_ms;
        let scroll_period = self.state.pipe.delay_ms;

        while self.fall_acc_ms >= fall_period {
            self.fall_acc_ms -= fall_period;
            if self.state.is_started {
                sim::fall(&mut self.state);
            }
        }

        while self.flap_acc_ms >= flap_period {
            self.flap_acc_ms -= flap_period;
            if self.state.bird.is_flying {
                sim::next_frame(&mut self.state);
            }
        }

        while self.scroll_acc_ms >= scroll_period {
            self.scroll_acc_ms -= scroll_period;
            if self.state.is_started {
                sim::move_pipes(&mut self.state);
            }
        }

        // Terminal transition mid-batch: clear the backlog so a late
        // tick can never mutate a finished round
        if !self.state.is_started {
            self.halt_timers();
        }
    }

    fn halt_timers(&mut self) {
        self.fall_acc_ms = 0.0;
        self.flap_acc_ms = 0.0;
        self.scroll_acc_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const VIEWPORT: Size = Size {
        width: 480.0,
        height: 800.0,
    };

    fn started_driver() -> RoundDriver {
        let mut driver = RoundDriver::new(31337);
        driver.select_character("ROBIN");
        driver.start_round(VIEWPORT, 0.0).unwrap();
        // Park the pool off-screen right so ticks can't collide or recycle
        for pair in &mut driver.state.pipes {
            pair.top.pos.x = 10_000.0;
            pair.bottom.pos.x = 10_000.0;
        }
        driver
    }

    #[test]
    fn test_advance_before_start_is_noop() {
        let mut driver = RoundDriver::new(1);
        driver.advance(10_000.0);
        assert_eq!(driver.state.bird.pos, glam::Vec2::ZERO);
        assert_eq!(driver.state.score, 0);
    }

    #[test]
    fn test_cadences_fire_independently() {
        let mut driver = started_driver();
        let y0 = driver.state.bird.pos.y;
        let x0 = driver.state.pipes[0].top.pos.x;

        // 300 ms: 3 fall periods (100), 3 flap periods (100), 4 scroll periods (75)
        driver.advance(300.0);
        assert_eq!(driver.state.bird.pos.y, y0 + 3.0 * FALL_DISTANCE);
        assert_eq!(driver.state.bird.frame_index, 3);
        assert_eq!(driver.state.pipes[0].top.pos.x, x0 - 4.0 * PIPE_DISTANCE);
    }

    #[test]
    fn test_partial_periods_accumulate() {
        let mut driver = started_driver();
        let y0 = driver.state.bird.pos.y;

        driver.advance(60.0);
        assert_eq!(driver.state.bird.pos.y, y0, "60ms is less than one fall period");
        driver.advance(60.0);
        assert_eq!(driver.state.bird.pos.y, y0 + FALL_DISTANCE);
    }

    #[test]
    fn test_game_over_drops_queued_ticks() {
        let mut driver = started_driver();
        driver.state.lifelines = 0;
        // One fall away from the ground line
        driver.state.bird.pos.y =
            VIEWPORT.height + PIPE_TOLERANCE - driver.state.bird.size.height - FALL_DISTANCE;

        driver.advance(10_000.0);

        assert!(driver.state.game_over);
        // The terminal fall fired first; every queued scroll was dropped
        assert_eq!(driver.state.pipes[0].top.pos.x, 10_000.0);
        // And the backlog is gone: a later tick mutates nothing
        let y = driver.state.bird.pos.y;
        driver.advance(500.0);
        assert_eq!(driver.state.bird.pos.y, y);
    }

    #[test]
    fn test_restart_halts_timers() {
        let mut driver = started_driver();
        driver.advance(80.0); // one scroll due, 5ms residue
        driver.request_restart();
        assert!(!driver.state.is_started);
        assert_eq!(driver.fall_acc_ms, 0.0);
        assert_eq!(driver.scroll_acc_ms, 0.0);
        driver.advance(1_000.0);
        assert_eq!(driver.state.score, 0);
    }

    #[test]
    fn test_flap_rejected_outside_round() {
        let mut driver = RoundDriver::new(1);
        assert_eq!(driver.user_flap(), Err(GameError::RoundNotActive));
    }

    #[test]
    fn test_start_then_flap_then_events() {
        let mut driver = started_driver();
        driver.user_flap().unwrap();
        let events = driver.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundStarted { .. })));
        assert!(driver.drain_events().is_empty());
    }
}
