//! Simulation operations
//!
//! Every state mutation goes through one of the functions here, each a
//! discrete atomic transform: position update always precedes the impact
//! check, and recycle decisions precede the uniform scroll shift. The
//! clock-driven operations (`fall`, `next_frame`, `move_pipes`) gate
//! silently on `is_started` so a late-arriving tick after game over is
//! harmless.

use thiserror::Error;

use super::collision::detect_impact;
use super::layout;
use super::state::{GameEvent, GameState, PipeConfig, PipePair, PipeSegment, Round, Size};
use crate::consts::START_LIFELINES;

/// Precondition violations. Terminal game over is not an error; it is
/// reported through the `game_over` flag and [`GameEvent::GameOver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("viewport has no size yet")]
    ViewportUnset,
    #[error("no character selected")]
    NoCharacterSelected,
    #[error("round is not active")]
    RoundNotActive,
}

/// Begin a round: store the viewport, reset round-scoped counters,
/// append a fresh round to the history, center the bird and lay out the
/// obstacle pool. Calling this mid-round deliberately re-lays-out
/// everything - starting fresh is always an explicit restart.
pub fn start_game(state: &mut GameState, viewport: Size, now_ms: f64) -> Result<(), GameError> {
    if state.selected_character.is_none() {
        log::error!("start_game refused: no character selected");
        return Err(GameError::NoCharacterSelected);
    }
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        log::error!(
            "start_game refused: viewport {}x{} not sized",
            viewport.width,
            viewport.height
        );
        return Err(GameError::ViewportUnset);
    }

    state.viewport = viewport;
    state.is_ready = true;
    state.is_started = true;
    state.game_over = false;
    state.score = 0;
    state.lifelines = START_LIFELINES;

    let id = state.next_key();
    state.rounds.push(Round {
        id,
        score: 0,
        started_at_ms: now_ms,
    });

    state.bird.center_in(viewport);
    layout::layout_pipes(state);

    log::info!(
        "round {} started, viewport {}x{}",
        id,
        viewport.width,
        viewport.height
    );
    state.push_event(GameEvent::RoundStarted { round: id });
    Ok(())
}

/// Reset everything round-scoped (bird, pool, spacing config, history,
/// character selection). The leaderboard persists.
pub fn restart_game(state: &mut GameState) {
    state.is_started = false;
    state.is_ready = false;
    state.game_over = false;
    state.score = 0;
    state.lifelines = START_LIFELINES;
    state.selected_character = None;
    state.rounds.clear();
    state.bird = Default::default();
    state.pipe = PipeConfig::default();

    let mut pipes = Vec::with_capacity(state.pipes.len());
    for _ in 0..state.pipes.len() {
        let top = state.next_key();
        let bottom = state.next_key();
        pipes.push(PipePair {
            top: PipeSegment::new(top),
            bottom: PipeSegment::new(bottom),
        });
    }
    state.pipes = pipes;
    log::info!("game restarted (leaderboard kept)");
}

/// Full reset to initial defaults, leaderboard included. The original
/// seed is kept so a reset run replays the same gap sequence.
pub fn reset_game(state: &mut GameState) {
    *state = GameState::new(state.seed);
    log::info!("game reset to defaults");
}

/// User flap: climb, then check for impact. Rejected outside an active
/// round (the host gates input, this keeps a stray tap observable).
pub fn fly(state: &mut GameState) -> Result<(), GameError> {
    if !state.is_started {
        log::warn!("fly ignored: round is not active");
        return Err(GameError::RoundNotActive);
    }
    state.bird.is_flying = true;
    state.bird.pos.y -= state.bird.fly_distance;
    resolve_impact(state);
    Ok(())
}

/// Gravity tick: drop, then check for impact
pub fn fall(state: &mut GameState) {
    if !state.is_started {
        return;
    }
    state.bird.is_flying = true;
    state.bird.pos.y += state.bird.fall_distance;
    resolve_impact(state);
}

/// Flap animation tick; cosmetic only
pub fn next_frame(state: &mut GameState) {
    state.bird.advance_frame();
}

/// Obstacle scroll tick: recycle every fully off-screen pair (scoring
/// and possibly ramping per recycle), then shift the whole pool left by
/// one uniform distance.
pub fn move_pipes(state: &mut GameState) {
    if !state.is_started {
        return;
    }

    for i in 0..state.pipes.len() {
        let right_edge = state.pipes[i].top.pos.x + state.pipes[i].top.size.width * 2.0;
        if right_edge > 0.0 {
            continue;
        }

        let cfg = state.pipe;
        let sample = layout::sample_gap(&mut state.rng, &cfg, state.viewport);
        let x = layout::spawn_x(&cfg, state.viewport);
        let top_key = state.next_key();
        let bottom_key = state.next_key();

        let pair = &mut state.pipes[i];
        pair.top.pos.x = x;
        pair.bottom.pos.x = x;
        pair.top.size.height = sample.top_height;
        pair.bottom.size.height = sample.top_height;
        pair.bottom.pos.y = sample.bottom_y;
        pair.top.key = top_key;
        pair.bottom.key = bottom_key;

        increase_score(state);
        multiply_speed(state);
    }

    let distance = state.pipe.distance;
    for pair in &mut state.pipes {
        pair.top.pos.x -= distance;
        pair.bottom.pos.x -= distance;
    }
}

/// One point per recycled pair: active round, aggregate mirror, and the
/// selected character's leaderboard tally
fn increase_score(state: &mut GameState) {
    if let Some(round) = state.active_round_mut() {
        round.score += 1;
    }
    state.score += 1;
    if let Some(character) = state.selected_character.clone() {
        state.leaderboard.record_pass(&character);
    }
    let score = state.score;
    state.push_event(GameEvent::ScoreChanged { score });
}

/// Compound the scroll speed every `multiplier.step` points. Runs once
/// per recycle, immediately after the scoring increment.
fn multiply_speed(state: &mut GameState) {
    let Some(score) = state.active_round().map(|round| round.score) else {
        return;
    };
    if score % state.multiplier.step == 0 {
        state.pipe.distance *= state.multiplier.distance;
        log::debug!("speed ramped to {:.2}", state.pipe.distance);
    }
}

/// Shared impact path for `fly` and `fall`. A hit with lifelines left is
/// a soft recovery (bird back to spawn, round continues); at zero it is
/// terminal. Ground and pipe in the same tick consume a single lifeline.
fn resolve_impact(state: &mut GameState) {
    let impact = detect_impact(&state.bird, &state.pipes, &state.pipe, state.viewport);
    if impact.any() {
        if state.lifelines > 0 {
            state.lifelines -= 1;
            state.bird.pos.y = state.bird.initial.y;
            log::info!("lifeline consumed, {} remaining", state.lifelines);
        } else {
            state.bird.is_flying = false;
            state.is_started = false;
            state.bird.rotation_hint = 0.0;
            state.game_over = true;
            let final_score = state.score;
            log::info!("game over, final score {}", final_score);
            state.push_event(GameEvent::GameOver { final_score });
        }
    } else {
        state.bird.rotation_hint = 0.0;
    }
}
