//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete tick operations only (fall / flap / scroll)
//! - Seeded RNG only
//! - Stable pool iteration order (by pair index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod layout;
pub mod state;

pub use collision::{Impact, detect_impact};
pub use engine::{
    GameError, fall, fly, move_pipes, next_frame, reset_game, restart_game, start_game,
};
pub use layout::{GapSample, initial_x, layout_pipes, sample_gap, spawn_x};
pub use state::{
    Bird, GameEvent, GameState, PipeConfig, PipePair, PipeSegment, Round, Size, SpeedRamp,
};
