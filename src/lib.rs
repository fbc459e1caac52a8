//! Skyflap - a flap-between-the-pipes arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird kinematics, obstacle pool, collisions, scoring)
//! - `driver`: Timer-driven round driver (fall / flap / scroll cadences + command surface)
//! - `leaderboard`: Per-character pass tally
//!
//! Rendering, input capture and score submission live in the host: the
//! core consumes a start trigger plus a viewport size and surfaces
//! read-only state snapshots and [`sim::GameEvent`]s, nothing more.

pub mod driver;
pub mod leaderboard;
pub mod sim;

pub use driver::RoundDriver;
pub use leaderboard::Leaderboard;

/// Game tuning constants
pub mod consts {
    /// Bird sprite size in pixels
    pub const BIRD_WIDTH: f32 = 92.0;
    pub const BIRD_HEIGHT: f32 = 64.0;

    /// Sprite-sheet x offsets the flap animation cycles through
    pub const FRAME_OFFSETS: [f32; 4] = [0.0, 92.0, 184.0, 0.0];

    /// Gravity: pixels dropped per fall tick, and the tick period
    pub const FALL_DISTANCE: f32 = 15.0;
    pub const FALL_DELAY_MS: f64 = 100.0;

    /// Pixels climbed per user flap
    pub const FLY_DISTANCE: f32 = 75.0;
    /// Flap animation frame period
    pub const FLAP_DELAY_MS: f64 = 100.0;

    /// Number of obstacle pairs in the recycled pool
    pub const PIPE_COUNT: usize = 4;
    /// Collision forgiveness margin in pixels
    pub const PIPE_TOLERANCE: f32 = 25.0;
    /// Base horizontal scroll per pipe tick (ramped during a round)
    pub const PIPE_DISTANCE: f32 = 10.0;
    /// Obstacle scroll tick period
    pub const PIPE_DELAY_MS: f64 = 75.0;

    /// Retry credits granted at round start
    pub const START_LIFELINES: u8 = 3;

    /// Scroll-speed ramp: multiplier applied every `SPEED_STEP` points
    pub const SPEED_MULTIPLIER: f32 = 1.1;
    pub const SPEED_STEP: u32 = 5;
}
