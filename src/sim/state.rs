//! Game state and core simulation types
//!
//! All state that must survive a snapshot (and keep replays deterministic)
//! lives here. Screen space has its origin at the top-left, y grows downward.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::leaderboard::Leaderboard;

/// Width/height pair (viewport, sprites, obstacle segments)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub size: Size,
    /// Spawn position, restored on a soft recovery
    pub initial: Vec2,
    pub is_flying: bool,
    /// Index into [`FRAME_OFFSETS`], wraps
    pub frame_index: usize,
    /// Pixels dropped per gravity tick
    pub fall_distance: f32,
    /// Gravity tick period in milliseconds
    pub fall_delay_ms: f64,
    /// Pixels climbed per flap
    pub fly_distance: f32,
    /// Flap animation frame period in milliseconds
    pub flap_delay_ms: f64,
    /// Rotation animation hint for the presentation layer, zeroed on
    /// impact-free ticks
    #[serde(skip)]
    pub rotation_hint: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Size::new(BIRD_WIDTH, BIRD_HEIGHT),
            initial: Vec2::ZERO,
            is_flying: true,
            frame_index: 0,
            fall_distance: FALL_DISTANCE,
            fall_delay_ms: FALL_DELAY_MS,
            fly_distance: FLY_DISTANCE,
            flap_delay_ms: FLAP_DELAY_MS,
            rotation_hint: 0.0,
        }
    }
}

impl Bird {
    /// Sprite-sheet x offset for the current animation frame
    pub fn frame_offset(&self) -> f32 {
        FRAME_OFFSETS[self.frame_index]
    }

    /// Advance the flap animation, wrapping at the end of the frame table
    pub fn advance_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % FRAME_OFFSETS.len();
    }

    /// Center the bird in the viewport and snapshot that as the spawn point
    pub fn center_in(&mut self, viewport: Size) {
        self.pos = Vec2::new(
            viewport.width / 2.0 - self.size.width / 2.0,
            viewport.height / 2.0 - self.size.height / 2.0,
        );
        self.initial = self.pos;
    }
}

/// One segment (top or bottom) of an obstacle pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeSegment {
    /// Identity key, regenerated on recycle so the presentation layer can
    /// restart per-instance animation
    pub key: u32,
    pub pos: Vec2,
    pub initial: Vec2,
    pub size: Size,
}

impl PipeSegment {
    pub fn new(key: u32) -> Self {
        Self {
            key,
            pos: Vec2::ZERO,
            initial: Vec2::ZERO,
            size: Size::default(),
        }
    }
}

/// A top+bottom obstacle pair forming the vertical gap the bird must pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub top: PipeSegment,
    pub bottom: PipeSegment,
}

impl PipePair {
    /// Y of the gap's upper boundary (bottom edge of the top segment)
    pub fn gap_top(&self) -> f32 {
        self.top.pos.y + self.top.size.height
    }

    /// Y of the gap's lower boundary (top edge of the bottom segment)
    pub fn gap_bottom(&self) -> f32 {
        self.bottom.pos.y
    }
}

/// Obstacle spacing and scroll tuning; width/height/extension are
/// recomputed from the viewport on round start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PipeConfig {
    /// Segment width, shared by every pair in the pool
    pub width: f32,
    /// Base top-segment height (one third of the viewport height)
    pub height: f32,
    /// Gap extension sampling range (one sixth of the viewport height)
    pub extension: f32,
    /// Collision forgiveness margin in pixels
    pub tolerance: f32,
    /// Horizontal scroll per tick; ramped during a round
    pub distance: f32,
    /// Scroll tick period in milliseconds
    pub delay_ms: f64,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            extension: 0.0,
            tolerance: PIPE_TOLERANCE,
            distance: PIPE_DISTANCE,
            delay_ms: PIPE_DELAY_MS,
        }
    }
}

/// Scroll-speed ramp configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedRamp {
    /// Multiplier applied to the scroll distance
    pub distance: f32,
    /// Points between ramp applications
    pub step: u32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self {
            distance: SPEED_MULTIPLIER,
            step: SPEED_STEP,
        }
    }
}

/// One play session; history is append-only and only the last entry's
/// score mutates during play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: u32,
    pub score: u32,
    pub started_at_ms: f64,
}

/// Events surfaced to the host, drained after each batch of ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    ScoreChanged { score: u32 },
    /// Terminal; carries the score a submission collaborator needs
    GameOver { final_score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap-sampling RNG; serialized so snapshots replay identically
    pub rng: Pcg32,
    pub bird: Bird,
    /// Fixed-length obstacle pool, recycled round-robin
    pub pipes: Vec<PipePair>,
    pub pipe: PipeConfig,
    /// Round history; cleared by restart/reset, never trimmed during play
    pub rounds: Vec<Round>,
    pub is_started: bool,
    pub is_ready: bool,
    pub game_over: bool,
    pub viewport: Size,
    pub multiplier: SpeedRamp,
    /// Mirrors the active round's score
    pub score: u32,
    pub selected_character: Option<String>,
    pub leaderboard: Leaderboard,
    /// Retry credits; a collision at zero is terminal
    pub lifelines: u8,
    /// Pending events for the host (not part of the snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next identity key
    next_key: u32,
}

impl GameState {
    /// Create a fresh state with the given seed and all defaults
    pub fn new(seed: u64) -> Self {
        let mut next_key = 1;
        let pipes = Self::default_pipes(&mut next_key);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird::default(),
            pipes,
            pipe: PipeConfig::default(),
            rounds: Vec::new(),
            is_started: false,
            is_ready: false,
            game_over: false,
            viewport: Size::default(),
            multiplier: SpeedRamp::default(),
            score: 0,
            selected_character: None,
            leaderboard: Leaderboard::new(),
            lifelines: START_LIFELINES,
            events: Vec::new(),
            next_key,
        }
    }

    /// Allocate a new identity key
    pub fn next_key(&mut self) -> u32 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    /// Zeroed obstacle pool of [`PIPE_COUNT`] pairs with fresh keys
    pub(crate) fn default_pipes(next_key: &mut u32) -> Vec<PipePair> {
        (0..PIPE_COUNT)
            .map(|_| {
                let top = *next_key;
                let bottom = *next_key + 1;
                *next_key += 2;
                PipePair {
                    top: PipeSegment::new(top),
                    bottom: PipeSegment::new(bottom),
                }
            })
            .collect()
    }

    /// The round currently being played, if any
    pub fn active_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub(crate) fn active_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuning() {
        let state = GameState::new(7);
        assert_eq!(state.pipes.len(), PIPE_COUNT);
        assert_eq!(state.lifelines, START_LIFELINES);
        assert_eq!(state.bird.fall_distance, FALL_DISTANCE);
        assert_eq!(state.bird.fly_distance, FLY_DISTANCE);
        assert_eq!(state.pipe.tolerance, PIPE_TOLERANCE);
        assert_eq!(state.pipe.distance, PIPE_DISTANCE);
        assert!(!state.is_started);
        assert!(!state.game_over);
        assert!(state.rounds.is_empty());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut state = GameState::new(7);
        let mut keys: Vec<u32> = state
            .pipes
            .iter()
            .flat_map(|p| [p.top.key, p.bottom.key])
            .collect();
        keys.push(state.next_key());
        keys.push(state.next_key());
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn test_frame_wraps() {
        let mut bird = Bird::default();
        for _ in 0..FRAME_OFFSETS.len() {
            bird.advance_frame();
            assert!(bird.frame_index < FRAME_OFFSETS.len());
        }
        assert_eq!(bird.frame_index, 0);
    }

    #[test]
    fn test_center_in_snapshots_initial() {
        let mut bird = Bird::default();
        bird.center_in(Size::new(480.0, 800.0));
        assert_eq!(bird.pos.x, 480.0 / 2.0 - BIRD_WIDTH / 2.0);
        assert_eq!(bird.pos.y, 800.0 / 2.0 - BIRD_HEIGHT / 2.0);
        assert_eq!(bird.initial, bird.pos);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(7);
        state.push_event(GameEvent::ScoreChanged { score: 1 });
        state.push_event(GameEvent::GameOver { final_score: 1 });
        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_state_snapshot_roundtrip() {
        let state = GameState::new(42);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, state.seed);
        assert_eq!(back.pipes.len(), state.pipes.len());
        assert_eq!(back.lifelines, state.lifelines);
    }
}
