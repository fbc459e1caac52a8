//! Obstacle pool geometry
//!
//! Pure helpers that compute gap placement and spawn positions. The gap
//! height itself is always one third of the viewport; the sampled
//! extension only shifts the whole gap downward, so every pair in a
//! round is equally passable.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, PipeConfig, Size};

/// Freshly sampled vertical placement for one obstacle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSample {
    /// Height of the top segment (base height + extension)
    pub top_height: f32,
    /// Spawn y of the bottom segment
    pub bottom_y: f32,
}

/// Sample a gap placement for a spawn or recycle.
///
/// A fair coin picks between the full extension range and its lower
/// half, so small downward shifts are twice as likely as large ones.
/// Extension is always within `[0, cfg.extension]`.
pub fn sample_gap(rng: &mut Pcg32, cfg: &PipeConfig, viewport: Size) -> GapSample {
    let upper = rng.random_bool(0.5);
    let t: f32 = if upper {
        rng.random_range(0.0..1.0)
    } else {
        rng.random_range(0.0..0.5)
    };
    let extension = t * cfg.extension;
    GapSample {
        top_height: cfg.height + extension,
        bottom_y: viewport.height - cfg.height + extension,
    }
}

/// X a recycled pair respawns at: one full pool-width past the right edge
pub fn spawn_x(cfg: &PipeConfig, viewport: Size) -> f32 {
    cfg.width * 2.0 + viewport.width
}

/// Initial spawn x for pair `index`: the whole pool starts off-screen
/// right, staggered by two pipe-widths
pub fn initial_x(index: usize, cfg: &PipeConfig, viewport: Size) -> f32 {
    (index as f32 * 2.0 + 1.0) * cfg.width + viewport.width
}

/// Recompute the spacing config from the viewport and lay out the whole
/// pool at its initial positions. Called by `start_game`.
pub fn layout_pipes(state: &mut GameState) {
    let viewport = state.viewport;
    state.pipe.width = viewport.width / state.pipes.len() as f32;
    state.pipe.height = viewport.height / 3.0;
    state.pipe.extension = viewport.height / 6.0;
    state.pipe.distance = PipeConfig::default().distance;

    let cfg = state.pipe;
    for index in 0..state.pipes.len() {
        let sample = sample_gap(&mut state.rng, &cfg, viewport);
        let x = initial_x(index, &cfg, viewport);
        let pair = &mut state.pipes[index];

        pair.top.initial = Vec2::new(x, 0.0);
        pair.top.size = Size::new(cfg.width, sample.top_height);
        pair.bottom.initial = Vec2::new(x, sample.bottom_y);
        pair.bottom.size = Size::new(cfg.width, sample.top_height);
        pair.top.pos = pair.top.initial;
        pair.bottom.pos = pair.bottom.initial;
    }
}
