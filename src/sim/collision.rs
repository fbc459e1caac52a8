//! Impact detection
//!
//! Axis-aligned tests between the bird and the ground / obstacle gaps.
//! Both tests carry a fixed pixel tolerance: the bird's horizontal extent
//! is inflated when selecting candidate pairs, and its vertical extent is
//! shrunk when testing the gap, softening visually-harsh edge contacts.

use super::state::{Bird, PipeConfig, PipePair, Size};

/// Outcome of one impact check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Impact {
    pub ground: bool,
    pub pipe: bool,
}

impl Impact {
    /// True if either surface was hit; ground and pipe in the same tick
    /// still count as a single impact
    pub fn any(&self) -> bool {
        self.ground || self.pipe
    }
}

/// Check the bird against the ground and every horizontally-overlapping
/// obstacle pair
pub fn detect_impact(
    bird: &Bird,
    pipes: &[PipePair],
    cfg: &PipeConfig,
    viewport: Size,
) -> Impact {
    let ground = bird.pos.y + bird.size.height >= viewport.height + cfg.tolerance;

    let bird_top = bird.pos.y + cfg.tolerance;
    let bird_bottom = bird.pos.y + bird.size.height - cfg.tolerance;

    let pipe = pipes
        .iter()
        .filter(|pair| overlaps_horizontally(bird, pair, cfg))
        .any(|pair| bird_top < pair.gap_top() || bird_bottom > pair.gap_bottom());

    Impact { ground, pipe }
}

/// Candidate filter: does the pair overlap the bird's tolerance-inflated
/// horizontal extent?
fn overlaps_horizontally(bird: &Bird, pair: &PipePair, cfg: &PipeConfig) -> bool {
    pair.top.pos.x < bird.pos.x - cfg.tolerance + bird.size.width
        && pair.top.pos.x + pair.top.size.width > bird.pos.x + cfg.tolerance
}
