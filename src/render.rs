//! Guarded render boundary
//!
//! A render pass is best-effort: whatever goes wrong, the frame is skipped
//! and the host never sees a panic or an error result. The skip is an
//! explicit, logged outcome rather than a swallowed exception.

mod linear;
mod radial;

pub use linear::draw_linear_waveform;
pub use radial::{draw_peak_ring, draw_rays, sweep_shade};

use thiserror::Error;

/// Reasons a render pass can be skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no sample frames have arrived yet")]
    EmptyHistory,
    #[error("view size {width}x{height} leaves nothing to draw")]
    DegenerateView { width: u32, height: u32 },
    #[error("failed to build a drawing path")]
    PathConstruction,
    #[error("shared state lock was poisoned by a panicked holder")]
    StatePoisoned,
}

/// Summary of a completed render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of rays emitted by the reducer
    pub ray_count: usize,
    /// Largest ray value this pass
    pub frame_peak: u16,
    /// Peak-ring slot highlighted by the sweep
    pub current_slot: usize,
}

/// Tagged result of a render pass; skipping is normal operation, not failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(FrameStats),
    Skipped(RenderError),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    pub fn stats(&self) -> Option<&FrameStats> {
        match self {
            RenderOutcome::Rendered(stats) => Some(stats),
            RenderOutcome::Skipped(_) => None,
        }
    }
}
