//! The waveform view: ingestion, synchronization and the render pass
//!
//! Producers such as an audio capture callback push sample frames from their
//! own threads; the host's render loop polls for a pending redraw and paints
//! into its pixmap. The history queue is the only state shared between the
//! two sides and sits behind its own lock, held just long enough to copy or
//! evict a buffer, never while drawing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tiny_skia::Pixmap;

use crate::clock::{Clock, SystemClock};
use crate::config::{RenderMode, VisualizerConfig};
use crate::decode::decode_samples;
use crate::geometry::Geometry;
use crate::history::FrameHistory;
use crate::reduce::reduce;
use crate::render::{self, FrameStats, RenderError, RenderOutcome};
use crate::ring::PeakRing;

/// Live radial (or linear) visualization of streaming audio amplitude
pub struct WaveformView {
    config: VisualizerConfig,
    clock: Box<dyn Clock>,
    history: Mutex<FrameHistory>,
    render_state: Mutex<RenderState>,
    redraw_pending: AtomicBool,
}

/// State owned by the render side; producers never touch it
#[derive(Debug)]
struct RenderState {
    /// Reused copies of the frames the active mode needs
    scratch: Vec<Vec<i16>>,
    ring: PeakRing,
    current_slot: usize,
    last_update_ms: Option<u64>,
}

impl WaveformView {
    pub fn new(config: VisualizerConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    /// Construct with an injected clock (deterministic sweep gating)
    pub fn with_clock(config: VisualizerConfig, clock: Box<dyn Clock>) -> Self {
        let history = FrameHistory::new(config.history_size);
        Self {
            config,
            clock,
            history: Mutex::new(history),
            render_state: Mutex::new(RenderState {
                scratch: Vec::new(),
                ring: PeakRing::new(),
                current_slot: 0,
                last_update_ms: None,
            }),
            redraw_pending: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Submit one frame of signed samples (primary ingestion entry point)
    ///
    /// Pushes into the history under the lock and flags a redraw. Safe to
    /// call from any thread at any cadence; a burst of submissions coalesces
    /// into a single pending redraw.
    pub fn submit_samples(&self, samples: &[i16]) {
        if let Ok(mut history) = self.history.lock() {
            history.push(samples);
        }
        self.redraw_pending.store(true, Ordering::Release);
    }

    /// Submit a raw byte frame, decoded with the configured strategy
    pub fn submit_raw_bytes(&self, bytes: &[u8]) {
        let samples = decode_samples(bytes, self.config.decode_mode, &self.config);
        self.submit_samples(&samples);
    }

    /// Poll-and-clear the pending redraw flag
    ///
    /// Hosts call this from their draw loop; `true` means at least one frame
    /// arrived since the last render.
    pub fn take_redraw_request(&self) -> bool {
        self.redraw_pending.swap(false, Ordering::AcqRel)
    }

    /// Render one pass into the pixmap
    ///
    /// Best-effort: any problem skips the frame with a logged, tagged
    /// outcome instead of an error or a panic. The pixmap is drawn over
    /// without clearing; clearing the background is the host's business.
    pub fn render(&self, pixmap: &mut Pixmap) -> RenderOutcome {
        match self.try_render(pixmap) {
            Ok(stats) => RenderOutcome::Rendered(stats),
            Err(err) => {
                match err {
                    RenderError::EmptyHistory => log::debug!("render skipped: {err}"),
                    _ => log::warn!("render skipped: {err}"),
                }
                RenderOutcome::Skipped(err)
            }
        }
    }

    fn try_render(&self, pixmap: &mut Pixmap) -> Result<FrameStats, RenderError> {
        let Ok(mut state) = self.render_state.lock() else {
            return Err(RenderError::StatePoisoned);
        };

        self.copy_frames(&mut state)?;

        let geometry = Geometry::from_view(pixmap.width(), pixmap.height(), &self.config)?;

        match self.config.render_mode {
            RenderMode::Radial => self.render_radial(pixmap, &mut state, &geometry),
            RenderMode::Linear => {
                let frames: Vec<&[i16]> = state.scratch.iter().map(Vec::as_slice).collect();
                render::draw_linear_waveform(pixmap, &frames, &self.config)?;
                Ok(FrameStats {
                    ray_count: 0,
                    frame_peak: 0,
                    current_slot: state.current_slot,
                })
            }
        }
    }

    /// Copy what the active mode needs out of the history
    ///
    /// The history lock covers exactly this copy; drawing happens after it
    /// is released. Scratch buffers are recycled across passes.
    fn copy_frames(&self, state: &mut RenderState) -> Result<(), RenderError> {
        let Ok(history) = self.history.lock() else {
            return Err(RenderError::StatePoisoned);
        };
        if history.is_empty() {
            return Err(RenderError::EmptyHistory);
        }

        let needed = match self.config.render_mode {
            RenderMode::Radial => 1,
            RenderMode::Linear => history.len(),
        };
        state.scratch.truncate(needed);
        while state.scratch.len() < needed {
            state.scratch.push(Vec::new());
        }

        match self.config.render_mode {
            RenderMode::Radial => {
                if let Some(latest) = history.latest() {
                    state.scratch[0].clear();
                    state.scratch[0].extend_from_slice(latest);
                }
            }
            RenderMode::Linear => {
                for (slot, frame) in state.scratch.iter_mut().zip(history.frames()) {
                    slot.clear();
                    slot.extend_from_slice(frame);
                }
            }
        }

        Ok(())
    }

    fn render_radial(
        &self,
        pixmap: &mut Pixmap,
        state: &mut RenderState,
        geometry: &Geometry,
    ) -> Result<FrameStats, RenderError> {
        let rays = reduce(
            &state.scratch[0],
            geometry.slot_count,
            self.config.max_amplitude,
        );

        render::draw_rays(
            pixmap,
            geometry,
            &rays.values,
            &self.config.palette,
            self.config.max_amplitude,
        )?;

        // The ring only advances while time does; a backward step keeps the
        // previous sweep position and skips the write entirely.
        let now = self.clock.now_ms();
        match state.last_update_ms {
            Some(last) if now < last => {
                log::warn!("clock moved backward ({now} < {last}); peak ring frozen this pass");
            }
            _ => {
                state.current_slot = state.ring.update(rays.frame_peak, geometry.slot_count);
                state.last_update_ms = Some(now);
            }
        }

        render::draw_peak_ring(
            pixmap,
            geometry,
            state.ring.slots(),
            state.current_slot,
            &self.config.palette,
            self.config.max_amplitude,
            self.config.sweep_arc,
        )?;

        Ok(FrameStats {
            ray_count: rays.values.len(),
            frame_peak: rays.frame_peak,
            current_slot: state.current_slot,
        })
    }

    #[cfg(test)]
    fn ring_snapshot(&self) -> Vec<u16> {
        self.render_state
            .lock()
            .map(|state| state.ring.slots().to_vec())
            .unwrap_or_default()
    }
}
