//! Radial audio waveform visualizer rendering core
//!
//! Feeds short bursts of signed 16-bit samples into a rolling history and
//! renders them as a circular ray plot: each angular slot shows the averaged
//! magnitude of its share of the newest frame, while a persistent peak ring
//! remembers the loudest moments and a rotating sweep highlight tracks where
//! the newest peak landed. A linear fade-trail mode is available as an
//! alternate rendering path.
//!
//! The crate draws into a caller-supplied [`tiny_skia::Pixmap`]; window
//! surfaces, redraw scheduling and audio capture belong to the host.
//!
//! ```
//! use radialscope::{VisualizerConfig, WaveformView};
//! use tiny_skia::Pixmap;
//!
//! let view = WaveformView::new(VisualizerConfig::default());
//! view.submit_samples(&[0i16; 2048]);
//!
//! let mut pixmap = Pixmap::new(400, 400).unwrap();
//! if view.take_redraw_request() {
//!     let _ = view.render(&mut pixmap);
//! }
//! ```

pub mod clock;
pub mod config;
pub mod decode;
pub mod geometry;
pub mod history;
pub mod reduce;
pub mod render;
pub mod ring;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Palette, RenderMode, Rgba, VisualizerConfig};
pub use decode::{DecodeMode, decode_samples};
pub use render::{FrameStats, RenderError, RenderOutcome};
pub use view::WaveformView;
