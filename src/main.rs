//! Demo binary: drive the visualizer from a WAV file or a synthesized signal
//!
//! Frames are written as numbered PNGs so the output can be inspected or
//! assembled into a clip without any window-system dependency.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use radialscope::{DecodeMode, RenderMode, RenderOutcome, VisualizerConfig, WaveformView};
use std::fs;
use std::path::{Path, PathBuf};
use tiny_skia::{Color, Pixmap};

#[derive(Parser)]
#[command(name = "radialscope")]
#[command(about = "Radial audio waveform visualizer demo")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file into a sequence of PNG frames
    Render {
        /// Input WAV file
        #[arg(long)]
        input: PathBuf,

        /// Directory for the numbered PNG frames
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,

        /// Square view size in pixels
        #[arg(long, default_value = "400")]
        size: u32,

        /// Samples fed per visualized frame
        #[arg(long, default_value = "2048")]
        chunk: usize,

        /// Rendering mode
        #[arg(long, value_enum, default_value = "radial")]
        mode: ModeArg,

        /// Feed frames through the legacy magnitude-fold byte decoder
        #[arg(long)]
        effect: bool,
    },

    /// Render a synthesized amplitude sweep (no input file needed)
    Demo {
        /// Directory for the numbered PNG frames
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,

        /// Square view size in pixels
        #[arg(long, default_value = "400")]
        size: u32,

        /// Number of frames to produce
        #[arg(long, default_value = "120")]
        frames: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Radial,
    Linear,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Radial => RenderMode::Radial,
            ModeArg::Linear => RenderMode::Linear,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            out_dir,
            size,
            chunk,
            mode,
            effect,
        } => run_render(&input, &out_dir, size, chunk, mode, effect),
        Commands::Demo {
            out_dir,
            size,
            frames,
        } => run_demo(&out_dir, size, frames),
    }
}

fn run_render(
    input: &Path,
    out_dir: &Path,
    size: u32,
    chunk: usize,
    mode: ModeArg,
    effect: bool,
) -> Result<()> {
    let samples = read_wav_mono(input)?;
    println!("Loaded {} samples from {}", samples.len(), input.display());

    let config = VisualizerConfig {
        render_mode: mode.into(),
        decode_mode: if effect {
            DecodeMode::MagnitudeFold
        } else {
            DecodeMode::Pcm16Le
        },
        ..VisualizerConfig::default()
    };
    let view = WaveformView::new(config);

    render_frames(&view, samples.chunks(chunk.max(1)), size, out_dir, effect)
}

fn run_demo(out_dir: &Path, size: u32, frames: usize) -> Result<()> {
    let view = WaveformView::new(VisualizerConfig::default());
    let bursts: Vec<Vec<i16>> = (0..frames).map(|i| synth_burst(i, 2048)).collect();
    render_frames(&view, bursts.iter().map(Vec::as_slice), size, out_dir, false)
}

/// Push each chunk through the view and save every rendered pass as a PNG
fn render_frames<'a, I>(
    view: &WaveformView,
    chunks: I,
    size: u32,
    out_dir: &Path,
    effect: bool,
) -> Result<()>
where
    I: IntoIterator<Item = &'a [i16]>,
{
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut pixmap =
        Pixmap::new(size, size).ok_or_else(|| anyhow!("view size {size} is not drawable"))?;

    let mut written = 0usize;
    for chunk in chunks {
        if effect {
            // The fold decoder consumes raw bytes; hand it the high bytes of
            // the samples the way a capture callback would.
            let bytes: Vec<u8> = chunk.iter().map(|&s| (s >> 8) as u8).collect();
            view.submit_raw_bytes(&bytes);
        } else {
            view.submit_samples(chunk);
        }

        if !view.take_redraw_request() {
            continue;
        }

        pixmap.fill(Color::BLACK);
        match view.render(&mut pixmap) {
            RenderOutcome::Rendered(stats) => {
                let path = out_dir.join(format!("frame_{written:05}.png"));
                pixmap
                    .save_png(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::debug!(
                    "frame {written}: peak {} across {} rays",
                    stats.frame_peak,
                    stats.ray_count
                );
                written += 1;
            }
            RenderOutcome::Skipped(err) => log::warn!("frame skipped: {err}"),
        }
    }

    println!("Wrote {written} frames to {}", out_dir.display());
    Ok(())
}

/// Read a WAV file and keep the first channel as signed 16-bit samples
fn read_wav_mono(path: &Path) -> Result<Vec<i16>> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();

    let samples: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read samples as 16-bit PCM")?,
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read float samples")?,
    };

    let channels = spec.channels.max(1) as usize;
    Ok(samples.into_iter().step_by(channels).collect())
}

/// Synthesized test signal: a tone burst whose pitch and loudness drift from
/// frame to frame
fn synth_burst(frame: usize, len: usize) -> Vec<i16> {
    let envelope = 0.5 + 0.5 * (frame as f32 * 0.13).sin();
    let cycles = 3.0 + 2.0 * (frame as f32 * 0.05).sin();

    (0..len)
        .map(|n| {
            let t = n as f32 / len as f32;
            let carrier = (t * cycles * 2.0 * std::f32::consts::PI).sin();
            (carrier * envelope * 8192.0) as i16
        })
        .collect()
}
