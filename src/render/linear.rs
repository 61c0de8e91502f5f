//! Linear waveform mode: the history drawn as a fade trail
//!
//! The alternate rendering path. Every retained frame is drawn as a signed
//! waveform across the full width, oldest first and faintest, so older audio
//! visually recedes behind the newest trace.

use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::VisualizerConfig;
use crate::render::RenderError;

/// Draw the retained frames oldest-to-newest with a brightness ramp
///
/// Samples are picked at pixel-column boundaries rather than drawn
/// exhaustively; signed values map around the vertical center, scaled so the
/// configured ceiling reaches the view edges.
pub fn draw_linear_waveform(
    pixmap: &mut Pixmap,
    frames: &[&[i16]],
    config: &VisualizerConfig,
) -> Result<(), RenderError> {
    let width = pixmap.width();
    let height = pixmap.height() as f32;
    if width == 0 || height <= 0.0 {
        return Err(RenderError::DegenerateView {
            width,
            height: pixmap.height(),
        });
    }

    let center_y = height / 2.0;
    let ceiling = config.max_amplitude.max(1) as f32;
    let fade_step = 255 / (config.history_size as u32 + 1);
    let mut brightness = fade_step;

    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };

    for samples in frames {
        if samples.is_empty() {
            brightness += fade_step;
            continue;
        }

        let mut pb = PathBuilder::new();
        for x in 0..width {
            let index = ((x as f32 / width as f32) * samples.len() as f32) as usize;
            let sample = samples[index.min(samples.len() - 1)];
            let y = (sample as f32 / ceiling) * center_y + center_y;
            if x == 0 {
                pb.move_to(0.0, y);
            } else {
                pb.line_to(x as f32, y);
            }
        }
        let path = pb.finish().ok_or(RenderError::PathConstruction)?;

        let color = config.palette.trace;
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, brightness.min(255) as u8);
        paint.anti_alias = true;
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

        brightness += fade_step;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_newest_frame_brightest() {
        let config = VisualizerConfig::default();
        let mut faint = Pixmap::new(64, 64).unwrap();
        let mut bright = Pixmap::new(64, 64).unwrap();

        let wave: Vec<i16> = (0..256).map(|i| if i % 2 == 0 { 4000 } else { -4000 }).collect();

        // One old frame alone vs. the same frame in the newest position.
        draw_linear_waveform(&mut faint, &[&wave], &config).unwrap();
        let older = vec![0i16; 256];
        draw_linear_waveform(
            &mut bright,
            &[&older, &older, &older, &older, &older, &wave],
            &config,
        )
        .unwrap();

        let alpha_sum = |p: &Pixmap| -> u64 {
            p.data().chunks_exact(4).map(|px| px[3] as u64).sum()
        };
        assert!(alpha_sum(&bright) > alpha_sum(&faint));
    }

    #[test]
    fn test_tolerates_empty_frames() {
        let config = VisualizerConfig::default();
        let mut pixmap = Pixmap::new(32, 32).unwrap();
        draw_linear_waveform(&mut pixmap, &[&[], &[1000, -1000]], &config).unwrap();
    }

    #[test]
    fn test_single_sample_frame_draws_flat_line() {
        let config = VisualizerConfig::default();
        let mut pixmap = Pixmap::new(32, 32).unwrap();
        draw_linear_waveform(&mut pixmap, &[&[8192]], &config).unwrap();
        assert!(pixmap.data().iter().any(|&b| b != 0));
    }
}
