//! Radial painter: ray pass and peak-ring pass
//!
//! Both passes project per-slot values into line segments around the base
//! circle. Rays grow outward under a radial gradient anchored on the view
//! center; ring entries grow inward and are shaded by a rotating sweep
//! highlight anchored on the most recently written slot.

use tiny_skia::{
    GradientStop, Paint, PathBuilder, Pixmap, Point, RadialGradient, Shader, SpreadMode, Stroke,
    Transform,
};

use crate::config::Palette;
use crate::geometry::{Geometry, polar_point};
use crate::render::RenderError;

/// Draw the current-frame rays outward from the base circle
///
/// Each ray runs from `base_radius` to `base_radius · (1 + value/ceiling)`
/// along its slot angle. One gradient paint is shared by every stroke, so a
/// ray's color depends purely on how far it reaches from the center.
pub fn draw_rays(
    pixmap: &mut Pixmap,
    geometry: &Geometry,
    rays: &[u16],
    palette: &Palette,
    max_amplitude: u16,
) -> Result<(), RenderError> {
    if rays.is_empty() {
        return Ok(());
    }

    let mut paint = Paint::default();
    paint.shader = ray_gradient(geometry, palette).ok_or(RenderError::PathConstruction)?;
    paint.anti_alias = true;

    let stroke = Stroke {
        width: geometry.stroke_width,
        ..Stroke::default()
    };
    let ceiling = max_amplitude.max(1) as f32;

    for (index, &value) in rays.iter().enumerate() {
        let angle = geometry.slot_angle(index);
        let reach = geometry.base_radius * (1.0 + value as f32 / ceiling);
        let path = segment(geometry, geometry.base_radius, reach, angle)?;
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    Ok(())
}

/// Draw the peak-history ring inward from the base circle with sweep shading
///
/// The highlight rotation follows the slot written this pass plus the fixed
/// 180-degree layout offset, so the bright end of the sweep trails right
/// behind the write cursor and fades off around the circle.
pub fn draw_peak_ring(
    pixmap: &mut Pixmap,
    geometry: &Geometry,
    slots: &[u16],
    current_slot: usize,
    palette: &Palette,
    max_amplitude: u16,
    sweep_arc: f32,
) -> Result<(), RenderError> {
    let rotation = current_slot as f32 * geometry.angle_step() + 180.0;
    let stroke = Stroke {
        width: geometry.stroke_width,
        ..Stroke::default()
    };
    let ceiling = max_amplitude.max(1) as f32;

    for (index, &value) in slots.iter().enumerate() {
        let angle = geometry.slot_angle(index);
        let shade = sweep_shade(angle, rotation, sweep_arc);
        let color = palette.sweep.faded(shade);
        if color.a == 0 {
            continue;
        }

        let inner = geometry.base_radius - (geometry.base_radius / 2.0) * (value as f32 / ceiling);
        let path = segment(geometry, geometry.base_radius, inner, angle)?;

        let mut paint = Paint::default();
        paint.set_color(color.to_color());
        paint.anti_alias = true;
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    Ok(())
}

/// Sweep shading factor for a slot angle under the given rotation
///
/// Samples the rotated angular gradient `[transparent @ 0, transparent @
/// sweep_arc, full @ 1]`: zero through the leading arc, then a linear ramp
/// that peaks just behind the rotation axis.
pub fn sweep_shade(angle: f32, rotation: f32, sweep_arc: f32) -> f32 {
    if sweep_arc >= 1.0 {
        return 0.0;
    }

    let mut local = (angle - rotation) % 360.0;
    if local < 0.0 {
        local += 360.0;
    }
    let u = local / 360.0;

    if u <= sweep_arc {
        0.0
    } else {
        (u - sweep_arc) / (1.0 - sweep_arc)
    }
}

fn ray_gradient(geometry: &Geometry, palette: &Palette) -> Option<Shader<'static>> {
    let center = Point::from_xy(geometry.center_x, geometry.center_y);
    let core = palette.core.to_color();
    // The core tone holds the inner 40% before the accents take over.
    let stops = vec![
        GradientStop::new(0.0, core),
        GradientStop::new(0.2, core),
        GradientStop::new(0.4, core),
        GradientStop::new(0.6, palette.accents[0].to_color()),
        GradientStop::new(0.8, palette.accents[1].to_color()),
        GradientStop::new(1.0, palette.accents[2].to_color()),
    ];

    RadialGradient::new(
        center,
        center,
        geometry.outer_radius,
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
}

fn segment(
    geometry: &Geometry,
    from_radius: f32,
    to_radius: f32,
    angle: f32,
) -> Result<tiny_skia::Path, RenderError> {
    let (x0, y0) = polar_point(geometry.center_x, geometry.center_y, from_radius, angle);
    let (x1, y1) = polar_point(geometry.center_x, geometry.center_y, to_radius, angle);

    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    pb.finish().ok_or(RenderError::PathConstruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualizerConfig;
    use approx::assert_relative_eq;

    fn thirtysix_slot_geometry() -> Geometry {
        let config = VisualizerConfig {
            crown_fraction: 0.349,
            ..VisualizerConfig::default()
        };
        Geometry::from_view(400, 400, &config).unwrap()
    }

    #[test]
    fn test_sweep_is_transparent_at_the_current_slot() {
        let geometry = thirtysix_slot_geometry();
        // Slot 0 written: rotation lands exactly on slot 0's angle (mod 360).
        let rotation = 0.0 * geometry.angle_step() + 180.0;
        let shade = sweep_shade(geometry.slot_angle(0), rotation, 0.1);
        assert_relative_eq!(shade, 0.0);
    }

    #[test]
    fn test_sweep_peaks_just_behind_the_cursor() {
        let geometry = thirtysix_slot_geometry();
        let rotation = 0.0 * geometry.angle_step() + 180.0;
        let behind = sweep_shade(geometry.slot_angle(35), rotation, 0.1);
        let ahead = sweep_shade(geometry.slot_angle(1), rotation, 0.1);
        assert!(behind > 0.9, "trailing slot should be near full: {behind}");
        assert_relative_eq!(ahead, 0.0);
    }

    #[test]
    fn test_sweep_ramp_is_monotonic_around_the_circle() {
        let rotation = 77.0;
        let mut previous = -1.0;
        for i in 0..359 {
            let angle = rotation + 1.0 + i as f32;
            let shade = sweep_shade(angle, rotation, 0.1);
            assert!(shade >= previous - 1e-4, "dip at offset {i}");
            previous = shade;
        }
    }

    #[test]
    fn test_degenerate_sweep_arc_blanks_the_ring() {
        assert_relative_eq!(sweep_shade(42.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(sweep_shade(42.0, 0.0, 1.5), 0.0);
    }

    #[test]
    fn test_ray_pass_paints_pixels() {
        let geometry = thirtysix_slot_geometry();
        let mut pixmap = Pixmap::new(400, 400).unwrap();
        let rays = vec![8192u16; geometry.slot_count];
        draw_rays(
            &mut pixmap,
            &geometry,
            &rays,
            &Palette::default(),
            8192,
        )
        .unwrap();
        assert!(pixmap.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn test_zero_rays_paint_nothing() {
        let geometry = thirtysix_slot_geometry();
        let mut pixmap = Pixmap::new(400, 400).unwrap();
        draw_rays(&mut pixmap, &geometry, &[], &Palette::default(), 8192).unwrap();
        assert!(pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_ring_pass_paints_the_trailing_arc() {
        let geometry = thirtysix_slot_geometry();
        let mut pixmap = Pixmap::new(400, 400).unwrap();
        let slots = vec![8192u16; geometry.slot_count];
        draw_peak_ring(
            &mut pixmap,
            &geometry,
            &slots,
            0,
            &Palette::default(),
            8192,
            0.1,
        )
        .unwrap();
        assert!(pixmap.data().iter().any(|&b| b != 0));
    }
}
