//! View-derived layout for the radial painter
//!
//! Everything here is recomputed from the current surface dimensions at the
//! top of each render pass, so resizing the host surface needs no extra
//! plumbing. The slot count follows from how many strokes of the configured
//! width fit around the base circle.

use std::f32::consts::PI;

use crate::config::VisualizerConfig;
use crate::render::RenderError;

/// All slots are laid out starting from the negative x-axis.
pub const START_ANGLE: f32 = -180.0;

/// Per-pass layout derived from the view size and configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub center_x: f32,
    pub center_y: f32,
    /// Half of min(width, height); the ray gradient reaches this far
    pub outer_radius: f32,
    /// Radius of the circle the rays grow from (half the outer radius)
    pub base_radius: f32,
    /// Width of the decorative crown band
    pub crown_width: f32,
    /// Stroke width of one ray (a quarter crown)
    pub stroke_width: f32,
    /// Angular subdivisions of the circle
    pub slot_count: usize,
}

impl Geometry {
    /// Derive the layout for a view of the given size
    ///
    /// Zero-area views, or fractions that collapse the stroke or the slot
    /// count to nothing, come back as `DegenerateView` rather than dividing
    /// by zero further down.
    pub fn from_view(
        width: u32,
        height: u32,
        config: &VisualizerConfig,
    ) -> Result<Self, RenderError> {
        let outer_radius = width.min(height) as f32 / 2.0;
        let base_radius = outer_radius / 2.0;
        let crown_width = base_radius * config.crown_fraction;
        let stroke_width = crown_width / 4.0;

        if width == 0 || height == 0 || stroke_width <= 0.0 {
            return Err(RenderError::DegenerateView { width, height });
        }

        let circumference = 2.0 * PI * base_radius;
        let slot_count = (circumference / (stroke_width * 2.0)) as usize;
        if slot_count == 0 {
            return Err(RenderError::DegenerateView { width, height });
        }

        Ok(Self {
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            outer_radius,
            base_radius,
            crown_width,
            stroke_width,
            slot_count,
        })
    }

    /// Degrees between adjacent slots
    pub fn angle_step(&self) -> f32 {
        360.0 / self.slot_count as f32
    }

    /// Angular position of a slot, in degrees
    pub fn slot_angle(&self, index: usize) -> f32 {
        START_ANGLE + index as f32 * self.angle_step()
    }
}

/// Project a polar coordinate around `(cx, cy)` to Cartesian
///
/// Angles are in degrees with 0 on the positive x-axis, increasing toward
/// positive y (screen-down), matching the pixmap coordinate space.
pub fn polar_point(cx: f32, cy: f32, radius: f32, degrees: f32) -> (f32, f32) {
    let radians = degrees.to_radians();
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_fractions_give_constant_slot_count() {
        // 2πb / (2 · b/40) cancels the radius: always ⌊40π⌋ = 125 slots.
        let config = VisualizerConfig::default();
        for size in [64u32, 400, 1080, 4096] {
            let geometry = Geometry::from_view(size, size, &config).unwrap();
            assert_eq!(geometry.slot_count, 125, "size {size}");
        }
    }

    #[test]
    fn test_radii_derive_from_smaller_dimension() {
        let config = VisualizerConfig::default();
        let geometry = Geometry::from_view(400, 300, &config).unwrap();
        assert_relative_eq!(geometry.outer_radius, 150.0);
        assert_relative_eq!(geometry.base_radius, 75.0);
        assert_relative_eq!(geometry.crown_width, 7.5);
        assert_relative_eq!(geometry.stroke_width, 1.875);
        assert_relative_eq!(geometry.center_x, 200.0);
        assert_relative_eq!(geometry.center_y, 150.0);
    }

    #[test]
    fn test_zero_size_is_degenerate() {
        let config = VisualizerConfig::default();
        assert!(Geometry::from_view(0, 300, &config).is_err());
        assert!(Geometry::from_view(300, 0, &config).is_err());
        assert!(Geometry::from_view(0, 0, &config).is_err());
    }

    #[test]
    fn test_crown_fraction_controls_slot_count() {
        // 4π / 0.349 is just over 36.0 slots.
        let config = VisualizerConfig {
            crown_fraction: 0.349,
            ..VisualizerConfig::default()
        };
        let geometry = Geometry::from_view(400, 400, &config).unwrap();
        assert_eq!(geometry.slot_count, 36);
        assert_relative_eq!(geometry.angle_step(), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_slot_angles_start_at_negative_x_axis() {
        let config = VisualizerConfig {
            crown_fraction: 0.349,
            ..VisualizerConfig::default()
        };
        let geometry = Geometry::from_view(400, 400, &config).unwrap();
        assert_relative_eq!(geometry.slot_angle(0), -180.0);
        assert_relative_eq!(geometry.slot_angle(18), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_polar_point_axes() {
        let (x, y) = polar_point(100.0, 100.0, 50.0, 0.0);
        assert_relative_eq!(x, 150.0, epsilon = 1e-3);
        assert_relative_eq!(y, 100.0, epsilon = 1e-3);

        let (x, y) = polar_point(100.0, 100.0, 50.0, -180.0);
        assert_relative_eq!(x, 50.0, epsilon = 1e-3);
        assert_relative_eq!(y, 100.0, epsilon = 1e-3);

        // Screen coordinates: +90 degrees points down.
        let (x, y) = polar_point(100.0, 100.0, 50.0, 90.0);
        assert_relative_eq!(x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(y, 150.0, epsilon = 1e-3);
    }
}
