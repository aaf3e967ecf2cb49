//! Pinhole camera projection
use nalgebra::Point3;

/// Integer pixel coordinate with a bottom-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCoord {
    pub x: i64,
    pub y: i64,
}

impl ScreenCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Camera configuration for 3D rendering.
///
/// The y axis is depth: a point at `(0, focal_length, 0)` lands on the
/// centre pixel. Created once from the display size and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Reserved position/orientation pair, always zero
    pub origin: (Point3<f64>, Point3<f64>),
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub focal_length: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl Camera {
    pub const DEFAULT_FOCAL_LENGTH: f64 = 0.6;
    pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1.0;

    pub fn new(pixel_width: u32, pixel_height: u32) -> Self {
        Self::with_focal_length(pixel_width, pixel_height, Self::DEFAULT_FOCAL_LENGTH)
    }

    pub fn with_focal_length(pixel_width: u32, pixel_height: u32, focal_length: f64) -> Self {
        Self::with_viewport(
            pixel_width,
            pixel_height,
            Self::DEFAULT_VIEWPORT_WIDTH,
            focal_length,
        )
    }

    pub fn with_viewport(
        pixel_width: u32,
        pixel_height: u32,
        viewport_width: f64,
        focal_length: f64,
    ) -> Self {
        Self {
            origin: (Point3::origin(), Point3::origin()),
            viewport_width,
            viewport_height: viewport_width * pixel_height as f64 / pixel_width as f64,
            focal_length,
            pixel_width,
            pixel_height,
        }
    }

    /// Project a 3D point to integer screen pixels.
    ///
    /// `y` is the distance from the camera and must not be zero. A zero or
    /// near-zero depth yields infinite/NaN scales; those saturate to
    /// `i64::MAX`/`i64::MIN` so the result is always far off-screen rather
    /// than a bogus pixel. Points behind the camera project mirrored.
    pub fn project_coord(&self, x: f64, y: f64, z: f64) -> ScreenCoord {
        let scale_x = (x / self.viewport_width) * (self.focal_length / y) + 0.5;
        let scale_y = (z / self.viewport_height) * (self.focal_length / y) + 0.5;

        ScreenCoord {
            x: to_pixel(scale_x, self.pixel_width),
            y: to_pixel(scale_y, self.pixel_height),
        }
    }

    pub fn project(&self, point: &Point3<f64>) -> ScreenCoord {
        self.project_coord(point.x, point.y, point.z)
    }
}

fn to_pixel(scale: f64, extent: u32) -> i64 {
    let pixel = (scale * extent as f64).floor();
    if pixel.is_nan() {
        i64::MAX
    } else {
        // float-to-int `as` saturates at the i64 bounds
        pixel as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(1920, 1080);
        assert_eq!(camera.viewport_width, 1.0);
        assert!((camera.viewport_height - 0.5625).abs() < 1e-12);
        assert_eq!(camera.focal_length, 0.6);
        assert_eq!(camera.origin, (Point3::origin(), Point3::origin()));
    }

    #[test]
    fn test_focal_point_hits_centre() {
        for (w, h) in [(1920, 1080), (800, 600), (7, 3)] {
            let camera = Camera::new(w, h);
            let centre = camera.project_coord(0.0, camera.focal_length, 0.0);
            assert_eq!(centre, ScreenCoord::new(w as i64 / 2, h as i64 / 2));
        }
    }

    #[test]
    fn test_projection_is_pure() {
        let camera = Camera::new(1920, 1080);
        let before = camera.clone();
        let a = camera.project_coord(1.3, 4.2, -0.7);
        let b = camera.project_coord(1.3, 4.2, -0.7);
        assert_eq!(a, b);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_known_projection() {
        let camera = Camera::new(1920, 1080);
        // focal / depth = 0.5, so both scales are 0.75
        let coord = camera.project_coord(0.5, 1.2, 0.28125);
        assert_eq!(coord, ScreenCoord::new(1440, 810));
    }

    #[test]
    fn test_floor_for_negative_scale() {
        let camera = Camera::new(100, 100);
        // scale_x = -0.625 + 0.5 = -0.125 -> -12.5 px
        let coord = camera.project_coord(-0.625, 0.6, 0.0);
        assert_eq!(coord.x, -13);
    }

    #[test]
    fn test_zero_depth_saturates() {
        let camera = Camera::new(1920, 1080);
        let off = camera.project_coord(1.0, 0.0, -1.0);
        assert_eq!(off.x, i64::MAX);
        assert_eq!(off.y, i64::MIN);

        // 0 * inf is NaN
        let nan = camera.project_coord(0.0, 0.0, 0.0);
        assert_eq!(nan, ScreenCoord::new(i64::MAX, i64::MAX));
    }
}
