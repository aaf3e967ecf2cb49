//! Wireframe renderer: vertex markers plus an edge between every vertex pair
use nalgebra::Vector3;
use tracing::trace;

use crate::config::Config;
use crate::framebuffer::{Rgb, Sprite, Surface};
use crate::mesh::Mesh;
use crate::projection::{Camera, ScreenCoord};

/// Largest coordinate magnitude handed to the line rasterizer (16-bit limit)
pub const EDGE_COORD_LIMIT: i64 = 32766;

/// What one [`RenderContext::draw_mesh`] call put on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub markers: usize,
    pub edges_drawn: usize,
    pub edges_skipped: usize,
}

/// Everything needed to draw a mesh onto a surface of a fixed size.
///
/// Built once from the surface dimensions and passed to the main loop; the
/// marker bitmap is rendered up front and blitted per vertex.
#[derive(Debug, Clone)]
pub struct RenderContext {
    camera: Camera,
    marker: Sprite,
    color: Rgb,
    frame_height: i64,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&Config {
            width,
            height,
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> Self {
        let camera = Camera::with_viewport(
            config.width,
            config.height,
            config.viewport_width,
            config.focal_length,
        );

        Self {
            marker: marker_sprite(config.width, config.height, config.marker_scale, config.foreground),
            camera,
            color: config.foreground,
            frame_height: config.height as i64,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn marker(&self) -> &Sprite {
        &self.marker
    }

    /// Blit the vertex marker centred on a bottom-left-origin point
    pub fn draw_vertex_marker<S: Surface>(&self, surface: &mut S, coord: ScreenCoord) -> bool {
        let x_offset = self.marker.width() as i64 / 2;
        let y_offset = self.marker.height() as i64 / 2;

        let left = coord.x.checked_sub(x_offset).map(i32::try_from);
        let top = coord
            .y
            .checked_add(y_offset)
            .and_then(|y| self.frame_height.checked_sub(y))
            .map(i32::try_from);

        match (left, top) {
            (Some(Ok(left)), Some(Ok(top))) => {
                surface.blit(&self.marker, left, top);
                true
            }
            _ => false,
        }
    }

    /// Draw a line between two bottom-left-origin points.
    ///
    /// Returns `false` without drawing when any coordinate exceeds
    /// [`EDGE_COORD_LIMIT`], which happens when a vertex nears zero depth.
    pub fn draw_edge<S: Surface>(&self, surface: &mut S, from: ScreenCoord, to: ScreenCoord) -> bool {
        if [from.x, from.y, to.x, to.y]
            .iter()
            .any(|c| c.unsigned_abs() > EDGE_COORD_LIMIT as u64)
        {
            trace!(?from, ?to, "edge outside rasterizer range, skipped");
            return false;
        }

        // Every value is within +-32766 here, so neither the flip nor the cast can overflow
        let flip = |y: i64| (self.frame_height - y) as i32;
        surface.line(from.x as i32, flip(from.y), to.x as i32, flip(to.y), self.color);
        true
    }

    /// Draw every vertex of `mesh`, shifted by `translation`, and an edge from
    /// each vertex to every other one. Faces are not consulted.
    pub fn draw_mesh<S: Surface>(
        &self,
        surface: &mut S,
        mesh: &Mesh,
        translation: &Vector3<f64>,
    ) -> FrameReport {
        let projected: Vec<ScreenCoord> = mesh
            .vertices()
            .iter()
            .map(|vertex| self.camera.project(&(vertex + translation)))
            .collect();

        let mut report = FrameReport::default();
        for (i, &from) in projected.iter().enumerate() {
            if self.draw_vertex_marker(surface, from) {
                report.markers += 1;
            }

            for (j, &to) in projected.iter().enumerate() {
                if i == j {
                    continue;
                }
                if self.draw_edge(surface, from, to) {
                    report.edges_drawn += 1;
                } else {
                    report.edges_skipped += 1;
                }
            }
        }

        report
    }
}

/// Square filled-circle marker, `width / scale` pixels across
fn marker_sprite(width: u32, height: u32, scale: u32, color: Rgb) -> Sprite {
    let scale = scale.max(1) as f64;
    let side_x = (width as f64 / scale) as u32;
    // aspect-corrected: height / scale * (width / height)
    let side_y = (height as f64 * width as f64 / height as f64 / scale) as u32;
    let radius = side_x as i32 / 2 - 1;

    Sprite::filled_circle(side_x, side_y, side_x as i32 / 2, side_y as i32 / 2, radius, color)
}
