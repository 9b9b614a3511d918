//! CPU rasterizer: walks the pixel grid, maps each pixel through the
//! viewport and projection, and asks the scoring engine for a color.

use compute::{OFF_GLOBE, evaluate};
use foundation::math::{Mat3, Projection, Vec2, transform_coord};
use layers::{PlotSheet, Rgba};

use crate::sampler::BaseSampler;

/// Pixel grid plus the zoom/pan state mapping it onto normalized
/// projection space. At the default span of 1 the grid covers [0, 1]²
/// exactly; zooming shrinks the span around an anchor pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub span: f64,
    pub center: Vec2,
}

impl Viewport {
    /// Sizes the grid from a width and the projection aspect ratio, so
    /// pixels stay square on screen. Height rounds to at least one row.
    pub fn new(width: u32, ratio: f64) -> Self {
        let width = width.max(1);
        let height = ((width as f64 / ratio).round() as u32).max(1);
        Self {
            width,
            height,
            span: 1.0,
            center: Vec2::new(0.5, 0.5),
        }
    }

    /// Normalized coordinates under a pixel, sampled at the pixel center.
    /// Row 0 sits at the top of the view and y grows upward.
    pub fn normal_at(&self, px: u32, py: u32) -> Vec2 {
        let fx = (px as f64 + 0.5) / self.width as f64;
        let fy = (py as f64 + 0.5) / self.height as f64;
        Vec2::new(
            self.center.x + (fx - 0.5) * self.span,
            self.center.y + (0.5 - fy) * self.span,
        )
    }

    /// Scales the span by `factor` (> 1 zooms out) while the normalized
    /// point under the anchor pixel stays put. Non-finite or non-positive
    /// factors are ignored.
    pub fn zoom_by(&mut self, factor: f64, px: u32, py: u32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.normal_at(px, py);
        let fx = (px as f64 + 0.5) / self.width as f64;
        let fy = (py as f64 + 0.5) / self.height as f64;
        self.span *= factor;
        self.center = Vec2::new(
            anchor.x - (fx - 0.5) * self.span,
            anchor.y - (0.5 - fy) * self.span,
        );
    }
}

/// Finished pixel grid, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl Framebuffer {
    pub fn pixel(&self, px: u32, py: u32) -> Rgba {
        self.pixels[(py * self.width + px) as usize]
    }

    pub fn into_rgba_image(self) -> image::RgbaImage {
        let mut out = image::RgbaImage::new(self.width, self.height);
        for (px, py, pixel) in out.enumerate_pixels_mut() {
            *pixel = image::Rgba(self.pixel(px, py).to_array());
        }
        out
    }
}

/// Renders one full pass. The world matrix is taken by value so the whole
/// pass sees a single orientation snapshot.
pub fn render(
    viewport: &Viewport,
    projection: &dyn Projection,
    world: Mat3,
    sheet: &PlotSheet,
    base: &dyn BaseSampler,
) -> Framebuffer {
    let mut pixels = Vec::with_capacity(viewport.width as usize * viewport.height as usize);
    for py in 0..viewport.height {
        for px in 0..viewport.width {
            pixels.push(shade(viewport.normal_at(px, py), projection, world, sheet, base));
        }
    }
    Framebuffer {
        width: viewport.width,
        height: viewport.height,
        pixels,
    }
}

fn shade(
    normal: Vec2,
    projection: &dyn Projection,
    world: Mat3,
    sheet: &PlotSheet,
    base: &dyn BaseSampler,
) -> Rgba {
    if normal.x < 0.0 || normal.x > 1.0 || normal.y < 0.0 || normal.y > 1.0 {
        return OFF_GLOBE;
    }
    let coord = transform_coord(projection.to_lat_lon(normal), world);
    evaluate(coord, &sheet.lops, sheet.min_err, || base.sample(coord))
}

#[cfg(test)]
mod tests {
    use super::{Framebuffer, Viewport, render};
    use crate::sampler::SolidSampler;
    use compute::OFF_GLOBE;
    use foundation::math::{
        Equirectangular, GeoCoord, Mat3, Orthographic, build_roll_mat,
    };
    use layers::{LineOfPosition, MinErrConfig, PlotSheet, Rgba};
    use std::f64::consts::{FRAC_PI_4, PI};

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const SEA: Rgba = Rgba::opaque(10, 30, 80);

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "expected {a} ~= {b}");
    }

    #[test]
    fn sizes_height_from_the_aspect_ratio() {
        let wide = Viewport::new(800, 2.0);
        assert_eq!((wide.width, wide.height), (800, 400));
        let square = Viewport::new(641, 1.0);
        assert_eq!((square.width, square.height), (641, 641));
        let tiny = Viewport::new(0, 2.0);
        assert_eq!((tiny.width, tiny.height), (1, 1));
    }

    #[test]
    fn pixel_rows_run_top_down_with_y_up() {
        let viewport = Viewport::new(8, 2.0);
        let top = viewport.normal_at(0, 0);
        let bottom = viewport.normal_at(0, viewport.height - 1);
        assert!(top.y > 0.8 && top.y < 1.0);
        assert!(bottom.y > 0.0 && bottom.y < 0.2);
        assert_close(viewport.normal_at(3, 0).x + viewport.normal_at(4, 0).x, 1.0);
    }

    #[test]
    fn zoom_keeps_the_anchor_fixed() {
        let mut viewport = Viewport::new(800, 2.0);
        let before = viewport.normal_at(600, 100);
        viewport.zoom_by(0.5, 600, 100);
        let after = viewport.normal_at(600, 100);
        assert_close(after.x, before.x);
        assert_close(after.y, before.y);
        assert_close(viewport.span, 0.5);
    }

    #[test]
    fn degenerate_zoom_factors_are_ignored() {
        let mut viewport = Viewport::new(800, 2.0);
        let untouched = viewport;
        viewport.zoom_by(0.0, 400, 200);
        viewport.zoom_by(-2.0, 400, 200);
        viewport.zoom_by(f64::NAN, 400, 200);
        viewport.zoom_by(f64::INFINITY, 400, 200);
        assert_eq!(viewport, untouched);
    }

    #[test]
    fn orthographic_corners_fall_off_the_globe() {
        let viewport = Viewport::new(16, 1.0);
        let frame = render(
            &viewport,
            &Orthographic,
            Mat3::IDENTITY,
            &PlotSheet::default(),
            &SolidSampler(SEA),
        );
        assert_eq!(frame.pixel(0, 0), OFF_GLOBE);
        assert_eq!(frame.pixel(15, 15), OFF_GLOBE);
        assert_eq!(frame.pixel(8, 8), SEA);
    }

    #[test]
    fn zoomed_out_margins_are_off_globe() {
        let mut viewport = Viewport::new(8, 2.0);
        viewport.zoom_by(2.0, 4, 2);
        let frame = render(
            &viewport,
            &Equirectangular,
            Mat3::IDENTITY,
            &PlotSheet::default(),
            &SolidSampler(SEA),
        );
        assert_eq!(frame.pixel(0, 0), OFF_GLOBE);
        assert_eq!(frame.pixel(4, 2), SEA);
    }

    #[test]
    fn range_line_paints_matching_pixels() {
        // Pixel (1, 0) of a 4x2 equirectangular grid sits at lat PI/4,
        // lon -PI/4.
        let viewport = Viewport::new(4, 2.0);
        let anchor = GeoCoord::new(FRAC_PI_4, -FRAC_PI_4);
        let sheet = PlotSheet {
            lops: vec![LineOfPosition::range(anchor, 0.0, 0.01, RED)],
            min_err: MinErrConfig::default(),
        };
        let frame = render(
            &viewport,
            &Equirectangular,
            Mat3::IDENTITY,
            &sheet,
            &SolidSampler(SEA),
        );
        assert_eq!(frame.pixel(1, 0), RED);
        assert_eq!(frame.pixel(0, 0), SEA);
        assert_eq!(frame.pixel(3, 1), SEA);
    }

    #[test]
    fn min_err_paints_over_line_matches() {
        let viewport = Viewport::new(4, 2.0);
        let anchor = GeoCoord::new(FRAC_PI_4, -FRAC_PI_4);
        let sheet = PlotSheet {
            lops: vec![LineOfPosition::range(anchor, 0.0, 0.01, RED)],
            min_err: MinErrConfig::new(PI, Rgba::WHITE),
        };
        let frame = render(
            &viewport,
            &Equirectangular,
            Mat3::IDENTITY,
            &sheet,
            &SolidSampler(SEA),
        );
        assert_eq!(frame.pixel(1, 0), Rgba::WHITE);
    }

    #[test]
    fn world_snapshot_rotates_the_scene() {
        // Center pixel of an odd-sized orthographic view resolves to
        // (0, 0) under the identity world.
        let viewport = Viewport::new(5, 1.0);
        let fuji = GeoCoord::from_degrees(35.36, 138.73);
        let sheet = PlotSheet {
            lops: vec![LineOfPosition::range(fuji, 0.0, 0.01, RED)],
            min_err: MinErrConfig::default(),
        };
        let world = build_roll_mat(GeoCoord::new(0.0, 0.0), fuji);
        let frame = render(&viewport, &Orthographic, world, &sheet, &SolidSampler(SEA));
        assert_eq!(frame.pixel(2, 2), RED);

        let still = render(
            &viewport,
            &Orthographic,
            Mat3::IDENTITY,
            &sheet,
            &SolidSampler(SEA),
        );
        assert_eq!(still.pixel(2, 2), SEA);
    }

    #[test]
    fn framebuffer_converts_to_an_image() {
        let frame = Framebuffer {
            width: 2,
            height: 1,
            pixels: vec![RED, SEA],
        };
        let img = frame.into_rgba_image();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [10, 30, 80, 255]);
    }
}
