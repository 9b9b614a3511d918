use std::path::Path;

use foundation::math::{Equirectangular, GeoCoord, Projection};
use layers::Rgba;

/// Supplies the background color under a globe coordinate.
pub trait BaseSampler {
    fn sample(&self, coord: GeoCoord) -> Rgba;
}

/// Flat background color.
#[derive(Debug, Copy, Clone)]
pub struct SolidSampler(pub Rgba);

impl BaseSampler for SolidSampler {
    fn sample(&self, _coord: GeoCoord) -> Rgba {
        self.0
    }
}

/// Equirectangular base map, addressed nearest-pixel. Row 0 is the north
/// edge, column 0 the date line approached from the west.
pub struct MapSampler {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl MapSampler {
    pub fn open(path: &Path) -> Result<Self, image::ImageError> {
        let decoded = image::open(path)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self::from_rgba8(width, height, decoded.as_raw()))
    }

    /// Builds a sampler straight from RGBA bytes, file-free.
    pub fn from_rgba8(width: u32, height: u32, raw: &[u8]) -> Self {
        let pixels = raw
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl BaseSampler for MapSampler {
    fn sample(&self, coord: GeoCoord) -> Rgba {
        if !coord.is_valid() || self.pixels.is_empty() {
            return Rgba::BLACK;
        }
        let normal = Equirectangular.to_normal(coord);
        let col = ((normal.x * self.width as f64) as u32).min(self.width - 1);
        let row = (((1.0 - normal.y) * self.height as f64) as u32).min(self.height - 1);
        let index = (row * self.width + col) as usize;
        self.pixels.get(index).copied().unwrap_or(Rgba::BLACK)
    }
}
