use std::path::Path;

use crate::colors::Color;

/// Represents a 2D texture for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Procedural checkerboard of `size` x `size` texels with square cells of
    /// `cell` texels, alternating between `light` and `dark`.
    pub fn checkerboard(size: u32, cell: u32, light: Color, dark: Color) -> Self {
        let cell = cell.max(1);
        let (light, dark) = (light.to_argb(), dark.to_argb());
        let data = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| if (x / cell + y / cell) % 2 == 0 { light } else { dark })
            .collect();

        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// (0,0) is the bottom-left corner; rows are stored top first, so V is
    /// flipped. UVs outside [0,1] repeat.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.data.is_empty() {
            return Color::WHITE;
        }
        let u = u.rem_euclid(1.0);
        let v = (1.0 - v).rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        Color::from_argb(self.data[(y * self.width + x) as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_cells() {
        let tex = Texture::checkerboard(4, 2, Color::WHITE, Color::BLACK);
        assert_eq!(tex.width(), 4);
        // Top-left cell is light; v = 1.0 addresses the top row.
        assert_eq!(tex.sample(0.1, 0.9), Color::WHITE);
        assert_eq!(tex.sample(0.6, 0.9), Color::BLACK);
        assert_eq!(tex.sample(0.6, 0.1), Color::WHITE);
    }

    #[test]
    fn test_sample_wraps() {
        let tex = Texture::checkerboard(4, 2, Color::WHITE, Color::BLACK);
        assert_eq!(tex.sample(1.1, 0.9), tex.sample(0.1, 0.9));
        assert_eq!(tex.sample(-0.9, 0.9), tex.sample(0.1, 0.9));
    }

    #[test]
    fn test_from_png_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("red.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .expect("write png");

        let tex = Texture::from_file(&path).expect("load png");
        assert_eq!((tex.width(), tex.height()), (2, 2));
        assert_eq!(tex.sample(0.5, 0.5), Color::RED);
    }
}
