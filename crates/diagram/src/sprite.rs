//! Sprite loading and compositing onto the diagram canvas.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;

use crate::error::{DiagramError, DiagramResult};

/// Where the paste point is anchored on the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The point is the sprite's upper-left corner
    TopLeft,
    /// The sprite is centered on the point
    Centroid,
}

/// How paste coordinates are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coords {
    /// Fractions of canvas width/height
    Normalized,
    /// Absolute pixel coordinates
    Pixels,
}

/// An owned RGBA sprite decoded from an asset file.
#[derive(Debug, Clone)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    /// Load a sprite from an image file, converting to RGBA8.
    pub fn load(path: impl AsRef<Path>) -> DiagramResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| DiagramError::AssetLoad {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded sprite"
        );

        Ok(Self { image })
    }

    /// Wrap an in-memory image as a sprite.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Scale both dimensions by `factor` using Lanczos resampling.
    ///
    /// Target dimensions are truncated to whole pixels, so aspect ratio is
    /// preserved within one pixel. Factors that are not strictly positive,
    /// or that would truncate a dimension to zero, are rejected.
    pub fn resize(&mut self, factor: f32) -> DiagramResult<()> {
        if !(factor > 0.0) {
            return Err(DiagramError::InvalidScale(factor));
        }

        let width = (self.image.width() as f32 * factor) as u32;
        let height = (self.image.height() as f32 * factor) as u32;
        if width == 0 || height == 0 {
            return Err(DiagramError::InvalidScale(factor));
        }

        self.image = imageops::resize(&self.image, width, height, FilterType::Lanczos3);
        Ok(())
    }

    /// Composite the sprite onto `canvas` with source-over alpha blending.
    ///
    /// With [`Coords::Normalized`] the position is given as fractions of the
    /// canvas size, converted by multiplication and truncation. With
    /// [`Anchor::Centroid`] the origin is shifted left/up by half the sprite
    /// size so the sprite is centered on the point. Regions extending past
    /// the canvas are clipped silently.
    pub fn paste(&self, canvas: &mut RgbaImage, x: f64, y: f64, coords: Coords, anchor: Anchor) {
        let (mut px, mut py) = match coords {
            Coords::Normalized => (
                (x * canvas.width() as f64) as i64,
                (y * canvas.height() as f64) as i64,
            ),
            Coords::Pixels => (x as i64, y as i64),
        };

        if anchor == Anchor::Centroid {
            px -= i64::from(self.image.width()) / 2;
            py -= i64::from(self.image.height()) / 2;
        }

        imageops::overlay(canvas, &self.image, px, py);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> Sprite {
        Sprite::from_image(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    #[test]
    fn test_load_missing_file() {
        let err = Sprite::load("/nonexistent/sprite.png").unwrap_err();
        assert!(matches!(err, DiagramError::AssetLoad { .. }));
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let mut sprite = solid(400, 300, [10, 20, 30, 255]);
        sprite.resize(0.15).unwrap();
        assert_eq!(sprite.width(), 60);
        assert_eq!(sprite.height(), 45);

        // odd dimensions truncate, staying within 1px of the exact ratio
        let mut sprite = solid(427, 333, [10, 20, 30, 255]);
        sprite.resize(0.15).unwrap();
        assert_eq!(sprite.width(), 64); // 64.05 truncated
        assert_eq!(sprite.height(), 49); // 49.95 truncated
    }

    #[test]
    fn test_resize_rejects_non_positive_factor() {
        let mut sprite = solid(40, 40, [0, 0, 0, 255]);
        assert!(matches!(
            sprite.resize(0.0),
            Err(DiagramError::InvalidScale(_))
        ));
        assert!(matches!(
            sprite.resize(-1.5),
            Err(DiagramError::InvalidScale(_))
        ));
        assert!(matches!(
            sprite.resize(f32::NAN),
            Err(DiagramError::InvalidScale(_))
        ));
        // untouched by the failed calls
        assert_eq!(sprite.width(), 40);
    }

    #[test]
    fn test_resize_rejects_degenerate_result() {
        let mut sprite = solid(4, 4, [0, 0, 0, 255]);
        assert!(matches!(
            sprite.resize(0.1),
            Err(DiagramError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_paste_centroid_centers_sprite() {
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let sprite = solid(10, 10, [255, 0, 0, 255]);
        sprite.paste(&mut canvas, 50.0, 50.0, Coords::Pixels, Anchor::Centroid);

        assert_eq!(*canvas.get_pixel(50, 50), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(45, 45), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(54, 54), Rgba([255, 0, 0, 255]));
        // just outside the pasted region
        assert_eq!(*canvas.get_pixel(44, 50), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(55, 50), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_paste_normalized_coordinates() {
        let mut canvas = RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255]));
        let sprite = solid(4, 4, [0, 0, 255, 255]);
        sprite.paste(&mut canvas, 0.5, 0.5, Coords::Normalized, Anchor::TopLeft);

        // 0.5 * 200 = 100, 0.5 * 100 = 50, anchored at the upper-left corner
        assert_eq!(*canvas.get_pixel(100, 50), Rgba([0, 0, 255, 255]));
        assert_eq!(*canvas.get_pixel(99, 50), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_paste_clips_at_canvas_bounds() {
        let mut canvas = RgbaImage::from_pixel(50, 50, Rgba([255, 255, 255, 255]));
        let sprite = solid(20, 20, [0, 255, 0, 255]);

        // hangs off every edge; must clip rather than panic
        sprite.paste(&mut canvas, 45.0, 45.0, Coords::Pixels, Anchor::TopLeft);
        sprite.paste(&mut canvas, 0.0, 0.0, Coords::Pixels, Anchor::Centroid);
        sprite.paste(&mut canvas, 49.0, 0.0, Coords::Pixels, Anchor::Centroid);

        assert_eq!(*canvas.get_pixel(49, 49), Rgba([0, 255, 0, 255]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_paste_alpha_blends() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        // half-transparent white over black should land mid-gray
        let sprite = solid(10, 10, [255, 255, 255, 128]);
        sprite.paste(&mut canvas, 0.0, 0.0, Coords::Pixels, Anchor::TopLeft);

        let px = canvas.get_pixel(5, 5);
        assert!(px[0] > 100 && px[0] < 160, "expected mid-gray, got {px:?}");
        assert_eq!(px[3], 255);
    }
}
