//! Image loading utilities for texture data
//!
//! Provides PNG loading for textures referenced by materials, plus generated
//! patterns for when no file is shipped.

use std::path::Path;

use crate::assets::AssetError;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major from the top-left
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let bytes = std::fs::read(path_ref)?;
        let image = Self::from_bytes(&bytes)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Decode an encoded image (PNG) held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::InvalidData(format!("Failed to decode image: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    /// Square grid texture: `cells x cells` tiles separated by `line_width` pixel lines
    ///
    /// Lines are drawn on the left/top edge of every cell and along the right/bottom
    /// border, so the pattern tiles seamlessly when repeated.
    pub fn grid(size: u32, cells: u32, line_width: u32, line: [u8; 4], fill: [u8; 4]) -> Self {
        let cells = cells.max(1);
        let cell_size = (size / cells).max(1);
        let mut image = Self::solid_color(size, size, fill);

        for y in 0..size {
            for x in 0..size {
                let on_line = x % cell_size < line_width
                    || y % cell_size < line_width
                    || x + line_width >= size
                    || y + line_width >= size;
                if on_line {
                    let offset = ((y * size + x) * 4) as usize;
                    image.data[offset..offset + 4].copy_from_slice(&line);
                }
            }
        }
        image
    }

    /// Pixel at `(x, y)`, if inside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.data[offset..offset + 4]);
        Some(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.data.len(), 4 * 4 * 4);
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(4, 0), None);
    }

    #[test]
    fn test_grid_draws_lines_between_cells() {
        let img = ImageData::grid(16, 4, 1, WHITE, CLEAR);

        // Cell boundaries every 4 pixels
        assert_eq!(img.pixel(0, 2), Some(WHITE));
        assert_eq!(img.pixel(4, 2), Some(WHITE));
        assert_eq!(img.pixel(2, 8), Some(WHITE));
        // Outer border
        assert_eq!(img.pixel(15, 7), Some(WHITE));
        // Cell interior
        assert_eq!(img.pixel(2, 2), Some(CLEAR));
        assert_eq!(img.pixel(6, 10), Some(CLEAR));
    }

    #[test]
    fn test_png_file_is_decoded_to_rgba() {
        let path = std::env::temp_dir().join(format!("ar_scene_grid_{}.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = ImageData::from_file(&path);
        std::fs::remove_file(&path).ok();

        let loaded = loaded.unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.data.len(), 3 * 2 * 4);
        assert_eq!(loaded.pixel(2, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_missing_file_and_garbage_bytes_are_errors() {
        assert!(matches!(
            ImageData::from_file("does/not/exist.png"),
            Err(AssetError::IoError(_))
        ));
        assert!(matches!(
            ImageData::from_bytes(b"not an image"),
            Err(AssetError::InvalidData(_))
        ));
    }
}
