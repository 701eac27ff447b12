use crate::color::{blend, Pixel};
use crate::error::Error;

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major ARGB pixel buffer for software rendering.
/// Cell (x, y) lives at index `y * width + x`. The clear color is fixed at
/// construction and doubles as the XOR operand for transparent draws.
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
    clear_color: Pixel,
}

impl PixelBuffer {
    /// Create a buffer filled with `clear_color`
    pub fn new(width: u32, height: u32, clear_color: Pixel) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: vec![clear_color; width as usize * height as usize],
            width,
            height,
            clear_color,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn clear_color(&self) -> Pixel {
        self.clear_color
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < i64::from(self.width) && y >= 0 && y < i64::from(self.height)
    }

    #[inline]
    fn pixel_index(&self, x: i64, y: i64) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Reset every cell to the clear color
    pub fn clear(&mut self) {
        self.pixels.fill(self.clear_color);
    }

    /// Blend `color` into the cell at (x, y). Out of range is a no-op.
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Pixel) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x, y);
            self.pixels[idx] = blend(self.pixels[idx], color, self.clear_color);
        }
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Pixel> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }
}
