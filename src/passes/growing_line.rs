use super::RenderPass;
use crate::color::GREEN;
use crate::math2d::Vec2;
use crate::raster::Rasterizer;

const ANCHOR: Vec2 = Vec2::new(100.0, 100.0);

/// A green line from a fixed anchor to an endpoint that walks one pixel
/// down the diagonal each frame, wrapping to the origin once it leaves the
/// buffer.
pub struct GrowingLine {
    end: Vec2,
}

impl GrowingLine {
    pub fn new() -> Self {
        Self { end: Vec2::zero() }
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }
}

impl Default for GrowingLine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for GrowingLine {
    fn update(&mut self, width: u32, height: u32) {
        self.end = Vec2::new(self.end.x + 1.0, self.end.y + 1.0);
        if self.end.x >= f64::from(width) && self.end.y >= f64::from(height) {
            self.end = Vec2::zero();
        }
    }

    fn render(&self, raster: &mut Rasterizer) {
        raster.draw_line(ANCHOR, self.end, GREEN);
    }

    fn name(&self) -> &str {
        "Growing Line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CORNFLOWER_BLUE;

    #[test]
    fn test_endpoint_walks_and_wraps() {
        let mut pass = GrowingLine::new();
        pass.update(4, 4);
        assert_eq!(pass.end(), Vec2::new(1.0, 1.0));
        pass.update(4, 4);
        pass.update(4, 4);
        assert_eq!(pass.end(), Vec2::new(3.0, 3.0));
        pass.update(4, 4);
        assert_eq!(pass.end(), Vec2::zero());
    }

    #[test]
    fn test_renders_diagonal_toward_anchor() {
        let mut raster = Rasterizer::new(200, 200, CORNFLOWER_BLUE).unwrap();
        let mut pass = GrowingLine::new();
        for _ in 0..90 {
            pass.update(200, 200);
        }
        pass.render(&mut raster);
        // Line (90,90)..(100,100), exclusive at the anchor
        assert_eq!(raster.pixel(90, 90), Some(GREEN));
        assert_eq!(raster.pixel(99, 99), Some(GREEN));
        assert_eq!(raster.pixel(100, 100), Some(CORNFLOWER_BLUE));
        assert_eq!(raster.pixel(89, 89), Some(CORNFLOWER_BLUE));
    }
}
