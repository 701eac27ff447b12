use std::f64::consts::TAU;

use super::RenderPass;
use crate::color::{Pixel, BLUE, CYAN, GREEN, PURPLE, RED, YELLOW};
use crate::math2d::Vec2;
use crate::raster::Rasterizer;

const PALETTE: [Pixel; 6] = [RED, GREEN, BLUE, YELLOW, PURPLE, CYAN];
const SPOKES: usize = 24;
const STEP: f64 = 0.01;

/// Spokes radiating from the buffer centre, slowly rotating
pub struct Starburst {
    angle: f64,
    center: Vec2,
    radius: f64,
}

impl Starburst {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            center: Vec2::zero(),
            radius: 0.0,
        }
    }

    /// Outer endpoint of spoke `i`
    fn spoke_end(&self, i: usize) -> Vec2 {
        let theta = self.angle + TAU * i as f64 / SPOKES as f64;
        Vec2::new(
            self.center.x + self.radius * theta.cos(),
            self.center.y + self.radius * theta.sin(),
        )
    }
}

impl Default for Starburst {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for Starburst {
    fn update(&mut self, width: u32, height: u32) {
        self.center = Vec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
        self.radius = f64::from(width.min(height)) * 0.45;
        self.angle = (self.angle + STEP) % TAU;
    }

    fn render(&self, raster: &mut Rasterizer) {
        for i in 0..SPOKES {
            raster.draw_line(self.center, self.spoke_end(i), PALETTE[i % PALETTE.len()]);
        }
    }

    fn name(&self) -> &str {
        "Starburst"
    }
}
