//! Line rasterizer over a live pixel buffer with a published frozen frame

use log::trace;

use crate::color::{Pixel, WHITE};
use crate::display::{Frame, FramePublisher, FrameReader, PixelBuffer};
use crate::error::Error;
use crate::math2d::{
    evaluate_line_at_x, floor_to_index, order_by_x, order_by_y, squared_distance, Vec2, EPSILON,
};

/// Owns the live buffer (drawn into) and the publisher of frozen frames
/// (read by presentation). Only [`Rasterizer::publish`] moves pixels from
/// one to the other.
pub struct Rasterizer {
    live: PixelBuffer,
    publisher: FramePublisher,
}

impl Rasterizer {
    /// Both buffers start filled with `clear_color`. Zero-sized buffers are rejected.
    pub fn new(width: u32, height: u32, clear_color: Pixel) -> Result<Self, Error> {
        let live = PixelBuffer::new(width, height, clear_color)?;
        let publisher = FramePublisher::new(live.as_slice(), width, height);
        Ok(Self { live, publisher })
    }

    pub fn buffer_dimensions(&self) -> (u32, u32) {
        (self.live.width(), self.live.height())
    }

    pub fn clear_buffer(&mut self) {
        self.live.clear();
    }

    /// Blend `color` into the live cell at (x, y); out of range is dropped
    #[inline]
    pub fn draw_pixel(&mut self, color: Pixel, x: i64, y: i64) {
        self.live.blend_pixel(x, y, color);
    }

    /// Live buffer cell, `None` when out of range
    pub fn pixel(&self, x: i64, y: i64) -> Option<Pixel> {
        self.live.get_pixel(x, y)
    }

    /// [`Rasterizer::draw_line`] in opaque white
    pub fn draw_line_default(&mut self, start: Vec2, end: Vec2) {
        self.draw_line(start, end, WHITE);
    }

    /// Rasterize the segment `start`..`end`, one pixel per whole x step.
    ///
    /// Upper bounds are exclusive. There is no error accumulation on the
    /// minor axis, so steep lines skip rows.
    ///
    /// A zero-length segment plots `start` and then still falls through to
    /// the vertical/horizontal checks instead of returning. Those loops are
    /// empty for a true point, but a segment that is zero-length within
    /// `EPSILON` yet spans a whole pixel boundary can plot more.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Pixel) {
        let (min, max) = order_by_x(start, end);

        if squared_distance(min, max) <= EPSILON {
            self.draw_pixel(color, floor_to_index(start.x), floor_to_index(start.y));
        }

        // Vertical
        if max.x - min.x <= EPSILON {
            let (min, max) = order_by_y(start, end);
            let x = floor_to_index(min.x);
            let (from, to) = self.clamp_rows(floor_to_index(min.y), floor_to_index(max.y));
            for y in from..to {
                self.draw_pixel(color, x, y);
            }
            return;
        }

        // Horizontal
        if max.y - min.y <= EPSILON {
            let y = floor_to_index(min.y);
            let (from, to) = self.clamp_columns(floor_to_index(min.x), floor_to_index(max.x));
            for x in from..to {
                self.draw_pixel(color, x, y);
            }
            return;
        }

        // Sloped
        let (from, to) = self.clamp_columns(floor_to_index(min.x), floor_to_index(max.x));
        for x in from..to {
            let y = floor_to_index(evaluate_line_at_x(x as f64, start, end));
            self.draw_pixel(color, x, y);
        }
    }

    // Cells outside the buffer would be dropped anyway; skipping them keeps
    // far off-screen endpoints from looping over millions of columns.
    fn clamp_columns(&self, from: i64, to: i64) -> (i64, i64) {
        (from.max(0), to.min(i64::from(self.live.width())))
    }

    fn clamp_rows(&self, from: i64, to: i64) -> (i64, i64) {
        (from.max(0), to.min(i64::from(self.live.height())))
    }

    /// Copy the live buffer into a new frozen frame
    pub fn publish(&mut self) {
        self.publisher.publish(self.live.as_slice());
        trace!("Published frame {}", self.publisher.generation());
    }

    /// The last published frame. Unaffected by later drawing.
    pub fn published_frame(&self) -> Frame {
        self.publisher.latest()
    }

    /// Read handle for the presentation side
    pub fn reader(&self) -> FrameReader {
        self.publisher.reader()
    }
}
