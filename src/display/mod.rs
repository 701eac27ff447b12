mod frame;
mod pixel_buffer;
#[cfg(feature = "window")]
mod window;

pub use frame::{Frame, FramePublisher, FrameReader};
pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "window")]
pub use window::{Display, RenderTarget, WindowPresenter};

use std::time::Duration;

use log::debug;

use crate::color::Pixel;
use crate::error::Error;

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Consumer of published frames
pub trait Presenter {
    /// Show one frame and report whether the display is still open.
    ///
    /// The frame passed to the call that returns `Ok(false)` was still shown.
    fn present(&mut self, frame: &[Pixel], width: u32, height: u32) -> Result<bool, Error>;
}

/// Presenter without a window: counts frames and optionally stops after a limit
pub struct HeadlessPresenter {
    max_frames: Option<u64>,
    interval: Duration,
    presented: u64,
    last_frame: Vec<Pixel>,
}

impl HeadlessPresenter {
    /// `interval` paces presentation the way vsync would (zero = as fast as possible)
    pub fn new(max_frames: Option<u64>, interval: Duration) -> Self {
        Self {
            max_frames,
            interval,
            presented: 0,
            last_frame: Vec::new(),
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Copy of the last frame handed to `present`
    pub fn last_frame(&self) -> Option<&[Pixel]> {
        (self.presented > 0).then_some(self.last_frame.as_slice())
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &[Pixel], width: u32, height: u32) -> Result<bool, Error> {
        if self.max_frames.is_some_and(|max| self.presented >= max) {
            return Ok(false);
        }
        if frame.len() != width as usize * height as usize {
            return Err(Error::Display(format!(
                "frame has {} pixels, expected {}x{}",
                frame.len(),
                width,
                height
            )));
        }

        self.last_frame.clear();
        self.last_frame.extend_from_slice(frame);
        self.presented += 1;
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }

        let open = self.max_frames.map_or(true, |max| self.presented < max);
        if !open {
            debug!("Headless presenter reached {} frames", self.presented);
        }
        Ok(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_stops_after_limit() {
        let mut presenter = HeadlessPresenter::new(Some(3), Duration::ZERO);
        let frame = [0u32; 4];
        assert!(presenter.present(&frame, 2, 2).unwrap());
        assert!(presenter.present(&frame, 2, 2).unwrap());
        assert!(!presenter.present(&frame, 2, 2).unwrap());
        assert!(!presenter.present(&frame, 2, 2).unwrap());
        assert_eq!(presenter.presented(), 3);
    }

    #[test]
    fn test_headless_keeps_last_frame() {
        let mut presenter = HeadlessPresenter::new(None, Duration::ZERO);
        assert!(presenter.last_frame().is_none());
        presenter.present(&[1, 2, 3, 4], 2, 2).unwrap();
        presenter.present(&[5, 6, 7, 8], 2, 2).unwrap();
        assert_eq!(presenter.last_frame(), Some(&[5u32, 6, 7, 8][..]));
    }

    #[test]
    fn test_headless_reuses_frame_storage() {
        let mut presenter = HeadlessPresenter::new(None, Duration::ZERO);
        presenter.present(&[1; 16], 4, 4).unwrap();
        let storage = presenter.last_frame().map(<[Pixel]>::as_ptr);
        presenter.present(&[2; 16], 4, 4).unwrap();
        assert_eq!(presenter.last_frame().map(<[Pixel]>::as_ptr), storage);
        assert_eq!(presenter.last_frame(), Some(&[2u32; 16][..]));
    }

    #[test]
    fn test_headless_rejects_mismatched_size() {
        let mut presenter = HeadlessPresenter::new(None, Duration::ZERO);
        assert!(matches!(
            presenter.present(&[0; 3], 2, 2),
            Err(Error::Display(_))
        ));
    }
}
