//! Software line rasterizer with a double-buffered frame handoff.
//!
//! A [`Rasterizer`] draws into a live buffer and publishes finished frames;
//! an [`Engine`] runs it on a render thread while a [`Presenter`] shows the
//! latest published frame on the calling thread.

pub mod color;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod math2d;
pub mod passes;
pub mod raster;
pub mod util;

pub use color::Pixel;
pub use display::{Frame, FrameReader, HeadlessPresenter, Presenter};
pub use engine::{Engine, RunStats};
pub use error::Error;
pub use math2d::Vec2;
pub use raster::Rasterizer;
