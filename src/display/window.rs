//! SDL2 window presenter

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use super::Presenter;
use crate::color::Pixel;
use crate::error::Error;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

/// Streaming texture the frozen frame is uploaded into
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

impl Display {
    /// Create display with custom resolution and VSync settings
    /// vsync=true: locked to monitor refresh
    /// vsync=false: uncapped presentation rate
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), Error> {
        let sdl_context = sdl2::init().map_err(Error::Display)?;
        let video_subsystem = sdl_context.video().map_err(Error::Display)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| Error::Display(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| Error::Display(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(Error::Display)?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Drain pending events. Returns false when the user asked to close.
    pub fn pump_events(&mut self) -> bool {
        let mut open = true;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => open = false,
                _ => {},
            }
        }
        open
    }

    pub fn present(&mut self, target: &mut RenderTarget, bytes: &[u8]) -> Result<(), Error> {
        target
            .texture
            .update(None, bytes, (target.width * 4) as usize)
            .map_err(|e| Error::Display(e.to_string()))?;

        self.canvas
            .copy(&target.texture, None, None)
            .map_err(Error::Display)?;
        self.canvas.present();
        Ok(())
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, Error> {
        // ARGB8888 is a packed format, so native-endian u32 pixels upload as-is
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| Error::Display(e.to_string()))?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

/// [`Presenter`] backed by an SDL2 window. Must live on the main thread.
pub struct WindowPresenter<'a> {
    display: Display,
    target: RenderTarget<'a>,
    bytes: Vec<u8>,
}

impl<'a> WindowPresenter<'a> {
    pub fn new(display: Display, target: RenderTarget<'a>) -> Self {
        Self {
            display,
            target,
            bytes: Vec::new(),
        }
    }
}

impl Presenter for WindowPresenter<'_> {
    fn present(&mut self, frame: &[Pixel], width: u32, height: u32) -> Result<bool, Error> {
        if width != self.target.width || height != self.target.height {
            return Err(Error::Display(format!(
                "frame is {}x{} but the window texture is {}x{}",
                width, height, self.target.width, self.target.height
            )));
        }

        self.bytes.clear();
        self.bytes.extend(frame.iter().flat_map(|p| p.to_ne_bytes()));
        self.display.present(&mut self.target, &self.bytes)?;
        Ok(self.display.pump_events())
    }
}
