//! Render loop and shutdown handshake
//!
//! The render thread repeats clear -> draw -> publish until the presentation
//! side, running on the calling thread, reports that the display has closed.
//! Shutdown is a one-shot message: the presentation side fires it once, the
//! render thread polls for it with a short timeout after every publish.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::display::Presenter;
use crate::error::Error;
use crate::passes::RenderPass;
use crate::raster::Rasterizer;
use crate::util::FpsCounter;

pub const DEFAULT_SHUTDOWN_POLL: Duration = Duration::from_millis(1);

/// How often the presentation loop logs its frame rate
const FPS_LOG_INTERVAL: u64 = 300;

/// Sending half of the shutdown signal. Firing consumes it.
pub struct ShutdownTrigger {
    sender: Sender<()>,
}

/// Receiving half of the shutdown signal
pub struct ShutdownListener {
    receiver: Receiver<()>,
}

pub fn shutdown_signal() -> (ShutdownTrigger, ShutdownListener) {
    let (sender, receiver) = mpsc::channel();
    (ShutdownTrigger { sender }, ShutdownListener { receiver })
}

impl ShutdownTrigger {
    pub fn fire(self) {
        // The listener may already be gone if the render thread died
        let _ = self.sender.send(());
    }
}

impl ShutdownListener {
    /// Wait up to `timeout` for the signal. A dropped trigger counts as fired.
    pub fn poll(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

/// Frame counts from a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub frames_rendered: u64,
    pub frames_presented: u64,
}

pub struct Engine {
    rasterizer: Rasterizer,
    pass: Box<dyn RenderPass>,
    shutdown_poll: Duration,
}

impl Engine {
    pub fn new(rasterizer: Rasterizer, pass: Box<dyn RenderPass>) -> Self {
        Self {
            rasterizer,
            pass,
            shutdown_poll: DEFAULT_SHUTDOWN_POLL,
        }
    }

    /// How long the render thread waits for the shutdown signal each frame
    pub fn with_shutdown_poll(mut self, timeout: Duration) -> Self {
        self.shutdown_poll = timeout;
        self
    }

    /// Run until `presenter` reports the display closed.
    ///
    /// Rendering happens on a spawned thread; presentation stays on the
    /// calling thread. The render thread is always signalled and joined
    /// before this returns, including when presentation fails.
    pub fn run<P: Presenter>(self, presenter: &mut P) -> Result<RunStats, Error> {
        let Self {
            rasterizer,
            pass,
            shutdown_poll,
        } = self;

        let reader = rasterizer.reader();
        let (width, height) = reader.dimensions();
        let (trigger, listener) = shutdown_signal();

        info!("Starting render thread: {} at {}x{}", pass.name(), width, height);
        let render_thread = thread::Builder::new()
            .name("render".into())
            .spawn(move || render_loop(rasterizer, pass, &listener, shutdown_poll))
            .map_err(|e| Error::RenderThread(format!("failed to spawn: {e}")))?;

        let mut fps = FpsCounter::new(60);
        let mut presented = 0u64;
        let outcome = loop {
            let frame = reader.latest();
            match presenter.present(&frame, width, height) {
                Ok(open) => {
                    presented += 1;
                    let avg_fps = fps.tick();
                    if presented % FPS_LOG_INTERVAL == 0 {
                        let (min_fps, max_fps) = fps.min_max_fps();
                        debug!(
                            "Presented {} frames, {:.1} fps avg ({:.1} min, {:.1} max), render generation {}",
                            presented,
                            avg_fps,
                            min_fps,
                            max_fps,
                            reader.generation()
                        );
                    }
                    if !open {
                        break Ok(());
                    }
                },
                Err(e) => break Err(e),
            }
        };

        info!("Display closed after {} frames, stopping render thread", presented);
        trigger.fire();

        let rendered = render_thread
            .join()
            .map_err(|_| Error::RenderThread("render thread panicked".into()))?;
        if let Err(e) = &outcome {
            warn!("Presentation ended with an error: {}", e);
        }
        outcome?;

        Ok(RunStats {
            frames_rendered: rendered,
            frames_presented: presented,
        })
    }
}

/// Body of the render thread. Returns the number of frames published.
fn render_loop(
    mut raster: Rasterizer,
    mut pass: Box<dyn RenderPass>,
    shutdown: &ShutdownListener,
    poll: Duration,
) -> u64 {
    let (width, height) = raster.buffer_dimensions();
    let mut frames = 0u64;

    loop {
        raster.clear_buffer();
        pass.update(width, height);
        pass.render(&mut raster);
        raster.publish();
        frames += 1;

        if shutdown.poll(poll) {
            break;
        }
    }

    debug!("Render thread exiting after {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Pixel, BLACK, CORNFLOWER_BLUE};
    use crate::display::HeadlessPresenter;
    use crate::math2d::Vec2;
    use crate::passes::GrowingLine;
    use std::time::Instant;

    /// Paints every row in one frame-specific color
    struct Flood {
        frame: u32,
    }

    impl RenderPass for Flood {
        fn update(&mut self, _width: u32, _height: u32) {
            self.frame = self.frame.wrapping_add(1);
        }

        fn render(&self, raster: &mut Rasterizer) {
            let (w, h) = raster.buffer_dimensions();
            let color = BLACK | (self.frame & 0x00FF_FFFF);
            for y in 0..h {
                let y = f64::from(y);
                raster.draw_line(Vec2::new(0.0, y), Vec2::new(f64::from(w), y), color);
            }
        }

        fn name(&self) -> &str {
            "Flood"
        }
    }

    /// Fails the run if any frame mixes two render passes
    struct TearCheck {
        remaining: u32,
        seen: Vec<Pixel>,
    }

    impl Presenter for TearCheck {
        fn present(&mut self, frame: &[Pixel], _w: u32, _h: u32) -> Result<bool, Error> {
            let first = frame[0];
            if frame.iter().any(|&p| p != first) {
                return Err(Error::Display("torn frame".into()));
            }
            self.seen.push(first);
            self.remaining -= 1;
            Ok(self.remaining > 0)
        }
    }

    struct Failing;

    impl Presenter for Failing {
        fn present(&mut self, _: &[Pixel], _: u32, _: u32) -> Result<bool, Error> {
            Err(Error::Display("window lost".into()))
        }
    }

    #[test_log::test]
    fn test_shutdown_signal_poll() {
        let (trigger, listener) = shutdown_signal();
        assert!(!listener.poll(Duration::from_millis(1)));
        trigger.fire();
        assert!(listener.poll(Duration::from_millis(1)));
    }

    #[test_log::test]
    fn test_dropped_trigger_stops_listener() {
        let (trigger, listener) = shutdown_signal();
        drop(trigger);
        assert!(listener.poll(Duration::ZERO));
    }

    #[test_log::test]
    fn test_run_until_presenter_closes() {
        let raster = Rasterizer::new(200, 200, CORNFLOWER_BLUE).unwrap();
        let engine = Engine::new(raster, Box::new(GrowingLine::new()));
        let mut presenter = HeadlessPresenter::new(Some(10), Duration::from_millis(2));

        let stats = engine.run(&mut presenter).unwrap();
        assert_eq!(stats.frames_presented, 10);
        assert_eq!(presenter.presented(), 10);
        assert!(stats.frames_rendered >= 1);
    }

    #[test_log::test]
    fn test_stats_count_the_closing_frame() {
        let raster = Rasterizer::new(32, 32, CORNFLOWER_BLUE).unwrap();
        let engine = Engine::new(raster, Box::new(GrowingLine::new()));
        let mut presenter = HeadlessPresenter::new(Some(10), Duration::ZERO);

        let stats = engine.run(&mut presenter).unwrap();
        assert_eq!(stats.frames_presented, presenter.presented());
    }

    #[test_log::test]
    fn test_presented_frames_are_never_torn() {
        let raster = Rasterizer::new(64, 64, CORNFLOWER_BLUE).unwrap();
        let engine = Engine::new(raster, Box::new(Flood { frame: 0 }))
            .with_shutdown_poll(Duration::ZERO);
        let mut presenter = TearCheck {
            remaining: 500,
            seen: Vec::new(),
        };

        let stats = engine.run(&mut presenter).unwrap();
        assert_eq!(stats.frames_presented, 500);
        // Frames either repeat or move forward, never back
        let colors: Vec<Pixel> = presenter
            .seen
            .iter()
            .filter(|&&p| p != CORNFLOWER_BLUE)
            .copied()
            .collect();
        assert!(colors.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test_log::test]
    fn test_render_thread_stopped_when_presentation_fails() {
        let raster = Rasterizer::new(16, 16, CORNFLOWER_BLUE).unwrap();
        let engine = Engine::new(raster, Box::new(GrowingLine::new()));
        let started = Instant::now();
        let result = engine.run(&mut Failing);
        assert!(matches!(result, Err(Error::Display(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
