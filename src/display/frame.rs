//! Frame handoff between the render thread and the presentation side
//!
//! The render thread owns a [`FramePublisher`]; presentation holds any number
//! of [`FrameReader`] clones. A published [`Frame`] is immutable. Publishing
//! copies the live buffer into a frame nobody else can see and then swaps it
//! into the shared slot, so readers only ever get complete frames and the
//! lock is held for a pointer swap, never for the copy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::color::Pixel;

/// A completed, read-only frame
pub type Frame = Arc<[Pixel]>;

struct Slot {
    current: Mutex<Frame>,
    generation: AtomicU64,
}

impl Slot {
    // A panic elsewhere cannot leave a half-written frame behind (frames are
    // swapped whole), so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Frame> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer half, owned by whoever owns the live buffer
pub struct FramePublisher {
    slot: Arc<Slot>,
    spare: Option<Frame>,
    width: u32,
    height: u32,
}

/// Reader half, cheap to clone and safe to send to another thread
#[derive(Clone)]
pub struct FrameReader {
    slot: Arc<Slot>,
    width: u32,
    height: u32,
}

impl FramePublisher {
    /// Start with `initial` as the published frame
    pub fn new(initial: &[Pixel], width: u32, height: u32) -> Self {
        debug_assert_eq!(initial.len(), width as usize * height as usize);
        Self {
            slot: Arc::new(Slot {
                current: Mutex::new(Frame::from(initial)),
                generation: AtomicU64::new(0),
            }),
            spare: None,
            width,
            height,
        }
    }

    /// Replace the published frame with a copy of `live`
    pub fn publish(&mut self, live: &[Pixel]) {
        let frame = match self.spare.take() {
            // Reuse the last displaced frame if no reader still holds it
            Some(mut spare) if spare.len() == live.len() => match Arc::get_mut(&mut spare) {
                Some(cells) => {
                    cells.copy_from_slice(live);
                    spare
                },
                None => Frame::from(live),
            },
            _ => Frame::from(live),
        };

        let displaced = std::mem::replace(&mut *self.slot.lock(), frame);
        self.spare = Some(displaced);
        self.slot.generation.fetch_add(1, Ordering::Release);
    }

    /// The currently published frame
    pub fn latest(&self) -> Frame {
        Arc::clone(&*self.slot.lock())
    }

    pub fn generation(&self) -> u64 {
        self.slot.generation.load(Ordering::Acquire)
    }

    pub fn reader(&self) -> FrameReader {
        FrameReader {
            slot: Arc::clone(&self.slot),
            width: self.width,
            height: self.height,
        }
    }
}

impl FrameReader {
    /// The most recently published frame. Never waits on a copy in flight.
    pub fn latest(&self) -> Frame {
        Arc::clone(&*self.slot.lock())
    }

    /// Number of publishes so far
    pub fn generation(&self) -> u64 {
        self.slot.generation.load(Ordering::Acquire)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
