//! Frame timing for the presentation loop's debug log

use std::collections::VecDeque;
use std::time::Instant;

/// Rolling window of presentation intervals
pub struct FpsCounter {
    intervals: VecDeque<f32>,
    last_tick: Instant,
    window: usize,
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            intervals: VecDeque::with_capacity(window),
            last_tick: Instant::now(),
            window,
        }
    }

    /// Record one presented frame, returns the average fps over the window
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.record(dt)
    }

    fn record(&mut self, dt: f32) -> f32 {
        if self.intervals.len() == self.window {
            self.intervals.pop_front();
        }
        self.intervals.push_back(dt);

        let mean = self.intervals.iter().sum::<f32>() / self.intervals.len() as f32;
        per_second(mean)
    }

    /// (slowest, fastest) fps in the window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.intervals.is_empty() {
            return (0.0, 0.0);
        }
        let shortest = self.intervals.iter().copied().fold(f32::INFINITY, f32::min);
        let longest = self.intervals.iter().copied().fold(0.0, f32::max);
        (per_second(longest), per_second(shortest))
    }
}

fn per_second(dt: f32) -> f32 {
    if dt > 0.0 {
        1.0 / dt
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_covers_window_only() {
        let mut fps = FpsCounter::new(2);
        fps.record(0.010);
        fps.record(0.020);
        // Window holds 0.020 and 0.030
        let avg = fps.record(0.030);
        assert!((avg - 40.0).abs() < 0.1);
    }

    #[test]
    fn test_min_max() {
        let mut fps = FpsCounter::new(10);
        assert_eq!(fps.min_max_fps(), (0.0, 0.0));
        fps.record(0.010);
        fps.record(0.020);
        let (min, max) = fps.min_max_fps();
        assert!((min - 50.0).abs() < 0.01);
        assert!((max - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_interval_does_not_divide() {
        let mut fps = FpsCounter::new(4);
        assert_eq!(fps.record(0.0), 0.0);
        assert_eq!(fps.min_max_fps(), (0.0, 0.0));
    }
}
