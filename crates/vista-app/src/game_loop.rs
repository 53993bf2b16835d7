//! Fixed-timestep frame loop.
//!
//! The simulation advances in fixed 60 Hz ticks drawn from an accumulator of
//! real elapsed time; rendering runs once per displayed frame with the total
//! simulated time, which drives the day/night cycle and cloud drift.

use std::time::Instant;

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time fed into the accumulator. Slower frames are clamped
/// so a stall does not trigger a burst of catch-up ticks.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state of the fixed-timestep loop.
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Run one frame against wall-clock time. See [`advance`](Self::advance).
    pub fn tick<S>(
        &mut self,
        state: &mut S,
        update_fn: impl FnMut(&mut S, f64, f64),
        render_fn: impl FnMut(&mut S, f64),
    ) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(state, frame_time, update_fn, render_fn);
    }

    /// Run one frame of `frame_time` seconds.
    ///
    /// `update_fn(state, FIXED_DT, sim_time)` runs zero or more times, then
    /// `render_fn(state, sim_time)` runs exactly once with the total
    /// simulated time.
    pub fn advance<S>(
        &mut self,
        state: &mut S,
        frame_time: f64,
        mut update_fn: impl FnMut(&mut S, f64, f64),
        mut render_fn: impl FnMut(&mut S, f64),
    ) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                frame_ms = frame_time * 1000.0,
                max_ms = MAX_FRAME_TIME * 1000.0,
                "frame time exceeds maximum, clamping"
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update_fn(state, FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(state, self.total_sim_time);
        self.frame_count += 1;
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / FIXED_DT
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
