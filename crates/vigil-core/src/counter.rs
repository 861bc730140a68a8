// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-thread tick accounting over a fixed measurement window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Tick accounting for one watched thread over one measurement window.
///
/// Exactly two actors touch a counter: the owning thread increments the tick
/// count on every iteration of its work loop, and the checker reads and
/// resets it once per window. The increment is a relaxed atomic so the hot
/// path never takes a lock; the checker may observe a tick mid-increment,
/// which is acceptable because counts are approximate by contract.
#[derive(Debug)]
pub struct TickCounter {
    /// Minimum acceptable ticks per window. Signed so that a minimum of 0
    /// flags only zero-tick windows and a negative minimum never flags.
    min_rate: i64,
    /// Window length applied at creation and at every reset.
    window: Duration,
    /// Ticks accumulated in the current window.
    ticks: AtomicU64,
    /// Absolute time the current window closes. Only the checker touches it.
    window_end: Mutex<Instant>,
}

impl TickCounter {
    /// Creates a counter with zero ticks and a window closing `window` from now.
    pub fn new(min_rate: i64, window: Duration) -> Self {
        Self {
            min_rate,
            window,
            ticks: AtomicU64::new(0),
            window_end: Mutex::new(Instant::now() + window),
        }
    }

    /// Records one unit of progress.
    ///
    /// Wraps on `u64` overflow; with realistic tick rates the wrap is
    /// unreachable within a window.
    pub fn add_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns true once the current window's end time has passed, i.e. the
    /// counter is ready to be evaluated.
    pub fn is_window_expired(&self, now: Instant) -> bool {
        now >= *self.window_end.lock().unwrap()
    }

    /// Starts a fresh window: zeroes the tick count and moves the window end
    /// to `now` plus the window length.
    pub fn reset(&self, now: Instant) {
        let mut end = self.window_end.lock().unwrap();
        *end = now + self.window;
        self.ticks.store(0, Ordering::Relaxed);
    }

    /// Ticks accumulated in the current window.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Minimum acceptable ticks per window.
    pub fn min_rate(&self) -> i64 {
        self.min_rate
    }

    /// Window length applied at every reset.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns true when the accumulated ticks fall at or below the
    /// configured minimum. The boundary is inclusive.
    pub fn under_threshold(&self) -> bool {
        match i64::try_from(self.ticks()) {
            Ok(ticks) => ticks <= self.min_rate,
            // A count beyond i64::MAX cannot be under any threshold.
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_creation() {
        let counter = TickCounter::new(5, Duration::from_millis(1000));
        assert_eq!(counter.ticks(), 0);
        assert_eq!(counter.min_rate(), 5);
        assert_eq!(counter.window(), Duration::from_millis(1000));
    }

    #[test]
    fn ticks_accumulate() {
        let counter = TickCounter::new(5, Duration::from_millis(1000));
        for _ in 0..3 {
            counter.add_tick();
        }
        assert_eq!(counter.ticks(), 3);
    }

    #[test]
    fn expiry_sense_is_now_at_or_past_window_end() {
        let counter = TickCounter::new(0, Duration::from_secs(3600));
        let now = Instant::now();
        assert!(!counter.is_window_expired(now));

        let counter = TickCounter::new(0, Duration::ZERO);
        assert!(counter.is_window_expired(Instant::now()));
    }

    #[test]
    fn reset_zeroes_ticks_and_advances_window() {
        let window = Duration::from_millis(1000);
        let counter = TickCounter::new(5, window);
        counter.add_tick();
        counter.add_tick();

        let now = Instant::now();
        counter.reset(now);
        assert_eq!(counter.ticks(), 0);
        assert!(!counter.is_window_expired(now));
        assert!(counter.is_window_expired(now + window));
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let counter = TickCounter::new(5, Duration::from_millis(1000));
        for _ in 0..5 {
            counter.add_tick();
        }
        assert!(counter.under_threshold());

        counter.add_tick();
        assert!(!counter.under_threshold());
    }

    #[test]
    fn zero_minimum_flags_only_idle_windows() {
        let counter = TickCounter::new(0, Duration::from_millis(1000));
        assert!(counter.under_threshold());
        counter.add_tick();
        assert!(!counter.under_threshold());
    }

    #[test]
    fn negative_minimum_never_flags() {
        let counter = TickCounter::new(-1, Duration::from_millis(1000));
        assert!(!counter.under_threshold());
        counter.add_tick();
        assert!(!counter.under_threshold());
    }
}
