// src/engine/clock.rs
use std::time::{Duration, Instant};

// Most ticks handed out for one frame; a long stall is dropped rather than replayed.
const MAX_CATCH_UP: u32 = 5;

// Turns wall-clock time into a whole number of fixed simulation ticks
pub struct TickClock {
    last_instant: Instant,
    accumulator: Duration,
    tick: Duration,
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            last_instant: Instant::now(),
            accumulator: Duration::ZERO,
            tick: Duration::from_secs(1) / ticks_per_second.max(1),
        }
    }

    // Ticks due since the previous call.
    pub fn due_ticks(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last_instant;
        self.last_instant = now;
        self.advance(elapsed)
    }

    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.tick {
            self.accumulator -= self.tick;
            due += 1;
        }
        if due > MAX_CATCH_UP {
            self.accumulator = Duration::ZERO;
            due = MAX_CATCH_UP;
        }
        due
    }
}
