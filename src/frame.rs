use std::time::Instant;

/// Monotonic frame timestamps for the render loop, in nanoseconds since
/// the clock was created
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Timestamp for the current frame
    pub fn now_nanos(&self) -> i64 {
        self.start.elapsed().as_nanos() as i64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn timestamps_are_monotonic() {
        let clock = FrameClock::new();
        let a = clock.now_nanos();
        thread::sleep(Duration::from_millis(2));
        let b = clock.now_nanos();
        assert!(b > a);
    }

    #[test]
    fn timestamps_start_near_zero() {
        let clock = FrameClock::new();
        assert!(clock.now_nanos() < 1_000_000_000);
    }
}
