use std::time::Duration;

/// Limits logical steps to a fixed rate under a caller that ticks at whatever cadence it likes.
///
/// Elapsed time accumulates across ticks; once a full period has built up the tick is allowed
/// through and one period is paid out of the accumulator. Leftover time carries into the next
/// step so the average rate holds at any tick cadence, but a remainder of a full period or more
/// is dropped, so a long stall never turns into a burst of steps.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    period: Duration,
    accumulated: Duration,
}

impl Throttle {
    /// A throttle admitting at most `steps_per_second` steps per second; zero is treated as one.
    pub fn new(steps_per_second: u32) -> Throttle {
        Throttle {
            period: Duration::from_secs(1) / steps_per_second.max(1),
            accumulated: Duration::ZERO,
        }
    }

    /// The minimum time between two admitted steps.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Records elapsed time and reports whether a step is due.
    pub fn admit(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated < self.period {
            return false;
        }
        self.accumulated -= self.period;
        if self.accumulated >= self.period {
            self.accumulated = Duration::ZERO;
        }
        true
    }
}
