//! Tick scheduling for the countdown

/// Deadline generator for countdown ticks
///
/// Tick *k* is due at `start + k * period`, capped at the end of the
/// countdown so the final tick lands exactly on `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSchedule {
    start: f64,
    end: f64,
    period: f64,
    ticks: u64,
}

impl TickSchedule {
    /// Create a schedule; `duration` and `period` must be positive
    pub fn new(start: f64, duration: f64, period: f64) -> Self {
        Self {
            start,
            end: start + duration,
            period,
            ticks: 0,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Ticks consumed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// When the next tick is due
    pub fn next_deadline(&self) -> f64 {
        self.deadline(self.ticks + 1).min(self.end)
    }

    fn deadline(&self, tick: u64) -> f64 {
        self.start + tick as f64 * self.period
    }

    /// Check if the next tick is due at `now`
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_deadline()
    }

    /// Consume one tick
    ///
    /// Skips deadlines that already passed, so a late host does not get a
    /// burst of catch-up frames.
    pub fn advance(&mut self, now: f64) {
        let first = self.ticks + 1;
        // Nothing past the end matters
        let now = now.min(self.end);

        let mut ticks = first;
        let passed = ((now - self.start) / self.period).floor();
        if passed.is_finite() && passed > first as f64 {
            ticks = passed as u64;
            // floor() may overshoot by one step
            while ticks > first && self.deadline(ticks) > now {
                ticks -= 1;
            }
        }
        while self.deadline(ticks + 1) <= now {
            ticks += 1;
        }

        self.ticks = ticks;
    }

    /// Seconds since start, clamped to `[0, duration]`
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start).clamp(0.0, self.duration())
    }

    /// Seconds until the end, never negative
    pub fn remaining(&self, now: f64) -> f64 {
        (self.end - now).max(0.0)
    }

    /// Check if the countdown is over at `now`
    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.end
    }

    /// Every deadline of an undisturbed countdown
    pub fn deadlines(&self) -> Vec<f64> {
        let mut schedule = Self::new(self.start, self.duration(), self.period);
        let mut deadlines = Vec::new();
        loop {
            let deadline = schedule.next_deadline();
            deadlines.push(deadline);
            if schedule.is_finished(deadline) {
                return deadlines;
            }
            schedule.advance(deadline);
        }
    }
}
