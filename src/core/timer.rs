//! Delta-driven timers for deferred callbacks.
//! Each timer accumulates elapsed seconds and decides when to fire.

/// Trailing-edge throttle - coalesces submissions, delivers the latest one
/// when the window that the first submission opened has elapsed
#[derive(Debug, Clone)]
pub struct TrailingThrottle<T> {
    interval: f32,
    elapsed: f32,
    pending: Option<T>,
}

impl<T> TrailingThrottle<T> {
    /// Create throttle with window length in seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            pending: None,
        }
    }

    /// Queue an item, replacing any item still waiting in the current window
    pub fn submit(&mut self, item: T) {
        if self.pending.is_none() {
            self.elapsed = 0.0;
        }
        self.pending = Some(item);
    }

    /// Update with delta, returns the latest item once the window closes
    pub fn tick(&mut self, delta: f32) -> Option<T> {
        self.pending.as_ref()?;

        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the waiting item without delivering it
    pub fn cancel(&mut self) {
        self.pending = None;
        self.elapsed = 0.0;
    }
}

/// Countdown timer - fires once after duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start (or restart) countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tick with delta, returns true if completed
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// Countdown that may be rescheduled a limited number of times
#[derive(Debug, Clone, Copy)]
pub struct BoundedRetry {
    countdown: Countdown,
    attempts: u32,
    max_attempts: u32,
}

impl BoundedRetry {
    pub fn new(delay: f32, max_attempts: u32) -> Self {
        Self {
            countdown: Countdown::new(delay),
            attempts: 0,
            max_attempts,
        }
    }

    /// Schedule another attempt. Returns false once the budget is spent.
    /// Scheduling while an attempt is already waiting does not consume budget.
    pub fn schedule(&mut self) -> bool {
        if self.countdown.is_active() {
            return true;
        }
        if self.attempts >= self.max_attempts {
            return false;
        }
        self.attempts += 1;
        self.countdown.start();
        true
    }

    pub fn tick(&mut self, delta: f32) -> bool {
        self.countdown.tick(delta)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_scheduled(&self) -> bool {
        self.countdown.is_active()
    }

    /// Stop waiting and restore the full budget
    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.attempts = 0;
    }

    pub fn cancel(&mut self) {
        self.countdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_coalesces_to_latest() {
        let mut throttle = TrailingThrottle::new(0.02);

        throttle.submit(1);
        assert_eq!(throttle.tick(0.005), None);
        throttle.submit(2);
        throttle.submit(3);
        assert_eq!(throttle.tick(0.005), None);

        // Window opened by the first submission closes
        assert_eq!(throttle.tick(0.015), Some(3));
        assert!(!throttle.is_pending());
        assert_eq!(throttle.tick(0.1), None);
    }

    #[test]
    fn throttle_idle_time_does_not_count() {
        let mut throttle = TrailingThrottle::new(0.02);

        assert_eq!(throttle.tick(1.0), None);
        throttle.submit("a");
        assert_eq!(throttle.tick(0.01), None);
        assert_eq!(throttle.tick(0.011), Some("a"));
    }

    #[test]
    fn throttle_new_window_after_flush() {
        let mut throttle = TrailingThrottle::new(0.02);

        throttle.submit(1);
        assert_eq!(throttle.tick(0.03), Some(1));

        throttle.submit(2);
        assert_eq!(throttle.tick(0.01), None);
        assert_eq!(throttle.tick(0.011), Some(2));
    }

    #[test]
    fn throttle_cancel_drops_pending() {
        let mut throttle = TrailingThrottle::new(0.02);
        throttle.submit(1);
        throttle.cancel();
        assert_eq!(throttle.tick(1.0), None);
    }

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5)); // Inactive

        timer.start();
        assert!(!timer.tick(0.5)); // In progress
        assert!(timer.tick(0.6)); // Complete
        assert!(!timer.tick(0.1)); // Inactive again
    }

    #[test]
    fn countdown_cancel_stops_firing() {
        let mut timer = Countdown::new(0.05);
        timer.start();
        timer.cancel();
        assert!(!timer.is_active());
        assert!(!timer.tick(1.0));
    }

    #[test]
    fn retry_budget_is_bounded() {
        let mut retry = BoundedRetry::new(0.01, 2);

        assert!(retry.schedule());
        assert!(retry.schedule()); // Already waiting, no budget used
        assert_eq!(retry.attempts(), 1);
        assert!(retry.tick(0.02));

        assert!(retry.schedule());
        assert!(retry.tick(0.02));

        assert!(!retry.schedule());
        assert!(!retry.is_scheduled());

        retry.reset();
        assert!(retry.schedule());
    }
}
