//! Monotonic time sources for the frame timer

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic clock with a blocking sleep
///
/// `now` is measured from an arbitrary origin fixed when the clock is created.
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Wall clock backed by `Instant` and `thread::sleep`
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock driven by hand
///
/// Sleeping advances virtual time by exactly the requested amount and
/// records the request, so frame pacing can be checked without waiting.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward, as if work had taken `duration`
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// Sum of all requested sleeps
    pub fn total_slept(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_system_clock_sleeps_at_least_requested() {
        let clock = SystemClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(2));
        assert!(clock.now() - before >= Duration::from_millis(2));
    }

    #[test]
    fn test_manual_clock_sleep_advances_time() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(3));
        clock.sleep(Duration::from_millis(5));

        assert_eq!(clock.now(), Duration::from_millis(8));
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(5)]);
        assert_eq!(clock.total_slept(), Duration::from_millis(5));
    }

    #[test]
    fn test_shared_manual_clock() {
        let clock = Rc::new(ManualClock::new());
        let shared = Rc::clone(&clock);
        shared.sleep(Duration::from_nanos(10));
        assert_eq!(clock.now(), Duration::from_nanos(10));
    }
}
