//! Frame timer with pause support and frame-rate capping

use crate::clock::{Clock, SystemClock};
use std::time::Duration;

/// Frame rate used when none is configured
pub const DEFAULT_FPS: u32 = 60;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Exactly one of these holds at any time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    /// Not started, or stopped
    Stopped,
    /// Counting from `reference` (a reading of the clock)
    Running { reference: Duration },
    /// Frozen at `elapsed`
    Paused { elapsed: Duration },
}

/// Tracks elapsed time and sleeps to hold a target frame rate
pub struct FrameTimer<C: Clock = SystemClock> {
    clock: C,
    fps: u32,
    frame_duration: Duration,
    state: TimerState,
}

impl FrameTimer<SystemClock> {
    /// Create a stopped timer at `fps` using the system clock
    pub fn new(fps: u32) -> Self {
        Self::with_clock(fps, SystemClock::new())
    }
}

impl Default for FrameTimer<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl<C: Clock> FrameTimer<C> {
    /// Create a stopped timer at `fps` reading time from `clock`.
    /// An fps of zero is treated as one.
    pub fn with_clock(fps: u32, clock: C) -> Self {
        let fps = fps.max(1);
        Self {
            clock,
            fps,
            frame_duration: Duration::from_nanos(NANOS_PER_SECOND / u64::from(fps)),
            state: TimerState::Stopped,
        }
    }

    pub fn start(&mut self) {
        self.state = TimerState::Running {
            reference: self.clock.now(),
        };
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Freeze the elapsed time. Ignored unless running.
    pub fn pause(&mut self) {
        if let TimerState::Running { reference } = self.state {
            self.state = TimerState::Paused {
                elapsed: self.clock.now().saturating_sub(reference),
            };
        }
    }

    /// Resume from the frozen elapsed time. Ignored unless paused.
    pub fn unpause(&mut self) {
        if let TimerState::Paused { elapsed } = self.state {
            self.state = TimerState::Running {
                reference: self.clock.now().saturating_sub(elapsed),
            };
        }
    }

    /// Time since start (or the last sync), frozen while paused, zero when stopped
    pub fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Stopped => Duration::ZERO,
            TimerState::Paused { elapsed } => elapsed,
            TimerState::Running { reference } => self.clock.now().saturating_sub(reference),
        }
    }

    /// Sleep out the rest of the current frame, then begin the next one.
    ///
    /// Returns immediately when the frame already overran its budget. When
    /// the timer is not running a whole frame is slept and the state is kept.
    pub fn sync_to_frame_rate(&mut self) -> Duration {
        let TimerState::Running { reference } = self.state else {
            self.clock.sleep(self.frame_duration);
            return self.frame_duration;
        };

        let elapsed = self.clock.now().saturating_sub(reference);
        let remaining = self.frame_duration.saturating_sub(elapsed);
        if !remaining.is_zero() {
            self.clock.sleep(remaining);
        }
        self.state = TimerState::Running {
            reference: self.clock.now(),
        };
        remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, TimerState::Stopped)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }

    pub fn target_fps(&self) -> u32 {
        self.fps
    }

    /// Budget of a single frame (`1s / fps`)
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::rc::Rc;

    fn manual_timer(fps: u32) -> (FrameTimer<Rc<ManualClock>>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        (FrameTimer::with_clock(fps, Rc::clone(&clock)), clock)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_frame_duration_from_fps() {
        let timer = FrameTimer::new(60);
        assert_eq!(timer.frame_duration(), Duration::from_nanos(16_666_666));
        assert_eq!(timer.target_fps(), 60);

        let zero = FrameTimer::new(0);
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_stopped_timer_reports_zero() {
        let (mut timer, clock) = manual_timer(60);
        clock.advance(ms(50));
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(!timer.is_started());

        timer.start();
        clock.advance(ms(5));
        timer.stop();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_running_elapsed() {
        let (mut timer, clock) = manual_timer(60);
        clock.advance(ms(100));
        timer.start();
        clock.advance(ms(7));
        assert_eq!(timer.elapsed(), ms(7));
        assert!(timer.is_started());
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_elapsed_frozen_while_paused() {
        let (mut timer, clock) = manual_timer(60);
        timer.start();
        clock.advance(ms(10));
        timer.pause();
        assert!(timer.is_paused());

        let frozen = timer.elapsed();
        clock.advance(ms(250));
        assert_eq!(timer.elapsed(), frozen);
        assert_eq!(frozen, ms(10));
    }

    #[test]
    fn test_unpause_resumes_from_frozen_value() {
        let (mut timer, clock) = manual_timer(60);
        timer.start();
        clock.advance(ms(10));
        timer.pause();
        clock.advance(ms(1_000));
        timer.unpause();
        assert_eq!(timer.elapsed(), ms(10));

        clock.advance(ms(4));
        assert_eq!(timer.elapsed(), ms(14));
    }

    #[test]
    fn test_elapsed_monotonic_across_pause_cycles() {
        let (mut timer, clock) = manual_timer(60);
        timer.start();

        let mut last = timer.elapsed();
        for step in 1..=20u64 {
            clock.advance(ms(step));
            if step % 3 == 0 {
                timer.pause();
            } else if step % 3 == 1 {
                timer.unpause();
            }
            let now = timer.elapsed();
            assert!(now >= last, "elapsed went backwards at step {step}");
            last = now;
        }
    }

    #[test]
    fn test_pause_and_unpause_ignored_in_wrong_state() {
        let (mut timer, clock) = manual_timer(60);
        timer.pause();
        assert_eq!(timer.state(), TimerState::Stopped);

        timer.start();
        clock.advance(ms(3));
        timer.unpause();
        assert!(!timer.is_paused());
        assert_eq!(timer.elapsed(), ms(3));

        timer.pause();
        clock.advance(ms(3));
        timer.pause();
        assert_eq!(timer.elapsed(), ms(3));
    }

    #[test]
    fn test_sync_sleeps_remaining_budget() {
        let (mut timer, clock) = manual_timer(100);
        timer.start();
        clock.advance(ms(4));

        let slept = timer.sync_to_frame_rate();
        assert_eq!(slept, ms(6));
        assert_eq!(clock.sleeps(), vec![ms(6)]);
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_sync_returns_immediately_on_overrun() {
        let (mut timer, clock) = manual_timer(100);
        timer.start();
        clock.advance(ms(10));
        assert_eq!(timer.sync_to_frame_rate(), Duration::ZERO);

        clock.advance(ms(25));
        assert_eq!(timer.sync_to_frame_rate(), Duration::ZERO);
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_sync_resets_reference_each_frame() {
        let (mut timer, clock) = manual_timer(50);
        timer.start();
        for _ in 0..5 {
            clock.advance(ms(5));
            timer.sync_to_frame_rate();
        }
        assert_eq!(clock.sleeps(), vec![ms(15); 5]);
        assert_eq!(clock.now(), ms(100));
    }

    #[test]
    fn test_sync_while_stopped_sleeps_full_frame() {
        let (mut timer, clock) = manual_timer(100);
        assert_eq!(timer.sync_to_frame_rate(), ms(10));
        assert_eq!(clock.total_slept(), ms(10));
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_sync_with_system_clock_waits_at_least_remaining() {
        let mut timer = FrameTimer::new(200);
        let before = timer.clock().now();
        timer.start();
        timer.sync_to_frame_rate();
        assert!(timer.clock().now() - before >= timer.frame_duration());
    }
}
