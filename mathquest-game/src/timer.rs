//! Per-problem elapsed-time tracking.
//!
//! The periodic tick itself lives outside the engine. Each loaded problem gets a
//! fresh [`TimerHandle`]; ticks carrying a stale handle, or arriving while the
//! timer is paused or stopped, are dropped.
use serde::{Deserialize, Serialize};

/// Identifies the problem instance a tick source was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    /// Accumulating ticks for the current problem.
    Running,
    /// Feedback was produced; elapsed time is frozen until the next problem.
    Paused,
    /// No problem on screen.
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemTimer {
    generation: u64,
    elapsed: u32,
    phase: TimerPhase,
}

impl Default for ProblemTimer {
    fn default() -> Self {
        Self {
            generation: 0,
            elapsed: 0,
            phase: TimerPhase::Stopped,
        }
    }
}

impl ProblemTimer {
    /// Reset to zero and start timing a new problem instance.
    pub fn restart(&mut self) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        self.elapsed = 0;
        self.phase = TimerPhase::Running;
        log::debug!("timer restarted (generation {})", self.generation);
        TimerHandle(self.generation)
    }

    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
            log::debug!("timer paused at {}s", self.elapsed);
        }
    }

    /// Stop timing and invalidate the current handle.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = TimerPhase::Stopped;
    }

    /// Apply one tick of the external clock. Returns whether it was counted.
    pub fn tick(&mut self, handle: TimerHandle) -> bool {
        if handle.0 != self.generation || self.phase != TimerPhase::Running {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Handle for the problem currently being timed, if any.
    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        (self.phase != TimerPhase::Stopped).then_some(TimerHandle(self.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_accumulate_only_while_running() {
        let mut timer = ProblemTimer::default();
        let handle = timer.restart();
        assert!(timer.tick(handle));
        assert!(timer.tick(handle));
        timer.pause();
        assert!(!timer.tick(handle));
        assert_eq!(timer.elapsed(), 2);
        assert_eq!(timer.phase(), TimerPhase::Paused);
    }

    #[test]
    fn stale_handles_are_ignored_after_restart() {
        let mut timer = ProblemTimer::default();
        let old = timer.restart();
        timer.tick(old);
        let fresh = timer.restart();
        assert_eq!(timer.elapsed(), 0);
        assert!(!timer.tick(old));
        assert!(timer.tick(fresh));
        assert_eq!(timer.elapsed(), 1);
    }

    #[test]
    fn stop_invalidates_the_handle() {
        let mut timer = ProblemTimer::default();
        let handle = timer.restart();
        timer.stop();
        assert!(!timer.tick(handle));
        assert!(timer.handle().is_none());
        assert_eq!(timer.phase(), TimerPhase::Stopped);
    }
}
