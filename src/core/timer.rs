//! Tick-counted timers.

/// A countdown measured in simulation ticks rather than wall-clock time.
///
/// Nothing advances it except an explicit [`TickTimer::tick`], so a paused
/// simulation leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickTimer {
    duration: u32,
    elapsed: u32,
}

impl TickTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            elapsed: 0,
        }
    }

    /// A timer that is already finished.
    pub fn finished_after(duration: u32) -> Self {
        Self {
            duration,
            elapsed: duration,
        }
    }

    /// Advance one tick. Returns true once the timer has run out.
    pub fn tick(&mut self) -> bool {
        if self.elapsed < self.duration {
            self.elapsed += 1;
        }
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    pub fn remaining(&self) -> u32 {
        self.duration - self.elapsed
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Progress in `0.0..=1.0`. A zero-length timer counts as complete.
    pub fn fraction(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            self.elapsed as f32 / self.duration as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finishes_after_exact_tick_count() {
        let mut timer = TickTimer::new(3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert!(timer.finished());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn zero_duration_is_immediately_finished() {
        let timer = TickTimer::new(0);
        assert!(timer.finished());
        assert_eq!(timer.fraction(), 1.0);
    }

    #[test]
    fn reset_restarts_countdown() {
        let mut timer = TickTimer::new(2);
        timer.tick();
        timer.tick();
        timer.reset();
        assert!(!timer.finished());
        assert_eq!(timer.remaining(), 2);
        assert_eq!(timer.fraction(), 0.0);
    }
}
