//! Held-key auto-repeat for terminal environments.
//!
//! A held key fires once after `initial_ms`, then every `interval_ms`. Time is
//! fed in by the caller, so the timer never reads a clock itself.
//!
//! Terminals that never report key releases are handled by [`AutoRepeat::idle_ms`]:
//! the owner treats a key as released once it has not been pressed again within
//! its timeout.

/// Repeat state for one held key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRepeat {
    initial_ms: u32,
    interval_ms: u32,
    accumulator_ms: u32,
    fast: bool,
    idle_ms: u32,
}

impl AutoRepeat {
    pub fn new(initial_ms: u32, interval_ms: u32) -> Self {
        Self {
            initial_ms: initial_ms.max(1),
            interval_ms: interval_ms.max(1),
            accumulator_ms: 0,
            fast: false,
            idle_ms: 0,
        }
    }

    /// Note a repeated press of the same key (resets the release timeout only).
    pub fn touch(&mut self) {
        self.idle_ms = 0;
    }

    /// Milliseconds since the key was last pressed
    pub fn idle_ms(&self) -> u32 {
        self.idle_ms
    }

    /// Whether the initial delay has already elapsed
    pub fn is_fast(&self) -> bool {
        self.fast
    }

    /// Advance by `elapsed_ms` and return how many repeats fired.
    pub fn update(&mut self, elapsed_ms: u32) -> u32 {
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);

        let mut fired = 0;
        loop {
            let threshold = if self.fast {
                self.interval_ms
            } else {
                self.initial_ms
            };
            if self.accumulator_ms < threshold {
                break;
            }
            self.accumulator_ms -= threshold;
            self.fast = true;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_delay_then_interval() {
        let mut r = AutoRepeat::new(180, 60);

        assert_eq!(r.update(179), 0);
        assert!(!r.is_fast());

        assert_eq!(r.update(1), 1);
        assert!(r.is_fast());

        assert_eq!(r.update(59), 0);
        assert_eq!(r.update(1), 1);
        assert_eq!(r.update(120), 2);
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut r = AutoRepeat::new(50, 50);
        assert_eq!(r.update(160), 3);
        assert_eq!(r.update(40), 1);
    }

    #[test]
    fn test_touch_resets_idle_only() {
        let mut r = AutoRepeat::new(180, 60);
        r.update(100);
        assert_eq!(r.idle_ms(), 100);
        r.touch();
        assert_eq!(r.idle_ms(), 0);
        assert_eq!(r.update(80), 1);
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let mut r = AutoRepeat::new(0, 0);
        assert_eq!(r.update(3), 3);
    }
}
