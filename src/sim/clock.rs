//! Elapsed time, level and enemy speed
//!
//! Level and speed are step functions of elapsed time, recomputed from scratch
//! whenever the rounded elapsed seconds land on a level boundary.

use serde::{Deserialize, Serialize};

/// Snapshot returned by [`GameClock::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockReading {
    pub elapsed_ms: f64,
    pub level: u32,
    pub enemy_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    elapsed_ms: f64,
    level: u32,
    enemy_speed: f32,
    base_speed: f32,
    speed_step: f32,
    interval_secs: u64,
}

impl GameClock {
    pub fn new(base_speed: f32, speed_step: f32, interval_secs: u64) -> Self {
        Self {
            elapsed_ms: 0.0,
            level: 1,
            enemy_speed: base_speed,
            base_speed,
            speed_step,
            interval_secs: interval_secs.max(1),
        }
    }

    /// Add one frame's progress. Non-positive progress is ignored.
    pub fn advance(&mut self, progress_ms: f64) -> ClockReading {
        if progress_ms > 0.0 {
            self.elapsed_ms += progress_ms;

            let secs = self.elapsed_secs_rounded();
            if secs > 0 && secs % self.interval_secs == 0 {
                let steps = secs / self.interval_secs;
                let level = steps as u32 + 1;
                if level != self.level {
                    log::debug!("Level {} reached at {}s", level, secs);
                }
                self.enemy_speed = self.base_speed + self.speed_step * steps as f32;
                self.level = level;
            }
        }
        self.reading()
    }

    pub fn reading(&self) -> ClockReading {
        ClockReading {
            elapsed_ms: self.elapsed_ms,
            level: self.level,
            enemy_speed: self.enemy_speed,
        }
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }

    fn elapsed_secs_rounded(&self) -> u64 {
        (self.elapsed_ms / 1000.0).round() as u64
    }

    /// Elapsed seconds with two decimals, for the HUD and score prompt
    pub fn elapsed_display(&self) -> String {
        format!("{:.2}", self.elapsed_ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clock() -> GameClock {
        GameClock::new(1.75, 0.25, 10)
    }

    #[test]
    fn test_ignores_non_positive_progress() {
        let mut clock = clock();
        clock.advance(16.0);
        let before = clock.reading();
        assert_eq!(clock.advance(0.0), before);
        assert_eq!(clock.advance(-5.0), before);
    }

    #[test]
    fn test_level_steps_every_ten_seconds() {
        let mut clock = clock();
        let r = clock.advance(9_000.0);
        assert_eq!((r.level, r.enemy_speed), (1, 1.75));

        // 9.6s rounds to 10
        let r = clock.advance(600.0);
        assert_eq!((r.level, r.enemy_speed), (2, 2.0));

        // Level sticks between boundaries
        let r = clock.advance(5_000.0);
        assert_eq!(r.level, 2);

        let r = clock.advance(5_000.0);
        assert_eq!((r.level, r.enemy_speed), (3, 2.25));
    }

    #[test]
    fn test_boundary_is_idempotent() {
        let mut clock = clock();
        clock.advance(10_000.0);
        let r = clock.advance(16.0);
        assert_eq!((r.level, r.enemy_speed), (2, 2.0));
    }

    #[test]
    fn test_elapsed_display() {
        let mut clock = clock();
        clock.advance(12_345.0);
        assert_eq!(clock.elapsed_display(), "12.35");
    }

    proptest! {
        #[test]
        fn prop_speed_non_decreasing(frames in prop::collection::vec(-20.0f64..400.0, 1..600)) {
            let mut clock = clock();
            let mut last = clock.reading();
            for progress in frames {
                let now = clock.advance(progress);
                prop_assert!(now.enemy_speed >= last.enemy_speed);
                prop_assert!(now.level >= last.level);
                prop_assert!(now.elapsed_ms >= last.elapsed_ms);
                // Speed is always tied to level
                prop_assert!((now.enemy_speed - (1.75 + 0.25 * (now.level - 1) as f32)).abs() < 1e-4);
                last = now;
            }
        }
    }
}
