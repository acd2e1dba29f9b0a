//! Level progression and gravity timing.
//!
//! Gravity is measured against a monotonic clock supplied by the caller, so
//! tests can drive it with synthetic `Instant`s and the loop's sleep cadence
//! never affects fall speed.

use std::time::{Duration, Instant};

use crate::types::{
    FRAME_NANOS, GRAVITY_FRAMES, LINES_PER_LEVEL, MAX_GRAVITY_LEVEL, SOFT_DROP_GRACE_MS,
    SOFT_DROP_MS,
};

/// Gravity interval for a level (no soft drop)
pub fn tick_duration(level: u32) -> Duration {
    let frames = GRAVITY_FRAMES[level.min(MAX_GRAVITY_LEVEL) as usize];
    Duration::from_nanos(FRAME_NANOS * frames as u64)
}

/// Lines needed to leave `level`
pub fn lines_for_next_level(level: u32) -> u32 {
    level.saturating_add(1).saturating_mul(LINES_PER_LEVEL)
}

/// Score, lines and level of a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub lost: bool,
}

impl GameStats {
    pub fn new(start_level: u32) -> Self {
        Self {
            level: start_level,
            ..Self::default()
        }
    }

    /// Advance at most one level if the line threshold has been reached.
    /// Returns true if the level changed.
    pub fn update_level(&mut self) -> bool {
        if self.lines >= lines_for_next_level(self.level) {
            self.level += 1;
            true
        } else {
            false
        }
    }
}

/// Decides when the next gravity tick is due
#[derive(Debug, Clone)]
pub struct LevelTimer {
    last_tick: Instant,
    tick: Duration,
    soft_drop: Duration,
    soft_drop_grace: Duration,
    soft_drop_until: Option<Instant>,
}

impl LevelTimer {
    pub fn new(now: Instant, level: u32) -> Self {
        Self {
            last_tick: now,
            tick: tick_duration(level),
            soft_drop: Duration::from_millis(SOFT_DROP_MS as u64),
            soft_drop_grace: Duration::from_millis(SOFT_DROP_GRACE_MS as u64),
            soft_drop_until: None,
        }
    }

    pub fn with_soft_drop(mut self, soft_drop: Duration, grace: Duration) -> Self {
        self.soft_drop = soft_drop;
        self.soft_drop_grace = grace;
        self
    }

    /// Recompute the level interval.
    pub fn set_level(&mut self, level: u32) {
        self.tick = tick_duration(level);
    }

    /// Register a soft-drop command; the drop stays held for the grace window.
    pub fn hold_soft_drop(&mut self, now: Instant) {
        self.soft_drop_until = Some(now + self.soft_drop_grace);
    }

    pub fn soft_drop_held(&self, now: Instant) -> bool {
        self.soft_drop_until.is_some_and(|until| now < until)
    }

    /// Interval currently in effect
    pub fn effective_tick(&self, now: Instant) -> Duration {
        if self.soft_drop_held(now) {
            self.tick.min(self.soft_drop)
        } else {
            self.tick
        }
    }

    /// Whether a gravity tick is due. Consumes the tick when it is.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) >= self.effective_tick(now) {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_0_is_800ms() {
        let d = tick_duration(0);
        assert!(d >= Duration::from_millis(800) && d < Duration::from_millis(801));
    }

    #[test]
    fn level_29_and_above_is_one_frame() {
        let d = tick_duration(29);
        assert_eq!(d, Duration::from_nanos(FRAME_NANOS));
        assert_eq!(tick_duration(100), d);
        assert_eq!(d.as_millis(), 16);
    }

    #[test]
    fn level_advances_once_per_call() {
        let mut stats = GameStats::new(0);
        stats.lines = 9;
        assert!(!stats.update_level());
        stats.lines = 25;
        assert!(stats.update_level());
        assert_eq!(stats.level, 1);
        assert!(stats.update_level());
        assert_eq!(stats.level, 2);
        assert!(!stats.update_level());
    }

    #[test]
    fn soft_drop_caps_interval() {
        let t0 = Instant::now();
        let mut timer = LevelTimer::new(t0, 0);
        assert_eq!(timer.effective_tick(t0), tick_duration(0));

        timer.hold_soft_drop(t0);
        assert_eq!(timer.effective_tick(t0), Duration::from_millis(50));

        let later = t0 + Duration::from_millis(200);
        assert_eq!(timer.effective_tick(later), tick_duration(0));
    }

    #[test]
    fn soft_drop_never_slows_fast_levels() {
        let t0 = Instant::now();
        let mut timer = LevelTimer::new(t0, 29);
        timer.hold_soft_drop(t0);
        assert_eq!(timer.effective_tick(t0), tick_duration(29));
    }

    #[test]
    fn tick_is_consumed() {
        let t0 = Instant::now();
        let mut timer = LevelTimer::new(t0, 0);
        assert!(!timer.poll_tick(t0 + Duration::from_millis(799)));
        let t1 = t0 + Duration::from_millis(801);
        assert!(timer.poll_tick(t1));
        assert!(!timer.poll_tick(t1 + Duration::from_millis(10)));
    }
}
