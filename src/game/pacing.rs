/// Decides on which frames the engine should step, given its speed in
/// ticks per second. Times are in seconds, as returned by `get_time()`.
#[derive(Debug, Clone, Default)]
pub struct TickPacer {
    last_tick_at: f64,
}

impl TickPacer {
    pub fn new(now: f64) -> Self {
        Self { last_tick_at: now }
    }

    /// Start counting from `now`; the next tick comes one full interval later.
    pub fn reset(&mut self, now: f64) {
        self.last_tick_at = now;
    }

    pub fn interval(speed: u32) -> f64 {
        1.0 / speed.max(1) as f64
    }

    /// True at most once per interval; records `now` when it fires.
    pub fn due(&mut self, now: f64, speed: u32) -> bool {
        if now - self.last_tick_at < Self::interval(speed) {
            return false;
        }
        self.last_tick_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_per_second() {
        let mut pacer = TickPacer::new(0.0);
        assert!(!pacer.due(0.05, 10));
        assert!(pacer.due(0.1, 10));
        assert!(!pacer.due(0.15, 10));
        assert!(pacer.due(0.21, 10));
    }

    #[test]
    fn test_faster_speed_shorter_interval() {
        let mut pacer = TickPacer::new(0.0);
        assert!(!pacer.due(0.06, 10));
        assert!(pacer.due(0.07, 15));
    }

    #[test]
    fn test_zero_speed_does_not_divide_by_zero() {
        assert_eq!(TickPacer::interval(0), 1.0);
        let mut pacer = TickPacer::new(0.0);
        assert!(pacer.due(1.0, 0));
    }

    #[test]
    fn test_reset_delays_next_tick() {
        let mut pacer = TickPacer::new(0.0);
        pacer.reset(5.0);
        assert!(!pacer.due(5.05, 10));
        assert!(pacer.due(5.11, 10));
    }
}
