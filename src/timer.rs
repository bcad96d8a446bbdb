use core::convert::Infallible;

/// Millisecond stopwatch over a wrapping 32-bit monotonic clock
///
/// The clock is supplied on every call, so the stopwatch itself holds no
/// reference to hardware. Differences are taken modulo 2^32, which keeps the
/// arithmetic right across a clock wrap as long as the measured span is
/// shorter than the wrap period (~49 days).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started: Option<u32>,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self { started: None }
    }

    #[inline]
    pub fn start(&mut self, now: u32) {
        self.started = Some(now);
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Milliseconds since the last `start`, `None` if never started
    #[inline]
    pub fn elapsed(&self, now: u32) -> Option<u32> {
        self.started.map(|started| now.wrapping_sub(started))
    }

    /// Whether at least `threshold` milliseconds passed since `start`
    ///
    /// An unstarted stopwatch never reports elapsed.
    pub fn elapsed_at_least(&self, now: u32, threshold: u32) -> bool {
        self.wait(now, threshold).is_ok()
    }

    /// Non-blocking wait in the `CountDown::wait` manner
    ///
    /// Blocks forever until started.
    pub fn wait(&self, now: u32, threshold: u32) -> nb::Result<(), Infallible> {
        match self.elapsed(now) {
            Some(elapsed) if elapsed >= threshold => Ok(()),
            _ => Err(nb::Error::WouldBlock),
        }
    }
}

/// The four stopwatches driving the game
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    /// How long the current color has been lit
    pub playing: Stopwatch,
    /// How long since the last color went dark
    pub pause: Stopwatch,
    /// How long since the player's last correct press or turn start
    pub player_waiting: Stopwatch,
    /// How long since the previous sequence ended, gates the next level
    pub sequence_end: Stopwatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let mut sw = Stopwatch::new();
        sw.start(1_000);
        assert!(!sw.elapsed_at_least(1_499, 500));
        assert!(sw.elapsed_at_least(1_500, 500));
        assert!(sw.elapsed_at_least(9_000, 500));
    }

    #[test]
    fn survives_clock_wrap() {
        let mut sw = Stopwatch::new();
        sw.start(u32::MAX - 100);
        assert_eq!(sw.elapsed(49), Some(150));
        assert!(!sw.elapsed_at_least(49, 151));
        assert!(sw.elapsed_at_least(49, 150));
    }

    #[test]
    fn wait_would_block_until_due() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        assert_eq!(sw.wait(10, 20), Err(nb::Error::WouldBlock));
        assert_eq!(sw.wait(20, 20), Ok(()));
    }

    #[test]
    fn restart_moves_origin() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        assert!(sw.elapsed_at_least(5_000, 5_000));
        sw.start(4_000);
        assert!(!sw.elapsed_at_least(5_000, 5_000));
        assert_eq!(sw.elapsed(5_000), Some(1_000));
    }

    #[test]
    fn unstarted_has_no_elapsed() {
        let sw = Stopwatch::new();
        assert_eq!(sw.elapsed(1234), None);
        assert!(!sw.is_started());
    }

    #[test]
    fn unstarted_wait_would_block() {
        let sw = Stopwatch::new();
        assert_eq!(sw.wait(5, 0), Err(nb::Error::WouldBlock));
        assert!(!sw.elapsed_at_least(u32::MAX, 0));
    }
}
