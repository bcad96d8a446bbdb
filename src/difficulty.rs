//! Level dependent shortening of presentation and pause durations.
//!
//! `difficulty = 0.5 - 1 / level^2`, and the penalty taken off a duration is
//! `floor(difficulty * base)`, or nothing while the difficulty is not
//! positive. Evaluated in integers as `base * (level^2 - 2) / (2 * level^2)`,
//! which is the same floor without float rounding, so the penalty stays
//! strictly below `base / 2` for every level.

use crate::config::Config;

pub fn penalty(base: u32, level: u16) -> u32 {
    let square = u64::from(level) * u64::from(level);
    if square <= 2 {
        return 0;
    }
    (u64::from(base) * (square - 2) / (2 * square)) as u32
}

/// How long a color stays lit while presenting at `level`
pub fn presentation_ms(config: &Config, level: u16) -> u32 {
    config
        .presentation_ms
        .saturating_sub(penalty(config.presentation_penalty_ms, level))
}

/// Dark gap between two presented colors at `level`
pub fn pause_ms(config: &Config, level: u16) -> u32 {
    config
        .pause_ms
        .saturating_sub(penalty(config.pause_penalty_ms, level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_level_is_free() {
        assert_eq!(penalty(400, 1), 0);
        assert_eq!(penalty(200, 1), 0);
        assert_eq!(penalty(400, 0), 0);
    }

    #[test]
    fn known_values() {
        // 0.25 * 400
        assert_eq!(penalty(400, 2), 100);
        // floor((0.5 - 1/9) * 400) = floor(155.55)
        assert_eq!(penalty(400, 3), 155);
        // floor((0.5 - 1/16) * 200) = 87.5
        assert_eq!(penalty(200, 4), 87);
    }

    #[test]
    fn monotonic_and_bounded() {
        for &base in &[1u32, 7, 200, 400, 10_000] {
            for level in 1..u16::MAX {
                let here = penalty(base, level);
                let next = penalty(base, level + 1);
                assert!(here <= next, "base {} level {}", base, level);
                assert!(2 * next < base, "base {} level {}", base, level + 1);
            }
        }
    }

    #[test]
    fn durations_shrink_toward_floor() {
        let config = Config::default();
        assert_eq!(presentation_ms(&config, 1), 500);
        assert_eq!(pause_ms(&config, 1), 300);
        assert_eq!(presentation_ms(&config, 2), 400);
        assert_eq!(pause_ms(&config, 2), 250);

        let fast = presentation_ms(&config, 64);
        assert!(fast > 300 && fast < 302);
        assert!(pause_ms(&config, 64) > 200);
    }
}
