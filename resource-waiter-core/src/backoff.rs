//! Delay policies between polls.
//!
//! Every policy returns a delay inside `[min_delay, max_delay]` of the
//! [`WaiterOptions`] it was built from.

use crate::options::WaiterOptions;
use rand::Rng;
use std::time::Duration;

/// Chooses how long to sleep before poll `attempt + 1`.
///
/// `attempt` is 1-based: the delay after the first poll is `delay(1)`.
pub trait Backoff: Send {
    fn delay(&mut self, attempt: u32) -> Duration;
}

/// Exponential backoff with full jitter, clamped to the option bounds.
///
/// While `min_delay * 2^(attempt-1)` stays at or below `max_delay`, the delay is
/// drawn uniformly from `[min_delay, min_delay * 2^(attempt-1)]`. Past that
/// ceiling the delay is `max_delay`.
#[derive(Debug, Clone)]
pub struct ExponentialJitter {
    min_delay: Duration,
    max_delay: Duration,
    attempt_ceiling: u32,
}

impl ExponentialJitter {
    pub fn new(options: &WaiterOptions) -> Self {
        let ratio = options.max_delay.as_secs_f64() / options.min_delay.as_secs_f64();
        let attempt_ceiling = if ratio.is_finite() && ratio >= 1.0 {
            ratio.log2().floor() as u32 + 1
        } else {
            1
        };
        Self {
            min_delay: options.min_delay,
            max_delay: options.max_delay,
            attempt_ceiling,
        }
    }

    fn upper_bound(&self, attempt: u32) -> Duration {
        if attempt > self.attempt_ceiling {
            return self.max_delay;
        }
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.min_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

impl Backoff for ExponentialJitter {
    fn delay(&mut self, attempt: u32) -> Duration {
        if attempt > self.attempt_ceiling {
            return self.max_delay;
        }
        let upper = self.upper_bound(attempt);
        if upper <= self.min_delay {
            return self.min_delay;
        }
        rand::thread_rng().gen_range(self.min_delay..=upper)
    }
}

/// Always waits the same amount of time.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(Duration);

impl Fixed {
    /// Clamp `delay` into the option bounds.
    pub fn new(delay: Duration, options: &WaiterOptions) -> Self {
        Self(delay.clamp(options.min_delay, options.max_delay))
    }
}

impl Backoff for Fixed {
    fn delay(&mut self, _attempt: u32) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_attempt_ceiling() {
        let backoff = ExponentialJitter::new(&WaiterOptions::from_secs(30, 120));
        // 30, 60, 120 fit under the cap
        assert_eq!(backoff.attempt_ceiling, 3);
        assert_eq!(backoff.upper_bound(1), Duration::from_secs(30));
        assert_eq!(backoff.upper_bound(2), Duration::from_secs(60));
        assert_eq!(backoff.upper_bound(3), Duration::from_secs(120));
        assert_eq!(backoff.upper_bound(4), Duration::from_secs(120));
    }

    #[test]
    fn test_equal_bounds_are_fixed() {
        let mut backoff = ExponentialJitter::new(&WaiterOptions::from_secs(120, 120));
        for attempt in 1..10 {
            assert_eq!(backoff.delay(attempt), Duration::from_secs(120));
        }
    }

    #[test]
    fn test_first_delay_is_min() {
        let mut backoff = ExponentialJitter::new(&WaiterOptions::from_secs(30, 3600));
        assert_eq!(backoff.delay(1), Duration::from_secs(30));
    }

    #[test]
    fn test_large_attempts_saturate() {
        let mut backoff = ExponentialJitter::new(&WaiterOptions::from_secs(1, 3600));
        assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(3600));
    }

    #[test]
    fn test_fixed_is_clamped() {
        let options = WaiterOptions::from_secs(5, 10);
        assert_eq!(
            Fixed::new(Duration::from_secs(1), &options).delay(1),
            Duration::from_secs(5)
        );
        assert_eq!(
            Fixed::new(Duration::from_secs(60), &options).delay(7),
            Duration::from_secs(10)
        );
    }

    proptest! {
        #[test]
        fn delay_stays_within_bounds(min in 1u64..600, extra in 0u64..3600, attempt in 1u32..64) {
            let options = WaiterOptions::from_secs(min, min + extra);
            let mut backoff = ExponentialJitter::new(&options);
            let delay = backoff.delay(attempt);
            prop_assert!(delay >= options.min_delay);
            prop_assert!(delay <= options.max_delay);
        }
    }
}
