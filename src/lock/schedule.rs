//! Unlock time computation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("system clock is before the Unix epoch")]
    BeforeEpoch,

    #[error("unlock time overflows u64 seconds")]
    Overflow,
}

/// Unix seconds `delay` after `now`. Sub-second parts of `now` are floored.
pub fn unlock_timestamp(now: SystemTime, delay: Duration) -> Result<u64, ScheduleError> {
    let since_epoch = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| ScheduleError::BeforeEpoch)?;

    since_epoch
        .as_secs()
        .checked_add(delay.as_secs())
        .ok_or(ScheduleError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_one_minute_ahead() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(unlock_timestamp(now, MINUTE).unwrap(), 1_700_000_060);
    }

    #[test]
    fn test_floors_milliseconds() {
        let now = UNIX_EPOCH + Duration::from_millis(1_700_000_000_999);
        assert_eq!(unlock_timestamp(now, MINUTE).unwrap(), 1_700_000_060);
    }

    #[test]
    fn test_before_epoch() {
        let now = UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(unlock_timestamp(now, MINUTE), Err(ScheduleError::BeforeEpoch));
    }

    #[test]
    fn test_overflow() {
        let now = UNIX_EPOCH + Duration::from_secs(10);
        assert_eq!(
            unlock_timestamp(now, Duration::from_secs(u64::MAX)),
            Err(ScheduleError::Overflow)
        );
    }
}
