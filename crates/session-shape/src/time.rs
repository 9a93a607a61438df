//! Wrappers that keep it clear a value is a number of seconds

use std::{fmt::Display, time::Duration};

/// Similar to Duration but always clear that it is in Seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Seconds(u64);

/// Seconds since the unix epoch, the representation tokens use for `iat` and
/// `exp`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Self {
        // A clock set before the epoch is treated as the epoch
        Self(
            web_time::SystemTime::UNIX_EPOCH
                .elapsed()
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default(),
        )
    }

    pub const fn from_secs_since_unix_epoch(secs: u64) -> Self {
        Self(secs)
    }

    /// Instants before the unix epoch become the epoch itself, so anything
    /// already in the past stays in the past
    pub fn from_utc_datetime_saturating(value: chrono::DateTime<chrono::Utc>) -> Self {
        Self(u64::try_from(value.timestamp()).unwrap_or_default())
    }

    /// Returns None if the value does not fit in the range chrono supports
    pub fn as_utc_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.0.try_into().ok()?, 0)
    }

    /// Returns the number of seconds since `past_time` or None if `past_time`
    /// is in the future
    pub fn seconds_since(self, past_time: Self) -> Option<Seconds> {
        self.0.checked_sub(past_time.0).map(Seconds)
    }
}

impl TryFrom<chrono::DateTime<chrono::Utc>> for Timestamp {
    type Error = anyhow::Error;

    fn try_from(value: chrono::DateTime<chrono::Utc>) -> Result<Self, Self::Error> {
        let secs = value.timestamp();
        if secs < 0 {
            anyhow::bail!("timestamps before the unix epoch are not supported. Value: {value}");
        }
        Ok(Self(secs as u64))
    }
}

impl std::ops::Add<Seconds> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Seconds) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Seconds {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns true if this represents zero seconds
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Seconds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Seconds> for Duration {
    fn from(value: Seconds) -> Self {
        Duration::from_secs(value.0)
    }
}

impl From<Seconds> for chrono::TimeDelta {
    fn from(value: Seconds) -> Self {
        i64::try_from(value.0)
            .ok()
            .and_then(chrono::TimeDelta::try_seconds)
            .unwrap_or(chrono::TimeDelta::MAX)
    }
}

impl Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
