//! Throttle sizing.

// crates.io
use tokio::sync::Semaphore;
// self
use crate::{_prelude::*, error::ConfigError};

/// Capacity and cooldown of a [`Throttle`](crate::throttle::Throttle).
///
/// At most `capacity` submissions are ever sending or cooling down at once, and every permit
/// stays out of the pool for `cooldown` after its send returns. The effective ceiling is
/// therefore `capacity` requests per `cooldown` (plus send latency).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
	/// Total permits in the pool.
	pub capacity: usize,
	/// Time each permit stays held after its send returns.
	#[serde(default)]
	pub cooldown: Duration,
}
impl ThrottleConfig {
	/// Largest capacity the underlying semaphore can represent.
	pub const MAX_CAPACITY: usize = Semaphore::MAX_PERMITS;

	/// Creates a config with the provided capacity and cooldown.
	pub const fn new(capacity: usize, cooldown: Duration) -> Self {
		Self { capacity, cooldown }
	}

	/// Allows `requests` submissions per `period`.
	///
	/// Each permit cools down for the whole period, so no window of `period` length measured
	/// from send completions ever admits more than `requests` sends.
	pub const fn per_period(requests: usize, period: Duration) -> Self {
		Self::new(requests, period)
	}

	/// Overrides the cooldown.
	pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
		self.cooldown = cooldown;

		self
	}

	/// Ensures the pool can be built.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.capacity == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		if self.capacity > Self::MAX_CAPACITY {
			return Err(ConfigError::CapacityTooLarge {
				capacity: self.capacity,
				max: Self::MAX_CAPACITY,
			});
		}

		Ok(())
	}
}
