// std
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Thread-safe counters for throttle activity.
#[derive(Debug, Default)]
pub struct ThrottleMetrics {
	acquisitions: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	interruptions: AtomicU64,
	peak_in_flight: AtomicUsize,
}
impl ThrottleMetrics {
	/// Returns the number of permits handed out.
	pub fn acquisitions(&self) -> u64 {
		self.acquisitions.load(Ordering::Relaxed)
	}

	/// Returns the number of throttled operations that succeeded.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Returns the number of throttled operations that failed after acquiring a permit.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Returns the number of callers that gave up: wait deadline, closed pool, or a submission
	/// future dropped before it resolved.
	pub fn interruptions(&self) -> u64 {
		self.interruptions.load(Ordering::Relaxed)
	}

	/// Returns the highest number of permits observed held at once.
	pub fn peak_in_flight(&self) -> usize {
		self.peak_in_flight.load(Ordering::Relaxed)
	}

	pub(crate) fn record_acquisition(&self, in_flight: usize) {
		self.acquisitions.fetch_add(1, Ordering::Relaxed);
		self.peak_in_flight.fetch_max(in_flight, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_interruption(&self) {
		self.interruptions.fetch_add(1, Ordering::Relaxed);
	}
}
