//! Fixed permit pool that paces outbound submissions.
//!
//! A [`Throttle`] admits at most `capacity` operations at once. Each admitted operation holds
//! its permit while it runs and for a further `cooldown` measured from the moment it returned,
//! whether it succeeded or failed. Callers beyond the capacity suspend until a permit is
//! released; bursts are serialized, never rejected.
//!
//! Waiters are woken by [`tokio::sync::Semaphore`], which happens to be first-come,
//! first-served. Callers must not rely on that ordering.
//!
//! The throttle imposes no timeout on the guarded operation. A transport that never returns
//! holds its permit forever; wrap the submission in a timeout if that matters; dropping the
//! future hands the permit back after its cooldown.

mod config;
mod metrics;
mod permit;

pub use config::*;
pub use metrics::*;
pub use permit::*;

// crates.io
use tokio::sync::Semaphore;
// self
use crate::{
	_prelude::*,
	error::InterruptedWait,
	http::{DocumentTransport, SubmissionRequest, TransportResponse},
	obs::{self, SubmissionOutcome, SubmissionSpan},
};

/// Shared permit pool with post-use cooldown.
///
/// Cloning is cheap; clones share the same pool and counters.
#[derive(Clone)]
pub struct Throttle {
	semaphore: Arc<Semaphore>,
	config: ThrottleConfig,
	metrics: Arc<ThrottleMetrics>,
}
impl Throttle {
	/// Creates a throttle with `capacity` permits, each held for `cooldown` after use.
	pub fn new(capacity: usize, cooldown: Duration) -> Result<Self> {
		Self::from_config(ThrottleConfig::new(capacity, cooldown))
	}

	/// Creates a throttle from a validated [`ThrottleConfig`].
	pub fn from_config(config: ThrottleConfig) -> Result<Self> {
		config.validate()?;

		Ok(Self {
			semaphore: Arc::new(Semaphore::new(config.capacity)),
			config,
			metrics: Default::default(),
		})
	}

	/// Returns the total number of permits.
	pub fn capacity(&self) -> usize {
		self.config.capacity
	}

	/// Returns the cooldown applied after every operation.
	pub fn cooldown(&self) -> Duration {
		self.config.cooldown
	}

	/// Returns the configuration the throttle was built from.
	pub fn config(&self) -> ThrottleConfig {
		self.config
	}

	/// Returns the number of permits currently in the pool.
	pub fn available_permits(&self) -> usize {
		self.semaphore.available_permits()
	}

	/// Returns the number of permits currently sending or cooling down.
	pub fn in_flight(&self) -> usize {
		self.capacity().saturating_sub(self.available_permits())
	}

	/// Returns the throttle's activity counters.
	pub fn metrics(&self) -> &ThrottleMetrics {
		&self.metrics
	}

	/// Stops admitting callers.
	///
	/// Every current and future waiter fails with [`InterruptedWait::Closed`]. Permits already
	/// handed out finish their send and cooldown normally.
	pub fn close(&self) {
		self.semaphore.close();
	}

	/// Returns `true` once [`close`](Self::close) has been called.
	pub fn is_closed(&self) -> bool {
		self.semaphore.is_closed()
	}

	/// Waits for a permit.
	///
	/// Dropping the returned future while it waits holds nothing and releases nothing.
	pub async fn acquire(&self) -> Result<ThrottlePermit> {
		let permit = Arc::clone(&self.semaphore).acquire_owned().await.map_err(|_| {
			self.metrics.record_interruption();

			InterruptedWait::Closed
		})?;
		let permit = ThrottlePermit::new(permit, Arc::clone(&self.semaphore), self.cooldown());

		self.metrics.record_acquisition(self.in_flight());

		Ok(permit)
	}

	/// Waits at most `max_wait` for a permit.
	pub async fn acquire_within(&self, max_wait: Duration) -> Result<ThrottlePermit> {
		match tokio::time::timeout(max_wait, self.acquire()).await {
			Ok(acquired) => acquired,
			Err(_) => {
				self.metrics.record_interruption();

				Err(InterruptedWait::Deadline { waited: max_wait }.into())
			},
		}
	}

	/// Runs `op` under a permit: acquire, run, cool down, release.
	///
	/// The cooldown starts when `op` resolves and applies to failures as well. The permit is
	/// returned to the pool before this future resolves.
	pub async fn run<F, Fut, T>(&self, op: F) -> Result<T>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let permit = self.acquire().await?;

		self.drive(permit, op).await
	}

	/// Like [`run`](Self::run), but gives up with [`InterruptedWait::Deadline`] if no permit
	/// frees up within `max_wait`.
	pub async fn run_within<F, Fut, T>(&self, max_wait: Duration, op: F) -> Result<T>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let permit = self.acquire_within(max_wait).await?;

		self.drive(permit, op).await
	}

	/// Sends `request` through `transport` under a permit.
	///
	/// Transport failures are returned unchanged once the cooldown has elapsed; nothing is
	/// retried. Dropping the future before it resolves counts as an interruption.
	pub async fn submit<T>(
		&self,
		request: SubmissionRequest,
		transport: &T,
	) -> Result<TransportResponse>
	where
		T: ?Sized + DocumentTransport,
	{
		let span = SubmissionSpan::new("submit", self.capacity());
		let record = SubmissionRecord::start(&self.metrics);
		let result = span
			.instrument(self.run(move || async move {
				transport.send(request).await.map_err(Error::from)
			}))
			.await;

		record.finish(&result);

		result
	}

	/// Like [`submit`](Self::submit), but gives up with [`InterruptedWait::Deadline`] if no
	/// permit frees up within `max_wait`.
	pub async fn submit_with_deadline<T>(
		&self,
		request: SubmissionRequest,
		transport: &T,
		max_wait: Duration,
	) -> Result<TransportResponse>
	where
		T: ?Sized + DocumentTransport,
	{
		let span = SubmissionSpan::new("submit_with_deadline", self.capacity());
		let record = SubmissionRecord::start(&self.metrics);
		let result = span
			.instrument(self.run_within(max_wait, move || async move {
				transport.send(request).await.map_err(Error::from)
			}))
			.await;

		record.finish(&result);

		result
	}

	async fn drive<F, Fut, T>(&self, mut permit: ThrottlePermit, op: F) -> Result<T>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T>>,
	{
		let result = op().await;

		permit.begin_cooldown();

		match &result {
			Ok(_) => self.metrics.record_success(),
			Err(_) => self.metrics.record_failure(),
		}

		permit.release().await;

		result
	}
}
impl Debug for Throttle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Throttle")
			.field("capacity", &self.config.capacity)
			.field("cooldown", &self.config.cooldown)
			.field("available_permits", &self.available_permits())
			.field("closed", &self.is_closed())
			.finish()
	}
}

/// Outcome bookkeeping for one submission; a future dropped mid-flight counts as interrupted.
struct SubmissionRecord<'a> {
	metrics: &'a ThrottleMetrics,
	pending: bool,
}
impl<'a> SubmissionRecord<'a> {
	fn start(metrics: &'a ThrottleMetrics) -> Self {
		obs::record_submission_outcome(SubmissionOutcome::Attempt);

		Self { metrics, pending: true }
	}

	fn finish<T>(mut self, result: &Result<T>) {
		self.pending = false;

		obs::record_submission_outcome(SubmissionOutcome::of(result));
	}
}
impl Drop for SubmissionRecord<'_> {
	fn drop(&mut self) {
		if self.pending {
			self.metrics.record_interruption();

			obs::record_submission_outcome(SubmissionOutcome::Interrupted);
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::{ConfigError, TransportError};

	#[test]
	fn zero_capacity_is_a_configuration_error() {
		let err = Throttle::new(0, Duration::from_secs(1))
			.expect_err("A throttle without permits should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::ZeroCapacity)));
	}

	#[tokio::test(start_paused = true)]
	async fn permit_walks_through_sending_and_cooldown() {
		let throttle =
			Throttle::new(1, Duration::from_secs(5)).expect("Throttle should build for test.");
		let acquired = Instant::now();
		let mut permit = throttle.acquire().await.expect("Permit should be available.");

		assert_eq!(permit.state(), PermitState::Sending);
		assert_eq!(permit.acquired_at(), acquired);
		assert_eq!(permit.cooldown_started_at(), None);
		assert_eq!(throttle.available_permits(), 0);
		assert_eq!(permit.cooldown_remaining(), Duration::from_secs(5));

		tokio::time::advance(Duration::from_secs(2)).await;
		permit.begin_cooldown();

		let cooling = Instant::now();

		assert_eq!(permit.state(), PermitState::CoolingDown);
		assert_eq!(permit.cooldown_started_at(), Some(cooling));
		assert_eq!(cooling - permit.acquired_at(), Duration::from_secs(2));
		assert_eq!(permit.cooldown_remaining(), Duration::from_secs(5));

		tokio::time::advance(Duration::from_secs(1)).await;
		permit.begin_cooldown();

		assert_eq!(permit.cooldown_started_at(), Some(cooling));
		assert_eq!(permit.cooldown_remaining(), Duration::from_secs(4));

		let started = Instant::now();

		permit.release().await;

		assert!(started.elapsed() >= Duration::from_secs(4));
		assert_eq!(throttle.available_permits(), 1);
	}

	#[test]
	fn throttle_reports_the_config_it_was_built_from() {
		let config = ThrottleConfig::per_period(4, Duration::from_millis(750));
		let throttle = Throttle::from_config(config).expect("Throttle should build for test.");

		assert_eq!(throttle.config(), config);
		assert_eq!(throttle.capacity(), 4);
		assert_eq!(throttle.cooldown(), Duration::from_millis(750));
		assert_eq!(throttle.in_flight(), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn run_releases_after_failure() {
		let throttle =
			Throttle::new(2, Duration::from_millis(100)).expect("Throttle should build for test.");
		let result: Result<()> = throttle
			.run(|| async {
				Err(Error::from(TransportError::Io(std::io::Error::other("connection refused"))))
			})
			.await;

		assert!(matches!(result, Err(Error::Transport(_))));
		assert_eq!(throttle.available_permits(), 2);
		assert_eq!(throttle.metrics().failures(), 1);
		assert_eq!(throttle.metrics().acquisitions(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn dropped_permit_returns_after_remaining_cooldown() {
		let throttle =
			Throttle::new(1, Duration::from_secs(3)).expect("Throttle should build for test.");
		let mut permit = throttle.acquire().await.expect("Permit should be available.");

		permit.begin_cooldown();
		drop(permit);

		assert_eq!(throttle.available_permits(), 0);

		let started = Instant::now();
		let _next = throttle.acquire().await.expect("Permit should come back after cooldown.");

		assert!(started.elapsed() >= Duration::from_secs(3));
	}

	#[test]
	fn dropped_permit_outside_runtime_returns_immediately() {
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_time()
			.build()
			.expect("Runtime should build for test.");
		let throttle =
			Throttle::new(1, Duration::from_secs(60)).expect("Throttle should build for test.");
		let permit = runtime
			.block_on(throttle.acquire())
			.expect("Permit should be available.");

		drop(runtime);
		drop(permit);

		assert_eq!(throttle.available_permits(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn closed_throttle_rejects_waiters() {
		let throttle =
			Throttle::new(1, Duration::from_secs(1)).expect("Throttle should build for test.");

		throttle.close();

		let err = throttle.acquire().await.expect_err("Closed throttle should reject callers.");

		assert!(matches!(err, Error::Interrupted(InterruptedWait::Closed)));
		assert_eq!(throttle.metrics().interruptions(), 1);
	}
}
