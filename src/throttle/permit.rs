//! RAII permit guard that owns one slot of the pool through its send and cooldown.

// crates.io
use tokio::{
	runtime::Handle,
	sync::{OwnedSemaphorePermit, Semaphore},
};
// self
use crate::{
	_prelude::*,
	obs::{self, PermitTransition},
};

/// Lifecycle stage of a held permit.
///
/// A permit is `Free` while it sits in the pool; a [`ThrottlePermit`] only ever observes the
/// two held stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PermitState {
	/// The guarded operation is running.
	Sending,
	/// The operation returned; the permit is waiting out its cooldown.
	CoolingDown,
}

/// One permit taken from a [`Throttle`](crate::throttle::Throttle).
///
/// Call [`begin_cooldown`](Self::begin_cooldown) as soon as the guarded send returns and
/// [`release`](Self::release) to hand the permit back after the cooldown. Dropping the guard
/// early never leaks the permit: inside a tokio runtime the remaining cooldown runs on a
/// detached task before the permit returns to the pool, outside a runtime it returns
/// immediately.
#[must_use]
#[clippy::has_significant_drop]
pub struct ThrottlePermit {
	permit: Option<OwnedSemaphorePermit>,
	semaphore: Arc<Semaphore>,
	cooldown: Duration,
	state: PermitState,
	acquired_at: Instant,
	cooldown_started_at: Option<Instant>,
}
impl ThrottlePermit {
	pub(crate) fn new(
		permit: OwnedSemaphorePermit,
		semaphore: Arc<Semaphore>,
		cooldown: Duration,
	) -> Self {
		obs::trace_permit_transition(PermitTransition::Acquired, semaphore.available_permits());
		obs::record_available_permits(semaphore.available_permits());

		Self {
			permit: Some(permit),
			semaphore,
			cooldown,
			state: PermitState::Sending,
			acquired_at: Instant::now(),
			cooldown_started_at: None,
		}
	}

	/// Returns the current lifecycle stage.
	pub fn state(&self) -> PermitState {
		self.state
	}

	/// Returns the instant the permit left the pool.
	pub fn acquired_at(&self) -> Instant {
		self.acquired_at
	}

	/// Returns the instant the cooldown started, if it has.
	pub fn cooldown_started_at(&self) -> Option<Instant> {
		self.cooldown_started_at
	}

	/// Moves the permit from `Sending` to `CoolingDown`; the cooldown clock starts now.
	///
	/// Calling it again has no effect.
	pub fn begin_cooldown(&mut self) {
		if self.state == PermitState::CoolingDown {
			return;
		}

		self.state = PermitState::CoolingDown;
		self.cooldown_started_at = Some(Instant::now());

		obs::trace_permit_transition(
			PermitTransition::CooldownStarted,
			self.semaphore.available_permits(),
		);
	}

	/// Returns how much of the cooldown is still owed.
	///
	/// While sending, the full cooldown is owed.
	pub fn cooldown_remaining(&self) -> Duration {
		match self.cooldown_started_at {
			Some(started) => self.cooldown.saturating_sub(started.elapsed()),
			None => self.cooldown,
		}
	}

	/// Waits out the remaining cooldown and returns the permit to the pool.
	///
	/// Starts the cooldown first if [`begin_cooldown`](Self::begin_cooldown) was not called.
	pub async fn release(mut self) {
		self.begin_cooldown();

		let remaining = self.cooldown_remaining();

		if !remaining.is_zero() {
			tokio::time::sleep(remaining).await;
		}

		if let Some(permit) = self.permit.take() {
			drop(permit);

			Self::released(&self.semaphore, PermitTransition::Released);
		}
	}

	fn released(semaphore: &Semaphore, transition: PermitTransition) {
		obs::trace_permit_transition(transition, semaphore.available_permits());
		obs::record_available_permits(semaphore.available_permits());
	}
}
impl Debug for ThrottlePermit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ThrottlePermit")
			.field("state", &self.state)
			.field("cooldown", &self.cooldown)
			.field("held", &self.permit.is_some())
			.finish()
	}
}
impl Drop for ThrottlePermit {
	fn drop(&mut self) {
		let Some(permit) = self.permit.take() else {
			return;
		};
		let remaining = self.cooldown_remaining();

		obs::trace_permit_transition(PermitTransition::Abandoned, self.semaphore.available_permits());

		if remaining.is_zero() {
			drop(permit);

			Self::released(&self.semaphore, PermitTransition::Released);

			return;
		}

		match Handle::try_current() {
			Ok(handle) => {
				let semaphore = Arc::clone(&self.semaphore);

				// A runtime shutting down drops the task, which drops the permit with it.
				handle.spawn(async move {
					tokio::time::sleep(remaining).await;
					drop(permit);

					Self::released(&semaphore, PermitTransition::Released);
				});
			},
			Err(_) => {
				drop(permit);

				Self::released(&self.semaphore, PermitTransition::Released);
			},
		}
	}
}
