//! Optional observability helpers for throttled submissions.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `crpt_api.submission` with the `stage` and
//!   `capacity` fields, plus `debug` events for every permit transition.
//! - Enable `metrics` to increment the `crpt_api_submission_total` counter for every
//!   attempt/success/failure/interruption, labeled by `outcome`, and to publish the
//!   `crpt_api_permits_available` gauge.
//!
//! A submission future dropped before it resolves (an outer timeout or an aborted task) is
//! recorded as `interrupted`, even if its send already succeeded.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmissionOutcome {
	/// Entry to [`Throttle::submit`](crate::throttle::Throttle::submit).
	Attempt,
	/// The transport returned a response.
	Success,
	/// The transport failed.
	Failure,
	/// The caller gave up: no permit was granted in time, or the submission future was dropped
	/// before it resolved.
	Interrupted,
}
impl SubmissionOutcome {
	/// Classifies a finished submission.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(Error::Interrupted(_)) => Self::Interrupted,
			Err(_) => Self::Failure,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SubmissionOutcome::Attempt => "attempt",
			SubmissionOutcome::Success => "success",
			SubmissionOutcome::Failure => "failure",
			SubmissionOutcome::Interrupted => "interrupted",
		}
	}
}
impl Display for SubmissionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Permit lifecycle transitions surfaced as log events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PermitTransition {
	/// `Free -> Sending`.
	Acquired,
	/// `Sending -> CoolingDown`.
	CooldownStarted,
	/// `CoolingDown -> Free`.
	Released,
	/// The guard was dropped before an orderly release; the remaining cooldown runs detached.
	Abandoned,
}
impl PermitTransition {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PermitTransition::Acquired => "acquired",
			PermitTransition::CooldownStarted => "cooldown_started",
			PermitTransition::Released => "released",
			PermitTransition::Abandoned => "abandoned",
		}
	}
}
impl Display for PermitTransition {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
