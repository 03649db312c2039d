// self
use crate::{_prelude::*, obs::PermitTransition};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedSubmission<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedSubmission<F> = F;

/// A span builder used by throttled submissions.
#[derive(Clone, Debug)]
pub struct SubmissionSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SubmissionSpan {
	/// Creates a new span tagged with the provided stage and pool capacity.
	pub fn new(stage: &'static str, capacity: usize) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("crpt_api.submission", stage, capacity);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, capacity);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedSubmission<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a permit transition along with the pool's remaining free permits.
pub fn trace_permit_transition(transition: PermitTransition, available: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(transition = transition.as_str(), available, "Throttle permit transition.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (transition, available);
	}
}
