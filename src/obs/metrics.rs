// self
use crate::obs::SubmissionOutcome;

/// Records a submission outcome via the global metrics recorder (when enabled).
pub fn record_submission_outcome(outcome: SubmissionOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("crpt_api_submission_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Publishes the number of free permits via the global metrics recorder (when enabled).
pub fn record_available_permits(available: usize) {
	#[cfg(feature = "metrics")]
	{
		metrics::gauge!("crpt_api_permits_available").set(available as f64);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = available;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_submission_outcome_noop_without_recorder() {
		record_submission_outcome(SubmissionOutcome::Failure);
		record_available_permits(0);
	}
}
