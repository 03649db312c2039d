//! Shared fakes for integration tests.

#![allow(dead_code)]

// std
use std::{io, sync::Arc, time::Duration};
// crates.io
use parking_lot::Mutex;
use tokio::time::Instant;
// self
use crpt_api::{
	error::TransportError,
	http::{DocumentTransport, SubmissionRequest, TransportFuture, TransportResponse},
	throttle::Throttle,
	url::Url,
};

/// One observed call to [`RecordingTransport::send`].
#[derive(Clone, Debug)]
pub struct RecordedCall {
	pub request: SubmissionRequest,
	pub started_at: Instant,
	pub in_flight: usize,
}

#[derive(Clone, Copy, Debug)]
enum Behavior {
	Respond(u16),
	Fail,
}

/// In-memory transport that records every request it sees.
#[derive(Clone)]
pub struct RecordingTransport {
	behavior: Behavior,
	latency: Duration,
	observed: Option<Throttle>,
	calls: Arc<Mutex<Vec<RecordedCall>>>,
}
impl RecordingTransport {
	pub fn responding(status: u16) -> Self {
		Self {
			behavior: Behavior::Respond(status),
			latency: Duration::ZERO,
			observed: None,
			calls: Default::default(),
		}
	}

	pub fn failing() -> Self {
		Self { behavior: Behavior::Fail, ..Self::responding(0) }
	}

	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = latency;

		self
	}

	/// Samples `throttle.in_flight()` at the start of every send.
	pub fn observing(mut self, throttle: &Throttle) -> Self {
		self.observed = Some(throttle.clone());

		self
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().len()
	}
}
impl DocumentTransport for RecordingTransport {
	fn send(&self, request: SubmissionRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let in_flight = self.observed.as_ref().map_or(0, Throttle::in_flight);

			self.calls.lock().push(RecordedCall { request, started_at: Instant::now(), in_flight });

			if !self.latency.is_zero() {
				tokio::time::sleep(self.latency).await;
			}

			match self.behavior {
				Behavior::Respond(status) => Ok(TransportResponse::new(status, "{}")),
				Behavior::Fail => Err(TransportError::Io(io::Error::new(
					io::ErrorKind::ConnectionRefused,
					"connection refused",
				))),
			}
		})
	}
}

pub fn endpoint() -> Url {
	Url::parse("https://crpt.test/api/v3/lk/documents/create")
		.expect("Test endpoint should parse successfully.")
}

pub fn request(signature: &str) -> SubmissionRequest {
	SubmissionRequest::new(endpoint(), signature, b"{}".to_vec())
}
