//! Response handling contracts invoked once a throttled submission has been released.

// self
use crate::http::TransportResponse;

/// Receives every [`TransportResponse`] produced by a
/// [`DocumentClient`](crate::client::DocumentClient).
///
/// The handler runs after the permit has been returned to the pool, so slow handlers never
/// stretch the throttle window.
pub trait ResponseHandler
where
	Self: Send + Sync,
{
	/// Inspects the raw upstream response.
	fn handle(&self, response: &TransportResponse);
}

/// Handler that ignores every response.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResponseHandler;
impl ResponseHandler for NoopResponseHandler {
	fn handle(&self, _: &TransportResponse) {}
}
