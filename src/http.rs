//! Transport primitives for document submissions.
//!
//! The module exposes [`DocumentTransport`] alongside [`SubmissionRequest`] and
//! [`TransportResponse`] so downstream crates can plug in their own HTTP stack while the
//! throttle keeps ownership of pacing. The throttle never looks inside the request or the
//! response; it only decides when [`DocumentTransport::send`] may run.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Document creation endpoint of the CRPT "True API".
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";
/// Header carrying the base64-encoded document signature.
pub const SIGNATURE_HEADER: &str = "Signature";
/// Content type of every submitted body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Boxed future returned by [`DocumentTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of delivering a [`SubmissionRequest`].
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared by every task that submits through
/// the same throttle, and the returned future must be `Send` so submissions can hop executors.
pub trait DocumentTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends the request and resolves to the raw upstream response.
	///
	/// Non-success HTTP statuses are responses, not errors; only failures to reach the
	/// endpoint surface as [`TransportError`].
	fn send(&self, request: SubmissionRequest) -> TransportFuture<'_>;
}
impl<T> DocumentTransport for Arc<T>
where
	T: ?Sized + DocumentTransport,
{
	fn send(&self, request: SubmissionRequest) -> TransportFuture<'_> {
		T::send(self, request)
	}
}

/// Signature string attached to a submission.
///
/// The raw value is sent base64-encoded in the [`SIGNATURE_HEADER`] header. `Debug` output is
/// redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(String);
impl Signature {
	/// Wraps a raw signature string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw signature.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns the header value: standard padded base64 of the signature's UTF-8 bytes.
	pub fn encoded(&self) -> String {
		STANDARD.encode(self.0.as_bytes())
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Signature(..)")
	}
}
impl From<&str> for Signature {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for Signature {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// Fully formed submission handed to a [`DocumentTransport`].
#[derive(Clone, Debug)]
pub struct SubmissionRequest {
	/// Endpoint receiving the `POST`.
	pub endpoint: Url,
	/// Signature attached via [`SIGNATURE_HEADER`].
	pub signature: Signature,
	/// Serialized document; opaque to the throttle.
	pub body: Vec<u8>,
}
impl SubmissionRequest {
	/// Creates a request for the provided endpoint, signature, and serialized body.
	pub fn new(endpoint: Url, signature: impl Into<Signature>, body: impl Into<Vec<u8>>) -> Self {
		Self { endpoint, signature: signature.into(), body: body.into() }
	}

	/// Returns the value of the [`SIGNATURE_HEADER`] header.
	pub fn signature_header(&self) -> String {
		self.signature.encoded()
	}
}

/// Raw upstream response; interpretation is left to a
/// [`ResponseHandler`](crate::ext::ResponseHandler).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl TransportResponse {
	/// Creates a response from a status code and body.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the reqwest client from `builder`.
	///
	/// TLS backend or header setup failures surface as [`ConfigError::HttpClientBuild`].
	pub fn from_builder(builder: ReqwestClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl DocumentTransport for ReqwestTransport {
	fn send(&self, request: SubmissionRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let signature = request.signature_header();
			let response = client
				.post(request.endpoint)
				.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
				.header(SIGNATURE_HEADER, signature)
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(TransportResponse { status, body })
		})
	}
}
