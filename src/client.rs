//! High-level document submission client.
//!
//! [`DocumentClient`] owns the throttle, the transport, and the response hook so callers only
//! deal with documents and signatures. Every submission goes through
//! [`Throttle::submit`], so clones of one client (or clients sharing one [`Throttle`]) are
//! paced together.

// self
use crate::{
	_prelude::*,
	document::Document,
	ext::{NoopResponseHandler, ResponseHandler},
	http::{DocumentTransport, Signature, SubmissionRequest, TransportResponse},
	throttle::Throttle,
};
#[cfg(feature = "reqwest")]
use crate::{
	error::ConfigError,
	http::{DEFAULT_ENDPOINT, ReqwestTransport},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestDocumentClient = DocumentClient<ReqwestTransport>;

/// Submits CRPT documents through a shared [`Throttle`].
#[derive(Clone)]
pub struct DocumentClient<T, H = NoopResponseHandler>
where
	T: ?Sized + DocumentTransport,
	H: ?Sized + ResponseHandler,
{
	/// Permit pool pacing every submission.
	pub throttle: Throttle,
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Hook receiving each response once its permit is released.
	pub response_handler: Arc<H>,
	/// Endpoint receiving the documents.
	pub endpoint: Url,
}
impl<T> DocumentClient<T>
where
	T: ?Sized + DocumentTransport,
{
	/// Creates a client that reuses the caller-provided transport and ignores responses.
	pub fn with_transport(endpoint: Url, throttle: Throttle, transport: impl Into<Arc<T>>) -> Self {
		Self {
			throttle,
			transport: transport.into(),
			response_handler: Arc::new(NoopResponseHandler),
			endpoint,
		}
	}
}
impl<T, H> DocumentClient<T, H>
where
	T: ?Sized + DocumentTransport,
	H: ?Sized + ResponseHandler,
{
	/// Replaces the response hook.
	pub fn with_response_handler<H2>(self, handler: Arc<H2>) -> DocumentClient<T, H2>
	where
		H2: ?Sized + ResponseHandler,
	{
		DocumentClient {
			throttle: self.throttle,
			transport: self.transport,
			response_handler: handler,
			endpoint: self.endpoint,
		}
	}

	/// Overrides the submission endpoint.
	pub fn with_endpoint(mut self, endpoint: Url) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Encodes `document` and submits it under `signature`.
	///
	/// Suspends while the throttle is saturated. The response is handed to the response hook
	/// and then returned; non-2xx statuses are not errors.
	pub async fn create_document(
		&self,
		document: &Document,
		signature: impl Into<Signature>,
	) -> Result<TransportResponse> {
		let body = document.to_json_vec()?;

		self.create_document_raw(body, signature).await
	}

	/// Submits an already serialized document body.
	pub async fn create_document_raw(
		&self,
		body: impl Into<Vec<u8>>,
		signature: impl Into<Signature>,
	) -> Result<TransportResponse> {
		let request = SubmissionRequest::new(self.endpoint.clone(), signature, body);
		let response = self.throttle.submit(request, &*self.transport).await?;

		self.response_handler.handle(&response);

		Ok(response)
	}
}
#[cfg(feature = "reqwest")]
impl DocumentClient<ReqwestTransport> {
	/// Creates a client for the default CRPT endpoint backed by its own reqwest transport.
	pub fn new(throttle: Throttle) -> Result<Self> {
		Self::with_reqwest_builder(DEFAULT_ENDPOINT, throttle, ReqwestClient::builder())
	}

	/// Creates a client for `endpoint` whose reqwest client is built from `builder`.
	///
	/// A builder that cannot produce a client yields [`ConfigError::HttpClientBuild`].
	pub fn with_reqwest_builder(
		endpoint: &str,
		throttle: Throttle,
		builder: ReqwestClientBuilder,
	) -> Result<Self> {
		let endpoint = Url::parse(endpoint).map_err(ConfigError::from)?;
		let transport = ReqwestTransport::from_builder(builder)?;

		Ok(Self::with_transport(endpoint, throttle, transport))
	}

	/// Creates a client for `endpoint` that uses `client` for every request.
	pub fn with_reqwest_client(
		endpoint: &str,
		throttle: Throttle,
		client: ReqwestClient,
	) -> Result<Self> {
		let endpoint = Url::parse(endpoint).map_err(ConfigError::from)?;

		Ok(Self::with_transport(endpoint, throttle, ReqwestTransport::with_client(client)))
	}
}
impl<T, H> Debug for DocumentClient<T, H>
where
	T: ?Sized + DocumentTransport,
	H: ?Sized + ResponseHandler,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DocumentClient")
			.field("endpoint", &self.endpoint.as_str())
			.field("throttle", &self.throttle)
			.finish()
	}
}
