//! Throttled CRPT document submission: a fixed permit pool that holds each permit for a
//! cooldown after the send completes, wired to a pluggable transport and response hook.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod document;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod throttle;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{
		Client as ReqwestClient, ClientBuilder as ReqwestClientBuilder, Error as ReqwestError,
	};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use tokio::time::Instant;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
