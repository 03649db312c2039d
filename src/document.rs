//! Serde model of the CRPT document submitted by [`DocumentClient`](crate::client::DocumentClient).
//!
//! Wire names are snake_case except `importRequest` and `participantInn`, matching the upstream
//! schema. Unknown fields are ignored and absent fields fall back to `None` or empty lists, so a
//! partially filled document still decodes in a single pass.

// std
use std::{fs, path::Path};
// crates.io
use time::Date;
// self
use crate::{_prelude::*, error::CodecError};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Document sent to the "create document" endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
	/// Participant block.
	pub description: Option<Description>,
	/// Document identifier.
	pub doc_id: Option<String>,
	/// Document status.
	pub doc_status: Option<String>,
	/// Document type.
	pub doc_type: Option<String>,
	/// Whether the goods are imported.
	#[serde(rename = "importRequest")]
	pub import_request: bool,
	/// Owner taxpayer number.
	pub owner_inn: Option<String>,
	/// Participant taxpayer number.
	pub participant_inn: Option<String>,
	/// Producer taxpayer number.
	pub producer_inn: Option<String>,
	/// Production date as sent by the caller.
	pub production_date: Option<String>,
	/// Production type.
	pub production_type: Option<String>,
	/// Products covered by the document.
	pub products: Vec<Product>,
	/// Registration date as sent by the caller.
	pub reg_date: Option<String>,
	/// Registration number.
	pub reg_number: Option<String>,
}
impl Document {
	/// Decodes a document, reporting the JSON path of the first mismatch.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_slice(bytes);
		let document = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| CodecError::Decode { source })?;

		de.end().map_err(CodecError::from)?;

		Ok(document)
	}

	/// Decodes a document from a string.
	pub fn from_json_str(json: &str) -> Result<Self> {
		Self::from_json_slice(json.as_bytes())
	}

	/// Reads and decodes a document file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path)
			.map_err(|source| CodecError::Read { path: path.to_path_buf(), source })?;

		Self::from_json_slice(&bytes)
	}

	/// Encodes the document as the request body.
	pub fn to_json_vec(&self) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec(self).map_err(CodecError::from)?)
	}
}

/// Participant block of a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
	/// Participant taxpayer number.
	#[serde(rename = "participantInn")]
	pub participant_inn: Option<String>,
}

/// Product line of a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
	/// Certificate document kind.
	pub certificate_document: Option<String>,
	/// Certificate issue date.
	#[serde(with = "iso_date::option")]
	pub certificate_document_date: Option<Date>,
	/// Certificate number.
	pub certificate_document_number: Option<String>,
	/// Owner taxpayer number.
	pub owner_inn: Option<String>,
	/// Producer taxpayer number.
	pub producer_inn: Option<String>,
	/// Production date.
	#[serde(with = "iso_date::option")]
	pub production_date: Option<Date>,
	/// Commodity code.
	pub tnved_code: Option<String>,
	/// Unit identification code.
	pub uit_code: Option<String>,
	/// Transport package identification code.
	pub uitu_code: Option<String>,
}
