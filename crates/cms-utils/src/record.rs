//! Record copying driven by explicit schemas.
//!
//! A copy carries over every data field of the source record. Identity
//! fields, parent links and any caller-excluded fields are left out and take
//! their serde defaults on the new instance. Excluded names that the schema
//! does not know are ignored.

use cms_types::RecordSchema;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while copying a record.
#[derive(Debug, Error)]
pub enum RecordError {
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// The record does not serialize to a map of named fields.
	#[error("Record must serialize to a map of fields")]
	NotAMap,
}

/// Copies `record`, leaving out identity fields and the fields in `exclude`.
pub fn copy_record<R: RecordSchema>(record: &R, exclude: &[&str]) -> Result<R, RecordError> {
	let value =
		serde_json::to_value(record).map_err(|e| RecordError::Serialization(e.to_string()))?;
	let Value::Object(mut fields) = value else {
		return Err(RecordError::NotAMap);
	};

	fields.retain(|name, _| {
		R::field(name).is_some_and(|field| field.is_copyable())
			&& !exclude.contains(&name.as_str())
	});

	serde_json::from_value(Value::Object(fields))
		.map_err(|e| RecordError::Serialization(e.to_string()))
}
