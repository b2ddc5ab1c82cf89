//! Decrypted record validation
//!
//! A decrypted payload is usable when it is a JSON object with an `_id`
//! key. Anything else becomes a [`BadDecryptedData`] naming the record, its
//! source and the fault, so the driver can skip that record and carry on.

use crate::config::ValidatorConfig;
use crate::domain::{BadDecryptedData, DecryptedDataFault, SourceRecord};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reserved key holding the record identity
pub const ID_KEY: &str = "_id";

/// Reserved key holding the record type
pub const TYPE_KEY: &str = "@type";

/// A parsed decrypted document
pub type Document = Map<String, Value>;

/// Low-level payload failures
///
/// These never leave [`Validator::validate`]; they are folded into a
/// [`DecryptedDataFault`].
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload is not valid JSON
    #[error("decrypted payload is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object
    #[error("decrypted payload is a JSON {0}, expected an object")]
    NotAnObject(&'static str),

    /// The object has no `_id` key
    #[error("decrypted object has no '_id' key")]
    MissingId,
}

impl PayloadError {
    /// The record-level fault this error maps to
    pub fn fault(&self) -> DecryptedDataFault {
        match self {
            PayloadError::Syntax(_) | PayloadError::NotAnObject(_) => {
                DecryptedDataFault::MalformedPayload
            }
            PayloadError::MissingId => DecryptedDataFault::MissingIdentity,
        }
    }
}

/// A record whose payload passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    /// The full parsed document
    pub document: Document,

    /// Value found under `_id`
    pub id: Value,

    /// Value of `@type`, or the configured default
    pub record_type: String,
}

/// Validates decrypted payloads
///
/// Stateless apart from the default type; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Validator {
    default_type: String,
}

impl Validator {
    /// Creates a validator reporting `default_type` for untyped records
    pub fn new(default_type: impl Into<String>) -> Self {
        Self {
            default_type: default_type.into(),
        }
    }

    /// Creates a validator from configuration
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.default_type.clone())
    }

    /// Type reported for records without `@type`
    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    /// Parses a payload as a JSON object
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Syntax`] for malformed or truncated JSON and
    /// [`PayloadError::NotAnObject`] when the top-level value is not an object.
    pub fn parse(&self, payload: &str) -> Result<Document, PayloadError> {
        match serde_json::from_str::<Value>(payload)? {
            Value::Object(document) => Ok(document),
            other => Err(PayloadError::NotAnObject(json_kind(&other))),
        }
    }

    /// Returns the value under `_id`
    ///
    /// Only the key's presence matters; `"_id": null` is returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::MissingId`] if the key is absent.
    pub fn retrieve_id<'a>(&self, document: &'a Document) -> Result<&'a Value, PayloadError> {
        document.get(ID_KEY).ok_or(PayloadError::MissingId)
    }

    /// Returns the string under `@type`, or the default type
    ///
    /// A non-string `@type` is treated as absent.
    pub fn retrieve_type(&self, document: &Document) -> String {
        document
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or(&self.default_type)
            .to_string()
    }

    /// Validates the decrypted payload of `record`
    ///
    /// # Errors
    ///
    /// Returns [`BadDecryptedData`] when the payload cannot be parsed as a
    /// JSON object or has no `_id`.
    pub fn validate(
        &self,
        record: &SourceRecord,
        payload: &str,
    ) -> Result<ValidatedRecord, BadDecryptedData> {
        self.try_validate(payload).map_err(|e| {
            tracing::debug!(
                record_id = %record.record_id,
                error = %e,
                "Decrypted payload rejected"
            );
            BadDecryptedData {
                record_id: record.record_id_string(),
                database: record.database.clone(),
                collection: record.collection.clone(),
                fault: e.fault(),
            }
        })
    }

    fn try_validate(&self, payload: &str) -> Result<ValidatedRecord, PayloadError> {
        let document = self.parse(payload)?;
        let id = self.retrieve_id(&document)?.clone();
        let record_type = self.retrieve_type(&document);
        Ok(ValidatedRecord {
            document,
            id,
            record_type,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
