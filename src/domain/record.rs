//! Source records handed over by the decryption stage

use super::ids::RecordId;
use serde::{Deserialize, Serialize};

/// Encryption descriptor attached to a source record
///
/// Opaque to the exporter; carried through for downstream writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionBlock {
    /// Id of the key-encryption key
    pub key_encryption_key_id: String,

    /// Initialisation vector
    pub initialisation_vector: String,

    /// Encrypted data key
    pub encrypted_encryption_key: String,
}

impl EncryptionBlock {
    /// Creates a new encryption block
    pub fn new(
        key_encryption_key_id: impl Into<String>,
        initialisation_vector: impl Into<String>,
        encrypted_encryption_key: impl Into<String>,
    ) -> Self {
        Self {
            key_encryption_key_id: key_encryption_key_id.into(),
            initialisation_vector: initialisation_vector.into(),
            encrypted_encryption_key: encrypted_encryption_key.into(),
        }
    }
}

/// A record read from the source table, already decrypted upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// Checksum-prefixed record id
    pub record_id: RecordId,

    /// Declared decrypted length (informational)
    pub data_length: usize,

    /// Encryption descriptor
    pub encryption: EncryptionBlock,

    /// Source database name
    pub database: String,

    /// Source collection name
    pub collection: String,

    /// Last-modified timestamp (ISO-8601)
    pub last_modified: String,
}

impl SourceRecord {
    /// Creates a source record
    pub fn new(
        record_id: RecordId,
        data_length: usize,
        encryption: EncryptionBlock,
        database: impl Into<String>,
        collection: impl Into<String>,
        last_modified: impl Into<String>,
    ) -> Self {
        Self {
            record_id,
            data_length,
            encryption,
            database: database.into(),
            collection: collection.into(),
            last_modified: last_modified.into(),
        }
    }

    /// Checksum-stripped id, for messages and logs
    pub fn record_id_string(&self) -> String {
        self.record_id.to_string()
    }
}
