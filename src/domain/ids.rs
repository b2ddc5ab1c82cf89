//! Checksum-prefixed record identifiers
//!
//! Source records arrive with an id whose first four bytes are a big-endian
//! CRC-32 of the remaining bytes. [`RecordId`] splits that once on
//! construction so the checksum and the original identifier are held apart.

use std::fmt;

/// Length of the CRC-32 prefix in bytes
pub const CHECKSUM_LEN: usize = 4;

/// A record id with its CRC-32 prefix parsed out
///
/// The checksum is carried as-is. Integrity checking belongs to the
/// decryption stage, so nothing here compares it against the identifier.
///
/// # Examples
///
/// ```
/// use snapshot_export::domain::ids::RecordId;
///
/// let id = RecordId::from_identifier(b"00001".to_vec());
/// let parsed = RecordId::from_prefixed(&id.to_prefixed_bytes()).unwrap();
/// assert_eq!(parsed.to_string(), "00001");
/// assert_eq!(parsed.checksum(), id.checksum());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    checksum: u32,
    identifier: Vec<u8>,
}

impl RecordId {
    /// Parses a checksum-prefixed id
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is shorter than the checksum prefix.
    pub fn from_prefixed(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() < CHECKSUM_LEN {
            return Err(format!(
                "Record id must be at least {CHECKSUM_LEN} bytes, got {}",
                bytes.len()
            ));
        }
        let (prefix, identifier) = bytes.split_at(CHECKSUM_LEN);
        let checksum = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
        Ok(Self {
            checksum,
            identifier: identifier.to_vec(),
        })
    }

    /// Builds an id from raw identifier bytes, computing its checksum
    pub fn from_identifier(identifier: impl Into<Vec<u8>>) -> Self {
        let identifier = identifier.into();
        let checksum = crc32fast::hash(&identifier);
        Self {
            checksum,
            identifier,
        }
    }

    /// The CRC-32 carried in the prefix
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Identifier bytes with the prefix stripped
    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    /// Re-encodes the id in its checksum-prefixed wire form
    pub fn to_prefixed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(CHECKSUM_LEN + self.identifier.len());
        bytes.extend_from_slice(&self.checksum.to_be_bytes());
        bytes.extend_from_slice(&self.identifier);
        bytes
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.identifier))
    }
}

impl TryFrom<&[u8]> for RecordId {
    type Error = String;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_prefixed(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identifier_uses_crc32() {
        let id = RecordId::from_identifier(b"00001".to_vec());
        assert_eq!(id.checksum(), crc32fast::hash(b"00001"));
        assert_eq!(id.identifier(), b"00001");
    }

    #[test]
    fn test_prefix_is_big_endian() {
        let id = RecordId::from_identifier(b"abc".to_vec());
        let bytes = id.to_prefixed_bytes();
        assert_eq!(&bytes[..4], &crc32fast::hash(b"abc").to_be_bytes());
        assert_eq!(&bytes[4..], b"abc");
    }

    #[test]
    fn test_from_prefixed_strips_checksum() {
        let mut bytes = vec![0xde, 0xad, 0xbe, 0xef];
        bytes.extend_from_slice(b"record-42");
        let id = RecordId::from_prefixed(&bytes).unwrap();
        assert_eq!(id.checksum(), 0xdead_beef);
        assert_eq!(id.to_string(), "record-42");
    }

    #[test]
    fn test_from_prefixed_does_not_verify_checksum() {
        let bytes = [0u8, 0, 0, 0, b'x'];
        let id = RecordId::from_prefixed(&bytes).unwrap();
        assert_eq!(id.to_string(), "x");
    }

    #[test]
    fn test_from_prefixed_accepts_bare_checksum() {
        let id = RecordId::from_prefixed(&[1, 2, 3, 4]).unwrap();
        assert!(id.identifier().is_empty());
        assert_eq!(id.to_string(), "");
    }

    #[test]
    fn test_from_prefixed_rejects_short_input() {
        let err = RecordId::from_prefixed(&[1, 2, 3]).unwrap_err();
        assert!(err.contains("at least 4 bytes"));
    }

    #[test]
    fn test_display_is_lossy_for_binary_ids() {
        let id = RecordId::from_identifier(vec![0xff, b'a']);
        assert_eq!(id.to_string(), "\u{fffd}a");
    }

    #[test]
    fn test_try_from_slice() {
        let bytes = RecordId::from_identifier(b"00002".to_vec()).to_prefixed_bytes();
        let id = RecordId::try_from(bytes.as_slice()).unwrap();
        assert_eq!(id.to_string(), "00002");
    }
}
