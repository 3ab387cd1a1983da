//! Whole-page change detection.
//!
//! A cycle whose records hash to the same digest as the last rendered cycle
//! is skipped without diffing or redrawing.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::models::MatchRecord;

/// Digest of an ordered record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Hash the records in order.
///
/// Each record is written as a JSON object with its keys sorted, so the
/// digest depends only on record order and field values.
pub fn fingerprint(records: &[MatchRecord]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(records).as_bytes());

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    Fingerprint(digest)
}

fn canonical_json(records: &[MatchRecord]) -> String {
    // serde_json::Value objects are BTreeMap-backed, so keys come out sorted
    serde_json::to_value(records)
        .map(|value| value.to_string())
        .unwrap_or_default()
}
