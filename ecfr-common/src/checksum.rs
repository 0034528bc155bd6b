//! Content checksum per authority

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreResult;
use crate::model::CanonicalTable;

/// Checksum result for one authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityChecksum {
    pub authority: String,
    /// Lowercase hex SHA-256, 64 characters
    pub checksum: String,
}

/// SHA-256 over the text of every record sharing one authority
pub struct ChecksumEngine<'a> {
    table: &'a CanonicalTable,
}

impl<'a> ChecksumEngine<'a> {
    pub fn new(table: &'a CanonicalTable) -> Self {
        Self { table }
    }

    /// Hash of the matching texts joined by single spaces, in table order
    ///
    /// Matching is exact and case-sensitive. Records without text contribute
    /// an empty string. No matches hashes the empty string.
    pub fn checksum(&self, authority: &str) -> CoreResult<AuthorityChecksum> {
        let schema = self.table.schema();
        schema.require_authority()?;
        schema.require_text()?;

        let mut hasher = Sha256::new();
        let matching = self
            .table
            .records()
            .iter()
            .filter(|r| r.authority.as_deref() == Some(authority));
        for (i, record) in matching.enumerate() {
            if i > 0 {
                hasher.update(b" ");
            }
            hasher.update(record.text.as_deref().unwrap_or_default().as_bytes());
        }

        Ok(AuthorityChecksum {
            authority: authority.to_string(),
            checksum: format!("{:x}", hasher.finalize()),
        })
    }
}
