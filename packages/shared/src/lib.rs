// Shared types and utilities for the trust ledger contracts on CosmWasm

use std::collections::HashSet;

use cosmwasm_schema::cw_serde;

/// Maximum byte length of names and type tags
pub const MAX_LABEL_LEN: usize = 64;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 30;

/// Stable numeric error tags surfaced to the host.
///
/// The numbers are part of the external interface: `Unauthorized` and
/// `AlreadyExists` carry the values used by historical transactions.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum ErrorCode {
    Unauthorized,
    AlreadyExists,
    NotFound,
    RequirementsNotMet,
    InvalidInput,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        match self {
            ErrorCode::Unauthorized => 1,
            ErrorCode::AlreadyExists => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::RequirementsNotMet => 4,
            ErrorCode::InvalidInput => 5,
        }
    }
}

// Common helper functions

/// A record expiring at `expiration` is still live during that block.
pub fn is_expired(current_height: u64, expiration: u64) -> bool {
    current_height > expiration
}

/// Non-empty and at most `MAX_LABEL_LEN` bytes
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.len() <= MAX_LABEL_LEN
}

/// Ordered-set check for caller-supplied tag lists
pub fn has_duplicates(labels: &[String]) -> bool {
    let unique: HashSet<&str> = labels.iter().map(String::as_str).collect();
    unique.len() != labels.len()
}

/// Clamp a pagination limit to `MAX_LIMIT`
pub fn page_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expired() {
        assert!(!is_expired(100, 1000));
        assert!(!is_expired(1000, 1000)); // expiration block itself is live
        assert!(is_expired(1001, 1000));
    }

    #[test]
    fn test_error_code_tags() {
        assert_eq!(ErrorCode::Unauthorized.as_u32(), 1);
        assert_eq!(ErrorCode::AlreadyExists.as_u32(), 2);
        assert_eq!(ErrorCode::NotFound.as_u32(), 3);
        assert_eq!(ErrorCode::RequirementsNotMet.as_u32(), 4);
        assert_eq!(ErrorCode::InvalidInput.as_u32(), 5);
    }

    #[test]
    fn test_labels() {
        assert!(is_valid_label("kyc-basic"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label(&"x".repeat(MAX_LABEL_LEN + 1)));
    }

    #[test]
    fn test_has_duplicates() {
        let tags = vec!["savings".to_string(), "loans".to_string()];
        assert!(!has_duplicates(&tags));
        let tags = vec!["savings".to_string(), "savings".to_string()];
        assert!(has_duplicates(&tags));
    }

    #[test]
    fn test_page_limit() {
        assert_eq!(page_limit(None), 10);
        assert_eq!(page_limit(Some(5)), 5);
        assert_eq!(page_limit(Some(500)), 30);
    }
}
