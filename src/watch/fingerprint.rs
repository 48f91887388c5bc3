//! Content fingerprinting for change detection.

use sha2::{Digest, Sha256};

/// Compute a stable hex digest of fetched text.
///
/// Equal input always yields an equal digest; different input yields a
/// different digest with overwhelming probability.
pub fn fingerprint(raw_text: &str) -> String {
    format!("{:x}", Sha256::digest(raw_text.as_bytes()))
}
