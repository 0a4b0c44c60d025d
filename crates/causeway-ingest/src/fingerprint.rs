//! Content fingerprinting for duplicate detection.

/// blake3 hex digest of the normalized text. Identical text always maps to
/// the same fingerprint; meaningfully different content collides only with
/// negligible probability.
pub fn fingerprint(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
