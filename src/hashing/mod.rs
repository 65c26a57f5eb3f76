//! Content-addressed cache keys.
//!
//! Identical text always maps to the same key and distinct text to different
//! keys, across processes. The full 256-bit digest is kept (hex-encoded) so
//! collision-driven cache corruption is not a practical concern; keys double
//! as the persisted blob's map keys and must stay stable across releases.

/// Returns the lowercase hex BLAKE3 digest of the exact UTF-8 bytes of `text`.
#[inline]
pub fn text_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
