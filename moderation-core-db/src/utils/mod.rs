use std::hash::Hasher;

use heapless::String as HeaplessString;
use serde::Serialize;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and
/// XxHash64.
///
/// Stable across runs and systems: CBOR is a deterministic binary
/// representation and the hasher is seeded with a fixed 0.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Hash of a target name normalized for case-insensitive matching.
///
/// Escalation treats "Alice" and "alice" as the same target; every
/// target-keyed lock goes through this normalization.
pub fn target_name_hash(target_name: &str) -> i64 {
    // Serializing a plain string cannot fail; the fallback key only
    // matters for keeping the signature infallible.
    hash_as_i64(&normalize_target_name(target_name)).unwrap_or(0)
}

/// Lowercase form of a target name used for case-insensitive comparison.
pub fn normalize_target_name(target_name: &str) -> String {
    target_name.to_lowercase()
}

/// Copies a str into a bounded string, truncating on a char boundary when
/// the input exceeds the capacity.
pub fn bounded<const N: usize>(s: &str) -> HeaplessString<N> {
    let mut out = HeaplessString::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_name_hash_ignores_case() {
        assert_eq!(target_name_hash("Alice"), target_name_hash("aLiCe"));
        assert_ne!(target_name_hash("alice"), target_name_hash("bob"));
    }

    #[test]
    fn test_hash_as_i64_is_stable_for_equal_input() {
        let first = hash_as_i64(&"EMP-12345").expect("hash");
        let second = hash_as_i64(&"EMP-12345").expect("hash");
        assert_eq!(first, second);
    }

    #[test]
    fn test_bounded_truncates_oversized_input() {
        let out: HeaplessString<4> = bounded("overflow");
        assert_eq!(out.as_str(), "over");

        let short: HeaplessString<16> = bounded("fits");
        assert_eq!(short.as_str(), "fits");
    }
}
