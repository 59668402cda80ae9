//! Content hashing for interning tables.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Seed mixed into every content hash produced by [`hash_content`].
pub const DEFAULT_SEED: u64 = 0x51_7c_c1_b7_27_22_0a_95;

/// Hash a slice by value.
///
/// The length is hashed before the elements, so `[]` and `[x]` never share a
/// prefix collision with longer slices. Two slices that compare equal always
/// hash equal regardless of where they are stored.
pub fn hash_content<E: Hash>(seed: u64, content: &[E]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_content_equal_hash() {
        let a = vec![1u32, 2, 3];
        let b = [1u32, 2, 3];
        assert_eq!(hash_content(DEFAULT_SEED, &a), hash_content(DEFAULT_SEED, &b));
    }

    #[test]
    fn length_participates() {
        assert_ne!(
            hash_content::<u32>(DEFAULT_SEED, &[]),
            hash_content(DEFAULT_SEED, &[0u32])
        );
    }

    #[test]
    fn seed_participates() {
        assert_ne!(hash_content(1, &[7u8]), hash_content(2, &[7u8]));
    }
}
