//! Midstate-vs-full digest equivalence.
//!
//! The precomputed-prefix optimization must be observationally identical
//! to hashing every candidate from scratch. This is the consistency law
//! the whole hot loop leans on.

use proptest::prelude::*;

use vanity_rs::vanity::{digest_full, DigestPrefix};

proptest! {
    #[test]
    fn prefix_path_equals_full_path(
        buf in proptest::collection::vec(any::<u8>(), 1..2048),
        split_seed in any::<usize>(),
    ) {
        let split = split_seed % (buf.len() + 1);
        let prefix = DigestPrefix::new(&buf, split);
        prop_assert_eq!(prefix.digest_suffix(&buf[split..]), digest_full(&buf));
    }

    /// One midstate serves many suffixes: mutating bytes after the split
    /// must not require re-absorbing the prefix.
    #[test]
    fn midstate_is_candidate_independent(
        buf in proptest::collection::vec(any::<u8>(), 64..512),
        edits in proptest::collection::vec((any::<usize>(), any::<u8>()), 1..8),
    ) {
        let split = buf.len() / 2;
        let prefix = DigestPrefix::new(&buf, split);
        let mut candidate = buf.clone();
        for (pos, byte) in edits {
            let idx = split + pos % (buf.len() - split);
            candidate[idx] = byte;
        }
        prop_assert_eq!(
            prefix.digest_suffix(&candidate[split..]),
            digest_full(&candidate)
        );
    }
}
