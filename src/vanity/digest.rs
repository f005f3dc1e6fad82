//! SHA-1 evaluation with a precomputed prefix midstate.
//!
//! Every candidate shares the same bytes up to the author timestamp field,
//! so that prefix is absorbed into a SHA-1 state exactly once per run.
//! Per-candidate work is a clone of that midstate plus the mutable suffix.
//! The midstate is owned here and only ever cloned out, so workers never
//! contend on it.

use sha1::{Digest, Sha1};

/// SHA-1 digest length in bytes.
pub const DIGEST_LEN: usize = 20;

/// Immutable SHA-1 state snapshot for the invariant prefix of a candidate.
#[derive(Clone)]
pub struct DigestPrefix {
    state: Sha1,
    split: usize,
}

impl DigestPrefix {
    /// Absorbs `buf[..split]` into a fresh state.
    ///
    /// `split` is the offset of the first mutable byte; callers pass the
    /// author timestamp offset.
    #[must_use]
    pub fn new(buf: &[u8], split: usize) -> Self {
        let mut state = Sha1::new();
        state.update(&buf[..split]);
        Self { state, split }
    }

    /// Offset this prefix was split at.
    #[inline]
    #[must_use]
    pub fn split(&self) -> usize {
        self.split
    }

    /// Finalizes a candidate digest from the mutable suffix.
    ///
    /// `suffix` must be the candidate bytes from the split offset through
    /// the end of the buffer. The shared midstate is cloned, never mutated.
    #[inline]
    #[must_use]
    pub fn digest_suffix(&self, suffix: &[u8]) -> [u8; DIGEST_LEN] {
        let mut state = self.state.clone();
        state.update(suffix);
        state.finalize().into()
    }
}

/// From-scratch SHA-1 over a whole buffer.
///
/// Used by the finalize path and as the reference side of the midstate
/// equivalence tests; never on the hot loop.
#[must_use]
pub fn digest_full(buf: &[u8]) -> [u8; DIGEST_LEN] {
    Sha1::digest(buf).into()
}

/// Renders a digest as lowercase hex.
#[must_use]
pub fn to_hex(digest: &[u8; DIGEST_LEN]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(DIGEST_LEN * 2);
    for byte in digest {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
