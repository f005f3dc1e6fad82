//! Target hash prefix pattern.
//!
//! A pattern is 1 to 16 hex digits, normalized to lowercase at parse time.
//! Matching compares the digest byte-by-byte for each full hex pair; an
//! odd-length pattern compares its final digit against the high nibble of
//! the next digest byte only.

use std::fmt;

use super::digest::DIGEST_LEN;
use super::errors::PatternError;

/// Maximum number of hex digits in a target pattern.
pub const MAX_NIBBLES: usize = 16;

/// A validated, lowercase hex prefix to match digests against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexPattern {
    /// Packed nibbles, high-first. An odd trailing nibble occupies the high
    /// half of its byte; the low half is zero.
    bytes: [u8; MAX_NIBBLES / 2],
    nibbles: usize,
}

impl HexPattern {
    /// Parses and normalizes a pattern string.
    ///
    /// Leading and trailing whitespace is ignored; uppercase hex digits are
    /// accepted and lowered.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PatternError::Empty);
        }
        if trimmed.len() > MAX_NIBBLES {
            return Err(PatternError::TooLong {
                len: trimmed.len(),
                max: MAX_NIBBLES,
            });
        }
        let mut bytes = [0u8; MAX_NIBBLES / 2];
        for (i, byte) in trimmed.bytes().enumerate() {
            let nibble = hex_nibble(byte).ok_or(PatternError::NonHex { byte })?;
            if i % 2 == 0 {
                bytes[i / 2] = nibble << 4;
            } else {
                bytes[i / 2] |= nibble;
            }
        }
        Ok(Self {
            bytes,
            nibbles: trimmed.len(),
        })
    }

    /// Number of hex digits in the pattern.
    #[inline]
    #[must_use]
    pub fn nibbles(&self) -> usize {
        self.nibbles
    }

    /// Tests whether `digest` starts with this pattern.
    ///
    /// Short-circuits on the first mismatching byte.
    #[inline]
    #[must_use]
    pub fn matches(&self, digest: &[u8; DIGEST_LEN]) -> bool {
        let full = self.nibbles / 2;
        if digest[..full] != self.bytes[..full] {
            return false;
        }
        if self.nibbles % 2 == 1 && digest[full] >> 4 != self.bytes[full] >> 4 {
            return false;
        }
        true
    }
}

impl fmt::Display for HexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        for i in 0..self.nibbles {
            let byte = self.bytes[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            write!(f, "{}", HEX[nibble as usize] as char)?;
        }
        Ok(())
    }
}

/// Decodes one hex digit, accepting both cases.
#[inline]
fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
