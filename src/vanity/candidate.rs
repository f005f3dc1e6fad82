//! Per-worker candidate construction.
//!
//! A `Scratch` is a private copy of the template buffer that a worker
//! rewrites in place for each delta pair. Both adjusted timestamps are
//! validated against their fixed field widths before either byte is
//! written, so the buffer never holds a half-applied or truncated value
//! and never grows or shrinks.

use super::commit::{CommitTemplate, TimestampField};
use super::errors::FieldOverflow;

/// Reusable candidate buffer, owned by exactly one worker.
pub struct Scratch {
    buf: Vec<u8>,
}

impl Scratch {
    /// Copies the template into a fresh scratch buffer.
    #[must_use]
    pub fn new(template: &CommitTemplate) -> Self {
        Self {
            buf: template.bytes().to_vec(),
        }
    }

    /// Rewrites both timestamp fields for the given deltas.
    ///
    /// Fails with `FieldOverflow` when an adjusted value would not render
    /// at its field's fixed width (including any negative value); the
    /// candidate is skipped and no byte is written.
    pub fn apply(
        &mut self,
        template: &CommitTemplate,
        delta_author: i64,
        delta_committer: i64,
    ) -> Result<(), FieldOverflow> {
        let author = template.author();
        let committer = template.committer();
        let author_value = shifted(author, delta_author)?;
        let committer_value = shifted(committer, delta_committer)?;
        write_decimal(
            &mut self.buf[author.offset..author.offset + author.width],
            author_value,
        );
        write_decimal(
            &mut self.buf[committer.offset..committer.offset + committer.width],
            committer_value,
        );
        Ok(())
    }

    /// Current candidate bytes, framed, same length as the template.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// Applies `delta` and checks the result still renders at `field.width`.
fn shifted(field: TimestampField, delta: i64) -> Result<i64, FieldOverflow> {
    let overflow = |value| FieldOverflow {
        value,
        width: field.width,
    };
    let value = field
        .value
        .checked_add(delta)
        .ok_or_else(|| overflow(field.value.saturating_add(delta)))?;
    if value < 0 || decimal_width(value) != field.width {
        return Err(overflow(value));
    }
    Ok(value)
}

/// Decimal digit count of a non-negative value.
fn decimal_width(mut value: i64) -> usize {
    debug_assert!(value >= 0);
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}

/// Renders `value` right-to-left into the full field slice.
///
/// Precondition: `value` has exactly `dst.len()` decimal digits.
fn write_decimal(dst: &mut [u8], mut value: i64) {
    for slot in dst.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
    debug_assert_eq!(value, 0);
}
