//! Parser for the commit object under mutation.
//!
//! Takes the raw commit body (as printed by `git cat-file commit HEAD`),
//! prepends git's loose-object framing header `commit <len>\0`, and locates
//! the two timestamp fields inside the `author` and `committer` header
//! lines. The result is an immutable template: workers copy it into private
//! scratch buffers and only ever rewrite the timestamp field bytes.
//!
//! # Commit Object Format
//! ```text
//! tree <hex-oid>\n
//! parent <hex-oid>\n   (zero or more)
//! author <name> <email> <timestamp> <tz>\n
//! committer <name> <email> <timestamp> <tz>\n
//! \n
//! <message>
//! ```
//!
//! # Parsing Assumptions
//! - The timestamp is the run of decimal digits immediately after the `> `
//!   delimiter that closes the email field; names and emails may contain
//!   spaces, which is why the search keys off `> ` and not whitespace.
//! - The first `author `/`committer ` header lines win; header lines always
//!   precede the message, so a message line that happens to start with
//!   `author ` is never reached.
//!
//! # Invariants
//! - Field offsets index into the framed buffer, not the raw body.
//! - Field widths are fixed at parse time. Candidates are validated against
//!   the recorded width and skipped on mismatch, never truncated.

use memchr::{memchr, memmem};

use super::errors::ParseError;

/// One mutable timestamp field inside the framed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampField {
    /// Byte offset of the first decimal digit, relative to the framed buffer.
    pub offset: usize,
    /// Original timestamp value.
    pub value: i64,
    /// Decimal digit count of the original rendering; fixed for the run.
    pub width: usize,
}

/// A parsed commit with the framing header attached.
///
/// Immutable after parse. The buffer is the exact byte sequence git hashes
/// for this object: `commit <body-len>\0` followed by the raw body.
#[derive(Clone, Debug)]
pub struct CommitTemplate {
    buf: Vec<u8>,
    header_len: usize,
    author: TimestampField,
    committer: TimestampField,
}

impl CommitTemplate {
    /// Parses the raw commit body and locates both timestamp fields.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let header = format!("commit {}\0", raw.len());
        let header_len = header.len();
        let mut buf = Vec::with_capacity(header_len + raw.len());
        buf.extend_from_slice(header.as_bytes());
        buf.extend_from_slice(raw);

        let author = locate_field(&buf, header_len, "author")?;
        let committer = locate_field(&buf, header_len, "committer")?;
        Ok(Self {
            buf,
            header_len,
            author,
            committer,
        })
    }

    /// The framed bytes, exactly what SHA-1 runs over.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Length of the `commit <len>\0` framing header.
    #[inline]
    #[must_use]
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// The raw body without framing, what the backend stores.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.buf[self.header_len..]
    }

    /// The author timestamp field.
    #[inline]
    #[must_use]
    pub fn author(&self) -> TimestampField {
        self.author
    }

    /// The committer timestamp field.
    #[inline]
    #[must_use]
    pub fn committer(&self) -> TimestampField {
        self.committer
    }

    /// Offset of the first byte any candidate may differ at.
    ///
    /// Everything before this is the invariant digest prefix.
    #[inline]
    #[must_use]
    pub fn mutable_start(&self) -> usize {
        self.author.offset.min(self.committer.offset)
    }
}

/// Finds the `<name> ` header line and extracts its timestamp field.
fn locate_field(buf: &[u8], header_len: usize, name: &'static str) -> Result<TimestampField, ParseError> {
    let missing = || match name {
        "author" => ParseError::MissingAuthor,
        _ => ParseError::MissingCommitter,
    };
    let body = &buf[header_len..];
    let marker = format!("{name} ");

    let line_start = if body.starts_with(marker.as_bytes()) {
        header_len
    } else {
        let needle = format!("\n{marker}");
        let pos = memmem::find(body, needle.as_bytes()).ok_or_else(missing)?;
        header_len + pos + 1
    };

    let line = &buf[line_start..];
    let line_end = memchr(b'\n', line).unwrap_or(line.len());
    let line = &line[..line_end];

    // The `> ` after the email closes the identity; digits follow.
    let digits_at = memmem::find(line, b"> ")
        .map(|pos| pos + 2)
        .ok_or(ParseError::MissingTimestamp { field: name })?;

    let digits = &line[digits_at..];
    let width = digits
        .iter()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(digits.len());
    if width == 0 {
        return Err(ParseError::MissingTimestamp { field: name });
    }

    let mut value: i64 = 0;
    for &byte in &digits[..width] {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(byte - b'0')))
            .ok_or(ParseError::InvalidTimestamp { field: name })?;
    }

    Ok(TimestampField {
        offset: line_start + digits_at,
        value,
        width,
    })
}
