//! Error types for the mining stages.
//!
//! Errors are stage-specific to keep diagnostics precise: parsing, pattern
//! validation, candidate rendering, backend plumbing, and finalization each
//! have their own type. All enums are `#[non_exhaustive]` so variants can be
//! added without breaking callers; consumers should include a fallback arm.
//!
//! # Design Notes
//! - `FieldOverflow` is the only recoverable kind: it rejects a single
//!   candidate whose timestamp would not render at the fixed field width,
//!   and the search moves on to the next spiral index.
//! - Backend errors preserve the failing git action and captured stderr so
//!   a failed subprocess is diagnosable from the message alone.
//! - `VerificationMismatch` carries both hex digests; it fires before any
//!   history-mutating step.

use std::fmt;
use std::io;

/// Errors from parsing a raw commit object.
///
/// All variants are fatal: no search is attempted on a commit whose
/// timestamp fields cannot be located.
#[derive(Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// No `author ` header line was found.
    MissingAuthor,
    /// No `committer ` header line was found.
    MissingCommitter,
    /// The header line has no `> ` email delimiter or no digits after it.
    MissingTimestamp { field: &'static str },
    /// The timestamp is not a decimal integer that fits in `i64`.
    InvalidTimestamp { field: &'static str },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAuthor => write!(f, "malformed commit: no author header"),
            Self::MissingCommitter => write!(f, "malformed commit: no committer header"),
            Self::MissingTimestamp { field } => {
                write!(f, "malformed commit: no timestamp on {field} header")
            }
            Self::InvalidTimestamp { field } => {
                write!(f, "malformed commit: invalid timestamp on {field} header")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors from target pattern validation.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PatternError {
    /// The pattern is empty after trimming.
    Empty,
    /// The pattern has more hex digits than a prefix can use.
    TooLong { len: usize, max: usize },
    /// The pattern contains a byte that is not a hex digit.
    NonHex { byte: u8 },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "target pattern is empty"),
            Self::TooLong { len, max } => {
                write!(f, "target pattern too long: {len} hex digits (max: {max})")
            }
            Self::NonHex { byte } => {
                write!(f, "target pattern must be all hex, got {:?}", *byte as char)
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// A single candidate's adjusted timestamp does not render at the fixed
/// field width.
///
/// Recoverable: the caller skips the candidate and continues. The scratch
/// buffer is never written with an out-of-width value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldOverflow {
    /// The adjusted timestamp value (saturated on `i64` overflow).
    pub value: i64,
    /// The fixed decimal width of the field.
    pub width: usize,
}

impl fmt::Display for FieldOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp {} does not fit field width {}",
            self.value, self.width
        )
    }
}

impl std::error::Error for FieldOverflow {}

/// Errors from the git subprocess backend.
#[derive(Debug)]
#[non_exhaustive]
pub enum BackendError {
    /// Spawning or talking to the subprocess failed.
    Io { action: &'static str, source: io::Error },
    /// The subprocess ran but exited unsuccessfully.
    CommandFailed {
        action: &'static str,
        status: Option<i32>,
        stderr: String,
    },
    /// The subprocess produced non-UTF-8 output where text was expected.
    InvalidUtf8 { action: &'static str },
}

impl BackendError {
    /// Creates an I/O variant tagged with the failing git action.
    #[inline]
    pub fn io(action: &'static str, source: io::Error) -> Self {
        Self::Io { action, source }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { action, source } => write!(f, "git {action}: {source}"),
            Self::CommandFailed {
                action,
                status,
                stderr,
            } => {
                write!(f, "git {action} failed")?;
                if let Some(code) = status {
                    write!(f, " (exit {code})")?;
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            Self::InvalidUtf8 { action } => {
                write!(f, "git {action} produced non-UTF-8 output")
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from finalizing a successful search.
#[derive(Debug)]
#[non_exhaustive]
pub enum FinalizeError {
    /// The backend's hash of the staged object disagrees with ours.
    ///
    /// Fatal before any destructive step: a local miscomputation must never
    /// rewrite history under a false belief of matching.
    VerificationMismatch { local: String, backend: String },
    /// The backend failed while verifying or rewriting the head.
    Backend(BackendError),
}

impl fmt::Display for FinalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerificationMismatch { local, backend } => write!(
                f,
                "staged commit hash differs from what git thinks\nours: {local}\ngit:  {backend}"
            ),
            Self::Backend(err) => write!(f, "backend failure: {err}"),
        }
    }
}

impl std::error::Error for FinalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for FinalizeError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}
