//! Vanity hash mining pipeline modules.
//!
//! The commit module parses the raw `HEAD` object into an immutable
//! template: framed bytes plus the offsets, values, and widths of the two
//! timestamp fields. The search module fans the spiral-ordered delta space
//! out across worker threads racing to a shared stop flag. The finalize
//! module cross-checks the winning candidate against the backend's own
//! hash computation before any history rewrite.
//!
//! # Invariants
//! - The template buffer is never mutated after parse; workers mutate
//!   private scratch copies only.
//! - Every candidate has the same byte length as the template.
//! - At most one worker claims the stop flag per run.

pub mod backend;
pub mod candidate;
pub mod commit;
pub mod digest;
pub mod errors;
pub mod finalize;
pub mod pattern;
pub mod progress;
pub mod search;
pub mod spiral;

pub use backend::{Backend, GitCli};
pub use candidate::Scratch;
pub use commit::{CommitTemplate, TimestampField};
pub use digest::{digest_full, to_hex, DigestPrefix, DIGEST_LEN};
pub use errors::{BackendError, FieldOverflow, FinalizeError, ParseError, PatternError};
pub use finalize::{finalize, Report};
pub use pattern::HexPattern;
pub use progress::{LineProgress, ProgressSink, SilentProgress, StderrProgress};
pub use search::{search, MatchResult, SearchConfig, SearchOutcome, Sign};
pub use spiral::{delta_pair, spiral_max};
