//! Verification and head rewrite for a winning candidate.
//!
//! Invoked at most once per run by the coordinator's caller. The backend
//! independently hashes the staged body and the result is compared
//! byte-for-byte against our digest before any destructive step; a local
//! miscomputation must never rewrite history under a false belief of
//! matching. Dry runs stop after building the report.

use std::fmt;

use super::backend::Backend;
use super::commit::CommitTemplate;
use super::digest::to_hex;
use super::errors::FinalizeError;
use super::search::MatchResult;

/// Human-readable summary of an accepted candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Delta applied to the author timestamp.
    pub delta_author: i64,
    /// Delta applied to the committer timestamp.
    pub delta_committer: i64,
    /// The matching digest, lowercase hex.
    pub digest_hex: String,
    /// Candidates evaluated when the match was claimed.
    pub tested: u64,
    /// Whether the backend head was rewritten (false for dry runs).
    pub rewritten: bool,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "delta author: {}, delta committer: {}, evaluated: {}",
            self.delta_author, self.delta_committer, self.tested
        )?;
        write!(f, "{}", self.digest_hex)?;
        if self.rewritten {
            write!(f, "\nhead rewritten")?;
        }
        Ok(())
    }
}

/// Verifies the winning candidate and, unless `dry_run`, rewrites the head.
///
/// The staged object is the unframed body: the backend re-adds its own
/// framing when hashing, which makes the cross-check cover our framing
/// bytes as well.
pub fn finalize<B: Backend + ?Sized>(
    backend: &B,
    template: &CommitTemplate,
    result: &MatchResult,
    dry_run: bool,
) -> Result<Report, FinalizeError> {
    let digest_hex = to_hex(&result.digest);
    let mut report = Report {
        delta_author: result.delta_author,
        delta_committer: result.delta_committer,
        digest_hex,
        tested: result.tested,
        rewritten: false,
    };
    if dry_run {
        return Ok(report);
    }

    let body = &result.commit[template.header_len()..];
    let backend_hex = backend.hash_object(body)?;
    if backend_hex != report.digest_hex {
        return Err(FinalizeError::VerificationMismatch {
            local: report.digest_hex,
            backend: backend_hex,
        });
    }

    backend.rewrite_head(body)?;
    report.rewritten = true;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::vanity::digest::{digest_full, DIGEST_LEN};
    use crate::vanity::errors::BackendError;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        HashObject(Vec<u8>),
        RewriteHead(Vec<u8>),
    }

    /// Scripted backend that records calls.
    struct FakeBackend {
        calls: Mutex<Vec<Call>>,
        hash_reply: Option<String>,
        fail_rewrite: bool,
    }

    impl FakeBackend {
        fn agreeing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                hash_reply: None,
                fail_rewrite: false,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().drain(..).collect()
        }
    }

    impl Backend for FakeBackend {
        fn read_head_commit(&self) -> Result<Vec<u8>, BackendError> {
            unreachable!("finalize never reads the head");
        }

        fn hash_object(&self, body: &[u8]) -> Result<String, BackendError> {
            self.calls.lock().unwrap().push(Call::HashObject(body.to_vec()));
            match &self.hash_reply {
                Some(reply) => Ok(reply.clone()),
                // Recompute the framed hash like git would.
                None => {
                    let framed = [format!("commit {}\0", body.len()).into_bytes(), body.to_vec()]
                        .concat();
                    Ok(to_hex(&digest_full(&framed)))
                }
            }
        }

        fn rewrite_head(&self, body: &[u8]) -> Result<(), BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::RewriteHead(body.to_vec()));
            if self.fail_rewrite {
                return Err(BackendError::CommandFailed {
                    action: "reset --soft HEAD^",
                    status: Some(128),
                    stderr: "refusing".into(),
                });
            }
            Ok(())
        }
    }

    fn fixture() -> (CommitTemplate, MatchResult) {
        let raw = b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
                    author a <a@a> 1000000000 +0000\n\
                    committer c <c@c> 1000000500 +0000\n\
                    \nmsg\n";
        let template = CommitTemplate::parse(raw).unwrap();
        let result = MatchResult {
            delta_author: 0,
            delta_committer: 0,
            commit: template.bytes().to_vec(),
            digest: digest_full(template.bytes()),
            tested: 1,
        };
        (template, result)
    }

    #[test]
    fn dry_run_touches_nothing() {
        let (template, result) = fixture();
        let backend = FakeBackend::agreeing();
        let report = finalize(&backend, &template, &result, true).unwrap();
        assert!(!report.rewritten);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn live_run_verifies_then_rewrites() {
        let (template, result) = fixture();
        let backend = FakeBackend::agreeing();
        let report = finalize(&backend, &template, &result, false).unwrap();
        assert!(report.rewritten);
        assert_eq!(report.digest_hex, to_hex(&result.digest));

        let body = template.body().to_vec();
        assert_eq!(
            backend.calls(),
            vec![Call::HashObject(body.clone()), Call::RewriteHead(body)]
        );
    }

    #[test]
    fn mismatch_aborts_before_rewrite() {
        let (template, result) = fixture();
        let backend = FakeBackend {
            hash_reply: Some("f".repeat(DIGEST_LEN * 2)),
            ..FakeBackend::agreeing()
        };
        let err = finalize(&backend, &template, &result, false).unwrap_err();
        assert!(matches!(err, FinalizeError::VerificationMismatch { .. }));
        // Only the hash call; the rewrite never ran.
        assert_eq!(
            backend.calls(),
            vec![Call::HashObject(template.body().to_vec())]
        );
    }

    #[test]
    fn rewrite_failure_surfaces() {
        let (template, result) = fixture();
        let backend = FakeBackend {
            fail_rewrite: true,
            ..FakeBackend::agreeing()
        };
        let err = finalize(&backend, &template, &result, false).unwrap_err();
        assert!(matches!(err, FinalizeError::Backend(_)));
    }

    #[test]
    fn report_renders_summary() {
        let report = Report {
            delta_author: 3,
            delta_committer: -2,
            digest_hex: "abc123".into(),
            tested: 42,
            rewritten: false,
        };
        let text = report.to_string();
        assert!(text.contains("delta author: 3"));
        assert!(text.contains("delta committer: -2"));
        assert!(text.contains("evaluated: 42"));
        assert!(text.ends_with("abc123"));
    }
}
