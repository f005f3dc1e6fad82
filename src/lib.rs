//! Vanity commit hash miner.
//!
//! ## Scope
//! This crate searches for a rewrite of a git commit object whose SHA-1
//! object hash starts with a caller-supplied hex prefix. Only the two
//! embedded Unix timestamps (author date, committer date) are perturbed,
//! by small integer deltas, so the commit's semantic content never changes.
//!
//! ## Key invariants
//! - Candidate buffers have the same length as the base commit; only the
//!   timestamp field bytes differ, overwritten in place at fixed width.
//! - The delta space is enumerated in square-spiral order, so candidates
//!   with the smallest joint perturbation are tried first.
//! - The SHA-1 state for the invariant prefix of the object is computed
//!   once per run and cloned per candidate, never re-absorbed.
//! - History is only rewritten after the git backend independently
//!   recomputes the hash of the staged object and agrees with ours.
//!
//! ## Search flow
//! 1) Read `HEAD` commit bytes and locate the two timestamp fields.
//! 2) Spawn N workers over disjoint residue classes of the spiral index.
//! 3) Each worker: render deltas into its scratch buffer, hash the mutable
//!    suffix on top of the shared midstate, test the prefix predicate.
//! 4) First worker to claim the shared stop flag owns the result; the
//!    finalizer verifies against the backend and rewrites `HEAD`.
//!
//! ## Notable entry points
//! - [`vanity::CommitTemplate`]: parsed commit with timestamp field offsets.
//! - [`vanity::search`]: the multi-worker coordinator.
//! - [`vanity::finalize`]: verification and head rewrite.
//! - [`vanity::GitCli`]: `git`-subprocess backend implementation.

pub mod vanity;

pub use vanity::{
    finalize, search, Backend, CommitTemplate, FinalizeError, GitCli, HexPattern, MatchResult,
    Report, SearchConfig, SearchOutcome,
};
