//! Multi-worker search coordinator.
//!
//! Partitions the spiral index space across a fixed pool of threads by
//! residue class: worker `i` of `k` visits `n = i+1, i+1+k, i+1+2k, ...`.
//! The classes are disjoint and cover the space, so there is no work queue
//! and no rebalancing.
//!
//! Workers share three read-only inputs (template, midstate, pattern) and
//! two relaxed atomics: the stop flag and the advisory evaluation counter.
//! The flag is monotone; at most one worker wins the false-to-true
//! `compare_exchange` and stores the result. A second concurrent discovery
//! in the window before the flag becomes visible simply loses the claim
//! and is discarded.
//!
//! # Termination
//! Either some worker claims the flag (`Found`) or every worker walks its
//! residue class to `spiral_max(radius)` without a match (`Exhausted`).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

use super::candidate::Scratch;
use super::commit::CommitTemplate;
use super::digest::{DigestPrefix, DIGEST_LEN};
use super::pattern::HexPattern;
use super::progress::ProgressSink;
use super::spiral::{delta_pair, spiral_max};

/// How often a worker surfaces the shared counter, in evaluations.
const PROGRESS_INTERVAL: u64 = 5000;

/// Sign convention for the committer delta relative to the spiral's `y`.
///
/// Historic implementations disagree on whether `y` is added or
/// subtracted; the convention is explicit here and pinned by tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sign {
    /// Δcommitter = +y.
    #[default]
    Plus,
    /// Δcommitter = -y.
    Minus,
}

impl Sign {
    #[inline]
    fn apply(self, y: i64) -> i64 {
        match self {
            Self::Plus => y,
            Self::Minus => -y,
        }
    }
}

/// Search tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Worker thread count.
    pub workers: usize,
    /// Spiral radius: deltas range over `[-radius, radius]` per axis.
    pub radius: u32,
    /// Committer delta sign convention.
    pub committer_sign: Sign,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            radius: 3600,
            committer_sign: Sign::Plus,
        }
    }
}

/// The winning candidate of a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// Delta applied to the author timestamp.
    pub delta_author: i64,
    /// Delta applied to the committer timestamp (sign convention applied).
    pub delta_committer: i64,
    /// The framed candidate bytes whose digest matched.
    pub commit: Vec<u8>,
    /// The matching digest.
    pub digest: [u8; DIGEST_LEN],
    /// Evaluation counter snapshot at claim time.
    pub tested: u64,
}

/// Terminal outcome of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A worker claimed the stop flag with this candidate.
    Found(Box<MatchResult>),
    /// Every worker exhausted its residue class without a match.
    Exhausted {
        /// Total candidates evaluated.
        tested: u64,
    },
}

/// Runs the search to completion.
///
/// Spawns `config.workers` scoped threads and blocks until the space is
/// exhausted or a match is claimed. A zero worker count is treated as one.
pub fn search(
    template: &CommitTemplate,
    pattern: &HexPattern,
    config: &SearchConfig,
    progress: &dyn ProgressSink,
) -> SearchOutcome {
    let workers = config.workers.max(1);
    let max = spiral_max(config.radius);
    let prefix = DigestPrefix::new(template.bytes(), template.mutable_start());

    let found = AtomicBool::new(false);
    let tested = AtomicU64::new(0);
    let winner: Mutex<Option<MatchResult>> = Mutex::new(None);

    thread::scope(|scope| {
        let found = &found;
        let tested = &tested;
        let winner = &winner;
        let prefix = &prefix;
        for worker in 0..workers {
            scope.spawn(move || {
                run_worker(WorkerCtx {
                    template,
                    pattern,
                    prefix,
                    progress,
                    found,
                    tested,
                    winner,
                    sign: config.committer_sign,
                    first: worker as u64 + 1,
                    step: workers as u64,
                    max,
                });
            });
        }
    });

    let tested = tested.into_inner();
    match winner.into_inner().unwrap_or_else(|poison| poison.into_inner()) {
        Some(result) => SearchOutcome::Found(Box::new(result)),
        None => SearchOutcome::Exhausted { tested },
    }
}

struct WorkerCtx<'a> {
    template: &'a CommitTemplate,
    pattern: &'a HexPattern,
    prefix: &'a DigestPrefix,
    progress: &'a dyn ProgressSink,
    found: &'a AtomicBool,
    tested: &'a AtomicU64,
    winner: &'a Mutex<Option<MatchResult>>,
    sign: Sign,
    first: u64,
    step: u64,
    max: u64,
}

fn run_worker(ctx: WorkerCtx<'_>) {
    let mut scratch = Scratch::new(ctx.template);
    let split = ctx.prefix.split();

    let mut n = ctx.first;
    while n <= ctx.max {
        // Relaxed is enough: the flag is monotone and a short overrun
        // after another worker's claim only wastes a few evaluations.
        if ctx.found.load(Ordering::Relaxed) {
            return;
        }

        let total = ctx.tested.fetch_add(1, Ordering::Relaxed) + 1;
        if total % PROGRESS_INTERVAL == 0 {
            ctx.progress.evaluated(total);
        }

        let (dx, dy) = delta_pair(n);
        let dc = ctx.sign.apply(dy);
        if scratch.apply(ctx.template, dx, dc).is_ok() {
            let digest = ctx.prefix.digest_suffix(&scratch.bytes()[split..]);
            if ctx.pattern.matches(&digest) {
                claim(&ctx, &scratch, digest, dx, dc);
                return;
            }
        }

        n += ctx.step;
    }
}

/// First writer wins; a losing discovery is discarded.
fn claim(ctx: &WorkerCtx<'_>, scratch: &Scratch, digest: [u8; DIGEST_LEN], dx: i64, dc: i64) {
    if ctx
        .found
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return;
    }
    let result = MatchResult {
        delta_author: dx,
        delta_committer: dc,
        commit: scratch.bytes().to_vec(),
        digest,
        tested: ctx.tested.load(Ordering::Relaxed),
    };
    let mut slot = ctx
        .winner
        .lock()
        .unwrap_or_else(|poison| poison.into_inner());
    *slot = Some(result);
}
