//! Vanity commit miner CLI.
//!
//! Rewrites the current `HEAD` commit so its SHA-1 object hash starts with
//! the given hex prefix, perturbing only the author/committer timestamps.
//! With no pattern argument, the target comes from `git config vain.default`.
//!
//! # Output Format
//!
//! Progress (`khash: N`) goes to stderr; the final report goes to stdout.
//!
//! # Exit Codes
//!
//! - `0`: match found (and head rewritten unless `--dry-run`)
//! - `1`: fatal error (malformed commit, bad pattern, verification
//!   mismatch, backend failure)
//! - `2`: invalid arguments
//! - `3`: search space exhausted without a match

use std::env;
use std::process;

use vanity_rs::vanity::{
    finalize, search, Backend, CommitTemplate, GitCli, HexPattern, SearchConfig, SearchOutcome,
    Sign, StderrProgress,
};

const EXIT_FATAL: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_EXHAUSTED: i32 = 3;

fn print_usage(exe: &str) {
    eprintln!(
        "usage: {exe} [OPTIONS] [PATTERN]

    PATTERN                 target hex prefix, 1-16 digits
                            (default: `git config vain.default`)

OPTIONS:
    --dry-run               search and report, do not rewrite history
    --radius=<N>            spiral search radius (default: 3600)
    --workers=<N>           worker thread count (default: 8)
    --subtract-committer    negate the committer delta sign
    --help, -h              show this help message"
    );
}

struct Args {
    pattern: Option<String>,
    dry_run: bool,
    config: SearchConfig,
}

fn parse_args(exe: &str) -> Result<Args, i32> {
    let mut args = Args {
        pattern: None,
        dry_run: false,
        config: SearchConfig::default(),
    };
    for arg in env::args().skip(1) {
        if arg == "--help" || arg == "-h" {
            print_usage(exe);
            return Err(0);
        } else if arg == "--dry-run" {
            args.dry_run = true;
        } else if arg == "--subtract-committer" {
            args.config.committer_sign = Sign::Minus;
        } else if let Some(value) = arg.strip_prefix("--radius=") {
            match value.parse::<u32>() {
                Ok(radius) if radius > 0 => args.config.radius = radius,
                _ => {
                    eprintln!("invalid --radius value: {value}");
                    return Err(EXIT_USAGE);
                }
            }
        } else if let Some(value) = arg.strip_prefix("--workers=") {
            match value.parse::<usize>() {
                Ok(workers) if workers > 0 => args.config.workers = workers,
                _ => {
                    eprintln!("invalid --workers value: {value}");
                    return Err(EXIT_USAGE);
                }
            }
        } else if arg.starts_with('-') {
            eprintln!("unknown option: {arg}");
            print_usage(exe);
            return Err(EXIT_USAGE);
        } else if args.pattern.is_none() {
            args.pattern = Some(arg);
        } else {
            eprintln!("too many arguments");
            print_usage(exe);
            return Err(EXIT_USAGE);
        }
    }
    Ok(args)
}

fn run(exe: &str) -> i32 {
    let args = match parse_args(exe) {
        Ok(args) => args,
        Err(code) => return code,
    };

    let backend = GitCli::new(".");

    let raw_pattern = match args.pattern {
        Some(pattern) => pattern,
        None => match backend.config_default_pattern() {
            Ok(Some(pattern)) => pattern,
            Ok(None) => {
                eprintln!("no pattern given and vain.default is not configured");
                return EXIT_USAGE;
            }
            Err(err) => {
                eprintln!("{err}");
                return EXIT_FATAL;
            }
        },
    };
    let pattern = match HexPattern::parse(&raw_pattern) {
        Ok(pattern) => pattern,
        Err(err) => {
            eprintln!("{err}");
            return EXIT_FATAL;
        }
    };

    let raw = match backend.read_head_commit() {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("{err}");
            return EXIT_FATAL;
        }
    };
    let template = match CommitTemplate::parse(&raw) {
        Ok(template) => template,
        Err(err) => {
            eprintln!("{err}");
            return EXIT_FATAL;
        }
    };

    eprintln!("searching for: {pattern}");
    let progress = StderrProgress::stderr();
    let outcome = search(&template, &pattern, &args.config, &progress);
    // Close the in-place progress line before any further output.
    progress.finish();

    match outcome {
        SearchOutcome::Found(result) => {
            match finalize(&backend, &template, &result, args.dry_run) {
                Ok(report) => {
                    println!("{report}");
                    0
                }
                Err(err) => {
                    eprintln!("{err}");
                    EXIT_FATAL
                }
            }
        }
        SearchOutcome::Exhausted { tested } => {
            eprintln!("search space exhausted after {tested} evaluations");
            EXIT_EXHAUSTED
        }
    }
}

fn main() {
    let exe = env::args().next().unwrap_or_else(|| "vanity-rs".into());
    process::exit(run(&exe));
}
