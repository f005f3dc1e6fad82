//! Property-based and exhaustive soundness tests.
//!
//! Run with: `cargo test --test property`

mod candidate_fields;
mod digest_equiv;
mod spiral_coverage;
