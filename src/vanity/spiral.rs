//! Square-spiral enumeration of the delta space.
//!
//! Maps a positive index `n` to an integer pair `(x, y)` on an expanding
//! square spiral around the origin. Ring `s` (Chebyshev distance `s` from
//! origin) covers indices `(2s-1)^2 ..= (2s+1)^2 - 1`, so the enumeration
//! visits pairs in non-decreasing Chebyshev distance: the smallest joint
//! timestamp perturbations are tried first.
//!
//! Pure functions, no shared state; safe to call concurrently from workers
//! over disjoint index ranges.

/// Returns the spiral coordinates for index `n` (`n >= 1`).
///
/// Ring `s = (isqrt(n)+1)/2`; the position within the ring selects one of
/// the four sides, each spanning `2s` points:
///
/// | side | coordinates |
/// |------|-------------|
/// | 0    | `( s,  e)`  |
/// | 1    | `(-e,  s)`  |
/// | 2    | `(-s, -e)`  |
/// | 3    | `( e, -s)`  |
///
/// where `e` runs over `-s+1 ..= s` along each side.
#[must_use]
pub fn delta_pair(n: u64) -> (i64, i64) {
    debug_assert!(n >= 1);
    let s = (isqrt(n) + 1) / 2;
    let lt = n - (2 * s - 1) * (2 * s - 1);
    let side = lt / (2 * s);
    let e = (lt - 2 * s * side) as i64 - s as i64 + 1;
    let s = s as i64;
    match side {
        0 => (s, e),
        1 => (-e, s),
        2 => (-s, -e),
        _ => (e, -s),
    }
}

/// Total number of enumerable indices for `radius`: `(2r+1)^2 - 1`.
///
/// Indices `1 ..= spiral_max(radius)` biject onto every integer pair with
/// `max(|x|, |y|) <= radius` except the origin.
#[must_use]
pub fn spiral_max(radius: u32) -> u64 {
    let side = 2 * u64::from(radius) + 1;
    // Saturate for absurd radii instead of wrapping.
    side.saturating_mul(side) - 1
}

/// Integer square root: largest `r` with `r * r <= n`.
///
/// Starts from the float estimate and corrects, so there is no rounding
/// drift at large `n`.
fn isqrt(n: u64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut r = (n as f64).sqrt() as u64;
    while r > 0 && r.checked_mul(r).is_none_or(|sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}
