//! Component B: the suffix array of `T$`, and its sampled form.
//!
//! Construction is a plain comparison sort of the rotations by suffix order.
//! Any algorithm that produces the identical permutation (SA-IS, DC3,
//! libdivsufsort) is an acceptable substitute; this crate takes the simple,
//! obviously-correct route rather than an asymptotically faster one.

pub mod sample;

use crate::error::Error;

/// Build the full suffix array of `text ∥ $`.
///
/// Returns a permutation of `[0, n]` of length `n + 1`, `sa[0]` always being
/// `n` (the position of the sentinel, which sorts before everything else).
pub fn build(text: &[u8]) -> Result<Vec<u32>, Error> {
    let n = text.len();

    let mut sa: Vec<u32> = Vec::new();
    sa.try_reserve_exact(n + 1).map_err(|_| Error::OutOfMemory)?;
    sa.extend(0..=n as u32);

    // Compare suffixes of the virtual string `text ∥ $`, where `$` sorts
    // before every byte of `text`. Suffix `n` (the sentinel alone) is the
    // unique shortest suffix and always compares smallest.
    sa.sort_unstable_by(|&a, &b| compare_suffixes(text, a as usize, b as usize));

    Ok(sa)
}

fn compare_suffixes(text: &[u8], a: usize, b: usize) -> std::cmp::Ordering {
    if a == b {
        return std::cmp::Ordering::Equal;
    }
    let n = text.len();
    let sa = &text[a.min(n)..];
    let sb = &text[b.min(n)..];
    // Suffix `a == n` is the empty slice, which compares as smallest under
    // ordinary slice `Ord` — matching the sentinel ordering rule exactly.
    sa.cmp(sb)
}
