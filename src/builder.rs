//! Fluent construction: configure the memory/time tradeoff, then `build`.

use crate::error::Error;
use crate::fm_index::FMIndex;

/// Builds an [`FMIndex`], letting the caller trade memory for query speed
/// via `RANK_STRIDE` and `SA_STRIDE` before committing.
///
/// Default behavior (no configuration): both strides are `1`, i.e. no
/// sampling -- maximum performance, maximum memory.
///
/// ```rust
/// use bwt_fm_index::FMIndexBuilder;
///
/// let index = FMIndexBuilder::new().build(b"mississippi").unwrap();
/// assert_eq!(index.count(b"issi"), 2);
/// ```
///
/// A larger rank stride trades slower `count`/`locate` rank lookups for a
/// smaller rank table:
///
/// ```rust
/// use bwt_fm_index::FMIndexBuilder;
///
/// let index = FMIndexBuilder::new()
///     .rank_stride(4)
///     .sa_stride(4)
///     .build(b"mississippi")
///     .unwrap();
/// assert_eq!(index.count(b"issi"), 2);
/// ```
pub struct FMIndexBuilder {
    rank_stride: u32,
    sa_stride: u32,
}

impl FMIndexBuilder {
    pub fn new() -> Self {
        FMIndexBuilder {
            rank_stride: 1,
            sa_stride: 1,
        }
    }

    /// Set `RANK_STRIDE`: the rank table keeps one stored row per this many
    /// BWT rows. Must be `>= 1`; `1` means no sampling.
    pub fn rank_stride(mut self, stride: u32) -> Self {
        assert!(stride >= 1, "rank_stride must be >= 1");
        self.rank_stride = stride;
        self
    }

    /// Set `SA_STRIDE`: the suffix array keeps one stored entry per this
    /// many rows. Must be `>= 1`; `1` means no sampling.
    pub fn sa_stride(mut self, stride: u32) -> Self {
        assert!(stride >= 1, "sa_stride must be >= 1");
        self.sa_stride = stride;
        self
    }

    /// Build the index over `text`.
    pub fn build(self, text: &[u8]) -> Result<FMIndex, Error> {
        FMIndex::build_with_strides(text, self.rank_stride, self.sa_stride)
    }
}

impl Default for FMIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}
