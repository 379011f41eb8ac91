//! Component E: the facade that owns the alphabet, BWT, ranges, rank table
//! and sampled suffix array, and answers `count`/`locate` queries.

use crate::align::ByteStorage;
use crate::alphabet::Alphabet;
use crate::bwt;
use crate::error::Error;
use crate::rank::{CharRanges, RankTable};
use crate::suffix_array::{self, sample::SampledSuffixArray};

/// An immutable, compressed full-text index over a single text.
///
/// Build one with [`crate::FMIndexBuilder`], or directly via [`FMIndex::build`]
/// for the default strides. `FMIndex` is `Send + Sync`: once built, any
/// number of threads may call [`count`](FMIndex::count) and
/// [`locate`](FMIndex::locate) concurrently without synchronisation.
pub struct FMIndex {
    alphabet: Alphabet,
    bwt: ByteStorage,
    ranges: CharRanges,
    ranks: RankTable,
    sa: SampledSuffixArray,
}

impl FMIndex {
    /// Build an index over `text` with the default strides (`RANK_STRIDE =
    /// SA_STRIDE = 1`, i.e. no sampling). Use
    /// [`crate::FMIndexBuilder`] to configure the memory/time tradeoff.
    pub fn build(text: &[u8]) -> Result<Self, Error> {
        Self::build_with_strides(text, 1, 1)
    }

    pub(crate) fn build_with_strides(
        text: &[u8],
        rank_stride: u32,
        sa_stride: u32,
    ) -> Result<Self, Error> {
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let alphabet = Alphabet::build(text)?;
        let sa = suffix_array::build(text)?;
        let bwt = bwt::build(text, &sa)?;
        let ranges = CharRanges::build(&bwt, &alphabet)?;
        let ranks = RankTable::build(&bwt, &alphabet, rank_stride)?;
        let sampled_sa = SampledSuffixArray::sample(&sa, sa_stride)?;

        Ok(FMIndex {
            alphabet,
            bwt: ByteStorage::Heap(bwt),
            ranges,
            ranks,
            sa: sampled_sa,
        })
    }

    pub(crate) fn from_parts(
        alphabet: Alphabet,
        bwt: ByteStorage,
        ranges: CharRanges,
        ranks: RankTable,
        sa: SampledSuffixArray,
    ) -> Self {
        FMIndex {
            alphabet,
            bwt,
            ranges,
            ranks,
            sa,
        }
    }

    /// Length of the original text `T` (excluding the sentinel).
    pub fn len(&self) -> u32 {
        self.bwt.len() as u32 - 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub(crate) fn bwt(&self) -> &[u8] {
        &self.bwt
    }

    pub(crate) fn ranges(&self) -> &CharRanges {
        &self.ranges
    }

    pub(crate) fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    pub(crate) fn sampled_sa(&self) -> &SampledSuffixArray {
        &self.sa
    }

    fn rank(&self, symbol_index: usize, i: u32) -> u32 {
        self.ranks
            .rank(&self.bwt, &self.alphabet, &self.ranges, symbol_index, i)
    }

    /// One LF-mapping step from BWT row `i`: the row whose F-column symbol
    /// is `L[i]` and whose suffix is row `i`'s, shifted one left.
    fn lf_map(&self, i: u32) -> u32 {
        let c = self.bwt[i as usize];
        // `c` is a byte of `L`, therefore always present in the alphabet.
        let symbol_index = self.alphabet.index_of(c).expect("L byte not in alphabet");
        self.ranges.lo(symbol_index) + self.rank(symbol_index, i)
    }

    /// Backward search: the half-open F-column interval `[start, end)`
    /// matching `pattern`. `end - start` is the occurrence count.
    ///
    /// The empty pattern matches everywhere: `(0, len() + 1)`. A pattern
    /// containing a symbol absent from the alphabet, or one that narrows
    /// the interval to empty, yields `(0, 0)` rather than an error -- an
    /// absent pattern is a normal, expected query outcome, not a failure.
    pub fn search_range(&self, pattern: &[u8]) -> (u32, u32) {
        let m = pattern.len();
        if m == 0 {
            return (0, self.bwt.len() as u32);
        }

        let last = match self.alphabet.index_of(pattern[m - 1]) {
            Some(idx) => idx,
            None => return (0, 0),
        };
        let mut s = self.ranges.lo(last);
        let mut e = self.ranges.hi(last);

        for k in (0..m - 1).rev() {
            if e <= s {
                return (0, 0);
            }
            let symbol_index = match self.alphabet.index_of(pattern[k]) {
                Some(idx) => idx,
                None => return (0, 0),
            };
            let lo = self.ranges.lo(symbol_index);
            s = lo + self.rank(symbol_index, s);
            e = lo + self.rank(symbol_index, e);
        }

        if e <= s {
            (0, 0)
        } else {
            (s, e)
        }
    }

    /// Number of occurrences of `pattern` as a substring of the text.
    pub fn count(&self, pattern: &[u8]) -> u32 {
        let (s, e) = self.search_range(pattern);
        e - s
    }

    /// Recover the text position of F-column row `i`, by walking LF-steps
    /// until a sampled suffix-array row is hit.
    fn locate_row(&self, i: u32) -> u32 {
        let mut idx = i;
        let mut jumps = 0u32;
        loop {
            if let Some(sa_value) = self.sa.get(idx) {
                return (sa_value + jumps) % self.sa.unsampled_len();
            }
            idx = self.lf_map(idx);
            jumps += 1;
        }
    }

    /// Write the text positions of the rows in `[start, end)` into `out`,
    /// in order, and return how many were written.
    ///
    /// `out` must have length at least `end - start`. The written count is
    /// exactly `end - start` unless the range includes row 0 -- the
    /// sentinel's own F-column row, which only the empty-pattern interval
    /// `(0, len() + 1)` ever does -- in which case that row is skipped and
    /// the sentinel position (`len()`) is never written.
    ///
    /// Performs no allocation; `out` is entirely caller-owned.
    pub fn locate(&self, start: u32, end: u32, out: &mut [u32]) -> usize {
        assert!(out.len() as u32 >= end - start, "output buffer too small");
        let sentinel_pos = self.len();
        let mut written = 0usize;
        for i in start..end {
            let pos = self.locate_row(i);
            if pos == sentinel_pos {
                continue;
            }
            out[written] = pos;
            written += 1;
        }
        written
    }

    /// Convenience wrapper over [`FMIndex::search_range`] +
    /// [`FMIndex::locate`] that allocates its own output buffer, already
    /// truncated to the number of positions actually written.
    pub fn locate_vec(&self, pattern: &[u8]) -> Vec<u32> {
        let (s, e) = self.search_range(pattern);
        let mut out = vec![0u32; (e - s) as usize];
        let written = self.locate(s, e, &mut out);
        out.truncate(written);
        out
    }
}
