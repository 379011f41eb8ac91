//! Component D: the F-column ranges and the sampled rank table.
//!
//! Both structures are packed row-major matrices; each is given named
//! indexers here so the stride variants never duplicate the layout math.

use crate::align::WordStorage;
use crate::alphabet::Alphabet;
use crate::error::Error;

/// `R_lo`/`R_hi` for every symbol: the half-open interval of F-column rows
/// starting with that symbol. Packed as `[lo(0), hi(0), lo(1), hi(1), ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharRanges {
    data: WordStorage,
}

impl CharRanges {
    pub fn build(l: &[u8], alphabet: &Alphabet) -> Result<Self, Error> {
        let sigma = alphabet.len();
        let mut counts = vec![0u32; sigma];
        for &b in l {
            counts[alphabet.index_of(b).expect("bwt symbol must be in alphabet")] += 1;
        }

        let mut data = Vec::new();
        data.try_reserve_exact(2 * sigma).map_err(|_| Error::OutOfMemory)?;
        data.resize(2 * sigma, 0);

        let mut acc = 0u32;
        for j in 0..sigma {
            data[2 * j] = acc;
            acc += counts[j];
            data[2 * j + 1] = acc;
        }

        Ok(CharRanges {
            data: WordStorage::Heap(data),
        })
    }

    pub(crate) fn from_raw(data: WordStorage) -> Self {
        CharRanges { data }
    }

    pub(crate) fn raw(&self) -> &[u32] {
        &self.data
    }

    pub fn lo(&self, symbol_index: usize) -> u32 {
        self.data[2 * symbol_index]
    }

    pub fn hi(&self, symbol_index: usize) -> u32 {
        self.data[2 * symbol_index + 1]
    }

    pub fn count(&self, symbol_index: usize) -> u32 {
        self.hi(symbol_index) - self.lo(symbol_index)
    }

    pub fn sigma(&self) -> usize {
        self.data.len() / 2
    }
}

/// Prefix counts over `L`, stored only at rows that are multiples of
/// `RANK_STRIDE`; intermediate rows are reconstructed by a short linear
/// scan from the nearer stored anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    stride: u32,
    sigma: u32,
    table: WordStorage,
}

impl RankTable {
    /// Build the sampled rank table for `l` over `alphabet`, snapshotting
    /// every `stride` rows.
    pub fn build(l: &[u8], alphabet: &Alphabet, stride: u32) -> Result<Self, Error> {
        assert!(stride >= 1, "RANK_STRIDE must be >= 1");
        let sigma = alphabet.len();
        let len = l.len();
        let rows_len = (len - 1) / stride as usize + 1;

        let mut table = Vec::new();
        table
            .try_reserve_exact(rows_len * sigma)
            .map_err(|_| Error::OutOfMemory)?;
        table.resize(rows_len * sigma, 0);

        let mut running = vec![0u32; sigma];
        for (i, &b) in l.iter().enumerate() {
            if i % stride as usize == 0 {
                let row = (i / stride as usize) * sigma;
                table[row..row + sigma].copy_from_slice(&running);
            }
            running[alphabet.index_of(b).expect("bwt symbol must be in alphabet")] += 1;
        }

        Ok(RankTable {
            stride,
            sigma: sigma as u32,
            table: WordStorage::Heap(table),
        })
    }

    pub(crate) fn from_parts(table: WordStorage, stride: u32, sigma: u32) -> Self {
        RankTable {
            stride,
            sigma,
            table,
        }
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub(crate) fn raw(&self) -> &[u32] {
        &self.table
    }

    fn stored_row(&self, row: u32) -> &[u32] {
        let start = (row / self.stride) as usize * self.sigma as usize;
        &self.table[start..start + self.sigma as usize]
    }

    /// `rank(A[symbol_index], i)`: the number of occurrences of the symbol
    /// in `l[0..i)`.
    ///
    /// `l` must be the same BWT string this table was built from, `alphabet`
    /// the alphabet it was built over, and `i` in `[0, l.len()]`.
    pub fn rank(
        &self,
        l: &[u8],
        alphabet: &Alphabet,
        ranges: &CharRanges,
        symbol_index: usize,
        i: u32,
    ) -> u32 {
        let len = l.len() as u32;
        if i == len {
            return ranges.count(symbol_index);
        }
        if self.stride == 1 {
            return self.stored_row(i)[symbol_index];
        }

        let target = alphabet.symbol_at(symbol_index);
        let stride = self.stride;
        let anchor_low = (i / stride) * stride;
        let remainder = i % stride;
        let anchor_high = anchor_low + stride;

        if remainder > stride / 2 && anchor_high < len {
            let scanned = l[i as usize..anchor_high as usize]
                .iter()
                .filter(|&&b| b == target)
                .count() as u32;
            self.stored_row(anchor_high)[symbol_index] - scanned
        } else {
            let scanned = l[anchor_low as usize..i as usize]
                .iter()
                .filter(|&&b| b == target)
                .count() as u32;
            self.stored_row(anchor_low)[symbol_index] + scanned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bwt;
    use crate::suffix_array;

    fn build_all(text: &[u8], stride: u32) -> (Alphabet, Vec<u8>, CharRanges, RankTable) {
        let alphabet = Alphabet::build(text).unwrap();
        let sa = suffix_array::build(text).unwrap();
        let l = bwt::build(text, &sa).unwrap();
        let ranges = CharRanges::build(&l, &alphabet).unwrap();
        let ranks = RankTable::build(&l, &alphabet, stride).unwrap();
        (alphabet, l, ranges, ranks)
    }

    fn naive_rank(l: &[u8], target: u8, i: u32) -> u32 {
        l[..i as usize].iter().filter(|&&b| b == target).count() as u32
    }

    #[test]
    fn char_ranges_invariants() {
        let (alphabet, _l, ranges, _ranks) = build_all(b"mississippi", 4);
        assert_eq!(ranges.lo(0), 0);
        assert_eq!(ranges.hi(alphabet.len() - 1), 12);
        for j in 1..alphabet.len() {
            assert_eq!(ranges.lo(j), ranges.hi(j - 1));
        }
    }

    #[test]
    fn rank_matches_naive_for_every_stride() {
        let text = b"mississippi";
        for stride in [1u32, 2, 3, 4, 5, 12] {
            let (alphabet, l, ranges, ranks) = build_all(text, stride);
            for j in 0..alphabet.len() {
                let target = alphabet.symbol_at(j);
                for i in 0..=l.len() as u32 {
                    let expected = naive_rank(&l, target, i);
                    let actual = ranks.rank(&l, &alphabet, &ranges, j, i);
                    assert_eq!(
                        actual, expected,
                        "stride={} symbol={:?} i={}",
                        stride, target as char, i
                    );
                }
            }
        }
    }

    #[test]
    fn rank_is_monotonic() {
        let (alphabet, l, ranges, ranks) = build_all(b"abracadabra", 3);
        for j in 0..alphabet.len() {
            let mut prev = 0;
            for i in 0..=l.len() as u32 {
                let r = ranks.rank(&l, &alphabet, &ranges, j, i);
                assert!(r >= prev);
                prev = r;
            }
            assert_eq!(ranks.rank(&l, &alphabet, &ranges, j, 0), 0);
            assert_eq!(
                ranks.rank(&l, &alphabet, &ranges, j, l.len() as u32),
                ranges.count(j)
            );
        }
    }
}
