//! The sampled suffix array `SA'`: only every `SA_STRIDE`-th entry of the
//! full suffix array is retained.

use crate::align::WordStorage;
use crate::error::Error;

/// `SA` sampled at stride `SA_STRIDE`. `SA_STRIDE = 1` retains everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledSuffixArray {
    stride: u32,
    // `len` is the length of the *unsampled* array this was built from
    // (`n + 1`), needed so `FMIndex` can compute the modulus in the locate
    // walk without storing it twice.
    len: u32,
    entries: WordStorage,
}

impl SampledSuffixArray {
    /// Sample `sa` (the full suffix array), keeping indices `0, stride,
    /// 2*stride, ...`.
    pub fn sample(sa: &[u32], stride: u32) -> Result<Self, Error> {
        assert!(stride >= 1, "SA_STRIDE must be >= 1");
        let n = sa.len();
        let sampled_len = (n - 1) / stride as usize + 1;

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(sampled_len)
            .map_err(|_| Error::OutOfMemory)?;
        entries.extend((0..sampled_len).map(|i| sa[i * stride as usize]));

        Ok(SampledSuffixArray {
            stride,
            len: n as u32,
            entries: WordStorage::Heap(entries),
        })
    }

    /// Build directly from already-sampled entries, e.g. when loading a
    /// serialised index.
    pub(crate) fn from_parts(entries: WordStorage, stride: u32, len: u32) -> Self {
        SampledSuffixArray {
            stride,
            len,
            entries,
        }
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Length of the unsampled array this was derived from (`n + 1`).
    pub fn unsampled_len(&self) -> u32 {
        self.len
    }

    pub(crate) fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// `SA[i]` if `i` is a stored row, `None` otherwise.
    pub fn get(&self, i: u32) -> Option<u32> {
        if i % self.stride == 0 {
            Some(self.entries[(i / self.stride) as usize])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_one_keeps_everything() {
        let sa: Vec<u32> = (0..8).collect();
        let sampled = SampledSuffixArray::sample(&sa, 1).unwrap();
        for i in 0..8 {
            assert_eq!(sampled.get(i), Some(i));
        }
    }

    #[test]
    fn stride_three_keeps_every_third() {
        let sa: Vec<u32> = (0..10).collect();
        let sampled = SampledSuffixArray::sample(&sa, 3).unwrap();
        for i in 0..10 {
            if i % 3 == 0 {
                assert_eq!(sampled.get(i), Some(i));
            } else {
                assert_eq!(sampled.get(i), None);
            }
        }
    }
}
