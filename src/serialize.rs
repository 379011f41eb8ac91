//! Component F: the on-disk index layout.
//!
//! Binary, little-endian, fixed-width, no padding. An 8-byte magic and a
//! 4-byte version precede the payload; a mismatch on either is rejected as
//! [`Error::MalformedIndex`].
//!
//! Layout after the 8-byte magic and 4-byte version:
//!
//! ```text
//! rank_stride: u32
//! sa_stride:   u32
//! bwt_sz:      u32                    (= n + 1)
//! bwt:         [u8;  bwt_sz]          raw L bytes
//! alphabet_sz: u32                    (= sigma)
//! alphabet:    [u8;  alphabet_sz]     sorted, '$' first
//! ranges:      [u32; 2 * alphabet_sz] lo(0), hi(0), lo(1), hi(1), ...
//! ranks:       [u32; ranks_len]       row-major, ranks_len = ceil(bwt_sz / rank_stride) * alphabet_sz
//! sa:          [u32; sa_len]          sa_len = ceil(bwt_sz / sa_stride)
//! ```

use std::io::{self, Read, Write};

use crate::align::{AlignedBuffer, AlignedU32Buffer, Allocator, ByteStorage, WordStorage};
use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::fm_index::FMIndex;
use crate::rank::{CharRanges, RankTable};
use crate::suffix_array::sample::SampledSuffixArray;

const MAGIC: [u8; 8] = *b"FMIDXv1\0";
const VERSION: u32 = 1;

/// Serialise `index` to `writer` in the format documented above.
pub fn dump(index: &FMIndex, writer: &mut impl Write) -> Result<(), Error> {
    writer.write_all(&MAGIC)?;
    write_u32(writer, VERSION)?;
    write_u32(writer, index.ranks().stride())?;
    write_u32(writer, index.sampled_sa().stride())?;

    let bwt = index.bwt();
    write_u32(writer, bwt.len() as u32)?;
    writer.write_all(bwt)?;

    let symbols = index.alphabet().symbols();
    write_u32(writer, symbols.len() as u32)?;
    writer.write_all(symbols)?;

    write_u32_slice(writer, index.ranges().raw())?;
    write_u32_slice(writer, index.ranks().raw())?;
    write_u32_slice(writer, index.sampled_sa().entries())?;

    Ok(())
}

/// Deserialise an index previously written by [`dump`].
///
/// `allocator` controls how the large backing arrays are allocated, for the
/// whole lifetime of the returned `FMIndex`: [`Allocator::Standard`] uses
/// the ordinary global allocator, [`Allocator::PageAligned`] allocates every
/// array at a 4096-byte boundary, for callers about to hand the index's
/// memory to a DMA-based accelerator.
pub fn load(reader: &mut impl Read, allocator: Allocator) -> Result<FMIndex, Error> {
    let mut offset = 0u64;

    let mut magic = [0u8; 8];
    read_exact_at(reader, &mut magic, &mut offset)?;
    if magic != MAGIC {
        return Err(Error::MalformedIndex {
            offset: 0,
            reason: "bad magic".to_string(),
        });
    }

    let version = read_u32_at(reader, &mut offset)?;
    if version != VERSION {
        return Err(Error::MalformedIndex {
            offset: offset - 4,
            reason: format!("unsupported version {}", version),
        });
    }

    let rank_stride = read_u32_at(reader, &mut offset)?;
    let sa_stride = read_u32_at(reader, &mut offset)?;
    if rank_stride == 0 || sa_stride == 0 {
        return Err(Error::MalformedIndex {
            offset,
            reason: "stride must be >= 1".to_string(),
        });
    }

    let bwt_sz = read_u32_at(reader, &mut offset)? as usize;
    let bwt = read_bytes_at(reader, bwt_sz, allocator, &mut offset)?;

    let alphabet_sz = read_u32_at(reader, &mut offset)? as usize;
    let alphabet_bytes = read_bytes_at(reader, alphabet_sz, allocator, &mut offset)?;
    if alphabet_bytes.first() != Some(&crate::alphabet::SENTINEL) {
        return Err(Error::MalformedIndex {
            offset,
            reason: "alphabet's first symbol must be the sentinel".to_string(),
        });
    }
    let alphabet = Alphabet::from_sorted_symbols(alphabet_bytes);

    let ranges_len = 2 * alphabet_sz;
    let ranges_raw = read_u32_vec_at(reader, ranges_len, allocator, &mut offset)?;
    let ranges = CharRanges::from_raw(ranges_raw);

    let ranks_len = bwt_sz.div_ceil(rank_stride as usize) * alphabet_sz;
    let ranks_raw = read_u32_vec_at(reader, ranks_len, allocator, &mut offset)?;
    let ranks = RankTable::from_parts(ranks_raw, rank_stride, alphabet_sz as u32);

    let sa_len = bwt_sz.div_ceil(sa_stride as usize);
    let sa_raw = read_u32_vec_at(reader, sa_len, allocator, &mut offset)?;
    let sa = SampledSuffixArray::from_parts(sa_raw, sa_stride, bwt_sz as u32);

    if ranges.sigma() != alphabet_sz {
        return Err(Error::MalformedIndex {
            offset,
            reason: "ranges length inconsistent with alphabet size".to_string(),
        });
    }

    Ok(FMIndex::from_parts(alphabet, bwt, ranges, ranks, sa))
}

fn write_u32(writer: &mut impl Write, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

fn write_u32_slice(writer: &mut impl Write, values: &[u32]) -> io::Result<()> {
    for &v in values {
        write_u32(writer, v)?;
    }
    Ok(())
}

fn read_exact_at(reader: &mut impl Read, buf: &mut [u8], offset: &mut u64) -> Result<(), Error> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::MalformedIndex {
                offset: *offset,
                reason: "unexpected end of input".to_string(),
            }
        } else {
            Error::from(e)
        }
    })?;
    *offset += buf.len() as u64;
    Ok(())
}

fn read_u32_at(reader: &mut impl Read, offset: &mut u64) -> Result<u32, Error> {
    let mut buf = [0u8; 4];
    read_exact_at(reader, &mut buf, offset)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read `len` raw bytes, into a page-aligned allocation when `allocator`
/// asks for it. The returned storage, not just the read, honours the
/// request: a `PageAligned` array stays page-aligned for as long as the
/// `FMIndex` that owns it is alive.
fn read_bytes_at(
    reader: &mut impl Read,
    len: usize,
    allocator: Allocator,
    offset: &mut u64,
) -> Result<ByteStorage, Error> {
    match allocator {
        Allocator::Standard => {
            let mut buf = Vec::new();
            buf.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
            buf.resize(len, 0);
            read_exact_at(reader, &mut buf, offset)?;
            Ok(ByteStorage::Heap(buf))
        }
        Allocator::PageAligned => {
            let mut aligned = AlignedBuffer::zeroed(len).ok_or(Error::OutOfMemory)?;
            read_exact_at(reader, aligned.as_mut_slice(), offset)?;
            Ok(ByteStorage::Aligned(aligned))
        }
    }
}

fn read_u32_vec_at(
    reader: &mut impl Read,
    len: usize,
    allocator: Allocator,
    offset: &mut u64,
) -> Result<WordStorage, Error> {
    match allocator {
        Allocator::Standard => {
            let bytes = read_bytes_at(reader, len * 4, Allocator::Standard, offset)?;
            let mut out = Vec::new();
            out.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
            out.extend(
                bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
            );
            Ok(WordStorage::Heap(out))
        }
        Allocator::PageAligned => {
            let mut aligned = AlignedU32Buffer::zeroed(len).ok_or(Error::OutOfMemory)?;
            read_exact_at(reader, aligned.as_mut_bytes(), offset)?;
            // The bytes just read are little-endian on the wire; fix up
            // byte order in place for the (rare) big-endian host.
            for word in aligned.as_mut_slice() {
                *word = u32::from_le(*word);
            }
            Ok(WordStorage::Aligned(aligned))
        }
    }
}
