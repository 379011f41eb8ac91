use bwt_fm_index::{Allocator, FMIndexBuilder};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SYMBOLS: &[u8] = b"abcd";

fn random_text(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| SYMBOLS[rng.gen_range(0..SYMBOLS.len())]).collect()
}

// `pattern` is assumed non-empty; the empty pattern is an edge case with
// its own contract (see `count_and_locate_match_naive_scan` below) and is
// never passed here.
fn naive_positions(text: &[u8], pattern: &[u8]) -> Vec<u32> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| &text[i..i + pattern.len()] == pattern)
        .map(|i| i as u32)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Properties 1-3: count/locate agree with a naive scanner, on both
    // present and absent patterns, including the empty pattern.
    #[test]
    fn count_and_locate_match_naive_scan(
        seed in any::<u64>(),
        len in 1usize..400,
        pattern_len in 0usize..6,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let text = random_text(&mut rng, len);
        let index = FMIndexBuilder::new().build(&text).unwrap();

        let pattern = random_text(&mut rng, pattern_len);

        if pattern.is_empty() {
            // The empty pattern's F-column interval has size `n + 1` (it
            // includes the sentinel's own row at row 0), but `locate`
            // skips that row, so it writes only the `n` valid text
            // positions `0..n`, never `n` itself.
            prop_assert_eq!(index.count(&pattern), text.len() as u32 + 1);
            let mut actual = index.locate_vec(&pattern);
            actual.sort_unstable();
            prop_assert_eq!(actual, (0..text.len() as u32).collect::<Vec<_>>());
            return Ok(());
        }

        let expected = naive_positions(&text, &pattern);

        prop_assert_eq!(index.count(&pattern), expected.len() as u32);

        let mut actual = index.locate_vec(&pattern);
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    // Property 5: building with non-trivial strides yields identical
    // count and set-equal locate results to the unsampled index.
    #[test]
    fn stride_choice_does_not_change_query_results(
        seed in any::<u64>(),
        len in 1usize..200,
        rank_stride in 1u32..9,
        sa_stride in 1u32..9,
        pattern_len in 1usize..5,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let text = random_text(&mut rng, len);
        let pattern = random_text(&mut rng, pattern_len);

        let baseline = FMIndexBuilder::new().build(&text).unwrap();
        let sampled = FMIndexBuilder::new()
            .rank_stride(rank_stride)
            .sa_stride(sa_stride)
            .build(&text)
            .unwrap();

        prop_assert_eq!(baseline.count(&pattern), sampled.count(&pattern));

        let mut a = baseline.locate_vec(&pattern);
        let mut b = sampled.locate_vec(&pattern);
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    // Property 4: a dump/load round trip reproduces identical query
    // results (and, via the backing arrays, an identical index).
    #[test]
    fn serialization_round_trip_preserves_queries(
        seed in any::<u64>(),
        len in 1usize..200,
        pattern_len in 1usize..5,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let text = random_text(&mut rng, len);
        let pattern = random_text(&mut rng, pattern_len);

        let index = FMIndexBuilder::new()
            .rank_stride(3)
            .sa_stride(4)
            .build(&text)
            .unwrap();

        let mut buf = Vec::new();
        bwt_fm_index::serialize::dump(&index, &mut buf).unwrap();
        let loaded = bwt_fm_index::serialize::load(&mut buf.as_slice(), Allocator::Standard).unwrap();

        prop_assert_eq!(index.count(&pattern), loaded.count(&pattern));

        let mut a = index.locate_vec(&pattern);
        let mut b = loaded.locate_vec(&pattern);
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    // Property 2: every returned position is a genuine occurrence.
    #[test]
    fn every_located_position_is_a_real_occurrence(
        seed in any::<u64>(),
        len in 1usize..400,
        pattern_len in 1usize..6,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let text = random_text(&mut rng, len);
        let pattern = random_text(&mut rng, pattern_len);
        let index = FMIndexBuilder::new().build(&text).unwrap();

        for pos in index.locate_vec(&pattern) {
            let pos = pos as usize;
            prop_assert!(pos + pattern.len() <= text.len());
            prop_assert_eq!(&text[pos..pos + pattern.len()], pattern.as_slice());
        }
    }
}
