//! A compressed full-text self-index (FM-index) over the Burrows-Wheeler
//! transform of a single text.
//!
//! The index answers two queries about a text `T` of length `n`:
//!
//! * [`FMIndex::count`] — how many times does a pattern occur as a substring
//!   of `T`?
//! * [`FMIndex::locate`] / [`FMIndex::locate_vec`] — at which positions does
//!   it occur?
//!
//! Construction is one-shot and the resulting index is immutable; see
//! [`FMIndexBuilder`] for the knobs (`RANK_STRIDE`, `SA_STRIDE`) that trade
//! memory for query time.
//!
//! ```rust
//! use bwt_fm_index::FMIndexBuilder;
//!
//! let index = FMIndexBuilder::new().build(b"ALALA").unwrap();
//! assert_eq!(index.count(b"AL"), 2);
//!
//! let mut positions = index.locate_vec(b"AL");
//! positions.sort_unstable();
//! assert_eq!(positions, vec![0, 2]);
//! ```

mod alphabet;
mod align;
mod bwt;
mod builder;
mod error;
mod fm_index;
mod rank;
pub mod serialize;
pub mod suffix_array;
pub mod testbatch;

pub use alphabet::Alphabet;
pub use align::Allocator;
pub use builder::FMIndexBuilder;
pub use error::Error;
pub use fm_index::FMIndex;
