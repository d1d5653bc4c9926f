//! Building blocks for "Split Decisions" word puzzles.
//!
//! A word list goes through [`WordPairFinder`] to produce every pair of words
//! that differ in exactly two consecutive letters. [`ConstraintsFinder`] then
//! groups those pairs by prompt and works out, for each placeable pair, the
//! letters a solver could mistake and the smallest sets of revealed positions
//! that make the pair the only possible answer.

pub mod bitmask;
pub mod constraints;
pub mod error;
pub mod finder;
pub mod output;
pub mod pair;
pub mod settings;
pub mod shape;
pub mod words;

pub use bitmask::BitSet26;
pub use constraints::ConstraintsFinder;
pub use error::{Error, Result};
pub use finder::WordPairFinder;
pub use pair::{Constraints, WordPair};
pub use settings::{Settings, Usability, Verbosity};
pub use shape::Shape;
pub use words::{Word, Wordlist};
