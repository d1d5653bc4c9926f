use std::cmp::Ordering;
use std::fmt::Display;

use crate::bitmask::BitSet26;
use crate::error::{Error, Result};
use crate::shape::Shape;

/// Width of each shape's block of prompt ids: every combination of the four split
/// letters fits below it.
pub const PROMPT_SPAN: u64 = 26 * 26 * 26 * 26;

/// Mistakeable letters and anchors of a word pair, relative to the other pairs
/// sharing its prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Constraints {
    /// One set per position of `letters`.
    pub mistakeables: Vec<BitSet26>,
    /// Position sets over `letters`, all of the same minimal size.
    pub anchors: Vec<BitSet26>,
}

/// Two equal-length words that agree everywhere except the two letters at the
/// shape's split, where they differ in both positions.
#[derive(Debug, Clone)]
pub struct WordPair {
    shape: Shape,
    words: [String; 2],
    letters: String,
    letters_bits: Vec<BitSet26>,
    usability: u8,
    prompt_id: u64,
    constraints: Option<Constraints>,
}

impl WordPair {
    pub fn new(shape: Shape, word1: &str, word2: &str, usability: u8) -> Result<Self> {
        let index = shape.index();
        let invalid = |reason: &str| Error::InvalidPair {
            word1: word1.to_string(),
            word2: word2.to_string(),
            index,
            reason: reason.to_string(),
        };

        let first = word1.as_bytes();
        let second = word2.as_bytes();
        if first.len() != shape.length() || second.len() != shape.length() {
            return Err(invalid("word length does not match the shape"));
        }
        if !first.iter().chain(second).all(u8::is_ascii_lowercase) {
            return Err(invalid("words must be lowercase letters"));
        }
        if first[index] == second[index] || first[index + 1] == second[index + 1] {
            return Err(invalid("both split letters must differ"));
        }
        if first[..index] != second[..index] || first[index + 2..] != second[index + 2..] {
            return Err(invalid("words differ outside the split"));
        }

        let letters = format!("{}{}", &word1[..index], &word1[index + 2..]);
        let letters_bits = letters.chars().map(BitSet26::char_bitmask).collect();
        let prompt_id = WordPair::compute_prompt_id(
            shape,
            [first[index], first[index + 1]],
            [second[index], second[index + 1]],
        );

        Ok(WordPair {
            shape,
            words: [word1.to_string(), word2.to_string()],
            letters,
            letters_bits,
            usability,
            prompt_id,
            constraints: None,
        })
    }

    /// `shape.id * 26^4` plus the four split letters as base-26 digits, the first
    /// split's first letter least significant.
    pub fn compute_prompt_id(shape: Shape, split1: [u8; 2], split2: [u8; 2]) -> u64 {
        let digit = |letter: u8| u64::from(letter - b'a');
        let character_id = digit(split1[0])
            + digit(split1[1]) * 26
            + digit(split2[0]) * 26 * 26
            + digit(split2[1]) * 26 * 26 * 26;
        shape.id() as u64 * PROMPT_SPAN + character_id
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn words(&self) -> [&str; 2] {
        [&self.words[0], &self.words[1]]
    }

    pub fn splits(&self) -> [&str; 2] {
        let range = self.shape.index()..self.shape.index() + 2;
        [&self.words[0][range.clone()], &self.words[1][range]]
    }

    pub fn before(&self) -> &str {
        &self.words[0][..self.shape.index()]
    }

    pub fn after(&self) -> &str {
        &self.words[0][self.shape.index() + 2..]
    }

    /// The letters both words share, split removed.
    pub fn letters(&self) -> &str {
        &self.letters
    }

    pub fn letters_bits(&self) -> &[BitSet26] {
        &self.letters_bits
    }

    pub fn usability(&self) -> u8 {
        self.usability
    }

    pub fn prompt_id(&self) -> u64 {
        self.prompt_id
    }

    /// Dashes for the shared letters with the split shown in place, e.g. `-(in/cr)--`.
    pub fn prompt(&self) -> String {
        let [split1, split2] = self.splits();
        format!(
            "{}({}/{}){}",
            "-".repeat(self.shape.index()),
            split1,
            split2,
            "-".repeat(self.after().len())
        )
    }

    pub fn is_prompt_equivalent(&self, other: &WordPair) -> bool {
        self.prompt_id == other.prompt_id
    }

    pub fn mistakeables(&self) -> &[BitSet26] {
        self.constraints
            .as_ref()
            .map_or(&[][..], |constraints| constraints.mistakeables.as_slice())
    }

    pub fn anchors(&self) -> &[BitSet26] {
        self.constraints
            .as_ref()
            .map_or(&[][..], |constraints| constraints.anchors.as_slice())
    }

    pub fn is_constrained(&self) -> bool {
        self.constraints.is_some()
    }

    /// Attaches constraints to a pair that has none yet. A pair is never
    /// re-annotated.
    pub(crate) fn with_constraints(mut self, constraints: Constraints) -> Self {
        debug_assert!(self.constraints.is_none(), "{} already constrained", self);
        debug_assert_eq!(constraints.mistakeables.len(), self.letters.len());
        self.constraints = Some(constraints);
        self
    }

    /// e.g. `[-, ab, -]`.
    pub fn show_mistakeables(&self) -> String {
        let letters: Vec<String> = self
            .mistakeables()
            .iter()
            .map(|set| {
                if set.is_empty() {
                    "-".to_string()
                } else {
                    set.decode().into_iter().collect()
                }
            })
            .collect();
        format!("[{}]", letters.join(", "))
    }

    /// e.g. `[0010, 0100]`, position 0 first.
    pub fn show_anchors(&self) -> String {
        let width = self.letters.len();
        let anchors: Vec<String> = self
            .anchors()
            .iter()
            .map(|anchor| anchor.to_position_string(width))
            .collect();
        format!("[{}]", anchors.join(", "))
    }

    /// Internal order: shape, then splits, then shared letters.
    pub fn cmp_by_prompt(&self, other: &WordPair) -> Ordering {
        self.shape
            .cmp(&other.shape)
            .then_with(|| self.splits().cmp(&other.splits()))
            .then_with(|| self.letters.cmp(&other.letters))
    }

    /// Display order: shape, then shared letters, then splits.
    pub fn cmp_for_display(&self, other: &WordPair) -> Ordering {
        self.shape
            .cmp(&other.shape)
            .then_with(|| self.letters.cmp(&other.letters))
            .then_with(|| self.splits().cmp(&other.splits()))
    }
}

impl PartialEq for WordPair {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.words == other.words
    }
}

impl Eq for WordPair {}

impl Display for WordPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [split1, split2] = self.splits();
        write!(f, "{}({}/{}){}", self.before(), split1, split2, self.after())
    }
}
