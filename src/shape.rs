use std::fmt::Display;

/// Shortest word a pair can be built from.
pub const MIN_WORD_LENGTH: usize = 3;

/// Longest word a pair can be built from.
pub const MAX_WORD_LENGTH: usize = 12;

/// Number of distinct shapes in the supported domain, i.e. one past the largest id.
pub const SHAPE_COUNT: usize = triangular(MAX_WORD_LENGTH - MIN_WORD_LENGTH + 2) - 1;

const fn triangular(n: usize) -> usize {
    n * (n + 1) / 2
}

/// The silhouette of a word pair: how long its words are and where the two-letter
/// split starts.
///
/// Ordering is by length, then index, which is also the order of `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    length: usize,
    index: usize,
}

impl Shape {
    /// Panics when `(length, index)` is outside the supported domain.
    pub fn new(length: usize, index: usize) -> Self {
        Shape::try_new(length, index).unwrap_or_else(|| {
            panic!("shape (length {}, index {}) is out of domain", length, index)
        })
    }

    pub fn try_new(length: usize, index: usize) -> Option<Self> {
        let valid = (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&length) && index + 2 <= length;
        valid.then_some(Shape { length, index })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Dense id in `0..SHAPE_COUNT`. Each length owns a contiguous block of
    /// `length - 1` ids, so ids never collide.
    pub fn id(&self) -> usize {
        triangular(self.length - MIN_WORD_LENGTH + 1) - 1 + self.index
    }

    /// Every shape of the supported domain, in id order.
    pub fn all() -> impl Iterator<Item = Shape> {
        (MIN_WORD_LENGTH..=MAX_WORD_LENGTH)
            .flat_map(|length| (0..=length - 2).map(move |index| Shape { length, index }))
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.length, self.index)
    }
}
