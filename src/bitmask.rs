use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Number of bits a `BitSet26` can hold: one per lowercase letter.
pub const BITSET_WIDTH: usize = 26;

const BITSET_MASK: u32 = (1 << BITSET_WIDTH) - 1;

/// Fixed 26-bit set. Bit `n` stands either for the letter `'a' + n` or, when used
/// for anchors, for position `n` of a word pair's shared letters.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitSet26(u32);

impl BitSet26 {
    pub const EMPTY: BitSet26 = BitSet26(0);

    pub fn from_bits(bits: u32) -> Self {
        BitSet26(bits & BITSET_MASK)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Single-letter mask. Anything outside `'a'..='z'` maps to the empty set.
    #[inline(always)]
    pub fn char_bitmask(ch: char) -> Self {
        if ch.is_ascii_lowercase() {
            BitSet26(1_u32 << (ch as u8 - b'a'))
        } else {
            BitSet26::EMPTY
        }
    }

    /// Union of the single-letter masks of every character in `chars`; other
    /// characters are ignored.
    pub fn encode<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut output = BitSet26::EMPTY;
        for ch in chars {
            output |= BitSet26::char_bitmask(ch);
        }

        output
    }

    /// The letters in the set, in alphabetical order.
    pub fn decode(self) -> Vec<char> {
        (0..BITSET_WIDTH as u8)
            .filter(|&bit| self.0 & (1 << bit) != 0)
            .map(|bit| (b'a' + bit) as char)
            .collect()
    }

    pub fn position(index: usize) -> Self {
        assert!(index < BITSET_WIDTH, "position {} out of range", index);
        BitSet26(1 << index)
    }

    pub fn union(self, other: BitSet26) -> Self {
        BitSet26(self.0 | other.0)
    }

    pub fn intersects(self, other: BitSet26) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub fn contains(self, ch: char) -> bool {
        self.intersects(BitSet26::char_bitmask(ch))
    }

    pub fn contains_position(self, index: usize) -> bool {
        index < BITSET_WIDTH && self.0 & (1 << index) != 0
    }

    /// Set positions in ascending order.
    pub fn positions(self) -> impl Iterator<Item = usize> {
        (0..BITSET_WIDTH).filter(move |&index| self.contains_position(index))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `width` binary digits, position 0 first.
    pub fn to_position_string(self, width: usize) -> String {
        (0..width)
            .map(|index| if self.contains_position(index) { '1' } else { '0' })
            .collect()
    }

    /// Every set of exactly `size` positions drawn from `0..width`, in ascending
    /// numeric order of the underlying bits.
    pub fn subsets(width: usize, size: usize) -> Subsets {
        assert!(width <= BITSET_WIDTH, "width {} out of range", width);
        let limit = 1_u32 << width;
        let next = if size == 0 || size > width {
            None
        } else {
            Some((1_u32 << size) - 1)
        };
        Subsets { next, limit }
    }
}

impl BitOr for BitSet26 {
    type Output = BitSet26;

    fn bitor(self, rhs: BitSet26) -> BitSet26 {
        self.union(rhs)
    }
}

impl BitOrAssign for BitSet26 {
    fn bitor_assign(&mut self, rhs: BitSet26) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<char> for BitSet26 {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = char>,
    {
        BitSet26::encode(iter)
    }
}

impl fmt::Debug for BitSet26 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet26({:026b})", self.0)
    }
}

/// Fixed-size position subsets, produced by Gosper's hack.
pub struct Subsets {
    next: Option<u32>,
    limit: u32,
}

impl Iterator for Subsets {
    type Item = BitSet26;

    fn next(&mut self) -> Option<BitSet26> {
        let current = self.next?;
        let lowest = current & current.wrapping_neg();
        let ripple = current + lowest;
        let following = (((ripple ^ current) >> 2) / lowest) | ripple;
        self.next = (following < self.limit).then_some(following);
        Some(BitSet26(current))
    }
}

/// Trait extension to enable easy conversion of strings to letter bitmasks.
pub trait CanConvertToLetterBitmask {
    fn to_letter_bitmask(&self) -> BitSet26;
}

impl CanConvertToLetterBitmask for str {
    fn to_letter_bitmask(&self) -> BitSet26 {
        BitSet26::encode(self.chars())
    }
}

impl CanConvertToLetterBitmask for Vec<char> {
    fn to_letter_bitmask(&self) -> BitSet26 {
        BitSet26::encode(self.iter().copied())
    }
}
