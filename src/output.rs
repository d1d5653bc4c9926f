use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Write};

use counter::Counter;

use crate::pair::WordPair;

fn display_order(word_pairs: &[WordPair]) -> Vec<&WordPair> {
    let mut ordered: Vec<&WordPair> = word_pairs.iter().collect();
    ordered.sort_by(|a, b| a.cmp_for_display(b));
    ordered
}

/// One line per pair: `before(split1/split2)after  [usability]`.
pub fn write_pairs<W: Write>(writer: &mut W, word_pairs: &[WordPair]) -> io::Result<()> {
    for word_pair in display_order(word_pairs) {
        writeln!(writer, "{}  [{}]", word_pair, word_pair.usability())?;
    }

    writer.flush()
}

/// Like `write_pairs`, followed by the mistakeables and anchors of each pair.
pub fn write_constrained_pairs<W: Write>(writer: &mut W, word_pairs: &[WordPair]) -> io::Result<()> {
    for word_pair in display_order(word_pairs) {
        writeln!(
            writer,
            "{}  [{}]  {}  {}",
            word_pair,
            word_pair.usability(),
            word_pair.show_mistakeables(),
            word_pair.show_anchors()
        )?;
    }

    writer.flush()
}

/// Counts describing a list of word pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    /// `(usability, count)`, ascending by usability.
    pub by_usability: Vec<(u8, usize)>,
    pub prompts: usize,
    /// Prompts shared by two or more pairs.
    pub ambiguous_prompts: usize,
}

impl Summary {
    pub fn from_pairs(word_pairs: &[WordPair]) -> Self {
        let usability: Counter<u8> = word_pairs.iter().map(WordPair::usability).collect();
        let mut by_usability: Vec<(u8, usize)> = usability
            .iter()
            .map(|(score, count)| (*score, *count))
            .collect();
        by_usability.sort();

        let prompt_sizes: Counter<u64> = word_pairs.iter().map(WordPair::prompt_id).collect();
        let ambiguous_prompts = prompt_sizes.values().filter(|&&count| count > 1).count();

        Summary {
            total: word_pairs.len(),
            by_usability,
            prompts: prompt_sizes.len(),
            ambiguous_prompts,
        }
    }

    pub fn with_usability(&self, score: u8) -> usize {
        self.by_usability
            .iter()
            .find(|(usability, _)| *usability == score)
            .map_or(0, |(_, count)| *count)
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# Word pairs: {}", self.total)?;
        for (score, count) in &self.by_usability {
            writeln!(f, "  usability {}: {}", score, count)?;
        }
        write!(
            f,
            "# Prompts: {} ({} ambiguous)",
            self.prompts, self.ambiguous_prompts
        )
    }
}

/// Distinct words appearing in `word_pairs`.
pub fn distinct_words(word_pairs: &[WordPair]) -> usize {
    word_pairs
        .iter()
        .flat_map(|word_pair| word_pair.words())
        .collect::<HashSet<&str>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintsFinder;
    use crate::settings::Settings;
    use crate::shape::Shape;

    fn pair(length: usize, index: usize, word1: &str, word2: &str, usability: u8) -> WordPair {
        WordPair::new(Shape::new(length, index), word1, word2, usability).unwrap()
    }

    fn sample() -> Vec<WordPair> {
        vec![
            pair(5, 1, "sinew", "screw", 2),
            pair(4, 2, "cake", "cait", 1),
            pair(4, 2, "bake", "bait", 2),
        ]
    }

    #[test]
    fn test_write_pairs() {
        let mut buffer = Vec::new();
        write_pairs(&mut buffer, &sample()).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ba(ke/it)  [2]\nca(ke/it)  [1]\ns(in/cr)ew  [2]\n"
        );
    }

    #[test]
    fn test_write_constrained_pairs() {
        let annotated = ConstraintsFinder::new(&Settings::new(3, 12, 1).unwrap())
            .find_constraints(sample())
            .unwrap();

        let mut buffer = Vec::new();
        write_constrained_pairs(&mut buffer, &annotated).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ba(ke/it)  [2]  [c, -]  [10]\n\
             ca(ke/it)  [1]  [b, -]  [10]\n\
             s(in/cr)ew  [2]  [-, -, -]  [000]\n"
        );
    }

    #[test]
    fn test_summary() {
        let pairs = sample();
        let summary = Summary::from_pairs(&pairs);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_usability, vec![(1, 1), (2, 2)]);
        assert_eq!(summary.with_usability(0), 0);
        assert_eq!(summary.with_usability(2), 2);
        assert_eq!(summary.prompts, 2);
        assert_eq!(summary.ambiguous_prompts, 1);
        assert_eq!(distinct_words(&pairs), 6);
        assert!(summary.to_string().starts_with("# Word pairs: 3\n"));
    }
}
