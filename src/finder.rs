use std::cmp::Ordering;
use std::time::Instant;

use log::{debug, info, trace};

use crate::error::Result;
use crate::pair::WordPair;
use crate::shape::Shape;
use crate::words::Wordlist;

/// A word as seen during one rotation pass: after `r` passes its last `r`
/// letters have been moved to the front.
#[derive(Debug, Clone)]
struct RotatedWord {
    letters: Vec<u8>,
    usable: bool,
}

impl RotatedWord {
    fn len(&self) -> usize {
        self.letters.len()
    }

    /// Everything except the final two letters.
    fn stem(&self) -> &[u8] {
        &self.letters[..self.letters.len() - 2]
    }

    fn tail(&self) -> [u8; 2] {
        let len = self.letters.len();
        [self.letters[len - 2], self.letters[len - 1]]
    }

    fn rotated(mut self) -> Self {
        self.letters.rotate_right(1);
        self
    }

    /// The original spelling, given how many passes this word has been through.
    fn unrotated(&self, rotation: usize) -> String {
        let mut letters = self.letters.clone();
        letters.rotate_left(rotation);
        letters.into_iter().map(char::from).collect()
    }

    fn usability(&self) -> u8 {
        u8::from(self.usable)
    }
}

/// Longer words first, then alphabetical.
fn compare_words(a: &RotatedWord, b: &RotatedWord) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.letters.cmp(&b.letters))
}

/// Finds every split-decisions word pair in a word list.
///
/// Rather than comparing all words against each other, each pass sorts the
/// words so that those sharing everything but their last two letters sit next
/// to each other. Between passes every word is rotated by one letter, moving
/// the split position one step towards the front.
#[derive(Debug, Default)]
pub struct WordPairFinder;

impl WordPairFinder {
    pub fn new() -> Self {
        WordPairFinder
    }

    /// All word pairs in `wordlist`, sorted by shape, then splits, then shared
    /// letters. Each pair's usability is the number of its words marked usable.
    pub fn find_word_pairs(&self, wordlist: &Wordlist) -> Result<Vec<WordPair>> {
        let start = Instant::now();
        let mut words: Vec<RotatedWord> = wordlist
            .words()
            .iter()
            .map(|word| RotatedWord {
                letters: word.letters().as_bytes().to_vec(),
                usable: word.is_usable(),
            })
            .collect();
        words.sort_by(compare_words);

        let max_length = wordlist.max_length();
        let mut word_pairs: Vec<WordPair> = Vec::new();

        for rotation in 0..max_length.saturating_sub(1) {
            let found = WordPairFinder::sweep(&words, rotation, &mut word_pairs)?;
            debug!(
                "Rotation {}: {} words, {} pairs",
                rotation,
                words.len(),
                found
            );
            words = WordPairFinder::next_pass(words, rotation);
        }

        word_pairs.sort_by(WordPair::cmp_by_prompt);
        info!(
            "Found {} word pairs among {} words in {:.2?}",
            word_pairs.len(),
            wordlist.len(),
            start.elapsed()
        );

        Ok(word_pairs)
    }

    /// Emits every pair in a sorted pass whose words differ in exactly their
    /// last two letters. Returns how many were found.
    fn sweep(words: &[RotatedWord], rotation: usize, output: &mut Vec<WordPair>) -> Result<usize> {
        let mut found = 0_usize;

        for (i, current) in words.iter().enumerate().rev() {
            let current_tail = current.tail();

            for next in words[..i].iter().rev() {
                // Sorting keeps equal stems contiguous, so nothing earlier can match.
                if next.len() != current.len() || next.stem() != current.stem() {
                    break;
                }

                let next_tail = next.tail();
                if current_tail[0] == next_tail[0] || current_tail[1] == next_tail[1] {
                    continue;
                }

                let length = current.len();
                let shape = Shape::new(length, length - rotation - 2);
                let word_pair = WordPair::new(
                    shape,
                    &current.unrotated(rotation),
                    &next.unrotated(rotation),
                    current.usability() + next.usability(),
                )?;
                trace!("{}  [{}]", word_pair, word_pair.usability());

                output.push(word_pair);
                found += 1;
            }
        }

        Ok(found)
    }

    /// Drops words with no split position left, rotates the rest and re-sorts.
    fn next_pass(words: Vec<RotatedWord>, rotation: usize) -> Vec<RotatedWord> {
        let mut next: Vec<RotatedWord> = words
            .into_iter()
            .filter(|word| word.len() > rotation + 2)
            .map(RotatedWord::rotated)
            .collect();
        next.sort_by(compare_words);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    const NO_USABLE: Option<Vec<&str>> = None;

    fn find(words: &[&str]) -> Vec<WordPair> {
        let wordlist = Wordlist::from_words(words.iter(), NO_USABLE, &Settings::default());
        WordPairFinder::new().find_word_pairs(&wordlist).unwrap()
    }

    /// (lesser word, greater word, split index)
    fn triples(pairs: &[WordPair]) -> BTreeSet<(String, String, usize)> {
        pairs
            .iter()
            .map(|pair| {
                let [a, b] = pair.words();
                let (low, high) = if a < b { (a, b) } else { (b, a) };
                (low.to_string(), high.to_string(), pair.shape().index())
            })
            .collect()
    }

    fn brute_force(words: &[String]) -> BTreeSet<(String, String, usize)> {
        let mut found = BTreeSet::new();
        for (i, a) in words.iter().enumerate() {
            for b in &words[i + 1..] {
                if a.len() != b.len() || a == b {
                    continue;
                }
                let differing: Vec<usize> = a
                    .bytes()
                    .zip(b.bytes())
                    .enumerate()
                    .filter(|(_, (x, y))| x != y)
                    .map(|(index, _)| index)
                    .collect();
                if differing.len() == 2 && differing[1] == differing[0] + 1 {
                    let (low, high) = if a < b { (a, b) } else { (b, a) };
                    found.insert((low.clone(), high.clone(), differing[0]));
                }
            }
        }
        found
    }

    /// Words over a tiny alphabet so that near-duplicates are common.
    fn random_words(rng: &mut StdRng, count: usize) -> Vec<String> {
        let alphabet = [b'a', b'b', b'c', b'e'];
        (0..count)
            .map(|_| {
                let length = rng.gen_range(3..=7);
                (0..length)
                    .map(|_| char::from(*alphabet.choose(&mut *rng).unwrap()))
                    .collect()
            })
            .collect()
    }

    /// Long words clustered around a few stems: each base word comes with
    /// variants that rewrite two adjacent letters, so pairs turn up at every
    /// split position.
    fn clustered_long_words(rng: &mut StdRng, bases: usize) -> Vec<String> {
        let alphabet = [b'a', b'b', b'c'];
        let mut words = Vec::new();
        for _ in 0..bases {
            let length = rng.gen_range(8..=12);
            let base: Vec<u8> = (0..length)
                .map(|_| *alphabet.choose(&mut *rng).unwrap())
                .collect();
            for _ in 0..12 {
                let mut variant = base.clone();
                let index = rng.gen_range(0..=length - 2);
                variant[index] = *alphabet.choose(&mut *rng).unwrap();
                variant[index + 1] = *alphabet.choose(&mut *rng).unwrap();
                words.push(variant.into_iter().map(char::from).collect());
            }
            words.push(base.into_iter().map(char::from).collect());
        }
        words
    }

    #[test]
    fn test_single_pair() {
        let pairs = find(&["sinew", "screw"]);

        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.shape(), Shape::new(5, 1));
        assert_eq!(pair.splits(), ["in", "cr"]);
        assert_eq!(pair.letters(), "sew");
        assert_eq!(pair.prompt(), "-(in/cr)--");
        assert_eq!(pair.usability(), 2);
    }

    #[test]
    fn test_split_positions() {
        let pairs = find(&["visited", "visitor", "example", "exhaple", "bat", "bit"]);
        let found: Vec<String> = pairs.iter().map(|pair| pair.to_string()).collect();

        // bat/bit differ in a single letter
        assert_eq!(found, vec!["ex(ha/am)ple", "visit(or/ed)"]);
    }

    #[test]
    fn test_half_differences_are_rejected() {
        assert!(find(&["cart", "cars"]).is_empty());
        assert!(find(&["cart", "curt"]).is_empty());
        assert!(find(&["cart", "curd"]).is_empty());
        assert_eq!(find(&["cart", "cost"]).len(), 1);
    }

    #[test]
    fn test_first_word_pairs_are_found() {
        // The alphabetically first words must be reachable as candidates too.
        let pairs = find(&["abcd", "abxy"]);
        assert_eq!(
            triples(&pairs),
            BTreeSet::from([("abcd".to_string(), "abxy".to_string(), 2)])
        );
    }

    #[test]
    fn test_usability_scores() {
        let wordlist = Wordlist::from_words(
            vec!["sinew", "screw", "bake", "bait", "cake", "cain"],
            Some(vec!["sinew", "screw", "bake"]),
            &Settings::default(),
        );
        let pairs = WordPairFinder::new().find_word_pairs(&wordlist).unwrap();
        let scores: Vec<(String, u8)> = pairs
            .iter()
            .map(|pair| (pair.to_string(), pair.usability()))
            .collect();

        assert!(scores.contains(&("s(in/cr)ew".to_string(), 2)));
        assert!(scores.contains(&("ba(ke/it)".to_string(), 1)));
        assert!(scores.contains(&("ca(ke/in)".to_string(), 0)));
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5d1f);
        for round in 0..20 {
            let words = random_words(&mut rng, 30 + round * 10);
            let wordlist = Wordlist::from_words(words.iter(), NO_USABLE, &Settings::default());
            let unique: Vec<String> = wordlist
                .words()
                .iter()
                .map(|word| word.letters().to_string())
                .collect();

            let pairs = WordPairFinder::new().find_word_pairs(&wordlist).unwrap();
            let expected = brute_force(&unique);

            assert_eq!(pairs.len(), expected.len(), "duplicate pairs in round {}", round);
            assert_eq!(triples(&pairs), expected, "round {}", round);
        }
    }

    #[test]
    fn test_matches_brute_force_long_words() {
        let mut rng = StdRng::seed_from_u64(0x12ab);
        let mut longest_seen = 0;
        let mut earliest_split = usize::MAX;
        for round in 0..10 {
            let words = clustered_long_words(&mut rng, 6 + round);
            let wordlist = Wordlist::from_words(words.iter(), NO_USABLE, &Settings::default());
            let unique: Vec<String> = wordlist
                .words()
                .iter()
                .map(|word| word.letters().to_string())
                .collect();

            let pairs = WordPairFinder::new().find_word_pairs(&wordlist).unwrap();
            assert_eq!(triples(&pairs), brute_force(&unique), "round {}", round);
            assert_eq!(pairs.len(), brute_force(&unique).len(), "round {}", round);

            for pair in &pairs {
                longest_seen = longest_seen.max(pair.shape().length());
                if pair.shape().length() == 12 {
                    earliest_split = earliest_split.min(pair.shape().index());
                }
            }
        }
        assert_eq!(longest_seen, 12);
        assert!(earliest_split <= 2, "no early splits in 12-letter words");
    }

    #[test]
    fn test_pairs_are_valid_and_sorted() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = random_words(&mut rng, 200);
        let pairs = find(&words.iter().map(String::as_str).collect::<Vec<_>>());

        for pair in &pairs {
            let [a, b] = pair.words();
            let index = pair.shape().index();
            assert_eq!(a.len(), b.len());
            for (position, (x, y)) in a.bytes().zip(b.bytes()).enumerate() {
                if position == index || position == index + 1 {
                    assert_ne!(x, y, "{}", pair);
                } else {
                    assert_eq!(x, y, "{}", pair);
                }
            }
        }
        assert!(pairs
            .windows(2)
            .all(|window| window[0].cmp_by_prompt(&window[1]) != Ordering::Greater));
    }

    #[test]
    fn test_empty_wordlist() {
        assert!(find(&[]).is_empty());
    }
}
