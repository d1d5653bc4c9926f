use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use rayon::prelude::*;

use crate::bitmask::BitSet26;
use crate::error::{Error, Result};
use crate::pair::{Constraints, WordPair};
use crate::settings::{Settings, Verbosity};

/// Works out, for every placeable word pair, which letters a solver could get
/// wrong and which revealed positions are enough to rule out every other pair
/// with the same prompt.
pub struct ConstraintsFinder {
    min_usability: u8,
    verbosity: Verbosity,
}

impl ConstraintsFinder {
    pub fn new(settings: &Settings) -> Self {
        ConstraintsFinder {
            min_usability: settings.min_usability(),
            verbosity: settings.verbosity(),
        }
    }

    /// Annotates every pair whose usability reaches the threshold. Pairs below it
    /// still take part as rivals within their prompt but are not returned.
    ///
    /// Each prompt group is independent, so groups are solved in parallel; the
    /// output is ordered by prompt id, then shared letters.
    pub fn find_constraints(&self, mut word_pairs: Vec<WordPair>) -> Result<Vec<WordPair>> {
        let start = Instant::now();
        word_pairs.sort_by(|a, b| {
            a.prompt_id()
                .cmp(&b.prompt_id())
                .then_with(|| a.letters().cmp(b.letters()))
        });

        let groups = prompt_groups(&word_pairs);
        let pb = self.progress_bar(groups.len() as u64)?;

        let annotated: Vec<Vec<WordPair>> = groups
            .par_iter()
            .map(|group| {
                let result = self.constrain_group(group);
                pb.inc(1);
                result
            })
            .collect::<Result<_>>()?;

        pb.finish_and_clear();

        let annotated: Vec<WordPair> = annotated.into_iter().flatten().collect();
        info!(
            "Constrained {} of {} word pairs across {} prompts in {:.2?}",
            annotated.len(),
            word_pairs.len(),
            groups.len(),
            start.elapsed()
        );

        Ok(annotated)
    }

    fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        let pb = if self.verbosity.shows_progress() {
            ProgressBar::new(len)
        } else {
            ProgressBar::hidden()
        };

        let sty = ProgressStyle::with_template(
            "[{spinner:.green} {elapsed_precise}] {wide_bar:.cyan/blue} {pos:>7}/{len:7} {msg} (eta {eta})",
        )?
        .progress_chars("##-");
        pb.set_style(sty);
        pb.set_message("prompts");
        if self.verbosity.shows_progress() {
            pb.enable_steady_tick(Duration::from_millis(250));
        }

        Ok(pb)
    }

    fn constrain_group(&self, group: &[WordPair]) -> Result<Vec<WordPair>> {
        let mut output = Vec::new();

        for (i, word_pair) in group.iter().enumerate() {
            if word_pair.usability() < self.min_usability {
                continue;
            }

            let rivals: Vec<&WordPair> = group
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != i)
                .map(|(_, other)| other)
                .collect();

            let constraints = Constraints {
                mistakeables: mistakeables(word_pair, &rivals),
                anchors: anchors(word_pair, &rivals)?,
            };
            if self.verbosity == Verbosity::Debug && !rivals.is_empty() {
                debug!(
                    "{}  {} rivals  {:?}",
                    word_pair,
                    rivals.len(),
                    constraints.anchors
                );
            }

            output.push(word_pair.clone().with_constraints(constraints));
        }

        Ok(output)
    }
}

/// Splits a slice sorted by prompt id into runs sharing one prompt id.
pub fn prompt_groups(word_pairs: &[WordPair]) -> Vec<&[WordPair]> {
    let mut groups = Vec::new();
    let mut start = 0;

    for end in 1..=word_pairs.len() {
        let boundary = end == word_pairs.len()
            || word_pairs[end].prompt_id() != word_pairs[start].prompt_id();
        if boundary {
            groups.push(&word_pairs[start..end]);
            start = end;
        }
    }

    groups
}

/// For each shared-letter position, every letter some rival has there that
/// differs from `word_pair`'s own.
pub fn mistakeables(word_pair: &WordPair, rivals: &[&WordPair]) -> Vec<BitSet26> {
    let mut mistakeables = vec![BitSet26::EMPTY; word_pair.letters_bits().len()];

    for rival in rivals {
        let positions = word_pair.letters_bits().iter().zip(rival.letters_bits());
        for (slot, (own, theirs)) in mistakeables.iter_mut().zip(positions) {
            if own != theirs {
                *slot |= *theirs;
            }
        }
    }

    mistakeables
}

/// Positions where the shared letters of two prompt-equivalent pairs differ.
fn differences(word_pair: &WordPair, rival: &WordPair) -> BitSet26 {
    word_pair
        .letters_bits()
        .iter()
        .zip(rival.letters_bits())
        .enumerate()
        .filter(|(_, (own, theirs))| own != theirs)
        .fold(BitSet26::EMPTY, |set, (index, _)| set | BitSet26::position(index))
}

/// Every smallest set of positions that, once revealed, rules out all rivals.
/// With no rivals the only anchor is the empty set.
pub fn anchors(word_pair: &WordPair, rivals: &[&WordPair]) -> Result<Vec<BitSet26>> {
    if rivals.is_empty() {
        return Ok(vec![BitSet26::EMPTY]);
    }

    let width = word_pair.letters().len();
    let differences: Vec<BitSet26> = rivals
        .iter()
        .map(|rival| differences(word_pair, rival))
        .collect();

    for size in 1..=width {
        let anchors: Vec<BitSet26> = BitSet26::subsets(width, size)
            .filter(|subset| {
                differences
                    .iter()
                    .all(|difference| subset.intersects(*difference))
            })
            .collect();

        if !anchors.is_empty() {
            return Ok(anchors);
        }
    }

    error!(
        "No anchors found for word pair {}. This should be impossible",
        word_pair
    );
    Err(Error::NoAnchor {
        pair: word_pair.to_string(),
    })
}
