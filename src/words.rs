use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::settings::Settings;

/// A dictionary entry and whether it may be placed on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    letters: String,
    usable: bool,
}

impl Word {
    pub fn new(letters: impl Into<String>, usable: bool) -> Self {
        Word {
            letters: letters.into(),
            usable,
        }
    }

    pub fn letters(&self) -> &str {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn is_usable(&self) -> bool {
        self.usable
    }
}

/// The Wordlist object contains every reference word, deduplicated and
/// alphabetised, each tagged with its usability.
#[derive(Debug, Default)]
pub struct Wordlist {
    words: Vec<Word>,
}

impl Wordlist {
    /// Initialize a `Wordlist` from the reference list at `reference` and the
    /// optional placeable list at `usable`, one word per line. Without a usable
    /// list every word is usable.
    pub fn load(reference: &Path, usable: Option<&Path>, settings: &Settings) -> Result<Self> {
        let reference_lines = Wordlist::read_lines(reference)?;
        let usable_lines = usable.map(Wordlist::read_lines).transpose()?;

        let wordlist = Wordlist::from_words(reference_lines, usable_lines, settings);
        info!(
            "Loaded {} words ({} usable) from '{}'",
            wordlist.len(),
            wordlist.usable_count(),
            reference.display()
        );

        Ok(wordlist)
    }

    /// Lines are trimmed and lowercased; anything that is not a run of `a..=z`
    /// letters of an accepted length is dropped. Usable words missing from the
    /// reference list are added.
    pub fn from_words<R, U, S, T>(reference: R, usable: Option<U>, settings: &Settings) -> Self
    where
        R: IntoIterator<Item = S>,
        U: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let usable: Option<HashSet<String>> = usable.map(|lines| {
            lines
                .into_iter()
                .filter_map(|line| Wordlist::normalize(line.as_ref(), settings))
                .collect()
        });

        let mut entries: BTreeMap<String, bool> = BTreeMap::new();
        let mut dropped = 0_usize;
        for line in reference {
            match Wordlist::normalize(line.as_ref(), settings) {
                Some(word) => {
                    let is_usable = usable.as_ref().map_or(true, |set| set.contains(&word));
                    entries.insert(word, is_usable);
                }
                None => dropped += 1,
            }
        }

        if let Some(usable) = usable {
            for word in usable {
                entries.entry(word).or_insert(true);
            }
        }

        if dropped > 0 {
            debug!("Dropped {} reference lines outside the accepted word format", dropped);
        }
        if entries.is_empty() {
            warn!("Word list is empty after filtering");
        }

        Wordlist {
            words: entries
                .into_iter()
                .map(|(letters, usable)| Word { letters, usable })
                .collect(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn usable_count(&self) -> usize {
        self.words.iter().filter(|word| word.usable).count()
    }

    pub fn max_length(&self) -> usize {
        self.words.iter().map(Word::len).max().unwrap_or(0)
    }

    fn normalize(line: &str, settings: &Settings) -> Option<String> {
        let word = line.trim_start_matches('\u{feff}').trim().to_ascii_lowercase();
        let well_formed = word.bytes().all(|byte| byte.is_ascii_lowercase());
        (well_formed && settings.accepts_length(word.len())).then_some(word)
    }

    /// Lines that are not valid UTF-8 are dropped; only genuine read failures
    /// are errors.
    fn read_lines(path: &Path) -> Result<Vec<String>> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;

        let mut lines = Vec::new();
        let mut undecodable = 0_usize;
        for raw in BufReader::new(file).split(b'\n') {
            match String::from_utf8(raw.map_err(io_error)?) {
                Ok(line) => lines.push(line),
                Err(_) => undecodable += 1,
            }
        }

        if undecodable > 0 {
            debug!(
                "Dropped {} lines of '{}' that are not valid UTF-8",
                undecodable,
                path.display()
            );
        }

        Ok(lines)
    }
}
