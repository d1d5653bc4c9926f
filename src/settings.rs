use crate::error::{Error, Result};
use crate::shape::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};

/// How much a finder reports while it works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Silent,
    PrettyPrint,
    Debug,
}

impl Verbosity {
    pub fn shows_progress(self) -> bool {
        matches!(self, Verbosity::PrettyPrint | Verbosity::Debug)
    }
}

/// Usability scores a word pair can carry: the number of its two words that are
/// placeable on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Usability {
    ReferenceOnly = 0,
    OneWord = 1,
    BothWords = 2,
}

impl Usability {
    pub fn score(self) -> u8 {
        self as u8
    }

    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 => Some(Usability::ReferenceOnly),
            1 => Some(Usability::OneWord),
            2 => Some(Usability::BothWords),
            _ => None,
        }
    }
}

/// Knobs shared by every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    min_word_length: usize,
    max_word_length: usize,
    min_usability: u8,
    verbosity: Verbosity,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            min_word_length: MIN_WORD_LENGTH,
            max_word_length: MAX_WORD_LENGTH,
            min_usability: Usability::BothWords.score(),
            verbosity: Verbosity::Silent,
        }
    }
}

impl Settings {
    /// Word lengths are clamped into the supported domain; an empty range or an
    /// unreachable usability threshold is rejected.
    pub fn new(min_word_length: usize, max_word_length: usize, min_usability: u8) -> Result<Self> {
        let min_word_length = min_word_length.max(MIN_WORD_LENGTH);
        let max_word_length = max_word_length.min(MAX_WORD_LENGTH);

        if min_word_length > max_word_length {
            return Err(Error::InvalidSettings(format!(
                "minimum word length {} exceeds maximum word length {}",
                min_word_length, max_word_length
            )));
        }
        if Usability::from_score(min_usability).is_none() {
            return Err(Error::InvalidSettings(format!(
                "minimum usability {} is above {}",
                min_usability,
                Usability::BothWords.score()
            )));
        }

        Ok(Settings {
            min_word_length,
            max_word_length,
            min_usability,
            verbosity: Verbosity::Silent,
        })
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    pub fn min_usability(&self) -> u8 {
        self.min_usability
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn accepts_length(&self, length: usize) -> bool {
        (self.min_word_length..=self.max_word_length).contains(&length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.min_word_length(), 3);
        assert_eq!(settings.max_word_length(), 12);
        assert_eq!(settings.min_usability(), 2);
        assert_eq!(settings.verbosity(), Verbosity::Silent);
        assert!(settings.accepts_length(3));
        assert!(settings.accepts_length(12));
        assert!(!settings.accepts_length(2));
        assert!(!settings.accepts_length(13));
    }

    #[test]
    fn test_lengths_are_clamped() {
        let settings = Settings::new(1, 40, 0).unwrap();
        assert_eq!(settings.min_word_length(), MIN_WORD_LENGTH);
        assert_eq!(settings.max_word_length(), MAX_WORD_LENGTH);

        let settings = Settings::new(4, 10, 1).unwrap();
        assert!(!settings.accepts_length(3));
        assert!(settings.accepts_length(10));
        assert!(!settings.accepts_length(11));
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert!(matches!(
            Settings::new(8, 5, 2),
            Err(Error::InvalidSettings(_))
        ));
        assert!(matches!(
            Settings::new(3, 12, 3),
            Err(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_usability_scores() {
        assert_eq!(Usability::from_score(2), Some(Usability::BothWords));
        assert_eq!(Usability::from_score(3), None);
        assert!(Usability::OneWord < Usability::BothWords);
    }
}
