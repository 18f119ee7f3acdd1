pub mod flashcard;
pub mod quiz;
pub mod summary;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::words::WordEntry;

/// Maximum number of questions in one quiz.
pub const QUIZ_LENGTH: usize = 10;
/// Wrong options offered next to the correct one, when the sample has enough.
pub const DISTRACTOR_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),
    #[error("단어가 없어요. 다른 세트를 선택해주세요.")]
    EmptyWordSet { set: String },
}

/// Which side of a word is the prompt and which is the expected answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Japanese prompt, Korean answer.
    SourceToTarget,
    /// Korean prompt, Japanese answer.
    TargetToSource,
}

impl Direction {
    pub fn prompt<'a>(self, word: &'a WordEntry) -> &'a str {
        match self {
            Direction::SourceToTarget => &word.source_text,
            Direction::TargetToSource => &word.target_text,
        }
    }

    pub fn answer<'a>(self, word: &'a WordEntry) -> &'a str {
        match self {
            Direction::SourceToTarget => &word.target_text,
            Direction::TargetToSource => &word.source_text,
        }
    }

    /// Reading is only shown under a Japanese prompt.
    pub fn reading(self, word: &WordEntry) -> Option<&str> {
        match self {
            Direction::SourceToTarget if !word.source_reading.is_empty() => {
                Some(&word.source_reading)
            }
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::SourceToTarget => "일본어 → 한국어",
            Direction::TargetToSource => "한국어 → 일본어",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    QuizJaKo,
    QuizKoJa,
    Flashcard,
}

impl SessionMode {
    pub const ALL: [SessionMode; 3] = [
        SessionMode::QuizJaKo,
        SessionMode::QuizKoJa,
        SessionMode::Flashcard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::QuizJaKo => "quiz-ja-ko",
            SessionMode::QuizKoJa => "quiz-ko-ja",
            SessionMode::Flashcard => "flashcard",
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            SessionMode::QuizJaKo => Some(Direction::SourceToTarget),
            SessionMode::QuizKoJa => Some(Direction::TargetToSource),
            SessionMode::Flashcard => None,
        }
    }

    pub fn requires_name(self) -> bool {
        self.direction().is_some()
    }
}

/// Settings for one quiz run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub direction: Direction,
    pub word_set: String,
    pub participant_name: String,
    pub quiz_length: usize,
    pub distractor_count: usize,
}

impl SessionConfig {
    pub fn quiz(direction: Direction, word_set: &str, participant_name: &str) -> Self {
        Self {
            direction,
            word_set: word_set.to_string(),
            participant_name: participant_name.trim().to_string(),
            quiz_length: QUIZ_LENGTH,
            distractor_count: DISTRACTOR_COUNT,
        }
    }
}

/// Reject an empty set before any mode is started.
pub fn require_words(set: &str, words: &[WordEntry]) -> Result<(), SessionError> {
    if words.is_empty() {
        return Err(SessionError::EmptyWordSet {
            set: set.to_string(),
        });
    }
    Ok(())
}
