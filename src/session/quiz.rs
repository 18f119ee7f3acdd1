use rand::Rng;
use tracing::{debug, info};

use crate::engine::sampler;
use crate::session::summary::SessionSummary;
use crate::session::{SessionConfig, SessionError};
use crate::words::WordEntry;

/// Everything the presentation needs to draw one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt_text: String,
    pub prompt_reading: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: String,
    /// "3/10": 1-based question number over total.
    pub progress_label: String,
    /// "2/2": correct answers over questions answered so far.
    pub score_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_answer: String,
    pub selected: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizStep {
    Question(QuestionView),
    Finished(SessionSummary),
}

/// Multiple-choice quiz over a sample of at most `quiz_length` words.
///
/// Every transition consumes the state and hands back the next one, so a
/// caller can never observe a half-applied update. `submit_answer` scores the
/// current question without moving on; `advance` moves on. The gap between the
/// two is where the presentation shows feedback.
#[derive(Clone, Debug)]
pub struct QuizState {
    config: SessionConfig,
    ordered_words: Vec<WordEntry>,
    index: usize,
    correct_count: usize,
    total: usize,
    answered: bool,
}

impl QuizState {
    pub fn start<R: Rng + ?Sized>(
        words: &[WordEntry],
        config: SessionConfig,
        rng: &mut R,
    ) -> Result<(Self, QuizStep), SessionError> {
        if config.participant_name.trim().is_empty() {
            return Err(SessionError::Validation("이름을 입력해주세요.".to_string()));
        }

        let ordered_words = sampler::sample_n(words, config.quiz_length, rng);
        let total = ordered_words.len();
        info!(
            set = %config.word_set,
            direction = ?config.direction,
            total,
            "quiz started"
        );

        let state = Self {
            config,
            ordered_words,
            index: 0,
            correct_count: 0,
            total,
            answered: false,
        };
        let step = state.current_step(rng);
        Ok((state, step))
    }

    /// Question for the current index, `None` once the quiz is over.
    ///
    /// Wrong options come from the session's own sample, deduplicated and
    /// excluding the correct answer. When fewer distinct values exist than
    /// `distractor_count`, fewer options are offered.
    pub fn build_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<QuestionView> {
        let current = self.ordered_words.get(self.index)?;
        let direction = self.config.direction;
        let correct_answer = direction.answer(current).to_string();

        let wrong_pool: Vec<String> =
            sampler::dedup_excluding(&self.ordered_words, current, |w| {
                direction.answer(w).to_string()
            })
            .into_iter()
            .collect();
        let wrong = sampler::sample_n(&wrong_pool, self.config.distractor_count, rng);

        let mut options = Vec::with_capacity(wrong.len() + 1);
        options.push(correct_answer.clone());
        options.extend(wrong);
        let options = sampler::shuffle(&options, rng);

        debug!(
            index = self.index,
            pool = wrong_pool.len(),
            options = options.len(),
            "question built"
        );

        Some(QuestionView {
            prompt_text: direction.prompt(current).to_string(),
            prompt_reading: direction.reading(current).map(str::to_string),
            options,
            correct_answer,
            progress_label: format!("{}/{}", self.index + 1, self.total),
            score_label: format!("{}/{}", self.correct_count, self.index),
        })
    }

    /// Score `selected` against `correct_answer` by exact string equality.
    ///
    /// Only the first submission per question counts; repeats get feedback
    /// but leave the score alone.
    pub fn submit_answer(mut self, selected: &str, correct_answer: &str) -> (Self, AnswerFeedback) {
        let is_correct = selected == correct_answer;
        if !self.answered && !self.is_finished() {
            if is_correct {
                self.correct_count += 1;
            }
            self.answered = true;
        }
        let feedback = AnswerFeedback {
            is_correct,
            correct_answer: correct_answer.to_string(),
            selected: selected.to_string(),
        };
        (self, feedback)
    }

    pub fn advance<R: Rng + ?Sized>(mut self, rng: &mut R) -> (Self, QuizStep) {
        self.index = (self.index + 1).min(self.total);
        self.answered = false;
        let step = self.current_step(rng);
        (self, step)
    }

    fn current_step<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizStep {
        match self.build_question(rng) {
            Some(question) => QuizStep::Question(question),
            None => {
                let summary = self.summary();
                info!(
                    correct = summary.correct_count,
                    total = summary.total,
                    percent = summary.percent,
                    "quiz finished"
                );
                QuizStep::Finished(summary)
            }
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(
            self.correct_count,
            self.total,
            &self.config.participant_name,
            self.config.direction,
            &self.config.word_set,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.total
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.ordered_words
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 0.0..=1.0 share of questions already behind us.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.index as f64 / self.total as f64
    }
}
