use rand::Rng;
use tracing::info;

use crate::engine::sampler;
use crate::words::WordEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardView {
    pub front_text: String,
    pub front_reading: String,
    pub back_text: String,
    /// "3 / 12"
    pub counter_label: String,
}

/// A shuffled deck and a cursor into it. Flipping is not tracked here.
#[derive(Clone, Debug)]
pub struct FlashcardState {
    ordered_words: Vec<WordEntry>,
    cursor: usize,
}

impl FlashcardState {
    /// An empty `words` gives an empty deck with no current card.
    pub fn start<R: Rng + ?Sized>(words: &[WordEntry], rng: &mut R) -> Self {
        let ordered_words = sampler::shuffle(words, rng);
        info!(cards = ordered_words.len(), "flashcards started");
        Self {
            ordered_words,
            cursor: 0,
        }
    }

    /// Stops at the last card.
    pub fn next(mut self) -> Self {
        if self.cursor + 1 < self.ordered_words.len() {
            self.cursor += 1;
        }
        self
    }

    /// Stops at the first card.
    pub fn prev(mut self) -> Self {
        self.cursor = self.cursor.saturating_sub(1);
        self
    }

    pub fn view(&self) -> Option<FlashcardView> {
        let card = self.ordered_words.get(self.cursor)?;
        Some(FlashcardView {
            front_text: card.source_text.clone(),
            front_reading: card.source_reading.clone(),
            back_text: card.target_text.clone(),
            counter_label: format!("{} / {}", self.cursor + 1, self.ordered_words.len()),
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.ordered_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_words.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.ordered_words.len()
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.ordered_words
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn deck(n: usize) -> FlashcardState {
        let words: Vec<WordEntry> = (0..n)
            .map(|i| WordEntry::new(&format!("語{i}"), &format!("ご{i}"), &format!("단어{i}")))
            .collect();
        let mut rng = SmallRng::seed_from_u64(n as u64);
        FlashcardState::start(&words, &mut rng)
    }

    #[test]
    fn test_new_deck_starts_at_zero() {
        let state = deck(5);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.len(), 5);
        assert!(state.is_first());
        assert_eq!(state.view().unwrap().counter_label, "1 / 5");
    }

    #[test]
    fn test_next_is_idempotent_at_last_card() {
        let mut state = deck(3);
        for _ in 0..10 {
            state = state.next();
            assert!(state.cursor() < 3);
        }
        assert_eq!(state.cursor(), 2);
        assert!(state.is_last());
        assert_eq!(state.next().cursor(), 2);
    }

    #[test]
    fn test_prev_stops_at_first_card() {
        let state = deck(3).prev().prev();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_four_next_one_prev() {
        let mut state = deck(5);
        for _ in 0..4 {
            state = state.next();
        }
        state = state.prev();
        assert_eq!(state.cursor(), 3);
        assert_eq!(state.view().unwrap().counter_label, "4 / 5");
    }

    #[test]
    fn test_empty_deck_has_no_card() {
        let state = deck(0);
        assert!(state.is_empty());
        assert!(state.view().is_none());
        let state = state.next().prev();
        assert_eq!(state.cursor(), 0);
        assert!(state.view().is_none());
    }

    #[test]
    fn test_view_shows_both_sides() {
        let state = deck(1);
        let view = state.view().unwrap();
        assert_eq!(view.front_text, "語0");
        assert_eq!(view.front_reading, "ご0");
        assert_eq!(view.back_text, "단어0");
    }
}
