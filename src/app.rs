use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::event::AppEvent;
use crate::notify::{DeliveryStatus, Notifier, is_valid_email};
use crate::session::flashcard::{FlashcardState, FlashcardView};
use crate::session::quiz::{AnswerFeedback, QuestionView, QuizState, QuizStep};
use crate::session::summary::SessionSummary;
use crate::session::{SessionConfig, SessionMode, require_words};
use crate::ui::components::menu::Menu;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::words::{WordEntry, WordRepository, WordSetInfo};

const NAME_MAX_CHARS: usize = 20;
const EMAIL_MAX_CHARS: usize = 254;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Start,
    Quiz,
    Flashcard,
    Result,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartFocus {
    Mode,
    WordSet,
    Name,
}

impl StartFocus {
    pub fn next(self) -> Self {
        match self {
            StartFocus::Mode => StartFocus::WordSet,
            StartFocus::WordSet => StartFocus::Name,
            StartFocus::Name => StartFocus::Mode,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            StartFocus::Mode => StartFocus::Name,
            StartFocus::WordSet => StartFocus::Mode,
            StartFocus::Name => StartFocus::WordSet,
        }
    }
}

/// Presentation state around a running quiz. `state` is only `None` while an
/// engine call has it checked out.
#[derive(Default)]
pub struct QuizScreen {
    pub state: Option<QuizState>,
    pub question: Option<QuestionView>,
    pub feedback: Option<AnswerFeedback>,
    pub cursor: usize,
    pub locked_until: Option<Instant>,
}

impl QuizScreen {
    pub fn is_locked(&self) -> bool {
        self.locked_until.is_some()
    }
}

#[derive(Default)]
pub struct FlashcardScreen {
    pub state: Option<FlashcardState>,
    pub flipped: bool,
}

impl FlashcardScreen {
    pub fn view(&self) -> Option<FlashcardView> {
        self.state.as_ref().and_then(|s| s.view())
    }
}

pub enum MailState {
    Idle,
    Editing { input: LineInput, error: Option<String> },
    Sending,
    Done { message: String, failed: bool },
}

/// What a delivery worker needs; produced by a valid e-mail submission.
#[derive(Clone, Debug)]
pub struct DeliveryRequest {
    pub summary: SessionSummary,
    pub recipient: String,
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub start_focus: StartFocus,
    pub word_sets: Vec<WordSetInfo>,
    pub word_set_index: usize,
    pub name_input: LineInput,
    pub start_error: Option<String>,
    pub quiz: QuizScreen,
    pub flashcard: FlashcardScreen,
    pub last_summary: Option<SessionSummary>,
    pub mail: MailState,
    pub delivery_in_flight: bool,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    session_mode: SessionMode,
    session_set: String,
    session_words: Vec<WordEntry>,
    repository: WordRepository,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        Self::with_parts(config, WordRepository::load(), theme, SmallRng::from_entropy())
    }

    pub fn with_parts(
        config: Config,
        repository: WordRepository,
        theme: &'static Theme,
        rng: SmallRng,
    ) -> Self {
        let word_sets = repository.available_sets();
        let word_set_index = word_sets
            .iter()
            .position(|s| s.id == config.word_set)
            .unwrap_or(0);
        let name_input = LineInput::with_limit(&config.participant_name, NAME_MAX_CHARS);

        Self {
            screen: AppScreen::Start,
            menu: Menu::new(theme),
            start_focus: StartFocus::Mode,
            word_sets,
            word_set_index,
            name_input,
            start_error: None,
            quiz: QuizScreen::default(),
            flashcard: FlashcardScreen::default(),
            last_summary: None,
            mail: MailState::Idle,
            delivery_in_flight: false,
            theme,
            config,
            should_quit: false,
            session_mode: SessionMode::QuizJaKo,
            session_set: String::new(),
            session_words: Vec::new(),
            repository,
            rng,
        }
    }

    pub fn selected_word_set(&self) -> Option<&WordSetInfo> {
        self.word_sets.get(self.word_set_index)
    }

    pub fn cycle_word_set(&mut self, forward: bool) {
        let n = self.word_sets.len();
        if n == 0 {
            return;
        }
        self.word_set_index = if forward {
            (self.word_set_index + 1) % n
        } else {
            (self.word_set_index + n - 1) % n
        };
        self.start_error = None;
    }

    pub fn set_focus(&mut self, focus: StartFocus) {
        self.start_focus = focus;
        self.menu.focused = focus == StartFocus::Mode;
    }

    pub fn session_mode(&self) -> SessionMode {
        self.session_mode
    }

    pub fn session_words(&self) -> &[WordEntry] {
        &self.session_words
    }

    pub fn start_session(&mut self) {
        let set_id = self
            .selected_word_set()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| self.config.word_set.clone());
        let words = self.repository.get_word_set(&set_id);
        if let Err(e) = require_words(&set_id, &words) {
            warn!(set = %set_id, "refusing to start on an empty word set");
            self.start_error = Some(e.to_string());
            return;
        }
        self.launch(self.menu.selected_mode(), &set_id, words);
    }

    /// Same mode over the words the last session used.
    pub fn retry(&mut self) {
        let words = self.session_words.clone();
        let set_id = self.session_set.clone();
        if require_words(&set_id, &words).is_err() {
            self.go_home();
            return;
        }
        self.launch(self.session_mode, &set_id, words);
    }

    fn launch(&mut self, mode: SessionMode, set_id: &str, words: Vec<WordEntry>) {
        self.start_error = None;
        self.mail = MailState::Idle;
        self.last_summary = None;

        match mode.direction() {
            Some(direction) => {
                let session = SessionConfig::quiz(direction, set_id, self.name_input.value());
                match QuizState::start(&words, session, &mut self.rng) {
                    Ok((state, step)) => {
                        self.session_words = state.words().to_vec();
                        self.quiz = QuizScreen {
                            state: Some(state),
                            ..QuizScreen::default()
                        };
                        self.screen = AppScreen::Quiz;
                        self.apply_step(step);
                    }
                    Err(e) => {
                        self.start_error = Some(e.to_string());
                        self.set_focus(StartFocus::Name);
                        self.screen = AppScreen::Start;
                        return;
                    }
                }
            }
            None => {
                let state = FlashcardState::start(&words, &mut self.rng);
                self.session_words = state.words().to_vec();
                self.flashcard = FlashcardScreen {
                    state: Some(state),
                    flipped: false,
                };
                self.screen = AppScreen::Flashcard;
            }
        }
        self.session_mode = mode;
        self.session_set = set_id.to_string();
    }

    fn apply_step(&mut self, step: QuizStep) {
        match step {
            QuizStep::Question(question) => {
                self.quiz.question = Some(question);
                self.quiz.feedback = None;
                self.quiz.cursor = 0;
            }
            QuizStep::Finished(summary) => {
                self.quiz.question = None;
                self.quiz.feedback = None;
                self.last_summary = Some(summary);
                self.mail = MailState::Idle;
                self.screen = AppScreen::Result;
            }
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.quiz.is_locked() {
            return;
        }
        let n = self.quiz.question.as_ref().map_or(0, |q| q.options.len());
        if n == 0 {
            return;
        }
        let cur = self.quiz.cursor as isize;
        self.quiz.cursor = (cur + delta).rem_euclid(n as isize) as usize;
    }

    pub fn select_option(&mut self, index: usize) {
        self.select_option_at(index, Instant::now());
    }

    /// Scores option `index` and locks input for the feedback delay. Ignored
    /// while a previous answer's feedback is still showing.
    pub fn select_option_at(&mut self, index: usize, now: Instant) {
        if self.screen != AppScreen::Quiz || self.quiz.is_locked() {
            return;
        }
        let Some(question) = &self.quiz.question else {
            return;
        };
        let Some(selected) = question.options.get(index).cloned() else {
            return;
        };
        let correct = question.correct_answer.clone();
        let Some(state) = self.quiz.state.take() else {
            return;
        };

        let (state, feedback) = state.submit_answer(&selected, &correct);
        self.quiz.state = Some(state);
        self.quiz.feedback = Some(feedback);
        self.quiz.cursor = index;
        self.quiz.locked_until = Some(now + Duration::from_millis(self.config.feedback_delay_ms));
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Moves to the next question once the feedback delay has run out.
    pub fn tick_at(&mut self, now: Instant) {
        if self.screen != AppScreen::Quiz {
            return;
        }
        match self.quiz.locked_until {
            Some(until) if now >= until => {}
            _ => return,
        }
        self.quiz.locked_until = None;
        let Some(state) = self.quiz.state.take() else {
            return;
        };
        let (state, step) = state.advance(&mut self.rng);
        self.quiz.state = Some(state);
        self.apply_step(step);
    }

    pub fn flashcard_next(&mut self) {
        if let Some(state) = self.flashcard.state.take() {
            self.flashcard.state = Some(state.next());
            self.flashcard.flipped = false;
        }
    }

    pub fn flashcard_prev(&mut self) {
        if let Some(state) = self.flashcard.state.take() {
            self.flashcard.state = Some(state.prev());
            self.flashcard.flipped = false;
        }
    }

    pub fn flashcard_flip(&mut self) {
        if self.flashcard.state.is_some() {
            self.flashcard.flipped = !self.flashcard.flipped;
        }
    }

    /// Leaves any session; its state is dropped.
    pub fn go_home(&mut self) {
        if matches!(self.screen, AppScreen::Quiz | AppScreen::Flashcard) {
            info!(mode = self.session_mode.as_str(), "session abandoned");
        }
        self.screen = AppScreen::Start;
        self.quiz = QuizScreen::default();
        self.flashcard = FlashcardScreen::default();
        self.last_summary = None;
        self.mail = MailState::Idle;
    }

    pub fn begin_email(&mut self) {
        if self.last_summary.is_none() || self.delivery_in_flight {
            return;
        }
        self.mail = MailState::Editing {
            input: LineInput::with_limit(&self.config.recipient, EMAIL_MAX_CHARS),
            error: None,
        };
    }

    pub fn clear_mail_error(&mut self) {
        if let MailState::Editing { error, .. } = &mut self.mail {
            *error = None;
        }
    }

    pub fn cancel_email(&mut self) {
        if matches!(self.mail, MailState::Editing { .. }) {
            self.mail = MailState::Idle;
        }
    }

    /// Validates the typed address. On success the screen shows "sending" and
    /// the caller gets the request to hand to a worker.
    pub fn submit_email(&mut self) -> Option<DeliveryRequest> {
        if self.delivery_in_flight {
            return None;
        }
        let MailState::Editing { input, error } = &mut self.mail else {
            return None;
        };
        let recipient = input.value().trim().to_string();
        if !is_valid_email(&recipient) {
            *error = Some("올바른 이메일 주소를 입력해주세요.".to_string());
            return None;
        }
        let summary = self.last_summary.clone()?;

        self.mail = MailState::Sending;
        self.delivery_in_flight = true;
        self.config.recipient = recipient.clone();
        Some(DeliveryRequest { summary, recipient })
    }

    /// Runs the delivery off the UI thread; the outcome comes back as
    /// `AppEvent::Delivery`.
    pub fn spawn_delivery(&self, request: DeliveryRequest, tx: mpsc::Sender<AppEvent>) {
        let notifier = Notifier::from_config(&self.config);
        thread::spawn(move || {
            let status = notifier.deliver(&request.summary, &request.recipient);
            let _ = tx.send(AppEvent::Delivery(status));
        });
    }

    pub fn on_delivery(&mut self, status: DeliveryStatus) {
        self.delivery_in_flight = false;
        if matches!(self.mail, MailState::Sending) {
            self.mail = MailState::Done {
                message: status.message(),
                failed: status.is_failure(),
            };
        }
    }
}
