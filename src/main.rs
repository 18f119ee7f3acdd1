mod app;
mod config;
mod engine;
mod event;
mod logging;
mod notify;
mod session;
mod ui;
mod words;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};

use app::{App, AppScreen, MailState, StartFocus};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::dashboard::{Dashboard, MailStatus};
use ui::components::flashcard_card::FlashcardCard;
use ui::components::menu::mode_label;
use ui::components::progress_bar::ProgressBar;
use ui::components::quiz_panel::QuizPanel;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::line_input::InputResult;
use words::WordRepository;

#[derive(Parser)]
#[command(name = "tango", version, about = "Japanese-Korean vocabulary quiz and flashcards")]
struct Cli {
    #[arg(short, long, help = "Word set id")]
    set: Option<String>,

    #[arg(short, long, help = "Participant name")]
    name: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "List available word sets and exit")]
    list_sets: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_sets {
        for set in WordRepository::load().available_sets() {
            println!("{:<12} {} ({})", set.id, set.name, set.len);
        }
        return Ok(());
    }

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(set) = cli.set {
        config.word_set = set;
    }
    if let Some(name) = cli.name {
        config.participant_name = name;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let _log_guard = logging::init(&config.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "tango starting");
    if let Some(e) = config_error {
        warn!(error = %e, path = %Config::config_path().display(), "config unreadable, using defaults");
    }

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, events),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Delivery(status) => app.on_delivery(status),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Start => handle_start_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Flashcard => handle_flashcard_key(app, key),
        AppScreen::Result => handle_result_key(app, key, events),
    }
}

fn handle_start_key(app: &mut App, key: KeyEvent) {
    if app.start_focus == StartFocus::Name {
        match app.name_input.handle(key) {
            InputResult::Submit => app.start_session(),
            InputResult::Cancel | InputResult::FocusNext => app.set_focus(StartFocus::Mode),
            InputResult::FocusPrev => app.set_focus(StartFocus::WordSet),
            InputResult::Continue => app.start_error = None,
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.set_focus(app.start_focus.next()),
        KeyCode::BackTab => app.set_focus(app.start_focus.prev()),
        KeyCode::Enter => app.start_session(),
        KeyCode::Char(ch @ '1'..='9') => {
            if app.menu.select_key(ch) {
                app.start_session();
            }
        }
        _ => match app.start_focus {
            StartFocus::Mode => match key.code {
                KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
                KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
                _ => {}
            },
            StartFocus::WordSet => match key.code {
                KeyCode::Left | KeyCode::Char('h') => app.cycle_word_set(false),
                KeyCode::Right | KeyCode::Char('l') => app.cycle_word_set(true),
                _ => {}
            },
            StartFocus::Name => {}
        },
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_home(),
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            app.select_option(index);
        }
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
            app.move_cursor(-1)
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
            app.move_cursor(1)
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.select_option(app.quiz.cursor),
        _ => {}
    }
}

fn handle_flashcard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_home(),
        KeyCode::Left | KeyCode::Char('h') => app.flashcard_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.flashcard_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.flashcard_flip(),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if let MailState::Editing { input, .. } = &mut app.mail {
        match input.handle(key) {
            InputResult::Submit => {
                if let Some(request) = app.submit_email() {
                    app.spawn_delivery(request, events.sender());
                }
            }
            InputResult::Cancel => app.cancel_email(),
            InputResult::Continue => app.clear_mail_error(),
            InputResult::FocusNext | InputResult::FocusPrev => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('r') => app.retry(),
        KeyCode::Char('m') => app.begin_email(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_home(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Start => render_start(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Flashcard => render_flashcard(frame, app),
        AppScreen::Result => render_result(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " tango ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", ui::sanitize(info)),
            Style::default().fg(colors.reading()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &[&str]) {
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(app.theme.colors.reading()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_start(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let app_layout = AppLayout::new(area);

    let header_info = match app.selected_word_set() {
        Some(set) => format!("{} · {}단어", set.name, set.len),
        None => "단어 세트 없음".to_string(),
    };
    render_header(frame, app, app_layout.header, &header_info);

    let centered = ui::layout::centered_rect(60, 90, app_layout.main);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(12),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(centered);

    frame.render_widget(&app.menu, rows[0]);

    let focus_border = |focused: bool| {
        Style::default().fg(if focused {
            colors.border_focused()
        } else {
            colors.border()
        })
    };

    let set_focused = app.start_focus == StartFocus::WordSet;
    let set_text = app
        .selected_word_set()
        .map(|s| format!("◀ {} ({}) ▶", ui::sanitize(&s.name), s.len))
        .unwrap_or_default();
    let set_widget = Paragraph::new(Line::from(Span::styled(
        set_text,
        Style::default().fg(if set_focused { colors.accent() } else { colors.fg() }),
    )))
    .block(
        Block::bordered()
            .title(" 단어 세트 ")
            .border_style(focus_border(set_focused)),
    );
    frame.render_widget(set_widget, rows[1]);

    let name_focused = app.start_focus == StartFocus::Name;
    let name_widget = Paragraph::new(app.name_input.styled_line(name_focused, app.theme)).block(
        Block::bordered()
            .title(" 이름 ")
            .border_style(focus_border(name_focused)),
    );
    frame.render_widget(name_widget, rows[2]);

    if let Some(err) = &app.start_error {
        let error = Paragraph::new(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(error, rows[3]);
    }

    render_footer(
        frame,
        app,
        app_layout.footer,
        &["[1-3] 시작", "[Tab] 이동", "[←/→] 세트 변경", "[Enter] 시작", "[q] 종료"],
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let app_layout = AppLayout::new(area);

    let (done, total, header_info) = match &app.quiz.state {
        Some(state) => {
            let config = state.config();
            let info = format!("{} · {}", mode_label(app.session_mode()), config.participant_name);
            (state.index(), state.total(), info)
        }
        None => (0, 0, String::new()),
    };
    render_header(frame, app, app_layout.header, &header_info);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(app_layout.main);

    if let Some(question) = &app.quiz.question {
        let panel = QuizPanel::new(question, app.quiz.cursor, app.quiz.feedback.as_ref(), app.theme)
            .grid(app_layout.tier.grid_options());
        frame.render_widget(panel, main[0]);
    }
    frame.render_widget(ProgressBar::from_counts("진행", done, total, app.theme), main[1]);

    let hints: &[&str] = if app.quiz.is_locked() {
        &["[Esc] 처음으로"]
    } else {
        &["[1-4] 선택", "[↑/↓] 이동", "[Enter] 확인", "[Esc] 처음으로"]
    };
    render_footer(frame, app, app_layout.footer, hints);
}

fn render_flashcard(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let app_layout = AppLayout::new(area);

    render_header(frame, app, app_layout.header, mode_label(app.session_mode()));

    let card_area = ui::layout::centered_rect(50, 60, app_layout.main);
    if let Some(view) = app.flashcard.view() {
        frame.render_widget(FlashcardCard::new(&view, app.flashcard.flipped, app.theme), card_area);
    }

    render_footer(
        frame,
        app,
        app_layout.footer,
        &["[←/→] 이전/다음", "[Space] 뒤집기", "[Esc] 처음으로"],
    );
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(summary) = &app.last_summary {
        let mail = match &app.mail {
            MailState::Idle => MailStatus::Idle,
            MailState::Editing { input, error } => MailStatus::Editing {
                input,
                error: error.as_deref(),
            },
            MailState::Sending => MailStatus::Sending,
            MailState::Done { message, failed } => MailStatus::Done {
                message,
                failed: *failed,
            },
        };
        let centered = ui::layout::centered_rect(60, 60, area);
        frame.render_widget(Dashboard::new(summary, mail, app.theme), centered);
    }
}
