rust_i18n::i18n!("locales", fallback = "en");

mod commands;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use sugoroku::app::{App, AppScreen, NoticeLevel};
use sugoroku::config::Config;
use sugoroku::engine::tracker::GOAL;
use sugoroku::event::{AppEvent, EventHandler};
use sugoroku::logging::{self, LogTarget};
use sugoroku::store::json_store::JsonStore;
use sugoroku::ui::components::board::Board;
use sugoroku::ui::components::history_sidebar::HistorySidebar;
use sugoroku::ui::components::progress_bar::ProgressBar;
use sugoroku::ui::components::reward_list::RewardList;
use sugoroku::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use sugoroku::ui::line_input::{InputResult, TextField};

use commands::Command;

#[derive(Parser)]
#[command(name = "sugoroku", version, about = "Terminal 25-day habit board with milestone rewards")]
struct Cli {
    #[arg(long, global = true, help = "Progress file to read and write")]
    data_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Keep progress in memory only")]
    no_save: bool,

    #[arg(short, long, global = true, help = "Color theme name")]
    ui_theme: Option<String>,

    #[arg(short, long, global = true, help = "Interface language (en, ja)")]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal is in raw mode while the board is shown, so logs go to a file.
    let target = if cli.command.is_none() {
        LogTarget::File(logging::default_log_path())
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init(target) {
        eprintln!("warning: logging disabled: {e}");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("config unreadable, using defaults: {e}");
        Config::default()
    });
    if let Some(theme) = cli.ui_theme {
        config.ui_theme = theme;
    }
    if let Some(lang) = cli.lang {
        config.locale = lang;
    }
    if let Some(path) = cli.data_file {
        config.data_file = Some(path.to_string_lossy().into_owned());
    }
    if cli.no_save {
        config.persist = false;
    }
    config.normalize_locale(&rust_i18n::available_locales!());
    rust_i18n::set_locale(&config.locale);

    let (store, store_error) = open_store(&config);
    let mut app = App::new(config, store);
    if let Some(err) = store_error {
        app.set_notice(
            NoticeLevel::Error,
            t!("notice.save_failed", error = err.as_str()).to_string(),
        );
    }

    match cli.command {
        Some(command) => commands::run(&mut app, command),
        None => run_tui(&mut app),
    }
}

fn open_store(config: &Config) -> (Option<JsonStore>, Option<String>) {
    if !config.persist {
        return (None, None);
    }
    let store = match config.data_file_path() {
        Some(path) => Ok(JsonStore::at_path(path)),
        None => JsonStore::new(),
    };
    match store {
        Ok(store) => (Some(store), None),
        Err(e) => {
            log::error!("progress will not be saved: {e}");
            (None, Some(e.to_string()))
        }
    }
}

fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Board => handle_board_key(app, key),
        AppScreen::EditText(_) => handle_edit_key(app, key),
        AppScreen::ConfirmReset => handle_confirm_key(app, key),
    }
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('a') | KeyCode::Enter => app.record_success(),
        KeyCode::Char('f') => app.record_failure(),
        KeyCode::Char(ch @ '1'..='5') => {
            let slot = ch as usize - '1' as usize;
            app.toggle_reward_slot(slot);
        }
        KeyCode::Char(' ') => app.toggle_selected_reward(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_reward(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_reward(),
        KeyCode::Char('e') => app.start_edit_reward(),
        KeyCode::Char('t') => app.start_edit_theme(),
        KeyCode::Char('c') => app.cycle_ui_theme(),
        KeyCode::Char('R') => app.confirm_reset(),
        _ => {}
    }
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let result = match app.input.as_mut() {
        Some(input) => input.handle(key),
        None => InputResult::Cancel,
    };
    match result {
        InputResult::Continue => {}
        InputResult::Submit => app.submit_edit(),
        InputResult::Cancel => app.go_to_board(),
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.reset(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.go_to_board(),
        _ => {}
    }
}

fn footer_hints() -> Vec<String> {
    [
        t!("hint.done"),
        t!("hint.miss"),
        t!("hint.claim"),
        t!("hint.select"),
        t!("hint.edit_reward"),
        t!("hint.edit_theme"),
        t!("hint.ui_theme"),
        t!("hint.reset"),
        t!("hint.quit"),
    ]
    .into_iter()
    .map(|h| h.to_string())
    .collect()
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = footer_hints();
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let hint_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16 + 1);

    render_header(frame, app, &layout);
    render_status(frame, app, &layout);

    frame.render_widget(Board::new(&app.state, app.theme), layout.board);
    if let Some(rewards_area) = layout.rewards {
        let rewards = RewardList::new(&app.state, app.reward_selected, app.theme)
            .compact(layout.tier.compact_rewards());
        frame.render_widget(rewards, rewards_area);
    }
    if let Some(history_area) = layout.history {
        frame.render_widget(HistorySidebar::new(&app.state, app.theme), history_area);
    }
    if let Some(progress_area) = layout.progress {
        let caption = t!(
            "ui.progress_caption",
            achieved = app.state.achieved_count(),
            goal = GOAL
        )
        .to_string();
        let progress = ProgressBar::new(
            &t!("ui.progress_label"),
            app.state.achieved_count() as u32,
            GOAL,
            caption,
            app.theme,
        );
        frame.render_widget(progress, progress_area);
    }

    render_footer(frame, app, &layout, hint_lines);

    match app.screen {
        AppScreen::Board => {}
        AppScreen::EditText(field) => render_edit_popup(frame, app, field),
        AppScreen::ConfirmReset => render_confirm_popup(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {} ", t!("ui.title")),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!(" {}: ", t!("ui.theme_label")),
                Style::default().fg(colors.header_fg()),
            ),
            Span::styled(
                app.state.theme.as_str(),
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);
}

fn render_status(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;

    let style = if app.state.is_finished() {
        Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.fg())
    };
    let text = app.status_lines().join("   ");
    let status = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::bordered().border_style(Style::default().fg(colors.border())),
    );
    frame.render_widget(status, layout.status);
}

fn render_footer(
    frame: &mut ratatui::Frame,
    app: &App,
    layout: &AppLayout,
    hint_lines: Vec<String>,
) {
    let colors = &app.theme.colors;

    let notice_line = match &app.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => colors.fg(),
                NoticeLevel::Celebrate => colors.success(),
                NoticeLevel::Warning => colors.warning(),
                NoticeLevel::Error => colors.error(),
            };
            let mut style = Style::default().fg(color);
            if notice.level == NoticeLevel::Celebrate {
                style = style.add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(format!(" {}", notice.text), style))
        }
        None => {
            let note = match app.data_path() {
                Some(path) => t!("ui.save_note", path = path.display().to_string()),
                None => t!("ui.no_save_note"),
            };
            Line::from(Span::styled(
                format!(" {note}"),
                Style::default().fg(colors.text_dim()),
            ))
        }
    };

    let mut lines = vec![notice_line];
    lines.extend(hint_lines.into_iter().map(|hint| {
        Line::from(Span::styled(hint, Style::default().fg(colors.text_dim())))
    }));
    frame.render_widget(Paragraph::new(lines), layout.footer);
}

fn render_edit_popup(frame: &mut ratatui::Frame, app: &App, field: TextField) {
    let colors = &app.theme.colors;
    let Some(input) = app.input.as_ref() else {
        return;
    };

    let title = match field {
        TextField::Theme => t!("ui.edit_theme_title"),
        TextField::RewardName(day) => t!("ui.edit_reward_title", day = day),
    };

    let popup = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, popup);
    let block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let (before, cursor, after) = input.render_parts();
    let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
    let cursor_text = cursor.map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let lines = vec![
        Line::from(vec![
            Span::styled(before, Style::default().fg(colors.fg())),
            Span::styled(cursor_text, cursor_style),
            Span::styled(after, Style::default().fg(colors.fg())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            t!("ui.edit_hint").to_string(),
            Style::default().fg(colors.text_dim()),
        )),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, frame.buffer_mut());
}

fn render_confirm_popup(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;

    let popup = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, popup);
    let block = Block::bordered()
        .title(format!(" {} ", t!("ui.confirm_reset_title")))
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let lines = vec![
        Line::from(Span::styled(
            t!("ui.confirm_reset_body").to_string(),
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            t!("ui.confirm_hint").to_string(),
            Style::default().fg(colors.accent()),
        )),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, frame.buffer_mut());
}
