mod api;
mod app;
mod config;
mod dispatch;
mod form;
mod pager;
mod question;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::TriviaClient;
use app::{App, Focus, Modal};
use config::{Config, ConfigSource};
use dispatch::{Completion, Dispatcher, Request};
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(about = "Browse, search and prune questions on a trivia server")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/trivia-browser/config.toml")]
    config: String,

    /// Server base URL (overrides config)
    #[arg(long, short)]
    server: Option<String>,
}

/// What a key press asks the loop to do
enum KeyAction {
    None,
    Send(Request),
    Quit,
}

/// File logging; the terminal belongs to the TUI
fn init_logging(logs_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log dir {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "trivia-browser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trivia=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let (mut config, source) = Config::load(&cli.config)?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    let _log_guard = init_logging(&config.log_dir())?;
    match &source {
        ConfigSource::File(path) => tracing::info!("Loaded config from {}", path.display()),
        ConfigSource::Defaults(path) => {
            tracing::info!("Config file {} not found, using defaults", path.display())
        }
    }

    let theme = config.resolve_theme();
    let client = TriviaClient::new(&config.server.base_url);
    tracing::info!("Using server {}", client.base_url());
    let (mut dispatcher, mut completions) = Dispatcher::new(client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state and fetch the first page
    let mut app = App::new(config);
    let first = app.load_page();
    send(&mut app, &mut dispatcher, first);

    // Run main loop
    let result = run_app(&mut terminal, &mut app, &theme, &mut dispatcher, &mut completions).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn send(app: &mut App, dispatcher: &mut Dispatcher, request: Request) {
    app.request_sent();
    dispatcher.dispatch(request);
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
    dispatcher: &mut Dispatcher,
    completions: &mut UnboundedReceiver<Completion>,
) -> Result<()> {
    let mut tick: usize = 0;
    loop {
        // Apply whatever finished since the last frame
        while let Ok(completion) = completions.try_recv() {
            if let Some(follow_up) = app.apply(completion) {
                send(app, dispatcher, follow_up);
            }
        }

        terminal.draw(|f| ui::draw(f, app, theme, tick))?;
        tick = tick.wrapping_add(1);

        if event::poll(Duration::from_millis(80))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(app, key) {
                    KeyAction::None => {}
                    KeyAction::Send(request) => send(app, dispatcher, request),
                    KeyAction::Quit => return Ok(()),
                }
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    // Blocking dialogs eat every key
    match app.modal() {
        Some(Modal::Alert(_)) => {
            app.dismiss_alert();
            return KeyAction::None;
        }
        Some(Modal::ConfirmDelete { .. }) => {
            let yes = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter);
            return app.confirm(yes).map_or(KeyAction::None, KeyAction::Send);
        }
        None => {}
    }

    if app.form().is_some() {
        return handle_form_key(app, key);
    }

    if app.is_searching() {
        match key.code {
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Enter => return KeyAction::Send(app.submit_search()),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
            return app.prev_page().map_or(KeyAction::None, KeyAction::Send);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
            return app.next_page().map_or(KeyAction::None, KeyAction::Send);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let n = c.to_digit(10).unwrap_or(1);
            return app.select_page(n).map_or(KeyAction::None, KeyAction::Send);
        }
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('a') => app.open_form(),
        KeyCode::Char('r') => return KeyAction::Send(app.refetch()),
        KeyCode::Enter if app.focus() == Focus::Categories => {
            return KeyAction::Send(app.select_category_at_cursor());
        }
        KeyCode::Enter | KeyCode::Char(' ') if app.focus() == Focus::Questions => {
            app.toggle_answer();
        }
        KeyCode::Char('d') | KeyCode::Delete if app.focus() == Focus::Questions => {
            return app.request_delete().map_or(KeyAction::None, KeyAction::Send);
        }
        _ => {}
    }
    KeyAction::None
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Enter {
        return app.submit_form().map_or(KeyAction::None, KeyAction::Send);
    }
    if key.code == KeyCode::Esc {
        app.close_form();
        return KeyAction::None;
    }

    let Some(form) = app.form_mut() else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => form.cycle(-1),
        KeyCode::Right => form.cycle(1),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) if form.focus().is_text() => form.push_char(c),
        _ => {}
    }
    KeyAction::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_reports_bad_dir() {
        // A regular file where the log directory's parent should be
        let blocker = std::env::temp_dir().join(format!("trivia-log-blocker-{}", std::process::id()));
        std::fs::write(&blocker, "").unwrap();

        let err = init_logging(&blocker.join("logs")).unwrap_err();
        std::fs::remove_file(&blocker).ok();

        assert!(err.to_string().contains("Failed to create log dir"));
    }
}
