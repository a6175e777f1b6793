//! sheet_tui - Terminal host for the character sheet

mod app;
mod ui;

use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging()?;

    let path = std::env::args().nth(1).map(PathBuf::from);
    let config_dir = std::env::var_os("SHEET_CONFIG_DIR").map(PathBuf::from);
    let mut app = App::new(path.as_deref(), config_dir.as_deref())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // The roll dialog captures navigation keys while open
        if app.dialog.is_some() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => app.on_up(),
                KeyCode::Down | KeyCode::Char('j') => app.on_down(),
                KeyCode::Left | KeyCode::Char('h') => app.on_left(),
                KeyCode::Right | KeyCode::Char('l') => app.on_right(),
                KeyCode::Enter => app.on_enter(),
                KeyCode::Esc => app.on_escape(),
                _ => {}
            }
            continue;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
            (KeyCode::Tab, _) => app.next_tab(),
            (KeyCode::BackTab, _) => app.prev_tab(),
            (KeyCode::Char('1'), _) => app.set_tab(0),
            (KeyCode::Char('2'), _) => app.set_tab(1),
            (KeyCode::Char('3'), _) => app.set_tab(2),
            (KeyCode::Char('4'), _) | (KeyCode::Char('?'), _) => app.set_tab(3),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
            (KeyCode::Enter, _) => app.on_enter(),
            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => app.adjust_humanity(1),
            (KeyCode::Char('-'), _) => app.adjust_humanity(-1),
            (KeyCode::Char(']'), _) => app.adjust_corruption(1),
            (KeyCode::Char('['), _) => app.adjust_corruption(-1),
            (KeyCode::Char('r'), _) => app.rest(),
            (KeyCode::Char('s'), _) => app.save(),
            _ => {}
        }
    }
    Ok(())
}

/// File-only logging; the terminal belongs to the UI
fn setup_logging() -> io::Result<()> {
    let log_dir = std::env::var_os("SHEET_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("sheet_tui"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "sheet.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the life of the process
    std::mem::forget(guard);

    tracing::info!("Log file: {}/sheet.log", log_dir.display());
    Ok(())
}
