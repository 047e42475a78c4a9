//! Terminal dashboard over a [`DashboardSession`].

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::session::{DashboardRemote, DashboardSession};

mod app;
use app::App;

mod view;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub log_file: Option<PathBuf>,
}

pub fn run<R: DashboardRemote + 'static>(remote: Arc<R>, opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }
    crate::logging::init_for_tui(opts.log_file.as_deref())?;

    let (session, events) = DashboardSession::new(remote);
    session.start().context("start dashboard workers")?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(session.clone(), events);
    let res = run_loop(&mut terminal, &mut app);

    session.shutdown();
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_loop<R: DashboardRemote + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<R>,
) -> Result<()> {
    loop {
        app.drain_events();
        terminal.draw(|f| view::draw(f, app)).context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key<R: DashboardRemote + 'static>(app: &mut App<R>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('a') => app.toggle_armed(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.raise_sensitivity(),
        KeyCode::Char('-') => app.lower_sensitivity(),
        KeyCode::Char('n') => app.toggle_notification(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('r') => app.resync(),
        _ => {}
    }
}
