//! Interactive terminal browser over scan results.
//!
//! A list of targets; Enter opens a target's findings one pattern at a time.

pub mod session;
pub mod ui;

pub use session::{Input, NavigationSession, View};

use crate::types::{Result, ScanResultStore};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, IsTerminal, Stdout};
use tracing::debug;

/// Map a key press to a session input.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Right),
        KeyCode::Enter => Some(Input::Confirm),
        KeyCode::Char('b') | KeyCode::Backspace => Some(Input::Back),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

/// Run the browser until the user quits.
///
/// The terminal is restored before returning, also on error.
pub fn run(store: &ScanResultStore, include_all: bool) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(io::Error::other("stdout is not a terminal").into());
    }

    let mut terminal = setup()?;
    let result = run_app(&mut terminal, store, include_all);
    let restored = restore(&mut terminal);

    result?;
    restored?;
    Ok(())
}

fn setup() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));

    if terminal.is_err() {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    terminal
}

fn restore(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Run the application loop
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    store: &ScanResultStore,
    include_all: bool,
) -> io::Result<()> {
    let mut session = NavigationSession::new(terminal.size()?.height as usize);

    while !session.is_finished() {
        session.resize(terminal.size()?.height as usize, store);
        terminal.draw(|frame| ui::draw(frame, &session, store, include_all))?;

        if let Event::Key(key) = event::read()? {
            if let Some(input) = map_key(key) {
                debug!("Input {:?} in {:?} view", input, session.view());
                session.handle(input, store);
            }
        }
    }

    Ok(())
}
