use crossterm::event::{Event, KeyCode};
use perfection_engine::GameSession;
use ratatui::Frame;

use crate::command::play::screens::{auto::AutoPlayScreen, manual::ManualPlayScreen};

mod auto;
mod manual;

#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
}

impl Screen {
    pub fn manual(session: GameSession) -> Self {
        Screen::Manual(ManualPlayScreen::new(session))
    }

    pub fn auto(session: GameSession, miss_rate: f64) -> anyhow::Result<Self> {
        let screen = AutoPlayScreen::new(session, miss_rate)?;
        Ok(Screen::Auto(screen))
    }

    pub fn session(&self) -> &GameSession {
        match self {
            Screen::Manual(screen) => screen.session(),
            Screen::Auto(screen) => screen.session(),
        }
    }

    pub fn is_running(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.is_running(),
            Screen::Auto(screen) => screen.is_running(),
        }
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.is_exiting(),
            Screen::Auto(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
        }
    }

    pub(crate) fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(event),
            Screen::Auto(screen) => screen.handle_event(event),
        }
    }

    /// Advances the countdown by one second.
    pub fn update(&mut self) {
        match self {
            Screen::Manual(screen) => screen.update(),
            Screen::Auto(screen) => screen.update(),
        }
    }
}

/// Moves `index` one step in a row-major grid of `len` cells, `columns` wide.
///
/// Moves that would leave the grid keep the current index.
fn grid_step(index: usize, len: usize, columns: usize, key: KeyCode) -> usize {
    if len == 0 {
        return 0;
    }
    let index = index.min(len - 1);
    let moved = match key {
        KeyCode::Left if index % columns > 0 => Some(index - 1),
        KeyCode::Right if index % columns + 1 < columns => Some(index + 1),
        KeyCode::Up => index.checked_sub(columns),
        KeyCode::Down => Some(index + columns),
        _ => None,
    };
    moved.filter(|&i| i < len).unwrap_or(index)
}
