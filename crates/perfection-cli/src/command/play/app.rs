use crossterm::event::Event;
use perfection_engine::{GameSession, GameSnapshot};
use ratatui::Frame;

use crate::{
    command::play::screens::Screen,
    tui::{App, Runtime},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
}

impl PlayApp {
    pub fn manual(session: GameSession) -> Self {
        Self {
            screen: Screen::manual(session),
        }
    }

    pub fn auto(session: GameSession, miss_rate: f64) -> anyhow::Result<Self> {
        Ok(Self {
            screen: Screen::auto(session, miss_rate)?,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.screen.session().snapshot()
    }

    /// Keeps countdown ticks flowing exactly while a game is running.
    fn sync_countdown(&self, runtime: &mut Runtime) {
        runtime.set_countdown(self.screen.is_running());
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        self.sync_countdown(runtime);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
        self.sync_countdown(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if self.screen.is_running() {
            self.screen.update();
        }
        self.sync_countdown(runtime);
    }
}
