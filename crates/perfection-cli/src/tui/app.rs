use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// A screen driven by [`Runtime::run`].
///
/// Key presses arrive through `handle_event`, countdown seconds through
/// `update`. The app decides when seconds flow by calling
/// [`Runtime::set_countdown`], typically after every event so the countdown
/// tracks whether a game is running.
pub trait App {
    /// Called once before the first frame, e.g. to enable the countdown for a
    /// game that is already running.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// One second of game time has passed.
    fn update(&mut self, runtime: &mut Runtime);
}
