use std::io;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Owns the terminal for the lifetime of one [`App`] and feeds it events.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a runtime whose countdown is stopped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts or stops the one-second game clock.
    ///
    /// Starting a stopped clock waits a full second before the first
    /// `App::update`, so a freshly started game never loses a partial second.
    pub fn set_countdown(&mut self, enabled: bool) {
        self.events.set_countdown(enabled);
    }

    /// Runs `app` until it asks to exit, restoring the terminal afterwards.
    ///
    /// A due countdown second is delivered before any pending redraw or key
    /// press, so the screen always shows the time that input is judged against.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Countdown => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
