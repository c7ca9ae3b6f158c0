use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

pub(super) const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Event loop state management.
///
/// While the countdown is enabled, a [`TuiEvent::Countdown`] is emitted every
/// [`COUNTDOWN_INTERVAL`]. A [`TuiEvent::Render`] follows every tick or
/// terminal event. Otherwise `next()` blocks on terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    next_tick: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with the countdown disabled.
    pub fn new() -> Self {
        Self {
            next_tick: None,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Enables or disables countdown ticks.
    ///
    /// Enabling a stopped countdown schedules the first tick a full interval
    /// from now. Enabling an already running countdown keeps its phase.
    pub(super) fn set_countdown(&mut self, enabled: bool) {
        match (enabled, self.next_tick) {
            (true, None) => self.next_tick = Some(Instant::now() + COUNTDOWN_INTERVAL),
            (false, Some(_)) => self.next_tick = None,
            _ => {}
        }
    }

    /// Returns the next event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(next_tick) = self.next_tick
                && now >= next_tick
            {
                // Deadlines advance from the previous deadline, not from `now`
                self.next_tick = Some(next_tick + COUNTDOWN_INTERVAL);
                self.dirty = true;
                return Ok(TuiEvent::Countdown);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(next_tick) = self.next_tick
                && !event::poll(next_tick.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
