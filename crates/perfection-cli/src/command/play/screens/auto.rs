use anyhow::Context as _;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use perfection_engine::{GameSession, PieceId, PlacementResult, SessionState, SlotId};
use rand::{Rng as _, SeedableRng as _, seq::IteratorRandom as _};
use rand_distr::{Bernoulli, Distribution as _};
use rand_pcg::Pcg32;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tracing::{debug, warn};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, Message, SessionDisplay};

const RUNNING_KEYS: &[KeyBinding] = &[(&["q"], "Quit")];
const ENDED_KEYS: &[KeyBinding] = &[(&["Enter", "s"], "Play again"), (&["q"], "Quit")];

#[derive(Debug)]
pub struct AutoPlayScreen {
    session: GameSession,
    bot: Bot,
    message: Option<Message>,
    is_exiting: bool,
}

impl AutoPlayScreen {
    pub fn new(mut session: GameSession, miss_rate: f64) -> anyhow::Result<Self> {
        let bot = Bot::new(&session, miss_rate)?;
        session.start().context("Failed to start the game")?;
        Ok(Self {
            session,
            bot,
            message: None,
            is_exiting: false,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        !self.is_exiting && self.session.state().is_running()
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session)
            .title("PERFECTION (AUTO)")
            .message(self.message.as_ref());
        let bindings = match self.session.state() {
            SessionState::Idle | SessionState::Running => RUNNING_KEYS,
            SessionState::Ended => ENDED_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind != KeyEventKind::Press {
            return;
        }
        match event.code {
            KeyCode::Enter | KeyCode::Char('s') if self.session.state().is_ended() => {
                self.session.restart();
                self.message = None;
            }
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    /// Advances the countdown, then lets the bot make one placement attempt.
    pub fn update(&mut self) {
        if let Err(err) = self.session.tick() {
            warn!(%err, "tick ignored");
            return;
        }
        if !self.session.state().is_running() {
            return;
        }
        let Some((piece_id, slot_id)) = self.bot.choose(&self.session) else {
            return;
        };
        self.message = match self.session.attempt_placement(piece_id, slot_id) {
            Ok(PlacementResult::Accepted { completed: false }) => {
                Some(Message::success(format!("Placed {piece_id} on {slot_id}")))
            }
            Ok(PlacementResult::Accepted { completed: true }) => None,
            Ok(PlacementResult::Rejected(rejection)) => Some(Message::error(format!(
                "Missed {slot_id} with {piece_id}: {rejection}"
            ))),
            Err(err) => {
                warn!(%err, %piece_id, %slot_id, "bot placement ignored");
                None
            }
        };
    }
}

/// Places a random tray piece each turn, deliberately missing at a fixed rate.
#[derive(Debug)]
struct Bot {
    rng: Pcg32,
    miss: Bernoulli,
}

impl Bot {
    fn new(session: &GameSession, miss_rate: f64) -> anyhow::Result<Self> {
        let miss = Bernoulli::new(miss_rate)
            .with_context(|| format!("Invalid miss rate: {miss_rate} (expected 0.0 to 1.0)"))?;
        // Derived from the puzzle seed so a seeded run replays exactly
        let rng = Pcg32::from_rng(&mut session.seed().rng());
        Ok(Self { rng, miss })
    }

    fn choose(&mut self, session: &GameSession) -> Option<(PieceId, SlotId)> {
        let piece = *session.available_pieces().choose(&mut self.rng)?;
        let slots = session.catalog().len();
        let slot = if slots > 1 && self.miss.sample(&mut self.rng) {
            let offset = self.rng.random_range(1..slots);
            SlotId::new((piece.target_slot().index() + offset) % slots)
        } else {
            piece.target_slot()
        };
        debug!(piece_id = %piece.id(), slot_id = %slot, "bot move");
        Some((piece.id(), slot))
    }
}
