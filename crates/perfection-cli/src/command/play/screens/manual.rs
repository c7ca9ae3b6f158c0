use crossterm::event::{Event, KeyCode, KeyEventKind};
use perfection_engine::{
    GameSession, PieceId, PlacementResult, Rejection, SessionState, SlotId, TickResult,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tracing::{debug, warn};

use crate::{
    command::play::screens::grid_step,
    ui::widgets::{Focus, KeyBinding, KeyBindingDisplay, Message, Selection, SessionDisplay},
};

const IDLE_KEYS: &[KeyBinding] = &[(&["Enter", "s"], "Start"), (&["q"], "Quit")];
const RUNNING_KEYS: &[KeyBinding] = &[
    (&["Tab"], "Tray/Board"),
    (&["←↑↓→"], "Move"),
    (&["Space"], "Pick/Drop"),
    (&["Esc"], "Put back"),
    (&["r"], "Reset"),
    (&["q"], "Quit"),
];
const ENDED_KEYS: &[KeyBinding] = &[
    (&["Enter", "s"], "Play again"),
    (&["r"], "Reset"),
    (&["q"], "Quit"),
];

#[derive(Debug)]
pub struct ManualPlayScreen {
    session: GameSession,
    focus: Focus,
    tray_cursor: usize,
    board_cursor: usize,
    held: Option<PieceId>,
    message: Option<Message>,
    is_exiting: bool,
}

impl ManualPlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            focus: Focus::Tray,
            tray_cursor: 0,
            board_cursor: 0,
            held: None,
            message: Some(Message::info("Press Enter to start")),
            is_exiting: false,
        }
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

    fn selection(&self) -> Selection {
        Selection {
            focus: self.focus,
            tray_cursor: self.tray_cursor,
            board_cursor: SlotId::new(self.board_cursor),
            held: self.held,
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session)
            .selection(self.selection())
            .message(self.message.as_ref());
        let bindings = match self.session.state() {
            SessionState::Idle => IDLE_KEYS,
            SessionState::Running => RUNNING_KEYS,
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

        let is_running = self.is_running();
        match event.code {
            KeyCode::Enter | KeyCode::Char('s') if !is_running => self.start(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Tab if is_running => self.toggle_focus(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down if is_running => {
                self.move_cursor(event.code);
            }
            KeyCode::Char(' ') if is_running => self.pick_or_drop(),
            KeyCode::Esc if is_running => self.put_back(),
            _ => {}
        }
    }

    /// Advances the countdown by one second.
    pub fn update(&mut self) {
        match self.session.tick() {
            Ok(TickResult::Counting { .. }) => {}
            Ok(TickResult::TimedOut) => {
                self.held = None;
                self.message = None;
            }
            Err(err) => warn!(%err, "tick ignored"),
        }
    }

    fn start(&mut self) {
        match self.session.state() {
            SessionState::Idle => {
                if let Err(err) = self.session.start() {
                    warn!(%err, "start ignored");
                    return;
                }
            }
            SessionState::Ended => self.session.restart(),
            SessionState::Running => return,
        }
        self.clear_selection();
        self.message = Some(Message::info("Place every shape before time runs out!"));
    }

    fn reset(&mut self) {
        self.session.reset();
        self.clear_selection();
        self.message = Some(Message::info("Press Enter to start"));
    }

    fn clear_selection(&mut self) {
        self.focus = Focus::Tray;
        self.tray_cursor = 0;
        self.board_cursor = 0;
        self.held = None;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Tray => Focus::Board,
            Focus::Board => Focus::Tray,
        };
    }

    fn move_cursor(&mut self, key: KeyCode) {
        let catalog = self.session.catalog();
        let columns = catalog.columns();
        match self.focus {
            Focus::Tray => {
                let len = self.session.pieces().len();
                self.tray_cursor = grid_step(self.tray_cursor, len, columns, key);
            }
            Focus::Board => {
                self.board_cursor = grid_step(self.board_cursor, catalog.len(), columns, key);
            }
        }
    }

    fn pick_or_drop(&mut self) {
        match self.focus {
            Focus::Tray => self.pick(),
            Focus::Board => self.drop_held(),
        }
    }

    fn pick(&mut self) {
        let Some(piece) = self.session.pieces().get(self.tray_cursor).copied() else {
            return;
        };
        if piece.is_placed() {
            self.message = Some(rejection_message(Rejection::AlreadyPlaced));
            return;
        }
        debug!(piece_id = %piece.id(), "piece picked");
        self.held = Some(piece.id());
        self.focus = Focus::Board;
        self.message = None;
    }

    fn drop_held(&mut self) {
        let Some(piece_id) = self.held else {
            self.message = Some(Message::info("Pick a shape from the tray first"));
            return;
        };
        let slot_id = SlotId::new(self.board_cursor);
        match self.session.attempt_placement(piece_id, slot_id) {
            Ok(PlacementResult::Accepted { completed }) => {
                self.held = None;
                self.focus = Focus::Tray;
                self.message =
                    (!completed).then(|| Message::success("Perfect! Shape placed correctly!"));
            }
            Ok(PlacementResult::Rejected(rejection)) => {
                // The shape bounces back to the tray
                self.held = None;
                self.focus = Focus::Tray;
                self.message = Some(rejection_message(rejection));
            }
            Err(err) => {
                warn!(%err, %piece_id, %slot_id, "placement ignored");
                self.held = None;
            }
        }
    }

    fn put_back(&mut self) {
        if self.held.take().is_some() {
            self.focus = Focus::Tray;
        }
    }
}

fn rejection_message(rejection: Rejection) -> Message {
    match rejection {
        Rejection::WrongSlot => Message::error("Wrong slot! That shape doesn't fit there."),
        Rejection::AlreadyPlaced => Message::error("That shape is already on the board"),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use perfection_engine::{Catalog, PuzzleSeed};

    use super::*;
    use crate::ui::widgets::MessageKind;

    fn screen() -> ManualPlayScreen {
        let seed = PuzzleSeed::from_bytes([3; 16]);
        let session = GameSession::with_seed(Catalog::shapes(), 60, seed).unwrap();
        ManualPlayScreen::new(session)
    }

    fn press(screen: &mut ManualPlayScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    /// Moves the board cursor onto `slot` by walking right and down from the origin.
    fn move_board_cursor_to(screen: &mut ManualPlayScreen, slot: SlotId) {
        let columns = screen.session().catalog().columns();
        for _ in 0..slot.index() / columns {
            press(screen, KeyCode::Down);
        }
        for _ in 0..slot.index() % columns {
            press(screen, KeyCode::Right);
        }
    }

    fn drop_first_piece_at(screen: &mut ManualPlayScreen, slot: SlotId) {
        press(screen, KeyCode::Char(' '));
        move_board_cursor_to(screen, slot);
        press(screen, KeyCode::Char(' '));
    }

    #[test]
    fn test_enter_starts_the_game() {
        let mut screen = screen();
        assert!(!screen.is_running());
        press(&mut screen, KeyCode::Enter);
        assert!(screen.is_running());
        assert_eq!(screen.session().pieces().len(), 12);
    }

    #[test]
    fn test_moves_are_ignored_while_idle() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.tray_cursor, 0);
        assert_eq!(screen.held, None);
    }

    #[test]
    fn test_space_picks_then_drops() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        let piece = screen.session().pieces()[0];

        drop_first_piece_at(&mut screen, piece.target_slot());

        assert!(screen.session().piece(piece.id()).unwrap().is_placed());
        assert_eq!(screen.held, None);
        assert_eq!(screen.focus, Focus::Tray);
        assert_eq!(screen.message.as_ref().unwrap().kind(), MessageKind::Success);
    }

    #[test]
    fn test_wrong_slot_returns_piece_to_tray() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        let piece = screen.session().pieces()[0];
        let wrong = SlotId::new((piece.target_slot().index() + 1) % 12);

        drop_first_piece_at(&mut screen, wrong);

        assert!(!screen.session().piece(piece.id()).unwrap().is_placed());
        assert_eq!(screen.held, None);
        let message = screen.message.as_ref().unwrap();
        assert_eq!(message.kind(), MessageKind::Error);
        assert_eq!(message.text(), "Wrong slot! That shape doesn't fit there.");
    }

    #[test]
    fn test_picking_a_placed_piece_is_refused() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        let piece = screen.session().pieces()[0];
        drop_first_piece_at(&mut screen, piece.target_slot());

        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.held, None);
        assert_eq!(screen.message.as_ref().unwrap().kind(), MessageKind::Error);
    }

    #[test]
    fn test_rejection_messages_name_the_reason() {
        assert_eq!(
            rejection_message(Rejection::WrongSlot).text(),
            "Wrong slot! That shape doesn't fit there."
        );
        assert_eq!(
            rejection_message(Rejection::AlreadyPlaced).text(),
            "That shape is already on the board"
        );
    }

    #[test]
    fn test_dropping_an_already_placed_piece_says_so() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        let piece = screen.session().pieces()[0];
        drop_first_piece_at(&mut screen, piece.target_slot());

        // Hold the placed piece directly, as the tray refuses to hand it out
        screen.held = Some(piece.id());
        screen.focus = Focus::Board;
        press(&mut screen, KeyCode::Char(' '));

        assert_eq!(screen.held, None);
        let message = screen.message.as_ref().unwrap();
        assert_eq!(message.kind(), MessageKind::Error);
        assert_eq!(message.text(), "That shape is already on the board");
    }

    #[test]
    fn test_escape_puts_the_piece_back() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char(' '));
        assert!(screen.held.is_some());

        press(&mut screen, KeyCode::Esc);
        assert_eq!(screen.held, None);
        assert_eq!(screen.focus, Focus::Tray);
    }

    #[test]
    fn test_timeout_ends_the_game() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char(' '));
        for _ in 0..60 {
            screen.update();
        }
        assert_eq!(screen.session().state(), SessionState::Ended);
        assert!(!screen.is_running());
        assert_eq!(screen.held, None);
    }

    #[test]
    fn test_enter_after_end_plays_again() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        for _ in 0..60 {
            screen.update();
        }
        press(&mut screen, KeyCode::Enter);
        assert!(screen.is_running());
        assert_eq!(screen.session().time_remaining(), 60);
        assert_eq!(screen.session().placed_count(), 0);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char(' '));
        press(&mut screen, KeyCode::Char('r'));
        assert_eq!(screen.session().state(), SessionState::Idle);
        assert_eq!(screen.held, None);
    }

    #[test]
    fn test_q_exits() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.is_exiting());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut screen = screen();
        let mut event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        screen.handle_event(&Event::Key(event));
        assert!(!screen.is_running());
    }
}
