use perfection_engine::{GameSession, PieceId, SessionState, SlotId};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, Message, MessageDisplay, TimerDisplay, TrayDisplay, color, style,
};

/// Which panel currently receives cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tray,
    Board,
}

/// Where the player's cursors are, for screens that have them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub focus: Focus,
    pub tray_cursor: usize,
    pub board_cursor: SlotId,
    pub held: Option<PieceId>,
}

/// The whole game: timer on top, board and tray side by side, feedback below.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    selection: Option<Selection>,
    message: Option<&'a Message>,
    title: &'a str,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            selection: None,
            message: None,
            title: "PERFECTION",
        }
    }

    pub fn selection(self, selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            ..self
        }
    }

    pub fn message(self, message: Option<&'a Message>) -> Self {
        Self { message, ..self }
    }

    pub fn title(self, title: &'a str) -> Self {
        Self { title, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.session.state();
        let border_style = match state {
            SessionState::Idle => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Ended => match self.session.outcome() {
                Some(outcome) if outcome.won() => color::GREEN,
                _ => color::RED,
            },
        };
        let panel = |title: &'static str, focused: bool| {
            let border = if focused {
                style::CURSOR
            } else {
                Style::new().fg(border_style)
            };
            Block::bordered()
                .title(Line::from(title).centered())
                .border_style(border)
                .style(style::DEFAULT)
        };
        let focus = self.selection.map(|selection| selection.focus);
        let running = state.is_running();

        let board = BoardDisplay::new(self.session).block(panel(
            "BOARD",
            running && focus == Some(Focus::Board),
        ));
        let board = match self.selection {
            Some(selection) if running => board.cursor(
                (selection.focus == Focus::Board).then_some(selection.board_cursor),
                selection.held.is_some(),
            ),
            _ => board,
        };
        let tray = TrayDisplay::new(self.session).block(panel(
            "TRAY",
            running && focus == Some(Focus::Tray),
        ));
        let tray = match self.selection {
            Some(selection) if running => tray
                .cursor((selection.focus == Focus::Tray).then_some(selection.tray_cursor))
                .held(selection.held),
            _ => tray,
        };
        let timer = TimerDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from(self.title).centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let content_height = u16::max(board.height(), tray.height());
        let content_width = board.width().saturating_add(1).saturating_add(tray.width());
        let [timer_area, content_area, message_area] = Layout::vertical([
            Constraint::Length(timer.height()),
            Constraint::Length(content_height),
            Constraint::Length(1),
        ])
        .areas(area.centered_horizontally(Constraint::Length(content_width)));

        let [board_area, tray_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(tray.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(content_area);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_area);
        let [tray_area] = Layout::vertical([Constraint::Length(tray.height())]).areas(tray_area);

        timer.render(timer_area, buf);
        board.render(board_area, buf);
        tray.render(tray_area, buf);
        MessageDisplay::new(self.message).render(message_area, buf);

        if let Some(outcome) = self.session.outcome() {
            let (title, popup_style) = if outcome.won() {
                ("PERFECT!", Style::new().fg(color::BLACK).bg(color::GREEN))
            } else {
                ("TIME'S UP!", Style::new().fg(color::WHITE).bg(color::RED))
            };
            let block = Block::new().style(popup_style);
            let text = Text::from(vec![Line::from(title), Line::from(outcome.message())])
                .style(popup_style)
                .centered();
            let area = content_area.centered(
                Constraint::Length(content_width),
                Constraint::Length(4),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}
