use perfection_engine::{GameSession, SessionState, TimerLevel};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Gauge, Widget},
};

use crate::ui::widgets::{color, style};

/// Countdown, game status and placement progress.
#[derive(Debug)]
pub struct TimerDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> TimerDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        2 + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Formats seconds as `M:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:0>2}", seconds / 60, seconds % 60)
}

fn level_style(level: TimerLevel) -> Style {
    match level {
        TimerLevel::Normal => style::DEFAULT,
        TimerLevel::Warning => style::DEFAULT.fg(color::YELLOW),
        TimerLevel::Critical => style::DEFAULT.fg(color::RED),
    }
}

fn status_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "READY",
        SessionState::Running => "PLAYING",
        SessionState::Ended => "FINISHED",
    }
}

impl Widget for TimerDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let session = self.session;
        let time_style = level_style(session.timer_level());
        let total = session.catalog().len();

        let [status_area, gauge_area] =
            area.layout(&Layout::vertical([Constraint::Length(1), Constraint::Length(1)]));
        let [time_area, state_area, progress_area] = status_area.layout(&Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ]));

        Line::from(vec![
            Span::styled("TIME ", style::DEFAULT),
            Span::styled(format_time(session.time_remaining()), time_style),
        ])
        .left_aligned()
        .render(time_area, buf);
        Line::styled(status_label(session.state()), style::DEFAULT)
            .centered()
            .render(state_area, buf);
        Line::styled(
            format!("PLACED {}/{total}", session.placed_count()),
            style::DEFAULT,
        )
        .right_aligned()
        .render(progress_area, buf);

        let ratio = f64::from(session.time_remaining()) / f64::from(session.time_limit());
        Gauge::default()
            .gauge_style(time_style)
            .ratio(ratio.clamp(0.0, 1.0))
            .label("")
            .render(gauge_area, buf);
    }
}
