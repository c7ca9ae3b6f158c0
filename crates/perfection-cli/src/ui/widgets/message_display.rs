use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Widget,
};

use crate::ui::widgets::{color, style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Feedback line shown under the board after the last player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    text: String,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }

    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug)]
pub struct MessageDisplay<'a> {
    message: Option<&'a Message>,
}

impl<'a> MessageDisplay<'a> {
    pub fn new(message: Option<&'a Message>) -> Self {
        Self { message }
    }
}

impl Widget for MessageDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(message) = self.message else {
            return;
        };
        let style: Style = match message.kind() {
            MessageKind::Info => style::DEFAULT.fg(color::CYAN),
            MessageKind::Success => style::DEFAULT.fg(color::GREEN),
            MessageKind::Error => style::DEFAULT.fg(color::RED),
        };
        Line::styled(message.text(), style).centered().render(area, buf);
    }
}
