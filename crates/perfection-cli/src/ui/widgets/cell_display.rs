use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

use crate::ui::widgets::style;

/// A single board slot or tray position: a bordered box around one glyph.
#[derive(Debug)]
pub struct CellDisplay {
    symbol: String,
    style: Style,
    border_style: Style,
}

impl CellDisplay {
    pub fn new(symbol: impl Into<String>, style: Style) -> Self {
        Self {
            symbol: symbol.into(),
            style,
            border_style: style::EMPTY_BORDER,
        }
    }

    pub fn empty() -> Self {
        Self::new("", style::DEFAULT)
    }

    pub fn border_style(self, border_style: Style) -> Self {
        Self {
            border_style,
            ..self
        }
    }

    pub const fn width() -> u16 {
        7
    }

    pub const fn height() -> u16 {
        3
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = BlockWidget::bordered()
            .border_style(self.border_style)
            .style(style::DEFAULT);
        Paragraph::new(self.symbol.as_str())
            .style(self.style)
            .centered()
            .block(block)
            .render(area, buf);
    }
}
