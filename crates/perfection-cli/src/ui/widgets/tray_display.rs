use std::iter;

use perfection_engine::{GameSession, Piece, PieceId};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{CellDisplay, style};

/// The shuffled tray. Placed pieces leave an empty cell behind.
#[derive(Debug)]
pub struct TrayDisplay<'a> {
    session: &'a GameSession,
    cursor: Option<usize>,
    held: Option<PieceId>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> TrayDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            cursor: None,
            held: None,
            block: None,
        }
    }

    pub fn cursor(self, cursor: Option<usize>) -> Self {
        Self { cursor, ..self }
    }

    pub fn held(self, held: Option<PieceId>) -> Self {
        Self { held, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    // Sized for the whole catalog so the layout does not jump when a game starts.
    fn columns(&self) -> usize {
        self.session.catalog().columns()
    }

    fn rows(&self) -> usize {
        self.session.catalog().rows()
    }

    pub fn width(&self) -> u16 {
        super::grid_extent(
            self.columns(),
            CellDisplay::width(),
            super::block_horizontal_margin(self.block.as_ref()),
        )
    }

    pub fn height(&self) -> u16 {
        super::grid_extent(
            self.rows(),
            CellDisplay::height(),
            super::block_vertical_margin(self.block.as_ref()),
        )
    }

    fn cell(&self, index: usize, piece: &Piece) -> CellDisplay {
        let cell = if piece.is_placed() {
            CellDisplay::empty()
        } else {
            let symbol = self
                .session
                .catalog()
                .kind(piece.id())
                .map_or('?', |kind| kind.symbol());
            CellDisplay::new(symbol, style::piece(piece.id()))
        };
        if self.held == Some(piece.id()) {
            cell.border_style(style::HELD)
        } else if self.cursor == Some(index) {
            cell.border_style(style::CURSOR)
        } else {
            cell
        }
    }
}

impl Widget for TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.columns()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..self.rows()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .flat_map(|row| row.layout_vec(&horizontal));

        let pieces = self.session.pieces().iter().enumerate();
        for (grid_cell, (index, piece)) in iter::zip(grid_cells, pieces) {
            self.cell(index, piece).render(grid_cell, buf);
        }
    }
}
