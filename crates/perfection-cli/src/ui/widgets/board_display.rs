use std::iter;

use perfection_engine::{Catalog, GameSession, SlotId};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{CellDisplay, style};

/// The board: one cell per slot, showing the placed piece or the hole it expects.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    session: &'a GameSession,
    cursor: Option<SlotId>,
    holding: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            cursor: None,
            holding: false,
            block: None,
        }
    }

    pub fn cursor(self, cursor: Option<SlotId>, holding: bool) -> Self {
        Self {
            cursor,
            holding,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn catalog(&self) -> &Catalog {
        self.session.catalog()
    }

    pub fn width(&self) -> u16 {
        super::grid_extent(
            self.catalog().columns(),
            CellDisplay::width(),
            super::block_horizontal_margin(self.block.as_ref()),
        )
    }

    pub fn height(&self) -> u16 {
        super::grid_extent(
            self.catalog().rows(),
            CellDisplay::height(),
            super::block_vertical_margin(self.block.as_ref()),
        )
    }

    fn cell(&self, slot: SlotId) -> CellDisplay {
        let catalog = self.catalog();
        let cell = if let Some(piece) = self.session.piece_for_slot(slot) {
            let symbol = catalog.kind(piece.id()).map_or('?', |kind| kind.symbol());
            let piece_style = style::piece(piece.id());
            CellDisplay::new(symbol, piece_style).border_style(piece_style)
        } else {
            let symbol = catalog
                .expected_piece(slot)
                .and_then(|id| catalog.kind(id))
                .map_or('?', |kind| kind.symbol());
            CellDisplay::new(symbol, style::HOLE)
        };
        if self.cursor == Some(slot) {
            let border: Style = if self.holding {
                style::HELD
            } else {
                style::CURSOR
            };
            cell.border_style(border)
        } else {
            cell
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let catalog = self.catalog();
        let col_constraints =
            (0..catalog.columns()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..catalog.rows()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .flat_map(|row| row.layout_vec(&horizontal));

        for (grid_cell, slot) in iter::zip(grid_cells, catalog.slots()) {
            self.cell(slot).render(grid_cell, buf);
        }
    }
}
