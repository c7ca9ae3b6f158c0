use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, key_binding_display::*, message_display::*,
    session_display::*, timer_display::*, tray_display::*,
};

mod board_display;
mod cell_display;
mod key_binding_display;
mod message_display;
mod session_display;
mod timer_display;
mod tray_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(80, 120, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const PINK: Color = Color::Rgb(255, 105, 180);
    pub const LIME: Color = Color::Rgb(170, 255, 0);
    pub const TEAL: Color = Color::Rgb(0, 170, 170);
    pub const VIOLET: Color = Color::Rgb(160, 90, 255);
    pub const GOLD: Color = Color::Rgb(255, 200, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Piece colours, assigned by piece id.
    pub const PIECES: [Color; 12] = [
        RED, BLUE, GREEN, YELLOW, MAGENTA, ORANGE, PINK, CYAN, LIME, TEAL, VIOLET, GOLD,
    ];
}

pub mod style {
    use perfection_engine::PieceId;
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HOLE: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const EMPTY_BORDER: Style = fg_bg(color::GRAY, color::BLACK);
    pub const CURSOR: Style = fg_bg(color::YELLOW, color::BLACK).add_modifier(Modifier::BOLD);
    pub const HELD: Style = fg_bg(color::CYAN, color::BLACK).add_modifier(Modifier::BOLD);

    pub const fn piece(id: PieceId) -> Style {
        fg_bg(color::PIECES[id.index() % color::PIECES.len()], color::BLACK)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

/// Size of `cells` cells of `cell_size` each plus `margin`, saturating at `u16::MAX`.
fn grid_extent(cells: usize, cell_size: u16, margin: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_size)
        .saturating_add(margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_extent() {
        assert_eq!(grid_extent(4, 7, 2), 30);
        assert_eq!(grid_extent(0, 7, 2), 2);
    }

    #[test]
    fn test_grid_extent_saturates() {
        assert_eq!(grid_extent(10_000, 7, 2), u16::MAX);
        assert_eq!(grid_extent(usize::MAX, 3, 2), u16::MAX);
        assert_eq!(grid_extent(1, u16::MAX, 2), u16::MAX);
    }
}
