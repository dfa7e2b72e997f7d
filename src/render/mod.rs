//! Stateless drawing of engine snapshots.
//!
//! Every routine reads what it needs from the engine on each call; nothing is
//! cached between frames. A full pass is [`draw_frame`]: grid, snake, reward,
//! status text, in that order so occupants paint over the grid lines.

use crate::config::{BoardConfig, Palette, Rgb};
use crate::engine::{Engine, SnakeView};
use crate::error::Result;
use crate::geometry::{Rect, cell_rect};

mod canvas;
mod pixels;

pub use canvas::CanvasSurface;
pub use pixels::PixelSurface;

/// 2D drawing target.
pub trait Surface {
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb);
}

/// A text node (status line, control label).
pub trait TextSink {
    fn set_text(&self, text: &str);
}

pub fn draw_world<S: Surface + ?Sized>(surface: &mut S, board: &BoardConfig, palette: &Palette) {
    let cell = board.cell_size_px as f64;
    let edge = board.canvas_px() as f64;
    for x in 0..=board.width {
        let fx = x as f64 * cell;
        surface.stroke_line(fx, 0.0, fx, edge, palette.grid);
    }
    for y in 0..=board.width {
        let fy = y as f64 * cell;
        surface.stroke_line(0.0, fy, edge, fy, palette.grid);
    }
}

/// Snake cells in draw order. A repeat of the head index past position 0 is
/// dropped so the head shade wins on that cell.
pub fn visible_snake_cells(cells: &[u32]) -> impl Iterator<Item = u32> + '_ {
    let head = cells.first().copied();
    cells
        .iter()
        .enumerate()
        .filter(move |&(i, &c)| !(i > 0 && Some(c) == head))
        .map(|(_, &c)| c)
}

/// Returns the number of cells filled.
pub fn draw_snake<E, S>(engine: &E, surface: &mut S, board: &BoardConfig, palette: &Palette) -> Result<usize>
where
    E: Engine + ?Sized,
    S: Surface + ?Sized,
{
    let view = SnakeView::borrow(engine)?;
    let cells = view.cells_at(engine.epoch())?;
    let mut drawn = 0;
    for (i, cell) in visible_snake_cells(cells).enumerate() {
        let color = if i == 0 { palette.head } else { palette.body };
        surface.fill_rect(cell_rect(cell, board), color);
        drawn += 1;
    }
    Ok(drawn)
}

/// Returns whether a reward was drawn; there is none once the board is full.
pub fn draw_reward<E, S>(engine: &E, surface: &mut S, board: &BoardConfig, palette: &Palette) -> bool
where
    E: Engine + ?Sized,
    S: Surface + ?Sized,
{
    match engine.reward_cell() {
        Some(index) => {
            surface.fill_rect(cell_rect(index, board), palette.reward);
            true
        }
        None => false,
    }
}

pub fn draw_game_status<E, T>(engine: &E, status: &T)
where
    E: Engine + ?Sized,
    T: TextSink + ?Sized,
{
    status.set_text(&engine.status_text());
}

pub fn draw_frame<E, S, T>(
    engine: &E,
    surface: &mut S,
    status: &T,
    board: &BoardConfig,
    palette: &Palette,
) -> Result<()>
where
    E: Engine + ?Sized,
    S: Surface + ?Sized,
    T: TextSink + ?Sized,
{
    draw_world(surface, board, palette);
    draw_snake(engine, surface, board, palette)?;
    draw_reward(engine, surface, board, palette);
    draw_game_status(engine, status);
    Ok(())
}
