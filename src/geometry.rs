//! Mapping between linear cell indices and canvas pixels.

use crate::config::BoardConfig;

/// Row / column of a cell on a square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

/// Axis-aligned pixel rectangle (x, y, w, h).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Caller guarantees `index < width * width`.
pub fn cell_pos(index: u32, width: u32) -> CellPos {
    CellPos { row: index / width, col: index % width }
}

pub fn cell_rect(index: u32, board: &BoardConfig) -> Rect {
    let CellPos { row, col } = cell_pos(index, board.width);
    let size = board.cell_size_px as f64;
    Rect::new(col as f64 * size, row as f64 * size, size, size)
}

/// The whole canvas.
pub fn board_rect(board: &BoardConfig) -> Rect {
    let edge = board.canvas_px() as f64;
    Rect::new(0.0, 0.0, edge, edge)
}
