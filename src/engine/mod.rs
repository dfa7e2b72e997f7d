//! Boundary with the world engine.
//!
//! The front-end never looks inside the engine: it issues commands and reads
//! snapshots through [`Engine`]. [`World`] is the engine shipped with the crate;
//! any other type implementing the trait can be dropped in.

use crate::error::{GameError, Result};

mod world;

pub use world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Engine status once started. "Not started" is `None` at the trait level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Query / command surface of a snake world.
pub trait Engine {
    fn width(&self) -> u32;
    /// Not started -> playing. Repeated calls are the engine's business.
    fn start(&mut self);
    /// Best effort; the engine drops commands it does not accept.
    fn change_direction(&mut self, direction: Direction);
    /// Advance one tick. Invalidates any snake view taken before the call.
    fn update(&mut self);
    fn status(&self) -> Option<GameStatus>;
    fn status_text(&self) -> String;
    /// Engine-owned cell buffer; only the first [`Engine::snake_length`]
    /// entries are meaningful.
    fn snake_cells(&self) -> &[u32];
    fn snake_length(&self) -> usize;
    /// `None` once no reward remains.
    fn reward_cell(&self) -> Option<u32>;
    /// Bumped by every [`Engine::update`].
    fn epoch(&self) -> u64;
}

/// Read-only, bounds-checked window onto the engine's snake buffer.
///
/// Borrowing the engine already keeps the buffer alive; the epoch guards views
/// handed across a tick boundary by other means.
#[derive(Clone, Copy, Debug)]
pub struct SnakeView<'a> {
    cells: &'a [u32],
    epoch: u64,
}

impl<'a> SnakeView<'a> {
    pub fn borrow<E: Engine + ?Sized>(engine: &'a E) -> Result<Self> {
        let buffer = engine.snake_cells();
        let length = engine.snake_length();
        let cells = buffer.get(..length).ok_or(GameError::SnakeBufferOverrun {
            length,
            capacity: buffer.len(),
        })?;
        Ok(Self { cells, epoch: engine.epoch() })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The cells, provided no tick has happened since the view was taken.
    pub fn cells_at(&self, current_epoch: u64) -> Result<&'a [u32]> {
        if current_epoch != self.epoch {
            return Err(GameError::StaleSnakeView {
                view_epoch: self.epoch,
                current_epoch,
            });
        }
        Ok(self.cells)
    }
}
