//! Arrow keys -> direction commands.
//!
//! Every recognised key is forwarded to the engine on the spot. Nothing is
//! queued or coalesced here; if several keys land between two ticks the engine
//! sees all of them, in order.

use crate::engine::{Direction, Engine};

/// Maps a `KeyboardEvent.code` value to a direction.
pub fn direction_for_code(code: &str) -> Option<Direction> {
    match code {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Forward an arrow key to the engine. Other keys are ignored.
pub fn route_key<E: Engine + ?Sized>(engine: &mut E, code: &str) -> Option<Direction> {
    let direction = direction_for_code(code)?;
    engine.change_direction(direction);
    Some(direction)
}
