use wasm_bindgen::JsValue;

/// Errors raised by the snake front-end.
///
/// Terminal game states (won / lost) are not errors; they flow through
/// [`crate::engine::GameStatus`]. Everything here ends the session.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("no {0} available")]
    MissingGlobal(&'static str),
    #[error("element `{0}` is missing or has the wrong type")]
    MissingElement(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("snake length {length} exceeds the engine buffer of {capacity} cells")]
    SnakeBufferOverrun { length: usize, capacity: usize },
    #[error("snake view taken at epoch {view_epoch} read at epoch {current_epoch}")]
    StaleSnakeView { view_epoch: u64, current_epoch: u64 },
    #[error("failed to schedule the next tick: {0}")]
    Schedule(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(s) => GameError::Js(s),
            None => GameError::Js(format!("{:?}", value)),
        }
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
