use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("controller is not ready to play: board and side must be set first")]
    NotReady,
    #[error("no legal move available for {0:?}")]
    NoLegalMoves(crate::board::Player),
    #[error("unknown field state `{0}`")]
    UnknownFieldState(String),
    #[error("unknown color `{0}`")]
    UnknownColor(String),
    #[error("unknown direction `{0}`")]
    UnknownDirection(String),
    #[error("board must be {expected_width}x{expected_height}, got {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
    #[error("field ({x}, {y}) lies outside the board")]
    FieldOutOfBounds { x: i64, y: i64 },
}
