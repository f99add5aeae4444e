//! Translation between host-side messages and engine types.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Field, Player, BOARD_HEIGHT, BOARD_WIDTH, CELL_COUNT};
use crate::error::EngineError;
use crate::moves::Move;

/// One cell as sent by the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub x: i64,
    pub y: i64,
    /// `EMPTY`, `OBSTRUCTED`, `RED` or `BLUE`.
    pub state: String,
}

/// A full board as sent by the game server. Cells that are not listed are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub fields: Vec<FieldSnapshot>,
}

/// Outgoing move, tagged with the room it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMessage {
    pub room_id: String,
    pub x: u8,
    pub y: u8,
    pub direction: String,
}

impl MoveMessage {
    pub fn new(room_id: impl Into<String>, mv: &Move) -> Self {
        Self {
            room_id: room_id.into(),
            x: mv.x,
            y: mv.y,
            direction: mv.direction.name().to_owned(),
        }
    }
}

pub fn parse_field_state(token: &str) -> Result<Field, EngineError> {
    match token {
        "EMPTY" => Ok(Field::Empty),
        "OBSTRUCTED" => Ok(Field::Obstructed),
        "RED" => Ok(Field::Red),
        "BLUE" => Ok(Field::Blue),
        other => Err(EngineError::UnknownFieldState(other.to_owned())),
    }
}

pub fn parse_color(token: &str) -> Result<Player, EngineError> {
    match token {
        "red" => Ok(Player::Red),
        "blue" => Ok(Player::Blue),
        other => Err(EngineError::UnknownColor(other.to_owned())),
    }
}

impl BoardSnapshot {
    /// Decode into a [`Board`]; every cell is written before the board is handed out.
    pub fn to_board(&self) -> Result<Board, EngineError> {
        if self.width != BOARD_WIDTH || self.height != BOARD_HEIGHT {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
                expected_width: BOARD_WIDTH,
                expected_height: BOARD_HEIGHT,
            });
        }

        let mut fields = [Field::Empty; CELL_COUNT];
        for field in &self.fields {
            let in_bounds = (0..self.width as i64).contains(&field.x) && (0..self.height as i64).contains(&field.y);
            if !in_bounds {
                return Err(EngineError::FieldOutOfBounds {
                    x: field.x,
                    y: field.y,
                });
            }
            fields[field.y as usize * self.width + field.x as usize] = parse_field_state(&field.state)?;
        }
        Ok(Board::from_fields(fields))
    }
}
