#![deny(clippy::unwrap_used)]
//! WebAssembly engine for Piranhas, the 10×10 swarm game.
//!
//! The crate is split along the way a turn flows through it:
//!
//! * [`Board`] – a flat, copy-on-transition grid with per-side piece lists and swarms memoised on
//!   first use. Each transition produces a fresh value with fresh caches.
//! * [`moves`] – line distances, move validity and generation, move application, the win
//!   condition and the compactness measures the heuristic uses.
//! * [`Controller`] – session state plus the heuristic lookahead that picks one move per turn.
//!   [`PiranhasBot`] exposes it to a JavaScript host, which owns the connection and the wire
//!   format and forwards decoded messages.
//!
//! The lookahead is single-sided: it keeps expanding the engine's own follow-up moves and only
//! sees the opponent through the static score of each transition.

mod board;
mod controller;
mod error;
mod heuristic;
mod logging;
pub mod moves;
mod search;
mod snapshot;

pub use board::{Board, Coord, Field, Pieces, Player, BOARD_HEIGHT, BOARD_WIDTH, CELL_COUNT};
pub use controller::{Controller, Phase, PiranhasBot};
pub use error::EngineError;
pub use heuristic::{static_score, LOSS_SCORE, WIN_BONUS};
pub use moves::{Direction, Move};
pub use search::{Decision, SearchConfig, Searcher};
pub use snapshot::{parse_color, parse_field_state, BoardSnapshot, FieldSnapshot, MoveMessage};

use wasm_bindgen::prelude::*;

/// Install a panic hook sending Rust panics to the browser console. The hook is only compiled in
/// when the `console_error_panic_hook` feature is enabled (default).
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Send engine logs to the browser console at `level` (`error`, `warn`, `info`, `debug`,
/// `trace` or `off`).
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    logging::install(logging::parse_level(level));
}

/// Side length of the board.
#[wasm_bindgen(js_name = boardSize)]
pub fn board_size() -> usize {
    BOARD_WIDTH
}
