use log::{debug, trace, warn};
use wasm_bindgen::prelude::*;

use crate::board::{Board, Player};
use crate::error::EngineError;
use crate::moves::Move;
use crate::search::{SearchConfig, Searcher};
use crate::snapshot::{parse_color, BoardSnapshot, MoveMessage};

/// How far the session has progressed towards being able to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unjoined,
    RoomJoined,
    SideAssigned,
    /// Room, side and at least one board are known.
    Ready,
}

/// Turn-by-turn decision engine for one game session.
///
/// The three setters may arrive in any order; [`Controller::decide_next_move`] only needs a board
/// and a side. Decisions run one at a time and to completion.
#[derive(Debug, Default)]
pub struct Controller {
    config: SearchConfig,
    board: Option<Board>,
    room_id: Option<String>,
    sides: Option<(Player, Player)>,
    evaluations: u32,
}

impl Controller {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the current position.
    pub fn update_state(&mut self, board: Board) {
        trace!("received new board\n{board:?}");
        self.board = Some(board);
    }

    /// Record the room this session plays in. The board is kept as is.
    pub fn join_room(&mut self, room_id: impl Into<String>) {
        let room_id = room_id.into();
        debug!("joined room {room_id}");
        self.room_id = Some(room_id);
    }

    /// Fix this engine's side; the opponent is the other colour.
    pub fn assign_side(&mut self, own: Player) {
        debug!("playing as {own:?}");
        self.sides = Some((own, own.opponent()));
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn own_player(&self) -> Option<Player> {
        self.sides.map(|(own, _)| own)
    }

    pub fn opponent(&self) -> Option<Player> {
        self.sides.map(|(_, opponent)| opponent)
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Static evaluations spent by the most recent decision.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    pub fn phase(&self) -> Phase {
        match (&self.room_id, &self.sides, &self.board) {
            (Some(_), Some(_), Some(_)) => Phase::Ready,
            (_, Some(_), _) => Phase::SideAssigned,
            (Some(_), None, _) => Phase::RoomJoined,
            (None, None, _) => Phase::Unjoined,
        }
    }

    /// Choose this turn's move for the own side on the current board.
    pub fn decide_next_move(&mut self) -> Result<Move, EngineError> {
        self.evaluations = 0;
        let (Some(board), Some((own, _))) = (&self.board, self.sides) else {
            warn!("move requested before board and side were known");
            return Err(EngineError::NotReady);
        };

        let mut searcher = Searcher::new(&self.config, own);
        let decision = searcher.search(board);
        self.evaluations = searcher.evaluations();

        let decision = decision.ok_or(EngineError::NoLegalMoves(own))?;
        debug!(
            "chose {} with score {} after {} evaluations",
            decision.best_move, decision.score, decision.evaluations
        );
        Ok(decision.best_move)
    }
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// wasm-bindgen facing session wrapper: the host decodes server messages into plain objects and
/// forwards them here.
#[wasm_bindgen]
pub struct PiranhasBot {
    controller: Controller,
}

#[wasm_bindgen]
impl PiranhasBot {
    /// `config` may be `undefined`/`null` for [`SearchConfig::default`].
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PiranhasBot, JsValue> {
        let config: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            controller: Controller::new(config),
        })
    }

    #[wasm_bindgen(js_name = defaultConfig)]
    pub fn default_config() -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&SearchConfig::default())?)
    }

    /// Replace the position with a `{ width, height, fields: [{ x, y, state }] }` snapshot.
    #[wasm_bindgen(js_name = updateState)]
    pub fn update_state(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        let snapshot: BoardSnapshot = serde_wasm_bindgen::from_value(snapshot)?;
        let board = snapshot.to_board().map_err(to_js)?;
        self.controller.update_state(board);
        Ok(())
    }

    #[wasm_bindgen(js_name = joinRoom)]
    pub fn join_room(&mut self, room_id: String) {
        self.controller.join_room(room_id);
    }

    /// `color` is `"red"` or `"blue"`.
    #[wasm_bindgen(js_name = assignSide)]
    pub fn assign_side(&mut self, color: &str) -> Result<(), JsValue> {
        let own = parse_color(color).map_err(to_js)?;
        self.controller.assign_side(own);
        Ok(())
    }

    /// Decide and return `{ roomId, x, y, direction }`.
    #[wasm_bindgen(js_name = nextMove)]
    pub fn next_move(&mut self) -> Result<JsValue, JsValue> {
        let started = js_sys::Date::now();
        let mv = self.controller.decide_next_move().map_err(to_js)?;
        debug!("decision took {:.0}ms", js_sys::Date::now() - started);

        let room_id = self.controller.room_id().unwrap_or_default();
        Ok(serde_wasm_bindgen::to_value(&MoveMessage::new(room_id, &mv))?)
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.controller.phase())
    }

    /// Static evaluations spent by the last `nextMove`.
    pub fn evaluations(&self) -> u32 {
        self.controller.evaluations()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    fn bot_plays_a_lone_piece() {
        let mut bot = PiranhasBot::new(JsValue::UNDEFINED).expect("default config");
        assert!(bot.next_move().is_err());

        let snapshot = serde_wasm_bindgen::to_value(&BoardSnapshot {
            width: 10,
            height: 10,
            fields: vec![crate::snapshot::FieldSnapshot {
                x: 5,
                y: 5,
                state: "RED".to_owned(),
            }],
        })
        .expect("snapshot serialises");
        bot.join_room("room-7".to_owned());
        bot.assign_side("red").expect("known color");
        bot.update_state(snapshot).expect("valid snapshot");
        assert_eq!(bot.phase(), "Ready");

        let message: MoveMessage =
            serde_wasm_bindgen::from_value(bot.next_move().expect("ready")).expect("move message");
        assert_eq!(message.room_id, "room-7");
        assert_eq!((message.x, message.y, message.direction.as_str()), (5, 5, "RIGHT"));
    }

    #[wasm_bindgen_test]
    fn bot_rejects_unknown_color() {
        let mut bot = PiranhasBot::new(JsValue::NULL).expect("default config");
        assert!(bot.assign_side("green").is_err());
    }
}
