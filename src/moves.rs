//! Move generation and the position queries the heuristic is built from.
//!
//! A piece always travels exactly as far as there are pieces (of either colour) on the full line
//! it moves along. It may jump its own pieces, empty cells and obstructions, but not an opposing
//! piece; it may land on an opposing piece (capturing it) but never on its own piece or an
//! obstruction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, Field, Player};
use crate::error::EngineError;

/// One of the eight compass directions. "Up" increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// Enumeration order used by move generation (counter-clockwise from east).
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Right => (1, 0),
            Direction::UpRight => (1, 1),
            Direction::Up => (0, 1),
            Direction::UpLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, -1),
            Direction::Down => (0, -1),
            Direction::DownRight => (1, -1),
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::UpRight | Direction::DownLeft => Axis::Rising,
            Direction::DownRight | Direction::UpLeft => Axis::Falling,
        }
    }

    /// Wire token, e.g. `UP_RIGHT`.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::UpRight => "UP_RIGHT",
            Direction::Right => "RIGHT",
            Direction::DownRight => "DOWN_RIGHT",
            Direction::Down => "DOWN",
            Direction::DownLeft => "DOWN_LEFT",
            Direction::Left => "LEFT",
            Direction::UpLeft => "UP_LEFT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.name() == token)
            .ok_or_else(|| EngineError::UnknownDirection(token.to_owned()))
    }
}

/// The line a direction travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The row.
    Horizontal,
    /// The column.
    Vertical,
    /// The diagonal on which `x - y` is constant.
    Rising,
    /// The diagonal on which `x + y` is constant.
    Falling,
}

/// A proposal to move the piece at `(x, y)` in `direction`; not validated against any board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: u8,
    pub y: u8,
    pub direction: Direction,
}

impl Move {
    pub const fn new(x: u8, y: u8, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    pub const fn origin(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.direction)
    }
}

/// Number of pieces (either side) on the whole line through `at` along `axis`.
pub fn line_distance(board: &Board, at: Coord, axis: Axis) -> usize {
    let (dx, dy): (isize, isize) = match axis {
        Axis::Horizontal => (1, 0),
        Axis::Vertical => (0, 1),
        Axis::Rising => (1, 1),
        Axis::Falling => (1, -1),
    };

    let mut count = 0;
    for sign in [1, -1] {
        // The origin belongs to the forward walk only.
        let mut x = at.x as isize;
        let mut y = at.y as isize;
        if sign == -1 {
            x -= dx;
            y -= dy;
        }
        while let Some(field) = board.try_field(x, y) {
            if field.is_piece() {
                count += 1;
            }
            x += sign * dx;
            y += sign * dy;
        }
    }
    count
}

/// Mandatory hop length for a piece at `at` moving in `direction`.
pub fn move_distance(board: &Board, at: Coord, direction: Direction) -> usize {
    line_distance(board, at, direction.axis())
}

/// Where `mv` lands on `board`, or `None` when the hop leaves the board or has length zero.
pub fn resolve_target(board: &Board, mv: &Move) -> Option<Coord> {
    let distance = move_distance(board, mv.origin(), mv.direction);
    if distance == 0 {
        return None;
    }
    board.step(mv.origin(), mv.direction, distance)
}

/// Whether `player` may make `mv` hopping exactly `distance` cells.
pub fn is_valid_move(board: &Board, player: Player, mv: &Move, distance: usize) -> bool {
    let Some(target) = board.step(mv.origin(), mv.direction, distance) else {
        return false;
    };

    let opponent = player.opponent();
    for step in 0..distance {
        let Some(at) = board.step(mv.origin(), mv.direction, step) else {
            return false;
        };
        if board.field(at).is_piece_of(opponent) {
            return false;
        }
    }

    let landing = board.field(target);
    !landing.is_piece_of(player) && landing != Field::Obstructed
}

/// Every legal move for `player`: pieces in row-major order, directions in [`Direction::ALL`]
/// order.
pub fn possible_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for &at in board.pieces(player) {
        for direction in Direction::ALL {
            let distance = move_distance(board, at, direction);
            if distance == 0 {
                continue;
            }
            let mv = Move::new(at.x, at.y, direction);
            if is_valid_move(board, player, &mv, distance) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// The board after `mv`: origin cleared, target overwritten with the moving piece. Returns `None`
/// if the move has no target on `board`.
pub fn apply_move(board: &Board, mv: &Move) -> Option<Board> {
    let target = resolve_target(board, mv)?;
    Some(transition(board, mv, target))
}

fn transition(board: &Board, mv: &Move, target: Coord) -> Board {
    let piece = board.field(mv.origin());
    board.with_fields([(mv.origin(), Field::Empty), (target, piece)])
}

/// A legal move together with where it lands and the board it produces.
#[derive(Debug, Clone)]
pub struct Successor {
    pub mv: Move,
    pub target: Coord,
    pub board: Board,
}

/// [`possible_moves`] applied to `board`, in the same order.
pub fn successors(board: &Board, player: Player) -> Vec<Successor> {
    possible_moves(board, player)
        .into_iter()
        .filter_map(|mv| {
            let target = resolve_target(board, &mv)?;
            Some(Successor {
                mv,
                target,
                board: transition(board, &mv, target),
            })
        })
        .collect()
}

/// A side has won once all of its pieces form a single swarm.
pub fn has_player_won(board: &Board, player: Player) -> bool {
    board.piece_count(player) == board.swarm_size(player)
}

/// Distance from `at` to the closest swarm member, infinite for an empty swarm.
fn nearest_swarm_distance(board: &Board, player: Player, at: Coord) -> f64 {
    board
        .swarm(player)
        .iter()
        .map(|member| at.distance(*member))
        .fold(f64::INFINITY, f64::min)
}

/// Legal moves that bring a piece from outside the swarm strictly closer to it.
pub fn moves_to_swarm(board: &Board, player: Player) -> Vec<Move> {
    possible_moves(board, player)
        .into_iter()
        .filter(|mv| {
            let Some(target) = resolve_target(board, mv) else {
                return false;
            };
            let from = nearest_swarm_distance(board, player, mv.origin());
            let to = nearest_swarm_distance(board, player, target);
            to < from && from > 0.0
        })
        .collect()
}

/// Sum of each piece's distance to the centroid of `player`'s pieces.
pub fn centroid_spread(board: &Board, player: Player) -> f64 {
    let pieces = board.pieces(player);
    if pieces.is_empty() {
        return 0.0;
    }
    let count = pieces.len() as f64;
    let mean_x = pieces.iter().map(|at| f64::from(at.x)).sum::<f64>() / count;
    let mean_y = pieces.iter().map(|at| f64::from(at.y)).sum::<f64>() / count;
    pieces
        .iter()
        .map(|at| (f64::from(at.x) - mean_x).hypot(f64::from(at.y) - mean_y))
        .sum()
}

/// Sum of each piece's distance to its nearest swarm member. Zero once the side has won.
pub fn distance_to_swarm(board: &Board, player: Player) -> f64 {
    board
        .pieces(player)
        .iter()
        .map(|at| nearest_swarm_distance(board, player, *at))
        .sum()
}
