use std::cell::OnceCell;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::moves::Direction;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 10;
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;
pub const NUM_PLAYERS: usize = 2;

/// Piece lists stay inline for the usual 16 piranhas per side.
pub type Pieces = SmallVec<[Coord; 16]>;

/// The eight neighbours used for swarm connectivity.
const NEIGHBOURS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// The piece value this side places on the board.
    pub const fn piece(self) -> Field {
        match self {
            Player::Red => Field::Red,
            Player::Blue => Field::Blue,
        }
    }

    const fn index(self) -> usize {
        match self {
            Player::Blue => 0,
            Player::Red => 1,
        }
    }
}

/// Content of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Field {
    #[default]
    Empty,
    /// Permanently impassable; never holds a piece.
    Obstructed,
    Red,
    Blue,
}

impl Field {
    pub const fn is_piece(self) -> bool {
        matches!(self, Field::Red | Field::Blue)
    }

    pub const fn owner(self) -> Option<Player> {
        match self {
            Field::Red => Some(Player::Red),
            Field::Blue => Some(Player::Blue),
            Field::Empty | Field::Obstructed => None,
        }
    }

    pub fn is_piece_of(self, player: Player) -> bool {
        self.owner() == Some(player)
    }
}

/// A cell coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two cells.
    pub fn distance(self, other: Coord) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Default)]
struct Derived {
    pieces: OnceCell<Pieces>,
    swarm: OnceCell<Pieces>,
}

/// A 10×10 Piranhas position.
///
/// The grid is a flat row-major array and is never written once the value exists: transitions go
/// through [`Board::with_field`] / [`Board::with_fields`], which copy the cells and hand the new
/// board its own empty caches. Piece lists and swarms are memoised per side on first use, so a
/// cached answer can only ever describe the cells it was computed from.
#[derive(Clone)]
pub struct Board {
    fields: [Field; CELL_COUNT],
    derived: [Derived; NUM_PLAYERS],
}

impl Board {
    pub fn empty() -> Self {
        Self::from_fields([Field::Empty; CELL_COUNT])
    }

    /// Build a board from a row-major cell array (`index = y * width + x`).
    pub fn from_fields(fields: [Field; CELL_COUNT]) -> Self {
        Self {
            fields,
            derived: Default::default(),
        }
    }

    pub const fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub const fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    pub fn contains(&self, x: isize, y: isize) -> bool {
        (0..self.width() as isize).contains(&x) && (0..self.height() as isize).contains(&y)
    }

    /// Cell at an in-bounds coordinate. Panics outside the grid; use [`Board::try_field`] for
    /// unchecked input.
    pub fn field(&self, at: Coord) -> Field {
        self.fields[self.checked_index(at)]
    }

    pub fn try_field(&self, x: isize, y: isize) -> Option<Field> {
        self.contains(x, y)
            .then(|| self.fields[y as usize * self.width() + x as usize])
    }

    pub fn fields(&self) -> &[Field; CELL_COUNT] {
        &self.fields
    }

    /// A copy of this board with one cell replaced.
    pub fn with_field(&self, at: Coord, value: Field) -> Board {
        self.with_fields([(at, value)])
    }

    /// A copy of this board with the given cells replaced, in order. The receiver and its caches
    /// are left untouched.
    pub fn with_fields<I>(&self, writes: I) -> Board
    where
        I: IntoIterator<Item = (Coord, Field)>,
    {
        let mut fields = self.fields;
        for (at, value) in writes {
            fields[self.checked_index(at)] = value;
        }
        Board::from_fields(fields)
    }

    /// The cell `distance` steps away from `from` along `direction`, or `None` if that leaves the
    /// board.
    pub fn step(&self, from: Coord, direction: Direction, distance: usize) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let distance = distance as isize;
        let x = from.x as isize + dx as isize * distance;
        let y = from.y as isize + dy as isize * distance;
        self.contains(x, y).then(|| Coord::new(x as u8, y as u8))
    }

    /// Cells holding `player`'s pieces, in row-major order.
    pub fn pieces(&self, player: Player) -> &Pieces {
        self.derived[player.index()].pieces.get_or_init(|| {
            let mut pieces = Pieces::new();
            for y in 0..self.height() {
                for x in 0..self.width() {
                    let at = Coord::new(x as u8, y as u8);
                    if self.field(at).is_piece_of(player) {
                        pieces.push(at);
                    }
                }
            }
            pieces
        })
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces(player).len()
    }

    /// The largest 8-connected group of `player`'s pieces, in row-major order. Among groups of
    /// equal size the one found first by a row-major scan wins.
    pub fn swarm(&self, player: Player) -> &Pieces {
        self.derived[player.index()]
            .swarm
            .get_or_init(|| self.largest_group(player))
    }

    pub fn swarm_size(&self, player: Player) -> usize {
        self.swarm(player).len()
    }

    pub fn in_swarm(&self, player: Player, at: Coord) -> bool {
        self.swarm(player).contains(&at)
    }

    fn largest_group(&self, player: Player) -> Pieces {
        let mut visited = [false; CELL_COUNT];
        let mut worklist: Vec<Coord> = Vec::with_capacity(CELL_COUNT);
        let mut best = Pieces::new();

        for &start in self.pieces(player) {
            if visited[self.index(start)] {
                continue;
            }
            visited[self.index(start)] = true;
            worklist.push(start);

            let mut group = Pieces::new();
            while let Some(at) = worklist.pop() {
                group.push(at);
                for (dx, dy) in NEIGHBOURS {
                    let x = at.x as isize + dx as isize;
                    let y = at.y as isize + dy as isize;
                    if !self.contains(x, y) {
                        continue;
                    }
                    let next = Coord::new(x as u8, y as u8);
                    let index = self.index(next);
                    if !visited[index] && self.fields[index].is_piece_of(player) {
                        visited[index] = true;
                        worklist.push(next);
                    }
                }
            }

            if group.len() > best.len() {
                best = group;
            }
        }

        best.sort_unstable_by_key(|at| (at.y, at.x));
        best
    }

    fn checked_index(&self, at: Coord) -> usize {
        assert!(
            self.contains(at.x as isize, at.y as isize),
            "coordinate ({}, {}) is off the board",
            at.x,
            at.y
        );
        self.index(at)
    }

    #[inline]
    fn index(&self, at: Coord) -> usize {
        at.y as usize * self.width() + at.x as usize
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Board {}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Top row first so "up" reads upwards.
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let symbol = match self.field(Coord::new(x as u8, y as u8)) {
                    Field::Empty => '.',
                    Field::Obstructed => '#',
                    Field::Red => 'R',
                    Field::Blue => 'B',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a board from `(x, y, field)` triples.
    pub(crate) fn board_with(cells: &[(u8, u8, Field)]) -> Board {
        let mut fields = [Field::Empty; CELL_COUNT];
        for &(x, y, field) in cells {
            fields[y as usize * BOARD_WIDTH + x as usize] = field;
        }
        Board::from_fields(fields)
    }

    #[test]
    fn pieces_are_listed_row_major() {
        let board = board_with(&[
            (7, 2, Field::Red),
            (1, 0, Field::Red),
            (3, 2, Field::Red),
            (5, 5, Field::Blue),
        ]);

        let red: Vec<Coord> = board.pieces(Player::Red).to_vec();
        assert_eq!(red, vec![Coord::new(1, 0), Coord::new(3, 2), Coord::new(7, 2)]);
        assert_eq!(board.piece_count(Player::Blue), 1);
    }

    #[test]
    fn swarm_follows_diagonals() {
        let board = board_with(&[
            (0, 0, Field::Blue),
            (1, 1, Field::Blue),
            (2, 2, Field::Blue),
            (2, 3, Field::Blue),
            (9, 9, Field::Blue),
        ]);

        assert_eq!(board.swarm_size(Player::Blue), 4);
        assert!(board.in_swarm(Player::Blue, Coord::new(2, 3)));
        assert!(!board.in_swarm(Player::Blue, Coord::new(9, 9)));
    }

    #[test]
    fn swarm_tie_goes_to_first_group_in_scan_order() {
        let board = board_with(&[
            (8, 8, Field::Red),
            (9, 9, Field::Red),
            (0, 1, Field::Red),
            (1, 1, Field::Red),
        ]);

        let swarm: Vec<Coord> = board.swarm(Player::Red).to_vec();
        assert_eq!(swarm, vec![Coord::new(0, 1), Coord::new(1, 1)]);
    }

    #[test]
    fn swarm_ignores_opponent_and_obstructions() {
        let board = board_with(&[
            (4, 4, Field::Red),
            (5, 5, Field::Obstructed),
            (6, 6, Field::Red),
            (4, 5, Field::Blue),
        ]);

        assert_eq!(board.swarm_size(Player::Red), 1);
        assert_eq!(board.swarm_size(Player::Blue), 1);
    }

    #[test]
    fn swarm_on_board_edges_stays_in_bounds() {
        let board = board_with(&[
            (9, 0, Field::Blue),
            (9, 1, Field::Blue),
            (0, 9, Field::Blue),
            (0, 8, Field::Blue),
            (1, 9, Field::Blue),
        ]);

        assert_eq!(board.swarm_size(Player::Blue), 3);
    }

    #[test]
    fn empty_side_has_empty_swarm() {
        let board = Board::empty();
        assert!(board.pieces(Player::Red).is_empty());
        assert_eq!(board.swarm_size(Player::Red), 0);
    }

    #[test]
    fn with_field_leaves_original_and_its_caches_alone() {
        let board = board_with(&[(2, 2, Field::Red), (3, 3, Field::Red)]);
        assert_eq!(board.swarm_size(Player::Red), 2);

        let moved = board.with_fields([
            (Coord::new(3, 3), Field::Empty),
            (Coord::new(6, 6), Field::Red),
        ]);

        assert_eq!(board.swarm_size(Player::Red), 2);
        assert_eq!(board.field(Coord::new(3, 3)), Field::Red);
        assert_eq!(moved.swarm_size(Player::Red), 1);
        assert_eq!(moved.piece_count(Player::Red), 2);
    }

    #[test]
    fn try_field_rejects_out_of_bounds() {
        let board = Board::empty();
        assert_eq!(board.try_field(0, 0), Some(Field::Empty));
        assert_eq!(board.try_field(10, 0), None);
        assert_eq!(board.try_field(0, -1), None);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn field_panics_off_the_board() {
        let _ = Board::empty().field(Coord::new(10, 3));
    }

    #[test]
    fn step_respects_bounds() {
        let board = Board::empty();
        let from = Coord::new(8, 1);
        assert_eq!(board.step(from, Direction::Right, 1), Some(Coord::new(9, 1)));
        assert_eq!(board.step(from, Direction::Right, 2), None);
        assert_eq!(board.step(from, Direction::DownLeft, 1), Some(Coord::new(7, 0)));
        assert_eq!(board.step(from, Direction::Down, 2), None);
        assert_eq!(board.step(from, Direction::UpLeft, 3), Some(Coord::new(5, 4)));
    }
}
