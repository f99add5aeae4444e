//! One-ply evaluation of a single move.

use crate::board::{Board, Coord, Player};
use crate::moves::{distance_to_swarm, has_player_won, moves_to_swarm, Move};

/// Added when the move unites all of the mover's pieces.
pub const WIN_BONUS: f64 = 1_000_000.0;
/// Replaces the whole score when the move leaves the opponent united.
pub const LOSS_SCORE: f64 = -100_000.0;
/// Base of the capture bonus, reduced by how far from the centre the capture happens.
const CAPTURE_BASE: f64 = 5.0;
/// Weight of each opponent-disruption term.
const DISRUPTION_WEIGHT: f64 = 0.5;

/// Absolute distances of `at` from the board centre along each axis.
fn centre_offsets(board: &Board, at: Coord) -> (f64, f64) {
    let centre_x = (board.width() as f64 - 1.0) / 2.0;
    let centre_y = (board.height() as f64 - 1.0) / 2.0;
    (
        (f64::from(at.x) - centre_x).abs(),
        (f64::from(at.y) - centre_y).abs(),
    )
}

/// Chebyshev-style distance from the centre: the larger of the two axis offsets.
fn centre_distance(board: &Board, at: Coord) -> f64 {
    let (dx, dy) = centre_offsets(board, at);
    dx.max(dy)
}

/// Score of `mv` (landing on `target`) taking `old` to `new`, from `own`'s point of view.
///
/// Terms for the mover: tighter swarm, larger swarm, ending more central than it started and a
/// large bonus for winning outright. Captures earn a bonus that shrinks towards the edges. Each
/// opponent term is half-weighted: a smaller opponent swarm, a looser opponent and fewer opponent
/// moves heading for its swarm. If the opponent is united afterwards the score is
/// [`LOSS_SCORE`] regardless of everything else.
pub fn static_score(old: &Board, new: &Board, mv: &Move, target: Coord, own: Player) -> f64 {
    let opponent = own.opponent();
    let mut score = 0.0;

    score += distance_to_swarm(old, own) - distance_to_swarm(new, own);
    score += new.swarm_size(own) as f64 - old.swarm_size(own) as f64;

    let (origin_dx, origin_dy) = centre_offsets(old, mv.origin());
    score += origin_dx.min(origin_dy);
    score -= centre_distance(old, target);

    if has_player_won(new, own) {
        score += WIN_BONUS;
    }

    if old.field(target).is_piece_of(opponent) {
        score += CAPTURE_BASE - centre_distance(old, target);
    }

    score += DISRUPTION_WEIGHT * (old.swarm_size(opponent) as f64 - new.swarm_size(opponent) as f64);
    score += DISRUPTION_WEIGHT * (distance_to_swarm(new, opponent) - distance_to_swarm(old, opponent));
    score += DISRUPTION_WEIGHT
        * (moves_to_swarm(old, opponent).len() as f64 - moves_to_swarm(new, opponent).len() as f64);

    if has_player_won(new, opponent) {
        return LOSS_SCORE;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_with;
    use crate::board::Field;
    use crate::moves::{apply_move, resolve_target, successors, Direction};

    fn score_of(board: &Board, mv: Move, own: Player) -> f64 {
        let target = resolve_target(board, &mv).expect("move has a target");
        let next = apply_move(board, &mv).expect("move applies");
        static_score(board, &next, &mv, target, own)
    }

    #[test]
    fn keeping_the_swarm_united_earns_the_win_bonus() {
        let board = board_with(&[
            (4, 4, Field::Red),
            (5, 4, Field::Red),
            (4, 5, Field::Red),
            (0, 9, Field::Blue),
            (9, 0, Field::Blue),
        ]);
        assert!(has_player_won(&board, Player::Red));

        // Row 5 holds only (4,5): it slides to (5,5), still touching the others.
        let score = score_of(&board, Move::new(4, 5, Direction::Right), Player::Red);
        assert!(score > WIN_BONUS - 1_000.0, "score was {score}");
        assert!(score < WIN_BONUS + 1_000.0, "score was {score}");
    }

    #[test]
    fn capture_that_unites_the_opponent_scores_exactly_the_loss() {
        // Blue has a pair plus a straggler at (7,2); capturing the straggler unites blue.
        let board = board_with(&[
            (1, 1, Field::Blue),
            (2, 1, Field::Blue),
            (7, 2, Field::Blue),
            (7, 4, Field::Red),
            (0, 9, Field::Red),
        ]);
        assert!(!has_player_won(&board, Player::Blue));

        // Column 7 holds two pieces: red hops down two onto (7,2).
        let mv = Move::new(7, 4, Direction::Down);
        let target = resolve_target(&board, &mv).expect("capture has a target");
        assert_eq!(board.field(target), Field::Blue);

        assert_eq!(score_of(&board, mv, Player::Red), LOSS_SCORE);
    }

    #[test]
    fn diagonal_capture_scores_every_term() {
        // Blue: pair at the origin, stragglers at (4,4) and (9,9). Red captures (4,4) from (2,6).
        let board = board_with(&[
            (0, 0, Field::Blue),
            (1, 0, Field::Blue),
            (4, 4, Field::Blue),
            (9, 9, Field::Blue),
            (2, 6, Field::Red),
            (8, 2, Field::Red),
        ]);
        let mv = Move::new(2, 6, Direction::DownRight);
        let target = resolve_target(&board, &mv).expect("capture has a target");
        assert_eq!(target, Coord::new(4, 4));
        let next = apply_move(&board, &mv).expect("move applies");

        // (4,4) had three moves closing on the blue pair; (9,9) keeps its three.
        assert_eq!(moves_to_swarm(&board, Player::Blue).len(), 6);
        assert_eq!(moves_to_swarm(&next, Player::Blue).len(), 3);
        assert_eq!(distance_to_swarm(&board, Player::Blue), 5.0 + 145f64.sqrt());
        assert_eq!(distance_to_swarm(&next, Player::Blue), 145f64.sqrt());

        let own_tightening = 52f64.sqrt() - 20f64.sqrt();
        let centrality = 1.5 - 0.5;
        let capture = 5.0 - 0.5;
        let opponent_distance = 0.5 * -5.0;
        let opponent_moves = 0.5 * (6.0 - 3.0);
        let expected = own_tightening + centrality + capture + opponent_distance + opponent_moves;

        let score = static_score(&board, &next, &mv, target, Player::Red);
        assert!((score - expected).abs() < 1e-9, "score {score}, expected {expected}");
    }

    #[test]
    fn capture_bonus_prefers_the_centre() {
        let central = board_with(&[
            (4, 4, Field::Blue),
            (4, 6, Field::Red),
            (0, 0, Field::Blue),
            (9, 9, Field::Red),
            (9, 0, Field::Blue),
        ]);
        let edge = board_with(&[
            (9, 4, Field::Blue),
            (9, 6, Field::Red),
            (0, 0, Field::Blue),
            (0, 9, Field::Red),
            (4, 0, Field::Blue),
        ]);

        // Both captures hop two down their column onto a blue piece.
        let central_capture = Move::new(4, 6, Direction::Down);
        let edge_capture = Move::new(9, 6, Direction::Down);
        let central_target = resolve_target(&central, &central_capture).expect("target");
        let edge_target = resolve_target(&edge, &edge_capture).expect("target");
        assert_eq!(central.field(central_target), Field::Blue);
        assert_eq!(edge.field(edge_target), Field::Blue);

        assert!(score_of(&central, central_capture, Player::Red) > score_of(&edge, edge_capture, Player::Red));
    }

    #[test]
    fn moving_towards_the_centre_beats_moving_away() {
        let board = board_with(&[
            (2, 3, Field::Red),
            (8, 8, Field::Red),
            (0, 0, Field::Blue),
            (9, 0, Field::Blue),
        ]);
        // Both moves keep the red groups apart, only the centrality term differs.
        let inward = score_of(&board, Move::new(2, 3, Direction::Right), Player::Red);
        let outward = score_of(&board, Move::new(2, 3, Direction::Left), Player::Red);
        assert!(inward > outward, "inward {inward}, outward {outward}");
    }

    #[test]
    fn opponent_without_pieces_counts_as_united() {
        let board = board_with(&[(5, 5, Field::Red)]);
        for successor in successors(&board, Player::Red) {
            let score = static_score(&board, &successor.board, &successor.mv, successor.target, Player::Red);
            assert_eq!(score, LOSS_SCORE);
        }
    }
}
