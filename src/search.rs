use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, Player};
use crate::heuristic::static_score;
use crate::moves::{successors, Move};

/// Score a candidate must beat to become the first best move.
const ROOT_SENTINEL: f64 = -1_000_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Lookahead depth below each root candidate.
    #[serde(default = "default_depth")]
    pub depth: u8,
    /// Maximum number of candidates expanded per lookahead node, best static score first.
    #[serde(default = "default_breadth")]
    pub breadth: usize,
    /// Static evaluations allowed per decision before the lookahead stops expanding.
    #[serde(default = "default_evaluation_budget")]
    pub evaluation_budget: u32,
    /// Lookahead values are divided by this before being added to a static score.
    #[serde(default = "default_lookahead_divisor")]
    pub lookahead_divisor: f64,
}

fn default_depth() -> u8 {
    1
}
fn default_breadth() -> usize {
    60
}
fn default_evaluation_budget() -> u32 {
    50_000
}
fn default_lookahead_divisor() -> f64 {
    4.0
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            breadth: default_breadth(),
            evaluation_budget: default_evaluation_budget(),
            lookahead_divisor: default_lookahead_divisor(),
        }
    }
}

/// Outcome of one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub best_move: Move,
    pub score: f64,
    pub evaluations: u32,
}

struct RatedSuccessor {
    score: f64,
    board: Board,
}

/// A single decision's worth of search state.
///
/// The lookahead only ever expands `own`'s follow-up moves; the opponent appears solely through
/// the static score of each transition.
pub struct Searcher<'a> {
    config: &'a SearchConfig,
    own: Player,
    evaluations: u32,
}

impl<'a> Searcher<'a> {
    pub fn new(config: &'a SearchConfig, own: Player) -> Self {
        Self {
            config,
            own,
            evaluations: 0,
        }
    }

    /// Static evaluations performed so far.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    /// Pick the best move for `own` on `board`, or `None` when it has no legal move.
    ///
    /// Every root candidate is scored statically plus its lookahead value divided by
    /// `lookahead_divisor`; the first strictly greatest total wins. All root candidates are scored
    /// before any lookahead runs, so an exhausted budget never leaves a candidate unscored.
    pub fn search(&mut self, board: &Board) -> Option<Decision> {
        self.evaluations = 0;
        let candidates = successors(board, self.own);
        let first = candidates.first()?.mv;

        let statics: Vec<f64> = candidates
            .iter()
            .map(|candidate| self.score(board, &candidate.board, &candidate.mv, candidate.target))
            .collect();

        let mut best_move = first;
        let mut best_score = ROOT_SENTINEL;
        for (candidate, static_value) in candidates.iter().zip(statics) {
            let score =
                static_value + self.lookahead(&candidate.board, self.config.depth) / self.config.lookahead_divisor;

            if score > best_score {
                best_score = score;
                best_move = candidate.mv;
            }
        }

        Some(Decision {
            best_move,
            score: best_score,
            evaluations: self.evaluations,
        })
    }

    /// Bounded best-first lookahead over `own`'s follow-up moves from `board`.
    ///
    /// Returns zero at depth zero or when the remaining evaluation budget cannot cover every
    /// candidate of this node. Otherwise the value is the best of
    /// `static + lookahead(depth - 1) / divisor` over the `breadth` statically best candidates,
    /// floored at zero.
    pub fn lookahead(&mut self, board: &Board, depth: u8) -> f64 {
        if depth == 0 || self.budget_spent() {
            return 0.0;
        }

        let candidates = successors(board, self.own);
        // A node is scored in full or not at all, which keeps the counter within the budget.
        if !self.budget_covers(candidates.len()) {
            return 0.0;
        }

        let mut rated: Vec<RatedSuccessor> = candidates
            .into_iter()
            .map(|candidate| RatedSuccessor {
                score: self.score(board, &candidate.board, &candidate.mv, candidate.target),
                board: candidate.board,
            })
            .collect();

        rated.sort_by(|left, right| right.score.total_cmp(&left.score));
        rated.truncate(self.config.breadth);

        let mut best = 0.0;
        for candidate in &rated {
            let value =
                candidate.score + self.lookahead(&candidate.board, depth - 1) / self.config.lookahead_divisor;
            if value > best {
                best = value;
            }
        }
        best
    }

    fn score(&mut self, old: &Board, new: &Board, mv: &Move, target: Coord) -> f64 {
        self.evaluations += 1;
        static_score(old, new, mv, target, self.own)
    }

    fn budget_spent(&self) -> bool {
        self.evaluations >= self.config.evaluation_budget
    }

    fn budget_covers(&self, evaluations: usize) -> bool {
        u32::try_from(evaluations)
            .ok()
            .and_then(|needed| self.evaluations.checked_add(needed))
            .is_some_and(|total| total <= self.config.evaluation_budget)
    }
}
