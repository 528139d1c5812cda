//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores are from Light's perspective: Light maximizes, Dark minimizes.
//! The root is searched once at `max_depth` and reported in one info line.

use chrono::Utc;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move_unchecked, undo_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::game_status::{GameStatus, GameStatusOracle};
use crate::utils::long_algebraic::move_to_long_algebraic;

const INFINITY: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 4 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub info_lines: Vec<String>,
}

/// Search `position` for the side to move. The position is returned to its
/// original state, history included.
pub fn search_best_move<S: BoardScorer, O: GameStatusOracle>(
    position: &mut Position,
    config: SearchConfig,
    scorer: &S,
    oracle: &O,
) -> MoveGenResult<SearchResult> {
    let started = Utc::now();
    let mut searcher = Searcher {
        scorer,
        oracle,
        nodes: 0,
    };
    let mut result = SearchResult::default();

    let in_check = is_in_check(position, position.side_to_move());
    let status = oracle.status(position, in_check)?;
    if config.max_depth == 0 || status != GameStatus::Normal {
        let maximizing = position.side_to_move() == Color::Light;
        result.best_score = match status {
            GameStatus::Mate => mated_score(maximizing, 0),
            GameStatus::Draw(_) => 0,
            GameStatus::Normal => scorer.score(position),
        };
        result.nodes = 1;
        if status != GameStatus::Normal {
            result.info_lines.push(format!("info string terminal {status:?}"));
        }
        result.elapsed_ms = elapsed_ms_since(started);
        return Ok(result);
    }

    let (best_move, best_score) = searcher.root(position, config.max_depth)?;
    result.best_move = best_move;
    result.best_score = best_score;
    result.reached_depth = config.max_depth;

    let pv = match best_move {
        Some(mv) => {
            move_to_long_algebraic(position, mv).map_err(MoveGenerationError::InvalidState)?
        }
        None => "none".to_owned(),
    };
    result.info_lines.push(format!(
        "info depth {} score {} nodes {} time {} pv {}",
        config.max_depth,
        format_score(best_score),
        searcher.nodes,
        elapsed_ms_since(started),
        pv
    ));

    result.nodes = searcher.nodes;
    result.elapsed_ms = elapsed_ms_since(started);
    Ok(result)
}

struct Searcher<'a, S, O> {
    scorer: &'a S,
    oracle: &'a O,
    nodes: u64,
}

impl<S: BoardScorer, O: GameStatusOracle> Searcher<'_, S, O> {
    fn root(&mut self, position: &mut Position, depth: u8) -> MoveGenResult<(Option<Move>, i32)> {
        self.nodes += 1;
        let maximizing = position.side_to_move() == Color::Light;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in legal_moves(position)? {
            let score = self.child(position, mv, depth - 1, alpha, beta, !maximizing, 1)?;
            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }
            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
        }

        Ok((best_move, best_score))
    }

    #[allow(clippy::too_many_arguments)]
    fn child(
        &mut self,
        position: &mut Position,
        mv: Move,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        ply: i32,
    ) -> MoveGenResult<i32> {
        apply_move_unchecked(position, mv)?;
        let gives_check = is_in_check(position, position.side_to_move());
        let score = self.alpha_beta(position, depth, alpha, beta, maximizing, ply, gives_check);
        undo_move(position)?;
        score
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        position: &mut Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: i32,
        last_move_was_check: bool,
    ) -> MoveGenResult<i32> {
        self.nodes += 1;

        match self.oracle.status(position, last_move_was_check)? {
            GameStatus::Mate => return Ok(mated_score(maximizing, ply)),
            GameStatus::Draw(_) => return Ok(0),
            GameStatus::Normal => {}
        }
        if depth == 0 {
            return Ok(self.scorer.score(position));
        }

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in legal_moves(position)? {
            let score = self.child(position, mv, depth - 1, alpha, beta, !maximizing, ply + 1)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }

        Ok(best)
    }
}

/// Score of a node whose side to move is mated `ply` plies from the root.
#[inline]
fn mated_score(maximizing: bool, ply: i32) -> i32 {
    if maximizing {
        -MATE_SCORE + ply
    } else {
        MATE_SCORE - ply
    }
}

fn format_score(score: i32) -> String {
    let distance = MATE_SCORE - score.abs();
    if distance <= i32::from(u8::MAX) {
        let moves = (distance + 1) / 2;
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

fn elapsed_ms_since(started: chrono::DateTime<Utc>) -> u64 {
    (Utc::now() - started).num_milliseconds().max(0) as u64
}
