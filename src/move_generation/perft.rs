use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_apply::{apply_move_unchecked, undo_move};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerator,
};
use crate::moves::move_descriptions::Move;

/// Leaf statistics of a perft walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, annotations: &MoveAnnotations) {
        self.nodes += 1;
        self.captures += u64::from(annotations.is_capture);
        self.en_passant += u64::from(annotations.is_en_passant);
        self.castles += u64::from(annotations.is_castle);
        self.promotions += u64::from(annotations.is_promotion);
        self.checks += u64::from(annotations.gives_check);
        self.checkmates += u64::from(annotations.is_checkmate);
    }
}

/// Walk the legal-move tree and tally leaf annotations. Check and checkmate
/// columns stay zero unless `generator` fills them in.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    position: &mut Position,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }

    for mv in generator.generate_legal_moves(position)? {
        perft_recurse(generator, position, &mv, depth - 1, &mut total)?;
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    position: &mut Position,
    mv: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if remaining == 0 {
        counts.record_leaf(&mv.annotations);
        return Ok(());
    }

    apply_move_unchecked(position, mv.mv)?;
    let result = perft_children(generator, position, remaining - 1, counts);
    undo_move(position)?;
    result
}

fn perft_children<G: MoveGenerator>(
    generator: &G,
    position: &mut Position,
    remaining: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    for child in generator.generate_legal_moves(position)? {
        perft_recurse(generator, position, &child, remaining, counts)?;
    }
    Ok(())
}

/// Leaf count only; the last ply is counted without being applied.
pub fn perft_nodes(position: &mut Position, depth: u8) -> MoveGenResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = legal_moves(position)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        apply_move_unchecked(position, mv)?;
        let below = perft_nodes(position, depth - 1);
        undo_move(position)?;
        nodes += below?;
    }
    Ok(nodes)
}

/// Leaf count below each root move, in generation order.
pub fn perft_divide(position: &mut Position, depth: u8) -> MoveGenResult<Vec<(Move, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for mv in legal_moves(position)? {
        apply_move_unchecked(position, mv)?;
        let below = perft_nodes(position, depth - 1);
        undo_move(position)?;
        out.push((mv, below?));
    }
    Ok(out)
}
