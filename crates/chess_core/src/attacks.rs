//! Check detection.
//!
//! Attacks are derived from the opposing side's pseudo-legal moves, never
//! from filtered legal moves, since the legality filter itself calls into
//! here. Pawns attack along their capture diagonals only.

use crate::board::{Board, GameState, Registry};
use crate::movegen::{pawn_attacks, pseudo_legal_moves_into};
use crate::types::*;

/// Squares the piece standing on `from` attacks.
pub fn attacks_from(
    kind: PieceKind,
    color: Color,
    from: Square,
    board: &Board,
    registry: &Registry,
    out: &mut Vec<Square>,
) {
    match kind {
        PieceKind::Pawn => out.extend(pawn_attacks(color, from)),
        _ => pseudo_legal_moves_into(kind, color, from, board, registry, out),
    }
}

/// True if any live piece of `by` attacks `target`.
pub fn is_square_attacked(target: Square, by: Color, board: &Board, registry: &Registry) -> bool {
    let mut buf = Vec::with_capacity(28);
    registry.live(by).any(|(_, rec)| {
        buf.clear();
        attacks_from(rec.kind, rec.color, rec.square, board, registry, &mut buf);
        buf.contains(&target)
    })
}

/// True if `side`'s king stands on an attacked square. A side without a
/// king is never in check.
pub fn in_check(side: Color, board: &Board, registry: &Registry) -> bool {
    match registry.king(side) {
        Some((_, king)) => is_square_attacked(king.square, side.other(), board, registry),
        None => false,
    }
}

impl GameState {
    pub fn in_check(&self, side: Color) -> bool {
        in_check(side, self.board(), self.registry())
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
