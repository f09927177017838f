//! Legal move filtering.
//!
//! Every pseudo-legal candidate is played on the state, the mover's king is
//! tested for check, and the move is taken back before the next candidate.
//! The state is returned exactly as it was passed in.

use std::collections::BTreeMap;

use tracing::trace;

use crate::attacks::in_check;
use crate::board::GameState;
use crate::error::StateError;
use crate::movegen::pseudo_legal_moves_into;
use crate::types::*;

/// Legal destinations keyed by piece. Pieces with no legal move are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    by_piece: BTreeMap<PieceId, Vec<Square>>,
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool {
        self.by_piece.is_empty()
    }

    /// Total number of (piece, destination) pairs.
    pub fn len(&self) -> usize {
        self.by_piece.values().map(Vec::len).sum()
    }

    pub fn get(&self, piece: PieceId) -> Option<&[Square]> {
        self.by_piece.get(&piece).map(Vec::as_slice)
    }

    pub fn contains(&self, piece: PieceId, to: Square) -> bool {
        self.get(piece).is_some_and(|d| d.contains(&to))
    }

    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.by_piece.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &[Square])> {
        self.by_piece.iter().map(|(&id, d)| (id, d.as_slice()))
    }

    /// Flattened (piece, destination) pairs in piece order.
    pub fn moves(&self) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        self.by_piece
            .iter()
            .flat_map(|(&id, d)| d.iter().map(move |&to| (id, to)))
    }
}

/// Legal moves for `side`, computed on a private copy of `state`.
pub fn legal_moves(side: Color, state: &GameState) -> Result<LegalMoves, StateError> {
    let mut tmp = state.clone();
    legal_moves_in_place(side, &mut tmp)
}

/// Legal moves for `side`, using `state` itself for the speculative moves.
pub fn legal_moves_in_place(side: Color, state: &mut GameState) -> Result<LegalMoves, StateError> {
    let movers: Vec<(PieceId, PieceRecord)> = state
        .registry()
        .live(side)
        .map(|(id, rec)| (id, *rec))
        .collect();

    let mut legal = LegalMoves::default();
    let mut candidates = Vec::with_capacity(28);
    for (id, rec) in movers {
        candidates.clear();
        pseudo_legal_moves_into(
            rec.kind,
            rec.color,
            rec.square,
            state.board(),
            state.registry(),
            &mut candidates,
        );

        let mut keep = Vec::new();
        for &to in &candidates {
            state.apply(id, to)?;
            let exposed = in_check(side, state.board(), state.registry());
            state.undo()?;
            if exposed {
                trace!(piece = %rec.label(), %to, "leaves king in check");
            } else {
                keep.push(to);
            }
        }
        if !keep.is_empty() {
            legal.by_piece.insert(id, keep);
        }
    }
    Ok(legal)
}

impl GameState {
    pub fn legal_moves(&self, side: Color) -> Result<LegalMoves, StateError> {
        legal_moves(side, self)
    }
}

#[cfg(test)]
#[path = "legal_tests.rs"]
mod legal_tests;
