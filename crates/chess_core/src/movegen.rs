//! Per-piece movement rules.
//!
//! Everything here is pseudo-legal: geometry, blocking and capture rules,
//! but no check on whether the mover's own king ends up attacked. That is
//! the job of [`crate::legal`]. Nothing in this module mutates the board.

use crate::board::{Board, Registry};
use crate::types::*;

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Destinations a piece of `kind`/`color` standing on `from` may reach.
pub fn pseudo_legal_moves(
    kind: PieceKind,
    color: Color,
    from: Square,
    board: &Board,
    registry: &Registry,
) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    pseudo_legal_moves_into(kind, color, from, board, registry, &mut out);
    out
}

/// Same as [`pseudo_legal_moves`] but appends to a caller-owned buffer.
pub fn pseudo_legal_moves_into(
    kind: PieceKind,
    color: Color,
    from: Square,
    board: &Board,
    registry: &Registry,
    out: &mut Vec<Square>,
) {
    let occ = Occupancy { board, registry };
    match kind {
        PieceKind::Pawn => gen_pawn(&occ, from, color, out),
        PieceKind::Knight => gen_knight(&occ, from, color, out),
        PieceKind::Bishop => gen_slider(&occ, from, color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(&occ, from, color, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(&occ, from, color, out, &DIAGONALS);
            gen_slider(&occ, from, color, out, &ORTHOGONALS);
        }
        PieceKind::King => gen_king(&occ, from, color, out),
    }
}

/// Squares a pawn threatens, occupied or not.
pub fn pawn_attacks(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let dir = color.pawn_dir();
    [-1, 1]
        .into_iter()
        .filter_map(move |df| from.offset(dir, df))
}

struct Occupancy<'a> {
    board: &'a Board,
    registry: &'a Registry,
}

impl Occupancy<'_> {
    fn color_at(&self, sq: Square) -> Option<Color> {
        self.board.get(sq).map(|id| self.registry[id].color)
    }
}

fn gen_pawn(occ: &Occupancy, from: Square, c: Color, out: &mut Vec<Square>) {
    let dir = c.pawn_dir();

    // forward 1
    if let Some(to) = from.offset(dir, 0)
        && occ.color_at(to).is_none()
    {
        out.push(to);

        // forward 2 from start
        if from.rank() == c.pawn_start_rank()
            && let Some(to2) = from.offset(2 * dir, 0)
            && occ.color_at(to2).is_none()
        {
            out.push(to2);
        }
    }

    // captures
    for to in pawn_attacks(c, from) {
        if let Some(other) = occ.color_at(to)
            && other != c
        {
            out.push(to);
        }
    }
}

fn gen_knight(occ: &Occupancy, from: Square, c: Color, out: &mut Vec<Square>) {
    for (dr, df) in KNIGHT_DELTAS {
        if let Some(to) = from.offset(dr, df) {
            match occ.color_at(to) {
                None => out.push(to),
                Some(other) if other != c => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(occ: &Occupancy, from: Square, c: Color, out: &mut Vec<Square>, dirs: &[(i8, i8)]) {
    for &(dr, df) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, df) {
            match occ.color_at(to) {
                None => out.push(to),
                Some(other) if other != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

fn gen_king(occ: &Occupancy, from: Square, c: Color, out: &mut Vec<Square>) {
    // Kings may never stand next to each other.
    let enemy_king = occ.registry.king(c.other()).map(|(_, r)| r.square);

    for (dr, df) in KING_DELTAS {
        let Some(to) = from.offset(dr, df) else {
            continue;
        };
        if enemy_king.is_some_and(|k| k.distance(to) <= 1) {
            continue;
        }
        match occ.color_at(to) {
            None => out.push(to),
            Some(other) if other != c => out.push(to),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
