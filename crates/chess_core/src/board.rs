use std::collections::HashSet;
use std::ops::Index;

use tracing::debug;

use crate::attacks::in_check;
use crate::error::{SetupError, StateError};
use crate::types::*;

/// 8x8 grid of occupant identifiers, indexed `[rank][file]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<PieceId>; 8]; 8],
}

impl Board {
    pub fn get(&self, sq: Square) -> Option<PieceId> {
        self.cells[sq.rank() as usize][sq.file() as usize]
    }
    fn set(&mut self, sq: Square, id: Option<PieceId>) {
        self.cells[sq.rank() as usize][sq.file() as usize] = id;
    }
}

/// Flat identifier -> record table. Records are never removed, captured
/// pieces are marked not-live instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    pieces: Vec<PieceRecord>,
}

impl Registry {
    fn insert(&mut self, record: PieceRecord) -> PieceId {
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(record);
        id
    }

    pub fn get(&self, id: PieceId) -> Option<&PieceRecord> {
        self.pieces.get(id.index())
    }

    fn get_mut(&mut self, id: PieceId) -> Result<&mut PieceRecord, StateError> {
        self.pieces
            .get_mut(id.index())
            .ok_or_else(|| StateError::InconsistentState(format!("no record for id {}", id.0)))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &PieceRecord)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, r)| (PieceId(i as u8), r))
    }

    /// Live pieces belonging to `color`.
    pub fn live(&self, color: Color) -> impl Iterator<Item = (PieceId, &PieceRecord)> {
        self.iter().filter(move |(_, r)| r.alive && r.color == color)
    }

    /// Locate a side's king by colour, never by a fixed label.
    pub fn king(&self, color: Color) -> Option<(PieceId, &PieceRecord)> {
        self.live(color).find(|(_, r)| r.kind == PieceKind::King)
    }

    /// Resolve a label such as `WP5` (case-insensitive), dead pieces included.
    pub fn find(&self, label: &str) -> Option<PieceId> {
        let label = label.trim();
        self.iter()
            .find(|(_, r)| r.label().eq_ignore_ascii_case(label))
            .map(|(id, _)| id)
    }

    pub fn label(&self, id: PieceId) -> String {
        self.get(id)
            .map(|r| r.label())
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}

impl Index<PieceId> for Registry {
    type Output = PieceRecord;

    fn index(&self, id: PieceId) -> &PieceRecord {
        &self.pieces[id.index()]
    }
}

/// Board, registry, move history and side to move. All mutation goes
/// through [`GameState::apply`] and [`GameState::undo`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    registry: Registry,
    history: Vec<MoveRecord>,
    side_to_move: Color,
}

impl GameState {
    pub fn startpos() -> Self {
        let mut pieces = Vec::with_capacity(32);

        // Pawns
        for f in 0..8 {
            pieces.push((Color::White, PieceKind::Pawn, Square::at(1, f)));
            pieces.push((Color::Black, PieceKind::Pawn, Square::at(6, f)));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            pieces.push((Color::White, kind, Square::at(0, f as u8)));
            pieces.push((Color::Black, kind, Square::at(7, f as u8)));
        }
        Self::assemble(Color::White, &pieces)
    }

    /// Build a position from piece placements, checking that no square is
    /// used twice, that each side has exactly one king, that the kings are
    /// apart and that the side not to move is not in check.
    pub fn from_pieces(
        side_to_move: Color,
        pieces: &[(Color, PieceKind, Square)],
    ) -> Result<Self, SetupError> {
        let mut seen = HashSet::new();
        for &(_, _, sq) in pieces {
            if !seen.insert(sq) {
                return Err(SetupError::DuplicateSquare(sq));
            }
        }
        for color in [Color::White, Color::Black] {
            let count = pieces
                .iter()
                .filter(|(c, k, _)| *c == color && *k == PieceKind::King)
                .count();
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        let state = Self::assemble(side_to_move, pieces);
        if let (Some((_, wk)), Some((_, bk))) =
            (state.registry.king(Color::White), state.registry.king(Color::Black))
            && wk.square.distance(bk.square) <= 1
        {
            return Err(SetupError::AdjacentKings(wk.square, bk.square));
        }
        let waiting = side_to_move.other();
        if in_check(waiting, &state.board, &state.registry) {
            return Err(SetupError::OpponentInCheck(waiting));
        }
        Ok(state)
    }

    /// Parse the placement and side-to-move fields of a FEN string. Castling,
    /// en-passant and clock fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(SetupError::InvalidFen(
                "expected placement and side to move".to_string(),
            ));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(SetupError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_letter(ch).ok_or_else(|| {
                        SetupError::InvalidFen(format!("invalid piece char: {ch}"))
                    })?;
                    let sq = Square::new(rank, file).ok_or_else(|| {
                        SetupError::InvalidFen(format!("too many files in rank {}", rank + 1))
                    })?;
                    pieces.push((color, kind, sq));
                    file += 1;
                }
                if file > 8 {
                    return Err(SetupError::InvalidFen(format!(
                        "too many files in rank {}",
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(SetupError::InvalidFen(format!(
                    "not enough files in rank {}",
                    rank + 1
                )));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(SetupError::InvalidFen(format!(
                    "invalid side to move: {other}"
                )));
            }
        };

        Self::from_pieces(side_to_move, &pieces)
    }

    /// Register pieces and label them. Ordinals follow file order, then rank;
    /// a lone queen or king carries none.
    fn assemble(side_to_move: Color, pieces: &[(Color, PieceKind, Square)]) -> Self {
        let mut sorted = pieces.to_vec();
        sorted.sort_by_key(|&(c, k, sq)| (c, k, sq.file(), sq.rank()));

        let mut state = GameState {
            board: Board::default(),
            registry: Registry::default(),
            history: Vec::new(),
            side_to_move,
        };

        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let group: Vec<Square> = sorted
                    .iter()
                    .filter(|(c, k, _)| *c == color && *k == kind)
                    .map(|&(_, _, sq)| sq)
                    .collect();
                let numbered =
                    !(matches!(kind, PieceKind::Queen | PieceKind::King) && group.len() == 1);
                for (n, sq) in group.into_iter().enumerate() {
                    let id = state.registry.insert(PieceRecord {
                        kind,
                        color,
                        square: sq,
                        alive: true,
                        ordinal: numbered.then_some(n as u8 + 1),
                    });
                    state.board.set(sq, Some(id));
                }
            }
        }
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_at(&self, sq: Square) -> Option<(PieceId, &PieceRecord)> {
        let id = self.board.get(sq)?;
        self.registry.get(id).map(|r| (id, r))
    }

    /// Move `piece` to `to`, capturing whatever stands there, and pass the
    /// turn. Movement rules are not checked here: `to` must come from the
    /// move generator or the legality filter. Play should go through
    /// [`Game`](crate::game::Game), which only applies legal moves.
    ///
    /// Kings are never captured; a move landing on one is refused.
    pub fn apply(&mut self, piece: PieceId, to: Square) -> Result<MoveRecord, StateError> {
        let record = *self.registry.get(piece).ok_or_else(|| {
            StateError::InconsistentState(format!("no record for id {}", piece.0))
        })?;
        if !record.alive {
            return Err(StateError::InconsistentState(format!(
                "{} is not live",
                record.label()
            )));
        }
        let from = record.square;
        if self.board.get(from) != Some(piece) {
            return Err(StateError::InconsistentState(format!(
                "{} is not on {from}",
                record.label()
            )));
        }

        let captured = match self.board.get(to) {
            Some(victim) => {
                let v = self.registry.get_mut(victim)?;
                if v.color == record.color {
                    return Err(StateError::InconsistentState(format!(
                        "{} would capture friendly {}",
                        record.label(),
                        v.label()
                    )));
                }
                if v.kind == PieceKind::King {
                    return Err(StateError::InconsistentState(format!(
                        "{} would capture {}",
                        record.label(),
                        v.label()
                    )));
                }
                let capture = Capture {
                    piece: victim,
                    square: v.square,
                    was_alive: v.alive,
                };
                v.alive = false;
                Some(capture)
            }
            None => None,
        };

        self.board.set(from, None);
        self.board.set(to, Some(piece));
        self.registry.get_mut(piece)?.square = to;
        self.side_to_move = self.side_to_move.other();

        let mv = MoveRecord {
            piece,
            from,
            to,
            captured,
        };
        self.history.push(mv);
        Ok(mv)
    }

    /// Take back the most recent [`apply`](Self::apply).
    pub fn undo(&mut self) -> Result<MoveRecord, StateError> {
        let mv = self.history.pop().ok_or(StateError::HistoryUnderflow)?;

        if self.board.get(mv.to) != Some(mv.piece) {
            return Err(StateError::InconsistentState(format!(
                "{} expected on {} during undo",
                self.registry.label(mv.piece),
                mv.to
            )));
        }

        self.board.set(mv.from, Some(mv.piece));
        self.registry.get_mut(mv.piece)?.square = mv.from;
        self.board.set(mv.to, None);

        if let Some(cap) = mv.captured {
            let v = self.registry.get_mut(cap.piece)?;
            v.alive = cap.was_alive;
            v.square = cap.square;
            self.board.set(cap.square, Some(cap.piece));
        }

        self.side_to_move = self.side_to_move.other();
        Ok(mv)
    }

    /// Verify board/registry agreement and the one-king-per-side rule.
    pub fn check_consistency(&self) -> Result<(), StateError> {
        for sq in Square::all() {
            let Some(id) = self.board.get(sq) else {
                continue;
            };
            let rec = self.registry.get(id).ok_or_else(|| {
                StateError::InconsistentState(format!("{sq} holds unknown id {}", id.0))
            })?;
            if !rec.alive {
                return Err(StateError::InconsistentState(format!(
                    "{sq} holds captured {}",
                    rec.label()
                )));
            }
            if rec.square != sq {
                return Err(StateError::InconsistentState(format!(
                    "{sq} holds {} which records {}",
                    rec.label(),
                    rec.square
                )));
            }
        }

        for (id, rec) in self.registry.iter().filter(|(_, r)| r.alive) {
            if self.board.get(rec.square) != Some(id) {
                return Err(StateError::InconsistentState(format!(
                    "{} missing from {}",
                    rec.label(),
                    rec.square
                )));
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = self
                .registry
                .live(color)
                .filter(|(_, r)| r.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(StateError::InconsistentState(format!(
                    "{color} has {kings} live kings"
                )));
            }
        }

        debug!(plies = self.history.len(), "consistency check passed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
