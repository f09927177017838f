use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Rank direction a pawn of this colour advances in.
    pub fn pawn_dir(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A board coordinate. Rank 0 is White's back rank, file 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(rank: u8, file: u8) -> Option<Square> {
        if rank < 8 && file < 8 {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Caller guarantees both coordinates are below 8.
    pub(crate) const fn at(rank: u8, file: u8) -> Square {
        debug_assert!(rank < 8 && file < 8);
        Square { rank, file }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }
    pub fn file(self) -> u8 {
        self.file
    }

    /// Step by a signed delta, returning `None` when the result leaves the board.
    pub fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let r = self.rank as i8 + dr;
        let f = self.file as i8 + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            Some(Square {
                rank: r as u8,
                file: f as u8,
            })
        } else {
            None
        }
    }

    /// King-move distance between two squares.
    pub fn distance(self, other: Square) -> u8 {
        self.rank
            .abs_diff(other.rank)
            .max(self.file.abs_diff(other.file))
    }

    /// The same square seen from the other side of the board.
    pub fn flip(self) -> Square {
        Square {
            rank: 7 - self.rank,
            file: self.file,
        }
    }

    /// Parse `a1`..`h8`.
    pub fn from_coord(c: &str) -> Option<Square> {
        let b = c.as_bytes();
        if b.len() != 2 {
            return None;
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return None;
        }
        Square::new(r - b'1', f - b'a')
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square::at(rank, file)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

/// Handle into a [`Registry`](crate::board::Registry). Only the registry mints these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceRecord {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub alive: bool,
    /// Disambiguates pieces of the same kind, e.g. the `3` in `WP3`.
    pub ordinal: Option<u8>,
}

impl PieceRecord {
    pub fn label(&self) -> String {
        let mut s = String::with_capacity(4);
        s.push(self.color.letter());
        s.push(self.kind.letter());
        if let Some(n) = self.ordinal {
            s.push_str(&n.to_string());
        }
        s
    }
}

/// Everything needed to take back one applied move exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Capture>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    pub piece: PieceId,
    pub square: Square,
    pub was_alive: bool,
}

/// A move as named by a move source: a piece label and a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub piece: String,
    pub to: Square,
}

impl MoveRequest {
    pub fn new(piece: impl Into<String>, to: Square) -> Self {
        Self {
            piece: piece.into(),
            to,
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece, self.to)
    }
}
