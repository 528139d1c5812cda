//! Move encoding shared by generation, application and search.
//!
//! A move is `(origin, destination_code)`:
//! - `0..=63`: plain target square (captures and en passant included);
//! - `64` / `65`: castle short / castle long;
//! - `band + target` with band `100/200/300/400`: promote to
//!   knight/bishop/rook/queen on `target`.
//!
//! The moving piece's code on the origin square resolves everything else.

use std::fmt;

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::{CastleSide, Color, PieceCode, Square};
use crate::utils::algebraic::square_to_algebraic;

pub const CASTLE_SHORT_CODE: u16 = 64;
pub const CASTLE_LONG_CODE: u16 = 65;
pub const PROMOTION_BAND_STEP: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    Knight,
    Bishop,
    Rook,
    Queen,
}

pub const PROMOTION_KINDS: [PromotionKind; 4] = [
    PromotionKind::Knight,
    PromotionKind::Bishop,
    PromotionKind::Rook,
    PromotionKind::Queen,
];

impl PromotionKind {
    #[inline]
    pub const fn band(self) -> u16 {
        match self {
            PromotionKind::Knight => PROMOTION_BAND_STEP,
            PromotionKind::Bishop => 2 * PROMOTION_BAND_STEP,
            PromotionKind::Rook => 3 * PROMOTION_BAND_STEP,
            PromotionKind::Queen => 4 * PROMOTION_BAND_STEP,
        }
    }

    /// Code the promoted piece is stored under.
    #[inline]
    pub const fn piece_code(self) -> PieceCode {
        match self {
            PromotionKind::Knight => PieceCode::Knight,
            PromotionKind::Bishop => PieceCode::Bishop,
            PromotionKind::Rook => PieceCode::Rook,
            PromotionKind::Queen => PieceCode::Queen,
        }
    }

    const fn from_band(band: u16) -> Option<Self> {
        match band / PROMOTION_BAND_STEP {
            1 => Some(PromotionKind::Knight),
            2 => Some(PromotionKind::Bishop),
            3 => Some(PromotionKind::Rook),
            4 => Some(PromotionKind::Queen),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            PromotionKind::Knight => 'n',
            PromotionKind::Bishop => 'b',
            PromotionKind::Rook => 'r',
            PromotionKind::Queen => 'q',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'n' => Some(PromotionKind::Knight),
            'b' => Some(PromotionKind::Bishop),
            'r' => Some(PromotionKind::Rook),
            'q' => Some(PromotionKind::Queen),
            _ => None,
        }
    }
}

/// Decoded form of a destination code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Square(Square),
    Castle(CastleSide),
    Promotion { target: Square, kind: PromotionKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub destination: u16,
}

impl Move {
    #[inline]
    pub const fn to_square(origin: Square, target: Square) -> Self {
        Self {
            origin,
            destination: target as u16,
        }
    }

    #[inline]
    pub const fn castle(origin: Square, side: CastleSide) -> Self {
        Self {
            origin,
            destination: match side {
                CastleSide::Short => CASTLE_SHORT_CODE,
                CastleSide::Long => CASTLE_LONG_CODE,
            },
        }
    }

    #[inline]
    pub const fn promotion(origin: Square, target: Square, kind: PromotionKind) -> Self {
        Self {
            origin,
            destination: kind.band() + target as u16,
        }
    }

    /// Decode the destination; `None` for codes outside the encoding.
    pub const fn decode(self) -> Option<Destination> {
        match self.destination {
            0..=63 => Some(Destination::Square(self.destination as Square)),
            CASTLE_SHORT_CODE => Some(Destination::Castle(CastleSide::Short)),
            CASTLE_LONG_CODE => Some(Destination::Castle(CastleSide::Long)),
            code => {
                let target = code % PROMOTION_BAND_STEP;
                if target > 63 {
                    return None;
                }
                match PromotionKind::from_band(code) {
                    Some(kind) => Some(Destination::Promotion {
                        target: target as Square,
                        kind,
                    }),
                    None => None,
                }
            }
        }
    }

    /// Square the moving piece lands on; castling resolves to the king's
    /// landing square for `mover`.
    pub fn landing_square(self, mover: Color) -> Option<Square> {
        match self.decode()? {
            Destination::Square(target) | Destination::Promotion { target, .. } => Some(target),
            Destination::Castle(side) => Some(castling_geometry(mover, side).king_to),
        }
    }

    #[inline]
    pub fn is_castle(self) -> bool {
        matches!(self.decode(), Some(Destination::Castle(_)))
    }

    #[inline]
    pub fn promotion_kind(self) -> Option<PromotionKind> {
        match self.decode() {
            Some(Destination::Promotion { kind, .. }) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    /// Raw encoding, e.g. `e1->64` or `a7->408`. Use `long_algebraic` for UCI text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match square_to_algebraic(self.origin) {
            Ok(origin) => write!(f, "{origin}->{}", self.destination),
            Err(_) => write!(f, "{}->{}", self.origin, self.destination),
        }
    }
}
