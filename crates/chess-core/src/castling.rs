//! Castling rights.

use crate::{Color, Square};
use serde::{Deserialize, Serialize};

/// The two wings a king can castle towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File the rook starts on.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Files strictly between the king's origin and this wing's rook.
    #[inline]
    pub const fn between_files(self) -> std::ops::RangeInclusive<u8> {
        match self {
            CastleSide::Kingside => 5..=6,
            CastleSide::Queenside => 1..=3,
        }
    }

    /// Square the king starts on for the given color.
    #[inline]
    pub const fn king_origin(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// Square the king lands on when castling towards this wing.
    #[inline]
    pub const fn king_target(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => Square::G1,
            (Color::White, CastleSide::Queenside) => Square::C1,
            (Color::Black, CastleSide::Kingside) => Square::G8,
            (Color::Black, CastleSide::Queenside) => Square::C8,
        }
    }

    /// Square the rook lands on, which is also the square the king passes over.
    #[inline]
    pub const fn rook_target(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => Square::F1,
            (Color::White, CastleSide::Queenside) => Square::D1,
            (Color::Black, CastleSide::Kingside) => Square::F8,
            (Color::Black, CastleSide::Queenside) => Square::D8,
        }
    }

    /// Original square of this wing's rook for the given color.
    #[inline]
    pub const fn rook_origin(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => Square::H1,
            (Color::White, CastleSide::Queenside) => Square::A1,
            (Color::Black, CastleSide::Kingside) => Square::H8,
            (Color::Black, CastleSide::Queenside) => Square::A8,
        }
    }

    /// Returns the wing whose rook starts on `sq`, if any, with that rook's color.
    pub fn from_rook_origin(sq: Square) -> Option<(Color, CastleSide)> {
        let color = Color::ALL.into_iter().find(|c| c.back_rank() == sq.rank())?;
        let side = CastleSide::ALL
            .into_iter()
            .find(|side| side.rook_file() == sq.file())?;
        Some((color, side))
    }
}

/// Castling rights flags.
///
/// Four independent permissions. They only ever go from true to false during
/// play; undo restores earlier values wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "CastlingFlags", into = "CastlingFlags")]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` may still castle towards `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Returns a copy with the given right granted.
    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> Self {
        CastlingRights(self.0 | Self::flag(color, side))
    }

    /// Removes one right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::Kingside);
        self.remove(color, CastleSide::Queenside);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Serialized shape of [`CastlingRights`]: four named booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct CastlingFlags {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl From<CastlingFlags> for CastlingRights {
    fn from(f: CastlingFlags) -> Self {
        let mut rights = CastlingRights::NONE;
        let pairs = [
            (f.white_kingside, Color::White, CastleSide::Kingside),
            (f.white_queenside, Color::White, CastleSide::Queenside),
            (f.black_kingside, Color::Black, CastleSide::Kingside),
            (f.black_queenside, Color::Black, CastleSide::Queenside),
        ];
        for (set, color, side) in pairs {
            if set {
                rights = rights.with(color, side);
            }
        }
        rights
    }
}

impl From<CastlingRights> for CastlingFlags {
    fn from(r: CastlingRights) -> Self {
        CastlingFlags {
            white_kingside: r.has(Color::White, CastleSide::Kingside),
            white_queenside: r.has(Color::White, CastleSide::Queenside),
            black_kingside: r.has(Color::Black, CastleSide::Kingside),
            black_queenside: r.has(Color::Black, CastleSide::Queenside),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::Black, CastleSide::Queenside));

        rights.remove(Color::White, CastleSide::Kingside);
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::White, CastleSide::Queenside));
    }

    #[test]
    fn castling_rights_remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(!rights.has(Color::White, CastleSide::Queenside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));
        assert!(rights.has(Color::Black, CastleSide::Queenside));
    }

    #[test]
    fn rook_origins() {
        for color in Color::ALL {
            for side in CastleSide::ALL {
                let origin = side.rook_origin(color);
                assert_eq!(CastleSide::from_rook_origin(origin), Some((color, side)));
                assert_eq!(origin.file(), side.rook_file());
                assert_eq!(origin.rank(), color.back_rank());
                assert_eq!(side.king_target(color).rank(), color.back_rank());
                assert_eq!(side.rook_target(color).rank(), color.back_rank());
                assert!(side.between_files().contains(&side.rook_target(color).file()));
            }
        }
        assert_eq!(CastleSide::from_rook_origin(Square::E1), None);
        for name in ["a4", "h2", "a7", "h5"] {
            let sq = Square::from_algebraic(name).unwrap();
            assert_eq!(CastleSide::from_rook_origin(sq), None, "{name}");
        }
    }

    #[test]
    fn serializes_as_four_booleans() {
        let rights = CastlingRights::NONE
            .with(Color::White, CastleSide::Kingside)
            .with(Color::Black, CastleSide::Queenside);
        let json = serde_json::to_string(&rights).unwrap();
        assert_eq!(
            json,
            r#"{"white_kingside":true,"white_queenside":false,"black_kingside":false,"black_queenside":true}"#
        );
        let back: CastlingRights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rights);
    }
}
