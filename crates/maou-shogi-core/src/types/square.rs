//! 升（Square）と盤外の可能性がある座標（Coord）

use serde::{Deserialize, Serialize};

use super::Color;

/// 盤の一辺の長さ
pub const BOARD_SIZE: usize = 9;

/// 盤上の升（0-80）
///
/// - row 0 = 後手の最下段（一段目）、row 8 = 先手の最下段（九段目）
/// - col 0 = 盤の左端（9筋）、col 8 = 右端（1筋）
///
/// 生成は `Square::new` か `TryFrom<Coord>` 経由のみで、常に盤内を指す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Coord", try_from = "Coord")]
pub struct Square(u8);

impl Square {
    /// 升の数
    pub const NUM: usize = BOARD_SIZE * BOARD_SIZE;

    /// 行・列から升を作る（盤外なら None）
    #[inline]
    pub const fn new(row: usize, col: usize) -> Option<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square((row * BOARD_SIZE + col) as u8))
        } else {
            None
        }
    }

    /// 行（0-8）
    #[inline]
    pub const fn row(self) -> usize {
        self.0 as usize / BOARD_SIZE
    }

    /// 列（0-8）
    #[inline]
    pub const fn col(self) -> usize {
        self.0 as usize % BOARD_SIZE
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// (dr, dc) だけずらした升（盤外なら None）
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row() as i32 + dr as i32;
        let c = self.col() as i32 + dc as i32;
        if r < 0 || c < 0 {
            return None;
        }
        Square::new(r as usize, c as usize)
    }

    /// 全81升を行優先で列挙
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    /// 指定手番から見て敵陣（成れる3段）にあるか
    #[inline]
    pub const fn in_promotion_zone(self, color: Color) -> bool {
        match color {
            Color::Black => self.row() <= 2,
            Color::White => self.row() >= 6,
        }
    }

    /// 指定手番から見た相対段（0 = 相手側の最奥段）
    #[inline]
    pub const fn relative_row(self, color: Color) -> usize {
        match color {
            Color::Black => self.row(),
            Color::White => BOARD_SIZE - 1 - self.row(),
        }
    }
}

impl std::fmt::Display for Square {
    /// 将棋の表記（例: 5筋5段 → "5e"）
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = b'9' - self.col() as u8;
        let rank = b'a' + self.row() as u8;
        write!(f, "{}{}", file as char, rank as char)
    }
}

/// 外部から受け取る座標
///
/// 範囲外の値も表現でき、`Square` への変換で検証する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }
}

/// 盤外の座標
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("coordinate ({row}, {col}) is outside the board")]
pub struct OutOfBoard {
    pub row: i32,
    pub col: i32,
}

impl TryFrom<Coord> for Square {
    type Error = OutOfBoard;

    fn try_from(coord: Coord) -> Result<Self, Self::Error> {
        let out = OutOfBoard {
            row: coord.row,
            col: coord.col,
        };
        let row = usize::try_from(coord.row).map_err(|_| out)?;
        let col = usize::try_from(coord.col).map_err(|_| out)?;
        Square::new(row, col).ok_or(out)
    }
}

impl From<Square> for Coord {
    fn from(sq: Square) -> Coord {
        Coord {
            row: sq.row() as i32,
            col: sq.col() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_new() {
        let sq = Square::new(4, 4).unwrap();
        assert_eq!(sq.row(), 4);
        assert_eq!(sq.col(), 4);
        assert_eq!(sq.index(), 40);
        assert!(Square::new(9, 0).is_none());
        assert!(Square::new(0, 9).is_none());
    }

    #[test]
    fn test_square_offset() {
        let sq = Square::new(0, 0).unwrap();
        assert_eq!(sq.offset(1, 1), Square::new(1, 1));
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, -1), None);
        let corner = Square::new(8, 8).unwrap();
        assert_eq!(corner.offset(1, 0), None);
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "9a");
        assert_eq!(Square::new(8, 8).unwrap().to_string(), "1i");
        assert_eq!(Square::new(6, 2).unwrap().to_string(), "7g");
    }

    #[test]
    fn test_promotion_zone() {
        assert!(Square::new(2, 0).unwrap().in_promotion_zone(Color::Black));
        assert!(!Square::new(3, 0).unwrap().in_promotion_zone(Color::Black));
        assert!(Square::new(6, 0).unwrap().in_promotion_zone(Color::White));
        assert!(!Square::new(5, 0).unwrap().in_promotion_zone(Color::White));
    }

    #[test]
    fn test_coord_conversion() {
        assert_eq!(Square::try_from(Coord::new(6, 4)), Ok(Square::new(6, 4).unwrap()));
        assert!(Square::try_from(Coord::new(-1, 4)).is_err());
        assert!(Square::try_from(Coord::new(4, 9)).is_err());
        assert_eq!(Coord::from(Square::new(3, 7).unwrap()), Coord::new(3, 7));
    }

    #[test]
    fn test_square_json_is_row_col() {
        let sq = Square::new(2, 5).unwrap();
        assert_eq!(serde_json::to_string(&sq).unwrap(), r#"{"row":2,"col":5}"#);
        assert!(serde_json::from_str::<Square>(r#"{"row":9,"col":0}"#).is_err());
    }
}
