//! 手番（Color）

use serde::{Deserialize, Serialize};

/// 手番（先手/後手）
///
/// JSON 上は元の対局サーバーと同じく `"sente"` / `"gote"` で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    /// 先手（最初に指す側、盤の下側）
    #[serde(rename = "sente")]
    Black = 0,
    /// 後手（盤の上側）
    #[serde(rename = "gote")]
    White = 1,
}

impl Color {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 両手番
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 前進方向の行差分（先手は上 = 行番号が減る方向）
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => f.write_str("sente"),
            Color::White => f.write_str("gote"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }

    #[test]
    fn test_color_not() {
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn test_color_index() {
        assert_eq!(Color::Black.index(), 0);
        assert_eq!(Color::White.index(), 1);
    }

    #[test]
    fn test_color_json() {
        assert_eq!(serde_json::to_string(&Color::Black).unwrap(), "\"sente\"");
        let c: Color = serde_json::from_str("\"gote\"").unwrap();
        assert_eq!(c, Color::White);
    }
}
