//! 盤面（Board）
//!
//! 9x9 の升ごとに `Option<Piece>` を持つだけの素朴な表現。`Copy` なので、
//! 局面の構造的コピーは 81 升分のコピー1回で済む。

use crate::types::{BOARD_SIZE, Color, Piece, PieceForm, PieceType, Square};

/// 盤面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::NUM],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

/// 平手の最下段の並び（左から香桂銀金玉金銀桂香）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::King,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
];

impl Board {
    /// 空の盤面
    pub const fn empty() -> Board {
        Board {
            squares: [None; Square::NUM],
        }
    }

    /// 平手の初期配置
    pub fn hirate() -> Board {
        let mut board = Board::empty();
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            board.set(sq(0, col), Some(Piece::make(Color::White, pt)));
            board.set(sq(8, col), Some(Piece::make(Color::Black, pt)));
            board.set(sq(2, col), Some(Piece::make(Color::White, PieceType::Pawn)));
            board.set(sq(6, col), Some(Piece::make(Color::Black, PieceType::Pawn)));
        }
        board.set(sq(1, 1), Some(Piece::make(Color::White, PieceType::Rook)));
        board.set(sq(1, 7), Some(Piece::make(Color::White, PieceType::Bishop)));
        board.set(sq(7, 1), Some(Piece::make(Color::Black, PieceType::Bishop)));
        board.set(sq(7, 7), Some(Piece::make(Color::Black, PieceType::Rook)));
        board
    }

    /// 升の駒
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// 升が空か
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// 升に駒を置く（`None` で取り除く）
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// 升の駒を取り除いて返す
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// 駒のある升を列挙
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|pc| (sq, pc)))
    }

    /// 指定手番の駒のある升を列挙
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color == color)
    }

    /// 指定手番の王将（玉または魔王）の升
    pub fn royal_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color).find(|(_, pc)| pc.is_royal()).map(|(sq, _)| sq)
    }

    /// 指定の列に指定手番の生の歩があるか（二歩判定）
    pub fn has_unpromoted_pawn_in_col(&self, color: Color, col: usize) -> bool {
        (0..BOARD_SIZE).filter_map(|row| Square::new(row, col)).any(|s| {
            self.piece_on(s)
                .is_some_and(|pc| pc.color == color && pc.form == PieceForm::Pawn)
        })
    }

    /// 行ごとの2次元配列に変換（スナップショット用）
    pub fn rows(&self) -> Vec<Vec<Option<Piece>>> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| Square::new(row, col).and_then(|s| self.piece_on(s)))
                    .collect()
            })
            .collect()
    }
}

/// 盤内が保証された定数座標用
#[inline]
fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap_or_else(|| unreachable!("({row}, {col}) is on the board"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hirate_layout() {
        let board = Board::hirate();
        assert_eq!(board.pieces().count(), 40);
        assert_eq!(board.pieces_of(Color::Black).count(), 20);
        assert_eq!(board.pieces_of(Color::White).count(), 20);
        assert_eq!(board.royal_square(Color::Black), Square::new(8, 4));
        assert_eq!(board.royal_square(Color::White), Square::new(0, 4));
        assert_eq!(
            board.piece_on(sq(7, 7)),
            Some(Piece::make(Color::Black, PieceType::Rook))
        );
        assert_eq!(
            board.piece_on(sq(1, 7)),
            Some(Piece::make(Color::White, PieceType::Bishop))
        );
    }

    #[test]
    fn test_unpromoted_pawn_in_col() {
        let mut board = Board::empty();
        board.set(sq(4, 3), Some(Piece::new(PieceForm::ProPawn, Color::Black)));
        assert!(!board.has_unpromoted_pawn_in_col(Color::Black, 3));
        board.set(sq(5, 3), Some(Piece::make(Color::Black, PieceType::Pawn)));
        assert!(board.has_unpromoted_pawn_in_col(Color::Black, 3));
        assert!(!board.has_unpromoted_pawn_in_col(Color::White, 3));
    }

    #[test]
    fn test_royal_square_finds_maou() {
        let mut board = Board::empty();
        board.set(sq(3, 3), Some(Piece::new(PieceForm::Maou, Color::White)));
        assert_eq!(board.royal_square(Color::White), Some(sq(3, 3)));
        assert_eq!(board.royal_square(Color::Black), None);
    }
}
