//! 指し手候補の表現

use smallvec::SmallVec;

use crate::types::{Color, PieceType, Square};

/// 盤上の手に付く成りの指定
///
/// 成りと魔王化は同時に指定できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Promotion {
    /// 不成（またはもともと成れない駒）
    #[default]
    None,
    /// 成る
    Promote,
    /// 玉が魔王になる
    Maou,
}

impl Promotion {
    /// 外部から受け取る `(promote, maou)` の組から変換（両方 true は該当なし）
    pub const fn from_flags(promote: bool, maou: bool) -> Option<Promotion> {
        match (promote, maou) {
            (false, false) => Some(Promotion::None),
            (true, false) => Some(Promotion::Promote),
            (false, true) => Some(Promotion::Maou),
            (true, true) => None,
        }
    }

    #[inline]
    pub const fn is_promote(self) -> bool {
        matches!(self, Promotion::Promote)
    }

    #[inline]
    pub const fn is_maou(self) -> bool {
        matches!(self, Promotion::Maou)
    }
}

/// 取る駒の升の並び
///
/// 通常は0〜1升。魔王の走りは相手の駒を複数まとめて取ることがある。
pub type CaptureList = SmallVec<[Square; 2]>;

/// 盤上の駒を動かす手
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardMove {
    pub from: Square,
    pub to: Square,
    pub captured: CaptureList,
    pub promotion: Promotion,
}

impl BoardMove {
    pub fn new(from: Square, to: Square, captured: CaptureList, promotion: Promotion) -> BoardMove {
        BoardMove {
            from,
            to,
            captured,
            promotion,
        }
    }

    /// 同じ移動で成りの指定だけを変えた手
    pub fn with_promotion(&self, promotion: Promotion) -> BoardMove {
        BoardMove {
            promotion,
            ..self.clone()
        }
    }

    /// 要求 `(to, promote, maou)` と一致するか
    pub fn matches(&self, to: Square, promote: bool, maou: bool) -> bool {
        self.to == to && Promotion::from_flags(promote, maou) == Some(self.promotion)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// 持ち駒を打つ手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropMove {
    pub to: Square,
    pub piece: PieceType,
    pub color: Color,
}

/// 指し手候補（盤上の手または駒打ち）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    Board(BoardMove),
    Drop(DropMove),
}

impl Candidate {
    /// 移動先の升
    pub fn to(&self) -> Square {
        match self {
            Candidate::Board(mv) => mv.to,
            Candidate::Drop(mv) => mv.to,
        }
    }
}

impl From<BoardMove> for Candidate {
    fn from(mv: BoardMove) -> Self {
        Candidate::Board(mv)
    }
}

impl From<DropMove> for Candidate {
    fn from(mv: DropMove) -> Self {
        Candidate::Drop(mv)
    }
}

impl std::fmt::Display for Candidate {
    /// USI 風の表記（`7g7f`, `2b8h+`, `5i5h=`（魔王化）, `P*5e`）
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Candidate::Board(mv) => {
                write!(f, "{}{}", mv.from, mv.to)?;
                match mv.promotion {
                    Promotion::None => Ok(()),
                    Promotion::Promote => f.write_str("+"),
                    Promotion::Maou => f.write_str("="),
                }
            }
            Candidate::Drop(mv) => write!(f, "{}*{}", mv.piece.to_char(), mv.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_promotion_from_flags() {
        assert_eq!(Promotion::from_flags(false, false), Some(Promotion::None));
        assert_eq!(Promotion::from_flags(true, false), Some(Promotion::Promote));
        assert_eq!(Promotion::from_flags(false, true), Some(Promotion::Maou));
        assert_eq!(Promotion::from_flags(true, true), None);
    }

    #[test]
    fn test_board_move_matches() {
        let mv = BoardMove::new(sq(3, 4), sq(2, 4), smallvec![sq(2, 4)], Promotion::Promote);
        assert!(mv.matches(sq(2, 4), true, false));
        assert!(!mv.matches(sq(2, 4), false, false));
        assert!(!mv.matches(sq(2, 4), true, true));
        assert!(!mv.matches(sq(2, 3), true, false));
        assert!(mv.is_capture());
    }

    #[test]
    fn test_candidate_display() {
        let mv = BoardMove::new(sq(6, 2), sq(5, 2), CaptureList::new(), Promotion::None);
        assert_eq!(Candidate::from(mv.clone()).to_string(), "7g7f");
        assert_eq!(Candidate::from(mv.with_promotion(Promotion::Maou)).to_string(), "7g7f=");
        let drop = DropMove {
            to: sq(4, 4),
            piece: PieceType::Pawn,
            color: Color::Black,
        };
        assert_eq!(Candidate::from(drop).to_string(), "P*5e");
        assert_eq!(Candidate::from(drop).to(), sq(4, 4));
        assert_eq!(Candidate::from(mv).to(), sq(5, 2));
    }
}
