//! 対局操作のエラー

use crate::types::OutOfBoard;

/// 指し手・駒打ちの拒否理由
///
/// どのエラーでも局面は変化しない。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// 終局後の操作
    #[error("game is already finished")]
    InvalidState,

    /// 盤外の座標
    #[error("invalid coordinate: ({row}, {col})")]
    InvalidCoordinate { row: i32, col: i32 },

    /// 合法手の中に一致する手がない
    #[error("illegal move")]
    IllegalMove,

    /// 合法な駒打ちの中に一致する手がない
    #[error("illegal drop")]
    IllegalDrop,
}

impl From<OutOfBoard> for GameError {
    fn from(e: OutOfBoard) -> Self {
        GameError::InvalidCoordinate {
            row: e.row,
            col: e.col,
        }
    }
}
