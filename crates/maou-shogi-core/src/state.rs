//! 局面（GameState）
//!
//! 1手ごとに新しい `GameState` を作り、前の値は書き換えない。盤面は `Arc` で
//! 共有し、書き込みが必要になったときだけ `Arc::make_mut` で複製する
//! （コピーオンライト）。そのため仮想実行は確定局面に影響しない。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{Color, Hand, Piece, PieceType, Square};

/// 対局状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Finished,
}

/// 取った駒の記録（成り・魔王を戻す前の姿）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapturedPiece {
    pub position: Square,
    pub piece: Piece,
}

/// 直前の1手
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastPly {
    Move {
        from: Square,
        to: Square,
        promote: bool,
        maou: bool,
        captured: Vec<CapturedPiece>,
    },
    Drop {
        to: Square,
        piece: PieceType,
    },
    Resign {
        color: Color,
    },
}

/// 局面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Arc<Board>,
    active_color: Color,
    friendly_pierce: bool,
    hands: [Hand; Color::NUM],
    status: GameStatus,
    winner: Option<Color>,
    in_check: Option<Color>,
    last_ply: Option<LastPly>,
}

impl GameState {
    /// 平手の開始局面
    pub fn new(friendly_pierce: bool) -> GameState {
        GameState::with_position(Board::hirate(), Color::Black, [Hand::EMPTY; 2], friendly_pierce)
    }

    /// 任意の配置から局面を作る（王手状態は再計算する）
    pub fn with_position(
        board: Board,
        active_color: Color,
        hands: [Hand; Color::NUM],
        friendly_pierce: bool,
    ) -> GameState {
        let mut state = GameState {
            board: Arc::new(board),
            active_color,
            friendly_pierce,
            hands,
            status: GameStatus::Ongoing,
            winner: None,
            in_check: None,
            last_ply: None,
        };
        if crate::attacks::is_in_check(&state, active_color) {
            state.in_check = Some(active_color);
        }
        state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// 魔王が味方の駒を貫通できるか（対局ごとに固定）
    #[inline]
    pub fn friendly_pierce(&self) -> bool {
        self.friendly_pierce
    }

    #[inline]
    pub fn hand(&self, color: Color) -> Hand {
        self.hands[color.index()]
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    #[inline]
    pub fn in_check(&self) -> Option<Color> {
        self.in_check
    }

    #[inline]
    pub fn last_ply(&self) -> Option<&LastPly> {
        self.last_ply.as_ref()
    }

    // ------------------------------------------------------------------
    // 状態遷移用（crate 内のみ）
    // ------------------------------------------------------------------

    /// 盤面への書き込み（共有中なら複製してから）
    #[inline]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        Arc::make_mut(&mut self.board)
    }

    #[inline]
    pub(crate) fn hand_mut(&mut self, color: Color) -> &mut Hand {
        &mut self.hands[color.index()]
    }

    #[inline]
    pub(crate) fn set_active_color(&mut self, color: Color) {
        self.active_color = color;
    }

    #[inline]
    pub(crate) fn set_in_check(&mut self, color: Option<Color>) {
        self.in_check = color;
    }

    #[inline]
    pub(crate) fn set_last_ply(&mut self, ply: LastPly) {
        self.last_ply = Some(ply);
    }

    /// 終局させる
    pub(crate) fn finish(&mut self, winner: Color) {
        self.status = GameStatus::Finished;
        self.winner = Some(winner);
    }

    /// 盤面を共有しているか（テスト用）
    #[cfg(test)]
    pub(crate) fn shares_board_with(&self, other: &GameState) -> bool {
        Arc::ptr_eq(&self.board, &other.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new(false);
        assert_eq!(state.active_color(), Color::Black);
        assert_eq!(state.status(), GameStatus::Ongoing);
        assert_eq!(state.winner(), None);
        assert_eq!(state.in_check(), None);
        assert!(state.last_ply().is_none());
        assert!(!state.friendly_pierce());
        assert!(state.hand(Color::Black).is_empty());
        assert!(state.hand(Color::White).is_empty());
    }

    #[test]
    fn test_board_copy_on_write() {
        let state = GameState::new(false);
        let mut next = state.clone();
        assert!(next.shares_board_with(&state));

        let sq = Square::new(6, 4).unwrap();
        next.board_mut().set(sq, None);
        assert!(!next.shares_board_with(&state));
        assert!(state.piece_on(sq).is_some());
        assert!(next.piece_on(sq).is_none());
    }
}
