//! 対局コントローラ
//!
//! 確定局面を1つだけ持ち、外部からの指し手・駒打ち・投了を検証して適用する。
//! 要求は生成済みの合法手と照合し、一致しなければ局面を変えずにエラーを返す。

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::apply::{apply_drop, apply_move};
use crate::error::GameError;
use crate::movegen::{BoardMove, DropMove, generate_drop_moves, generate_legal_moves};
use crate::sfen::SfenError;
use crate::snapshot::PublicState;
use crate::state::{GameState, GameStatus, LastPly};
use crate::types::{Color, Coord, PieceType, Square};

/// 対局の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    /// 魔王が味方の駒を貫通できるか
    pub friendly_pierce: bool,
}

/// 盤上の駒を動かす要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Coord,
    pub to: Coord,
    #[serde(default)]
    pub promote: bool,
    #[serde(default)]
    pub maou: bool,
}

/// 持ち駒を打つ要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRequest {
    pub to: Coord,
    pub piece: PieceType,
}

/// 対局
#[derive(Debug, Clone)]
pub struct MaouShogi {
    state: GameState,
}

impl Default for MaouShogi {
    fn default() -> Self {
        MaouShogi::new(GameOptions::default())
    }
}

impl MaouShogi {
    /// 平手で開始する
    pub fn new(options: GameOptions) -> MaouShogi {
        MaouShogi {
            state: GameState::new(options.friendly_pierce),
        }
    }

    /// 任意の局面から開始する
    pub fn from_state(state: GameState) -> MaouShogi {
        MaouShogi { state }
    }

    /// SFEN の局面から開始する
    pub fn from_sfen(sfen: &str, options: GameOptions) -> Result<MaouShogi, SfenError> {
        GameState::from_sfen(sfen, options.friendly_pierce).map(MaouShogi::from_state)
    }

    /// 確定局面
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.state.active_color()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    #[inline]
    pub fn in_check(&self) -> Option<Color> {
        self.state.in_check()
    }

    #[inline]
    pub fn is_friendly_pierce_enabled(&self) -> bool {
        self.state.friendly_pierce()
    }

    /// 公開スナップショット
    ///
    /// 毎回新しい値を作るので、返した値を書き換えても対局には影響しない。
    pub fn public_state(&self) -> PublicState {
        PublicState::from(&self.state)
    }

    /// 指定升の駒の合法手
    pub fn legal_moves_from(&self, from: Coord) -> Result<Vec<BoardMove>, GameError> {
        let from = Square::try_from(from)?;
        Ok(generate_legal_moves(&self.state, from))
    }

    /// 手番側が `piece` を打てる手
    pub fn legal_drops(&self, piece: PieceType) -> Vec<DropMove> {
        generate_drop_moves(&self.state, self.state.active_color(), piece)
    }

    /// 盤上の駒を動かす
    ///
    /// `(to, promote, maou)` が一致する合法手を適用する。
    pub fn move_piece(&mut self, req: MoveRequest) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        let from = Square::try_from(req.from)?;
        let to = Square::try_from(req.to)?;

        let candidates = generate_legal_moves(&self.state, from);
        trace!("{} legal moves from {from}", candidates.len());
        let Some(selected) = candidates
            .into_iter()
            .find(|mv| mv.matches(to, req.promote, req.maou))
        else {
            debug!(
                "rejected move {from}{to} (promote={}, maou={})",
                req.promote, req.maou
            );
            return Err(GameError::IllegalMove);
        };

        self.state = apply_move(&self.state, &selected)?;
        Ok(())
    }

    /// 手番側の持ち駒を打つ
    pub fn drop_piece(&mut self, req: DropRequest) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        let to = Square::try_from(req.to)?;

        let candidates = generate_drop_moves(&self.state, self.state.active_color(), req.piece);
        trace!("{} legal drops of {:?}", candidates.len(), req.piece);
        let Some(selected) = candidates.into_iter().find(|mv| mv.to == to) else {
            debug!("rejected drop {}*{to}", req.piece.to_char());
            return Err(GameError::IllegalDrop);
        };

        self.state = apply_drop(&self.state, &selected)?;
        Ok(())
    }

    /// 投了（終局後は何もしない）
    ///
    /// 手番に関係なくどちらの側も投了できる。王手状態と手番はそのまま残る。
    pub fn resign(&mut self, color: Color) {
        if self.state.is_finished() {
            return;
        }
        debug!("{color} resigned");
        let mut next = self.state.clone();
        next.finish(color.opponent());
        next.set_last_ply(LastPly::Resign { color });
        self.state = next;
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.state.is_finished() {
            debug!("rejected command after the game finished");
            return Err(GameError::InvalidState);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(from: (i32, i32), to: (i32, i32)) -> MoveRequest {
        MoveRequest {
            from: Coord::new(from.0, from.1),
            to: Coord::new(to.0, to.1),
            promote: false,
            maou: false,
        }
    }

    #[test]
    fn test_move_and_turn() {
        let mut game = MaouShogi::default();
        game.move_piece(req((6, 4), (5, 4))).unwrap();
        assert_eq!(game.active_color(), Color::White);
        assert_eq!(
            game.move_piece(req((6, 3), (5, 3))),
            Err(GameError::IllegalMove)
        );
    }

    #[test]
    fn test_invalid_coordinate() {
        let mut game = MaouShogi::default();
        assert_eq!(
            game.move_piece(req((9, 0), (8, 0))),
            Err(GameError::InvalidCoordinate { row: 9, col: 0 })
        );
        assert_eq!(
            game.legal_moves_from(Coord::new(0, -1)),
            Err(GameError::InvalidCoordinate { row: 0, col: -1 })
        );
    }

    #[test]
    fn test_promote_and_maou_together_never_match() {
        let mut game = MaouShogi::default();
        let mut r = req((6, 4), (5, 4));
        r.promote = true;
        r.maou = true;
        assert_eq!(game.move_piece(r), Err(GameError::IllegalMove));
        assert_eq!(game.state(), &GameState::new(false));
    }

    #[test]
    fn test_resign_twice_keeps_first_result() {
        let mut game = MaouShogi::default();
        game.resign(Color::Black);
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.winner(), Some(Color::White));
        game.resign(Color::White);
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(
            game.state().last_ply(),
            Some(&LastPly::Resign {
                color: Color::Black
            })
        );
        assert_eq!(
            game.move_piece(req((6, 4), (5, 4))),
            Err(GameError::InvalidState)
        );
    }

    #[test]
    fn test_options_deserialize() {
        let opts: GameOptions = serde_json::from_str(r#"{"friendlyPierce": true}"#).unwrap();
        assert!(opts.friendly_pierce);
        let opts: GameOptions = serde_json::from_str("{}").unwrap();
        assert!(!opts.friendly_pierce);
        assert!(MaouShogi::new(GameOptions { friendly_pierce: true }).is_friendly_pierce_enabled());
    }
}
