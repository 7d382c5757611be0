//! 公開用スナップショット（JSON 表現）
//!
//! クライアントに送る局面の写し。内部表現とは独立した値なので、
//! スナップショットを書き換えても対局には影響しない。

use serde::{Deserialize, Serialize};

use crate::state::{GameState, GameStatus, LastPly};
use crate::types::{Color, Hand, Piece, PieceType, Square};

/// 盤上の駒
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieceView {
    /// 元の駒種（成駒・魔王でも生駒の種類）
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub owner: Color,
    pub promoted: bool,
    pub maou: bool,
}

impl From<Piece> for PieceView {
    fn from(pc: Piece) -> Self {
        PieceView {
            piece_type: pc.form.base(),
            owner: pc.color,
            promoted: pc.form.is_promoted(),
            maou: pc.form.is_maou(),
        }
    }
}

/// 持ち駒（7種すべての枚数）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandView {
    #[serde(rename = "R")]
    pub rook: u32,
    #[serde(rename = "B")]
    pub bishop: u32,
    #[serde(rename = "G")]
    pub gold: u32,
    #[serde(rename = "S")]
    pub silver: u32,
    #[serde(rename = "N")]
    pub knight: u32,
    #[serde(rename = "L")]
    pub lance: u32,
    #[serde(rename = "P")]
    pub pawn: u32,
}

impl HandView {
    /// 駒種の枚数
    pub fn count(&self, pt: PieceType) -> u32 {
        match pt {
            PieceType::King => 0,
            PieceType::Rook => self.rook,
            PieceType::Bishop => self.bishop,
            PieceType::Gold => self.gold,
            PieceType::Silver => self.silver,
            PieceType::Knight => self.knight,
            PieceType::Lance => self.lance,
            PieceType::Pawn => self.pawn,
        }
    }
}

impl From<Hand> for HandView {
    fn from(hand: Hand) -> Self {
        HandView {
            rook: hand.count(PieceType::Rook),
            bishop: hand.count(PieceType::Bishop),
            gold: hand.count(PieceType::Gold),
            silver: hand.count(PieceType::Silver),
            knight: hand.count(PieceType::Knight),
            lance: hand.count(PieceType::Lance),
            pawn: hand.count(PieceType::Pawn),
        }
    }
}

/// 両者の持ち駒
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandsView {
    pub sente: HandView,
    pub gote: HandView,
}

impl HandsView {
    pub fn of(&self, color: Color) -> &HandView {
        match color {
            Color::Black => &self.sente,
            Color::White => &self.gote,
        }
    }
}

/// 取った駒（取られる直前の姿）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapturedView {
    pub position: Square,
    pub piece: PieceView,
}

/// 直前の1手
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LastPlyView {
    Move {
        from: Square,
        to: Square,
        promote: bool,
        maou: bool,
        captured: Vec<CapturedView>,
    },
    Drop {
        to: Square,
        piece: PieceType,
    },
    Resign {
        color: Color,
    },
}

impl From<&LastPly> for LastPlyView {
    fn from(ply: &LastPly) -> Self {
        match ply {
            LastPly::Move {
                from,
                to,
                promote,
                maou,
                captured,
            } => LastPlyView::Move {
                from: *from,
                to: *to,
                promote: *promote,
                maou: *maou,
                captured: captured
                    .iter()
                    .map(|c| CapturedView {
                        position: c.position,
                        piece: c.piece.into(),
                    })
                    .collect(),
            },
            LastPly::Drop { to, piece } => LastPlyView::Drop {
                to: *to,
                piece: *piece,
            },
            LastPly::Resign { color } => LastPlyView::Resign { color: *color },
        }
    }
}

/// 局面全体の公開スナップショット
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicState {
    /// 9x9（`board[row][col]`、row 0 が後手側の最下段）
    pub board: Vec<Vec<Option<PieceView>>>,
    pub active_color: Color,
    #[serde(rename = "allowFriendlyPierce")]
    pub friendly_pierce: bool,
    /// 持ち駒
    #[serde(rename = "captured")]
    pub hands: HandsView,
    pub status: GameStatus,
    pub winner: Option<Color>,
    pub in_check: Option<Color>,
    #[serde(rename = "lastMove")]
    pub last_ply: Option<LastPlyView>,
}

impl From<&GameState> for PublicState {
    fn from(state: &GameState) -> Self {
        PublicState {
            board: state
                .board()
                .rows()
                .into_iter()
                .map(|row| row.into_iter().map(|pc| pc.map(PieceView::from)).collect())
                .collect(),
            active_color: state.active_color(),
            friendly_pierce: state.friendly_pierce(),
            hands: HandsView {
                sente: state.hand(Color::Black).into(),
                gote: state.hand(Color::White).into(),
            },
            status: state.status(),
            winner: state.winner(),
            in_check: state.in_check(),
            last_ply: state.last_ply().map(LastPlyView::from),
        }
    }
}
