//! SFEN 形式の局面表記
//!
//! `<盤面> <手番> <持ち駒> [手数]`。標準の SFEN に加えて、魔王を `+K` / `+k` で表す。
//! 手数は読み飛ばし、書き出しでは常に `1` を付ける。

use crate::board::Board;
use crate::state::GameState;
use crate::types::{BOARD_SIZE, Color, Hand, Piece, PieceForm, PieceType, Square};

/// SFEN の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SfenError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("expected 9 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not cover 9 files")]
    FileCount { rank: usize },

    #[error("invalid piece character: {0:?}")]
    InvalidPiece(char),

    #[error("piece cannot be promoted: {0}")]
    InvalidPromotion(char),

    #[error("invalid side to move: {0:?}")]
    InvalidSide(String),

    #[error("invalid hand: {0:?}")]
    InvalidHand(String),

    #[error("{0} has more than one king")]
    TooManyRoyals(Color),
}

/// SFEN から局面を作る
///
/// 魔王の貫通設定は SFEN に含まれないので別に渡す。
pub fn parse_sfen(sfen: &str, friendly_pierce: bool) -> Result<GameState, SfenError> {
    let mut fields = sfen.split_whitespace();
    let board_field = fields.next().ok_or(SfenError::MissingField("board"))?;
    let side_field = fields.next().ok_or(SfenError::MissingField("side"))?;
    let hand_field = fields.next().ok_or(SfenError::MissingField("hand"))?;

    let board = parse_board(board_field)?;
    let active = match side_field {
        "b" => Color::Black,
        "w" => Color::White,
        other => return Err(SfenError::InvalidSide(other.to_string())),
    };
    let hands = parse_hands(hand_field)?;

    for color in Color::ALL {
        if board.pieces_of(color).filter(|(_, pc)| pc.is_royal()).count() > 1 {
            return Err(SfenError::TooManyRoyals(color));
        }
    }

    Ok(GameState::with_position(board, active, hands, friendly_pierce))
}

fn parse_board(field: &str) -> Result<Board, SfenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(SfenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        let mut promoted = false;
        for c in rank.chars() {
            if let Some(n) = c.to_digit(10) {
                if promoted || n == 0 {
                    return Err(SfenError::InvalidPiece(c));
                }
                col += n as usize;
                continue;
            }
            if c == '+' {
                if promoted {
                    return Err(SfenError::InvalidPiece(c));
                }
                promoted = true;
                continue;
            }

            let pt = PieceType::from_char(c).ok_or(SfenError::InvalidPiece(c))?;
            let color = if c.is_ascii_uppercase() {
                Color::Black
            } else {
                Color::White
            };
            let form = if promoted {
                match pt {
                    PieceType::King => PieceForm::Maou,
                    _ => PieceForm::from_type(pt)
                        .promote()
                        .ok_or(SfenError::InvalidPromotion(c))?,
                }
            } else {
                PieceForm::from_type(pt)
            };
            promoted = false;

            let sq = Square::new(row, col).ok_or(SfenError::FileCount { rank: row })?;
            board.set(sq, Some(Piece::new(form, color)));
            col += 1;
        }
        if promoted || col != BOARD_SIZE {
            return Err(SfenError::FileCount { rank: row });
        }
    }
    Ok(board)
}

fn parse_hands(field: &str) -> Result<[Hand; Color::NUM], SfenError> {
    let mut hands = [Hand::EMPTY; Color::NUM];
    if field == "-" {
        return Ok(hands);
    }

    let invalid = || SfenError::InvalidHand(field.to_string());
    let mut count: u32 = 0;
    for c in field.chars() {
        if let Some(d) = c.to_digit(10) {
            count = count.checked_mul(10).and_then(|n| n.checked_add(d)).ok_or_else(invalid)?;
            continue;
        }
        let pt = PieceType::from_char(c)
            .filter(|pt| !pt.is_royal())
            .ok_or_else(invalid)?;
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        let n = u8::try_from(count.max(1)).map_err(|_| invalid())?;
        let hand = &mut hands[color.index()];
        *hand = hand.set(pt, n);
        count = 0;
    }
    if count != 0 {
        return Err(invalid());
    }
    Ok(hands)
}

/// 局面を SFEN で書き出す
pub fn to_sfen(state: &GameState) -> String {
    let board = state.board();
    let mut ranks = Vec::with_capacity(BOARD_SIZE);
    for row in 0..BOARD_SIZE {
        let mut rank = String::new();
        let mut empty = 0;
        for sq in (0..BOARD_SIZE).filter_map(|col| Square::new(row, col)) {
            match board.piece_on(sq) {
                Some(pc) => {
                    if empty > 0 {
                        rank.push_str(&empty.to_string());
                        empty = 0;
                    }
                    rank.push_str(&pc.to_sfen());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            rank.push_str(&empty.to_string());
        }
        ranks.push(rank);
    }

    let side = match state.active_color() {
        Color::Black => "b",
        Color::White => "w",
    };

    let mut hand = String::new();
    for color in Color::ALL {
        for (pt, n) in state.hand(color).iter() {
            if n > 1 {
                hand.push_str(&n.to_string());
            }
            let c = pt.to_char();
            hand.push(match color {
                Color::Black => c,
                Color::White => c.to_ascii_lowercase(),
            });
        }
    }
    if hand.is_empty() {
        hand.push('-');
    }

    format!("{} {side} {hand} 1", ranks.join("/"))
}

impl GameState {
    /// SFEN から局面を作る（`parse_sfen` と同じ）
    pub fn from_sfen(sfen: &str, friendly_pierce: bool) -> Result<GameState, SfenError> {
        parse_sfen(sfen, friendly_pierce)
    }

    /// SFEN で書き出す（`to_sfen` と同じ）
    pub fn to_sfen(&self) -> String {
        to_sfen(self)
    }
}
