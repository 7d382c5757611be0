//! 魔王将棋のルールエンジン
//!
//! 本将棋に「魔王」を加えた変則将棋。玉は敵陣に関わる移動で魔王に成れ、
//! 魔王は飛・角の8方向に走り、通過した相手の駒をまとめて取る。
//! 対局ごとの設定で、魔王が味方の駒を貫通できるかを切り替えられる。
//!
//! 構成（葉から順に）:
//! - [`attacks`]: 利き判定
//! - [`movegen`]: 指し手候補・駒打ち・合法手の生成
//! - [`apply`]: 局面遷移（仮想実行と確定）
//! - [`game`]: 対局コントローラ（[`MaouShogi`]）
//!
//! I/O は持たない。ログは `log` ファサード経由で出す。

pub mod apply;
pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod sfen;
pub mod snapshot;
pub mod state;
pub mod types;

pub use attacks::{find_royal, is_in_check, is_square_attacked};
pub use board::Board;
pub use error::GameError;
pub use game::{DropRequest, GameOptions, MaouShogi, MoveRequest};
pub use movegen::{
    BoardMove, Candidate, DropMove, Promotion, generate_drop_moves, generate_legal_moves,
    generate_pseudo_moves, has_any_legal_response, legal_candidates,
};
pub use sfen::{SfenError, parse_sfen, to_sfen};
pub use snapshot::{HandView, HandsView, LastPlyView, PieceView, PublicState};
pub use state::{CapturedPiece, GameState, GameStatus, LastPly};
pub use types::{Color, Coord, Hand, Piece, PieceForm, PieceType, Square};
