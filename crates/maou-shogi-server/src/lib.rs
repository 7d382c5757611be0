//! 魔王将棋の対局セッション層
//!
//! 部屋ごとに2人のプレイヤーと1つの対局を管理し、JSON メッセージで
//! やり取りする。トランスポートは持たず、`local` の行区切りループか
//! 呼び出し側の接続層から使う。

pub mod config;
pub mod error;
pub mod local;
pub mod protocol;
pub mod session;

pub use config::ServerConfig;
pub use error::SessionError;
pub use protocol::{ClientMessage, ProtocolError, ServerMessage, parse_client_message};
pub use session::{ClientId, Outbound, ROOM_CAPACITY, Room, RoomTable, Seat};
