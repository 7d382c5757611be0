//! セッション層のエラー

use maou_shogi_core::GameError;

/// クライアントの要求を処理できなかった理由
///
/// どれも要求元のクライアントにだけ `error` メッセージとして返す。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("this room is full")]
    RoomFull,

    #[error("you have not joined a room")]
    NotInRoom,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("invalid room id")]
    InvalidRoomId,

    #[error("no more rooms can be created")]
    TooManyRooms,

    #[error(transparent)]
    Game(#[from] GameError),
}
