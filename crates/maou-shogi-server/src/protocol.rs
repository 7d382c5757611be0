//! クライアントとの間でやり取りするメッセージ
//!
//! どちらの向きも `"type"` をタグにした JSON オブジェクト。フィールド名は camelCase。

use maou_shogi_core::{Color, DropRequest, MoveRequest, PublicState};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// クライアントからのメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// 入室（部屋がなければ作る）
    Join {
        room_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        friendly_pierce: Option<bool>,
    },
    Move(MoveRequest),
    Drop(DropRequest),
    Resign,
    RequestState,
}

impl ClientMessage {
    const TYPES: [&'static str; 5] = ["join", "move", "drop", "resign", "requestState"];
}

/// サーバからのメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// 入室できた（自分の手番色と部屋の設定）
    Joined {
        color: Color,
        friendly_pierce: bool,
        room_id: String,
    },
    /// 局面の通知
    State { state: Box<PublicState> },
    /// 指し手・投了後の局面
    Move { state: Box<PublicState> },
    /// 要求元だけに返すエラー
    Error { message: String },
    /// 入退室などのお知らせ
    System { message: String },
}

impl ServerMessage {
    pub fn error(message: impl ToString) -> Self {
        ServerMessage::Error {
            message: message.to_string(),
        }
    }
}

/// メッセージの解析エラー
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("message is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("message has no \"type\" field")]
    MissingType,

    #[error("unknown message type: {0:?}")]
    UnknownType(String),

    #[error("invalid {kind} message: {source}")]
    Invalid {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON 文字列を解析する
pub fn parse_client_message(text: &str) -> Result<ClientMessage, ProtocolError> {
    let value: Value = serde_json::from_str(text).map_err(ProtocolError::Json)?;
    parse_client_value(value)
}

/// 解析済みの JSON 値を検証する
///
/// 未知の `type` とフィールドの不備を区別して返す。
pub fn parse_client_value(value: Value) -> Result<ClientMessage, ProtocolError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingType)?
        .to_string();
    if !ClientMessage::TYPES.contains(&kind.as_str()) {
        return Err(ProtocolError::UnknownType(kind));
    }
    serde_json::from_value(value).map_err(|source| ProtocolError::Invalid { kind, source })
}
