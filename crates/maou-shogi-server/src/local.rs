//! 行区切り JSON による対局ループ
//!
//! 1行に1つの封筒を読み、`RoomTable` に渡した結果を1行ずつ書き出す。
//!
//! 入力:
//! - `{"client": 1, "message": {"type": "join", "roomId": "r1"}}`
//! - `{"client": 1, "disconnect": true}`
//!
//! 出力:
//! - `{"to": 1, "message": {"type": "joined", ...}}`
//!
//! 封筒自体が壊れている行は警告を出して読み飛ばす。メッセージの解析エラーは
//! 送り主への `error` メッセージになる。

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::protocol::{ServerMessage, parse_client_value};
use crate::session::{ClientId, Outbound, RoomTable};

/// 入力1行分
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    client: ClientId,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    disconnect: bool,
}

/// 1行を処理して送信すべきメッセージを返す
///
/// 封筒として読めない行は `None`。
pub fn handle_line(table: &mut RoomTable, line: &str) -> Option<Vec<Outbound>> {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "skipping malformed line");
            return None;
        }
    };
    let client = envelope.client;

    if envelope.disconnect {
        debug!(client = client.0, "disconnect");
        return Some(table.disconnect(client));
    }

    let Some(value) = envelope.message else {
        warn!(client = client.0, "line has neither message nor disconnect");
        return None;
    };

    match parse_client_value(value) {
        Ok(message) => Some(table.dispatch(client, message)),
        Err(e) => {
            debug!(client = client.0, error = %e, "rejected message");
            Some(vec![Outbound {
                to: client,
                message: ServerMessage::error(e),
            }])
        }
    }
}

/// 入力が尽きるまでループする
pub fn run<R: BufRead, W: Write>(table: &mut RoomTable, reader: R, mut writer: W) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(outbound) = handle_line(table, line) else {
            continue;
        };
        for out in &outbound {
            serde_json::to_writer(&mut writer, out).context("failed to encode message")?;
            writeln!(writer).context("failed to write output")?;
        }
        writer.flush().context("failed to flush output")?;
    }
    Ok(())
}
