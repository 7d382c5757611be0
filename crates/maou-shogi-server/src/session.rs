//! 部屋と対局の管理（トランスポート非依存）
//!
//! `RoomTable` がすべての部屋を部屋 ID で持ち、部屋ごとに対局コントローラを
//! 1つ持つ。クライアントは接続層が割り当てる `ClientId` で識別する。
//!
//! 各操作は送信すべきメッセージの一覧（`Outbound`）を返すだけで、実際の送信は
//! 呼び出し側に任せる。1つの `RoomTable` への呼び出しは直列化されている前提。

use std::collections::HashMap;
use std::fmt;

use maou_shogi_core::{Color, DropRequest, GameOptions, MaouShogi, MoveRequest};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::protocol::{ClientMessage, ServerMessage};

/// 部屋あたりの最大人数
pub const ROOM_CAPACITY: usize = 2;

/// 部屋 ID の最大長（バイト）
const MAX_ROOM_ID_LEN: usize = 64;

/// 接続層が割り当てるクライアント識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 送信するメッセージと宛先
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outbound {
    pub to: ClientId,
    pub message: ServerMessage,
}

/// 部屋の席
#[derive(Debug, Clone)]
pub struct Seat {
    pub client: ClientId,
    pub name: String,
    pub color: Color,
}

/// 部屋（最大2人と対局1つ）
#[derive(Debug)]
pub struct Room {
    id: String,
    seats: Vec<Seat>,
    game: MaouShogi,
}

impl Room {
    fn new(id: String, options: GameOptions) -> Self {
        Self {
            id,
            seats: Vec::with_capacity(ROOM_CAPACITY),
            game: MaouShogi::new(options),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn game(&self) -> &MaouShogi {
        &self.game
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= ROOM_CAPACITY
    }

    fn seat_of(&self, client: ClientId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.client == client)
    }

    /// 空いている手番色（先に入った人が先手）
    fn free_color(&self) -> Color {
        match self.seats.first() {
            Some(seat) => seat.color.opponent(),
            None => Color::Black,
        }
    }

    fn joined_message(&self, color: Color) -> ServerMessage {
        ServerMessage::Joined {
            color,
            friendly_pierce: self.game.is_friendly_pierce_enabled(),
            room_id: self.id.clone(),
        }
    }

    fn broadcast(&self, message: ServerMessage) -> Vec<Outbound> {
        self.seats
            .iter()
            .map(|s| Outbound {
                to: s.client,
                message: message.clone(),
            })
            .collect()
    }

    fn state_message(&self) -> ServerMessage {
        ServerMessage::State {
            state: Box::new(self.game.public_state()),
        }
    }

    fn move_message(&self) -> ServerMessage {
        ServerMessage::Move {
            state: Box::new(self.game.public_state()),
        }
    }
}

/// 全部屋の表
pub struct RoomTable {
    config: ServerConfig,
    rooms: HashMap<String, Room>,
    /// クライアントが入っている部屋
    membership: HashMap<ClientId, String>,
    rng: Xoshiro256PlusPlus,
}

impl RoomTable {
    pub fn new(config: ServerConfig) -> Self {
        let seed = config.rng_seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            rooms: HashMap::new(),
            membership: HashMap::new(),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// クライアントが入っている部屋
    pub fn room_of(&self, client: ClientId) -> Option<&Room> {
        self.membership
            .get(&client)
            .and_then(|id| self.rooms.get(id))
    }

    /// メッセージを処理する
    ///
    /// エラーは要求元への `error` メッセージに変換する。
    pub fn dispatch(&mut self, client: ClientId, message: ClientMessage) -> Vec<Outbound> {
        let result = match message {
            ClientMessage::Join {
                room_id,
                name,
                friendly_pierce,
            } => self.join(client, &room_id, name, friendly_pierce),
            ClientMessage::Move(req) => self.play_move(client, req),
            ClientMessage::Drop(req) => self.play_drop(client, req),
            ClientMessage::Resign => self.resign(client),
            ClientMessage::RequestState => self.request_state(client),
        };
        result.unwrap_or_else(|e| {
            debug!(client = client.0, error = %e, "request rejected");
            vec![Outbound {
                to: client,
                message: ServerMessage::error(e),
            }]
        })
    }

    /// 入室
    ///
    /// 部屋がなければ作る（味方貫通設定は作成時に固定）。既に同じ部屋にいれば
    /// 入室通知と局面を送り直すだけ。別の部屋にいた場合は先に退室する。
    pub fn join(
        &mut self,
        client: ClientId,
        room_id: &str,
        name: Option<String>,
        friendly_pierce: Option<bool>,
    ) -> Result<Vec<Outbound>, SessionError> {
        let room_id = room_id.trim();
        if room_id.is_empty() || room_id.len() > MAX_ROOM_ID_LEN {
            return Err(SessionError::InvalidRoomId);
        }

        if let Some(room) = self.rooms.get(room_id) {
            if let Some(seat) = room.seat_of(client) {
                let mut out = vec![Outbound {
                    to: client,
                    message: room.joined_message(seat.color),
                }];
                out.extend(room.broadcast(room.state_message()));
                return Ok(out);
            }
            if room.is_full() {
                return Err(SessionError::RoomFull);
            }
        } else {
            // 一人きりの部屋から移るなら、その部屋が消える分を先に差し引く
            let freed = self.rooms_freed_by_leaving(client);
            if self.rooms.len() - freed >= self.config.max_rooms {
                return Err(SessionError::TooManyRooms);
            }
        }

        let mut out = Vec::new();
        if self.membership.contains_key(&client) {
            out.extend(self.disconnect(client));
        }

        let name = match name.map(|n| n.trim().to_string()) {
            Some(n) if !n.is_empty() => n,
            _ => format!(
                "{}{}",
                self.config.player_name_prefix,
                self.rng.random_range(0..1000u32)
            ),
        };

        let default_pierce = self.config.default_friendly_pierce;
        let room = self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            let friendly_pierce = friendly_pierce.unwrap_or(default_pierce);
            info!(room = room_id, friendly_pierce, "room created");
            Room::new(room_id.to_string(), GameOptions { friendly_pierce })
        });

        let color = room.free_color();
        room.seats.push(Seat {
            client,
            name: name.clone(),
            color,
        });
        self.membership.insert(client, room_id.to_string());
        info!(room = room_id, client = client.0, %color, name = %name, "player joined");

        if room.is_full() {
            for seat in &room.seats {
                out.push(Outbound {
                    to: seat.client,
                    message: room.joined_message(seat.color),
                });
            }
        } else {
            out.push(Outbound {
                to: client,
                message: room.joined_message(color),
            });
        }
        out.extend(room.broadcast(room.state_message()));
        Ok(out)
    }

    /// 盤上の駒を動かす
    pub fn play_move(
        &mut self,
        client: ClientId,
        req: MoveRequest,
    ) -> Result<Vec<Outbound>, SessionError> {
        let room = self.turn_holder_room(client)?;
        room.game.move_piece(req)?;
        Ok(Self::after_ply(room))
    }

    /// 持ち駒を打つ
    pub fn play_drop(
        &mut self,
        client: ClientId,
        req: DropRequest,
    ) -> Result<Vec<Outbound>, SessionError> {
        let room = self.turn_holder_room(client)?;
        room.game.drop_piece(req)?;
        Ok(Self::after_ply(room))
    }

    /// 投了（手番に関係なく受け付ける）
    pub fn resign(&mut self, client: ClientId) -> Result<Vec<Outbound>, SessionError> {
        let (room, color) = self.seated_room(client)?;
        room.game.resign(color);
        info!(room = %room.id, client = client.0, %color, "resigned");
        Ok(room.broadcast(room.move_message()))
    }

    /// 部屋の全員に現在の局面を送る
    pub fn request_state(&mut self, client: ClientId) -> Result<Vec<Outbound>, SessionError> {
        let (room, _) = self.seated_room(client)?;
        Ok(room.broadcast(room.state_message()))
    }

    /// 切断・退室
    ///
    /// 残った人に通知と局面を送る。誰もいなくなった部屋は消す。
    pub fn disconnect(&mut self, client: ClientId) -> Vec<Outbound> {
        let Some(room_id) = self.membership.remove(&client) else {
            return Vec::new();
        };
        let Some(room) = self.rooms.get_mut(&room_id) else {
            warn!(room = %room_id, client = client.0, "membership points to a missing room");
            return Vec::new();
        };

        let name = room
            .seat_of(client)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        room.seats.retain(|s| s.client != client);
        info!(room = %room_id, client = client.0, "player left");

        if room.seats.is_empty() {
            self.rooms.remove(&room_id);
            info!(room = %room_id, "room closed");
            return Vec::new();
        }

        let mut out = room.broadcast(ServerMessage::System {
            message: format!("{name} left the room"),
        });
        out.extend(room.broadcast(room.state_message()));
        out
    }

    /// 退室すると消える部屋の数（一人で入っている部屋なら 1）
    fn rooms_freed_by_leaving(&self, client: ClientId) -> usize {
        match self.room_of(client) {
            Some(room) if room.seats.len() == 1 => 1,
            _ => 0,
        }
    }

    fn seated_room(&mut self, client: ClientId) -> Result<(&mut Room, Color), SessionError> {
        let room = self
            .membership
            .get(&client)
            .and_then(|id| self.rooms.get_mut(id))
            .ok_or(SessionError::NotInRoom)?;
        let color = room
            .seat_of(client)
            .map(|s| s.color)
            .ok_or(SessionError::NotInRoom)?;
        Ok((room, color))
    }

    fn turn_holder_room(&mut self, client: ClientId) -> Result<&mut Room, SessionError> {
        let (room, color) = self.seated_room(client)?;
        if color != room.game.active_color() {
            return Err(SessionError::NotYourTurn);
        }
        Ok(room)
    }

    fn after_ply(room: &Room) -> Vec<Outbound> {
        if let Some(winner) = room.game.winner() {
            info!(room = %room.id, %winner, "game finished");
        }
        room.broadcast(room.move_message())
    }
}
