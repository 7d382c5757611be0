//! End-to-end room sessions driven through JSON client messages

use maou_shogi_core::Color;
use maou_shogi_server::{
    ClientId, Outbound, RoomTable, ServerConfig, ServerMessage, parse_client_message,
};
use serde_json::{Value, json};

const ALICE: ClientId = ClientId(1);
const BOB: ClientId = ClientId(2);

fn table() -> RoomTable {
    RoomTable::new(ServerConfig {
        rng_seed: Some(11),
        ..ServerConfig::default()
    })
}

fn send(table: &mut RoomTable, client: ClientId, text: &str) -> Vec<Outbound> {
    let message = parse_client_message(text).unwrap_or_else(|e| panic!("{text}: {e}"));
    table.dispatch(client, message)
}

fn to_json(out: &Outbound) -> Value {
    serde_json::to_value(out).unwrap()
}

fn last_state(outbound: &[Outbound], client: ClientId) -> Value {
    let out = outbound
        .iter()
        .rev()
        .find(|o| o.to == client)
        .expect("no message for client");
    to_json(out)["message"]["state"].clone()
}

fn seat_both(table: &mut RoomTable, pierce: bool) {
    let join = json!({"type": "join", "roomId": "room-1", "friendlyPierce": pierce}).to_string();
    send(table, ALICE, &join);
    send(table, BOB, &join);
}

#[test]
fn test_join_messages_in_order() {
    let mut t = table();
    let out = send(&mut t, ALICE, r#"{"type":"join","roomId":"room-1","name":"alice"}"#);
    let kinds: Vec<Value> = out.iter().map(|o| to_json(o)["message"]["type"].clone()).collect();
    assert_eq!(kinds, vec![json!("joined"), json!("state")]);

    let out = send(&mut t, BOB, r#"{"type":"join","roomId":"room-1","name":"bob"}"#);
    let summary: Vec<(u64, Value)> = out
        .iter()
        .map(|o| (o.to.0, to_json(o)["message"]["type"].clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, json!("joined")),
            (2, json!("joined")),
            (1, json!("state")),
            (2, json!("state")),
        ]
    );
    assert_eq!(to_json(&out[1])["message"]["color"], "gote");
}

#[test]
fn test_moves_are_broadcast_to_both_players() {
    let mut t = table();
    seat_both(&mut t, false);

    let out = send(
        &mut t,
        ALICE,
        r#"{"type":"move","from":{"row":6,"col":4},"to":{"row":5,"col":4}}"#,
    );
    assert_eq!(out.len(), 2);
    for o in &out {
        let v = to_json(o);
        assert_eq!(v["message"]["type"], "move");
        assert_eq!(v["message"]["state"]["activeColor"], "gote");
        assert_eq!(
            v["message"]["state"]["lastMove"],
            json!({"type": "move", "from": {"row": 6, "col": 4}, "to": {"row": 5, "col": 4}, "promote": false, "maou": false, "captured": []})
        );
    }

    let out = send(
        &mut t,
        ALICE,
        r#"{"type":"move","from":{"row":6,"col":3},"to":{"row":5,"col":3}}"#,
    );
    assert_eq!(
        out,
        vec![Outbound {
            to: ALICE,
            message: ServerMessage::error("it is not your turn"),
        }]
    );
}

#[test]
fn test_maou_outside_promotion_zone_is_rejected() {
    let mut t = table();
    seat_both(&mut t, false);

    send(&mut t, ALICE, r#"{"type":"move","from":{"row":6,"col":4},"to":{"row":5,"col":4}}"#);
    send(&mut t, BOB, r#"{"type":"move","from":{"row":2,"col":4},"to":{"row":3,"col":4}}"#);
    let out = send(
        &mut t,
        ALICE,
        r#"{"type":"move","from":{"row":8,"col":4},"to":{"row":7,"col":4},"maou":true}"#,
    );
    assert_eq!(
        out,
        vec![Outbound {
            to: ALICE,
            message: ServerMessage::error("illegal move"),
        }]
    );

    // 同じ升への通常の玉の移動は指せる
    let out = send(
        &mut t,
        ALICE,
        r#"{"type":"move","from":{"row":8,"col":4},"to":{"row":7,"col":4}}"#,
    );
    let state = last_state(&out, BOB);
    assert_eq!(
        state["board"][7][4],
        json!({"type": "K", "owner": "sente", "promoted": false, "maou": false})
    );
    assert_eq!(state["board"][8][4], Value::Null);
}

#[test]
fn test_resign_finishes_game_and_rejects_further_moves() {
    let mut t = table();
    seat_both(&mut t, false);

    let out = send(&mut t, ALICE, r#"{"type":"resign"}"#);
    let state = last_state(&out, BOB);
    assert_eq!(state["status"], "finished");
    assert_eq!(state["winner"], "gote");

    let game = t.room("room-1").unwrap().game();
    assert_eq!(game.winner(), Some(Color::White));

    let out = send(&mut t, ALICE, r#"{"type":"move","from":{"row":6,"col":4},"to":{"row":5,"col":4}}"#);
    assert_eq!(
        out,
        vec![Outbound {
            to: ALICE,
            message: ServerMessage::error("game is already finished"),
        }]
    );
}

#[test]
fn test_request_state_broadcasts_current_position() {
    let mut t = table();
    seat_both(&mut t, true);
    let out = send(&mut t, BOB, r#"{"type":"requestState"}"#);
    assert_eq!(out.len(), 2);
    let state = last_state(&out, ALICE);
    assert_eq!(state["allowFriendlyPierce"], true);
    assert_eq!(state["status"], "ongoing");

    let lonely = send(&mut t, ClientId(9), r#"{"type":"requestState"}"#);
    assert_eq!(
        lonely,
        vec![Outbound {
            to: ClientId(9),
            message: ServerMessage::error("you have not joined a room"),
        }]
    );
}

#[test]
fn test_drop_without_stock_is_rejected() {
    let mut t = table();
    seat_both(&mut t, false);
    let out = send(&mut t, ALICE, r#"{"type":"drop","to":{"row":4,"col":4},"piece":"P"}"#);
    assert_eq!(
        out,
        vec![Outbound {
            to: ALICE,
            message: ServerMessage::error("illegal drop"),
        }]
    );
}

#[test]
fn test_leaving_player_notifies_opponent() {
    let mut t = table();
    send(&mut t, ALICE, r#"{"type":"join","roomId":"room-1","name":"alice"}"#);
    send(&mut t, BOB, r#"{"type":"join","roomId":"room-1","name":"bob"}"#);

    let out = t.disconnect(BOB);
    assert_eq!(out.len(), 2);
    assert_eq!(
        to_json(&out[0]),
        json!({"to": 1, "message": {"type": "system", "message": "bob left the room"}})
    );
    assert_eq!(to_json(&out[1])["message"]["type"], "state");

    // 対局は残っていて、空いた後手の席に入れる
    let out = send(&mut t, ClientId(3), r#"{"type":"join","roomId":"room-1"}"#);
    let joined = out.iter().find(|o| o.to == ClientId(3)).unwrap();
    assert_eq!(to_json(joined)["message"]["color"], "gote");
}
