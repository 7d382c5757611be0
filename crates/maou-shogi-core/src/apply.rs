//! 局面遷移
//!
//! 指し手・駒打ちを適用して新しい `GameState` を返す。元の局面は変更しない。
//!
//! - 仮想実行（dry run）: 駒の移動・取得と手番の交代だけを行う。合法手フィルタ用
//! - 確定（commit）: さらに直前の手の記録、王手状態の再計算、終局判定を行う

use log::debug;

use crate::attacks::is_in_check;
use crate::error::GameError;
use crate::movegen::{BoardMove, DropMove, Promotion, has_any_legal_response};
use crate::state::{CapturedPiece, GameState, LastPly};
use crate::types::{Color, Piece, PieceForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    DryRun,
    Commit,
}

/// 盤上の手を確定させる
///
/// 移動元が空の場合や、成り指定が駒と矛盾する場合は `IllegalMove`。
/// 移動先などの合法性は検査しないので、生成済みの手を渡すこと。
pub fn apply_move(state: &GameState, mv: &BoardMove) -> Result<GameState, GameError> {
    transition_move(state, mv, Mode::Commit).ok_or(GameError::IllegalMove)
}

/// 駒打ちを確定させる
///
/// 打つ升が埋まっている場合や手駒がない場合は `IllegalDrop`。
pub fn apply_drop(state: &GameState, mv: &DropMove) -> Result<GameState, GameError> {
    transition_drop(state, mv, Mode::Commit).ok_or(GameError::IllegalDrop)
}

/// 盤上の手の仮想実行
pub(crate) fn dry_run_move(state: &GameState, mv: &BoardMove) -> Option<GameState> {
    transition_move(state, mv, Mode::DryRun)
}

/// 駒打ちの仮想実行
pub(crate) fn dry_run_drop(state: &GameState, mv: &DropMove) -> Option<GameState> {
    transition_drop(state, mv, Mode::DryRun)
}

/// 移動後の形態
fn moved_form(form: PieceForm, promotion: Promotion) -> Option<PieceForm> {
    match promotion {
        Promotion::None => Some(form),
        Promotion::Promote => form.promote(),
        Promotion::Maou => (form == PieceForm::King).then_some(PieceForm::Maou),
    }
}

fn transition_move(state: &GameState, mv: &BoardMove, mode: Mode) -> Option<GameState> {
    let moving = state.piece_on(mv.from)?;
    let form = moved_form(moving.form, mv.promotion)?;
    let mover = moving.color;

    let mut next = state.clone();
    let board = next.board_mut();

    // 取る升の一覧が空なら移動先の駒を取る
    let mut captured = Vec::new();
    if mv.captured.is_empty() {
        if let Some(piece) = board.piece_on(mv.to) {
            captured.push(CapturedPiece {
                position: mv.to,
                piece,
            });
        }
    } else {
        for &position in &mv.captured {
            if let Some(piece) = board.take(position) {
                captured.push(CapturedPiece { position, piece });
            }
        }
    }

    board.set(mv.from, None);
    board.set(mv.to, Some(Piece::new(form, mover)));

    let mut royal_taken = false;
    for cap in &captured {
        if cap.piece.is_royal() {
            royal_taken = true;
        } else {
            let hand = next.hand(mover).add(cap.piece.form.base());
            *next.hand_mut(mover) = hand;
        }
    }

    if mode == Mode::DryRun {
        next.set_active_color(state.active_color().opponent());
        return Some(next);
    }

    next.set_last_ply(LastPly::Move {
        from: mv.from,
        to: mv.to,
        promote: mv.promotion.is_promote(),
        maou: mv.promotion.is_maou(),
        captured,
    });

    if royal_taken {
        debug!("{mover} captured the opposing royal at {}", mv.to);
        next.set_in_check(None);
        next.finish(mover);
    } else {
        settle(&mut next, state.active_color(), mover);
    }
    Some(next)
}

fn transition_drop(state: &GameState, mv: &DropMove, mode: Mode) -> Option<GameState> {
    if !state.board().is_empty(mv.to) || !state.hand(mv.color).has(mv.piece) {
        return None;
    }

    let mut next = state.clone();
    next.board_mut()
        .set(mv.to, Some(Piece::make(mv.color, mv.piece)));
    let hand = next.hand(mv.color).sub(mv.piece);
    *next.hand_mut(mv.color) = hand;

    if mode == Mode::DryRun {
        next.set_active_color(state.active_color().opponent());
        return Some(next);
    }

    next.set_last_ply(LastPly::Drop {
        to: mv.to,
        piece: mv.piece,
    });
    settle(&mut next, state.active_color(), mv.color);
    Some(next)
}

/// 手番を渡し、王手状態と終局（応手なし）を判定する
///
/// 王手の有無にかかわらず、相手に合法な応手が1つもなければ指した側の勝ち。
fn settle(next: &mut GameState, previous_active: Color, mover: Color) {
    let opponent = previous_active.opponent();
    next.set_active_color(opponent);
    let checked = is_in_check(next, opponent);
    next.set_in_check(checked.then_some(opponent));

    // 王手されていなければ応手がなくても終局しない
    if checked && !has_any_legal_response(next, opponent) {
        debug!("{opponent} has no legal response to check; {mover} wins");
        next.finish(mover);
    }
}
