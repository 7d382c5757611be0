//! 自玉の安全を考えない指し手候補（pseudo-legal）の生成

use smallvec::smallvec;

use crate::attacks::{MAOU_DIRS, movement};
use crate::state::GameState;
use crate::types::{Color, Piece, PieceForm, Square};

use super::moves::{BoardMove, CaptureList, Promotion};

/// 行き所のない駒になるため成りが強制される移動先か
///
/// 歩・香は相手側の最奥段、桂は最奥の2段。
#[inline]
fn is_forced_promotion(form: PieceForm, color: Color, to: Square) -> bool {
    match form {
        PieceForm::Pawn | PieceForm::Lance => to.relative_row(color) == 0,
        PieceForm::Knight => to.relative_row(color) <= 1,
        _ => false,
    }
}

/// 移動元か移動先が敵陣か
#[inline]
fn is_promotion_opportunity(color: Color, from: Square, to: Square) -> bool {
    from.in_promotion_zone(color) || to.in_promotion_zone(color)
}

/// `from` の駒の指し手候補を生成する（自玉への王手は考慮しない）
///
/// 升が空なら空の Vec を返す。手番は問わない。
pub fn generate_pseudo_moves(state: &GameState, from: Square) -> Vec<BoardMove> {
    let Some(pc) = state.piece_on(from) else {
        return Vec::new();
    };
    let mut moves = Vec::new();

    let Some(m) = movement(pc.form, pc.color) else {
        generate_maou_moves(state, from, pc.color, &mut moves);
        return moves;
    };

    // 近接・跳び（龍・馬の追加1升を含む）
    for &(dr, dc) in m.steps {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match state.piece_on(to) {
            Some(target) if target.color == pc.color => {}
            Some(_) => push_variants(&mut moves, pc, from, to, smallvec![to]),
            None => push_variants(&mut moves, pc, from, to, CaptureList::new()),
        }
    }

    // 走り
    for &(dr, dc) in m.slides {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match state.piece_on(to) {
                Some(target) => {
                    if target.color != pc.color {
                        push_variants(&mut moves, pc, from, to, smallvec![to]);
                    }
                    break;
                }
                None => push_variants(&mut moves, pc, from, to, CaptureList::new()),
            }
            cur = to;
        }
    }

    moves
}

/// 成り・魔王化の選択肢を展開して追加する
///
/// - 玉: 移動元か移動先が敵陣なら、通常の手に加えて魔王化する手も生成する
/// - 成れる生駒: 不成を基本とし、敵陣に関わる移動なら成りも生成する。
///   行き所のない升への移動は成りのみ
/// - それ以外（成駒・金）: 不成のみ
fn push_variants(
    moves: &mut Vec<BoardMove>,
    pc: Piece,
    from: Square,
    to: Square,
    captured: CaptureList,
) {
    let base = BoardMove::new(from, to, captured, Promotion::None);
    let opportunity = is_promotion_opportunity(pc.color, from, to);

    if pc.form == PieceForm::King {
        if opportunity {
            moves.push(base.with_promotion(Promotion::Maou));
        }
        moves.push(base);
        return;
    }

    if !pc.form.can_promote() {
        moves.push(base);
        return;
    }

    if is_forced_promotion(pc.form, pc.color, to) {
        moves.push(base.with_promotion(Promotion::Promote));
        return;
    }

    let promoting = opportunity.then(|| base.with_promotion(Promotion::Promote));
    moves.push(base);
    moves.extend(promoting);
}

/// 魔王の指し手
///
/// 飛・角の8方向に走る。相手の駒は取りながら走り続け、それまでに通過した
/// 相手の駒はすべて取る。味方の駒は貫通設定が有効なら飛び越え（その升には
/// 止まれない）、無効ならその手前で止まる。
fn generate_maou_moves(state: &GameState, from: Square, owner: Color, moves: &mut Vec<BoardMove>) {
    let pierce = state.friendly_pierce();
    for (dr, dc) in MAOU_DIRS {
        let mut captured = CaptureList::new();
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match state.piece_on(to) {
                Some(target) if target.color == owner => {
                    if !pierce {
                        break;
                    }
                }
                Some(_) => {
                    captured.push(to);
                    moves.push(BoardMove::new(from, to, captured.clone(), Promotion::None));
                }
                None => moves.push(BoardMove::new(from, to, captured.clone(), Promotion::None)),
            }
            cur = to;
        }
    }
}
