//! 駒打ちの生成

use crate::apply::dry_run_drop;
use crate::attacks::is_in_check;
use crate::board::Board;
use crate::state::GameState;
use crate::types::{Color, PieceType, Square};

use super::moves::DropMove;

/// 行き所のない升・二歩でないか
///
/// 歩は最奥段と生の歩がある筋に打てない。香は最奥段、桂は最奥の2段に打てない。
/// 打ち歩詰めは禁止しない。
fn is_droppable(board: &Board, color: Color, pt: PieceType, to: Square) -> bool {
    let rel = to.relative_row(color);
    match pt {
        PieceType::Pawn => rel != 0 && !board.has_unpromoted_pawn_in_col(color, to.col()),
        PieceType::Lance => rel != 0,
        PieceType::Knight => rel > 1,
        _ => true,
    }
}

/// `color` が手駒の `pt` を打てる升をすべて列挙する
///
/// 玉や持っていない駒種なら空。打った結果自玉に王手がかかる手は除く。
/// 手番は問わない。
pub fn generate_drop_moves(state: &GameState, color: Color, pt: PieceType) -> Vec<DropMove> {
    if pt.is_royal() || !state.hand(color).has(pt) {
        return Vec::new();
    }
    let board = state.board();
    Square::all()
        .filter(|&to| board.is_empty(to) && is_droppable(board, color, pt, to))
        .map(|to| DropMove {
            to,
            piece: pt,
            color,
        })
        .filter(|mv| dry_run_drop(state, mv).is_some_and(|next| !is_in_check(&next, color)))
        .collect()
}
