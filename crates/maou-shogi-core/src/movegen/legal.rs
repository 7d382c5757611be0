//! 合法手の生成と応手の有無

use crate::apply::dry_run_move;
use crate::attacks::is_in_check;
use crate::state::GameState;
use crate::types::{Color, PieceType, Square};

use super::drop::generate_drop_moves;
use super::moves::{BoardMove, Candidate};
use super::pseudo::generate_pseudo_moves;

/// `from` の駒の合法手
///
/// 升が空か、手番でない側の駒なら空。指した後に自玉へ王手が残る手は除く。
pub fn generate_legal_moves(state: &GameState, from: Square) -> Vec<BoardMove> {
    match state.piece_on(from) {
        Some(pc) if pc.color == state.active_color() => legal_moves_of(state, from, pc.color),
        _ => Vec::new(),
    }
}

/// 手番側の合法手（盤上の手と駒打ち）をすべて列挙する
pub fn legal_candidates(state: &GameState) -> Vec<Candidate> {
    let color = state.active_color();
    let board_moves = state
        .board()
        .pieces_of(color)
        .flat_map(|(from, _)| legal_moves_of(state, from, color))
        .map(Candidate::from);
    let drops = PieceType::HAND_PIECES
        .into_iter()
        .flat_map(|pt| generate_drop_moves(state, color, pt))
        .map(Candidate::from);
    board_moves.chain(drops).collect()
}

/// `color` に合法な応手が1つでもあるか
///
/// 見つかった時点で打ち切る。
pub fn has_any_legal_response(state: &GameState, color: Color) -> bool {
    let board = state.board();
    if board
        .pieces_of(color)
        .any(|(from, _)| !legal_moves_of(state, from, color).is_empty())
    {
        return true;
    }
    state
        .hand(color)
        .iter()
        .any(|(pt, _)| !generate_drop_moves(state, color, pt).is_empty())
}

fn legal_moves_of(state: &GameState, from: Square, owner: Color) -> Vec<BoardMove> {
    generate_pseudo_moves(state, from)
        .into_iter()
        .filter(|mv| dry_run_move(state, mv).is_some_and(|next| !is_in_check(&next, owner)))
        .collect()
}
