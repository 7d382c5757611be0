//! 利き判定
//!
//! 駒の動き方の表（近接・跳び・走り）と、指定升に指定手番の利きがあるかを
//! 判定する `is_square_attacked`。王手判定と合法手フィルタの唯一の述語であり、
//! 副作用はない。
//!
//! 盤は小さいので Bitboard は使わず、相手の駒を1枚ずつ走査して判定する。

use crate::board::Board;
use crate::state::GameState;
use crate::types::{Color, PieceForm, Square};

/// (行差分, 列差分)
pub(crate) type Delta = (i8, i8);

const KING_STEPS: [Delta; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const GOLD_STEPS: [[Delta; 6]; Color::NUM] = [
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)],
    [(1, -1), (1, 0), (1, 1), (0, -1), (0, 1), (-1, 0)],
];

const SILVER_STEPS: [[Delta; 5]; Color::NUM] = [
    [(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)],
    [(1, -1), (1, 0), (1, 1), (-1, -1), (-1, 1)],
];

const KNIGHT_JUMPS: [[Delta; 2]; Color::NUM] = [[(-2, -1), (-2, 1)], [(2, -1), (2, 1)]];

/// 歩の1歩・香の走りの方向
const FORWARD: [[Delta; 1]; Color::NUM] = [[(-1, 0)], [(1, 0)]];

pub(crate) const ROOK_DIRS: [Delta; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(crate) const BISHOP_DIRS: [Delta; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 魔王の走り（飛＋角の8方向）
pub(crate) const MAOU_DIRS: [Delta; 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// 駒の動き方
///
/// `steps` は1升ずつの移動・跳び（桂の跳びも遮られない）、`slides` は遮られる
/// まで進む走り。魔王は走りの遮断規則が異なるため `Movement` では扱わない。
#[derive(Debug, Clone, Copy)]
pub(crate) struct Movement {
    pub steps: &'static [Delta],
    pub slides: &'static [Delta],
}

impl Movement {
    const fn new(steps: &'static [Delta], slides: &'static [Delta]) -> Movement {
        Movement { steps, slides }
    }
}

/// 形態と手番から動き方を引く（魔王は None）
pub(crate) fn movement(form: PieceForm, color: Color) -> Option<Movement> {
    let c = color.index();
    let m = match form {
        PieceForm::King => Movement::new(&KING_STEPS, &[]),
        PieceForm::Gold
        | PieceForm::ProSilver
        | PieceForm::ProKnight
        | PieceForm::ProLance
        | PieceForm::ProPawn => Movement::new(&GOLD_STEPS[c], &[]),
        PieceForm::Silver => Movement::new(&SILVER_STEPS[c], &[]),
        PieceForm::Knight => Movement::new(&KNIGHT_JUMPS[c], &[]),
        PieceForm::Pawn => Movement::new(&FORWARD[c], &[]),
        PieceForm::Lance => Movement::new(&[], &FORWARD[c]),
        PieceForm::Rook => Movement::new(&[], &ROOK_DIRS),
        PieceForm::Bishop => Movement::new(&[], &BISHOP_DIRS),
        // 龍は飛の走り＋斜め1升、馬は角の走り＋縦横1升
        PieceForm::Dragon => Movement::new(&BISHOP_DIRS, &ROOK_DIRS),
        PieceForm::Horse => Movement::new(&ROOK_DIRS, &BISHOP_DIRS),
        PieceForm::Maou => return None,
    };
    Some(m)
}

/// `target` に `by_color` の駒の利きがあるか
pub fn is_square_attacked(state: &GameState, target: Square, by_color: Color) -> bool {
    let board = state.board();
    board
        .pieces_of(by_color)
        .any(|(from, pc)| match movement(pc.form, pc.color) {
            Some(m) => movement_attacks(board, from, m, target),
            None => maou_attacks(board, from, pc.color, target, state.friendly_pierce()),
        })
}

/// 指定手番の王将（玉または魔王）の升
#[inline]
pub fn find_royal(state: &GameState, color: Color) -> Option<Square> {
    state.board().royal_square(color)
}

/// 指定手番の王将に相手の利きがあるか（王将がいなければ false）
pub fn is_in_check(state: &GameState, color: Color) -> bool {
    match find_royal(state, color) {
        Some(sq) => is_square_attacked(state, sq, color.opponent()),
        None => false,
    }
}

fn movement_attacks(board: &Board, from: Square, m: Movement, target: Square) -> bool {
    m.steps
        .iter()
        .any(|&(dr, dc)| from.offset(dr, dc) == Some(target))
        || m.slides.iter().any(|&dir| ray_reaches(board, from, dir, target))
}

/// 走りが `target` に届くか（途中の駒で遮られる）
fn ray_reaches(board: &Board, from: Square, (dr, dc): Delta, target: Square) -> bool {
    let mut cur = from;
    while let Some(next) = cur.offset(dr, dc) {
        if next == target {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        cur = next;
    }
    false
}

/// 魔王の利き
///
/// 味方の駒は貫通設定が有効なら素通り、無効なら遮られる。
/// 相手の駒に当たった時点でその升を含めて止まる。
fn maou_attacks(
    board: &Board,
    from: Square,
    owner: Color,
    target: Square,
    friendly_pierce: bool,
) -> bool {
    for (dr, dc) in MAOU_DIRS {
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            if next == target {
                return true;
            }
            match board.piece_on(next) {
                None => {}
                Some(pc) if pc.color == owner && friendly_pierce => {}
                Some(_) => break,
            }
            cur = next;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Hand, Piece};

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn state_with(pieces: &[(usize, usize, PieceForm, Color)], pierce: bool) -> GameState {
        let mut board = Board::empty();
        for &(r, c, form, color) in pieces {
            board.set(sq(r, c), Some(Piece::new(form, color)));
        }
        GameState::with_position(board, Color::Black, [Hand::EMPTY; 2], pierce)
    }

    #[test]
    fn test_lance_attack_is_blocked() {
        let state = state_with(
            &[
                (8, 4, PieceForm::Lance, Color::Black),
                (5, 4, PieceForm::Pawn, Color::White),
            ],
            false,
        );
        assert!(is_square_attacked(&state, sq(6, 4), Color::Black));
        assert!(is_square_attacked(&state, sq(5, 4), Color::Black));
        assert!(!is_square_attacked(&state, sq(4, 4), Color::Black));
        // 後ろには利かない
        assert!(!is_square_attacked(&state, sq(8, 3), Color::Black));
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let state = state_with(
            &[
                (4, 4, PieceForm::Knight, Color::White),
                (5, 4, PieceForm::Pawn, Color::Black),
                (5, 3, PieceForm::Pawn, Color::Black),
            ],
            false,
        );
        assert!(is_square_attacked(&state, sq(6, 3), Color::White));
        assert!(is_square_attacked(&state, sq(6, 5), Color::White));
        assert!(!is_square_attacked(&state, sq(2, 3), Color::White));
    }

    #[test]
    fn test_dragon_and_horse_extra_steps() {
        let state = state_with(
            &[
                (4, 4, PieceForm::Dragon, Color::Black),
                (0, 0, PieceForm::Horse, Color::Black),
            ],
            false,
        );
        // 龍の斜め1升
        assert!(is_square_attacked(&state, sq(3, 3), Color::Black));
        assert!(is_square_attacked(&state, sq(5, 5), Color::Black));
        // 馬の縦横1升
        assert!(is_square_attacked(&state, sq(0, 1), Color::Black));
        assert!(is_square_attacked(&state, sq(1, 0), Color::Black));
        assert!(!is_square_attacked(&state, sq(0, 2), Color::Black));
    }

    #[test]
    fn test_promoted_minor_moves_like_gold() {
        let state = state_with(&[(4, 4, PieceForm::ProSilver, Color::Black)], false);
        assert!(is_square_attacked(&state, sq(4, 3), Color::Black));
        assert!(is_square_attacked(&state, sq(5, 4), Color::Black));
        assert!(!is_square_attacked(&state, sq(5, 3), Color::Black));
    }

    #[test]
    fn test_maou_blocked_by_own_piece_without_pierce() {
        let pieces = [
            (8, 4, PieceForm::Maou, Color::Black),
            (6, 4, PieceForm::Gold, Color::Black),
            (2, 4, PieceForm::King, Color::White),
        ];
        let state = state_with(&pieces, false);
        assert!(is_square_attacked(&state, sq(7, 4), Color::Black));
        assert!(is_square_attacked(&state, sq(6, 4), Color::Black));
        assert!(!is_square_attacked(&state, sq(4, 4), Color::Black));
        assert!(!is_in_check(&state, Color::White));

        let state = state_with(&pieces, true);
        assert!(is_square_attacked(&state, sq(4, 4), Color::Black));
        assert!(is_in_check(&state, Color::White));
    }

    #[test]
    fn test_maou_stops_at_first_opposing_piece() {
        let state = state_with(
            &[
                (8, 8, PieceForm::Maou, Color::Black),
                (5, 5, PieceForm::Silver, Color::White),
                (3, 3, PieceForm::King, Color::White),
            ],
            true,
        );
        assert!(is_square_attacked(&state, sq(5, 5), Color::Black));
        assert!(!is_square_attacked(&state, sq(4, 4), Color::Black));
        assert!(!is_in_check(&state, Color::White));
    }

    #[test]
    fn test_is_in_check_without_royal() {
        let state = state_with(&[(4, 4, PieceForm::Rook, Color::White)], false);
        assert!(!is_in_check(&state, Color::Black));
    }

    #[test]
    fn test_hirate_has_no_check() {
        let state = GameState::new(false);
        assert!(!is_in_check(&state, Color::Black));
        assert!(!is_in_check(&state, Color::White));
        // 先手の歩の前の升には利きがある
        assert!(is_square_attacked(&state, sq(5, 4), Color::Black));
        assert!(!is_square_attacked(&state, sq(4, 4), Color::Black));
    }
}
