//! 駒（Piece）

use super::{Color, PieceForm, PieceType};

/// 盤上の駒（形態と持ち主）
///
/// 駒に永続的な ID はなく、盤上の升で参照する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub form: PieceForm,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(form: PieceForm, color: Color) -> Piece {
        Piece { form, color }
    }

    /// 生駒を作る
    #[inline]
    pub const fn make(color: Color, pt: PieceType) -> Piece {
        Piece::new(PieceForm::from_type(pt), color)
    }

    /// 王将（玉または魔王）かどうか
    #[inline]
    pub const fn is_royal(self) -> bool {
        self.form.is_royal()
    }

    /// SFEN の駒表記（先手は大文字、後手は小文字、成駒・魔王は `+` 付き）
    pub fn to_sfen(self) -> String {
        let c = self.form.base().to_char();
        let c = match self.color {
            Color::Black => c,
            Color::White => c.to_ascii_lowercase(),
        };
        if self.form.is_promoted() || self.form.is_maou() {
            format!("+{c}")
        } else {
            c.to_string()
        }
    }
}
