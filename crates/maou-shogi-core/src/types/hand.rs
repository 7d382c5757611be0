//! 手駒（Hand）

use super::PieceType;

/// 手駒（玉以外の7種の枚数）
///
/// 並び順は `PieceType::HAND_PIECES`（飛角金銀桂香歩）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand([u8; PieceType::HAND_NUM]);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand([0; PieceType::HAND_NUM]);

    /// 指定駒種の枚数を取得（玉は常に0）
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        match pt.hand_index() {
            Some(i) => self.0[i] as u32,
            None => 0,
        }
    }

    /// 指定駒種を持っているか
    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    /// 1枚追加（玉は手駒にならないので無視する）
    #[inline]
    pub fn add(self, pt: PieceType) -> Hand {
        let mut next = self;
        if let Some(i) = pt.hand_index() {
            next.0[i] = next.0[i].saturating_add(1);
        }
        next
    }

    /// 1枚減らす
    #[inline]
    pub fn sub(self, pt: PieceType) -> Hand {
        debug_assert!(self.has(pt), "no {pt:?} in hand");
        let mut next = self;
        if let Some(i) = pt.hand_index() {
            next.0[i] = next.0[i].saturating_sub(1);
        }
        next
    }

    /// 指定枚数をセット
    #[inline]
    pub fn set(self, pt: PieceType, count: u8) -> Hand {
        let mut next = self;
        if let Some(i) = pt.hand_index() {
            next.0[i] = count;
        }
        next
    }

    /// 空かどうか
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// 持っている駒種と枚数を列挙
    pub fn iter(self) -> impl Iterator<Item = (PieceType, u32)> {
        PieceType::HAND_PIECES
            .into_iter()
            .map(move |pt| (pt, self.count(pt)))
            .filter(|&(_, n)| n > 0)
    }
}
