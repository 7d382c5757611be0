//! 駒種（PieceType）と駒の形態（PieceForm）

use serde::{Deserialize, Serialize};

/// 駒種（先後・成りの区別なし）
///
/// 手駒・駒打ちの単位であり、JSON では1文字コード（`"K"`, `"R"`, ...）で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    #[serde(rename = "K")]
    King = 0,
    #[serde(rename = "R")]
    Rook = 1,
    #[serde(rename = "B")]
    Bishop = 2,
    #[serde(rename = "G")]
    Gold = 3,
    #[serde(rename = "S")]
    Silver = 4,
    #[serde(rename = "N")]
    Knight = 5,
    #[serde(rename = "L")]
    Lance = 6,
    #[serde(rename = "P")]
    Pawn = 7,
}

impl PieceType {
    /// 駒種の数
    pub const NUM: usize = 8;

    /// 手駒になる駒種の数
    pub const HAND_NUM: usize = 7;

    /// 全駒種
    pub const ALL: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 手駒になる駒種一覧（手駒配列の並び順）
    pub const HAND_PIECES: [PieceType; 7] = [
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 成れるかどうか（玉の魔王化は成りとは別扱い）
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Rook
                | PieceType::Bishop
                | PieceType::Silver
                | PieceType::Knight
                | PieceType::Lance
                | PieceType::Pawn
        )
    }

    /// 玉かどうか
    #[inline]
    pub const fn is_royal(self) -> bool {
        matches!(self, PieceType::King)
    }

    /// 手駒配列のインデックス（玉は手駒にならないので None）
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::King => None,
            _ => Some(self as usize - 1),
        }
    }

    /// SFEN の駒文字（先手側の大文字）
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Gold => 'G',
            PieceType::Silver => 'S',
            PieceType::Knight => 'N',
            PieceType::Lance => 'L',
            PieceType::Pawn => 'P',
        }
    }

    /// 駒文字から変換（大文字・小文字とも受け付ける）
    pub const fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'G' => Some(PieceType::Gold),
            'S' => Some(PieceType::Silver),
            'N' => Some(PieceType::Knight),
            'L' => Some(PieceType::Lance),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// 盤上の駒の形態（動き方の種別）
///
/// 生駒8種・成駒6種・魔王の15通り。成りと魔王化は同じ値の別バリアントなので、
/// 「成っていて魔王でもある」駒や「成った金」は表現できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceForm {
    // 生駒
    King = 0,
    Rook = 1,
    Bishop = 2,
    Gold = 3,
    Silver = 4,
    Knight = 5,
    Lance = 6,
    Pawn = 7,
    // 成駒
    Dragon = 8, // 成飛
    Horse = 9,  // 成角
    ProSilver = 10,
    ProKnight = 11,
    ProLance = 12,
    ProPawn = 13,
    // 玉の成り
    Maou = 14,
}

impl PieceForm {
    /// 生駒の形態
    #[inline]
    pub const fn from_type(pt: PieceType) -> PieceForm {
        match pt {
            PieceType::King => PieceForm::King,
            PieceType::Rook => PieceForm::Rook,
            PieceType::Bishop => PieceForm::Bishop,
            PieceType::Gold => PieceForm::Gold,
            PieceType::Silver => PieceForm::Silver,
            PieceType::Knight => PieceForm::Knight,
            PieceType::Lance => PieceForm::Lance,
            PieceType::Pawn => PieceForm::Pawn,
        }
    }

    /// 元の駒種（成駒は生駒へ、魔王は玉へ戻す）
    #[inline]
    pub const fn base(self) -> PieceType {
        match self {
            PieceForm::King | PieceForm::Maou => PieceType::King,
            PieceForm::Rook | PieceForm::Dragon => PieceType::Rook,
            PieceForm::Bishop | PieceForm::Horse => PieceType::Bishop,
            PieceForm::Gold => PieceType::Gold,
            PieceForm::Silver | PieceForm::ProSilver => PieceType::Silver,
            PieceForm::Knight | PieceForm::ProKnight => PieceType::Knight,
            PieceForm::Lance | PieceForm::ProLance => PieceType::Lance,
            PieceForm::Pawn | PieceForm::ProPawn => PieceType::Pawn,
        }
    }

    /// 成った形態を返す（成れない場合は None）
    #[inline]
    pub const fn promote(self) -> Option<PieceForm> {
        match self {
            PieceForm::Rook => Some(PieceForm::Dragon),
            PieceForm::Bishop => Some(PieceForm::Horse),
            PieceForm::Silver => Some(PieceForm::ProSilver),
            PieceForm::Knight => Some(PieceForm::ProKnight),
            PieceForm::Lance => Some(PieceForm::ProLance),
            PieceForm::Pawn => Some(PieceForm::ProPawn),
            _ => None,
        }
    }

    /// 成駒かどうか（魔王は含まない）
    #[inline]
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            PieceForm::Dragon
                | PieceForm::Horse
                | PieceForm::ProSilver
                | PieceForm::ProKnight
                | PieceForm::ProLance
                | PieceForm::ProPawn
        )
    }

    /// 魔王かどうか
    #[inline]
    pub const fn is_maou(self) -> bool {
        matches!(self, PieceForm::Maou)
    }

    /// 王将（玉または魔王）かどうか
    #[inline]
    pub const fn is_royal(self) -> bool {
        matches!(self, PieceForm::King | PieceForm::Maou)
    }

    /// これから成る余地があるか（生の成れる駒）
    #[inline]
    pub const fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// 金と同じ動きをするか（金・成銀・成桂・成香・と金）
    #[inline]
    pub const fn moves_like_gold(self) -> bool {
        matches!(
            self,
            PieceForm::Gold
                | PieceForm::ProSilver
                | PieceForm::ProKnight
                | PieceForm::ProLance
                | PieceForm::ProPawn
        )
    }
}
