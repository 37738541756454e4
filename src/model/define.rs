use serde::{Deserialize, Serialize};

// 同種の牌の数
pub const TILE: usize = 4;
// 和了形の牌の数 (槓子は3枚として数える)
pub const HAND_SIZE: usize = 14;

// 牌の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Bamboo,    // 索子
    Dot,       // 筒子
    Character, // 萬子
    Honor,     // 字牌
    Back,      // 裏向き (未確定)
}

impl Suit {
    // 画像認識側の数値コード. 5はNaN
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Bamboo),
            1 => Some(Self::Dot),
            2 => Some(Self::Character),
            3 => Some(Self::Honor),
            4 => Some(Self::Back),
            _ => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Bamboo | Self::Dot | Self::Character)
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Bamboo => 'b',
            Self::Dot => 'd',
            Self::Character => 'n',
            Self::Honor => 'h',
            Self::Back => 'x',
        }
    }
}

// 牌の数字部分 (字牌は風牌, 三元牌)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    One = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    GreenDragon,
    RedDragon,
    WhiteDragon,
    EastWind,
    SouthWind,
    WestWind,
    NorthWind,
    Back,
}

use Rank::*;

pub const NUMBERS: [Rank; 9] = [One, Two, Three, Four, Five, Six, Seven, Eight, Nine];
pub const DRAGONS: [Rank; 3] = [GreenDragon, RedDragon, WhiteDragon];
pub const WINDS: [Rank; 4] = [EastWind, SouthWind, WestWind, NorthWind];

impl Rank {
    // 画像認識側の数値コード. 0はNaN
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=9 => Some(NUMBERS[code as usize - 1]),
            10..=12 => Some(DRAGONS[code as usize - 10]),
            13..=16 => Some(WINDS[code as usize - 13]),
            17 => Some(Back),
            _ => None,
        }
    }

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    // 数牌の数字 (1~9)
    #[inline]
    pub fn number(&self) -> Option<u8> {
        if self.is_number() {
            Some(self.code())
        } else {
            None
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        One <= *self && *self <= Nine
    }

    #[inline]
    pub fn is_honor(&self) -> bool {
        GreenDragon <= *self && *self <= NorthWind
    }

    #[inline]
    pub fn is_wind(&self) -> bool {
        EastWind <= *self && *self <= NorthWind
    }

    #[inline]
    pub fn is_dragon(&self) -> bool {
        GreenDragon <= *self && *self <= WhiteDragon
    }

    // 1,9
    #[inline]
    pub fn is_terminal(&self) -> bool {
        *self == One || *self == Nine
    }

    // 2~8
    #[inline]
    pub fn is_simple(&self) -> bool {
        Two <= *self && *self <= Eight
    }

    // ドラ表示牌の次の牌. 種別の中で循環する
    // 数牌: 1→2→...→9→1, 風牌: 東→南→西→北→東, 三元牌: 發→中→白→發
    pub fn cyclic_next(&self) -> Option<Self> {
        if let Some(n) = self.number() {
            Some(NUMBERS[n as usize % 9])
        } else if let Some(i) = WINDS.iter().position(|r| r == self) {
            Some(WINDS[(i + 1) % WINDS.len()])
        } else if let Some(i) = DRAGONS.iter().position(|r| r == self) {
            Some(DRAGONS[(i + 1) % DRAGONS.len()])
        } else {
            None
        }
    }
}

#[test]
fn test_cyclic_next() {
    assert_eq!(One.cyclic_next(), Some(Two));
    assert_eq!(Nine.cyclic_next(), Some(One));
    assert_eq!(NorthWind.cyclic_next(), Some(EastWind));
    assert_eq!(SouthWind.cyclic_next(), Some(WestWind));
    assert_eq!(WhiteDragon.cyclic_next(), Some(GreenDragon));
    assert_eq!(GreenDragon.cyclic_next(), Some(RedDragon));
    assert_eq!(Back.cyclic_next(), None);
}

#[test]
fn test_codes() {
    assert_eq!(Rank::from_code(0), None);
    assert_eq!(Rank::from_code(5), Some(Five));
    assert_eq!(Rank::from_code(13), Some(EastWind));
    assert_eq!(Rank::from_code(17), Some(Back));
    assert_eq!(Rank::from_code(18), None);
    assert_eq!(Suit::from_code(5), None);
    assert_eq!(Suit::from_code(2), Some(Suit::Character));
    assert_eq!(Five.code(), 5);
    assert!(EastWind.is_wind() && EastWind.is_honor() && !EastWind.is_dragon());
}
