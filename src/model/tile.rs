use std::collections::HashMap;

use serde::{de, ser};

use super::*;
use crate::util::misc::vec_to_string;

// 牌
// 裏向きの牌(Back)は暗槓の中でのみ一度だけ具体的な牌に確定できる
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    suit: Suit,
    rank: Rank,
    red: bool,       // 赤5
    called: bool,    // 他家から鳴いた牌
    face_down: bool, // 裏向き (確定後もtrueのまま)
}

impl Tile {
    pub fn new(suit: Suit, rank: Rank, red: bool) -> EvalResult<Self> {
        let t = Self {
            suit,
            rank,
            red,
            called: false,
            face_down: suit == Suit::Back,
        };
        t.validate()?;
        Ok(t)
    }

    // 画像認識側の数値コードから生成
    pub fn from_codes(suit: u8, rank: u8, red: bool) -> EvalResult<Self> {
        match (Suit::from_code(suit), Rank::from_code(rank)) {
            (Some(s), Some(r)) => Self::new(s, r, red),
            _ => Err(EvalError::tile(format!(
                "Suit or rank is NaN: suit code {}, rank code {}",
                suit, rank
            ))),
        }
    }

    pub fn back() -> Self {
        Self {
            suit: Suit::Back,
            rank: Rank::Back,
            red: false,
            called: false,
            face_down: true,
        }
    }

    // 鳴いた牌として扱う
    pub fn called(mut self) -> Self {
        self.called = true;
        self
    }

    fn validate(&self) -> EvalResult<()> {
        if (self.suit == Suit::Back) != (self.rank == Rank::Back) {
            Err(EvalError::tile(format!(
                "Suit or rank is Back, but not both: {}",
                self.describe()
            )))?;
        }
        if self.suit == Suit::Honor && !self.rank.is_honor() {
            Err(EvalError::tile(format!(
                "Honor suit but rank is not a dragon or wind: {}",
                self.describe()
            )))?;
        }
        if self.suit != Suit::Honor && self.rank.is_honor() {
            Err(EvalError::tile(format!(
                "Non-honor suit but rank is a dragon or wind: {}",
                self.describe()
            )))?;
        }
        if self.red && self.rank != Rank::Five {
            Err(EvalError::tile(format!(
                "Rank is not 5 but isRed is true: {}",
                self.describe()
            )))?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{:?} of {:?}", self.suit, self.rank)
    }

    // 裏向きの牌を確定させた新しい牌を返却 (暗槓の分類からのみ呼び出す)
    pub(crate) fn resolve(&self, suit: Suit, rank: Rank, red: bool) -> EvalResult<Self> {
        if self.face_down && !self.is_back() {
            Err(EvalError::tile(format!("Tile is already resolved: {}", self)))?;
        }
        if !self.is_back() {
            Err(EvalError::tile(format!("Tile is not a back: {}", self)))?;
        }
        if self.called {
            Err(EvalError::tile("A called tile cannot be resolved"))?;
        }
        if suit == Suit::Back {
            Err(EvalError::tile("Cannot resolve a tile to a back"))?;
        }
        let mut t = Self::new(suit, rank, red)?;
        t.face_down = true;
        Ok(t)
    }

    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.red
    }

    #[inline]
    pub fn is_called(&self) -> bool {
        self.called
    }

    #[inline]
    pub fn is_face_down(&self) -> bool {
        self.face_down
    }

    // 未確定の裏向き牌
    #[inline]
    pub fn is_back(&self) -> bool {
        self.suit == Suit::Back
    }

    #[inline]
    pub fn is_honor(&self) -> bool {
        self.suit == Suit::Honor
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.suit.is_number() && self.rank.is_terminal()
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.is_honor() || self.is_terminal()
    }

    #[inline]
    pub fn is_simple(&self) -> bool {
        self.suit.is_number() && self.rank.is_simple()
    }

    // 緑一色の構成牌
    pub fn is_green(&self) -> bool {
        use Rank::*;
        match self.suit {
            Suit::Bamboo => matches!(self.rank, Two | Three | Four | Six | Eight),
            Suit::Honor => self.rank == GreenDragon,
            _ => false,
        }
    }

    // 種別と数字が一致 (赤5は区別しない). 裏向き牌は何とも一致しない
    #[inline]
    pub fn soft_equals(&self, other: &Tile) -> bool {
        self.suit == other.suit && self.rank == other.rank && !self.is_back()
    }

    pub fn parse(s: &str) -> EvalResult<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            Err(EvalError::tile(format!("Invalid tile symbol: '{}'", s)))?;
        }

        let honor = match (chars[0], chars[1]) {
            ('x', 'x') => return Ok(Self::back()),
            ('g', 'd') => Some(Rank::GreenDragon),
            ('r', 'd') => Some(Rank::RedDragon),
            ('w', 'd') => Some(Rank::WhiteDragon),
            ('e', 'w') => Some(Rank::EastWind),
            ('s', 'w') => Some(Rank::SouthWind),
            ('w', 'w') => Some(Rank::WestWind),
            ('n', 'w') => Some(Rank::NorthWind),
            _ => None,
        };
        if let Some(r) = honor {
            return Self::new(Suit::Honor, r, false);
        }

        let (rank, red) = match chars[0] {
            '$' => (Rank::Five, true),
            c => match c.to_digit(10).and_then(|n| Rank::from_code(n as u8)) {
                Some(r) if r.is_number() => (r, false),
                _ => Err(EvalError::tile(format!("Invalid rank: '{}'", s)))?,
            },
        };
        let suit = match chars[1] {
            'b' => Suit::Bamboo,
            'd' => Suit::Dot,
            'n' => Suit::Character,
            _ => Err(EvalError::tile(format!("Invalid suit: '{}'", s)))?,
        };
        Self::new(suit, rank, red)
    }

    // 牌の組み合わせの判定 ======================================================

    pub fn is_pair(tiles: &[Tile]) -> bool {
        tiles.len() == 2 && tiles[0].soft_equals(&tiles[1])
    }

    pub fn is_triplet(tiles: &[Tile]) -> bool {
        tiles.len() == 3 && tiles[0].soft_equals(&tiles[1]) && tiles[1].soft_equals(&tiles[2])
    }

    // 順子 (並び順は問わない)
    pub fn is_sequence(tiles: &[Tile]) -> bool {
        if tiles.len() != 3 {
            return false;
        }
        let suit = tiles[0].suit;
        if !suit.is_number() || tiles.iter().any(|t| t.suit != suit) {
            return false;
        }
        let mut ns: Vec<u8> = tiles.iter().map(|t| t.rank.code()).collect();
        ns.sort_unstable();
        ns[0] + 1 == ns[1] && ns[1] + 1 == ns[2]
    }

    // 槓子 (4枚同じ牌, または裏向き2枚+同じ牌2枚)
    pub fn is_kan(tiles: &[Tile]) -> bool {
        if tiles.len() != 4 {
            return false;
        }
        if tiles.windows(2).all(|w| w[0].soft_equals(&w[1])) {
            return true;
        }
        let non_backs: Vec<Tile> = tiles.iter().filter(|t| !t.is_back()).copied().collect();
        Self::is_pair(&non_backs)
    }

    pub fn is_meld(tiles: &[Tile]) -> bool {
        match tiles.len() {
            3 => Self::is_triplet(tiles) || Self::is_sequence(tiles),
            4 => Self::is_kan(tiles),
            _ => false,
        }
    }
}

// 同じ牌が5枚以上含まれているかどうか
pub fn has_quintuplet(tiles: &[Tile]) -> bool {
    let mut counts: HashMap<(Suit, Rank), usize> = HashMap::new();
    for t in tiles.iter().filter(|t| !t.is_back()) {
        let c = counts.entry((t.suit, t.rank)).or_insert(0);
        *c += 1;
        if *c > TILE {
            return true;
        }
    }
    false
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    vec_to_string(tiles)
}

pub fn tiles_from_string(exp: &str) -> EvalResult<Vec<Tile>> {
    let chars: Vec<char> = exp.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() % 2 != 0 {
        Err(EvalError::tile(format!("Odd number of tile symbol chars: '{}'", exp)))?;
    }
    chars
        .chunks(2)
        .map(|c| Tile::parse(&c.iter().collect::<String>()))
        .collect()
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Rank::*;
        let s = match self.rank {
            GreenDragon => "gd",
            RedDragon => "rd",
            WhiteDragon => "wd",
            EastWind => "ew",
            SouthWind => "sw",
            WestWind => "ww",
            NorthWind => "nw",
            Back => "xx",
            r => {
                let n = if self.red {
                    '$'
                } else {
                    char::from(b'0' + r.code())
                };
                return write!(f, "{}{}", n, self.suit.to_char());
            }
        };
        write!(f, "{}", s)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::parse(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// 牌選択UIの入力 (未設定の項目はNone)
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize)]
pub struct TileBuilder {
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
    pub red: Option<bool>,
}

impl TileBuilder {
    pub fn build(&self) -> EvalResult<Tile> {
        let suit = self.suit.ok_or_else(|| {
            EvalError::tile("Suit is undefined. Make sure that all tiles have been set!")
        })?;
        let rank = self.rank.ok_or_else(|| {
            EvalError::tile("Rank is undefined. Make sure that all tiles have been set!")
        })?;
        let red = self.red.unwrap_or(false) && rank == Rank::Five;
        Tile::new(suit, rank, red)
    }
}

#[test]
fn test_tile_invariants() {
    use Rank::*;
    assert!(Tile::new(Suit::Bamboo, One, false).is_ok());
    assert!(Tile::new(Suit::Back, Back, false).is_ok());
    assert!(Tile::new(Suit::Back, One, false).is_err());
    assert!(Tile::new(Suit::Dot, Back, false).is_err());
    assert!(Tile::new(Suit::Honor, Three, false).is_err());
    assert!(Tile::new(Suit::Dot, EastWind, false).is_err());
    assert!(Tile::new(Suit::Dot, Four, true).is_err());
    assert!(Tile::new(Suit::Dot, Five, true).is_ok());
    assert!(Tile::from_codes(5, 1, false).is_err());
    assert!(Tile::from_codes(0, 0, false).is_err());
    assert_eq!(
        Tile::from_codes(3, 13, false).unwrap(),
        Tile::parse("ew").unwrap()
    );
}

#[test]
fn test_parse_and_print() {
    let tiles = tiles_from_string("1b $d 9n gd rd wd ew sw ww nw xx").unwrap();
    assert_eq!(
        tiles_to_string(&tiles),
        "[1b, $d, 9n, gd, rd, wd, ew, sw, ww, nw, xx]"
    );
    assert!(tiles[1].is_red());
    assert!(tiles[10].is_back() && tiles[10].is_face_down());
    assert!(Tile::parse("0b").is_err());
    assert!(Tile::parse("1h").is_err());
    assert!(Tile::parse("1").is_err());
    assert!(tiles_from_string("1b2").is_err());
}

#[test]
fn test_soft_equals() {
    let a = Tile::parse("5d").unwrap();
    let b = Tile::parse("$d").unwrap();
    assert!(a.soft_equals(&b));
    assert!(!a.soft_equals(&Tile::parse("5b").unwrap()));
    assert!(!Tile::back().soft_equals(&Tile::back()));
}

#[test]
fn test_resolve() {
    let b = Tile::back();
    let r = b.resolve(Suit::Dot, Rank::Three, false).unwrap();
    assert_eq!(r.to_string(), "3d");
    assert!(r.is_face_down());
    // 一度確定した牌は再確定できない
    assert!(r.resolve(Suit::Dot, Rank::Four, false).is_err());
    assert!(b.called().resolve(Suit::Dot, Rank::Three, false).is_err());
    assert!(Tile::parse("3d").unwrap().resolve(Suit::Dot, Rank::Three, false).is_err());
    assert!(b.resolve(Suit::Dot, Rank::Three, true).is_err());
}

#[test]
fn test_predicates() {
    let t = |s| tiles_from_string(s).unwrap();
    assert!(Tile::is_pair(&t("ewew")));
    assert!(Tile::is_triplet(&t("7n7n7n")));
    assert!(Tile::is_sequence(&t("3b1b2b")));
    assert!(!Tile::is_sequence(&t("1b2b4b")));
    assert!(!Tile::is_sequence(&t("1b2d3b")));
    assert!(!Tile::is_sequence(&t("ewswww")));
    assert!(Tile::is_kan(&t("xx6d6dxx")));
    assert!(Tile::is_kan(&t("gdgdgdgd")));
    assert!(!Tile::is_kan(&t("xxxx6d6d6d")[1..]));
    assert!(Tile::is_green(&Tile::parse("gd").unwrap()));
    assert!(!Tile::is_green(&Tile::parse("5b").unwrap()));
    assert!(has_quintuplet(&t("1b1b1b1b$b1b")));
    assert!(!has_quintuplet(&t("5b5b5b$b")));
}

#[test]
fn test_builder() {
    let b = TileBuilder {
        suit: Some(Suit::Bamboo),
        rank: Some(Rank::Four),
        red: Some(true),
    };
    // 5以外の赤は落とす
    assert!(!b.build().unwrap().is_red());
    assert!(TileBuilder::default().build().is_err());
}

#[test]
fn test_serde() {
    let tiles = tiles_from_string("$b ew xx").unwrap();
    let s = serde_json::to_string(&tiles).unwrap();
    assert_eq!(s, r#"["$b","ew","xx"]"#);
    let tiles2: Vec<Tile> = serde_json::from_str(&s).unwrap();
    assert_eq!(tiles, tiles2);
    assert!(serde_json::from_str::<Tile>(r#""zz""#).is_err());
}
