// 役の一覧 (名前, 説明, 副露時の翻, 門前時の翻, 役満)
// 翻がNoneの役はその状態では成立しない. 成立判定側で必ず除外すること
use crate::model::{Win, Yaakuman};

macro_rules! win {
    ($n: expr, $d: expr, $o: expr, $c: expr) => {
        Win {
            name: $n,
            desc: $d,
            open_han: $o,
            closed_han: $c,
            yaakuman: Yaakuman::None,
        }
    };
    ($n: expr, $d: expr, $o: expr, $c: expr, $y: expr) => {
        Win {
            name: $n,
            desc: $d,
            open_han: $o,
            closed_han: $c,
            yaakuman: $y,
        }
    };
}

// 特殊条件
pub static DOUBLE_RIICHI: Win = win!("Double Riichi", "Riichi declared on the first turn", None, Some(1));
pub static RIICHI: Win = win!("Riichi", "Declared riichi with a closed hand", None, Some(1));
pub static IPPATSU: Win = win!("Ippatsu", "Win within one go-around after declaring riichi", None, Some(1));
pub static MENZENCHIN_TSUMO: Win = win!("Menzenchin Tsumo", "Win by self-draw with a closed hand", None, Some(1));
pub static UNDER_THE_SEA: Win = win!("Under The Sea", "Win by self-draw on the last tile of the wall", Some(1), Some(1));
pub static UNDER_THE_RIVER: Win = win!("Under The River", "Win on the last discard of the hand", Some(1), Some(1));
pub static RINSHAN_KAIHOU: Win = win!("Rinshan Kaihou", "Win on the replacement tile drawn after a kan", Some(1), Some(1));
pub static ROBBING_A_KAN: Win = win!("Robbing A Kan", "Win on a tile another player added to a kan", Some(1), Some(1));

// 特殊形
pub static SEVEN_PAIRS: Win = win!("Seven Pairs", "Win with seven pairs", None, Some(2));
pub static THIRTEEN_ORPHANS: Win = win!("Thirteen Orphans", "One of each terminal and honor plus one duplicate", None, Some(0), Yaakuman::Single);
pub static PURE_THIRTEEN_ORPHANS: Win = win!("Pure Thirteen Orphans", "Thirteen orphans won on a thirteen-sided wait", None, Some(0), Yaakuman::Double);

// 通常形
pub static PINFU: Win = win!("Pinfu", "Closed hand of four sequences and a valueless pair won on a two-sided wait", None, Some(1));
pub static PURE_DOUBLE_SEQUENCE: Win = win!("Pure Double Sequence", "Two identical sequences in a closed hand", Some(1), Some(1));
pub static TWICE_PURE_DOUBLE_SEQUENCE: Win = win!("Twice Pure Double Sequence", "Two sets of two identical sequences in a closed hand", Some(3), Some(3));
pub static WHITE_DRAGON: Win = win!("White Dragon", "A triplet or kan of white dragons", Some(1), Some(1));
pub static GREEN_DRAGON: Win = win!("Green Dragon", "A triplet or kan of green dragons", Some(1), Some(1));
pub static RED_DRAGON: Win = win!("Red Dragon", "A triplet or kan of red dragons", Some(1), Some(1));
pub static PREVALENT_WIND: Win = win!("Prevalent Wind", "A triplet or kan of the prevalent wind", Some(1), Some(1));
pub static SEAT_WIND: Win = win!("Seat Wind", "A triplet or kan of the seat wind", Some(1), Some(1));
pub static LITTLE_THREE_DRAGONS: Win = win!("Little Three Dragons", "Two dragon triplets and a dragon pair", Some(2), Some(2));
pub static BIG_THREE_DRAGONS: Win = win!("Big Three Dragons", "Triplets of all three dragons", Some(0), Some(0), Yaakuman::Single);
pub static LITTLE_FOUR_WINDS: Win = win!("Little Four Winds", "Three wind triplets and a wind pair", Some(0), Some(0), Yaakuman::Single);
pub static BIG_FOUR_WINDS: Win = win!("Big Four Winds", "Triplets of all four winds", Some(0), Some(0), Yaakuman::Double);
pub static MIXED_TRIPLE_SEQUENCE: Win = win!("Mixed Triple Sequence", "The same sequence in all three suits", Some(1), Some(2));
pub static PURE_STRAIGHT: Win = win!("Pure Straight", "1-2-3, 4-5-6 and 7-8-9 in one suit", Some(1), Some(2));
pub static ALL_TERMINALS: Win = win!("All Terminals", "Every tile is a one or a nine", Some(0), Some(0), Yaakuman::Single);
pub static ALL_HONORS: Win = win!("All Honors", "Every tile is a wind or a dragon", Some(0), Some(0), Yaakuman::Single);
pub static ALL_SIMPLES: Win = win!("All Simples", "Every tile is a number from two to eight", Some(1), Some(1));
pub static FULL_OUTSIDE_HAND: Win = win!("Full Outside Hand", "Every group contains a terminal and there are no honors", Some(3), Some(2));
pub static HALF_OUTSIDE_HAND: Win = win!("Half Outside Hand", "Every group contains a terminal or an honor", Some(1), Some(2));
pub static ALL_TRIPLETS: Win = win!("All Triplets", "Four triplets or kans in an open hand", Some(2), None);
pub static THREE_CONCEALED_TRIPLETS: Win = win!("Three Concealed Triplets", "Three concealed triplets or kans", Some(2), Some(2));
pub static FOUR_CONCEALED_TRIPLETS: Win = win!("Four Concealed Triplets", "Four concealed triplets or kans", None, Some(0), Yaakuman::Single);
pub static SINGLE_WAIT_FOUR_CONCEALED_TRIPLETS: Win = win!("Single Wait Four Concealed Triplets", "Four concealed triplets won on the pair", None, Some(0), Yaakuman::Double);
pub static THREE_KANS: Win = win!("Three Kans", "Three kans", Some(2), Some(2));
pub static FOUR_KANS: Win = win!("Four Kans", "Four kans", Some(0), Some(0), Yaakuman::Single);
pub static TRIPLE_TRIPLETS: Win = win!("Triple Triplets", "Three triplets of consecutive number rank in any suits", Some(2), Some(2));
pub static ALL_GREEN: Win = win!("All Green", "Every tile is a green bamboo or a green dragon", Some(0), Some(0), Yaakuman::Single);
pub static TRUE_NINE_GATES: Win = win!("True Nine Gates", "Nine gates won on a nine-sided wait", None, Some(0), Yaakuman::Double);
pub static NINE_GATES: Win = win!("Nine Gates", "1112345678999 plus any tile of one suit in a closed hand", None, Some(0), Yaakuman::Single);
pub static FULL_FLUSH: Win = win!("Full Flush", "Every tile is from one suit", Some(5), Some(6));
pub static HALF_FLUSH: Win = win!("Half Flush", "Tiles from one suit plus honors", Some(2), Some(3));

// ドラ
pub static DORA_INDICATOR: Win = win!("Dora Indicator", "A tile following a dora indicator", Some(1), Some(1));
pub static RED_FIVE: Win = win!("Red Five", "A red five", Some(1), Some(1));

pub static WIN_CATALOG: &[&Win] = &[
    &DOUBLE_RIICHI,
    &RIICHI,
    &IPPATSU,
    &MENZENCHIN_TSUMO,
    &UNDER_THE_SEA,
    &UNDER_THE_RIVER,
    &RINSHAN_KAIHOU,
    &ROBBING_A_KAN,
    &SEVEN_PAIRS,
    &THIRTEEN_ORPHANS,
    &PURE_THIRTEEN_ORPHANS,
    &PINFU,
    &PURE_DOUBLE_SEQUENCE,
    &TWICE_PURE_DOUBLE_SEQUENCE,
    &WHITE_DRAGON,
    &GREEN_DRAGON,
    &RED_DRAGON,
    &PREVALENT_WIND,
    &SEAT_WIND,
    &LITTLE_THREE_DRAGONS,
    &BIG_THREE_DRAGONS,
    &LITTLE_FOUR_WINDS,
    &BIG_FOUR_WINDS,
    &MIXED_TRIPLE_SEQUENCE,
    &PURE_STRAIGHT,
    &ALL_TERMINALS,
    &ALL_HONORS,
    &ALL_SIMPLES,
    &FULL_OUTSIDE_HAND,
    &HALF_OUTSIDE_HAND,
    &ALL_TRIPLETS,
    &THREE_CONCEALED_TRIPLETS,
    &FOUR_CONCEALED_TRIPLETS,
    &SINGLE_WAIT_FOUR_CONCEALED_TRIPLETS,
    &THREE_KANS,
    &FOUR_KANS,
    &TRIPLE_TRIPLETS,
    &ALL_GREEN,
    &TRUE_NINE_GATES,
    &NINE_GATES,
    &FULL_FLUSH,
    &HALF_FLUSH,
    &DORA_INDICATOR,
    &RED_FIVE,
];

pub struct WinCatalog;

impl WinCatalog {
    #[inline]
    pub fn all() -> &'static [&'static Win] {
        WIN_CATALOG
    }

    pub fn find(name: &str) -> Option<&'static Win> {
        WIN_CATALOG.iter().copied().find(|w| w.name == name)
    }
}

#[test]
fn test_catalog_consistency() {
    for w in WinCatalog::all() {
        // 最低どちらかの状態で成立する
        assert!(w.open_han.is_some() || w.closed_han.is_some(), "{:?}", w);
        // 役満以外は翻数が1以上
        if !w.is_yaakuman() {
            for h in [w.open_han, w.closed_han].into_iter().flatten() {
                assert!(h >= 1, "{:?}", w);
            }
        }
    }

    let mut names: Vec<&str> = WIN_CATALOG.iter().map(|w| w.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), WIN_CATALOG.len());

    assert_eq!(WinCatalog::find("Pure Thirteen Orphans").map(|w| w.yaakuman), Some(Yaakuman::Double));
    assert!(WinCatalog::find("Tenhou").is_none());
}

#[test]
fn test_catalog_han_values() {
    assert_eq!((DOUBLE_RIICHI.open_han, DOUBLE_RIICHI.closed_han), (None, Some(1)));
    assert_eq!((FULL_OUTSIDE_HAND.open_han, FULL_OUTSIDE_HAND.closed_han), (Some(3), Some(2)));
    // 一盃口系は副露時の翻も持つが, 成立判定は門前のみ
    assert_eq!(PURE_DOUBLE_SEQUENCE.han(false), Some(1));
    assert_eq!(TWICE_PURE_DOUBLE_SEQUENCE.han(false), Some(3));
    assert_eq!(TWICE_PURE_DOUBLE_SEQUENCE.han(true), Some(3));
    assert_eq!(ALL_TRIPLETS.han(true), None);
}
