use serde::Serialize;

use crate::error;
use crate::model::{Rank, Win, Yaakuman};
use crate::util::misc::round_up_100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub yaakuman: Yaakuman,
    pub han: u32,
    pub fu: u32, // 満貫以上, 役満では0
    pub base_points: u32,
    pub title: String,
    pub settlement: String,
}

// 翻数の合計
pub fn calc_han(wins: &[&Win], is_closed: bool) -> u32 {
    let mut han = 0;
    for w in wins {
        match w.han(is_closed) {
            Some(h) => han += h,
            None => error!(
                "{} has no han for a {} hand",
                w.name,
                if is_closed { "closed" } else { "open" }
            ),
        }
    }
    han
}

pub fn yaakuman_tier(wins: &[&Win]) -> Yaakuman {
    wins.iter().map(|w| w.yaakuman).max().unwrap_or_default()
}

// (基本点, タイトル)を返却
pub fn calc_base_points(han: u32, fu: u32, yaakuman: Yaakuman, fu_title: &str) -> (u32, String) {
    let (base, title) = match (yaakuman, han) {
        (Yaakuman::Double, _) => (16000, "Double Yaakuman"),
        (Yaakuman::Single, _) => (8000, "Yaakuman"),
        (Yaakuman::None, 0..=4) => {
            let base = fu * 2_u32.pow(han + 2);
            return if base > 2000 {
                (2000, format!("Mangan!: {}", fu_title))
            } else {
                (base, fu_title.to_string())
            };
        }
        (Yaakuman::None, 5) => (2000, "Mangan"),
        (Yaakuman::None, 6..=7) => (3000, "Haneman"),
        (Yaakuman::None, 8..=10) => (4000, "Baiman"),
        (Yaakuman::None, 11..=12) => (6000, "Sanbaiman"),
        (Yaakuman::None, _) => (8000, "Kazoe Yaakuman"), // 数え役満
    };
    (base, title.to_string())
}

// 支払いの説明 (親: 自風 == 場風)
// 合計は各支払いの和ではなく, 基本点からまとめて切り上げる
pub fn settlement(base: u32, tsumo: bool, seat_wind: Rank, prevalent_wind: Rank) -> String {
    let is_dealer = seat_wind == prevalent_wind;
    if tsumo {
        if is_dealer {
            let each = round_up_100(base * 2);
            let total = round_up_100(base * 2 * 3);
            format!("Each player pays {} for {} in total.", each, total)
        } else {
            let dealer = round_up_100(base * 2);
            let other = round_up_100(base);
            let total = round_up_100(base * 2 * 2);
            format!(
                "The dealer ({:?}) pays {} and other players pay {} for {} in total.",
                prevalent_wind,
                dealer,
                other,
                total
            )
        }
    } else if is_dealer {
        format!("Losing player pays {}.", round_up_100(base * 6))
    } else {
        format!("Losing player pays {}.", round_up_100(base * 4))
    }
}

// 符は満貫未満の場合のみ計算する
pub fn calc_score<F>(
    wins: &[&Win],
    is_closed: bool,
    tsumo: bool,
    seat_wind: Rank,
    prevalent_wind: Rank,
    calc_fu: F,
) -> Score
where
    F: FnOnce() -> (u32, Vec<String>),
{
    let yaakuman = yaakuman_tier(wins);
    let (han, fu, fu_title) = if yaakuman != Yaakuman::None {
        (0, 0, String::new())
    } else {
        let han = calc_han(wins, is_closed);
        if han >= 5 {
            (han, 0, String::new())
        } else {
            let (fu, titles) = calc_fu();
            (han, fu, titles.join(", "))
        }
    };

    let (base_points, title) = calc_base_points(han, fu, yaakuman, &fu_title);
    Score {
        yaakuman,
        han,
        fu,
        base_points,
        title,
        settlement: settlement(base_points, tsumo, seat_wind, prevalent_wind),
    }
}

#[test]
fn test_base_points() {
    assert_eq!(calc_base_points(3, 30, Yaakuman::None, "x"), (960, "x".to_string()));
    assert_eq!(
        calc_base_points(4, 40, Yaakuman::None, "x"),
        (2000, "Mangan!: x".to_string())
    );
    assert_eq!(calc_base_points(4, 30, Yaakuman::None, "x").0, 1920);
    assert_eq!(calc_base_points(5, 0, Yaakuman::None, "").1, "Mangan");
    assert_eq!(calc_base_points(7, 0, Yaakuman::None, "").0, 3000);
    assert_eq!(calc_base_points(10, 0, Yaakuman::None, "").0, 4000);
    assert_eq!(calc_base_points(12, 0, Yaakuman::None, "").0, 6000);
    assert_eq!(
        calc_base_points(20, 0, Yaakuman::None, ""),
        (8000, "Kazoe Yaakuman".to_string())
    );
}

#[test]
fn test_yaakuman_overrides() {
    use crate::hand::catalog::*;

    let wins = [&RIICHI, &BIG_THREE_DRAGONS, &DORA_INDICATOR];
    let s = calc_score(&wins, true, false, Rank::SouthWind, Rank::EastWind, || {
        panic!("fu is not needed")
    });
    assert_eq!(s.base_points, 8000);
    assert_eq!(s.title, "Yaakuman");

    let wins = [&BIG_FOUR_WINDS, &BIG_THREE_DRAGONS];
    let s = calc_score(&wins, false, true, Rank::EastWind, Rank::EastWind, || {
        panic!("fu is not needed")
    });
    assert_eq!(s.base_points, 16000);
    assert_eq!(s.title, "Double Yaakuman");
}

#[test]
fn test_settlement() {
    use Rank::*;
    assert_eq!(
        settlement(2000, true, EastWind, EastWind),
        "Each player pays 4000 for 12000 in total."
    );
    assert_eq!(
        settlement(960, true, EastWind, EastWind),
        "Each player pays 2000 for 5800 in total."
    );
    assert_eq!(
        settlement(960, true, WestWind, EastWind),
        "The dealer (EastWind) pays 2000 and other players pay 1000 for 3900 in total."
    );
    assert_eq!(
        settlement(1920, true, SouthWind, EastWind),
        "The dealer (EastWind) pays 3900 and other players pay 2000 for 7700 in total."
    );
    assert_eq!(settlement(480, false, SouthWind, EastWind), "Losing player pays 2000.");
    assert_eq!(settlement(480, false, EastWind, EastWind), "Losing player pays 2900.");
}

// cargo test print_points_table -- --nocapture
#[test]
fn print_points_table() {
    let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    println!("点数計算表 (子のロン) ======================================");
    for fu in fu_list {
        print!("[{fu:3}符] ");
        for han in 1..=4 {
            let (base, _) = calc_base_points(han, fu, Yaakuman::None, "");
            print!("{han}飜:{:5} ", round_up_100(base * 4));
        }
        println!();
    }
    for han in 5..=13 {
        let (base, title) = calc_base_points(han, 20, Yaakuman::None, "");
        println!("{han:2}飜:{:5} {title}", round_up_100(base * 4));
    }
}
