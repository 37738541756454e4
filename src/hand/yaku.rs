use std::collections::HashSet;
use std::fmt;

use crate::model::*;

use super::board::Situation;
use super::catalog::*;
use super::grouper::{Grouping, HandShape};

use Rank::*;

#[derive(Debug)]
pub struct WinContext<'a> {
    groups: &'a [TileGroup],        // 副露を含むすべての面子
    revealed: &'a [TileGroup],      // 副露 (暗槓を含む)
    closed_groups: &'a [TileGroup], // 手牌 + 和了牌の面子
    shape: HandShape,               // 和了形
    hidden: &'a [Tile],             // 和了牌を含まない手牌 九蓮宝燈の判定に使用
    winning: Tile,                  // 和了牌
    dora: &'a [Tile],               // ドラ表示牌
    sit: &'a Situation,             // 場風, 自風, 和了の状況
    is_closed: bool,                // 門前
    pair: Option<Tile>,             // 雀頭の牌 (通常形のみ)
    counts: Counts,                 // 面子の種類のカウント
}

#[derive(Debug, Default)]
struct Counts {
    sequence: usize,
    tuplet: usize,    // 刻子 + 槓子
    kan: usize,
    concealed: usize, // 暗刻 + 暗槓
    dragon: usize,    // 三元牌の刻子
    wind: usize,      // 風牌の刻子
}

impl<'a> WinContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        groups: &'a [TileGroup],
        revealed: &'a [TileGroup],
        grouping: &'a Grouping,
        hidden: &'a [Tile],
        winning: Tile,
        dora: &'a [Tile],
        sit: &'a Situation,
        is_closed: bool,
    ) -> Self {
        let pair = if grouping.shape == HandShape::Standard {
            grouping
                .groups
                .iter()
                .find(|g| g.kind() == GroupKind::Pair)
                .and_then(|g| g.head().copied())
        } else {
            None
        };

        let mut ctx = Self {
            groups,
            revealed,
            closed_groups: &grouping.groups,
            shape: grouping.shape,
            hidden,
            winning,
            dora,
            sit,
            is_closed,
            pair,
            counts: Counts::default(),
        };
        ctx.counts = ctx.count_groups();
        ctx
    }

    fn count_groups(&self) -> Counts {
        let mut cnt = Counts::default();
        for g in self.groups {
            match g.kind() {
                GroupKind::Sequence => cnt.sequence += 1,
                GroupKind::Triplet | GroupKind::Kan => {
                    cnt.tuplet += 1;
                    if g.kind() == GroupKind::Kan {
                        cnt.kan += 1;
                    }
                    if let Some(t) = g.head() {
                        if t.rank().is_dragon() {
                            cnt.dragon += 1;
                        } else if t.rank().is_wind() {
                            cnt.wind += 1;
                        }
                    }
                }
                _ => {}
            }
        }
        cnt.concealed = self.concealed_tuplets().count();
        cnt
    }

    fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.groups.iter().flat_map(|g| g.tiles())
    }

    // 暗刻と暗槓. ロン和了の和了牌を含む刻子は明刻扱い
    fn concealed_tuplets(&self) -> impl Iterator<Item = &TileGroup> + '_ {
        let revealed = self
            .revealed
            .iter()
            .filter(|g| g.kind() == GroupKind::Kan && g.is_closed());
        let closed = self
            .closed_groups
            .iter()
            .filter(move |g| g.is_tuplet() && self.is_concealed(g));
        revealed.chain(closed)
    }

    // 手牌側の刻子が暗刻かどうか
    fn is_concealed(&self, g: &TileGroup) -> bool {
        self.sit.tsumo || !g.contains(&self.winning)
    }

    fn sequence_heads(&self) -> Vec<(Suit, Rank)> {
        self.groups
            .iter()
            .filter(|g| g.is_sequence())
            .filter_map(|g| g.head())
            .map(|t| (t.suit(), t.rank()))
            .collect()
    }

    // 数牌の種類と字牌の有無
    fn suits(&self) -> (HashSet<Suit>, bool) {
        let mut suits = HashSet::new();
        let mut honor = false;
        for t in self.tiles() {
            if t.is_honor() {
                honor = true;
            } else {
                suits.insert(t.suit());
            }
        }
        (suits, honor)
    }

    fn is_yakuhai(&self, r: Rank) -> bool {
        r.is_dragon() || r == self.sit.seat_wind || r == self.sit.prevalent_wind
    }

    // 九蓮宝燈の形(1112345678999)から手牌を取り除いた残り
    fn nine_gates_rest(&self) -> Option<Vec<Rank>> {
        if !self.is_closed || self.shape != HandShape::Standard || !is_full_flush_shape(self) {
            return None;
        }
        let mut rest = vec![
            One, One, One, Two, Three, Four, Five, Six, Seven, Eight, Nine, Nine, Nine,
        ];
        for t in self.hidden {
            if let Some(i) = rest.iter().position(|&r| r == t.rank()) {
                rest.remove(i);
            }
        }
        Some(rest)
    }

    // 嵌張, 辺張, 単騎のいずれかでしか和了牌を説明できない
    fn is_single_wait(&self) -> bool {
        if self.pair.map_or(false, |p| p.soft_equals(&self.winning)) {
            return true;
        }
        let mut single = false;
        for g in self.closed_groups.iter().filter(|g| g.contains(&self.winning)) {
            if g.is_tuplet() || is_two_sided(g, &self.winning) {
                return false; // 双碰, 両面
            }
            single = true;
        }
        single
    }

    pub fn count_dora(&self) -> usize {
        self.dora
            .iter()
            .filter_map(|d| d.rank().cyclic_next().map(|r| (d.suit(), r)))
            .map(|(s, r)| self.tiles().filter(|t| t.suit() == s && t.rank() == r).count())
            .sum()
    }

    pub fn count_red_five(&self) -> usize {
        self.tiles().filter(|t| t.is_red()).count()
    }

    // 成立した役の一覧 (ドラ, 赤5を含む)
    // ドラ以外の役が一つもない場合は空を返却
    pub fn calc_wins(&self) -> Vec<&'static Win> {
        let mut wins: Vec<&'static Win> = YAKU_LIST
            .iter()
            .filter(|y| (y.func)(self))
            .map(|y| y.win)
            .collect();
        if wins.is_empty() {
            return wins;
        }

        for _ in 0..self.count_dora() {
            wins.push(&DORA_INDICATOR);
        }
        for _ in 0..self.count_red_five() {
            wins.push(&RED_FIVE);
        }
        wins
    }

    // (符, 符の内訳)を返却
    pub fn calc_fu(&self) -> (u32, Vec<String>) {
        if self.shape == HandShape::SevenPairs {
            return (25, vec!["7Pairs (25)".to_string()]);
        }

        let mut items: Vec<(u32, String)> = vec![];

        // 和了り方
        if self.is_closed && !self.sit.tsumo {
            items.push((10, "Menzen-Kafu".to_string()));
        }
        if self.sit.tsumo && is_pinfu(self) {
            items.push((2, "Tsumo".to_string()));
        }

        // 刻子, 槓子
        let revealed = self
            .revealed
            .iter()
            .filter(|g| g.is_tuplet())
            .map(|g| (g, g.is_closed()));
        let closed = self
            .closed_groups
            .iter()
            .filter(|g| g.is_tuplet())
            .map(|g| (g, self.is_concealed(g)));
        for (g, concealed) in revealed.chain(closed) {
            let (mut fu, mut title) = if g.kind() == GroupKind::Kan {
                (8, "Kan".to_string())
            } else {
                (2, "Triplet".to_string())
            };
            if let Some(t) = g.head() {
                if t.is_terminal() {
                    fu *= 2;
                    title = format!("Terminal {}", title);
                } else if t.is_honor() {
                    fu *= 2;
                    title = format!("Honor {}", title);
                }
            }
            if concealed {
                fu *= 2;
                title = format!("Closed {}", title);
            }
            items.push((fu, title));
        }

        // 待ちの形, 雀頭
        if self.is_single_wait() {
            items.push((2, "Single Wait".to_string()));
        }
        if self.pair.map_or(false, |p| self.is_yakuhai(p.rank())) {
            items.push((2, "Yakuhai Pair".to_string()));
        }

        let mut fu = 20 + items.iter().map(|(n, _)| n).sum::<u32>();
        if fu == 20 && !self.is_closed {
            fu += 2;
            items.push((2, "Open Pinfu".to_string()));
        }

        let titles = items
            .iter()
            .map(|(n, t)| format!("{} ({})", t, n))
            .collect();
        ((fu + 9) / 10 * 10, titles) // １の位は切り上げ
    }
}

// 和了牌を除く2枚が両面の形 (辺張は除く)
fn is_two_sided(g: &TileGroup, w: &Tile) -> bool {
    if !g.is_sequence() {
        return false;
    }
    let i = match g.tiles().iter().position(|t| t.soft_equals(w)) {
        Some(i) => i,
        None => return false,
    };
    let mut rest: Vec<u8> = g.tiles().iter().map(|t| t.rank().code()).collect();
    rest.remove(i);
    rest[0] + 1 == rest[1] && rest[0] >= Two.code() && rest[1] <= Eight.code()
}

pub struct Yaku {
    pub win: &'static Win,
    pub func: fn(&WinContext<'_>) -> bool,
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.win)
    }
}

macro_rules! yaku {
    ($w: expr, $f: expr) => {
        Yaku { win: &$w, func: $f }
    };
}

static YAKU_LIST: &[Yaku] = &[
    yaku!(DOUBLE_RIICHI, is_double_riichi),
    yaku!(RIICHI, is_riichi),
    yaku!(IPPATSU, is_ippatsu),
    yaku!(MENZENCHIN_TSUMO, is_menzenchin_tsumo),
    yaku!(UNDER_THE_SEA, is_under_the_sea),
    yaku!(UNDER_THE_RIVER, is_under_the_river),
    yaku!(RINSHAN_KAIHOU, is_rinshan_kaihou),
    yaku!(ROBBING_A_KAN, is_robbing_a_kan),
    yaku!(SEVEN_PAIRS, is_seven_pairs),
    yaku!(THIRTEEN_ORPHANS, is_thirteen_orphans),
    yaku!(PURE_THIRTEEN_ORPHANS, is_pure_thirteen_orphans),
    yaku!(PINFU, is_pinfu),
    yaku!(PURE_DOUBLE_SEQUENCE, is_pure_double_sequence),
    yaku!(TWICE_PURE_DOUBLE_SEQUENCE, is_twice_pure_double_sequence),
    yaku!(WHITE_DRAGON, is_white_dragon),
    yaku!(GREEN_DRAGON, is_green_dragon),
    yaku!(RED_DRAGON, is_red_dragon),
    yaku!(PREVALENT_WIND, is_prevalent_wind),
    yaku!(SEAT_WIND, is_seat_wind),
    yaku!(LITTLE_THREE_DRAGONS, is_little_three_dragons),
    yaku!(BIG_THREE_DRAGONS, is_big_three_dragons),
    yaku!(LITTLE_FOUR_WINDS, is_little_four_winds),
    yaku!(BIG_FOUR_WINDS, is_big_four_winds),
    yaku!(MIXED_TRIPLE_SEQUENCE, is_mixed_triple_sequence),
    yaku!(PURE_STRAIGHT, is_pure_straight),
    yaku!(ALL_TERMINALS, is_all_terminals),
    yaku!(ALL_HONORS, is_all_honors),
    yaku!(ALL_SIMPLES, is_all_simples),
    yaku!(FULL_OUTSIDE_HAND, is_full_outside_hand),
    yaku!(HALF_OUTSIDE_HAND, is_half_outside_hand),
    yaku!(ALL_TRIPLETS, is_all_triplets),
    yaku!(THREE_CONCEALED_TRIPLETS, is_three_concealed_triplets),
    yaku!(FOUR_CONCEALED_TRIPLETS, is_four_concealed_triplets),
    yaku!(SINGLE_WAIT_FOUR_CONCEALED_TRIPLETS, is_single_wait_four_concealed_triplets),
    yaku!(THREE_KANS, is_three_kans),
    yaku!(FOUR_KANS, is_four_kans),
    yaku!(TRIPLE_TRIPLETS, is_triple_triplets),
    yaku!(ALL_GREEN, is_all_green),
    yaku!(TRUE_NINE_GATES, is_true_nine_gates),
    yaku!(NINE_GATES, is_nine_gates),
    yaku!(FULL_FLUSH, is_full_flush),
    yaku!(HALF_FLUSH, is_half_flush),
];

// 役の優先順位 =================================================================
// * 以下の役は排他的であり右側を優先
//     リーチ, ダブルリーチ
//     国士無双, 国士無双十三面待ち
//     一盃口, 二盃口
//     小三元, 大三元
//     小四喜, 大四喜
//     三暗刻, 四暗刻, 四暗刻単騎
//     三槓子, 四槓子
//     清一色, 九蓮宝燈, 純正九蓮宝燈
// * 役満が存在しても他の役は削除しない (点数計算側で無視する)

// 特殊条件 =====================================================================

fn is_double_riichi(ctx: &WinContext<'_>) -> bool {
    ctx.is_closed && ctx.sit.riichi && ctx.sit.double_riichi
}

fn is_riichi(ctx: &WinContext<'_>) -> bool {
    ctx.is_closed && ctx.sit.riichi && !ctx.sit.double_riichi
}

fn is_ippatsu(ctx: &WinContext<'_>) -> bool {
    ctx.is_closed && ctx.sit.riichi && ctx.sit.ippatsu
}

fn is_menzenchin_tsumo(ctx: &WinContext<'_>) -> bool {
    ctx.is_closed && ctx.sit.tsumo
}

// 海底摸月
fn is_under_the_sea(ctx: &WinContext<'_>) -> bool {
    ctx.sit.last_draw_win && ctx.sit.tsumo
}

// 河底撈魚
fn is_under_the_river(ctx: &WinContext<'_>) -> bool {
    ctx.sit.last_draw_win && !ctx.sit.tsumo
}

fn is_rinshan_kaihou(ctx: &WinContext<'_>) -> bool {
    ctx.sit.kan_win && ctx.sit.tsumo
}

// 槍槓
fn is_robbing_a_kan(ctx: &WinContext<'_>) -> bool {
    ctx.sit.kan_win && !ctx.sit.tsumo
}

// 特殊形 =======================================================================

fn is_seven_pairs(ctx: &WinContext<'_>) -> bool {
    ctx.shape == HandShape::SevenPairs
}

// 和了牌が雀頭 = 13面待ち
fn is_pure_thirteen_orphans_shape(ctx: &WinContext<'_>) -> bool {
    ctx.closed_groups
        .iter()
        .find(|g| g.kind() == GroupKind::Pair)
        .map_or(false, |g| g.contains(&ctx.winning))
}

fn is_thirteen_orphans(ctx: &WinContext<'_>) -> bool {
    ctx.shape == HandShape::ThirteenOrphans && !is_pure_thirteen_orphans_shape(ctx)
}

fn is_pure_thirteen_orphans(ctx: &WinContext<'_>) -> bool {
    ctx.shape == HandShape::ThirteenOrphans && is_pure_thirteen_orphans_shape(ctx)
}

// 通常形 =======================================================================

// 平和
fn is_pinfu(ctx: &WinContext<'_>) -> bool {
    if !ctx.is_closed || ctx.shape != HandShape::Standard || ctx.counts.sequence != 4 {
        return false;
    }
    match ctx.pair {
        Some(p) if !p.is_honor() => {}
        _ => return false,
    }

    // 上がり牌の両面待ち判定
    ctx.closed_groups
        .iter()
        .any(|g| is_two_sided(g, &ctx.winning))
}

// 同じ順子の組の数
fn count_pure_double(ctx: &WinContext<'_>) -> usize {
    if !ctx.is_closed || ctx.shape != HandShape::Standard {
        return 0;
    }
    let mut heads = ctx.sequence_heads();
    heads.sort();
    let mut n = 0;
    let mut i = 0;
    while i + 1 < heads.len() {
        if heads[i] == heads[i + 1] {
            n += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    n
}

// 一盃口
fn is_pure_double_sequence(ctx: &WinContext<'_>) -> bool {
    count_pure_double(ctx) == 1
}

// 二盃口
fn is_twice_pure_double_sequence(ctx: &WinContext<'_>) -> bool {
    count_pure_double(ctx) == 2
}

fn has_tuplet_of(ctx: &WinContext<'_>, r: Rank) -> bool {
    ctx.groups
        .iter()
        .any(|g| g.is_tuplet() && g.head().map_or(false, |t| t.is_honor() && t.rank() == r))
}

// 白
fn is_white_dragon(ctx: &WinContext<'_>) -> bool {
    has_tuplet_of(ctx, WhiteDragon)
}

// 發
fn is_green_dragon(ctx: &WinContext<'_>) -> bool {
    has_tuplet_of(ctx, GreenDragon)
}

// 中
fn is_red_dragon(ctx: &WinContext<'_>) -> bool {
    has_tuplet_of(ctx, RedDragon)
}

// 場風
fn is_prevalent_wind(ctx: &WinContext<'_>) -> bool {
    has_tuplet_of(ctx, ctx.sit.prevalent_wind)
}

// 自風
fn is_seat_wind(ctx: &WinContext<'_>) -> bool {
    has_tuplet_of(ctx, ctx.sit.seat_wind)
}

// 小三元
fn is_little_three_dragons(ctx: &WinContext<'_>) -> bool {
    ctx.counts.dragon == 2 && ctx.pair.map_or(false, |p| p.rank().is_dragon())
}

// 大三元
fn is_big_three_dragons(ctx: &WinContext<'_>) -> bool {
    ctx.counts.dragon == 3
}

// 小四喜
fn is_little_four_winds(ctx: &WinContext<'_>) -> bool {
    ctx.counts.wind == 3 && ctx.pair.map_or(false, |p| p.rank().is_wind())
}

// 大四喜
fn is_big_four_winds(ctx: &WinContext<'_>) -> bool {
    ctx.counts.wind == 4
}

// 三色同順
fn is_mixed_triple_sequence(ctx: &WinContext<'_>) -> bool {
    if ctx.counts.sequence < 3 {
        return false;
    }
    let heads = ctx.sequence_heads();
    heads.iter().any(|&(_, r)| {
        [Suit::Bamboo, Suit::Dot, Suit::Character]
            .iter()
            .all(|s| heads.contains(&(*s, r)))
    })
}

// 一気通貫
fn is_pure_straight(ctx: &WinContext<'_>) -> bool {
    if ctx.counts.sequence < 3 {
        return false;
    }
    let heads = ctx.sequence_heads();
    heads
        .iter()
        .any(|&(s, _)| [One, Four, Seven].iter().all(|r| heads.contains(&(s, *r))))
}

// 清老頭
fn is_all_terminals(ctx: &WinContext<'_>) -> bool {
    !ctx.groups.is_empty() && ctx.tiles().all(|t| t.is_terminal())
}

// 字一色
fn is_all_honors(ctx: &WinContext<'_>) -> bool {
    !ctx.groups.is_empty() && ctx.tiles().all(|t| t.is_honor())
}

// 断么九
fn is_all_simples(ctx: &WinContext<'_>) -> bool {
    !ctx.groups.is_empty() && ctx.tiles().all(|t| t.is_simple())
}

// 純チャン
fn is_full_outside_hand(ctx: &WinContext<'_>) -> bool {
    ctx.shape == HandShape::Standard
        && ctx.counts.sequence > 0
        && ctx.groups.iter().all(|g| g.has_terminal())
        && !ctx.tiles().any(|t| t.is_honor())
}

// チャンタ
fn is_half_outside_hand(ctx: &WinContext<'_>) -> bool {
    ctx.shape == HandShape::Standard
        && ctx.counts.sequence > 0
        && ctx.groups.iter().all(|g| g.has_end())
        && ctx.tiles().any(|t| t.is_honor())
}

// 対々和
fn is_all_triplets(ctx: &WinContext<'_>) -> bool {
    !ctx.is_closed && ctx.shape == HandShape::Standard && ctx.counts.tuplet == 4
}

// 三暗刻
fn is_three_concealed_triplets(ctx: &WinContext<'_>) -> bool {
    ctx.counts.concealed == 3
}

// 四暗刻 (和了牌が雀頭の場合は単騎)
fn is_four_concealed_triplets(ctx: &WinContext<'_>) -> bool {
    ctx.counts.concealed == 4 && ctx.concealed_tuplets().any(|g| g.contains(&ctx.winning))
}

fn is_single_wait_four_concealed_triplets(ctx: &WinContext<'_>) -> bool {
    ctx.counts.concealed == 4 && !ctx.concealed_tuplets().any(|g| g.contains(&ctx.winning))
}

// 三槓子
fn is_three_kans(ctx: &WinContext<'_>) -> bool {
    ctx.counts.kan == 3
}

// 四槓子
fn is_four_kans(ctx: &WinContext<'_>) -> bool {
    ctx.counts.kan == 4
}

// 数字が連続する数牌の刻子3つ (種類は問わない)
fn is_triple_triplets(ctx: &WinContext<'_>) -> bool {
    if ctx.counts.tuplet < 3 {
        return false;
    }
    let heads: Vec<u8> = ctx
        .groups
        .iter()
        .filter(|g| g.is_tuplet())
        .filter_map(|g| g.head())
        .filter_map(|t| t.rank().number())
        .collect();
    heads
        .iter()
        .any(|&n| heads.contains(&(n + 1)) && heads.contains(&(n + 2)))
}

// 緑一色
fn is_all_green(ctx: &WinContext<'_>) -> bool {
    !ctx.groups.is_empty() && ctx.tiles().all(|t| t.is_green())
}

// 純正九蓮宝燈
fn is_true_nine_gates(ctx: &WinContext<'_>) -> bool {
    ctx.nine_gates_rest().map_or(false, |r| r.is_empty())
}

// 九蓮宝燈
fn is_nine_gates(ctx: &WinContext<'_>) -> bool {
    ctx.nine_gates_rest()
        .map_or(false, |r| r.len() == 1 && r[0] == ctx.winning.rank())
}

fn is_full_flush_shape(ctx: &WinContext<'_>) -> bool {
    let (suits, honor) = ctx.suits();
    suits.len() == 1 && !honor
}

// 清一色 (九蓮宝燈が優先)
fn is_full_flush(ctx: &WinContext<'_>) -> bool {
    is_full_flush_shape(ctx) && !is_true_nine_gates(ctx) && !is_nine_gates(ctx)
}

// 混一色
fn is_half_flush(ctx: &WinContext<'_>) -> bool {
    let (suits, honor) = ctx.suits();
    suits.len() == 1 && honor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::board::closed_hand;
    use crate::hand::grouper::HandGrouper;

    fn situation(seat: Rank, prevalent: Rank, tsumo: bool) -> Situation {
        Situation {
            seat_wind: seat,
            prevalent_wind: prevalent,
            tsumo,
            ..Situation::default()
        }
    }

    // (役の名前一覧, 符)
    fn eval(
        hidden: &str,
        revealed: &[&str],
        winning: &str,
        dora: &str,
        sit: &Situation,
    ) -> (Vec<&'static str>, u32) {
        let hidden = tiles_from_string(hidden).unwrap();
        let winning = Tile::parse(winning).unwrap();
        let dora = tiles_from_string(dora).unwrap();
        let raw: Vec<Vec<Tile>> = revealed
            .iter()
            .map(|s| tiles_from_string(s).unwrap())
            .collect();
        let revealed: Vec<TileGroup> = raw.iter().map(|g| TileGroup::new(g.clone(), false)).collect();

        let mut closed_tiles = hidden.clone();
        closed_tiles.push(winning);
        let grouping = HandGrouper::create_closed_groups(&closed_tiles).unwrap();
        let mut groups = revealed.clone();
        groups.extend(grouping.groups.iter().cloned());

        let ctx = WinContext::new(
            &groups,
            &revealed,
            &grouping,
            &hidden,
            winning,
            &dora,
            sit,
            closed_hand(&raw),
        );
        let wins = ctx.calc_wins().iter().map(|w| w.name).collect();
        (wins, ctx.calc_fu().0)
    }

    // 手牌側の分解を直接与える (二盃口は七対子が優先されるため)
    fn eval_standard(closed: &[&str], winning: &str, sit: &Situation) -> Vec<&'static str> {
        let winning = Tile::parse(winning).unwrap();
        let groups: Vec<TileGroup> = closed
            .iter()
            .map(|s| TileGroup::new(tiles_from_string(s).unwrap(), true))
            .collect();
        let mut hidden: Vec<Tile> = groups.iter().flat_map(|g| g.tiles()).copied().collect();
        if let Some(i) = hidden.iter().position(|t| t.soft_equals(&winning)) {
            hidden.remove(i);
        }
        let grouping = Grouping {
            groups: groups.clone(),
            shape: HandShape::Standard,
        };
        let ctx = WinContext::new(&groups, &[], &grouping, &hidden, winning, &[], sit, true);
        ctx.calc_wins().iter().map(|w| w.name).collect()
    }

    #[test]
    fn test_self_drawn_winds() {
        let sit = situation(EastWind, EastWind, true);
        let (wins, fu) = eval("2b3b4b4d5d6d7n8n9newewew2d", &[], "2d", "", &sit);
        assert_eq!(wins, vec!["Menzenchin Tsumo", "Prevalent Wind", "Seat Wind"]);
        assert_eq!(fu, 30); // 20 + 暗刻(字牌)8 + 単騎2

        // ドラ表示牌: 1d -> 2d x2, nw -> ew x3
        let (wins, _) = eval("2b3b4b4d5d6d7n8n9newewew2d", &[], "2d", "1dnw", &sit);
        assert_eq!(wins.iter().filter(|&&w| w == "Dora Indicator").count(), 5);
    }

    #[test]
    fn test_pinfu() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, fu) = eval("2b3b4b5d6d7d3n4n5n5b5b6n7n", &[], "8n", "", &sit);
        assert_eq!(wins, vec!["Pinfu", "All Simples"]);
        assert_eq!(fu, 30);

        // 嵌張は平和にならない
        let (wins, fu) = eval("2b3b4b5d6d7d3n4n5n5b5b6n8n", &[], "7n", "", &sit);
        assert_eq!(wins, vec!["All Simples"]);
        assert_eq!(fu, 40); // 20 + 門前ロン10 + 嵌張2
    }

    #[test]
    fn test_open_pinfu() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, fu) = eval("3d4d5d6n7n8n5b5b6d7d", &["2b3b4b"], "5d", "", &sit);
        assert_eq!(wins, vec!["All Simples"]);
        assert_eq!(fu, 30); // 20 + 2 -> 30
    }

    #[test]
    fn test_special_shapes() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, fu) = eval("1b1b3d3d5n5nwdwd9b9b2d2d7n", &[], "7n", "", &sit);
        assert_eq!(wins, vec!["Seven Pairs"]);
        assert_eq!(fu, 25);

        let (wins, _) = eval("1b9b1d9d1n9ngdrdwdewswwwnw", &[], "nw", "", &sit);
        assert_eq!(wins, vec!["Pure Thirteen Orphans"]);
        let (wins, _) = eval("1b9b1d9d1n9ngdrdwdewswnwnw", &[], "ww", "", &sit);
        assert_eq!(wins, vec!["Thirteen Orphans"]);
    }

    #[test]
    fn test_nine_gates() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval("1d1d1d2d3d4d5d6d7d8d9d9d9d", &[], "5d", "", &sit);
        assert_eq!(wins, vec!["True Nine Gates"]);
    }

    #[test]
    fn test_yakuhai_and_dragons() {
        let sit = situation(SouthWind, EastWind, false);
        // 白, 發の明刻 + 中の雀頭
        let (wins, _) = eval("rd1b2b3b7n8n9n", &["wdwdwd", "gdgdgd"], "rd", "", &sit);
        assert_eq!(
            wins,
            vec!["White Dragon", "Green Dragon", "Little Three Dragons", "Half Outside Hand"]
        );
    }

    #[test]
    fn test_closed_kan() {
        let sit = situation(SouthWind, EastWind, true);
        // 暗槓は門前のまま
        let (wins, fu) = eval("2b3b4b4d5d6d6n7n8n5b", &["xx9n9nxx"], "5b", "", &sit);
        assert_eq!(wins, vec!["Menzenchin Tsumo"]);
        assert_eq!(fu, 60); // 20 + 暗槓(么九)32 + 単騎2 = 54 -> 60
    }

    #[test]
    fn test_sequence_patterns() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, fu) = eval("1b2b3b1d2d3d1n2n3n5d6d7d9n", &[], "9n", "", &sit);
        assert_eq!(wins, vec!["Mixed Triple Sequence"]);
        assert_eq!(fu, 40); // 20 + 門前ロン10 + 単騎2
        let (wins, _) = eval("1b2b3b1d2d3d2n3n4n5d6d7d9n", &[], "9n", "", &sit);
        assert!(!wins.contains(&"Mixed Triple Sequence"));

        let (wins, _) = eval("1b2b3b4b5b6b7b8b9b2d3d4d5n", &[], "5n", "", &sit);
        assert_eq!(wins, vec!["Pure Straight"]);
        let (wins, _) = eval("1b2b3b4b5b6b6b7b8b2d3d4d5n", &[], "5n", "", &sit);
        assert!(!wins.contains(&"Pure Straight"));
    }

    #[test]
    fn test_pure_double_sequence() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval("2b3b4b2b3b4b5d6d7d3n4n5n9n", &[], "9n", "", &sit);
        assert_eq!(wins, vec!["Pure Double Sequence"]);
        // 副露していれば不成立
        let (wins, _) = eval("2b3b4b2b3b4b3n4n5n9n", &["5d6d7d"], "9n", "", &sit);
        assert!(!wins.contains(&"Pure Double Sequence"));

        let wins = eval_standard(&["2b3b4b", "2b3b4b", "5d6d7d", "5d6d7d", "9n9n"], "9n", &sit);
        assert_eq!(wins, vec!["Twice Pure Double Sequence"]);
        let wins = eval_standard(&["2b3b4b", "2b3b4b", "5d6d7d", "6d7d8d", "9n9n"], "9n", &sit);
        assert_eq!(wins, vec!["Pure Double Sequence"]);

        // 同じ牌姿でも分解器は七対子を先に採用する
        let (wins, _) = eval("2b3b4b2b3b4b5d6d7d5d6d7d9n", &[], "9n", "", &sit);
        assert_eq!(wins, vec!["Seven Pairs"]);
    }

    #[test]
    fn test_terminals_and_honors() {
        let sit = situation(SouthWind, EastWind, true);
        let (wins, _) = eval("1b1b1b9b9b9b1d1d1d9d9d9d1n", &[], "1n", "", &sit);
        assert_eq!(
            wins,
            vec!["Menzenchin Tsumo", "All Terminals", "Single Wait Four Concealed Triplets"]
        );
        // 字牌の雀頭は清老頭にならない
        let (wins, _) = eval("1b1b1b9b9b9b1d1d1d9d9d9dew", &[], "ew", "", &sit);
        assert!(!wins.contains(&"All Terminals"));
        assert!(!wins.contains(&"All Honors"));

        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval("ewewewswswswwdwdwdrdrdrdgd", &[], "gd", "", &sit);
        assert_eq!(
            wins,
            vec![
                "White Dragon",
                "Red Dragon",
                "Prevalent Wind",
                "Seat Wind",
                "Little Three Dragons",
                "All Honors",
                "Single Wait Four Concealed Triplets",
            ]
        );
        let (wins, _) = eval("ewewewswswswwdwdwdrdrdrd1b", &[], "1b", "", &sit);
        assert!(!wins.contains(&"All Honors"));
    }

    #[test]
    fn test_outside_hands() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, fu) = eval("1b2b3b7b8b9b1d2d3d9n9n9n1n", &[], "1n", "", &sit);
        assert_eq!(wins, vec!["Full Outside Hand"]);
        assert_eq!(fu, 40); // 20 + 門前ロン10 + 暗刻(么九)8 + 単騎2

        // 字牌を含めば混全帯么九
        let (wins, _) = eval("1b2b3b7b8b9b1d2d3dwdwdwd1n", &[], "1n", "", &sit);
        assert_eq!(wins, vec!["White Dragon", "Half Outside Hand"]);
    }

    #[test]
    fn test_triplet_hands() {
        let ron = situation(SouthWind, EastWind, false);
        let tsumo = situation(SouthWind, EastWind, true);

        let (wins, _) = eval("1b1b1b5d5d5d9n9n9n3b", &["ewewew"], "3b", "", &ron);
        assert_eq!(wins, vec!["Prevalent Wind", "All Triplets", "Three Concealed Triplets"]);
        // 門前の対々形は四暗刻単騎
        let (wins, _) = eval("1b1b1b5d5d5d9n9n9newewew3b", &[], "3b", "", &ron);
        assert_eq!(wins, vec!["Prevalent Wind", "Single Wait Four Concealed Triplets"]);

        // ロンで完成した刻子は明刻
        let (wins, _) = eval("1b1b1b5d5d9n9n9newewew3b3b", &[], "5d", "", &ron);
        assert_eq!(wins, vec!["Prevalent Wind", "Three Concealed Triplets"]);
        let (wins, _) = eval("1b1b1b5d5d9n9n9newewew3b3b", &[], "5d", "", &tsumo);
        assert_eq!(
            wins,
            vec!["Menzenchin Tsumo", "Prevalent Wind", "Four Concealed Triplets"]
        );
    }

    #[test]
    fn test_kans() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval(
            "2b3b4b5d",
            &["1b1b1b1b", "xx9d9dxx", "ewewewew"],
            "5d",
            "",
            &sit,
        );
        assert_eq!(wins, vec!["Prevalent Wind", "Three Kans"]);
        let (wins, _) = eval("2b3b4b5d", &["1b1b1b", "xx9d9dxx", "ewewewew"], "5d", "", &sit);
        assert_eq!(wins, vec!["Prevalent Wind"]);

        let (wins, _) = eval(
            "5d",
            &["1b1b1b1b", "xx9d9dxx", "ewewewew", "2n2n2n2n"],
            "5d",
            "",
            &sit,
        );
        assert_eq!(wins, vec!["Prevalent Wind", "All Triplets", "Four Kans"]);
    }

    #[test]
    fn test_triple_triplets() {
        let sit = situation(SouthWind, EastWind, false);
        // 種類が異なっても数字が連続していれば成立
        let (wins, _) = eval("2b2b2b3d3d3d4n4n4n6d7d8d9n", &[], "9n", "", &sit);
        assert_eq!(wins, vec!["Three Concealed Triplets", "Triple Triplets"]);
        let (wins, _) = eval("2b2b2b3d3d3d5n5n5n6d7d8d9n", &[], "9n", "", &sit);
        assert_eq!(wins, vec!["Three Concealed Triplets"]);
    }

    #[test]
    fn test_all_green() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval("2b3b4b2b3b4b6b6b6bgdgdgd8b", &[], "8b", "", &sit);
        assert_eq!(
            wins,
            vec!["Pure Double Sequence", "Green Dragon", "All Green", "Half Flush"]
        );
        let (wins, _) = eval("2b3b4b2b3b4b6b6b6bgdgdgd9b", &[], "9b", "", &sit);
        assert_eq!(wins, vec!["Pure Double Sequence", "Green Dragon", "Half Flush"]);
    }

    #[test]
    fn test_winds_and_dragons() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval("ewewewswswswwwwwww1b2b3bnw", &[], "nw", "", &sit);
        assert_eq!(
            wins,
            vec![
                "Prevalent Wind",
                "Seat Wind",
                "Little Four Winds",
                "Half Outside Hand",
                "Three Concealed Triplets",
                "Half Flush",
            ]
        );
        let (wins, _) = eval("ewewewswswswwwwwwwnwnwnw1b", &[], "1b", "", &sit);
        assert_eq!(
            wins,
            vec![
                "Prevalent Wind",
                "Seat Wind",
                "Big Four Winds",
                "Single Wait Four Concealed Triplets",
                "Half Flush",
            ]
        );
        let (wins, _) = eval("ewewewswswsw1b2b3b4d5d6dnw", &[], "nw", "", &sit);
        assert!(!wins.contains(&"Little Four Winds"));
        assert!(!wins.contains(&"Big Four Winds"));

        let (wins, _) = eval("wdwdwdgdgdgdrdrdrd2b3b4b9n", &[], "9n", "", &sit);
        assert_eq!(
            wins,
            vec![
                "White Dragon",
                "Green Dragon",
                "Red Dragon",
                "Big Three Dragons",
                "Three Concealed Triplets",
            ]
        );
    }

    #[test]
    fn test_flushes() {
        let sit = situation(SouthWind, EastWind, false);
        let (wins, _) = eval("1b1b1b5b5b5b9b9b9b2b3b4b7b", &[], "7b", "", &sit);
        assert_eq!(wins, vec!["Three Concealed Triplets", "Full Flush"]);
        let (wins, _) = eval("1b1b1b5b5b5bwdwdwd2b3b4b7b", &[], "7b", "", &sit);
        assert_eq!(wins, vec!["White Dragon", "Three Concealed Triplets", "Half Flush"]);
        let (wins, _) = eval("1b1b1b5b5b5bwdwdwd2d3d4d7b", &[], "7b", "", &sit);
        assert_eq!(wins, vec!["White Dragon", "Three Concealed Triplets"]);
    }

    #[test]
    fn test_last_tile_and_kan_wins() {
        let mut sit = situation(EastWind, EastWind, true);
        sit.last_draw_win = true;
        let (wins, _) = eval("2b3b4b4d5d6d7n8n9newewew2d", &[], "2d", "", &sit);
        assert!(wins.contains(&"Under The Sea"));
        assert!(!wins.contains(&"Under The River"));
        sit.tsumo = false;
        let (wins, _) = eval("2b3b4b4d5d6d7n8n9newewew2d", &[], "2d", "", &sit);
        assert!(wins.contains(&"Under The River"));
        assert!(!wins.contains(&"Under The Sea"));

        let mut sit = situation(SouthWind, EastWind, false);
        sit.kan_win = true;
        let (wins, _) = eval("2b3b4b4d5d6d6n7n8n5b", &["xx9n9nxx"], "5b", "", &sit);
        assert_eq!(wins, vec!["Robbing A Kan"]);
        sit.tsumo = true;
        let (wins, _) = eval("2b3b4b4d5d6d6n7n8n5b", &["xx9n9nxx"], "5b", "", &sit);
        assert_eq!(wins, vec!["Menzenchin Tsumo", "Rinshan Kaihou"]);
    }
}
