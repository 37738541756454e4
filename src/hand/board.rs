use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{debug, info};

use super::grouper::{Grouping, GroupingFailure, HandGrouper};
use super::point::{calc_score, Score};
use super::validate::{validate, HandSnapshot};
use super::yaku::WinContext;

// 場風, 自風と和了の状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Situation {
    pub seat_wind: Rank,
    pub prevalent_wind: Rank,
    pub tsumo: bool,         // ツモ和了
    pub riichi: bool,        // リーチ
    pub double_riichi: bool, // ダブルリーチ
    pub ippatsu: bool,       // 一発
    pub kan_win: bool,       // 嶺上開花 (ツモ) または 槍槓 (ロン)
    pub last_draw_win: bool, // 海底摸月 (ツモ) または 河底撈魚 (ロン)
}

impl Default for Situation {
    fn default() -> Self {
        Self {
            seat_wind: Rank::Back, // 未設定
            prevalent_wind: Rank::Back,
            tsumo: false,
            riichi: false,
            double_riichi: false,
            ippatsu: false,
            kan_win: false,
            last_draw_win: false,
        }
    }
}

// 副露がない, またはすべて暗槓 (裏向き2枚の4枚組)
pub fn closed_hand(revealed: &[Vec<Tile>]) -> bool {
    revealed
        .iter()
        .all(|g| g.len() == TILE && g.iter().filter(|t| t.is_face_down()).count() == 2)
}

// Boardの入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Hidden,
    Revealed,
    Winning,
    Dora,
    Discards,
    SeatWind,
    PrevalentWind,
    Tsumo,
    Riichi,
    DoubleRiichi,
    Ippatsu,
    KanWin,
    LastDrawWin,
}

// 入力から導出される値 (キャッシュ対象)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derived {
    ClosedGroups,
    RevealedGroups,
    AllGroups,
    HandTiles,
    ClosedHand,
    Validation,
    Wins,
    Score,
}

// 入力を変更した時に破棄する導出値 (依存関係の推移閉包)
pub static INVALIDATION: &[(Input, &[Derived])] = &[
    (Input::Hidden, GROUPS),
    (Input::Revealed, REVEALED),
    (Input::Winning, GROUPS),
    (Input::Dora, RULES),
    (Input::Discards, RULES),
    (Input::SeatWind, RULES),
    (Input::PrevalentWind, RULES),
    (Input::Tsumo, RESULTS),
    (Input::Riichi, RULES),
    (Input::DoubleRiichi, RULES),
    (Input::Ippatsu, RULES),
    (Input::KanWin, RULES),
    (Input::LastDrawWin, RESULTS),
];

const RESULTS: &[Derived] = &[Derived::Wins, Derived::Score];
const RULES: &[Derived] = &[Derived::Validation, Derived::Wins, Derived::Score];
const GROUPS: &[Derived] = &[
    Derived::ClosedGroups,
    Derived::AllGroups,
    Derived::HandTiles,
    Derived::Validation,
    Derived::Wins,
    Derived::Score,
];
const REVEALED: &[Derived] = &[
    Derived::RevealedGroups,
    Derived::AllGroups,
    Derived::HandTiles,
    Derived::ClosedHand,
    Derived::Validation,
    Derived::Wins,
    Derived::Score,
];

#[derive(Debug, Default, Clone)]
struct Cache {
    closed_groups: OnceCell<Result<Grouping, GroupingFailure>>,
    revealed_groups: OnceCell<Vec<TileGroup>>,
    all_groups: OnceCell<Vec<TileGroup>>,
    hand_tiles: OnceCell<Vec<Tile>>,
    closed_hand: OnceCell<bool>,
    validation: OnceCell<Vec<EvalError>>,
    wins: OnceCell<Vec<&'static Win>>,
    score: OnceCell<Option<Score>>,
}

impl Cache {
    fn clear(&mut self, d: Derived) {
        match d {
            Derived::ClosedGroups => drop(self.closed_groups.take()),
            Derived::RevealedGroups => drop(self.revealed_groups.take()),
            Derived::AllGroups => drop(self.all_groups.take()),
            Derived::HandTiles => drop(self.hand_tiles.take()),
            Derived::ClosedHand => drop(self.closed_hand.take()),
            Derived::Validation => drop(self.validation.take()),
            Derived::Wins => drop(self.wins.take()),
            Derived::Score => drop(self.score.take()),
        }
    }

    fn is_cached(&self, d: Derived) -> bool {
        match d {
            Derived::ClosedGroups => self.closed_groups.get().is_some(),
            Derived::RevealedGroups => self.revealed_groups.get().is_some(),
            Derived::AllGroups => self.all_groups.get().is_some(),
            Derived::HandTiles => self.hand_tiles.get().is_some(),
            Derived::ClosedHand => self.closed_hand.get().is_some(),
            Derived::Validation => self.validation.get().is_some(),
            Derived::Wins => self.wins.get().is_some(),
            Derived::Score => self.score.get().is_some(),
        }
    }
}

// 採点結果の概要 (表示, JSON出力用)
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub error: Option<String>,
    pub groups: Vec<TileGroup>,
    pub wins: Vec<&'static Win>,
    pub score: Option<Score>,
}

// 一人分の和了形と状況
// 導出値は初回の参照時に計算してキャッシュし, 入力の変更時に依存する値のみ破棄する
#[derive(Debug, Default, Clone)]
pub struct Board {
    hidden: Vec<Tile>,        // 手牌 (和了牌を含まない)
    revealed: Vec<Vec<Tile>>, // 副露と暗槓
    winning: Option<Tile>,    // 和了牌
    dora: Vec<Tile>,          // ドラ表示牌
    discards: Vec<Tile>,      // 捨て牌
    sit: Situation,
    cache: Cache,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self, input: Input) {
        for (i, ds) in INVALIDATION {
            if *i == input {
                for d in ds.iter() {
                    self.cache.clear(*d);
                }
            }
        }
    }

    pub fn is_cached(&self, d: Derived) -> bool {
        self.cache.is_cached(d)
    }

    // 入力 =====================================================================

    pub fn set_hidden(&mut self, tiles: Vec<Tile>) {
        self.hidden = tiles;
        self.invalidate(Input::Hidden);
    }

    pub fn set_revealed(&mut self, groups: Vec<Vec<Tile>>) {
        self.revealed = groups;
        self.invalidate(Input::Revealed);
    }

    pub fn set_winning(&mut self, tile: Tile) {
        self.winning = Some(tile);
        self.invalidate(Input::Winning);
    }

    pub fn set_dora(&mut self, tiles: Vec<Tile>) {
        self.dora = tiles;
        self.invalidate(Input::Dora);
    }

    pub fn set_discards(&mut self, tiles: Vec<Tile>) {
        self.discards = tiles;
        self.invalidate(Input::Discards);
    }

    pub fn set_seat_wind(&mut self, r: Rank) {
        self.sit.seat_wind = r;
        self.invalidate(Input::SeatWind);
    }

    pub fn set_prevalent_wind(&mut self, r: Rank) {
        self.sit.prevalent_wind = r;
        self.invalidate(Input::PrevalentWind);
    }

    pub fn set_tsumo(&mut self, flag: bool) {
        self.sit.tsumo = flag;
        self.invalidate(Input::Tsumo);
    }

    pub fn set_riichi(&mut self, flag: bool) {
        self.sit.riichi = flag;
        self.invalidate(Input::Riichi);
    }

    pub fn set_double_riichi(&mut self, flag: bool) {
        self.sit.double_riichi = flag;
        self.invalidate(Input::DoubleRiichi);
    }

    pub fn set_ippatsu(&mut self, flag: bool) {
        self.sit.ippatsu = flag;
        self.invalidate(Input::Ippatsu);
    }

    pub fn set_kan_win(&mut self, flag: bool) {
        self.sit.kan_win = flag;
        self.invalidate(Input::KanWin);
    }

    pub fn set_last_draw_win(&mut self, flag: bool) {
        self.sit.last_draw_win = flag;
        self.invalidate(Input::LastDrawWin);
    }

    pub fn set_situation(&mut self, sit: Situation) {
        self.set_seat_wind(sit.seat_wind);
        self.set_prevalent_wind(sit.prevalent_wind);
        self.set_tsumo(sit.tsumo);
        self.set_riichi(sit.riichi);
        self.set_double_riichi(sit.double_riichi);
        self.set_ippatsu(sit.ippatsu);
        self.set_kan_win(sit.kan_win);
        self.set_last_draw_win(sit.last_draw_win);
    }

    #[inline]
    pub fn hidden(&self) -> &[Tile] {
        &self.hidden
    }

    #[inline]
    pub fn revealed(&self) -> &[Vec<Tile>] {
        &self.revealed
    }

    #[inline]
    pub fn winning(&self) -> Option<Tile> {
        self.winning
    }

    #[inline]
    pub fn dora(&self) -> &[Tile] {
        &self.dora
    }

    #[inline]
    pub fn discards(&self) -> &[Tile] {
        &self.discards
    }

    #[inline]
    pub fn situation(&self) -> &Situation {
        &self.sit
    }

    // 導出値 ===================================================================

    // 手牌 + 和了牌の分解結果
    pub fn closed_grouping(&self) -> &Result<Grouping, GroupingFailure> {
        self.cache.closed_groups.get_or_init(|| {
            let mut tiles = self.hidden.clone();
            tiles.extend(self.winning);
            debug!(
                "closed tiles: {}, revealed: {:?}, dora: {}",
                tiles_to_string(&tiles),
                self.revealed,
                tiles_to_string(&self.dora)
            );
            let res = HandGrouper::create_closed_groups(&tiles);
            match &res {
                Ok(g) => debug!("closed groups ({:?}): {}", g.shape, groups_to_string(&g.groups)),
                Err(e) => debug!("closed groups: {}", e),
            }
            res
        })
    }

    // 失敗時は末尾にErrorグループ
    pub fn closed_groups(&self) -> Vec<TileGroup> {
        match self.closed_grouping() {
            Ok(g) => g.groups.clone(),
            Err(e) => e.clone().into_groups(),
        }
    }

    pub fn revealed_groups(&self) -> &[TileGroup] {
        self.cache.revealed_groups.get_or_init(|| {
            self.revealed
                .iter()
                .map(|g| TileGroup::new(g.clone(), false))
                .collect()
        })
    }

    // 副露 + 手牌の面子
    pub fn all_groups(&self) -> &[TileGroup] {
        self.cache.all_groups.get_or_init(|| {
            let mut groups = self.revealed_groups().to_vec();
            groups.extend(self.closed_groups());
            groups
        })
    }

    // 面子に含まれるすべての牌 (暗槓の裏向き牌は確定済み)
    pub fn hand_tiles(&self) -> &[Tile] {
        self.cache.hand_tiles.get_or_init(|| {
            self.all_groups()
                .iter()
                .flat_map(|g| g.tiles())
                .copied()
                .collect()
        })
    }

    pub fn is_closed_hand(&self) -> bool {
        *self.cache.closed_hand.get_or_init(|| closed_hand(&self.revealed))
    }

    // 和了の有無以外の検証結果
    pub fn validation(&self) -> &[EvalError] {
        self.cache.validation.get_or_init(|| {
            let snapshot = HandSnapshot {
                hidden: &self.hidden,
                winning: self.winning,
                revealed: &self.revealed,
                revealed_groups: self.revealed_groups(),
                all_groups: self.all_groups(),
                dora: &self.dora,
                discards: &self.discards,
                sit: &self.sit,
                is_closed: self.is_closed_hand(),
            };
            let errors = validate(&snapshot);
            for e in &errors {
                info!("{}", e);
            }
            errors
        })
    }

    // 検証エラーをまとめたメッセージ. 問題がなければNone
    pub fn validate(&self) -> Option<String> {
        let mut msgs: Vec<String> = self.validation().iter().map(|e| e.to_string()).collect();
        if msgs.is_empty() && self.wins().is_empty() {
            msgs.push("No Win! There is no base win in this hand.".to_string());
        }
        if msgs.is_empty() {
            None
        } else {
            Some(msgs.join("\n"))
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_none()
    }

    fn with_context<T>(&self, f: impl FnOnce(&WinContext<'_>) -> T) -> Option<T> {
        if !self.validation().is_empty() {
            return None;
        }
        let grouping = self.closed_grouping().as_ref().ok()?;
        let winning = self.winning?;
        let ctx = WinContext::new(
            self.all_groups(),
            self.revealed_groups(),
            grouping,
            &self.hidden,
            winning,
            &self.dora,
            &self.sit,
            self.is_closed_hand(),
        );
        Some(f(&ctx))
    }

    // 成立した役 (ドラを含む). 検証エラーがある場合, 役がない場合は空
    pub fn wins(&self) -> &[&'static Win] {
        self.cache
            .wins
            .get_or_init(|| self.with_context(|ctx| ctx.calc_wins()).unwrap_or_default())
    }

    pub fn score(&self) -> Option<&Score> {
        self.cache
            .score
            .get_or_init(|| {
                if self.wins().is_empty() {
                    return None;
                }
                let sit = &self.sit;
                self.with_context(|ctx| {
                    calc_score(
                        self.wins(),
                        self.is_closed_hand(),
                        sit.tsumo,
                        sit.seat_wind,
                        sit.prevalent_wind,
                        || ctx.calc_fu(),
                    )
                })
            })
            .as_ref()
    }

    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            error: self.validate(),
            groups: self.all_groups().to_vec(),
            wins: self.wins().to_vec(),
            score: self.score().cloned(),
        }
    }
}

// JSON入力
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardInput {
    pub hidden: Vec<Tile>,
    #[serde(default)]
    pub revealed: Vec<Vec<Tile>>,
    pub winning: Tile,
    #[serde(default)]
    pub dora: Vec<Tile>,
    #[serde(default)]
    pub discards: Vec<Tile>,
    #[serde(flatten)]
    pub situation: Situation,
}

impl BoardInput {
    pub fn into_board(self) -> Board {
        let mut b = Board::new();
        b.set_hidden(self.hidden);
        b.set_revealed(self.revealed);
        b.set_winning(self.winning);
        b.set_dora(self.dora);
        b.set_discards(self.discards);
        b.set_situation(self.situation);
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use Rank::*;

    fn tiles(s: &str) -> Vec<Tile> {
        tiles_from_string(s).unwrap()
    }

    fn tile(s: &str) -> Tile {
        Tile::parse(s).unwrap()
    }

    fn example_board() -> Board {
        let mut b = Board::new();
        b.set_hidden(tiles("2b3b4b4d5d6d7n8n9newewew2d"));
        b.set_winning(tile("2d"));
        b.set_tsumo(true);
        b.set_seat_wind(EastWind);
        b.set_prevalent_wind(EastWind);
        b
    }

    fn names(b: &Board) -> Vec<&'static str> {
        b.wins().iter().map(|w| w.name).collect()
    }

    #[test]
    fn test_example_hand() {
        let b = example_board();
        assert_eq!(b.validate(), None);
        let wins = names(&b);
        for w in ["Menzenchin Tsumo", "Seat Wind", "Prevalent Wind"] {
            assert!(wins.contains(&w), "{:?}", wins);
        }

        let s = b.score().unwrap();
        assert_eq!((s.han, s.fu, s.base_points), (3, 30, 960));
        assert_eq!(s.title, "Closed Honor Triplet (8), Single Wait (2)");
        assert_eq!(s.settlement, "Each player pays 2000 for 5800 in total.");
        assert!(s.settlement.starts_with("Each player pays"));

        // 14枚 + 槓子の数
        let n: usize = b.all_groups().iter().map(|g| g.tiles().len()).sum();
        assert_eq!(n, HAND_SIZE);
    }

    #[test]
    fn test_double_riichi_without_riichi() {
        let mut b = example_board();
        b.set_double_riichi(true);
        let e = b.validate().unwrap();
        assert!(e.contains("Invalid score arguments"), "{}", e);
        assert!(e.contains("riichi"), "{}", e);
        assert!(b.wins().is_empty());
        assert!(b.score().is_none());

        b.set_riichi(true);
        assert_eq!(b.validate(), None);
        assert_eq!(names(&b)[0], "Double Riichi");
        assert!(!names(&b).contains(&"Riichi"));
    }

    #[test]
    fn test_validation_failures() {
        // 枚数不足
        let mut b = example_board();
        b.set_hidden(tiles("2b3b4b4d5d6d7n8n9newewew"));
        let e = b.validate().unwrap();
        assert!(e.contains("too few tiles"), "{}", e);

        // 5枚目の牌, 赤5の重複
        let mut b = example_board();
        b.set_dora(tiles("ew"));
        b.set_discards(tiles("ew$b$b"));
        let e = b.validate().unwrap();
        assert!(e.contains("five or more copies"), "{}", e);
        assert!(e.contains("multiple red fives"), "{}", e);
        assert_eq!(e.lines().count(), 2);

        // 手牌の裏向き牌
        let mut b = example_board();
        b.set_hidden(tiles("2b3b4b4d5d6d7n8n9newewewxx"));
        let e = b.validate().unwrap();
        assert!(e.contains("face-down"), "{}", e);

        // 風, 槓
        let mut b = example_board();
        b.set_seat_wind(Five);
        b.set_kan_win(true);
        let e = b.validate().unwrap();
        assert!(e.contains("Seat wind is not a wind tile"), "{}", e);
        assert!(e.contains("without a kan"), "{}", e);

        // 副露してリーチ
        let mut b = example_board();
        b.set_hidden(tiles("2b3b4b4d5d6d7n8n9n2d"));
        b.set_revealed(vec![tiles("ewewew")]);
        b.set_riichi(true);
        let e = b.validate().unwrap();
        assert!(e.contains("non-closed"), "{}", e);
    }

    #[test]
    fn test_no_win() {
        // 副露して役なし
        let mut b = Board::new();
        b.set_hidden(tiles("4d5d6d7n8n9n2b2b3d4d"));
        b.set_revealed(vec![tiles("1b2b3b")]);
        b.set_winning(tile("5d"));
        b.set_seat_wind(SouthWind);
        b.set_prevalent_wind(EastWind);
        assert!(b.validation().is_empty());
        assert_eq!(
            b.validate().unwrap(),
            "No Win! There is no base win in this hand."
        );
        assert!(b.score().is_none());

        // ドラだけでは和了にならない
        b.set_dora(tiles("1d"));
        assert!(b.validate().is_some());
    }

    #[test]
    fn test_grouping_error() {
        let mut b = example_board();
        b.set_hidden(tiles("1b2b4b4d5d6d7n8n9newewew2d"));
        let e = b.validate().unwrap();
        assert!(e.starts_with("Invalid grouping: "), "{}", e);
        assert!(b.all_groups().last().unwrap().is_error());
        assert!(b.closed_grouping().is_err());
    }

    #[test]
    fn test_closed_kan_and_red_five() {
        let mut b = Board::new();
        b.set_hidden(tiles("2b3b4b4d$d6d6n7n8n5b"));
        b.set_revealed(vec![tiles("xx9n9nxx")]);
        b.set_winning(tile("5b"));
        b.set_tsumo(true);
        b.set_kan_win(true);
        b.set_seat_wind(SouthWind);
        b.set_prevalent_wind(EastWind);
        assert!(b.is_closed_hand());
        assert_eq!(b.validate(), None);
        assert_eq!(
            names(&b),
            vec!["Menzenchin Tsumo", "Rinshan Kaihou", "Red Five"]
        );

        let s = b.score().unwrap();
        assert_eq!((s.han, s.fu), (3, 60));
        assert_eq!(s.base_points, 1920);
        assert_eq!(s.title, "Closed Terminal Kan (32), Single Wait (2)");
        assert_eq!(
            s.settlement,
            "The dealer (EastWind) pays 3900 and other players pay 2000 for 7700 in total."
        );

        // 15枚 (14 + 槓子1)
        assert_eq!(b.hand_tiles().len(), 15);
        assert!(b.hand_tiles().iter().all(|t| !t.is_back()));
    }

    #[test]
    fn test_fu_is_multiple_of_ten() {
        let hands = [
            ("2b3b4b4d5d6d7n8n9newewew2d", "2d"),
            ("2b3b4b5d6d7d3n4n5n5b5b6n8n", "7n"),
            ("2b3b4b5d6d7d3n4n5n5b5b6n7n", "8n"),
            ("1b1b1b5d6d7d3n4n5n9d9d9dwd", "wd"),
        ];
        for tsumo in [false, true] {
            for (hidden, winning) in hands {
                let mut b = Board::new();
                b.set_hidden(tiles(hidden));
                b.set_winning(tile(winning));
                b.set_tsumo(tsumo);
                b.set_seat_wind(SouthWind);
                b.set_prevalent_wind(EastWind);
                if let Some(s) = b.score() {
                    if s.han < 5 {
                        assert_eq!(s.fu % 10, 0, "{}", hidden);
                    }
                }
            }
        }
    }

    #[test]
    fn test_invalidation_table() {
        let mut b = example_board();
        b.score();
        for d in [
            Derived::ClosedGroups,
            Derived::AllGroups,
            Derived::Validation,
            Derived::Wins,
            Derived::Score,
        ] {
            assert!(b.is_cached(d));
        }

        // 捨て牌は分解結果に影響しない
        b.set_discards(tiles("1b"));
        assert!(b.is_cached(Derived::ClosedGroups));
        assert!(b.is_cached(Derived::AllGroups));
        assert!(!b.is_cached(Derived::Validation));
        assert!(!b.is_cached(Derived::Score));

        b.score();
        b.set_tsumo(false);
        assert!(b.is_cached(Derived::Validation));
        assert!(!b.is_cached(Derived::Wins));

        b.set_winning(tile("2d"));
        assert!(!b.is_cached(Derived::ClosedGroups));

        // すべての入力が何らかの導出値を破棄する
        assert_eq!(INVALIDATION.len(), 13);
        for (_, ds) in INVALIDATION {
            assert!(ds.contains(&Derived::Score));
        }
    }

    // 入力をランダムに変更し, 新規に構築したBoardと導出値を比較する
    #[test]
    fn test_cache_coherence() {
        let pool = tiles("1b2b3b4b5b$b6b7b8b9b1d2d3d4d5d6d7d8d9d1n2n3n4n5n6n7n8n9ngdrdwdewswwwnw");
        let hands = [
            "2b3b4b4d5d6d7n8n9newewew2d",
            "2b3b4b5d6d7d3n4n5n5b5b6n7n",
            "1b1b3d3d5n5nwdwd9b9b2d2d7n",
            "1d1d1d2d3d4d5d6d7d8d9d9d9d",
            "2b3b4b4d$d6d6n7n8n5b",
        ];
        let winds = [EastWind, SouthWind, WestWind, NorthWind, Five];

        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut b = Board::new();
        let mut inputs = (Vec::new(), Vec::new(), None, Vec::new(), Vec::new(), Situation::default());

        for _ in 0..400 {
            match rng.gen_range(0..13) {
                0 => {
                    let h = tiles(hands[rng.gen_range(0..hands.len())]);
                    inputs.0 = h.clone();
                    b.set_hidden(h);
                }
                1 => {
                    let r = if rng.gen_bool(0.5) {
                        vec![tiles("xx9n9nxx")]
                    } else {
                        vec![]
                    };
                    inputs.1 = r.clone();
                    b.set_revealed(r);
                }
                2 => {
                    let t = *pool.choose(&mut rng).unwrap();
                    inputs.2 = Some(t);
                    b.set_winning(t);
                }
                3 => {
                    let d: Vec<Tile> = pool.choose_multiple(&mut rng, 2).copied().collect();
                    inputs.3 = d.clone();
                    b.set_dora(d);
                }
                4 => {
                    let d: Vec<Tile> = pool.choose_multiple(&mut rng, 3).copied().collect();
                    inputs.4 = d.clone();
                    b.set_discards(d);
                }
                5 => {
                    let w = *winds.choose(&mut rng).unwrap();
                    inputs.5.seat_wind = w;
                    b.set_seat_wind(w);
                }
                6 => {
                    let w = *winds.choose(&mut rng).unwrap();
                    inputs.5.prevalent_wind = w;
                    b.set_prevalent_wind(w);
                }
                n => {
                    let f = rng.gen_bool(0.5);
                    match n {
                        7 => {
                            inputs.5.tsumo = f;
                            b.set_tsumo(f);
                        }
                        8 => {
                            inputs.5.riichi = f;
                            b.set_riichi(f);
                        }
                        9 => {
                            inputs.5.double_riichi = f;
                            b.set_double_riichi(f);
                        }
                        10 => {
                            inputs.5.ippatsu = f;
                            b.set_ippatsu(f);
                        }
                        11 => {
                            inputs.5.kan_win = f;
                            b.set_kan_win(f);
                        }
                        _ => {
                            inputs.5.last_draw_win = f;
                            b.set_last_draw_win(f);
                        }
                    }
                }
            }

            // 一部の導出値だけを参照してキャッシュを部分的に埋める
            match rng.gen_range(0..4) {
                0 => {
                    b.closed_groups();
                }
                1 => {
                    b.validation();
                }
                2 => {
                    b.wins();
                }
                _ => {
                    b.evaluation();
                }
            }

            let mut fresh = Board::new();
            fresh.set_hidden(inputs.0.clone());
            fresh.set_revealed(inputs.1.clone());
            if let Some(t) = inputs.2 {
                fresh.set_winning(t);
            }
            fresh.set_dora(inputs.3.clone());
            fresh.set_discards(inputs.4.clone());
            fresh.set_situation(inputs.5);

            assert_eq!(b.all_groups(), fresh.all_groups());
            assert_eq!(b.is_closed_hand(), fresh.is_closed_hand());
            assert_eq!(b.validate(), fresh.validate());
            assert_eq!(b.wins(), fresh.wins());
            assert_eq!(b.score(), fresh.score());
        }
    }

    #[test]
    fn test_board_input() {
        let json = r#"{
            "hidden": ["2b","3b","4b","4d","5d","6d","7n","8n","9n","ew","ew","ew","2d"],
            "winning": "2d",
            "seat_wind": "EastWind",
            "prevalent_wind": "EastWind",
            "tsumo": true
        }"#;
        let input: BoardInput = serde_json::from_str(json).unwrap();
        let b = input.into_board();
        let ev = b.evaluation();
        assert_eq!(ev.error, None);
        assert_eq!(ev.score.unwrap().base_points, 960);

        let out = serde_json::to_string(&b.evaluation()).unwrap();
        assert!(out.contains(r#""base_points":960"#), "{}", out);
        assert!(out.contains(r#""name":"Seat Wind""#), "{}", out);
    }
}
