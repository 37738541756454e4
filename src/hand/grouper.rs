use std::fmt;

use serde::Serialize;

use crate::debug;
use crate::model::*;

// 和了形の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandShape {
    Standard,        // 4面子1雀頭
    SevenPairs,      // 七対子
    ThirteenOrphans, // 国士無双
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    pub groups: Vec<TileGroup>,
    pub shape: HandShape,
}

// 分解に失敗した時点の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingFailure {
    pub found: Vec<TileGroup>,
    pub remaining: Vec<Tile>,
    pub message: String,
}

impl GroupingFailure {
    // 見つかった面子 + 残りの牌をErrorとして末尾に追加したリスト
    pub fn into_groups(self) -> Vec<TileGroup> {
        let msg = self.to_string();
        let mut groups = self.found;
        groups.push(TileGroup::error(self.remaining, msg));
        groups
    }

    pub fn to_error(&self) -> EvalError {
        EvalError::grouping(self.to_string())
    }
}

impl fmt::Display for GroupingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Found => {}, invalid => {}",
            self.message,
            groups_to_string(&self.found),
            tiles_to_string(&self.remaining)
        )
    }
}

pub struct HandGrouper;

impl HandGrouper {
    // 手牌(和了牌を含む)を面子と雀頭に分解する
    // 特殊形(七対子, 国士無双)を先に判定し, 成立すればそれを返す
    pub fn create_closed_groups(tiles: &[Tile]) -> Result<Grouping, GroupingFailure> {
        if let Some(groups) = seven_pairs(tiles) {
            return Ok(Grouping {
                groups,
                shape: HandShape::SevenPairs,
            });
        }
        if let Some(groups) = thirteen_orphans(tiles) {
            return Ok(Grouping {
                groups,
                shape: HandShape::ThirteenOrphans,
            });
        }

        let search = Search { tiles };
        let state = State {
            remaining: (0..tiles.len()).collect(),
            found: vec![],
            pair: false,
            sorted: false,
        };
        let found = search.reduce(state)?;
        Ok(Grouping {
            groups: found.iter().map(|g| search.group(g)).collect(),
            shape: HandShape::Standard,
        })
    }

    // 失敗時は末尾にErrorグループを含むリストを返す (表示用)
    pub fn closed_groups_or_error(tiles: &[Tile]) -> Vec<TileGroup> {
        match Self::create_closed_groups(tiles) {
            Ok(g) => g.groups,
            Err(e) => e.into_groups(),
        }
    }
}

// 七対子: 先頭から順に最初に見つかった対子を確定させる (全探索はしない)
fn seven_pairs(tiles: &[Tile]) -> Option<Vec<TileGroup>> {
    if tiles.len() != HAND_SIZE {
        return None;
    }

    let mut used = [false; HAND_SIZE];
    let mut groups = vec![];
    for i in 0..tiles.len() {
        if used[i] {
            continue;
        }
        for j in i + 1..tiles.len() {
            if !used[j] && tiles[i].soft_equals(&tiles[j]) {
                used[i] = true;
                used[j] = true;
                groups.push(TileGroup::new(vec![tiles[i], tiles[j]], true));
                break;
            }
        }
    }

    if groups.len() == 7 {
        Some(groups)
    } else {
        None
    }
}

// 国士無双: 全て么九牌かつ13種
fn thirteen_orphans(tiles: &[Tile]) -> Option<Vec<TileGroup>> {
    if tiles.len() != HAND_SIZE || !tiles.iter().all(|t| t.is_end()) {
        return None;
    }

    let mut kinds: Vec<Vec<Tile>> = vec![];
    for t in tiles {
        match kinds.iter_mut().find(|k| k[0].soft_equals(t)) {
            Some(k) => k.push(*t),
            None => kinds.push(vec![*t]),
        }
    }
    if kinds.len() != 13 {
        return None;
    }

    let groups = kinds
        .into_iter()
        .map(|k| {
            if k.len() == 1 {
                TileGroup::orphan(k[0])
            } else {
                TileGroup::new(k, true)
            }
        })
        .collect();
    Some(groups)
}

// 探索状態. 牌そのものは動かさずインデックスのみを管理する
#[derive(Debug, Clone)]
struct State {
    remaining: Vec<usize>,
    found: Vec<Vec<usize>>,
    pair: bool,
    sorted: bool,
}

impl State {
    // remaining中の位置(昇順)を取り除いてグループとして確定
    fn take(&mut self, pos: &[usize]) {
        let group = pos.iter().map(|&p| self.remaining[p]).collect();
        for &p in pos.iter().rev() {
            self.remaining.remove(p);
        }
        self.found.push(group);
    }
}

struct Search<'a> {
    tiles: &'a [Tile],
}

impl<'a> Search<'a> {
    fn tile(&self, st: &State, pos: usize) -> Tile {
        self.tiles[st.remaining[pos]]
    }

    fn pick(&self, st: &State, pos: &[usize]) -> Vec<Tile> {
        pos.iter().map(|&p| self.tile(st, p)).collect()
    }

    fn group(&self, idxs: &[usize]) -> TileGroup {
        TileGroup::new(idxs.iter().map(|&i| self.tiles[i]).collect(), true)
    }

    fn fail(&self, st: &State, msg: impl Into<String>) -> GroupingFailure {
        GroupingFailure {
            found: st.found.iter().map(|g| self.group(g)).collect(),
            remaining: st.remaining.iter().map(|&i| self.tiles[i]).collect(),
            message: msg.into(),
        }
    }

    fn reduce(&self, mut st: State) -> Result<Vec<Vec<usize>>, GroupingFailure> {
        while !st.remaining.is_empty() {
            let n = st.remaining.len();
            match n {
                1 => {
                    return Err(self.fail(
                        &st,
                        "Cannot have a single tile left over when creating closed groups",
                    ))
                }
                2 => {
                    if !Tile::is_pair(&self.pick(&st, &[0, 1])) {
                        return Err(self.fail(&st, "The last two tiles are not a pair"));
                    }
                    st.take(&[0, 1]);
                    st.pair = true;
                }
                3 => {
                    if !Tile::is_meld(&self.pick(&st, &[0, 1, 2])) {
                        return Err(self.fail(&st, "Bad meld while creating closed groups"));
                    }
                    st.take(&[0, 1, 2]);
                }
                4 | 7 | 10 | 13 => {
                    return Err(self.fail(
                        &st,
                        format!(
                            "Cannot create groups from {} tiles (needs to be multiple of 3 with pair)",
                            n
                        ),
                    ))
                }
                5 | 6 | 9 | 12 => {
                    if !st.sorted {
                        let tiles = self.tiles;
                        st.remaining.sort_by_key(|&i| tiles[i].rank());
                        st.sorted = true;
                    }
                    match self.find_any_meld(&st) {
                        Some(m) => st.take(&m),
                        None => {
                            return Err(self.fail(
                                &st,
                                format!("Could not find any meld in the last {} tiles", n),
                            ))
                        }
                    }
                }
                8 | 11 | 14 => {
                    if st.pair {
                        return Err(self.fail(
                            &st,
                            format!("Cannot create groups from {} tiles because pair was already made", n),
                        ));
                    }

                    // 順子になりえない刻子を先に確定
                    if let Some(t) = self.find_non_sequence_triplet(&st) {
                        st.take(&t);
                        continue;
                    }

                    let pairs = self.find_best_valid_pairs(&st);
                    match pairs.len() {
                        0 => {
                            return Err(self.fail(
                                &st,
                                format!("Could not find a pair in the last {} tiles", n),
                            ))
                        }
                        1 => {
                            st.take(&pairs[0]);
                            st.pair = true;
                        }
                        _ => return self.backtrack(st, &pairs),
                    }
                }
                _ => return Err(self.fail(&st, format!("Too many closed tiles: {}", n))),
            }
        }
        Ok(st.found)
    }

    // 雀頭の候補を順に試し, 最初に分解できたものを採用
    fn backtrack(
        &self,
        st: State,
        pairs: &[[usize; 2]],
    ) -> Result<Vec<Vec<usize>>, GroupingFailure> {
        for p in pairs {
            let mut next = st.clone();
            next.take(p);
            next.pair = true;
            match self.reduce(next) {
                Ok(found) => return Ok(found),
                Err(e) => debug!("pair {} rejected: {}", self.tile(&st, p[0]), e),
            }
        }

        let cands: Vec<Vec<Tile>> = pairs.iter().map(|p| self.pick(&st, p)).collect();
        let cands: Vec<String> = cands.iter().map(|c| tiles_to_string(c)).collect();
        Err(self.fail(
            &st,
            format!("No pair choice leads to a valid grouping. Pairs: [{}]", cands.join(", ")),
        ))
    }

    fn triples(n: usize) -> impl Iterator<Item = [usize; 3]> {
        (0..n).flat_map(move |i| {
            (i + 1..n).flat_map(move |j| (j + 1..n).map(move |k| [i, j, k]))
        })
    }

    // 刻子を優先し, 無ければ順子
    fn find_any_meld(&self, st: &State) -> Option<[usize; 3]> {
        let n = st.remaining.len();
        Self::triples(n)
            .find(|m| Tile::is_triplet(&self.pick(st, m)))
            .or_else(|| Self::triples(n).find(|m| Tile::is_sequence(&self.pick(st, m))))
    }

    // 他の2枚と順子を作れない刻子
    fn find_non_sequence_triplet(&self, st: &State) -> Option<[usize; 3]> {
        let n = st.remaining.len();
        Self::triples(n).find(|m| {
            let head = self.tile(st, m[0]);
            if !Tile::is_triplet(&self.pick(st, m)) {
                return false;
            }
            if head.is_honor() {
                return true;
            }
            let others: Vec<usize> = (0..n).filter(|p| !m.contains(p)).collect();
            !others.iter().enumerate().any(|(a, &x)| {
                others[a + 1..]
                    .iter()
                    .any(|&y| Tile::is_sequence(&[head, self.tile(st, x), self.tile(st, y)]))
            })
        })
    }

    // 他の2枚と面子を作れるか (jは除外しない)
    fn can_meld(&self, st: &State, i: usize) -> bool {
        let n = st.remaining.len();
        let t = self.tile(st, i);
        (0..n).filter(|&k| k != i).any(|k| {
            (k + 1..n)
                .filter(|&l| l != i)
                .any(|l| Tile::is_meld(&[t, self.tile(st, k), self.tile(st, l)]))
        })
    }

    // 雀頭の候補. どちらかの牌が面子を作れない対子があれば, それだけを返す
    fn find_best_valid_pairs(&self, st: &State) -> Vec<[usize; 2]> {
        let n = st.remaining.len();
        let mut pairs: Vec<[usize; 2]> = vec![];
        for i in 0..n {
            for j in i + 1..n {
                let (a, b) = (self.tile(st, i), self.tile(st, j));
                if pairs.iter().any(|p| {
                    let t = self.tile(st, p[1]);
                    t.soft_equals(&a) || t.soft_equals(&b)
                }) {
                    continue;
                }
                if !a.soft_equals(&b) {
                    continue;
                }
                if !self.can_meld(st, i) || !self.can_meld(st, j) {
                    return vec![[i, j]];
                }
                pairs.push([i, j]);
            }
        }
        pairs
    }
}

#[cfg(test)]
fn hand(s: &str) -> Vec<Tile> {
    tiles_from_string(s).unwrap()
}

#[cfg(test)]
fn kinds(groups: &[TileGroup]) -> Vec<GroupKind> {
    groups.iter().map(|g| g.kind()).collect()
}

#[test]
fn test_seven_pairs() {
    let g = HandGrouper::create_closed_groups(&hand("1b1b2b2b3b3b4b4b5b5b6b6b7b7b")).unwrap();
    assert_eq!(g.shape, HandShape::SevenPairs);
    assert_eq!(kinds(&g.groups), vec![GroupKind::Pair; 7]);

    let g = HandGrouper::create_closed_groups(&hand("ew1b9dewrd1brd5n$n9d3b3b7d7d")).unwrap();
    assert_eq!(g.shape, HandShape::SevenPairs);
    assert_eq!(g.groups[0].to_string(), "[ew, ew]");
}

#[test]
fn test_thirteen_orphans() {
    let g = HandGrouper::create_closed_groups(&hand("1b9b1d9d1n9ngdrdwdewswwwnwnw")).unwrap();
    assert_eq!(g.shape, HandShape::ThirteenOrphans);
    assert_eq!(g.groups.len(), 13);
    let k = kinds(&g.groups);
    assert_eq!(k.iter().filter(|&&k| k == GroupKind::Orphan).count(), 12);
    assert_eq!(k.iter().filter(|&&k| k == GroupKind::Pair).count(), 1);

    // 2種足りない
    assert!(HandGrouper::create_closed_groups(&hand("1b9b1d9d1n9ngdrdwdewswnwnwnw")).is_err());
}

#[test]
fn test_standard() {
    let tiles = hand("2b3b4b4d5d6d7n8n9newewew2d2d");
    let g = HandGrouper::create_closed_groups(&tiles).unwrap();
    assert_eq!(g.shape, HandShape::Standard);
    assert_eq!(
        groups_to_string(&g.groups),
        "[[ew, ew, ew], [2d, 2d], [2b, 3b, 4b], [4d, 5d, 6d], [7n, 8n, 9n]]"
    );
    // 同じ入力には同じ結果
    for _ in 0..10 {
        assert_eq!(HandGrouper::create_closed_groups(&tiles).unwrap(), g);
    }

    // 副露後の残り
    let g = HandGrouper::create_closed_groups(&hand("6n7n8n1d1d")).unwrap();
    assert_eq!(kinds(&g.groups), vec![GroupKind::Sequence, GroupKind::Pair]);
    let g = HandGrouper::create_closed_groups(&hand("5b5b")).unwrap();
    assert_eq!(kinds(&g.groups), vec![GroupKind::Pair]);
}

#[test]
fn test_triplet_or_sequence() {
    // 1b1b1b2b3b: 111+23 ではなく 123+11
    let g = HandGrouper::create_closed_groups(&hand("1b1b1b2b3b4d5d6d7d8d9dsw sw sw")).unwrap();
    let s = groups_to_string(&g.groups);
    assert!(s.contains("[1b, 1b]"), "{}", s);
    assert!(s.contains("[1b, 2b, 3b]"), "{}", s);
}

#[test]
fn test_backtrack() {
    // 雀頭の候補が2d,3d,4dの3つあり, 4dだけが分解に成功する
    let g = HandGrouper::create_closed_groups(&hand("2d2d3d3d4d4d4d4d6n7n8nrdrdrd")).unwrap();
    assert_eq!(
        groups_to_string(&g.groups),
        "[[rd, rd, rd], [4d, 4d], [2d, 3d, 4d], [2d, 3d, 4d], [6n, 7n, 8n]]"
    );

    // どの候補でも分解できない
    let e = HandGrouper::create_closed_groups(&hand("2d2d3d3d4d4d4d9b6n7n8nrdrdrd")).unwrap_err();
    assert!(e.message.starts_with("No pair choice"), "{}", e);
    assert_eq!(e.found.len(), 1);
    assert_eq!(e.remaining.len(), 11);
}

#[test]
fn test_failure() {
    let tiles = hand("1b2b4b5d5d6d7n8n9newewew2d2d");
    let e = HandGrouper::create_closed_groups(&tiles).unwrap_err();
    assert!(!e.remaining.is_empty());
    assert!(e.to_error().to_string().starts_with("Invalid grouping: "));

    let groups = HandGrouper::closed_groups_or_error(&tiles);
    assert!(groups.last().unwrap().is_error());
    assert!(groups[..groups.len() - 1].iter().all(|g| !g.is_error()));

    for n in [1, 4, 7, 10, 13] {
        let tiles = vec![Tile::parse("3n").unwrap(); n];
        assert!(HandGrouper::create_closed_groups(&tiles).is_err());
    }
}
