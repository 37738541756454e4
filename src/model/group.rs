use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Pair,     // 雀頭
    Triplet,  // 刻子
    Sequence, // 順子
    Kan,      // 槓子
    Orphan,   // 国士無双の単独牌
    Error,    // 分類不可 (診断メッセージのみ)
}

// 2~4枚の牌の組み合わせ
// 分類に失敗しても例外は発生させず, Errorとして診断メッセージを保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileGroup {
    tiles: Vec<Tile>,
    kind: GroupKind,
    closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TileGroup {
    pub fn new(tiles: Vec<Tile>, closed: bool) -> Self {
        match tiles.len() {
            2 => Self::new_pair(tiles, closed),
            3 => Self::new_set(tiles, closed),
            4 => Self::new_kan(tiles),
            1 => Self::error(
                tiles,
                "A single tile can only be grouped as an orphan of thirteen orphans",
            ),
            n => Self::error(tiles, format!("Cannot group {} tiles", n)),
        }
    }

    // 国士無双の単独牌
    pub fn orphan(tile: Tile) -> Self {
        Self {
            tiles: vec![tile],
            kind: GroupKind::Orphan,
            closed: true,
            error: None,
        }
    }

    pub fn error(tiles: Vec<Tile>, message: impl Into<String>) -> Self {
        Self {
            tiles,
            kind: GroupKind::Error,
            closed: false,
            error: Some(message.into()),
        }
    }

    fn with_kind(tiles: Vec<Tile>, kind: GroupKind, closed: bool) -> Self {
        Self {
            tiles,
            kind,
            closed,
            error: None,
        }
    }

    fn new_pair(tiles: Vec<Tile>, closed: bool) -> Self {
        if !Tile::is_pair(&tiles) {
            let msg = format!("Two tiles that are not a pair: {}", tiles_to_string(&tiles));
            return Self::error(tiles, msg);
        }
        if !closed {
            let msg = format!("A pair must be closed: {}", tiles_to_string(&tiles));
            return Self::error(tiles, msg);
        }
        Self::with_kind(tiles, GroupKind::Pair, true)
    }

    fn new_set(mut tiles: Vec<Tile>, closed: bool) -> Self {
        if Tile::is_triplet(&tiles) {
            return Self::with_kind(tiles, GroupKind::Triplet, closed);
        }

        // 順子は数字の昇順に並べて連続しているか判定
        tiles.sort_by_key(|t| t.rank());
        let suit = tiles[0].suit();
        let is_sequence = suit.is_number()
            && tiles.iter().all(|t| t.suit() == suit)
            && tiles
                .windows(2)
                .all(|w| w[0].rank().code() + 1 == w[1].rank().code());
        if is_sequence {
            Self::with_kind(tiles, GroupKind::Sequence, closed)
        } else {
            let msg = format!(
                "Three tiles that are neither a triplet nor a sequence: {}",
                tiles_to_string(&tiles)
            );
            Self::error(tiles, msg)
        }
    }

    fn new_kan(mut tiles: Vec<Tile>) -> Self {
        if tiles.windows(2).all(|w| w[0].soft_equals(&w[1])) {
            let closed = tiles.iter().filter(|t| t.is_face_down()).count() == 2;
            return Self::with_kind(tiles, GroupKind::Kan, closed);
        }

        // 暗槓: 裏向き2枚 + 同じ牌2枚
        let backs: Vec<usize> = (0..4).filter(|&i| tiles[i].is_back()).collect();
        let shown: Vec<Tile> = tiles.iter().filter(|t| !t.is_back()).copied().collect();
        if backs.len() != 2 || !Tile::is_pair(&shown) {
            let msg = format!("Four tiles that are not a kan: {}", tiles_to_string(&tiles));
            return Self::error(tiles, msg);
        }

        let model = shown[0];
        let mut grant_red = model.rank() == Rank::Five && !tiles.iter().any(|t| t.is_red());
        for i in backs {
            match tiles[i].resolve(model.suit(), model.rank(), grant_red) {
                Ok(t) => tiles[i] = t,
                Err(e) => {
                    let msg = format!("{}: {}", e, tiles_to_string(&tiles));
                    return Self::error(tiles, msg);
                }
            }
            grant_red = false;
        }
        Self::with_kind(tiles, GroupKind::Kan, true)
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == GroupKind::Error
    }

    // 刻子または槓子
    #[inline]
    pub fn is_tuplet(&self) -> bool {
        matches!(self.kind, GroupKind::Triplet | GroupKind::Kan)
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.kind == GroupKind::Sequence
    }

    // 代表牌 (順子は最小の牌)
    pub fn head(&self) -> Option<&Tile> {
        self.tiles.first()
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.iter().any(|t| t.soft_equals(tile))
    }

    pub fn has_end(&self) -> bool {
        self.tiles.iter().any(|t| t.is_end())
    }

    pub fn has_terminal(&self) -> bool {
        self.tiles.iter().any(|t| t.is_terminal())
    }
}

impl fmt::Display for TileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tiles_to_string(&self.tiles))?;
        if let Some(e) = &self.error {
            write!(f, "({})", e)?;
        }
        Ok(())
    }
}

pub fn groups_to_string(groups: &[TileGroup]) -> String {
    crate::util::misc::vec_to_string(groups)
}

#[cfg(test)]
fn group(s: &str, closed: bool) -> TileGroup {
    TileGroup::new(tiles_from_string(s).unwrap(), closed)
}

#[test]
fn test_classify() {
    assert_eq!(group("3d3d", true).kind(), GroupKind::Pair);
    assert_eq!(group("3d3d", false).kind(), GroupKind::Error);
    assert_eq!(group("3d4d", true).kind(), GroupKind::Error);
    assert_eq!(group("gdgdgd", false).kind(), GroupKind::Triplet);
    assert_eq!(group("ewswww", true).kind(), GroupKind::Error);
    assert_eq!(group("9n1n2n", true).kind(), GroupKind::Error);
    assert_eq!(group("xxxxxx", true).kind(), GroupKind::Error);
    assert_eq!(group("1b", true).kind(), GroupKind::Error);

    let g = group("4b2b3b", false);
    assert_eq!(g.kind(), GroupKind::Sequence);
    assert_eq!(g.to_string(), "[2b, 3b, 4b]");
    assert!(!g.is_closed());
}

#[test]
fn test_classify_is_total() {
    let pool = tiles_from_string("1b2b3b$b5bewgdxx9n").unwrap();
    for a in &pool {
        for b in &pool {
            for c in &pool {
                let g = TileGroup::new(vec![*a, *b, *c], true);
                assert!(g.kind() != GroupKind::Orphan);
                assert_eq!(g.is_error(), g.error_message().is_some());
                for d in &pool {
                    let g = TileGroup::new(vec![*a, *b, *c, *d], false);
                    assert!(matches!(g.kind(), GroupKind::Kan | GroupKind::Error));
                }
            }
        }
    }
}

#[test]
fn test_kan() {
    let g = group("7n7n7n7n", false);
    assert_eq!(g.kind(), GroupKind::Kan);
    assert!(!g.is_closed());

    // 暗槓は裏向きの牌を確定させる
    let g = group("xx7n7nxx", false);
    assert_eq!(g.kind(), GroupKind::Kan);
    assert!(g.is_closed());
    assert!(g.tiles().iter().all(|t| !t.is_back()));
    assert!(g.tiles().iter().all(|t| t.soft_equals(&g.tiles()[1])));

    // 赤5は最初の裏向き牌にのみ付与
    let g = group("xx5d5dxx", false);
    let reds: Vec<bool> = g.tiles().iter().map(|t| t.is_red()).collect();
    assert_eq!(reds, vec![true, false, false, false]);
    let g = group("xx$d5dxx", false);
    assert_eq!(g.tiles().iter().filter(|t| t.is_red()).count(), 1);

    // 鳴いた裏向き牌は確定不可
    let tiles = vec![
        Tile::back().called(),
        Tile::parse("7n").unwrap(),
        Tile::parse("7n").unwrap(),
        Tile::back(),
    ];
    assert!(TileGroup::new(tiles, false).is_error());
    assert!(group("xx7n6nxx", false).is_error());
    assert!(group("xxxx7n7n7n", false).is_error());
}
