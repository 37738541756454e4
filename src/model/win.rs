use super::*;

// 役満の倍率
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Yaakuman {
    #[default]
    None,
    Single,
    Double,
}

// 役 (ドラを含む)
// 翻数がNoneの場合, その門前/副露の状態では成立しない
#[derive(PartialEq, Eq, Serialize)]
pub struct Win {
    pub name: &'static str,
    pub desc: &'static str,
    pub open_han: Option<u32>,
    pub closed_han: Option<u32>,
    pub yaakuman: Yaakuman,
}

impl Win {
    #[inline]
    pub fn han(&self, closed: bool) -> Option<u32> {
        if closed {
            self.closed_han
        } else {
            self.open_han
        }
    }

    #[inline]
    pub fn is_yaakuman(&self) -> bool {
        self.yaakuman != Yaakuman::None
    }
}

impl fmt::Debug for Win {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {:?}, {:?}, {:?})",
            self.name, self.closed_han, self.open_han, self.yaakuman
        )
    }
}

impl fmt::Display for Win {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
