use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// 牌の組み合わせ(種別, 数字, 赤5)が不正
    InvalidTile { message: String },
    /// 手牌・牌の集合が不正 (枚数, 5枚目の牌, 赤5の重複, 未確定の裏向き牌)
    InvalidHandAndTiles { message: String },
    /// 状況フラグや風の指定が矛盾している
    InvalidScoreArguments { message: String },
    /// 面子と雀頭に分解できない
    InvalidGrouping { message: String },
}

impl EvalError {
    pub fn tile(message: impl Into<String>) -> Self {
        Self::InvalidTile {
            message: message.into(),
        }
    }

    pub fn hand(message: impl Into<String>) -> Self {
        Self::InvalidHandAndTiles {
            message: message.into(),
        }
    }

    pub fn score(message: impl Into<String>) -> Self {
        Self::InvalidScoreArguments {
            message: message.into(),
        }
    }

    pub fn grouping(message: impl Into<String>) -> Self {
        Self::InvalidGrouping {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidTile { message }
            | Self::InvalidHandAndTiles { message }
            | Self::InvalidScoreArguments { message }
            | Self::InvalidGrouping { message } => message,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTile { message } => write!(f, "Invalid tile: {}", message),
            Self::InvalidHandAndTiles { message } => {
                write!(f, "Invalid hand and tiles: {}", message)
            }
            Self::InvalidScoreArguments { message } => {
                write!(f, "Invalid score arguments: {}", message)
            }
            Self::InvalidGrouping { message } => write!(f, "Invalid grouping: {}", message),
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;

#[test]
fn test_display() {
    let e = EvalError::score("Cannot have double riichi without riichi");
    assert_eq!(
        e.to_string(),
        "Invalid score arguments: Cannot have double riichi without riichi"
    );
    assert_eq!(e.message(), "Cannot have double riichi without riichi");
}
