// ログ出力
// 出力レベルは環境変数 MAHJONG_LOG (error|warn|info|debug) で指定. 未指定の場合は warn
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

static LEVEL: OnceLock<Level> = OnceLock::new();

pub fn max_level() -> Level {
    *LEVEL.get_or_init(|| {
        std::env::var("MAHJONG_LOG")
            .ok()
            .and_then(|s| Level::from_name(&s))
            .unwrap_or(Level::Warn)
    })
}

// 初回の出力より前に呼ばれた場合のみ有効
pub fn set_max_level(level: Level) -> bool {
    LEVEL.set(level).is_ok()
}

#[inline]
pub fn enabled(level: Level) -> bool {
    level <= max_level()
}

#[macro_export]
macro_rules! log_at {
    ($lv:expr, $($arg:tt)*) => {
        if $crate::util::log::enabled($lv) {
            eprintln!(
                "[{}]({}:{}) {}",
                $lv.tag(),
                file!(),
                line!(),
                format_args!($($arg)*)
            )
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::util::log::Level::Error, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::util::log::Level::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::util::log::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::util::log::Level::Debug, $($arg)*)
    };
}

#[test]
fn test_level_order() {
    assert!(Level::Error < Level::Warn);
    assert!(Level::Info < Level::Debug);
    assert_eq!(Level::from_name(" Debug "), Some(Level::Debug));
    assert_eq!(Level::from_name("trace"), None);
    assert!(enabled(Level::Error));
}
