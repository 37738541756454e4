// 牌と役のデータモデル
mod define;
mod error;
mod group;
mod tile;
mod win;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use error::*;
pub use group::*;
pub use tile::*;
pub use win::*;
