// 和了形の分解, 役と点数の計算を行うモジュール
pub mod board;
pub mod catalog;
pub mod grouper;
pub mod point;
pub mod validate;
pub mod yaku;

pub use self::{
    board::{closed_hand, Board, BoardInput, Derived, Evaluation, Input, Situation},
    catalog::WinCatalog,
    grouper::{Grouping, GroupingFailure, HandGrouper, HandShape},
    point::{calc_base_points, calc_score, settlement, Score},
    yaku::WinContext,
};
