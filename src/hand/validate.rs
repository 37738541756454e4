// 採点前の検証
// 各項目は独立して判定し, 失敗したものをすべて返却する
use crate::model::*;

use super::board::Situation;

pub struct HandSnapshot<'a> {
    pub hidden: &'a [Tile],
    pub winning: Option<Tile>,
    pub revealed: &'a [Vec<Tile>],       // 副露 (分類前)
    pub revealed_groups: &'a [TileGroup], // 副露 (分類後, 暗槓の裏向き牌は確定済み)
    pub all_groups: &'a [TileGroup],
    pub dora: &'a [Tile],
    pub discards: &'a [Tile],
    pub sit: &'a Situation,
    pub is_closed: bool,
}

pub fn validate(s: &HandSnapshot) -> Vec<EvalError> {
    [
        check_hand_size(s),
        check_flipped_tiles(s),
        check_board_legality(s),
        check_riichi(s),
        check_winds(s),
        check_kan_win(s),
        check_grouping(s),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

// 槓子は3枚として数える
fn check_hand_size(s: &HandSnapshot) -> EvalResult<()> {
    if s.winning.is_none() {
        Err(EvalError::hand("The winning tile is not set"))?;
    }

    let revealed: usize = s
        .revealed
        .iter()
        .map(|g| if g.len() == TILE { g.len() - 1 } else { g.len() })
        .sum();
    let count = s.hidden.len() + 1 + revealed;
    let detail = || {
        format!(
            "{} closed tiles, {} revealed groups",
            s.hidden.len() + 1,
            s.revealed.len()
        )
    };
    if count > HAND_SIZE {
        Err(EvalError::hand(format!(
            "The hand has too many tiles, with {} extra tiles! {}",
            count - HAND_SIZE,
            detail()
        )))?;
    }
    if count < HAND_SIZE {
        Err(EvalError::hand(format!(
            "The hand has too few tiles, with {} tiles missing! {}",
            HAND_SIZE - count,
            detail()
        )))?;
    }
    Ok(())
}

// 裏向きの牌は暗槓の中でのみ許可 (分類時に確定済み)
fn check_flipped_tiles(s: &HandSnapshot) -> EvalResult<()> {
    let loose = s
        .hidden
        .iter()
        .chain(s.winning.iter())
        .chain(s.dora)
        .chain(s.discards);
    let grouped = s.revealed_groups.iter().flat_map(|g| g.tiles());
    let flipped = loose.chain(grouped).filter(|t| t.is_back()).count();
    if flipped > 0 {
        Err(EvalError::hand(format!(
            "There are {} unresolved face-down tiles! Face-down tiles are only allowed as the two hidden tiles of a closed kan",
            flipped
        )))?;
    }
    Ok(())
}

fn check_board_legality(s: &HandSnapshot) -> EvalResult<()> {
    let tiles: Vec<Tile> = s
        .hidden
        .iter()
        .chain(s.winning.iter())
        .chain(s.revealed_groups.iter().flat_map(|g| g.tiles()))
        .chain(s.dora)
        .chain(s.discards)
        .copied()
        .collect();

    if has_quintuplet(&tiles) {
        Err(EvalError::hand(
            "There are five or more copies of a single tile in the hand, dora indicators and discards!",
        ))?;
    }

    let reds: Vec<Tile> = tiles.iter().filter(|t| t.is_red()).copied().collect();
    for suit in [Suit::Bamboo, Suit::Dot, Suit::Character] {
        if reds.iter().filter(|t| t.suit() == suit).count() > 1 {
            Err(EvalError::hand(format!(
                "There are multiple red fives of the same suit! All red fives: {}",
                tiles_to_string(&reds)
            )))?;
        }
    }
    Ok(())
}

fn check_riichi(s: &HandSnapshot) -> EvalResult<()> {
    if s.sit.double_riichi && !s.sit.riichi {
        Err(EvalError::score("Cannot have double riichi without riichi"))?;
    }
    if s.sit.ippatsu && !s.sit.riichi {
        Err(EvalError::score("Cannot have ippatsu without riichi"))?;
    }
    if s.sit.riichi && !s.is_closed {
        Err(EvalError::score("Cannot riichi on a non-closed hand"))?;
    }
    Ok(())
}

fn check_winds(s: &HandSnapshot) -> EvalResult<()> {
    if !s.sit.prevalent_wind.is_wind() {
        Err(EvalError::score(format!(
            "Prevalent wind is not a wind tile: {:?}",
            s.sit.prevalent_wind
        )))?;
    }
    if !s.sit.seat_wind.is_wind() {
        Err(EvalError::score(format!(
            "Seat wind is not a wind tile: {:?}",
            s.sit.seat_wind
        )))?;
    }
    Ok(())
}

fn check_kan_win(s: &HandSnapshot) -> EvalResult<()> {
    if s.sit.kan_win && !s.all_groups.iter().any(|g| g.kind() == GroupKind::Kan) {
        Err(EvalError::score("Cannot win on a kan without a kan in the hand"))?;
    }
    Ok(())
}

fn check_grouping(s: &HandSnapshot) -> EvalResult<()> {
    let errors: Vec<&str> = s
        .all_groups
        .iter()
        .filter_map(|g| g.error_message())
        .collect();
    if !errors.is_empty() {
        Err(EvalError::grouping(errors.join("; ")))?;
    }
    Ok(())
}
