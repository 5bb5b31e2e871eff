// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The default challenge reach for new seasons.
///
/// A team may challenge opponents up to this many ranks above itself.
/// Individual seasons may override the value via their configuration.
pub const DEFAULT_CHALLENGE_REACH: u32 = 2;

/// The direction a team moved between two standings snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    /// The team's rank improved (lower number).
    Up,
    /// The team's rank worsened (higher number).
    Down,
    /// The team's rank is unchanged, or no previous snapshot contains it.
    None,
}

impl Movement {
    /// Converts this movement to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::None => "none",
        }
    }
}

/// The ladder reach rule.
///
/// A team may only challenge an opponent ranked numerically better than
/// itself, and only within `reach` ranks. Ranks are 1-based: rank 1 is the
/// top of the ladder.
///
/// # Arguments
///
/// * `challenger_rank` - The challenger's current 1-based rank
/// * `target_rank` - The target's current 1-based rank
/// * `reach` - The season's configured challenge reach
#[must_use]
pub const fn can_challenge(challenger_rank: u32, target_rank: u32, reach: u32) -> bool {
    target_rank < challenger_rank && challenger_rank - target_rank <= reach
}

/// Compares a team's position between the current and previous snapshots.
///
/// A team missing from the previous snapshot (for example one that just
/// enrolled) has no movement. Positions are compared by index: a smaller
/// index is a better rank.
///
/// # Arguments
///
/// * `team_id` - The team to look up
/// * `current` - The current snapshot's ordered team ids
/// * `previous` - The previous snapshot's ordered team ids, if any
#[must_use]
pub fn compute_movement(team_id: i64, current: &[i64], previous: Option<&[i64]>) -> Movement {
    let Some(current_pos) = current.iter().position(|&id| id == team_id) else {
        return Movement::None;
    };
    let Some(previous_pos) = previous.and_then(|prev| prev.iter().position(|&id| id == team_id))
    else {
        return Movement::None;
    };

    match current_pos.cmp(&previous_pos) {
        std::cmp::Ordering::Less => Movement::Up,
        std::cmp::Ordering::Greater => Movement::Down,
        std::cmp::Ordering::Equal => Movement::None,
    }
}
