// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Which side of a match a player belongs to. Team one is always the
/// original challenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The challenging team.
    Team1,
    /// The challenged team.
    Team2,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Team1 => Self::Team2,
            Self::Team2 => Self::Team1,
        }
    }
}

/// Determines which side of a match a player is on, if any.
///
/// This is the participant check every mutating operation performs as
/// defense in depth, independent of the surrounding layer's authorization.
///
/// # Arguments
///
/// * `team1_members` - Player references of the challenging team
/// * `team2_members` - Player references of the challenged team
/// * `player_id` - The acting player
#[must_use]
pub fn side_of_player(team1_members: &[i64], team2_members: &[i64], player_id: i64) -> Option<Side> {
    if team1_members.contains(&player_id) {
        Some(Side::Team1)
    } else if team2_members.contains(&player_id) {
        Some(Side::Team2)
    } else {
        None
    }
}
