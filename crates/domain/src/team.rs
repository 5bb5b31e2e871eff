// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The atomic unit that occupies one rank slot in a ladder.
///
/// A team holds one player in individual seasons and several in team
/// seasons. Once a team has match history it is never deleted; opting out
/// marks it inactive while preserving its place in standings history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the team has not been persisted yet.
    team_id: Option<i64>,
    /// The season this team is enrolled in.
    season_id: i64,
    /// Ordered member player references. Player identity is external.
    member_player_ids: Vec<i64>,
    /// Whether the team has opted out of further play.
    opted_out: bool,
}

impl Team {
    /// Creates a new `Team` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `season_id` - The season this team enrolls in
    /// * `member_player_ids` - Ordered member player references
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateTeamMember` if the member list
    /// contains the same player twice.
    pub fn new(season_id: i64, member_player_ids: Vec<i64>) -> Result<Self, DomainError> {
        for (i, player_id) in member_player_ids.iter().enumerate() {
            if member_player_ids[..i].contains(player_id) {
                return Err(DomainError::DuplicateTeamMember {
                    player_id: *player_id,
                });
            }
        }
        Ok(Self {
            team_id: None,
            season_id,
            member_player_ids,
            opted_out: false,
        })
    }

    /// Creates a `Team` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        team_id: i64,
        season_id: i64,
        member_player_ids: Vec<i64>,
        opted_out: bool,
    ) -> Self {
        Self {
            team_id: Some(team_id),
            season_id,
            member_player_ids,
            opted_out,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Returns the season this team is enrolled in.
    #[must_use]
    pub const fn season_id(&self) -> i64 {
        self.season_id
    }

    /// Returns the ordered member player references.
    #[must_use]
    pub fn member_player_ids(&self) -> &[i64] {
        &self.member_player_ids
    }

    /// Returns whether the team has opted out of further play.
    #[must_use]
    pub const fn opted_out(&self) -> bool {
        self.opted_out
    }

    /// Returns whether the given player is a member of this team.
    #[must_use]
    pub fn contains_player(&self, player_id: i64) -> bool {
        self.member_player_ids.contains(&player_id)
    }
}
