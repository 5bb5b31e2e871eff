// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the lifecycle state of a season.
///
/// Transitions are one-directional and admin-triggered. Every ladder
/// operation preconditions on the season being `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeasonStatus {
    /// Initial state after creation. Enrollment and configuration only.
    #[default]
    Draft,
    /// The ladder is live: challenges, results, and swaps are permitted.
    Active,
    /// The season is closed. All state is read-only.
    Ended,
}

impl FromStr for SeasonStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            _ => Err(DomainError::InvalidSeasonStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SeasonStatus {
    /// Converts this season status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Active
    /// - Active → Ended
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Active) | (Self::Active, Self::Ended)
        )
    }

    /// Returns whether ladder operations (challenges, results) are permitted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Scoring and scheduling configuration for a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Matches are best-of this many sets. Odd, between 1 and 9.
    best_of: u8,
    /// Days a challenged match may remain unplayed before it is overdue.
    match_deadline_days: u16,
    /// Days before the deadline at which a reminder becomes due.
    reminder_days: u16,
    /// Whether results require confirmation by the non-entering participant.
    requires_confirmation: bool,
    /// Whether players may enroll themselves while the season is active.
    open_enrollment: bool,
}

impl SeasonConfig {
    /// Creates a new `SeasonConfig`.
    ///
    /// # Arguments
    ///
    /// * `best_of` - The best-of set count (odd, 1-9)
    /// * `match_deadline_days` - Days until a challenge is overdue
    /// * `reminder_days` - Days before the deadline to remind participants
    /// * `requires_confirmation` - Whether results need two-party confirmation
    /// * `open_enrollment` - Whether mid-season self-enrollment is allowed
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBestOf` if `best_of` is even, zero, or
    /// greater than 9.
    pub const fn new(
        best_of: u8,
        match_deadline_days: u16,
        reminder_days: u16,
        requires_confirmation: bool,
        open_enrollment: bool,
    ) -> Result<Self, DomainError> {
        if best_of == 0 || best_of > 9 || best_of % 2 == 0 {
            return Err(DomainError::InvalidBestOf { best_of });
        }
        Ok(Self {
            best_of,
            match_deadline_days,
            reminder_days,
            requires_confirmation,
            open_enrollment,
        })
    }

    /// Returns the best-of set count.
    #[must_use]
    pub const fn best_of(&self) -> u8 {
        self.best_of
    }

    /// Returns the number of set wins required to win a match.
    #[must_use]
    pub const fn sets_to_win(&self) -> u8 {
        self.best_of / 2 + 1
    }

    /// Returns the match deadline in days.
    #[must_use]
    pub const fn match_deadline_days(&self) -> u16 {
        self.match_deadline_days
    }

    /// Returns the reminder lead time in days.
    #[must_use]
    pub const fn reminder_days(&self) -> u16 {
        self.reminder_days
    }

    /// Returns whether results require two-party confirmation.
    #[must_use]
    pub const fn requires_confirmation(&self) -> bool {
        self.requires_confirmation
    }

    /// Returns whether mid-season self-enrollment is allowed.
    #[must_use]
    pub const fn open_enrollment(&self) -> bool {
        self.open_enrollment
    }
}

/// Represents one time-boxed ladder competition within a club.
///
/// A season owns exactly one rank list. The rank list itself is never stored
/// on the season; it is derived from the latest standings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the season has not been persisted yet.
    season_id: Option<i64>,
    /// The club this season belongs to.
    club_id: i64,
    /// Human-readable season name.
    name: String,
    /// The lifecycle state.
    status: SeasonStatus,
    /// Scoring and scheduling configuration.
    config: SeasonConfig,
    /// Minimum number of players per team (1 for individual seasons).
    min_team_size: u8,
    /// Maximum number of players per team.
    max_team_size: u8,
    /// How many ranks above itself a team may challenge.
    challenge_reach: u32,
}

impl Season {
    /// Creates a new `Season` in `Draft` status without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `club_id` - The owning club
    /// * `name` - The season name
    /// * `config` - Scoring and scheduling configuration
    /// * `min_team_size` - Minimum players per team
    /// * `max_team_size` - Maximum players per team
    /// * `challenge_reach` - How many ranks up a challenge may reach
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, the size bounds are
    /// inconsistent, or the reach is zero.
    pub fn new(
        club_id: i64,
        name: String,
        config: SeasonConfig,
        min_team_size: u8,
        max_team_size: u8,
        challenge_reach: u32,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidSeasonName(String::from(
                "Season name cannot be empty",
            )));
        }
        if min_team_size == 0 || min_team_size > max_team_size {
            return Err(DomainError::InvalidTeamSizeBounds {
                min: min_team_size,
                max: max_team_size,
            });
        }
        if challenge_reach == 0 {
            return Err(DomainError::InvalidChallengeReach {
                reach: challenge_reach,
            });
        }
        Ok(Self {
            season_id: None,
            club_id,
            name,
            status: SeasonStatus::Draft,
            config,
            min_team_size,
            max_team_size,
            challenge_reach,
        })
    }

    /// Creates a `Season` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        season_id: i64,
        club_id: i64,
        name: String,
        status: SeasonStatus,
        config: SeasonConfig,
        min_team_size: u8,
        max_team_size: u8,
        challenge_reach: u32,
    ) -> Self {
        Self {
            season_id: Some(season_id),
            club_id,
            name,
            status,
            config,
            min_team_size,
            max_team_size,
            challenge_reach,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn season_id(&self) -> Option<i64> {
        self.season_id
    }

    /// Returns the owning club reference.
    #[must_use]
    pub const fn club_id(&self) -> i64 {
        self.club_id
    }

    /// Returns the season name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SeasonStatus {
        self.status
    }

    /// Returns the scoring configuration.
    #[must_use]
    pub const fn config(&self) -> &SeasonConfig {
        &self.config
    }

    /// Returns the minimum team size.
    #[must_use]
    pub const fn min_team_size(&self) -> u8 {
        self.min_team_size
    }

    /// Returns the maximum team size.
    #[must_use]
    pub const fn max_team_size(&self) -> u8 {
        self.max_team_size
    }

    /// Returns how many ranks above itself a team may challenge.
    #[must_use]
    pub const fn challenge_reach(&self) -> u32 {
        self.challenge_reach
    }

    /// Validates a proposed team member count against this season's bounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTeamSize` if the count is out of bounds.
    pub fn validate_team_size(&self, size: usize) -> Result<(), DomainError> {
        if size < usize::from(self.min_team_size) || size > usize::from(self.max_team_size) {
            return Err(DomainError::InvalidTeamSize {
                size,
                min: self.min_team_size,
                max: self.max_team_size,
            });
        }
        Ok(())
    }
}
