// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read models and operation specs exposed by the persistence layer.

use club_ladder_domain::{MatchStatus, Movement, SetScore};
use serde::{Deserialize, Serialize};

/// Everything needed to create a season in `Draft` status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeasonSpec {
    /// The owning club.
    pub club_id: i64,
    /// Human-readable season name.
    pub name: String,
    /// Matches are best-of this many sets (odd, 1-9).
    pub best_of: u8,
    /// Days a challenged match may remain unplayed.
    pub match_deadline_days: u16,
    /// Days before the deadline at which a reminder becomes due.
    pub reminder_days: u16,
    /// Whether results require two-party confirmation.
    pub requires_confirmation: bool,
    /// Whether players may enroll themselves while the season is active.
    pub open_enrollment: bool,
    /// Minimum players per team.
    pub min_team_size: u8,
    /// Maximum players per team.
    pub max_team_size: u8,
    /// How many ranks above itself a team may challenge.
    pub challenge_reach: u32,
}

/// Everything needed to create a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeSpec {
    /// The season the challenge belongs to.
    pub season_id: i64,
    /// The club whose feed records the challenge.
    pub club_id: i64,
    /// The challenging team (becomes team one of the match).
    pub challenger_team_id: i64,
    /// The challenged team (becomes team two of the match).
    pub challengee_team_id: i64,
    /// The player issuing the challenge.
    pub challenger_player_id: i64,
    /// The player receiving the personal notification.
    pub challengee_player_id: i64,
    /// Optional message attached to the challenge.
    pub text: Option<String>,
}

/// A match as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The match identifier.
    pub match_id: i64,
    /// The season the match belongs to.
    pub season_id: i64,
    /// The challenging team.
    pub team1_id: i64,
    /// The challenged team.
    pub team2_id: i64,
    /// The lifecycle status.
    pub status: MatchStatus,
    /// The entered per-set scores, if a result was entered.
    pub sets: Option<Vec<SetScore>>,
    /// The winning team, if decided.
    pub winner_team_id: Option<i64>,
    /// The agreed match datetime (RFC 3339), if set.
    pub game_at: Option<String>,
    /// Optional message attached to the challenge.
    pub challenge_text: Option<String>,
    /// The player who entered the result, if any.
    pub result_entered_by: Option<i64>,
    /// The player who confirmed the result, if any.
    pub confirmed_by: Option<i64>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// A date proposal as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRecord {
    /// The proposal identifier.
    pub proposal_id: i64,
    /// The match this proposal belongs to.
    pub match_id: i64,
    /// The proposing player.
    pub proposed_by: i64,
    /// The proposed match datetime (RFC 3339).
    pub proposed_at: String,
    /// The proposal status.
    pub status: club_ladder_domain::ProposalStatus,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// One immutable standings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// The snapshot identifier.
    pub snapshot_id: i64,
    /// The season the snapshot belongs to.
    pub season_id: i64,
    /// The match whose completion triggered the snapshot, if any.
    pub match_id: Option<i64>,
    /// The ordered team ids; rank is the 1-based position.
    pub results: Vec<i64>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// One row of the current standings, annotated with movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingRow {
    /// The 1-based rank.
    pub rank: u32,
    /// The ranked team.
    pub team_id: i64,
    /// Movement relative to the previous snapshot.
    pub movement: Movement,
}

/// One point of a team's rank history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPoint {
    /// When the snapshot was recorded (RFC 3339).
    pub recorded_at: String,
    /// The team's 1-based rank in that snapshot.
    pub rank: u32,
}

/// The outcome of a confirmed (or forfeited) match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedResult {
    /// The winning team.
    pub winner_team_id: i64,
    /// The challenging team.
    pub team1_id: i64,
    /// The challenged team.
    pub team2_id: i64,
}

/// A newly enrolled team and its starting rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrolledTeam {
    /// The created team.
    pub team_id: i64,
    /// The team's 1-based starting rank (the bottom of the ladder).
    pub rank: u32,
}

/// Wins per team across all decided matches between two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadToHead {
    /// The first team of the comparison.
    pub team_a_id: i64,
    /// The second team of the comparison.
    pub team_b_id: i64,
    /// Matches won by the first team.
    pub team_a_wins: u32,
    /// Matches won by the second team.
    pub team_b_wins: u32,
}
