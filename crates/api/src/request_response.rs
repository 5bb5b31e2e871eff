// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! These types are the API contract and are distinct from domain types;
//! the server layer serializes them as JSON.

use serde::{Deserialize, Serialize};

/// Request to create a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSeasonRequest {
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

/// Response for a created season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSeasonResponse {
    /// The new season id.
    pub season_id: i64,
}

/// Response for a season lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStatusResponse {
    /// The season id.
    pub season_id: i64,
    /// The season's status after the transition.
    pub status: String,
}

/// Request to enroll a team into a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollTeamRequest {
    /// The season to enroll into.
    pub season_id: i64,
    /// The ordered members of the new team.
    pub member_player_ids: Vec<i64>,
}

/// Response for an enrolled team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollTeamResponse {
    /// The new team id.
    pub team_id: i64,
    /// The team's 1-based starting rank.
    pub rank: u32,
}

/// Request to create a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChallengeRequest {
    /// The season the challenge belongs to.
    pub season_id: i64,
    /// The club whose feed records the challenge.
    pub club_id: i64,
    /// The challenging team.
    pub challenger_team_id: i64,
    /// The challenged team.
    pub challengee_team_id: i64,
    /// The player issuing the challenge.
    pub challenger_player_id: i64,
    /// The player receiving the personal notification.
    pub challengee_player_id: i64,
    /// Optional message attached to the challenge.
    pub text: Option<String>,
}

/// Response for a created challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// The new match id.
    pub match_id: i64,
}

/// Request to propose a match date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeDateRequest {
    /// The match to propose a date for.
    pub match_id: i64,
    /// The proposed datetime (RFC 3339).
    pub proposed_at: String,
}

/// Response for a recorded date proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeDateResponse {
    /// The new proposal id.
    pub proposal_id: i64,
}

/// Request to accept a date proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptDateProposalRequest {
    /// The match the proposal belongs to.
    pub match_id: i64,
    /// The proposal to accept.
    pub proposal_id: i64,
}

/// Request to decline a date proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclineDateProposalRequest {
    /// The match the proposal belongs to.
    pub match_id: i64,
    /// The proposal to decline.
    pub proposal_id: i64,
}

/// One set's score in a request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScoreInfo {
    /// Points scored by team one (the challenger).
    pub team1: u32,
    /// Points scored by team two.
    pub team2: u32,
}

/// Request to enter a match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterResultRequest {
    /// The match to enter a result for.
    pub match_id: i64,
    /// The per-set scores in playing order.
    pub sets: Vec<SetScoreInfo>,
}

/// Request to confirm an entered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResultRequest {
    /// The match to confirm.
    pub match_id: i64,
}

/// Response for a confirmed (or forfeited) match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResultResponse {
    /// The winning team.
    pub winner_team_id: i64,
    /// The challenging team.
    pub team1_id: i64,
    /// The challenged team.
    pub team2_id: i64,
}

/// Request to dispute an entered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeResultRequest {
    /// The match to dispute.
    pub match_id: i64,
    /// Free-form dispute reason.
    pub reason: String,
}

/// Request to withdraw an open challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// The match to withdraw.
    pub match_id: i64,
}

/// Request to forfeit an open match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForfeitRequest {
    /// The match to forfeit.
    pub match_id: i64,
}

/// Request to declare an unavailability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetUnavailabilityRequest {
    /// The season the window applies to.
    pub season_id: i64,
    /// Window start (RFC 3339).
    pub starts_at: String,
    /// Window end (RFC 3339).
    pub ends_at: String,
}

/// Response for a declared unavailability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetUnavailabilityResponse {
    /// The new window id.
    pub window_id: i64,
}

/// Request to clear a player's unavailability windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearUnavailabilityRequest {
    /// The season whose windows to clear.
    pub season_id: i64,
}

/// One row of the standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingInfo {
    /// The 1-based rank.
    pub rank: u32,
    /// The ranked team.
    pub team_id: i64,
    /// Movement relative to the previous snapshot: "up", "down", or "none".
    pub movement: String,
}

/// Response carrying the current standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsResponse {
    /// The season the standings belong to.
    pub season_id: i64,
    /// The ordered standings rows.
    pub standings: Vec<StandingInfo>,
}

/// One point of a team's rank history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPointInfo {
    /// When the snapshot was recorded (RFC 3339).
    pub recorded_at: String,
    /// The team's 1-based rank in that snapshot.
    pub rank: u32,
}

/// Response carrying a team's rank history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankHistoryResponse {
    /// The charted team.
    pub team_id: i64,
    /// Chronological rank points.
    pub history: Vec<RankPointInfo>,
}

/// Response carrying a head-to-head record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadResponse {
    /// The first team of the comparison.
    pub team_a_id: i64,
    /// The second team of the comparison.
    pub team_b_id: i64,
    /// Matches won by the first team.
    pub team_a_wins: u32,
    /// Matches won by the second team.
    pub team_b_wins: u32,
}

/// A match as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    /// The match id.
    pub match_id: i64,
    /// The season the match belongs to.
    pub season_id: i64,
    /// The challenging team.
    pub team1_id: i64,
    /// The challenged team.
    pub team2_id: i64,
    /// The lifecycle status string.
    pub status: String,
    /// The entered per-set scores, if any.
    pub sets: Option<Vec<SetScoreInfo>>,
    /// The winning team, if decided.
    pub winner_team_id: Option<i64>,
    /// The agreed match datetime (RFC 3339), if set.
    pub game_at: Option<String>,
    /// Optional message attached to the challenge.
    pub challenge_text: Option<String>,
}

/// An event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The event id.
    pub event_id: i64,
    /// The event kind string.
    pub kind: String,
    /// The season reference, if any.
    pub season_id: Option<i64>,
    /// The match reference, if any.
    pub match_id: Option<i64>,
    /// The acting player, if attributable.
    pub actor_player_id: Option<i64>,
    /// Free-form metadata.
    pub metadata: serde_json::Value,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Response carrying a feed of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    /// The events, most recent first.
    pub events: Vec<EventInfo>,
}
