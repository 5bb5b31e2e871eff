// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers adapt DTOs to persistence operations and translate errors.
//! The acting player always comes from the caller, never from the request
//! body, so a request cannot act on someone else's behalf.

use club_ladder_domain::SetScore;
use club_ladder_events::StoredEvent;
use club_ladder_persistence::{
    ChallengeSpec, ConfirmedResult, EnrolledTeam, MatchRecord, NewSeasonSpec, Persistence,
};
use tracing::info;

use crate::error::{ApiError, translate_core_error};
use crate::request_response::{
    AcceptDateProposalRequest, ChallengeResponse, ClearUnavailabilityRequest,
    ConfirmResultRequest, ConfirmResultResponse, CreateChallengeRequest, CreateSeasonRequest,
    CreateSeasonResponse, DeclineDateProposalRequest, DisputeResultRequest, EnrollTeamRequest,
    EnrollTeamResponse, EnterResultRequest, EventInfo, FeedResponse, ForfeitRequest,
    HeadToHeadResponse, MatchInfo, ProposeDateRequest, ProposeDateResponse, RankHistoryResponse,
    RankPointInfo, SeasonStatusResponse, SetScoreInfo, SetUnavailabilityRequest,
    SetUnavailabilityResponse, StandingInfo, StandingsResponse, WithdrawRequest,
};
use crate::Caller;

/// Requires the admin role.
fn require_admin(caller: &Caller, action: &str) -> Result<(), ApiError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: action.to_string(),
            reason: String::from("requires the admin role"),
        })
    }
}

/// Resolves the acting player from the caller.
fn acting_player(caller: &Caller, action: &str) -> Result<i64, ApiError> {
    caller.player_id.ok_or_else(|| ApiError::Unauthorized {
        action: action.to_string(),
        reason: String::from("requires a player identity"),
    })
}

/// Creates a season in `Draft` status. Admin only.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn create_season(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &CreateSeasonRequest,
) -> Result<CreateSeasonResponse, ApiError> {
    require_admin(caller, "create_season")?;

    let spec: NewSeasonSpec = NewSeasonSpec {
        club_id: request.club_id,
        name: request.name.clone(),
        best_of: request.best_of,
        match_deadline_days: request.match_deadline_days,
        reminder_days: request.reminder_days,
        requires_confirmation: request.requires_confirmation,
        open_enrollment: request.open_enrollment,
        min_team_size: request.min_team_size,
        max_team_size: request.max_team_size,
        challenge_reach: request.challenge_reach,
    };
    let season_id: i64 = persistence
        .create_season(&spec)
        .map_err(|e| translate_core_error("create_season", e))?;

    info!(season_id, club_id = request.club_id, "Season created");
    Ok(CreateSeasonResponse { season_id })
}

/// Activates a draft season. Admin only.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn activate_season(
    persistence: &mut Persistence,
    caller: &Caller,
    season_id: i64,
) -> Result<SeasonStatusResponse, ApiError> {
    require_admin(caller, "activate_season")?;
    persistence
        .activate_season(season_id)
        .map_err(|e| translate_core_error("activate_season", e))?;
    Ok(SeasonStatusResponse {
        season_id,
        status: String::from("active"),
    })
}

/// Ends an active season. Admin only.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn end_season(
    persistence: &mut Persistence,
    caller: &Caller,
    season_id: i64,
) -> Result<SeasonStatusResponse, ApiError> {
    require_admin(caller, "end_season")?;
    persistence
        .end_season(season_id)
        .map_err(|e| translate_core_error("end_season", e))?;
    Ok(SeasonStatusResponse {
        season_id,
        status: String::from("ended"),
    })
}

/// Enrolls a team into a season.
///
/// Admins may enroll anyone; a player may only enroll a team they are a
/// member of.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn enroll_team(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &EnrollTeamRequest,
) -> Result<EnrollTeamResponse, ApiError> {
    if !caller.is_admin() {
        let player_id: i64 = acting_player(caller, "enroll_team")?;
        if !request.member_player_ids.contains(&player_id) {
            return Err(ApiError::Unauthorized {
                action: String::from("enroll_team"),
                reason: String::from("players may only enroll teams they belong to"),
            });
        }
    }

    let enrolled: EnrolledTeam = persistence
        .enroll_team(request.season_id, &request.member_player_ids)
        .map_err(|e| translate_core_error("enroll_team", e))?;

    info!(
        season_id = request.season_id,
        team_id = enrolled.team_id,
        rank = enrolled.rank,
        "Team enrolled"
    );
    Ok(EnrollTeamResponse {
        team_id: enrolled.team_id,
        rank: enrolled.rank,
    })
}

/// Appends an existing team at the bottom of a season's standings.
/// Admin only; regular enrollment ranks teams automatically.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn add_team_to_standings(
    persistence: &mut Persistence,
    caller: &Caller,
    season_id: i64,
    team_id: i64,
) -> Result<EnrollTeamResponse, ApiError> {
    require_admin(caller, "add_team_to_standings")?;
    let rank: u32 = persistence
        .add_team_to_standings(season_id, team_id)
        .map_err(|e| translate_core_error("add_team_to_standings", e))?;
    Ok(EnrollTeamResponse { team_id, rank })
}

/// Creates a challenge. The caller must be the challenging player.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn create_challenge(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &CreateChallengeRequest,
) -> Result<ChallengeResponse, ApiError> {
    if !caller.is_admin() {
        let player_id: i64 = acting_player(caller, "create_challenge")?;
        if player_id != request.challenger_player_id {
            return Err(ApiError::Unauthorized {
                action: String::from("create_challenge"),
                reason: String::from("a challenge must be issued by the challenging player"),
            });
        }
    }

    let spec: ChallengeSpec = ChallengeSpec {
        season_id: request.season_id,
        club_id: request.club_id,
        challenger_team_id: request.challenger_team_id,
        challengee_team_id: request.challengee_team_id,
        challenger_player_id: request.challenger_player_id,
        challengee_player_id: request.challengee_player_id,
        text: request.text.clone(),
    };
    let match_id: i64 = persistence
        .create_challenge(&spec)
        .map_err(|e| translate_core_error("create_challenge", e))?;

    Ok(ChallengeResponse { match_id })
}

/// Records a date proposal for an open match.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn propose_date(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &ProposeDateRequest,
) -> Result<ProposeDateResponse, ApiError> {
    let player_id: i64 = acting_player(caller, "propose_date")?;
    let proposal_id: i64 = persistence
        .propose_date(request.match_id, player_id, &request.proposed_at)
        .map_err(|e| translate_core_error("propose_date", e))?;
    Ok(ProposeDateResponse { proposal_id })
}

/// Accepts a pending date proposal.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn accept_date_proposal(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &AcceptDateProposalRequest,
) -> Result<(), ApiError> {
    let player_id: i64 = acting_player(caller, "accept_date_proposal")?;
    persistence
        .accept_date_proposal(request.match_id, request.proposal_id, player_id)
        .map_err(|e| translate_core_error("accept_date_proposal", e))
}

/// Declines a pending date proposal.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn decline_date_proposal(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &DeclineDateProposalRequest,
) -> Result<(), ApiError> {
    let player_id: i64 = acting_player(caller, "decline_date_proposal")?;
    persistence
        .decline_date_proposal(request.match_id, request.proposal_id, player_id)
        .map_err(|e| translate_core_error("decline_date_proposal", e))
}

/// Enters a match result.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn enter_result(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &EnterResultRequest,
) -> Result<(), ApiError> {
    let player_id: i64 = acting_player(caller, "enter_result")?;
    let sets: Vec<SetScore> = request
        .sets
        .iter()
        .map(|s| SetScore::new(s.team1, s.team2))
        .collect();
    persistence
        .enter_result(request.match_id, player_id, &sets)
        .map_err(|e| translate_core_error("enter_result", e))
}

/// Confirms an entered result, completing the match.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn confirm_result(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &ConfirmResultRequest,
) -> Result<ConfirmResultResponse, ApiError> {
    let player_id: i64 = acting_player(caller, "confirm_result")?;
    let completion: ConfirmedResult = persistence
        .confirm_result(request.match_id, player_id)
        .map_err(|e| translate_core_error("confirm_result", e))?;
    Ok(ConfirmResultResponse {
        winner_team_id: completion.winner_team_id,
        team1_id: completion.team1_id,
        team2_id: completion.team2_id,
    })
}

/// Disputes an entered result.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn dispute_result(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &DisputeResultRequest,
) -> Result<(), ApiError> {
    let player_id: i64 = acting_player(caller, "dispute_result")?;
    persistence
        .dispute_result(request.match_id, player_id, &request.reason)
        .map_err(|e| translate_core_error("dispute_result", e))
}

/// Withdraws an open challenge.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn withdraw(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &WithdrawRequest,
) -> Result<(), ApiError> {
    let player_id: i64 = acting_player(caller, "withdraw")?;
    persistence
        .withdraw(request.match_id, player_id)
        .map_err(|e| translate_core_error("withdraw", e))
}

/// Forfeits an open match.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn forfeit(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &ForfeitRequest,
) -> Result<ConfirmResultResponse, ApiError> {
    let player_id: i64 = acting_player(caller, "forfeit")?;
    let completion: ConfirmedResult = persistence
        .forfeit(request.match_id, player_id)
        .map_err(|e| translate_core_error("forfeit", e))?;
    Ok(ConfirmResultResponse {
        winner_team_id: completion.winner_team_id,
        team1_id: completion.team1_id,
        team2_id: completion.team2_id,
    })
}

/// Declares an unavailability window for the calling player.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn set_unavailability(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &SetUnavailabilityRequest,
) -> Result<SetUnavailabilityResponse, ApiError> {
    let player_id: i64 = acting_player(caller, "set_unavailability")?;
    let window_id: i64 = persistence
        .set_unavailability(
            request.season_id,
            player_id,
            &request.starts_at,
            &request.ends_at,
        )
        .map_err(|e| translate_core_error("set_unavailability", e))?;
    Ok(SetUnavailabilityResponse { window_id })
}

/// Clears the calling player's unavailability windows.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn clear_unavailability(
    persistence: &mut Persistence,
    caller: &Caller,
    request: &ClearUnavailabilityRequest,
) -> Result<(), ApiError> {
    let player_id: i64 = acting_player(caller, "clear_unavailability")?;
    persistence
        .clear_unavailability(request.season_id, player_id)
        .map(|_| ())
        .map_err(|e| translate_core_error("clear_unavailability", e))
}

/// Retrieves the current standings annotated with movement.
///
/// # Errors
///
/// Returns a translated core error.
pub fn standings(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<StandingsResponse, ApiError> {
    let rows = persistence
        .standings_with_movement(season_id)
        .map_err(|e| translate_core_error("standings", e))?;
    Ok(StandingsResponse {
        season_id,
        standings: rows
            .into_iter()
            .map(|row| StandingInfo {
                rank: row.rank,
                team_id: row.team_id,
                movement: row.movement.as_str().to_string(),
            })
            .collect(),
    })
}

/// Retrieves the raw latest standings sequence.
///
/// # Errors
///
/// Returns a translated core error.
pub fn latest_standings(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<Option<Vec<i64>>, ApiError> {
    persistence
        .latest_standings(season_id)
        .map(|snapshot| snapshot.map(|s| s.results))
        .map_err(|e| translate_core_error("latest_standings", e))
}

/// Retrieves a team's rank history.
///
/// # Errors
///
/// Returns a translated core error.
pub fn rank_history(
    persistence: &mut Persistence,
    season_id: i64,
    team_id: i64,
) -> Result<RankHistoryResponse, ApiError> {
    let points = persistence
        .rank_history(season_id, team_id)
        .map_err(|e| translate_core_error("rank_history", e))?;
    Ok(RankHistoryResponse {
        team_id,
        history: points
            .into_iter()
            .map(|p| RankPointInfo {
                recorded_at: p.recorded_at,
                rank: p.rank,
            })
            .collect(),
    })
}

/// Retrieves the teams with an open challenge.
///
/// # Errors
///
/// Returns a translated core error.
pub fn teams_with_open_challenge(
    persistence: &mut Persistence,
    season_id: i64,
) -> Result<Vec<i64>, ApiError> {
    persistence
        .teams_with_open_challenge(season_id)
        .map_err(|e| translate_core_error("teams_with_open_challenge", e))
}

/// Retrieves the teams with an unavailable member at `now`.
///
/// # Errors
///
/// Returns a translated core error.
pub fn unavailable_teams(
    persistence: &mut Persistence,
    season_id: i64,
    now: &str,
) -> Result<Vec<i64>, ApiError> {
    persistence
        .unavailable_team_ids(season_id, now)
        .map_err(|e| translate_core_error("unavailable_teams", e))
}

/// Computes the head-to-head record between two teams.
///
/// # Errors
///
/// Returns a translated core error.
pub fn head_to_head(
    persistence: &mut Persistence,
    team_a_id: i64,
    team_b_id: i64,
) -> Result<HeadToHeadResponse, ApiError> {
    let record = persistence
        .head_to_head(team_a_id, team_b_id)
        .map_err(|e| translate_core_error("head_to_head", e))?;
    Ok(HeadToHeadResponse {
        team_a_id: record.team_a_id,
        team_b_id: record.team_b_id,
        team_a_wins: record.team_a_wins,
        team_b_wins: record.team_b_wins,
    })
}

/// Retrieves a match.
///
/// # Errors
///
/// Returns a translated core error.
pub fn get_match(persistence: &mut Persistence, match_id: i64) -> Result<MatchInfo, ApiError> {
    let record: MatchRecord = persistence
        .get_match(match_id)
        .map_err(|e| translate_core_error("get_match", e))?;
    Ok(MatchInfo {
        match_id: record.match_id,
        season_id: record.season_id,
        team1_id: record.team1_id,
        team2_id: record.team2_id,
        status: record.status.as_str().to_string(),
        sets: record.sets.map(|sets| {
            sets.into_iter()
                .map(|s| SetScoreInfo {
                    team1: s.team1,
                    team2: s.team2,
                })
                .collect()
        }),
        winner_team_id: record.winner_team_id,
        game_at: record.game_at,
        challenge_text: record.challenge_text,
    })
}

/// Converts stored events to the API representation.
fn to_event_infos(events: Vec<StoredEvent>) -> Vec<EventInfo> {
    events
        .into_iter()
        .map(|stored| EventInfo {
            event_id: stored.event_id,
            kind: stored.event.kind.as_str().to_string(),
            season_id: stored.event.season_id,
            match_id: stored.event.match_id,
            actor_player_id: stored.event.actor_player_id,
            metadata: stored.event.metadata,
            created_at: stored.created_at,
        })
        .collect()
}

/// Retrieves a club's public event feed.
///
/// # Errors
///
/// Returns a translated core error.
pub fn club_feed(
    persistence: &mut Persistence,
    club_id: i64,
    limit: i64,
) -> Result<FeedResponse, ApiError> {
    let events = persistence
        .club_feed(club_id, limit)
        .map_err(|e| translate_core_error("club_feed", e))?;
    Ok(FeedResponse {
        events: to_event_infos(events),
    })
}

/// Retrieves the calling player's personal notifications.
///
/// # Errors
///
/// Returns an authorization failure or a translated core error.
pub fn notifications(
    persistence: &mut Persistence,
    caller: &Caller,
    limit: i64,
) -> Result<FeedResponse, ApiError> {
    let player_id: i64 = acting_player(caller, "notifications")?;
    let events = persistence
        .notifications(player_id, limit)
        .map_err(|e| translate_core_error("notifications", e))?;
    Ok(FeedResponse {
        events: to_event_infos(events),
    })
}
