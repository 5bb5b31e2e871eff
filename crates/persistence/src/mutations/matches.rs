// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match lifecycle transitions.
//!
//! Every transition here is one status-guarded single-row update. The
//! affected-row count is checked through `TransitionOutcome`; zero rows is
//! surfaced as a status conflict, never retried. Transitions that complete
//! a match additionally append the standings snapshot and must run under
//! the season lock.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use club_ladder::{
    CoreError, LifecycleAction, Side, TransitionOutcome, side_of_player, swap_for_result,
};
use club_ladder_domain::{MatchStatus, MatchWinner, Season, SetScore, validate_scores};
use club_ladder_events::{Event, EventKind};

use crate::data_models::{ConfirmedResult, MatchRecord};
use crate::diesel_schema::matches;
use crate::mutations::events::insert_event;
use crate::mutations::standings::insert_snapshot;
use crate::mutations::TxError;
use crate::queries;
use crate::queries::matches::status_strings;

/// Loads a match or fails with `MatchNotFound`.
fn load_match(conn: &mut SqliteConnection, match_id: i64) -> Result<MatchRecord, TxError> {
    queries::matches::get_match(conn, match_id)?
        .ok_or_else(|| CoreError::MatchNotFound { match_id }.into())
}

/// Loads the season of a match and verifies it is active.
fn load_active_season(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Season, TxError> {
    let season: Season = queries::seasons::get_season(conn, season_id)?
        .ok_or(CoreError::SeasonNotFound { season_id })?;
    if !season.status().is_active() {
        return Err(CoreError::SeasonNotActive {
            season_id,
            status: season.status(),
        }
        .into());
    }
    Ok(season)
}

/// Loads both member lists and resolves the acting player's side.
fn participant_side(
    conn: &mut SqliteConnection,
    record: &MatchRecord,
    player_id: i64,
) -> Result<(Side, Vec<i64>, Vec<i64>), TxError> {
    let team1_members: Vec<i64> = queries::teams::member_ids(conn, record.team1_id)?;
    let team2_members: Vec<i64> = queries::teams::member_ids(conn, record.team2_id)?;
    let side: Side = side_of_player(&team1_members, &team2_members, player_id).ok_or(
        CoreError::NotAParticipant {
            match_id: record.match_id,
            player_id,
        },
    )?;
    Ok((side, team1_members, team2_members))
}

/// Appends the post-completion snapshot for a decided match.
///
/// Every decided match appends a snapshot, also when the defender won and
/// the order is unchanged, so the snapshot sequence doubles as an audit
/// trail of completed matches.
fn apply_standings_swap(
    conn: &mut SqliteConnection,
    record: &MatchRecord,
    winner_team_id: i64,
    created_at: &str,
) -> Result<ConfirmedResult, TxError> {
    let loser_team_id: i64 = if winner_team_id == record.team1_id {
        record.team2_id
    } else {
        record.team1_id
    };
    let snapshot = queries::standings::latest_snapshot(conn, record.season_id)?.ok_or(
        CoreError::MissingStandings {
            season_id: record.season_id,
        },
    )?;
    let new_results: Vec<i64> = swap_for_result(
        record.season_id,
        &snapshot.results,
        winner_team_id,
        loser_team_id,
        winner_team_id == record.team1_id,
    )?;
    insert_snapshot(
        conn,
        record.season_id,
        &new_results,
        Some(record.match_id),
        created_at,
    )?;

    Ok(ConfirmedResult {
        winner_team_id,
        team1_id: record.team1_id,
        team2_id: record.team2_id,
    })
}

/// Enters a result for a match.
///
/// Scores are validated before anything is written; invalid scores leave
/// the match untouched. For seasons requiring confirmation the match moves
/// to `pending_confirmation` and the other side is notified. For seasons
/// without confirmation the match completes immediately, including the
/// standings swap; the adapter runs this case under the season lock.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match to enter a result for
/// * `entered_by` - The acting player
/// * `sets` - The per-set scores in playing order
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns a domain violation for invalid scores, `NotAParticipant`, or a
/// status conflict if a concurrent actor moved the match first.
pub fn enter_result(
    conn: &mut SqliteConnection,
    match_id: i64,
    entered_by: i64,
    sets: &[SetScore],
    created_at: &str,
) -> Result<Option<ConfirmedResult>, TxError> {
    let record: MatchRecord = load_match(conn, match_id)?;
    let season: Season = load_active_season(conn, record.season_id)?;
    let (side, team1_members, team2_members) = participant_side(conn, &record, entered_by)?;

    let winner: MatchWinner = validate_scores(season.config().best_of(), sets)?;
    let winner_team_id: i64 = match winner {
        MatchWinner::Team1 => record.team1_id,
        MatchWinner::Team2 => record.team2_id,
    };
    let scores_json: String = serde_json::to_string(sets)?;
    let allowed: Vec<&'static str> = status_strings(LifecycleAction::EnterResult.allowed_sources());

    if season.config().requires_confirmation() {
        let rows: usize = diesel::update(
            matches::table
                .filter(matches::match_id.eq(match_id))
                .filter(matches::status.eq_any(allowed)),
        )
        .set((
            matches::status.eq(MatchStatus::PendingConfirmation.as_str()),
            matches::scores_json.eq(&scores_json),
            matches::winner_team_id.eq(winner_team_id),
            matches::result_entered_by.eq(entered_by),
        ))
        .execute(conn)?;
        TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

        let other_members: &[i64] = match side {
            Side::Team1 => &team2_members,
            Side::Team2 => &team1_members,
        };
        for &player_id in other_members {
            let event: Event =
                Event::personal(season.club_id(), EventKind::ResultEntered, player_id)
                    .season(record.season_id)
                    .for_match(match_id)
                    .actor(entered_by)
                    .metadata(serde_json::json!({ "winner_team_id": winner_team_id }));
            insert_event(conn, &event, created_at)?;
        }

        info!(match_id, entered_by, "Result entered, awaiting confirmation");
        Ok(None)
    } else {
        let rows: usize = diesel::update(
            matches::table
                .filter(matches::match_id.eq(match_id))
                .filter(matches::status.eq_any(allowed)),
        )
        .set((
            matches::status.eq(MatchStatus::Completed.as_str()),
            matches::scores_json.eq(&scores_json),
            matches::winner_team_id.eq(winner_team_id),
            matches::result_entered_by.eq(entered_by),
        ))
        .execute(conn)?;
        TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

        let completion: ConfirmedResult =
            apply_standings_swap(conn, &record, winner_team_id, created_at)?;
        let event: Event = Event::public(season.club_id(), EventKind::Result)
            .season(record.season_id)
            .for_match(match_id)
            .actor(entered_by)
            .metadata(serde_json::json!({
                "winner_team_id": winner_team_id,
                "sets": sets,
            }));
        insert_event(conn, &event, created_at)?;

        info!(match_id, entered_by, winner_team_id, "Result entered and completed");
        Ok(Some(completion))
    }
}

/// Confirms an entered result, completing the match and swapping standings.
///
/// The confirmer must be a participant and must not be the player who
/// entered the result. Must run under the season lock.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match to confirm
/// * `confirmed_by` - The acting player
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `CannotConfirmOwnResult`, `NotAParticipant`, or a status
/// conflict if the match is not awaiting confirmation.
pub fn confirm_result(
    conn: &mut SqliteConnection,
    match_id: i64,
    confirmed_by: i64,
    created_at: &str,
) -> Result<ConfirmedResult, TxError> {
    let record: MatchRecord = load_match(conn, match_id)?;
    let season: Season = load_active_season(conn, record.season_id)?;
    participant_side(conn, &record, confirmed_by)?;

    if record.result_entered_by == Some(confirmed_by) {
        return Err(CoreError::CannotConfirmOwnResult { match_id }.into());
    }

    let allowed: Vec<&'static str> =
        status_strings(LifecycleAction::ConfirmResult.allowed_sources());
    let rows: usize = diesel::update(
        matches::table
            .filter(matches::match_id.eq(match_id))
            .filter(matches::status.eq_any(allowed)),
    )
    .set((
        matches::status.eq(MatchStatus::Completed.as_str()),
        matches::confirmed_by.eq(confirmed_by),
    ))
    .execute(conn)?;
    TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

    let winner_team_id: i64 = record.winner_team_id.ok_or_else(|| {
        CoreError::Storage(format!(
            "Match {match_id} is pending confirmation without a winner"
        ))
    })?;
    let completion: ConfirmedResult =
        apply_standings_swap(conn, &record, winner_team_id, created_at)?;

    let public: Event = Event::public(season.club_id(), EventKind::Result)
        .season(record.season_id)
        .for_match(match_id)
        .actor(confirmed_by)
        .metadata(serde_json::json!({
            "winner_team_id": winner_team_id,
            "sets": record.sets,
        }));
    insert_event(conn, &public, created_at)?;

    if let Some(enterer) = record.result_entered_by {
        let personal: Event =
            Event::personal(season.club_id(), EventKind::ResultConfirmed, enterer)
                .season(record.season_id)
                .for_match(match_id)
                .actor(confirmed_by);
        insert_event(conn, &personal, created_at)?;
    }

    info!(match_id, confirmed_by, winner_team_id, "Result confirmed");
    Ok(completion)
}

/// Disputes an entered result instead of confirming it.
///
/// No standings change; the dispute awaits external admin adjudication.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match to dispute
/// * `disputed_by` - The acting player
/// * `reason` - Free-form dispute reason
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `CannotDisputeOwnResult`, `NotAParticipant`, or a status
/// conflict.
pub fn dispute_result(
    conn: &mut SqliteConnection,
    match_id: i64,
    disputed_by: i64,
    reason: &str,
    created_at: &str,
) -> Result<(), TxError> {
    let record: MatchRecord = load_match(conn, match_id)?;
    let season: Season = load_active_season(conn, record.season_id)?;
    participant_side(conn, &record, disputed_by)?;

    if record.result_entered_by == Some(disputed_by) {
        return Err(CoreError::CannotDisputeOwnResult { match_id }.into());
    }

    let allowed: Vec<&'static str> =
        status_strings(LifecycleAction::DisputeResult.allowed_sources());
    let rows: usize = diesel::update(
        matches::table
            .filter(matches::match_id.eq(match_id))
            .filter(matches::status.eq_any(allowed)),
    )
    .set(matches::status.eq(MatchStatus::Disputed.as_str()))
    .execute(conn)?;
    TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

    if let Some(enterer) = record.result_entered_by {
        let event: Event =
            Event::personal(season.club_id(), EventKind::ResultDisputed, enterer)
                .season(record.season_id)
                .for_match(match_id)
                .actor(disputed_by)
                .metadata(serde_json::json!({ "reason": reason }));
        insert_event(conn, &event, created_at)?;
    }

    info!(match_id, disputed_by, "Result disputed");
    Ok(())
}

/// Withdraws an open challenge. Only the original challenger may withdraw.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match to withdraw
/// * `player_id` - The acting player
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `OnlyChallengerMayWithdraw` when a challengee attempts it,
/// `NotAParticipant`, or a status conflict.
pub fn withdraw(
    conn: &mut SqliteConnection,
    match_id: i64,
    player_id: i64,
    created_at: &str,
) -> Result<(), TxError> {
    let record: MatchRecord = load_match(conn, match_id)?;
    let season: Season = load_active_season(conn, record.season_id)?;
    let (side, _, _) = participant_side(conn, &record, player_id)?;
    if side != Side::Team1 {
        return Err(CoreError::OnlyChallengerMayWithdraw { match_id }.into());
    }

    let allowed: Vec<&'static str> = status_strings(LifecycleAction::Withdraw.allowed_sources());
    let rows: usize = diesel::update(
        matches::table
            .filter(matches::match_id.eq(match_id))
            .filter(matches::status.eq_any(allowed)),
    )
    .set(matches::status.eq(MatchStatus::Withdrawn.as_str()))
    .execute(conn)?;
    TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

    let event: Event = Event::public(season.club_id(), EventKind::Withdrawal)
        .season(record.season_id)
        .for_match(match_id)
        .actor(player_id);
    insert_event(conn, &event, created_at)?;

    info!(match_id, player_id, "Challenge withdrawn");
    Ok(())
}

/// Forfeits an open match; the non-forfeiting team wins.
///
/// Either participant may forfeit. The swap favors the surviving team and
/// applies only when that team was the challenger, like any other
/// completion. Must run under the season lock.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match to forfeit
/// * `forfeited_by` - The acting player (on the losing side)
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `NotAParticipant` or a status conflict.
pub fn forfeit(
    conn: &mut SqliteConnection,
    match_id: i64,
    forfeited_by: i64,
    created_at: &str,
) -> Result<ConfirmedResult, TxError> {
    let record: MatchRecord = load_match(conn, match_id)?;
    let season: Season = load_active_season(conn, record.season_id)?;
    let (side, _, _) = participant_side(conn, &record, forfeited_by)?;

    let winner_team_id: i64 = match side.other() {
        Side::Team1 => record.team1_id,
        Side::Team2 => record.team2_id,
    };

    let allowed: Vec<&'static str> = status_strings(LifecycleAction::Forfeit.allowed_sources());
    let rows: usize = diesel::update(
        matches::table
            .filter(matches::match_id.eq(match_id))
            .filter(matches::status.eq_any(allowed)),
    )
    .set((
        matches::status.eq(MatchStatus::Forfeited.as_str()),
        matches::winner_team_id.eq(winner_team_id),
    ))
    .execute(conn)?;
    TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

    let completion: ConfirmedResult =
        apply_standings_swap(conn, &record, winner_team_id, created_at)?;

    let event: Event = Event::public(season.club_id(), EventKind::Forfeit)
        .season(record.season_id)
        .for_match(match_id)
        .actor(forfeited_by)
        .metadata(serde_json::json!({ "winner_team_id": winner_team_id }));
    insert_event(conn, &event, created_at)?;

    info!(match_id, forfeited_by, winner_team_id, "Match forfeited");
    Ok(completion)
}
