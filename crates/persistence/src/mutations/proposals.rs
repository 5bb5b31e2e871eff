// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date proposal mutations.
//!
//! Acceptance is mutually exclusive: the accept transition is guarded on
//! the proposal still being pending, and accepting one proposal dismisses
//! every other pending proposal of the match in the same transaction.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use tracing::info;

use club_ladder::{CoreError, LifecycleAction, Side, TransitionOutcome, side_of_player};
use club_ladder_domain::{DomainError, MatchStatus, ProposalStatus, Season};
use club_ladder_events::{Event, EventKind};

use crate::data_models::MatchRecord;
use crate::diesel_schema::{date_proposals, matches};
use crate::mutations::events::insert_event;
use crate::mutations::TxError;
use crate::queries;
use crate::queries::matches::status_strings;
use crate::sqlite::get_last_insert_rowid;

/// Parses and validates an RFC 3339 datetime parameter.
fn parse_datetime(value: &str) -> Result<(), TxError> {
    time::OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339)
        .map(|_| ())
        .map_err(|e| {
            TxError::from(DomainError::DateParseError {
                value: value.to_string(),
                error: e.to_string(),
            })
        })
}

/// Records a date proposal for an open match.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match to propose a date for
/// * `proposed_by` - The acting player
/// * `proposed_at` - The proposed datetime (RFC 3339)
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Returns
///
/// The new proposal id.
///
/// # Errors
///
/// Returns `NotAParticipant`, a status conflict for a match that is no
/// longer open, or a date parse failure.
pub fn propose_date(
    conn: &mut SqliteConnection,
    match_id: i64,
    proposed_by: i64,
    proposed_at: &str,
    created_at: &str,
) -> Result<i64, TxError> {
    parse_datetime(proposed_at)?;

    let record: MatchRecord = queries::matches::get_match(conn, match_id)?
        .ok_or(CoreError::MatchNotFound { match_id })?;
    let season: Season = queries::seasons::get_season(conn, record.season_id)?
        .ok_or(CoreError::SeasonNotFound {
            season_id: record.season_id,
        })?;
    if !season.status().is_active() {
        return Err(CoreError::SeasonNotActive {
            season_id: record.season_id,
            status: season.status(),
        }
        .into());
    }

    let team1_members: Vec<i64> = queries::teams::member_ids(conn, record.team1_id)?;
    let team2_members: Vec<i64> = queries::teams::member_ids(conn, record.team2_id)?;
    let side: Side = side_of_player(&team1_members, &team2_members, proposed_by).ok_or(
        CoreError::NotAParticipant {
            match_id,
            player_id: proposed_by,
        },
    )?;

    if !record.status.is_open() {
        return Err(CoreError::StatusConflict { match_id }.into());
    }

    diesel::insert_into(date_proposals::table)
        .values((
            date_proposals::match_id.eq(match_id),
            date_proposals::proposed_by.eq(proposed_by),
            date_proposals::proposed_at.eq(proposed_at),
            date_proposals::status.eq(ProposalStatus::Pending.as_str()),
            date_proposals::created_at.eq(created_at),
        ))
        .execute(conn)?;
    let proposal_id: i64 = get_last_insert_rowid(conn)?;

    let other_members: &[i64] = match side {
        Side::Team1 => &team2_members,
        Side::Team2 => &team1_members,
    };
    for &player_id in other_members {
        let event: Event = Event::personal(season.club_id(), EventKind::DateProposed, player_id)
            .season(record.season_id)
            .for_match(match_id)
            .actor(proposed_by)
            .metadata(serde_json::json!({ "proposed_at": proposed_at }));
        insert_event(conn, &event, created_at)?;
    }

    info!(match_id, proposal_id, proposed_by, "Date proposed");
    Ok(proposal_id)
}

/// Loads a proposal and verifies it belongs to the given match.
fn load_proposal(
    conn: &mut SqliteConnection,
    match_id: i64,
    proposal_id: i64,
) -> Result<(i64, String, String), TxError> {
    let row: Option<(i64, i64, String, String)> = date_proposals::table
        .filter(date_proposals::proposal_id.eq(proposal_id))
        .select((
            date_proposals::match_id,
            date_proposals::proposed_by,
            date_proposals::proposed_at,
            date_proposals::status,
        ))
        .first::<(i64, i64, String, String)>(conn)
        .optional()?;

    let Some((proposal_match_id, proposed_by, proposed_at, status)) = row else {
        return Err(CoreError::ProposalNotFound { proposal_id }.into());
    };
    if proposal_match_id != match_id {
        return Err(CoreError::ProposalMatchMismatch {
            proposal_id,
            match_id,
        }
        .into());
    }
    // Parse to validate the stored status string round-trips.
    ProposalStatus::from_str(&status)
        .map_err(|e| TxError::Core(CoreError::Storage(e.to_string())))?;
    Ok((proposed_by, proposed_at, status))
}

/// Accepts a pending date proposal, scheduling the match.
///
/// Three guarded writes, all in one transaction: the proposal flips
/// `pending → accepted`, every other pending proposal of the match flips to
/// `dismissed`, and the match moves to `date_set` with `game_at` stamped
/// from the proposal.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match the proposal belongs to
/// * `proposal_id` - The proposal to accept
/// * `accepted_by` - The acting player
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `ProposalNotPending` if the proposal was already answered,
/// `ProposalMatchMismatch` if it belongs to another match, or a status
/// conflict if the match is no longer open.
pub fn accept_date_proposal(
    conn: &mut SqliteConnection,
    match_id: i64,
    proposal_id: i64,
    accepted_by: i64,
    created_at: &str,
) -> Result<(), TxError> {
    let record: MatchRecord = queries::matches::get_match(conn, match_id)?
        .ok_or(CoreError::MatchNotFound { match_id })?;
    let season: Season = queries::seasons::get_season(conn, record.season_id)?
        .ok_or(CoreError::SeasonNotFound {
            season_id: record.season_id,
        })?;
    if !season.status().is_active() {
        return Err(CoreError::SeasonNotActive {
            season_id: record.season_id,
            status: season.status(),
        }
        .into());
    }

    let team1_members: Vec<i64> = queries::teams::member_ids(conn, record.team1_id)?;
    let team2_members: Vec<i64> = queries::teams::member_ids(conn, record.team2_id)?;
    side_of_player(&team1_members, &team2_members, accepted_by).ok_or(
        CoreError::NotAParticipant {
            match_id,
            player_id: accepted_by,
        },
    )?;

    let (proposed_by, proposed_at, _) = load_proposal(conn, match_id, proposal_id)?;

    let rows: usize = diesel::update(
        date_proposals::table
            .filter(date_proposals::proposal_id.eq(proposal_id))
            .filter(date_proposals::status.eq(ProposalStatus::Pending.as_str())),
    )
    .set(date_proposals::status.eq(ProposalStatus::Accepted.as_str()))
    .execute(conn)?;
    if !TransitionOutcome::from_affected_rows(rows).is_applied() {
        return Err(CoreError::ProposalNotPending { proposal_id }.into());
    }

    // Dismiss every other pending proposal of this match.
    diesel::update(
        date_proposals::table
            .filter(date_proposals::match_id.eq(match_id))
            .filter(date_proposals::proposal_id.ne(proposal_id))
            .filter(date_proposals::status.eq(ProposalStatus::Pending.as_str())),
    )
    .set(date_proposals::status.eq(ProposalStatus::Dismissed.as_str()))
    .execute(conn)?;

    let allowed: Vec<&'static str> =
        status_strings(LifecycleAction::AcceptDateProposal.allowed_sources());
    let rows: usize = diesel::update(
        matches::table
            .filter(matches::match_id.eq(match_id))
            .filter(matches::status.eq_any(allowed)),
    )
    .set((
        matches::status.eq(MatchStatus::DateSet.as_str()),
        matches::game_at.eq(&proposed_at),
    ))
    .execute(conn)?;
    TransitionOutcome::from_affected_rows(rows).ok_or_conflict(match_id)?;

    let event: Event = Event::personal(season.club_id(), EventKind::DateAccepted, proposed_by)
        .season(record.season_id)
        .for_match(match_id)
        .actor(accepted_by)
        .metadata(serde_json::json!({ "game_at": proposed_at }));
    insert_event(conn, &event, created_at)?;

    info!(match_id, proposal_id, accepted_by, "Date proposal accepted");
    Ok(())
}

/// Declines a pending date proposal. The match status is unchanged.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `match_id` - The match the proposal belongs to
/// * `proposal_id` - The proposal to decline
/// * `declined_by` - The acting player
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `ProposalNotPending` if the proposal was already answered, or
/// `ProposalMatchMismatch` if it belongs to another match.
pub fn decline_date_proposal(
    conn: &mut SqliteConnection,
    match_id: i64,
    proposal_id: i64,
    declined_by: i64,
    created_at: &str,
) -> Result<(), TxError> {
    let record: MatchRecord = queries::matches::get_match(conn, match_id)?
        .ok_or(CoreError::MatchNotFound { match_id })?;
    let season: Season = queries::seasons::get_season(conn, record.season_id)?
        .ok_or(CoreError::SeasonNotFound {
            season_id: record.season_id,
        })?;

    let team1_members: Vec<i64> = queries::teams::member_ids(conn, record.team1_id)?;
    let team2_members: Vec<i64> = queries::teams::member_ids(conn, record.team2_id)?;
    side_of_player(&team1_members, &team2_members, declined_by).ok_or(
        CoreError::NotAParticipant {
            match_id,
            player_id: declined_by,
        },
    )?;

    let (proposed_by, _, _) = load_proposal(conn, match_id, proposal_id)?;

    let rows: usize = diesel::update(
        date_proposals::table
            .filter(date_proposals::proposal_id.eq(proposal_id))
            .filter(date_proposals::status.eq(ProposalStatus::Pending.as_str())),
    )
    .set(date_proposals::status.eq(ProposalStatus::Declined.as_str()))
    .execute(conn)?;
    if !TransitionOutcome::from_affected_rows(rows).is_applied() {
        return Err(CoreError::ProposalNotPending { proposal_id }.into());
    }

    let event: Event = Event::personal(season.club_id(), EventKind::DateDeclined, proposed_by)
        .season(record.season_id)
        .for_match(match_id)
        .actor(declined_by);
    insert_event(conn, &event, created_at)?;

    info!(match_id, proposal_id, declined_by, "Date proposal declined");
    Ok(())
}
