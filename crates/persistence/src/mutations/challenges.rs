// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Challenge creation.
//!
//! The caller's earlier reads (used to render "challengeable" state) are
//! not linearizable with concurrent challenges, so everything is
//! re-validated here, inside the season lock, before the match row is
//! inserted.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use club_ladder::{CoreError, rank_of};
use club_ladder_domain::{MatchStatus, Season, Team, can_challenge};
use club_ladder_events::{Event, EventKind};

use crate::data_models::ChallengeSpec;
use crate::diesel_schema::matches;
use crate::mutations::events::insert_event;
use crate::mutations::TxError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Loads and validates one side of the challenge.
fn load_team(
    conn: &mut SqliteConnection,
    season_id: i64,
    team_id: i64,
) -> Result<Team, TxError> {
    let team: Team = queries::teams::get_team(conn, team_id)?
        .ok_or(CoreError::TeamNotFound { team_id })?;
    if team.season_id() != season_id {
        return Err(CoreError::TeamNotInSeason { team_id, season_id }.into());
    }
    if team.opted_out() {
        return Err(CoreError::TeamOptedOut { team_id }.into());
    }
    Ok(team)
}

/// Creates a challenge: one `challenged` match plus its two events.
///
/// Must run under the season lock. Re-checks, in order: season is active,
/// both teams are valid and distinct, the reach rule holds against the
/// latest snapshot, and neither team appears in the open-challenge set.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `spec` - The challenge parameters
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Returns
///
/// The new match id.
///
/// # Errors
///
/// Returns `ChallengeConflict` when either team already has an open
/// challenge, `ChallengeOutOfReach` when the rank gap violates the reach
/// rule, and consistency errors when a team is missing from the standings.
pub fn create_challenge(
    conn: &mut SqliteConnection,
    spec: &ChallengeSpec,
    created_at: &str,
) -> Result<i64, TxError> {
    let season: Season = queries::seasons::get_season(conn, spec.season_id)?
        .ok_or(CoreError::SeasonNotFound {
            season_id: spec.season_id,
        })?;
    if !season.status().is_active() {
        return Err(CoreError::SeasonNotActive {
            season_id: spec.season_id,
            status: season.status(),
        }
        .into());
    }

    if spec.challenger_team_id == spec.challengee_team_id {
        return Err(CoreError::TeamsNotDistinct {
            team_id: spec.challenger_team_id,
        }
        .into());
    }
    load_team(conn, spec.season_id, spec.challenger_team_id)?;
    load_team(conn, spec.season_id, spec.challengee_team_id)?;

    let snapshot = queries::standings::latest_snapshot(conn, spec.season_id)?
        .ok_or(CoreError::MissingStandings {
            season_id: spec.season_id,
        })?;
    let challenger_rank: u32 = rank_of(&snapshot.results, spec.challenger_team_id).ok_or(
        CoreError::TeamMissingFromStandings {
            season_id: spec.season_id,
            team_id: spec.challenger_team_id,
        },
    )?;
    let target_rank: u32 = rank_of(&snapshot.results, spec.challengee_team_id).ok_or(
        CoreError::TeamMissingFromStandings {
            season_id: spec.season_id,
            team_id: spec.challengee_team_id,
        },
    )?;

    if !can_challenge(challenger_rank, target_rank, season.challenge_reach()) {
        return Err(CoreError::ChallengeOutOfReach {
            challenger_rank,
            target_rank,
            reach: season.challenge_reach(),
        }
        .into());
    }

    // The mandatory re-check inside the lock: the open-challenge set may
    // have changed since the caller last looked.
    let open: Vec<i64> = queries::matches::teams_with_open_challenge(conn, spec.season_id)?;
    for team_id in [spec.challenger_team_id, spec.challengee_team_id] {
        if open.contains(&team_id) {
            return Err(CoreError::ChallengeConflict { team_id }.into());
        }
    }

    diesel::insert_into(matches::table)
        .values((
            matches::season_id.eq(spec.season_id),
            matches::team1_id.eq(spec.challenger_team_id),
            matches::team2_id.eq(spec.challengee_team_id),
            matches::status.eq(MatchStatus::Challenged.as_str()),
            matches::challenge_text.eq(spec.text.as_deref()),
            matches::created_at.eq(created_at),
        ))
        .execute(conn)?;
    let match_id: i64 = get_last_insert_rowid(conn)?;

    let public: Event = Event::public(spec.club_id, EventKind::Challenge)
        .season(spec.season_id)
        .for_match(match_id)
        .actor(spec.challenger_player_id)
        .metadata(serde_json::json!({
            "challenger_team_id": spec.challenger_team_id,
            "challengee_team_id": spec.challengee_team_id,
            "challenger_rank": challenger_rank,
            "target_rank": target_rank,
            "text": spec.text.as_deref(),
        }));
    insert_event(conn, &public, created_at)?;

    let personal: Event = Event::personal(spec.club_id, EventKind::Challenged, spec.challengee_player_id)
        .season(spec.season_id)
        .for_match(match_id)
        .actor(spec.challenger_player_id);
    insert_event(conn, &personal, created_at)?;

    info!(
        season_id = spec.season_id,
        match_id,
        challenger_team_id = spec.challenger_team_id,
        challengee_team_id = spec.challengee_team_id,
        "Created challenge"
    );
    Ok(match_id)
}
