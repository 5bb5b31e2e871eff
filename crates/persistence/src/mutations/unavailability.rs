// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unavailability window mutations.
//!
//! The unavailability guard: a player whose team has an open challenge may
//! not declare an unavailability window, so windows cannot be used to dodge
//! a challenge that is already underway.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use club_ladder::CoreError;
use club_ladder_domain::{DomainError, Season};
use club_ladder_events::{Event, EventKind};

use crate::diesel_schema::unavailability;
use crate::mutations::events::insert_event;
use crate::mutations::TxError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Parses an RFC 3339 datetime parameter.
fn parse_datetime(value: &str) -> Result<time::OffsetDateTime, TxError> {
    time::OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339).map_err(
        |e| {
            TxError::from(DomainError::DateParseError {
                value: value.to_string(),
                error: e.to_string(),
            })
        },
    )
}

/// Declares an unavailability window for a player.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `season_id` - The season the window applies to
/// * `player_id` - The player declaring the window
/// * `starts_at` - Window start (RFC 3339)
/// * `ends_at` - Window end (RFC 3339)
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Returns
///
/// The new window id.
///
/// # Errors
///
/// Returns an invalid date range, `NotEnrolled` for players without a team
/// in the season, or `HasOpenChallenge` when the player's team has a match
/// in an open state.
pub fn set_unavailability(
    conn: &mut SqliteConnection,
    season_id: i64,
    player_id: i64,
    starts_at: &str,
    ends_at: &str,
    created_at: &str,
) -> Result<i64, TxError> {
    let start = parse_datetime(starts_at)?;
    let end = parse_datetime(ends_at)?;
    if end < start {
        return Err(TxError::from(DomainError::InvalidDateRange {
            starts_at: starts_at.to_string(),
            ends_at: ends_at.to_string(),
        }));
    }

    let season: Season = queries::seasons::get_season(conn, season_id)?
        .ok_or(CoreError::SeasonNotFound { season_id })?;

    let team_id: i64 = queries::teams::find_team_of_player(conn, season_id, player_id)?.ok_or(
        CoreError::NotEnrolled {
            player_id,
            season_id,
        },
    )?;

    let open: Vec<i64> = queries::matches::teams_with_open_challenge(conn, season_id)?;
    if open.contains(&team_id) {
        return Err(CoreError::HasOpenChallenge { team_id }.into());
    }

    diesel::insert_into(unavailability::table)
        .values((
            unavailability::season_id.eq(season_id),
            unavailability::player_id.eq(player_id),
            unavailability::starts_at.eq(starts_at),
            unavailability::ends_at.eq(ends_at),
            unavailability::created_at.eq(created_at),
        ))
        .execute(conn)?;
    let window_id: i64 = get_last_insert_rowid(conn)?;

    let event: Event = Event::public(season.club_id(), EventKind::Unavailable)
        .season(season_id)
        .actor(player_id)
        .metadata(serde_json::json!({
            "starts_at": starts_at,
            "ends_at": ends_at,
        }));
    insert_event(conn, &event, created_at)?;

    info!(season_id, player_id, window_id, "Unavailability window set");
    Ok(window_id)
}

/// Removes all of a player's unavailability windows in a season.
///
/// Clearing only ever makes a player challengeable again, so it needs no
/// open-challenge guard.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `season_id` - The season whose windows to clear
/// * `player_id` - The player clearing their windows
///
/// # Returns
///
/// The number of windows removed.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub fn clear_unavailability(
    conn: &mut SqliteConnection,
    season_id: i64,
    player_id: i64,
) -> Result<usize, TxError> {
    let removed: usize = diesel::delete(
        unavailability::table
            .filter(unavailability::season_id.eq(season_id))
            .filter(unavailability::player_id.eq(player_id)),
    )
    .execute(conn)?;

    info!(season_id, player_id, removed, "Unavailability windows cleared");
    Ok(removed)
}
