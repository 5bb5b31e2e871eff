// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event feed queries.
//!
//! Public events (no target player) form the club feed; personal events are
//! one player's notifications.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;

use club_ladder_events::{Event, EventKind, StoredEvent};

use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Row tuple for event queries.
type EventTuple = (
    i64,
    i64,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    String,
    String,
    String,
);

/// Deserializes an event row tuple.
fn into_stored(row: EventTuple) -> Result<StoredEvent, PersistenceError> {
    let (
        event_id,
        club_id,
        season_id,
        match_id,
        actor_player_id,
        target_player_id,
        kind,
        metadata_json,
        created_at,
    ) = row;
    let kind: EventKind = EventKind::from_str(&kind)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let metadata: serde_json::Value = serde_json::from_str(&metadata_json)?;

    Ok(StoredEvent {
        event_id,
        event: Event {
            club_id,
            season_id,
            match_id,
            actor_player_id,
            target_player_id,
            kind,
            metadata,
        },
        created_at,
    })
}

/// The columns selected by every event query.
macro_rules! event_columns {
    () => {
        (
            events::event_id,
            events::club_id,
            events::season_id,
            events::match_id,
            events::actor_player_id,
            events::target_player_id,
            events::kind,
            events::metadata_json,
            events::created_at,
        )
    };
}

/// Retrieves the most recent public events for a club.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `club_id` - The club whose feed to read
/// * `limit` - Maximum number of events to return
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be reconstructed.
pub fn club_feed(
    conn: &mut SqliteConnection,
    club_id: i64,
    limit: i64,
) -> Result<Vec<StoredEvent>, PersistenceError> {
    let rows: Vec<EventTuple> = events::table
        .filter(events::club_id.eq(club_id))
        .filter(events::target_player_id.is_null())
        .order(events::event_id.desc())
        .limit(limit)
        .select(event_columns!())
        .load::<EventTuple>(conn)?;

    rows.into_iter().map(into_stored).collect()
}

/// Retrieves the most recent personal notifications for a player.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `player_id` - The player whose notifications to read
/// * `limit` - Maximum number of events to return
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be reconstructed.
pub fn notifications(
    conn: &mut SqliteConnection,
    player_id: i64,
    limit: i64,
) -> Result<Vec<StoredEvent>, PersistenceError> {
    let rows: Vec<EventTuple> = events::table
        .filter(events::target_player_id.eq(player_id))
        .order(events::event_id.desc())
        .limit(limit)
        .select(event_columns!())
        .load::<EventTuple>(conn)?;

    rows.into_iter().map(into_stored).collect()
}
