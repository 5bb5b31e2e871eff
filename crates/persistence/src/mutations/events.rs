// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event insertion.
//!
//! Events are write-once and owned by whichever domain operation creates
//! them; they are always inserted inside that operation's transaction.

use diesel::prelude::*;
use diesel::SqliteConnection;

use club_ladder_events::Event;

use crate::diesel_schema::events;
use crate::mutations::TxError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts one event row.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `event` - The event to record
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &Event,
    created_at: &str,
) -> Result<i64, TxError> {
    let metadata_json: String = serde_json::to_string(&event.metadata)?;

    diesel::insert_into(events::table)
        .values((
            events::club_id.eq(event.club_id),
            events::season_id.eq(event.season_id),
            events::match_id.eq(event.match_id),
            events::actor_player_id.eq(event.actor_player_id),
            events::target_player_id.eq(event.target_player_id),
            events::kind.eq(event.kind.as_str()),
            events::metadata_json.eq(&metadata_json),
            events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    Ok(get_last_insert_rowid(conn)?)
}
