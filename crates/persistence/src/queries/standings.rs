// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standings snapshot queries.
//!
//! The current standings are the most recent snapshot for the season; the
//! previous snapshot exists only to display movement. Snapshots are ordered
//! by their assigned id, which is strictly increasing because they are only
//! ever appended.

use diesel::prelude::*;
use diesel::SqliteConnection;

use club_ladder::rank_of;
use club_ladder_domain::compute_movement;

use crate::data_models::{RankPoint, SnapshotRecord, StandingRow};
use crate::diesel_schema::standings_snapshots;
use crate::error::PersistenceError;

/// Row tuple for snapshot queries.
type SnapshotTuple = (i64, i64, Option<i64>, String, String);

/// Deserializes a snapshot row tuple.
fn into_record(row: SnapshotTuple) -> Result<SnapshotRecord, PersistenceError> {
    let (snapshot_id, season_id, match_id, results_json, created_at) = row;
    let results: Vec<i64> = serde_json::from_str(&results_json)?;
    Ok(SnapshotRecord {
        snapshot_id,
        season_id,
        match_id,
        results,
        created_at,
    })
}

/// Retrieves the most recent snapshot for a season.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
///
/// # Errors
///
/// Returns an error if the query fails or the snapshot cannot be
/// deserialized.
pub fn latest_snapshot(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Option<SnapshotRecord>, PersistenceError> {
    let row: Option<SnapshotTuple> = standings_snapshots::table
        .filter(standings_snapshots::season_id.eq(season_id))
        .order(standings_snapshots::snapshot_id.desc())
        .select((
            standings_snapshots::snapshot_id,
            standings_snapshots::season_id,
            standings_snapshots::match_id,
            standings_snapshots::results_json,
            standings_snapshots::created_at,
        ))
        .first::<SnapshotTuple>(conn)
        .optional()?;

    row.map(into_record).transpose()
}

/// Retrieves the two most recent snapshots for a season.
///
/// The second element is `None` when fewer than two snapshots exist. Used
/// only to compute movement.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
///
/// # Errors
///
/// Returns an error if the query fails or a snapshot cannot be
/// deserialized.
pub fn latest_two_snapshots(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<(Option<SnapshotRecord>, Option<SnapshotRecord>), PersistenceError> {
    let rows: Vec<SnapshotTuple> = standings_snapshots::table
        .filter(standings_snapshots::season_id.eq(season_id))
        .order(standings_snapshots::snapshot_id.desc())
        .limit(2)
        .select((
            standings_snapshots::snapshot_id,
            standings_snapshots::season_id,
            standings_snapshots::match_id,
            standings_snapshots::results_json,
            standings_snapshots::created_at,
        ))
        .load::<SnapshotTuple>(conn)?;

    let mut iter = rows.into_iter();
    let current: Option<SnapshotRecord> = iter.next().map(into_record).transpose()?;
    let previous: Option<SnapshotRecord> = iter.next().map(into_record).transpose()?;
    Ok((current, previous))
}

/// Computes the current standings annotated with movement.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn standings_with_movement(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<StandingRow>, PersistenceError> {
    let (current, previous) = latest_two_snapshots(conn, season_id)?;
    let Some(current) = current else {
        return Ok(Vec::new());
    };

    let previous_results: Option<&[i64]> = previous.as_ref().map(|s| s.results.as_slice());
    let mut rows: Vec<StandingRow> = Vec::with_capacity(current.results.len());
    for &team_id in &current.results {
        let rank: u32 = rank_of(&current.results, team_id).ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Team {team_id} missing from its own snapshot"
            ))
        })?;
        rows.push(StandingRow {
            rank,
            team_id,
            movement: compute_movement(team_id, &current.results, previous_results),
        });
    }
    Ok(rows)
}

/// Retrieves a team's rank for every snapshot that contains it.
///
/// Ordered chronologically. Snapshots not containing the team are omitted,
/// never interpolated.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
/// * `team_id` - The team to chart
///
/// # Errors
///
/// Returns an error if the query fails or a snapshot cannot be
/// deserialized.
pub fn rank_history(
    conn: &mut SqliteConnection,
    season_id: i64,
    team_id: i64,
) -> Result<Vec<RankPoint>, PersistenceError> {
    let rows: Vec<(String, String)> = standings_snapshots::table
        .filter(standings_snapshots::season_id.eq(season_id))
        .order(standings_snapshots::snapshot_id.asc())
        .select((
            standings_snapshots::results_json,
            standings_snapshots::created_at,
        ))
        .load::<(String, String)>(conn)?;

    let mut points: Vec<RankPoint> = Vec::new();
    for (results_json, created_at) in rows {
        let results: Vec<i64> = serde_json::from_str(&results_json)?;
        if let Some(rank) = rank_of(&results, team_id) {
            points.push(RankPoint {
                recorded_at: created_at,
                rank,
            });
        }
    }
    Ok(points)
}
