// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use club_ladder::{CoreError, TransitionOutcome};
use club_ladder_domain::{DomainError, Season, SeasonConfig, SeasonStatus};

use crate::data_models::NewSeasonSpec;
use crate::diesel_schema::seasons;
use crate::mutations::TxError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a season in `Draft` status.
///
/// The parameters pass through full domain validation before anything is
/// written.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `spec` - The season parameters
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns a domain violation for invalid configuration, or a database
/// error.
pub fn create_season(
    conn: &mut SqliteConnection,
    spec: &NewSeasonSpec,
    created_at: &str,
) -> Result<i64, TxError> {
    let config: SeasonConfig = SeasonConfig::new(
        spec.best_of,
        spec.match_deadline_days,
        spec.reminder_days,
        spec.requires_confirmation,
        spec.open_enrollment,
    )?;
    let season: Season = Season::new(
        spec.club_id,
        spec.name.clone(),
        config,
        spec.min_team_size,
        spec.max_team_size,
        spec.challenge_reach,
    )?;

    let challenge_reach: i32 = i32::try_from(spec.challenge_reach).map_err(|_| {
        TxError::from(DomainError::InvalidChallengeReach {
            reach: spec.challenge_reach,
        })
    })?;

    diesel::insert_into(seasons::table)
        .values((
            seasons::club_id.eq(season.club_id()),
            seasons::name.eq(season.name()),
            seasons::status.eq(season.status().as_str()),
            seasons::best_of.eq(i32::from(spec.best_of)),
            seasons::match_deadline_days.eq(i32::from(spec.match_deadline_days)),
            seasons::reminder_days.eq(i32::from(spec.reminder_days)),
            seasons::requires_confirmation.eq(i32::from(spec.requires_confirmation)),
            seasons::open_enrollment.eq(i32::from(spec.open_enrollment)),
            seasons::min_team_size.eq(i32::from(spec.min_team_size)),
            seasons::max_team_size.eq(i32::from(spec.max_team_size)),
            seasons::challenge_reach.eq(challenge_reach),
            seasons::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let season_id: i64 = get_last_insert_rowid(conn)?;
    info!(season_id, club_id = spec.club_id, "Created season");
    Ok(season_id)
}

/// Moves a season between lifecycle states with a guarded update.
///
/// The same affected-rows guard protects season transitions that protects
/// match transitions: zero rows means a concurrent actor (or a stale view)
/// and surfaces as `SeasonStatusConflict`.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `season_id` - The season to transition
/// * `from` - The required current status
/// * `to` - The target status
///
/// # Errors
///
/// Returns `SeasonNotFound` if the season does not exist and
/// `SeasonStatusConflict` if the guard matched zero rows.
pub fn transition_season(
    conn: &mut SqliteConnection,
    season_id: i64,
    from: SeasonStatus,
    to: SeasonStatus,
) -> Result<(), TxError> {
    let exists: Option<i64> = seasons::table
        .filter(seasons::season_id.eq(season_id))
        .select(seasons::season_id)
        .first::<i64>(conn)
        .optional()?;
    if exists.is_none() {
        return Err(CoreError::SeasonNotFound { season_id }.into());
    }

    let rows: usize = diesel::update(
        seasons::table
            .filter(seasons::season_id.eq(season_id))
            .filter(seasons::status.eq(from.as_str())),
    )
    .set(seasons::status.eq(to.as_str()))
    .execute(conn)?;

    match TransitionOutcome::from_affected_rows(rows) {
        TransitionOutcome::Applied => {
            info!(season_id, from = %from, to = %to, "Season transitioned");
            Ok(())
        }
        TransitionOutcome::Conflict => Err(CoreError::SeasonStatusConflict { season_id }.into()),
    }
}
