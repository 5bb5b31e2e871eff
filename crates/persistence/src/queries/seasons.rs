// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use std::str::FromStr;

use club_ladder_domain::{Season, SeasonConfig, SeasonStatus};

use crate::diesel_schema::seasons;
use crate::error::PersistenceError;

/// Diesel Queryable struct for season rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = seasons)]
struct SeasonRow {
    season_id: i64,
    club_id: i64,
    name: String,
    status: String,
    best_of: i32,
    match_deadline_days: i32,
    reminder_days: i32,
    requires_confirmation: i32,
    open_enrollment: i32,
    min_team_size: i32,
    max_team_size: i32,
    challenge_reach: i32,
    #[allow(dead_code)]
    created_at: String,
}

impl SeasonRow {
    /// Reconstructs the domain `Season` from a stored row.
    fn into_season(self) -> Result<Season, PersistenceError> {
        let status: SeasonStatus = SeasonStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let best_of: u8 = self.best_of.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!("best_of out of range: {}", self.best_of))
        })?;
        let match_deadline_days: u16 = self.match_deadline_days.to_u16().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "match_deadline_days out of range: {}",
                self.match_deadline_days
            ))
        })?;
        let reminder_days: u16 = self.reminder_days.to_u16().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "reminder_days out of range: {}",
                self.reminder_days
            ))
        })?;
        let min_team_size: u8 = self.min_team_size.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "min_team_size out of range: {}",
                self.min_team_size
            ))
        })?;
        let max_team_size: u8 = self.max_team_size.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "max_team_size out of range: {}",
                self.max_team_size
            ))
        })?;
        let challenge_reach: u32 = self.challenge_reach.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "challenge_reach out of range: {}",
                self.challenge_reach
            ))
        })?;

        let config: SeasonConfig = SeasonConfig::new(
            best_of,
            match_deadline_days,
            reminder_days,
            self.requires_confirmation != 0,
            self.open_enrollment != 0,
        )
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Season::with_id(
            self.season_id,
            self.club_id,
            self.name,
            status,
            config,
            min_team_size,
            max_team_size,
            challenge_reach,
        ))
    }
}

/// Retrieves a season by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to retrieve
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_season(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Option<Season>, PersistenceError> {
    let row: Option<SeasonRow> = seasons::table
        .filter(seasons::season_id.eq(season_id))
        .select(SeasonRow::as_select())
        .first::<SeasonRow>(conn)
        .optional()?;

    row.map(SeasonRow::into_season).transpose()
}
