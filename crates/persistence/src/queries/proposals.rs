// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date proposal queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;

use club_ladder_domain::ProposalStatus;

use crate::data_models::ProposalRecord;
use crate::diesel_schema::date_proposals;
use crate::error::PersistenceError;

/// Retrieves every date proposal of a match, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `match_id` - The match whose proposals to list
///
/// # Errors
///
/// Returns an error if the query fails or a stored status does not parse.
pub fn proposals_for_match(
    conn: &mut SqliteConnection,
    match_id: i64,
) -> Result<Vec<ProposalRecord>, PersistenceError> {
    let rows: Vec<(i64, i64, i64, String, String, String)> = date_proposals::table
        .filter(date_proposals::match_id.eq(match_id))
        .order(date_proposals::proposal_id.asc())
        .select((
            date_proposals::proposal_id,
            date_proposals::match_id,
            date_proposals::proposed_by,
            date_proposals::proposed_at,
            date_proposals::status,
            date_proposals::created_at,
        ))
        .load::<(i64, i64, i64, String, String, String)>(conn)?;

    rows.into_iter()
        .map(
            |(proposal_id, match_id, proposed_by, proposed_at, status, created_at)| {
                let status: ProposalStatus = ProposalStatus::from_str(&status)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
                Ok(ProposalRecord {
                    proposal_id,
                    match_id,
                    proposed_by,
                    proposed_at,
                    status,
                    created_at,
                })
            },
        )
        .collect()
}
