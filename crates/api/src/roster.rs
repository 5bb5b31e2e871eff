// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV roster import.
//!
//! Bulk-enrolls single-player teams from a `player_id,display_name` CSV,
//! bottom-anchored in file order. Rows are validated independently: a
//! malformed or already-enrolled row is reported in place and does not
//! abort the rest of the batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use club_ladder::CoreError;
use club_ladder_persistence::Persistence;

use crate::error::{ApiError, translate_core_error};
use crate::Caller;

/// Errors raised by roster parsing before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The CSV could not be read at all.
    #[error("CSV parse error: {0}")]
    Csv(String),
    /// The roster contains no data rows.
    #[error("Roster contains no rows")]
    Empty,
}

/// The outcome of one roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterRowStatus {
    /// The player was enrolled as a single-player team.
    Enrolled {
        /// The created team.
        team_id: i64,
        /// The team's 1-based starting rank.
        rank: u32,
    },
    /// The player already has a team in the season; the row was skipped.
    AlreadyEnrolled,
    /// The row could not be processed.
    Invalid {
        /// Why the row was rejected.
        reason: String,
    },
}

/// One processed roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRowResult {
    /// The 1-based data row number (excluding the header).
    pub row: usize,
    /// The parsed player reference, when the row parsed.
    pub player_id: Option<i64>,
    /// The display name column, informational only.
    pub display_name: Option<String>,
    /// What happened to the row.
    pub status: RosterRowStatus,
}

/// The result of a roster import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterImportResponse {
    /// The season the roster was imported into.
    pub season_id: i64,
    /// How many rows enrolled successfully.
    pub enrolled_count: usize,
    /// Per-row outcomes, in file order.
    pub rows: Vec<RosterRowResult>,
}

/// Imports a CSV roster into a season. Admin only.
///
/// The expected columns are `player_id` and an optional `display_name`.
/// Each valid row enrolls a single-player team at the bottom of the
/// ladder, so the file order becomes the enrollment order.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authorized caller (must be admin)
/// * `season_id` - The season to enroll into
/// * `csv_data` - The raw CSV contents
///
/// # Errors
///
/// Returns an authorization failure, an unreadable-CSV error, or an empty
/// roster error. Row-level failures are reported per row, not as errors.
pub fn import_roster(
    persistence: &mut Persistence,
    caller: &Caller,
    season_id: i64,
    csv_data: &str,
) -> Result<RosterImportResponse, ApiError> {
    if !caller.is_admin() {
        return Err(ApiError::Unauthorized {
            action: String::from("import_roster"),
            reason: String::from("requires the admin role"),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let mut rows: Vec<RosterRowResult> = Vec::new();
    let mut enrolled_count: usize = 0;

    for (index, record) in reader.records().enumerate() {
        let row: usize = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                rows.push(RosterRowResult {
                    row,
                    player_id: None,
                    display_name: None,
                    status: RosterRowStatus::Invalid {
                        reason: RosterError::Csv(e.to_string()).to_string(),
                    },
                });
                continue;
            }
        };

        let display_name: Option<String> = record.get(1).map(ToString::to_string);
        let Some(raw_player_id) = record.get(0).filter(|s| !s.is_empty()) else {
            rows.push(RosterRowResult {
                row,
                player_id: None,
                display_name,
                status: RosterRowStatus::Invalid {
                    reason: String::from("Missing player_id column"),
                },
            });
            continue;
        };
        let Ok(player_id) = raw_player_id.parse::<i64>() else {
            rows.push(RosterRowResult {
                row,
                player_id: None,
                display_name,
                status: RosterRowStatus::Invalid {
                    reason: format!("player_id '{raw_player_id}' is not an integer"),
                },
            });
            continue;
        };

        match persistence.enroll_team(season_id, &[player_id]) {
            Ok(enrolled) => {
                enrolled_count += 1;
                rows.push(RosterRowResult {
                    row,
                    player_id: Some(player_id),
                    display_name,
                    status: RosterRowStatus::Enrolled {
                        team_id: enrolled.team_id,
                        rank: enrolled.rank,
                    },
                });
            }
            Err(CoreError::AlreadyEnrolled { .. }) => {
                rows.push(RosterRowResult {
                    row,
                    player_id: Some(player_id),
                    display_name,
                    status: RosterRowStatus::AlreadyEnrolled,
                });
            }
            // Season-level failures apply to every row equally; stop early.
            Err(err @ (CoreError::SeasonNotFound { .. } | CoreError::EnrollmentClosed { .. })) => {
                return Err(translate_core_error("import_roster", err));
            }
            Err(err) => {
                rows.push(RosterRowResult {
                    row,
                    player_id: Some(player_id),
                    display_name,
                    status: RosterRowStatus::Invalid {
                        reason: err.to_string(),
                    },
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("csv_data"),
            message: RosterError::Empty.to_string(),
        });
    }

    info!(
        season_id,
        enrolled_count,
        total_rows = rows.len(),
        "Roster imported"
    );
    Ok(RosterImportResponse {
        season_id,
        enrolled_count,
        rows,
    })
}
