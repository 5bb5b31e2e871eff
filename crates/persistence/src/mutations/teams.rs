// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team enrollment.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use club_ladder::CoreError;
use club_ladder_domain::{Season, SeasonStatus, Team};
use club_ladder_events::{Event, EventKind};

use crate::data_models::EnrolledTeam;
use crate::diesel_schema::{team_members, teams};
use crate::mutations::events::insert_event;
use crate::mutations::standings::append_team_to_standings;
use crate::mutations::TxError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Enrolls a team into a season and anchors it at the bottom of the ladder.
///
/// Enrollment is allowed while the season is in `Draft` (roster setup) and,
/// when the season permits open enrollment, while it is `Active`. Each
/// member may belong to at most one team per season; violating that is an
/// explicit `AlreadyEnrolled` result, not an exception path.
///
/// Must run under the season lock: the standings append reads the latest
/// snapshot before writing the next one.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `season_id` - The season to enroll into
/// * `member_player_ids` - The ordered members of the new team
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns `SeasonNotFound`, `SeasonNotActive`, `EnrollmentClosed`,
/// `AlreadyEnrolled`, or a domain violation for bad team composition.
pub fn enroll_team(
    conn: &mut SqliteConnection,
    season_id: i64,
    member_player_ids: &[i64],
    created_at: &str,
) -> Result<EnrolledTeam, TxError> {
    let season: Season = queries::seasons::get_season(conn, season_id)?
        .ok_or(CoreError::SeasonNotFound { season_id })?;

    match season.status() {
        SeasonStatus::Draft => {}
        SeasonStatus::Active => {
            if !season.config().open_enrollment() {
                return Err(CoreError::EnrollmentClosed { season_id }.into());
            }
        }
        SeasonStatus::Ended => {
            return Err(CoreError::SeasonNotActive {
                season_id,
                status: season.status(),
            }
            .into());
        }
    }

    season.validate_team_size(member_player_ids.len())?;
    Team::new(season_id, member_player_ids.to_vec())?;

    for &player_id in member_player_ids {
        if queries::teams::find_team_of_player(conn, season_id, player_id)?.is_some() {
            return Err(CoreError::AlreadyEnrolled {
                player_id,
                season_id,
            }
            .into());
        }
    }

    diesel::insert_into(teams::table)
        .values((
            teams::season_id.eq(season_id),
            teams::opted_out.eq(0),
            teams::created_at.eq(created_at),
        ))
        .execute(conn)?;
    let team_id: i64 = get_last_insert_rowid(conn)?;

    for (position, &player_id) in member_player_ids.iter().enumerate() {
        let position: i32 = i32::try_from(position)
            .map_err(|_| CoreError::Storage(String::from("Team member position out of range")))?;
        diesel::insert_into(team_members::table)
            .values((
                team_members::team_id.eq(team_id),
                team_members::player_id.eq(player_id),
                team_members::position.eq(position),
            ))
            .execute(conn)?;
    }

    let rank: u32 = append_team_to_standings(conn, season_id, team_id, created_at)?;

    let event: Event = Event::public(season.club_id(), EventKind::NewPlayer)
        .season(season_id)
        .metadata(serde_json::json!({
            "team_id": team_id,
            "rank": rank,
            "player_ids": member_player_ids,
        }));
    insert_event(conn, &event, created_at)?;

    info!(season_id, team_id, rank, "Enrolled team");
    Ok(EnrolledTeam { team_id, rank })
}
