// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use club_ladder_persistence::Persistence;

use crate::request_response::{CreateSeasonRequest, EnrollTeamRequest};
use crate::{Caller, handlers};

/// The club every test season belongs to.
pub const CLUB: i64 = 1;

/// Creates a fresh in-memory store.
pub fn store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store")
}

/// A default singles season request.
pub fn season_request(name: &str) -> CreateSeasonRequest {
    CreateSeasonRequest {
        club_id: CLUB,
        name: name.to_string(),
        best_of: 3,
        match_deadline_days: 14,
        reminder_days: 3,
        requires_confirmation: true,
        open_enrollment: true,
        min_team_size: 1,
        max_team_size: 1,
        challenge_reach: 2,
    }
}

/// Creates an active season with one single-player team per player.
///
/// Returns the season id and the team ids in enrollment order.
pub fn active_season_with_players(
    persistence: &mut Persistence,
    players: &[i64],
) -> (i64, Vec<i64>) {
    let admin: Caller = Caller::admin();
    let season_id: i64 = handlers::create_season(persistence, &admin, &season_request("API Season"))
        .expect("create season")
        .season_id;
    let team_ids: Vec<i64> = players
        .iter()
        .map(|&player_id| {
            handlers::enroll_team(
                persistence,
                &Caller::player(player_id),
                &EnrollTeamRequest {
                    season_id,
                    member_player_ids: vec![player_id],
                },
            )
            .expect("enroll team")
            .team_id
        })
        .collect();
    handlers::activate_season(persistence, &admin, season_id).expect("activate season");
    (season_id, team_ids)
}
