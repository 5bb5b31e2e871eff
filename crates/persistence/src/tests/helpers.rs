// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for persistence tests.

use crate::{ChallengeSpec, NewSeasonSpec, Persistence};

/// The club every test season belongs to.
pub const CLUB: i64 = 1;

/// Creates a fresh in-memory store.
pub fn store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store")
}

/// A single-player season spec with confirmation required and reach 2.
pub fn season_spec(name: &str) -> NewSeasonSpec {
    NewSeasonSpec {
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

/// Creates an active season and enrolls one single-player team per player.
///
/// Returns the season id and the team ids in enrollment (= rank) order.
pub fn active_season_with_players(
    persistence: &mut Persistence,
    players: &[i64],
) -> (i64, Vec<i64>) {
    let season_id: i64 = persistence
        .create_season(&season_spec("Test Season"))
        .expect("create season");
    let team_ids: Vec<i64> = players
        .iter()
        .map(|&player_id| {
            persistence
                .enroll_team(season_id, &[player_id])
                .expect("enroll team")
                .team_id
        })
        .collect();
    persistence
        .activate_season(season_id)
        .expect("activate season");
    (season_id, team_ids)
}

/// Builds a challenge spec between two single-player teams.
pub fn challenge_spec(
    season_id: i64,
    challenger_team_id: i64,
    challengee_team_id: i64,
    challenger_player_id: i64,
    challengee_player_id: i64,
) -> ChallengeSpec {
    ChallengeSpec {
        season_id,
        club_id: CLUB,
        challenger_team_id,
        challengee_team_id,
        challenger_player_id,
        challengee_player_id,
        text: Some(String::from("I challenge you!")),
    }
}
