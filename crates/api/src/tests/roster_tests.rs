// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the CSV roster import.

use club_ladder_persistence::Persistence;

use crate::error::ApiError;
use crate::roster::{RosterRowStatus, import_roster};
use crate::tests::helpers::{season_request, store};
use crate::{Caller, handlers};

fn draft_season(p: &mut Persistence) -> i64 {
    handlers::create_season(p, &Caller::admin(), &season_request("Roster Season"))
        .expect("create season")
        .season_id
}

#[test]
fn test_roster_enrolls_rows_in_file_order() {
    let mut p: Persistence = store();
    let season_id: i64 = draft_season(&mut p);

    let csv = "player_id,display_name\n100,Alice\n101,Bob\n102,Carol\n";
    let response = import_roster(&mut p, &Caller::admin(), season_id, csv).expect("import");

    assert_eq!(response.enrolled_count, 3);
    let ranks: Vec<u32> = response
        .rows
        .iter()
        .map(|row| match row.status {
            RosterRowStatus::Enrolled { rank, .. } => rank,
            _ => panic!("row should have enrolled"),
        })
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    let standings = handlers::standings(&mut p, season_id).expect("standings");
    assert_eq!(standings.standings.len(), 3);
}

#[test]
fn test_roster_reports_bad_rows_without_aborting() {
    let mut p: Persistence = store();
    let season_id: i64 = draft_season(&mut p);

    let csv = "player_id,display_name\n100,Alice\nnot-a-number,Mallory\n101,Bob\n";
    let response = import_roster(&mut p, &Caller::admin(), season_id, csv).expect("import");

    assert_eq!(response.enrolled_count, 2);
    assert!(matches!(
        response.rows[1].status,
        RosterRowStatus::Invalid { .. }
    ));
    // The bad row does not consume a rank.
    assert!(matches!(
        response.rows[2].status,
        RosterRowStatus::Enrolled { rank: 2, .. }
    ));
}

#[test]
fn test_roster_marks_duplicate_players() {
    let mut p: Persistence = store();
    let season_id: i64 = draft_season(&mut p);

    let csv = "player_id,display_name\n100,Alice\n100,Alice Again\n";
    let response = import_roster(&mut p, &Caller::admin(), season_id, csv).expect("import");

    assert_eq!(response.enrolled_count, 1);
    assert_eq!(response.rows[1].status, RosterRowStatus::AlreadyEnrolled);
}

#[test]
fn test_roster_requires_admin() {
    let mut p: Persistence = store();
    let season_id: i64 = draft_season(&mut p);

    let result = import_roster(&mut p, &Caller::player(100), season_id, "player_id\n100\n");

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_empty_roster_is_invalid_input() {
    let mut p: Persistence = store();
    let season_id: i64 = draft_season(&mut p);

    let result = import_roster(&mut p, &Caller::admin(), season_id, "player_id,display_name\n");

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_roster_into_unknown_season_is_not_found() {
    let mut p: Persistence = store();

    let result = import_roster(&mut p, &Caller::admin(), 999, "player_id\n100\n");

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
