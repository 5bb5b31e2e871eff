// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for challenge creation, the reach rule, and the open-challenge
//! invariant under simulated races.

use club_ladder::CoreError;
use club_ladder_domain::MatchStatus;
use club_ladder_events::EventKind;

use crate::tests::helpers::{active_season_with_players, challenge_spec, season_spec, store, CLUB};
use crate::Persistence;

#[test]
fn test_create_challenge_yields_challenged_match() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    let record = p.get_match(match_id).expect("match exists");
    assert_eq!(record.status, MatchStatus::Challenged);
    assert_eq!(record.team1_id, teams[1]);
    assert_eq!(record.team2_id, teams[0]);
    assert_eq!(record.winner_team_id, None);
}

#[test]
fn test_create_challenge_emits_public_and_personal_events() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    p.create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    let feed = p.club_feed(CLUB, 10).expect("feed");
    assert!(feed
        .iter()
        .any(|stored| stored.event.kind == EventKind::Challenge));

    let inbox = p.notifications(100, 10).expect("notifications");
    assert!(inbox
        .iter()
        .any(|stored| stored.event.kind == EventKind::Challenged));
    // The challenger gets no notification for their own challenge.
    let own_inbox = p.notifications(101, 10).expect("notifications");
    assert!(!own_inbox
        .iter()
        .any(|stored| stored.event.kind == EventKind::Challenged));
}

#[test]
fn test_at_most_one_open_challenge_per_team() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102]);

    // Both challengers read "team 0 is challengeable" before either writes:
    // the classic check-then-act race, decided by the in-lock re-check.
    let open_before = p.teams_with_open_challenge(season_id).expect("open set");
    assert!(open_before.is_empty());

    let first = p.create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100));
    let second = p.create_challenge(&challenge_spec(season_id, teams[2], teams[0], 102, 100));

    assert!(first.is_ok());
    assert_eq!(
        second,
        Err(CoreError::ChallengeConflict { team_id: teams[0] })
    );

    let open = p.teams_with_open_challenge(season_id).expect("open set");
    assert_eq!(open.len(), 2);
    assert!(open.contains(&teams[0]) && open.contains(&teams[1]));
}

#[test]
fn test_open_challenge_recheck_holds_across_handles() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102]);

    // A second handle onto the same database, as a concurrent request
    // handler would hold.
    let mut q: Persistence = p.reopen().expect("second handle");

    let first = p.create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100));
    let second = q.create_challenge(&challenge_spec(season_id, teams[2], teams[0], 102, 100));

    assert!(first.is_ok());
    assert_eq!(
        second,
        Err(CoreError::ChallengeConflict { team_id: teams[0] })
    );
}

#[test]
fn test_challenger_with_open_challenge_cannot_issue_another() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102]);

    p.create_challenge(&challenge_spec(season_id, teams[2], teams[1], 102, 101))
        .expect("challenge");

    let result = p.create_challenge(&challenge_spec(season_id, teams[2], teams[0], 102, 100));
    assert_eq!(
        result,
        Err(CoreError::ChallengeConflict { team_id: teams[2] })
    );
}

#[test]
fn test_reach_rule_is_enforced_at_creation() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102, 103]);

    // Rank 4 may challenge rank 2 (gap 2 = reach) but not rank 1 (gap 3).
    let too_far = p.create_challenge(&challenge_spec(season_id, teams[3], teams[0], 103, 100));
    assert_eq!(
        too_far,
        Err(CoreError::ChallengeOutOfReach {
            challenger_rank: 4,
            target_rank: 1,
            reach: 2,
        })
    );

    let in_reach = p.create_challenge(&challenge_spec(season_id, teams[3], teams[1], 103, 101));
    assert!(in_reach.is_ok());
}

#[test]
fn test_downward_challenge_is_rejected() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    let result = p.create_challenge(&challenge_spec(season_id, teams[0], teams[1], 100, 101));

    assert_eq!(
        result,
        Err(CoreError::ChallengeOutOfReach {
            challenger_rank: 1,
            target_rank: 2,
            reach: 2,
        })
    );
}

#[test]
fn test_challenge_requires_active_season() {
    let mut p: Persistence = store();
    let season_id: i64 = p.create_season(&season_spec("Draft")).expect("create");
    let t1 = p.enroll_team(season_id, &[100]).expect("enroll").team_id;
    let t2 = p.enroll_team(season_id, &[101]).expect("enroll").team_id;

    let result = p.create_challenge(&challenge_spec(season_id, t2, t1, 101, 100));

    assert!(matches!(
        result,
        Err(CoreError::SeasonNotActive { .. })
    ));
}

#[test]
fn test_challenge_rejects_same_team_on_both_sides() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    let result = p.create_challenge(&challenge_spec(season_id, teams[1], teams[1], 101, 101));

    assert_eq!(
        result,
        Err(CoreError::TeamsNotDistinct { team_id: teams[1] })
    );
}

#[test]
fn test_challenge_rejects_unknown_team() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    let result = p.create_challenge(&challenge_spec(season_id, 9999, teams[0], 101, 100));

    assert_eq!(result, Err(CoreError::TeamNotFound { team_id: 9999 }));
}

#[test]
fn test_terminal_matches_do_not_block_new_challenges() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.withdraw(match_id, 101).expect("withdraw");

    // The withdrawn match is terminal history; a fresh challenge works.
    let again = p.create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100));
    assert!(again.is_ok());
}
