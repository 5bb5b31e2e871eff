// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the result protocol, guarded transitions, and the swaps they
//! trigger.

use club_ladder::CoreError;
use club_ladder_domain::{DomainError, MatchStatus, SetScore};
use club_ladder_events::EventKind;

use crate::tests::helpers::{active_season_with_players, challenge_spec, store, CLUB};
use crate::{NewSeasonSpec, Persistence};

/// Straight-sets win for team one under best-of-three.
fn winning_sets() -> Vec<SetScore> {
    vec![SetScore::new(6, 3), SetScore::new(6, 4)]
}

/// Straight-sets win for team two under best-of-three.
fn losing_sets() -> Vec<SetScore> {
    vec![SetScore::new(3, 6), SetScore::new(4, 6)]
}

#[test]
fn test_enter_result_moves_match_to_pending_confirmation() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    p.enter_result(match_id, 101, &winning_sets()).expect("enter");

    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::PendingConfirmation);
    assert_eq!(record.winner_team_id, Some(teams[1]));
    assert_eq!(record.result_entered_by, Some(101));

    // The other participant is notified; the enterer is not.
    let inbox = p.notifications(100, 10).expect("notifications");
    assert!(inbox
        .iter()
        .any(|stored| stored.event.kind == EventKind::ResultEntered));
}

#[test]
fn test_invalid_scores_leave_match_untouched() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    let result = p.enter_result(match_id, 101, &[SetScore::new(6, 6)]);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::TiedSet {
            set_index: 0
        }))
    );
    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::Challenged);
    assert_eq!(record.sets, None);
    // No notification was written either: the transaction aborted whole.
    assert!(p.notifications(100, 10).expect("notifications").iter().all(
        |stored| stored.event.kind != EventKind::ResultEntered
    ));
}

#[test]
fn test_enterer_cannot_confirm_own_result() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &winning_sets()).expect("enter");

    let result = p.confirm_result(match_id, 101);

    assert_eq!(result, Err(CoreError::CannotConfirmOwnResult { match_id }));
}

#[test]
fn test_challenger_win_swaps_standings() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102, 103]);
    // [A, B, C, D]: C challenges B and wins.
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[2], teams[1], 102, 101))
        .expect("challenge");
    p.enter_result(match_id, 102, &winning_sets()).expect("enter");

    let completion = p.confirm_result(match_id, 101).expect("confirm");

    assert_eq!(completion.winner_team_id, teams[2]);
    let snapshot = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    assert_eq!(
        snapshot.results,
        vec![teams[0], teams[2], teams[1], teams[3]]
    );
    assert_eq!(snapshot.match_id, Some(match_id));

    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::Completed);
    assert_eq!(record.confirmed_by, Some(101));
}

#[test]
fn test_defender_win_appends_unchanged_snapshot() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102, 103]);
    let before = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");

    // C challenges B; B (the defender) wins.
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[2], teams[1], 102, 101))
        .expect("challenge");
    p.enter_result(match_id, 102, &losing_sets()).expect("enter");
    let completion = p.confirm_result(match_id, 101).expect("confirm");

    assert_eq!(completion.winner_team_id, teams[1]);
    let after = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    // Same order, brand-new row: the snapshot is the audit trail of every
    // completed match, not only rank-changing ones.
    assert_eq!(after.results, before.results);
    assert_ne!(after.snapshot_id, before.snapshot_id);
    assert_eq!(after.match_id, Some(match_id));
}

#[test]
fn test_confirming_twice_is_a_status_conflict() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &winning_sets()).expect("enter");

    // Two handles race to confirm; exactly one wins.
    let mut q: Persistence = p.reopen().expect("second handle");
    let first = p.confirm_result(match_id, 100);
    let second = q.confirm_result(match_id, 100);

    assert!(first.is_ok());
    assert_eq!(second, Err(CoreError::StatusConflict { match_id }));
}

#[test]
fn test_entering_result_on_completed_match_conflicts() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &winning_sets()).expect("enter");
    p.confirm_result(match_id, 100).expect("confirm");

    let result = p.enter_result(match_id, 100, &winning_sets());

    assert_eq!(result, Err(CoreError::StatusConflict { match_id }));
}

#[test]
fn test_dispute_by_enterer_is_rejected() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &winning_sets()).expect("enter");

    let result = p.dispute_result(match_id, 101, "wrong score");

    assert_eq!(result, Err(CoreError::CannotDisputeOwnResult { match_id }));
}

#[test]
fn test_dispute_freezes_match_without_standings_change() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let before = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &winning_sets()).expect("enter");

    p.dispute_result(match_id, 100, "that second set was 6-5")
        .expect("dispute");

    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::Disputed);
    let after = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    assert_eq!(after.snapshot_id, before.snapshot_id);

    // The enterer is notified of the dispute.
    let inbox = p.notifications(101, 10).expect("notifications");
    assert!(inbox
        .iter()
        .any(|stored| stored.event.kind == EventKind::ResultDisputed));
}

#[test]
fn test_withdraw_requires_the_original_challenger() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    // The challengee may not withdraw, even though the match is open.
    assert_eq!(
        p.withdraw(match_id, 100),
        Err(CoreError::OnlyChallengerMayWithdraw { match_id })
    );
    // An outsider is not a participant at all.
    assert_eq!(
        p.withdraw(match_id, 102),
        Err(CoreError::NotAParticipant {
            match_id,
            player_id: 102,
        })
    );

    p.withdraw(match_id, 101).expect("challenger withdraws");
    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::Withdrawn);
}

#[test]
fn test_forfeit_by_challenger_favors_defender_without_swap() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let before = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    let completion = p.forfeit(match_id, 101).expect("forfeit");

    assert_eq!(completion.winner_team_id, teams[0]);
    let after = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    assert_eq!(after.results, before.results);
    assert_ne!(after.snapshot_id, before.snapshot_id);
}

#[test]
fn test_forfeit_by_defender_swaps_in_favor_of_challenger() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[2], teams[1], 102, 101))
        .expect("challenge");

    let completion = p.forfeit(match_id, 101).expect("forfeit");

    assert_eq!(completion.winner_team_id, teams[2]);
    let snapshot = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    assert_eq!(snapshot.results, vec![teams[0], teams[2], teams[1]]);

    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::Forfeited);
}

#[test]
fn test_season_without_confirmation_completes_on_entry() {
    let mut p: Persistence = store();
    let spec: NewSeasonSpec = NewSeasonSpec {
        requires_confirmation: false,
        ..crate::tests::helpers::season_spec("Casual")
    };
    let season_id: i64 = p.create_season(&spec).expect("create");
    let t1 = p.enroll_team(season_id, &[100]).expect("enroll").team_id;
    let t2 = p.enroll_team(season_id, &[101]).expect("enroll").team_id;
    p.activate_season(season_id).expect("activate");

    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, t2, t1, 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &winning_sets()).expect("enter");

    let record = p.get_match(match_id).expect("match");
    assert_eq!(record.status, MatchStatus::Completed);
    let snapshot = p
        .latest_standings(season_id)
        .expect("query")
        .expect("snapshot");
    assert_eq!(snapshot.results, vec![t2, t1]);

    let feed = p.club_feed(CLUB, 10).expect("feed");
    assert!(feed
        .iter()
        .any(|stored| stored.event.kind == EventKind::Result));
}

#[test]
fn test_non_participant_cannot_enter_result() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101, 102]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    let result = p.enter_result(match_id, 102, &winning_sets());

    assert_eq!(
        result,
        Err(CoreError::NotAParticipant {
            match_id,
            player_id: 102,
        })
    );
}

#[test]
fn test_season_transitions_are_guarded() {
    let mut p: Persistence = store();
    let season_id: i64 = p
        .create_season(&crate::tests::helpers::season_spec("Guarded"))
        .expect("create");

    // Ending a draft season skips a state and conflicts.
    assert_eq!(
        p.end_season(season_id),
        Err(CoreError::SeasonStatusConflict { season_id })
    );

    p.activate_season(season_id).expect("activate");
    // Activating twice conflicts the same way a match double-confirm does.
    assert_eq!(
        p.activate_season(season_id),
        Err(CoreError::SeasonStatusConflict { season_id })
    );

    p.end_season(season_id).expect("end");
    assert_eq!(
        p.activate_season(season_id),
        Err(CoreError::SeasonStatusConflict { season_id })
    );
}
