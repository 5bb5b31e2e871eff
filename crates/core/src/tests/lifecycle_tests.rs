// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the transition table and the affected-rows guard.

use crate::{CoreError, LifecycleAction, Side, TransitionOutcome, side_of_player};
use club_ladder_domain::MatchStatus;

#[test]
fn test_open_state_actions_allow_challenged_and_date_set() {
    for action in [
        LifecycleAction::ProposeDate,
        LifecycleAction::AcceptDateProposal,
        LifecycleAction::EnterResult,
        LifecycleAction::Withdraw,
        LifecycleAction::Forfeit,
    ] {
        assert_eq!(
            action.allowed_sources(),
            &[MatchStatus::Challenged, MatchStatus::DateSet],
            "action {} should apply from the open states",
            action.as_str()
        );
    }
}

#[test]
fn test_confirmation_phase_actions_require_pending_confirmation() {
    for action in [LifecycleAction::ConfirmResult, LifecycleAction::DisputeResult] {
        assert_eq!(
            action.allowed_sources(),
            &[MatchStatus::PendingConfirmation],
            "action {} should require pending_confirmation",
            action.as_str()
        );
    }
}

#[test]
fn test_transition_targets() {
    assert_eq!(LifecycleAction::ProposeDate.target(), None);
    assert_eq!(
        LifecycleAction::AcceptDateProposal.target(),
        Some(MatchStatus::DateSet)
    );
    assert_eq!(
        LifecycleAction::EnterResult.target(),
        Some(MatchStatus::PendingConfirmation)
    );
    assert_eq!(
        LifecycleAction::ConfirmResult.target(),
        Some(MatchStatus::Completed)
    );
    assert_eq!(
        LifecycleAction::DisputeResult.target(),
        Some(MatchStatus::Disputed)
    );
    assert_eq!(
        LifecycleAction::Withdraw.target(),
        Some(MatchStatus::Withdrawn)
    );
    assert_eq!(
        LifecycleAction::Forfeit.target(),
        Some(MatchStatus::Forfeited)
    );
}

#[test]
fn test_every_target_is_reachable_only_from_allowed_sources() {
    // The transition table must never list a terminal status as a source.
    for action in [
        LifecycleAction::ProposeDate,
        LifecycleAction::AcceptDateProposal,
        LifecycleAction::EnterResult,
        LifecycleAction::ConfirmResult,
        LifecycleAction::DisputeResult,
        LifecycleAction::Withdraw,
        LifecycleAction::Forfeit,
    ] {
        for source in action.allowed_sources() {
            assert!(
                !source.is_terminal(),
                "action {} lists terminal source {source}",
                action.as_str()
            );
        }
    }
}

#[test]
fn test_zero_affected_rows_is_a_conflict() {
    assert_eq!(
        TransitionOutcome::from_affected_rows(0),
        TransitionOutcome::Conflict
    );
    assert_eq!(
        TransitionOutcome::from_affected_rows(1),
        TransitionOutcome::Applied
    );
}

#[test]
fn test_conflict_converts_to_status_conflict_error() {
    assert_eq!(
        TransitionOutcome::Conflict.ok_or_conflict(5),
        Err(CoreError::StatusConflict { match_id: 5 })
    );
    assert_eq!(TransitionOutcome::Applied.ok_or_conflict(5), Ok(()));
}

#[test]
fn test_side_of_player_distinguishes_teams() {
    let team1 = [100_i64, 101];
    let team2 = [200_i64];

    assert_eq!(side_of_player(&team1, &team2, 100), Some(Side::Team1));
    assert_eq!(side_of_player(&team1, &team2, 200), Some(Side::Team2));
    assert_eq!(side_of_player(&team1, &team2, 999), None);
}

#[test]
fn test_side_other_flips() {
    assert_eq!(Side::Team1.other(), Side::Team2);
    assert_eq!(Side::Team2.other(), Side::Team1);
}
