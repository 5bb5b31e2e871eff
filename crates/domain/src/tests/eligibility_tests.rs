// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the reach rule and movement computation.

use crate::{Movement, can_challenge, compute_movement};

#[test]
fn test_can_challenge_within_reach() {
    assert!(can_challenge(3, 2, 2));
    assert!(can_challenge(3, 1, 2));
}

#[test]
fn test_can_challenge_rejects_gap_beyond_reach() {
    // Exactly reach is allowed, reach + 1 is not.
    assert!(can_challenge(4, 2, 2));
    assert!(!can_challenge(4, 1, 2));
}

#[test]
fn test_can_challenge_rejects_downward_challenge() {
    assert!(!can_challenge(2, 3, 2));
}

#[test]
fn test_can_challenge_rejects_self_rank() {
    assert!(!can_challenge(3, 3, 2));
}

#[test]
fn test_can_challenge_with_reach_one() {
    assert!(can_challenge(2, 1, 1));
    assert!(!can_challenge(3, 1, 1));
}

#[test]
fn test_movement_up_after_swap() {
    let previous = [10_i64, 11, 12, 13];
    let current = [10_i64, 12, 11, 13];

    assert_eq!(compute_movement(12, &current, Some(&previous)), Movement::Up);
    assert_eq!(
        compute_movement(11, &current, Some(&previous)),
        Movement::Down
    );
    assert_eq!(
        compute_movement(10, &current, Some(&previous)),
        Movement::None
    );
}

#[test]
fn test_movement_without_previous_snapshot() {
    let current = [10_i64, 11];
    assert_eq!(compute_movement(10, &current, None), Movement::None);
}

#[test]
fn test_movement_for_newly_enrolled_team() {
    let previous = [10_i64, 11];
    let current = [10_i64, 11, 12];
    assert_eq!(
        compute_movement(12, &current, Some(&previous)),
        Movement::None
    );
}

#[test]
fn test_movement_for_team_absent_from_current() {
    let previous = [10_i64, 11];
    let current = [10_i64];
    assert_eq!(
        compute_movement(11, &current, Some(&previous)),
        Movement::None
    );
}
