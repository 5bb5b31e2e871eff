// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for match and proposal status parsing and classification.

use crate::{DomainError, MatchStatus, ProposalStatus};

#[test]
fn test_match_status_round_trips_through_strings() {
    for status in [
        MatchStatus::Challenged,
        MatchStatus::DateSet,
        MatchStatus::PendingConfirmation,
        MatchStatus::Completed,
        MatchStatus::Withdrawn,
        MatchStatus::Forfeited,
        MatchStatus::Disputed,
    ] {
        assert_eq!(status.as_str().parse::<MatchStatus>(), Ok(status));
    }
}

#[test]
fn test_match_status_rejects_unknown_string() {
    assert_eq!(
        "cancelled".parse::<MatchStatus>(),
        Err(DomainError::InvalidMatchStatus(String::from("cancelled")))
    );
}

#[test]
fn test_open_statuses_are_exactly_challenged_and_date_set() {
    assert!(MatchStatus::Challenged.is_open());
    assert!(MatchStatus::DateSet.is_open());
    assert!(!MatchStatus::PendingConfirmation.is_open());
    assert!(!MatchStatus::Completed.is_open());
    assert!(!MatchStatus::Withdrawn.is_open());
    assert!(!MatchStatus::Forfeited.is_open());
    assert!(!MatchStatus::Disputed.is_open());
}

#[test]
fn test_terminal_statuses() {
    assert!(MatchStatus::Completed.is_terminal());
    assert!(MatchStatus::Withdrawn.is_terminal());
    assert!(MatchStatus::Forfeited.is_terminal());
    assert!(MatchStatus::Disputed.is_terminal());
    assert!(!MatchStatus::Challenged.is_terminal());
    assert!(!MatchStatus::DateSet.is_terminal());
    assert!(!MatchStatus::PendingConfirmation.is_terminal());
}

#[test]
fn test_proposal_status_round_trips_through_strings() {
    for status in [
        ProposalStatus::Pending,
        ProposalStatus::Accepted,
        ProposalStatus::Declined,
        ProposalStatus::Dismissed,
    ] {
        assert_eq!(status.as_str().parse::<ProposalStatus>(), Ok(status));
    }
}

#[test]
fn test_proposal_status_rejects_unknown_string() {
    assert_eq!(
        "expired".parse::<ProposalStatus>(),
        Err(DomainError::InvalidProposalStatus(String::from("expired")))
    );
}
