// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The match lifecycle transition table.
//!
//! Every mutating transition is executed as a single guarded update:
//! `UPDATE matches SET status = target WHERE match_id = ? AND status IN
//! (allowed sources)`. The affected-row count is the race detector: zero
//! rows means a concurrent actor moved the match first, surfaced as
//! `TransitionOutcome::Conflict` and never retried internally.

use crate::error::CoreError;
use club_ladder_domain::MatchStatus;

/// The lifecycle actions a participant can request on an existing match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Propose a date. Leaves the status unchanged.
    ProposeDate,
    /// Accept a pending date proposal; the match becomes scheduled.
    AcceptDateProposal,
    /// Enter a result; the match awaits confirmation.
    EnterResult,
    /// Confirm the entered result; the match completes and standings swap.
    ConfirmResult,
    /// Dispute the entered result.
    DisputeResult,
    /// Withdraw the challenge (challenger only).
    Withdraw,
    /// Forfeit the match; the non-forfeiting team wins.
    Forfeit,
}

impl LifecycleAction {
    /// The statuses a match may be in for this action to apply.
    #[must_use]
    pub const fn allowed_sources(self) -> &'static [MatchStatus] {
        match self {
            Self::ProposeDate
            | Self::AcceptDateProposal
            | Self::EnterResult
            | Self::Withdraw
            | Self::Forfeit => MatchStatus::OPEN,
            Self::ConfirmResult | Self::DisputeResult => &[MatchStatus::PendingConfirmation],
        }
    }

    /// The status this action moves the match into.
    ///
    /// `ProposeDate` records a proposal without changing the match status,
    /// so it has no target.
    #[must_use]
    pub const fn target(self) -> Option<MatchStatus> {
        match self {
            Self::ProposeDate => None,
            Self::AcceptDateProposal => Some(MatchStatus::DateSet),
            Self::EnterResult => Some(MatchStatus::PendingConfirmation),
            Self::ConfirmResult => Some(MatchStatus::Completed),
            Self::DisputeResult => Some(MatchStatus::Disputed),
            Self::Withdraw => Some(MatchStatus::Withdrawn),
            Self::Forfeit => Some(MatchStatus::Forfeited),
        }
    }

    /// A short name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProposeDate => "propose_date",
            Self::AcceptDateProposal => "accept_date_proposal",
            Self::EnterResult => "enter_result",
            Self::ConfirmResult => "confirm_result",
            Self::DisputeResult => "dispute_result",
            Self::Withdraw => "withdraw",
            Self::Forfeit => "forfeit",
        }
    }
}

/// The outcome of a status-guarded single-row update.
///
/// `Conflict` is not an infrastructure failure: it is the expected signal
/// that a concurrent actor won the race. Callers surface it; they do not
/// retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum TransitionOutcome {
    /// Exactly one row matched and was updated.
    Applied,
    /// Zero rows matched: the precondition no longer held.
    Conflict,
}

impl TransitionOutcome {
    /// Interprets an affected-row count from a guarded update.
    #[must_use]
    pub const fn from_affected_rows(rows: usize) -> Self {
        if rows == 0 { Self::Conflict } else { Self::Applied }
    }

    /// Returns whether the transition was applied.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Converts a conflict into a `CoreError::StatusConflict`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::StatusConflict` when the outcome is `Conflict`.
    pub const fn ok_or_conflict(self, match_id: i64) -> Result<(), CoreError> {
        match self {
            Self::Applied => Ok(()),
            Self::Conflict => Err(CoreError::StatusConflict { match_id }),
        }
    }
}
