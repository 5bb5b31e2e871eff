// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle state of a match.
///
/// The happy path is `Challenged → DateSet → PendingConfirmation →
/// Completed`, with side exits to `Withdrawn`, `Forfeited` and `Disputed`
/// from the open states. Matches are never deleted; terminal states are
/// permanent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// A challenge was issued; no date agreed yet.
    Challenged,
    /// A date proposal was accepted; the match is scheduled.
    DateSet,
    /// A result was entered by one participant and awaits the other.
    PendingConfirmation,
    /// The result was confirmed. Terminal.
    Completed,
    /// The challenger withdrew the challenge. Terminal.
    Withdrawn,
    /// One participant forfeited. Terminal.
    Forfeited,
    /// The entered result was disputed. Terminal for standings; requires
    /// external admin resolution.
    Disputed,
}

impl MatchStatus {
    /// The statuses that count as an open challenge.
    ///
    /// A team with a match in one of these states may neither issue nor
    /// receive another challenge.
    pub const OPEN: &'static [Self] = &[Self::Challenged, Self::DateSet];

    /// Converts this status to its storage string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Challenged => "challenged",
            Self::DateSet => "date_set",
            Self::PendingConfirmation => "pending_confirmation",
            Self::Completed => "completed",
            Self::Withdrawn => "withdrawn",
            Self::Forfeited => "forfeited",
            Self::Disputed => "disputed",
        }
    }

    /// Returns whether this status counts as an open challenge.
    #[must_use]
    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }

    /// Returns whether no further transitions are possible from this status.
    ///
    /// `Disputed` is included: it awaits external admin adjudication, not a
    /// lifecycle transition.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Withdrawn | Self::Forfeited | Self::Disputed
        )
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "challenged" => Ok(Self::Challenged),
            "date_set" => Ok(Self::DateSet),
            "pending_confirmation" => Ok(Self::PendingConfirmation),
            "completed" => Ok(Self::Completed),
            "withdrawn" => Ok(Self::Withdrawn),
            "forfeited" => Ok(Self::Forfeited),
            "disputed" => Ok(Self::Disputed),
            _ => Err(DomainError::InvalidMatchStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
