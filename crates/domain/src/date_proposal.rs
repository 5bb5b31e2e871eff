// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The state of a proposed match date.
///
/// Multiple proposals may exist per match. Accepting one dismisses every
/// other pending proposal for that match, so at most one proposal per match
/// is ever `Accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProposalStatus {
    /// Awaiting a response from the other participant.
    #[default]
    Pending,
    /// Accepted; the match date is set from this proposal.
    Accepted,
    /// Explicitly declined by the other participant.
    Declined,
    /// Superseded because a different proposal was accepted.
    Dismissed,
}

impl ProposalStatus {
    /// Converts this status to its storage string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Dismissed => "dismissed",
        }
    }
}

impl FromStr for ProposalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(DomainError::InvalidProposalStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
