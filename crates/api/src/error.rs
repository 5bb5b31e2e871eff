// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use club_ladder::CoreError;
use club_ladder_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract: the server layer maps them onto HTTP status codes, and no
/// other layer renders user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller does not have permission for this action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the caller may not perform it.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule family that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation lost a race or hit a blocking state; retry with fresh
    /// state.
    Conflict {
        /// The contended resource.
        resource: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { resource, message } => {
                write!(f, "Conflict on {resource}: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Classifies a domain violation into a rule family for the API contract.
const fn rule_family(err: &DomainError) -> &'static str {
    match err {
        DomainError::TiedSet { .. }
        | DomainError::NoSets
        | DomainError::TooManySets { .. }
        | DomainError::SetsAfterDecision { .. }
        | DomainError::MatchNotDecided { .. } => "scores",
        DomainError::InvalidDateRange { .. } | DomainError::DateParseError { .. } => "dates",
        _ => "configuration",
    }
}

/// Translates a core error into the API error taxonomy.
///
/// Conflicts stay conflicts (the caller retries with fresh state),
/// validation failures surface verbatim, participant violations surface as
/// authorization failures, and consistency failures become opaque internal
/// errors; their detail belongs in the server log, not the response.
#[must_use]
pub fn translate_core_error(action: &str, err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => ApiError::DomainRuleViolation {
            rule: rule_family(&domain_err).to_string(),
            message: domain_err.to_string(),
        },
        CoreError::SeasonNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Season"),
            message: err.to_string(),
        },
        CoreError::TeamNotFound { .. } | CoreError::TeamNotInSeason { .. } => {
            ApiError::ResourceNotFound {
                resource_type: String::from("Team"),
                message: err.to_string(),
            }
        }
        CoreError::MatchNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Match"),
            message: err.to_string(),
        },
        CoreError::ProposalNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("DateProposal"),
            message: err.to_string(),
        },
        CoreError::NotEnrolled { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Team"),
            message: err.to_string(),
        },
        CoreError::ChallengeConflict { .. }
        | CoreError::HasOpenChallenge { .. }
        | CoreError::TeamUnavailable { .. }
        | CoreError::TeamOptedOut { .. }
        | CoreError::AlreadyEnrolled { .. }
        | CoreError::EnrollmentClosed { .. }
        | CoreError::SeasonNotActive { .. } => ApiError::Conflict {
            resource: String::from("challenge"),
            message: err.to_string(),
        },
        CoreError::StatusConflict { .. } | CoreError::SeasonStatusConflict { .. } => {
            ApiError::Conflict {
                resource: String::from("status"),
                message: err.to_string(),
            }
        }
        CoreError::ProposalNotPending { .. } => ApiError::Conflict {
            resource: String::from("proposal"),
            message: err.to_string(),
        },
        CoreError::ProposalMatchMismatch { .. } | CoreError::TeamsNotDistinct { .. } => {
            ApiError::InvalidInput {
                field: String::from("request"),
                message: err.to_string(),
            }
        }
        CoreError::ChallengeOutOfReach { .. } => ApiError::DomainRuleViolation {
            rule: String::from("reach"),
            message: err.to_string(),
        },
        CoreError::NotAParticipant { .. }
        | CoreError::CannotConfirmOwnResult { .. }
        | CoreError::CannotDisputeOwnResult { .. }
        | CoreError::OnlyChallengerMayWithdraw { .. } => ApiError::Unauthorized {
            action: action.to_string(),
            reason: err.to_string(),
        },
        CoreError::TeamMissingFromStandings { .. }
        | CoreError::DuplicateTeamInStandings { .. }
        | CoreError::MissingStandings { .. }
        | CoreError::Storage(_) => {
            tracing::error!(action, error = %err, "Operation failed");
            ApiError::Internal {
                message: format!("Operation '{action}' failed"),
            }
        }
    }
}
