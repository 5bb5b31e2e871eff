// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;
mod roster;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error};
pub use handlers::{
    accept_date_proposal, activate_season, add_team_to_standings, club_feed,
    clear_unavailability, confirm_result, create_challenge, create_season,
    decline_date_proposal, dispute_result, end_season,
    enroll_team, enter_result, forfeit, get_match, head_to_head, latest_standings, notifications,
    propose_date, rank_history, set_unavailability, standings, teams_with_open_challenge,
    unavailable_teams, withdraw,
};
pub use request_response::{
    AcceptDateProposalRequest, ChallengeResponse, ClearUnavailabilityRequest,
    ConfirmResultRequest, ConfirmResultResponse, CreateChallengeRequest, CreateSeasonRequest,
    CreateSeasonResponse, DeclineDateProposalRequest, DisputeResultRequest, EnrollTeamRequest,
    EnrollTeamResponse, EnterResultRequest, EventInfo, FeedResponse, ForfeitRequest,
    HeadToHeadResponse, MatchInfo, ProposeDateRequest, ProposeDateResponse, RankHistoryResponse,
    RankPointInfo, SeasonStatusResponse, SetScoreInfo, SetUnavailabilityRequest,
    SetUnavailabilityResponse, StandingInfo, StandingsResponse, WithdrawRequest,
};
pub use roster::{RosterImportResponse, RosterRowResult, RosterRowStatus, import_roster};

/// Roles the surrounding layer may assign to a caller.
///
/// Identity and authentication live outside this core; a `Caller` is the
/// already-authorized result handed in by that layer. The core still
/// double-checks participation on every mutating match operation as
/// defense in depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Club administrators: season creation and lifecycle transitions.
    Admin,
    /// A ladder player acting for themselves.
    Player,
}

/// An authorized caller, as established by the surrounding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// The acting player, when the caller is a player.
    pub player_id: Option<i64>,
    /// The caller's role.
    pub role: Role,
}

impl Caller {
    /// Creates an admin caller.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            player_id: None,
            role: Role::Admin,
        }
    }

    /// Creates a player caller.
    #[must_use]
    pub const fn player(player_id: i64) -> Self {
        Self {
            player_id: Some(player_id),
            role: Role::Player,
        }
    }

    /// Returns whether the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
