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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod date_proposal;
mod eligibility;
mod error;
mod match_status;
mod scores;
mod season;
mod team;

#[cfg(test)]
mod tests;

pub use date_proposal::ProposalStatus;
pub use eligibility::{DEFAULT_CHALLENGE_REACH, Movement, can_challenge, compute_movement};
pub use error::DomainError;
pub use match_status::MatchStatus;
pub use scores::{MatchWinner, SetScore, validate_scores};
pub use season::{Season, SeasonConfig, SeasonStatus};
pub use team::Team;
