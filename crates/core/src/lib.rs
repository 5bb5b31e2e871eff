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

mod error;
mod lifecycle;
mod participants;
mod standings;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use lifecycle::{LifecycleAction, TransitionOutcome};
pub use participants::{Side, side_of_player};
pub use standings::{append_team, ensure_permutation, rank_of, swap_for_result};
