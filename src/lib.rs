//! Nash equilibria of two-player games through the Lemke-Howson algorithm.
//!
//! The [`lemke_howson`] entry point follows a single complementary pivoting path from a chosen
//! label, while [`all_lemke`] explores every equilibrium reachable from the artificial one.
mod game;
pub use game::*;

pub mod nfg;
pub mod report;
