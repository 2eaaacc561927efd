//! Test helpers shared across the propidl workspace.
//!
//! `config` runs configuration tests in an isolated working directory and
//! environment; `webidl` picks generated attribute declarations apart so
//! assertions can target a single spelling or alias list.

pub mod config;
pub mod webidl;
