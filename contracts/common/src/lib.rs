//! Shared building blocks for the CoinRise contract suite.
//!
//! This crate provides:
//! - [`types::StakePosition`]: the stake snapshot every contract decodes.
//! - [`lock`]: the closed set of lock durations and their multipliers.
//! - [`interfaces`]: cross-contract capabilities (staking ledger, parameter store).
//! - [`access`]: owner and admin-set storage helpers.
//! - [`ttl`]: storage TTL bumping.
//! - `testutils`: ledger helpers for test suites (`testutils` feature).
//!
//! Contract-specific errors live in each contract. Code ranges are
//! `100+` vault, `200+` staking, `300+` rewards, `400+` governance.

#![no_std]

pub mod access;
pub mod interfaces;
pub mod lock;
pub mod ttl;
pub mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use types::*;
