//! # Shared minter-suite library
//!
//! Common substrate for every contract in the minter suite:
//!
//! | Module              | Contents                                              |
//! |---------------------|-------------------------------------------------------|
//! | [`errors`]          | The platform-wide `#[contracterror]` enum             |
//! | [`base`]            | Minter construction + shared invocation-limit ops     |
//! | [`types`]           | [`types::ProjectKey`] and other cross-contract types  |
//! | [`interfaces`]      | `#[contractclient]` traits for the external contracts |
//! | [`config`]          | Typed per-project key/value configuration store       |
//! | [`max_invocations`] | Minter-local invocation-limit tracking                |
//! | [`pricing`]         | Pure Dutch-auction price curves                       |
//! | [`guards`]          | Role and purchase guard helpers                       |
//! | [`reentrancy`]      | Storage-flag reentrancy lock                          |
//! | [`ttl`]             | Storage TTL bump helpers                              |
//!
//! Every concrete minter links this crate; the external contracts (core NFT
//! contract, AdminACL, CoreRegistry, dependency registry) are reached only
//! through the clients generated in [`interfaces`], never by compile-time
//! dependency, so minters and the MinterFilter stay independently deployable.

#![no_std]

pub mod base;
pub mod config;
pub mod errors;
pub mod guards;
pub mod interfaces;
pub mod max_invocations;
pub mod pricing;
pub mod reentrancy;
pub mod ttl;
pub mod types;

pub use errors::Error;
pub use types::ProjectKey;

#[cfg(test)]
mod test_config;
