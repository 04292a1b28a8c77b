//! Common plumbing embedded by every concrete minter.
//!
//! A minter is constructed against one MinterFilter and one currency token;
//! both are fixed at init. The invocation-limit entry points
//! (`manually_limit_max_invocations`,
//! `sync_max_invocations_to_core`) have identical semantics on every
//! minter, so their bodies live here and the minters expose thin wrappers.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::Error;
use crate::guards;
use crate::max_invocations::{self, MaxInvocationsProjectConfig};
use crate::ttl::bump_instance;
use crate::types::ProjectKey;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BaseKey {
    /// MinterFilter this minter serves (Instance).
    MinterFilter,
    /// Currency token purchases are paid in (Instance).
    Currency,
}

pub fn init(env: &Env, minter_filter: &Address, currency: &Address) -> Result<(), Error> {
    if env.storage().instance().has(&BaseKey::MinterFilter) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage()
        .instance()
        .set(&BaseKey::MinterFilter, minter_filter);
    env.storage().instance().set(&BaseKey::Currency, currency);
    bump_instance(env);
    Ok(())
}

pub fn minter_filter(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&BaseKey::MinterFilter)
        .ok_or(Error::NotInitialized)
}

pub fn currency(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&BaseKey::Currency)
        .ok_or(Error::NotInitialized)
}

/// ACL-or-artist gated manual limit, shared by all minters.
pub fn manually_limit_max_invocations(
    env: &Env,
    caller: &Address,
    key: &ProjectKey,
    new_limit: u32,
) -> Result<(), Error> {
    caller.require_auth();
    let filter = minter_filter(env)?;
    guards::require_acl_or_artist(
        env,
        &filter,
        key,
        caller,
        Symbol::new(env, "manually_limit_max_invocations"),
    )?;
    let cfg = max_invocations::manually_limit(env, key, new_limit)?;
    publish_limit_event(env, symbol_short!("inv_limit"), key, &cfg);
    Ok(())
}

/// ACL-or-artist gated resync against the core's authoritative limit.
pub fn sync_max_invocations_to_core(
    env: &Env,
    caller: &Address,
    key: &ProjectKey,
) -> Result<(), Error> {
    caller.require_auth();
    let filter = minter_filter(env)?;
    guards::require_acl_or_artist(
        env,
        &filter,
        key,
        caller,
        Symbol::new(env, "sync_max_invocations_to_core"),
    )?;
    let cfg = max_invocations::sync_to_core(env, key);
    publish_limit_event(env, symbol_short!("inv_sync"), key, &cfg);
    Ok(())
}

fn publish_limit_event(env: &Env, topic: Symbol, key: &ProjectKey, cfg: &MaxInvocationsProjectConfig) {
    env.events().publish(
        (topic, key.core.clone(), key.project_id),
        cfg.clone(),
    );
}
