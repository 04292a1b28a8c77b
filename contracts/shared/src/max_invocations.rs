//! Minter-local invocation-limit tracking.
//!
//! Every concrete minter caches a per-project invocation ceiling so a
//! purchase can fail fast without a cross-contract read. The cache must never
//! exceed the core contract's authoritative limit, and it must be
//! resynchronizable whenever the authoritative value changes
//! ([`sync_to_core`]).
//!
//! Token numbering matches the core contract: token id =
//! `project_id * ONE_MILLION + invocation_index`, so the invocation count
//! after a mint is derivable from the returned token id alone — no second
//! cross-contract read inside a purchase.

use soroban_sdk::{contracttype, Env};

use crate::errors::Error;
use crate::interfaces::CoreClient;
use crate::ttl::bump_persistent;
use crate::types::ProjectKey;

/// Tokens per project in the core contract's id space.
pub const ONE_MILLION: u64 = 1_000_000;

/// Cached invocation-limit state for one project on one minter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxInvocationsProjectConfig {
    pub max_invocations: u32,
    pub has_max_been_invoked: bool,
    /// False until the minter first syncs or manually limits; a purchase
    /// with an unset cache syncs lazily from the core.
    pub max_invocations_set: bool,
}

impl MaxInvocationsProjectConfig {
    fn unset() -> Self {
        MaxInvocationsProjectConfig {
            max_invocations: 0,
            has_max_been_invoked: false,
            max_invocations_set: false,
        }
    }
}

/// Storage key for the cache, in the host minter's own storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MaxInvocationsKey {
    MaxInvocations(ProjectKey),
}

pub fn load(env: &Env, key: &ProjectKey) -> MaxInvocationsProjectConfig {
    let skey = MaxInvocationsKey::MaxInvocations(key.clone());
    match env.storage().persistent().get(&skey) {
        Some(cfg) => {
            bump_persistent(env, &skey);
            cfg
        }
        None => MaxInvocationsProjectConfig::unset(),
    }
}

pub fn save(env: &Env, key: &ProjectKey, cfg: &MaxInvocationsProjectConfig) {
    let skey = MaxInvocationsKey::MaxInvocations(key.clone());
    env.storage().persistent().set(&skey, cfg);
    bump_persistent(env, &skey);
}

/// Pure recomputation of the invoked flag from a limit and a count.
pub fn recompute(max_invocations: u32, invocations: u32) -> MaxInvocationsProjectConfig {
    MaxInvocationsProjectConfig {
        max_invocations,
        has_max_been_invoked: invocations >= max_invocations,
        max_invocations_set: true,
    }
}

/// Invocation count implied by a freshly minted token id.
pub fn invocations_after_mint(token_id: u64) -> u32 {
    (token_id % ONE_MILLION) as u32 + 1
}

/// Manually lower (or re-raise, up to the core's limit) a project's
/// minter-local invocation ceiling.
///
/// Rejects limits above the core's authoritative maximum and limits below
/// the count already minted.
pub fn manually_limit(
    env: &Env,
    key: &ProjectKey,
    new_limit: u32,
) -> Result<MaxInvocationsProjectConfig, Error> {
    let core = CoreClient::new(env, &key.core);
    let core_max = core.project_max_invocations(&key.project_id);
    let invocations = core.project_invocations(&key.project_id);
    if new_limit > core_max || new_limit < invocations {
        return Err(Error::InvalidMaxInvocations);
    }
    let cfg = recompute(new_limit, invocations);
    save(env, key, &cfg);
    Ok(cfg)
}

/// Pull the core's authoritative limit and recompute the invoked flag.
///
/// Clears a previously-true `has_max_been_invoked` when the core's limit has
/// been raised past the current invocation count.
pub fn sync_to_core(env: &Env, key: &ProjectKey) -> MaxInvocationsProjectConfig {
    let core = CoreClient::new(env, &key.core);
    let core_max = core.project_max_invocations(&key.project_id);
    let invocations = core.project_invocations(&key.project_id);
    let cfg = recompute(core_max, invocations);
    save(env, key, &cfg);
    cfg
}

/// Load the cache for a purchase, syncing lazily if never set.
pub fn load_for_purchase(env: &Env, key: &ProjectKey) -> MaxInvocationsProjectConfig {
    let cfg = load(env, key);
    if cfg.max_invocations_set {
        cfg
    } else {
        sync_to_core(env, key)
    }
}

/// Purchase-path guard: fail before any side effect once the limit is hit.
pub fn pre_mint_check(cfg: &MaxInvocationsProjectConfig) -> Result<(), Error> {
    if cfg.has_max_been_invoked {
        return Err(Error::MaxInvocationsReached);
    }
    Ok(())
}

/// After a successful mint, flip the invoked flag when the returned token id
/// shows the limit has been reached. Returns whether the project just sold
/// out on this minter.
pub fn post_mint_update(
    env: &Env,
    key: &ProjectKey,
    cfg: &mut MaxInvocationsProjectConfig,
    token_id: u64,
) -> bool {
    let invocations = invocations_after_mint(token_id);
    if invocations >= cfg.max_invocations {
        cfg.has_max_been_invoked = true;
        save(env, key, cfg);
        return true;
    }
    false
}
