//! Role and purchase guard helpers shared by every concrete minter.
//!
//! Minters never hold their own admin list: admin checks are delegated to
//! the MinterFilter's `admin_acl_allowed`, and artist checks to the core
//! contract's `project_artist`. The guards return
//! [`Error::NotAuthorized`] rather than panicking so entry points stay
//! `Result`-shaped end to end.

use soroban_sdk::{Address, Env, Symbol};

use crate::errors::Error;
use crate::interfaces::{CoreClient, FilterClient};
use crate::types::ProjectKey;

/// Require the configured AdminACL to allow `caller` to invoke `selector`
/// on the current contract.
pub fn require_acl(
    env: &Env,
    minter_filter: &Address,
    caller: &Address,
    selector: Symbol,
) -> Result<(), Error> {
    let filter = FilterClient::new(env, minter_filter);
    if filter.admin_acl_allowed(caller, &env.current_contract_address(), &selector) {
        Ok(())
    } else {
        Err(Error::NotAuthorized)
    }
}

/// Require `caller` to be the project's artist on the core contract.
pub fn require_artist(env: &Env, key: &ProjectKey, caller: &Address) -> Result<(), Error> {
    let core = CoreClient::new(env, &key.core);
    if core.project_artist(&key.project_id) == *caller {
        Ok(())
    } else {
        Err(Error::NotAuthorized)
    }
}

/// Require either an ACL pass or project artistship.
pub fn require_acl_or_artist(
    env: &Env,
    minter_filter: &Address,
    key: &ProjectKey,
    caller: &Address,
    selector: Symbol,
) -> Result<(), Error> {
    if require_acl(env, minter_filter, caller, selector).is_ok() {
        return Ok(());
    }
    require_artist(env, key, caller)
}

/// Purchase-path guard: the project must be active and unpaused on its core
/// contract before a mint may be attempted.
pub fn require_project_mintable(env: &Env, key: &ProjectKey) -> Result<(), Error> {
    let core = CoreClient::new(env, &key.core);
    if !core.project_active(&key.project_id) {
        return Err(Error::ProjectNotActive);
    }
    if core.project_paused(&key.project_id) {
        return Err(Error::ProjectPaused);
    }
    Ok(())
}
