//! Typed events for off-chain indexing of filter state.
//!
//! Topics carry the addresses an indexer filters on; data carries the full
//! payload as a decodable struct.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use shared::types::ProjectKey;

/// A minter was bound to a project (overwriting any prior binding).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectMinterRegistered {
    pub project_id: u32,
    pub core: Address,
    pub minter: Address,
}

/// A project's minter binding was cleared.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectMinterRemoved {
    pub project_id: u32,
    pub core: Address,
}

pub fn minter_registered(env: &Env, key: &ProjectKey, minter: &Address) {
    env.events().publish(
        (symbol_short!("mnt_set"), key.core.clone(), key.project_id),
        ProjectMinterRegistered {
            project_id: key.project_id,
            core: key.core.clone(),
            minter: minter.clone(),
        },
    );
}

pub fn minter_removed(env: &Env, key: &ProjectKey) {
    env.events().publish(
        (symbol_short!("mnt_rm"), key.core.clone(), key.project_id),
        ProjectMinterRemoved {
            project_id: key.project_id,
            core: key.core.clone(),
        },
    );
}

pub fn minter_approved_globally(env: &Env, minter: &Address) {
    env.events()
        .publish((symbol_short!("appr_g"),), minter.clone());
}

pub fn minter_revoked_globally(env: &Env, minter: &Address) {
    env.events()
        .publish((symbol_short!("rvk_g"),), minter.clone());
}

pub fn minter_approved_for_contract(env: &Env, core: &Address, minter: &Address) {
    env.events()
        .publish((symbol_short!("appr_c"), core.clone()), minter.clone());
}

pub fn minter_revoked_for_contract(env: &Env, core: &Address, minter: &Address) {
    env.events()
        .publish((symbol_short!("rvk_c"), core.clone()), minter.clone());
}

pub fn core_registry_updated(env: &Env, registry: &Address) {
    env.events()
        .publish((symbol_short!("reg_upd"),), registry.clone());
}

pub fn admin_acl_updated(env: &Env, acl: &Address) {
    env.events()
        .publish((symbol_short!("acl_upd"),), acl.clone());
}
