//! Storage layout of the MinterFilter.
//!
//! Instance storage holds the two collaborator addresses; per-project minter
//! bindings and approval-set membership live in persistent storage so their
//! TTLs extend independently with use.

use soroban_sdk::{contracttype, Address, Env};

use shared::ttl::{bump_instance, bump_persistent};
use shared::types::ProjectKey;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// AdminACL contract (Instance).
    AdminAcl,
    /// CoreRegistry contract (Instance).
    CoreRegistry,
    /// Minter currently bound to a project (Persistent). Absent = none.
    MinterForProject(ProjectKey),
    /// Globally-approved minter set membership (Persistent).
    GlobalApproval(Address),
    /// Per-core-contract approved minter set membership: (core, minter)
    /// (Persistent).
    ContractApproval(Address, Address),
}

pub fn set_admin_acl(env: &Env, acl: &Address) {
    env.storage().instance().set(&DataKey::AdminAcl, acl);
    bump_instance(env);
}

pub fn get_admin_acl(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::AdminAcl)
}

pub fn set_core_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&DataKey::CoreRegistry, registry);
    bump_instance(env);
}

pub fn get_core_registry(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::CoreRegistry)
}

pub fn set_minter_for_project(env: &Env, key: &ProjectKey, minter: &Address) {
    let skey = DataKey::MinterForProject(key.clone());
    env.storage().persistent().set(&skey, minter);
    bump_persistent(env, &skey);
}

pub fn get_minter_for_project(env: &Env, key: &ProjectKey) -> Option<Address> {
    let skey = DataKey::MinterForProject(key.clone());
    let minter: Option<Address> = env.storage().persistent().get(&skey);
    if minter.is_some() {
        bump_persistent(env, &skey);
    }
    minter
}

pub fn remove_minter_for_project(env: &Env, key: &ProjectKey) {
    env.storage()
        .persistent()
        .remove(&DataKey::MinterForProject(key.clone()));
}

pub fn approve_globally(env: &Env, minter: &Address) {
    let skey = DataKey::GlobalApproval(minter.clone());
    env.storage().persistent().set(&skey, &true);
    bump_persistent(env, &skey);
}

pub fn revoke_globally(env: &Env, minter: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::GlobalApproval(minter.clone()));
}

pub fn is_globally_approved(env: &Env, minter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::GlobalApproval(minter.clone()))
}

pub fn approve_for_contract(env: &Env, core: &Address, minter: &Address) {
    let skey = DataKey::ContractApproval(core.clone(), minter.clone());
    env.storage().persistent().set(&skey, &true);
    bump_persistent(env, &skey);
}

pub fn revoke_for_contract(env: &Env, core: &Address, minter: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::ContractApproval(core.clone(), minter.clone()));
}

pub fn is_approved_for_contract(env: &Env, core: &Address, minter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ContractApproval(core.clone(), minter.clone()))
}

/// A minter is usable for a core contract if approved globally or for that
/// specific core.
pub fn is_approved(env: &Env, core: &Address, minter: &Address) -> bool {
    is_globally_approved(env, minter) || is_approved_for_contract(env, core, minter)
}
