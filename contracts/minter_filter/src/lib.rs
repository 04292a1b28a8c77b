//! # MinterFilter
//!
//! The central authorization and dispatch hub of the minter suite. It binds
//! each project — keyed by `(core contract, project id)` since one filter
//! services many core contracts — to at most one minter, keeps the global
//! and per-contract minter approval sets, and proxies `mint_joo` calls from
//! the bound minter to the core contract.
//!
//! Admin authority is delegated to a swappable AdminACL contract;
//! [`MinterFilter::admin_acl_allowed`] re-exposes that decision to the
//! minters so the filter is the single source of admin truth for the whole
//! suite. The one artist self-service carve-out is
//! [`MinterFilter::set_minter_for_project`]: a project's artist may pick an
//! (already approved) minter for their own project without the ACL.
//!
//! Revoking a minter's approval deliberately does **not** cascade into
//! existing project bindings; instead `mint_joo` re-checks live approval on
//! every call, so a revoked minter is dead on arrival even while still
//! bound.

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

use shared::errors::Error;
use shared::interfaces::{AclClient, CoreClient, RegistryClient};
use shared::types::ProjectKey;

mod events;
mod storage;

#[cfg(test)]
mod test_filter;

pub use events::{ProjectMinterRegistered, ProjectMinterRemoved};

#[contract]
pub struct MinterFilter;

#[contractimpl]
impl MinterFilter {
    pub fn init(env: Env, admin_acl: Address, core_registry: Address) -> Result<(), Error> {
        if storage::get_admin_acl(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_admin_acl(&env, &admin_acl);
        storage::set_core_registry(&env, &core_registry);
        Ok(())
    }

    // ── Project ↔ minter bindings ────────────────────────────────────

    /// Bind `minter` to a project, overwriting any prior binding.
    ///
    /// Requires a registered core contract and an approved minter. The
    /// caller must pass the ACL **or** be the project's artist — artist
    /// self-service is allowed for this operation only.
    pub fn set_minter_for_project(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        minter: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let registry = storage::get_core_registry(&env).ok_or(Error::NotInitialized)?;
        if !RegistryClient::new(&env, &registry).is_registered_contract(&core) {
            return Err(Error::UnregisteredCoreContract);
        }
        if !storage::is_approved(&env, &core, &minter) {
            return Err(Error::MinterNotApproved);
        }
        let key = ProjectKey::new(core.clone(), project_id);
        Self::require_acl_or_artist(
            &env,
            &caller,
            &key,
            Symbol::new(&env, "set_minter_for_project"),
        )?;
        storage::set_minter_for_project(&env, &key, &minter);
        events::minter_registered(&env, &key, &minter);
        Ok(())
    }

    /// Clear a project's minter binding; subsequent mints fail with
    /// [`Error::NoMinterAssigned`]. ACL-gated — no artist carve-out here.
    pub fn remove_minter_for_project(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        Self::require_acl(&env, &caller, Symbol::new(&env, "remove_minter_for_project"))?;
        if storage::get_minter_for_project(&env, &key).is_none() {
            return Err(Error::NoMinterAssigned);
        }
        storage::remove_minter_for_project(&env, &key);
        events::minter_removed(&env, &key);
        Ok(())
    }

    pub fn get_minter_for_project(env: Env, project_id: u32, core: Address) -> Result<Address, Error> {
        let key = ProjectKey::new(core, project_id);
        storage::get_minter_for_project(&env, &key).ok_or(Error::NoMinterAssigned)
    }

    // ── Approval sets ────────────────────────────────────────────────

    pub fn approve_minter_globally(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, Symbol::new(&env, "approve_minter_globally"))?;
        storage::approve_globally(&env, &minter);
        events::minter_approved_globally(&env, &minter);
        Ok(())
    }

    /// Remove a minter from the global approval set.
    ///
    /// Existing project bindings are left in place: `mint_joo` re-checks
    /// approval live, so those bindings stop minting without being unwound.
    pub fn revoke_minter_globally(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, Symbol::new(&env, "revoke_minter_globally"))?;
        storage::revoke_globally(&env, &minter);
        events::minter_revoked_globally(&env, &minter);
        Ok(())
    }

    pub fn approve_minter_for_contract(
        env: Env,
        caller: Address,
        core: Address,
        minter: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, Symbol::new(&env, "approve_minter_for_contract"))?;
        storage::approve_for_contract(&env, &core, &minter);
        events::minter_approved_for_contract(&env, &core, &minter);
        Ok(())
    }

    pub fn revoke_minter_for_contract(
        env: Env,
        caller: Address,
        core: Address,
        minter: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, Symbol::new(&env, "revoke_minter_for_contract"))?;
        storage::revoke_for_contract(&env, &core, &minter);
        events::minter_revoked_for_contract(&env, &core, &minter);
        Ok(())
    }

    pub fn is_approved_minter(env: Env, core: Address, minter: Address) -> bool {
        storage::is_approved(&env, &core, &minter)
    }

    // ── Mint dispatch ────────────────────────────────────────────────

    /// Proxy a mint to the core contract on behalf of the bound minter.
    ///
    /// `minter` must be the calling minter contract (it authorizes as the
    /// direct invoker), must be the minter currently bound to the project,
    /// AND must still be in an approval set at call time — a binding whose
    /// approval was since revoked is rejected. Both checks happen within
    /// this one invocation, so there is no window in which a revocation can
    /// be raced.
    pub fn mint_joo(
        env: Env,
        minter: Address,
        to: Address,
        project_id: u32,
        core: Address,
        sender: Address,
    ) -> Result<u64, Error> {
        minter.require_auth();
        let key = ProjectKey::new(core.clone(), project_id);
        let bound = storage::get_minter_for_project(&env, &key).ok_or(Error::NoMinterAssigned)?;
        if bound != minter {
            return Err(Error::OnlyAssignedMinter);
        }
        if !storage::is_approved(&env, &core, &minter) {
            return Err(Error::MinterNotApproved);
        }
        let token_id = CoreClient::new(&env, &core).mint(&to, &project_id, &sender);
        Ok(token_id)
    }

    // ── ACL delegation & collaborator rotation ───────────────────────

    /// Pure delegation to the configured AdminACL. Minters call this to
    /// gate their own admin functions.
    pub fn admin_acl_allowed(env: Env, sender: Address, target: Address, selector: Symbol) -> bool {
        match storage::get_admin_acl(&env) {
            Some(acl) => AclClient::new(&env, &acl).allowed(&sender, &target, &selector),
            None => false,
        }
    }

    pub fn update_core_registry(env: Env, caller: Address, registry: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, Symbol::new(&env, "update_core_registry"))?;
        storage::set_core_registry(&env, &registry);
        events::core_registry_updated(&env, &registry);
        Ok(())
    }

    pub fn update_admin_acl(env: Env, caller: Address, acl: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, Symbol::new(&env, "update_admin_acl"))?;
        storage::set_admin_acl(&env, &acl);
        events::admin_acl_updated(&env, &acl);
        Ok(())
    }

    pub fn admin_acl_contract(env: Env) -> Result<Address, Error> {
        storage::get_admin_acl(&env).ok_or(Error::NotInitialized)
    }

    pub fn core_registry_contract(env: Env) -> Result<Address, Error> {
        storage::get_core_registry(&env).ok_or(Error::NotInitialized)
    }

    // ── Internal guards ──────────────────────────────────────────────

    fn require_acl(env: &Env, caller: &Address, selector: Symbol) -> Result<(), Error> {
        let acl = storage::get_admin_acl(env).ok_or(Error::NotInitialized)?;
        if AclClient::new(env, &acl).allowed(caller, &env.current_contract_address(), &selector) {
            Ok(())
        } else {
            Err(Error::NotAuthorized)
        }
    }

    fn require_acl_or_artist(
        env: &Env,
        caller: &Address,
        key: &ProjectKey,
        selector: Symbol,
    ) -> Result<(), Error> {
        if Self::require_acl(env, caller, selector).is_ok() {
            return Ok(());
        }
        if CoreClient::new(env, &key.core).project_artist(&key.project_id) == *caller {
            return Ok(());
        }
        Err(Error::NotAuthorized)
    }
}
