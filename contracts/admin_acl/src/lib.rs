//! # AdminACL
//!
//! Authorization oracle for the minter suite. Given
//! `(sender, target contract, function selector)` it answers allowed or
//! denied; this implementation allows exactly the current super-admin and
//! keeps the selector/target in the call contract so richer ACLs can swap in
//! behind the same interface.
//!
//! Ownership moves in two steps (`propose_super_admin` then
//! `accept_super_admin`) so a typoed address cannot brick the platform, and
//! renouncing requires an explicit confirmation flag.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol,
};

use shared::errors::Error;
use shared::ttl::bump_instance;


#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Current super-admin (Instance).
    SuperAdmin,
    /// Address proposed in a pending two-step transfer (Instance).
    PendingSuperAdmin,
}

#[contract]
pub struct AdminAcl;

#[contractimpl]
impl AdminAcl {
    /// Set the first super-admin. Callable exactly once.
    pub fn init(env: Env, super_admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::SuperAdmin) {
            return Err(Error::AlreadyInitialized);
        }
        super_admin.require_auth();
        env.storage()
            .instance()
            .set(&DataKey::SuperAdmin, &super_admin);
        bump_instance(&env);
        Ok(())
    }

    /// May `sender` invoke `selector` on `target`?
    ///
    /// Allowed iff `sender` is the current super-admin. A renounced
    /// contract answers `false` for everyone.
    pub fn allowed(env: Env, sender: Address, _target: Address, _selector: Symbol) -> bool {
        bump_instance(&env);
        match env
            .storage()
            .instance()
            .get::<DataKey, Address>(&DataKey::SuperAdmin)
        {
            Some(admin) => admin == sender,
            None => false,
        }
    }

    pub fn super_admin(env: Env) -> Result<Address, Error> {
        bump_instance(&env);
        env.storage()
            .instance()
            .get(&DataKey::SuperAdmin)
            .ok_or(Error::NotInitialized)
    }

    /// Step one of an ownership transfer. Overwrites any prior proposal.
    pub fn propose_super_admin(
        env: Env,
        current: Address,
        proposed: Address,
    ) -> Result<(), Error> {
        current.require_auth();
        Self::require_super_admin(&env, &current)?;
        env.storage()
            .instance()
            .set(&DataKey::PendingSuperAdmin, &proposed);
        bump_instance(&env);
        env.events().publish(
            (symbol_short!("sa_prop"),),
            (current, proposed),
        );
        Ok(())
    }

    /// Step two: the proposed address claims the role.
    pub fn accept_super_admin(env: Env, proposed: Address) -> Result<(), Error> {
        proposed.require_auth();
        let pending: Address = env
            .storage()
            .instance()
            .get(&DataKey::PendingSuperAdmin)
            .ok_or(Error::NoPendingTransfer)?;
        if pending != proposed {
            return Err(Error::NotAuthorized);
        }
        let previous: Option<Address> = env.storage().instance().get(&DataKey::SuperAdmin);
        env.storage()
            .instance()
            .set(&DataKey::SuperAdmin, &proposed);
        env.storage()
            .instance()
            .remove(&DataKey::PendingSuperAdmin);
        bump_instance(&env);
        env.events().publish(
            (symbol_short!("sa_xfer"),),
            (previous, proposed),
        );
        Ok(())
    }

    /// Permanently give up the super-admin role. `confirm` must be `true`;
    /// the flag exists so no tooling path can renounce by accident.
    pub fn renounce_super_admin(env: Env, current: Address, confirm: bool) -> Result<(), Error> {
        current.require_auth();
        Self::require_super_admin(&env, &current)?;
        if !confirm {
            return Err(Error::RenounceNotConfirmed);
        }
        env.storage().instance().remove(&DataKey::SuperAdmin);
        env.storage()
            .instance()
            .remove(&DataKey::PendingSuperAdmin);
        env.events()
            .publish((symbol_short!("sa_renou"),), current);
        Ok(())
    }

    pub fn pending_super_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::PendingSuperAdmin)
    }

    fn require_super_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::SuperAdmin)
            .ok_or(Error::NotInitialized)?;
        if admin != *caller {
            return Err(Error::NotAuthorized);
        }
        Ok(())
    }
}
