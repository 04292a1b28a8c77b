//! # CoreRegistry
//!
//! Which core NFT contracts are known and trusted by the platform. The
//! MinterFilter consults this registry before binding a minter to a project,
//! so an unregistered core contract can never receive proxied mints.
//!
//! Mutations are gated through the platform AdminACL configured at init.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec};

use shared::errors::Error;
use shared::interfaces::AclClient;
use shared::ttl::bump_instance;


#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// AdminACL gating registry mutations (Instance).
    AdminAcl,
    /// Ordered list of registered core contracts (Instance).
    Registered,
}

#[contract]
pub struct CoreRegistry;

#[contractimpl]
impl CoreRegistry {
    pub fn init(env: Env, admin_acl: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::AdminAcl) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::AdminAcl, &admin_acl);
        env.storage()
            .instance()
            .set(&DataKey::Registered, &Vec::<Address>::new(&env));
        bump_instance(&env);
        Ok(())
    }

    /// Register a core contract. ACL-gated; idempotent registration is an
    /// error so operator tooling notices double-adds.
    pub fn register_contract(env: Env, caller: Address, core: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, symbol_short!("register"))?;
        let mut registered = Self::registered(&env)?;
        if registered.contains(&core) {
            return Err(Error::AlreadyInitialized);
        }
        registered.push_back(core.clone());
        env.storage()
            .instance()
            .set(&DataKey::Registered, &registered);
        bump_instance(&env);
        env.events()
            .publish((symbol_short!("core_reg"),), core);
        Ok(())
    }

    pub fn unregister_contract(env: Env, caller: Address, core: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_acl(&env, &caller, symbol_short!("unregist"))?;
        let mut registered = Self::registered(&env)?;
        let index = registered
            .first_index_of(&core)
            .ok_or(Error::UnregisteredCoreContract)?;
        registered.remove(index);
        env.storage()
            .instance()
            .set(&DataKey::Registered, &registered);
        env.events()
            .publish((symbol_short!("core_unr"),), core);
        Ok(())
    }

    pub fn is_registered_contract(env: Env, core: Address) -> bool {
        bump_instance(&env);
        match env
            .storage()
            .instance()
            .get::<DataKey, Vec<Address>>(&DataKey::Registered)
        {
            Some(registered) => registered.contains(&core),
            None => false,
        }
    }

    pub fn registered_contracts(env: Env) -> Result<Vec<Address>, Error> {
        Self::registered(&env)
    }

    fn registered(env: &Env) -> Result<Vec<Address>, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Registered)
            .ok_or(Error::NotInitialized)
    }

    fn require_acl(env: &Env, caller: &Address, selector: Symbol) -> Result<(), Error> {
        let acl: Address = env
            .storage()
            .instance()
            .get(&DataKey::AdminAcl)
            .ok_or(Error::NotInitialized)?;
        let acl = AclClient::new(env, &acl);
        if acl.allowed(caller, &env.current_contract_address(), &selector) {
            Ok(())
        } else {
            Err(Error::NotAuthorized)
        }
    }
}
