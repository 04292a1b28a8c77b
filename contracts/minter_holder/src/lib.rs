//! # Token-holder minter
//!
//! Fixed-price sales restricted to current holders of tokens from
//! artist-allowlisted projects. The purchaser names a token they hold; the
//! token's project is derived from its id (`token_id / 1_000_000`), the
//! project must be on the target's allowlist, and ownership is checked live
//! against the owned token's core contract at purchase time. Tokens are not
//! consumed or locked — one token can gate any number of purchases.
//!
//! Allowlists are batched vectors of `(core, project_id)` pairs; a length
//! mismatch rejects the whole batch.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use shared::config::{self, ConfigParam, ConfigValue};
use shared::errors::Error;
use shared::interfaces::{CoreClient, FilterClient};
use shared::max_invocations::{self, MaxInvocationsProjectConfig, ONE_MILLION};
use shared::types::ProjectKey;
use shared::{base, guards};


#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Presence key: holders of `(owned_core, owned_project_id)` may mint
    /// the target project (Persistent).
    AllowedHolderProject(ProjectKey, Address, u32),
}

#[contract]
pub struct MinterHolder;

#[contractimpl]
impl MinterHolder {
    pub fn init(env: Env, minter_filter: Address, currency: Address) -> Result<(), Error> {
        base::init(&env, &minter_filter, &currency)
    }

    /// Artist-only. Adds `(owned_cores[i], owned_project_ids[i])` pairs to
    /// the target project's holder allowlist.
    pub fn allow_holders_of_projects(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        owned_cores: Vec<Address>,
        owned_project_ids: Vec<u32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;
        if owned_cores.len() != owned_project_ids.len() {
            return Err(Error::LengthMismatch);
        }
        for (owned_core, owned_project_id) in owned_cores.iter().zip(owned_project_ids.iter()) {
            env.storage().persistent().set(
                &DataKey::AllowedHolderProject(key.clone(), owned_core.clone(), owned_project_id),
                &true,
            );
            env.events().publish(
                (symbol_short!("hold_add"), key.core.clone(), key.project_id),
                (owned_core, owned_project_id),
            );
        }
        Ok(())
    }

    /// Artist-only. Removing a pair that was never allowlisted is a no-op.
    pub fn remove_holders_of_projects(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        owned_cores: Vec<Address>,
        owned_project_ids: Vec<u32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;
        if owned_cores.len() != owned_project_ids.len() {
            return Err(Error::LengthMismatch);
        }
        for (owned_core, owned_project_id) in owned_cores.iter().zip(owned_project_ids.iter()) {
            env.storage().persistent().remove(&DataKey::AllowedHolderProject(
                key.clone(),
                owned_core.clone(),
                owned_project_id,
            ));
            env.events().publish(
                (symbol_short!("hold_rm"), key.core.clone(), key.project_id),
                (owned_core, owned_project_id),
            );
        }
        Ok(())
    }

    /// Artist-only price configuration. Purchases fail until set.
    pub fn update_price_per_token(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        price: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;
        if price <= 0 {
            return Err(Error::InvalidPriceOrder);
        }
        config::set_value(&env, &key, ConfigParam::PricePerToken, ConfigValue::I128(price));
        Ok(())
    }

    pub fn purchase(
        env: Env,
        purchaser: Address,
        project_id: u32,
        core: Address,
        max_amount: i128,
        owned_core: Address,
        owned_token_id: u64,
    ) -> Result<u64, Error> {
        Self::purchase_to(
            env,
            purchaser.clone(),
            purchaser,
            project_id,
            core,
            max_amount,
            owned_core,
            owned_token_id,
        )
    }

    pub fn purchase_to(
        env: Env,
        purchaser: Address,
        to: Address,
        project_id: u32,
        core: Address,
        max_amount: i128,
        owned_core: Address,
        owned_token_id: u64,
    ) -> Result<u64, Error> {
        purchaser.require_auth();
        let key = ProjectKey::new(core.clone(), project_id);

        let mut inv_cfg = max_invocations::load_for_purchase(&env, &key);
        max_invocations::pre_mint_check(&inv_cfg)?;
        guards::require_project_mintable(&env, &key)?;

        // The named token's project must be allowlisted, and the purchaser
        // must hold the token right now.
        let owned_project_id = (owned_token_id / ONE_MILLION) as u32;
        let allowed: bool = env
            .storage()
            .persistent()
            .get(&DataKey::AllowedHolderProject(
                key.clone(),
                owned_core.clone(),
                owned_project_id,
            ))
            .unwrap_or(false);
        if !allowed {
            return Err(Error::HolderNotAllowed);
        }
        if CoreClient::new(&env, &owned_core).owner_of(&owned_token_id) != purchaser {
            return Err(Error::NotAuthorized);
        }

        let price = config::get_i128(&env, &key, ConfigParam::PricePerToken)
            .ok_or(Error::PriceNotConfigured)?;
        if max_amount < price {
            return Err(Error::InsufficientPayment);
        }

        let currency = token::Client::new(&env, &base::currency(&env)?);
        currency.transfer(&purchaser, &env.current_contract_address(), &price);

        let filter = FilterClient::new(&env, &base::minter_filter(&env)?);
        let token_id = filter.mint_joo(
            &env.current_contract_address(),
            &to,
            &project_id,
            &core,
            &purchaser,
        );
        max_invocations::post_mint_update(&env, &key, &mut inv_cfg, token_id);

        env.events().publish(
            (symbol_short!("purchase"), core.clone(), project_id),
            (to, token_id, price),
        );

        // Revenue distribution is the last set of operations.
        let splits = CoreClient::new(&env, &core).get_primary_revenue_splits(&project_id, &price);
        if splits.platform_amount > 0 {
            currency.transfer(
                &env.current_contract_address(),
                &splits.platform_address,
                &splits.platform_amount,
            );
        }
        if splits.artist_amount > 0 {
            currency.transfer(
                &env.current_contract_address(),
                &splits.artist_address,
                &splits.artist_amount,
            );
        }
        Ok(token_id)
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn is_allowlisted_holder_project(
        env: Env,
        project_id: u32,
        core: Address,
        owned_core: Address,
        owned_project_id: u32,
    ) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::AllowedHolderProject(
                ProjectKey::new(core, project_id),
                owned_core,
                owned_project_id,
            ))
            .unwrap_or(false)
    }

    /// `(configured, price)` — the standard price-info view shape.
    pub fn get_price_info(env: Env, project_id: u32, core: Address) -> (bool, i128) {
        match config::get_i128(
            &env,
            &ProjectKey::new(core, project_id),
            ConfigParam::PricePerToken,
        ) {
            Some(price) => (true, price),
            None => (false, 0),
        }
    }

    // ── Shared invocation-limit surface ──────────────────────────────

    pub fn manually_limit_max_invocations(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        new_limit: u32,
    ) -> Result<(), Error> {
        let key = ProjectKey::new(core, project_id);
        base::manually_limit_max_invocations(&env, &caller, &key, new_limit)
    }

    pub fn sync_max_invocations_to_core(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
    ) -> Result<(), Error> {
        let key = ProjectKey::new(core, project_id);
        base::sync_max_invocations_to_core(&env, &caller, &key)
    }

    pub fn project_max_has_been_invoked(env: Env, project_id: u32, core: Address) -> bool {
        max_invocations::load(&env, &ProjectKey::new(core, project_id)).has_max_been_invoked
    }

    pub fn project_max_invocations_config(
        env: Env,
        project_id: u32,
        core: Address,
    ) -> MaxInvocationsProjectConfig {
        max_invocations::load(&env, &ProjectKey::new(core, project_id))
    }

    pub fn minter_type(_env: Env) -> Symbol {
        symbol_short!("Holder")
    }
}
