//! # Set-price minter
//!
//! The simplest sale policy: the artist configures a fixed price per token
//! and purchases charge exactly that price. Demonstrates the full shared
//! purchase guard sequence — filter-bound dispatch, invocation-limit cache,
//! core activity checks, payment check — with revenue split and paid out
//! immediately on every purchase.
//!
//! Purchase ordering: payment pull, mint through the filter, invocation
//! accounting, and only then the outbound revenue transfers.

#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

use shared::config::{self, ConfigParam, ConfigValue};
use shared::errors::Error;
use shared::interfaces::{CoreClient, FilterClient};
use shared::max_invocations::{self, MaxInvocationsProjectConfig};
use shared::types::ProjectKey;
use shared::{base, guards};


#[contract]
pub struct MinterSetPrice;

#[contractimpl]
impl MinterSetPrice {
    pub fn init(env: Env, minter_filter: Address, currency: Address) -> Result<(), Error> {
        base::init(&env, &minter_filter, &currency)
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
    ) -> Result<u64, Error> {
        Self::purchase_to(env, purchaser.clone(), purchaser, project_id, core, max_amount)
    }

    pub fn purchase_to(
        env: Env,
        purchaser: Address,
        to: Address,
        project_id: u32,
        core: Address,
        max_amount: i128,
    ) -> Result<u64, Error> {
        purchaser.require_auth();
        let key = ProjectKey::new(core.clone(), project_id);

        let mut inv_cfg = max_invocations::load_for_purchase(&env, &key);
        max_invocations::pre_mint_check(&inv_cfg)?;
        guards::require_project_mintable(&env, &key)?;

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

    pub fn minter_type(_env: Env) -> Symbol {
        symbol_short!("SetPrice")
    }
}
