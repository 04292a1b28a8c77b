//! # Dutch-auction minter, linear decay
//!
//! Price falls linearly from `start_price` at `timestamp_start` to
//! `base_price` at `timestamp_end`, then stays at `base_price`. The artist
//! configures auctions for the future only and cannot modify one that has
//! started; an ACL pass may reset (halt) a project's auction at any time.
//!
//! Revenue is split and paid out on every purchase — no settlement here;
//! buyers pay the instantaneous price.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

use shared::errors::Error;
use shared::interfaces::{CoreClient, FilterClient};
use shared::max_invocations::{self, MaxInvocationsProjectConfig};
use shared::pricing;
use shared::ttl::bump_persistent;
use shared::types::ProjectKey;
use shared::{base, guards};

#[cfg(test)]
mod test_da_lin;

/// Platform-wide floor on auction length, seconds.
const DEFAULT_MINIMUM_AUCTION_LENGTH: u64 = 600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearAuction {
    pub timestamp_start: u64,
    pub timestamp_end: u64,
    pub start_price: i128,
    pub base_price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Per-project auction parameters (Persistent).
    AuctionDetails(ProjectKey),
    /// Platform-wide minimum auction length in seconds (Instance).
    MinAuctionLength,
}

#[contract]
pub struct MinterDALin;

#[contractimpl]
impl MinterDALin {
    pub fn init(env: Env, minter_filter: Address, currency: Address) -> Result<(), Error> {
        base::init(&env, &minter_filter, &currency)?;
        env.storage()
            .instance()
            .set(&DataKey::MinAuctionLength, &DEFAULT_MINIMUM_AUCTION_LENGTH);
        Ok(())
    }

    /// Artist-only. The auction must start in the future, run for at least
    /// the platform minimum, and decay downward. A started auction cannot
    /// be reconfigured.
    pub fn set_auction_details(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        timestamp_start: u64,
        timestamp_end: u64,
        start_price: i128,
        base_price: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core.clone(), project_id);
        guards::require_artist(&env, &key, &caller)?;

        let now = env.ledger().timestamp();
        if let Some(existing) = Self::auction(&env, &key) {
            if now >= existing.timestamp_start {
                return Err(Error::AuctionAlreadyStarted);
            }
        }
        if timestamp_start <= now {
            return Err(Error::OnlyFutureAuctions);
        }
        if timestamp_end <= timestamp_start
            || timestamp_end - timestamp_start < Self::minimum_auction_length_seconds(env.clone())
        {
            return Err(Error::InvalidAuctionDuration);
        }
        if base_price <= 0 || start_price <= base_price {
            return Err(Error::InvalidPriceOrder);
        }

        let auction = LinearAuction {
            timestamp_start,
            timestamp_end,
            start_price,
            base_price,
        };
        let skey = DataKey::AuctionDetails(key.clone());
        env.storage().persistent().set(&skey, &auction);
        bump_persistent(&env, &skey);
        env.events().publish(
            (symbol_short!("auc_set"), core, project_id),
            auction,
        );
        Ok(())
    }

    /// ACL-only halt: clears the auction so purchases fail until the artist
    /// configures a new one.
    pub fn reset_auction_details(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let filter = base::minter_filter(&env)?;
        guards::require_acl(
            &env,
            &filter,
            &caller,
            Symbol::new(&env, "reset_auction_details"),
        )?;
        let key = ProjectKey::new(core.clone(), project_id);
        env.storage()
            .persistent()
            .remove(&DataKey::AuctionDetails(key));
        env.events()
            .publish((symbol_short!("auc_reset"), core, project_id), ());
        Ok(())
    }

    pub fn set_min_auction_length_seconds(
        env: Env,
        caller: Address,
        seconds: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        let filter = base::minter_filter(&env)?;
        guards::require_acl(
            &env,
            &filter,
            &caller,
            Symbol::new(&env, "set_min_auction_length_seconds"),
        )?;
        env.storage()
            .instance()
            .set(&DataKey::MinAuctionLength, &seconds);
        env.events()
            .publish((symbol_short!("min_len"),), seconds);
        Ok(())
    }

    pub fn minimum_auction_length_seconds(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::MinAuctionLength)
            .unwrap_or(DEFAULT_MINIMUM_AUCTION_LENGTH)
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

        let auction = Self::auction(&env, &key).ok_or(Error::AuctionNotConfigured)?;
        let price = pricing::da_lin_price(
            env.ledger().timestamp(),
            auction.timestamp_start,
            auction.timestamp_end,
            auction.start_price,
            auction.base_price,
        )?;
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

    /// `(configured, price)`; before start the configured start price is
    /// reported.
    pub fn get_price_info(env: Env, project_id: u32, core: Address) -> (bool, i128) {
        let key = ProjectKey::new(core, project_id);
        match Self::auction(&env, &key) {
            None => (false, 0),
            Some(auction) => {
                let price = pricing::da_lin_price(
                    env.ledger().timestamp(),
                    auction.timestamp_start,
                    auction.timestamp_end,
                    auction.start_price,
                    auction.base_price,
                )
                .unwrap_or(auction.start_price);
                (true, price)
            }
        }
    }

    pub fn auction_details(env: Env, project_id: u32, core: Address) -> Option<LinearAuction> {
        Self::auction(&env, &ProjectKey::new(core, project_id))
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
        symbol_short!("DALin")
    }

    fn auction(env: &Env, key: &ProjectKey) -> Option<LinearAuction> {
        let skey = DataKey::AuctionDetails(key.clone());
        let auction: Option<LinearAuction> = env.storage().persistent().get(&skey);
        if auction.is_some() {
            bump_persistent(env, &skey);
        }
        auction
    }
}
