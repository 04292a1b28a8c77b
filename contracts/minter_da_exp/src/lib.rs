//! # Dutch-auction minter, exponential decay with settlement
//!
//! Price decays exponentially (per-half-life halving of the premium above
//! base, linearly interpolated within each window). Buyers post their full
//! payment into escrow; the **latest purchase price** observed project-wide
//! is the provisional clearing price. Once the project sells out, or the
//! artist/admin withdraws revenues (allowed only after the price has
//! decayed to base), the clearing price freezes and every buyer can reclaim
//! `net_posted - num_purchased * clearing_price` — idempotently, since each
//! reclaim rewrites the receipt to the owed-zero state.
//!
//! State machine per project:
//! `Unconfigured → Configured(pre-start) → Active(decaying) →
//! Ended/SoldOut(price frozen) → RevenuesWithdrawn`.
//!
//! All accounting commits before any outbound transfer, and the
//! value-moving entry points additionally hold the suite's reentrancy lock.

#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use shared::errors::Error;
use shared::interfaces::{CoreClient, FilterClient};
use shared::max_invocations::{self, MaxInvocationsProjectConfig};
use shared::types::ProjectKey;
use shared::{base, guards, pricing, reentrancy};

mod events;
mod storage;


pub use events::ReceiptUpdated;
pub use storage::{ExponentialAuction, Receipt, SettlementState};

#[contract]
pub struct MinterDAExpSettlement;

#[contractimpl]
impl MinterDAExpSettlement {
    pub fn init(env: Env, minter_filter: Address, currency: Address) -> Result<(), Error> {
        base::init(&env, &minter_filter, &currency)?;
        storage::set_minimum_half_life(&env, storage::DEFAULT_MINIMUM_HALF_LIFE);
        Ok(())
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Artist-only. No modifications mid-auction: reconfiguration is
    /// rejected once the auction has started and at least one purchase
    /// exists.
    pub fn set_auction_details(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        timestamp_start: u64,
        price_decay_half_life_seconds: u64,
        start_price: i128,
        base_price: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;

        let now = env.ledger().timestamp();
        let settlement = storage::get_settlement(&env, &key);
        if let Some(existing) = storage::get_auction(&env, &key) {
            if now >= existing.timestamp_start && settlement.num_settleable_invocations > 0 {
                return Err(Error::AuctionAlreadyStarted);
            }
        }
        if settlement.revenues_collected {
            return Err(Error::RevenuesAlreadyCollected);
        }
        if timestamp_start <= now {
            return Err(Error::OnlyFutureAuctions);
        }
        if price_decay_half_life_seconds < storage::minimum_half_life(&env) {
            return Err(Error::HalfLifeBelowFloor);
        }
        if base_price <= 0 || start_price <= base_price {
            return Err(Error::InvalidPriceOrder);
        }

        let auction = ExponentialAuction {
            timestamp_start,
            price_decay_half_life_seconds,
            start_price,
            base_price,
        };
        storage::set_auction(&env, &key, &auction);
        events::auction_set(&env, &key, &auction);
        Ok(())
    }

    /// ACL-only, and only while no purchase has been made — settlement
    /// accounting must never be orphaned by a reset.
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
        let key = ProjectKey::new(core, project_id);
        let settlement = storage::get_settlement(&env, &key);
        if settlement.num_settleable_invocations > 0 {
            return Err(Error::PurchasesExist);
        }
        storage::remove_auction(&env, &key);
        events::auction_reset(&env, &key);
        Ok(())
    }

    /// Platform-wide half-life floor. Applies to new configurations only,
    /// never retroactively.
    pub fn set_min_price_decay_half_life(
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
            Symbol::new(&env, "set_min_price_decay_half_life"),
        )?;
        if seconds == 0 {
            return Err(Error::InvalidAuctionDuration);
        }
        storage::set_minimum_half_life(&env, seconds);
        events::minimum_half_life_updated(&env, seconds);
        Ok(())
    }

    pub fn min_price_decay_half_life(env: Env) -> u64 {
        storage::minimum_half_life(&env)
    }

    // ── Purchases ────────────────────────────────────────────────────

    pub fn purchase(
        env: Env,
        purchaser: Address,
        project_id: u32,
        core: Address,
        amount: i128,
    ) -> Result<u64, Error> {
        Self::purchase_to(env, purchaser.clone(), purchaser, project_id, core, amount)
    }

    /// Escrow-style purchase: the FULL `amount` is posted (no immediate
    /// excess refund); the excess over the final clearing price is
    /// reclaimable once known.
    pub fn purchase_to(
        env: Env,
        purchaser: Address,
        to: Address,
        project_id: u32,
        core: Address,
        amount: i128,
    ) -> Result<u64, Error> {
        purchaser.require_auth();
        reentrancy::acquire(&env)?;
        let result = Self::purchase_inner(&env, &purchaser, &to, project_id, core, amount);
        reentrancy::release(&env);
        result
    }

    fn purchase_inner(
        env: &Env,
        purchaser: &Address,
        to: &Address,
        project_id: u32,
        core: Address,
        amount: i128,
    ) -> Result<u64, Error> {
        let key = ProjectKey::new(core.clone(), project_id);

        let mut inv_cfg = max_invocations::load_for_purchase(env, &key);
        max_invocations::pre_mint_check(&inv_cfg)?;
        guards::require_project_mintable(env, &key)?;

        let auction = storage::get_auction(env, &key).ok_or(Error::AuctionNotConfigured)?;
        let price = pricing::da_exp_price(
            env.ledger().timestamp(),
            auction.timestamp_start,
            auction.price_decay_half_life_seconds,
            auction.start_price,
            auction.base_price,
        )?;
        if amount < price {
            return Err(Error::InsufficientPayment);
        }

        // Escrow the full posted amount on this minter.
        let currency = token::Client::new(env, &base::currency(env)?);
        currency.transfer(purchaser, &env.current_contract_address(), &amount);

        let mut receipt = storage::get_receipt(env, purchaser, &key);
        receipt.num_purchased += 1;
        receipt.net_posted += amount;
        storage::set_receipt(env, purchaser, &key, &receipt);
        events::receipt_updated(env, purchaser, &key, receipt.num_purchased, receipt.net_posted);

        let mut settlement = storage::get_settlement(env, &key);
        settlement.latest_purchase_price = price;
        settlement.num_settleable_invocations += 1;

        let filter = FilterClient::new(env, &base::minter_filter(env)?);
        let token_id = filter.mint_joo(
            &env.current_contract_address(),
            to,
            &project_id,
            &core,
            purchaser,
        );
        let sold_out = max_invocations::post_mint_update(env, &key, &mut inv_cfg, token_id);
        if sold_out {
            // Sellout freezes the clearing price at the last purchase price.
            settlement.price_is_frozen = true;
            events::sellout_price_updated(env, &key, price);
        }
        storage::set_settlement(env, &key, &settlement);

        env.events().publish(
            (symbol_short!("purchase"), core.clone(), project_id),
            (to.clone(), token_id, price),
        );

        // Revenues already collected: nothing accrues to a future
        // withdrawal, so the settled portion of this purchase is paid
        // through the core splits right away. Only the excess over the
        // settled price stays on the receipt for reclaim.
        if settlement.revenues_collected {
            let settled = settlement.latest_purchase_price;
            let splits =
                CoreClient::new(env, &core).get_primary_revenue_splits(&project_id, &settled);
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
        }
        Ok(token_id)
    }

    // ── Settlement ───────────────────────────────────────────────────

    /// Freeze the clearing price (if not already frozen by a sellout) and
    /// pay out `clearing_price × purchases` through the core's revenue
    /// splits. ACL or artist; one-shot.
    ///
    /// Before a sellout, withdrawal is only allowed once the price has
    /// decayed all the way to base — artists cannot freeze a mid-decay
    /// price and strand buyers above it.
    pub fn withdraw_artist_admin_revenues(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        reentrancy::acquire(&env)?;
        let result = Self::withdraw_inner(&env, &caller, project_id, core);
        reentrancy::release(&env);
        result
    }

    fn withdraw_inner(
        env: &Env,
        caller: &Address,
        project_id: u32,
        core: Address,
    ) -> Result<(), Error> {
        let key = ProjectKey::new(core.clone(), project_id);
        let filter = base::minter_filter(env)?;
        guards::require_acl_or_artist(
            env,
            &filter,
            &key,
            caller,
            Symbol::new(env, "withdraw_artist_admin_revenues"),
        )?;

        let mut settlement = storage::get_settlement(env, &key);
        if settlement.revenues_collected {
            return Err(Error::RevenuesAlreadyCollected);
        }
        if settlement.num_settleable_invocations == 0 {
            return Err(Error::AuctionNotComplete);
        }

        if !settlement.price_is_frozen {
            let auction = storage::get_auction(env, &key).ok_or(Error::AuctionNotConfigured)?;
            let current = pricing::da_exp_price(
                env.ledger().timestamp(),
                auction.timestamp_start,
                auction.price_decay_half_life_seconds,
                auction.start_price,
                auction.base_price,
            )?;
            if current != auction.base_price {
                return Err(Error::AuctionNotComplete);
            }
            settlement.latest_purchase_price = auction.base_price;
            settlement.price_is_frozen = true;
            events::sellout_price_updated(env, &key, auction.base_price);
        }

        settlement.revenues_collected = true;
        storage::set_settlement(env, &key, &settlement);

        let settled_price = settlement.latest_purchase_price;
        let total = settled_price * settlement.num_settleable_invocations as i128;
        events::revenues_withdrawn(env, &key, settled_price, total);

        // Outbound transfers are the final operations.
        let currency = token::Client::new(env, &base::currency(env)?);
        let splits = CoreClient::new(env, &core).get_primary_revenue_splits(&project_id, &total);
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
        Ok(())
    }

    /// Emergency admin path: lower (never raise) a frozen sellout price
    /// before revenues are withdrawn, increasing every buyer's reclaimable
    /// excess.
    pub fn emergency_reduce_sellout_price(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        new_price: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        let filter = base::minter_filter(&env)?;
        guards::require_acl(
            &env,
            &filter,
            &caller,
            Symbol::new(&env, "emergency_reduce_sellout_price"),
        )?;
        let key = ProjectKey::new(core, project_id);
        let mut settlement = storage::get_settlement(&env, &key);
        if !settlement.price_is_frozen {
            return Err(Error::AuctionNotComplete);
        }
        if settlement.revenues_collected {
            return Err(Error::RevenuesAlreadyCollected);
        }
        if new_price >= settlement.latest_purchase_price {
            return Err(Error::OnlyPriceReduction);
        }
        let auction = storage::get_auction(&env, &key).ok_or(Error::AuctionNotConfigured)?;
        if new_price < auction.base_price {
            return Err(Error::PriceBelowBase);
        }
        settlement.latest_purchase_price = new_price;
        storage::set_settlement(&env, &key, &settlement);
        events::sellout_price_updated(&env, &key, new_price);
        Ok(())
    }

    /// Reclaim the caller's excess settlement funds for one project,
    /// sending them to `recipient`. Idempotent: the receipt is rewritten to
    /// the owed-zero state, so a second call transfers nothing.
    pub fn reclaim_excess_settlement_funds(
        env: Env,
        recipient: Address,
        purchaser: Address,
        project_id: u32,
        core: Address,
    ) -> Result<i128, Error> {
        purchaser.require_auth();
        reentrancy::acquire(&env)?;
        let key = ProjectKey::new(core, project_id);
        let owed = Self::reclaim_one(&env, &purchaser, &key);
        if owed > 0 {
            let currency = token::Client::new(&env, &base::currency(&env)?);
            currency.transfer(&env.current_contract_address(), &recipient, &owed);
        }
        reentrancy::release(&env);
        Ok(owed)
    }

    /// Batched reclaim across projects, processed in the given order with
    /// one receipt event per pair and a single summed transfer at the end.
    /// Mismatched array lengths fail the whole batch.
    pub fn reclaim_excess_settlement_batch(
        env: Env,
        recipient: Address,
        purchaser: Address,
        project_ids: Vec<u32>,
        cores: Vec<Address>,
    ) -> Result<i128, Error> {
        purchaser.require_auth();
        if project_ids.len() != cores.len() {
            return Err(Error::LengthMismatch);
        }
        reentrancy::acquire(&env)?;
        let mut total: i128 = 0;
        for (project_id, core) in project_ids.iter().zip(cores.iter()) {
            let key = ProjectKey::new(core, project_id);
            total += Self::reclaim_one(&env, &purchaser, &key);
        }
        if total > 0 {
            let currency = token::Client::new(&env, &base::currency(&env)?);
            currency.transfer(&env.current_contract_address(), &recipient, &total);
        }
        reentrancy::release(&env);
        Ok(total)
    }

    /// Commit one receipt to its owed-zero state and return the owed delta.
    fn reclaim_one(env: &Env, purchaser: &Address, key: &ProjectKey) -> i128 {
        let settlement = storage::get_settlement(env, key);
        let mut receipt = storage::get_receipt(env, purchaser, key);
        if receipt.num_purchased == 0 {
            return 0;
        }
        let required = settlement.latest_purchase_price * receipt.num_purchased as i128;
        let owed = receipt.net_posted - required;
        if owed <= 0 {
            return 0;
        }
        receipt.net_posted = required;
        storage::set_receipt(env, purchaser, key, &receipt);
        events::receipt_updated(env, purchaser, key, receipt.num_purchased, receipt.net_posted);
        owed
    }

    // ── Views ────────────────────────────────────────────────────────

    /// `(configured, price)`. After the clearing price freezes this reports
    /// the frozen price; before start, the configured start price.
    pub fn get_price_info(env: Env, project_id: u32, core: Address) -> (bool, i128) {
        let key = ProjectKey::new(core, project_id);
        let auction = match storage::get_auction(&env, &key) {
            Some(a) => a,
            None => return (false, 0),
        };
        let settlement = storage::get_settlement(&env, &key);
        if settlement.price_is_frozen {
            return (true, settlement.latest_purchase_price);
        }
        let price = pricing::da_exp_price(
            env.ledger().timestamp(),
            auction.timestamp_start,
            auction.price_decay_half_life_seconds,
            auction.start_price,
            auction.base_price,
        )
        .unwrap_or(auction.start_price);
        (true, price)
    }

    pub fn get_excess_settlement_funds(
        env: Env,
        purchaser: Address,
        project_id: u32,
        core: Address,
    ) -> i128 {
        let key = ProjectKey::new(core, project_id);
        let settlement = storage::get_settlement(&env, &key);
        let receipt = storage::get_receipt(&env, &purchaser, &key);
        if receipt.num_purchased == 0 {
            return 0;
        }
        let owed =
            receipt.net_posted - settlement.latest_purchase_price * receipt.num_purchased as i128;
        if owed > 0 {
            owed
        } else {
            0
        }
    }

    pub fn auction_details(env: Env, project_id: u32, core: Address) -> Option<ExponentialAuction> {
        storage::get_auction(&env, &ProjectKey::new(core, project_id))
    }

    pub fn settlement_state(env: Env, project_id: u32, core: Address) -> SettlementState {
        storage::get_settlement(&env, &ProjectKey::new(core, project_id))
    }

    pub fn project_receipt(
        env: Env,
        purchaser: Address,
        project_id: u32,
        core: Address,
    ) -> Receipt {
        storage::get_receipt(&env, &purchaser, &ProjectKey::new(core, project_id))
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
        symbol_short!("DAExpSet")
    }
}
