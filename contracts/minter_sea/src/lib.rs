//! # Serial English auction minter
//!
//! Sells a project one token at a time. When no auction is live, the first
//! qualifying bid initializes one: the next token is minted **to the minter
//! itself** and held until settlement, the bid escrows with the minter, and
//! a countdown of the configured duration starts. Later bids must clear the
//! current bid by the configured increment percentage; the previous bidder
//! is refunded in full. Bids landing inside the time buffer push the end
//! time out (anti-snipe). After the end time anyone may settle: the token
//! transfers to the winner and the winning bid is split as revenue, after
//! which the next auction may initialize.
//!
//! All auction state commits before the outbid refund or settlement
//! transfers, and the value-moving entry points hold a reentrancy lock.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

use shared::errors::Error;
use shared::interfaces::{CoreClient, FilterClient};
use shared::max_invocations::{self, MaxInvocationsProjectConfig};
use shared::types::ProjectKey;
use shared::{base, guards, reentrancy};

#[cfg(test)]
mod test_sea;

/// Anti-snipe window applied when no admin override is set, seconds.
pub const DEFAULT_TIME_BUFFER_SECONDS: u64 = 120;
/// Outbid increment floor applied when no admin override is set, percent.
pub const DEFAULT_MIN_BID_INCREMENT_PERCENTAGE: u32 = 5;
pub const MIN_AUCTION_DURATION_SECONDS: u64 = 60;
pub const MAX_AUCTION_DURATION_SECONDS: u64 = 7 * 24 * 60 * 60;
/// Upper bound on the artist-and-admin-only start window.
pub const MAX_MINT_PERIOD_SECONDS: u64 = 72 * 60 * 60;

/// Artist-configured parameters governing every future auction of a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SEAProjectConfig {
    pub timestamp_start: u64,
    pub auction_duration_seconds: u64,
    pub base_price: i128,
    pub min_bid_increment_percentage: u32,
    /// Window after `timestamp_start` during which only the artist or an
    /// admin may start auctions. Zero disables the window.
    pub mint_period_seconds: u64,
}

/// One live (or settled-awaiting-successor) auction. The increment
/// percentage is snapshotted at initialization so a config reset cannot
/// change the rules mid-auction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Auction {
    pub token_id: u64,
    pub current_bid: i128,
    pub current_bidder: Address,
    pub end_time: u64,
    pub min_bid_increment_percentage: u32,
    pub settled: bool,
}

impl Auction {
    fn min_next_bid(&self) -> i128 {
        self.current_bid + self.current_bid * self.min_bid_increment_percentage as i128 / 100
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Per-project auction parameters (Persistent).
    ProjectConfig(ProjectKey),
    /// The project's current auction (Persistent).
    ActiveAuction(ProjectKey),
    /// Platform anti-snipe window override (Instance).
    TimeBuffer,
    /// Platform increment-percentage floor (Instance).
    MinBidIncrementPct,
}

#[contract]
pub struct MinterSEA;

#[contractimpl]
impl MinterSEA {
    pub fn init(env: Env, minter_filter: Address, currency: Address) -> Result<(), Error> {
        base::init(&env, &minter_filter, &currency)
    }

    // ── Platform configuration (ACL) ─────────────────────────────────

    pub fn update_time_buffer_seconds(
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
            Symbol::new(&env, "update_time_buffer_seconds"),
        )?;
        if seconds == 0 {
            return Err(Error::InvalidAuctionDuration);
        }
        env.storage().instance().set(&DataKey::TimeBuffer, &seconds);
        env.events().publish((symbol_short!("time_buf"),), seconds);
        Ok(())
    }

    pub fn update_min_bid_increment_pct(
        env: Env,
        caller: Address,
        percentage: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        let filter = base::minter_filter(&env)?;
        guards::require_acl(
            &env,
            &filter,
            &caller,
            Symbol::new(&env, "update_min_bid_increment_pct"),
        )?;
        if percentage == 0 {
            return Err(Error::InvalidPriceOrder);
        }
        env.storage()
            .instance()
            .set(&DataKey::MinBidIncrementPct, &percentage);
        env.events().publish((symbol_short!("min_inc"),), percentage);
        Ok(())
    }

    pub fn minter_time_buffer_seconds(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TimeBuffer)
            .unwrap_or(DEFAULT_TIME_BUFFER_SECONDS)
    }

    pub fn minter_min_bid_increment_pct(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::MinBidIncrementPct)
            .unwrap_or(DEFAULT_MIN_BID_INCREMENT_PERCENTAGE)
    }

    // ── Project configuration ────────────────────────────────────────

    /// Artist-only. Governs auctions that have not yet initialized; a live
    /// auction keeps the parameters it started with. An increment
    /// percentage below the platform floor is raised to the floor.
    pub fn configure_future_auctions(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        timestamp_start: u64,
        auction_duration_seconds: u64,
        base_price: i128,
        min_bid_increment_percentage: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;

        if auction_duration_seconds < MIN_AUCTION_DURATION_SECONDS
            || auction_duration_seconds > MAX_AUCTION_DURATION_SECONDS
        {
            return Err(Error::InvalidAuctionDuration);
        }
        if base_price <= 0 {
            return Err(Error::InvalidPriceOrder);
        }
        // Zero means "open immediately"; anything else must be a future time.
        if timestamp_start != 0 && timestamp_start <= env.ledger().timestamp() {
            return Err(Error::OnlyFutureAuctions);
        }

        let mint_period_seconds = Self::existing_mint_period(&env, &key);
        let config = SEAProjectConfig {
            timestamp_start,
            auction_duration_seconds,
            base_price,
            min_bid_increment_percentage: min_bid_increment_percentage
                .max(Self::minter_min_bid_increment_pct(env.clone())),
            mint_period_seconds,
        };
        env.storage()
            .persistent()
            .set(&DataKey::ProjectConfig(key.clone()), &config);
        env.events().publish(
            (symbol_short!("sea_cfg"), key.core.clone(), key.project_id),
            config,
        );
        Ok(())
    }

    /// ACL or artist. A live auction is unaffected; it still settles.
    pub fn reset_future_auction_details(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        let filter = base::minter_filter(&env)?;
        guards::require_acl_or_artist(
            &env,
            &filter,
            &key,
            &caller,
            Symbol::new(&env, "reset_future_auction_details"),
        )?;
        env.storage()
            .persistent()
            .remove(&DataKey::ProjectConfig(key.clone()));
        env.events().publish(
            (symbol_short!("sea_reset"), key.core.clone(), key.project_id),
            (),
        );
        Ok(())
    }

    /// ACL-only window during which only the artist or an admin may start
    /// auctions after `timestamp_start`. Public bidding on an auction that
    /// has already initialized is never restricted.
    pub fn update_artist_admin_mint_period(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        seconds: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        let filter = base::minter_filter(&env)?;
        guards::require_acl(
            &env,
            &filter,
            &caller,
            Symbol::new(&env, "update_artist_admin_mint_period"),
        )?;
        if seconds > MAX_MINT_PERIOD_SECONDS {
            return Err(Error::InvalidAuctionDuration);
        }
        let key = ProjectKey::new(core, project_id);
        let mut config: SEAProjectConfig = env
            .storage()
            .persistent()
            .get(&DataKey::ProjectConfig(key.clone()))
            .ok_or(Error::AuctionNotConfigured)?;
        config.mint_period_seconds = seconds;
        env.storage()
            .persistent()
            .set(&DataKey::ProjectConfig(key.clone()), &config);
        env.events().publish(
            (symbol_short!("mint_per"), key.core.clone(), key.project_id),
            seconds,
        );
        Ok(())
    }

    // ── Bidding ──────────────────────────────────────────────────────

    /// Bid on `token_id`. With no live auction this initializes one (the
    /// token is minted here and `token_id` must name it); with a live
    /// auction it must outbid by the snapshotted increment.
    pub fn create_bid(
        env: Env,
        bidder: Address,
        project_id: u32,
        core: Address,
        token_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        bidder.require_auth();
        reentrancy::acquire(&env)?;
        let result = Self::create_bid_inner(&env, &bidder, project_id, core, token_id, amount);
        reentrancy::release(&env);
        result
    }

    /// Settle the project's ended auction and immediately bid on the next
    /// token, in one invocation.
    pub fn settle_auction_and_create_bid(
        env: Env,
        bidder: Address,
        project_id: u32,
        core: Address,
        bid_token_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        bidder.require_auth();
        reentrancy::acquire(&env)?;
        let result = Self::settle_inner(&env, project_id, core.clone()).and_then(|_| {
            Self::create_bid_inner(&env, &bidder, project_id, core, bid_token_id, amount)
        });
        reentrancy::release(&env);
        result
    }

    fn create_bid_inner(
        env: &Env,
        bidder: &Address,
        project_id: u32,
        core: Address,
        token_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        let key = ProjectKey::new(core.clone(), project_id);
        let akey = DataKey::ActiveAuction(key.clone());
        let live: Option<Auction> = env.storage().persistent().get(&akey);
        let now = env.ledger().timestamp();

        if let Some(auction) = live.filter(|a| !a.settled) {
            // Outbid path.
            if now > auction.end_time {
                return Err(Error::AuctionAlreadyEnded);
            }
            if auction.token_id != token_id {
                return Err(Error::TokenNotBeingAuctioned);
            }
            if amount < auction.min_next_bid() {
                return Err(Error::BidTooLow);
            }

            let currency = token::Client::new(env, &base::currency(env)?);
            currency.transfer(bidder, &env.current_contract_address(), &amount);

            let buffer = Self::minter_time_buffer_seconds(env.clone());
            let mut updated = auction.clone();
            updated.current_bid = amount;
            updated.current_bidder = bidder.clone();
            if updated.end_time - now < buffer {
                updated.end_time = now + buffer;
            }
            env.storage().persistent().set(&akey, &updated);
            env.events().publish(
                (symbol_short!("bid"), core, project_id),
                (token_id, bidder.clone(), amount, updated.end_time),
            );

            // Refund the displaced bidder last.
            currency.transfer(
                &env.current_contract_address(),
                &auction.current_bidder,
                &auction.current_bid,
            );
            return Ok(());
        }

        // Initialization path: mint the next token to this minter and open
        // the countdown with `amount` as the standing bid.
        let config: SEAProjectConfig = env
            .storage()
            .persistent()
            .get(&DataKey::ProjectConfig(key.clone()))
            .ok_or(Error::AuctionNotConfigured)?;
        if now < config.timestamp_start {
            return Err(Error::AuctionNotStarted);
        }
        if config.mint_period_seconds > 0
            && now < config.timestamp_start + config.mint_period_seconds
        {
            let filter = base::minter_filter(env)?;
            guards::require_acl_or_artist(
                env,
                &filter,
                &key,
                bidder,
                Symbol::new(env, "create_bid"),
            )
            .map_err(|_| Error::AuctionNotStarted)?;
        }

        let mut inv_cfg = max_invocations::load_for_purchase(env, &key);
        max_invocations::pre_mint_check(&inv_cfg)?;
        guards::require_project_mintable(env, &key)?;
        if amount < config.base_price {
            return Err(Error::BidTooLow);
        }

        let currency = token::Client::new(env, &base::currency(env)?);
        currency.transfer(bidder, &env.current_contract_address(), &amount);

        let filter = FilterClient::new(env, &base::minter_filter(env)?);
        let minted = filter.mint_joo(
            &env.current_contract_address(),
            &env.current_contract_address(),
            &project_id,
            &core,
            bidder,
        );
        max_invocations::post_mint_update(env, &key, &mut inv_cfg, minted);
        if minted != token_id {
            return Err(Error::TokenNotBeingAuctioned);
        }

        let auction = Auction {
            token_id: minted,
            current_bid: amount,
            current_bidder: bidder.clone(),
            end_time: now + config.auction_duration_seconds,
            min_bid_increment_percentage: config.min_bid_increment_percentage,
            settled: false,
        };
        env.storage().persistent().set(&akey, &auction);
        env.events().publish(
            (symbol_short!("auc_init"), core.clone(), project_id),
            auction.clone(),
        );
        env.events().publish(
            (symbol_short!("bid"), core, project_id),
            (minted, bidder.clone(), amount, auction.end_time),
        );
        Ok(())
    }

    // ── Settlement ───────────────────────────────────────────────────

    /// Anyone may settle once the countdown has elapsed.
    pub fn settle_auction(env: Env, project_id: u32, core: Address) -> Result<(), Error> {
        reentrancy::acquire(&env)?;
        let result = Self::settle_inner(&env, project_id, core);
        reentrancy::release(&env);
        result
    }

    fn settle_inner(env: &Env, project_id: u32, core: Address) -> Result<(), Error> {
        let key = ProjectKey::new(core.clone(), project_id);
        let akey = DataKey::ActiveAuction(key);
        let mut auction: Auction = env
            .storage()
            .persistent()
            .get(&akey)
            .ok_or(Error::AuctionNotConfigured)?;
        if auction.settled {
            return Err(Error::AuctionAlreadySettled);
        }
        if env.ledger().timestamp() <= auction.end_time {
            return Err(Error::AuctionNotEnded);
        }

        auction.settled = true;
        env.storage().persistent().set(&akey, &auction);
        env.events().publish(
            (symbol_short!("settle"), core.clone(), project_id),
            (
                auction.token_id,
                auction.current_bidder.clone(),
                auction.current_bid,
            ),
        );

        // Token to the winner, then revenue out.
        let core_client = CoreClient::new(env, &core);
        core_client.transfer(
            &env.current_contract_address(),
            &auction.current_bidder,
            &auction.token_id,
        );
        let currency = token::Client::new(env, &base::currency(env)?);
        let splits = core_client.get_primary_revenue_splits(&project_id, &auction.current_bid);
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

    // ── Views ────────────────────────────────────────────────────────

    pub fn active_auction_details(env: Env, project_id: u32, core: Address) -> Option<Auction> {
        env.storage()
            .persistent()
            .get(&DataKey::ActiveAuction(ProjectKey::new(core, project_id)))
    }

    pub fn project_config(env: Env, project_id: u32, core: Address) -> Option<SEAProjectConfig> {
        env.storage()
            .persistent()
            .get(&DataKey::ProjectConfig(ProjectKey::new(core, project_id)))
    }

    /// `(configured, price)`: the minimum qualifying next bid while an
    /// auction is live, otherwise the configured base price.
    pub fn get_price_info(env: Env, project_id: u32, core: Address) -> (bool, i128) {
        let key = ProjectKey::new(core, project_id);
        if let Some(auction) = env
            .storage()
            .persistent()
            .get::<_, Auction>(&DataKey::ActiveAuction(key.clone()))
        {
            if !auction.settled {
                return (true, auction.min_next_bid());
            }
        }
        match env
            .storage()
            .persistent()
            .get::<_, SEAProjectConfig>(&DataKey::ProjectConfig(key))
        {
            Some(config) => (true, config.base_price),
            None => (false, 0),
        }
    }

    fn existing_mint_period(env: &Env, key: &ProjectKey) -> u64 {
        env.storage()
            .persistent()
            .get::<_, SEAProjectConfig>(&DataKey::ProjectConfig(key.clone()))
            .map(|c| c.mint_period_seconds)
            .unwrap_or(0)
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
        symbol_short!("SEA")
    }
}
