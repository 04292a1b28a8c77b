extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{MinterSEA, MinterSEAClient, DEFAULT_MIN_BID_INCREMENT_PERCENTAGE};
use admin_acl::{AdminAcl, AdminAclClient};
use core_registry::{CoreRegistry, CoreRegistryClient};
use minter_filter::{MinterFilter, MinterFilterClient};
use mock_core::{MockCore, MockCoreClient};
use shared::errors::Error;

const BASE: i128 = 1_000_000_000;
const T0: u64 = 1_000_000;
const AUCTION_START: u64 = T0 + 100;
const DURATION: u64 = 600;

struct Fixture<'a> {
    env: Env,
    minter: MinterSEAClient<'a>,
    minter_id: Address,
    core: MockCoreClient<'a>,
    core_id: Address,
    currency: token::Client<'a>,
    currency_sac: token::StellarAssetClient<'a>,
    platform: Address,
    super_admin: Address,
    artist: Address,
    bidder: Address,
    project_id: u32,
}

fn setup() -> Fixture<'static> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = T0);

    let super_admin = Address::generate(&env);
    let acl_id = env.register(AdminAcl, ());
    AdminAclClient::new(&env, &acl_id).init(&super_admin);

    let registry_id = env.register(CoreRegistry, ());
    let registry = CoreRegistryClient::new(&env, &registry_id);
    registry.init(&acl_id);

    let filter_id = env.register(MinterFilter, ());
    let filter = MinterFilterClient::new(&env, &filter_id);
    filter.init(&acl_id, &registry_id);

    let core_id = env.register(MockCore, ());
    let core = MockCoreClient::new(&env, &core_id);
    let platform = Address::generate(&env);
    core.init(&platform);
    core.update_minter_contract(&filter_id);
    registry.register_contract(&super_admin, &core_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let currency = token::Client::new(&env, &sac.address());
    let currency_sac = token::StellarAssetClient::new(&env, &sac.address());

    let minter_id = env.register(MinterSEA, ());
    let minter = MinterSEAClient::new(&env, &minter_id);
    minter.init(&filter_id, &sac.address());
    filter.approve_minter_globally(&super_admin, &minter_id);

    let artist = Address::generate(&env);
    let project_id = core.add_project(&artist, &10);
    filter.set_minter_for_project(&super_admin, &project_id, &core_id, &minter_id);

    let bidder = Address::generate(&env);
    currency_sac.mint(&bidder, &(100 * BASE));

    Fixture {
        env,
        minter,
        minter_id,
        core,
        core_id,
        currency,
        currency_sac,
        platform,
        super_admin,
        artist,
        bidder,
        project_id,
    }
}

fn configure(f: &Fixture) {
    f.minter.configure_future_auctions(
        &f.artist,
        &f.project_id,
        &f.core_id,
        &AUCTION_START,
        &DURATION,
        &BASE,
        &DEFAULT_MIN_BID_INCREMENT_PERCENTAGE,
    );
}

/// First token of the fixture project.
fn token0(f: &Fixture) -> u64 {
    f.project_id as u64 * 1_000_000
}

fn open_auction(f: &Fixture) -> u64 {
    configure(f);
    f.env.ledger().with_mut(|li| li.timestamp = AUCTION_START);
    let token_id = token0(f);
    f.minter
        .create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &BASE);
    token_id
}

#[test]
fn platform_config_is_acl_gated() {
    let f = setup();
    assert_eq!(
        f.minter
            .try_update_time_buffer_seconds(&f.artist, &60),
        Err(Ok(Error::NotAuthorized))
    );
    f.minter
        .update_time_buffer_seconds(&f.super_admin, &60);
    assert_eq!(f.minter.minter_time_buffer_seconds(), 60);

    f.minter
        .update_min_bid_increment_pct(&f.super_admin, &10);
    assert_eq!(f.minter.minter_min_bid_increment_pct(), 10);
}

#[test]
fn configuration_validations() {
    let f = setup();
    let stranger = Address::generate(&f.env);

    assert_eq!(
        f.minter.try_configure_future_auctions(
            &stranger,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &DURATION,
            &BASE,
            &5
        ),
        Err(Ok(Error::NotAuthorized))
    );
    // Duration outside the platform bounds.
    assert_eq!(
        f.minter.try_configure_future_auctions(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &59,
            &BASE,
            &5
        ),
        Err(Ok(Error::InvalidAuctionDuration))
    );
    assert_eq!(
        f.minter.try_configure_future_auctions(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &(7 * 24 * 60 * 60 + 1),
            &BASE,
            &5
        ),
        Err(Ok(Error::InvalidAuctionDuration))
    );
    assert_eq!(
        f.minter.try_configure_future_auctions(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &DURATION,
            &0,
            &5
        ),
        Err(Ok(Error::InvalidPriceOrder))
    );
    assert_eq!(
        f.minter.try_configure_future_auctions(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &(T0 - 1),
            &DURATION,
            &BASE,
            &5
        ),
        Err(Ok(Error::OnlyFutureAuctions))
    );

    // An increment below the platform floor is raised to the floor.
    f.minter.configure_future_auctions(
        &f.artist,
        &f.project_id,
        &f.core_id,
        &AUCTION_START,
        &DURATION,
        &BASE,
        &1,
    );
    let config = f
        .minter
        .project_config(&f.project_id, &f.core_id)
        .unwrap();
    assert_eq!(
        config.min_bid_increment_percentage,
        DEFAULT_MIN_BID_INCREMENT_PERCENTAGE
    );
}

#[test]
fn first_bid_initializes_the_auction() {
    let f = setup();
    configure(&f);
    let token_id = token0(&f);

    // Not yet open.
    assert_eq!(
        f.minter
            .try_create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &BASE),
        Err(Ok(Error::AuctionNotStarted))
    );

    f.env.ledger().with_mut(|li| li.timestamp = AUCTION_START);
    assert_eq!(
        f.minter
            .try_create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &(BASE - 1)),
        Err(Ok(Error::BidTooLow))
    );
    // Naming the wrong token rejects (and unwinds) the initialization.
    assert_eq!(
        f.minter
            .try_create_bid(&f.bidder, &f.project_id, &f.core_id, &(token_id + 1), &BASE),
        Err(Ok(Error::TokenNotBeingAuctioned))
    );

    let before = f.currency.balance(&f.bidder);
    f.minter
        .create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &BASE);

    // Token held by the minter until settlement; bid escrowed.
    assert_eq!(f.core.owner_of(&token_id), f.minter_id);
    assert_eq!(f.currency.balance(&f.bidder), before - BASE);
    assert_eq!(f.currency.balance(&f.minter_id), BASE);

    let auction = f
        .minter
        .active_auction_details(&f.project_id, &f.core_id)
        .unwrap();
    assert_eq!(auction.token_id, token_id);
    assert_eq!(auction.current_bid, BASE);
    assert_eq!(auction.current_bidder, f.bidder);
    assert_eq!(auction.end_time, AUCTION_START + DURATION);
    assert!(!auction.settled);
}

#[test]
fn outbid_refunds_the_previous_bidder() {
    let f = setup();
    let token_id = open_auction(&f);

    let rival = Address::generate(&f.env);
    f.currency_sac.mint(&rival, &(100 * BASE));

    // Must clear the standing bid by the increment percentage.
    let min_next = BASE + BASE * DEFAULT_MIN_BID_INCREMENT_PERCENTAGE as i128 / 100;
    assert_eq!(
        f.minter
            .try_create_bid(&rival, &f.project_id, &f.core_id, &token_id, &(min_next - 1)),
        Err(Ok(Error::BidTooLow))
    );

    let bidder_before = f.currency.balance(&f.bidder);
    f.minter
        .create_bid(&rival, &f.project_id, &f.core_id, &token_id, &min_next);

    // Full refund to the displaced bidder; only the new bid escrowed.
    assert_eq!(f.currency.balance(&f.bidder), bidder_before + BASE);
    assert_eq!(f.currency.balance(&f.minter_id), min_next);
    let auction = f
        .minter
        .active_auction_details(&f.project_id, &f.core_id)
        .unwrap();
    assert_eq!(auction.current_bidder, rival);
    assert_eq!(auction.current_bid, min_next);
}

#[test]
fn late_bids_extend_the_countdown() {
    let f = setup();
    let token_id = open_auction(&f);

    // 50s before the end, inside the 120s buffer.
    let late = AUCTION_START + DURATION - 50;
    f.env.ledger().with_mut(|li| li.timestamp = late);
    let rival = Address::generate(&f.env);
    f.currency_sac.mint(&rival, &(100 * BASE));
    f.minter
        .create_bid(&rival, &f.project_id, &f.core_id, &token_id, &(2 * BASE));

    let auction = f
        .minter
        .active_auction_details(&f.project_id, &f.core_id)
        .unwrap();
    assert_eq!(auction.end_time, late + 120);
}

#[test]
fn settlement_pays_the_winner_and_splits_revenue() {
    let f = setup();
    let token_id = open_auction(&f);

    assert_eq!(
        f.minter.try_settle_auction(&f.project_id, &f.core_id),
        Err(Ok(Error::AuctionNotEnded))
    );

    f.env
        .ledger()
        .with_mut(|li| li.timestamp = AUCTION_START + DURATION + 1);
    // The countdown has elapsed; new bids are refused until settlement.
    assert_eq!(
        f.minter
            .try_create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &(2 * BASE)),
        Err(Ok(Error::AuctionAlreadyEnded))
    );

    f.minter.settle_auction(&f.project_id, &f.core_id);
    assert_eq!(f.core.owner_of(&token_id), f.bidder);
    assert_eq!(f.currency.balance(&f.platform), BASE / 10);
    assert_eq!(f.currency.balance(&f.artist), BASE - BASE / 10);
    assert_eq!(f.currency.balance(&f.minter_id), 0);

    assert_eq!(
        f.minter.try_settle_auction(&f.project_id, &f.core_id),
        Err(Ok(Error::AuctionAlreadySettled))
    );
}

#[test]
fn settle_and_bid_rolls_to_the_next_token() {
    let f = setup();
    let token_id = open_auction(&f);
    f.env
        .ledger()
        .with_mut(|li| li.timestamp = AUCTION_START + DURATION + 1);

    f.minter.settle_auction_and_create_bid(
        &f.bidder,
        &f.project_id,
        &f.core_id,
        &(token_id + 1),
        &BASE,
    );

    // Previous token settled to the winner; next one under auction.
    assert_eq!(f.core.owner_of(&token_id), f.bidder);
    let auction = f
        .minter
        .active_auction_details(&f.project_id, &f.core_id)
        .unwrap();
    assert_eq!(auction.token_id, token_id + 1);
    assert!(!auction.settled);
    assert_eq!(
        auction.end_time,
        AUCTION_START + DURATION + 1 + DURATION
    );
}

#[test]
fn mint_period_reserves_auction_starts() {
    let f = setup();
    configure(&f);
    f.minter
        .update_artist_admin_mint_period(&f.super_admin, &f.project_id, &f.core_id, &3_600);

    // Bounded by the platform maximum (72h).
    assert_eq!(
        f.minter.try_update_artist_admin_mint_period(
            &f.super_admin,
            &f.project_id,
            &f.core_id,
            &(72 * 60 * 60 + 1)
        ),
        Err(Ok(Error::InvalidAuctionDuration))
    );

    f.env.ledger().with_mut(|li| li.timestamp = AUCTION_START);
    let token_id = token0(&f);
    assert_eq!(
        f.minter
            .try_create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &BASE),
        Err(Ok(Error::AuctionNotStarted))
    );

    // The artist may start an auction inside the window.
    f.currency_sac.mint(&f.artist, &(10 * BASE));
    f.minter
        .create_bid(&f.artist, &f.project_id, &f.core_id, &token_id, &BASE);

    // Once live, public outbidding is unrestricted.
    f.minter
        .create_bid(&f.bidder, &f.project_id, &f.core_id, &token_id, &(2 * BASE));
}

#[test]
fn price_info_tracks_the_auction_state() {
    let f = setup();
    assert_eq!(
        f.minter.get_price_info(&f.project_id, &f.core_id),
        (false, 0)
    );
    configure(&f);
    assert_eq!(
        f.minter.get_price_info(&f.project_id, &f.core_id),
        (true, BASE)
    );
    let _ = open_auction(&f);
    let min_next = BASE + BASE * DEFAULT_MIN_BID_INCREMENT_PERCENTAGE as i128 / 100;
    assert_eq!(
        f.minter.get_price_info(&f.project_id, &f.core_id),
        (true, min_next)
    );
}
