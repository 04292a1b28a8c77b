extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{MinterDALin, MinterDALinClient};
use admin_acl::{AdminAcl, AdminAclClient};
use core_registry::{CoreRegistry, CoreRegistryClient};
use minter_filter::{MinterFilter, MinterFilterClient};
use mock_core::{MockCore, MockCoreClient};
use shared::errors::Error;

const BASE: i128 = 1_000_000_000;
const START_PRICE: i128 = 5 * BASE;
const T0: u64 = 1_000_000;
const AUCTION_START: u64 = T0 + 100;
const AUCTION_END: u64 = AUCTION_START + 600;

struct Fixture<'a> {
    env: Env,
    minter: MinterDALinClient<'a>,
    core_id: Address,
    currency: token::Client<'a>,
    super_admin: Address,
    artist: Address,
    buyer: Address,
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
    core.init(&Address::generate(&env));
    core.update_minter_contract(&filter_id);
    registry.register_contract(&super_admin, &core_id);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let currency = token::Client::new(&env, &sac.address());
    let currency_sac = token::StellarAssetClient::new(&env, &sac.address());

    let minter_id = env.register(MinterDALin, ());
    let minter = MinterDALinClient::new(&env, &minter_id);
    minter.init(&filter_id, &sac.address());
    filter.approve_minter_globally(&super_admin, &minter_id);

    let artist = Address::generate(&env);
    let project_id = core.add_project(&artist, &10);
    filter.set_minter_for_project(&super_admin, &project_id, &core_id, &minter_id);

    let buyer = Address::generate(&env);
    currency_sac.mint(&buyer, &(100 * START_PRICE));

    Fixture {
        env,
        minter,
        core_id,
        currency,
        super_admin,
        artist,
        buyer,
        project_id,
    }
}

fn configure(f: &Fixture) {
    f.minter.set_auction_details(
        &f.artist,
        &f.project_id,
        &f.core_id,
        &AUCTION_START,
        &AUCTION_END,
        &START_PRICE,
        &BASE,
    );
}

#[test]
fn configuration_validations() {
    let f = setup();
    let stranger = Address::generate(&f.env);

    assert_eq!(
        f.minter.try_set_auction_details(
            &stranger,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &AUCTION_END,
            &START_PRICE,
            &BASE
        ),
        Err(Ok(Error::NotAuthorized))
    );
    // Start in the past.
    assert_eq!(
        f.minter.try_set_auction_details(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &(T0 - 1),
            &AUCTION_END,
            &START_PRICE,
            &BASE
        ),
        Err(Ok(Error::OnlyFutureAuctions))
    );
    // Shorter than the platform minimum (600s).
    assert_eq!(
        f.minter.try_set_auction_details(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &(AUCTION_START + 599),
            &START_PRICE,
            &BASE
        ),
        Err(Ok(Error::InvalidAuctionDuration))
    );
    // Start price must exceed base price.
    assert_eq!(
        f.minter.try_set_auction_details(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &AUCTION_START,
            &AUCTION_END,
            &BASE,
            &BASE
        ),
        Err(Ok(Error::InvalidPriceOrder))
    );
}

#[test]
fn no_modification_once_started() {
    let f = setup();
    configure(&f);

    // Pre-start reconfiguration is allowed.
    f.minter.set_auction_details(
        &f.artist,
        &f.project_id,
        &f.core_id,
        &(AUCTION_START + 10),
        &(AUCTION_END + 10),
        &START_PRICE,
        &BASE,
    );

    f.env
        .ledger()
        .with_mut(|li| li.timestamp = AUCTION_START + 10);
    assert_eq!(
        f.minter.try_set_auction_details(
            &f.artist,
            &f.project_id,
            &f.core_id,
            &(AUCTION_END + 100),
            &(AUCTION_END + 1000),
            &START_PRICE,
            &BASE
        ),
        Err(Ok(Error::AuctionAlreadyStarted))
    );
}

#[test]
fn purchase_before_start_fails() {
    let f = setup();
    configure(&f);
    assert_eq!(
        f.minter
            .try_purchase(&f.buyer, &f.project_id, &f.core_id, &START_PRICE),
        Err(Ok(Error::AuctionNotStarted))
    );
}

#[test]
fn purchase_charges_linear_price() {
    let f = setup();
    configure(&f);

    // Midway through the auction the price is the midpoint.
    f.env
        .ledger()
        .with_mut(|li| li.timestamp = AUCTION_START + 300);
    let expected = (START_PRICE + BASE) / 2;
    assert_eq!(
        f.minter.get_price_info(&f.project_id, &f.core_id),
        (true, expected)
    );

    let before = f.currency.balance(&f.buyer);
    f.minter
        .purchase(&f.buyer, &f.project_id, &f.core_id, &START_PRICE);
    assert_eq!(f.currency.balance(&f.buyer), before - expected);
}

#[test]
fn price_clamps_at_base_after_end() {
    let f = setup();
    configure(&f);
    f.env
        .ledger()
        .with_mut(|li| li.timestamp = AUCTION_END + 5_000);
    assert_eq!(
        f.minter.get_price_info(&f.project_id, &f.core_id),
        (true, BASE)
    );
    let before = f.currency.balance(&f.buyer);
    f.minter
        .purchase(&f.buyer, &f.project_id, &f.core_id, &BASE);
    assert_eq!(f.currency.balance(&f.buyer), before - BASE);
}

#[test]
fn reset_halts_sales_and_is_acl_gated() {
    let f = setup();
    configure(&f);

    assert_eq!(
        f.minter
            .try_reset_auction_details(&f.artist, &f.project_id, &f.core_id),
        Err(Ok(Error::NotAuthorized))
    );

    f.minter
        .reset_auction_details(&f.super_admin, &f.project_id, &f.core_id);
    f.env
        .ledger()
        .with_mut(|li| li.timestamp = AUCTION_START + 300);
    assert_eq!(
        f.minter
            .try_purchase(&f.buyer, &f.project_id, &f.core_id, &START_PRICE),
        Err(Ok(Error::AuctionNotConfigured))
    );
}

#[test]
fn platform_minimum_length_is_admin_mutable() {
    let f = setup();
    f.minter
        .set_min_auction_length_seconds(&f.super_admin, &100);
    // A 100-second auction is now accepted.
    f.minter.set_auction_details(
        &f.artist,
        &f.project_id,
        &f.core_id,
        &AUCTION_START,
        &(AUCTION_START + 100),
        &START_PRICE,
        &BASE,
    );
}
