//! Storage layout of the settlement auction minter.
//!
//! Per project: the immutable-ish auction parameters and the mutable
//! settlement state are separate entries, since settlement state is written
//! on every purchase while auction parameters are written once. Receipts are
//! keyed by `(purchaser, project)` and are append-only accounting — they are
//! updated toward owed-zero on reclaim but never deleted.

use soroban_sdk::{contracttype, Address, Env};

use shared::ttl::{bump_instance, bump_persistent};
use shared::types::ProjectKey;

/// Floor on configurable price-decay half-life, seconds. Admin-mutable.
pub const DEFAULT_MINIMUM_HALF_LIFE: u64 = 45;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExponentialAuction {
    pub timestamp_start: u64,
    pub price_decay_half_life_seconds: u64,
    pub start_price: i128,
    pub base_price: i128,
}

/// Mutable per-project settlement accounting.
///
/// `latest_purchase_price` is the provisional clearing price; it becomes
/// final once `price_is_frozen` (sellout, or revenue withdrawal at base
/// price). The emergency admin path may only lower a frozen price before
/// revenues are collected.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementState {
    pub num_settleable_invocations: u64,
    pub latest_purchase_price: i128,
    pub price_is_frozen: bool,
    pub revenues_collected: bool,
}

impl SettlementState {
    pub fn empty() -> Self {
        SettlementState {
            num_settleable_invocations: 0,
            latest_purchase_price: 0,
            price_is_frozen: false,
            revenues_collected: false,
        }
    }
}

/// Cumulative purchase receipt for one buyer on one project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    pub num_purchased: u64,
    pub net_posted: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Auction parameters (Persistent).
    Auction(ProjectKey),
    /// Settlement accounting (Persistent).
    Settlement(ProjectKey),
    /// Buyer receipt (Persistent).
    Receipt(Address, ProjectKey),
    /// Platform-wide half-life floor (Instance).
    MinHalfLife,
}

pub fn set_auction(env: &Env, key: &ProjectKey, auction: &ExponentialAuction) {
    let skey = DataKey::Auction(key.clone());
    env.storage().persistent().set(&skey, auction);
    bump_persistent(env, &skey);
}

pub fn get_auction(env: &Env, key: &ProjectKey) -> Option<ExponentialAuction> {
    let skey = DataKey::Auction(key.clone());
    let auction: Option<ExponentialAuction> = env.storage().persistent().get(&skey);
    if auction.is_some() {
        bump_persistent(env, &skey);
    }
    auction
}

pub fn remove_auction(env: &Env, key: &ProjectKey) {
    env.storage().persistent().remove(&DataKey::Auction(key.clone()));
}

pub fn set_settlement(env: &Env, key: &ProjectKey, state: &SettlementState) {
    let skey = DataKey::Settlement(key.clone());
    env.storage().persistent().set(&skey, state);
    bump_persistent(env, &skey);
}

pub fn get_settlement(env: &Env, key: &ProjectKey) -> SettlementState {
    let skey = DataKey::Settlement(key.clone());
    match env.storage().persistent().get(&skey) {
        Some(state) => {
            bump_persistent(env, &skey);
            state
        }
        None => SettlementState::empty(),
    }
}

pub fn set_receipt(env: &Env, purchaser: &Address, key: &ProjectKey, receipt: &Receipt) {
    let skey = DataKey::Receipt(purchaser.clone(), key.clone());
    env.storage().persistent().set(&skey, receipt);
    bump_persistent(env, &skey);
}

pub fn get_receipt(env: &Env, purchaser: &Address, key: &ProjectKey) -> Receipt {
    let skey = DataKey::Receipt(purchaser.clone(), key.clone());
    match env.storage().persistent().get(&skey) {
        Some(receipt) => {
            bump_persistent(env, &skey);
            receipt
        }
        None => Receipt {
            num_purchased: 0,
            net_posted: 0,
        },
    }
}

pub fn set_minimum_half_life(env: &Env, seconds: u64) {
    env.storage().instance().set(&DataKey::MinHalfLife, &seconds);
    bump_instance(env);
}

pub fn minimum_half_life(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MinHalfLife)
        .unwrap_or(DEFAULT_MINIMUM_HALF_LIFE)
}
