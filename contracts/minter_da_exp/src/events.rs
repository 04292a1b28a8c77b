//! Typed events for settlement-auction indexing.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use shared::types::ProjectKey;

use crate::storage::ExponentialAuction;

/// Cumulative receipt state after a purchase or reclaim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptUpdated {
    pub purchaser: Address,
    pub project_id: u32,
    pub core: Address,
    pub num_purchased: u64,
    pub net_posted: i128,
}

pub fn receipt_updated(
    env: &Env,
    purchaser: &Address,
    key: &ProjectKey,
    num_purchased: u64,
    net_posted: i128,
) {
    env.events().publish(
        (symbol_short!("receipt"), key.core.clone(), key.project_id),
        ReceiptUpdated {
            purchaser: purchaser.clone(),
            project_id: key.project_id,
            core: key.core.clone(),
            num_purchased,
            net_posted,
        },
    );
}

pub fn auction_set(env: &Env, key: &ProjectKey, auction: &ExponentialAuction) {
    env.events().publish(
        (symbol_short!("auc_set"), key.core.clone(), key.project_id),
        auction.clone(),
    );
}

pub fn auction_reset(env: &Env, key: &ProjectKey) {
    env.events().publish(
        (symbol_short!("auc_reset"), key.core.clone(), key.project_id),
        (),
    );
}

pub fn sellout_price_updated(env: &Env, key: &ProjectKey, price: i128) {
    env.events().publish(
        (symbol_short!("sell_px"), key.core.clone(), key.project_id),
        price,
    );
}

pub fn revenues_withdrawn(env: &Env, key: &ProjectKey, settled_price: i128, total: i128) {
    env.events().publish(
        (symbol_short!("rev_wd"), key.core.clone(), key.project_id),
        (settled_price, total),
    );
}

pub fn minimum_half_life_updated(env: &Env, seconds: u64) {
    env.events().publish((symbol_short!("min_hl"),), seconds);
}
