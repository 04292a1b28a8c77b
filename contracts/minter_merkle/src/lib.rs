//! # Merkle-allowlist minter
//!
//! Fixed-price sales restricted to addresses on an artist-published Merkle
//! allowlist. The contract stores only the 32-byte root; purchasers supply
//! an inclusion proof for `sha256(xdr(purchaser))` with sibling pairs
//! hashed in sorted order, so proof generation needs no position bits.
//!
//! Each allowlisted address may mint up to a per-project ceiling
//! (default 1, artist-adjustable, 0 meaning unlimited). The limit binds the
//! `purchaser`, not the recipient — proxy-minting to another wallet still
//! consumes the purchaser's allowance.

#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, xdr::ToXdr, Address, Bytes, BytesN,
    Env, Symbol, Vec,
};

use shared::config::{self, ConfigParam, ConfigValue};
use shared::errors::Error;
use shared::interfaces::{CoreClient, FilterClient};
use shared::max_invocations::{self, MaxInvocationsProjectConfig};
use shared::types::ProjectKey;
use shared::{base, guards};


/// Per-address mint ceiling applied when the artist has not set one.
pub const DEFAULT_MAX_INVOCATIONS_PER_ADDRESS: u32 = 1;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Mints consumed by one address on one project (Persistent).
    MintCount(ProjectKey, Address),
}

#[contract]
pub struct MinterMerkle;

#[contractimpl]
impl MinterMerkle {
    pub fn init(env: Env, minter_filter: Address, currency: Address) -> Result<(), Error> {
        base::init(&env, &minter_filter, &currency)
    }

    /// Artist-only. Replacing the root re-gates future purchases only;
    /// consumed per-address allowances are never reset.
    pub fn update_merkle_root(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        root: BytesN<32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;
        config::set_value(&env, &key, ConfigParam::MerkleRoot, ConfigValue::Bytes32(root));
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

    /// Artist-only per-address mint ceiling. `0` lifts the limit entirely.
    pub fn set_invocations_per_address(
        env: Env,
        caller: Address,
        project_id: u32,
        core: Address,
        limit: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        let key = ProjectKey::new(core, project_id);
        guards::require_artist(&env, &key, &caller)?;
        config::set_value(
            &env,
            &key,
            ConfigParam::MaxInvocationsPerAddress,
            ConfigValue::U32(limit),
        );
        Ok(())
    }

    pub fn purchase(
        env: Env,
        purchaser: Address,
        project_id: u32,
        core: Address,
        max_amount: i128,
        proof: Vec<BytesN<32>>,
    ) -> Result<u64, Error> {
        Self::purchase_to(
            env,
            purchaser.clone(),
            purchaser,
            project_id,
            core,
            max_amount,
            proof,
        )
    }

    pub fn purchase_to(
        env: Env,
        purchaser: Address,
        to: Address,
        project_id: u32,
        core: Address,
        max_amount: i128,
        proof: Vec<BytesN<32>>,
    ) -> Result<u64, Error> {
        purchaser.require_auth();
        let key = ProjectKey::new(core.clone(), project_id);

        let mut inv_cfg = max_invocations::load_for_purchase(&env, &key);
        max_invocations::pre_mint_check(&inv_cfg)?;
        guards::require_project_mintable(&env, &key)?;

        let root = config::get_bytes32(&env, &key, ConfigParam::MerkleRoot)
            .ok_or(Error::InvalidMerkleProof)?;
        if !Self::verify_proof(&env, &root, &purchaser, &proof) {
            return Err(Error::InvalidMerkleProof);
        }

        let limit = config::get_u32(&env, &key, ConfigParam::MaxInvocationsPerAddress)
            .unwrap_or(DEFAULT_MAX_INVOCATIONS_PER_ADDRESS);
        let count_key = DataKey::MintCount(key.clone(), purchaser.clone());
        let minted: u32 = env.storage().persistent().get(&count_key).unwrap_or(0);
        if limit != 0 && minted >= limit {
            return Err(Error::MintLimitReached);
        }

        let price = config::get_i128(&env, &key, ConfigParam::PricePerToken)
            .ok_or(Error::PriceNotConfigured)?;
        if max_amount < price {
            return Err(Error::InsufficientPayment);
        }

        env.storage().persistent().set(&count_key, &(minted + 1));

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

    // ── Allowlist verification ───────────────────────────────────────

    /// Leaf for one allowlisted address: `sha256(xdr(address))`.
    pub fn address_leaf(env: Env, address: Address) -> BytesN<32> {
        leaf_hash(&env, &address)
    }

    /// Stateless proof check, usable off-chain before submitting.
    pub fn verify_address(
        env: Env,
        project_id: u32,
        core: Address,
        address: Address,
        proof: Vec<BytesN<32>>,
    ) -> bool {
        let key = ProjectKey::new(core, project_id);
        match config::get_bytes32(&env, &key, ConfigParam::MerkleRoot) {
            Some(root) => Self::verify_proof(&env, &root, &address, &proof),
            None => false,
        }
    }

    fn verify_proof(env: &Env, root: &BytesN<32>, address: &Address, proof: &Vec<BytesN<32>>) -> bool {
        let mut node = leaf_hash(env, address);
        for sibling in proof.iter() {
            node = hash_pair(env, &node, &sibling);
        }
        node == *root
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn project_merkle_root(env: Env, project_id: u32, core: Address) -> Option<BytesN<32>> {
        config::get_bytes32(
            &env,
            &ProjectKey::new(core, project_id),
            ConfigParam::MerkleRoot,
        )
    }

    pub fn project_invocations_per_address(env: Env, project_id: u32, core: Address) -> u32 {
        config::get_u32(
            &env,
            &ProjectKey::new(core, project_id),
            ConfigParam::MaxInvocationsPerAddress,
        )
        .unwrap_or(DEFAULT_MAX_INVOCATIONS_PER_ADDRESS)
    }

    pub fn address_remaining_invocations(
        env: Env,
        project_id: u32,
        core: Address,
        address: Address,
    ) -> (bool, u32) {
        let key = ProjectKey::new(core, project_id);
        let limit = config::get_u32(&env, &key, ConfigParam::MaxInvocationsPerAddress)
            .unwrap_or(DEFAULT_MAX_INVOCATIONS_PER_ADDRESS);
        let minted: u32 = env
            .storage()
            .persistent()
            .get(&DataKey::MintCount(key, address))
            .unwrap_or(0);
        if limit == 0 {
            return (false, 0);
        }
        (true, limit.saturating_sub(minted))
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
        symbol_short!("Merkle")
    }
}

fn leaf_hash(env: &Env, address: &Address) -> BytesN<32> {
    env.crypto().sha256(&address.clone().to_xdr(env)).to_bytes()
}

/// Sorted-pair hash: smaller byte string first, so proofs carry no
/// left/right position bits.
fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let mut buf = Bytes::new(env);
    buf.append(&Bytes::from_slice(env, &lo.to_array()));
    buf.append(&Bytes::from_slice(env, &hi.to_array()));
    env.crypto().sha256(&buf).to_bytes()
}
