//! # Mock core NFT contract
//!
//! The real core contract is an external collaborator; this double
//! implements its fixed call contract (`shared::interfaces::CoreInterface`)
//! so the suite's tests can run a whole platform inside one `Env`:
//! projects with artists, activity/pause flags, authoritative invocation
//! limits, token ids numbered `project_id * 1_000_000 + invocation`, simple
//! ownership transfer, and a fixed 10% platform / 90% artist primary split.
//!
//! Only the contract registered via [`MockCore::update_minter_contract`]
//! (the MinterFilter in every test) may mint.

#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env};
use soroban_sdk::xdr::ToXdr;

use shared::errors::Error;
use shared::max_invocations::ONE_MILLION;
use shared::types::RevenueSplits;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub artist: Address,
    pub max_invocations: u32,
    pub invocations: u32,
    pub active: bool,
    pub paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Platform revenue recipient (Instance).
    PlatformAddress,
    /// Contract allowed to mint, i.e. the MinterFilter (Instance).
    MinterContract,
    /// Auto-increment project counter (Instance).
    ProjectCount,
    /// Per-project record (Persistent).
    Project(u32),
    /// Token ownership (Persistent).
    Owner(u64),
}

#[contract]
pub struct MockCore;

#[contractimpl]
impl MockCore {
    pub fn init(env: Env, platform_address: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::PlatformAddress) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage()
            .instance()
            .set(&DataKey::PlatformAddress, &platform_address);
        env.storage().instance().set(&DataKey::ProjectCount, &0u32);
        Ok(())
    }

    pub fn update_minter_contract(env: Env, minter: Address) {
        env.storage().instance().set(&DataKey::MinterContract, &minter);
    }

    /// Add a project; new projects start active and unpaused.
    pub fn add_project(env: Env, artist: Address, max_invocations: u32) -> u32 {
        let id: u32 = env
            .storage()
            .instance()
            .get(&DataKey::ProjectCount)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::ProjectCount, &(id + 1));
        let project = Project {
            artist,
            max_invocations,
            invocations: 0,
            active: true,
            paused: false,
        };
        env.storage().persistent().set(&DataKey::Project(id), &project);
        id
    }

    pub fn update_project_active(env: Env, project_id: u32, active: bool) {
        let mut project = Self::project(&env, project_id);
        project.active = active;
        env.storage()
            .persistent()
            .set(&DataKey::Project(project_id), &project);
    }

    pub fn update_project_paused(env: Env, project_id: u32, paused: bool) {
        let mut project = Self::project(&env, project_id);
        project.paused = paused;
        env.storage()
            .persistent()
            .set(&DataKey::Project(project_id), &project);
    }

    pub fn update_max_invocations(env: Env, project_id: u32, max_invocations: u32) {
        let mut project = Self::project(&env, project_id);
        project.max_invocations = max_invocations;
        env.storage()
            .persistent()
            .set(&DataKey::Project(project_id), &project);
    }

    // ── CoreInterface ────────────────────────────────────────────────

    pub fn mint(env: Env, to: Address, project_id: u32, _sender: Address) -> Result<u64, Error> {
        let minter: Address = env
            .storage()
            .instance()
            .get(&DataKey::MinterContract)
            .ok_or(Error::NotInitialized)?;
        minter.require_auth();

        let mut project = Self::project(&env, project_id);
        if project.invocations >= project.max_invocations {
            return Err(Error::MaxInvocationsReached);
        }
        let token_id = project_id as u64 * ONE_MILLION + project.invocations as u64;
        project.invocations += 1;
        env.storage()
            .persistent()
            .set(&DataKey::Project(project_id), &project);
        env.storage().persistent().set(&DataKey::Owner(token_id), &to);
        Ok(token_id)
    }

    pub fn project_max_invocations(env: Env, project_id: u32) -> u32 {
        Self::project(&env, project_id).max_invocations
    }

    pub fn project_invocations(env: Env, project_id: u32) -> u32 {
        Self::project(&env, project_id).invocations
    }

    pub fn project_active(env: Env, project_id: u32) -> bool {
        Self::project(&env, project_id).active
    }

    pub fn project_paused(env: Env, project_id: u32) -> bool {
        Self::project(&env, project_id).paused
    }

    pub fn project_artist(env: Env, project_id: u32) -> Address {
        Self::project(&env, project_id).artist
    }

    pub fn get_primary_revenue_splits(env: Env, project_id: u32, price: i128) -> RevenueSplits {
        let platform: Address = env
            .storage()
            .instance()
            .get(&DataKey::PlatformAddress)
            .expect("not initialized");
        let platform_amount = price / 10;
        RevenueSplits {
            platform_address: platform,
            platform_amount,
            artist_address: Self::project(&env, project_id).artist,
            artist_amount: price - platform_amount,
        }
    }

    pub fn owner_of(env: Env, token_id: u64) -> Address {
        env.storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .expect("unknown token")
    }

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) {
        from.require_auth();
        let owner: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .expect("unknown token");
        if owner != from {
            panic!("transfer from non-owner");
        }
        env.storage().persistent().set(&DataKey::Owner(token_id), &to);
    }

    pub fn token_hash(env: Env, token_id: u64) -> BytesN<32> {
        let bytes = token_id.to_xdr(&env);
        env.crypto().sha256(&bytes).to_bytes()
    }

    fn project(env: &Env, project_id: u32) -> Project {
        env.storage()
            .persistent()
            .get(&DataKey::Project(project_id))
            .expect("unknown project")
    }
}
