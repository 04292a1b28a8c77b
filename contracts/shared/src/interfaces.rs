//! Client traits for every contract the suite talks to.
//!
//! The core NFT contract, AdminACL and CoreRegistry are external
//! collaborators: the suite consumes them strictly through these call
//! contracts and never links their crates. The [`FilterInterface`] is how
//! concrete minters see the MinterFilter — minters gate their own admin
//! functions through `admin_acl_allowed`, making the filter the single
//! source of admin truth for the whole suite.

use soroban_sdk::{contractclient, Address, BytesN, Env, String, Symbol};

use crate::types::RevenueSplits;

/// Core NFT contract, as consumed by the MinterFilter and the minters.
#[contractclient(name = "CoreClient")]
pub trait CoreInterface {
    /// Mint the next token of `project_id` to `to`. Only callable by the
    /// core's registered minter contract (the MinterFilter). `sender` is the
    /// originating purchaser, forwarded for the core's own bookkeeping.
    fn mint(env: Env, to: Address, project_id: u32, sender: Address) -> u64;

    /// Authoritative invocation ceiling for a project.
    fn project_max_invocations(env: Env, project_id: u32) -> u32;

    /// Number of tokens minted so far for a project.
    fn project_invocations(env: Env, project_id: u32) -> u32;

    fn project_active(env: Env, project_id: u32) -> bool;

    fn project_paused(env: Env, project_id: u32) -> bool;

    fn project_artist(env: Env, project_id: u32) -> Address;

    /// How `price` splits between the platform and the artist.
    fn get_primary_revenue_splits(env: Env, project_id: u32, price: i128) -> RevenueSplits;

    fn owner_of(env: Env, token_id: u64) -> Address;

    /// Transfer a token held by `from`. `from` must authorize.
    fn transfer(env: Env, from: Address, to: Address, token_id: u64);

    /// Deterministic per-token hash seeding the generative script.
    fn token_hash(env: Env, token_id: u64) -> BytesN<32>;
}

/// Admin ACL authorization oracle.
#[contractclient(name = "AclClient")]
pub trait AclInterface {
    /// May `sender` invoke `selector` on `target`?
    fn allowed(env: Env, sender: Address, target: Address, selector: Symbol) -> bool;

    fn super_admin(env: Env) -> Address;
}

/// Registry of core contracts trusted by the platform.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn is_registered_contract(env: Env, core: Address) -> bool;
}

/// MinterFilter, as seen by a concrete minter.
#[contractclient(name = "FilterClient")]
pub trait FilterInterface {
    /// Proxy a mint through the filter. `minter` must be the calling minter
    /// contract, currently bound to (`project_id`, `core`) and still
    /// approved. Returns the newly minted token id.
    fn mint_joo(
        env: Env,
        minter: Address,
        to: Address,
        project_id: u32,
        core: Address,
        sender: Address,
    ) -> u64;

    fn get_minter_for_project(env: Env, project_id: u32, core: Address) -> Address;

    /// Delegated ACL check used by minters for their own admin functions.
    fn admin_acl_allowed(env: Env, sender: Address, target: Address, selector: Symbol) -> bool;
}

/// Dependency registry, consumed by the HTML/script generator only.
///
/// The generator itself ships separately; this is its fixed call contract.
/// Script chunks fetched from the core carry a [`crate::types::ScriptVersion`]
/// header that must be stripped before concatenation.
#[contractclient(name = "DependencyRegistryClient")]
pub trait DependencyRegistryInterface {
    fn get_dependency_script_count(env: Env, dependency: BytesN<32>) -> u32;

    fn get_dependency_script_address(
        env: Env,
        dependency: BytesN<32>,
        index: u32,
    ) -> Address;

    /// Returns `(preferred_cdn, script_count)` for a dependency.
    fn get_dependency_details(env: Env, dependency: BytesN<32>) -> (String, u32);
}
