//! Typed per-project configuration store.
//!
//! The common substrate concrete minters layer their scalar parameters onto:
//! a closed enumeration of named parameters ([`ConfigParam`]) mapped to typed
//! values ([`ConfigValue`]), with single-value and set semantics. Semantics
//! of each parameter are owned by the minter that writes it.
//!
//! Every mutation publishes a typed change event so off-chain consumers can
//! reconstruct minter state without bespoke decoding per minter. The event
//! topic names the value kind; topics carry the project key, data carries the
//! parameter and value.
//!
//! The store writes into the **calling minter's own** contract storage —
//! two minters configuring the same project never collide.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol, Vec};

use crate::ttl::bump_persistent;
use crate::types::ProjectKey;

/// Closed set of named, minter-configurable project parameters.
///
/// Adding a parameter is a suite-wide (shared-crate) change on purpose: the
/// set of keys in play is always enumerable by off-chain consumers.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigParam {
    /// Fixed price per token, in the minter's currency (i128).
    PricePerToken,
    /// Merkle allowlist root (bytes32).
    MerkleRoot,
    /// Per-address mint ceiling for allowlisted minters (u32).
    MaxInvocationsPerAddress,
}

/// A typed configuration value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    U32(u32),
    U64(u64),
    I128(i128),
    Addr(Address),
    Bytes32(BytesN<32>),
}

impl ConfigValue {
    /// Event topic naming this value's kind.
    fn kind_topic(&self) -> Symbol {
        match self {
            ConfigValue::Bool(_) => symbol_short!("cfg_bool"),
            ConfigValue::U32(_) => symbol_short!("cfg_u32"),
            ConfigValue::U64(_) => symbol_short!("cfg_u64"),
            ConfigValue::I128(_) => symbol_short!("cfg_i128"),
            ConfigValue::Addr(_) => symbol_short!("cfg_addr"),
            ConfigValue::Bytes32(_) => symbol_short!("cfg_b32"),
        }
    }
}

/// Storage keys of the config store within the host minter's storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigKey {
    Param(ProjectKey, ConfigParam),
    ParamSet(ProjectKey, ConfigParam),
}

/// Event payload for a value set / added-to-set / removed-from-set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigValueChanged {
    pub param: ConfigParam,
    pub value: ConfigValue,
}

/// Event payload for a removed key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigKeyRemoved {
    pub param: ConfigParam,
}

fn publish_change(env: &Env, topic: Symbol, key: &ProjectKey, param: ConfigParam, value: &ConfigValue) {
    env.events().publish(
        (topic, key.core.clone(), key.project_id),
        ConfigValueChanged {
            param,
            value: value.clone(),
        },
    );
}

/// Set a single-valued parameter, overwriting any prior value.
pub fn set_value(env: &Env, key: &ProjectKey, param: ConfigParam, value: ConfigValue) {
    let skey = ConfigKey::Param(key.clone(), param);
    env.storage().persistent().set(&skey, &value);
    bump_persistent(env, &skey);
    publish_change(env, value.kind_topic(), key, param, &value);
}

/// Read back a single-valued parameter.
pub fn get_value(env: &Env, key: &ProjectKey, param: ConfigParam) -> Option<ConfigValue> {
    let skey = ConfigKey::Param(key.clone(), param);
    let value: Option<ConfigValue> = env.storage().persistent().get(&skey);
    if value.is_some() {
        bump_persistent(env, &skey);
    }
    value
}

/// Remove a single-valued parameter.
pub fn remove_value(env: &Env, key: &ProjectKey, param: ConfigParam) {
    let skey = ConfigKey::Param(key.clone(), param);
    env.storage().persistent().remove(&skey);
    env.events().publish(
        (symbol_short!("cfg_rm"), key.core.clone(), key.project_id),
        ConfigKeyRemoved { param },
    );
}

/// Add `value` to a set-valued parameter. Returns `false` if already present.
pub fn add_to_set(env: &Env, key: &ProjectKey, param: ConfigParam, value: ConfigValue) -> bool {
    let skey = ConfigKey::ParamSet(key.clone(), param);
    let mut set: Vec<ConfigValue> = env
        .storage()
        .persistent()
        .get(&skey)
        .unwrap_or_else(|| Vec::new(env));
    if set.contains(&value) {
        return false;
    }
    set.push_back(value.clone());
    env.storage().persistent().set(&skey, &set);
    bump_persistent(env, &skey);
    publish_change(env, symbol_short!("cfg_sadd"), key, param, &value);
    true
}

/// Remove `value` from a set-valued parameter. Returns `false` if absent.
pub fn remove_from_set(env: &Env, key: &ProjectKey, param: ConfigParam, value: ConfigValue) -> bool {
    let skey = ConfigKey::ParamSet(key.clone(), param);
    let mut set: Vec<ConfigValue> = env
        .storage()
        .persistent()
        .get(&skey)
        .unwrap_or_else(|| Vec::new(env));
    let index = match set.first_index_of(&value) {
        Some(i) => i,
        None => return false,
    };
    set.remove(index);
    env.storage().persistent().set(&skey, &set);
    bump_persistent(env, &skey);
    publish_change(env, symbol_short!("cfg_srm"), key, param, &value);
    true
}

/// Enumerate a set-valued parameter.
pub fn get_set(env: &Env, key: &ProjectKey, param: ConfigParam) -> Vec<ConfigValue> {
    let skey = ConfigKey::ParamSet(key.clone(), param);
    env.storage()
        .persistent()
        .get(&skey)
        .unwrap_or_else(|| Vec::new(env))
}

// ── Typed convenience getters ────────────────────────────────────────

pub fn get_i128(env: &Env, key: &ProjectKey, param: ConfigParam) -> Option<i128> {
    match get_value(env, key, param) {
        Some(ConfigValue::I128(v)) => Some(v),
        _ => None,
    }
}

pub fn get_u32(env: &Env, key: &ProjectKey, param: ConfigParam) -> Option<u32> {
    match get_value(env, key, param) {
        Some(ConfigValue::U32(v)) => Some(v),
        _ => None,
    }
}

pub fn get_bytes32(env: &Env, key: &ProjectKey, param: ConfigParam) -> Option<BytesN<32>> {
    match get_value(env, key, param) {
        Some(ConfigValue::Bytes32(v)) => Some(v),
        _ => None,
    }
}
