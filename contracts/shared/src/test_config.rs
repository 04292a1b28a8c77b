extern crate std;

use soroban_sdk::{
    contract, symbol_short,
    testutils::{Address as _, Events},
    vec, Address, BytesN, Env, IntoVal, TryIntoVal,
};

use crate::config::{self, ConfigParam, ConfigValue, ConfigValueChanged};
use crate::types::ProjectKey;

#[contract]
struct Host;

fn setup() -> (Env, Address, ProjectKey) {
    let env = Env::default();
    let host = env.register(Host, ());
    let core = Address::generate(&env);
    let key = ProjectKey::new(core, 0);
    (env, host, key)
}

#[test]
fn set_then_get_round_trips_each_kind() {
    let (env, host, key) = setup();
    env.as_contract(&host, || {
        config::set_value(&env, &key, ConfigParam::PricePerToken, ConfigValue::I128(750));
        assert_eq!(
            config::get_i128(&env, &key, ConfigParam::PricePerToken),
            Some(750)
        );

        let root = BytesN::from_array(&env, &[7u8; 32]);
        config::set_value(
            &env,
            &key,
            ConfigParam::MerkleRoot,
            ConfigValue::Bytes32(root.clone()),
        );
        assert_eq!(
            config::get_bytes32(&env, &key, ConfigParam::MerkleRoot),
            Some(root)
        );

        config::set_value(
            &env,
            &key,
            ConfigParam::MaxInvocationsPerAddress,
            ConfigValue::U32(3),
        );
        assert_eq!(
            config::get_u32(&env, &key, ConfigParam::MaxInvocationsPerAddress),
            Some(3)
        );
    });
}

#[test]
fn typed_getter_rejects_wrong_kind() {
    let (env, host, key) = setup();
    env.as_contract(&host, || {
        config::set_value(&env, &key, ConfigParam::PricePerToken, ConfigValue::Bool(true));
        assert_eq!(config::get_i128(&env, &key, ConfigParam::PricePerToken), None);
    });
}

#[test]
fn remove_clears_the_value() {
    let (env, host, key) = setup();
    env.as_contract(&host, || {
        config::set_value(&env, &key, ConfigParam::PricePerToken, ConfigValue::I128(1));
        config::remove_value(&env, &key, ConfigParam::PricePerToken);
        assert_eq!(config::get_value(&env, &key, ConfigParam::PricePerToken), None);
    });
}

#[test]
fn set_semantics_deduplicate_and_remove() {
    let (env, host, key) = setup();
    let a = Address::generate(&env);
    env.as_contract(&host, || {
        let value = ConfigValue::Addr(a.clone());
        assert!(config::add_to_set(&env, &key, ConfigParam::MerkleRoot, value.clone()));
        assert!(!config::add_to_set(&env, &key, ConfigParam::MerkleRoot, value.clone()));
        assert_eq!(config::get_set(&env, &key, ConfigParam::MerkleRoot).len(), 1);
        assert!(config::remove_from_set(&env, &key, ConfigParam::MerkleRoot, value.clone()));
        assert!(!config::remove_from_set(&env, &key, ConfigParam::MerkleRoot, value));
        assert_eq!(config::get_set(&env, &key, ConfigParam::MerkleRoot).len(), 0);
    });
}

#[test]
fn value_writes_publish_typed_events() {
    let (env, host, key) = setup();
    env.as_contract(&host, || {
        config::set_value(&env, &key, ConfigParam::PricePerToken, ConfigValue::I128(42));
    });

    let last = env.events().all().last().expect("no events");
    assert_eq!(last.0, host);
    let expected_topics = vec![
        &env,
        symbol_short!("cfg_i128").into_val(&env),
        key.core.into_val(&env),
        key.project_id.into_val(&env),
    ];
    assert_eq!(last.1, expected_topics);
    let data: ConfigValueChanged = last.2.try_into_val(&env).unwrap();
    assert_eq!(data.param, ConfigParam::PricePerToken);
    assert_eq!(data.value, ConfigValue::I128(42));
}
