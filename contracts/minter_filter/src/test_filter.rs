extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::{MinterFilter, MinterFilterClient, ProjectMinterRegistered};
use admin_acl::{AdminAcl, AdminAclClient};
use core_registry::{CoreRegistry, CoreRegistryClient};
use mock_core::{MockCore, MockCoreClient};
use shared::errors::Error;

struct Fixture<'a> {
    env: Env,
    filter: MinterFilterClient<'a>,
    core: MockCoreClient<'a>,
    core_id: Address,
    super_admin: Address,
    artist: Address,
    project_id: u32,
}

fn setup() -> Fixture<'static> {
    let env = Env::default();
    env.mock_all_auths();

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

    let artist = Address::generate(&env);
    let project_id = core.add_project(&artist, &10);

    Fixture {
        env,
        filter,
        core,
        core_id,
        super_admin,
        artist,
        project_id,
    }
}

#[test]
fn set_minter_requires_registered_core() {
    let f = setup();
    let minter = Address::generate(&f.env);
    let unregistered_core = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter);
    assert_eq!(
        f.filter
            .try_set_minter_for_project(&f.super_admin, &f.project_id, &unregistered_core, &minter),
        Err(Ok(Error::UnregisteredCoreContract))
    );
}

#[test]
fn set_minter_requires_approved_minter() {
    let f = setup();
    let minter = Address::generate(&f.env);
    assert_eq!(
        f.filter
            .try_set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter),
        Err(Ok(Error::MinterNotApproved))
    );
}

#[test]
fn artist_may_self_serve_assignment_but_stranger_may_not() {
    let f = setup();
    let minter = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter);

    let stranger = Address::generate(&f.env);
    assert_eq!(
        f.filter
            .try_set_minter_for_project(&stranger, &f.project_id, &f.core_id, &minter),
        Err(Ok(Error::NotAuthorized))
    );

    f.filter
        .set_minter_for_project(&f.artist, &f.project_id, &f.core_id, &minter);
    assert_eq!(
        f.filter.get_minter_for_project(&f.project_id, &f.core_id),
        minter
    );
}

#[test]
fn assignment_emits_event_and_overwrites() {
    let f = setup();
    let minter_a = Address::generate(&f.env);
    let minter_b = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter_a);
    f.filter.approve_minter_globally(&f.super_admin, &minter_b);

    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter_a);

    let last = f.env.events().all().last().expect("no events");
    assert_eq!(last.0, f.filter.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("mnt_set").into_val(&f.env),
        f.core_id.clone().into_val(&f.env),
        f.project_id.into_val(&f.env),
    ];
    assert_eq!(last.1, expected_topics);
    let data: ProjectMinterRegistered = last.2.try_into_val(&f.env).unwrap();
    assert_eq!(data.minter, minter_a);

    // Overwrite: at most one minter per project at any time.
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter_b);
    assert_eq!(
        f.filter.get_minter_for_project(&f.project_id, &f.core_id),
        minter_b
    );

    // Re-setting the same minter is observably a no-op state-wise.
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter_b);
    assert_eq!(
        f.filter.get_minter_for_project(&f.project_id, &f.core_id),
        minter_b
    );
}

#[test]
fn mint_joo_happy_path_returns_token_id() {
    let f = setup();
    let minter = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter);
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter);

    let token_id = f
        .filter
        .mint_joo(&minter, &buyer, &f.project_id, &f.core_id, &buyer);
    assert_eq!(token_id, f.project_id as u64 * 1_000_000);
    assert_eq!(f.core.project_invocations(&f.project_id), 1);
    assert_eq!(f.core.owner_of(&token_id), buyer);
}

#[test]
fn mint_joo_rejects_unassigned_minter_even_if_approved() {
    let f = setup();
    let bound = Address::generate(&f.env);
    let other = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &bound);
    f.filter.approve_minter_globally(&f.super_admin, &other);
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &bound);

    assert_eq!(
        f.filter
            .try_mint_joo(&other, &buyer, &f.project_id, &f.core_id, &buyer),
        Err(Ok(Error::OnlyAssignedMinter))
    );
}

#[test]
fn mint_joo_rejects_when_no_minter_assigned() {
    let f = setup();
    let minter = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter);
    assert_eq!(
        f.filter
            .try_mint_joo(&minter, &buyer, &f.project_id, &f.core_id, &buyer),
        Err(Ok(Error::NoMinterAssigned))
    );
}

#[test]
fn revoking_approval_disables_bound_minter_without_unbinding() {
    let f = setup();
    let minter = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter);
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter);

    f.filter.revoke_minter_globally(&f.super_admin, &minter);

    // The binding survives the revocation...
    assert_eq!(
        f.filter.get_minter_for_project(&f.project_id, &f.core_id),
        minter
    );
    // ...but minting through it is rejected by the live approval check.
    assert_eq!(
        f.filter
            .try_mint_joo(&minter, &buyer, &f.project_id, &f.core_id, &buyer),
        Err(Ok(Error::MinterNotApproved))
    );
}

#[test]
fn per_contract_approval_works_and_is_scoped() {
    let f = setup();
    let minter = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    f.filter
        .approve_minter_for_contract(&f.super_admin, &f.core_id, &minter);
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter);
    let token_id = f
        .filter
        .mint_joo(&minter, &buyer, &f.project_id, &f.core_id, &buyer);
    assert_eq!(f.core.owner_of(&token_id), buyer);

    // Scoped: the same minter is not approved for a different core.
    let other_core = Address::generate(&f.env);
    assert!(!f.filter.is_approved_minter(&other_core, &minter));
}

#[test]
fn remove_minter_is_acl_gated_and_clears_binding() {
    let f = setup();
    let minter = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    f.filter.approve_minter_globally(&f.super_admin, &minter);
    f.filter
        .set_minter_for_project(&f.super_admin, &f.project_id, &f.core_id, &minter);

    // The artist carve-out applies to assignment only.
    assert_eq!(
        f.filter
            .try_remove_minter_for_project(&f.artist, &f.project_id, &f.core_id),
        Err(Ok(Error::NotAuthorized))
    );

    f.filter
        .remove_minter_for_project(&f.super_admin, &f.project_id, &f.core_id);
    assert_eq!(
        f.filter
            .try_mint_joo(&minter, &buyer, &f.project_id, &f.core_id, &buyer),
        Err(Ok(Error::NoMinterAssigned))
    );
}

#[test]
fn collaborator_rotation_is_acl_gated_and_atomic() {
    let f = setup();
    let stranger = Address::generate(&f.env);
    let new_registry = Address::generate(&f.env);
    assert_eq!(
        f.filter.try_update_core_registry(&stranger, &new_registry),
        Err(Ok(Error::NotAuthorized))
    );
    f.filter.update_core_registry(&f.super_admin, &new_registry);
    assert_eq!(f.filter.core_registry_contract(), new_registry);
}

#[test]
fn admin_acl_allowed_delegates_to_the_acl() {
    let f = setup();
    let stranger = Address::generate(&f.env);
    let target = Address::generate(&f.env);
    let selector = symbol_short!("whatever");
    assert!(f.filter.admin_acl_allowed(&f.super_admin, &target, &selector));
    assert!(!f.filter.admin_acl_allowed(&stranger, &target, &selector));
}
