//! Storage-flag reentrancy lock.
//!
//! The host already serializes invocations and blocks contract reentrancy,
//! but value-moving entry points (settlement reclaims, auction refunds) hold
//! this lock anyway as defense in depth: a nested call observes the flag and
//! fails with [`Error::ReentrancyDetected`] instead of re-entering
//! accounting mid-flight.
//!
//! The flag lives in temporary storage; the holder must call [`release`]
//! before returning, including on error paths.

use soroban_sdk::{contracttype, Env};

use crate::errors::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LockKey {
    ReentrancyLock,
}

/// Take the lock, failing if it is already held within this invocation tree.
pub fn acquire(env: &Env) -> Result<(), Error> {
    if env.storage().temporary().has(&LockKey::ReentrancyLock) {
        return Err(Error::ReentrancyDetected);
    }
    env.storage()
        .temporary()
        .set(&LockKey::ReentrancyLock, &true);
    Ok(())
}

pub fn release(env: &Env) {
    env.storage().temporary().remove(&LockKey::ReentrancyLock);
}
