//! Cross-contract data types.
//!
//! ## ProjectKey
//!
//! One MinterFilter can service many core contracts, so per-project state is
//! always addressed by the composite [`ProjectKey`] — never by a bare project
//! id. Updating a project on one core contract must be unable to touch the
//! same project id on another.

use soroban_sdk::{contracttype, Address};

/// Composite identifier for a project across all serviced core contracts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectKey {
    /// Address of the core NFT contract hosting the project.
    pub core: Address,
    /// Project id within that core contract.
    pub project_id: u32,
}

impl ProjectKey {
    pub fn new(core: Address, project_id: u32) -> Self {
        ProjectKey { core, project_id }
    }
}

/// Primary-sale revenue split as reported by the core contract.
///
/// The core contract owns the split policy; minters only move the amounts.
/// `platform_amount + artist_amount` always equals the price passed to
/// `get_primary_revenue_splits`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevenueSplits {
    pub platform_address: Address,
    pub platform_amount: i128,
    pub artist_address: Address,
    pub artist_amount: i128,
}

/// Script storage format version on the core contract.
///
/// Determines the fixed header length to strip when reassembling a project
/// script from its bytecode-stored chunks (generator boundary only).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScriptVersion {
    /// Legacy storage writer; 104-byte header per chunk.
    V0,
    /// Current storage writer; 65-byte header per chunk.
    V1,
}

impl ScriptVersion {
    /// Byte offset of the script payload within a stored chunk.
    pub fn header_len(self) -> u32 {
        match self {
            ScriptVersion::V0 => 104,
            ScriptVersion::V1 => 65,
        }
    }
}
