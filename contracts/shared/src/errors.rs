//! Platform-wide error codes.
//!
//! One enum for the whole suite so that cross-contract calls surface a stable
//! code regardless of which contract rejected. Grouped by the failure
//! taxonomy: authorization, configuration, payment, exhaustion, lifecycle.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Lifecycle
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // Authorization
    NotAuthorized = 10,
    UnregisteredCoreContract = 11,
    MinterNotApproved = 12,
    NoMinterAssigned = 13,
    OnlyAssignedMinter = 14,
    NoPendingTransfer = 15,
    RenounceNotConfirmed = 16,

    // Configuration
    PriceNotConfigured = 20,
    InvalidPriceOrder = 21,
    HalfLifeBelowFloor = 22,
    AuctionAlreadyStarted = 23,
    PurchasesExist = 24,
    OnlyFutureAuctions = 25,
    InvalidAuctionDuration = 26,
    InvalidMaxInvocations = 27,
    LengthMismatch = 28,
    ValueTypeMismatch = 29,

    // Payment
    InsufficientPayment = 40,

    // Exhaustion (runtime, not static misconfiguration)
    MaxInvocationsReached = 50,
    MintLimitReached = 51,

    // Project state
    ProjectNotActive = 60,
    ProjectPaused = 61,

    // Auctions
    AuctionNotStarted = 70,
    AuctionNotConfigured = 71,
    AuctionAlreadyEnded = 72,
    AuctionNotEnded = 73,
    AuctionAlreadySettled = 74,
    AuctionNotComplete = 75,
    BidTooLow = 76,
    TokenNotBeingAuctioned = 77,

    // Settlement
    RevenuesAlreadyCollected = 80,
    OnlyPriceReduction = 81,
    PriceBelowBase = 82,

    // Allowlists
    InvalidMerkleProof = 90,
    HolderNotAllowed = 91,

    // Defense in depth
    ReentrancyDetected = 100,
}
