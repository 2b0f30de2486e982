use soroban_sdk::contracterror;

/// Custom error types for the vesting contract
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestingError {
    // Timing errors (1000-1099)
    VestingNotStarted = 1000,
    RequestNotReady = 1001,

    // Quantity errors (1100-1199)
    InvalidAmount = 1100,

    // Terminal-state errors (1200-1299)
    NothingToRelease = 1200,

    // Authorization errors (1300-1399)
    NotOwner = 1300,
    InvalidAddress = 1301,

    // Request errors (1400-1499)
    PendingRequest = 1400,
    NoPendingRequest = 1401,

    // Lifecycle errors (1500-1599)
    AlreadyInitialized = 1500,
    NotInitialized = 1501,
    InvalidConfig = 1502,

    // Arithmetic errors (1600-1699)
    ArithmeticOverflow = 1600,
}
