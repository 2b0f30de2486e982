use soroban_sdk::contracterror;

/// Custom error types for the sale contract
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SaleError {
    // Timing errors (1000-1099)
    SaleNotStarted = 1000,
    SaleEnded = 1001,
    SaleNotEnded = 1002,
    CooldownActive = 1003,

    // Quantity errors (1100-1199)
    InsufficientSupply = 1100,
    InsufficientBalance = 1101,
    InvalidAmount = 1102,
    InvalidDuration = 1103,

    // Terminal-state errors (1200-1299)
    AlreadyClaimed = 1200,
    EmptyBalance = 1201,
    NothingToWithdraw = 1202,
    SaleNotUndersubscribed = 1203,

    // Authorization errors (1300-1399)
    NotOwner = 1300,
    InvalidAddress = 1301,
    StakingPoolNotSet = 1302,
    OperationNotAllowed = 1303,

    // Lifecycle errors (1500-1599)
    AlreadyInitialized = 1500,
    NotInitialized = 1501,
    InvalidConfig = 1502,

    // Arithmetic errors (1600-1699)
    ArithmeticOverflow = 1600,
}
