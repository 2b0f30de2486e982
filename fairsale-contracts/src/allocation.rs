//! Price and entitlement from final ledger totals.
//!
//! The denominator is `max(total_provided, minimal_provide_threshold)`. Above
//! the threshold the whole supply is sold pro rata. Below it the floor price
//! caps the tokens sold, and the difference stays recoverable by the owner.
//!
//! Each entitlement is floored, so the entitlements of all participants sum to
//! at most the amount sold, which is at most `total_distributable`.

use crate::errors::SaleError;
use crate::init::SaleConfig;
use crate::math::mul_div_floor;
use soroban_sdk::Env;

/// Native amount the supply is priced against.
pub fn denominator(config: &SaleConfig, total_provided: i128) -> i128 {
    total_provided.max(config.minimal_provide_threshold)
}

/// Price of one whole sale token in the payment token's smallest unit.
pub fn token_price(env: &Env, config: &SaleConfig, total_provided: i128) -> Result<i128, SaleError> {
    mul_div_floor(
        env,
        denominator(config, total_provided),
        config.token_unit(),
        config.total_distributable,
    )
}

/// Sale tokens owed for a `provided` amount.
pub fn entitlement(
    env: &Env,
    config: &SaleConfig,
    total_provided: i128,
    provided: i128,
) -> Result<i128, SaleError> {
    if provided <= 0 {
        return Ok(0);
    }
    mul_div_floor(
        env,
        provided,
        config.total_distributable,
        denominator(config, total_provided),
    )
}

/// Sale tokens sold across all participants.
pub fn total_sold(env: &Env, config: &SaleConfig, total_provided: i128) -> Result<i128, SaleError> {
    entitlement(env, config, total_provided, total_provided)
}

/// Part of the supply nobody bought; zero once the threshold is met.
pub fn unsold_supply(env: &Env, config: &SaleConfig, total_provided: i128) -> Result<i128, SaleError> {
    Ok(config.total_distributable - total_sold(env, config, total_provided)?)
}
