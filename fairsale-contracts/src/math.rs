use crate::errors::SaleError;
use soroban_sdk::{Env, I256};

/// `floor(a * b / denominator)` for non-negative operands.
///
/// Uses plain `i128` when the product fits and falls back to the host's 256-bit
/// integer otherwise.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, SaleError> {
    if a < 0 || b < 0 || denominator <= 0 {
        return Err(SaleError::ArithmeticOverflow);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }

    let wide = I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator));
    wide.to_i128().ok_or(SaleError::ArithmeticOverflow)
}
