//! One-time initialization of the sale contract.
//!
//! Stores the immutable [`SaleConfig`] and the owner. The configuration is never
//! rewritten afterwards: sale phase, prices and entitlements are all derived
//! from it together with the ledger totals.
//!
//! # Security Model
//!
//! - **One-time initialization**: a second call fails with `AlreadyInitialized`
//! - **Owner authorization**: the owner named in the parameters must sign
//! - **Validate before write**: nothing is stored unless every field is valid

use crate::errors::SaleError;
use crate::events::emit_sale_initialized;
use crate::owner::OwnerStorage;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Storage key for the sale configuration
const SALE_CONFIG_KEY: Symbol = symbol_short!("sale_cfg");

/// Largest decimal count accepted for either token.
pub const MAX_DECIMALS: u32 = 18;

/// Immutable sale configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Token being distributed
    pub sale_token: Address,
    /// Token accepted as deposit (the native asset contract in production)
    pub payment_token: Address,
    /// First second of the deposit window
    pub start_time: u64,
    /// First second after the deposit window
    pub end_time: u64,
    /// Fixed amount of `sale_token` to distribute
    pub total_distributable: i128,
    /// Total provided below which the floor price applies
    pub minimal_provide_threshold: i128,
    /// Decimals of `payment_token`; one whole unit anchors the lock curve
    pub payment_decimals: u32,
    /// Decimals of `sale_token`; one whole token anchors the quoted price
    pub token_decimals: u32,
}

impl SaleConfig {
    /// One whole unit of the payment token in its smallest denomination.
    pub fn payment_unit(&self) -> i128 {
        10i128.pow(self.payment_decimals)
    }

    /// One whole sale token in its smallest denomination.
    pub fn token_unit(&self) -> i128 {
        10i128.pow(self.token_decimals)
    }
}

/// Initialization parameters for the sale
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializationParams {
    pub owner: Address,
    pub sale_token: Address,
    pub payment_token: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub total_distributable: i128,
    pub minimal_provide_threshold: i128,
    pub payment_decimals: u32,
    pub token_decimals: u32,
}

/// Sale initialization and configuration access
pub struct SaleInitializer;

impl SaleInitializer {
    /// Initialize the sale.
    ///
    /// # Errors
    /// * `AlreadyInitialized` if a configuration is already stored
    /// * `InvalidConfig` if the window, amounts, decimals or tokens are inconsistent
    /// * `InvalidAddress` if the owner is the contract itself
    pub fn initialize(env: &Env, params: &InitializationParams) -> Result<(), SaleError> {
        params.owner.require_auth();

        if Self::is_initialized(env) {
            return Err(SaleError::AlreadyInitialized);
        }

        Self::validate_params(env, params)?;

        let config = SaleConfig {
            sale_token: params.sale_token.clone(),
            payment_token: params.payment_token.clone(),
            start_time: params.start_time,
            end_time: params.end_time,
            total_distributable: params.total_distributable,
            minimal_provide_threshold: params.minimal_provide_threshold,
            payment_decimals: params.payment_decimals,
            token_decimals: params.token_decimals,
        };

        env.storage().instance().set(&SALE_CONFIG_KEY, &config);
        OwnerStorage::set_initial(env, &params.owner);

        emit_sale_initialized(env, &params.owner, &config);
        Ok(())
    }

    fn validate_params(env: &Env, params: &InitializationParams) -> Result<(), SaleError> {
        if params.owner == env.current_contract_address() {
            return Err(SaleError::InvalidAddress);
        }
        if params.end_time <= params.start_time {
            return Err(SaleError::InvalidConfig);
        }
        if params.total_distributable <= 0 || params.minimal_provide_threshold <= 0 {
            return Err(SaleError::InvalidConfig);
        }
        if params.payment_decimals > MAX_DECIMALS || params.token_decimals > MAX_DECIMALS {
            return Err(SaleError::InvalidConfig);
        }
        if params.sale_token == params.payment_token {
            return Err(SaleError::InvalidConfig);
        }
        Ok(())
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&SALE_CONFIG_KEY)
    }

    /// Load the configuration or fail with `NotInitialized`.
    pub fn get_config(env: &Env) -> Result<SaleConfig, SaleError> {
        env.storage()
            .instance()
            .get(&SALE_CONFIG_KEY)
            .ok_or(SaleError::NotInitialized)
    }
}
