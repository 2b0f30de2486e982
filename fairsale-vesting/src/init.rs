//! One-time initialization of the vesting contract.
//!
//! The owner signs, the configuration is validated and stored, and the whole
//! vested supply (`scheduled_total + unscheduled_cap`) moves from the owner
//! into contract custody in the same invocation.

use crate::errors::VestingError;
use crate::events::emit_vesting_initialized;
use crate::owner::OwnerStorage;
use crate::schedule::{self, ScheduleStep};
use soroban_sdk::{contracttype, symbol_short, token, Address, Env, Symbol, Vec};

const VESTING_CONFIG_KEY: Symbol = symbol_short!("vest_cfg");

/// Immutable vesting configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingConfig {
    /// Token held and released
    pub token: Address,
    /// Start of period 0
    pub start_time: u64,
    /// Length of one period in seconds
    pub period_secs: u64,
    /// Release table
    pub steps: Vec<ScheduleStep>,
    /// Fund reachable only through delayed requests
    pub unscheduled_cap: i128,
    /// Delay between a request and its claim
    pub request_delay_secs: u64,
}

impl VestingConfig {
    pub fn last_period(&self) -> u32 {
        schedule::period_count(&self.steps).saturating_sub(1)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializationParams {
    pub owner: Address,
    pub token: Address,
    pub start_time: u64,
    pub period_secs: u64,
    pub steps: Vec<ScheduleStep>,
    pub unscheduled_cap: i128,
    pub request_delay_secs: u64,
}

pub struct VestingInitializer;

impl VestingInitializer {
    /// Initialize the distributor and take custody of the vested supply.
    ///
    /// # Errors
    /// * `AlreadyInitialized` on a second call
    /// * `InvalidConfig` for an empty or malformed schedule, a zero period or a negative cap
    /// * `InvalidAddress` if the owner is the contract itself
    pub fn initialize(env: &Env, params: &InitializationParams) -> Result<(), VestingError> {
        params.owner.require_auth();

        if Self::is_initialized(env) {
            return Err(VestingError::AlreadyInitialized);
        }
        if params.owner == env.current_contract_address() {
            return Err(VestingError::InvalidAddress);
        }
        if params.period_secs == 0 || params.unscheduled_cap < 0 {
            return Err(VestingError::InvalidConfig);
        }
        schedule::validate(&params.steps)?;

        let scheduled_total = schedule::schedule_total(&params.steps)?;
        let custody = scheduled_total
            .checked_add(params.unscheduled_cap)
            .ok_or(VestingError::ArithmeticOverflow)?;

        let config = VestingConfig {
            token: params.token.clone(),
            start_time: params.start_time,
            period_secs: params.period_secs,
            steps: params.steps.clone(),
            unscheduled_cap: params.unscheduled_cap,
            request_delay_secs: params.request_delay_secs,
        };
        env.storage().instance().set(&VESTING_CONFIG_KEY, &config);
        OwnerStorage::set_initial(env, &params.owner);

        let contract = env.current_contract_address();
        token::Client::new(env, &params.token).transfer(&params.owner, &contract, &custody);

        emit_vesting_initialized(
            env,
            &params.owner,
            &params.token,
            params.start_time,
            scheduled_total,
            params.unscheduled_cap,
        );
        Ok(())
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&VESTING_CONFIG_KEY)
    }

    pub fn get_config(env: &Env) -> Result<VestingConfig, VestingError> {
        env.storage()
            .instance()
            .get(&VESTING_CONFIG_KEY)
            .ok_or(VestingError::NotInitialized)
    }
}
