#![no_std]
#[cfg(test)]
#[macro_use]
extern crate std;

use soroban_sdk::{contract, contractimpl, Address, Env};

mod distributor;
mod errors;
mod events;
mod init;
mod owner;
mod schedule;
#[cfg(test)]
mod test_fixture;

pub use distributor::{PendingRelease, RequestState};
pub use errors::VestingError;
pub use init::{InitializationParams, VestingConfig};
pub use schedule::{ScheduleStep, MAX_PERIODS};

use distributor::{Distributor, VestingStorage};
use init::VestingInitializer;
use owner::OwnerStorage;

#[contract]
pub struct FairVestingContract;

#[contractimpl]
impl FairVestingContract {
    // ============================================================================
    // Setup and Ownership
    // ============================================================================

    /// Store the schedule and pull the vested supply from the owner (one-time setup)
    pub fn initialize(env: Env, params: InitializationParams) -> Result<(), VestingError> {
        VestingInitializer::initialize(&env, &params)
    }

    pub fn is_initialized(env: Env) -> bool {
        VestingInitializer::is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<VestingConfig, VestingError> {
        VestingInitializer::get_config(&env)
    }

    pub fn get_owner(env: Env) -> Option<Address> {
        OwnerStorage::get_owner(&env)
    }

    /// Transfer the owner role. Requires the current owner's authorization.
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), VestingError> {
        OwnerStorage::transfer(&env, &new_owner)
    }

    // ============================================================================
    // Scheduled Release
    // ============================================================================

    /// Owner: transfer everything unlocked by the schedule so far
    pub fn release(env: Env, owner: Address) -> Result<i128, VestingError> {
        Distributor::release(&env, &owner)
    }

    pub fn get_released(env: Env) -> i128 {
        VestingStorage::released(&env)
    }

    pub fn get_releasable(env: Env) -> Result<i128, VestingError> {
        let config = VestingInitializer::get_config(&env)?;
        Distributor::releasable(&env, &config)
    }

    /// Index of the current period, `None` before the start time
    pub fn get_current_period(env: Env) -> Result<Option<u32>, VestingError> {
        let config = VestingInitializer::get_config(&env)?;
        Ok(Distributor::current_period(&env, &config))
    }

    pub fn get_schedule_total(env: Env) -> Result<i128, VestingError> {
        let config = VestingInitializer::get_config(&env)?;
        schedule::schedule_total(&config.steps)
    }

    // ============================================================================
    // Unscheduled Release
    // ============================================================================

    /// Owner: ask for part of the unscheduled fund; returns when it can be claimed
    pub fn request_unscheduled(env: Env, owner: Address, amount: i128) -> Result<u64, VestingError> {
        Distributor::request_unscheduled(&env, &owner, amount)
    }

    /// Owner: collect the pending request once its delay has passed
    pub fn claim_unscheduled(env: Env, owner: Address) -> Result<i128, VestingError> {
        Distributor::claim_unscheduled(&env, &owner)
    }

    /// Owner: withdraw the pending request
    pub fn cancel_unscheduled(env: Env, owner: Address) -> Result<i128, VestingError> {
        Distributor::cancel_unscheduled(&env, &owner)
    }

    pub fn get_unscheduled_released(env: Env) -> i128 {
        VestingStorage::unscheduled_released(&env)
    }

    pub fn get_requestable(env: Env) -> Result<i128, VestingError> {
        let config = VestingInitializer::get_config(&env)?;
        Ok(Distributor::requestable(&env, &config))
    }

    pub fn get_request(env: Env) -> RequestState {
        VestingStorage::request(&env)
    }

    /// Time the pending request becomes claimable
    pub fn get_time_to_claim(env: Env) -> Option<u64> {
        match VestingStorage::request(&env) {
            RequestState::Idle => None,
            RequestState::Pending(pending) => Some(pending.ready_at),
        }
    }

    /// Amount of the pending request, zero when idle
    pub fn get_current_claim_amount(env: Env) -> i128 {
        match VestingStorage::request(&env) {
            RequestState::Idle => 0,
            RequestState::Pending(pending) => pending.amount,
        }
    }
}
