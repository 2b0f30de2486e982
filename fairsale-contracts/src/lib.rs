#![no_std]
#[cfg(test)]
#[macro_use]
extern crate std;

use soroban_sdk::{contract, contractimpl, Address, Env};

mod allocation;
mod curve;
mod errors;
mod events;
mod init;
mod ledger;
mod math;
mod owner;
mod phase;
mod reentrancy;
mod settlement;
mod staking;
#[cfg(test)]
mod test_fixture;
#[cfg(test)]
mod test_claim;

pub use errors::SaleError;
pub use init::{InitializationParams, SaleConfig};
pub use ledger::Participant;
pub use phase::{SalePhase, UNCLAIMED_COOLDOWN_SECS};
pub use staking::{StakingPool, StakingPoolClient, MIN_STAKE_LOCK_SECS};

use ledger::{DepositLedger, LedgerStorage};
use owner::OwnerStorage;
use settlement::Settlement;

#[contract]
pub struct FairSaleContract;

#[contractimpl]
impl FairSaleContract {
    // ============================================================================
    // Setup and Ownership
    // ============================================================================

    /// Initialize the sale with its immutable configuration (one-time setup)
    pub fn initialize(env: Env, params: InitializationParams) -> Result<(), SaleError> {
        init::SaleInitializer::initialize(&env, &params)
    }

    pub fn is_initialized(env: Env) -> bool {
        init::SaleInitializer::is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, SaleError> {
        init::SaleInitializer::get_config(&env)
    }

    pub fn get_owner(env: Env) -> Option<Address> {
        OwnerStorage::get_owner(&env)
    }

    /// Transfer the owner role. Requires the current owner's authorization.
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), SaleError> {
        OwnerStorage::transfer(&env, &new_owner)
    }

    /// Authorize the staking pool used by `claim_and_stake`. Owner only, before the sale ends.
    pub fn set_staking_pool(env: Env, owner: Address, pool: Address) -> Result<(), SaleError> {
        Settlement::set_staking_pool(&env, &owner, &pool)
    }

    pub fn get_staking_pool(env: Env) -> Option<Address> {
        Settlement::staking_pool(&env)
    }

    /// Current phase derived from the ledger timestamp
    pub fn get_phase(env: Env) -> Result<SalePhase, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        Ok(SalePhase::current(&env, &config))
    }

    // ============================================================================
    // Deposit Window
    // ============================================================================

    /// Deposit `amount` of the payment token during the sale window
    pub fn deposit(env: Env, participant: Address, amount: i128) -> Result<(), SaleError> {
        DepositLedger::deposit(&env, &participant, amount)
    }

    /// Withdraw part of the provided balance, bounded by the lock curve
    pub fn withdraw(env: Env, participant: Address, amount: i128) -> Result<(), SaleError> {
        DepositLedger::withdraw(&env, &participant, amount)
    }

    pub fn get_total_provided(env: Env) -> i128 {
        LedgerStorage::total_provided(&env)
    }

    pub fn get_participant_count(env: Env) -> u32 {
        LedgerStorage::participant_count(&env)
    }

    pub fn get_participant(env: Env, participant: Address) -> Option<Participant> {
        LedgerStorage::get(&env, &participant)
    }

    pub fn get_provided(env: Env, participant: Address) -> i128 {
        LedgerStorage::get_or_empty(&env, &participant).provided
    }

    pub fn get_accumulated(env: Env, participant: Address) -> i128 {
        LedgerStorage::get_or_empty(&env, &participant).accumulated
    }

    pub fn is_claimed(env: Env, participant: Address) -> bool {
        LedgerStorage::get_or_empty(&env, &participant).claimed
    }

    /// Curve value of the participant's accumulated deposit
    pub fn get_withdrawable_amount(env: Env, participant: Address) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        Ok(DepositLedger::withdrawable_now(&env, &config, &participant))
    }

    /// Largest amount `withdraw` accepts right now
    pub fn get_max_withdrawal(env: Env, participant: Address) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        Ok(DepositLedger::max_withdrawal(&env, &config, &participant))
    }

    pub fn get_locked_amount(env: Env, participant: Address) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        Ok(DepositLedger::locked_now(&env, &config, &participant))
    }

    /// Lock the participant would carry after depositing `extra` more
    pub fn get_locked_after_deposit(
        env: Env,
        participant: Address,
        extra: i128,
    ) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        DepositLedger::locked_after_deposit(&env, &config, &participant, extra)
    }

    pub fn get_accumulated_after_deposit(
        env: Env,
        participant: Address,
        extra: i128,
    ) -> Result<i128, SaleError> {
        DepositLedger::accumulated_after_deposit(&env, &participant, extra)
    }

    // ============================================================================
    // Allocation
    // ============================================================================

    /// Price of one whole sale token in the payment token's smallest unit
    pub fn get_token_price(env: Env) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        allocation::token_price(&env, &config, LedgerStorage::total_provided(&env))
    }

    /// Sale tokens the participant can still claim or stake at current totals
    pub fn get_estimated_tokens(env: Env, participant: Address) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        let record = LedgerStorage::get_or_empty(&env, &participant);
        Settlement::remaining_entitlement(&env, &config, &record)
    }

    /// Supply left unsold by the floor price at current totals
    pub fn get_unsold_supply(env: Env) -> Result<i128, SaleError> {
        let config = init::SaleInitializer::get_config(&env)?;
        allocation::unsold_supply(&env, &config, LedgerStorage::total_provided(&env))
    }

    // ============================================================================
    // Settlement
    // ============================================================================

    /// Claim the remaining entitlement once the sale has ended
    pub fn claim(env: Env, participant: Address) -> Result<i128, SaleError> {
        Settlement::claim(&env, &participant)
    }

    /// Send `amount` of the entitlement to the staking pool instead of the participant
    pub fn claim_and_stake(
        env: Env,
        participant: Address,
        amount: i128,
        lock_duration: u64,
    ) -> Result<(), SaleError> {
        Settlement::claim_and_stake(&env, &participant, amount, lock_duration)
    }

    /// Owner: collect the payment token raised by the sale
    pub fn sweep_sale_funds(env: Env, owner: Address) -> Result<i128, SaleError> {
        Settlement::sweep_sale_funds(&env, &owner)
    }

    /// Owner: take back supply left unsold below the threshold
    pub fn recover_unsold_supply(env: Env, owner: Address) -> Result<i128, SaleError> {
        Settlement::recover_unsold_supply(&env, &owner)
    }

    /// Owner: take back everything still held after the unclaimed cool-down
    pub fn recover_unclaimed_supply(env: Env, owner: Address) -> Result<i128, SaleError> {
        Settlement::recover_unclaimed_supply(&env, &owner)
    }
}
