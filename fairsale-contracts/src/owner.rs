//! Owner role for the sale contract.
//!
//! A single owner address gates the privileged post-sale operations (fund
//! sweep, supply recovery) and the staking-pool authorization.
//!
//! # Storage Design
//!
//! Uses instance storage for the owner address. The address is written once by
//! `SaleInitializer::initialize` and afterwards only through `transfer`.

use crate::errors::SaleError;
use crate::events::emit_ownership_transferred;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// Storage key for the owner address
pub const OWNER_KEY: Symbol = symbol_short!("owner");

/// Owner storage and access checks
pub struct OwnerStorage;

impl OwnerStorage {
    /// Record the initial owner. Called once from initialization.
    pub(crate) fn set_initial(env: &Env, owner: &Address) {
        env.storage().instance().set(&OWNER_KEY, owner);
    }

    /// Get the current owner address
    ///
    /// # Returns
    /// * `Some(Address)` if the contract is initialized
    /// * `None` otherwise
    pub fn get_owner(env: &Env) -> Option<Address> {
        env.storage().instance().get(&OWNER_KEY)
    }

    /// Check if an address is the owner
    pub fn is_owner(env: &Env, address: &Address) -> bool {
        match Self::get_owner(env) {
            Some(owner) => owner == *address,
            None => false,
        }
    }

    /// Require that `caller` authorized this invocation and is the owner.
    ///
    /// # Errors
    /// * `NotOwner` if the caller is not the owner or no owner is set
    pub fn require_owner(env: &Env, caller: &Address) -> Result<(), SaleError> {
        caller.require_auth();
        if !Self::is_owner(env, caller) {
            return Err(SaleError::NotOwner);
        }
        Ok(())
    }

    /// Hand the owner role to `new_owner`.
    ///
    /// # Errors
    /// * `NotInitialized` if no owner is recorded yet
    /// * `InvalidAddress` if `new_owner` is the contract itself
    pub fn transfer(env: &Env, new_owner: &Address) -> Result<(), SaleError> {
        let current = Self::get_owner(env).ok_or(SaleError::NotInitialized)?;
        current.require_auth();

        if *new_owner == env.current_contract_address() {
            return Err(SaleError::InvalidAddress);
        }

        env.storage().instance().set(&OWNER_KEY, new_owner);
        emit_ownership_transferred(env, &current, new_owner);
        Ok(())
    }
}
