//! Owner of the vested supply.
//!
//! The owner is the only recipient of scheduled and unscheduled releases and
//! the only caller allowed to trigger them. Stored in instance storage, written
//! at initialization and afterwards only through `transfer`.

use crate::errors::VestingError;
use crate::events::emit_ownership_transferred;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub const OWNER_KEY: Symbol = symbol_short!("owner");

pub struct OwnerStorage;

impl OwnerStorage {
    pub(crate) fn set_initial(env: &Env, owner: &Address) {
        env.storage().instance().set(&OWNER_KEY, owner);
    }

    pub fn get_owner(env: &Env) -> Option<Address> {
        env.storage().instance().get(&OWNER_KEY)
    }

    /// Require that `caller` authorized this invocation and is the owner.
    ///
    /// # Errors
    /// * `NotOwner` if the caller is not the owner or no owner is set
    pub fn require_owner(env: &Env, caller: &Address) -> Result<(), VestingError> {
        caller.require_auth();
        match Self::get_owner(env) {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(VestingError::NotOwner),
        }
    }

    /// Hand the owner role, and with it every future release, to `new_owner`.
    ///
    /// # Errors
    /// * `NotInitialized` if no owner is recorded yet
    /// * `InvalidAddress` if `new_owner` is the contract itself
    pub fn transfer(env: &Env, new_owner: &Address) -> Result<(), VestingError> {
        let current = Self::get_owner(env).ok_or(VestingError::NotInitialized)?;
        current.require_auth();

        if *new_owner == env.current_contract_address() {
            return Err(VestingError::InvalidAddress);
        }

        env.storage().instance().set(&OWNER_KEY, new_owner);
        emit_ownership_transferred(env, &current, new_owner);
        Ok(())
    }
}
