#![cfg(test)]
//! Shared setup for sale tests: contract, both tokens, a mock staking pool and
//! timeline helpers. Amounts use 7 decimals for both tokens.

use crate::{FairSaleContract, FairSaleContractClient, InitializationParams};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

pub const UNIT: i128 = 10_000_000;
pub const ONE_TOKEN: i128 = 10_000_000;
pub const ONE_DAY: u64 = 24 * 60 * 60;
pub const START_TIME: u64 = 1_638_752_400;
pub const END_TIME: u64 = START_TIME + ONE_DAY * 3;
pub const TOTAL_DISTRIBUTABLE: i128 = 40_000_000 * ONE_TOKEN;
pub const MINIMAL_PROVIDE: i128 = 3_200 * UNIT;

/// `whole + frac / 10^7` in the smallest unit.
pub fn units(whole: i128, frac_e7: i128) -> i128 {
    whole * UNIT + frac_e7
}

const STAKED_KEY: Symbol = symbol_short!("staked");
const LAST_LOCK_KEY: Symbol = symbol_short!("last_lock");

/// Records what the sale forwards to it.
#[contract]
pub struct MockStakingPool;

#[contractimpl]
impl MockStakingPool {
    pub fn deposit_for(env: Env, participant: Address, amount: i128, lock_duration: u64) {
        let key = (STAKED_KEY, participant);
        let previous: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(previous + amount));
        env.storage().instance().set(&LAST_LOCK_KEY, &lock_duration);
    }

    pub fn staked_of(env: Env, participant: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(STAKED_KEY, participant))
            .unwrap_or(0)
    }

    pub fn last_lock(env: Env) -> u64 {
        env.storage().instance().get(&LAST_LOCK_KEY).unwrap_or(0)
    }
}

/// Refuses every deposit.
#[contract]
pub struct RejectingStakingPool;

#[contractimpl]
impl RejectingStakingPool {
    pub fn deposit_for(_env: Env, _participant: Address, _amount: i128, _lock_duration: u64) {
        panic!("staking closed");
    }
}

pub struct SaleTest {
    pub env: Env,
    pub client: FairSaleContractClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
    pub sale_token: token::Client<'static>,
    pub sale_sac: token::StellarAssetClient<'static>,
    pub payment: token::Client<'static>,
    pub payment_sac: token::StellarAssetClient<'static>,
}

impl SaleTest {
    /// Initialized sale, clock one day before the window, no supply funded.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START_TIME - ONE_DAY);

        let contract_id = env.register(FairSaleContract, ());
        let client = FairSaleContractClient::new(&env, &contract_id);
        let owner = Address::generate(&env);

        let sale_admin = Address::generate(&env);
        let sale_token_id = env
            .register_stellar_asset_contract_v2(sale_admin)
            .address();
        let payment_admin = Address::generate(&env);
        let payment_id = env
            .register_stellar_asset_contract_v2(payment_admin)
            .address();

        client.initialize(&InitializationParams {
            owner: owner.clone(),
            sale_token: sale_token_id.clone(),
            payment_token: payment_id.clone(),
            start_time: START_TIME,
            end_time: END_TIME,
            total_distributable: TOTAL_DISTRIBUTABLE,
            minimal_provide_threshold: MINIMAL_PROVIDE,
            payment_decimals: 7,
            token_decimals: 7,
        });

        SaleTest {
            sale_token: token::Client::new(&env, &sale_token_id),
            sale_sac: token::StellarAssetClient::new(&env, &sale_token_id),
            payment: token::Client::new(&env, &payment_id),
            payment_sac: token::StellarAssetClient::new(&env, &payment_id),
            env,
            client,
            contract_id,
            owner,
        }
    }

    /// Sale with the full supply already in custody.
    pub fn funded() -> Self {
        let t = Self::new();
        t.fund_supply();
        t
    }

    pub fn fund_supply(&self) {
        self.sale_sac.mint(&self.contract_id, &TOTAL_DISTRIBUTABLE);
    }

    /// Fresh participant holding `balance` of the payment token.
    pub fn participant(&self, balance: i128) -> Address {
        let participant = Address::generate(&self.env);
        self.payment_sac.mint(&participant, &balance);
        participant
    }

    /// Participant who deposits `amount` right away (clock must be in the window).
    pub fn depositor(&self, amount: i128) -> Address {
        let participant = self.participant(amount);
        self.client.deposit(&participant, &amount);
        participant
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    pub fn open(&self) {
        self.set_time(START_TIME);
    }

    pub fn end(&self) {
        self.set_time(END_TIME);
    }

    pub fn register_pool(&self) -> (Address, MockStakingPoolClient<'static>) {
        let pool_id = self.env.register(MockStakingPool, ());
        let pool = MockStakingPoolClient::new(&self.env, &pool_id);
        (pool_id, pool)
    }
}
