#![cfg(test)]
//! Shared setup for vesting tests, sized like a 1B-token supply with 7 decimals.

use crate::{FairVestingContract, FairVestingContractClient, InitializationParams, ScheduleStep};
use soroban_sdk::testutils::{Address as _, Events, Ledger};
use soroban_sdk::xdr::{ContractEventBody, ScVal};
use soroban_sdk::{token, vec, Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

pub const ONE_TOKEN: i128 = 10_000_000;
pub const ONE_DAY: u64 = 24 * 60 * 60;
/// 30.5 days
pub const PERIOD_SECS: u64 = 2_635_200;
pub const START_TIME: u64 = 1_640_000_000;
pub const REQUEST_DELAY_SECS: u64 = 3 * ONE_DAY;
pub const MAX_SUPPLY: i128 = 1_000_000_000 * ONE_TOKEN;
pub const SCHEDULED_TOTAL: i128 = 696_000_000 * ONE_TOKEN;
pub const UNSCHEDULED_CAP: i128 = 304_000_000 * ONE_TOKEN;

/// `(whole tokens per period, periods)` for the standard release table.
const STANDARD_STEPS: [(i128, u32); 10] = [
    (55_000_000, 1),
    (7_727_273, 2),
    (7_977_273, 9),
    (250_000, 3),
    (0, 1),
    (19_472_222, 14),
    (25_305_556, 4),
    (16_250_000, 6),
    (5_833_333, 13),
    (5_833_336, 1),
];

pub fn standard_steps(env: &Env) -> Vec<ScheduleStep> {
    let mut steps = vec![env];
    for (amount, months) in STANDARD_STEPS {
        steps.push_back(ScheduleStep {
            amount: amount * ONE_TOKEN,
            months,
        });
    }
    steps
}

/// Expected `(released this period, released in total)` for every period, in whole tokens.
pub fn standard_table() -> std::vec::Vec<(i128, i128)> {
    let mut rows = std::vec::Vec::new();
    let mut total = 0;
    for (amount, months) in STANDARD_STEPS {
        for _ in 0..months {
            total += amount;
            rows.push((amount, total));
        }
    }
    rows
}

pub struct VestingTest {
    pub env: Env,
    pub client: FairVestingContractClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
    pub token: token::Client<'static>,
    pub token_sac: token::StellarAssetClient<'static>,
}

impl VestingTest {
    /// Uninitialized contract; the owner holds the full supply.
    pub fn deploy() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START_TIME);

        let contract_id = env.register(FairVestingContract, ());
        let client = FairVestingContractClient::new(&env, &contract_id);
        let owner = Address::generate(&env);

        let issuer = Address::generate(&env);
        let token_id = env.register_stellar_asset_contract_v2(issuer).address();
        let token_sac = token::StellarAssetClient::new(&env, &token_id);
        token_sac.mint(&owner, &MAX_SUPPLY);

        VestingTest {
            token: token::Client::new(&env, &token_id),
            token_sac,
            env,
            client,
            contract_id,
            owner,
        }
    }

    pub fn params(&self) -> InitializationParams {
        InitializationParams {
            owner: self.owner.clone(),
            token: self.token.address.clone(),
            start_time: START_TIME,
            period_secs: PERIOD_SECS,
            steps: standard_steps(&self.env),
            unscheduled_cap: UNSCHEDULED_CAP,
            request_delay_secs: REQUEST_DELAY_SECS,
        }
    }

    /// Initialized with the standard table, clock at `START_TIME`.
    pub fn new() -> Self {
        let t = Self::deploy();
        t.client.initialize(&t.params());
        t
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// A moment inside `period`.
    pub fn enter_period(&self, period: u32) {
        self.set_time(START_TIME + period as u64 * PERIOD_SECS + 100);
    }
}

/// Payload of the most recent event published under `topic`.
///
/// Only the events of the last contract invocation are visible, so call this
/// right after the operation that emits.
pub fn latest_event_payload<T>(env: &Env, topic: Symbol) -> T
where
    T: TryFromVal<Env, Val>,
{
    let topic_val: Val = topic.into_val(env);
    let wanted = ScVal::try_from_val(env, &topic_val).expect("topic should convert");
    let all = env.events().all();

    for event in all.events().iter().rev() {
        let ContractEventBody::V0(body) = &event.body;
        if body.topics.first() == Some(&wanted) {
            let data = Val::try_from_val(env, &body.data).expect("payload should convert");
            return T::try_from_val(env, &data)
                .unwrap_or_else(|_| panic!("event payload for {:?} has another shape", topic));
        }
    }

    panic!("expected event topic not found: {:?}", topic);
}
