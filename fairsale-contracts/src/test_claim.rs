use crate::test_fixture::*;
use crate::SaleError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

#[test]
fn test_claim_below_threshold_uses_floor_price() {
    let t = SaleTest::funded();
    t.open();
    let alice = t.depositor(units(12, 0));
    t.end();

    let paid = t.client.claim(&alice);

    assert_eq!(paid, 150_000 * ONE_TOKEN);
    assert_eq!(t.sale_token.balance(&alice), 150_000 * ONE_TOKEN);
    assert_eq!(
        t.sale_token.balance(&t.contract_id),
        TOTAL_DISTRIBUTABLE - 150_000 * ONE_TOKEN
    );
    assert!(t.client.is_claimed(&alice));
    assert_eq!(t.client.get_estimated_tokens(&alice), 0);
}

#[test]
fn test_single_participant_above_threshold_takes_everything() {
    let t = SaleTest::funded();
    t.open();
    let whale = t.depositor(units(7_000, 0));
    t.end();

    assert_eq!(t.client.claim(&whale), TOTAL_DISTRIBUTABLE);
    assert_eq!(t.sale_token.balance(&t.contract_id), 0);
}

#[test]
fn test_pro_rata_claims_never_exceed_supply() {
    let t = SaleTest::funded();
    t.open();
    let alice = t.depositor(units(3_000, 0));
    let bob = t.depositor(units(1_500, 0));
    t.end();

    let to_alice = t.client.claim(&alice);
    let to_bob = t.client.claim(&bob);

    assert_eq!(to_alice, 266_666_666_666_666);
    assert_eq!(to_bob, 133_333_333_333_333);
    assert!(to_alice + to_bob <= TOTAL_DISTRIBUTABLE);
    assert_eq!(t.sale_token.balance(&t.contract_id), 1);
}

#[test]
fn test_claim_uses_provided_not_accumulated() {
    let t = SaleTest::funded();
    t.open();
    let alice = t.depositor(units(20, 0));
    t.client.withdraw(&alice, &units(10, 0));
    t.end();

    // 10 units at the floor price of 0.00008
    assert_eq!(t.client.claim(&alice), 125_000 * ONE_TOKEN);
}

#[test]
fn test_claim_before_end_fails() {
    let t = SaleTest::funded();
    t.open();
    let alice = t.depositor(units(2, 0));

    assert_eq!(t.client.try_claim(&alice), Err(Ok(SaleError::SaleNotEnded)));

    t.set_time(END_TIME - 1);
    assert_eq!(t.client.try_claim(&alice), Err(Ok(SaleError::SaleNotEnded)));
    assert_eq!(t.sale_token.balance(&alice), 0);
}

#[test]
fn test_second_claim_fails() {
    let t = SaleTest::funded();
    t.open();
    let alice = t.depositor(units(2, 0));
    t.end();

    t.client.claim(&alice);
    assert_eq!(t.client.try_claim(&alice), Err(Ok(SaleError::AlreadyClaimed)));
    assert_eq!(t.sale_token.balance(&alice), 25_000 * ONE_TOKEN);
}

#[test]
fn test_claim_without_balance_fails() {
    let t = SaleTest::funded();
    t.open();
    let quitter = t.depositor(units(1, 0));
    t.client.withdraw(&quitter, &units(1, 0));
    t.end();

    let stranger = Address::generate(&t.env);
    assert_eq!(t.client.try_claim(&stranger), Err(Ok(SaleError::EmptyBalance)));
    assert_eq!(t.client.try_claim(&quitter), Err(Ok(SaleError::EmptyBalance)));
    assert!(!t.client.is_claimed(&quitter));
}

#[test]
fn test_owner_sweeps_raised_funds() {
    let t = SaleTest::funded();
    t.open();
    let alice = t.depositor(units(12, 0));
    t.depositor(units(8, 0));

    assert_eq!(
        t.client.try_sweep_sale_funds(&t.owner),
        Err(Ok(SaleError::SaleNotEnded))
    );

    t.end();
    assert_eq!(t.client.sweep_sale_funds(&t.owner), units(20, 0));
    assert_eq!(t.payment.balance(&t.owner), units(20, 0));
    assert_eq!(t.payment.balance(&t.contract_id), 0);

    assert_eq!(
        t.client.try_sweep_sale_funds(&t.owner),
        Err(Ok(SaleError::EmptyBalance))
    );

    // sweeping the payment token leaves the sale token untouched
    assert_eq!(t.client.claim(&alice), 150_000 * ONE_TOKEN);
}

#[test]
fn test_sweep_by_non_owner_fails() {
    let t = SaleTest::funded();
    t.open();
    t.depositor(units(2, 0));
    t.end();

    let mallory = Address::generate(&t.env);
    assert_eq!(
        t.client.try_sweep_sale_funds(&mallory),
        Err(Ok(SaleError::NotOwner))
    );
    assert_eq!(t.payment.balance(&t.contract_id), units(2, 0));
}
