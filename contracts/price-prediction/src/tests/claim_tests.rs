//! # Claim, Refund and Treasury Tests

use soroban_sdk::{symbol_short, testutils::Address as _, vec, Address, TryIntoVal};

use crate::errors::Error;
use crate::events::ClaimEvent;
use crate::tests::setup::{PredictionTestSetup, BUFFER, INITIAL_BALANCE};

const BET: i128 = 10_000_000;

/// Epoch 1 with alice on bull and bob on bear, locked at `lock_price` and
/// ended at `close_price`. The clock is left just past epoch 1's close.
fn settled_round(lock_price: i128, close_price: i128) -> PredictionTestSetup {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.bob, &(3 * BET));
    setup.genesis_lock(lock_price);
    setup.execute(close_price);
    setup.advance(1);
    setup
}

// ===== REWARDS =====

#[test]
fn test_winner_claims_pot_minus_fee() {
    let setup = settled_round(100, 120);
    let client = setup.client();

    assert!(client.claimable(&1, &setup.alice));
    assert!(!client.claimable(&1, &setup.bob));

    let paid = client.claim(&setup.alice, &vec![&setup.env, 1u64]);
    // 40M pot, 3% fee
    assert_eq!(paid, 38_800_000);

    let claims = setup.events_named(symbol_short!("Claim"));
    let event: ClaimEvent = claims.last().unwrap().1.try_into_val(&setup.env).unwrap();
    assert_eq!(event.sender, setup.alice);
    assert_eq!(event.epoch, 1);
    assert_eq!(event.amount, 38_800_000);

    assert_eq!(setup.balance(&setup.alice), INITIAL_BALANCE - BET + 38_800_000);
    assert_eq!(client.treasury_amount(), 1_200_000);
    assert!(client.get_bet(&1, &setup.alice).unwrap().claimed);
    assert!(!client.claimable(&1, &setup.alice));
}

#[test]
fn test_bear_winner_shares_in_proportion() {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_down(&setup.alice, &BET);
    client.bet_down(&setup.bob, &(3 * BET));
    client.bet_up(&setup.carol, &(4 * BET));
    setup.genesis_lock(100);
    setup.execute(90);
    setup.advance(1);

    // 80M pot, 2.4M fee, 77.6M shared over 40M of bear bets
    assert_eq!(client.claim(&setup.alice, &vec![&setup.env, 1u64]), 19_400_000);
    assert_eq!(client.claim(&setup.bob, &vec![&setup.env, 1u64]), 58_200_000);
    assert_eq!(
        client.try_claim(&setup.carol, &vec![&setup.env, 1u64]),
        Err(Ok(Error::NotEligibleForClaim))
    );
}

#[test]
fn test_loser_cannot_claim() {
    let setup = settled_round(100, 120);
    let result = setup.client().try_claim(&setup.bob, &vec![&setup.env, 1u64]);
    assert_eq!(result, Err(Ok(Error::NotEligibleForClaim)));
}

#[test]
fn test_claim_twice_rejected() {
    let setup = settled_round(100, 120);
    let client = setup.client();
    client.claim(&setup.alice, &vec![&setup.env, 1u64]);
    let result = client.try_claim(&setup.alice, &vec![&setup.env, 1u64]);
    assert_eq!(result, Err(Ok(Error::NotEligibleForClaim)));
}

#[test]
fn test_claim_without_bet_rejected() {
    let setup = settled_round(100, 120);
    let result = setup.client().try_claim(&setup.carol, &vec![&setup.env, 1u64]);
    assert_eq!(result, Err(Ok(Error::NotEligibleForClaim)));
}

#[test]
fn test_claim_before_round_ends_rejected() {
    let setup = PredictionTestSetup::new();
    let client = setup.client();
    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);

    let result = client.try_claim(&setup.alice, &vec![&setup.env, 1u64]);
    assert_eq!(result, Err(Ok(Error::RoundNotEnded)));
    assert_eq!(
        client.try_claim(&setup.alice, &vec![&setup.env, 7u64]),
        Err(Ok(Error::RoundNotStarted))
    );
}

#[test]
fn test_claim_several_epochs_at_once() {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.bob, &BET);
    setup.genesis_lock(100);
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.bob, &BET);
    setup.execute(110);
    setup.execute(120);
    setup.advance(1);

    let paid = client.claim(&setup.alice, &vec![&setup.env, 1u64, 2u64]);
    assert_eq!(paid, 2 * 19_400_000);
    assert_eq!(setup.balance(&setup.alice), INITIAL_BALANCE - 2 * BET + paid);
}

#[test]
fn test_account_on_both_sides_claims_winning_side() {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.alice, &(3 * BET));
    client.bet_down(&setup.bob, &BET);
    setup.genesis_lock(100);
    setup.execute(120);
    setup.advance(1);

    // 50M pot, 1.5M fee, alice holds the whole bull side
    assert!(client.claimable(&1, &setup.alice));
    let paid = client.claim(&setup.alice, &vec![&setup.env, 1u64]);
    assert_eq!(paid, 48_500_000);
    assert_eq!(setup.balance(&setup.alice), INITIAL_BALANCE - 4 * BET + paid);
    assert_eq!(
        client.try_claim(&setup.bob, &vec![&setup.env, 1u64]),
        Err(Ok(Error::NotEligibleForClaim))
    );
    assert!(!client.claimable(&1, &setup.alice));
}

// ===== TIES AND TREASURY =====

#[test]
fn test_tie_sends_pot_to_treasury() {
    let setup = settled_round(100, 100);
    let client = setup.client();

    let round = setup.round(1);
    assert_eq!(round.reward_base_cal_amount, 0);
    assert_eq!(round.reward_amount, 0);
    assert_eq!(client.treasury_amount(), 4 * BET);

    assert!(!client.claimable(&1, &setup.alice));
    assert!(!client.claimable(&1, &setup.bob));
    assert_eq!(
        client.try_claim(&setup.alice, &vec![&setup.env, 1u64]),
        Err(Ok(Error::NotEligibleForClaim))
    );

    assert_eq!(client.claim_treasury(&setup.admin), 4 * BET);
    assert_eq!(setup.balance(&setup.admin), 4 * BET);
    assert_eq!(client.treasury_amount(), 0);
}

#[test]
fn test_claim_treasury_empty_rejected() {
    let setup = PredictionTestSetup::new();
    let result = setup.client().try_claim_treasury(&setup.admin);
    assert_eq!(result, Err(Ok(Error::NothingToClaim)));
}

#[test]
fn test_claim_treasury_admin_only() {
    let setup = settled_round(100, 120);
    let stranger = Address::generate(&setup.env);
    let client = setup.client();
    assert_eq!(client.try_claim_treasury(&stranger), Err(Ok(Error::Unauthorized)));
    assert_eq!(client.try_claim_treasury(&setup.operator), Err(Ok(Error::Unauthorized)));
}

// ===== REFUNDS =====

/// Epoch 1 locked with bets on both sides, then the operator stops.
fn abandoned_round() -> PredictionTestSetup {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.bob, &(3 * BET));
    setup.genesis_lock(100);
    setup
}

#[test]
fn test_refund_after_close_plus_buffer() {
    let setup = abandoned_round();
    let client = setup.client();
    let close = setup.round(1).close_timestamp;

    setup.set_time(close + BUFFER);
    assert!(!client.refundable(&1, &setup.bob));
    assert_eq!(
        client.try_claim(&setup.bob, &vec![&setup.env, 1u64]),
        Err(Ok(Error::NotEligibleForRefund))
    );

    setup.set_time(close + BUFFER + 1);
    assert!(client.refundable(&1, &setup.bob));
    assert!(!client.claimable(&1, &setup.bob));
    assert_eq!(client.claim(&setup.bob, &vec![&setup.env, 1u64]), 3 * BET);
    assert_eq!(client.claim(&setup.alice, &vec![&setup.env, 1u64]), BET);

    assert_eq!(setup.balance(&setup.alice), INITIAL_BALANCE);
    assert_eq!(setup.balance(&setup.bob), INITIAL_BALANCE);
    assert!(!client.refundable(&1, &setup.bob));
    assert_eq!(client.treasury_amount(), 0);
}

#[test]
fn test_ended_round_is_not_refundable() {
    let setup = settled_round(100, 120);
    let client = setup.client();
    setup.advance(10 * BUFFER);
    assert!(!client.refundable(&1, &setup.bob));
    assert_eq!(
        client.try_claim(&setup.bob, &vec![&setup.env, 1u64]),
        Err(Ok(Error::NotEligibleForClaim))
    );
}

#[test]
fn test_refund_returns_both_sides() {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.alice, &(2 * BET));
    client.bet_down(&setup.bob, &BET);
    setup.genesis_lock(100);

    setup.set_time(setup.round(1).close_timestamp + BUFFER + 1);
    assert!(client.refundable(&1, &setup.alice));
    assert_eq!(client.claim(&setup.alice, &vec![&setup.env, 1u64]), 3 * BET);
    assert_eq!(setup.balance(&setup.alice), INITIAL_BALANCE);
    assert!(!client.refundable(&1, &setup.alice));
}

#[test]
fn test_rounds_open_at_pause_are_refunded_after_restart() {
    let setup = PredictionTestSetup::new();
    let client = setup.client();

    setup.genesis_start();
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &BET);
    client.bet_down(&setup.bob, &BET);
    setup.genesis_lock(100);
    setup.enter_betting_window();
    client.bet_up(&setup.alice, &(2 * BET));
    client.bet_down(&setup.bob, &(2 * BET));

    // epoch 1 is locked and epoch 2 open when the operator pauses
    client.pause(&setup.operator);
    client.unpause(&setup.admin);
    assert_eq!(setup.genesis_start(), 3);

    let close_two = setup.round(2).close_timestamp;
    setup.set_time(close_two + BUFFER);
    assert!(client.refundable(&1, &setup.alice));
    assert!(!client.refundable(&2, &setup.alice));

    setup.set_time(close_two + BUFFER + 1);
    assert!(client.refundable(&2, &setup.alice));
    let epochs = vec![&setup.env, 1u64, 2u64];
    assert_eq!(client.claim(&setup.alice, &epochs), 3 * BET);
    assert_eq!(client.claim(&setup.bob, &epochs), 3 * BET);
    assert_eq!(setup.balance(&setup.alice), INITIAL_BALANCE);
    assert_eq!(setup.balance(&setup.bob), INITIAL_BALANCE);
    assert_eq!(setup.balance(&setup.contract_id), 0);

    // the restarted sequence keeps counting epochs up
    client.bet_up(&setup.carol, &BET);
    assert_eq!(client.current_epoch(), 4);
    assert_eq!(client.get_bet(&4, &setup.carol).unwrap().bull_amount, BET);
}
