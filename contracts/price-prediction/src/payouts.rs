//! # Payouts
//!
//! Reward calculation for ended rounds, user claims and refunds, and the
//! treasury.
//!
//! A round's pot is split once, when the round ends: the treasury fee is
//! taken from the total, and the rest is shared among the winning side in
//! proportion to each bet. When close equals lock the round has no winner and
//! the whole pot goes to the treasury. An account holding both sides is paid
//! for its winning side only. Rounds the operator never managed to end
//! become refundable, both sides, once their close timestamp plus buffer has
//! passed.

use soroban_sdk::{Address, Env, Vec};

use crate::bets::BetUtils;
use crate::config::{ConfigManager, FEE_DENOMINATOR};
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::reentrancy_guard::ReentrancyGuard;
use crate::storage::Storage;
use crate::types::{BetInfo, Position, Round};

/// Result of splitting a round's pot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RewardSplit {
    pub reward_base_cal_amount: i128,
    pub reward_amount: i128,
    pub treasury_amount: i128,
}

pub struct PayoutManager;

impl PayoutManager {
    /// Fix the reward pool of an ended round and credit the treasury.
    pub fn calculate_rewards(env: &Env, epoch: u64, treasury_fee: u32) -> Result<RewardSplit, Error> {
        let mut round = Storage::get_round(env, epoch).ok_or(Error::RoundNotStarted)?;
        if round.rewards_calculated {
            return Err(Error::RewardsAlreadyCalculated);
        }

        let split = Self::split_rewards(&round, treasury_fee)?;
        round.reward_base_cal_amount = split.reward_base_cal_amount;
        round.reward_amount = split.reward_amount;
        round.rewards_calculated = true;
        Storage::set_round(env, &round);

        let treasury = Storage::get_treasury_amount(env)
            .checked_add(split.treasury_amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_treasury_amount(env, treasury);

        EventEmitter::emit_rewards_calculated(
            env,
            epoch,
            split.reward_base_cal_amount,
            split.reward_amount,
            split.treasury_amount,
        );
        Ok(split)
    }

    /// Split a closed round's total between winners and the treasury.
    pub fn split_rewards(round: &Round, treasury_fee: u32) -> Result<RewardSplit, Error> {
        let reward_base_cal_amount = match round.winning_position() {
            Some(Position::Bull) => round.bull_amount,
            Some(Position::Bear) => round.bear_amount,
            None => {
                return Ok(RewardSplit {
                    reward_base_cal_amount: 0,
                    reward_amount: 0,
                    treasury_amount: round.total_amount,
                })
            }
        };

        let treasury_amount = round
            .total_amount
            .checked_mul(treasury_fee as i128)
            .ok_or(Error::ArithmeticOverflow)?
            / FEE_DENOMINATOR;
        Ok(RewardSplit {
            reward_base_cal_amount,
            reward_amount: round.total_amount - treasury_amount,
            treasury_amount,
        })
    }

    /// Pay out every listed epoch to `sender`, as a reward or a refund.
    ///
    /// Returns the total transferred.
    ///
    /// # Errors
    ///
    /// - `Error::RoundNotStarted` - an epoch has no round
    /// - `Error::RoundNotEnded` - an epoch's close timestamp has not passed
    /// - `Error::NotEligibleForClaim` - the round ended and the bet lost,
    ///   was already claimed, or does not exist
    /// - `Error::NotEligibleForRefund` - the round was never ended and the
    ///   refund window has not opened, or the bet was already refunded
    pub fn claim(env: &Env, sender: &Address, epochs: &Vec<u64>) -> Result<i128, Error> {
        sender.require_auth();

        let config = ConfigManager::get_config(env)?;
        let now = env.ledger().timestamp();
        let mut total: i128 = 0;

        for epoch in epochs.iter() {
            let round = Storage::get_round(env, epoch).ok_or(Error::RoundNotStarted)?;
            if now <= round.close_timestamp {
                return Err(Error::RoundNotEnded);
            }

            let mut bet = Storage::get_bet(env, epoch, sender);
            let reward = if round.oracle_called {
                if !Self::is_claimable(&round, bet.as_ref()) {
                    return Err(Error::NotEligibleForClaim);
                }
                Self::bet_reward(&round, bet.as_ref())?
            } else {
                if !Self::is_refundable(&round, bet.as_ref(), now, config.buffer_seconds) {
                    return Err(Error::NotEligibleForRefund);
                }
                match bet.as_ref() {
                    Some(bet) => bet.total()?,
                    None => 0,
                }
            };

            if let Some(bet) = bet.as_mut() {
                bet.claimed = true;
                Storage::set_bet(env, epoch, sender, bet);
            }
            total = total.checked_add(reward).ok_or(Error::ArithmeticOverflow)?;
            EventEmitter::emit_claim(env, sender, epoch, reward);
        }

        if total > 0 {
            ReentrancyGuard::guarded(env, || BetUtils::unlock_funds(env, sender, total))?;
        }
        Ok(total)
    }

    fn bet_reward(round: &Round, bet: Option<&BetInfo>) -> Result<i128, Error> {
        let amount = match (bet, round.winning_position()) {
            (Some(bet), Some(winner)) => bet.amount_on(winner),
            _ => 0,
        };
        if round.reward_base_cal_amount == 0 {
            return Ok(0);
        }
        Ok(amount
            .checked_mul(round.reward_amount)
            .ok_or(Error::ArithmeticOverflow)?
            / round.reward_base_cal_amount)
    }

    /// Whether `user` won `epoch` and has not yet claimed.
    pub fn claimable(env: &Env, epoch: u64, user: &Address) -> bool {
        match Storage::get_round(env, epoch) {
            Some(round) => Self::is_claimable(&round, Storage::get_bet(env, epoch, user).as_ref()),
            None => false,
        }
    }

    /// Whether `user` can be refunded for `epoch`.
    pub fn refundable(env: &Env, epoch: u64, user: &Address) -> Result<bool, Error> {
        let config = ConfigManager::get_config(env)?;
        Ok(match Storage::get_round(env, epoch) {
            Some(round) => Self::is_refundable(
                &round,
                Storage::get_bet(env, epoch, user).as_ref(),
                env.ledger().timestamp(),
                config.buffer_seconds,
            ),
            None => false,
        })
    }

    pub fn is_claimable(round: &Round, bet: Option<&BetInfo>) -> bool {
        let bet = match bet {
            Some(bet) if !bet.claimed => bet,
            _ => return false,
        };
        if !round.oracle_called {
            return false;
        }
        match round.winning_position() {
            Some(winner) => bet.amount_on(winner) > 0,
            None => false,
        }
    }

    pub fn is_refundable(round: &Round, bet: Option<&BetInfo>, now: u64, buffer_seconds: u64) -> bool {
        match bet {
            Some(bet) if !bet.claimed && matches!(bet.total(), Ok(total) if total > 0) => {}
            _ => return false,
        }
        !round.oracle_called && now > round.close_timestamp.saturating_add(buffer_seconds)
    }

    /// Transfer the accumulated treasury to `admin`.
    pub fn claim_treasury(env: &Env, admin: &Address) -> Result<i128, Error> {
        let amount = Storage::get_treasury_amount(env);
        if amount <= 0 {
            return Err(Error::NothingToClaim);
        }
        Storage::set_treasury_amount(env, 0);
        ReentrancyGuard::guarded(env, || BetUtils::unlock_funds(env, admin, amount))?;
        EventEmitter::emit_treasury_claim(env, amount);
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_round(lock_price: i128, close_price: i128, bull: i128, bear: i128) -> Round {
        let mut round = Round::new(1, 1_000, 300).unwrap();
        round.lock_price = lock_price;
        round.close_price = close_price;
        round.bull_amount = bull;
        round.bear_amount = bear;
        round.total_amount = bull + bear;
        round.locked = true;
        round.oracle_called = true;
        round
    }

    fn bet(position: Position, amount: i128) -> BetInfo {
        let mut bet = BetInfo::default();
        bet.add(position, amount).unwrap();
        bet
    }

    #[test]
    fn test_bull_win_split() {
        let round = closed_round(100, 110, 30_000_000, 70_000_000);
        let split = PayoutManager::split_rewards(&round, 300).unwrap();
        assert_eq!(split.reward_base_cal_amount, 30_000_000);
        assert_eq!(split.treasury_amount, 3_000_000);
        assert_eq!(split.reward_amount, 97_000_000);
    }

    #[test]
    fn test_bear_win_split() {
        let round = closed_round(100, 90, 30_000_000, 70_000_000);
        let split = PayoutManager::split_rewards(&round, 1_000).unwrap();
        assert_eq!(split.reward_base_cal_amount, 70_000_000);
        assert_eq!(split.treasury_amount, 10_000_000);
        assert_eq!(split.reward_amount, 90_000_000);
    }

    #[test]
    fn test_tie_sends_pot_to_treasury() {
        let round = closed_round(100, 100, 30_000_000, 70_000_000);
        let split = PayoutManager::split_rewards(&round, 300).unwrap();
        assert_eq!(split.reward_base_cal_amount, 0);
        assert_eq!(split.reward_amount, 0);
        assert_eq!(split.treasury_amount, 100_000_000);
    }

    #[test]
    fn test_claimable_only_for_unclaimed_winner() {
        let round = closed_round(100, 110, 10, 10);
        assert!(PayoutManager::is_claimable(&round, Some(&bet(Position::Bull, 10))));
        assert!(!PayoutManager::is_claimable(&round, Some(&bet(Position::Bear, 10))));
        assert!(!PayoutManager::is_claimable(&round, None));

        let mut claimed = bet(Position::Bull, 10);
        claimed.claimed = true;
        assert!(!PayoutManager::is_claimable(&round, Some(&claimed)));

        let tie = closed_round(100, 100, 10, 10);
        assert!(!PayoutManager::is_claimable(&tie, Some(&bet(Position::Bull, 10))));
    }

    #[test]
    fn test_refundable_after_close_plus_buffer() {
        let mut round = closed_round(100, 0, 10, 0);
        round.oracle_called = false;
        let wager = bet(Position::Bull, 10);

        assert!(!PayoutManager::is_refundable(&round, Some(&wager), 1_630, 30));
        assert!(PayoutManager::is_refundable(&round, Some(&wager), 1_631, 30));

        round.oracle_called = true;
        assert!(!PayoutManager::is_refundable(&round, Some(&wager), 1_631, 30));
    }

    #[test]
    fn test_both_sides_claim_pays_winning_side_only() {
        let round = closed_round(100, 110, 40, 60);
        let mut hedged = bet(Position::Bull, 10);
        hedged.add(Position::Bear, 30).unwrap();
        assert!(PayoutManager::is_claimable(&round, Some(&hedged)));

        let split = PayoutManager::split_rewards(&round, 0).unwrap();
        let mut settled = round.clone();
        settled.reward_base_cal_amount = split.reward_base_cal_amount;
        settled.reward_amount = split.reward_amount;
        // 10 of 40 on the bull side, pot of 100
        assert_eq!(PayoutManager::bet_reward(&settled, Some(&hedged)), Ok(25));
    }

    #[test]
    fn test_refund_window_saturates() {
        let mut round = closed_round(100, 0, 10, 0);
        round.oracle_called = false;
        let wager = bet(Position::Bull, 10);
        assert!(!PayoutManager::is_refundable(&round, Some(&wager), u64::MAX, u64::MAX));
        assert!(!PayoutManager::is_refundable(&round, Some(&BetInfo::default()), 1_631, 30));
    }
}
