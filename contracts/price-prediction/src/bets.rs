//! # Bet Ledger
//!
//! Records wagers against the current epoch. An account may bet several
//! times in the same epoch, on either side; amounts accumulate per side.
//!
//! ## Features
//!
//! - **Bet Placement**: `bet_up` / `bet_down` on the round currently open
//! - **Fund Locking**: the bet amount is transferred to the contract
//! - **Accumulation**: repeated bets add to the account's stake on that side
//! - **History**: paginated list of the epochs an account has bet in
//!
//! ## Security Considerations
//!
//! - User authentication via `require_auth()`
//! - Token transfers run under the reentrancy guard
//! - Round totals use checked arithmetic

use soroban_sdk::{token, Address, Env, Vec};

use crate::config::ConfigManager;
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::reentrancy_guard::ReentrancyGuard;
use crate::rounds::{RoundClock, RoundManager};
use crate::storage::Storage;
use crate::types::{BetInfo, Position, UserRoundsPage};

// ===== BET MANAGER =====

/// Coordinates bet placement and bet lookups.
///
/// # Example Usage
///
/// ```rust,ignore
/// // inside a contract call, with a round open for bets
/// let bet = BetManager::place_bet(&env, &user, Position::Bear, 10_000_000)?;
/// assert_eq!(bet.amount_on(Position::Bear), 10_000_000);
/// ```
pub struct BetManager;

impl BetManager {
    /// Place a bet on the current epoch, rolling over to a new epoch first
    /// if the open round has reached its lock timestamp.
    ///
    /// Returns the sender's accumulated bet for the epoch.
    ///
    /// # Errors
    ///
    /// - `Error::RoundNotBettable` - no round is open, or it is outside its
    ///   betting window
    /// - `Error::BetTooSmall` - amount below the configured minimum
    /// - `Error::ReentrancyGuardActive` - called from inside a transfer
    pub fn place_bet(
        env: &Env,
        sender: &Address,
        position: Position,
        amount: i128,
    ) -> Result<BetInfo, Error> {
        sender.require_auth();

        let config = ConfigManager::get_config(env)?;
        let epoch = RoundManager::roll_epoch(env, &config)?;
        let mut round = Storage::get_round(env, epoch).ok_or(Error::RoundNotBettable)?;
        if !RoundClock::is_bettable(&round, env.ledger().timestamp()) {
            return Err(Error::RoundNotBettable);
        }
        BetValidator::validate_bet_amount(amount, config.min_bet_amount)?;

        ReentrancyGuard::guarded(env, || BetUtils::lock_funds(env, sender, amount))?;

        round.total_amount = round
            .total_amount
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        match position {
            Position::Bull => {
                round.bull_amount = round
                    .bull_amount
                    .checked_add(amount)
                    .ok_or(Error::ArithmeticOverflow)?;
            }
            Position::Bear => {
                round.bear_amount = round
                    .bear_amount
                    .checked_add(amount)
                    .ok_or(Error::ArithmeticOverflow)?;
            }
        }
        Storage::set_round(env, &round);

        let existing = Storage::get_bet(env, epoch, sender);
        let first_in_epoch = existing.is_none();
        let mut bet = existing.unwrap_or_default();
        bet.add(position, amount)?;
        Storage::set_bet(env, epoch, sender, &bet);
        if first_in_epoch {
            Storage::push_user_round(env, sender, epoch);
        }

        EventEmitter::emit_bet(env, position, sender, epoch, amount);
        Ok(bet)
    }

    pub fn get_bet(env: &Env, epoch: u64, user: &Address) -> Option<BetInfo> {
        Storage::get_bet(env, epoch, user)
    }

    /// Page through the epochs `user` has bet in, oldest first.
    pub fn get_user_rounds(env: &Env, user: &Address, cursor: u32, size: u32) -> UserRoundsPage {
        let all = Storage::get_user_rounds(env, user);
        let total = all.len();
        let start = cursor.min(total);
        let end = start.saturating_add(size).min(total);

        let mut epochs = Vec::new(env);
        let mut bets = Vec::new(env);
        for i in start..end {
            if let Some(epoch) = all.get(i) {
                if let Some(bet) = Storage::get_bet(env, epoch, user) {
                    epochs.push_back(epoch);
                    bets.push_back(bet);
                }
            }
        }

        UserRoundsPage {
            epochs,
            bets,
            next_cursor: end,
        }
    }

    pub fn get_user_rounds_length(env: &Env, user: &Address) -> u32 {
        Storage::get_user_rounds(env, user).len()
    }
}

// ===== BET VALIDATOR =====

pub struct BetValidator;

impl BetValidator {
    pub fn validate_bet_amount(amount: i128, min_bet_amount: i128) -> Result<(), Error> {
        if amount < min_bet_amount {
            return Err(Error::BetTooSmall);
        }
        Ok(())
    }
}

// ===== BET UTILITIES =====

/// Token movements in and out of the contract.
pub struct BetUtils;

impl BetUtils {
    fn token_client(env: &Env) -> Result<token::Client<'_>, Error> {
        Ok(token::Client::new(env, &Storage::get_token(env)?))
    }

    /// Transfer `amount` from `user` to the contract.
    pub fn lock_funds(env: &Env, user: &Address, amount: i128) -> Result<(), Error> {
        Self::token_client(env)?.transfer(user, &env.current_contract_address(), &amount);
        Ok(())
    }

    /// Transfer `amount` from the contract to `user`.
    pub fn unlock_funds(env: &Env, user: &Address, amount: i128) -> Result<(), Error> {
        Self::token_client(env)?.transfer(&env.current_contract_address(), user, &amount);
        Ok(())
    }
}
