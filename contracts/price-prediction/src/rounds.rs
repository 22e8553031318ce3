//! # Round Controller
//!
//! Drives the epoch state machine. Rounds follow each other on a fixed
//! cadence: each one starts when the previous one reaches its lock
//! timestamp, locks one interval later and closes one interval after that.
//! The epoch rolls over lazily, on the first bet or operator call after the
//! open round's lock timestamp, so bets keep landing in a fresh epoch even
//! if the operator is late. The operator supplies the prices:
//! `execute_round` locks the round whose lock timestamp has come and ends
//! the one before it.
//!
//! ## Genesis Sequence
//!
//! ```text
//! genesis_start_round   epoch 1 starts
//! genesis_lock_round    epoch 2 opens, epoch 1 locks
//! execute_round         epoch 3 opens, epoch 2 locks, epoch 1 ends
//! execute_round         epoch 4 opens, epoch 3 locks, epoch 2 ends
//! ...
//! ```
//!
//! ## Timing Windows
//!
//! The operator has `buffer_seconds` after a round's lock (or close)
//! timestamp to lock (or end) it. Missing a window stalls price settlement;
//! affected rounds become refundable, and the recovery is `pause` followed
//! by `unpause` and a fresh genesis.

use soroban_sdk::{log, Env};

use crate::config::{ConfigManager, PredictionConfig};
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::oracles::OracleManager;
use crate::payouts::PayoutManager;
use crate::storage::Storage;
use crate::types::{GenesisState, OraclePrice, Round};

// ===== ROUND CLOCK =====

/// Timing rules gating bets, locks, ends and epoch rollover.
pub struct RoundClock;

impl RoundClock {
    /// A round accepts bets strictly between its start and lock timestamps.
    pub fn is_bettable(round: &Round, now: u64) -> bool {
        round.start_timestamp != 0
            && round.lock_timestamp != 0
            && now > round.start_timestamp
            && now < round.lock_timestamp
    }

    pub fn check_lock_window(round: &Round, now: u64, buffer_seconds: u64) -> Result<(), Error> {
        if now < round.lock_timestamp {
            return Err(Error::LockTooEarly);
        }
        let deadline = round
            .lock_timestamp
            .checked_add(buffer_seconds)
            .ok_or(Error::ArithmeticOverflow)?;
        if now > deadline {
            return Err(Error::LockWindowExpired);
        }
        Ok(())
    }

    pub fn check_end_window(round: &Round, now: u64, buffer_seconds: u64) -> Result<(), Error> {
        if !round.locked {
            return Err(Error::RoundNotLocked);
        }
        if now < round.close_timestamp {
            return Err(Error::EndTooEarly);
        }
        let deadline = round
            .close_timestamp
            .checked_add(buffer_seconds)
            .ok_or(Error::ArithmeticOverflow)?;
        if now > deadline {
            return Err(Error::EndWindowExpired);
        }
        Ok(())
    }

    /// Start timestamp of the round that follows `round`, once `round` has
    /// reached its lock timestamp.
    ///
    /// Rounds follow each other on the interval cadence. When whole
    /// intervals went by without any activity, the next round starts at the
    /// latest slot that has begun, so it is open for bets right away.
    pub fn rollover_start(round: &Round, now: u64, interval_seconds: u64) -> Result<Option<u64>, Error> {
        if now < round.lock_timestamp || interval_seconds == 0 {
            return Ok(None);
        }
        let skipped = (now - round.lock_timestamp) / interval_seconds;
        let start = skipped
            .checked_mul(interval_seconds)
            .and_then(|offset| round.lock_timestamp.checked_add(offset))
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(Some(start))
    }
}

// ===== ROUND MANAGER =====

pub struct RoundManager;

impl RoundManager {
    /// Start the first round of a genesis sequence. Returns the new current
    /// epoch.
    pub fn genesis_start_round(env: &Env) -> Result<u64, Error> {
        let mut genesis = Storage::get_genesis(env);
        if genesis.start_once {
            return Err(Error::GenesisStartAlreadyTriggered);
        }

        let config = ConfigManager::get_config(env)?;
        let epoch = Storage::get_current_epoch(env) + 1;
        Storage::set_current_epoch(env, epoch);
        Self::start_round(env, epoch, env.ledger().timestamp(), &config)?;

        genesis.start_once = true;
        genesis.epoch = epoch;
        Storage::set_genesis(env, &genesis);
        Ok(epoch)
    }

    /// Lock the genesis round against the oracle price. Returns the current
    /// epoch, which is the round following the genesis round.
    pub fn genesis_lock_round(env: &Env) -> Result<u64, Error> {
        let mut genesis = Storage::get_genesis(env);
        if !genesis.start_once {
            return Err(Error::GenesisStartNotTriggered);
        }
        if genesis.lock_once {
            return Err(Error::GenesisLockAlreadyTriggered);
        }

        let config = ConfigManager::get_config(env)?;
        let current = Self::roll_epoch(env, &config)?;
        let price = OracleManager::consume_price(env, config.oracle_update_allowance)?;
        Self::safe_lock_round(env, Self::lock_target(&genesis, current), price, &config)?;

        genesis.lock_once = true;
        Storage::set_genesis(env, &genesis);
        Ok(current)
    }

    /// Lock the round whose lock timestamp has come, end the round before
    /// it and calculate its rewards. Returns the current epoch.
    pub fn execute_round(env: &Env) -> Result<u64, Error> {
        let genesis = Storage::get_genesis(env);
        if !genesis.start_once || !genesis.lock_once {
            return Err(Error::GenesisLockNotTriggered);
        }

        let config = ConfigManager::get_config(env)?;
        let current = Self::roll_epoch(env, &config)?;
        let price = OracleManager::consume_price(env, config.oracle_update_allowance)?;

        let lock_epoch = Self::lock_target(&genesis, current);
        if lock_epoch <= genesis.epoch {
            return Err(Error::LockTooEarly);
        }
        Self::safe_lock_round(env, lock_epoch, price, &config)?;
        Self::safe_end_round(env, lock_epoch - 1, price, &config)?;
        PayoutManager::calculate_rewards(env, lock_epoch - 1, config.treasury_fee)?;
        Ok(current)
    }

    /// Open the next round once the current one has reached its lock
    /// timestamp. Returns the current epoch after rolling.
    ///
    /// Runs on every bet and every operator call, so epochs advance with
    /// elapsed time alone; the operator only supplies lock and close prices.
    pub fn roll_epoch(env: &Env, config: &PredictionConfig) -> Result<u64, Error> {
        let epoch = Storage::get_current_epoch(env);
        if !Storage::get_genesis(env).start_once {
            return Ok(epoch);
        }
        let current = match Storage::get_round(env, epoch) {
            Some(round) => round,
            None => return Ok(epoch),
        };

        let now = env.ledger().timestamp();
        match RoundClock::rollover_start(&current, now, config.interval_seconds)? {
            Some(start) => {
                let next = epoch + 1;
                Storage::set_current_epoch(env, next);
                Self::start_round(env, next, start, config)?;
                Ok(next)
            }
            None => Ok(epoch),
        }
    }

    /// The round due for locking: the one before the open round, unless
    /// the genesis round itself is still open.
    fn lock_target(genesis: &GenesisState, current: u64) -> u64 {
        if current > genesis.epoch {
            current - 1
        } else {
            current
        }
    }

    fn start_round(env: &Env, epoch: u64, start: u64, config: &PredictionConfig) -> Result<(), Error> {
        let round = Round::new(epoch, start, config.interval_seconds)?;
        Storage::set_round(env, &round);
        EventEmitter::emit_start_round(env, &round);
        log!(env, "round started", epoch, round.lock_timestamp);
        Ok(())
    }

    fn safe_lock_round(
        env: &Env,
        epoch: u64,
        price: OraclePrice,
        config: &PredictionConfig,
    ) -> Result<(), Error> {
        let mut round = Storage::get_round(env, epoch).ok_or(Error::RoundNotStarted)?;
        // already locked means the next lock is not due yet
        if round.locked {
            return Err(Error::LockTooEarly);
        }
        RoundClock::check_lock_window(&round, env.ledger().timestamp(), config.buffer_seconds)?;

        round.lock_price = price.price;
        round.lock_oracle_id = price.oracle_id;
        round.locked = true;
        Storage::set_round(env, &round);

        EventEmitter::emit_lock_round(env, epoch, price.oracle_id, price.price);
        Ok(())
    }

    fn safe_end_round(
        env: &Env,
        epoch: u64,
        price: OraclePrice,
        config: &PredictionConfig,
    ) -> Result<(), Error> {
        let mut round = Storage::get_round(env, epoch).ok_or(Error::RoundNotStarted)?;
        RoundClock::check_end_window(&round, env.ledger().timestamp(), config.buffer_seconds)?;

        round.close_price = price.price;
        round.close_oracle_id = price.oracle_id;
        round.oracle_called = true;
        Storage::set_round(env, &round);

        EventEmitter::emit_end_round(env, epoch, price.oracle_id, price.price);
        Ok(())
    }
}
