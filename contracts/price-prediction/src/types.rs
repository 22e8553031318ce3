use soroban_sdk::{contracttype, Address, Symbol, Vec};

use crate::errors::Error;

/// Side of a bet.
///
/// `Bull` wins when the close price is above the lock price, `Bear` wins
/// when it is below. A tie pays neither side.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Position {
    Bull,
    Bear,
}

/// A single betting round, identified by its epoch.
///
/// A round is created when it starts, locked one interval later against
/// the oracle price, and ended (closed) one further interval later. Reward
/// fields are filled in once the round has ended.
///
/// # Lifecycle
///
/// ```text
/// start_timestamp ──bets──▶ lock_timestamp ──locked──▶ close_timestamp
///       │                         │                          │
///   StartRound               LockRound               EndRound + RewardsCalculated
/// ```
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    pub epoch: u64,
    pub start_timestamp: u64,
    pub lock_timestamp: u64,
    pub close_timestamp: u64,
    pub lock_price: i128,
    pub close_price: i128,
    /// Oracle timestamp consumed at lock, used as the oracle round id
    pub lock_oracle_id: u64,
    /// Oracle timestamp consumed at close
    pub close_oracle_id: u64,
    pub total_amount: i128,
    /// Total bet on `Position::Bull`
    pub bull_amount: i128,
    /// Total bet on `Position::Bear`
    pub bear_amount: i128,
    pub reward_base_cal_amount: i128,
    pub reward_amount: i128,
    pub locked: bool,
    pub oracle_called: bool,
    pub rewards_calculated: bool,
}

impl Round {
    pub fn new(epoch: u64, start: u64, interval_seconds: u64) -> Result<Self, Error> {
        let lock_timestamp = start
            .checked_add(interval_seconds)
            .ok_or(Error::ArithmeticOverflow)?;
        let close_timestamp = lock_timestamp
            .checked_add(interval_seconds)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(Self {
            epoch,
            start_timestamp: start,
            lock_timestamp,
            close_timestamp,
            lock_price: 0,
            close_price: 0,
            lock_oracle_id: 0,
            close_oracle_id: 0,
            total_amount: 0,
            bull_amount: 0,
            bear_amount: 0,
            reward_base_cal_amount: 0,
            reward_amount: 0,
            locked: false,
            oracle_called: false,
            rewards_calculated: false,
        })
    }

    /// Winning side once the round has closed, `None` on a tie.
    pub fn winning_position(&self) -> Option<Position> {
        if self.close_price > self.lock_price {
            Some(Position::Bull)
        } else if self.close_price < self.lock_price {
            Some(Position::Bear)
        } else {
            None
        }
    }
}

/// A user's stake in one round.
///
/// Every bet the user places in the epoch adds to the amount on its side,
/// so one account may hold both sides at once.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BetInfo {
    pub bull_amount: i128,
    pub bear_amount: i128,
    pub claimed: bool,
}

impl BetInfo {
    pub fn amount_on(&self, position: Position) -> i128 {
        match position {
            Position::Bull => self.bull_amount,
            Position::Bear => self.bear_amount,
        }
    }

    pub fn add(&mut self, position: Position, amount: i128) -> Result<(), Error> {
        let side = match position {
            Position::Bull => &mut self.bull_amount,
            Position::Bear => &mut self.bear_amount,
        };
        *side = side.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn total(&self) -> Result<i128, Error> {
        self.bull_amount
            .checked_add(self.bear_amount)
            .ok_or(Error::ArithmeticOverflow)
    }
}

/// A page of a user's betting history, see `get_user_rounds`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRoundsPage {
    pub epochs: Vec<u64>,
    pub bets: Vec<BetInfo>,
    pub next_cursor: u32,
}

/// Whether each step of the genesis sequence has run since the last unpause.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenesisState {
    pub start_once: bool,
    pub lock_once: bool,
    /// Epoch opened by the last `genesis_start_round`
    pub epoch: u64,
}

/// The oracle contract and asset prices are read from.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleSource {
    pub contract: Address,
    pub asset: ReflectorAsset,
}

// ===== REFLECTOR ORACLE TYPES =====

/// Asset identifier understood by Reflector oracle contracts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReflectorAsset {
    Stellar(Address),
    Other(Symbol),
}

/// Price record returned by Reflector `lastprice`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}

/// Price accepted by the contract for a lock or close.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OraclePrice {
    pub oracle_id: u64,
    pub price: i128,
}
