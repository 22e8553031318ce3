//! Event types and emission for the price prediction contract.
//!
//! Every state transition publishes one event. The first topic is always the
//! event name; round-scoped events add the epoch (and the user, where one is
//! involved) as further topics so indexers can filter without decoding data.

use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val};

use crate::types::{OracleSource, Position, Round};

// ===== EVENT NAMES =====

pub const START_ROUND: &str = "StartRound";
pub const LOCK_ROUND: &str = "LockRound";
pub const END_ROUND: &str = "EndRound";
pub const REWARDS_CALCULATED: &str = "RewardsCalculated";
pub const TREASURY_CLAIM: &str = "TreasuryClaim";
pub const NEW_OPERATOR: &str = "NewOperator";
pub const NEW_ORACLE: &str = "NewOracle";
pub const NEW_MIN_BET_AMOUNT: &str = "NewMinBetAmount";
pub const NEW_TREASURY_FEE: &str = "NewTreasuryFee";
pub const NEW_BUFFER_AND_INTERVAL: &str = "NewBufferAndIntervalSeconds";
pub const NEW_ORACLE_UPDATE_ALLOWANCE: &str = "NewOracleUpdateAllowance";
pub const NEW_ADMIN_ADDRESS: &str = "NewAdminAddress";

// ===== EVENT TYPES =====

/// Emitted when a round opens for betting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartRoundEvent {
    pub epoch: u64,
    pub start_timestamp: u64,
    pub lock_timestamp: u64,
    pub close_timestamp: u64,
}

/// Emitted when a round is locked or ended against an oracle price.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundPriceEvent {
    pub epoch: u64,
    pub oracle_id: u64,
    pub price: i128,
}

/// Emitted for every accepted bet.
///
/// Published under `BetUp` for `Position::Bull` and `BetDown` for
/// `Position::Bear`, with topics `(name, sender, current_epoch)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BetEvent {
    pub sender: Address,
    pub current_epoch: u64,
    pub amount: i128,
}

/// Emitted once per epoch paid out by `claim`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimEvent {
    pub sender: Address,
    pub epoch: u64,
    pub amount: i128,
}

/// Emitted when a round's reward pool is fixed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsCalculatedEvent {
    pub epoch: u64,
    pub reward_base_cal_amount: i128,
    pub reward_amount: i128,
    pub treasury_amount: i128,
}

/// Payload for `Pause`, `Unpause` and the epoch-tagged parameter events.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EpochEvent {
    pub epoch: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BufferAndIntervalEvent {
    pub buffer_seconds: u64,
    pub interval_seconds: u64,
}

// ===== EVENT EMITTER =====

/// Central event publisher.
pub struct EventEmitter;

impl EventEmitter {
    pub fn emit_start_round(env: &Env, round: &Round) {
        let event = StartRoundEvent {
            epoch: round.epoch,
            start_timestamp: round.start_timestamp,
            lock_timestamp: round.lock_timestamp,
            close_timestamp: round.close_timestamp,
        };
        Self::publish_round(env, START_ROUND, round.epoch, event);
    }

    pub fn emit_lock_round(env: &Env, epoch: u64, oracle_id: u64, price: i128) {
        let event = RoundPriceEvent {
            epoch,
            oracle_id,
            price,
        };
        Self::publish_round(env, LOCK_ROUND, epoch, event);
    }

    pub fn emit_end_round(env: &Env, epoch: u64, oracle_id: u64, price: i128) {
        let event = RoundPriceEvent {
            epoch,
            oracle_id,
            price,
        };
        Self::publish_round(env, END_ROUND, epoch, event);
    }

    pub fn emit_bet(env: &Env, position: Position, sender: &Address, epoch: u64, amount: i128) {
        let name = match position {
            Position::Bull => symbol_short!("BetUp"),
            Position::Bear => symbol_short!("BetDown"),
        };
        let event = BetEvent {
            sender: sender.clone(),
            current_epoch: epoch,
            amount,
        };
        env.events().publish((name, sender.clone(), epoch), event);
    }

    pub fn emit_claim(env: &Env, sender: &Address, epoch: u64, amount: i128) {
        let event = ClaimEvent {
            sender: sender.clone(),
            epoch,
            amount,
        };
        env.events()
            .publish((symbol_short!("Claim"), sender.clone(), epoch), event);
    }

    pub fn emit_rewards_calculated(
        env: &Env,
        epoch: u64,
        reward_base_cal_amount: i128,
        reward_amount: i128,
        treasury_amount: i128,
    ) {
        let event = RewardsCalculatedEvent {
            epoch,
            reward_base_cal_amount,
            reward_amount,
            treasury_amount,
        };
        Self::publish_round(env, REWARDS_CALCULATED, epoch, event);
    }

    pub fn emit_treasury_claim(env: &Env, amount: i128) {
        Self::publish(env, TREASURY_CLAIM, amount);
    }

    pub fn emit_pause(env: &Env, epoch: u64) {
        env.events()
            .publish((symbol_short!("Pause"),), EpochEvent { epoch });
    }

    pub fn emit_unpause(env: &Env, epoch: u64) {
        env.events()
            .publish((symbol_short!("Unpause"),), EpochEvent { epoch });
    }

    pub fn emit_new_operator(env: &Env, operator: &Address) {
        Self::publish(env, NEW_OPERATOR, operator.clone());
    }

    pub fn emit_new_oracle(env: &Env, oracle: &OracleSource) {
        Self::publish(env, NEW_ORACLE, oracle.clone());
    }

    pub fn emit_new_min_bet_amount(env: &Env, epoch: u64, min_bet_amount: i128) {
        Self::publish(env, NEW_MIN_BET_AMOUNT, (epoch, min_bet_amount));
    }

    pub fn emit_new_treasury_fee(env: &Env, epoch: u64, treasury_fee: u32) {
        Self::publish(env, NEW_TREASURY_FEE, (epoch, treasury_fee));
    }

    pub fn emit_new_buffer_and_interval(env: &Env, buffer_seconds: u64, interval_seconds: u64) {
        let event = BufferAndIntervalEvent {
            buffer_seconds,
            interval_seconds,
        };
        Self::publish(env, NEW_BUFFER_AND_INTERVAL, event);
    }

    pub fn emit_new_oracle_update_allowance(env: &Env, allowance: u64) {
        Self::publish(env, NEW_ORACLE_UPDATE_ALLOWANCE, allowance);
    }

    pub fn emit_new_admin_address(env: &Env, admin: &Address) {
        Self::publish(env, NEW_ADMIN_ADDRESS, admin.clone());
    }

    fn publish_round<T>(env: &Env, name: &str, epoch: u64, data: T)
    where
        T: IntoVal<Env, Val>,
    {
        env.events().publish((Symbol::new(env, name), epoch), data);
    }

    fn publish<T>(env: &Env, name: &str, data: T)
    where
        T: IntoVal<Env, Val>,
    {
        env.events().publish((Symbol::new(env, name),), data);
    }
}

