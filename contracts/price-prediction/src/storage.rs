use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::Error;
use crate::types::{BetInfo, GenesisState, OracleSource, Round};

// ===== TTL CONSTANTS =====

/// Ledgers per day at ~5 second close times
pub const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const ROUND_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const ROUND_LIFETIME_THRESHOLD: u32 = ROUND_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys.
///
/// Contract-wide settings live in instance storage; rounds, bets and user
/// histories live in persistent storage under their own keys.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Operator,
    Token,
    Oracle,
    Config,
    CurrentEpoch,
    Genesis,
    Paused,
    TreasuryAmount,
    OracleLatestId,
    ReentrancyLock,
    Round(u64),
    Bet(u64, Address),
    UserRounds(Address),
}

/// Typed accessors over contract storage.
pub struct Storage;

impl Storage {
    pub fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Admin)
    }

    // ===== ROLES =====

    pub fn get_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&DataKey::Admin, admin);
    }

    pub fn get_operator(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Operator)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_operator(env: &Env, operator: &Address) {
        env.storage().instance().set(&DataKey::Operator, operator);
    }

    // ===== EXTERNAL CONTRACTS =====

    pub fn get_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_token(env: &Env, token: &Address) {
        env.storage().instance().set(&DataKey::Token, token);
    }

    pub fn get_oracle(env: &Env) -> Result<OracleSource, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Oracle)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_oracle(env: &Env, oracle: &OracleSource) {
        env.storage().instance().set(&DataKey::Oracle, oracle);
    }

    pub fn get_oracle_latest_id(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::OracleLatestId)
            .unwrap_or(0)
    }

    pub fn set_oracle_latest_id(env: &Env, oracle_id: u64) {
        env.storage()
            .instance()
            .set(&DataKey::OracleLatestId, &oracle_id);
    }

    // ===== ROUND STATE =====

    pub fn get_current_epoch(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::CurrentEpoch)
            .unwrap_or(0)
    }

    pub fn set_current_epoch(env: &Env, epoch: u64) {
        env.storage().instance().set(&DataKey::CurrentEpoch, &epoch);
    }

    pub fn get_genesis(env: &Env) -> GenesisState {
        env.storage()
            .instance()
            .get(&DataKey::Genesis)
            .unwrap_or_default()
    }

    pub fn set_genesis(env: &Env, genesis: &GenesisState) {
        env.storage().instance().set(&DataKey::Genesis, genesis);
    }

    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    pub fn get_treasury_amount(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TreasuryAmount)
            .unwrap_or(0)
    }

    pub fn set_treasury_amount(env: &Env, amount: i128) {
        env.storage()
            .instance()
            .set(&DataKey::TreasuryAmount, &amount);
    }

    pub fn get_round(env: &Env, epoch: u64) -> Option<Round> {
        let key = DataKey::Round(epoch);
        let round = env.storage().persistent().get::<DataKey, Round>(&key);
        if round.is_some() {
            env.storage()
                .persistent()
                .extend_ttl(&key, ROUND_LIFETIME_THRESHOLD, ROUND_BUMP_AMOUNT);
        }
        round
    }

    pub fn set_round(env: &Env, round: &Round) {
        let key = DataKey::Round(round.epoch);
        env.storage().persistent().set(&key, round);
        env.storage()
            .persistent()
            .extend_ttl(&key, ROUND_LIFETIME_THRESHOLD, ROUND_BUMP_AMOUNT);
    }

    // ===== BET LEDGER =====

    pub fn get_bet(env: &Env, epoch: u64, user: &Address) -> Option<BetInfo> {
        env.storage()
            .persistent()
            .get(&DataKey::Bet(epoch, user.clone()))
    }

    pub fn set_bet(env: &Env, epoch: u64, user: &Address, bet: &BetInfo) {
        let key = DataKey::Bet(epoch, user.clone());
        env.storage().persistent().set(&key, bet);
        env.storage()
            .persistent()
            .extend_ttl(&key, ROUND_LIFETIME_THRESHOLD, ROUND_BUMP_AMOUNT);
    }

    pub fn get_user_rounds(env: &Env, user: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::UserRounds(user.clone()))
            .unwrap_or(Vec::new(env))
    }

    pub fn push_user_round(env: &Env, user: &Address, epoch: u64) {
        let key = DataKey::UserRounds(user.clone());
        let mut epochs = Self::get_user_rounds(env, user);
        epochs.push_back(epoch);
        env.storage().persistent().set(&key, &epochs);
        env.storage()
            .persistent()
            .extend_ttl(&key, ROUND_LIFETIME_THRESHOLD, ROUND_BUMP_AMOUNT);
    }
}
