#![no_std]

//! # Price Prediction
//!
//! Epoch-based up/down price prediction market on Soroban. Users bet that
//! the asset price at a round's close will be above (`bet_up`) or below
//! (`bet_down`) the price at its lock. Winners share the round's pot minus
//! the treasury fee, in proportion to their stake.
//!
//! Epochs advance with time on a fixed interval. An operator account calls
//! `execute_round` once per interval to lock and close rounds against a
//! Reflector oracle price.

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub mod admin;
pub mod bets;
pub mod config;
pub mod errors;
pub mod events;
pub mod oracles;
pub mod payouts;
pub mod reentrancy_guard;
pub mod rounds;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

use admin::{AdminAccessControl, AdminFunctions, AdminInitializer};
use bets::BetManager;
use config::{ConfigManager, PredictionConfig};
pub use errors::Error;
use payouts::PayoutManager;
use rounds::RoundManager;
use storage::Storage;
use types::{BetInfo, GenesisState, OracleSource, Position, ReflectorAsset, Round, UserRoundsPage};

#[contract]
pub struct PricePrediction;

#[contractimpl]
impl PricePrediction {
    /// Set up roles, the bet token, the oracle and the round parameters.
    ///
    /// `config` falls back to [`PredictionConfig::default_config`] when
    /// omitted.
    pub fn initialize(
        env: Env,
        admin: Address,
        operator: Address,
        token: Address,
        oracle: Address,
        asset: ReflectorAsset,
        config: Option<PredictionConfig>,
    ) -> Result<(), Error> {
        let source = OracleSource {
            contract: oracle,
            asset,
        };
        AdminInitializer::initialize(&env, &admin, &operator, &token, &source, config)
    }

    // ===== ROUND CONTROL =====

    pub fn genesis_start_round(env: Env, operator: Address) -> Result<u64, Error> {
        Self::require_live_operator(&env, &operator)?;
        RoundManager::genesis_start_round(&env)
    }

    pub fn genesis_lock_round(env: Env, operator: Address) -> Result<u64, Error> {
        Self::require_live_operator(&env, &operator)?;
        RoundManager::genesis_lock_round(&env)
    }

    /// Lock the round whose lock timestamp has come and end the one before
    /// it. Returns the current epoch.
    pub fn execute_round(env: Env, operator: Address) -> Result<u64, Error> {
        Self::require_live_operator(&env, &operator)?;
        RoundManager::execute_round(&env)
    }

    // ===== BETTING =====

    /// Bet on the price closing above its lock. Returns the sender's
    /// accumulated bet for the epoch.
    pub fn bet_up(env: Env, sender: Address, amount: i128) -> Result<BetInfo, Error> {
        Storage::bump_instance(&env);
        AdminAccessControl::require_not_paused(&env)?;
        BetManager::place_bet(&env, &sender, Position::Bull, amount)
    }

    pub fn bet_down(env: Env, sender: Address, amount: i128) -> Result<BetInfo, Error> {
        Storage::bump_instance(&env);
        AdminAccessControl::require_not_paused(&env)?;
        BetManager::place_bet(&env, &sender, Position::Bear, amount)
    }

    // ===== CLAIMS =====

    /// Collect rewards or refunds for the given epochs. Returns the amount
    /// transferred.
    pub fn claim(env: Env, sender: Address, epochs: Vec<u64>) -> Result<i128, Error> {
        Storage::bump_instance(&env);
        PayoutManager::claim(&env, &sender, &epochs)
    }

    pub fn claim_treasury(env: Env, admin: Address) -> Result<i128, Error> {
        Storage::bump_instance(&env);
        AdminAccessControl::require_admin(&env, &admin)?;
        PayoutManager::claim_treasury(&env, &admin)
    }

    pub fn claimable(env: Env, epoch: u64, user: Address) -> bool {
        PayoutManager::claimable(&env, epoch, &user)
    }

    pub fn refundable(env: Env, epoch: u64, user: Address) -> Result<bool, Error> {
        PayoutManager::refundable(&env, epoch, &user)
    }

    // ===== ADMINISTRATION =====

    /// Halt betting and round execution. Admin or operator.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Storage::bump_instance(&env);
        AdminFunctions::pause(&env, &caller)
    }

    /// Resume after a pause. The genesis sequence must be run again.
    pub fn unpause(env: Env, admin: Address) -> Result<(), Error> {
        Storage::bump_instance(&env);
        AdminFunctions::unpause(&env, &admin)
    }

    pub fn set_buffer_and_interval_seconds(
        env: Env,
        admin: Address,
        buffer_seconds: u64,
        interval_seconds: u64,
    ) -> Result<(), Error> {
        AdminFunctions::set_buffer_and_interval_seconds(&env, &admin, buffer_seconds, interval_seconds)
    }

    pub fn set_min_bet_amount(env: Env, admin: Address, min_bet_amount: i128) -> Result<(), Error> {
        AdminFunctions::set_min_bet_amount(&env, &admin, min_bet_amount)
    }

    pub fn set_treasury_fee(env: Env, admin: Address, treasury_fee: u32) -> Result<(), Error> {
        AdminFunctions::set_treasury_fee(&env, &admin, treasury_fee)
    }

    pub fn set_oracle_update_allowance(env: Env, admin: Address, allowance: u64) -> Result<(), Error> {
        AdminFunctions::set_oracle_update_allowance(&env, &admin, allowance)
    }

    pub fn set_operator(env: Env, admin: Address, operator: Address) -> Result<(), Error> {
        AdminFunctions::set_operator(&env, &admin, &operator)
    }

    pub fn set_oracle(env: Env, admin: Address, oracle: Address, asset: ReflectorAsset) -> Result<(), Error> {
        let source = OracleSource {
            contract: oracle,
            asset,
        };
        AdminFunctions::set_oracle(&env, &admin, &source)
    }

    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), Error> {
        AdminFunctions::set_admin(&env, &admin, &new_admin)
    }

    // ===== QUERIES =====

    pub fn current_epoch(env: Env) -> u64 {
        Storage::get_current_epoch(&env)
    }

    pub fn get_round(env: Env, epoch: u64) -> Option<Round> {
        Storage::get_round(&env, epoch)
    }

    pub fn get_bet(env: Env, epoch: u64, user: Address) -> Option<BetInfo> {
        BetManager::get_bet(&env, epoch, &user)
    }

    /// Page through the epochs `user` has bet in, starting at `cursor`.
    pub fn get_user_rounds(env: Env, user: Address, cursor: u32, size: u32) -> UserRoundsPage {
        BetManager::get_user_rounds(&env, &user, cursor, size)
    }

    pub fn get_user_rounds_length(env: Env, user: Address) -> u32 {
        BetManager::get_user_rounds_length(&env, &user)
    }

    pub fn get_config(env: Env) -> Result<PredictionConfig, Error> {
        ConfigManager::get_config(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    pub fn treasury_amount(env: Env) -> i128 {
        Storage::get_treasury_amount(&env)
    }

    pub fn genesis_state(env: Env) -> GenesisState {
        Storage::get_genesis(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        Storage::get_admin(&env)
    }

    pub fn get_operator(env: Env) -> Result<Address, Error> {
        Storage::get_operator(&env)
    }

    pub fn get_oracle(env: Env) -> Result<OracleSource, Error> {
        Storage::get_oracle(&env)
    }
}

impl PricePrediction {
    fn require_live_operator(env: &Env, operator: &Address) -> Result<(), Error> {
        Storage::bump_instance(env);
        AdminAccessControl::require_not_paused(env)?;
        AdminAccessControl::require_operator(env, operator)
    }
}
