//! Administration for the price prediction contract.
//!
//! Two roles exist:
//!
//! - **Admin**: owns configuration, the treasury and unpausing.
//! - **Operator**: runs the round sequence (`genesis_*`, `execute_round`)
//!   and may pause in an emergency.
//!
//! Every parameter change requires the contract to be paused first, so the
//! values a round started with are the values it finishes with.

use soroban_sdk::{log, Address, Env};

use crate::config::{ConfigManager, ConfigValidator, PredictionConfig};
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::storage::Storage;
use crate::types::{GenesisState, OracleSource};

// ===== INITIALIZATION =====

pub struct AdminInitializer;

impl AdminInitializer {
    pub fn initialize(
        env: &Env,
        admin: &Address,
        operator: &Address,
        token: &Address,
        oracle: &OracleSource,
        config: Option<PredictionConfig>,
    ) -> Result<(), Error> {
        if Storage::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        let config = config.unwrap_or_else(PredictionConfig::default_config);
        ConfigManager::store_config(env, &config)?;

        Storage::set_admin(env, admin);
        Storage::set_operator(env, operator);
        Storage::set_token(env, token);
        Storage::set_oracle(env, oracle);
        Storage::set_current_epoch(env, 0);
        Storage::set_genesis(env, &GenesisState::default());
        Storage::set_paused(env, false);
        Storage::set_treasury_amount(env, 0);
        Storage::bump_instance(env);

        log!(env, "prediction initialized", config.interval_seconds, config.buffer_seconds);
        Ok(())
    }
}

// ===== ACCESS CONTROL =====

pub struct AdminAccessControl;

impl AdminAccessControl {
    pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != Storage::get_admin(env)? {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    pub fn require_operator(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != Storage::get_operator(env)? {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    pub fn require_admin_or_operator(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != Storage::get_admin(env)? && *caller != Storage::get_operator(env)? {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    pub fn require_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    pub fn require_paused(env: &Env) -> Result<(), Error> {
        if !Storage::is_paused(env) {
            return Err(Error::ContractNotPaused);
        }
        Ok(())
    }
}

// ===== ADMIN FUNCTIONS =====

pub struct AdminFunctions;

impl AdminFunctions {
    pub fn pause(env: &Env, caller: &Address) -> Result<(), Error> {
        AdminAccessControl::require_admin_or_operator(env, caller)?;
        AdminAccessControl::require_not_paused(env)?;
        Storage::set_paused(env, true);
        EventEmitter::emit_pause(env, Storage::get_current_epoch(env));
        Ok(())
    }

    /// Unpause and reset the genesis sequence.
    pub fn unpause(env: &Env, admin: &Address) -> Result<(), Error> {
        AdminAccessControl::require_admin(env, admin)?;
        AdminAccessControl::require_paused(env)?;
        Storage::set_genesis(env, &GenesisState::default());
        Storage::set_paused(env, false);
        EventEmitter::emit_unpause(env, Storage::get_current_epoch(env));
        Ok(())
    }

    pub fn set_buffer_and_interval_seconds(
        env: &Env,
        admin: &Address,
        buffer_seconds: u64,
        interval_seconds: u64,
    ) -> Result<(), Error> {
        Self::require_paused_admin(env, admin)?;
        ConfigValidator::validate_buffer_and_interval(buffer_seconds, interval_seconds)?;
        ConfigManager::update_config(env, |config| {
            config.buffer_seconds = buffer_seconds;
            config.interval_seconds = interval_seconds;
        })?;
        EventEmitter::emit_new_buffer_and_interval(env, buffer_seconds, interval_seconds);
        Ok(())
    }

    pub fn set_min_bet_amount(env: &Env, admin: &Address, min_bet_amount: i128) -> Result<(), Error> {
        Self::require_paused_admin(env, admin)?;
        ConfigValidator::validate_min_bet_amount(min_bet_amount)?;
        ConfigManager::update_config(env, |config| config.min_bet_amount = min_bet_amount)?;
        EventEmitter::emit_new_min_bet_amount(env, Storage::get_current_epoch(env), min_bet_amount);
        Ok(())
    }

    pub fn set_treasury_fee(env: &Env, admin: &Address, treasury_fee: u32) -> Result<(), Error> {
        Self::require_paused_admin(env, admin)?;
        ConfigValidator::validate_treasury_fee(treasury_fee)?;
        ConfigManager::update_config(env, |config| config.treasury_fee = treasury_fee)?;
        EventEmitter::emit_new_treasury_fee(env, Storage::get_current_epoch(env), treasury_fee);
        Ok(())
    }

    pub fn set_oracle_update_allowance(env: &Env, admin: &Address, allowance: u64) -> Result<(), Error> {
        Self::require_paused_admin(env, admin)?;
        ConfigValidator::validate_oracle_update_allowance(allowance)?;
        ConfigManager::update_config(env, |config| config.oracle_update_allowance = allowance)?;
        EventEmitter::emit_new_oracle_update_allowance(env, allowance);
        Ok(())
    }

    pub fn set_operator(env: &Env, admin: &Address, operator: &Address) -> Result<(), Error> {
        Self::require_paused_admin(env, admin)?;
        Storage::set_operator(env, operator);
        EventEmitter::emit_new_operator(env, operator);
        Ok(())
    }

    /// Switch oracle source. The consumed-price marker restarts from zero
    /// since ids from different oracles are not comparable.
    pub fn set_oracle(env: &Env, admin: &Address, oracle: &OracleSource) -> Result<(), Error> {
        Self::require_paused_admin(env, admin)?;
        Storage::set_oracle(env, oracle);
        Storage::set_oracle_latest_id(env, 0);
        EventEmitter::emit_new_oracle(env, oracle);
        Ok(())
    }

    pub fn set_admin(env: &Env, admin: &Address, new_admin: &Address) -> Result<(), Error> {
        AdminAccessControl::require_admin(env, admin)?;
        Storage::set_admin(env, new_admin);
        EventEmitter::emit_new_admin_address(env, new_admin);
        Ok(())
    }

    fn require_paused_admin(env: &Env, admin: &Address) -> Result<(), Error> {
        AdminAccessControl::require_admin(env, admin)?;
        AdminAccessControl::require_paused(env)
    }
}
