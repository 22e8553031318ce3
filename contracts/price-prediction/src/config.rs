//! Configuration for the price prediction contract.
//!
//! This module provides:
//! - Default round timing, bet and fee constants
//! - Bounds enforced on every configuration change
//! - The stored `PredictionConfig` and its validator

use soroban_sdk::{contracttype, Env};

use crate::errors::Error;
use crate::storage::DataKey;

// ===== ROUND TIMING CONSTANTS =====

/// Default seconds between a round's start and its lock (and lock to close)
pub const DEFAULT_INTERVAL_SECONDS: u64 = 300;

/// Upper bound on the round interval (one week)
pub const MAX_INTERVAL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Default grace period for the operator to lock or end a round
pub const DEFAULT_BUFFER_SECONDS: u64 = 30;

/// Default maximum age of an oracle price accepted for lock or close
pub const DEFAULT_ORACLE_UPDATE_ALLOWANCE: u64 = 300;

// ===== BET CONSTANTS =====

/// Default minimum bet (0.1 XLM = 1,000,000 stroops)
pub const DEFAULT_MIN_BET_AMOUNT: i128 = 1_000_000;

// ===== FEE CONSTANTS =====

/// Denominator for treasury fee basis points (100%)
pub const FEE_DENOMINATOR: i128 = 10_000;

/// Default treasury fee (3%)
pub const DEFAULT_TREASURY_FEE: u32 = 300;

/// Maximum treasury fee (10%)
pub const MAX_TREASURY_FEE: u32 = 1_000;

/// Round and fee parameters.
///
/// Passed to `initialize` as `Some(config)` to override every default, or
/// `None` to deploy with [`PredictionConfig::default_config`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PredictionConfig {
    /// Seconds from start to lock, and from lock to close
    pub interval_seconds: u64,
    /// Seconds after lock/close during which the operator may still act
    pub buffer_seconds: u64,
    /// Minimum bet in the token's smallest unit
    pub min_bet_amount: i128,
    /// Treasury fee in basis points of a round's total
    pub treasury_fee: u32,
    /// Maximum age in seconds of an oracle price
    pub oracle_update_allowance: u64,
}

impl PredictionConfig {
    pub fn default_config() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            buffer_seconds: DEFAULT_BUFFER_SECONDS,
            min_bet_amount: DEFAULT_MIN_BET_AMOUNT,
            treasury_fee: DEFAULT_TREASURY_FEE,
            oracle_update_allowance: DEFAULT_ORACLE_UPDATE_ALLOWANCE,
        }
    }
}

/// Bounds checks shared by `initialize` and the admin setters.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &PredictionConfig) -> Result<(), Error> {
        Self::validate_buffer_and_interval(config.buffer_seconds, config.interval_seconds)?;
        Self::validate_min_bet_amount(config.min_bet_amount)?;
        Self::validate_treasury_fee(config.treasury_fee)?;
        Self::validate_oracle_update_allowance(config.oracle_update_allowance)?;
        Ok(())
    }

    pub fn validate_buffer_and_interval(buffer_seconds: u64, interval_seconds: u64) -> Result<(), Error> {
        if buffer_seconds >= interval_seconds || interval_seconds > MAX_INTERVAL_SECONDS {
            return Err(Error::InvalidInterval);
        }
        Ok(())
    }

    pub fn validate_min_bet_amount(min_bet_amount: i128) -> Result<(), Error> {
        if min_bet_amount <= 0 {
            return Err(Error::InvalidMinBetAmount);
        }
        Ok(())
    }

    pub fn validate_treasury_fee(treasury_fee: u32) -> Result<(), Error> {
        if treasury_fee > MAX_TREASURY_FEE {
            return Err(Error::TreasuryFeeTooHigh);
        }
        Ok(())
    }

    pub fn validate_oracle_update_allowance(allowance: u64) -> Result<(), Error> {
        if allowance == 0 {
            return Err(Error::InvalidOracleAllowance);
        }
        Ok(())
    }
}

/// Loads and stores the active configuration.
pub struct ConfigManager;

impl ConfigManager {
    pub fn get_config(env: &Env) -> Result<PredictionConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn store_config(env: &Env, config: &PredictionConfig) -> Result<(), Error> {
        ConfigValidator::validate(config)?;
        env.storage().instance().set(&DataKey::Config, config);
        Ok(())
    }

    /// Apply `update` to the stored configuration and persist the result.
    pub fn update_config<F>(env: &Env, update: F) -> Result<PredictionConfig, Error>
    where
        F: FnOnce(&mut PredictionConfig),
    {
        let mut config = Self::get_config(env)?;
        update(&mut config);
        Self::store_config(env, &config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PredictionConfig::default_config();
        assert!(ConfigValidator::validate(&config).is_ok());
        assert_eq!(config.interval_seconds, 300);
        assert_eq!(config.buffer_seconds, 30);
    }

    #[test]
    fn test_buffer_must_be_shorter_than_interval() {
        assert_eq!(
            ConfigValidator::validate_buffer_and_interval(300, 300),
            Err(Error::InvalidInterval)
        );
        assert_eq!(
            ConfigValidator::validate_buffer_and_interval(301, 300),
            Err(Error::InvalidInterval)
        );
        assert!(ConfigValidator::validate_buffer_and_interval(299, 300).is_ok());
    }

    #[test]
    fn test_interval_is_capped() {
        assert!(ConfigValidator::validate_buffer_and_interval(30, MAX_INTERVAL_SECONDS).is_ok());
        assert_eq!(
            ConfigValidator::validate_buffer_and_interval(30, MAX_INTERVAL_SECONDS + 1),
            Err(Error::InvalidInterval)
        );
        assert_eq!(
            ConfigValidator::validate_buffer_and_interval(30, u64::MAX),
            Err(Error::InvalidInterval)
        );
    }

    #[test]
    fn test_fee_and_bet_bounds() {
        assert!(ConfigValidator::validate_treasury_fee(MAX_TREASURY_FEE).is_ok());
        assert_eq!(
            ConfigValidator::validate_treasury_fee(MAX_TREASURY_FEE + 1),
            Err(Error::TreasuryFeeTooHigh)
        );
        assert_eq!(
            ConfigValidator::validate_min_bet_amount(0),
            Err(Error::InvalidMinBetAmount)
        );
        assert_eq!(
            ConfigValidator::validate_oracle_update_allowance(0),
            Err(Error::InvalidOracleAllowance)
        );
    }
}
