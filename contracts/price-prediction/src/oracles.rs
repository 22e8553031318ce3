//! Price oracle integration.
//!
//! Rounds are locked and closed against the latest price published by a
//! Reflector oracle contract. The price's publish timestamp doubles as the
//! oracle round id: each lock or close must consume a strictly newer price
//! than the previous one, and the price must not be older than the
//! configured update allowance.

use soroban_sdk::{symbol_short, vec, Address, Env, IntoVal};

use crate::errors::Error;
use crate::storage::Storage;
use crate::types::{OraclePrice, OracleSource, PriceData, ReflectorAsset};

// ===== ORACLE INTERFACE =====

/// Source of the latest price for the configured asset.
pub trait OracleInterface {
    fn latest_price(&self, env: &Env) -> Result<PriceData, Error>;
}

// ===== REFLECTOR CLIENT =====

/// Thin client for a Reflector oracle contract.
pub struct ReflectorOracleClient<'a> {
    env: &'a Env,
    contract_id: Address,
}

impl<'a> ReflectorOracleClient<'a> {
    pub fn new(env: &'a Env, contract_id: Address) -> Self {
        Self { env, contract_id }
    }

    /// Get the latest price for an asset
    pub fn lastprice(&self, asset: ReflectorAsset) -> Option<PriceData> {
        let args = vec![self.env, asset.into_val(self.env)];
        self.env
            .invoke_contract(&self.contract_id, &symbol_short!("lastprice"), args)
    }
}

/// Reflector-backed implementation of [`OracleInterface`].
pub struct ReflectorOracle {
    source: OracleSource,
}

impl ReflectorOracle {
    pub fn new(source: OracleSource) -> Self {
        Self { source }
    }
}

impl OracleInterface for ReflectorOracle {
    fn latest_price(&self, env: &Env) -> Result<PriceData, Error> {
        let client = ReflectorOracleClient::new(env, self.source.contract.clone());
        client
            .lastprice(self.source.asset.clone())
            .ok_or(Error::OracleUnavailable)
    }
}

// ===== PRICE ACCEPTANCE =====

pub struct OracleManager;

impl OracleManager {
    /// Read the configured oracle and consume its latest price.
    pub fn consume_price(env: &Env, update_allowance: u64) -> Result<OraclePrice, Error> {
        let oracle = ReflectorOracle::new(Storage::get_oracle(env)?);
        let data = oracle.latest_price(env)?;
        let accepted = Self::validate_price(
            &data,
            env.ledger().timestamp(),
            update_allowance,
            Storage::get_oracle_latest_id(env),
        )?;
        Storage::set_oracle_latest_id(env, accepted.oracle_id);
        Ok(accepted)
    }

    /// Freshness and ordering rules for an oracle price.
    pub fn validate_price(
        data: &PriceData,
        now: u64,
        update_allowance: u64,
        latest_oracle_id: u64,
    ) -> Result<OraclePrice, Error> {
        if data.price <= 0 {
            return Err(Error::InvalidOraclePrice);
        }
        if data.timestamp.saturating_add(update_allowance) < now {
            return Err(Error::OraclePriceStale);
        }
        if data.timestamp <= latest_oracle_id {
            return Err(Error::OracleIdNotAdvanced);
        }
        Ok(OraclePrice {
            oracle_id: data.timestamp,
            price: data.price,
        })
    }
}
