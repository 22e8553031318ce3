//! Mock Reflector oracle.
//!
//! Exposes the same `lastprice` entry point as a Reflector contract, backed
//! by a single price the test pushes with `set_price`. Until a price is
//! pushed (or after `clear`), `lastprice` returns `None`.

use soroban_sdk::{contract, contractimpl, symbol_short, Env, Symbol};

use crate::types::{PriceData, ReflectorAsset};

const PRICE: Symbol = symbol_short!("price");

#[contract]
pub struct MockReflector;

#[contractimpl]
impl MockReflector {
    pub fn set_price(env: Env, price: i128, timestamp: u64) {
        env.storage()
            .instance()
            .set(&PRICE, &PriceData { price, timestamp });
    }

    pub fn clear(env: Env) {
        env.storage().instance().remove(&PRICE);
    }

    pub fn lastprice(env: Env, _asset: ReflectorAsset) -> Option<PriceData> {
        env.storage().instance().get(&PRICE)
    }
}
