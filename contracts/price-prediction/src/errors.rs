use soroban_sdk::contracterror;

/// Error codes for the price prediction contract.
///
/// Each variant carries a stable numeric code. Codes are grouped by the part
/// of the contract that raises them so client applications can categorize a
/// failure from the number alone.
///
/// # Error Categories
///
/// **Access Errors (100-199):** caller roles and initialization.
///
/// **Round Lifecycle Errors (200-299):** genesis sequencing and the
/// lock/end timing windows enforced by the round clock.
///
/// **Betting Errors (300-399):** bet placement and the pause switch.
///
/// **Claim Errors (400-499):** reward claims, refunds and the treasury.
///
/// **Oracle Errors (500-599):** price retrieval and freshness.
///
/// **Configuration Errors (600-699):** parameter bounds.
///
/// **Guard Errors (700-799):** reentrancy and arithmetic overflow.
///
/// # Example Usage
///
/// ```rust
/// # use price_prediction::errors::Error;
/// let error = Error::RoundNotBettable;
/// assert_eq!(error as u32, 300);
/// assert_eq!(error.code(), "ROUND_NOT_BETTABLE");
/// ```
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ===== ACCESS ERRORS =====
    /// Caller does not hold the role required for this action
    Unauthorized = 100,
    /// Contract has already been initialized
    AlreadyInitialized = 101,
    /// Contract has not been initialized
    NotInitialized = 102,

    // ===== ROUND LIFECYCLE ERRORS =====
    /// Genesis start round has already been triggered
    GenesisStartAlreadyTriggered = 200,
    /// Genesis start round has not been triggered
    GenesisStartNotTriggered = 201,
    /// Genesis lock round has already been triggered
    GenesisLockAlreadyTriggered = 202,
    /// Genesis lock round has not been triggered
    GenesisLockNotTriggered = 203,
    /// Round has not started
    RoundNotStarted = 204,
    /// Round has not been locked
    RoundNotLocked = 205,
    /// Lock attempted before the round's lock timestamp
    LockTooEarly = 206,
    /// Lock attempted after the lock timestamp plus buffer
    LockWindowExpired = 207,
    /// End attempted before the round's close timestamp
    EndTooEarly = 208,
    /// End attempted after the close timestamp plus buffer
    EndWindowExpired = 209,
    /// Rewards for this round have already been calculated
    RewardsAlreadyCalculated = 211,

    // ===== BETTING ERRORS =====
    /// Current round is not accepting bets
    RoundNotBettable = 300,
    /// Bet amount is below the configured minimum
    BetTooSmall = 301,
    /// Contract is paused
    ContractPaused = 303,
    /// Action requires the contract to be paused
    ContractNotPaused = 304,

    // ===== CLAIM ERRORS =====
    /// Round has not ended
    RoundNotEnded = 400,
    /// Bet is not eligible for a reward claim
    NotEligibleForClaim = 401,
    /// Bet is not eligible for a refund
    NotEligibleForRefund = 402,
    /// Nothing to claim
    NothingToClaim = 403,

    // ===== ORACLE ERRORS =====
    /// Oracle returned no price
    OracleUnavailable = 500,
    /// Oracle price is older than the update allowance
    OraclePriceStale = 501,
    /// Oracle price has already been consumed
    OracleIdNotAdvanced = 502,
    /// Oracle price is not positive
    InvalidOraclePrice = 503,

    // ===== CONFIGURATION ERRORS =====
    /// Interval must exceed the buffer and stay within the maximum
    InvalidInterval = 600,
    /// Minimum bet amount must be positive
    InvalidMinBetAmount = 601,
    /// Treasury fee exceeds the maximum
    TreasuryFeeTooHigh = 602,
    /// Oracle update allowance must be positive
    InvalidOracleAllowance = 603,

    // ===== GUARD ERRORS =====
    /// A guarded call is already in progress
    ReentrancyGuardActive = 700,
    /// Arithmetic overflow
    ArithmeticOverflow = 701,
}

impl Error {
    /// Human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            Error::Unauthorized => "Caller is not authorized to perform this action",
            Error::AlreadyInitialized => "Contract is already initialized",
            Error::NotInitialized => "Contract is not initialized",
            Error::GenesisStartAlreadyTriggered => "Can only run genesis start round once",
            Error::GenesisStartNotTriggered => "Can only run after genesis start round is triggered",
            Error::GenesisLockAlreadyTriggered => "Can only run genesis lock round once",
            Error::GenesisLockNotTriggered => "Can only run after genesis lock round is triggered",
            Error::RoundNotStarted => "Round has not started",
            Error::RoundNotLocked => "Can only end round after round has locked",
            Error::LockTooEarly => "Can only lock round after lock timestamp",
            Error::LockWindowExpired => "Can only lock round within buffer seconds",
            Error::EndTooEarly => "Can only end round after close timestamp",
            Error::EndWindowExpired => "Can only end round within buffer seconds",
            Error::RewardsAlreadyCalculated => "Rewards calculated",
            Error::RoundNotBettable => "Round not bettable",
            Error::BetTooSmall => "Bet amount must be greater than minimum bet amount",
            Error::ContractPaused => "Contract is paused",
            Error::ContractNotPaused => "Contract is not paused",
            Error::RoundNotEnded => "Round has not ended",
            Error::NotEligibleForClaim => "Not eligible for claim",
            Error::NotEligibleForRefund => "Not eligible for refund",
            Error::NothingToClaim => "Nothing to claim",
            Error::OracleUnavailable => "Oracle returned no price",
            Error::OraclePriceStale => "Oracle update exceeded max timestamp allowance",
            Error::OracleIdNotAdvanced => "Oracle update round id must be larger than latest",
            Error::InvalidOraclePrice => "Oracle price must be positive",
            Error::InvalidInterval => "Buffer seconds must be inferior to interval seconds, interval within maximum",
            Error::InvalidMinBetAmount => "Minimum bet amount must be positive",
            Error::TreasuryFeeTooHigh => "Treasury fee too high",
            Error::InvalidOracleAllowance => "Oracle update allowance must be positive",
            Error::ReentrancyGuardActive => "Reentrant call",
            Error::ArithmeticOverflow => "Arithmetic overflow",
        }
    }

    /// Stable UPPER_SNAKE_CASE identifier for logs and client mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Unauthorized => "UNAUTHORIZED",
            Error::AlreadyInitialized => "ALREADY_INITIALIZED",
            Error::NotInitialized => "NOT_INITIALIZED",
            Error::GenesisStartAlreadyTriggered => "GENESIS_START_ALREADY_TRIGGERED",
            Error::GenesisStartNotTriggered => "GENESIS_START_NOT_TRIGGERED",
            Error::GenesisLockAlreadyTriggered => "GENESIS_LOCK_ALREADY_TRIGGERED",
            Error::GenesisLockNotTriggered => "GENESIS_LOCK_NOT_TRIGGERED",
            Error::RoundNotStarted => "ROUND_NOT_STARTED",
            Error::RoundNotLocked => "ROUND_NOT_LOCKED",
            Error::LockTooEarly => "LOCK_TOO_EARLY",
            Error::LockWindowExpired => "LOCK_WINDOW_EXPIRED",
            Error::EndTooEarly => "END_TOO_EARLY",
            Error::EndWindowExpired => "END_WINDOW_EXPIRED",
            Error::RewardsAlreadyCalculated => "REWARDS_ALREADY_CALCULATED",
            Error::RoundNotBettable => "ROUND_NOT_BETTABLE",
            Error::BetTooSmall => "BET_TOO_SMALL",
            Error::ContractPaused => "CONTRACT_PAUSED",
            Error::ContractNotPaused => "CONTRACT_NOT_PAUSED",
            Error::RoundNotEnded => "ROUND_NOT_ENDED",
            Error::NotEligibleForClaim => "NOT_ELIGIBLE_FOR_CLAIM",
            Error::NotEligibleForRefund => "NOT_ELIGIBLE_FOR_REFUND",
            Error::NothingToClaim => "NOTHING_TO_CLAIM",
            Error::OracleUnavailable => "ORACLE_UNAVAILABLE",
            Error::OraclePriceStale => "ORACLE_PRICE_STALE",
            Error::OracleIdNotAdvanced => "ORACLE_ID_NOT_ADVANCED",
            Error::InvalidOraclePrice => "INVALID_ORACLE_PRICE",
            Error::InvalidInterval => "INVALID_INTERVAL",
            Error::InvalidMinBetAmount => "INVALID_MIN_BET_AMOUNT",
            Error::TreasuryFeeTooHigh => "TREASURY_FEE_TOO_HIGH",
            Error::InvalidOracleAllowance => "INVALID_ORACLE_ALLOWANCE",
            Error::ReentrancyGuardActive => "REENTRANCY_GUARD_ACTIVE",
            Error::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_grouped_by_category() {
        assert_eq!(Error::Unauthorized as u32, 100);
        assert_eq!(Error::GenesisStartAlreadyTriggered as u32, 200);
        assert_eq!(Error::RoundNotBettable as u32, 300);
        assert_eq!(Error::RoundNotEnded as u32, 400);
        assert_eq!(Error::OracleUnavailable as u32, 500);
        assert_eq!(Error::InvalidInterval as u32, 600);
        assert_eq!(Error::ReentrancyGuardActive as u32, 700);
    }

    #[test]
    fn test_error_descriptions_and_codes() {
        assert_eq!(
            Error::BetTooSmall.description(),
            "Bet amount must be greater than minimum bet amount"
        );
        assert_eq!(Error::BetTooSmall.code(), "BET_TOO_SMALL");
        assert_eq!(Error::OraclePriceStale.code(), "ORACLE_PRICE_STALE");
    }
}
