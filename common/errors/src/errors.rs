#![no_std]

pub static ERROR_INVALID_AMOUNT: &[u8] = b"1";

pub static ERROR_NO_ACTIVE_RESERVE: &[u8] = b"2";

pub static ERROR_RESERVE_FROZEN: &[u8] = b"3";

pub static ERROR_CURRENT_AVAILABLE_LIQUIDITY_NOT_ENOUGH: &[u8] = b"4";

pub static ERROR_NOT_ENOUGH_AVAILABLE_USER_BALANCE: &[u8] = b"5";

pub static ERROR_TRANSFER_NOT_ALLOWED: &[u8] = b"6";

pub static ERROR_BORROWING_NOT_ENABLED: &[u8] = b"7";

pub static ERROR_INVALID_INTEREST_RATE_MODE_SELECTED: &[u8] = b"8";

pub static ERROR_COLLATERAL_BALANCE_IS_ZERO: &[u8] = b"9";

pub static ERROR_HEALTH_FACTOR_LOWER_THAN_LIQUIDATION_THRESHOLD: &[u8] = b"10";

pub static ERROR_COLLATERAL_CANNOT_COVER_NEW_BORROW: &[u8] = b"11";

pub static ERROR_STABLE_BORROWING_NOT_ENABLED: &[u8] = b"12";

pub static ERROR_COLLATERAL_SAME_AS_BORROWING_CURRENCY: &[u8] = b"13";

pub static ERROR_AMOUNT_BIGGER_THAN_MAX_LOAN_SIZE_STABLE: &[u8] = b"14";

pub static ERROR_NO_DEBT_OF_SELECTED_TYPE: &[u8] = b"15";

pub static ERROR_NO_STABLE_RATE_LOAN_IN_RESERVE: &[u8] = b"17";

pub static ERROR_NO_VARIABLE_RATE_LOAN_IN_RESERVE: &[u8] = b"18";

pub static ERROR_UNDERLYING_BALANCE_NOT_GREATER_THAN_0: &[u8] = b"19";

pub static ERROR_DEPOSIT_ALREADY_IN_USE: &[u8] = b"20";

/// Rebalancing a user that holds no stable debt.
pub static ERROR_NOT_ENOUGH_STABLE_BORROW_BALANCE: &[u8] = b"21";

pub static ERROR_INTEREST_RATE_REBALANCE_CONDITIONS_NOT_MET: &[u8] = b"22";

pub static ERROR_NOT_ENOUGH_LIQUIDITY_TO_BORROW: &[u8] = b"24";

pub static ERROR_RESERVE_ALREADY_INITIALIZED: &[u8] = b"32";

pub static ERROR_RESERVE_LIQUIDITY_NOT_0: &[u8] = b"34";

pub static ERROR_HEALTH_FACTOR_NOT_BELOW_THRESHOLD: &[u8] = b"42";

pub static ERROR_COLLATERAL_CANNOT_BE_LIQUIDATED: &[u8] = b"43";

pub static ERROR_SPECIFIED_CURRENCY_NOT_BORROWED_BY_USER: &[u8] = b"44";

pub static ERROR_NOT_ENOUGH_LIQUIDITY_TO_LIQUIDATE: &[u8] = b"45";

pub static ERROR_MULTIPLICATION_OVERFLOW: &[u8] = b"48";

pub static ERROR_ADDITION_OVERFLOW: &[u8] = b"49";

pub static ERROR_DIVISION_BY_ZERO: &[u8] = b"50";

pub static ERROR_LIQUIDITY_INDEX_OVERFLOW: &[u8] = b"51";

pub static ERROR_VARIABLE_BORROW_INDEX_OVERFLOW: &[u8] = b"52";

pub static ERROR_LIQUIDITY_RATE_OVERFLOW: &[u8] = b"53";

pub static ERROR_VARIABLE_BORROW_RATE_OVERFLOW: &[u8] = b"54";

pub static ERROR_STABLE_BORROW_RATE_OVERFLOW: &[u8] = b"55";

pub static ERROR_INVALID_MINT_AMOUNT: &[u8] = b"56";

pub static ERROR_INVALID_BURN_AMOUNT: &[u8] = b"58";

pub static ERROR_BORROW_ALLOWANCE_NOT_ENOUGH: &[u8] = b"59";

pub static ERROR_REENTRANCY_NOT_ALLOWED: &[u8] = b"62";

pub static ERROR_PAUSED: &[u8] = b"64";

pub static ERROR_NO_MORE_RESERVES_ALLOWED: &[u8] = b"65";

pub static ERROR_INVALID_FLASH_LOAN_EXECUTOR_RETURN: &[u8] = b"66";

pub static ERROR_INVALID_LTV: &[u8] = b"67";

pub static ERROR_INVALID_LIQ_THRESHOLD: &[u8] = b"68";

pub static ERROR_INVALID_LIQ_BONUS: &[u8] = b"69";

pub static ERROR_INVALID_DECIMALS: &[u8] = b"70";

pub static ERROR_INVALID_RESERVE_FACTOR: &[u8] = b"71";

pub static ERROR_INCONSISTENT_FLASHLOAN_PARAMS: &[u8] = b"73";

pub static ERROR_INVALID_CONFIGURATION: &[u8] = b"75";

pub static ERROR_STABLE_DEBT_OVERFLOW: &[u8] = b"79";

/// Burning more than a position holds.
pub static ERROR_BURN_EXCEEDS_BALANCE: &[u8] = b"80";

pub static ERROR_ASSET_NOT_PRICED: &[u8] = b"81";
