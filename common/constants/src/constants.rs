#![no_std]

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const HALF_RAY: u128 = 500_000_000_000_000_000_000_000_000;
pub const RAY_PRECISION: usize = 27;

/// Base unit for token amounts, prices and the health factor
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const HALF_WAD: u128 = 500_000_000_000_000_000;
pub const WAD_PRECISION: usize = 18;

/// Factor between the wad and ray bases
pub const WAD_RAY_RATIO: u64 = 1_000_000_000;
pub const WAD_RAY_RATIO_PRECISION: usize = 9;

pub const BPS: usize = 10_000; // 100%
pub const HALF_BPS: usize = 5_000;
pub const BPS_PRECISION: usize = 4;

/// Below this health factor (in wad) a position can be liquidated
pub const HEALTH_FACTOR_LIQUIDATION_THRESHOLD: u128 = WAD;

/// Share of a single debt position that can be closed in one liquidation (50%)
pub const LIQUIDATION_CLOSE_FACTOR_PERCENT: usize = 5_000;

/// Max share of the available liquidity borrowable at a stable rate in one call (25%)
pub const MAX_STABLE_RATE_BORROW_SIZE_PERCENT: usize = 2_500;

/// Flash loan premium, 0.09%
pub const FLASHLOAN_PREMIUM_TOTAL: usize = 9;

/// Rebalance is allowed once the liquidity rate drops under 40% of the max variable rate
pub const REBALANCE_UP_LIQUIDITY_RATE_THRESHOLD: usize = 4_000;
/// ... and the reserve is at least 95% utilized
pub const REBALANCE_UP_USAGE_RATIO_THRESHOLD: u128 = 950_000_000_000_000_000_000_000_000;

pub const MAX_NUMBER_RESERVES: usize = 128;

/// Upper bound for ltv, liquidation threshold, bonus and reserve factor
pub const MAX_VALID_PERCENT_PARAMETER: usize = 65_535;

pub const MAX_RESERVE_DECIMALS: usize = 18;

/// Sentinel withdraw amount meaning "the whole balance"
pub const MAX_UINT256_BYTES: [u8; 32] = [0xff; 32];
