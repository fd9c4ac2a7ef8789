use multiversx_sc::types::{TestAddress, TestSCAddress};
use multiversx_sc_scenario::imports::{MxscPath, TestTokenIdentifier};

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
pub const SECONDS_PER_DAY: u64 = 86_400;

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const WAD: u128 = 1_000_000_000_000_000_000;

// Rate curve, in ray
pub const OPTIMAL_UTILIZATION: u128 = RAY / 100 * 80; // 80%
pub const BASE_VARIABLE_BORROW_RATE: u128 = 0;
pub const VARIABLE_RATE_SLOPE1: u128 = RAY / 100 * 4; // 4%
pub const VARIABLE_RATE_SLOPE2: u128 = RAY / 100 * 75; // 75%
pub const STABLE_RATE_SLOPE1: u128 = RAY / 100 * 2; // 2%
pub const STABLE_RATE_SLOPE2: u128 = RAY / 100 * 75; // 75%
pub const MARKET_BORROW_RATE: u128 = RAY / 100 * 3; // 3%

// Collateral parameters, in basis points
pub const LTV: usize = 3_000; // 30%
pub const LIQ_THRESHOLD: usize = 5_000; // 50%
pub const LIQ_BONUS: usize = 11_000; // 10% bonus

pub const USDC_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("USDC-abcdef");
pub const USDC_PRICE: u64 = 1;
pub const USDC_DECIMALS: usize = 6;

pub const EGLD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WEGLD-abcdef");
pub const EGLD_PRICE: u64 = 40;
pub const EGLD_DECIMALS: usize = 18;

pub const DAI_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("DAI-abcdef");
pub const DAI_PRICE: u64 = 1;
pub const DAI_DECIMALS: usize = 18;

pub const UNLISTED_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("UNLISTED-abcdef");

pub const LENDING_POOL_ADDRESS: TestSCAddress = TestSCAddress::new("lending-pool");
pub const FLASH_MOCK_ADDRESS: TestSCAddress = TestSCAddress::new("flash-mock");

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const TREASURY_ADDRESS: TestAddress = TestAddress::new("treasury");
pub const SUPPLIER_ADDRESS: TestAddress = TestAddress::new("supplier");
pub const BORROWER_ADDRESS: TestAddress = TestAddress::new("borrower");
pub const LIQUIDATOR_ADDRESS: TestAddress = TestAddress::new("liquidator");
pub const DELEGATEE_ADDRESS: TestAddress = TestAddress::new("delegatee");

pub const LENDING_POOL_PATH: MxscPath = MxscPath::new("output/lending-pool.mxsc.json");
pub const FLASH_MOCK_PATH: MxscPath = MxscPath::new("../flash_mock/output/flash-mock.mxsc.json");
