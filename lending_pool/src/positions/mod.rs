pub mod borrow;
pub mod collateral;
pub mod deposit;
pub mod liquidation;
pub mod rate_mode;
pub mod repay;
pub mod stable_debt;
pub mod supply;
pub mod variable_debt;
pub mod withdraw;
