#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub use common_constants::MAX_NUMBER_RESERVES;

#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone, Copy, PartialEq, Eq)]
pub enum InterestRateMode {
    None,
    Stable,
    Variable,
}

impl InterestRateMode {
    pub fn is_borrow_mode(&self) -> bool {
        matches!(self, InterestRateMode::Stable | InterestRateMode::Variable)
    }
}

/// Parameters of the two-slope rate curve of a reserve, all in ray.
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct InterestRateStrategy<M: ManagedTypeApi> {
    pub optimal_utilization: ManagedDecimal<M, NumDecimals>,
    pub base_variable_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub variable_rate_slope1: ManagedDecimal<M, NumDecimals>,
    pub variable_rate_slope2: ManagedDecimal<M, NumDecimals>,
    pub stable_rate_slope1: ManagedDecimal<M, NumDecimals>,
    pub stable_rate_slope2: ManagedDecimal<M, NumDecimals>,
}

/// Risk parameters and switches of a reserve. Percentages are in basis points.
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct ReserveConfiguration<M: ManagedTypeApi> {
    pub ltv: ManagedDecimal<M, NumDecimals>,
    pub liquidation_threshold: ManagedDecimal<M, NumDecimals>,
    pub liquidation_bonus: ManagedDecimal<M, NumDecimals>,
    pub reserve_factor: ManagedDecimal<M, NumDecimals>,
    pub decimals: usize,
    pub is_active: bool,
    pub is_frozen: bool,
    pub borrowing_enabled: bool,
    pub stable_borrowing_enabled: bool,
}

impl<M: ManagedTypeApi> ReserveConfiguration<M> {
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub fn can_borrow(&self) -> bool {
        self.borrowing_enabled
    }

    pub fn can_borrow_stable(&self) -> bool {
        self.stable_borrowing_enabled
    }

    pub fn has_reserve_factor(&self) -> bool {
        self.reserve_factor.into_raw_units() != &BigUint::zero()
    }

    pub fn is_collateral(&self) -> bool {
        self.liquidation_threshold.into_raw_units() != &BigUint::zero()
    }
}

/// Accounting state of a reserve.
///
/// Indexes and rates are in ray, token quantities at the reserve decimals.
/// Supply and variable debt totals are scaled by their index, the stable total is the
/// principal snapshotted at `stable_debt_timestamp`.
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct ReserveState<M: ManagedTypeApi> {
    pub id: usize,
    pub liquidity_index: ManagedDecimal<M, NumDecimals>,
    pub variable_borrow_index: ManagedDecimal<M, NumDecimals>,
    pub current_liquidity_rate: ManagedDecimal<M, NumDecimals>,
    pub current_variable_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub current_stable_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub last_update_timestamp: u64,
    pub available_liquidity: ManagedDecimal<M, NumDecimals>,
    pub supply_scaled_total: ManagedDecimal<M, NumDecimals>,
    pub variable_debt_scaled_total: ManagedDecimal<M, NumDecimals>,
    pub stable_debt_principal_total: ManagedDecimal<M, NumDecimals>,
    pub average_stable_rate: ManagedDecimal<M, NumDecimals>,
    pub stable_debt_timestamp: u64,
}

impl<M: ManagedTypeApi> ReserveState<M> {
    pub fn has_variable_debt(&self) -> bool {
        self.variable_debt_scaled_total.into_raw_units() != &BigUint::zero()
    }
}

#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct ReserveRates<M: ManagedTypeApi> {
    pub liquidity_rate: ManagedDecimal<M, NumDecimals>,
    pub stable_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub variable_borrow_rate: ManagedDecimal<M, NumDecimals>,
}

/// Supply or variable debt held by one user, in units scaled by the reserve index.
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct ScaledPosition<M: ManagedTypeApi> {
    pub scaled_balance: ManagedDecimal<M, NumDecimals>,
    /// Index at the last mint, burn or transfer touching this position
    pub last_index: ManagedDecimal<M, NumDecimals>,
}

impl<M: ManagedTypeApi> ScaledPosition<M> {
    pub fn new(decimals: usize, index: ManagedDecimal<M, NumDecimals>) -> Self {
        ScaledPosition {
            scaled_balance: ManagedDecimal::from_raw_units(BigUint::zero(), decimals),
            last_index: index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scaled_balance.into_raw_units() == &BigUint::zero()
    }
}

#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct StableDebtPosition<M: ManagedTypeApi> {
    pub principal: ManagedDecimal<M, NumDecimals>,
    pub stable_rate: ManagedDecimal<M, NumDecimals>,
    pub last_update_timestamp: u64,
}

impl<M: ManagedTypeApi> StableDebtPosition<M> {
    pub fn new(decimals: usize, ray_precision: usize) -> Self {
        StableDebtPosition {
            principal: ManagedDecimal::from_raw_units(BigUint::zero(), decimals),
            stable_rate: ManagedDecimal::from_raw_units(BigUint::zero(), ray_precision),
            last_update_timestamp: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.principal.into_raw_units() == &BigUint::zero()
    }
}

/// Fixed-width set with one bit per reserve id.
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ReserveBitmap {
    pub low: u64,
    pub high: u64,
}

impl ReserveBitmap {
    pub fn is_set(&self, id: usize) -> bool {
        if id < 64 {
            self.low & (1u64 << id) != 0
        } else if id < MAX_NUMBER_RESERVES {
            self.high & (1u64 << (id - 64)) != 0
        } else {
            false
        }
    }

    pub fn set(&mut self, id: usize, value: bool) {
        let (word, bit) = if id < 64 {
            (&mut self.low, id)
        } else {
            (&mut self.high, id - 64)
        };

        if value {
            *word |= 1u64 << bit;
        } else {
            *word &= !(1u64 << bit);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    pub fn count(&self) -> u32 {
        self.low.count_ones() + self.high.count_ones()
    }
}

/// Which reserves a user borrows from and which of its deposits back its debt.
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct UserConfiguration {
    pub collateral: ReserveBitmap,
    pub borrowing: ReserveBitmap,
}

impl UserConfiguration {
    pub fn set_borrowing(&mut self, id: usize, borrowing: bool) {
        self.borrowing.set(id, borrowing);
    }

    pub fn set_using_as_collateral(&mut self, id: usize, using: bool) {
        self.collateral.set(id, using);
    }

    pub fn is_borrowing(&self, id: usize) -> bool {
        self.borrowing.is_set(id)
    }

    pub fn is_using_as_collateral(&self, id: usize) -> bool {
        self.collateral.is_set(id)
    }

    pub fn is_using_as_collateral_or_borrowing(&self, id: usize) -> bool {
        self.is_borrowing(id) || self.is_using_as_collateral(id)
    }

    pub fn is_borrowing_any(&self) -> bool {
        !self.borrowing.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.collateral.is_empty() && self.borrowing.is_empty()
    }
}

/// Aggregated view of a user's positions, valued in the oracle's base unit (wad).
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct UserAccountData<M: ManagedTypeApi> {
    pub total_collateral: ManagedDecimal<M, NumDecimals>,
    pub total_debt: ManagedDecimal<M, NumDecimals>,
    pub available_borrows: ManagedDecimal<M, NumDecimals>,
    pub current_liquidation_threshold: ManagedDecimal<M, NumDecimals>,
    pub ltv: ManagedDecimal<M, NumDecimals>,
    pub health_factor: ManagedDecimal<M, NumDecimals>,
}

#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, TypeAbi, Clone)]
pub struct UserReserveData<M: ManagedTypeApi> {
    pub current_supply_balance: ManagedDecimal<M, NumDecimals>,
    pub current_stable_debt: ManagedDecimal<M, NumDecimals>,
    pub current_variable_debt: ManagedDecimal<M, NumDecimals>,
    pub principal_stable_debt: ManagedDecimal<M, NumDecimals>,
    pub scaled_variable_debt: ManagedDecimal<M, NumDecimals>,
    pub stable_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub liquidity_rate: ManagedDecimal<M, NumDecimals>,
    pub stable_rate_last_updated: u64,
    pub usage_as_collateral_enabled: bool,
}

/// Collateral taken and debt repaid by one liquidation.
pub struct LiquidationAmounts<M: ManagedTypeApi> {
    pub collateral_amount: ManagedDecimal<M, NumDecimals>,
    pub debt_amount_needed: ManagedDecimal<M, NumDecimals>,
}
