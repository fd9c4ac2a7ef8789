use common_structs::{InterestRateStrategy, ReserveConfiguration, ReserveState};

multiversx_sc::imports!();

/// In-memory view of one reserve for the duration of an operation.
///
/// **Scope**: Loads the state, configuration, strategy and market rate of a reserve once.
///
/// **Goal**: Let an operation accrue, mutate and reprice the reserve against a single copy,
/// written back in one go when the cache is dropped.
///
/// Only `state` is persisted on drop. Operations touching two reserves must drop the first
/// cache before loading the second, so the same asset is never held twice.
pub struct ReserveCache<'a, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    sc_ref: &'a C,
    pub asset: TokenIdentifier<C::Api>,
    pub state: ReserveState<C::Api>,
    pub config: ReserveConfiguration<C::Api>,
    pub strategy: InterestRateStrategy<C::Api>,
    /// Market reference for the stable rate curve, in ray.
    pub market_borrow_rate: ManagedDecimal<C::Api, NumDecimals>,
    /// Zero at the reserve decimals.
    pub zero: ManagedDecimal<C::Api, NumDecimals>,
    /// Block timestamp of the operation.
    pub timestamp: u64,
}

impl<'a, C> ReserveCache<'a, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    /// Reads the reserve from storage. The caller must have checked that `asset` is listed.
    pub fn new(sc_ref: &'a C, asset: &TokenIdentifier<C::Api>) -> Self {
        let config = sc_ref.reserve_config(asset).get();
        ReserveCache {
            zero: sc_ref.to_decimal(BigUint::zero(), config.decimals),
            state: sc_ref.reserve_state(asset).get(),
            strategy: sc_ref.rate_strategy(asset).get(),
            market_borrow_rate: sc_ref.to_decimal_ray(sc_ref.market_borrow_rate(asset).get()),
            timestamp: sc_ref.blockchain().get_block_timestamp(),
            asset: asset.clone(),
            config,
            sc_ref,
        }
    }
}

impl<C> Drop for ReserveCache<'_, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    fn drop(&mut self) {
        // commit the accrued and mutated reserve state
        self.sc_ref.reserve_state(&self.asset).set(&self.state);
    }
}

impl<C> ReserveCache<'_, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    /// Raw token units to a decimal at the reserve decimals.
    pub fn get_decimal_value(&self, value: &BigUint<C::Api>) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.to_decimal(value.clone(), self.config.decimals)
    }

    pub fn has_liquidity(&self, amount: &ManagedDecimal<C::Api, NumDecimals>) -> bool {
        self.state.available_liquidity >= *amount
    }

    pub fn get_scaled_supply_amount(
        &self,
        amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.ray_div(amount, &self.state.liquidity_index)
    }

    pub fn get_original_supply_amount(
        &self,
        scaled_amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.ray_mul(scaled_amount, &self.state.liquidity_index)
    }

    pub fn get_scaled_debt_amount(
        &self,
        amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.ray_div(amount, &self.state.variable_borrow_index)
    }

    pub fn get_original_debt_amount(
        &self,
        scaled_amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .ray_mul(scaled_amount, &self.state.variable_borrow_index)
    }

    pub fn total_variable_debt(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.get_original_debt_amount(&self.state.variable_debt_scaled_total)
    }

    /// Total supply including accrued interest, at the current liquidity index.
    pub fn total_supply(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.get_original_supply_amount(&self.state.supply_scaled_total)
    }
}
