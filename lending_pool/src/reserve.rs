multiversx_sc::imports!();

use common_errors::ERROR_LIQUIDITY_INDEX_OVERFLOW;
use common_structs::ReserveState;

use crate::{cache::ReserveCache, positions, storage};

/// Composes the pure accrual functions into the update protocol of a reserve.
///
/// Every reserve touching operation runs `update_state` before mutating positions and
/// `update_interest_rates` after, both against the same `ReserveCache`.
#[multiversx_sc::module]
pub trait ReserveLogicModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + positions::supply::SupplyPositionModule
{
    /// Catches the reserve up to the block timestamp and mints the treasury share of the
    /// interest accrued over the elapsed period.
    fn update_state(&self, cache: &mut ReserveCache<Self>) {
        let previous = cache.state.clone();
        cache.state = self.advance(&previous, cache.timestamp);

        if cache.config.has_reserve_factor() {
            self.accrue_to_treasury(cache, &previous);
        }
    }

    /// Mints `reserve_factor` of the debt growth since the previous update to the treasury.
    ///
    /// **Formula**:
    /// - `accrued = variable(new index) + stable(now) - variable(old index) - stable(previous update)`
    /// - `minted = percent_mul(accrued, reserve_factor)`
    fn accrue_to_treasury(&self, cache: &mut ReserveCache<Self>, previous: &ReserveState<Self::Api>) {
        let previous_variable_debt = self.ray_mul(
            &previous.variable_debt_scaled_total,
            &previous.variable_borrow_index,
        );
        let previous_stable_debt = self.compound_principal(
            &previous.stable_debt_principal_total,
            &previous.average_stable_rate,
            previous.stable_debt_timestamp,
            previous.last_update_timestamp,
        );

        let current_variable_debt = cache.total_variable_debt();
        let current_stable_debt = self.stable_debt_total(&cache.state, cache.timestamp);

        let accrued = self.saturating_sub(
            &(current_variable_debt + current_stable_debt),
            &(previous_variable_debt + previous_stable_debt),
        );
        let amount_to_mint = self.percent_mul(&accrued, &cache.config.reserve_factor);

        if amount_to_mint > cache.zero {
            self.mint_to_treasury(cache, &amount_to_mint);
        }
    }

    /// Reprices the reserve from its post-mutation totals and stores the new rates.
    fn update_interest_rates(&self, cache: &mut ReserveCache<Self>) {
        let rates = self.reprice(
            &cache.state,
            &cache.config,
            &cache.strategy,
            &cache.market_borrow_rate,
            cache.timestamp,
        );

        cache.state.current_liquidity_rate = rates.liquidity_rate;
        cache.state.current_stable_borrow_rate = rates.stable_borrow_rate;
        cache.state.current_variable_borrow_rate = rates.variable_borrow_rate;

        self.reserve_data_updated_event(
            &cache.asset,
            &cache.state.current_liquidity_rate,
            &cache.state.current_stable_borrow_rate,
            &cache.state.current_variable_borrow_rate,
            &cache.state.liquidity_index,
            &cache.state.variable_borrow_index,
        );
    }

    /// Distributes `amount` to the current suppliers at once by growing the liquidity index.
    ///
    /// **Formula**:
    /// - `index = ray_mul(ray_div(amount, total_supply) + RAY, index)`, both amounts lifted
    ///   to ray first.
    fn cumulate_to_liquidity_index(
        &self,
        cache: &mut ReserveCache<Self>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let total_liquidity = cache.total_supply();
        let amount_to_liquidity_ratio =
            self.ray_div(&self.wad_to_ray(amount), &self.wad_to_ray(&total_liquidity));

        let growth = amount_to_liquidity_ratio + self.ray();
        let next_index = self.ray_mul(&growth, &cache.state.liquidity_index);
        require!(
            next_index.into_raw_units() <= &self.max_uint128(),
            ERROR_LIQUIDITY_INDEX_OVERFLOW
        );

        cache.state.liquidity_index = next_index;
    }
}
