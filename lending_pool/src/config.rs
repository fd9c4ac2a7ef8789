multiversx_sc::imports!();

use common_constants::{MAX_NUMBER_RESERVES, MAX_RESERVE_DECIMALS, MAX_VALID_PERCENT_PARAMETER};
use common_errors::*;
use common_structs::{InterestRateStrategy, ReserveConfiguration, ReserveState};

use crate::storage;

/// Owner operations: listing reserves, their risk parameters, the rate curves and the
/// price and market rate feeds.
///
/// Percentages (`ltv`, `threshold`, `bonus`, `reserve_factor`) are in basis points,
/// curve parameters and market rates in ray, prices in wad.
#[multiversx_sc::module]
pub trait ConfigModule:
    storage::Storage + common_events::EventsModule + common_math::SharedMathModule
{
    /// Lists `asset` as a new reserve.
    ///
    /// The reserve takes the next free id, starts active with both indexes at one ray,
    /// every rate at zero and borrowing disabled.
    #[allow(clippy::too_many_arguments)]
    #[only_owner]
    #[endpoint(initReserve)]
    fn init_reserve(
        &self,
        asset: TokenIdentifier,
        decimals: usize,
        optimal_utilization: BigUint,
        base_variable_borrow_rate: BigUint,
        variable_rate_slope1: BigUint,
        variable_rate_slope2: BigUint,
        stable_rate_slope1: BigUint,
        stable_rate_slope2: BigUint,
    ) {
        require!(
            self.reserve_state(&asset).is_empty(),
            ERROR_RESERVE_ALREADY_INITIALIZED
        );
        require!(
            self.reserves_list().len() < MAX_NUMBER_RESERVES,
            ERROR_NO_MORE_RESERVES_ALLOWED
        );
        require!(decimals <= MAX_RESERVE_DECIMALS, ERROR_INVALID_DECIMALS);

        self.reserves_list().push(&asset);
        let id = self.reserves_list().len() - 1;
        let now = self.blockchain().get_block_timestamp();
        let zero = self.to_decimal(BigUint::zero(), decimals);

        let state = ReserveState {
            id,
            liquidity_index: self.ray(),
            variable_borrow_index: self.ray(),
            current_liquidity_rate: self.ray_zero(),
            current_variable_borrow_rate: self.ray_zero(),
            current_stable_borrow_rate: self.ray_zero(),
            last_update_timestamp: now,
            available_liquidity: zero.clone(),
            supply_scaled_total: zero.clone(),
            variable_debt_scaled_total: zero.clone(),
            stable_debt_principal_total: zero,
            average_stable_rate: self.ray_zero(),
            stable_debt_timestamp: now,
        };

        let config = ReserveConfiguration {
            ltv: self.bps_zero(),
            liquidation_threshold: self.bps_zero(),
            liquidation_bonus: self.bps_zero(),
            reserve_factor: self.bps_zero(),
            decimals,
            is_active: true,
            is_frozen: false,
            borrowing_enabled: false,
            stable_borrowing_enabled: false,
        };

        let strategy = InterestRateStrategy {
            optimal_utilization: self.to_decimal_ray(optimal_utilization),
            base_variable_borrow_rate: self.to_decimal_ray(base_variable_borrow_rate),
            variable_rate_slope1: self.to_decimal_ray(variable_rate_slope1),
            variable_rate_slope2: self.to_decimal_ray(variable_rate_slope2),
            stable_rate_slope1: self.to_decimal_ray(stable_rate_slope1),
            stable_rate_slope2: self.to_decimal_ray(stable_rate_slope2),
        };

        self.reserve_state(&asset).set(&state);
        self.reserve_config(&asset).set(&config);
        self.rate_strategy(&asset).set(&strategy);

        self.reserve_initialized_event(&asset, id, decimals, &strategy);
    }

    /// Sets the collateral parameters of a reserve. A zero `threshold` disables the asset as
    /// collateral, which is only allowed while nobody supplies it.
    #[only_owner]
    #[endpoint(configureReserveAsCollateral)]
    fn configure_reserve_as_collateral(
        &self,
        asset: TokenIdentifier,
        ltv: usize,
        threshold: usize,
        bonus: usize,
    ) {
        self.require_listed_reserve(&asset);

        require!(ltv <= threshold, ERROR_INVALID_CONFIGURATION);
        if threshold != 0 {
            let threshold_with_bonus = self.percent_mul(
                &self.to_decimal_bps(BigUint::from(threshold)),
                &self.to_decimal_bps(BigUint::from(bonus)),
            );
            require!(
                bonus > common_constants::BPS && threshold_with_bonus <= self.bps(),
                ERROR_INVALID_CONFIGURATION
            );
        } else {
            require!(bonus == 0, ERROR_INVALID_CONFIGURATION);
            self.require_no_liquidity(&asset);
        }

        require!(ltv <= MAX_VALID_PERCENT_PARAMETER, ERROR_INVALID_LTV);
        require!(
            threshold <= MAX_VALID_PERCENT_PARAMETER,
            ERROR_INVALID_LIQ_THRESHOLD
        );
        require!(bonus <= MAX_VALID_PERCENT_PARAMETER, ERROR_INVALID_LIQ_BONUS);

        let mut config = self.reserve_config(&asset).get();
        config.ltv = self.to_decimal_bps(BigUint::from(ltv));
        config.liquidation_threshold = self.to_decimal_bps(BigUint::from(threshold));
        config.liquidation_bonus = self.to_decimal_bps(BigUint::from(bonus));
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(enableBorrowingOnReserve)]
    fn enable_borrowing_on_reserve(&self, asset: TokenIdentifier, stable_borrow_rate_enabled: bool) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.borrowing_enabled = true;
        config.stable_borrowing_enabled = stable_borrow_rate_enabled;
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(disableBorrowingOnReserve)]
    fn disable_borrowing_on_reserve(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.borrowing_enabled = false;
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(enableReserveStableRate)]
    fn enable_reserve_stable_rate(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.stable_borrowing_enabled = true;
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(disableReserveStableRate)]
    fn disable_reserve_stable_rate(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.stable_borrowing_enabled = false;
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(activateReserve)]
    fn activate_reserve(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.is_active = true;
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(deactivateReserve)]
    fn deactivate_reserve(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        self.require_no_liquidity(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.is_active = false;
        self.store_reserve_configuration(&asset, &config);
    }

    /// A frozen reserve accepts no new deposits, borrows or rate swaps. Repayments,
    /// withdrawals and liquidations keep working.
    #[only_owner]
    #[endpoint(freezeReserve)]
    fn freeze_reserve(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.is_frozen = true;
        self.store_reserve_configuration(&asset, &config);
    }

    #[only_owner]
    #[endpoint(unfreezeReserve)]
    fn unfreeze_reserve(&self, asset: TokenIdentifier) {
        self.require_listed_reserve(&asset);
        let mut config = self.reserve_config(&asset).get();
        config.is_frozen = false;
        self.store_reserve_configuration(&asset, &config);
    }

    /// Share of the borrow interest minted to the treasury, in basis points.
    #[only_owner]
    #[endpoint(setReserveFactor)]
    fn set_reserve_factor(&self, asset: TokenIdentifier, reserve_factor: usize) {
        self.require_listed_reserve(&asset);
        require!(
            reserve_factor <= MAX_VALID_PERCENT_PARAMETER,
            ERROR_INVALID_RESERVE_FACTOR
        );

        let mut config = self.reserve_config(&asset).get();
        config.reserve_factor = self.to_decimal_bps(BigUint::from(reserve_factor));
        self.store_reserve_configuration(&asset, &config);
    }

    #[allow(clippy::too_many_arguments)]
    #[only_owner]
    #[endpoint(setReserveInterestRateStrategy)]
    fn set_reserve_interest_rate_strategy(
        &self,
        asset: TokenIdentifier,
        optimal_utilization: BigUint,
        base_variable_borrow_rate: BigUint,
        variable_rate_slope1: BigUint,
        variable_rate_slope2: BigUint,
        stable_rate_slope1: BigUint,
        stable_rate_slope2: BigUint,
    ) {
        self.require_listed_reserve(&asset);

        let strategy = InterestRateStrategy {
            optimal_utilization: self.to_decimal_ray(optimal_utilization),
            base_variable_borrow_rate: self.to_decimal_ray(base_variable_borrow_rate),
            variable_rate_slope1: self.to_decimal_ray(variable_rate_slope1),
            variable_rate_slope2: self.to_decimal_ray(variable_rate_slope2),
            stable_rate_slope1: self.to_decimal_ray(stable_rate_slope1),
            stable_rate_slope2: self.to_decimal_ray(stable_rate_slope2),
        };
        self.rate_strategy(&asset).set(&strategy);

        self.reserve_interest_rate_strategy_changed_event(&asset, &strategy);
    }

    /// Price of one whole token in wad of the common unit.
    #[only_owner]
    #[endpoint(setAssetPrice)]
    fn set_asset_price(&self, asset: TokenIdentifier, price: BigUint) {
        self.asset_price(&asset).set(&price);
        self.asset_price_updated_event(&asset, &self.to_decimal_wad(price));
    }

    /// Market reference borrow rate of `asset` in ray, the base of its stable rate curve.
    #[only_owner]
    #[endpoint(setMarketBorrowRate)]
    fn set_market_borrow_rate(&self, asset: TokenIdentifier, rate: BigUint) {
        self.market_borrow_rate(&asset).set(&rate);
        self.market_borrow_rate_updated_event(&asset, &self.to_decimal_ray(rate));
    }

    fn require_listed_reserve(&self, asset: &TokenIdentifier) {
        require!(!self.reserve_state(asset).is_empty(), ERROR_NO_ACTIVE_RESERVE);
    }

    fn require_no_liquidity(&self, asset: &TokenIdentifier) {
        let state = self.reserve_state(asset).get();
        require!(
            state.available_liquidity.into_raw_units() == &BigUint::zero()
                && state.current_liquidity_rate.into_raw_units() == &BigUint::zero(),
            ERROR_RESERVE_LIQUIDITY_NOT_0
        );
    }

    fn store_reserve_configuration(
        &self,
        asset: &TokenIdentifier,
        config: &ReserveConfiguration<Self::Api>,
    ) {
        self.reserve_config(asset).set(config);
        self.reserve_configuration_updated_event(asset, config);
    }
}
