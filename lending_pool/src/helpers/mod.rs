multiversx_sc::imports!();

use common_constants::HEALTH_FACTOR_LIQUIDATION_THRESHOLD;
use common_structs::{ReserveConfiguration, ReserveState, UserAccountData, UserConfiguration};

use crate::{oracle, positions, storage};

/// Valuation of user positions across reserves.
///
/// Balances are read with the on-the-fly indexes of each reserve, so the numbers match
/// what an update at the current block would store, without writing anything.
#[multiversx_sc::module]
pub trait GenericLogicModule:
    storage::Storage
    + oracle::OracleModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + common_events::EventsModule
    + positions::supply::SupplyPositionModule
    + positions::variable_debt::VariableDebtModule
    + positions::stable_debt::StableDebtModule
{
    fn get_user_configuration(&self, user: &ManagedAddress) -> UserConfiguration {
        let mapper = self.user_config(user);
        if mapper.is_empty() {
            UserConfiguration::default()
        } else {
            mapper.get()
        }
    }

    /// Supply balance of `user` including interest up to `now`.
    fn get_supply_balance(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        config: &ReserveConfiguration<Self::Api>,
        state: &ReserveState<Self::Api>,
        now: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled = self.get_scaled_supply(asset, user, config.decimals);
        self.ray_mul(&scaled, &self.normalized_income(state, now))
    }

    /// Stable and variable debt of `user` including interest up to `now`.
    fn get_user_current_debt(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        config: &ReserveConfiguration<Self::Api>,
        state: &ReserveState<Self::Api>,
        now: u64,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let stable_debt = self.get_stable_debt(asset, user, config.decimals, now);
        let scaled_variable = self.get_scaled_variable_debt(asset, user, config.decimals);
        let variable_debt = self.ray_mul(&scaled_variable, &self.normalized_debt(state, now));

        (stable_debt, variable_debt)
    }

    /// Aggregates the collateral and debt of `user` over every reserve flagged in their
    /// configuration.
    ///
    /// **Process**:
    /// 1. Collateral counts only for reserves enabled as collateral with a non zero
    ///    liquidation threshold.
    /// 2. LTV and liquidation threshold are averaged, weighted by collateral value.
    /// 3. The health factor is `percent_mul(collateral, threshold) / debt`, saturated when
    ///    there is no debt.
    fn calculate_user_account_data(&self, user: &ManagedAddress) -> UserAccountData<Self::Api> {
        let user_config = self.get_user_configuration(user);
        let now = self.blockchain().get_block_timestamp();

        let mut total_collateral = self.wad_zero();
        let mut total_debt = self.wad_zero();
        let mut ltv_weight = BigUint::zero();
        let mut threshold_weight = BigUint::zero();

        if !user_config.is_empty() {
            for (id, asset) in self.reserves_list().iter().enumerate() {
                if !user_config.is_using_as_collateral_or_borrowing(id) {
                    continue;
                }

                let config = self.reserve_config(&asset).get();
                let state = self.reserve_state(&asset).get();
                let price = self.get_asset_price(&asset);

                if config.is_collateral() && user_config.is_using_as_collateral(id) {
                    let balance = self.get_supply_balance(&asset, user, &config, &state, now);
                    let value = self.get_asset_value(&balance, &price, config.decimals);

                    ltv_weight += value.into_raw_units() * config.ltv.into_raw_units();
                    threshold_weight +=
                        value.into_raw_units() * config.liquidation_threshold.into_raw_units();
                    total_collateral += &value;
                }

                if user_config.is_borrowing(id) {
                    let (stable_debt, variable_debt) =
                        self.get_user_current_debt(&asset, user, &config, &state, now);
                    let debt = stable_debt + variable_debt;
                    total_debt += &self.get_asset_value(&debt, &price, config.decimals);
                }
            }
        }

        let (ltv, liquidation_threshold) = if total_collateral == self.wad_zero() {
            (self.bps_zero(), self.bps_zero())
        } else {
            (
                self.to_decimal_bps(ltv_weight / total_collateral.into_raw_units()),
                self.to_decimal_bps(threshold_weight / total_collateral.into_raw_units()),
            )
        };

        let health_factor =
            self.calculate_health_factor(&total_collateral, &total_debt, &liquidation_threshold);
        let available_borrows =
            self.calculate_available_borrows(&total_collateral, &total_debt, &ltv);

        UserAccountData {
            total_collateral,
            total_debt,
            available_borrows,
            current_liquidation_threshold: liquidation_threshold,
            ltv,
            health_factor,
        }
    }

    /// `wad_div(percent_mul(collateral, threshold), debt)`, max uint256 without debt.
    fn calculate_health_factor(
        &self,
        total_collateral: &ManagedDecimal<Self::Api, NumDecimals>,
        total_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        liquidation_threshold: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if *total_debt == self.wad_zero() {
            return self.to_decimal_wad(self.max_uint256());
        }

        let weighted_collateral = self.percent_mul(total_collateral, liquidation_threshold);
        self.wad_div(&weighted_collateral, total_debt)
    }

    fn calculate_available_borrows(
        &self,
        total_collateral: &ManagedDecimal<Self::Api, NumDecimals>,
        total_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        ltv: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let borrowing_power = self.percent_mul(total_collateral, ltv);
        self.saturating_sub(&borrowing_power, total_debt)
    }

    /// Whether `user` stays above the liquidation threshold after giving up `amount` of
    /// their collateral in `asset`.
    fn balance_decrease_allowed(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> bool {
        let user_config = self.get_user_configuration(user);
        let state = self.reserve_state(asset).get();
        if !user_config.is_borrowing_any() || !user_config.is_using_as_collateral(state.id) {
            return true;
        }

        let config = self.reserve_config(asset).get();
        if !config.is_collateral() {
            return true;
        }

        let account = self.calculate_user_account_data(user);
        if account.total_debt == self.wad_zero() {
            return true;
        }

        let price = self.get_asset_price(asset);
        let decrease_value = self.get_asset_value(amount, &price, config.decimals);
        let collateral_after = self.saturating_sub(&account.total_collateral, &decrease_value);
        if collateral_after == self.wad_zero() {
            return false;
        }

        let weighted_before = account.total_collateral.into_raw_units()
            * account.current_liquidation_threshold.into_raw_units();
        let weighted_removed =
            decrease_value.into_raw_units() * config.liquidation_threshold.into_raw_units();
        let weighted_after = if weighted_before > weighted_removed {
            weighted_before - weighted_removed
        } else {
            BigUint::zero()
        };
        let threshold_after =
            self.to_decimal_bps(weighted_after / collateral_after.into_raw_units());

        let health_factor_after =
            self.calculate_health_factor(&collateral_after, &account.total_debt, &threshold_after);

        health_factor_after >= self.liquidation_health_factor()
    }

    /// Health factor under which an account can be liquidated.
    fn liquidation_health_factor(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_wad(BigUint::from(HEALTH_FACTOR_LIQUIDATION_THRESHOLD))
    }
}
