multiversx_sc::imports!();

use common_structs::{
    ReserveConfiguration, ReserveState, UserAccountData, UserReserveData,
};

use crate::{helpers, oracle, positions, storage};

/// Read only queries. Balances and indexes are projected to the current block timestamp
/// without touching storage.
#[multiversx_sc::module]
pub trait ViewsModule:
    storage::Storage
    + oracle::OracleModule
    + helpers::GenericLogicModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + common_events::EventsModule
    + positions::supply::SupplyPositionModule
    + positions::variable_debt::VariableDebtModule
    + positions::stable_debt::StableDebtModule
{
    #[view(getUserAccountData)]
    fn get_user_account_data(&self, user: ManagedAddress) -> UserAccountData<Self::Api> {
        self.calculate_user_account_data(&user)
    }

    #[view(getUserReserveData)]
    fn get_user_reserve_data(
        &self,
        asset: TokenIdentifier,
        user: ManagedAddress,
    ) -> UserReserveData<Self::Api> {
        let config = self.reserve_config(&asset).get();
        let state = self.reserve_state(&asset).get();
        let now = self.blockchain().get_block_timestamp();

        let (current_stable_debt, current_variable_debt) =
            self.get_user_current_debt(&asset, &user, &config, &state, now);
        let stable_position = self.get_stable_debt_position(&asset, &user, config.decimals);

        UserReserveData {
            current_supply_balance: self.get_supply_balance(&asset, &user, &config, &state, now),
            current_stable_debt,
            current_variable_debt,
            principal_stable_debt: stable_position.principal,
            scaled_variable_debt: self.get_scaled_variable_debt(&asset, &user, config.decimals),
            stable_borrow_rate: stable_position.stable_rate,
            liquidity_rate: state.current_liquidity_rate.clone(),
            stable_rate_last_updated: stable_position.last_update_timestamp,
            usage_as_collateral_enabled: self
                .get_user_configuration(&user)
                .is_using_as_collateral(state.id),
        }
    }

    #[view(getReserveData)]
    fn get_reserve_data(&self, asset: TokenIdentifier) -> ReserveState<Self::Api> {
        self.reserve_state(&asset).get()
    }

    #[view(getReserveConfiguration)]
    fn get_reserve_configuration(&self, asset: TokenIdentifier) -> ReserveConfiguration<Self::Api> {
        self.reserve_config(&asset).get()
    }

    #[view(getReserveNormalizedIncome)]
    fn get_reserve_normalized_income(
        &self,
        asset: TokenIdentifier,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let state = self.reserve_state(&asset).get();
        self.normalized_income(&state, self.blockchain().get_block_timestamp())
    }

    #[view(getReserveNormalizedVariableDebt)]
    fn get_reserve_normalized_variable_debt(
        &self,
        asset: TokenIdentifier,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let state = self.reserve_state(&asset).get();
        self.normalized_debt(&state, self.blockchain().get_block_timestamp())
    }

    #[view(getSupplyBalance)]
    fn get_supply_balance_view(
        &self,
        asset: TokenIdentifier,
        user: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let config = self.reserve_config(&asset).get();
        let state = self.reserve_state(&asset).get();
        self.get_supply_balance(
            &asset,
            &user,
            &config,
            &state,
            self.blockchain().get_block_timestamp(),
        )
    }

    #[view(getVariableDebtBalance)]
    fn get_variable_debt_balance(
        &self,
        asset: TokenIdentifier,
        user: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let config = self.reserve_config(&asset).get();
        let state = self.reserve_state(&asset).get();
        let scaled = self.get_scaled_variable_debt(&asset, &user, config.decimals);
        self.ray_mul(
            &scaled,
            &self.normalized_debt(&state, self.blockchain().get_block_timestamp()),
        )
    }

    #[view(getStableDebtBalance)]
    fn get_stable_debt_balance(
        &self,
        asset: TokenIdentifier,
        user: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let decimals = self.reserve_config(&asset).get().decimals;
        self.get_stable_debt(
            &asset,
            &user,
            decimals,
            self.blockchain().get_block_timestamp(),
        )
    }

    #[view(getAssetPrice)]
    fn get_asset_price_view(&self, asset: TokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_asset_price(&asset)
    }

    #[view(getMarketBorrowRate)]
    fn get_market_borrow_rate(&self, asset: TokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_ray(self.market_borrow_rate(&asset).get())
    }
}
