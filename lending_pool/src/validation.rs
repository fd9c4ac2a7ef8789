multiversx_sc::imports!();

use common_constants::{
    MAX_STABLE_RATE_BORROW_SIZE_PERCENT, REBALANCE_UP_LIQUIDITY_RATE_THRESHOLD,
    REBALANCE_UP_USAGE_RATIO_THRESHOLD,
};
use common_errors::*;
use common_structs::{InterestRateMode, ReserveConfiguration, UserAccountData, UserConfiguration};

use crate::{cache::ReserveCache, helpers, oracle, positions, storage};

/// Preconditions of every user operation. All checks run before any mutation.
#[multiversx_sc::module]
pub trait ValidationModule:
    storage::Storage
    + oracle::OracleModule
    + helpers::GenericLogicModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + common_events::EventsModule
    + positions::supply::SupplyPositionModule
    + positions::variable_debt::VariableDebtModule
    + positions::stable_debt::StableDebtModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Blocks user operations while paused or while a flash loan is executing.
    fn require_operational(&self) {
        require!(self.not_paused(), ERROR_PAUSED);
        require!(!self.flash_loan_ongoing().get(), ERROR_REENTRANCY_NOT_ALLOWED);
    }

    fn require_reserve_listed(&self, asset: &TokenIdentifier) {
        require!(!self.reserve_state(asset).is_empty(), ERROR_NO_ACTIVE_RESERVE);
    }

    fn require_amount_not_zero(&self, amount: &ManagedDecimal<Self::Api, NumDecimals>) {
        require!(
            amount.into_raw_units() != &BigUint::zero(),
            ERROR_INVALID_AMOUNT
        );
    }

    fn require_active(&self, cache: &ReserveCache<Self>) {
        require!(cache.config.is_active(), ERROR_NO_ACTIVE_RESERVE);
    }

    fn require_active_not_frozen(&self, cache: &ReserveCache<Self>) {
        self.require_active(cache);
        require!(!cache.config.is_frozen(), ERROR_RESERVE_FROZEN);
    }

    fn validate_deposit(
        &self,
        cache: &ReserveCache<Self>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        self.require_amount_not_zero(amount);
        self.require_active_not_frozen(cache);
    }

    fn validate_withdraw(
        &self,
        cache: &ReserveCache<Self>,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        user_balance: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        self.require_amount_not_zero(amount);
        require!(
            amount <= user_balance,
            ERROR_NOT_ENOUGH_AVAILABLE_USER_BALANCE
        );
        self.require_active(cache);
        require!(
            self.balance_decrease_allowed(&cache.asset, user, amount),
            ERROR_TRANSFER_NOT_ALLOWED
        );
    }

    /// Borrow checks, run against the account of `on_behalf_of`.
    ///
    /// **Process**:
    /// 1. Reserve flags, amount and rate mode.
    /// 2. The account has collateral and a health factor above one.
    /// 3. Existing debt plus the new borrow stays within the LTV of the collateral.
    /// 4. Stable borrows may not be backed by the same asset and are capped at a share of the
    ///    available liquidity.
    fn validate_borrow(
        &self,
        cache: &ReserveCache<Self>,
        on_behalf_of: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        rate_mode: InterestRateMode,
    ) {
        self.require_active_not_frozen(cache);
        self.require_amount_not_zero(amount);
        require!(cache.config.can_borrow(), ERROR_BORROWING_NOT_ENABLED);
        require!(
            rate_mode.is_borrow_mode(),
            ERROR_INVALID_INTEREST_RATE_MODE_SELECTED
        );

        let account = self.calculate_user_account_data(on_behalf_of);
        require!(
            account.total_collateral > self.wad_zero(),
            ERROR_COLLATERAL_BALANCE_IS_ZERO
        );
        require!(
            account.health_factor > self.liquidation_health_factor(),
            ERROR_HEALTH_FACTOR_LOWER_THAN_LIQUIDATION_THRESHOLD
        );

        let price = self.get_asset_price(&cache.asset);
        require!(price > self.wad_zero(), ERROR_ASSET_NOT_PRICED);
        let amount_value = self.get_asset_value(amount, &price, cache.config.decimals);
        let collateral_needed =
            self.percent_div(&(account.total_debt.clone() + amount_value), &account.ltv);
        require!(
            collateral_needed <= account.total_collateral,
            ERROR_COLLATERAL_CANNOT_COVER_NEW_BORROW
        );

        if rate_mode == InterestRateMode::Stable {
            require!(
                cache.config.can_borrow_stable(),
                ERROR_STABLE_BORROWING_NOT_ENABLED
            );

            let user_config = self.get_user_configuration(on_behalf_of);
            let supply_balance = self.get_supply_balance(
                &cache.asset,
                on_behalf_of,
                &cache.config,
                &cache.state,
                cache.timestamp,
            );
            self.require_not_self_collateralized(cache, &user_config, amount, &supply_balance);

            let max_loan_size = self.percent_mul(
                &cache.state.available_liquidity,
                &self.to_decimal_bps(BigUint::from(MAX_STABLE_RATE_BORROW_SIZE_PERCENT)),
            );
            require!(
                *amount <= max_loan_size,
                ERROR_AMOUNT_BIGGER_THAN_MAX_LOAN_SIZE_STABLE
            );
        }

        require!(
            cache.has_liquidity(amount),
            ERROR_NOT_ENOUGH_LIQUIDITY_TO_BORROW
        );
    }

    /// A stable borrow must not be covered by a deposit of the same asset used as collateral.
    fn require_not_self_collateralized(
        &self,
        cache: &ReserveCache<Self>,
        user_config: &UserConfiguration,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        supply_balance: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        require!(
            !user_config.is_using_as_collateral(cache.state.id)
                || cache.config.ltv == self.bps_zero()
                || amount > supply_balance,
            ERROR_COLLATERAL_SAME_AS_BORROWING_CURRENCY
        );
    }

    fn validate_repay(
        &self,
        cache: &ReserveCache<Self>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        rate_mode: InterestRateMode,
        stable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        variable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        self.require_active(cache);
        self.require_amount_not_zero(amount);

        let has_debt_of_mode = match rate_mode {
            InterestRateMode::Stable => *stable_debt > cache.zero,
            InterestRateMode::Variable => *variable_debt > cache.zero,
            InterestRateMode::None => false,
        };
        require!(has_debt_of_mode, ERROR_NO_DEBT_OF_SELECTED_TYPE);
    }

    fn validate_swap_rate_mode(
        &self,
        cache: &ReserveCache<Self>,
        user: &ManagedAddress,
        stable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        variable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        current_rate_mode: InterestRateMode,
    ) {
        self.require_active_not_frozen(cache);

        match current_rate_mode {
            InterestRateMode::Stable => {
                require!(
                    *stable_debt > cache.zero,
                    ERROR_NO_STABLE_RATE_LOAN_IN_RESERVE
                );
            },
            InterestRateMode::Variable => {
                require!(
                    *variable_debt > cache.zero,
                    ERROR_NO_VARIABLE_RATE_LOAN_IN_RESERVE
                );
                require!(
                    cache.config.can_borrow_stable(),
                    ERROR_STABLE_BORROWING_NOT_ENABLED
                );

                let user_config = self.get_user_configuration(user);
                let supply_balance = self.get_supply_balance(
                    &cache.asset,
                    user,
                    &cache.config,
                    &cache.state,
                    cache.timestamp,
                );
                let total_debt = stable_debt.clone() + variable_debt.clone();
                self.require_not_self_collateralized(
                    cache,
                    &user_config,
                    &total_debt,
                    &supply_balance,
                );
            },
            InterestRateMode::None => {
                sc_panic!(ERROR_INVALID_INTEREST_RATE_MODE_SELECTED);
            },
        }
    }

    /// A stable position may be moved to the current stable rate only when the reserve is
    /// almost fully used and suppliers earn too little compared to the variable curve.
    fn validate_rebalance_stable_borrow_rate(
        &self,
        cache: &ReserveCache<Self>,
        user_stable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        self.require_active(cache);
        require!(
            *user_stable_debt > cache.zero,
            ERROR_NOT_ENOUGH_STABLE_BORROW_BALANCE
        );

        let total_debt =
            self.stable_debt_total(&cache.state, cache.timestamp) + cache.total_variable_debt();
        let usage_ratio = self.calculate_utilization(&total_debt, &cache.state.available_liquidity);

        let max_variable_rate = self.max_variable_borrow_rate(&cache.strategy);
        let liquidity_rate_ceiling = self.percent_mul(
            &max_variable_rate,
            &self.to_decimal_bps(BigUint::from(REBALANCE_UP_LIQUIDITY_RATE_THRESHOLD)),
        );

        require!(
            usage_ratio >= self.to_decimal_ray(BigUint::from(REBALANCE_UP_USAGE_RATIO_THRESHOLD))
                && cache.state.current_liquidity_rate <= liquidity_rate_ceiling,
            ERROR_INTEREST_RATE_REBALANCE_CONDITIONS_NOT_MET
        );
    }

    fn validate_set_use_as_collateral(
        &self,
        cache: &ReserveCache<Self>,
        user: &ManagedAddress,
        use_as_collateral: bool,
        supply_balance: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        require!(
            *supply_balance > cache.zero,
            ERROR_UNDERLYING_BALANCE_NOT_GREATER_THAN_0
        );
        require!(
            use_as_collateral || self.balance_decrease_allowed(&cache.asset, user, supply_balance),
            ERROR_DEPOSIT_ALREADY_IN_USE
        );
    }

    /// Liquidation checks against the account snapshot taken before any mutation.
    fn validate_liquidation_call(
        &self,
        collateral_config: &ReserveConfiguration<Self::Api>,
        collateral_id: usize,
        debt_config: &ReserveConfiguration<Self::Api>,
        user_config: &UserConfiguration,
        account: &UserAccountData<Self::Api>,
        user_total_debt: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        require!(
            collateral_config.is_active() && debt_config.is_active(),
            ERROR_NO_ACTIVE_RESERVE
        );
        require!(
            account.health_factor < self.liquidation_health_factor(),
            ERROR_HEALTH_FACTOR_NOT_BELOW_THRESHOLD
        );
        require!(
            collateral_config.is_collateral() && user_config.is_using_as_collateral(collateral_id),
            ERROR_COLLATERAL_CANNOT_BE_LIQUIDATED
        );
        require!(
            user_total_debt.into_raw_units() != &BigUint::zero(),
            ERROR_SPECIFIED_CURRENCY_NOT_BORROWED_BY_USER
        );
    }
}
