multiversx_sc::imports!();

use common_constants::LIQUIDATION_CLOSE_FACTOR_PERCENT;
use common_errors::{ERROR_COLLATERAL_CANNOT_BE_LIQUIDATED, ERROR_NOT_ENOUGH_LIQUIDITY_TO_LIQUIDATE};
use common_structs::{LiquidationAmounts, ReserveConfiguration};

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

#[multiversx_sc::module]
pub trait PositionLiquidationModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + oracle::OracleModule
    + helpers::GenericLogicModule
    + positions::supply::SupplyPositionModule
    + positions::variable_debt::VariableDebtModule
    + positions::stable_debt::StableDebtModule
    + reserve::ReserveLogicModule
    + validation::ValidationModule
    + utils::LendingUtilsModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Repays debt of an unhealthy `user` with the payment of `liquidator` and hands over
    /// collateral plus the liquidation bonus.
    ///
    /// **Process**:
    /// 1. Snapshots the account and validates it is liquidatable.
    /// 2. Caps the repaid debt at the close factor, or at the whole debt when the debt value
    ///    exceeds the collateral value.
    /// 3. Sizes the seized collateral and shrinks the repaid debt when the collateral
    ///    balance cannot cover it.
    /// 4. Debt reserve: accrue, burn variable debt first then stable, reprice.
    /// 5. Collateral reserve: either transfer supply to the liquidator, or accrue, burn and
    ///    pay out the underlying.
    /// 6. Refunds the part of the payment that was not needed.
    fn process_liquidation(
        &self,
        liquidator: &ManagedAddress,
        collateral_asset: &TokenIdentifier,
        user: &ManagedAddress,
        payment: &EsdtTokenPayment,
        receive_supply: bool,
    ) {
        let debt_asset = &payment.token_identifier;
        self.require_reserve_listed(collateral_asset);
        self.require_reserve_listed(debt_asset);

        let now = self.blockchain().get_block_timestamp();
        let collateral_config = self.reserve_config(collateral_asset).get();
        let collateral_state = self.reserve_state(collateral_asset).get();
        let debt_config = self.reserve_config(debt_asset).get();
        let debt_state = self.reserve_state(debt_asset).get();

        let user_config = self.get_user_configuration(user);
        let account = self.calculate_user_account_data(user);
        let (stable_debt, variable_debt) =
            self.get_user_current_debt(debt_asset, user, &debt_config, &debt_state, now);
        let user_total_debt = stable_debt.clone() + variable_debt.clone();

        self.validate_liquidation_call(
            &collateral_config,
            collateral_state.id,
            &debt_config,
            &user_config,
            &account,
            &user_total_debt,
        );

        let collateral_price = self.get_asset_price(collateral_asset);
        require!(
            collateral_price > self.wad_zero(),
            ERROR_COLLATERAL_CANNOT_BE_LIQUIDATED
        );
        let debt_price = self.get_asset_price(debt_asset);

        let max_liquidatable_debt = if account.total_debt > account.total_collateral {
            user_total_debt.clone()
        } else {
            self.percent_mul(
                &user_total_debt,
                &self.to_decimal_bps(BigUint::from(LIQUIDATION_CLOSE_FACTOR_PERCENT)),
            )
        };

        let debt_to_cover = self.to_decimal(payment.amount.clone(), debt_config.decimals);
        let user_collateral_balance = self.get_supply_balance(
            collateral_asset,
            user,
            &collateral_config,
            &collateral_state,
            now,
        );

        let mut actual_debt_to_liquidate =
            self.get_min(debt_to_cover.clone(), max_liquidatable_debt);
        let amounts = self.calculate_available_collateral_to_liquidate(
            &collateral_config,
            &debt_config,
            &collateral_price,
            &debt_price,
            &actual_debt_to_liquidate,
            &user_collateral_balance,
        );
        if amounts.debt_amount_needed < actual_debt_to_liquidate {
            actual_debt_to_liquidate = amounts.debt_amount_needed;
        }
        let seized_collateral = amounts.collateral_amount;

        if !receive_supply {
            require!(
                collateral_state.available_liquidity >= seized_collateral,
                ERROR_NOT_ENOUGH_LIQUIDITY_TO_LIQUIDATE
            );
        }

        self.repay_liquidated_debt(user, debt_asset, &actual_debt_to_liquidate, &variable_debt);

        if actual_debt_to_liquidate == user_total_debt {
            self.set_borrowing(debt_state.id, user, false);
        }

        if receive_supply {
            // the collateral reserve is not accrued, the transfer uses its normalized income
            let state = self.reserve_state(collateral_asset).get();
            let index = self.normalized_income(&state, now);
            let liquidator_had_supply = self
                .get_scaled_supply(collateral_asset, liquidator, collateral_config.decimals)
                .into_raw_units()
                != &BigUint::zero();

            self.transfer_supply_position(
                collateral_asset,
                collateral_config.decimals,
                user,
                liquidator,
                &seized_collateral,
                &index,
            );

            if !liquidator_had_supply {
                self.set_using_as_collateral(collateral_asset, state.id, liquidator, true);
            }
        } else {
            let mut cache = ReserveCache::new(self, collateral_asset);
            self.update_state(&mut cache);
            cache.state.available_liquidity -= &seized_collateral;
            self.burn_supply(&mut cache, user, &seized_collateral);
            self.update_interest_rates(&mut cache);
            drop(cache);

            self.send_asset(liquidator, collateral_asset, seized_collateral.into_raw_units());
        }

        if seized_collateral == user_collateral_balance {
            self.set_using_as_collateral(collateral_asset, collateral_state.id, user, false);
        }

        let refund = debt_to_cover - actual_debt_to_liquidate.clone();
        self.send_asset(liquidator, debt_asset, refund.into_raw_units());

        self.liquidation_call_event(
            collateral_asset,
            debt_asset,
            user,
            &actual_debt_to_liquidate,
            &seized_collateral,
            liquidator,
            receive_supply,
        );
    }

    /// Debt reserve leg of a liquidation. Variable debt is burnt before stable debt.
    fn repay_liquidated_debt(
        &self,
        user: &ManagedAddress,
        debt_asset: &TokenIdentifier,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        variable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let mut cache = ReserveCache::new(self, debt_asset);
        self.update_state(&mut cache);

        if variable_debt >= amount {
            self.burn_variable_debt(&mut cache, user, amount);
        } else {
            if variable_debt > &cache.zero {
                self.burn_variable_debt(&mut cache, user, variable_debt);
            }
            let stable_part = amount.clone() - variable_debt.clone();
            self.burn_stable_debt(&mut cache, user, &stable_part);
        }

        cache.state.available_liquidity += amount;
        self.update_interest_rates(&mut cache);
    }

    /// Collateral paid for `debt_to_cover`, including the liquidation bonus.
    ///
    /// **Formula**:
    /// - `collateral = percent_mul(debtPrice * debtToCover * 10^collDec, bonus) / (collPrice * 10^debtDec)`
    /// - When this exceeds the collateral balance, the whole balance is taken and the debt
    ///   is solved backwards:
    ///   `debtNeeded = percent_div(collPrice * balance * 10^debtDec / (debtPrice * 10^collDec), bonus)`
    fn calculate_available_collateral_to_liquidate(
        &self,
        collateral_config: &ReserveConfiguration<Self::Api>,
        debt_config: &ReserveConfiguration<Self::Api>,
        collateral_price: &ManagedDecimal<Self::Api, NumDecimals>,
        debt_price: &ManagedDecimal<Self::Api, NumDecimals>,
        debt_to_cover: &ManagedDecimal<Self::Api, NumDecimals>,
        user_collateral_balance: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> LiquidationAmounts<Self::Api> {
        let collateral_unit = BigUint::from(10u64).pow(collateral_config.decimals as u32);
        let debt_unit = BigUint::from(10u64).pow(debt_config.decimals as u32);
        let bonus = &collateral_config.liquidation_bonus;

        let debt_value = self.checked_mul(
            &self.checked_mul(debt_price.into_raw_units(), debt_to_cover.into_raw_units()),
            &collateral_unit,
        );
        let debt_value_with_bonus = self.percent_mul(&self.to_decimal(debt_value, 0), bonus);
        let max_collateral_to_liquidate = debt_value_with_bonus.into_raw_units()
            / &self.checked_mul(collateral_price.into_raw_units(), &debt_unit);

        if &max_collateral_to_liquidate > user_collateral_balance.into_raw_units() {
            let collateral_value = self.checked_mul(
                &self.checked_mul(
                    collateral_price.into_raw_units(),
                    user_collateral_balance.into_raw_units(),
                ),
                &debt_unit,
            ) / self.checked_mul(debt_price.into_raw_units(), &collateral_unit);
            let debt_amount_needed = self.percent_div(&self.to_decimal(collateral_value, 0), bonus);

            LiquidationAmounts {
                collateral_amount: user_collateral_balance.clone(),
                debt_amount_needed: self
                    .to_decimal(debt_amount_needed.into_raw_units().clone(), debt_config.decimals),
            }
        } else {
            LiquidationAmounts {
                collateral_amount: self
                    .to_decimal(max_collateral_to_liquidate, collateral_config.decimals),
                debt_amount_needed: debt_to_cover.clone(),
            }
        }
    }
}
