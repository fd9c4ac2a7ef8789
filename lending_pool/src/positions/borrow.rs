multiversx_sc::imports!();

use common_structs::InterestRateMode;

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

#[multiversx_sc::module]
pub trait PositionBorrowModule:
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
    fn process_borrow(
        &self,
        caller: &ManagedAddress,
        asset: &TokenIdentifier,
        amount: &BigUint,
        rate_mode: InterestRateMode,
        on_behalf_of: &ManagedAddress,
    ) {
        self.require_reserve_listed(asset);

        let decimals = self.reserve_config(asset).get().decimals;
        let amount = self.to_decimal(amount.clone(), decimals);

        self.execute_borrow(caller, on_behalf_of, asset, &amount, rate_mode, true);
    }

    /// Opens debt of `rate_mode` for `on_behalf_of` and, when `release` is set, pays the
    /// borrowed amount to `caller`.
    ///
    /// Flash loans run this with `release = false`: the receiver already holds the funds.
    ///
    /// **Process**:
    /// 1. Validates the borrow against the account of `on_behalf_of`.
    /// 2. A delegated borrow consumes the allowance granted to `caller`.
    /// 3. Accrues the reserve and mints stable debt at the current stable rate, or variable
    ///    debt at the current index.
    /// 4. Takes the amount out of the available liquidity and reprices.
    fn execute_borrow(
        &self,
        caller: &ManagedAddress,
        on_behalf_of: &ManagedAddress,
        asset: &TokenIdentifier,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        rate_mode: InterestRateMode,
        release: bool,
    ) {
        let mut cache = ReserveCache::new(self, asset);
        self.validate_borrow(&cache, on_behalf_of, amount, rate_mode);

        if caller != on_behalf_of {
            self.decrease_borrow_allowance(
                asset,
                rate_mode,
                on_behalf_of,
                caller,
                amount.into_raw_units(),
            );
        }

        self.update_state(&mut cache);

        let is_first_borrow = if rate_mode == InterestRateMode::Stable {
            let stable_rate = cache.state.current_stable_borrow_rate.clone();
            self.mint_stable_debt(&mut cache, caller, on_behalf_of, amount, &stable_rate)
        } else {
            self.mint_variable_debt(&mut cache, caller, on_behalf_of, amount)
        };

        cache.state.available_liquidity -= amount;
        self.update_interest_rates(&mut cache);

        // stable borrowers keep the rate they entered at, variable ones pay the repriced rate
        let borrow_rate = if rate_mode == InterestRateMode::Stable {
            self.get_stable_debt_position(asset, on_behalf_of, cache.config.decimals)
                .stable_rate
        } else {
            cache.state.current_variable_borrow_rate.clone()
        };

        let id = cache.state.id;
        drop(cache);

        if is_first_borrow {
            self.set_borrowing(id, on_behalf_of, true);
        }

        if release {
            self.send_asset(caller, asset, amount.into_raw_units());
        }

        self.borrow_event(asset, caller, on_behalf_of, amount, rate_mode, &borrow_rate);
    }
}
