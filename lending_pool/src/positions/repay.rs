multiversx_sc::imports!();

use common_structs::InterestRateMode;

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

#[multiversx_sc::module]
pub trait PositionRepayModule:
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
    /// Pays back debt of `rate_mode` owed by `on_behalf_of` with the payment of `caller`.
    ///
    /// At most the current debt of that mode is repaid, the rest of the payment goes back to
    /// `caller`. Clearing every debt in the reserve drops its borrowing flag.
    fn process_repay(
        &self,
        caller: &ManagedAddress,
        on_behalf_of: &ManagedAddress,
        payment: &EsdtTokenPayment,
        rate_mode: InterestRateMode,
    ) {
        let asset = &payment.token_identifier;
        self.require_reserve_listed(asset);

        let mut cache = ReserveCache::new(self, asset);
        let amount = cache.get_decimal_value(&payment.amount);
        let (stable_debt, variable_debt) = self.get_user_current_debt(
            asset,
            on_behalf_of,
            &cache.config,
            &cache.state,
            cache.timestamp,
        );

        self.validate_repay(&cache, &amount, rate_mode, &stable_debt, &variable_debt);

        let debt_of_mode = if rate_mode == InterestRateMode::Stable {
            stable_debt.clone()
        } else {
            variable_debt.clone()
        };
        let payback = self.get_min(amount.clone(), debt_of_mode);

        self.update_state(&mut cache);

        if rate_mode == InterestRateMode::Stable {
            self.burn_stable_debt(&mut cache, on_behalf_of, &payback);
        } else {
            self.burn_variable_debt(&mut cache, on_behalf_of, &payback);
        }

        cache.state.available_liquidity += &payback;
        self.update_interest_rates(&mut cache);

        let id = cache.state.id;
        drop(cache);

        let remaining_debt = stable_debt + variable_debt - payback.clone();
        if remaining_debt.into_raw_units() == &BigUint::zero() {
            self.set_borrowing(id, on_behalf_of, false);
        }

        let refund = amount - payback.clone();
        self.send_asset(caller, asset, refund.into_raw_units());

        self.repay_event(asset, on_behalf_of, caller, &payback);
    }
}
