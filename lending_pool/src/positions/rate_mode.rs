multiversx_sc::imports!();

use common_structs::InterestRateMode;

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

/// Moves existing debt between the stable and variable legs of a reserve.
#[multiversx_sc::module]
pub trait PositionRateModeModule:
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
    /// Converts the whole debt of `current_rate_mode` held by `caller` to the other mode.
    fn process_swap_rate_mode(
        &self,
        caller: &ManagedAddress,
        asset: &TokenIdentifier,
        current_rate_mode: InterestRateMode,
    ) {
        self.require_reserve_listed(asset);

        let mut cache = ReserveCache::new(self, asset);
        let (stable_debt, variable_debt) = self.get_user_current_debt(
            asset,
            caller,
            &cache.config,
            &cache.state,
            cache.timestamp,
        );

        self.validate_swap_rate_mode(
            &cache,
            caller,
            &stable_debt,
            &variable_debt,
            current_rate_mode,
        );

        self.update_state(&mut cache);

        if current_rate_mode == InterestRateMode::Stable {
            self.burn_stable_debt(&mut cache, caller, &stable_debt);
            self.mint_variable_debt(&mut cache, caller, caller, &stable_debt);
        } else {
            self.burn_variable_debt(&mut cache, caller, &variable_debt);
            let stable_rate = cache.state.current_stable_borrow_rate.clone();
            self.mint_stable_debt(&mut cache, caller, caller, &variable_debt, &stable_rate);
        }

        self.update_interest_rates(&mut cache);
        drop(cache);

        self.swap_event(asset, caller, current_rate_mode);
    }

    /// Re-mints the stable debt of `user` at the current stable rate of the reserve.
    fn process_rebalance_stable_borrow_rate(&self, asset: &TokenIdentifier, user: &ManagedAddress) {
        self.require_reserve_listed(asset);

        let mut cache = ReserveCache::new(self, asset);
        let stable_debt =
            self.get_stable_debt(asset, user, cache.config.decimals, cache.timestamp);

        self.validate_rebalance_stable_borrow_rate(&cache, &stable_debt);

        self.update_state(&mut cache);

        self.burn_stable_debt(&mut cache, user, &stable_debt);
        let stable_rate = cache.state.current_stable_borrow_rate.clone();
        self.mint_stable_debt(&mut cache, user, user, &stable_debt, &stable_rate);

        self.update_interest_rates(&mut cache);
        drop(cache);

        self.rebalance_stable_borrow_rate_event(asset, user);
    }
}
