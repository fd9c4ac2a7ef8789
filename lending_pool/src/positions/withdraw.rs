multiversx_sc::imports!();

use common_errors::ERROR_CURRENT_AVAILABLE_LIQUIDITY_NOT_ENOUGH;

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

#[multiversx_sc::module]
pub trait PositionWithdrawModule:
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
    /// Burns supply of `caller` and pays the underlying out to `to`.
    ///
    /// `amount` equal to the max uint256 withdraws the whole balance including interest.
    /// Emptying the position disables the asset as collateral.
    fn process_withdraw(
        &self,
        caller: &ManagedAddress,
        asset: &TokenIdentifier,
        amount: &BigUint,
        to: &ManagedAddress,
    ) {
        self.require_reserve_listed(asset);

        let mut cache = ReserveCache::new(self, asset);
        let user_balance = self.get_supply_balance(
            asset,
            caller,
            &cache.config,
            &cache.state,
            cache.timestamp,
        );
        let amount = if *amount == self.max_uint256() {
            user_balance.clone()
        } else {
            cache.get_decimal_value(amount)
        };

        self.validate_withdraw(&cache, caller, &amount, &user_balance);

        self.update_state(&mut cache);
        require!(
            cache.has_liquidity(&amount),
            ERROR_CURRENT_AVAILABLE_LIQUIDITY_NOT_ENOUGH
        );

        cache.state.available_liquidity -= &amount;
        self.burn_supply(&mut cache, caller, &amount);
        self.update_interest_rates(&mut cache);

        let id = cache.state.id;
        drop(cache);

        if amount == user_balance {
            self.set_using_as_collateral(asset, id, caller, false);
        }

        self.send_asset(to, asset, amount.into_raw_units());
        self.withdraw_event(asset, caller, to, &amount);
    }
}
