multiversx_sc::imports!();

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

#[multiversx_sc::module]
pub trait PositionDepositModule:
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
    /// Adds the payment to the reserve liquidity and credits `on_behalf_of` with supply.
    ///
    /// **Process**:
    /// 1. Validates amount and reserve flags.
    /// 2. Accrues the reserve, adds the liquidity and reprices.
    /// 3. Mints scaled supply. A first deposit enables the asset as collateral.
    fn process_deposit(
        &self,
        caller: &ManagedAddress,
        on_behalf_of: &ManagedAddress,
        payment: &EsdtTokenPayment,
    ) {
        let asset = &payment.token_identifier;
        self.require_reserve_listed(asset);

        let mut cache = ReserveCache::new(self, asset);
        let amount = cache.get_decimal_value(&payment.amount);
        self.validate_deposit(&cache, &amount);

        self.update_state(&mut cache);
        cache.state.available_liquidity += &amount;
        self.update_interest_rates(&mut cache);

        let is_first_deposit = self.mint_supply(&mut cache, on_behalf_of, &amount);
        let id = cache.state.id;
        drop(cache);

        if is_first_deposit {
            self.set_using_as_collateral(asset, id, on_behalf_of, true);
        }

        self.deposit_event(asset, caller, on_behalf_of, &amount);
    }
}
