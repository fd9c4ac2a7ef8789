multiversx_sc::imports!();

use common_errors::ERROR_TRANSFER_NOT_ALLOWED;

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

/// Collateral switches and supply transfers between users.
#[multiversx_sc::module]
pub trait PositionCollateralModule:
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
    fn process_set_use_as_collateral(
        &self,
        caller: &ManagedAddress,
        asset: &TokenIdentifier,
        use_as_collateral: bool,
    ) {
        self.require_reserve_listed(asset);

        let cache = ReserveCache::new(self, asset);
        let supply_balance = self.get_supply_balance(
            asset,
            caller,
            &cache.config,
            &cache.state,
            cache.timestamp,
        );

        self.validate_set_use_as_collateral(&cache, caller, use_as_collateral, &supply_balance);

        let id = cache.state.id;
        drop(cache);

        self.set_using_as_collateral(asset, id, caller, use_as_collateral);
    }

    /// Moves `amount` of supply from `from` to `to` at the normalized income of the reserve.
    ///
    /// The reserve itself is not accrued. The sender loses the collateral flag once empty
    /// and a receiver without prior supply gets it enabled.
    fn process_transfer_supply(
        &self,
        from: &ManagedAddress,
        asset: &TokenIdentifier,
        to: &ManagedAddress,
        amount: &BigUint,
    ) {
        self.require_reserve_listed(asset);

        let config = self.reserve_config(asset).get();
        let state = self.reserve_state(asset).get();
        let now = self.blockchain().get_block_timestamp();

        let amount = self.to_decimal(amount.clone(), config.decimals);
        self.require_amount_not_zero(&amount);
        require!(
            self.balance_decrease_allowed(asset, from, &amount),
            ERROR_TRANSFER_NOT_ALLOWED
        );

        let index = self.normalized_income(&state, now);
        let zero = self.to_decimal(BigUint::zero(), config.decimals);
        let receiver_had_supply = self.get_scaled_supply(asset, to, config.decimals) > zero;

        self.transfer_supply_position(asset, config.decimals, from, to, &amount, &index);

        if from != to {
            if self.get_scaled_supply(asset, from, config.decimals) == zero {
                self.set_using_as_collateral(asset, state.id, from, false);
            }

            if !receiver_had_supply {
                self.set_using_as_collateral(asset, state.id, to, true);
            }
        }
    }
}
