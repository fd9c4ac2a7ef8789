multiversx_sc::imports!();

use common_errors::{ERROR_BORROW_ALLOWANCE_NOT_ENOUGH, ERROR_INVALID_INTEREST_RATE_MODE_SELECTED};
use common_structs::{InterestRateMode, UserConfiguration};

use crate::{helpers, oracle, positions, storage};

/// Small helpers shared by the user facing operations.
#[multiversx_sc::module]
pub trait LendingUtilsModule:
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
    /// Sends `amount` raw units of `asset` out of the pool. Zero amounts are skipped.
    fn send_asset(&self, to: &ManagedAddress, asset: &TokenIdentifier, amount: &BigUint) {
        if amount == &BigUint::zero() {
            return;
        }

        self.tx().to(to).single_esdt(asset, 0, amount).transfer();
    }

    /// Flash loan modes are passed as `0 = None`, `1 = Stable`, `2 = Variable`.
    fn parse_rate_mode(&self, mode: u8) -> InterestRateMode {
        match mode {
            0 => InterestRateMode::None,
            1 => InterestRateMode::Stable,
            2 => InterestRateMode::Variable,
            _ => sc_panic!(ERROR_INVALID_INTEREST_RATE_MODE_SELECTED),
        }
    }

    /// Consumes `amount` of the credit `delegator` granted to `delegatee`.
    fn decrease_borrow_allowance(
        &self,
        asset: &TokenIdentifier,
        rate_mode: InterestRateMode,
        delegator: &ManagedAddress,
        delegatee: &ManagedAddress,
        amount: &BigUint,
    ) {
        let mapper = self.borrow_allowance(asset, rate_mode, delegator, delegatee);
        let allowance = mapper.get();
        require!(&allowance >= amount, ERROR_BORROW_ALLOWANCE_NOT_ENOUGH);

        mapper.set(&(allowance - amount));
    }

    fn store_user_configuration(&self, user: &ManagedAddress, config: &UserConfiguration) {
        if config.is_empty() {
            self.user_config(user).clear();
        } else {
            self.user_config(user).set(config);
        }
    }

    /// Flips the collateral flag of `user` on reserve `id` and emits the matching event.
    /// Nothing happens when the flag already has the requested value.
    fn set_using_as_collateral(
        &self,
        asset: &TokenIdentifier,
        id: usize,
        user: &ManagedAddress,
        enabled: bool,
    ) {
        let mut config = self.get_user_configuration(user);
        if config.is_using_as_collateral(id) == enabled {
            return;
        }

        config.set_using_as_collateral(id, enabled);
        self.store_user_configuration(user, &config);

        if enabled {
            self.reserve_used_as_collateral_enabled_event(asset, user);
        } else {
            self.reserve_used_as_collateral_disabled_event(asset, user);
        }
    }

    fn set_borrowing(&self, id: usize, user: &ManagedAddress, borrowing: bool) {
        let mut config = self.get_user_configuration(user);
        if config.is_borrowing(id) == borrowing {
            return;
        }

        config.set_borrowing(id, borrowing);
        self.store_user_configuration(user, &config);
    }
}
