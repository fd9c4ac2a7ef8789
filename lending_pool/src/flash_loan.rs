multiversx_sc::imports!();

use common_constants::{BPS, FLASHLOAN_PREMIUM_TOTAL};
use common_errors::{
    ERROR_INCONSISTENT_FLASHLOAN_PARAMS, ERROR_INVALID_FLASH_LOAN_EXECUTOR_RETURN,
    ERROR_NOT_ENOUGH_LIQUIDITY_TO_BORROW,
};
use common_structs::InterestRateMode;

use crate::{cache::ReserveCache, helpers, oracle, positions, reserve, storage, utils, validation};

#[multiversx_sc::module]
pub trait FlashLoanModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + oracle::OracleModule
    + helpers::GenericLogicModule
    + positions::supply::SupplyPositionModule
    + positions::variable_debt::VariableDebtModule
    + positions::stable_debt::StableDebtModule
    + positions::borrow::PositionBorrowModule
    + reserve::ReserveLogicModule
    + validation::ValidationModule
    + utils::LendingUtilsModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Lends `amounts` of `assets` to `receiver` for the duration of a synchronous call.
    ///
    /// **Process**:
    /// 1. Checks the parameters and the liquidity of every reserve.
    /// 2. Raises the reentrancy flag, sends every asset to `receiver` and calls `endpoint`
    ///    with `arguments` followed by the initiator address.
    /// 3. For mode `None` the receiver must send back `amount + premium`. The premium is
    ///    distributed to the suppliers through the liquidity index.
    /// 4. For a borrow mode the receiver keeps the funds and `on_behalf_of` takes the debt.
    /// 5. Returned tokens above what is owed go back to `receiver`.
    ///
    /// # Arguments
    /// - `modes`: `0 = None`, `1 = Stable`, `2 = Variable`, one per asset.
    #[allow(clippy::too_many_arguments)]
    fn process_flash_loan(
        &self,
        initiator: &ManagedAddress,
        receiver: &ManagedAddress,
        assets: &ManagedVec<TokenIdentifier>,
        amounts: &ManagedVec<BigUint>,
        modes: &ManagedVec<u8>,
        on_behalf_of: &ManagedAddress,
        endpoint: ManagedBuffer,
        mut arguments: ManagedArgBuffer<Self::Api>,
    ) {
        require!(
            !assets.is_empty() && assets.len() == amounts.len() && assets.len() == modes.len(),
            ERROR_INCONSISTENT_FLASHLOAN_PARAMS
        );

        let mut payments = ManagedVec::<Self::Api, EsdtTokenPayment>::new();
        let mut premiums = ManagedVec::<Self::Api, BigUint>::new();
        for index in 0..assets.len() {
            let asset = (*assets.get(index)).clone();
            let amount = (*amounts.get(index)).clone();
            self.parse_rate_mode(modes.get(index));

            self.require_reserve_listed(&asset);
            let available = self.reserve_state(&asset).get().available_liquidity;
            require!(
                available.into_raw_units() >= &amount,
                ERROR_NOT_ENOUGH_LIQUIDITY_TO_BORROW
            );

            premiums.push(
                amount.clone() * BigUint::from(FLASHLOAN_PREMIUM_TOTAL) / BigUint::from(BPS),
            );
            payments.push(EsdtTokenPayment::new(asset, 0, amount));
        }

        self.flash_loan_ongoing().set(true);
        arguments.push_arg(initiator);
        let back_transfers = self
            .tx()
            .to(receiver)
            .raw_call(endpoint)
            .arguments_raw(arguments)
            .payment(&payments)
            .returns(ReturnsBackTransfersLegacy)
            .sync_call();
        self.flash_loan_ongoing().set(false);

        let mut returned = ManagedMapEncoded::<Self::Api, TokenIdentifier, BigUint>::new();
        for payment in back_transfers.esdt_payments.iter() {
            let so_far = returned.get(&payment.token_identifier);
            returned.put(&payment.token_identifier, &(so_far + &payment.amount));
        }

        for index in 0..assets.len() {
            let payment = payments.get(index);
            let premium = (*premiums.get(index)).clone();
            let rate_mode = self.parse_rate_mode(modes.get(index));

            let mut cache = ReserveCache::new(self, &payment.token_identifier);
            let amount = cache.get_decimal_value(&payment.amount);
            let premium = cache.get_decimal_value(&premium);

            if rate_mode == InterestRateMode::None {
                let owed = &payment.amount + premium.into_raw_units();
                let repaid = returned.get(&payment.token_identifier);
                require!(repaid >= owed, ERROR_INVALID_FLASH_LOAN_EXECUTOR_RETURN);
                returned.put(&payment.token_identifier, &(repaid - owed));

                self.update_state(&mut cache);
                if premium > cache.zero {
                    self.cumulate_to_liquidity_index(&mut cache, &premium);
                }
                cache.state.available_liquidity += &premium;
                self.update_interest_rates(&mut cache);
                drop(cache);
            } else {
                drop(cache);
                self.execute_borrow(
                    initiator,
                    on_behalf_of,
                    &payment.token_identifier,
                    &amount,
                    rate_mode,
                    false,
                );
            }

            self.flash_loan_event(
                receiver,
                initiator,
                &payment.token_identifier,
                &amount,
                &premium,
            );
        }

        for payment in back_transfers.esdt_payments.iter() {
            let leftover = returned.get(&payment.token_identifier);
            if leftover > BigUint::zero() {
                returned.put(&payment.token_identifier, &BigUint::zero());
                self.send_asset(receiver, &payment.token_identifier, &leftover);
            }
        }
    }
}
