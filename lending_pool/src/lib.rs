#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod cache;
pub mod config;
pub mod flash_loan;
pub mod helpers;
pub mod oracle;
pub mod positions;
pub mod reserve;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod views;

pub use common_errors::*;
pub use common_structs::*;

#[multiversx_sc::contract]
pub trait LendingPool:
    positions::supply::SupplyPositionModule
    + positions::variable_debt::VariableDebtModule
    + positions::stable_debt::StableDebtModule
    + positions::deposit::PositionDepositModule
    + positions::withdraw::PositionWithdrawModule
    + positions::borrow::PositionBorrowModule
    + positions::repay::PositionRepayModule
    + positions::rate_mode::PositionRateModeModule
    + positions::collateral::PositionCollateralModule
    + positions::liquidation::PositionLiquidationModule
    + flash_loan::FlashLoanModule
    + reserve::ReserveLogicModule
    + config::ConfigModule
    + common_events::EventsModule
    + storage::Storage
    + oracle::OracleModule
    + helpers::GenericLogicModule
    + validation::ValidationModule
    + utils::LendingUtilsModule
    + views::ViewsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + multiversx_sc_modules::pause::PauseModule
{
    /// # Arguments
    /// - `treasury`: Receives the reserve factor share of the interest as supply.
    #[init]
    fn init(&self, treasury: ManagedAddress) {
        self.treasury().set(&treasury);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Supplies the paid asset, credited to `on_behalf_of` or to the caller.
    #[payable]
    #[endpoint(deposit)]
    fn deposit(&self, on_behalf_of: OptionalValue<ManagedAddress>) {
        self.require_operational();
        let payment = self.call_value().single_esdt().clone();
        let caller = self.blockchain().get_caller();
        let on_behalf_of = on_behalf_of.into_option().unwrap_or_else(|| caller.clone());

        self.process_deposit(&caller, &on_behalf_of, &payment);
    }

    /// Withdraws `amount` of supplied `asset` to `to` or to the caller.
    /// The max uint256 amount withdraws the whole balance.
    #[endpoint(withdraw)]
    fn withdraw(&self, asset: TokenIdentifier, amount: BigUint, to: OptionalValue<ManagedAddress>) {
        self.require_operational();
        let caller = self.blockchain().get_caller();
        let to = to.into_option().unwrap_or_else(|| caller.clone());

        self.process_withdraw(&caller, &asset, &amount, &to);
    }

    /// Borrows `amount` of `asset` at `rate_mode`. With `on_behalf_of` the debt is opened on
    /// an account that delegated borrowing power to the caller.
    #[endpoint(borrow)]
    fn borrow(
        &self,
        asset: TokenIdentifier,
        amount: BigUint,
        rate_mode: InterestRateMode,
        on_behalf_of: OptionalValue<ManagedAddress>,
    ) {
        self.require_operational();
        let caller = self.blockchain().get_caller();
        let on_behalf_of = on_behalf_of.into_option().unwrap_or_else(|| caller.clone());

        self.process_borrow(&caller, &asset, &amount, rate_mode, &on_behalf_of);
    }

    /// Repays debt of `rate_mode` with the payment. The part above the debt is refunded.
    #[payable]
    #[endpoint(repay)]
    fn repay(&self, rate_mode: InterestRateMode, on_behalf_of: OptionalValue<ManagedAddress>) {
        self.require_operational();
        let payment = self.call_value().single_esdt().clone();
        let caller = self.blockchain().get_caller();
        let on_behalf_of = on_behalf_of.into_option().unwrap_or_else(|| caller.clone());

        self.process_repay(&caller, &on_behalf_of, &payment, rate_mode);
    }

    /// Converts the caller's whole debt of `rate_mode` in `asset` to the other mode.
    #[endpoint(swapBorrowRateMode)]
    fn swap_borrow_rate_mode(&self, asset: TokenIdentifier, rate_mode: InterestRateMode) {
        self.require_operational();
        let caller = self.blockchain().get_caller();

        self.process_swap_rate_mode(&caller, &asset, rate_mode);
    }

    #[endpoint(rebalanceStableBorrowRate)]
    fn rebalance_stable_borrow_rate(&self, asset: TokenIdentifier, user: ManagedAddress) {
        self.require_operational();

        self.process_rebalance_stable_borrow_rate(&asset, &user);
    }

    #[endpoint(setUserUseReserveAsCollateral)]
    fn set_user_use_reserve_as_collateral(&self, asset: TokenIdentifier, use_as_collateral: bool) {
        self.require_operational();
        let caller = self.blockchain().get_caller();

        self.process_set_use_as_collateral(&caller, &asset, use_as_collateral);
    }

    /// Liquidates `user` by repaying their debt in the paid asset.
    ///
    /// # Arguments
    /// - `collateral_asset`: Collateral seized in exchange.
    /// - `receive_supply`: Take the collateral as supply instead of the underlying.
    #[payable]
    #[endpoint(liquidationCall)]
    fn liquidation_call(
        &self,
        collateral_asset: TokenIdentifier,
        user: ManagedAddress,
        receive_supply: bool,
    ) {
        self.require_operational();
        let payment = self.call_value().single_esdt().clone();
        let caller = self.blockchain().get_caller();

        self.process_liquidation(&caller, &collateral_asset, &user, &payment, receive_supply);
    }

    /// Executes a flash loan.
    ///
    /// # Arguments
    /// - `receiver`: Contract receiving the assets and the call.
    /// - `assets`, `amounts`, `modes`: One entry per borrowed asset. Modes are
    ///   `0 = repay in the same call`, `1 = keep as stable debt`, `2 = keep as variable debt`.
    /// - `on_behalf_of`: Account taking the debt for non zero modes.
    /// - `endpoint`: Endpoint called on `receiver`.
    /// - `arguments`: Arguments for the endpoint, the initiator address is appended.
    #[endpoint(flashLoan)]
    fn flash_loan(
        &self,
        receiver: ManagedAddress,
        assets: ManagedVec<TokenIdentifier>,
        amounts: ManagedVec<BigUint>,
        modes: ManagedVec<u8>,
        on_behalf_of: ManagedAddress,
        endpoint: ManagedBuffer,
        arguments: ManagedArgBuffer<Self::Api>,
    ) {
        self.require_operational();
        let caller = self.blockchain().get_caller();

        self.process_flash_loan(
            &caller,
            &receiver,
            &assets,
            &amounts,
            &modes,
            &on_behalf_of,
            endpoint,
            arguments,
        );
    }

    /// Moves `amount` of the caller's supply of `asset` to `to`.
    #[endpoint(transferSupply)]
    fn transfer_supply(&self, asset: TokenIdentifier, to: ManagedAddress, amount: BigUint) {
        self.require_operational();
        let caller = self.blockchain().get_caller();

        self.process_transfer_supply(&caller, &asset, &to, &amount);
    }

    /// Lets `delegatee` borrow up to `amount` of `asset` at `rate_mode` against the caller's
    /// collateral.
    #[endpoint(approveDelegation)]
    fn approve_delegation(
        &self,
        asset: TokenIdentifier,
        rate_mode: InterestRateMode,
        delegatee: ManagedAddress,
        amount: BigUint,
    ) {
        self.require_operational();
        let caller = self.blockchain().get_caller();

        self.borrow_allowance(&asset, rate_mode, &caller, &delegatee)
            .set(&amount);
        self.borrow_allowance_delegated_event(&asset, &caller, &delegatee, rate_mode, &amount);
    }
}
