use crate::constants::*;

use flash_mock::FlashMock;
use lending_pool::{
    config::ConfigModule, storage::Storage, views::ViewsModule, InterestRateMode, LendingPool,
};
use multiversx_sc::types::{
    BigUint, EsdtTokenPayment, ManagedArgBuffer, ManagedBuffer, ManagedDecimal, ManagedVec,
    NumDecimals, TestAddress, TestTokenIdentifier,
};
use multiversx_sc_modules::pause::PauseModule;
use multiversx_sc_scenario::{
    api::StaticApi,
    imports::{ExpectMessage, OptionalValue},
    DebugApi, ScenarioTxWhitebox, ScenarioWorld,
};

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(LENDING_POOL_PATH, lending_pool::ContractBuilder);
    blockchain.register_contract(FLASH_MOCK_PATH, flash_mock::ContractBuilder);

    blockchain
}

/// Whole tokens to raw units.
pub fn units(amount: u64, decimals: usize) -> u128 {
    amount as u128 * 10u128.pow(decimals as u32)
}

/// Raw units of a managed value, saturated at `u128::MAX`.
pub fn to_u128(value: &BigUint<DebugApi>) -> u128 {
    let bytes = value.to_bytes_be();
    let bytes = bytes.as_slice();
    if bytes.len() > 16 {
        return u128::MAX;
    }

    let mut buffer = [0u8; 16];
    buffer[16 - bytes.len()..].copy_from_slice(bytes);
    u128::from_be_bytes(buffer)
}

pub fn raw(value: &ManagedDecimal<DebugApi, NumDecimals>) -> u128 {
    to_u128(value.into_raw_units())
}

fn error_message(error: &[u8]) -> &str {
    core::str::from_utf8(error).unwrap()
}

#[derive(Debug, Default, Clone)]
pub struct ReserveSnapshot {
    pub liquidity_index: u128,
    pub variable_borrow_index: u128,
    pub liquidity_rate: u128,
    pub variable_borrow_rate: u128,
    pub stable_borrow_rate: u128,
    pub average_stable_rate: u128,
    pub available_liquidity: u128,
    pub stable_debt_principal_total: u128,
    pub last_update_timestamp: u64,
}

#[derive(Debug, Default, Clone)]
pub struct AccountSnapshot {
    pub total_collateral: u128,
    pub total_debt: u128,
    pub available_borrows: u128,
    pub ltv: u128,
    pub liquidation_threshold: u128,
    pub health_factor: u128,
}

pub struct LendingPoolTestState {
    pub world: ScenarioWorld,
}

impl LendingPoolTestState {
    /// Pool with USDC, WEGLD and DAI listed, priced, usable as collateral and borrowable at
    /// both rates.
    pub fn new() -> Self {
        let mut world = world();
        world.account(OWNER_ADDRESS).nonce(1);
        world.current_block().block_timestamp(0);

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(LENDING_POOL_PATH)
            .new_address(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.init(TREASURY_ADDRESS.to_managed_address());
            });

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(FLASH_MOCK_PATH)
            .new_address(FLASH_MOCK_ADDRESS)
            .whitebox(flash_mock::contract_obj, |sc| {
                sc.init();
            });

        let mut state = Self { world };

        for (token, decimals, price) in [
            (USDC_TOKEN, USDC_DECIMALS, USDC_PRICE),
            (EGLD_TOKEN, EGLD_DECIMALS, EGLD_PRICE),
            (DAI_TOKEN, DAI_DECIMALS, DAI_PRICE),
        ] {
            state.init_reserve(token, decimals);
            state.configure_reserve_as_collateral(token, LTV, LIQ_THRESHOLD, LIQ_BONUS);
            state.enable_borrowing(token, true);
            state.set_price(token, price);
            state.set_market_borrow_rate(token, MARKET_BORROW_RATE);

            state.world.set_esdt_balance(
                FLASH_MOCK_ADDRESS.to_managed_address::<StaticApi>(),
                token.as_bytes(),
                BigUint::<StaticApi>::from(units(1_000, decimals)),
            );
        }

        for user in [
            SUPPLIER_ADDRESS,
            BORROWER_ADDRESS,
            LIQUIDATOR_ADDRESS,
            DELEGATEE_ADDRESS,
            TREASURY_ADDRESS,
        ] {
            state.setup_account(user);
        }

        state
    }

    pub fn setup_account(&mut self, user: TestAddress) {
        self.world
            .account(user)
            .nonce(1)
            .esdt_balance(
                USDC_TOKEN,
                BigUint::<StaticApi>::from(units(1_000_000, USDC_DECIMALS)),
            )
            .esdt_balance(
                EGLD_TOKEN,
                BigUint::<StaticApi>::from(units(10_000, EGLD_DECIMALS)),
            )
            .esdt_balance(
                DAI_TOKEN,
                BigUint::<StaticApi>::from(units(1_000_000, DAI_DECIMALS)),
            )
            .esdt_balance(UNLISTED_TOKEN, BigUint::<StaticApi>::from(units(1_000, 18)));
    }

    pub fn change_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    // Owner configuration

    pub fn init_reserve(&mut self, token: TestTokenIdentifier, decimals: usize) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.init_reserve(
                    token.to_token_identifier(),
                    decimals,
                    BigUint::from(OPTIMAL_UTILIZATION),
                    BigUint::from(BASE_VARIABLE_BORROW_RATE),
                    BigUint::from(VARIABLE_RATE_SLOPE1),
                    BigUint::from(VARIABLE_RATE_SLOPE2),
                    BigUint::from(STABLE_RATE_SLOPE1),
                    BigUint::from(STABLE_RATE_SLOPE2),
                );
            });
    }

    pub fn init_reserve_error(
        &mut self,
        token: TestTokenIdentifier,
        decimals: usize,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.init_reserve(
                    token.to_token_identifier(),
                    decimals,
                    BigUint::from(OPTIMAL_UTILIZATION),
                    BigUint::from(BASE_VARIABLE_BORROW_RATE),
                    BigUint::from(VARIABLE_RATE_SLOPE1),
                    BigUint::from(VARIABLE_RATE_SLOPE2),
                    BigUint::from(STABLE_RATE_SLOPE1),
                    BigUint::from(STABLE_RATE_SLOPE2),
                );
            });
    }

    pub fn configure_reserve_as_collateral(
        &mut self,
        token: TestTokenIdentifier,
        ltv: usize,
        threshold: usize,
        bonus: usize,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.configure_reserve_as_collateral(
                    token.to_token_identifier(),
                    ltv,
                    threshold,
                    bonus,
                );
            });
    }

    pub fn configure_reserve_as_collateral_error(
        &mut self,
        token: TestTokenIdentifier,
        ltv: usize,
        threshold: usize,
        bonus: usize,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.configure_reserve_as_collateral(
                    token.to_token_identifier(),
                    ltv,
                    threshold,
                    bonus,
                );
            });
    }

    pub fn enable_borrowing(&mut self, token: TestTokenIdentifier, stable_enabled: bool) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.enable_borrowing_on_reserve(token.to_token_identifier(), stable_enabled);
            });
    }

    pub fn disable_borrowing(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.disable_borrowing_on_reserve(token.to_token_identifier());
            });
    }

    pub fn freeze_reserve(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.freeze_reserve(token.to_token_identifier());
            });
    }

    pub fn disable_stable_rate(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.disable_reserve_stable_rate(token.to_token_identifier());
            });
    }

    pub fn deactivate_reserve(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.deactivate_reserve(token.to_token_identifier());
            });
    }

    pub fn deactivate_reserve_error(
        &mut self,
        token: TestTokenIdentifier,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.deactivate_reserve(token.to_token_identifier());
            });
    }

    pub fn set_reserve_factor_error(
        &mut self,
        token: TestTokenIdentifier,
        reserve_factor: usize,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_reserve_factor(token.to_token_identifier(), reserve_factor);
            });
    }

    pub fn pause(&mut self) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.pause_endpoint();
            });
    }

    pub fn unpause(&mut self) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.unpause_endpoint();
            });
    }

    pub fn set_reserve_factor(&mut self, token: TestTokenIdentifier, reserve_factor: usize) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_reserve_factor(token.to_token_identifier(), reserve_factor);
            });
    }

    /// Replaces the rate curve of `token`, keeping the default curve except for the steep slope.
    pub fn set_variable_rate_slope2(&mut self, token: TestTokenIdentifier, slope2: u128) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_reserve_interest_rate_strategy(
                    token.to_token_identifier(),
                    BigUint::from(OPTIMAL_UTILIZATION),
                    BigUint::from(BASE_VARIABLE_BORROW_RATE),
                    BigUint::from(VARIABLE_RATE_SLOPE1),
                    BigUint::from(slope2),
                    BigUint::from(STABLE_RATE_SLOPE1),
                    BigUint::from(STABLE_RATE_SLOPE2),
                );
            });
    }

    /// Price of one whole token in whole units of the common currency.
    pub fn set_price(&mut self, token: TestTokenIdentifier, price: u64) {
        self.set_price_raw(token, price as u128 * WAD);
    }

    pub fn set_price_raw(&mut self, token: TestTokenIdentifier, price: u128) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_asset_price(token.to_token_identifier(), BigUint::from(price));
            });
    }

    pub fn set_market_borrow_rate(&mut self, token: TestTokenIdentifier, rate: u128) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_market_borrow_rate(token.to_token_identifier(), BigUint::from(rate));
            });
    }

    // Supply

    pub fn deposit(&mut self, from: &TestAddress, token: TestTokenIdentifier, amount: u128) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                token.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.deposit(OptionalValue::None);
            });
    }

    pub fn deposit_on_behalf(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        on_behalf_of: &TestAddress,
    ) {
        let on_behalf_of = *on_behalf_of;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                token.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.deposit(OptionalValue::Some(on_behalf_of.to_managed_address()));
            });
    }

    pub fn deposit_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                token.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.deposit(OptionalValue::None);
            });
    }

    pub fn withdraw(&mut self, from: &TestAddress, token: TestTokenIdentifier, amount: u128) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.withdraw(
                    token.to_token_identifier(),
                    BigUint::from(amount),
                    OptionalValue::None,
                );
            });
    }

    /// Withdraws the whole balance through the max uint256 sentinel.
    pub fn withdraw_all(&mut self, from: &TestAddress, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.withdraw(
                    token.to_token_identifier(),
                    BigUint::from_bytes_be(&[0xffu8; 32]),
                    OptionalValue::None,
                );
            });
    }

    pub fn withdraw_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.withdraw(
                    token.to_token_identifier(),
                    BigUint::from(amount),
                    OptionalValue::None,
                );
            });
    }

    pub fn set_use_as_collateral(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        use_as_collateral: bool,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_user_use_reserve_as_collateral(
                    token.to_token_identifier(),
                    use_as_collateral,
                );
            });
    }

    pub fn set_use_as_collateral_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        use_as_collateral: bool,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.set_user_use_reserve_as_collateral(
                    token.to_token_identifier(),
                    use_as_collateral,
                );
            });
    }

    pub fn transfer_supply(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        to: &TestAddress,
        amount: u128,
    ) {
        let to = *to;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.transfer_supply(
                    token.to_token_identifier(),
                    to.to_managed_address(),
                    BigUint::from(amount),
                );
            });
    }

    pub fn transfer_supply_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        to: &TestAddress,
        amount: u128,
        error_message_bytes: &[u8],
    ) {
        let to = *to;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.transfer_supply(
                    token.to_token_identifier(),
                    to.to_managed_address(),
                    BigUint::from(amount),
                );
            });
    }

    // Debt

    pub fn borrow(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.borrow(
                    token.to_token_identifier(),
                    BigUint::from(amount),
                    rate_mode,
                    OptionalValue::None,
                );
            });
    }

    pub fn borrow_on_behalf(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
        on_behalf_of: &TestAddress,
    ) {
        let on_behalf_of = *on_behalf_of;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.borrow(
                    token.to_token_identifier(),
                    BigUint::from(amount),
                    rate_mode,
                    OptionalValue::Some(on_behalf_of.to_managed_address()),
                );
            });
    }

    pub fn borrow_on_behalf_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
        on_behalf_of: &TestAddress,
        error_message_bytes: &[u8],
    ) {
        let on_behalf_of = *on_behalf_of;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.borrow(
                    token.to_token_identifier(),
                    BigUint::from(amount),
                    rate_mode,
                    OptionalValue::Some(on_behalf_of.to_managed_address()),
                );
            });
    }

    pub fn borrow_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.borrow(
                    token.to_token_identifier(),
                    BigUint::from(amount),
                    rate_mode,
                    OptionalValue::None,
                );
            });
    }

    pub fn approve_delegation(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        rate_mode: InterestRateMode,
        delegatee: &TestAddress,
        amount: u128,
    ) {
        let delegatee = *delegatee;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.approve_delegation(
                    token.to_token_identifier(),
                    rate_mode,
                    delegatee.to_managed_address(),
                    BigUint::from(amount),
                );
            });
    }

    pub fn repay(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                token.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.repay(rate_mode, OptionalValue::None);
            });
    }

    pub fn repay_on_behalf(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
        on_behalf_of: &TestAddress,
    ) {
        let on_behalf_of = *on_behalf_of;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                token.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.repay(
                    rate_mode,
                    OptionalValue::Some(on_behalf_of.to_managed_address()),
                );
            });
    }

    pub fn repay_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: u128,
        rate_mode: InterestRateMode,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                token.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.repay(rate_mode, OptionalValue::None);
            });
    }

    pub fn swap_borrow_rate_mode(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        rate_mode: InterestRateMode,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.swap_borrow_rate_mode(token.to_token_identifier(), rate_mode);
            });
    }

    pub fn swap_borrow_rate_mode_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        rate_mode: InterestRateMode,
        error_message_bytes: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.swap_borrow_rate_mode(token.to_token_identifier(), rate_mode);
            });
    }

    pub fn rebalance_stable_borrow_rate_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        user: &TestAddress,
        error_message_bytes: &[u8],
    ) {
        let user = *user;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.rebalance_stable_borrow_rate(
                    token.to_token_identifier(),
                    user.to_managed_address(),
                );
            });
    }

    pub fn rebalance_stable_borrow_rate(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        user: &TestAddress,
    ) {
        let user = *user;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.rebalance_stable_borrow_rate(
                    token.to_token_identifier(),
                    user.to_managed_address(),
                );
            });
    }

    // Liquidation

    pub fn liquidate(
        &mut self,
        from: &TestAddress,
        collateral: TestTokenIdentifier,
        user: &TestAddress,
        debt: TestTokenIdentifier,
        amount: u128,
        receive_supply: bool,
    ) {
        let user = *user;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                debt.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.liquidation_call(
                    collateral.to_token_identifier(),
                    user.to_managed_address(),
                    receive_supply,
                );
            });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn liquidate_error(
        &mut self,
        from: &TestAddress,
        collateral: TestTokenIdentifier,
        user: &TestAddress,
        debt: TestTokenIdentifier,
        amount: u128,
        receive_supply: bool,
        error_message_bytes: &[u8],
    ) {
        let user = *user;
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .payment(EsdtTokenPayment::<StaticApi>::new(
                debt.to_token_identifier(),
                0,
                BigUint::from(amount),
            ))
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                sc.liquidation_call(
                    collateral.to_token_identifier(),
                    user.to_managed_address(),
                    receive_supply,
                );
            });
    }

    // Flash loans

    /// Flash loan of `(token, amount, mode)` entries through `endpoint` of the flash mock.
    /// `extra` is passed as the first endpoint argument when set.
    pub fn flash_loan(
        &mut self,
        from: &TestAddress,
        loans: &[(TestTokenIdentifier, u128, u8)],
        on_behalf_of: &TestAddress,
        endpoint: &str,
        extra: Option<u128>,
    ) {
        let loans = loans.to_vec();
        let on_behalf_of = *on_behalf_of;
        let endpoint = endpoint.to_string();
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                let (assets, amounts, modes) = flash_loan_vectors(&loans);
                sc.flash_loan(
                    FLASH_MOCK_ADDRESS.to_managed_address(),
                    assets,
                    amounts,
                    modes,
                    on_behalf_of.to_managed_address(),
                    ManagedBuffer::from(endpoint.as_str()),
                    flash_loan_arguments(extra),
                );
            });
    }

    pub fn flash_loan_error(
        &mut self,
        from: &TestAddress,
        loans: &[(TestTokenIdentifier, u128, u8)],
        on_behalf_of: &TestAddress,
        endpoint: &str,
        error_message_bytes: &[u8],
    ) {
        let loans = loans.to_vec();
        let on_behalf_of = *on_behalf_of;
        let endpoint = endpoint.to_string();
        self.world
            .tx()
            .from(*from)
            .to(LENDING_POOL_ADDRESS)
            .returns(ExpectMessage(error_message(error_message_bytes)))
            .whitebox(lending_pool::contract_obj, |sc| {
                let (assets, amounts, modes) = flash_loan_vectors(&loans);
                sc.flash_loan(
                    FLASH_MOCK_ADDRESS.to_managed_address(),
                    assets,
                    amounts,
                    modes,
                    on_behalf_of.to_managed_address(),
                    ManagedBuffer::from(endpoint.as_str()),
                    flash_loan_arguments(None),
                );
            });
    }

    // Queries

    pub fn supply_balance(&mut self, token: TestTokenIdentifier, user: &TestAddress) -> u128 {
        let user = *user;
        let mut balance = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                balance = raw(&sc.get_supply_balance_view(
                    token.to_token_identifier(),
                    user.to_managed_address(),
                ));
            });
        balance
    }

    pub fn variable_debt(&mut self, token: TestTokenIdentifier, user: &TestAddress) -> u128 {
        let user = *user;
        let mut debt = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                debt = raw(&sc.get_variable_debt_balance(
                    token.to_token_identifier(),
                    user.to_managed_address(),
                ));
            });
        debt
    }

    pub fn stable_debt(&mut self, token: TestTokenIdentifier, user: &TestAddress) -> u128 {
        let user = *user;
        let mut debt = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                debt = raw(&sc.get_stable_debt_balance(
                    token.to_token_identifier(),
                    user.to_managed_address(),
                ));
            });
        debt
    }

    /// Stable rate locked by `user` in `token`.
    pub fn user_stable_rate(&mut self, token: TestTokenIdentifier, user: &TestAddress) -> u128 {
        let user = *user;
        let mut rate = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                let data =
                    sc.get_user_reserve_data(token.to_token_identifier(), user.to_managed_address());
                rate = raw(&data.stable_borrow_rate);
            });
        rate
    }

    pub fn is_using_as_collateral(&mut self, token: TestTokenIdentifier, user: &TestAddress) -> bool {
        let user = *user;
        let mut using = false;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                let data =
                    sc.get_user_reserve_data(token.to_token_identifier(), user.to_managed_address());
                using = data.usage_as_collateral_enabled;
            });
        using
    }

    pub fn is_borrowing(&mut self, token: TestTokenIdentifier, user: &TestAddress) -> bool {
        let user = *user;
        let mut borrowing = false;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                let id = sc.reserve_state(&token.to_token_identifier()).get().id;
                let mapper = sc.user_config(&user.to_managed_address());
                borrowing = !mapper.is_empty() && mapper.get().is_borrowing(id);
            });
        borrowing
    }

    pub fn borrow_allowance(
        &mut self,
        token: TestTokenIdentifier,
        rate_mode: InterestRateMode,
        delegator: &TestAddress,
        delegatee: &TestAddress,
    ) -> u128 {
        let delegator = *delegator;
        let delegatee = *delegatee;
        let mut allowance = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                allowance = to_u128(
                    &sc.borrow_allowance(
                        &token.to_token_identifier(),
                        rate_mode,
                        &delegator.to_managed_address(),
                        &delegatee.to_managed_address(),
                    )
                    .get(),
                );
            });
        allowance
    }

    pub fn account_data(&mut self, user: &TestAddress) -> AccountSnapshot {
        let user = *user;
        let mut snapshot = AccountSnapshot::default();
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                let data = sc.get_user_account_data(user.to_managed_address());
                snapshot = AccountSnapshot {
                    total_collateral: raw(&data.total_collateral),
                    total_debt: raw(&data.total_debt),
                    available_borrows: raw(&data.available_borrows),
                    ltv: raw(&data.ltv),
                    liquidation_threshold: raw(&data.current_liquidation_threshold),
                    health_factor: raw(&data.health_factor),
                };
            });
        snapshot
    }

    /// Stored reserve state, as of the last update of the reserve.
    pub fn reserve(&mut self, token: TestTokenIdentifier) -> ReserveSnapshot {
        let mut snapshot = ReserveSnapshot::default();
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                let state = sc.get_reserve_data(token.to_token_identifier());
                snapshot = ReserveSnapshot {
                    liquidity_index: raw(&state.liquidity_index),
                    variable_borrow_index: raw(&state.variable_borrow_index),
                    liquidity_rate: raw(&state.current_liquidity_rate),
                    variable_borrow_rate: raw(&state.current_variable_borrow_rate),
                    stable_borrow_rate: raw(&state.current_stable_borrow_rate),
                    average_stable_rate: raw(&state.average_stable_rate),
                    available_liquidity: raw(&state.available_liquidity),
                    stable_debt_principal_total: raw(&state.stable_debt_principal_total),
                    last_update_timestamp: state.last_update_timestamp,
                };
            });
        snapshot
    }

    pub fn normalized_income(&mut self, token: TestTokenIdentifier) -> u128 {
        let mut index = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                index = raw(&sc.get_reserve_normalized_income(token.to_token_identifier()));
            });
        index
    }

    pub fn normalized_variable_debt(&mut self, token: TestTokenIdentifier) -> u128 {
        let mut index = 0u128;
        self.world
            .query()
            .to(LENDING_POOL_ADDRESS)
            .whitebox(lending_pool::contract_obj, |sc| {
                index =
                    raw(&sc.get_reserve_normalized_variable_debt(token.to_token_identifier()));
            });
        index
    }

    pub fn check_esdt_balance(&mut self, user: &TestAddress, token: TestTokenIdentifier, amount: u128) {
        self.world
            .check_account(*user)
            .esdt_balance(token, BigUint::<StaticApi>::from(amount));
    }

    pub fn check_flash_mock_balance(&mut self, token: TestTokenIdentifier, amount: u128) {
        self.world
            .check_account(FLASH_MOCK_ADDRESS)
            .esdt_balance(token, BigUint::<StaticApi>::from(amount));
    }

    pub fn check_pool_balance(&mut self, token: TestTokenIdentifier, amount: u128) {
        self.world
            .check_account(LENDING_POOL_ADDRESS)
            .esdt_balance(token, BigUint::<StaticApi>::from(amount));
    }
}

fn flash_loan_vectors(
    loans: &[(TestTokenIdentifier, u128, u8)],
) -> (
    ManagedVec<DebugApi, multiversx_sc::types::TokenIdentifier<DebugApi>>,
    ManagedVec<DebugApi, BigUint<DebugApi>>,
    ManagedVec<DebugApi, u8>,
) {
    let mut assets = ManagedVec::new();
    let mut amounts = ManagedVec::new();
    let mut modes = ManagedVec::new();
    for (token, amount, mode) in loans {
        assets.push(token.to_token_identifier());
        amounts.push(BigUint::from(*amount));
        modes.push(*mode);
    }

    (assets, amounts, modes)
}

fn flash_loan_arguments(extra: Option<u128>) -> ManagedArgBuffer<DebugApi> {
    let mut arguments = ManagedArgBuffer::new();
    if let Some(extra) = extra {
        arguments.push_arg(BigUint::<DebugApi>::from(extra));
    }

    arguments
}
