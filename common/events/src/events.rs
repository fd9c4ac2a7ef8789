#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("reserve_initialized")]
    fn reserve_initialized_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] id: usize,
        #[indexed] decimals: usize,
        #[indexed] strategy: &InterestRateStrategy<Self::Api>,
    );

    #[event("reserve_configuration_updated")]
    fn reserve_configuration_updated_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] configuration: &ReserveConfiguration<Self::Api>,
    );

    #[event("reserve_interest_rate_strategy_changed")]
    fn reserve_interest_rate_strategy_changed_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] strategy: &InterestRateStrategy<Self::Api>,
    );

    #[event("asset_price_updated")]
    fn asset_price_updated_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] price: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("market_borrow_rate_updated")]
    fn market_borrow_rate_updated_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] rate: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    // Emitted after every repricing of a reserve
    #[event("reserve_data_updated")]
    fn reserve_data_updated_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] liquidity_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] stable_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] variable_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] liquidity_index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] variable_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] on_behalf_of: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("borrow")]
    fn borrow_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] on_behalf_of: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] rate_mode: InterestRateMode,
        #[indexed] borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("repay")]
    fn repay_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] repayer: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("swap")]
    fn swap_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] rate_mode: InterestRateMode,
    );

    #[event("rebalance_stable_borrow_rate")]
    fn rebalance_stable_borrow_rate_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
    );

    #[event("reserve_used_as_collateral_enabled")]
    fn reserve_used_as_collateral_enabled_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
    );

    #[event("reserve_used_as_collateral_disabled")]
    fn reserve_used_as_collateral_disabled_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
    );

    #[event("liquidation_call")]
    fn liquidation_call_event(
        &self,
        #[indexed] collateral_asset: &TokenIdentifier,
        #[indexed] debt_asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] debt_to_cover: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] liquidated_collateral_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] liquidator: &ManagedAddress,
        #[indexed] receive_supply: bool,
    );

    #[event("flash_loan")]
    fn flash_loan_event(
        &self,
        #[indexed] receiver: &ManagedAddress,
        #[indexed] initiator: &ManagedAddress,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] premium: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("borrow_allowance_delegated")]
    fn borrow_allowance_delegated_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] delegator: &ManagedAddress,
        #[indexed] delegatee: &ManagedAddress,
        #[indexed] rate_mode: InterestRateMode,
        #[indexed] amount: &BigUint,
    );

    // Position level events. `index` is the reserve index the amount was scaled with,
    // `balance_increase` the interest accrued since the position was last touched.
    #[event("supply_mint")]
    fn supply_mint_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance_increase: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("supply_burn")]
    fn supply_burn_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance_increase: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("supply_transfer")]
    fn supply_transfer_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] index: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("variable_debt_mint")]
    fn variable_debt_mint_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] on_behalf_of: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance_increase: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("variable_debt_burn")]
    fn variable_debt_burn_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance_increase: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("stable_debt_mint")]
    fn stable_debt_mint_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] on_behalf_of: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] current_balance: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance_increase: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] new_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] average_stable_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] total_supply: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("stable_debt_burn")]
    fn stable_debt_burn_event(
        &self,
        #[indexed] asset: &TokenIdentifier,
        #[indexed] user: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] current_balance: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] balance_increase: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] average_stable_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] total_supply: &ManagedDecimal<Self::Api, NumDecimals>,
    );
}
