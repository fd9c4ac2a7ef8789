multiversx_sc::imports!();

use common_structs::{
    InterestRateMode, InterestRateStrategy, ReserveConfiguration, ReserveState, ScaledPosition,
    StableDebtPosition, UserConfiguration,
};

#[multiversx_sc::module]
pub trait Storage {
    /// Listed reserves. The position of an asset in this list is its reserve id,
    /// which is also its bit in every user configuration.
    #[view(getReservesList)]
    #[storage_mapper("reserves_list")]
    fn reserves_list(&self) -> VecMapper<TokenIdentifier>;

    #[storage_mapper("reserve_config")]
    fn reserve_config(
        &self,
        asset: &TokenIdentifier,
    ) -> SingleValueMapper<ReserveConfiguration<Self::Api>>;

    /// Indexes, rates and totals of a reserve as of its last update.
    #[storage_mapper("reserve_state")]
    fn reserve_state(&self, asset: &TokenIdentifier) -> SingleValueMapper<ReserveState<Self::Api>>;

    #[storage_mapper("rate_strategy")]
    fn rate_strategy(
        &self,
        asset: &TokenIdentifier,
    ) -> SingleValueMapper<InterestRateStrategy<Self::Api>>;

    /// Supply of a user, scaled by the liquidity index.
    #[storage_mapper("supply_position")]
    fn supply_position(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
    ) -> SingleValueMapper<ScaledPosition<Self::Api>>;

    /// Variable debt of a user, scaled by the variable borrow index.
    #[storage_mapper("variable_debt_position")]
    fn variable_debt_position(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
    ) -> SingleValueMapper<ScaledPosition<Self::Api>>;

    #[storage_mapper("stable_debt_position")]
    fn stable_debt_position(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
    ) -> SingleValueMapper<StableDebtPosition<Self::Api>>;

    #[view(getUserConfiguration)]
    #[storage_mapper("user_config")]
    fn user_config(&self, user: &ManagedAddress) -> SingleValueMapper<UserConfiguration>;

    /// Amount `delegatee` may still borrow in the name of `delegator`.
    #[view(getBorrowAllowance)]
    #[storage_mapper("borrow_allowance")]
    fn borrow_allowance(
        &self,
        asset: &TokenIdentifier,
        rate_mode: InterestRateMode,
        delegator: &ManagedAddress,
        delegatee: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    /// Price of one whole unit of the asset, in wad of the common unit.
    #[storage_mapper("asset_price")]
    fn asset_price(&self, asset: &TokenIdentifier) -> SingleValueMapper<BigUint>;

    #[storage_mapper("market_borrow_rate")]
    fn market_borrow_rate(&self, asset: &TokenIdentifier) -> SingleValueMapper<BigUint>;

    /// Receives the reserve factor share of the accrued interest as supply.
    #[view(getTreasury)]
    #[storage_mapper("treasury")]
    fn treasury(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(isFlashLoanOngoing)]
    #[storage_mapper("flash_loan_ongoing")]
    fn flash_loan_ongoing(&self) -> SingleValueMapper<bool>;
}
