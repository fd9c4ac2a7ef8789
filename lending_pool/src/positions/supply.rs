multiversx_sc::imports!();

use common_errors::{ERROR_BURN_EXCEEDS_BALANCE, ERROR_INVALID_BURN_AMOUNT, ERROR_INVALID_MINT_AMOUNT};
use common_structs::ScaledPosition;

use crate::{cache::ReserveCache, storage};

/// Interest bearing supply positions, stored scaled by the liquidity index.
#[multiversx_sc::module]
pub trait SupplyPositionModule:
    storage::Storage + common_events::EventsModule + common_math::SharedMathModule
{
    fn get_supply_position(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        decimals: usize,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ScaledPosition<Self::Api> {
        let mapper = self.supply_position(asset, user);
        if mapper.is_empty() {
            ScaledPosition::new(decimals, index.clone())
        } else {
            mapper.get()
        }
    }

    /// Scaled supply balance of a user, zero at the reserve decimals when none.
    fn get_scaled_supply(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.supply_position(asset, user);
        if mapper.is_empty() {
            self.to_decimal(BigUint::zero(), decimals)
        } else {
            mapper.get().scaled_balance
        }
    }

    /// Adds `amount` to the supply of `user` at the current liquidity index.
    ///
    /// # Returns
    /// - `true` when the user had no supply before.
    fn mint_supply(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> bool {
        let scaled_amount = cache.get_scaled_supply_amount(amount);
        require!(scaled_amount > cache.zero, ERROR_INVALID_MINT_AMOUNT);

        self.mint_scaled_supply(cache, user, amount, scaled_amount)
    }

    /// Protocol share of the accrued interest. Dust that scales to zero is skipped.
    fn mint_to_treasury(
        &self,
        cache: &mut ReserveCache<Self>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let scaled_amount = cache.get_scaled_supply_amount(amount);
        if scaled_amount == cache.zero {
            return;
        }

        let treasury = self.treasury().get();
        self.mint_scaled_supply(cache, &treasury, amount, scaled_amount);
    }

    fn mint_scaled_supply(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        scaled_amount: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> bool {
        let index = cache.state.liquidity_index.clone();
        let mut position =
            self.get_supply_position(&cache.asset, user, cache.config.decimals, &index);
        let was_empty = position.is_empty();

        let balance_increase = self.accrued_since_last_touch(&position, &index);

        position.scaled_balance += &scaled_amount;
        position.last_index = index.clone();
        cache.state.supply_scaled_total += &scaled_amount;

        let balance = self.ray_mul(&position.scaled_balance, &index);
        self.supply_position(&cache.asset, user).set(&position);

        self.supply_mint_event(
            &cache.asset,
            user,
            amount,
            &index,
            &balance,
            &balance_increase,
        );

        was_empty
    }

    /// Removes `amount` from the supply of `user` at the current liquidity index.
    fn burn_supply(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let scaled_amount = cache.get_scaled_supply_amount(amount);
        require!(scaled_amount > cache.zero, ERROR_INVALID_BURN_AMOUNT);

        let index = cache.state.liquidity_index.clone();
        let mut position =
            self.get_supply_position(&cache.asset, user, cache.config.decimals, &index);
        require!(
            scaled_amount <= position.scaled_balance,
            ERROR_BURN_EXCEEDS_BALANCE
        );

        let balance_increase = self.accrued_since_last_touch(&position, &index);

        position.scaled_balance -= &scaled_amount;
        position.last_index = index.clone();
        cache.state.supply_scaled_total =
            self.saturating_sub(&cache.state.supply_scaled_total, &scaled_amount);

        let balance = self.ray_mul(&position.scaled_balance, &index);
        if position.is_empty() {
            self.supply_position(&cache.asset, user).clear();
        } else {
            self.supply_position(&cache.asset, user).set(&position);
        }

        self.supply_burn_event(
            &cache.asset,
            user,
            amount,
            &index,
            &balance,
            &balance_increase,
        );
    }

    /// Moves supply between two users at `index`. Reserve totals are unchanged.
    fn transfer_supply_position(
        &self,
        asset: &TokenIdentifier,
        decimals: usize,
        from: &ManagedAddress,
        to: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let scaled_amount = self.ray_div(amount, index);

        let mut sender = self.get_supply_position(asset, from, decimals, index);
        require!(
            scaled_amount <= sender.scaled_balance,
            ERROR_BURN_EXCEEDS_BALANCE
        );
        sender.scaled_balance -= &scaled_amount;
        sender.last_index = index.clone();
        if sender.is_empty() {
            self.supply_position(asset, from).clear();
        } else {
            self.supply_position(asset, from).set(&sender);
        }

        let mut receiver = self.get_supply_position(asset, to, decimals, index);
        receiver.scaled_balance += &scaled_amount;
        receiver.last_index = index.clone();
        self.supply_position(asset, to).set(&receiver);

        self.supply_transfer_event(asset, from, to, amount, index);
    }

    /// Interest earned by a position between its last touch and `index`.
    fn accrued_since_last_touch(
        &self,
        position: &ScaledPosition<Self::Api>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let current = self.ray_mul(&position.scaled_balance, index);
        let previous = self.ray_mul(&position.scaled_balance, &position.last_index);
        self.saturating_sub(&current, &previous)
    }
}
