multiversx_sc::imports!();

use common_errors::{ERROR_BURN_EXCEEDS_BALANCE, ERROR_INVALID_BURN_AMOUNT, ERROR_INVALID_MINT_AMOUNT};
use common_structs::ScaledPosition;

use crate::{cache::ReserveCache, storage};

#[multiversx_sc::module]
pub trait VariableDebtModule:
    storage::Storage + common_events::EventsModule + common_math::SharedMathModule
{
    fn get_variable_debt_position(
        &self,
        cache: &ReserveCache<Self>,
        user: &ManagedAddress,
    ) -> ScaledPosition<Self::Api> {
        let mapper = self.variable_debt_position(&cache.asset, user);
        if mapper.is_empty() {
            ScaledPosition::new(cache.config.decimals, cache.state.variable_borrow_index.clone())
        } else {
            mapper.get()
        }
    }

    fn get_scaled_variable_debt(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.variable_debt_position(asset, user);
        if mapper.is_empty() {
            self.to_decimal(BigUint::zero(), decimals)
        } else {
            mapper.get().scaled_balance
        }
    }

    /// Opens or grows the variable debt of `on_behalf_of`.
    ///
    /// # Returns
    /// - `true` when `on_behalf_of` had no variable debt before.
    fn mint_variable_debt(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        on_behalf_of: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> bool {
        let scaled_amount = cache.get_scaled_debt_amount(amount);
        require!(scaled_amount > cache.zero, ERROR_INVALID_MINT_AMOUNT);

        let index = cache.state.variable_borrow_index.clone();
        let mut position = self.get_variable_debt_position(cache, on_behalf_of);
        let was_empty = position.is_empty();

        let balance_increase = self.debt_accrued_since_last_touch(&position, &index);

        position.scaled_balance += &scaled_amount;
        position.last_index = index.clone();
        cache.state.variable_debt_scaled_total += &scaled_amount;

        let balance = self.ray_mul(&position.scaled_balance, &index);
        self.variable_debt_position(&cache.asset, on_behalf_of)
            .set(&position);

        self.variable_debt_mint_event(
            &cache.asset,
            user,
            on_behalf_of,
            amount,
            &index,
            &balance,
            &balance_increase,
        );

        was_empty
    }

    fn burn_variable_debt(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let scaled_amount = cache.get_scaled_debt_amount(amount);
        require!(scaled_amount > cache.zero, ERROR_INVALID_BURN_AMOUNT);

        let index = cache.state.variable_borrow_index.clone();
        let mut position = self.get_variable_debt_position(cache, user);
        require!(
            scaled_amount <= position.scaled_balance,
            ERROR_BURN_EXCEEDS_BALANCE
        );

        let balance_increase = self.debt_accrued_since_last_touch(&position, &index);

        position.scaled_balance -= &scaled_amount;
        position.last_index = index.clone();
        cache.state.variable_debt_scaled_total =
            self.saturating_sub(&cache.state.variable_debt_scaled_total, &scaled_amount);

        let balance = self.ray_mul(&position.scaled_balance, &index);
        if position.is_empty() {
            self.variable_debt_position(&cache.asset, user).clear();
        } else {
            self.variable_debt_position(&cache.asset, user).set(&position);
        }

        self.variable_debt_burn_event(
            &cache.asset,
            user,
            amount,
            &index,
            &balance,
            &balance_increase,
        );
    }

    fn debt_accrued_since_last_touch(
        &self,
        position: &ScaledPosition<Self::Api>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let current = self.ray_mul(&position.scaled_balance, index);
        let previous = self.ray_mul(&position.scaled_balance, &position.last_index);
        self.saturating_sub(&current, &previous)
    }
}
