multiversx_sc::imports!();

use common_constants::RAY_PRECISION;
use common_errors::{ERROR_BURN_EXCEEDS_BALANCE, ERROR_STABLE_DEBT_OVERFLOW};
use common_structs::StableDebtPosition;

use crate::{cache::ReserveCache, storage};

/// Stable rate debt.
///
/// Each position keeps its own principal, rate and timestamp. The reserve keeps the
/// pooled principal, its balance weighted average rate and the time both were last
/// snapshotted; every mint or burn updates the position and the pool together.
#[multiversx_sc::module]
pub trait StableDebtModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
{
    fn get_stable_debt_position(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        decimals: usize,
    ) -> StableDebtPosition<Self::Api> {
        let mapper = self.stable_debt_position(asset, user);
        if mapper.is_empty() {
            StableDebtPosition::new(decimals, RAY_PRECISION)
        } else {
            mapper.get()
        }
    }

    /// Stable debt of `user` compounded to `now`.
    fn get_stable_debt(
        &self,
        asset: &TokenIdentifier,
        user: &ManagedAddress,
        decimals: usize,
        now: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let position = self.get_stable_debt_position(asset, user, decimals);
        self.stable_debt_balance(&position, now)
    }

    /// Borrows `amount` at `rate` on top of the stable debt of `on_behalf_of`.
    ///
    /// **Process**:
    /// 1. Realises the compounded balance of the position.
    /// 2. The position rate becomes the balance weighted average of the old rate and `rate`.
    /// 3. The pool average is re-weighted the same way against the compounded pool total,
    ///    which then grows by `amount`.
    /// 4. Position and pool timestamps move to now.
    ///
    /// # Returns
    /// - `true` when `on_behalf_of` had no stable debt before.
    fn mint_stable_debt(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        on_behalf_of: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> bool {
        let now = cache.timestamp;
        let mut position =
            self.get_stable_debt_position(&cache.asset, on_behalf_of, cache.config.decimals);

        let current_balance = self.stable_debt_balance(&position, now);
        let balance_increase = self.saturating_sub(&current_balance, &position.principal);
        let was_empty = current_balance == cache.zero;

        let previous_total = self.stable_debt_total(&cache.state, now);
        let next_total = previous_total.clone() + amount.clone();

        let next_user_rate =
            self.weighted_average_rate(&current_balance, &position.stable_rate, amount, rate);
        require!(
            next_user_rate.into_raw_units() <= &self.max_uint128(),
            ERROR_STABLE_DEBT_OVERFLOW
        );

        let next_average_rate = self.weighted_average_rate(
            &previous_total,
            &cache.state.average_stable_rate,
            amount,
            rate,
        );

        position.principal = current_balance.clone() + amount.clone();
        position.stable_rate = next_user_rate.clone();
        position.last_update_timestamp = now;
        self.stable_debt_position(&cache.asset, on_behalf_of)
            .set(&position);

        cache.state.stable_debt_principal_total = next_total.clone();
        cache.state.average_stable_rate = next_average_rate.clone();
        cache.state.stable_debt_timestamp = now;

        self.stable_debt_mint_event(
            &cache.asset,
            user,
            on_behalf_of,
            amount,
            &current_balance,
            &balance_increase,
            &next_user_rate,
            &next_average_rate,
            &next_total,
        );

        was_empty
    }

    /// Repays `amount` of the stable debt of `user`.
    ///
    /// The pool average loses the weight of `amount` at the position rate. Pool total and
    /// average reset to zero once the pool total does not exceed `amount` or the removed
    /// weight covers the whole aggregate. A position repaid exactly to zero is cleared,
    /// which resets its rate and timestamp.
    fn burn_stable_debt(
        &self,
        cache: &mut ReserveCache<Self>,
        user: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let now = cache.timestamp;
        let mut position =
            self.get_stable_debt_position(&cache.asset, user, cache.config.decimals);

        let current_balance = self.stable_debt_balance(&position, now);
        require!(*amount <= current_balance, ERROR_BURN_EXCEEDS_BALANCE);
        let balance_increase = self.saturating_sub(&current_balance, &position.principal);

        let previous_total = self.stable_debt_total(&cache.state, now);
        let (next_total, next_average_rate) = self.subtract_from_average_rate(
            &previous_total,
            &cache.state.average_stable_rate,
            amount,
            &position.stable_rate,
        );

        cache.state.stable_debt_principal_total = next_total.clone();
        cache.state.average_stable_rate = next_average_rate.clone();
        cache.state.stable_debt_timestamp = now;

        if *amount == current_balance {
            self.stable_debt_position(&cache.asset, user).clear();
        } else {
            position.principal = current_balance.clone() - amount.clone();
            position.last_update_timestamp = now;
            self.stable_debt_position(&cache.asset, user).set(&position);
        }

        self.stable_debt_burn_event(
            &cache.asset,
            user,
            amount,
            &current_balance,
            &balance_increase,
            &next_average_rate,
            &next_total,
        );
    }
}
