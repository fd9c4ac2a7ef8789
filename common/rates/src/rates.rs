#![no_std]
use common_constants::{RAY, SECONDS_PER_YEAR};
use common_errors::{
    ERROR_LIQUIDITY_INDEX_OVERFLOW, ERROR_LIQUIDITY_RATE_OVERFLOW,
    ERROR_STABLE_BORROW_RATE_OVERFLOW, ERROR_VARIABLE_BORROW_INDEX_OVERFLOW,
    ERROR_VARIABLE_BORROW_RATE_OVERFLOW,
};
use common_structs::{
    InterestRateStrategy, ReserveConfiguration, ReserveRates, ReserveState, StableDebtPosition,
};

multiversx_sc::imports!();

/// The InterestRates module holds the pure accrual and pricing functions of a reserve.
///
/// **Scope**: Growth factors, the two-slope rate curve, `advance` and `reprice`.
///
/// **Goal**: Accrual math without position bookkeeping, composed by the pool.
#[multiversx_sc::module]
pub trait InterestRates: common_math::SharedMathModule {
    /// Simple interest factor used for the liquidity index.
    ///
    /// **Formula**:
    /// - `RAY + rate * delta / SECONDS_PER_YEAR`, the division floors.
    ///
    /// # Arguments
    /// - `rate`: Annual rate in ray.
    /// - `delta`: Seconds since the last update.
    ///
    /// # Returns
    /// - Growth factor in ray.
    fn calculate_linear_interest(
        &self,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        delta: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let accrued = self.checked_mul(rate.into_raw_units(), &BigUint::from(delta))
            / BigUint::from(SECONDS_PER_YEAR);

        self.to_decimal_ray(self.checked_add(&accrued, &BigUint::from(RAY)))
    }

    /// Compound interest factor, expanded to the third order.
    ///
    /// **Formula**:
    /// - `rps = rate / SECONDS_PER_YEAR`
    /// - `RAY + rps * n + n(n-1) * rps^2 / 2 + n(n-1)(n-2) * rps^3 / 6`
    /// - Powers of `rps` are computed with `ray_mul`, so the rounding of each power is part of
    ///   the result. `n == 0` returns exactly `RAY`.
    ///
    /// # Arguments
    /// - `rate`: Annual rate in ray.
    /// - `delta`: Seconds of compounding.
    ///
    /// # Returns
    /// - Growth factor in ray.
    fn calculate_compounded_interest(
        &self,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        delta: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if delta == 0 {
            return self.ray();
        }

        let exp = BigUint::from(delta);
        let exp_minus_one = BigUint::from(delta - 1);
        let exp_minus_two = BigUint::from(if delta > 2 { delta - 2 } else { 0 });

        let rate_per_second =
            self.to_decimal_ray(rate.into_raw_units() / &BigUint::from(SECONDS_PER_YEAR));

        let base_power_two = self.ray_mul(&rate_per_second, &rate_per_second);
        let base_power_three = self.ray_mul(&base_power_two, &rate_per_second);

        let exp_pairs = self.checked_mul(&exp, &exp_minus_one);
        let second_term =
            self.checked_mul(&exp_pairs, base_power_two.into_raw_units()) / BigUint::from(2u64);
        let third_term = self.checked_mul(
            &self.checked_mul(&exp_pairs, &exp_minus_two),
            base_power_three.into_raw_units(),
        ) / BigUint::from(6u64);

        let first_term = self.checked_mul(rate_per_second.into_raw_units(), &exp);

        let mut factor = self.checked_add(&BigUint::from(RAY), &first_term);
        factor = self.checked_add(&factor, &second_term);
        factor = self.checked_add(&factor, &third_term);

        self.to_decimal_ray(factor)
    }

    /// Share of the reserve that is lent out.
    ///
    /// # Returns
    /// - `0` without debt, otherwise `ray_div(total_debt, available + total_debt)`.
    fn calculate_utilization(
        &self,
        total_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        available_liquidity: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if total_debt.into_raw_units() == &BigUint::zero() {
            return self.ray_zero();
        }

        let total_liquidity = available_liquidity.clone() + total_debt.clone();
        self.ray_div(total_debt, &total_liquidity)
    }

    /// Stable and variable borrow rates for a utilization.
    ///
    /// **Formula**:
    /// - Above the optimal point, `excess = (u - optimal) / (1 - optimal)`:
    ///   - `stable = market + s1 + s2 * excess`
    ///   - `variable = base + v1 + v2 * excess`
    /// - Otherwise:
    ///   - `stable = market + s1 * (u / optimal)`, ratio taken first.
    ///   - `variable = base + (u * v1) / optimal`, product taken first.
    ///
    /// The two curves round in a different order.
    ///
    /// # Returns
    /// - `(stable_rate, variable_rate)` in ray.
    fn calculate_borrow_rates(
        &self,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        market_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        strategy: &InterestRateStrategy<Self::Api>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let optimal = &strategy.optimal_utilization;

        if utilization > optimal {
            let excess_utilization = self.ray() - optimal.clone();
            let excess_ratio = self.ray_div(
                &(utilization.clone() - optimal.clone()),
                &excess_utilization,
            );

            let stable = market_borrow_rate.clone()
                + strategy.stable_rate_slope1.clone()
                + self.ray_mul(&strategy.stable_rate_slope2, &excess_ratio);
            let variable = strategy.base_variable_borrow_rate.clone()
                + strategy.variable_rate_slope1.clone()
                + self.ray_mul(&strategy.variable_rate_slope2, &excess_ratio);

            (stable, variable)
        } else {
            let stable = market_borrow_rate.clone()
                + self.ray_mul(
                    &strategy.stable_rate_slope1,
                    &self.ray_div(utilization, optimal),
                );
            let variable = strategy.base_variable_borrow_rate.clone()
                + self.ray_div(
                    &self.ray_mul(utilization, &strategy.variable_rate_slope1),
                    optimal,
                );

            (stable, variable)
        }
    }

    /// Debt-weighted mean of the variable rate and the average stable rate.
    fn calculate_overall_borrow_rate(
        &self,
        total_stable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        total_variable_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        variable_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        average_stable_rate: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let total_debt = total_stable_debt.clone() + total_variable_debt.clone();
        if total_debt.into_raw_units() == &BigUint::zero() {
            return self.ray_zero();
        }

        let weighted_variable =
            self.ray_mul(&self.wad_to_ray(total_variable_debt), variable_borrow_rate);
        let weighted_stable = self.ray_mul(&self.wad_to_ray(total_stable_debt), average_stable_rate);

        self.ray_div(
            &(weighted_variable + weighted_stable),
            &self.wad_to_ray(&total_debt),
        )
    }

    /// Rate earned by suppliers: the blended borrow rate times utilization, minus the
    /// protocol's reserve factor.
    fn calculate_liquidity_rate(
        &self,
        overall_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let gross_rate = self.ray_mul(overall_borrow_rate, utilization);
        self.percent_mul(&gross_rate, &(self.bps() - reserve_factor.clone()))
    }

    fn max_variable_borrow_rate(
        &self,
        strategy: &InterestRateStrategy<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        strategy.base_variable_borrow_rate.clone()
            + strategy.variable_rate_slope1.clone()
            + strategy.variable_rate_slope2.clone()
    }

    /// Balance-weighted mean of two rates.
    ///
    /// **Formula**:
    /// - `(b1 * r1 + b2 * r2) / (b1 + b2)` with balances lifted to ray first.
    /// - Returns `RAY` when both balances are zero.
    fn weighted_average_rate(
        &self,
        balance_a: &ManagedDecimal<Self::Api, NumDecimals>,
        rate_a: &ManagedDecimal<Self::Api, NumDecimals>,
        balance_b: &ManagedDecimal<Self::Api, NumDecimals>,
        rate_b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let total = balance_a.clone() + balance_b.clone();
        if total.into_raw_units() == &BigUint::zero() {
            return self.ray();
        }

        let weighted_a = self.ray_mul(rate_a, &self.wad_to_ray(balance_a));
        let weighted_b = self.ray_mul(rate_b, &self.wad_to_ray(balance_b));

        self.ray_div(&(weighted_a + weighted_b), &self.wad_to_ray(&total))
    }

    /// Removes `amount` borrowed at `rate` from a stable aggregate.
    ///
    /// # Returns
    /// - `(next_total, next_average_rate)`. Both reset to zero once nothing is left or the
    ///   removed weight covers the whole aggregate.
    fn subtract_from_average_rate(
        &self,
        total: &ManagedDecimal<Self::Api, NumDecimals>,
        average_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let zero_total = self.to_decimal(BigUint::zero(), total.scale());
        if total <= amount {
            return (zero_total, self.ray_zero());
        }

        let next_total = total.clone() - amount.clone();
        let aggregate_weight = self.ray_mul(average_rate, &self.wad_to_ray(total));
        let removed_weight = self.ray_mul(rate, &self.wad_to_ray(amount));

        if removed_weight >= aggregate_weight {
            return (zero_total, self.ray_zero());
        }

        let next_average = self.ray_div(
            &(aggregate_weight - removed_weight),
            &self.wad_to_ray(&next_total),
        );

        (next_total, next_average)
    }

    /// Catches a reserve up to `now`.
    ///
    /// **Process**:
    /// 1. The liquidity index grows by the linear factor of the current liquidity rate.
    /// 2. The variable index grows by the compound factor of the current variable rate,
    ///    only while scaled variable debt exists.
    /// 3. The update timestamp moves to `now`.
    ///
    /// # Returns
    /// - The advanced state; the input is left untouched.
    fn advance(
        &self,
        state: &ReserveState<Self::Api>,
        now: u64,
    ) -> ReserveState<Self::Api> {
        let mut next = state.clone();
        let delta = now - state.last_update_timestamp;

        if delta > 0 {
            if state.current_liquidity_rate.into_raw_units() > &BigUint::zero() {
                let growth = self.calculate_linear_interest(&state.current_liquidity_rate, delta);
                next.liquidity_index = self.ray_mul(&growth, &state.liquidity_index);
                require!(
                    next.liquidity_index.into_raw_units() <= &self.max_uint128(),
                    ERROR_LIQUIDITY_INDEX_OVERFLOW
                );
            }

            if state.has_variable_debt() {
                let growth =
                    self.calculate_compounded_interest(&state.current_variable_borrow_rate, delta);
                next.variable_borrow_index = self.ray_mul(&growth, &state.variable_borrow_index);
                require!(
                    next.variable_borrow_index.into_raw_units() <= &self.max_uint128(),
                    ERROR_VARIABLE_BORROW_INDEX_OVERFLOW
                );
            }
        }

        next.last_update_timestamp = now;
        next
    }

    /// Prices a reserve from its current totals.
    ///
    /// **Process**:
    /// 1. Variable debt is `scaled_total * variable_index`, stable debt the principal compounded
    ///    at the average stable rate since its snapshot.
    /// 2. Utilization feeds the strategy for new stable and variable rates.
    /// 3. The liquidity rate is the overall borrow rate times utilization, net of the
    ///    reserve factor.
    ///
    /// # Returns
    /// - `ReserveRates` in ray; values above `u128::MAX` are rejected.
    fn reprice(
        &self,
        state: &ReserveState<Self::Api>,
        config: &ReserveConfiguration<Self::Api>,
        strategy: &InterestRateStrategy<Self::Api>,
        market_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        now: u64,
    ) -> ReserveRates<Self::Api> {
        let total_variable_debt =
            self.ray_mul(&state.variable_debt_scaled_total, &state.variable_borrow_index);
        let total_stable_debt = self.stable_debt_total(state, now);
        let total_debt = total_stable_debt.clone() + total_variable_debt.clone();

        let utilization = self.calculate_utilization(&total_debt, &state.available_liquidity);
        let (stable_borrow_rate, variable_borrow_rate) =
            self.calculate_borrow_rates(&utilization, market_borrow_rate, strategy);

        let overall_borrow_rate = self.calculate_overall_borrow_rate(
            &total_stable_debt,
            &total_variable_debt,
            &variable_borrow_rate,
            &state.average_stable_rate,
        );
        let liquidity_rate = self.calculate_liquidity_rate(
            &overall_borrow_rate,
            &utilization,
            &config.reserve_factor,
        );

        let max_rate = self.max_uint128();
        require!(
            liquidity_rate.into_raw_units() <= &max_rate,
            ERROR_LIQUIDITY_RATE_OVERFLOW
        );
        require!(
            stable_borrow_rate.into_raw_units() <= &max_rate,
            ERROR_STABLE_BORROW_RATE_OVERFLOW
        );
        require!(
            variable_borrow_rate.into_raw_units() <= &max_rate,
            ERROR_VARIABLE_BORROW_RATE_OVERFLOW
        );

        ReserveRates {
            liquidity_rate,
            stable_borrow_rate,
            variable_borrow_rate,
        }
    }

    /// Liquidity index as it would be after an update at `now`.
    fn normalized_income(
        &self,
        state: &ReserveState<Self::Api>,
        now: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if state.last_update_timestamp == now {
            return state.liquidity_index.clone();
        }

        let growth = self.calculate_linear_interest(
            &state.current_liquidity_rate,
            now - state.last_update_timestamp,
        );
        self.ray_mul(&growth, &state.liquidity_index)
    }

    /// Variable borrow index as it would be after an update at `now`.
    fn normalized_debt(
        &self,
        state: &ReserveState<Self::Api>,
        now: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if state.last_update_timestamp == now {
            return state.variable_borrow_index.clone();
        }

        let growth = self.calculate_compounded_interest(
            &state.current_variable_borrow_rate,
            now - state.last_update_timestamp,
        );
        self.ray_mul(&growth, &state.variable_borrow_index)
    }

    /// Total stable debt of a reserve compounded to `now`.
    fn stable_debt_total(
        &self,
        state: &ReserveState<Self::Api>,
        now: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.compound_principal(
            &state.stable_debt_principal_total,
            &state.average_stable_rate,
            state.stable_debt_timestamp,
            now,
        )
    }

    /// Stable debt of one position compounded at its own rate to `now`.
    fn stable_debt_balance(
        &self,
        position: &StableDebtPosition<Self::Api>,
        now: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.compound_principal(
            &position.principal,
            &position.stable_rate,
            position.last_update_timestamp,
            now,
        )
    }

    fn compound_principal(
        &self,
        principal: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        from: u64,
        to: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if principal.into_raw_units() == &BigUint::zero() {
            return principal.clone();
        }

        let growth = self.calculate_compounded_interest(rate, to.saturating_sub(from));
        self.ray_mul(principal, &growth)
    }
}
