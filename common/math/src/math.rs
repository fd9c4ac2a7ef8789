#![no_std]

use common_constants::{
    BPS, BPS_PRECISION, MAX_UINT256_BYTES, RAY, RAY_PRECISION, WAD, WAD_PRECISION,
    WAD_RAY_RATIO, WAD_RAY_RATIO_PRECISION,
};
use common_errors::{ERROR_ADDITION_OVERFLOW, ERROR_DIVISION_BY_ZERO, ERROR_MULTIPLICATION_OVERFLOW};

multiversx_sc::imports!();

/// Fixed-point arithmetic shared by every module of the pool.
///
/// All values are `ManagedDecimal`s whose scale is carried along with the raw units.
/// Multiplication and division work on raw units and round half-up at the requested
/// base, so `ray_mul(amount, index)` keeps the scale of `amount` exactly like an
/// integer `(a * b + RAY / 2) / RAY` would.
///
/// Any intermediate above `2^256 - 1` is rejected instead of being carried on.
#[multiversx_sc::module]
pub trait SharedMathModule {
    /// Half-up multiplication at base `10^precision`.
    ///
    /// # Arguments
    /// - `a`, `b`: operands at any scale.
    /// - `precision`: number of decimals of the base the product is divided by.
    ///
    /// # Returns
    /// - `(a * b + base / 2) / base` at scale `a.scale() + b.scale() - precision`.
    fn mul_half_up(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled = BigUint::from(10u64).pow(precision as u32);
        let half_scaled = &scaled / 2u64;

        let product = self.checked_mul(a.into_raw_units(), b.into_raw_units());
        let rounded_product =
            self.checked_add_with(&product, &half_scaled, ERROR_MULTIPLICATION_OVERFLOW) / scaled;

        self.to_decimal(rounded_product, a.scale() + b.scale() - precision)
    }

    /// Half-up division at base `10^precision`.
    ///
    /// # Returns
    /// - `(a * base + b / 2) / b` at scale `a.scale() + precision - b.scale()`.
    fn div_half_up(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let denominator = b.into_raw_units();
        require!(denominator != &BigUint::zero(), ERROR_DIVISION_BY_ZERO);

        let scaled = BigUint::from(10u64).pow(precision as u32);
        let half_denominator = denominator / 2u64;

        let numerator = self.checked_mul(a.into_raw_units(), &scaled);
        let rounded_quotient = self.checked_add_with(
            &numerator,
            &half_denominator,
            ERROR_MULTIPLICATION_OVERFLOW,
        ) / denominator;

        self.to_decimal(rounded_quotient, a.scale() + precision - b.scale())
    }

    fn ray_mul(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.mul_half_up(a, b, RAY_PRECISION)
    }

    fn ray_div(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_half_up(a, b, RAY_PRECISION)
    }

    fn wad_mul(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.mul_half_up(a, b, WAD_PRECISION)
    }

    fn wad_div(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_half_up(a, b, WAD_PRECISION)
    }

    /// `value * percentage / 10_000`, half-up. `percentage` is in basis points.
    fn percent_mul(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        percentage: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.mul_half_up(value, percentage, BPS_PRECISION)
    }

    /// `value * 10_000 / percentage`, half-up.
    fn percent_div(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        percentage: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_half_up(value, percentage, BPS_PRECISION)
    }

    /// Lifts a value by nine decimals without touching its magnitude.
    fn wad_to_ray(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let raw = self.checked_mul(value.into_raw_units(), &BigUint::from(WAD_RAY_RATIO));
        self.to_decimal(raw, value.scale() + WAD_RAY_RATIO_PRECISION)
    }

    fn checked_mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let product = a * b;
        require!(product <= self.max_uint256(), ERROR_MULTIPLICATION_OVERFLOW);
        product
    }

    fn checked_add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.checked_add_with(a, b, ERROR_ADDITION_OVERFLOW)
    }

    fn checked_add_with(&self, a: &BigUint, b: &BigUint, error: &'static [u8]) -> BigUint {
        let sum = a + b;
        require!(sum <= self.max_uint256(), error);
        sum
    }

    fn max_uint256(&self) -> BigUint {
        BigUint::from_bytes_be(&MAX_UINT256_BYTES)
    }

    fn max_uint128(&self) -> BigUint {
        BigUint::from(u128::MAX)
    }

    fn to_decimal(
        &self,
        value: BigUint,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        ManagedDecimal::from_raw_units(value, precision)
    }

    fn to_decimal_ray(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, RAY_PRECISION)
    }

    fn to_decimal_wad(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, WAD_PRECISION)
    }

    fn to_decimal_bps(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, BPS_PRECISION)
    }

    fn ray(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_ray(BigUint::from(RAY))
    }

    fn wad(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_wad(BigUint::from(WAD))
    }

    fn bps(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_bps(BigUint::from(BPS))
    }

    fn ray_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_ray(BigUint::zero())
    }

    fn wad_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_wad(BigUint::zero())
    }

    fn bps_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_bps(BigUint::zero())
    }

    /// `a - b`, floored at zero. Both operands must share a scale.
    fn saturating_sub(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a.into_raw_units() > b.into_raw_units() {
            self.to_decimal(a.into_raw_units() - b.into_raw_units(), a.scale())
        } else {
            self.to_decimal(BigUint::zero(), a.scale())
        }
    }

    fn get_min(
        &self,
        a: ManagedDecimal<Self::Api, NumDecimals>,
        b: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a < b {
            a
        } else {
            b
        }
    }
}
