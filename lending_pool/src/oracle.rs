multiversx_sc::imports!();

use crate::storage;

/// Owner fed price table.
///
/// Prices are wad amounts of a common unit per whole token. A price of zero marks an
/// unpriced asset, which is valued at zero everywhere.
#[multiversx_sc::module]
pub trait OracleModule: storage::Storage + common_math::SharedMathModule {
    fn get_asset_price(&self, asset: &TokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_wad(self.asset_price(asset).get())
    }

    /// Value of `amount` of a token with `decimals` at `price`, rounded down.
    ///
    /// **Formula**:
    /// - `price * amount / 10^decimals`
    ///
    /// # Returns
    /// - Value in wad of the common unit.
    fn get_asset_value(
        &self,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        price: &ManagedDecimal<Self::Api, NumDecimals>,
        decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let unit = BigUint::from(10u64).pow(decimals as u32);
        let product = self.checked_mul(price.into_raw_units(), amount.into_raw_units());

        self.to_decimal_wad(product / unit)
    }
}
