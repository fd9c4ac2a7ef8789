#![no_std]

use common_constants::{BPS, FLASHLOAN_PREMIUM_TOTAL};

multiversx_sc::imports!();

#[multiversx_sc::contract]
pub trait FlashMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    // Success case, every asset is sent back with the premium on top
    #[payable("*")]
    #[endpoint(flash)]
    fn flash(&self, _initiator: ManagedAddress) {
        let payments = self.call_value().all_esdt_transfers().clone();
        let caller = self.blockchain().get_caller();

        let mut repayments = ManagedVec::<Self::Api, EsdtTokenPayment>::new();
        for payment in payments.iter() {
            let premium = payment
                .amount
                .clone()
                .mul(BigUint::from(FLASHLOAN_PREMIUM_TOTAL))
                .div(BigUint::from(BPS));
            repayments.push(EsdtTokenPayment::new(
                payment.token_identifier.clone(),
                0,
                &payment.amount + &premium,
            ));
        }

        self.tx().to(&caller).payment(&repayments).transfer();
    }

    // Sends back `extra` on top of amount and premium, the pool refunds it
    #[payable("*")]
    #[endpoint(flashOverpay)]
    fn flash_overpay(&self, extra: BigUint, _initiator: ManagedAddress) {
        let payment = self.call_value().single_esdt().clone();
        let caller = self.blockchain().get_caller();

        let premium = payment
            .amount
            .clone()
            .mul(BigUint::from(FLASHLOAN_PREMIUM_TOTAL))
            .div(BigUint::from(BPS));
        let amount = &payment.amount + &premium + &extra;

        self.tx()
            .to(&caller)
            .single_esdt(&payment.token_identifier, 0, &amount)
            .transfer();
    }

    // Repays the principal without the premium
    #[payable("*")]
    #[endpoint(flashRepaySome)]
    fn flash_repay_some(&self, _initiator: ManagedAddress) {
        let payment = self.call_value().single_esdt().clone();
        let caller = self.blockchain().get_caller();

        self.tx()
            .to(&caller)
            .single_esdt(&payment.token_identifier, 0, &payment.amount)
            .transfer();
    }

    // Keeps the funds, either a scam or a flash loan opening debt
    #[payable("*")]
    #[endpoint(flashNoRepay)]
    fn flash_no_repay(&self, _initiator: ManagedAddress) {}
}
