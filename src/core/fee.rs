//! Transfer fees
//!
//! Outgoing sends pay a flat percentage surcharge on top of the amount.
//! Rates are expressed in basis points to keep the math exact.

use crate::core::amount::Amount;
use serde::{Deserialize, Serialize};

/// Fee charged on outgoing sends (250 bps = 2.5%)
pub const SEND_FEE_BASIS_POINTS: u32 = 250;

/// Fee schedule applied to outgoing sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub send_basis_points: u32,
}

impl FeeSchedule {
    pub fn new(send_basis_points: u32) -> Self {
        Self { send_basis_points }
    }

    /// Fee for sending `amount`
    pub fn fee_for(&self, amount: Amount) -> Amount {
        amount.apply_basis_points(self.send_basis_points)
    }

    /// Amount plus fee, i.e. what leaves the balance. `None` on overflow.
    pub fn total_debit(&self, amount: Amount) -> Option<Amount> {
        amount.checked_add(self.fee_for(amount))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(SEND_FEE_BASIS_POINTS)
    }
}
