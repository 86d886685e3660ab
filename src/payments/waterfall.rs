use chrono::{DateTime, Utc};

use crate::decimal::Money;
use crate::types::{PaymentBreakdown, ProductId, ProductStatus};

/// allocate a payment through the waterfall: accrued interest first, then
/// principal
///
/// the same allocation applies to every product kind. a payment smaller
/// than the accrued interest leaves the principal untouched; anything left
/// after the principal reaches zero is absorbed, never a negative balance
pub fn allocate(
    amount: Money,
    accrued_interest: Money,
    remaining_balance: Money,
) -> PaymentBreakdown {
    let to_interest = amount.min(accrued_interest);
    let after_interest = amount - to_interest;
    let to_principal = after_interest.min(remaining_balance);

    PaymentBreakdown {
        to_interest,
        to_principal,
        absorbed: after_interest - to_principal,
    }
}

/// outcome of a payment operation
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub product_id: ProductId,
    pub amount: Money,
    /// interest folded in since the watermark, before allocation
    pub interest_accrued: Money,
    pub breakdown: PaymentBreakdown,
    pub remaining_balance: Money,
    pub status: ProductStatus,
    pub payment_date: DateTime<Utc>,
}
