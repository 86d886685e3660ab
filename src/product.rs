use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::interest::interest_for_period;
use crate::types::{CreditKind, NewProduct, PaymentBreakdown, ProductId, ProductStatus};

/// one revolving or installment debt instrument
///
/// the full collection is owned by the product manager and mirrored to
/// durable storage after every mutation; all changes funnel through the
/// manager's operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditProduct {
    pub id: ProductId,
    pub name: String,

    // core balances
    /// original amount financed, never mutated after creation
    pub principal: Money,
    pub remaining_balance: Money,
    pub accrued_interest: Money,
    /// cached as `max(0, principal - remaining_balance)`, recomputed after
    /// every balance change
    pub total_paid: Money,

    // rates
    /// annual percentage rate, e.g. 18.5 for 18.5%
    pub apr: Rate,
    /// always `apr / 100 / 365`; kept consistent by `set_apr`
    pub daily_interest_rate: Rate,

    pub kind: CreditKind,
    pub status: ProductStatus,

    // dates
    pub start_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// accrual watermark: interest has been folded in up to this instant
    pub last_interest_accrual: DateTime<Utc>,

    pub note: Option<String>,
}

impl CreditProduct {
    /// create a new active product from a creation request
    pub fn new(request: NewProduct, now: DateTime<Utc>) -> Self {
        let NewProduct {
            name,
            principal,
            apr,
            kind,
            start_date,
            note,
        } = request;

        Self {
            id: Uuid::new_v4(),
            name,
            principal,
            remaining_balance: principal,
            accrued_interest: Money::ZERO,
            total_paid: Money::ZERO,
            apr,
            daily_interest_rate: apr.daily_rate(),
            kind,
            status: ProductStatus::Active,
            start_date: start_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
            last_interest_accrual: now,
            note,
        }
    }

    /// total owed right now
    pub fn total_outstanding(&self) -> Money {
        self.remaining_balance + self.accrued_interest
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn is_paid_off(&self) -> bool {
        self.status == ProductStatus::PaidOff
    }

    /// change the rate, keeping the derived daily rate consistent
    pub fn set_apr(&mut self, apr: Rate) {
        self.apr = apr;
        self.daily_interest_rate = apr.daily_rate();
    }

    fn should_accrue(&self) -> bool {
        self.status != ProductStatus::PaidOff
            && !self.remaining_balance.is_zero()
            && !self.apr.is_zero()
    }

    /// fold interest accrued since the watermark into `accrued_interest`,
    /// advancing the watermark; returns the amount folded in
    ///
    /// paid-off products, zero balances and zero rates are skipped with the
    /// watermark untouched. the watermark also stays put when no whole day
    /// has elapsed, so back-to-back calls at the same instant are no-ops
    pub fn accrue_to(&mut self, now: DateTime<Utc>) -> Money {
        if !self.should_accrue() {
            return Money::ZERO;
        }

        let interest = interest_for_period(
            self.remaining_balance,
            self.daily_interest_rate,
            self.last_interest_accrual,
            now,
        );

        if interest.is_zero() {
            return Money::ZERO;
        }

        self.accrued_interest += interest;
        // nonzero interest means at least one whole day elapsed, so this
        // only ever moves the watermark forward
        self.last_interest_accrual = now;

        interest
    }

    /// apply a waterfall allocation to the balances
    pub(crate) fn apply_breakdown(&mut self, breakdown: &PaymentBreakdown) {
        self.accrued_interest -= breakdown.to_interest;
        self.remaining_balance -= breakdown.to_principal;
        self.recompute_total_paid();
    }

    /// increase the balance by a charge amount
    pub(crate) fn apply_charge(&mut self, amount: Money) {
        self.remaining_balance += amount;
        self.recompute_total_paid();
    }

    fn recompute_total_paid(&mut self) {
        self.total_paid = (self.principal - self.remaining_balance).max(Money::ZERO);
    }

    /// bring the status in line with the balances; returns the transition
    /// when one happened
    pub(crate) fn refresh_status(&mut self) -> Option<(ProductStatus, ProductStatus)> {
        let new_status = if self.remaining_balance.is_zero() && self.accrued_interest.is_zero() {
            ProductStatus::PaidOff
        } else {
            ProductStatus::Active
        };

        if new_status == self.status {
            return None;
        }

        let old_status = self.status;
        self.status = new_status;
        Some((old_status, new_status))
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
