use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// unique identifier for a credit product
pub type ProductId = Uuid;

/// credit product kinds
///
/// the kind carries its own descriptive payload, so a fixed-term loan can
/// never hold revolving-only state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditKind {
    /// credit-card-like, balance can grow through new charges
    Revolving {
        due_day: Option<u8>,
        minimum_payment: Option<Money>,
    },
    /// fixed-term loan, principal only ever decreases
    FixedLoan {
        term_months: u32,
        due_day: Option<u8>,
    },
    /// installment plan paid down over a fixed number of months
    Installment {
        term_months: u32,
        minimum_payment: Option<Money>,
    },
}

impl CreditKind {
    /// whether new charges may increase the balance
    pub fn accepts_charges(&self) -> bool {
        matches!(self, CreditKind::Revolving { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreditKind::Revolving { .. } => "revolving",
            CreditKind::FixedLoan { .. } => "fixed loan",
            CreditKind::Installment { .. } => "installment",
        }
    }
}

/// product status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    /// carrying a balance or accrued interest
    Active,
    /// balance and accrued interest both fully cleared
    PaidOff,
}

/// waterfall allocation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentBreakdown {
    pub to_interest: Money,
    pub to_principal: Money,
    /// overpayment beyond the full outstanding balance, swallowed rather
    /// than turned into a credit
    pub absorbed: Money,
}

impl PaymentBreakdown {
    pub fn total_applied(&self) -> Money {
        self.to_interest + self.to_principal
    }
}

/// creation request for a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub principal: Money,
    /// annual percentage rate, e.g. 18.5 for 18.5%
    pub apr: Rate,
    pub kind: CreditKind,
    /// defaults to the creation time when absent
    pub start_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// field-level patch for an existing product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub apr: Option<Rate>,
    pub kind: Option<CreditKind>,
    pub note: Option<String>,
}
