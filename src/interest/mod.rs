pub mod accrual;

pub use accrual::{days_between, interest_for_period};
