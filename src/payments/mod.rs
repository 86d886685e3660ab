pub mod waterfall;

pub use waterfall::{allocate, PaymentOutcome};
