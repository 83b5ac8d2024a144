pub mod config;
pub mod estimator;

#[cfg(feature = "amortization")]
pub mod amortization;

pub use config::{DownPaymentType, LoanConfiguration};
pub use estimator::{compute_breakdown, estimate_payment, PaymentBreakdown};
