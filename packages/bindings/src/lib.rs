use napi::Result as NapiResult;
use napi_derive::napi;

use home_finance_core::mortgage::amortization::{self, AmortizationInput};
use home_finance_core::mortgage::{self, DownPaymentType, LoanConfiguration};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment estimate
// ---------------------------------------------------------------------------

/// Bare breakdown, for recomputing on every keystroke.
#[napi]
pub fn compute_breakdown(config_json: String) -> NapiResult<String> {
    let config: LoanConfiguration = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let breakdown = mortgage::compute_breakdown(&config);
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

#[napi]
pub fn estimate_payment(config_json: String) -> NapiResult<String> {
    let config: LoanConfiguration = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let output = mortgage::estimate_payment(&config);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_configuration() -> NapiResult<String> {
    serde_json::to_string(&LoanConfiguration::default()).map_err(to_napi_error)
}

/// `target` is "percent" or "amount".
#[napi]
pub fn switch_down_payment_type(config_json: String, target: String) -> NapiResult<String> {
    let config: LoanConfiguration = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let kind: DownPaymentType =
        serde_json::from_value(serde_json::Value::String(target)).map_err(to_napi_error)?;
    serde_json::to_string(&config.with_down_payment_type(kind)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: AmortizationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
