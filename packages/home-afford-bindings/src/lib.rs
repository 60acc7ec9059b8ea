use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use home_afford_core::affordability::{self, AffordabilityInput, AffordabilityRequest, MarketAssumptions};
use home_afford_core::amortization::{self, PaymentInput, PurchasePriceInput};
use home_afford_core::underwriting::{dti, mortgage_insurance, navigation, rate_adjustment};
use home_afford_core::{FicoScore, LoanType, MitigatingFactor, RateQuote};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn default_term_years() -> u32 {
    30
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let input: AffordabilityInput = parse(&input_json)?;
    let output = affordability::assess_affordability(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `config_json` may be omitted to use the built-in national defaults.
#[napi]
pub fn resolve_and_assess(request_json: String, config_json: Option<String>) -> NapiResult<String> {
    let request: AffordabilityRequest = parse(&request_json)?;
    let assumptions = match config_json {
        Some(json) => MarketAssumptions::from_json_str(&json).map_err(to_napi_error)?,
        None => MarketAssumptions::default(),
    };
    let output = affordability::assess_request(&request, &assumptions).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentInput = parse(&input_json)?;
    let breakdown = amortization::payment_breakdown(&input).map_err(to_napi_error)?;
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

#[napi]
pub fn max_purchase_price(input_json: String) -> NapiResult<String> {
    let input: PurchasePriceInput = parse(&input_json)?;
    let price = amortization::max_purchase_price(&input).map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "max_home_price": price })).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Underwriting
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RateRequest {
    rates: RateQuote,
    fico_score: FicoScore,
    ltv: Decimal,
    loan_type: LoanType,
}

#[napi]
pub fn adjusted_rate(input_json: String) -> NapiResult<String> {
    let req: RateRequest = parse(&input_json)?;
    let breakdown = rate_adjustment::rate_breakdown(&req.rates, req.fico_score, req.ltv, req.loan_type)
        .map_err(to_napi_error)?;
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct DtiRequest {
    fico_score: FicoScore,
    ltv: Decimal,
    loan_type: LoanType,
    #[serde(default)]
    mitigating_factors: Vec<MitigatingFactor>,
}

#[napi]
pub fn max_dti(input_json: String) -> NapiResult<String> {
    let req: DtiRequest = parse(&input_json)?;
    let decision = dti::dti_decision(req.fico_score, req.ltv, req.loan_type, &req.mitigating_factors);
    serde_json::to_string(&decision).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct MipRequest {
    loan_amount: Decimal,
    ltv: Decimal,
    #[serde(default = "default_term_years")]
    term_years: u32,
}

#[napi]
pub fn fha_mip_rates(input_json: String) -> NapiResult<String> {
    let req: MipRequest = parse(&input_json)?;
    let rates = mortgage_insurance::fha_mip_rates(req.loan_amount, req.ltv, req.term_years)
        .map_err(to_napi_error)?;
    serde_json::to_string(&rates).map_err(to_napi_error)
}

/// `ltv` is passed as a decimal string, e.g. "92.5".
#[napi]
pub fn conventional_pmi_rate(ltv: String) -> NapiResult<String> {
    let ltv: Decimal = ltv.trim().parse().map_err(to_napi_error)?;
    let rate = mortgage_insurance::conventional_pmi_rate(ltv).map_err(to_napi_error)?;
    Ok(rate.to_string())
}

/// Returns the next boundary, or `None` when the score is already in the
/// best band (or below the FHA floor).
#[napi]
pub fn next_fico_band(fico_score: u32, loan_type: String) -> NapiResult<Option<u32>> {
    let loan_type: LoanType = serde_json::from_value(serde_json::Value::String(loan_type))
        .map_err(to_napi_error)?;
    Ok(navigation::next_fico_band(fico_score, loan_type))
}

#[napi]
pub fn next_ltv_band(ltv: String) -> NapiResult<Option<String>> {
    let ltv: Decimal = ltv.trim().parse().map_err(to_napi_error)?;
    Ok(navigation::next_ltv_band(ltv).map(|b| b.to_string()))
}
