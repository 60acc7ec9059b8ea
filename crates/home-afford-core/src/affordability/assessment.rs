//! The affordability pipeline: adjusted rate, DTI limit, mortgage insurance,
//! maximum price, loan amount and monthly payment for one set of inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::market::{resolve_request, AffordabilityRequest, MarketAssumptions};
use super::scenarios::{generate_scenarios, Scenario};
use crate::amortization::{
    max_purchase_price, monthly_housing_budget, monthly_payment, percent_of, round_cents,
    PaymentInput, PurchasePriceInput,
};
use crate::types::*;
use crate::underwriting::domain::{
    validate_fico, validate_non_negative, validate_purchase_ltv, validate_term,
};
use crate::underwriting::dti::max_dti;
use crate::underwriting::mortgage_insurance::{mortgage_insurance_rates, MipRates};
use crate::underwriting::rate_adjustment::rate_breakdown;
use crate::AffordResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Fully specified pipeline input. Market gaps must already be resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub borrower: BorrowerProfile,
    pub loan: LoanParameters,
    pub rates: RateQuote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub loan_type: LoanType,
    pub fico_score: FicoScore,
    pub ltv: Percent,
    pub term_years: u32,
    pub adjusted_rate: Percent,
    /// True when the rate floor lifted the summed rate.
    #[serde(default)]
    pub rate_floor_applied: bool,
    /// DTI limit applied.
    pub max_dti: Percent,
    /// Monthly housing budget implied by the DTI limit.
    pub monthly_budget: Money,
    pub max_home_price: Money,
    pub loan_amount: Money,
    pub down_payment: Money,
    /// Principal, interest, tax, insurance and mortgage insurance, rounded.
    pub monthly_payment: Money,
    /// Annual mortgage insurance as a percentage of the loan.
    pub mortgage_insurance_rate: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_mortgage_insurance: Option<Money>,
    /// FHA upfront premium; reported, not financed into the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upfront_mortgage_insurance: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityReport {
    pub baseline: AffordabilityResult,
    pub scenarios: Vec<Scenario>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the pipeline once for `input`.
pub fn evaluate(input: &AffordabilityInput) -> AffordResult<AffordabilityResult> {
    validate_input(input)?;

    let borrower = &input.borrower;
    let loan = &input.loan;

    let rate = rate_breakdown(&input.rates, borrower.fico_score, loan.ltv, loan.loan_type)?;
    let dti = max_dti(
        borrower.fico_score,
        loan.ltv,
        loan.loan_type,
        &borrower.mitigating_factors,
    );

    let mut insurance = mortgage_insurance_rates(loan.loan_type, Decimal::ZERO, loan.ltv, loan.term_years)?;
    let mut price = solve_price(input, rate.adjusted_rate, dti, &insurance)?;

    // Re-check at the solved amount. Loan-size tiers plug in through the
    // `loan_amount` argument of `fha_mip_rates`; the current FHA schedule has
    // none, so this branch only fires once such a tier exists.
    let repriced = mortgage_insurance_rates(
        loan.loan_type,
        percent_of(price, loan.ltv)?,
        loan.ltv,
        loan.term_years,
    )?;
    if repriced != insurance {
        insurance = repriced;
        price = solve_price(input, rate.adjusted_rate, dti, &insurance)?;
    }

    let loan_amount = percent_of(price, loan.ltv)?;
    let payment = monthly_payment(&PaymentInput {
        loan_amount,
        annual_rate: rate.adjusted_rate,
        term_years: loan.term_years,
        annual_property_tax: percent_of(price, loan.property_tax_rate)?,
        annual_insurance: loan.annual_insurance,
        annual_pmi_rate: insurance.annual_percent,
    })?;

    let monthly_mortgage_insurance = if insurance.annual_percent > Decimal::ZERO {
        Some(round_cents(percent_of(loan_amount, insurance.annual_percent)? / Decimal::from(12)))
    } else {
        None
    };
    let upfront_mortgage_insurance = if insurance.upfront_percent > Decimal::ZERO {
        Some(round_cents(percent_of(loan_amount, insurance.upfront_percent)?))
    } else {
        None
    };

    Ok(AffordabilityResult {
        loan_type: loan.loan_type,
        fico_score: borrower.fico_score,
        ltv: loan.ltv,
        term_years: loan.term_years,
        adjusted_rate: rate.adjusted_rate,
        rate_floor_applied: rate.floor_applied,
        max_dti: dti,
        monthly_budget: monthly_housing_budget(borrower.annual_income, borrower.monthly_debts, dti)?,
        max_home_price: price,
        loan_amount,
        down_payment: price - loan_amount,
        monthly_payment: payment,
        mortgage_insurance_rate: insurance.annual_percent,
        monthly_mortgage_insurance,
        upfront_mortgage_insurance,
    })
}

/// Baseline plus what-if scenarios, wrapped in the standard envelope.
pub fn assess_affordability(
    input: &AffordabilityInput,
) -> AffordResult<ComputationOutput<AffordabilityReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let baseline = evaluate(input)?;
    if baseline.rate_floor_applied {
        warnings.push(format!(
            "Adjusted rate was raised to the {}% floor",
            baseline.adjusted_rate
        ));
    }
    let (scenarios, scenario_warnings) = generate_scenarios(input, &baseline);
    warnings.extend(scenario_warnings);

    let output = AffordabilityReport {
        baseline,
        scenarios,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage Affordability (DTI-constrained price solve with what-if scenarios)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Resolve market gaps from `assumptions`, then assess. Fallback notices come
/// first in the warnings.
pub fn assess_request(
    request: &AffordabilityRequest,
    assumptions: &MarketAssumptions,
) -> AffordResult<ComputationOutput<AffordabilityReport>> {
    let resolved = resolve_request(request, assumptions)?;
    let mut output = assess_affordability(&resolved.input)?;

    let mut warnings = resolved.warnings;
    warnings.append(&mut output.warnings);
    output.warnings = warnings;
    Ok(output)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn solve_price(
    input: &AffordabilityInput,
    rate: Percent,
    dti: Percent,
    insurance: &MipRates,
) -> AffordResult<Money> {
    max_purchase_price(&PurchasePriceInput {
        annual_income: input.borrower.annual_income,
        monthly_debts: input.borrower.monthly_debts,
        max_dti: dti,
        annual_rate: rate,
        property_tax_rate: input.loan.property_tax_rate,
        annual_insurance: input.loan.annual_insurance,
        down_payment_percent: input.loan.down_payment_percent(),
        pmi_rate: insurance.annual_percent,
        term_years: input.loan.term_years,
    })
}

fn validate_input(input: &AffordabilityInput) -> AffordResult<()> {
    validate_fico(input.borrower.fico_score)?;
    validate_non_negative("annual_income", input.borrower.annual_income)?;
    validate_non_negative("monthly_debts", input.borrower.monthly_debts)?;
    validate_purchase_ltv(input.loan.ltv)?;
    validate_term(input.loan.term_years)?;
    validate_non_negative("property_tax_rate", input.loan.property_tax_rate)?;
    validate_non_negative("annual_insurance", input.loan.annual_insurance)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
