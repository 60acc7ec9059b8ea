//! Fixed-rate amortization and its inverse, the maximum purchase price a
//! monthly housing budget supports.
//!
//! All math in `rust_decimal::Decimal`. Rates are annual percentages; the
//! monthly rate is `annual / 100 / 12`.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AffordabilityError;
use crate::types::{Money, Percent};
use crate::underwriting::domain::{validate_dti, validate_non_negative, validate_term};
use crate::AffordResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

fn default_term_years() -> u32 {
    30
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub loan_amount: Money,
    /// Annual note rate, e.g. 6.5 for 6.5%.
    pub annual_rate: Percent,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    /// Annual mortgage insurance as a percentage of the loan amount.
    #[serde(default)]
    pub annual_pmi_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub mortgage_insurance: Money,
    /// Sum of the components, rounded to whole currency units.
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePriceInput {
    pub annual_income: Money,
    pub monthly_debts: Money,
    pub max_dti: Percent,
    pub annual_rate: Percent,
    /// Annual property tax as a percentage of the price.
    pub property_tax_rate: Percent,
    pub annual_insurance: Money,
    pub down_payment_percent: Percent,
    #[serde(default)]
    pub pmi_rate: Percent,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly payment components for a fixed-rate loan.
pub fn payment_breakdown(input: &PaymentInput) -> AffordResult<PaymentBreakdown> {
    validate_non_negative("loan_amount", input.loan_amount)?;
    validate_non_negative("annual_rate", input.annual_rate)?;
    validate_non_negative("annual_property_tax", input.annual_property_tax)?;
    validate_non_negative("annual_insurance", input.annual_insurance)?;
    validate_non_negative("annual_pmi_rate", input.annual_pmi_rate)?;
    validate_term(input.term_years)?;

    let factor = loan_payment_factor(input.annual_rate, input.term_years)?;
    let principal_and_interest = mul_or_overflow("loan_amount", input.loan_amount, factor)?;
    let property_tax = input.annual_property_tax / MONTHS_PER_YEAR;
    let insurance = input.annual_insurance / MONTHS_PER_YEAR;
    let mortgage_insurance = mul_or_overflow(
        "annual_pmi_rate",
        input.loan_amount / MONTHS_PER_YEAR,
        input.annual_pmi_rate / Decimal::ONE_HUNDRED,
    )?;

    let total = [property_tax, insurance, mortgage_insurance]
        .into_iter()
        .try_fold(principal_and_interest, |acc, part| acc.checked_add(part))
        .map(round_currency)
        .ok_or_else(|| overflow("total", "Monthly payment exceeds representable range"))?;

    Ok(PaymentBreakdown {
        principal_and_interest,
        property_tax,
        insurance,
        mortgage_insurance,
        total,
    })
}

/// Total monthly payment rounded to whole currency units.
pub fn monthly_payment(input: &PaymentInput) -> AffordResult<Money> {
    payment_breakdown(input).map(|b| b.total)
}

/// Monthly amount available for housing: gross monthly income times the DTI
/// limit, less existing monthly debts. May be negative.
pub fn monthly_housing_budget(
    annual_income: Money,
    monthly_debts: Money,
    max_dti: Percent,
) -> AffordResult<Money> {
    validate_dti(max_dti)?;
    mul_or_overflow(
        "annual_income",
        annual_income / MONTHS_PER_YEAR,
        max_dti / Decimal::ONE_HUNDRED,
    )?
    .checked_sub(monthly_debts)
    .ok_or_else(|| overflow("monthly_debts", "Monthly housing budget exceeds representable range"))
}

/// Largest home price whose full monthly housing cost fits the DTI budget,
/// floored to whole currency units.
///
/// Solves `budget = insurance/12 + price * (ltv * pi_factor + tax/12 + pmi * ltv/12)`
/// for `price`, the inverse of [`monthly_payment`].
pub fn max_purchase_price(input: &PurchasePriceInput) -> AffordResult<Money> {
    validate_price_input(input)?;

    let budget = monthly_housing_budget(input.annual_income, input.monthly_debts, input.max_dti)?;
    let available = budget
        .checked_sub(input.annual_insurance / MONTHS_PER_YEAR)
        .ok_or_else(|| overflow("annual_insurance", "Available budget exceeds representable range"))?;
    if available <= Decimal::ZERO {
        return Err(AffordabilityError::Unaffordable(format!(
            "Monthly housing budget of {} does not cover insurance of {} per month",
            budget.round_dp(2),
            (input.annual_insurance / MONTHS_PER_YEAR).round_dp(2),
        )));
    }

    let ltv_fraction = Decimal::ONE - input.down_payment_percent / Decimal::ONE_HUNDRED;
    let pi_per_price = mul_or_overflow(
        "annual_rate",
        loan_payment_factor(input.annual_rate, input.term_years)?,
        ltv_fraction,
    )?;
    let tax_per_price = input.property_tax_rate / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR;
    let pmi_per_price = input.pmi_rate / Decimal::ONE_HUNDRED * ltv_fraction / MONTHS_PER_YEAR;

    let multiplier = pi_per_price
        .checked_add(tax_per_price)
        .and_then(|m| m.checked_add(pmi_per_price))
        .ok_or_else(|| overflow("annual_rate", "Monthly cost per dollar of price exceeds representable range"))?;
    if multiplier <= Decimal::ZERO {
        return Err(AffordabilityError::Unaffordable(
            "Price is unbounded: no monthly cost accrues per dollar of price".into(),
        ));
    }

    let price = available
        .checked_div(multiplier)
        .ok_or_else(|| {
            overflow(
                "annual_income",
                "Maximum purchase price exceeds representable range",
            )
        })?
        .floor();
    if price <= Decimal::ZERO {
        return Err(AffordabilityError::Unaffordable(format!(
            "Budget of {} per month supports no purchase",
            available.round_dp(2)
        )));
    }

    Ok(price)
}

/// Monthly principal-and-interest per dollar of loan. Straight-line when the
/// rate is zero.
pub fn loan_payment_factor(annual_rate: Percent, term_years: u32) -> AffordResult<Decimal> {
    let n = i64::from(term_years) * 12;
    let monthly_rate = annual_rate / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR;

    if monthly_rate.is_zero() {
        return Ok(Decimal::ONE / Decimal::from(n));
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(n)
        .ok_or_else(|| AffordabilityError::OutOfDomain {
            field: "annual_rate".into(),
            reason: format!("Compounding {annual_rate}% over {n} months overflows"),
        })?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Ok(Decimal::ONE / Decimal::from(n));
    }
    monthly_rate
        .checked_mul(growth)
        .and_then(|scaled| scaled.checked_div(denominator))
        .ok_or_else(|| overflow("annual_rate", "Payment factor exceeds representable range"))
}

/// `percent`% of `amount`, e.g. the loan amount at a given LTV or a premium
/// on a loan.
pub fn percent_of(amount: Money, percent: Percent) -> AffordResult<Money> {
    mul_or_overflow("percent", amount, percent / Decimal::ONE_HUNDRED)
}

/// Round half away from zero to whole currency units.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round half away from zero to cents.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn overflow(field: &str, reason: &str) -> AffordabilityError {
    AffordabilityError::OutOfDomain {
        field: field.into(),
        reason: reason.into(),
    }
}

fn mul_or_overflow(field: &str, a: Decimal, b: Decimal) -> AffordResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| overflow(field, "Product exceeds representable range"))
}

fn validate_price_input(input: &PurchasePriceInput) -> AffordResult<()> {
    validate_non_negative("annual_income", input.annual_income)?;
    validate_non_negative("monthly_debts", input.monthly_debts)?;
    validate_dti(input.max_dti)?;
    validate_non_negative("annual_rate", input.annual_rate)?;
    validate_non_negative("property_tax_rate", input.property_tax_rate)?;
    validate_non_negative("annual_insurance", input.annual_insurance)?;
    validate_non_negative("pmi_rate", input.pmi_rate)?;
    validate_term(input.term_years)?;

    if input.down_payment_percent < Decimal::ZERO || input.down_payment_percent > Decimal::ONE_HUNDRED {
        return Err(AffordabilityError::OutOfDomain {
            field: "down_payment_percent".into(),
            reason: format!(
                "Down payment of {}% must be between 0 and 100",
                input.down_payment_percent
            ),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
