//! Market assumptions: fallback rates, property tax and insurance.
//!
//! The rate/tax/insurance lookup is an external collaborator. Whatever it
//! returns arrives here as a [`MarketObservation`] with optional fields, and
//! [`resolve_request`] fills each gap from [`MarketAssumptions`], recording a
//! warning for every value it substitutes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::assessment::AffordabilityInput;
use crate::error::AffordabilityError;
use crate::types::{BorrowerProfile, LoanParameters, LoanType, Money, Percent, RateQuote};
use crate::AffordResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-state overrides of the national defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionalAssumptions {
    #[serde(default)]
    pub rates: RateQuote,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax_rate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_insurance: Option<Money>,
}

/// Fallback values injected into the orchestration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    pub fallback_rates: RateQuote,
    /// National property tax rate, percent of home value per year.
    pub property_tax_rate: Percent,
    /// National homeowner's insurance premium per year.
    pub annual_insurance: Money,
    /// Keyed by two-letter state code.
    #[serde(default)]
    pub regions: BTreeMap<String, RegionalAssumptions>,
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        MarketAssumptions {
            fallback_rates: RateQuote::new(dec!(7.0), dec!(6.5)),
            property_tax_rate: dec!(1.1),
            annual_insurance: dec!(1200),
            regions: BTreeMap::new(),
        }
    }
}

impl MarketAssumptions {
    pub fn from_json_str(s: &str) -> AffordResult<Self> {
        let assumptions: MarketAssumptions = serde_json::from_str(s)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    pub fn validate(&self) -> AffordResult<()> {
        check_quote("fallback_rates", &self.fallback_rates)?;
        check_non_negative("property_tax_rate", Some(self.property_tax_rate))?;
        check_non_negative("annual_insurance", Some(self.annual_insurance))?;

        for (code, region) in &self.regions {
            if normalize_region(code).ok().as_deref() != Some(code.as_str()) {
                return Err(AffordabilityError::Configuration(format!(
                    "Region key '{code}' must be an upper-case two-letter code"
                )));
            }
            check_quote(&format!("regions.{code}.rates"), &region.rates)?;
            check_non_negative(&format!("regions.{code}.property_tax_rate"), region.property_tax_rate)?;
            check_non_negative(&format!("regions.{code}.annual_insurance"), region.annual_insurance)?;
        }
        Ok(())
    }

    fn fallback_rate(&self, region: Option<&str>, loan_type: LoanType) -> Option<(Percent, String)> {
        region
            .and_then(|code| {
                self.regions
                    .get(code)
                    .and_then(|r| r.rates.for_loan_type(loan_type))
                    .map(|rate| (rate, format!("{code} default")))
            })
            .or_else(|| {
                self.fallback_rates
                    .for_loan_type(loan_type)
                    .map(|rate| (rate, "national default".to_string()))
            })
    }

    fn fallback_tax_rate(&self, region: Option<&str>) -> (Percent, String) {
        region
            .and_then(|code| {
                self.regions
                    .get(code)
                    .and_then(|r| r.property_tax_rate)
                    .map(|rate| (rate, format!("{code} default")))
            })
            .unwrap_or((self.property_tax_rate, "national default".to_string()))
    }

    fn fallback_insurance(&self, region: Option<&str>) -> (Money, String) {
        region
            .and_then(|code| {
                self.regions
                    .get(code)
                    .and_then(|r| r.annual_insurance)
                    .map(|amount| (amount, format!("{code} default")))
            })
            .unwrap_or((self.annual_insurance, "national default".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Whatever the external market lookup produced. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    #[serde(default)]
    pub rates: RateQuote,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax_rate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_insurance: Option<Money>,
}

fn default_term_years() -> u32 {
    30
}

/// Buyer-facing request before market gaps are filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityRequest {
    /// Two-letter state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub borrower: BorrowerProfile,
    pub loan_type: LoanType,
    pub ltv: Percent,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
    #[serde(default)]
    pub market: MarketObservation,
}

#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub input: AffordabilityInput,
    /// One entry per substituted fallback value.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Trim and upper-case a state code, rejecting anything but two ASCII letters.
pub fn normalize_region(code: &str) -> AffordResult<String> {
    let trimmed = code.trim();
    if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AffordabilityError::InvalidInput {
            field: "region".into(),
            reason: format!("'{code}' is not a two-letter state code"),
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Fill every market gap in `request` from `assumptions`.
///
/// Precedence: observed value, then the region's override, then the national
/// default. Rates for both loan types are resolved so that loan-type
/// scenarios have a base rate; a rate with no fallback stays absent and the
/// pipeline reports it as missing.
pub fn resolve_request(
    request: &AffordabilityRequest,
    assumptions: &MarketAssumptions,
) -> AffordResult<ResolvedRequest> {
    let region = request.region.as_deref().map(normalize_region).transpose()?;
    let region = region.as_deref();
    let mut warnings = Vec::new();

    let mut rates = request.market.rates.clone();
    for loan_type in [LoanType::Conventional, LoanType::Fha] {
        if rates.for_loan_type(loan_type).is_some() {
            continue;
        }
        match assumptions.fallback_rate(region, loan_type) {
            Some((rate, source)) => {
                warnings.push(format!(
                    "Market {loan_type} rate unavailable; using {source} of {rate}%"
                ));
                set_rate(&mut rates, loan_type, rate);
            }
            None => warnings.push(format!(
                "Market {loan_type} rate unavailable and no fallback is configured"
            )),
        }
    }

    let property_tax_rate = match request.market.property_tax_rate {
        Some(rate) => rate,
        None => {
            let (rate, source) = assumptions.fallback_tax_rate(region);
            warnings.push(format!(
                "Property tax rate unavailable; using {source} of {rate}%"
            ));
            rate
        }
    };

    let annual_insurance = match request.market.annual_insurance {
        Some(amount) => amount,
        None => {
            let (amount, source) = assumptions.fallback_insurance(region);
            warnings.push(format!(
                "Insurance estimate unavailable; using {source} of {amount} per year"
            ));
            amount
        }
    };

    let input = AffordabilityInput {
        borrower: request.borrower.clone(),
        loan: LoanParameters {
            loan_type: request.loan_type,
            ltv: request.ltv,
            term_years: request.term_years,
            property_tax_rate,
            annual_insurance,
        },
        rates,
    };

    Ok(ResolvedRequest { input, warnings })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn set_rate(quote: &mut RateQuote, loan_type: LoanType, rate: Percent) {
    match loan_type {
        LoanType::Conventional => quote.conventional = Some(rate),
        LoanType::Fha => quote.fha = Some(rate),
    }
}

fn check_quote(field: &str, quote: &RateQuote) -> AffordResult<()> {
    check_non_negative(&format!("{field}.conventional"), quote.conventional)?;
    check_non_negative(&format!("{field}.fha"), quote.fha)
}

fn check_non_negative(field: &str, value: Option<Decimal>) -> AffordResult<()> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(AffordabilityError::Configuration(format!(
            "{field} cannot be negative (got {v})"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
