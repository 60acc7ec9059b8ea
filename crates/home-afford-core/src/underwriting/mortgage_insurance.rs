//! FHA mortgage insurance premium schedule and conventional PMI estimate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::bands::{lookup, Band, Edge};
use super::domain::{validate_ltv, validate_non_negative, validate_term};
use crate::error::AffordabilityError;
use crate::types::{LoanType, Money, Percent};
use crate::AffordResult;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

pub const FHA_UPFRONT_MIP: Percent = dec!(1.75);

const FHA_ANNUAL_MIP_SHORT_TERM: [Band<Percent>; 2] = [
    Band { edge: Edge::AtLeast(dec!(0)), value: dec!(0.45) },
    Band { edge: Edge::Above(dec!(90)), value: dec!(0.70) },
];

const FHA_ANNUAL_MIP_LONG_TERM: [Band<Percent>; 2] = [
    Band { edge: Edge::AtLeast(dec!(0)), value: dec!(0.50) },
    Band { edge: Edge::Above(dec!(90)), value: dec!(0.55) },
];

/// Term in years selects the LTV schedule: up to 15 years, then longer.
pub const FHA_ANNUAL_MIP: [Band<&[Band<Percent>]>; 2] = [
    Band { edge: Edge::AtLeast(dec!(0)), value: &FHA_ANNUAL_MIP_SHORT_TERM },
    Band { edge: Edge::Above(dec!(15)), value: &FHA_ANNUAL_MIP_LONG_TERM },
];

/// Conventional PMI applies only above 80% LTV.
pub const CONVENTIONAL_PMI: [Band<Percent>; 5] = [
    Band { edge: Edge::AtLeast(dec!(0)), value: dec!(0) },
    Band { edge: Edge::Above(dec!(80)), value: dec!(0.3) },
    Band { edge: Edge::Above(dec!(85)), value: dec!(0.5) },
    Band { edge: Edge::Above(dec!(90)), value: dec!(0.8) },
    Band { edge: Edge::Above(dec!(95)), value: dec!(1.1) },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MipRates {
    /// One-time premium as a percentage of the loan amount.
    pub upfront_percent: Percent,
    /// Ongoing annual premium as a percentage of the loan amount.
    pub annual_percent: Percent,
}

/// FHA premium rates. `loan_amount` is accepted for parity with real
/// schedules that tier by loan size; the current bands do not use it.
pub fn fha_mip_rates(loan_amount: Money, ltv: Percent, term_years: u32) -> AffordResult<MipRates> {
    validate_non_negative("loan_amount", loan_amount)?;
    validate_ltv(ltv)?;
    validate_term(term_years)?;

    let schedule = lookup(&FHA_ANNUAL_MIP, Decimal::from(term_years)).ok_or_else(|| {
        AffordabilityError::OutOfDomain {
            field: "term_years".into(),
            reason: format!("No MIP schedule covers a {term_years}-year term"),
        }
    })?;
    let annual_percent = lookup(schedule, ltv).ok_or_else(|| AffordabilityError::OutOfDomain {
        field: "ltv".into(),
        reason: format!("No MIP band covers {ltv}%"),
    })?;

    Ok(MipRates {
        upfront_percent: FHA_UPFRONT_MIP,
        annual_percent,
    })
}

/// Estimated annual PMI percentage for a conventional loan.
pub fn conventional_pmi_rate(ltv: Percent) -> AffordResult<Percent> {
    validate_ltv(ltv)?;
    lookup(&CONVENTIONAL_PMI, ltv).ok_or_else(|| AffordabilityError::OutOfDomain {
        field: "ltv".into(),
        reason: format!("No PMI band covers {ltv}%"),
    })
}

/// Mortgage insurance for either program. Conventional loans have no upfront
/// premium.
pub fn mortgage_insurance_rates(
    loan_type: LoanType,
    loan_amount: Money,
    ltv: Percent,
    term_years: u32,
) -> AffordResult<MipRates> {
    match loan_type {
        LoanType::Fha => fha_mip_rates(loan_amount, ltv, term_years),
        LoanType::Conventional => Ok(MipRates {
            upfront_percent: Decimal::ZERO,
            annual_percent: conventional_pmi_rate(ltv)?,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::bands::is_well_ordered;

    #[test]
    fn test_fha_long_term() {
        let rates = fha_mip_rates(dec!(300_000), dec!(85), 30).unwrap();
        assert_eq!(rates.upfront_percent, dec!(1.75));
        assert_eq!(rates.annual_percent, dec!(0.50));

        let high_ltv = fha_mip_rates(dec!(300_000), dec!(96.5), 30).unwrap();
        assert_eq!(high_ltv.annual_percent, dec!(0.55));
    }

    #[test]
    fn test_fha_short_term() {
        let rates = fha_mip_rates(dec!(300_000), dec!(93), 10).unwrap();
        assert_eq!(rates.upfront_percent, dec!(1.75));
        assert_eq!(rates.annual_percent, dec!(0.70));

        assert_eq!(
            fha_mip_rates(dec!(300_000), dec!(90), 15).unwrap().annual_percent,
            dec!(0.45)
        );
    }

    #[test]
    fn test_fha_band_edges() {
        // LTV 90 and term 15 both sit in the lower band.
        assert_eq!(fha_mip_rates(dec!(1), dec!(90), 16).unwrap().annual_percent, dec!(0.50));
        assert_eq!(fha_mip_rates(dec!(1), dec!(90.01), 15).unwrap().annual_percent, dec!(0.70));
    }

    #[test]
    fn test_fha_loan_amount_does_not_change_rates() {
        let small = fha_mip_rates(dec!(50_000), dec!(96.5), 30).unwrap();
        let large = fha_mip_rates(dec!(900_000), dec!(96.5), 30).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn test_fha_rejects_bad_term() {
        assert!(matches!(
            fha_mip_rates(dec!(300_000), dec!(90), 0),
            Err(AffordabilityError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_conventional_pmi_bands() {
        assert_eq!(conventional_pmi_rate(dec!(80)).unwrap(), dec!(0));
        assert_eq!(conventional_pmi_rate(dec!(60)).unwrap(), dec!(0));
        assert_eq!(conventional_pmi_rate(dec!(82)).unwrap(), dec!(0.3));
        assert_eq!(conventional_pmi_rate(dec!(85)).unwrap(), dec!(0.3));
        assert_eq!(conventional_pmi_rate(dec!(88)).unwrap(), dec!(0.5));
        assert_eq!(conventional_pmi_rate(dec!(92)).unwrap(), dec!(0.8));
        assert_eq!(conventional_pmi_rate(dec!(95)).unwrap(), dec!(0.8));
        assert_eq!(conventional_pmi_rate(dec!(97)).unwrap(), dec!(1.1));
    }

    #[test]
    fn test_conventional_has_no_upfront() {
        let rates = mortgage_insurance_rates(LoanType::Conventional, dec!(1), dec!(95), 30).unwrap();
        assert_eq!(rates.upfront_percent, Decimal::ZERO);
        assert_eq!(rates.annual_percent, dec!(0.8));
    }

    #[test]
    fn test_tables_are_well_ordered() {
        assert!(is_well_ordered(&FHA_ANNUAL_MIP));
        assert!(is_well_ordered(&FHA_ANNUAL_MIP_SHORT_TERM));
        assert!(is_well_ordered(&FHA_ANNUAL_MIP_LONG_TERM));
        assert!(is_well_ordered(&CONVENTIONAL_PMI));
    }
}
