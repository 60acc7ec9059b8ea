//! Loan-level rate adjustments keyed on credit score and loan-to-value.
//!
//! The final rate is `base + fico adjustment + ltv adjustment`, floored at
//! [`MIN_ADJUSTED_RATE`]. FICO bands below a program's underwriting floor
//! carry no adjustment at all and resolve to [`AffordabilityError::Ineligible`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::bands::{lookup, Band, Edge};
use super::domain::{validate_fico, validate_ltv};
use crate::error::AffordabilityError;
use crate::types::{FicoScore, LoanType, Percent, RateQuote};
use crate::AffordResult;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Adjusted rates never fall to or below zero.
pub const MIN_ADJUSTED_RATE: Percent = dec!(0.1);

/// `None` marks scores below the program floor.
pub type FicoBand = Band<Option<Percent>>;

pub const CONVENTIONAL_FICO_ADJUSTMENTS: [FicoBand; 8] = [
    Band { edge: Edge::AtLeast(dec!(300)), value: None },
    Band { edge: Edge::AtLeast(dec!(620)), value: Some(dec!(1.0)) },
    Band { edge: Edge::AtLeast(dec!(640)), value: Some(dec!(0.75)) },
    Band { edge: Edge::AtLeast(dec!(660)), value: Some(dec!(0.5)) },
    Band { edge: Edge::AtLeast(dec!(680)), value: Some(dec!(0.375)) },
    Band { edge: Edge::AtLeast(dec!(700)), value: Some(dec!(0.25)) },
    Band { edge: Edge::AtLeast(dec!(720)), value: Some(dec!(0.125)) },
    Band { edge: Edge::AtLeast(dec!(740)), value: Some(dec!(0)) },
];

pub const FHA_FICO_ADJUSTMENTS: [FicoBand; 10] = [
    Band { edge: Edge::AtLeast(dec!(300)), value: None },
    Band { edge: Edge::AtLeast(dec!(500)), value: Some(dec!(1.25)) },
    Band { edge: Edge::AtLeast(dec!(580)), value: Some(dec!(0.75)) },
    Band { edge: Edge::AtLeast(dec!(620)), value: Some(dec!(0.5)) },
    Band { edge: Edge::AtLeast(dec!(640)), value: Some(dec!(0.375)) },
    Band { edge: Edge::AtLeast(dec!(660)), value: Some(dec!(0.25)) },
    Band { edge: Edge::AtLeast(dec!(680)), value: Some(dec!(0.25)) },
    Band { edge: Edge::AtLeast(dec!(700)), value: Some(dec!(0.125)) },
    Band { edge: Edge::AtLeast(dec!(720)), value: Some(dec!(0.125)) },
    Band { edge: Edge::AtLeast(dec!(740)), value: Some(dec!(0)) },
];

/// Independent of loan type. The top band is open-ended.
pub const LTV_ADJUSTMENTS: [Band<Percent>; 9] = [
    Band { edge: Edge::AtLeast(dec!(0)), value: dec!(-0.25) },
    Band { edge: Edge::AtLeast(dec!(60)), value: dec!(-0.125) },
    Band { edge: Edge::AtLeast(dec!(70)), value: dec!(0) },
    Band { edge: Edge::AtLeast(dec!(75)), value: dec!(0) },
    Band { edge: Edge::AtLeast(dec!(80)), value: dec!(0.125) },
    Band { edge: Edge::AtLeast(dec!(85)), value: dec!(0.25) },
    Band { edge: Edge::AtLeast(dec!(90)), value: dec!(0.375) },
    Band { edge: Edge::AtLeast(dec!(95)), value: dec!(0.5) },
    Band { edge: Edge::Above(dec!(97)), value: dec!(0.75) },
];

pub fn fico_adjustment_table(loan_type: LoanType) -> &'static [FicoBand] {
    match loan_type {
        LoanType::Conventional => &CONVENTIONAL_FICO_ADJUSTMENTS,
        LoanType::Fha => &FHA_FICO_ADJUSTMENTS,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Components of an adjusted rate, for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub loan_type: LoanType,
    pub base_rate: Percent,
    pub fico_adjustment: Percent,
    pub ltv_adjustment: Percent,
    pub adjusted_rate: Percent,
    /// True when the floor lifted the summed rate.
    pub floor_applied: bool,
}

/// Rate delta in percentage points for a credit score under `loan_type`.
pub fn fico_rate_adjustment(fico: FicoScore, loan_type: LoanType) -> AffordResult<Percent> {
    validate_fico(fico)?;

    let band = lookup(fico_adjustment_table(loan_type), Decimal::from(fico));
    match band {
        Some(Some(delta)) => Ok(delta),
        _ => Err(AffordabilityError::Ineligible {
            loan_type,
            fico,
            floor: loan_type.fico_floor(),
        }),
    }
}

/// Rate delta in percentage points for a loan-to-value ratio.
pub fn ltv_rate_adjustment(ltv: Percent) -> AffordResult<Percent> {
    validate_ltv(ltv)?;
    lookup(&LTV_ADJUSTMENTS, ltv).ok_or_else(|| AffordabilityError::OutOfDomain {
        field: "ltv".into(),
        reason: format!("No LTV band covers {ltv}%"),
    })
}

/// Full rate build-up from a market quote.
pub fn rate_breakdown(
    quote: &RateQuote,
    fico: FicoScore,
    ltv: Percent,
    loan_type: LoanType,
) -> AffordResult<RateBreakdown> {
    let base_rate = quote
        .for_loan_type(loan_type)
        .ok_or_else(|| AffordabilityError::MissingInput {
            field: format!("rates.{}", rate_field(loan_type)),
            reason: format!("No {loan_type} base rate was supplied; provide a fallback quote"),
        })?;
    if base_rate < Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: format!("rates.{}", rate_field(loan_type)),
            reason: format!("Base rate {base_rate}% cannot be negative"),
        });
    }

    let fico_adjustment = fico_rate_adjustment(fico, loan_type)?;
    let ltv_adjustment = ltv_rate_adjustment(ltv)?;

    let raw = base_rate + fico_adjustment + ltv_adjustment;
    let adjusted_rate = raw.max(MIN_ADJUSTED_RATE);

    Ok(RateBreakdown {
        loan_type,
        base_rate,
        fico_adjustment,
        ltv_adjustment,
        adjusted_rate,
        floor_applied: raw < MIN_ADJUSTED_RATE,
    })
}

/// Base rate for `loan_type` plus FICO and LTV adjustments, floored at 0.1%.
pub fn adjusted_rate(
    quote: &RateQuote,
    fico: FicoScore,
    ltv: Percent,
    loan_type: LoanType,
) -> AffordResult<Percent> {
    rate_breakdown(quote, fico, ltv, loan_type).map(|b| b.adjusted_rate)
}

fn rate_field(loan_type: LoanType) -> &'static str {
    match loan_type {
        LoanType::Conventional => "conventional",
        LoanType::Fha => "fha",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::bands::is_well_ordered;

    fn quote() -> RateQuote {
        RateQuote::new(dec!(6.5), dec!(6.0))
    }

    #[test]
    fn test_tables_are_well_ordered() {
        assert!(is_well_ordered(&CONVENTIONAL_FICO_ADJUSTMENTS));
        assert!(is_well_ordered(&FHA_FICO_ADJUSTMENTS));
        assert!(is_well_ordered(&LTV_ADJUSTMENTS));
    }

    #[test]
    fn test_conventional_fico_bands() {
        let conv = LoanType::Conventional;
        assert_eq!(fico_rate_adjustment(850, conv).unwrap(), dec!(0));
        assert_eq!(fico_rate_adjustment(740, conv).unwrap(), dec!(0));
        assert_eq!(fico_rate_adjustment(739, conv).unwrap(), dec!(0.125));
        assert_eq!(fico_rate_adjustment(700, conv).unwrap(), dec!(0.25));
        assert_eq!(fico_rate_adjustment(620, conv).unwrap(), dec!(1.0));
    }

    #[test]
    fn test_conventional_below_floor_is_ineligible() {
        let err = fico_rate_adjustment(619, LoanType::Conventional).unwrap_err();
        match err {
            AffordabilityError::Ineligible { floor, fico, .. } => {
                assert_eq!(floor, 620);
                assert_eq!(fico, 619);
            }
            other => panic!("Expected Ineligible, got {other:?}"),
        }
    }

    #[test]
    fn test_fha_bands_reach_down_to_500() {
        assert_eq!(fico_rate_adjustment(579, LoanType::Fha).unwrap(), dec!(1.25));
        assert_eq!(fico_rate_adjustment(500, LoanType::Fha).unwrap(), dec!(1.25));
        assert_eq!(fico_rate_adjustment(580, LoanType::Fha).unwrap(), dec!(0.75));
        assert!(matches!(
            fico_rate_adjustment(499, LoanType::Fha),
            Err(AffordabilityError::Ineligible { floor: 500, .. })
        ));
    }

    #[test]
    fn test_fico_out_of_domain() {
        assert!(matches!(
            fico_rate_adjustment(250, LoanType::Fha),
            Err(AffordabilityError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_ltv_bands() {
        assert_eq!(ltv_rate_adjustment(dec!(55)).unwrap(), dec!(-0.25));
        assert_eq!(ltv_rate_adjustment(dec!(60)).unwrap(), dec!(-0.125));
        assert_eq!(ltv_rate_adjustment(dec!(65)).unwrap(), dec!(-0.125));
        assert_eq!(ltv_rate_adjustment(dec!(72)).unwrap(), dec!(0));
        assert_eq!(ltv_rate_adjustment(dec!(82)).unwrap(), dec!(0.125));
        assert_eq!(ltv_rate_adjustment(dec!(97)).unwrap(), dec!(0.5));
        assert_eq!(ltv_rate_adjustment(dec!(98)).unwrap(), dec!(0.75));
        assert_eq!(ltv_rate_adjustment(dec!(150)).unwrap(), dec!(0.75));
    }

    #[test]
    fn test_negative_ltv_rejected() {
        assert!(matches!(
            ltv_rate_adjustment(dec!(-5)),
            Err(AffordabilityError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_adjusted_rate_sums_components() {
        // 6.5 + 0.25 (FICO 700) + 0.125 (LTV 80)
        let rate = adjusted_rate(&quote(), 700, dec!(80), LoanType::Conventional).unwrap();
        assert_eq!(rate, dec!(6.875));
    }

    #[test]
    fn test_adjusted_rate_uses_loan_type_base() {
        // 6.0 + 0.125 (FICO 700) + 0.5 (LTV 96.5)
        let rate = adjusted_rate(&quote(), 700, dec!(96.5), LoanType::Fha).unwrap();
        assert_eq!(rate, dec!(6.625));
    }

    #[test]
    fn test_adjusted_rate_floor() {
        let low = RateQuote::new(dec!(0.1), dec!(0.1));
        let breakdown = rate_breakdown(&low, 800, dec!(50), LoanType::Conventional).unwrap();
        assert_eq!(breakdown.adjusted_rate, MIN_ADJUSTED_RATE);
        assert!(breakdown.floor_applied);
    }

    #[test]
    fn test_missing_rate_is_surfaced() {
        let partial = RateQuote {
            conventional: Some(dec!(6.5)),
            fha: None,
        };
        let err = adjusted_rate(&partial, 700, dec!(90), LoanType::Fha).unwrap_err();
        match err {
            AffordabilityError::MissingInput { field, .. } => assert_eq!(field, "rates.fha"),
            other => panic!("Expected MissingInput, got {other:?}"),
        }
    }
}
