//! Domain guards shared by the underwriting and amortization functions.

use rust_decimal::Decimal;

use crate::error::AffordabilityError;
use crate::types::{FicoScore, Percent};
use crate::AffordResult;

pub const MIN_FICO: FicoScore = 300;
pub const MAX_FICO: FicoScore = 850;
pub const MAX_TERM_YEARS: u32 = 50;

pub fn validate_fico(fico: FicoScore) -> AffordResult<()> {
    if !(MIN_FICO..=MAX_FICO).contains(&fico) {
        return Err(AffordabilityError::OutOfDomain {
            field: "fico_score".into(),
            reason: format!("FICO {fico} is outside {MIN_FICO}-{MAX_FICO}"),
        });
    }
    Ok(())
}

/// Band tables are open-ended at the top, so only negative LTVs are rejected.
pub fn validate_ltv(ltv: Percent) -> AffordResult<()> {
    if ltv < Decimal::ZERO {
        return Err(AffordabilityError::OutOfDomain {
            field: "ltv".into(),
            reason: format!("LTV {ltv}% cannot be negative"),
        });
    }
    Ok(())
}

/// A purchase must finance something and cannot finance more than the price.
pub fn validate_purchase_ltv(ltv: Percent) -> AffordResult<()> {
    if ltv <= Decimal::ZERO || ltv > Decimal::ONE_HUNDRED {
        return Err(AffordabilityError::OutOfDomain {
            field: "ltv".into(),
            reason: format!("LTV {ltv}% must be greater than 0 and at most 100"),
        });
    }
    Ok(())
}

/// A DTI limit is a share of gross income, so it cannot exceed 100%.
pub fn validate_dti(max_dti: Percent) -> AffordResult<()> {
    if max_dti <= Decimal::ZERO || max_dti > Decimal::ONE_HUNDRED {
        return Err(AffordabilityError::OutOfDomain {
            field: "max_dti".into(),
            reason: format!("DTI limit of {max_dti}% must be greater than 0 and at most 100"),
        });
    }
    Ok(())
}

pub fn validate_term(term_years: u32) -> AffordResult<()> {
    if term_years == 0 || term_years > MAX_TERM_YEARS {
        return Err(AffordabilityError::OutOfDomain {
            field: "term_years".into(),
            reason: format!("Term of {term_years} years must be between 1 and {MAX_TERM_YEARS}"),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: Decimal) -> AffordResult<()> {
    if value < Decimal::ZERO {
        return Err(AffordabilityError::InvalidInput {
            field: field.into(),
            reason: format!("{value} cannot be negative"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fico_domain() {
        assert!(validate_fico(300).is_ok());
        assert!(validate_fico(850).is_ok());
        assert!(matches!(
            validate_fico(299),
            Err(AffordabilityError::OutOfDomain { .. })
        ));
        assert!(validate_fico(851).is_err());
    }

    #[test]
    fn test_purchase_ltv_domain() {
        assert!(validate_purchase_ltv(dec!(100)).is_ok());
        assert!(validate_purchase_ltv(dec!(3)).is_ok());
        assert!(validate_purchase_ltv(dec!(0)).is_err());
        assert!(validate_purchase_ltv(dec!(100.5)).is_err());
        assert!(validate_ltv(dec!(150)).is_ok());
        assert!(validate_ltv(dec!(-1)).is_err());
    }

    #[test]
    fn test_dti_domain() {
        assert!(validate_dti(dec!(36)).is_ok());
        assert!(validate_dti(dec!(100)).is_ok());
        assert!(validate_dti(dec!(0)).is_err());
        assert!(matches!(
            validate_dti(dec!(100.01)),
            Err(AffordabilityError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_term_domain() {
        assert!(validate_term(15).is_ok());
        assert!(validate_term(0).is_err());
        assert!(validate_term(51).is_err());
    }
}
