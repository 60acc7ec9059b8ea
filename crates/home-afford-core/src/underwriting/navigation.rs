//! Next-more-favourable band helpers used to build improvement scenarios.
//!
//! Boundaries come straight from the rate tables, so a change to a table
//! moves the navigation targets with it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::bands::boundaries;
use super::rate_adjustment::{fico_adjustment_table, LTV_ADJUSTMENTS};
use crate::types::{FicoScore, LoanType, Percent};

/// FICO boundaries of the eligible bands, ascending.
pub fn fico_band_boundaries(loan_type: LoanType) -> Vec<FicoScore> {
    fico_adjustment_table(loan_type)
        .iter()
        .filter(|band| band.value.is_some())
        .filter_map(|band| band.edge.bound().to_u32())
        .collect()
}

/// LTV boundaries above the bottom band, descending.
pub fn ltv_band_boundaries() -> Vec<Percent> {
    let mut bounds: Vec<Percent> = boundaries(&LTV_ADJUSTMENTS)
        .into_iter()
        .filter(|b| *b > Decimal::ZERO)
        .collect();
    bounds.reverse();
    bounds
}

/// Smallest eligible boundary strictly above `current`. FHA scores below the
/// program floor have no next band.
pub fn next_fico_band(current: FicoScore, loan_type: LoanType) -> Option<FicoScore> {
    if loan_type == LoanType::Fha && current < loan_type.fico_floor() {
        return None;
    }
    fico_band_boundaries(loan_type)
        .into_iter()
        .find(|bound| *bound > current)
}

/// Largest boundary strictly below `current`, i.e. the next lower LTV.
pub fn next_ltv_band(current: Percent) -> Option<Percent> {
    ltv_band_boundaries()
        .into_iter()
        .find(|bound| *bound < current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_boundaries_match_tables() {
        assert_eq!(
            fico_band_boundaries(LoanType::Conventional),
            vec![620, 640, 660, 680, 700, 720, 740]
        );
        assert_eq!(
            fico_band_boundaries(LoanType::Fha),
            vec![500, 580, 620, 640, 660, 680, 700, 720, 740]
        );
        assert_eq!(
            ltv_band_boundaries(),
            vec![dec!(97), dec!(95), dec!(90), dec!(85), dec!(80), dec!(75), dec!(70), dec!(60)]
        );
    }

    #[test]
    fn test_next_fico_band_conventional() {
        assert_eq!(next_fico_band(700, LoanType::Conventional), Some(720));
        assert_eq!(next_fico_band(719, LoanType::Conventional), Some(720));
        assert_eq!(next_fico_band(720, LoanType::Conventional), Some(740));
        assert_eq!(next_fico_band(600, LoanType::Conventional), Some(620));
        assert_eq!(next_fico_band(740, LoanType::Conventional), None);
        assert_eq!(next_fico_band(745, LoanType::Conventional), None);
    }

    #[test]
    fn test_next_fico_band_fha() {
        assert_eq!(next_fico_band(500, LoanType::Fha), Some(580));
        assert_eq!(next_fico_band(590, LoanType::Fha), Some(620));
        assert_eq!(next_fico_band(499, LoanType::Fha), None);
        assert_eq!(next_fico_band(800, LoanType::Fha), None);
    }

    #[test]
    fn test_next_ltv_band() {
        assert_eq!(next_ltv_band(dec!(92)), Some(dec!(90)));
        assert_eq!(next_ltv_band(dec!(96.5)), Some(dec!(95)));
        assert_eq!(next_ltv_band(dec!(90)), Some(dec!(85)));
        assert_eq!(next_ltv_band(dec!(100)), Some(dec!(97)));
        assert_eq!(next_ltv_band(dec!(60)), None);
        assert_eq!(next_ltv_band(dec!(55)), None);
    }
}
