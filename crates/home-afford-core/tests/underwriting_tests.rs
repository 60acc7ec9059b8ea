use home_afford_core::underwriting::{dti, mortgage_insurance, navigation, rate_adjustment};
use home_afford_core::{AffordabilityError, LoanType, MitigatingFactor, RateQuote};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Rate adjustments
// ===========================================================================

#[test]
fn test_every_fico_resolves_or_is_ineligible() {
    for loan_type in [LoanType::Conventional, LoanType::Fha] {
        for fico in 300..=850u32 {
            match rate_adjustment::fico_rate_adjustment(fico, loan_type) {
                Ok(delta) => {
                    assert!(delta >= Decimal::ZERO);
                    assert!(fico >= loan_type.fico_floor());
                }
                Err(AffordabilityError::Ineligible { floor, .. }) => {
                    assert!(fico < floor);
                }
                Err(other) => panic!("Unexpected error at FICO {fico}: {other:?}"),
            }
        }
    }
}

#[test]
fn test_fico_adjustments_non_increasing() {
    for loan_type in [LoanType::Conventional, LoanType::Fha] {
        let mut previous: Option<Decimal> = None;
        for fico in loan_type.fico_floor()..=850 {
            let delta = rate_adjustment::fico_rate_adjustment(fico, loan_type).unwrap();
            if let Some(prev) = previous {
                assert!(delta <= prev, "{loan_type} FICO {fico}: {delta} > {prev}");
            }
            previous = Some(delta);
        }
    }
}

#[test]
fn test_ltv_known_values() {
    assert_eq!(rate_adjustment::ltv_rate_adjustment(dec!(65)).unwrap(), dec!(-0.125));
    assert_eq!(rate_adjustment::ltv_rate_adjustment(dec!(82)).unwrap(), dec!(0.125));
    assert_eq!(rate_adjustment::ltv_rate_adjustment(dec!(98)).unwrap(), dec!(0.75));
}

#[test]
fn test_adjusted_rate_is_strictly_positive() {
    let quote = RateQuote::new(Decimal::ZERO, Decimal::ZERO);
    let rate = rate_adjustment::adjusted_rate(&quote, 800, dec!(40), LoanType::Conventional).unwrap();
    assert!(rate > Decimal::ZERO);
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_ltv_adjustment_non_decreasing(hundredths in 0i64..15_000, step in 1i64..500) {
        let lo = Decimal::new(hundredths, 2);
        let hi = Decimal::new(hundredths + step, 2);
        let a = rate_adjustment::ltv_rate_adjustment(lo).unwrap();
        let b = rate_adjustment::ltv_rate_adjustment(hi).unwrap();
        prop_assert!(a <= b);
    }

    #[test]
    fn prop_dti_floor_and_factor_monotonicity(
        fico in 300u32..=850,
        ltv_hundredths in 0i64..10_000,
        mask in 0u8..16,
        extra in 0usize..4,
        fha in any::<bool>(),
    ) {
        let all = [
            MitigatingFactor::Reserves,
            MitigatingFactor::ResidualIncome,
            MitigatingFactor::HousingHistory,
            MitigatingFactor::MinimalDebt,
        ];
        let loan_type = if fha { LoanType::Fha } else { LoanType::Conventional };
        let floor = if fha { dec!(43) } else { dec!(36) };
        let ltv = Decimal::new(ltv_hundredths, 2);

        let factors: Vec<MitigatingFactor> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, f)| *f)
            .collect();
        let mut more = factors.clone();
        more.push(all[extra]);

        let before = dti::max_dti(fico, ltv, loan_type, &factors);
        let after = dti::max_dti(fico, ltv, loan_type, &more);
        prop_assert!(before >= floor);
        prop_assert!(after >= before);
    }
}

// ===========================================================================
// Mortgage insurance
// ===========================================================================

#[test]
fn test_fha_mip_examples() {
    let long = mortgage_insurance::fha_mip_rates(dec!(300_000), dec!(85), 30).unwrap();
    assert_eq!(long.upfront_percent, dec!(1.75));
    assert_eq!(long.annual_percent, dec!(0.50));

    let short = mortgage_insurance::fha_mip_rates(dec!(300_000), dec!(93), 10).unwrap();
    assert_eq!(short.upfront_percent, dec!(1.75));
    assert_eq!(short.annual_percent, dec!(0.70));
}

#[test]
fn test_pmi_zero_at_or_below_eighty() {
    for ltv in [dec!(0), dec!(50), dec!(79.99), dec!(80)] {
        assert_eq!(mortgage_insurance::conventional_pmi_rate(ltv).unwrap(), Decimal::ZERO);
    }
}

// ===========================================================================
// Band navigation
// ===========================================================================

#[test]
fn test_band_navigation_examples() {
    assert_eq!(navigation::next_fico_band(700, LoanType::Conventional), Some(720));
    assert_eq!(navigation::next_fico_band(745, LoanType::Conventional), None);
    assert_eq!(navigation::next_ltv_band(dec!(92)), Some(dec!(90)));
    assert_eq!(navigation::next_ltv_band(dec!(55)), None);
}

#[test]
fn test_next_fico_band_is_more_favourable() {
    for loan_type in [LoanType::Conventional, LoanType::Fha] {
        for fico in loan_type.fico_floor()..740 {
            let next = navigation::next_fico_band(fico, loan_type).unwrap();
            let now = rate_adjustment::fico_rate_adjustment(fico, loan_type).unwrap();
            let then = rate_adjustment::fico_rate_adjustment(next, loan_type).unwrap();
            assert!(next > fico);
            assert!(then <= now);
        }
    }
}
