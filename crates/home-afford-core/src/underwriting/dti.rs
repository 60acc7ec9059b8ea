//! Maximum debt-to-income policy.
//!
//! Each program has a base limit and a set of overrides. An override can only
//! raise the limit, and the result is the maximum of the base and every
//! triggered override, never a sum.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{FicoScore, LoanType, MitigatingFactor, Percent};

/// One program's DTI policy.
#[derive(Debug, Clone, Copy)]
pub struct DtiPolicy {
    pub base: Percent,
    /// Limit granted by any triggered override.
    pub raised: Percent,
    /// Scores at or above this trigger the override.
    pub fico_threshold: FicoScore,
    /// LTVs at or below this trigger the override.
    pub ltv_threshold: Option<Percent>,
    /// This many distinct mitigating factors trigger the override.
    pub factor_count_threshold: Option<usize>,
}

pub const CONVENTIONAL_DTI: DtiPolicy = DtiPolicy {
    base: dec!(36),
    raised: dec!(45),
    fico_threshold: 720,
    ltv_threshold: Some(dec!(75)),
    factor_count_threshold: None,
};

pub const FHA_DTI: DtiPolicy = DtiPolicy {
    base: dec!(43),
    raised: dec!(50),
    fico_threshold: 680,
    ltv_threshold: None,
    factor_count_threshold: Some(2),
};

pub fn dti_policy(loan_type: LoanType) -> &'static DtiPolicy {
    match loan_type {
        LoanType::Conventional => &CONVENTIONAL_DTI,
        LoanType::Fha => &FHA_DTI,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtiDecision {
    pub loan_type: LoanType,
    pub base_dti: Percent,
    pub max_dti: Percent,
    /// Human-readable names of the overrides that fired.
    pub overrides: Vec<String>,
}

/// Evaluate the DTI policy and report which overrides fired.
pub fn dti_decision<'a>(
    fico: FicoScore,
    ltv: Percent,
    loan_type: LoanType,
    factors: impl IntoIterator<Item = &'a MitigatingFactor>,
) -> DtiDecision {
    let policy = dti_policy(loan_type);
    let factors: BTreeSet<MitigatingFactor> = factors.into_iter().copied().collect();

    let mut overrides = Vec::new();
    if fico >= policy.fico_threshold {
        overrides.push(format!("FICO {fico} >= {}", policy.fico_threshold));
    }
    if factors.contains(&MitigatingFactor::Reserves) {
        overrides.push("cash reserves".to_string());
    }
    if let Some(threshold) = policy.ltv_threshold {
        if ltv <= threshold {
            overrides.push(format!("LTV {ltv}% <= {threshold}%"));
        }
    }
    if let Some(min_count) = policy.factor_count_threshold {
        if factors.len() >= min_count {
            overrides.push(format!("{} mitigating factors", factors.len()));
        }
    }

    let max_dti = if overrides.is_empty() {
        policy.base
    } else {
        policy.base.max(policy.raised)
    };

    DtiDecision {
        loan_type,
        base_dti: policy.base,
        max_dti,
        overrides,
    }
}

/// Maximum allowed DTI percentage.
pub fn max_dti<'a>(
    fico: FicoScore,
    ltv: Percent,
    loan_type: LoanType,
    factors: impl IntoIterator<Item = &'a MitigatingFactor>,
) -> Percent {
    dti_decision(fico, ltv, loan_type, factors).max_dti
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MitigatingFactor::*;

    const NONE: [MitigatingFactor; 0] = [];

    #[test]
    fn test_conventional_base() {
        assert_eq!(max_dti(700, dec!(80), LoanType::Conventional, &NONE), dec!(36));
    }

    #[test]
    fn test_conventional_overrides() {
        let conv = LoanType::Conventional;
        assert_eq!(max_dti(720, dec!(80), conv, &NONE), dec!(45));
        assert_eq!(max_dti(650, dec!(80), conv, &[Reserves]), dec!(45));
        assert_eq!(max_dti(650, dec!(75), conv, &NONE), dec!(45));
        assert_eq!(max_dti(650, dec!(75.01), conv, &NONE), dec!(36));
        // Overrides combine by max, not by sum.
        assert_eq!(max_dti(760, dec!(60), conv, &[Reserves]), dec!(45));
    }

    #[test]
    fn test_conventional_ignores_factor_count() {
        let decision = dti_decision(
            650,
            dec!(90),
            LoanType::Conventional,
            &[ResidualIncome, HousingHistory, MinimalDebt],
        );
        assert_eq!(decision.max_dti, dec!(36));
        assert!(decision.overrides.is_empty());
    }

    #[test]
    fn test_fha_base_and_overrides() {
        let fha = LoanType::Fha;
        assert_eq!(max_dti(640, dec!(96.5), fha, &NONE), dec!(43));
        assert_eq!(max_dti(680, dec!(96.5), fha, &NONE), dec!(50));
        assert_eq!(max_dti(600, dec!(96.5), fha, &[Reserves]), dec!(50));
        assert_eq!(max_dti(600, dec!(96.5), fha, &[MinimalDebt]), dec!(43));
        assert_eq!(
            max_dti(600, dec!(96.5), fha, &[MinimalDebt, HousingHistory]),
            dec!(50)
        );
    }

    #[test]
    fn test_fha_duplicates_are_one_factor() {
        assert_eq!(
            max_dti(600, dec!(96.5), LoanType::Fha, &[MinimalDebt, MinimalDebt]),
            dec!(43)
        );
    }

    #[test]
    fn test_ltv_is_ignored_for_fha() {
        assert_eq!(max_dti(600, dec!(50), LoanType::Fha, &NONE), dec!(43));
    }

    #[test]
    fn test_decision_reports_overrides() {
        let decision = dti_decision(740, dec!(70), LoanType::Conventional, &[Reserves]);
        assert_eq!(decision.base_dti, dec!(36));
        assert_eq!(decision.overrides.len(), 3);
    }
}
