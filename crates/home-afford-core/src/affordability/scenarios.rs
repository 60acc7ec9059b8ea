//! What-if scenarios. Each one substitutes exactly one input dimension (loan
//! type, credit score or LTV) and re-runs the pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assessment::{evaluate, AffordabilityInput, AffordabilityResult};
use crate::types::{FicoScore, LoanType, Money, Percent};
use crate::underwriting::navigation::{next_fico_band, next_ltv_band};

/// The single dimension a scenario changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dimension", rename_all = "snake_case")]
pub enum ScenarioChange {
    LoanType { from: LoanType, to: LoanType },
    CreditScore { from: FicoScore, to: FicoScore },
    LoanToValue { from: Percent, to: Percent },
}

impl ScenarioChange {
    pub fn describe(&self) -> String {
        match self {
            ScenarioChange::LoanType { from, to } => format!(
                "Switch from {} loan to {} loan",
                with_article(*from),
                with_article(*to)
            ),
            ScenarioChange::CreditScore { from, to } => {
                format!("Raise credit score from {from} to {to} (+{})", to - from)
            }
            ScenarioChange::LoanToValue { from, to } => format!(
                "Lower LTV from {from}% to {to}% ({}% down payment)",
                Decimal::ONE_HUNDRED - *to
            ),
        }
    }

    fn apply(&self, input: &AffordabilityInput) -> AffordabilityInput {
        let mut changed = input.clone();
        match *self {
            ScenarioChange::LoanType { to, .. } => changed.loan.loan_type = to,
            ScenarioChange::CreditScore { to, .. } => changed.borrower.fico_score = to,
            ScenarioChange::LoanToValue { to, .. } => changed.loan.ltv = to,
        }
        changed
    }
}

fn with_article(loan_type: LoanType) -> String {
    match loan_type {
        LoanType::Conventional => format!("a {loan_type}"),
        LoanType::Fha => format!("an {loan_type}"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub change: ScenarioChange,
    pub description: String,
    pub result: AffordabilityResult,
    /// Scenario price minus baseline price.
    pub price_change: Money,
    /// Scenario payment minus baseline payment.
    pub payment_change: Money,
}

/// Candidate substitutions for `input`, in presentation order.
pub fn candidate_changes(input: &AffordabilityInput) -> Vec<ScenarioChange> {
    let loan_type = input.loan.loan_type;
    let fico = input.borrower.fico_score;
    let ltv = input.loan.ltv;

    let mut changes = vec![ScenarioChange::LoanType {
        from: loan_type,
        to: loan_type.alternate(),
    }];
    if let Some(to) = next_fico_band(fico, loan_type) {
        changes.push(ScenarioChange::CreditScore { from: fico, to });
    }
    if let Some(to) = next_ltv_band(ltv) {
        changes.push(ScenarioChange::LoanToValue { from: ltv, to });
    }
    changes
}

/// Re-run the pipeline for each candidate change. A change that cannot be
/// evaluated is skipped and reported in the returned warnings.
pub fn generate_scenarios(
    input: &AffordabilityInput,
    baseline: &AffordabilityResult,
) -> (Vec<Scenario>, Vec<String>) {
    let mut scenarios = Vec::new();
    let mut warnings = Vec::new();

    for change in candidate_changes(input) {
        let description = change.describe();
        match evaluate(&change.apply(input)) {
            Ok(result) => scenarios.push(Scenario {
                price_change: result.max_home_price - baseline.max_home_price,
                payment_change: result.monthly_payment - baseline.monthly_payment,
                change,
                description,
                result,
            }),
            Err(e) => warnings.push(format!("Scenario skipped ({description}): {e}")),
        }
    }

    (scenarios, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BorrowerProfile, LoanParameters, RateQuote};
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn input(loan_type: LoanType, fico: FicoScore, ltv: Percent) -> AffordabilityInput {
        AffordabilityInput {
            borrower: BorrowerProfile {
                fico_score: fico,
                annual_income: dec!(90_000),
                monthly_debts: dec!(400),
                mitigating_factors: BTreeSet::new(),
            },
            loan: LoanParameters {
                loan_type,
                ltv,
                term_years: 30,
                property_tax_rate: dec!(1.1),
                annual_insurance: dec!(1200),
            },
            rates: RateQuote::new(dec!(6.5), dec!(6.0)),
        }
    }

    #[test]
    fn test_candidates_change_one_dimension() {
        let changes = candidate_changes(&input(LoanType::Conventional, 700, dec!(80)));
        assert_eq!(
            changes,
            vec![
                ScenarioChange::LoanType {
                    from: LoanType::Conventional,
                    to: LoanType::Fha
                },
                ScenarioChange::CreditScore { from: 700, to: 720 },
                ScenarioChange::LoanToValue {
                    from: dec!(80),
                    to: dec!(75)
                },
            ]
        );
    }

    #[test]
    fn test_no_band_means_no_scenario() {
        let changes = candidate_changes(&input(LoanType::Conventional, 780, dec!(55)));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_improvements_raise_price() {
        let base_input = input(LoanType::Conventional, 700, dec!(80));
        let baseline = evaluate(&base_input).unwrap();
        let (scenarios, warnings) = generate_scenarios(&base_input, &baseline);
        assert!(warnings.is_empty());
        assert_eq!(scenarios.len(), 3);

        let credit = &scenarios[1];
        // FICO 720 lowers the rate and lifts conventional DTI to 45.
        assert_eq!(credit.result.fico_score, 720);
        assert_eq!(credit.result.max_dti, dec!(45));
        assert!(credit.price_change > Decimal::ZERO);

        let ltv = &scenarios[2];
        assert_eq!(ltv.result.ltv, dec!(75));
        assert_eq!(ltv.result.loan_type, LoanType::Conventional);
    }

    #[test]
    fn test_ineligible_alternate_is_skipped() {
        // 590 is fine for FHA but below the conventional floor.
        let base_input = input(LoanType::Fha, 590, dec!(96.5));
        let baseline = evaluate(&base_input).unwrap();
        let (scenarios, warnings) = generate_scenarios(&base_input, &baseline);
        assert!(scenarios
            .iter()
            .all(|s| !matches!(s.change, ScenarioChange::LoanType { .. })));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Ineligible"));
    }

    #[test]
    fn test_descriptions() {
        let change = ScenarioChange::LoanType {
            from: LoanType::Fha,
            to: LoanType::Conventional,
        };
        assert_eq!(change.describe(), "Switch from an FHA loan to a conventional loan");
        let credit = ScenarioChange::CreditScore { from: 700, to: 720 };
        assert_eq!(credit.describe(), "Raise credit score from 700 to 720 (+20)");
    }
}
