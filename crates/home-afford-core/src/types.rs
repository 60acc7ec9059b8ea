use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages expressed as whole numbers (6.5 = 6.5%). Never as fractions.
pub type Percent = Decimal;

/// FICO credit score (domain 300-850).
pub type FicoScore = u32;

/// Loan program. Selects the rate tables, DTI policy and mortgage insurance
/// schedule used everywhere downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    #[default]
    Conventional,
    Fha,
}

impl LoanType {
    /// Lowest FICO score this program will underwrite.
    pub fn fico_floor(self) -> FicoScore {
        match self {
            LoanType::Conventional => 620,
            LoanType::Fha => 500,
        }
    }

    /// The other program, used for loan-type what-if scenarios.
    pub fn alternate(self) -> LoanType {
        match self {
            LoanType::Conventional => LoanType::Fha,
            LoanType::Fha => LoanType::Conventional,
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanType::Conventional => write!(f, "conventional"),
            LoanType::Fha => write!(f, "FHA"),
        }
    }
}

/// Compensating factors an underwriter may weigh against a higher DTI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MitigatingFactor {
    Reserves,
    ResidualIncome,
    HousingHistory,
    MinimalDebt,
}

/// Unadjusted market base rates, one per loan type. Either may be
/// unavailable from the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conventional: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fha: Option<Percent>,
}

impl RateQuote {
    pub fn new(conventional: Percent, fha: Percent) -> Self {
        RateQuote {
            conventional: Some(conventional),
            fha: Some(fha),
        }
    }

    pub fn for_loan_type(&self, loan_type: LoanType) -> Option<Percent> {
        match loan_type {
            LoanType::Conventional => self.conventional,
            LoanType::Fha => self.fha,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub fico_score: FicoScore,
    /// Annual gross income.
    pub annual_income: Money,
    /// Recurring monthly debt obligations (car, student loans, cards).
    pub monthly_debts: Money,
    /// Order is irrelevant and duplicates are ignored.
    #[serde(default)]
    pub mitigating_factors: BTreeSet<MitigatingFactor>,
}

fn default_term_years() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    pub loan_type: LoanType,
    /// Loan-to-value percentage; down payment is `100 - ltv`.
    pub ltv: Percent,
    #[serde(default = "default_term_years")]
    pub term_years: u32,
    /// Annual property tax as a percentage of home value.
    pub property_tax_rate: Percent,
    /// Annual homeowner's insurance premium.
    pub annual_insurance: Money,
}

impl LoanParameters {
    pub fn down_payment_percent(&self) -> Percent {
        Decimal::ONE_HUNDRED - self.ltv
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_quote_selects_by_loan_type() {
        let quote = RateQuote {
            conventional: Some(dec!(6.5)),
            fha: None,
        };
        assert_eq!(quote.for_loan_type(LoanType::Conventional), Some(dec!(6.5)));
        assert_eq!(quote.for_loan_type(LoanType::Fha), None);
    }

    #[test]
    fn test_loan_type_floors() {
        assert_eq!(LoanType::Conventional.fico_floor(), 620);
        assert_eq!(LoanType::Fha.fico_floor(), 500);
        assert_eq!(LoanType::Fha.alternate(), LoanType::Conventional);
    }

    #[test]
    fn test_mitigating_factors_deserialize_as_set() {
        let profile: BorrowerProfile = serde_json::from_str(
            r#"{"fico_score":700,"annual_income":"90000","monthly_debts":"400",
                "mitigating_factors":["reserves","residualIncome","reserves"]}"#,
        )
        .unwrap();
        assert_eq!(profile.mitigating_factors.len(), 2);
        assert!(profile.mitigating_factors.contains(&MitigatingFactor::Reserves));
    }

    #[test]
    fn test_term_defaults_to_thirty_years() {
        let loan: LoanParameters = serde_json::from_str(
            r#"{"loan_type":"fha","ltv":"96.5","property_tax_rate":"1.1","annual_insurance":"1200"}"#,
        )
        .unwrap();
        assert_eq!(loan.term_years, 30);
        assert_eq!(loan.down_payment_percent(), dec!(3.5));
    }
}
