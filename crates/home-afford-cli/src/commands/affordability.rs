use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use home_afford_core::affordability::{
    assess_request, AffordabilityRequest, MarketObservation,
};
use home_afford_core::{BorrowerProfile, RateQuote};

use super::{FactorArg, LoanTypeArg};
use crate::input;

/// Arguments for a full affordability assessment
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Two-letter state code used to pick regional fallbacks
    #[arg(long)]
    pub region: Option<String>,

    /// Annual gross income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Monthly recurring debt payments
    #[arg(long, default_value = "0")]
    pub debts: Decimal,

    /// FICO credit score
    #[arg(long)]
    pub fico: Option<u32>,

    /// Loan program
    #[arg(long, value_enum, default_value = "conventional")]
    pub loan_type: LoanTypeArg,

    /// Loan-to-value percentage (100 minus the down payment)
    #[arg(long)]
    pub ltv: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term: u32,

    /// Mitigating factor (repeatable)
    #[arg(long = "factor", value_enum)]
    pub factors: Vec<FactorArg>,

    /// Observed conventional base rate (percent)
    #[arg(long)]
    pub conventional_rate: Option<Decimal>,

    /// Observed FHA base rate (percent)
    #[arg(long)]
    pub fha_rate: Option<Decimal>,

    /// Observed property tax rate (percent of value per year)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Observed annual homeowner's insurance premium
    #[arg(long)]
    pub insurance: Option<Decimal>,
}

pub fn run_assess(
    args: AssessArgs,
    config: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: AffordabilityRequest = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(request) => request,
        None => {
            debug!("building request from flags");
            request_from_flags(args)?
        }
    };

    let assumptions = input::file::read_market_assumptions(config)?;
    let result = assess_request(&request, &assumptions)?;
    for warning in &result.warnings {
        warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}

fn request_from_flags(args: AssessArgs) -> Result<AffordabilityRequest, Box<dyn std::error::Error>> {
    Ok(AffordabilityRequest {
        region: args.region,
        borrower: BorrowerProfile {
            fico_score: args.fico.ok_or("--fico is required (or provide --input)")?,
            annual_income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            monthly_debts: args.debts,
            mitigating_factors: args.factors.into_iter().map(Into::into).collect(),
        },
        loan_type: args.loan_type.into(),
        ltv: args.ltv.ok_or("--ltv is required (or provide --input)")?,
        term_years: args.term,
        market: MarketObservation {
            rates: RateQuote {
                conventional: args.conventional_rate,
                fha: args.fha_rate,
            },
            property_tax_rate: args.tax_rate,
            annual_insurance: args.insurance,
        },
    })
}
