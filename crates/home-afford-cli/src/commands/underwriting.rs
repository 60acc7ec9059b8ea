use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use home_afford_core::amortization::percent_of;
use home_afford_core::underwriting::{dti, mortgage_insurance, navigation, rate_adjustment};
use home_afford_core::{LoanType, MitigatingFactor, RateQuote};

use super::{FactorArg, LoanTypeArg};

/// Arguments for the adjusted-rate build-up
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RateArgs {
    /// FICO credit score
    #[arg(long)]
    pub fico: u32,

    /// Loan-to-value percentage
    #[arg(long)]
    pub ltv: Decimal,

    /// Loan program
    #[arg(long, value_enum, default_value = "conventional")]
    pub loan_type: LoanTypeArg,

    /// Conventional base rate (percent)
    #[arg(long)]
    pub conventional_rate: Option<Decimal>,

    /// FHA base rate (percent)
    #[arg(long)]
    pub fha_rate: Option<Decimal>,
}

/// Arguments for the DTI limit
#[derive(Args)]
pub struct DtiArgs {
    #[arg(long)]
    pub fico: u32,

    #[arg(long)]
    pub ltv: Decimal,

    #[arg(long, value_enum, default_value = "conventional")]
    pub loan_type: LoanTypeArg,

    /// Mitigating factor (repeatable)
    #[arg(long = "factor", value_enum)]
    pub factors: Vec<FactorArg>,
}

/// Arguments for the FHA premium schedule
#[derive(Args)]
pub struct MipArgs {
    #[arg(long)]
    pub loan_amount: Decimal,

    #[arg(long)]
    pub ltv: Decimal,

    #[arg(long, default_value = "30")]
    pub term: u32,
}

/// Arguments for the conventional PMI estimate
#[derive(Args)]
pub struct PmiArgs {
    #[arg(long)]
    pub ltv: Decimal,
}

/// Arguments for band navigation
#[derive(Args)]
pub struct NextBandArgs {
    /// Current FICO score
    #[arg(long)]
    pub fico: Option<u32>,

    /// Current loan-to-value percentage
    #[arg(long)]
    pub ltv: Option<Decimal>,

    #[arg(long, value_enum, default_value = "conventional")]
    pub loan_type: LoanTypeArg,
}

pub fn run_adjusted_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote = RateQuote {
        conventional: args.conventional_rate,
        fha: args.fha_rate,
    };
    let breakdown =
        rate_adjustment::rate_breakdown(&quote, args.fico, args.ltv, args.loan_type.into())?;
    Ok(serde_json::to_value(breakdown)?)
}

pub fn run_max_dti(args: DtiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let factors: Vec<MitigatingFactor> = args.factors.into_iter().map(Into::into).collect();
    let decision = dti::dti_decision(args.fico, args.ltv, args.loan_type.into(), &factors);
    Ok(serde_json::to_value(decision)?)
}

pub fn run_fha_mip(args: MipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rates = mortgage_insurance::fha_mip_rates(args.loan_amount, args.ltv, args.term)?;
    Ok(json!({
        "upfront_percent": rates.upfront_percent,
        "annual_percent": rates.annual_percent,
        "upfront_premium": percent_of(args.loan_amount, rates.upfront_percent)?,
        "monthly_premium": percent_of(args.loan_amount, rates.annual_percent)? / Decimal::from(12),
    }))
}

pub fn run_pmi(args: PmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = mortgage_insurance::conventional_pmi_rate(args.ltv)?;
    Ok(json!({ "ltv": args.ltv, "pmi_rate": rate }))
}

pub fn run_next_band(args: NextBandArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.fico.is_none() && args.ltv.is_none() {
        return Err("--fico and/or --ltv is required".into());
    }
    let loan_type: LoanType = args.loan_type.into();
    let mut out = serde_json::Map::new();
    if let Some(fico) = args.fico {
        out.insert("fico".into(), json!(fico));
        out.insert("next_fico_band".into(), json!(navigation::next_fico_band(fico, loan_type)));
    }
    if let Some(ltv) = args.ltv {
        out.insert("ltv".into(), json!(ltv));
        out.insert("next_ltv_band".into(), json!(navigation::next_ltv_band(ltv)));
    }
    Ok(Value::Object(out))
}
