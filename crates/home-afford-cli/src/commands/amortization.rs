use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use home_afford_core::amortization::{self, PaymentInput, PurchasePriceInput};

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual rate (percent)
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long, default_value = "30")]
    pub term: u32,

    /// Annual property tax amount
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual insurance premium
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Annual mortgage insurance (percent of loan)
    #[arg(long, default_value = "0")]
    pub pmi_rate: Decimal,
}

/// Arguments for the maximum purchase price solve
#[derive(Args)]
pub struct MaxPriceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub income: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub debts: Decimal,

    /// DTI limit (percent)
    #[arg(long)]
    pub max_dti: Option<Decimal>,

    /// Annual rate (percent)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Property tax (percent of value per year)
    #[arg(long, default_value = "0")]
    pub tax_rate: Decimal,

    /// Annual insurance premium
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Down payment (percent of price)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual mortgage insurance (percent of loan)
    #[arg(long, default_value = "0")]
    pub pmi_rate: Decimal,

    #[arg(long, default_value = "30")]
    pub term: u32,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: PaymentInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PaymentInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term,
            annual_property_tax: args.property_tax,
            annual_insurance: args.insurance,
            annual_pmi_rate: args.pmi_rate,
        },
    };

    let breakdown = amortization::payment_breakdown(&payment_input)?;
    Ok(json!({
        "monthly_payment": breakdown.total,
        "principal_and_interest": amortization::round_cents(breakdown.principal_and_interest),
        "property_tax": amortization::round_cents(breakdown.property_tax),
        "insurance": amortization::round_cents(breakdown.insurance),
        "mortgage_insurance": amortization::round_cents(breakdown.mortgage_insurance),
    }))
}

pub fn run_max_price(args: MaxPriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let price_input: PurchasePriceInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PurchasePriceInput {
            annual_income: args.income.ok_or("--income is required (or provide --input)")?,
            monthly_debts: args.debts,
            max_dti: args.max_dti.ok_or("--max-dti is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            property_tax_rate: args.tax_rate,
            annual_insurance: args.insurance,
            down_payment_percent: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            pmi_rate: args.pmi_rate,
            term_years: args.term,
        },
    };

    let price = amortization::max_purchase_price(&price_input)?;
    let loan_amount = amortization::percent_of(
        price,
        Decimal::ONE_HUNDRED - price_input.down_payment_percent,
    )?;
    Ok(json!({
        "max_home_price": price,
        "loan_amount": loan_amount,
        "monthly_budget": amortization::round_cents(amortization::monthly_housing_budget(
            price_input.annual_income,
            price_input.monthly_debts,
            price_input.max_dti,
        )?),
    }))
}
