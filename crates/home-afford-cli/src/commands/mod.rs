pub mod affordability;
pub mod amortization;
pub mod underwriting;

use clap::ValueEnum;
use home_afford_core::{LoanType, MitigatingFactor};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoanTypeArg {
    Conventional,
    Fha,
}

impl From<LoanTypeArg> for LoanType {
    fn from(arg: LoanTypeArg) -> Self {
        match arg {
            LoanTypeArg::Conventional => LoanType::Conventional,
            LoanTypeArg::Fha => LoanType::Fha,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FactorArg {
    Reserves,
    ResidualIncome,
    HousingHistory,
    MinimalDebt,
}

impl From<FactorArg> for MitigatingFactor {
    fn from(arg: FactorArg) -> Self {
        match arg {
            FactorArg::Reserves => MitigatingFactor::Reserves,
            FactorArg::ResidualIncome => MitigatingFactor::ResidualIncome,
            FactorArg::HousingHistory => MitigatingFactor::HousingHistory,
            FactorArg::MinimalDebt => MitigatingFactor::MinimalDebt,
        }
    }
}
