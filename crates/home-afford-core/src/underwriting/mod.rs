//! Underwriting policy tables: rate adjustments, DTI limits, mortgage
//! insurance schedules and band navigation. Every policy is a banded lookup
//! over a shared [`bands::Band`] table.

pub mod bands;
pub mod domain;
pub mod dti;
pub mod mortgage_insurance;
pub mod navigation;
pub mod rate_adjustment;
