//! Orchestration: resolve market inputs, run the affordability pipeline and
//! build one-dimension what-if scenarios.

pub mod assessment;
pub mod market;
pub mod scenarios;

pub use assessment::{
    assess_affordability, assess_request, evaluate, AffordabilityInput, AffordabilityReport,
    AffordabilityResult,
};
pub use market::{AffordabilityRequest, MarketAssumptions, MarketObservation};
pub use scenarios::{generate_scenarios, Scenario, ScenarioChange};
