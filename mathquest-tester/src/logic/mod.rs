pub mod policy;
pub mod reports;
pub mod simulation;
pub mod tester;

pub use policy::LearnerStrategy;
pub use simulation::{PlanStep, ProblemRecord, SimulationPlan, SimulationSummary};
pub use tester::*;
