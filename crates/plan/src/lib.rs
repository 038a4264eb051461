pub mod allocation;
pub mod session;

pub use allocation::{
    AllocationCalculator, AllocationCategory, AllocationPlan, AllocationTargets, CategoryPlan,
    GapStatus, Insight, Severity, YtdFigures,
};
pub use session::{MappingOutcome, MappingSession, SessionError};
