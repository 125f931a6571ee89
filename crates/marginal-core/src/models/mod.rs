//! Shared record models handed between the sampling, iteration, and
//! monitoring layers.

mod coefficient_report;
mod decision;
mod plot;
mod round;
mod summary;

pub use coefficient_report::{CoefficientMap, CoefficientReport, CoefficientStats};
pub use decision::QueryDecision;
pub use plot::PlotSeries;
pub use round::RoundRecord;
pub use summary::ExperimentSummary;
