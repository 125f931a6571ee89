//! # marginal-core
//!
//! Foundation crate for the marginal active-learning engine.
//! Defines the instance/label types, shared record models, errors, config,
//! and the trait seams to every external collaborator.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod instance;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ExperimentConfig;
pub use errors::{MarginalError, MarginalResult};
pub use instance::{Instance, InstanceId, Label, LabeledInstance, ModelHandle};
pub use models::{ExperimentSummary, QueryDecision, RoundRecord};
