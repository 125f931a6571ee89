//! Trait seams to the external collaborators (model capability,
//! candidate pool, annotation, export, randomness).

mod annotation;
mod draw;
mod export;
mod model;
mod pool;

pub use annotation::IAnnotator;
pub use draw::IDrawSource;
pub use export::IExportTarget;
pub use model::IModel;
pub use pool::ICandidatePool;
