/// Annotation-collaborator errors. Recoverable: the round is aborted and
/// budget state rolled back, so the caller may retry the same round.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("annotation collaborator unavailable: {message}")]
    Unavailable { message: String },

    #[error("annotation returned {returned} labels for a batch of {requested}")]
    PartialLabels { requested: usize, returned: usize },
}
