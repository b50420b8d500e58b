use thiserror::Error;


/// An error that can occur while constructing a transformation.
#[derive(Debug, Error)]
pub enum TransformConstructionError {
    #[error("invalid transformation pattern \"{}\"", .pattern)]
    InvalidPattern {
        pattern: String,

        #[source]
        error: Box<regex::Error>,
    },
}
