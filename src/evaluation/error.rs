use thiserror::Error;

use crate::classifier::ClassifierError;

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Accuracy is undefined without examples.
    #[error("dataset contains no examples")]
    EmptyDataset,

    #[error("classification failed for {text:?} (label '{label}'): {source}")]
    Classifier {
        text: String,
        label: String,
        #[source]
        source: ClassifierError,
    },

    #[error("batch classification failed for label '{label}': {source}")]
    Batch {
        label: String,
        #[source]
        source: ClassifierError,
    },
}
