use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A training row that can't be read as a (category, sentence) pair.
    #[error("training record on line {line} has {fields} field(s), expected a category and a sentence")]
    InputFormat { line: u64, fields: usize },

    /// The training source itself could not be decoded as CSV.
    #[error("training data could not be read")]
    Csv(#[from] csv::Error),

    /// Every category scored exactly zero, or nothing was trained.
    #[error("no classification found")]
    NoClassificationFound,
}

impl ClassifierError {
    /// True for every way the training source can fail to yield records.
    pub fn is_input_format(&self) -> bool {
        matches!(self, ClassifierError::InputFormat { .. } | ClassifierError::Csv(_))
    }
}
