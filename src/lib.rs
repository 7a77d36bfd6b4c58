//! Naive Bayes text classification with additive smoothing.
//!
//! Train a [`NaiveBayesClassifier`] on `(category, sentence)` pairs, then ask it which category
//! a new sentence most likely belongs to.

pub mod bayes;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod smoothing;
pub mod tokenize;

pub use bayes::{Likelihood, NaiveBayesClassifier};
pub use error::ClassifierError;
pub use smoothing::{Delta, ParseDeltaError};
pub use tokenize::{tokenize, Token};
