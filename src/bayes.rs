use crate::{
    corpus,
    error::ClassifierError,
    smoothing::Delta,
    tokenize::{tokenize, Token},
};
use anyhow::{Context, Result};
use log::{debug, info};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::{
    cmp::Ordering,
    collections::{hash_map::Entry, HashMap},
    f64::consts::LN_2,
    fs::File,
    path::Path,
};

/// Outcome of scoring a token sequence against one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Likelihood {
    /// The category never appeared in training.
    Untrained,
    /// Smoothed product over the input tokens.
    Smoothed(BigRational),
}

impl Likelihood {
    /// Numeric value used for ranking; an untrained category counts as exact zero.
    pub fn value(&self) -> BigRational {
        match self {
            Likelihood::Untrained => BigRational::zero(),
            Likelihood::Smoothed(p) => p.clone(),
        }
    }
}

/// Word counts seen for one category.
#[derive(Debug, Default, Clone)]
struct TokenCounts {
    counts: HashMap<Token, u64>,
    total: u64,
}

impl TokenCounts {
    fn add(&mut self, token: Token) {
        *self.counts.entry(token).or_insert(0) += 1;
        self.total += 1;
    }

    /// The smoothed product as an unreduced fraction with a positive denominator.
    ///
    /// With delta = p/q every factor is `(count*q + p) / (total*q + p*vocabulary)`, so the
    /// numerators can be multiplied as integers, grouped by count, and the shared denominator
    /// raised to the number of tokens once.
    fn smoothed_fraction(&self, tokens: &[Token], delta: &Delta) -> Fraction {
        let p = delta.as_ratio().numer();
        let q = delta.as_ratio().denom();
        let denominator = BigInt::from(self.total) * q + p * BigInt::from(self.counts.len());

        // A category sighted only with empty sentences has no mass to hand out.
        if denominator.is_zero() {
            let numer = if tokens.is_empty() {
                BigInt::one()
            } else {
                BigInt::zero()
            };
            return Fraction::new(numer, BigInt::one());
        }

        let mut multiplicities: HashMap<u64, usize> = HashMap::new();
        for token in tokens {
            let count = self.counts.get(token).copied().unwrap_or(0);
            *multiplicities.entry(count).or_insert(0) += 1;
        }

        let numer = multiplicities
            .into_iter()
            .fold(BigInt::one(), |acc, (count, times)| {
                acc * num_traits::pow(BigInt::from(count) * q + p, times)
            });

        Fraction::new(numer, num_traits::pow(denominator, tokens.len()))
    }
}

/// Exact score kept unreduced; comparisons cross-multiply instead of normalizing.
#[derive(Debug, Clone)]
struct Fraction {
    numer: BigInt,
    denom: BigInt,
}

impl Fraction {
    fn new(numer: BigInt, denom: BigInt) -> Self {
        Fraction { numer, denom }
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    fn cmp(&self, other: &Fraction) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }

    /// Natural log, approximate but free of underflow.
    fn ln(&self) -> f64 {
        if self.is_zero() {
            f64::NEG_INFINITY
        } else {
            ln_big(&self.numer) - ln_big(&self.denom)
        }
    }

    fn into_ratio(self) -> BigRational {
        BigRational::new(self.numer, self.denom)
    }
}

fn ln_big(x: &BigInt) -> f64 {
    // Keep the top 53 bits so the conversion to f64 can't overflow.
    let shift = x.bits().saturating_sub(53);
    let top: BigInt = x >> shift;
    top.to_f64().unwrap_or(f64::NAN).ln() + shift as f64 * LN_2
}

/// Collects per-category counts in first-sighting order.
#[derive(Default)]
struct CountTable {
    categories: Vec<(String, TokenCounts)>,
    index: HashMap<String, usize>,
    num_records: usize,
}

impl CountTable {
    fn add(&mut self, category: impl Into<String>, sentence: &str) {
        let slot = match self.index.entry(category.into()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.categories
                    .push((entry.key().clone(), TokenCounts::default()));
                *entry.insert(self.categories.len() - 1)
            }
        };

        let counts = &mut self.categories[slot].1;
        for token in tokenize(sentence) {
            counts.add(token);
        }

        self.num_records += 1;
    }

    fn finish(self) -> Vec<(String, TokenCounts)> {
        info!(
            "trained {} categories from {} records",
            self.categories.len(),
            self.num_records
        );
        self.categories
    }
}

/// Multinomial Naive Bayes text classifier with per-category additive smoothing.
pub struct NaiveBayesClassifier {
    // Kept in first-sighting order; ties during classification go to the earliest entry.
    categories: Vec<(String, TokenCounts)>,
    delta: Delta,
}

impl NaiveBayesClassifier {
    pub fn new() -> Self {
        NaiveBayesClassifier {
            categories: Vec::new(),
            delta: Delta::default(),
        }
    }

    pub fn with_delta(mut self, delta: Delta) -> Self {
        self.delta = delta;
        self
    }

    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// Replaces the trained state with counts built from `records`.
    pub fn train<I, L, S>(&mut self, records: I)
    where
        I: IntoIterator<Item = (L, S)>,
        L: Into<String>,
        S: AsRef<str>,
    {
        let mut table = CountTable::default();
        for (category, sentence) in records {
            table.add(category, sentence.as_ref());
        }
        self.categories = table.finish();
    }

    /// Like [`train`](Self::train) but for sources that can fail part way.
    ///
    /// The first error aborts training and the previous state is left as it was.
    pub fn try_train<I, L, S>(&mut self, records: I) -> Result<(), ClassifierError>
    where
        I: IntoIterator<Item = Result<(L, S), ClassifierError>>,
        L: Into<String>,
        S: AsRef<str>,
    {
        let mut table = CountTable::default();
        for record in records {
            let (category, sentence) = record?;
            table.add(category, sentence.as_ref());
        }
        self.categories = table.finish();
        Ok(())
    }

    /// Trains from a header-less CSV file of `category,sentence` rows.
    pub fn train_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| ClassifierError::Csv(err.into()))
            .with_context(|| format!("could not open training data {}", path.display()))?;

        self.try_train(corpus::records(file))
            .with_context(|| format!("could not train from {}", path.display()))
    }

    /// Trained categories in the order they were first seen.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(category, _)| category.as_str())
    }

    pub fn vocabulary_size(&self, category: &str) -> Option<usize> {
        self.counts(category).map(|counts| counts.counts.len())
    }

    pub fn total_tokens(&self, category: &str) -> Option<u64> {
        self.counts(category).map(|counts| counts.total)
    }

    fn counts(&self, category: &str) -> Option<&TokenCounts> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, counts)| counts)
    }

    /// Computes the add-delta probability P(tokens | category).
    ///
    /// Each token, duplicates included, contributes a factor of
    /// `(count + delta) / (total + delta * vocabulary)` where vocabulary is the category's own
    /// number of distinct tokens.
    pub fn probability(&self, category: &str, tokens: &[Token], delta: &Delta) -> Likelihood {
        match self.counts(category) {
            Some(counts) => {
                Likelihood::Smoothed(counts.smoothed_fraction(tokens, delta).into_ratio())
            }
            None => Likelihood::Untrained,
        }
    }

    /// Scores `text` against every trained category, in training order.
    pub fn scores(&self, text: &str) -> Vec<(&str, Likelihood)> {
        let tokens = tokenize(text);
        self.categories
            .iter()
            .map(|(category, counts)| {
                let p = counts.smoothed_fraction(&tokens, &self.delta).into_ratio();
                (category.as_str(), Likelihood::Smoothed(p))
            })
            .collect()
    }

    /// Picks the most likely category for `text`.
    ///
    /// Ties go to the category seen first in training. Fails when nothing was trained or the
    /// best score is exactly zero.
    pub fn classify(&self, text: &str) -> Result<&str, ClassifierError> {
        let tokens = tokenize(text);
        let mut best: Option<(&str, Fraction)> = None;

        for (category, counts) in &self.categories {
            let score = counts.smoothed_fraction(&tokens, &self.delta);
            debug!("{category}: ln p = {:.4}", score.ln());

            let improves = best
                .as_ref()
                .map_or(true, |(_, best_score)| score.cmp(best_score) == Ordering::Greater);
            if improves {
                best = Some((category.as_str(), score));
            }
        }

        match best {
            Some((category, score)) if !score.is_zero() => Ok(category),
            _ => Err(ClassifierError::NoClassificationFound),
        }
    }
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new()
    }
}
