use num_rational::BigRational;
use num_traits::One;
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use text_bayes::{logging, tokenize, ClassifierError, Delta, Likelihood, NaiveBayesClassifier};

#[test]
fn overlapping_vocabulary_wins() {
    logging::initialize_for_tests();

    let mut classifier = NaiveBayesClassifier::new();
    classifier.train([
        ("spam", "buy cheap pills now"),
        ("ham", "let's meet for lunch tomorrow"),
    ]);

    assert_eq!(classifier.classify("cheap pills available").unwrap(), "spam");
}

#[test]
fn empty_training_set_has_no_classification() {
    let mut classifier = NaiveBayesClassifier::new();
    classifier.train(Vec::<(&str, &str)>::new());

    let err = classifier.classify("anything").unwrap_err();
    assert!(matches!(err, ClassifierError::NoClassificationFound));
    assert_eq!(err.to_string(), "no classification found");
}

#[test]
fn symmetric_categories_tie_to_the_first() {
    let mut classifier = NaiveBayesClassifier::new();
    classifier.train([("a", "x y"), ("b", "x y")]);

    let scores = classifier.scores("x y");
    assert_eq!(scores[0].1, scores[1].1);
    assert_eq!(classifier.classify("x y").unwrap(), "a");
}

#[test]
fn contrived_counts_tie_to_the_first() {
    // "b" has twice the counts of "a" for the same vocabulary, so every factor matches.
    let mut classifier = NaiveBayesClassifier::new().with_delta("1".parse::<Delta>().unwrap());
    classifier.train([("b", "x x y y"), ("a", "x y")]);

    // a: (1 + 1) / (2 + 2) = 1/2, b: (2 + 1) / (4 + 2) = 1/2
    let scores = classifier.scores("x");
    assert_eq!(scores[0].1, scores[1].1);
    assert_eq!(classifier.classify("x").unwrap(), "b");
}

#[test]
fn empty_token_sequence_scores_one_for_every_category() {
    let mut classifier = NaiveBayesClassifier::new();
    classifier.train([("a", "x y z"), ("b", "w")]);

    for category in ["a", "b"] {
        let p = classifier.probability(category, &tokenize("!!"), &Delta::default());
        assert_eq!(p.value(), BigRational::one());
    }
}

#[test]
fn unseen_token_probability_grows_with_delta() {
    let mut classifier = NaiveBayesClassifier::new();
    classifier.train([("a", "x y z x")]);
    let unseen = tokenize("q");

    let mut previous = None;
    for delta in ["0.001", "0.01", "0.1", "1", "10"] {
        let p = classifier
            .probability("a", &unseen, &delta.parse::<Delta>().unwrap())
            .value();
        if let Some(previous) = previous {
            assert!(p > previous, "delta {delta} did not increase the probability");
        }
        previous = Some(p);
    }
}

#[test]
fn untrained_category_is_the_zero_sentinel() {
    let mut classifier = NaiveBayesClassifier::new();
    classifier.train([("a", "x")]);

    assert_eq!(
        classifier.probability("b", &tokenize("x"), &Delta::default()),
        Likelihood::Untrained
    );
}

#[test]
fn classifies_thousands_of_tokens_quickly() {
    let mut classifier = NaiveBayesClassifier::new();
    classifier.train([
        ("spam", "buy cheap pills now"),
        ("ham", "let's meet for lunch tomorrow"),
    ]);
    let text = "cheap zebra ".repeat(2000);

    let started = Instant::now();
    let category = classifier.classify(&text).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(category, "spam");
    assert!(
        elapsed < Duration::from_secs(10),
        "classifying 4000 tokens took {elapsed:?}"
    );
}
