use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use text_bayes::{logging, ClassifierError, Delta, NaiveBayesClassifier};

#[derive(Parser, Debug)]
#[command(name = "text_bayes")]
#[command(about = "Classify sentences with a Naive Bayes model trained from a CSV file")]
struct Args {
    /// CSV file of `category,sentence` rows, without a header
    training_csv: PathBuf,

    /// Additive smoothing constant
    #[arg(short, long, default_value = "0.01")]
    delta: Delta,

    /// Log per-category scores
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::initialize(if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    });

    let mut classifier = NaiveBayesClassifier::new().with_delta(args.delta);
    classifier.train_from_path(&args.training_csv)?;

    let stdin = io::stdin();
    run_prompt(&classifier, stdin.lock(), io::stdout().lock())
}

/// Answers one sentence per input line until the input runs out.
fn run_prompt<R: BufRead, W: Write>(
    classifier: &NaiveBayesClassifier,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "Enter a new sentence: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("could not read input")? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match classifier.classify(line.trim_end_matches(['\r', '\n'])) {
            Ok(category) => writeln!(output, "Most likely category: {category}")?,
            Err(ClassifierError::NoClassificationFound) => {
                writeln!(output, "No classification found")?
            }
            Err(err) => return Err(err.into()),
        }
        writeln!(output)?;
    }
}
