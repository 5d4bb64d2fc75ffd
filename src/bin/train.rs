//! Offline trainer - fits the preprocessing+classification pipeline from
//! the labeled bank marketing dataset and serializes it to the artifact
//! the server loads at startup. Runs once, out-of-band.

use anyhow::{Context, Result, bail};
use bankcast::config::DEFAULT_MODEL_PATH;
use bankcast::domain::features::FeatureRecord;
use bankcast::domain::ml::Pipeline;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// One row of the semicolon-delimited bank marketing dataset.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    age: f64,
    job: String,
    marital: String,
    education: String,
    default: String,
    balance: f64,
    housing: String,
    loan: String,
    contact: String,
    day: f64,
    month: String,
    duration: f64,
    campaign: f64,
    pdays: f64,
    previous: f64,
    poutcome: String,
    y: String,
}

impl DatasetRow {
    fn into_parts(self) -> (FeatureRecord, i64) {
        let label = if self.y == "yes" { 1 } else { 0 };
        let record = FeatureRecord {
            job: self.job,
            marital: self.marital,
            education: self.education,
            default: self.default,
            housing: self.housing,
            loan: self.loan,
            contact: self.contact,
            month: self.month,
            poutcome: self.poutcome,
            age: self.age,
            balance: self.balance,
            day: self.day,
            duration: self.duration,
            campaign: self.campaign,
            pdays: self.pdays,
            previous: self.previous,
        };
        (record, label)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the semicolon-delimited training dataset
    #[arg(long, default_value = "data/bank-full.csv")]
    input: PathBuf,

    /// Path to the output model artifact
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Holdout fraction for the stratified split
    #[arg(long, default_value_t = 0.25)]
    test_size: f64,

    /// Random seed for the split and class balancing
    #[arg(long, default_value_t = 41)]
    seed: u64,

    /// Disable minority-class oversampling of the training split
    #[arg(long)]
    no_balance: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.input.exists() {
        bail!(
            "Training data not found at {:?}. Download bank-full.csv from the UCI bank marketing dataset.",
            args.input
        );
    }
    if !(0.0..1.0).contains(&args.test_size) {
        bail!("--test-size must be in [0, 1), got {}", args.test_size);
    }

    println!("Loading training data from {:?}", args.input);
    let file = File::open(&args.input)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(BufReader::new(file));

    let mut records: Vec<FeatureRecord> = Vec::new();
    let mut labels: Vec<i64> = Vec::new();
    for row in rdr.deserialize() {
        let row: DatasetRow = row.context("Failed to parse dataset row")?;
        let (record, label) = row.into_parts();
        records.push(record);
        labels.push(label);
    }
    if records.is_empty() {
        bail!("No rows found in {:?}", args.input);
    }

    let positives = labels.iter().filter(|&&l| l == 1).count();
    println!(
        "Loaded {} rows ({} yes / {} no)",
        records.len(),
        positives,
        records.len() - positives
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let (train_idx, test_idx) = stratified_split(&labels, args.test_size, &mut rng);

    let mut train_records: Vec<FeatureRecord> =
        train_idx.iter().map(|&i| records[i].clone()).collect();
    let mut train_labels: Vec<i64> = train_idx.iter().map(|&i| labels[i]).collect();

    if !args.no_balance {
        // smartcore's logistic regression has no class_weight parameter;
        // approximate balanced weighting by oversampling the minority class.
        let before = train_records.len();
        oversample_minority(&mut train_records, &mut train_labels, &mut rng);
        println!(
            "Balanced training split by oversampling: {} -> {} rows",
            before,
            train_records.len()
        );
    }

    println!("Training on {} samples...", train_records.len());
    let pipeline = Pipeline::fit(&train_records, &train_labels)?;
    println!(
        "Fitted pipeline with {} transformed feature columns",
        pipeline.n_features()
    );

    report_metrics("Train", &pipeline, &train_records, &train_labels);
    if !test_idx.is_empty() {
        let test_records: Vec<FeatureRecord> =
            test_idx.iter().map(|&i| records[i].clone()).collect();
        let test_labels: Vec<i64> = test_idx.iter().map(|&i| labels[i]).collect();
        report_metrics("Test", &pipeline, &test_records, &test_labels);
    }

    println!("Saving model to {:?}", args.output);
    pipeline.save(&args.output)?;
    println!("Done. Model saved successfully.");
    Ok(())
}

/// Splits indices into (train, test) preserving the label distribution.
fn stratified_split(labels: &[i64], test_size: f64, rng: &mut StdRng) -> (Vec<usize>, Vec<usize>) {
    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in [0i64, 1i64] {
        let mut indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(rng);
        let n_test = (indices.len() as f64 * test_size).floor() as usize;
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }
    train.shuffle(rng);
    test.shuffle(rng);
    (train, test)
}

/// Duplicates random minority-class rows until both classes have equal count.
fn oversample_minority(records: &mut Vec<FeatureRecord>, labels: &mut Vec<i64>, rng: &mut StdRng) {
    use rand::Rng;

    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 || positives == negatives {
        return;
    }
    let minority = if positives < negatives { 1 } else { 0 };
    let pool: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l == minority)
        .map(|(i, _)| i)
        .collect();
    let deficit = positives.abs_diff(negatives);
    for _ in 0..deficit {
        let pick = pool[rng.random_range(0..pool.len())];
        records.push(records[pick].clone());
        labels.push(minority);
    }
}

fn report_metrics(split: &str, pipeline: &Pipeline, records: &[FeatureRecord], labels: &[i64]) {
    let mut correct = 0usize;
    let mut hits = [0usize; 2];
    let mut totals = [0usize; 2];
    let mut failed = 0usize;

    for (record, &label) in records.iter().zip(labels.iter()) {
        totals[label as usize] += 1;
        match pipeline.predict(record) {
            Ok((predicted, _)) => {
                if predicted == label {
                    correct += 1;
                    hits[label as usize] += 1;
                }
            }
            Err(_) => failed += 1,
        }
    }

    let n = records.len();
    println!(
        "{split} accuracy: {:.3} (n={n})",
        correct as f64 / n as f64
    );
    for class in 0..2 {
        if totals[class] > 0 {
            println!(
                "  Recall class {}: {:.3} ({}/{})",
                class, hits[class] as f64 / totals[class] as f64, hits[class], totals[class]
            );
        }
    }
    if failed > 0 {
        println!("  {failed} rows failed to transform (unseen categories)");
    }
}
