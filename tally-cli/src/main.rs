use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_core::is_subscription_merchant;
use tally_engine::{Categorizer, Classifier, ModelStore, TrainOutcome};

mod samples;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Merchant categorization engine CLI")]
struct Cli {
    /// Directory holding the model artifact (default: ~/.tally)
    #[arg(long)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full cascade for a merchant name and print the verdict
    Categorize {
        name: String,

        /// Emit the verdict as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Retrain the classifier from a CSV of merchant,category rows
    Train {
        /// Path to the labeled samples CSV
        #[arg(long)]
        csv: PathBuf,
    },

    /// Ask only the trained classifier, bypassing the rule tiers
    Predict { name: String },

    /// Check whether a merchant looks like a recurring-billing service
    Subscription { name: String },

    /// Show metadata of the stored model artifact
    Info,
}

fn open_store(model_dir: Option<PathBuf>) -> Result<ModelStore> {
    match model_dir {
        Some(dir) => Ok(ModelStore::new(dir)),
        None => ModelStore::default_location(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let classifier = Classifier::new(open_store(cli.model_dir)?);

    match cli.command {
        Command::Categorize { name, json } => {
            let categorizer = Categorizer::new(classifier);
            let verdict = categorizer.categorize(&name);
            if json {
                println!("{}", serde_json::to_string(&verdict)?);
            } else {
                println!("{} ({})", verdict.category, verdict.source.as_str());
            }
        }

        Command::Train { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let samples = samples::parse_samples_csv(&csv)?;
            match classifier.retrain(&samples)? {
                TrainOutcome::Trained {
                    sample_count,
                    categories,
                } => {
                    println!(
                        "trained on {sample_count} samples across {} categories: {}",
                        categories.len(),
                        categories.join(", ")
                    );
                }
                TrainOutcome::Skipped { reason } => {
                    println!("not trained: {reason}");
                }
            }
        }

        Command::Predict { name } => match classifier.predict(&name) {
            Some(prediction) => {
                println!(
                    "{} (confidence {:.2})",
                    prediction.category, prediction.confidence
                );
            }
            None => println!("no prediction (blank name or no trained model)"),
        },

        Command::Subscription { name } => {
            if is_subscription_merchant(&name) {
                println!("{name}: recurring");
            } else {
                println!("{name}: not recurring");
            }
        }

        Command::Info => match classifier.stored_artifact() {
            Some(artifact) => {
                println!("trained at: {}", artifact.trained_at_utc);
                println!("samples:    {}", artifact.sample_count);
                println!("categories: {}", artifact.labels.join(", "));
                println!("features:   {}", artifact.vectorizer.n_features());
            }
            None => println!("no trained model"),
        },
    }

    Ok(())
}
