// Command-line trainer. Trains on a CSV dataset and prints the training
// report as JSON. With --save the model also replaces the pretrained
// snapshot in trained_models/.
//
// Usage:
//   ferrite-spam [--save] <dataset.csv> [epochs] [hidden sizes, e.g. 16,8] [activation] [learning rate]
//
// Set RUST_LOG=debug to see every reported epoch loss.

use std::error::Error;
use std::process::ExitCode;

use log::error;

use ferrite_spam::{load_dataset, ClassifierService, JsonFileStore, TrainingRequest, Vectorizer};

const MODEL_DIR: &str = "trained_models";
const USAGE: &str = "usage: ferrite-spam [--save] <dataset.csv> [epochs] [hidden sizes] [activation] [learning rate]";

/// What to train on, how, and whether to keep the result.
#[derive(Debug)]
struct CliArgs {
    dataset_path: String,
    request: TrainingRequest,
    save: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// `Ok(None)` when the dataset path is missing or a flag is unknown.
fn parse_args(args: &[String]) -> Result<Option<CliArgs>, Box<dyn Error>> {
    let (flags, positional): (Vec<&String>, Vec<&String>) = args.iter().partition(|a| a.starts_with("--"));
    if flags.iter().any(|f| *f != "--save") {
        return Ok(None);
    }
    let Some((dataset_path, rest)) = positional.split_first() else {
        return Ok(None);
    };

    let request = TrainingRequest {
        epochs: rest.first().map(|s| s.parse()).transpose()?.unwrap_or(50),
        hidden_sizes: match rest.get(1) {
            Some(s) => s.split(',').map(|p| p.trim().parse()).collect::<Result<_, _>>()?,
            None => vec![16],
        },
        activation_function: rest.get(2).map(|s| s.to_string()).unwrap_or_else(|| "SIGMOID".to_owned()),
        learning_rate: rest.get(3).map(|s| s.parse()).transpose()?.unwrap_or(0.01),
        report_interval: None,
        shuffle_seed: None,
        seed: None,
    };

    Ok(Some(CliArgs { dataset_path: dataset_path.to_string(), request, save: !flags.is_empty() }))
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn Error>> {
    let dataset = load_dataset(&cli.dataset_path)?;
    let mut service = ClassifierService::new(JsonFileStore::new(MODEL_DIR), Vectorizer::from_dataset(&dataset));
    let report = service.train(&cli.request, &dataset)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if cli.save {
        service.save_pretrained()?;
    }
    Ok(())
}
