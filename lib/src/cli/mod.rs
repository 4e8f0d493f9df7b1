//! Command-line interface.
//!
//! ```bash
//! # Fit a model on data.csv and write model.json
//! price-estimator train --data data.csv --model model.json
//!
//! # Estimate one price, or start the interactive prompt without --mileage
//! price-estimator predict --mileage 42000
//!
//! # Score the saved model and chart it
//! price-estimator evaluate
//! price-estimator plot --output chart.svg --mileage 42000
//! ```

pub mod prompt;

use crate::config::TrainingConfig;
use crate::dataset::{CsvLoader, Dataset};
use crate::metrics::Metrics;
use crate::model::{Fitted, InferenceModel, LinearModel};
use crate::serialization::{load_parameters, save_parameters};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Estimate a car's price from its mileage with a fitted linear model.
#[derive(Parser, Debug)]
#[command(name = "price-estimator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the model on a CSV of (mileage, price) rows and save it
    Train(TrainCommand),

    /// Estimate prices with a saved model
    Predict(PredictCommand),

    /// Print MSE, RMSE, MAE and R² of a saved model on a dataset
    Evaluate(EvaluateCommand),

    /// Render the data and the fitted line to an SVG chart
    Plot(PlotCommand),
}

impl Commands {
    pub fn run(&self) -> Result<()> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Predict(cmd) => cmd.run(),
            Commands::Evaluate(cmd) => cmd.run(),
            Commands::Plot(cmd) => cmd.run(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TrainCommand {
    /// Training data (CSV with a header row)
    #[arg(long, short = 'd', env = "PRICE_ESTIMATOR_DATA", default_value = "data.csv")]
    pub data: PathBuf,

    /// Where to write the fitted parameters
    #[arg(long, short = 'm', env = "PRICE_ESTIMATOR_MODEL", default_value = "model.json")]
    pub model: PathBuf,

    /// Training configuration file (JSON); flags below override it
    #[arg(long, short = 'c', env = "PRICE_ESTIMATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Gradient descent step size
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Number of full-batch updates
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Store the normalization scale in the model file
    #[arg(long, overrides_with = "no_persist_scale")]
    pub persist_scale: bool,

    /// Leave the normalization scale out of the model file
    #[arg(long, overrides_with = "persist_scale")]
    pub no_persist_scale: bool,

    /// Return non-finite parameters instead of failing when training diverges
    #[arg(long)]
    pub allow_divergence: bool,
}

impl TrainCommand {
    /// Configuration file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TrainingConfig::default(),
        };
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if self.persist_scale {
            config.persist_scale = true;
        } else if self.no_persist_scale {
            config.persist_scale = false;
        }
        if self.allow_divergence {
            config.detect_divergence = false;
        }
        Ok(config)
    }

    pub fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let trainer = config
            .build_trainer()
            .context("Invalid training configuration")?;

        let dataset = load_dataset(&self.data)?;
        let trained = trainer.fit(&dataset).context("Training failed")?;

        let params = trained.to_params(config.persist_scale);
        save_parameters(&self.model, &params)
            .with_context(|| format!("Failed to save model to {}", self.model.display()))?;
        info!("model saved to {}", self.model.display());

        println!("theta0 = {}", params.theta0);
        println!("theta1 = {}", params.theta1);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictCommand {
    /// Fitted parameters; a missing file means the zero model
    #[arg(long, short = 'm', env = "PRICE_ESTIMATOR_MODEL", default_value = "model.json")]
    pub model: PathBuf,

    /// Mileage to estimate; starts the interactive prompt when omitted
    #[arg(long, allow_negative_numbers = true)]
    pub mileage: Option<String>,

    /// Data drawn alongside the line when --plot is given
    #[arg(long, short = 'd', env = "PRICE_ESTIMATOR_DATA", default_value = "data.csv")]
    pub data: PathBuf,

    /// Write a chart with every estimate highlighted to this SVG file
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

impl PredictCommand {
    pub fn run(&self) -> Result<()> {
        let model = load_model(&self.model)?;
        // the chart is optional; missing data only costs the chart
        let chart_data = match &self.plot {
            Some(_) => match load_dataset(&self.data) {
                Ok(dataset) => Some(dataset),
                Err(e) => {
                    warn!("skipping chart: {:#}", e);
                    None
                }
            },
            None => None,
        };

        if let Some(text) = &self.mileage {
            let mileage = prompt::parse_mileage(text)
                .with_context(|| format!("Bad mileage {:?}", text))?;
            let price = model.predict(&mileage);
            println!("Predicted price: {:.2}", price);
            if let (Some(out), Some(dataset)) = (&self.plot, &chart_data) {
                render_chart(out, dataset, &model, Some(mileage))?;
            }
            return Ok(());
        }

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        prompt::run_prompt(stdin.lock(), &mut stdout, &model, |mileage, _| {
            if let (Some(out), Some(dataset)) = (&self.plot, &chart_data) {
                if let Err(e) = render_chart(out, dataset, &model, Some(mileage)) {
                    warn!("could not draw chart: {:#}", e);
                }
            }
        })
        .context("Prompt I/O failed")?;
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateCommand {
    #[arg(long, short = 'd', env = "PRICE_ESTIMATOR_DATA", default_value = "data.csv")]
    pub data: PathBuf,

    #[arg(long, short = 'm', env = "PRICE_ESTIMATOR_MODEL", default_value = "model.json")]
    pub model: PathBuf,
}

impl EvaluateCommand {
    pub fn run(&self) -> Result<()> {
        let model = load_model(&self.model)?;
        let dataset = load_dataset(&self.data)?;
        let metrics = Metrics::evaluate(&model, &dataset).context("Evaluation failed")?;

        println!("Evaluated on {} observations", dataset.len());
        println!("{}", metrics);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlotCommand {
    #[arg(long, short = 'd', env = "PRICE_ESTIMATOR_DATA", default_value = "data.csv")]
    pub data: PathBuf,

    #[arg(long, short = 'm', env = "PRICE_ESTIMATOR_MODEL", default_value = "model.json")]
    pub model: PathBuf,

    /// Also mark the estimate at this mileage
    #[arg(long)]
    pub mileage: Option<f64>,

    /// Output SVG file
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

impl PlotCommand {
    pub fn run(&self) -> Result<()> {
        let model = load_model(&self.model)?;
        let dataset = load_dataset(&self.data)?;
        render_chart(&self.output, &dataset, &model, self.mileage)
    }
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    CsvLoader::new()
        .load(path)
        .with_context(|| format!("Failed to load training data from {}", path.display()))
}

fn load_model(path: &Path) -> Result<LinearModel<Fitted>> {
    let params = load_parameters(path)
        .with_context(|| format!("Failed to read model {}", path.display()))?;
    LinearModel::<Fitted>::from_params(params)
        .with_context(|| format!("Unusable model {}", path.display()))
}

#[cfg(feature = "plot")]
fn render_chart(
    out: &Path,
    dataset: &Dataset,
    model: &LinearModel<Fitted>,
    highlight: Option<f64>,
) -> Result<()> {
    crate::plot::render_svg(out, dataset, model, highlight, &crate::plot::PlotOptions::default())
        .with_context(|| format!("Failed to write chart {}", out.display()))
}

#[cfg(not(feature = "plot"))]
fn render_chart(
    _out: &Path,
    _dataset: &Dataset,
    _model: &LinearModel<Fitted>,
    _highlight: Option<f64>,
) -> Result<()> {
    anyhow::bail!("charts need the `plot` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn train_command(data: &Path, model: &Path) -> TrainCommand {
        let cli = parse(&[
            "price-estimator",
            "train",
            "--data",
            data.to_str().unwrap(),
            "--model",
            model.to_str().unwrap(),
        ]);
        match cli.command {
            Commands::Train(cmd) => cmd,
            other => panic!("expected train, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_train_flags_override_config() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("train.json");
        std::fs::write(&config_path, r#"{"learning_rate": 0.01, "iterations": 8000}"#)?;

        let cli = parse(&[
            "price-estimator",
            "train",
            "--config",
            config_path.to_str().unwrap(),
            "--iterations",
            "100",
            "--no-persist-scale",
            "--allow-divergence",
        ]);
        let Commands::Train(cmd) = cli.command else {
            panic!("expected train");
        };
        let config = cmd.resolve_config()?;

        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.iterations, 100);
        assert!(!config.persist_scale);
        assert!(!config.detect_divergence);
        Ok(())
    }

    #[test]
    fn test_predict_accepts_negative_mileage_text() {
        let cli = parse(&["price-estimator", "predict", "--model", "m.json", "--mileage", "-5"]);
        let Commands::Predict(cmd) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(cmd.mileage.as_deref(), Some("-5"));
        assert!(cmd.run().is_err());
    }

    #[test]
    fn test_train_then_evaluate() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let data = dir.path().join("data.csv");
        let model = dir.path().join("model.json");
        std::fs::write(&data, "km,price\n10000,8000\n20000,7000\n30000,6000\n40000,5000\n")?;

        train_command(&data, &model).run()?;

        let loaded = load_parameters(&model)?;
        assert!((loaded.theta0 - 9_000.0).abs() < 50.0);
        assert!((loaded.theta1 + 0.1).abs() < 0.01);
        assert_eq!(loaded.max_mileage, Some(40_000.0));

        EvaluateCommand { data, model }.run()?;
        Ok(())
    }

    #[test]
    fn test_train_missing_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let train = train_command(&dir.path().join("absent.csv"), &dir.path().join("model.json"));

        let err = train.run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::RegressionError>(),
            Some(crate::error::RegressionError::MissingInput(_))
        ));
        assert!(!dir.path().join("model.json").exists());
    }

    #[test]
    fn test_persist_scale_flag_pair() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("train.json");
        std::fs::write(&config_path, r#"{"persist_scale": false}"#)?;
        let config_arg = config_path.to_str().unwrap();

        let resolve = |extra: &[&str]| -> Result<TrainingConfig> {
            let mut args = vec!["price-estimator", "train", "--config", config_arg];
            args.extend_from_slice(extra);
            match parse(&args).command {
                Commands::Train(cmd) => cmd.resolve_config(),
                other => panic!("expected train, got {:?}", other),
            }
        };

        assert!(!resolve(&[])?.persist_scale);
        assert!(resolve(&["--persist-scale"])?.persist_scale);
        assert!(!resolve(&["--persist-scale", "--no-persist-scale"])?.persist_scale);
        assert!(resolve(&["--no-persist-scale", "--persist-scale"])?.persist_scale);
        Ok(())
    }

    #[test]
    fn test_persist_scale_takes_no_value() {
        let result = Cli::try_parse_from([
            "price-estimator",
            "train",
            "--persist-scale",
            "false",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_predict_with_plot_survives_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("chart.svg");
        let cli = parse(&[
            "price-estimator",
            "predict",
            "--model",
            dir.path().join("model.json").to_str().unwrap(),
            "--data",
            dir.path().join("absent.csv").to_str().unwrap(),
            "--plot",
            chart.to_str().unwrap(),
            "--mileage",
            "42000",
        ]);
        let Commands::Predict(cmd) = cli.command else {
            panic!("expected predict");
        };

        assert!(cmd.run().is_ok());
        assert!(!chart.exists());
    }
}
