use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use linfit_gd::explain::{ExplanationClient, ALGORITHM_PROMPT};
use linfit_gd::plot;
use linfit_gd::{AppConfig, Dataset, LinearRegressionGD, TrainingReport, TrueParams};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "linfit-gd")]
#[command(about = "Fit a one-feature linear regression with batch gradient descent")]
#[command(version)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of synthetic samples
    #[arg(long)]
    samples: Option<usize>,

    /// Slope of the generating line
    #[arg(long, allow_negative_numbers = true)]
    slope: Option<f64>,

    /// Intercept of the generating line
    #[arg(long, allow_negative_numbers = true)]
    intercept: Option<f64>,

    /// Standard deviation of the Gaussian noise
    #[arg(long)]
    noise_std: Option<f64>,

    /// Seed for the noise generator
    #[arg(long)]
    seed: Option<u64>,

    /// Step size α
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Iteration budget
    #[arg(long)]
    iterations: Option<usize>,

    /// Log progress every N iterations (0 disables)
    #[arg(long)]
    log_every: Option<usize>,

    /// Stop early once the cost changes by less than this
    #[arg(long)]
    tolerance: Option<f64>,

    /// Fail on the first non-finite cost
    #[arg(long)]
    check_divergence: bool,

    /// Train on an `x,y` CSV file instead of synthetic data
    #[arg(long)]
    data: Option<PathBuf>,

    /// Write the training samples to this CSV file
    #[arg(long)]
    export_data: Option<PathBuf>,

    /// Save a PNG scatter plot of the samples (with the true line for synthetic data)
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Ask the explanation service to describe the algorithm
    #[arg(long)]
    explain: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        let data = &mut config.data;
        if let Some(v) = self.samples {
            data.n_samples = v;
        }
        if let Some(v) = self.slope {
            data.true_slope = v;
        }
        if let Some(v) = self.intercept {
            data.true_intercept = v;
        }
        if let Some(v) = self.noise_std {
            data.noise_std = v;
        }
        if let Some(v) = self.seed {
            data.seed = v;
        }

        let training = &mut config.training;
        if let Some(v) = self.learning_rate {
            training.learning_rate = v;
        }
        if let Some(v) = self.iterations {
            training.n_iterations = v;
        }
        if let Some(v) = self.log_every {
            training.log_every = v;
        }
        if self.tolerance.is_some() {
            training.tolerance = self.tolerance;
        }
        if self.check_divergence {
            training.check_divergence = true;
        }
    }
}

fn load_data(cli: &Cli, config: &AppConfig) -> anyhow::Result<(Dataset, Option<TrueParams>)> {
    match &cli.data {
        Some(path) => {
            let dataset = Dataset::load_csv(path)
                .with_context(|| format!("failed to load samples from {}", path.display()))?;
            info!("loaded {} samples from {}", dataset.len(), path.display());
            Ok((dataset, None))
        }
        None => {
            let generated = config
                .data
                .generate()
                .context("failed to generate synthetic data")?;
            info!(
                "generated {} samples, true parameters: θ₀ = {}, θ₁ = {}",
                generated.dataset.len(),
                generated.truth.intercept,
                generated.truth.slope
            );
            Ok((generated.dataset, Some(generated.truth)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);
    let checked = match cli.data {
        Some(_) => config.training.validate(),
        None => config.validate(),
    };
    checked.context("invalid configuration")?;

    let (dataset, truth) = load_data(&cli, &config)?;
    if let Some(path) = &cli.export_data {
        dataset
            .save_csv(path)
            .with_context(|| format!("failed to export samples to {}", path.display()))?;
        info!("samples written to {}", path.display());
    }
    if let Some(path) = &cli.plot {
        plot::save_data_plot(&dataset, truth.as_ref(), path)
            .with_context(|| format!("failed to save plot to {}", path.display()))?;
        info!("plot saved to {}", path.display());
    }

    let mut model = LinearRegressionGD::from_config(&config.training)?;
    let outcome = model.fit_dataset(&dataset).context("training failed")?;
    info!(
        "stopped after {} iterations ({:?})",
        outcome.iterations, outcome.stop_reason
    );

    let mut report = TrainingReport::new(&model, dataset.len(), truth.as_ref());
    if cli.explain {
        let client = ExplanationClient::from_env(config.explain.clone())?;
        info!("requesting explanation (this may take a moment)");
        let text = client
            .explain(ALGORITHM_PROMPT)
            .await
            .context("explanation request failed")?;
        report = report.with_explanation(text);
    }

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }

    Ok(())
}
