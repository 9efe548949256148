use std::env;

use anyhow::{Context, bail};
use artifact::ModelFormat;
use linear_tracking::{load_model, log_model};
use log::info;
use model::{LinearModel, PredictionRequest};
use ndarray::Array2;
use rand::Rng;
use registrar::{ArtifactId, ArtifactRegistrar, RegistrarConfig};

const DEFAULT_TRACKING_URI: &str = "file://./mlruns";
const DEFAULT_EXPERIMENT_ID: &str = "0";
const FEATURES: usize = 6;
const LABELS: usize = 3;
const DEFAULT_ROWS: usize = 10;

const USAGE: &str = "usage: linear-tracking log [native|safetensors]\n       linear-tracking predict <experiment_id>/<run_id> [rows]";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = RegistrarConfig::new(
        env::var("TRACKING_URI").unwrap_or_else(|_| DEFAULT_TRACKING_URI.to_string()),
    )
    .with_experiment(
        env::var("EXPERIMENT_ID").unwrap_or_else(|_| DEFAULT_EXPERIMENT_ID.to_string()),
    );
    let mut registrar = ArtifactRegistrar::open(config)?;

    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("log") => {
            let format = match args.next() {
                Some(ext) if ext == "native" => ModelFormat::Native,
                Some(ext) => ModelFormat::from_extension(&ext)
                    .with_context(|| format!("unknown artifact format `{ext}`"))?,
                None => ModelFormat::default(),
            };

            let model = LinearModel::random((LABELS, FEATURES), &mut rand::rng())?;
            let id = log_model(&mut registrar, &model, format)?;
            println!("{id}");
        }
        Some("predict") => {
            let id: ArtifactId = args.next().context(USAGE)?.parse()?;
            let rows = match args.next() {
                Some(rows) => rows.parse::<usize>().context("rows must be a number")?,
                None => DEFAULT_ROWS,
            };

            let adapter = load_model(&registrar, &id)?;
            let mut rng = rand::rng();
            let batch = Array2::from_shape_simple_fn((rows, adapter.model().in_features()), || {
                rng.random::<f32>()
            });

            info!("predicting on a random {rows}x{} batch", batch.ncols());
            let output = adapter.predict(PredictionRequest::Batch(batch))?;
            println!("{:?}", output.into_rows());
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
