//! Distribution calculator binary
//!
//! Reads distribution parameters as JSON (one object or an array of objects)
//! from the file named on the command line, or stdin when none is given, and
//! prints the results as JSON on stdout.
//!
//! A single object that fails to calculate aborts with a non-zero exit code
//! (2 when the input can be fixed and resubmitted). In a batch, every entry
//! yields either a result or an error record, so one bad entry does not hide
//! the others.

use anyhow::Context;
use distribution_engine::{DistributionEngine, DistributionParams, DistributionResult, EngineConfig};
use serde::Serialize;
use std::io::Read;

/// Exit code for input the caller can correct and resubmit
const EXIT_RECOVERABLE: i32 = 2;

/// One entry of a batch response
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Calculated(Box<DistributionResult>),
    Failed {
        index: usize,
        error: String,
        recoverable: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::var("DISTRIBUTION_CONFIG") {
        Ok(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        Err(_) => EngineConfig::from_env().context("Failed to load configuration from environment")?,
    };

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let engine = DistributionEngine::new(config);
    match process(&engine, &input) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) => match err.downcast_ref::<distribution_engine::Error>() {
            Some(engine_err) if engine_err.is_recoverable() => {
                tracing::error!(error = %engine_err, "Distribution rejected; correct the input and retry");
                std::process::exit(EXIT_RECOVERABLE);
            }
            _ => Err(err),
        },
    }
}

/// Calculate one object or a batch array of distribution parameters
fn process(engine: &DistributionEngine, input: &str) -> anyhow::Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(input).context("Input is not valid JSON")?;

    if value.is_array() {
        let batch: Vec<DistributionParams> =
            serde_json::from_value(value).context("Invalid distribution parameters")?;
        tracing::info!("Calculating {} distributions", batch.len());

        let entries: Vec<BatchEntry> = engine
            .calculate_batch(&batch)
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(result) => BatchEntry::Calculated(Box::new(result)),
                Err(err) => {
                    tracing::warn!(index, error = %err, "Distribution failed");
                    BatchEntry::Failed {
                        index,
                        error: err.to_string(),
                        recoverable: err.is_recoverable(),
                    }
                }
            })
            .collect();
        Ok(serde_json::to_value(entries)?)
    } else {
        let params: DistributionParams =
            serde_json::from_value(value).context("Invalid distribution parameters")?;
        let result = engine.calculate(&params)?;
        Ok(serde_json::to_value(result)?)
    }
}
