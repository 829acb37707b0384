//! Weathervane CLI
//!
//! Trains the classifier locally and talks to a running server for
//! predictions.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use application::TrainingService;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, BincodeArtifactStore, CsvDatasetLoader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Weathervane CLI
#[derive(Parser)]
#[command(name = "weathervane-cli")]
#[command(author, version, about = "Weathervane weather condition classifier CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the classifier on a local CSV dataset
    ///
    /// Fits the forest and the label encoder, prints the evaluation
    /// report and persists the artifact pair for the server to load.
    Train {
        /// Path to the training CSV (defaults to the configured dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Classify one set of conditions via the server
    Predict {
        /// Air temperature in degrees Celsius
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,

        /// Dew point temperature in degrees Celsius
        #[arg(long, allow_hyphen_values = true)]
        dew_point: f64,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: f64,

        /// Wind speed in km/h
        #[arg(long)]
        wind_speed: f64,

        /// Visibility in km
        #[arg(long)]
        visibility: f64,

        /// Station pressure in kPa
        #[arg(long)]
        pressure: f64,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Fetch live conditions for a city and classify them via the server
    Fetch {
        /// City name to geocode
        city: String,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Show metadata of the model the server has loaded
    Model {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Check server health (used by Docker healthcheck)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

/// Pull the label→probability pairs out of a prediction response
fn probabilities_from_json(value: &serde_json::Value) -> Vec<(String, f64)> {
    value["probabilities"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let label = entry["label"].as_str()?;
                    let probability = entry["probability"].as_f64()?;
                    Some((label.to_string(), probability))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Render probabilities as a text bar chart, most likely first
fn render_probability_bars(probabilities: &[(String, f64)]) -> String {
    const BAR_WIDTH: usize = 30;

    let label_width = probabilities
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    let mut sorted = probabilities.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut out = String::new();
    for (label, probability) in sorted {
        let filled = ((probability * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar = "█".repeat(filled);
        out.push_str(&format!(
            "  {label:<label_width$}  {bar:<BAR_WIDTH$}  {:>5.1}%\n",
            probability * 100.0
        ));
    }
    out
}

/// Print a prediction body: verdict line plus the bar chart
fn print_prediction(body: &serde_json::Value) {
    if let (Some(label), Some(confidence)) = (body["label"].as_str(), body["confidence"].as_f64()) {
        println!("\n🌦️  Prediction: {label} ({:.1}%)\n", confidence * 100.0);
    }
    print!("{}", render_probability_bars(&probabilities_from_json(body)));
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Train { dataset } => {
            let config = AppConfig::load()?;
            let path = dataset.unwrap_or_else(|| config.data.dataset_path.clone());

            let loader = Arc::new(CsvDatasetLoader::new(config.data.clone()));
            let store = Arc::new(BincodeArtifactStore::new(config.data.clone()));
            let service = TrainingService::new(loader, store);

            println!("🌱 Training on {}", path.display());

            match service.train(&path).await {
                Ok(outcome) => {
                    println!("✅ Training complete");
                    println!("   Rows used: {}", outcome.rows_used);
                    println!("   Multi-condition rows dropped: {}", outcome.rows_dropped);
                    println!("   Classes: {}", outcome.classes.join(", "));
                    println!("   Artifacts: {}", config.data.artifacts_dir.display());
                    println!();
                    println!("{}", outcome.report);
                },
                Err(e) => {
                    println!("❌ Training failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Predict {
            temperature,
            dew_point,
            humidity,
            wind_speed,
            visibility,
            pressure,
            url,
        } => {
            let resp = client
                .post(endpoint_url(&url, "/v1/predict"))
                .json(&serde_json::json!({
                    "temperature_c": temperature,
                    "dew_point_c": dew_point,
                    "humidity": humidity,
                    "wind_speed_kmh": wind_speed,
                    "visibility_km": visibility,
                    "pressure_kpa": pressure,
                }))
                .send()
                .await?;

            let status = resp.status();
            let body = resp.json::<serde_json::Value>().await?;
            if !status.is_success() {
                println!("❌ Prediction failed: {}", body["error"]);
                std::process::exit(1);
            }

            print_prediction(&body);
        },

        Commands::Fetch { city, url } => {
            println!("🌍 Fetching live conditions for {city}...");

            let resp = client
                .get(endpoint_url(&url, &format!("/v1/live/{city}")))
                .send()
                .await?;

            let status = resp.status();
            let body = resp.json::<serde_json::Value>().await?;
            if !status.is_success() {
                println!("❌ Fetch failed: {}", body["error"]);
                std::process::exit(1);
            }

            if let Some(resolved) = body["city"].as_str() {
                println!(
                    "📍 {resolved} ({:.4}, {:.4}) at {}",
                    body["latitude"].as_f64().unwrap_or_default(),
                    body["longitude"].as_f64().unwrap_or_default(),
                    body["observed_at"].as_str().unwrap_or("unknown time")
                );
            }

            let conditions = &body["conditions"];
            println!(
                "   {:.1}°C, dew point {:.1}°C, humidity {}%, wind {:.1} km/h, visibility {:.1} km, pressure {:.2} kPa",
                conditions["temperature_c"].as_f64().unwrap_or_default(),
                conditions["dew_point_c"].as_f64().unwrap_or_default(),
                conditions["humidity"].as_u64().unwrap_or_default(),
                conditions["wind_speed_kmh"].as_f64().unwrap_or_default(),
                conditions["visibility_km"].as_f64().unwrap_or_default(),
                conditions["pressure_kpa"].as_f64().unwrap_or_default(),
            );

            print_prediction(&body["prediction"]);
        },

        Commands::Model { url } => {
            let resp = client
                .get(endpoint_url(&url, "/v1/model"))
                .send()
                .await?
                .json::<serde_json::Value>()
                .await?;

            println!("📦 Loaded Model:");
            println!("{}", serde_json::to_string_pretty(&resp)?);
        },

        Commands::Health { url } => {
            match client.get(endpoint_url(&url, "/ready")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                    std::process::exit(0);
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
