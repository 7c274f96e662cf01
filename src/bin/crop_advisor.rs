//! Crop & Fertilizer Recommendation CLI
//!
//! Loads the crop and fertilizer tables, then answers a single prediction
//! request from command-line values.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use crop_advisor::data::{CROP_FILE, FERTILIZER_FILE};
use crop_advisor::{InputRanges, PredictionRequest, RecommendationData, Recommender};

/// Smart Crop & Fertilizer Recommendation System
#[derive(Parser, Debug)]
#[command(name = "crop_advisor")]
#[command(version = "0.1.0")]
#[command(about = "Suggest a crop and a fertilizer for measured soil and climate conditions", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// Directory holding the two CSV tables
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Crop table path (default: <data-dir>/Crop_recommendation.csv)
    #[arg(long, global = true)]
    crop_file: Option<PathBuf>,

    /// Fertilizer table path (default: <data-dir>/Fertilizer Prediction.csv)
    #[arg(long, global = true)]
    fertilizer_file: Option<PathBuf>,

    /// JSON file overriding the allowed input ranges
    #[arg(long, global = true)]
    ranges: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend a crop and a fertilizer
    Predict(PredictArgs),

    /// List the soil types found in the fertilizer table
    SoilTypes,

    /// Print row counts of the loaded tables
    Inspect,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Temperature (°C)
    #[arg(long, default_value = "25")]
    temperature: f64,

    /// Humidity (%)
    #[arg(long, default_value = "60")]
    humidity: f64,

    /// Rainfall (mm)
    #[arg(long, default_value = "100")]
    rainfall: f64,

    /// Nitrogen (N)
    #[arg(short = 'n', long, default_value = "50")]
    nitrogen: i64,

    /// Phosphorous (P)
    #[arg(short = 'p', long, default_value = "50")]
    phosphorous: i64,

    /// Potassium (K)
    #[arg(short = 'k', long, default_value = "50")]
    potassium: i64,

    /// Soil pH
    #[arg(long, default_value = "6.5")]
    ph: f64,

    /// Moisture (%)
    #[arg(long, default_value = "50")]
    moisture: f64,

    /// Soil type (default: first soil type in the fertilizer table)
    #[arg(long)]
    soil_type: Option<String>,

    /// Write the factor chart as SVG to this path
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Print the recommendation as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let crop_path = cli.crop_file.clone().unwrap_or_else(|| cli.data_dir.join(CROP_FILE));
    let fertilizer_path = cli
        .fertilizer_file
        .clone()
        .unwrap_or_else(|| cli.data_dir.join(FERTILIZER_FILE));

    let ranges = match &cli.ranges {
        Some(path) => InputRanges::load(path)?,
        None => InputRanges::default(),
    };

    let data = RecommendationData::load_from(&crop_path, &fertilizer_path)
        .context("Failed to load recommendation tables")?;
    let recommender = Recommender::new(data, ranges);

    match cli.command {
        Commands::Predict(args) => predict(&recommender, &args),
        Commands::SoilTypes => {
            for soil in recommender.soil_types() {
                println!("{}", soil);
            }
            Ok(())
        }
        Commands::Inspect => {
            inspect(&recommender);
            Ok(())
        }
    }
}

/// Turn command-line values into a request
///
/// Without `--soil-type` the first soil type of the fertilizer table is used.
fn build_request(args: &PredictArgs, soil_types: &[String]) -> Result<PredictionRequest> {
    let soil_type = match &args.soil_type {
        Some(soil) => soil.clone(),
        None => soil_types
            .first()
            .cloned()
            .context("Fertilizer table has no soil types")?,
    };

    Ok(PredictionRequest {
        temperature: args.temperature,
        humidity: args.humidity,
        rainfall: args.rainfall,
        nitrogen: args.nitrogen,
        phosphorous: args.phosphorous,
        potassium: args.potassium,
        ph: args.ph,
        moisture: args.moisture,
        soil_type,
    })
}

fn predict(recommender: &Recommender, args: &PredictArgs) -> Result<()> {
    let request = build_request(args, recommender.soil_types())?;

    let recommendation = recommender.recommend_parallel(&request)?;

    if let Some(path) = &args.chart {
        recommendation
            .factors
            .write_svg(path)
            .with_context(|| format!("Failed to write chart: {:?}", path))?;
        tracing::info!("Chart written to {:?}", path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    println!("Recommended Crop");
    println!("  {}", recommendation.crop);
    println!();
    println!("Recommended Fertilizer");
    println!("  {}", recommendation.fertilizer);
    println!();
    print!("{}", recommendation.factors.to_text());

    Ok(())
}

fn inspect(recommender: &Recommender) {
    let data = recommender.data();

    println!("Crop table: {} rows", data.crops.len());
    for (label, count) in data.crop_label_counts() {
        println!("  {:<20} {}", label, count);
    }

    println!();
    println!("Fertilizer table: {} rows", data.fertilizers.len());
    for (name, count) in data.fertilizer_name_counts() {
        println!("  {:<20} {}", name, count);
    }

    println!();
    println!("Soil types: {}", data.soil_types().join(", "));
}
