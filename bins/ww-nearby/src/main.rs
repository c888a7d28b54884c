//! ww-nearby: CLI harness for the WanderWombat proximity engine.
//!
//! Ranks a catalog around a fix, replays a fix trace through the engine,
//! searches the catalog, and answers one-off distance queries. Catalog files
//! use the document-store snapshot shape; traces are JSON arrays of location
//! samples.

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wombat_catalog::{
    Attraction, Category, SortBy, parse_attractions, search_attractions, top_rated,
};
use wombat_geo::{Coordinate, display_km, haversine_distance};
use wombat_proximity::{
    CrossingNotification, EngineConfig, LocationSample, NotificationSink, ProximityEngine,
    ProximityWatcher, ReplaySource,
};

#[derive(Parser)]
#[command(name = "ww-nearby")]
#[command(about = "WanderWombat proximity engine CLI")]
#[command(version)]
struct Cli {
    /// Path to a wanderwombat.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalog attractions around a fix
    Rank {
        /// Path to a catalog snapshot JSON file
        catalog: PathBuf,
        /// Fix latitude
        #[arg(long)]
        lat: f64,
        /// Fix longitude
        #[arg(long)]
        lng: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a fix trace and log proximity notifications
    Replay {
        /// Path to a catalog snapshot JSON file
        catalog: PathBuf,
        /// Path to a JSON array of location samples
        trace: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Top-rated attractions, optionally per category
    Top {
        /// Path to a catalog snapshot JSON file
        catalog: PathBuf,
        /// Restrict to one category
        #[arg(long)]
        category: Option<String>,
        /// Sort order: rating, reviews, or recent
        #[arg(long, default_value = "rating")]
        sort: String,
        /// Maximum results to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Search the catalog by name, tag, or description
    Search {
        /// Path to a catalog snapshot JSON file
        catalog: PathBuf,
        /// Search query
        query: String,
        /// Maximum results to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Distance between two coordinates in kilometers
    Distance {
        lat1: f64,
        lng1: f64,
        lat2: f64,
        lng2: f64,
    },
}

/// Root of wanderwombat.toml.
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    #[serde(default)]
    engine: Option<EngineConfig>,
}

impl AppConfig {
    /// Load from an explicit path or the standard candidates.
    fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let candidates = [
            Path::new("wanderwombat.toml"),
            Path::new(".wanderwombat.toml"),
        ];

        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => candidates
                .iter()
                .find(|p| p.exists())
                .map(|p| p.to_path_buf()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn engine_config(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }
}

/// Prints crossing notifications the way the app phrases them.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, crossing: &CrossingNotification) {
        println!(
            "{} You're {}km from {}. Want to explore?",
            "alert:".yellow().bold(),
            crossing.distance_km,
            crossing.name.bold()
        );
    }
}

fn load_catalog(path: &Path) -> anyhow::Result<Vec<Attraction>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let snapshot: serde_json::Value = serde_json::from_str(&content)?;
    let attractions = parse_attractions(&snapshot)?;
    tracing::debug!(count = attractions.len(), "catalog loaded");
    Ok(attractions)
}

fn load_trace(path: &Path) -> anyhow::Result<Vec<LocationSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Rank { catalog, lat, lng, json } => {
            let attractions = load_catalog(&catalog)?;
            let mut engine = ProximityEngine::new(config.engine_config())?;
            let sample = LocationSample {
                coordinate: Coordinate::new(lat, lng),
                accuracy_m: 0.0,
                captured_at_ms: 0,
            };

            let evaluation = engine.evaluate(&sample, &attractions);

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation.ranked)?);
            } else if evaluation.ranked.is_empty() {
                println!(
                    "No attractions within {} km",
                    engine.config().nearby_radius_km
                );
            } else {
                println!(
                    "{} attractions within {} km\n",
                    evaluation.ranked.len().to_string().green().bold(),
                    engine.config().nearby_radius_km
                );
                for (i, entry) in evaluation.ranked.iter().enumerate() {
                    println!(
                        "{:>3}. {:<30} {:>7.2} km  [{}]",
                        i + 1,
                        entry.attraction.name,
                        entry.display_km,
                        entry.attraction.category.as_str().cyan()
                    );
                }
            }
        }

        Commands::Replay { catalog, trace, json } => {
            let attractions = load_catalog(&catalog)?;
            let samples = load_trace(&trace)?;
            let total_samples = samples.len();

            let engine = ProximityEngine::new(config.engine_config())?;
            let source = ReplaySource::new(samples);
            let mut watcher = ProximityWatcher::new(engine, source, ConsoleSink);

            let crossings = watcher.run(&attractions);

            if json {
                let report = serde_json::json!({
                    "samples": total_samples,
                    "crossings": crossings,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "\nReplayed {} samples, {} notifications",
                    total_samples,
                    crossings.to_string().green().bold()
                );
            }
        }

        Commands::Top { catalog, category, sort, limit } => {
            let attractions = load_catalog(&catalog)?;

            let category = match category.as_deref() {
                None | Some("all") => None,
                Some(name) => Some(
                    Category::parse(name)
                        .with_context(|| format!("Unknown category: {name}"))?,
                ),
            };
            let sort_by = match sort.as_str() {
                "rating" => SortBy::Rating,
                "reviews" => SortBy::Reviews,
                "recent" => SortBy::Recent,
                other => anyhow::bail!("Unknown sort order: {other}"),
            };

            for attraction in top_rated(&attractions, category, sort_by, limit) {
                println!(
                    "{:<30} {:>4.1} ★  {:>6} reviews  [{}]",
                    attraction.name.bold(),
                    attraction.rating,
                    attraction.review_count,
                    attraction.category.as_str().cyan()
                );
            }
        }

        Commands::Search { catalog, query, limit } => {
            let attractions = load_catalog(&catalog)?;
            let results = search_attractions(&attractions, &query);

            if results.is_empty() {
                println!("No matches for \"{}\"", query);
            } else {
                for result in results.iter().take(limit) {
                    println!(
                        "{:<30} [{}]  {}",
                        result.attraction.name.bold(),
                        result.attraction.category.as_str().cyan(),
                        result.attraction.description
                    );
                }
            }
        }

        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            let from = Coordinate::new(lat1, lng1);
            let to = Coordinate::new(lat2, lng2);
            if !from.is_valid() || !to.is_valid() {
                eprintln!("Error: coordinate out of range");
                std::process::exit(1);
            }
            println!("{} km", display_km(haversine_distance(&from, &to)));
        }
    }

    Ok(())
}
