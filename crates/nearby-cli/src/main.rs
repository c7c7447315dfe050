mod render;
mod repl;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use nearby_core::{distance_km, format_distance_km, AppConfig, Category, Coordinate};
use nearby_places::PlacesClient;
use nearby_session::{
    Coordinator, FetchOutcome, FixedLocation, HttpGeolocation, LocationProvider, NoLocation,
};
use tracing_subscriber::EnvFilter;

use crate::render::{print_notices, print_places, print_status, StaticMapSurface};

pub(crate) type CliCoordinator = Coordinator<Box<dyn LocationProvider>, PlacesClient>;

#[derive(Debug, Parser)]
#[command(name = "nearby-cli")]
#[command(about = "Nearby restaurant and cafe recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Fixed position overriding the host geolocation capability.
#[derive(Debug, Clone, Copy, Args)]
struct PositionArgs {
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Locate, fetch recommendations once, and print them with the map
    Recommend {
        /// Category to request (defaults to NEARBY_DEFAULT_CATEGORY)
        #[arg(long, short, value_parser = parse_category)]
        category: Option<Category>,
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Interactive session reading commands from stdin
    Session {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Great-circle distance between two coordinates
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },
    /// List the supported categories
    Categories,
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse::<Category>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Recommend { category, position }) => {
            let config = init_runtime()?;
            run_recommend(&config, category, position).await
        }
        Some(Commands::Session { position }) => {
            let config = init_runtime()?;
            repl::run_session(&config, position).await
        }
        Some(Commands::Distance {
            lat1,
            lng1,
            lat2,
            lng2,
        }) => run_distance(lat1, lng1, lat2, lng2),
        Some(Commands::Categories) => {
            for category in Category::ALL {
                println!("{category}");
            }
            Ok(())
        }
        None => {
            println!("nearby-cli ready; run with --help to list commands");
            Ok(())
        }
    }
}

/// Loads configuration and installs the tracing subscriber. Only the
/// commands that talk to services need this.
fn init_runtime() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    let config = nearby_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(config)
}

/// Picks the location capability: explicit flags, then the configured
/// geolocation endpoint, otherwise none.
fn location_provider(
    config: &AppConfig,
    position: PositionArgs,
) -> anyhow::Result<Box<dyn LocationProvider>> {
    if let (Some(lat), Some(lng)) = (position.lat, position.lng) {
        return Ok(Box::new(FixedLocation(Coordinate::new(lat, lng)?)));
    }
    if let Some(url) = &config.geolocation_url {
        return Ok(Box::new(HttpGeolocation::new(url, &config.user_agent)?));
    }
    Ok(Box::new(NoLocation))
}

pub(crate) fn build_coordinator(
    config: &AppConfig,
    position: PositionArgs,
) -> anyhow::Result<CliCoordinator> {
    let places = PlacesClient::new(
        &config.places_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let coordinator = Coordinator::new(
        location_provider(config, position)?,
        places,
        config.default_category,
    )
    .with_location_timeout(Duration::from_secs(config.location_timeout_secs))
    .with_map_zoom(config.map_zoom);
    Ok(coordinator)
}

async fn run_recommend(
    config: &AppConfig,
    category: Option<Category>,
    position: PositionArgs,
) -> anyhow::Result<()> {
    let mut coordinator = build_coordinator(config, position)?;
    if let Some(category) = category {
        coordinator.select_category(category);
    }

    // Location failures surface as notices and make the fetch below refuse.
    let _ = coordinator.request_location().await;
    let outcome = coordinator.request_recommendations().await;

    print_notices(&coordinator.take_notices());
    print_status(coordinator.state());
    print_places(coordinator.state());

    let mut surface = StaticMapSurface::new(config.maps_api_key.clone());
    coordinator.render(&mut surface)?;

    match outcome {
        FetchOutcome::Succeeded { .. } | FetchOutcome::Superseded => Ok(()),
        FetchOutcome::Refused => anyhow::bail!("no location available; pass --lat/--lng"),
        FetchOutcome::Failed { message } => anyhow::bail!("recommendation failed: {message}"),
    }
}

fn run_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> anyhow::Result<()> {
    let a = Coordinate::new(lat1, lng1)?;
    let b = Coordinate::new(lat2, lng2)?;
    println!("{}", format_distance_km(distance_km(a, b)));
    Ok(())
}

#[cfg(test)]
mod tests;
