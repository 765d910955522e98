use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::Coordinate;
use pipeline::{FilterCriteria, PriceFilter, RankedPlace, Ranker, ScoreWeights, TagFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::{format_distance, RecommendationSession, SessionConfig};
use sources::{EnvLocation, FixedLocation, LocationProvider, PlaceSource, StaticFileSource};
use std::path::PathBuf;
use std::time::Instant;

/// DinePicks - Restaurant recommendations and lottery
#[derive(Parser)]
#[command(name = "dine-picks")]
#[command(about = "Filter, rank and randomly pick nearby restaurants", long_about = None)]
struct Cli {
    /// Path to a JSON array of restaurants
    #[arg(short, long, default_value = "data/places.json", conflicts_with = "search")]
    data_file: PathBuf,

    /// Query the place-search API around the user instead of a file
    #[arg(long)]
    search: bool,

    /// User latitude (falls back to DINE_LOCATION, then the city center)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// User longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Do not append the featured restaurants
    #[arg(long)]
    no_featured: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Price filter: any, band (200-1000), MIN-MAX or level:LABEL
    #[arg(long, default_value = "any")]
    price: PriceFilter,

    /// Tag or scene label to match (any disables the filter)
    #[arg(long, default_value = "any")]
    tag: TagFilter,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.price.clone(), self.tag.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List ranked recommendations
    Recommend {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of recommendations to show
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Show the score breakdown for each recommendation
        #[arg(long)]
        explain: bool,

        /// Weight of each tag or scene label in the score
        #[arg(long)]
        label_weight: Option<f64>,

        /// Meters of distance that cost one score point
        #[arg(long)]
        distance_divisor: Option<f64>,
    },

    /// Pick one of the current recommendations at random
    Lottery {
        #[command(flatten)]
        filters: FilterArgs,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List every tag and scene label with its place count
    Tags,

    /// Write the recommendation cards as HTML
    Render {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the map model as JSON
    Map {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = SessionConfig::from_env();
    if cli.no_featured {
        config.include_featured = false;
    }

    let provider: Box<dyn LocationProvider> = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => Box::new(FixedLocation(Coordinate::new(lat, lng))),
        _ => Box::new(EnvLocation::default()),
    };

    let source = if cli.search {
        PlaceSource::PlaceSearch(config.search.client())
    } else {
        let file = StaticFileSource::new(&cli.data_file);
        tracing::info!("Reading places from {}", file.path().display());
        PlaceSource::StaticFile(file)
    };

    tracing::debug!("Using {} source", source.name());
    let start = Instant::now();
    let mut session = RecommendationSession::start(&config, provider.as_ref(), &source)
        .await
        .context("Failed to start recommendation session")?;
    println!(
        "{} Loaded {} restaurants from {} in {:?}",
        "✓".green(),
        session.catalog().len(),
        source.name(),
        start.elapsed()
    );

    if let Some(reason) = session.fallback_notice() {
        println!(
            "{} Location unavailable ({}), using the default location",
            "!".yellow().bold(),
            reason
        );
    }

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            filters,
            limit,
            explain,
            label_weight,
            distance_divisor,
        } => {
            let defaults = ScoreWeights::default();
            let weights = ScoreWeights {
                labels: label_weight.unwrap_or(defaults.labels),
                distance_divisor: distance_divisor.unwrap_or(defaults.distance_divisor),
                ..defaults
            };
            if weights != defaults {
                session.set_ranker(Ranker::new(weights))?;
            }
            handle_recommend(&mut session, &filters, limit, explain)?
        }
        Commands::Lottery { filters, seed } => handle_lottery(&mut session, &filters, seed)?,
        Commands::Tags => handle_tags(&session),
        Commands::Render { filters, output } => handle_render(&mut session, &filters, output)?,
        Commands::Map { filters } => handle_map(&mut session, &filters)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    session: &mut RecommendationSession,
    filters: &FilterArgs,
    limit: usize,
    explain: bool,
) -> Result<()> {
    session.set_criteria(filters.criteria())?;

    let recommendations = session.recommendations();
    if recommendations.is_empty() {
        println!("{}", "No restaurants match the current filters.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Recommendations (price: {}, tag: {}):",
            filters.price, filters.tag
        )
        .bold()
        .blue()
    );
    for (idx, ranked) in recommendations.iter().take(limit).enumerate() {
        print_place(idx + 1, ranked, false);
        if explain {
            print_explanation(session, ranked);
        }
    }
    Ok(())
}

/// Handle the 'lottery' command
fn handle_lottery(
    session: &mut RecommendationSession,
    filters: &FilterArgs,
    seed: Option<u64>,
) -> Result<()> {
    session.set_criteria(filters.criteria())?;

    let picked = match seed {
        Some(seed) => session.draw_lottery(&mut StdRng::seed_from_u64(seed)),
        None => session.draw_lottery(&mut rand::rng()),
    };
    if picked.is_none() {
        println!("{}", "No restaurants to draw from.".yellow());
        return Ok(());
    }

    println!("{}", "Lottery pick:".bold().magenta());
    for (idx, ranked) in session.recommendations().iter().enumerate() {
        if session.highlighted() == Some(ranked.place.id.as_str()) {
            print_place(idx + 1, ranked, true);
        }
    }
    Ok(())
}

/// Handle the 'tags' command
fn handle_tags(session: &RecommendationSession) {
    println!("{}", "Tags and scenes:".bold().blue());
    for label in session.tag_options() {
        println!(
            "{}{} ({} places)",
            "• ".green(),
            label,
            session.catalog().places_with_label(label).len()
        );
    }
}

/// Handle the 'render' command
fn handle_render(
    session: &mut RecommendationSession,
    filters: &FilterArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    session.set_criteria(filters.criteria())?;
    let html = session.render_cards();

    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} cards to {}",
                "✓".green(),
                session.recommendations().len(),
                path.display()
            );
        }
        None => println!("{html}"),
    }
    Ok(())
}

/// Handle the 'map' command
fn handle_map(session: &mut RecommendationSession, filters: &FilterArgs) -> Result<()> {
    session.set_criteria(filters.criteria())?;
    let map = session.map().context("Session has no map")?;
    if !map.has_access_token() {
        println!(
            "{} DINE_MAP_TOKEN is not set; the map widget will not load tiles",
            "!".yellow().bold()
        );
    }
    println!("{}", serde_json::to_string_pretty(map)?);
    Ok(())
}

fn print_place(rank: usize, ranked: &RankedPlace, highlighted: bool) {
    let place = &ranked.place;
    let price = place
        .avg_price
        .map(|p| format!("¥{p}"))
        .unwrap_or_else(|| "n/a".to_string());
    let rating = place
        .rating
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    let name = if highlighted {
        place.name.bold().magenta().to_string()
    } else {
        place.name.bold().to_string()
    };

    println!(
        "{}. {} - {} | rating {} | {} | score {:.2}",
        rank.to_string().green(),
        name,
        price,
        rating,
        format_distance(ranked.distance_m),
        ranked.score
    );

    let labels: Vec<&str> = place
        .tags
        .iter()
        .chain(place.scene.iter())
        .map(String::as_str)
        .collect();
    if !labels.is_empty() {
        println!("   {}", labels.join(", ").cyan());
    }
}

fn print_explanation(session: &RecommendationSession, ranked: &RankedPlace) {
    let w = session.ranker().weights();
    let place = &ranked.place;
    println!(
        "   rating {:+.2} | labels {:+.2} | price {:+.2} | distance {:+.2}",
        place.rating.unwrap_or(0.0) * w.rating,
        place.label_count() as f64 * w.labels,
        -(place.avg_price.unwrap_or(0.0) / w.price_unit) * w.price,
        -ranked.distance_m / w.distance_divisor
    );
}
