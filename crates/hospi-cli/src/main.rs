mod render;
mod search;
mod verify_images;

use clap::{Args, Parser, Subcommand};
use hospi_core::CATEGORIES;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hospi-cli")]
#[command(about = "Find hospitals near a location from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for hospitals; with no flags runs the default search
    Search(SearchArgs),
    /// List the category shortcuts accepted by `search --category`
    Categories,
}

#[derive(Debug, Default, Args)]
pub(crate) struct SearchArgs {
    /// Free-text query, e.g. a specialty or hospital name
    #[arg(long, short)]
    pub query: Option<String>,

    /// Place to search in; defaults to `HOSPI_DEFAULT_LOCATION`
    #[arg(long, short)]
    pub location: Option<String>,

    /// Run one of the category shortcuts instead of a free-text query
    #[arg(long, conflicts_with = "query")]
    pub category: Option<String>,

    /// Latitude used to bias map results
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude used to bias map results
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Print the hospital list as JSON
    #[arg(long)]
    pub json: bool,

    /// Probe every image URL and replace the ones that fail to load
    #[arg(long)]
    pub verify_images: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = hospi_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout is reserved for results so `--json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Categories) => {
            for category in CATEGORIES {
                println!("{category}");
            }
        }
        Some(Commands::Search(args)) => search::run(&config, &args).await?,
        None => search::run(&config, &SearchArgs::default()).await?,
    }

    Ok(())
}
