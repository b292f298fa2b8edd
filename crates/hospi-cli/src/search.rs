//! `search` command: runs one search through the controller and prints the
//! resulting view.

use hospi_core::{AppConfig, Coordinates, SearchFilters, CATEGORIES};
use hospi_search::{ResultSynthesizer, SearchController, ViewState};

use crate::render::render_results;
use crate::verify_images::verify_images;
use crate::SearchArgs;

const IMAGE_CHECK_CONCURRENCY: usize = 8;

impl SearchArgs {
    /// Coordinates given on the command line, when both halves are present.
    pub(crate) fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

pub(crate) fn resolve_category(input: &str) -> anyhow::Result<&'static str> {
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(input.trim()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "unknown category '{input}'; expected one of {}",
                CATEGORIES.join(", ")
            )
        })
}

fn validate_coordinates(coordinates: Coordinates) -> anyhow::Result<Coordinates> {
    if !(-90.0..=90.0).contains(&coordinates.latitude)
        || !(-180.0..=180.0).contains(&coordinates.longitude)
    {
        anyhow::bail!("--lat must be within -90..=90 and --lng within -180..=180");
    }
    Ok(coordinates)
}

pub(crate) async fn run(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let category = args.category.as_deref().map(resolve_category).transpose()?;
    let coordinates = args
        .coordinates()
        .map(validate_coordinates)
        .transpose()?
        .or(config.user_coordinates);

    let location = args
        .location
        .clone()
        .unwrap_or_else(|| config.default_location.clone());
    let synthesizer = ResultSynthesizer::from_config(config)?;
    let controller = SearchController::new(
        synthesizer,
        SearchFilters::new(config.default_query.clone(), location.clone()),
    );
    controller.set_coordinates(coordinates);

    let outcome = match (category, args.query.as_deref()) {
        (Some(category), _) => controller.search_category(category).await,
        (None, Some(query)) => controller.search(query, &location).await,
        (None, None) => controller.mount().await,
    };
    tracing::debug!(?outcome, "search finished");

    let snapshot = controller.snapshot();
    match snapshot.state {
        ViewState::Success { mut hospitals } => {
            if args.verify_images {
                let replaced = verify_images(&mut hospitals, IMAGE_CHECK_CONCURRENCY).await?;
                tracing::info!(replaced, "image verification complete");
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&hospitals)?);
            } else {
                print!("{}", render_results(&snapshot.filters, &hospitals));
            }
            Ok(())
        }
        ViewState::Error { message } => anyhow::bail!(message),
        ViewState::Idle | ViewState::Loading => anyhow::bail!("search did not complete"),
    }
}
