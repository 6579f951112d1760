use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use price_scout::config::{load_config, ClientConfig};
use price_scout::controller::{LoadOutcome, NearbyOutcome, SaveOutcome};
use price_scout::models::AmenityKind;
use price_scout::page::{ElementId, MemoryMap, MemoryPage, RadioGroup};
use price_scout::{HttpBackend, PageController};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Controller = PageController<HttpBackend, MemoryPage, MemoryMap>;

#[derive(Parser)]
#[command(name = "price-scout")]
#[command(about = "Drive the price-estimation page headlessly from the terminal")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides PRICE_SCOUT_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the locations the model knows about
    Locations,
    /// Estimate a price, optionally saving it as a favorite
    Estimate {
        #[arg(long)]
        location: String,
        #[arg(long)]
        sqft: f64,
        #[arg(long)]
        bhk: u32,
        #[arg(long)]
        bath: u32,
        #[arg(long, default_value_t = 0)]
        age: u32,
        #[arg(long)]
        save: bool,
    },
    /// Show amenities of a kind around a location
    Nearby {
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "school")]
        kind: String,
        /// Search radius in metres
        #[arg(long)]
        radius: Option<u32>,
    },
    /// List saved favorites
    Favorites,
    /// Delete a saved favorite
    Delete { id: i64 },
    /// Compare two or more saved favorites
    Compare {
        #[arg(required = true, num_args = 2..)]
        ids: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config().context("Failed to load configuration")?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("🏠 Price Scout");
    info!(backend = %config.backend_url, "using backend");

    let mut controller = build_controller(&config)?;

    match cli.command {
        Command::Locations => {
            if let LoadOutcome::Populated(count) = controller.init().await {
                for (i, location) in controller
                    .page()
                    .option_values(ElementId::Locations)
                    .iter()
                    .enumerate()
                {
                    println!("{}. {}", i + 1, location);
                }
                info!("✅ {} locations", count);
            }
        }
        Command::Estimate {
            location,
            sqft,
            bhk,
            bath,
            age,
            save,
        } => {
            let page = controller.page_mut();
            page.set_value(ElementId::Locations, location);
            page.set_value(ElementId::Sqft, sqft.to_string());
            page.check_radio(RadioGroup::Bhk, bhk.to_string());
            page.check_radio(RadioGroup::Bathrooms, bath.to_string());
            page.set_value(ElementId::PropertyAge, age.to_string());

            controller.estimate_price().await;
            println!("{}", controller.page().rendered_text(ElementId::EstimatedPrice));

            if save {
                if let SaveOutcome::Saved(_) = controller.save_favorite().await {
                    print_favorites(&controller);
                }
            }
        }
        Command::Nearby {
            location,
            kind,
            radius,
        } => {
            let kind = AmenityKind::from(kind.as_str());
            controller = controller.with_nearby_radius(radius);
            controller
                .page_mut()
                .set_value(ElementId::Locations, location);
            controller.select_location().await;
            if let NearbyOutcome::Shown(_) = controller.fetch_nearby_places(&kind).await {
                for id in controller.nearby_markers() {
                    if let Some(marker) = controller.map().marker(*id) {
                        println!(
                            "📍 {} ({}, {})",
                            strip_tags(&marker.popup_html),
                            marker.at.lat,
                            marker.at.lon
                        );
                    }
                }
            }
            println!("{}", controller.page().rendered_text(ElementId::NearbyList));
        }
        Command::Favorites => {
            controller.load_favorites().await;
            print_favorites(&controller);
        }
        Command::Delete { id } => {
            controller.delete_favorite(id).await;
            print_favorites(&controller);
        }
        Command::Compare { ids } => {
            controller.load_favorites().await;
            for id in &ids {
                controller.page_mut().check_box(id.to_string());
            }
            controller.compare_selected();
            for row in controller.page().table_rows(ElementId::ComparisonResult) {
                println!("{}", row.join(" | "));
            }
        }
    }

    for alert in controller.page().alerts() {
        println!("⚠️  {alert}");
    }

    Ok(())
}

fn build_controller(config: &ClientConfig) -> Result<Controller> {
    let backend = HttpBackend::with_options(
        &config.backend_url,
        config.request_timeout,
        &config.user_agent,
    )
    .context("Failed to create HTTP client")?;

    Ok(PageController::new(backend, MemoryPage::with_all_elements(), MemoryMap::new())
        .with_config(config))
}

fn print_favorites(controller: &Controller) {
    let items = controller
        .page()
        .texts(ElementId::FavoritesList, "div.favorite-item");
    if items.is_empty() {
        println!("{}", controller.page().rendered_text(ElementId::FavoritesList));
        return;
    }
    for item in items {
        println!("{}", item.trim_end_matches("❌ Remove").trim());
    }
}

fn strip_tags(html: &str) -> String {
    scraper::Html::parse_fragment(html)
        .root_element()
        .text()
        .collect()
}
