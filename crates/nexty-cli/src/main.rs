mod render;

use clap::{Args, Parser, Subcommand};
use nexty_catalog::{CatalogClient, ListingController, ListingState};
use nexty_core::ListingQuery;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nexty")]
#[command(about = "Browse the storefront product catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show one page of products
    Products {
        /// Free-text search
        #[arg(long, default_value = "")]
        search: String,

        /// Sort key passed through to the product API
        #[arg(long, default_value = "")]
        sort: String,

        /// Restrict to one category
        #[arg(long, default_value = "")]
        category: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show the page selected by a storefront query string, e.g. "search=phone&page=2"
    Browse {
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// List the category filter values
    Categories {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args, PartialEq, Eq)]
struct ViewArgs {
    /// Step every card's gallery by this many images (negative steps back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    gallery_step: i64,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = nexty_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CatalogClient::from_config(&config)?;
    tracing::debug!(base_url = %client.base_url(), env = %config.env, "catalog client ready");

    match cli.command {
        Some(Commands::Products {
            search,
            sort,
            category,
            page,
            view,
        }) => {
            let query = ListingQuery::new(search, sort, category, page);
            show_listing(client, query, &view).await?;
        }
        Some(Commands::Browse { query, view }) => {
            show_listing(client, ListingQuery::from_query_string(&query), &view).await?;
        }
        Some(Commands::Categories { json }) => {
            let categories = client.list_categories().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in categories {
                    println!("{category}");
                }
            }
        }
        None => {
            show_listing(client, ListingQuery::default(), &ViewArgs::default()).await?;
        }
    }

    Ok(())
}

/// Mounts a listing for `query` and prints it.
///
/// Product-fetch failures are not errors here: they are logged by the
/// controller and shown as the empty-state message.
async fn show_listing(
    client: CatalogClient,
    query: ListingQuery,
    view: &ViewArgs,
) -> anyhow::Result<()> {
    let controller = ListingController::new(client);
    controller.mount(query).await;
    let state: ListingState = controller.snapshot();

    if view.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&render::listing_json(&state))?
        );
    } else {
        print!("{}", render::render_listing(&state, view.gallery_step));
    }
    Ok(())
}
