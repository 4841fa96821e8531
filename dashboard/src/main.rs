//! Rice Retail Dashboard - command-line client
//!
//! Loads one dashboard page from the analytics backend and prints what it
//! would show.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use shared::{
    parse_decimal, validate_month, validate_week, validate_year, AnalyticsFilters,
    DashboardFilters, InventoryFilters, Period, PredictionRequest,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rice_dashboard::view::{ElementId, MemoryPage};
use rice_dashboard::Config;

#[derive(Parser)]
#[command(name = "rice-dashboard", version, about = "Rice retail analytics dashboard client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summary figures, recent entries and charts
    Dashboard(DashboardArgs),
    /// The retailer's inventory grouped by date
    Inventory {
        /// Expand every date group
        #[arg(long)]
        expand: bool,
    },
    /// Browse listings by retailer
    Browse(BrowseArgs),
    /// A retailer's company page
    Company {
        /// Retailer id, or a `/company/{id}` path
        retailer: String,
    },
    /// Advanced charts, insights, correlations and market comparison
    Analytics(AnalyticsArgs),
    /// Predict weekly rice demand
    Predict(PredictArgs),
    /// Waste preview for a sales entry, computed locally
    Preview {
        sold: String,
        unsold: String,
        price_per_kg: String,
    },
}

#[derive(Args)]
struct DashboardArgs {
    #[arg(long, value_parser = parse_year)]
    year: Option<i32>,
    #[arg(long, value_parser = parse_month)]
    month: Option<u32>,
    #[arg(long, value_parser = parse_period)]
    period: Option<Period>,
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct BrowseArgs {
    /// Include older listings, not only each retailer's latest
    #[arg(long)]
    all: bool,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    variety: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long, value_parser = parse_price)]
    min_price: Option<Decimal>,
    #[arg(long, value_parser = parse_price)]
    max_price: Option<Decimal>,
}

#[derive(Args)]
struct AnalyticsArgs {
    #[arg(long, value_parser = parse_year)]
    year: Option<i32>,
    #[arg(long, value_parser = parse_month)]
    month: Option<u32>,
    #[arg(long, value_parser = parse_week)]
    week: Option<u32>,
}

#[derive(Args)]
struct PredictArgs {
    #[arg(long)]
    population: f64,
    /// Kilograms per person per week
    #[arg(long)]
    avg_consumption: f64,
    /// Between 0 and 1
    #[arg(long)]
    purchasing_power: f64,
    #[arg(long, default_value_t = 0.0)]
    competitors: f64,
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year: i32 = s.parse().map_err(|_| format!("invalid year: {}", s))?;
    validate_year(year).map_err(str::to_string)?;
    Ok(year)
}

fn parse_month(s: &str) -> Result<u32, String> {
    let month: u32 = s.parse().map_err(|_| format!("invalid month: {}", s))?;
    validate_month(month).map_err(str::to_string)?;
    Ok(month)
}

fn parse_week(s: &str) -> Result<u32, String> {
    let week: u32 = s.parse().map_err(|_| format!("invalid week: {}", s))?;
    validate_week(week).map_err(str::to_string)?;
    Ok(week)
}

fn parse_period(s: &str) -> Result<Period, String> {
    s.parse().map_err(|e: &str| e.to_string())
}

fn parse_price(s: &str) -> Result<Decimal, String> {
    parse_decimal(s).ok_or_else(|| format!("invalid price: {}", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rice_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Environment: {}", config.environment);

    let mut controller = rice_dashboard::connect(&config, MemoryPage::full())?;

    match cli.command {
        Command::Dashboard(args) => {
            let filters = DashboardFilters {
                year: args.year,
                month: args.month,
                period: args.period,
                strict: args.strict,
            };
            controller.refresh(&filters).await;
        }
        Command::Inventory { expand } => {
            controller.load_retailer_inventory().await;
            if expand {
                let ids: Vec<String> = controller
                    .inventory_view()
                    .map(|v| v.groups.iter().map(|g| g.dom_id.clone()).collect())
                    .unwrap_or_default();
                for id in ids {
                    controller.toggle_group(&id);
                }
            }
        }
        Command::Browse(args) => {
            let filters = InventoryFilters {
                latest: Some(!args.all),
                date: args.date,
                variety: args.variety,
                area: args.area,
                min_price: args.min_price,
                max_price: args.max_price,
                retailer_id: None,
            };
            controller.load_consumer_inventory(&filters).await;
        }
        Command::Company { retailer } => {
            let path = if retailer.starts_with("/company/") {
                retailer
            } else {
                rice_dashboard::view::company_href(&retailer)
            };
            if !controller.load_company_page(&path).await {
                anyhow::bail!("Not a company page: {}", path);
            }
        }
        Command::Analytics(args) => {
            let filters = AnalyticsFilters {
                year: args.year,
                month: args.month,
                week: args.week,
            };
            controller.load_analytics(&filters).await;
        }
        Command::Predict(args) => {
            let request = PredictionRequest {
                population: args.population,
                avg_consumption: args.avg_consumption,
                purchasing_power: args.purchasing_power,
                competitors: args.competitors,
            };
            tracing::debug!("Local estimate: {:.2} kg", request.estimate());
            controller.predict(&request).await;
        }
        Command::Preview {
            sold,
            unsold,
            price_per_kg,
        } => {
            controller.update_waste_preview(&sold, &unsold, &price_per_kg);
            if controller.page().is_visible(ElementId::WastePreview) == Some(false) {
                println!("No stock entered");
            }
        }
    }

    let (_, page, charts) = controller.into_parts();
    for alert in page.alerts() {
        eprintln!("! {}", alert);
    }
    println!("{}", page.snapshot());

    let canvases = [
        ElementId::SalesChart,
        ElementId::WasteChart,
        ElementId::RevenueWasteChart,
        ElementId::PriceChart,
        ElementId::SalesDistributionChart,
    ];
    for canvas in canvases {
        for spec in charts.live_on(canvas) {
            println!("{}: {}", canvas, serde_json::to_string(spec)?);
        }
    }

    Ok(())
}
