use std::path::PathBuf;

use clap::{Parser, Subcommand};
use salesdesk_sdk::aggregator::{self, heatmap::{DAY_LABELS, HOURS}};
use salesdesk_sdk::{config, router, Access, Aggregator, SalesDeskSdk};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "SalesDesk command-line client", long_about = None)]
struct Args {
    /// API base URL
    #[arg(long, env = config::ENV_BASE_URL, default_value = config::DEFAULT_BASE_URL)]
    api_url: String,

    /// Directory for the session user and sale extras
    #[arg(long, env = config::ENV_SESSION_DIR)]
    session_dir: Option<PathBuf>,

    /// Sort the daily series by date
    #[arg(long)]
    chronological: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and keep the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Clear the saved session
    Logout,
    /// Show the logged-in user and their home page
    Whoami,
    /// Check whether the logged-in user may open a path
    Authorize { path: String },
    /// Dashboard figures
    Overview {
        #[arg(short, long, default_value_t = config::DEFAULT_TOP_N)]
        top: usize,
        /// Skip the analytics endpoints and aggregate locally
        #[arg(long)]
        local: bool,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Revenue by weekday and hour
    Heatmap,
    /// A sale with its client name and cart
    Sale { id: i64 },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("salesdesk_sdk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut builder = SalesDeskSdk::builder()
        .base_url(&args.api_url)
        .aggregator(Aggregator::new().chronological_days(args.chronological));
    if let Some(dir) = &args.session_dir {
        builder = builder.session_dir(dir);
    }
    let sdk = builder.build()?;

    match args.command {
        Command::Login { email, password } => {
            let user = sdk.auth().login(&email, &password)?;
            println!("Logged in as {} ({})", user.username, user.role);
            println!("Home: {}", router::home_path(user.role));
        }
        Command::Logout => {
            sdk.auth().logout()?;
            println!("Logged out");
        }
        Command::Whoami => match sdk.auth().current_user() {
            Some(user) => {
                println!("{} <{}> {}", user.username, user.email, user.role);
                println!("Route: {}", sdk.route().path());
            }
            None => println!("Not logged in"),
        },
        Command::Authorize { path } => match sdk.authorize(&path) {
            Access::Granted => println!("granted"),
            Access::Login => println!("login required"),
            Access::Pending => println!("account pending activation"),
            Access::Forbidden { home } => println!("forbidden, go to {home}"),
        },
        Command::Overview { top, local, json } => {
            let analytics = sdk.analytics();
            let overview = if local {
                analytics.local_overview(&sdk.snapshot()?, top)
            } else {
                analytics.overview(top)?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
                return Ok(());
            }
            println!("Source: {:?}", overview.source);
            println!("Revenue: {}", overview.kpi.total_revenue);
            println!("Sales: {}", overview.kpi.total_sales);
            println!("Average basket: {}", overview.kpi.average_basket.round_dp(2));
            println!("Low stock: {}", overview.kpi.low_stock_count);
            println!("Categories:");
            for c in &overview.categories {
                println!("  {:<20} {}", c.category_name, c.total_revenue);
            }
            println!("Best sellers:");
            for (i, p) in overview.best_sellers.iter().enumerate() {
                println!("  {}. {} x{}", i + 1, p.product_title, p.total_quantity);
            }
            if overview.unresolved.total() > 0 {
                println!("Unattributed lines: {}", overview.unresolved.total());
            }
        }
        Command::Heatmap => {
            let snapshot = sdk.snapshot()?;
            let heatmap = sdk.aggregator().build_heatmap_matrix(&snapshot.sales);
            print!("     ");
            for h in 0..HOURS {
                print!("{h:>4}");
            }
            println!();
            for (day, row) in heatmap.rows().iter().enumerate() {
                print!("{:<5}", DAY_LABELS[day]);
                for h in 0..HOURS {
                    let shade = match heatmap.intensity(day, h) {
                        i if i == 0.0 => ".",
                        i if i < 0.25 => "░",
                        i if i < 0.5 => "▒",
                        i if i < 0.75 => "▓",
                        _ => "█",
                    };
                    print!("{shade:>4}");
                }
                let day_total = row.iter().fold(rust_decimal::Decimal::ZERO, |acc, v| {
                    aggregator::saturating_add(acc, *v)
                });
                println!("  {day_total}");
            }
            if let Some((day, hour)) = heatmap.peak() {
                println!("Peak: {} {}:00", DAY_LABELS[day], hour);
            }
        }
        Command::Sale { id } => {
            let details = sdk.sales().details(id)?;
            println!("Sale #{} on {}", details.sale.id, details.sale.sale_date);
            println!("Client: {}", details.client_name);
            for line in &details.cart {
                println!(
                    "  {} x{} @ {} = {}",
                    line.product_title, line.quantity, line.unit_price, line.line_total
                );
            }
            println!("Total: {}", details.total);
        }
    }
    Ok(())
}
